//! # Embedding an emitter in a host object.
//!
//! Types that want to expose the emitter surface hold an [`Emitter`] and
//! implement [`EventHost`]; every operation is a provided method that delegates
//! to [`EventHost::emitter`].
//!
//! ## Example
//! ```rust
//! use eventvisor::{args, Emitter, EventHost};
//!
//! struct Timer {
//!     events: Emitter,
//! }
//!
//! impl EventHost for Timer {
//!     fn emitter(&self) -> &Emitter {
//!         &self.events
//!     }
//! }
//!
//! let timer = Timer { events: Emitter::new() };
//! timer.subscribe_fn("fired", |_| {});
//! assert_eq!(timer.listener_count("fired"), 1);
//! ```

use std::fmt;

use crate::core::{Delivery, Emitter};
use crate::error::EmitterError;
use crate::listeners::{Args, Listener};

/// Delegation surface for objects that own an [`Emitter`].
pub trait EventHost {
    /// The emitter backing this host.
    fn emitter(&self) -> &Emitter;

    /// See [`Emitter::subscribe`].
    fn subscribe(&self, event: impl fmt::Display, listener: Listener) {
        self.emitter().subscribe(event, listener);
    }

    /// See [`Emitter::subscribe_once`].
    fn subscribe_once(&self, event: impl fmt::Display, listener: Listener) {
        self.emitter().subscribe_once(event, listener);
    }

    /// See [`Emitter::subscribe_fn`].
    fn subscribe_fn<F>(&self, event: impl fmt::Display, f: F) -> Listener
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        self.emitter().subscribe_fn(event, f)
    }

    /// See [`Emitter::publish`].
    fn publish(&self, event: &str, args: Args) -> Result<Delivery, EmitterError> {
        self.emitter().publish(event, args)
    }

    /// See [`Emitter::unsubscribe`].
    fn unsubscribe(&self, event: &str, listener: &Listener) -> bool {
        self.emitter().unsubscribe(event, listener)
    }

    /// See [`Emitter::unsubscribe_all`].
    fn unsubscribe_all(&self, event: Option<&str>) {
        self.emitter().unsubscribe_all(event);
    }

    /// See [`Emitter::set_max_listeners`].
    fn set_max_listeners<N>(&self, n: N) -> Result<(), EmitterError>
    where
        N: TryInto<usize> + fmt::Debug + Copy,
    {
        self.emitter().set_max_listeners(n)
    }

    /// See [`Emitter::listeners`].
    fn listeners(&self, event: &str) -> Vec<Listener> {
        self.emitter().listeners(event)
    }

    /// See [`Emitter::listener_count`].
    fn listener_count(&self, event: &str) -> usize {
        self.emitter().listener_count(event)
    }
}

impl EventHost for Emitter {
    fn emitter(&self) -> &Emitter {
        self
    }
}
