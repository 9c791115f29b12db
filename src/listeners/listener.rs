//! # Listener handles
//!
//! A [`Listener`] is what the emitter stores and what callers hand back to
//! [`Emitter::unsubscribe`](crate::Emitter::unsubscribe). Its identity is the
//! identity of the shared handler allocation: clones of one listener are equal,
//! two listeners built from identical closures are not.
//!
//! The behavior behind a listener is the [`Handler`] trait. Closures are the
//! common case and are covered by [`Listener::from_fn`] (sync) and
//! [`Listener::from_async`] (async); types with state can implement
//! [`Handler`] directly.
//!
//! ## Example
//! ```rust
//! use eventvisor::{Args, Handler, Listener};
//! use async_trait::async_trait;
//!
//! struct Audit;
//!
//! #[async_trait]
//! impl Handler for Audit {
//!     async fn call(&self, args: &Args) {
//!         let _ = args.len();
//!     }
//!     fn name(&self) -> &'static str { "audit" }
//! }
//!
//! let a = Listener::new(Audit);
//! let b = a.clone();
//! assert_eq!(a, b);
//! assert_ne!(a, Listener::new(Audit));
//! ```

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use super::Args;

/// Contract for event handlers.
///
/// Called from the dispatch task scheduled by `publish`, never from inside the
/// `publish` call itself. A panic inside `call` is caught and reported; it does
/// not affect other handlers.
#[async_trait]
pub trait Handler: Send + Sync + 'static {
    /// Handle one occurrence of the event the handler was subscribed to.
    async fn call(&self, args: &Args);

    /// Human-readable name (for logs).
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

struct FnHandler<F>(F);

#[async_trait]
impl<F> Handler for FnHandler<F>
where
    F: Fn(&Args) + Send + Sync + 'static,
{
    async fn call(&self, args: &Args) {
        (self.0)(args)
    }

    fn name(&self) -> &'static str {
        std::any::type_name::<F>()
    }
}

struct AsyncFnHandler<F>(F);

#[async_trait]
impl<F, Fut> Handler for AsyncFnHandler<F>
where
    F: Fn(Args) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    async fn call(&self, args: &Args) {
        (self.0)(args.clone()).await
    }

    fn name(&self) -> &'static str {
        std::any::type_name::<F>()
    }
}

/// Shared, identity-comparable handle to a [`Handler`].
#[derive(Clone)]
pub struct Listener {
    handler: Arc<dyn Handler>,
}

impl Listener {
    /// Wraps a handler value.
    pub fn new<H: Handler>(handler: H) -> Self {
        Self {
            handler: Arc::new(handler),
        }
    }

    /// Wraps an already shared handler. Identity is the given `Arc`.
    pub fn from_arc(handler: Arc<dyn Handler>) -> Self {
        Self { handler }
    }

    /// Wraps a synchronous closure.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        Self::new(FnHandler(f))
    }

    /// Wraps a closure returning a future. The closure receives its own copy of the payload.
    pub fn from_async<F, Fut>(f: F) -> Self
    where
        F: Fn(Args) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        Self::new(AsyncFnHandler(f))
    }

    /// True if both handles point at the same handler allocation.
    #[inline]
    pub fn ptr_eq(&self, other: &Listener) -> bool {
        std::ptr::eq(
            Arc::as_ptr(&self.handler) as *const u8,
            Arc::as_ptr(&other.handler) as *const u8,
        )
    }

    /// Name reported by the underlying handler.
    pub fn name(&self) -> &'static str {
        self.handler.name()
    }

    pub(crate) fn handler(&self) -> &dyn Handler {
        self.handler.as_ref()
    }
}

impl PartialEq for Listener {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Listener {}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener")
            .field("name", &self.name())
            .field("ptr", &(Arc::as_ptr(&self.handler) as *const u8))
            .finish()
    }
}
