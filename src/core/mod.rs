//! # Core: the emitter and its internals.
//!
//! ```text
//!   EmitterBuilder ── build() ──► Emitter ─┬─► Registry   (name → ordered subscriptions)
//!   (EmitterConfig,                        └─► Dispatcher (one tokio task per publish pass)
//!    Diagnostics, Handle)                          │
//!                                                  └─► Diagnostics (leaks, listener panics)
//! ```

mod builder;
mod config;
mod dispatch;
mod emitter;
mod registry;

pub use builder::EmitterBuilder;
pub use config::{EmitterConfig, DEFAULT_MAX_LISTENERS};
pub use dispatch::Delivery;
pub use emitter::{listener_count, Emitter, NEW_LISTENER, REMOVE_LISTENER};
