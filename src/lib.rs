//! # eventvisor
//!
//! **Eventvisor** is an in-process publish/subscribe primitive for tokio
//! applications.
//!
//! Independent pieces of code register interest in named events and are
//! notified, on a later turn of the scheduler, when those events are
//! published. Publishers and subscribers never know about each other.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!   subscribe("tick", a)   subscribe("tick", b)   subscribe_once("tick", c)
//!            │                      │                       │
//!            ▼                      ▼                       ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Emitter                                                          │
//! │  - Registry   "tick" → [Persistent(a), Persistent(b), Once(c)]    │
//! │  - leak heuristic (max_listeners, warned per name)                │
//! │  - Diagnostics sink (leak warnings, listener panics)              │
//! └──────────────────────────────┬────────────────────────────────────┘
//!                                │ publish("tick", args![42])
//!                                │   1. snapshot [a, b, c]
//!                                │   2. remove Once(c) from the registry
//!                                │   3. spawn one dispatch task, return
//!                                ▼
//!                     ┌──────────────────────┐
//!                     │ tokio task           │
//!                     │  a(42) ─► b(42) ─► c(42)
//!                     │  (each catch_unwind) │
//!                     └──────────────────────┘
//! ```
//!
//! ### Subscription lifecycle
//! ```text
//! registered ──► (Once: consumed by a publish pass) ──► removed
//!      └──────── unsubscribe / unsubscribe_all ───────────┘
//! ```
//!
//! ## Features
//! | Area              | Description                                                   | Key types / traits                        |
//! |-------------------|---------------------------------------------------------------|-------------------------------------------|
//! | **Emitter**       | Subscribe, publish, unsubscribe, introspect.                  | [`Emitter`], [`listener_count`]           |
//! | **Listeners**     | Sync or async handlers with identity-based removal.           | [`Listener`], [`Handler`], [`Args`]       |
//! | **Diagnostics**   | Leak warnings and isolated listener panics.                   | [`Diagnostics`], [`TracingDiagnostics`]   |
//! | **Embedding**     | Expose the emitter surface from a host type by delegation.    | [`EventHost`]                             |
//! | **Errors**        | Typed errors for misuse of the surface.                       | [`EmitterError`]                          |
//! | **Configuration** | Leak threshold, diagnostics sink, runtime handle.             | [`EmitterConfig`], [`EmitterBuilder`]     |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] diagnostics sink _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use eventvisor::{args, Emitter, Listener};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let bus = Emitter::new();
//!
//!     bus.subscribe("greet", Listener::from_fn(|args| {
//!         let who = args.get::<&str>(0).copied().unwrap_or("nobody");
//!         println!("hello, {who}");
//!     }));
//!
//!     // Handlers run later, on a tokio task; `wait` is an optional barrier.
//!     bus.publish("greet", args!["world"])?.wait().await;
//!     Ok(())
//! }
//! ```
mod core;
mod diagnostics;
mod error;
mod host;
mod listeners;

// ---- Public re-exports ----

pub use self::core::{
    listener_count, Delivery, Emitter, EmitterBuilder, EmitterConfig, DEFAULT_MAX_LISTENERS,
    NEW_LISTENER, REMOVE_LISTENER,
};
pub use diagnostics::{Diagnostics, LeakWarning, TracingDiagnostics};
pub use error::EmitterError;
pub use host::EventHost;
pub use listeners::{Args, Handler, Listener};

// Optional: expose a simple built-in stdout sink (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use diagnostics::LogWriter;
