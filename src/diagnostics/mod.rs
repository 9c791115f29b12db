//! # Diagnostics sinks.
//!
//! The emitter never fails because of what listeners do or how many there are.
//! Those conditions are observability only and flow into a [`Diagnostics`]
//! sink instead:
//!
//! ```text
//! subscribe ── bucket.len() > max_listeners ──► Diagnostics::leak_detected(&LeakWarning)
//! dispatch  ── handler panicked ──────────────► Diagnostics::listener_panicked(event, info)
//! ```
//!
//! Provided implementations:
//! - [`TracingDiagnostics`] (default) → `tracing` warn/error records
//! - [`LogWriter`] (enabled via `logging` feature) → prints to stdout

mod diagnostic;
mod trace;

#[cfg(feature = "logging")]
mod log;

pub use diagnostic::{Diagnostics, LeakWarning};
pub use trace::TracingDiagnostics;

#[cfg(feature = "logging")]
pub use log::LogWriter;
