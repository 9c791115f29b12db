//! # Core diagnostics trait
//!
//! `Diagnostics` is the extension point for routing emitter diagnostics into
//! whatever the host uses (logs, metrics, test probes). It is synchronous
//! because it is called from synchronous operations (`subscribe`) as well as
//! from dispatch tasks.
//!
//! ## Contract
//! - Implementations must not block and must not panic.
//! - The emitter never holds its registry lock while calling a sink, so a sink
//!   may inspect the emitter.

use std::fmt;

/// One-time warning raised when an event name accumulates more listeners than
/// the configured limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeakWarning {
    /// Event name whose bucket crossed the limit.
    pub event: String,
    /// Number of listeners registered under `event` when the limit was crossed.
    pub count: usize,
    /// Limit in force at that moment.
    pub max: usize,
}

impl fmt::Display for LeakWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "possible EventEmitter memory leak detected. {} listeners added. \
             Use emitter.set_max_listeners() to increase limit.",
            self.count
        )
    }
}

/// Receiver of emitter diagnostics.
pub trait Diagnostics: Send + Sync + 'static {
    /// Called at most once per event name (until its bucket is emptied) when
    /// the number of listeners exceeds the limit.
    fn leak_detected(&self, warning: &LeakWarning);

    /// Called when a handler panicked during a deferred invocation.
    ///
    /// # Parameters
    /// - `event`: event name being delivered
    /// - `listener`: handler name ([`Listener::name`](crate::Listener::name))
    /// - `info`: panic message, or `"unknown panic"`
    fn listener_panicked(&self, event: &str, listener: &str, info: &str);

    /// Human-readable name (for debug output).
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
