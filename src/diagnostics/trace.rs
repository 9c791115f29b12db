//! Default diagnostics sink backed by `tracing`.

use super::{Diagnostics, LeakWarning};

/// Writes diagnostics as `tracing` events.
///
/// - leak warnings → `WARN` with `event`, `count`, `max` fields
/// - listener panics → `ERROR` with `event`, `listener`, `info` fields
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn leak_detected(&self, warning: &LeakWarning) {
        tracing::warn!(
            event = %warning.event,
            count = warning.count,
            max = warning.max,
            "{warning}"
        );
    }

    fn listener_panicked(&self, event: &str, listener: &str, info: &str) {
        tracing::error!(event = %event, listener = %listener, info = %info, "listener panicked");
    }

    fn name(&self) -> &'static str {
        "tracing"
    }
}
