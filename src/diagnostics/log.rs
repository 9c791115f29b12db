//! # LogWriter: simple diagnostics printer
//!
//! A minimal sink that prints diagnostics to stdout.
//! Use it for test or demo.
//!
//! ## Example output
//! ```text
//! [leak] event="tick" count=11 max=10
//! [listener-panicked] event="tick" listener=demo::boom info=boom
//! ```

use super::{Diagnostics, LeakWarning};

/// Diagnostics writer.
#[derive(Debug, Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Diagnostics for LogWriter {
    fn leak_detected(&self, w: &LeakWarning) {
        println!("[leak] event={:?} count={} max={}", w.event, w.count, w.max);
    }

    fn listener_panicked(&self, event: &str, listener: &str, info: &str) {
        println!("[listener-panicked] event={event:?} listener={listener} info={info}");
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}
