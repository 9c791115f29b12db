//! # Emitter configuration.
//!
//! Provides [`EmitterConfig`], the settings an [`Emitter`](crate::Emitter) is
//! built with.
//!
//! ## Sentinel values
//! - `max_listeners = 0` → unlimited (leak heuristic disabled)

/// Default leak threshold per event name.
pub const DEFAULT_MAX_LISTENERS: usize = 10;

/// Configuration for one emitter.
///
/// ## Field semantics
/// - `max_listeners`: listeners per event name before a one-time leak warning
///   is reported (`0` = never warn). Can be changed later with
///   [`Emitter::set_max_listeners`](crate::Emitter::set_max_listeners).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmitterConfig {
    /// Leak-warning threshold per event name.
    pub max_listeners: usize,
}

impl EmitterConfig {
    /// Returns the leak threshold as an `Option`.
    ///
    /// - `None` → unlimited
    /// - `Some(n)` → warn once a name has more than `n` listeners
    #[inline]
    pub fn listener_limit(&self) -> Option<usize> {
        if self.max_listeners == 0 {
            None
        } else {
            Some(self.max_listeners)
        }
    }
}

impl Default for EmitterConfig {
    /// Default configuration:
    ///
    /// - `max_listeners = 10`
    fn default() -> Self {
        Self {
            max_listeners: DEFAULT_MAX_LISTENERS,
        }
    }
}
