//! Error types used by the emitter.
//!
//! [`EmitterError`] covers every failure the public surface can report:
//!
//! - [`EmitterError::InvalidArgument`] misuse the type system cannot rule out.
//! - [`EmitterError::NoRuntime`] a publish with nowhere to schedule delivery.
//!
//! Listener failures are **not** errors of the emitter: a panicking listener is
//! isolated inside its deferred invocation and reported through
//! [`Diagnostics`](crate::Diagnostics), never through `publish`.

use thiserror::Error;

/// # Errors produced by the emitter.
///
/// All variants are raised synchronously from the call that violated the
/// contract; nothing is deferred.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EmitterError {
    /// An argument was outside the accepted domain (e.g. a negative listener limit).
    #[error("invalid argument: {reason}")]
    InvalidArgument {
        /// What was wrong with the argument.
        reason: String,
    },

    /// No tokio runtime was configured and none is running on the calling thread.
    #[error("no tokio runtime available to schedule listener invocations")]
    NoRuntime,
}

impl EmitterError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use eventvisor::EmitterError;
    ///
    /// let err = EmitterError::InvalidArgument { reason: "negative".into() };
    /// assert_eq!(err.as_label(), "emitter_invalid_argument");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            EmitterError::InvalidArgument { .. } => "emitter_invalid_argument",
            EmitterError::NoRuntime => "emitter_no_runtime",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            EmitterError::InvalidArgument { reason } => format!("invalid argument: {reason}"),
            EmitterError::NoRuntime => "no runtime".to_string(),
        }
    }

    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        EmitterError::InvalidArgument {
            reason: reason.into(),
        }
    }
}
