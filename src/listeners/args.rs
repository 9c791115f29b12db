//! # Event payload.
//!
//! [`Args`] is the ordered list of values a publisher passes along with an
//! event. Values are type-erased (`Arc<dyn Any + Send + Sync>`) so one emitter
//! can carry heterogeneous payloads; listeners read them back with
//! [`Args::get`] using the type they expect.
//!
//! ## Example
//! ```rust
//! use eventvisor::{args, Args};
//!
//! let a: Args = args!["tick", 42_u32];
//! assert_eq!(a.len(), 2);
//! assert_eq!(a.get::<&str>(0), Some(&"tick"));
//! assert_eq!(a.get::<u32>(1), Some(&42));
//! assert_eq!(a.get::<String>(1), None);
//! ```

use std::any::Any;
use std::fmt;
use std::sync::Arc;

type Value = Arc<dyn Any + Send + Sync>;

/// Ordered, type-erased event payload.
///
/// Cloning is cheap: every value is behind an `Arc`.
#[derive(Clone, Default)]
pub struct Args {
    values: Vec<Value>,
}

impl Args {
    /// Creates an empty payload.
    #[must_use]
    pub fn new() -> Self {
        Self { values: Vec::new() }
    }

    /// Appends a value and returns the payload (builder style).
    #[must_use]
    pub fn with<T: Any + Send + Sync>(mut self, value: T) -> Self {
        self.values.push(Arc::new(value));
        self
    }

    /// Appends a value in place.
    pub fn push<T: Any + Send + Sync>(&mut self, value: T) {
        self.values.push(Arc::new(value));
    }

    /// Returns the value at `index` if it exists and has type `T`.
    pub fn get<T: Any>(&self, index: usize) -> Option<&T> {
        self.values.get(index)?.downcast_ref::<T>()
    }

    /// Number of values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if the payload carries no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl fmt::Debug for Args {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Args").field("len", &self.values.len()).finish()
    }
}

/// Builds an [`Args`] payload from a list of expressions.
///
/// `args![]` is the empty payload.
#[macro_export]
macro_rules! args {
    () => {
        $crate::Args::new()
    };
    ($($value:expr),+ $(,)?) => {
        $crate::Args::new()$(.with($value))+
    };
}
