//! # Deferred, panic-isolated delivery.
//!
//! A publish pass ends with one call to [`Dispatcher::dispatch`], which submits
//! a single task to the tokio runtime. That task invokes the snapshot's handlers
//! one after another, in subscription order.
//!
//! ```text
//! publish("tick", args)
//!     │  (registry lock: snapshot + consume once)
//!     ▼
//! Dispatcher::dispatch ──spawn──► [task] ─► h1.call(&args) ─► h2.call(&args) ─► ...
//!                                             │ panic
//!                                             └──► Diagnostics::listener_panicked, next handler
//! ```
//!
//! ## Rules
//! - `dispatch` never runs a handler on the caller's stack.
//! - Handlers of one pass run in order; passes are unordered relative to each
//!   other and to unrelated tasks.
//! - A panicking handler is caught (`catch_unwind`) and reported; the rest of
//!   the pass still runs.
//!
//! **Warning**: `AssertUnwindSafe` is used, which can leave shared state
//! inconsistent if a handler panics while holding a lock.

use std::sync::Arc;

use futures::FutureExt;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::diagnostics::Diagnostics;
use crate::error::EmitterError;
use crate::listeners::{Args, Listener};

/// Handle to the dispatch task of one publish pass.
///
/// Dropping it detaches the task; delivery still happens. There is no way to
/// retract a scheduled invocation.
#[derive(Debug)]
pub struct Delivery {
    join: Option<JoinHandle<()>>,
}

impl Delivery {
    pub(crate) fn empty() -> Self {
        Self { join: None }
    }

    /// True if the pass scheduled nothing (no listeners for the event).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.join.is_none()
    }

    /// Waits until every handler of this pass has returned (or panicked).
    pub async fn wait(self) {
        if let Some(join) = self.join {
            let _ = join.await;
        }
    }
}

/// Submits publish passes to the runtime.
pub(crate) struct Dispatcher {
    handle: Option<Handle>,
    diagnostics: Arc<dyn Diagnostics>,
}

impl Dispatcher {
    pub(crate) fn new(handle: Option<Handle>, diagnostics: Arc<dyn Diagnostics>) -> Self {
        Self {
            handle,
            diagnostics,
        }
    }

    pub(crate) fn diagnostics(&self) -> &dyn Diagnostics {
        self.diagnostics.as_ref()
    }

    /// Resolves where passes run: the configured handle, else the ambient runtime.
    pub(crate) fn runtime(&self) -> Result<Handle, EmitterError> {
        match &self.handle {
            Some(h) => Ok(h.clone()),
            None => Handle::try_current().map_err(|_| EmitterError::NoRuntime),
        }
    }

    /// Spawns one task running `listeners` in order with `args`.
    pub(crate) fn dispatch(
        &self,
        rt: &Handle,
        event: String,
        listeners: Vec<Listener>,
        args: Args,
    ) -> Delivery {
        if listeners.is_empty() {
            return Delivery::empty();
        }
        let diagnostics = Arc::clone(&self.diagnostics);

        let join = rt.spawn(async move {
            for listener in listeners {
                let fut = listener.handler().call(&args);
                if let Err(panic_err) = std::panic::AssertUnwindSafe(fut).catch_unwind().await {
                    let info = {
                        let any = &*panic_err;
                        if let Some(msg) = any.downcast_ref::<&'static str>() {
                            (*msg).to_string()
                        } else if let Some(msg) = any.downcast_ref::<String>() {
                            msg.clone()
                        } else {
                            "unknown panic".to_string()
                        }
                    };
                    diagnostics.listener_panicked(&event, listener.name(), &info);
                }
            }
        });
        Delivery { join: Some(join) }
    }
}
