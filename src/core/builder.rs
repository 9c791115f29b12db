use std::sync::Arc;

use tokio::runtime::Handle;

use crate::diagnostics::{Diagnostics, TracingDiagnostics};

use super::{config::EmitterConfig, dispatch::Dispatcher, emitter::Emitter, registry::Registry};

/// Builder for constructing an [`Emitter`] with optional features.
pub struct EmitterBuilder {
    cfg: EmitterConfig,
    diagnostics: Arc<dyn Diagnostics>,
    handle: Option<Handle>,
}

impl EmitterBuilder {
    /// Creates a new builder with the given configuration.
    pub fn new(cfg: EmitterConfig) -> Self {
        Self {
            cfg,
            diagnostics: Arc::new(TracingDiagnostics),
            handle: None,
        }
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, cfg: EmitterConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Sets the sink for leak warnings and listener panics.
    ///
    /// Defaults to [`TracingDiagnostics`].
    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn Diagnostics>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// Pins delivery to a specific runtime.
    ///
    /// Without a handle, each publish uses the runtime of the calling thread and
    /// fails with [`EmitterError::NoRuntime`](crate::EmitterError::NoRuntime)
    /// outside one.
    pub fn with_handle(mut self, handle: Handle) -> Self {
        self.handle = Some(handle);
        self
    }

    /// Builds the emitter. Does not require a running runtime.
    pub fn build(self) -> Emitter {
        let registry = Registry::new(self.cfg.max_listeners);
        let dispatcher = Dispatcher::new(self.handle, self.diagnostics);
        Emitter::from_parts(registry, dispatcher)
    }
}

impl Default for EmitterBuilder {
    fn default() -> Self {
        Self::new(EmitterConfig::default())
    }
}
