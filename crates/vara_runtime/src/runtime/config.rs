//! Runtime configuration types.

/// Runtime configuration options.
#[derive(Clone, Copy, Debug)]
pub struct RuntimeConfig {
    /// Collect automatically at constructor safe points. Embedders that
    /// hold unrooted handles across calls should turn this off and trigger
    /// collection explicitly.
    pub auto_gc: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self { auto_gc: true }
    }
}
