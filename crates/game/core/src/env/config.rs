//! Configuration oracle for exposing engine tunables to the engine.

use crate::config::EngineConfig;

/// Provides access to runtime configuration values.
pub trait ConfigOracle: Send + Sync {
    /// Maximum number of delayed applications pending at once.
    fn max_delayed_actions(&self) -> usize;

    /// Number of follow-up waves processed before tables stop running.
    fn max_cascade_depth(&self) -> u32;

    /// Upper bound on sparks from a single record.
    fn max_sparks(&self) -> u32;
}

impl ConfigOracle for EngineConfig {
    fn max_delayed_actions(&self) -> usize {
        self.max_delayed_actions
    }

    fn max_cascade_depth(&self) -> u32 {
        self.max_cascade_depth
    }

    fn max_sparks(&self) -> u32 {
        self.max_sparks
    }
}
