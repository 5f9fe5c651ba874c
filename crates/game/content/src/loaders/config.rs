//! Engine configuration loader.

use std::path::Path;

use anyhow::Context;
use fleet_core::EngineConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for engine configuration from TOML files. Missing keys keep their
/// defaults.
pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load(path: &Path) -> LoadResult<EngineConfig> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<EngineConfig> {
        Ok(toml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config = ConfigLoader::parse("max_delayed_actions = 8\n").unwrap();
        assert_eq!(config.max_delayed_actions, 8);
        assert_eq!(config.max_cascade_depth, EngineConfig::DEFAULT_MAX_CASCADE_DEPTH);
        assert_eq!(config.max_sparks, EngineConfig::DEFAULT_MAX_SPARKS);
    }
}
