//! Level definition loader.

use std::path::Path;

use anyhow::Context;
use fleet_core::EngineConfig;

use crate::loaders::{LoadResult, read_file};
use crate::oracles::LevelDefinition;

/// Loader for level definitions from RON files.
pub struct LevelLoader;

impl LevelLoader {
    pub fn load(path: &Path) -> LoadResult<LevelDefinition> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("invalid level {}", path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<LevelDefinition> {
        let level: LevelDefinition = ron::from_str(content)?;
        if level.admirals.len() > EngineConfig::MAX_ADMIRALS {
            anyhow::bail!(
                "level `{}` has {} admirals; at most {} are supported",
                level.name,
                level.admirals.len(),
                EngineConfig::MAX_ADMIRALS
            );
        }
        if let Some(initial) = level.initials.iter().find(|initial| {
            initial
                .owner
                .is_some_and(|owner| owner.index() >= level.admirals.len())
        }) {
            anyhow::bail!(
                "initial at {} is owned by a missing admiral",
                initial.location
            );
        }
        Ok(level)
    }
}
