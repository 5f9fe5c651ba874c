//! Content factory for building oracles from data files.

use std::path::{Path, PathBuf};

use anyhow::Context;
use fleet_core::{ActionPool, EngineConfig, Env, GameEnv, GameState, PcgRng};

use crate::loaders::{ActionLoader, BaseLoader, ConfigLoader, LevelLoader, LoadResult};
use crate::oracles::{BaseCatalog, LevelDefinition};

/// Content factory that loads game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── actions.bin
/// ├── bases.ron
/// └── levels/
///     ├── first_contact.ron
///     └── blockade.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load engine configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<EngineConfig> {
        ConfigLoader::load(&self.data_dir.join("config.toml"))
    }

    /// Load the action pool from `actions.bin`.
    pub fn load_actions(&self) -> LoadResult<ActionPool> {
        ActionLoader::load(&self.data_dir.join("actions.bin"))
    }

    /// Load base object types from `bases.ron`.
    pub fn load_bases(&self) -> LoadResult<BaseCatalog> {
        BaseLoader::load(&self.data_dir.join("bases.ron"))
    }

    /// Load a level from `levels/{level_name}.ron`.
    pub fn load_level(&self, level_name: &str) -> LoadResult<LevelDefinition> {
        let path = self.data_dir.join("levels").join(format!("{level_name}.ron"));
        LevelLoader::load(&path)
    }

    /// Loads every unit a level needs and checks that they agree with each
    /// other.
    ///
    /// # Errors
    ///
    /// Any unit failing to load, a base table reaching past the action pool,
    /// or a level initial naming an unknown base type.
    pub fn load_level_content(&self, level_name: &str) -> LoadResult<LoadedContent> {
        let content = LoadedContent {
            config: self.load_config()?,
            actions: self.load_actions()?,
            bases: self.load_bases()?,
            level: self.load_level(level_name)?,
            rng: PcgRng,
        };
        content
            .validate()
            .with_context(|| format!("level `{level_name}` content is inconsistent"))?;
        tracing::debug!(
            "loaded level {} with {} bases and {} action records",
            level_name,
            content.bases.len(),
            content.actions.len()
        );
        Ok(content)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

/// All content for one level, owning every oracle the engine needs.
pub struct LoadedContent {
    pub config: EngineConfig,
    pub actions: ActionPool,
    pub bases: BaseCatalog,
    pub level: LevelDefinition,
    pub rng: PcgRng,
}

impl LoadedContent {
    /// Cross-checks units that reference each other.
    pub fn validate(&self) -> LoadResult<()> {
        for (name, table) in self.bases.tables() {
            if !self.actions.covers(table) {
                anyhow::bail!(
                    "base `{}` names records {}..{} but the pool has {}",
                    name,
                    table.begin,
                    table.end,
                    self.actions.len()
                );
            }
        }
        for (slot, initial) in self.level.initials.iter().enumerate() {
            if initial.base.0 as usize >= self.bases.len() {
                anyhow::bail!("initial {} names unknown {}", slot, initial.base);
            }
        }
        Ok(())
    }

    /// Borrows the content as an engine environment.
    pub fn env(&self) -> GameEnv<'_> {
        Env::with_all(
            &self.bases,
            &self.level,
            &self.actions,
            &self.config,
            &self.rng,
        )
        .as_game_env()
    }

    /// Builds the opening state of the level.
    pub fn new_game(&self, game_seed: u64) -> LoadResult<GameState> {
        GameState::from_level(game_seed, &self.level, &self.bases)
            .with_context(|| format!("cannot set up level `{}`", self.level.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }
}
