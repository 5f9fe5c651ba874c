//! File-backed game content for the action engine.
//!
//! This crate turns content units on disk into the read-only oracles that
//! `fleet-core` evaluates against:
//! - the action pool (binary, 48-byte records)
//! - base object types (RON)
//! - level definitions (RON)
//! - engine configuration (TOML)
//!
//! Content is consumed through oracles and never appears in game state.

pub mod oracles;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use oracles::{BaseCatalog, LevelDefinition, NamedBase};

#[cfg(feature = "loaders")]
pub use loaders::{
    ActionLoader, BaseLoader, ConfigLoader, ContentFactory, LevelLoader, LoadResult,
    LoadedContent,
};
