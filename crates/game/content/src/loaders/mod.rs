//! Content loaders for reading game data from files.
//!
//! Each loader reads one content unit. Failures carry the offending path; a
//! unit that fails to load is rejected as a whole.

pub mod actions;
pub mod bases;
pub mod config;
pub mod factory;
pub mod level;

pub use actions::ActionLoader;
pub use bases::BaseLoader;
pub use config::ConfigLoader;
pub use factory::{ContentFactory, LoadedContent};
pub use level::LevelLoader;

use std::path::Path;

use anyhow::Context;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Reads a text content file.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Reads a binary content file.
pub(crate) fn read_bytes(path: &Path) -> LoadResult<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))
}
