//! Action pool loader.
//!
//! The pool is a flat file of 48-byte records; tables elsewhere in content
//! address it by record index.

use std::path::Path;

use anyhow::Context;
use fleet_core::ActionPool;
use fleet_core::action::decode_pool;

use crate::loaders::{LoadResult, read_bytes};

/// Loader for the binary action pool.
pub struct ActionLoader;

impl ActionLoader {
    /// Decodes every record in the file at `path`.
    ///
    /// A single malformed record rejects the whole pool.
    pub fn load(path: &Path) -> LoadResult<ActionPool> {
        let bytes = read_bytes(path)?;
        Self::parse(&bytes).with_context(|| format!("invalid action pool {}", path.display()))
    }

    /// Decodes an in-memory pool.
    pub fn parse(bytes: &[u8]) -> LoadResult<ActionPool> {
        let records = decode_pool(bytes)?;
        tracing::debug!("decoded {} action records", records.len());
        Ok(ActionPool::new(records))
    }
}
