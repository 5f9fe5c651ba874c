//! Base object catalog loader.

use std::path::Path;

use anyhow::Context;

use crate::loaders::{LoadResult, read_file};
use crate::oracles::BaseCatalog;

/// Loader for base object types from RON files.
///
/// ```ron
/// (
///     bases: [
///         (
///             name: "cruiser",
///             definition: (
///                 attributes: "CAN_TURN | CAN_BE_HIT",
///                 max_health: 400,
///                 tables: (destroy: (begin: 0, end: 2)),
///             ),
///         ),
///     ],
/// )
/// ```
pub struct BaseLoader;

impl BaseLoader {
    pub fn load(path: &Path) -> LoadResult<BaseCatalog> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("invalid base catalog {}", path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<BaseCatalog> {
        let catalog: BaseCatalog = ron::from_str(content)?;
        for (index, base) in catalog.bases.iter().enumerate() {
            if catalog.bases[..index].iter().any(|other| other.name == base.name) {
                anyhow::bail!("base type `{}` defined twice", base.name);
            }
        }
        Ok(catalog)
    }
}
