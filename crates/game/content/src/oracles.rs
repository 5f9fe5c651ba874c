//! In-memory oracle implementations backed by loaded content.

use fleet_core::env::AdmiralSetup;
use fleet_core::{
    ActionTable, BaseHandle, BaseObject, BaseObjectOracle, InitialId, InitialObject, LevelOracle,
};

/// A base object type together with the name content refers to it by.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NamedBase {
    pub name: String,
    pub definition: BaseObject,
}

/// Base object types, addressed by their position in the catalog.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BaseCatalog {
    pub bases: Vec<NamedBase>,
}

impl BaseCatalog {
    pub fn new(bases: Vec<NamedBase>) -> Self {
        Self { bases }
    }

    pub fn len(&self) -> usize {
        self.bases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }

    /// Looks up a base type by name.
    pub fn handle_of(&self, name: &str) -> Option<BaseHandle> {
        self.bases
            .iter()
            .position(|base| base.name == name)
            .map(|index| BaseHandle(index as u32))
    }

    /// Every action table named by any base type, tagged with its owner.
    pub fn tables(&self) -> impl Iterator<Item = (&str, ActionTable)> + '_ {
        self.bases.iter().flat_map(|base| {
            base.definition
                .tables
                .iter()
                .map(move |(_, table)| (base.name.as_str(), table))
        })
    }
}

impl BaseObjectOracle for BaseCatalog {
    fn base(&self, handle: BaseHandle) -> Option<BaseObject> {
        self.bases
            .get(handle.0 as usize)
            .map(|base| base.definition.clone())
    }
}

/// One level: its players, authored objects and scripted conditions.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LevelDefinition {
    pub name: String,
    pub admirals: Vec<AdmiralSetup>,
    pub initials: Vec<InitialObject>,
    pub conditions: usize,
}

impl LevelOracle for LevelDefinition {
    fn initial(&self, id: InitialId) -> Option<InitialObject> {
        self.initials.get(id.index()).cloned()
    }

    fn initial_count(&self) -> usize {
        self.initials.len()
    }

    fn condition_count(&self) -> usize {
        self.conditions
    }

    fn admirals(&self) -> Vec<AdmiralSetup> {
        self.admirals.clone()
    }
}
