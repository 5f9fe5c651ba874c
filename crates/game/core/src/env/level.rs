//! Level definition oracle: authored initial objects, conditions and players.

use super::BaseHandle;
use crate::math::{Fixed, Point};
use crate::state::{AdmiralId, InitialId};

/// An object placed by the level author.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InitialObject {
    pub base: BaseHandle,
    #[cfg_attr(feature = "serde", serde(default))]
    pub owner: Option<AdmiralId>,
    pub location: Point,
    #[cfg_attr(feature = "serde", serde(default))]
    pub direction: i32,
    /// Hidden initials stay out of play until revealed by `AlterHidden`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub hidden: bool,
}

/// Starting ledger entry for one admiral.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AdmiralSetup {
    pub cash: Fixed,
}

pub trait LevelOracle: Send + Sync {
    fn initial(&self, id: InitialId) -> Option<InitialObject>;

    fn initial_count(&self) -> usize;

    /// Number of scripted conditions whose "true yet" latch the level tracks.
    fn condition_count(&self) -> usize;

    fn admirals(&self) -> Vec<AdmiralSetup>;

    /// Convenience accessor for a single admiral's setup.
    fn admiral(&self, id: AdmiralId) -> Option<AdmiralSetup> {
        self.admirals().get(id.index()).copied()
    }
}
