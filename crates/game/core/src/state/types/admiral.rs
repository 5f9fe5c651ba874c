use arrayvec::ArrayVec;

use super::AdmiralId;
use crate::config::EngineConfig;
use crate::math::Fixed;

/// Per-player ledger entry: cash and three independent score counters.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Admiral {
    pub cash: Fixed,
    pub scores: [i32; EngineConfig::SCORE_COUNT],
}

impl Admiral {
    pub fn with_cash(cash: Fixed) -> Self {
        Self {
            cash,
            scores: [0; EngineConfig::SCORE_COUNT],
        }
    }

    pub fn score(&self, which: usize) -> Option<i32> {
        self.scores.get(which).copied()
    }
}

/// All admirals participating in the level, indexed by [`AdmiralId`].
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AdmiralLedger {
    admirals: ArrayVec<Admiral, { EngineConfig::MAX_ADMIRALS }>,
}

impl AdmiralLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an admiral, returning its id, or `None` when the ledger is full.
    pub fn push(&mut self, admiral: Admiral) -> Option<AdmiralId> {
        let id = AdmiralId(self.admirals.len() as u8);
        self.admirals.try_push(admiral).ok().map(|_| id)
    }

    pub fn get(&self, id: AdmiralId) -> Option<&Admiral> {
        self.admirals.get(id.index())
    }

    pub fn get_mut(&mut self, id: AdmiralId) -> Option<&mut Admiral> {
        self.admirals.get_mut(id.index())
    }

    pub fn len(&self) -> usize {
        self.admirals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.admirals.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (AdmiralId, &Admiral)> {
        self.admirals
            .iter()
            .enumerate()
            .map(|(index, admiral)| (AdmiralId(index as u8), admiral))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_stops_at_capacity() {
        let mut ledger = AdmiralLedger::new();
        for expected in 0..EngineConfig::MAX_ADMIRALS {
            assert_eq!(ledger.push(Admiral::default()), Some(AdmiralId(expected as u8)));
        }
        assert_eq!(ledger.push(Admiral::default()), None);
        assert_eq!(ledger.len(), EngineConfig::MAX_ADMIRALS);
    }

    #[test]
    fn unknown_admiral_is_absent() {
        let mut ledger = AdmiralLedger::new();
        ledger.push(Admiral::with_cash(Fixed::from_int(10)));
        assert!(ledger.get(AdmiralId(0)).is_some());
        assert!(ledger.get(AdmiralId(3)).is_none());
    }
}
