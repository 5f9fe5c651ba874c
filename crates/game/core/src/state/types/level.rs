use super::{AdmiralId, InitialId, ObjectHandle};

/// How the level ended, as declared by the first `DeclareWinner` to fire.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Outcome {
    /// `None` when the level was lost by everyone.
    pub winner: Option<AdmiralId>,
    /// Chapter to advance to; `None` ends the campaign.
    pub next_chapter: Option<i32>,
    pub text_id: i32,
}

/// Level-scoped bookkeeping: initial object slots, scripted conditions and the
/// final outcome.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelState {
    /// Live object for each level initial, `None` while hidden or destroyed.
    pub initials: Vec<Option<ObjectHandle>>,
    /// "True yet" latches for the level's scripted conditions.
    pub conditions: Vec<bool>,
    pub outcome: Option<Outcome>,
}

impl LevelState {
    pub fn new(initial_count: usize, condition_count: usize) -> Self {
        Self {
            initials: vec![None; initial_count],
            conditions: vec![false; condition_count],
            outcome: None,
        }
    }

    pub fn initial(&self, id: InitialId) -> Option<ObjectHandle> {
        self.initials.get(id.index()).copied().flatten()
    }

    /// Binds `object` to an initial slot. Out-of-range ids are ignored.
    pub fn bind_initial(&mut self, id: InitialId, object: ObjectHandle) -> bool {
        match self.initials.get_mut(id.index()) {
            Some(slot) => {
                *slot = Some(object);
                true
            }
            None => false,
        }
    }

    /// Records the outcome unless one was already declared.
    pub fn declare(&mut self, outcome: Outcome) -> bool {
        if self.outcome.is_some() {
            return false;
        }
        self.outcome = Some(outcome);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_declaration_wins() {
        let mut level = LevelState::new(0, 0);
        let first = Outcome {
            winner: Some(AdmiralId(0)),
            next_chapter: Some(2),
            text_id: 10,
        };
        assert!(level.declare(first));
        assert!(!level.declare(Outcome {
            winner: Some(AdmiralId(1)),
            next_chapter: None,
            text_id: 11,
        }));
        assert_eq!(level.outcome, Some(first));
    }

    #[test]
    fn binding_past_the_end_is_refused() {
        let mut level = LevelState::new(2, 0);
        assert!(!level.bind_initial(InitialId(5), ObjectHandle::new(0, 0)));
        assert!(level.bind_initial(InitialId(1), ObjectHandle::new(3, 1)));
        assert_eq!(level.initial(InitialId(1)), Some(ObjectHandle::new(3, 1)));
        assert_eq!(level.initial(InitialId(0)), None);
    }
}
