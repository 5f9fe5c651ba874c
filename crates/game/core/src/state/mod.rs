//! Authoritative simulation state.
//!
//! This module owns the object arena, the admiral ledger, level bookkeeping,
//! interface state and the delay queue. The engine is the only writer; hosts
//! read it between ticks.
mod error;
#[cfg(feature = "serde")]
mod root;
mod table;
pub mod types;

pub use error::StateError;
#[cfg(feature = "serde")]
pub use root::compute_state_root;
pub use table::ObjectTable;
pub use types::{
    Admiral, AdmiralId, AdmiralLedger, Attributes, InitialId, KeyMask, LevelState, MiniSelection,
    ObjectHandle, Occupation, Outcome, Presence, SpaceObject, Tick, UiState, WeaponMount,
    WeaponSlot,
};

use crate::action::DelayScheduler;
use crate::config::EngineConfig;
use crate::env::{BaseObjectOracle, InitialObject, LevelOracle};

/// Canonical snapshot of the deterministic simulation state.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    /// RNG seed for deterministic random generation.
    ///
    /// Set once at level start and never modified. Combined with `rng_nonce`
    /// to derive a fresh seed for every roll.
    pub game_seed: u64,

    /// Current simulation tick.
    pub clock: Tick,

    /// Roll counter; incremented once per random draw.
    pub rng_nonce: u64,

    pub objects: ObjectTable,
    pub admirals: AdmiralLedger,
    pub level: LevelState,
    pub ui: UiState,

    /// Pending delayed applications, polled once per tick.
    pub delayed: DelayScheduler,
}

impl GameState {
    /// Creates an empty state with a specific game seed.
    pub fn with_seed(game_seed: u64) -> Self {
        Self {
            game_seed,
            ..Self::default()
        }
    }

    /// Builds the opening state of a level.
    ///
    /// Admirals are created with their starting cash and every non-hidden
    /// initial object is spawned and bound to its slot. Create tables are not
    /// run here.
    ///
    /// # Errors
    ///
    /// Fails when the level asks for more admirals than the ledger holds, an
    /// initial names an unknown base, or the object table overflows.
    pub fn from_level<L, B>(game_seed: u64, level: &L, bases: &B) -> Result<Self, StateError>
    where
        L: LevelOracle + ?Sized,
        B: BaseObjectOracle + ?Sized,
    {
        let mut state = Self::with_seed(game_seed);

        let admirals = level.admirals();
        if admirals.len() > EngineConfig::MAX_ADMIRALS {
            return Err(StateError::AdmiralLedgerFull {
                max: EngineConfig::MAX_ADMIRALS,
                requested: admirals.len(),
            });
        }
        for admiral in admirals {
            state.admirals.push(Admiral::with_cash(admiral.cash));
        }

        state.level = LevelState::new(level.initial_count(), level.condition_count());

        for index in 0..level.initial_count() {
            let id = InitialId(index as u16);
            let Some(initial) = level.initial(id) else {
                continue;
            };
            if initial.hidden {
                continue;
            }
            state.spawn_initial(id, &initial, bases)?;
        }

        Ok(state)
    }

    /// Spawns a level initial and binds it to its slot.
    ///
    /// # Errors
    ///
    /// Fails when the initial names an unknown base or the object table is full.
    pub fn spawn_initial<B>(
        &mut self,
        id: InitialId,
        initial: &InitialObject,
        bases: &B,
    ) -> Result<ObjectHandle, StateError>
    where
        B: BaseObjectOracle + ?Sized,
    {
        let base = bases
            .base(initial.base)
            .ok_or(StateError::UnknownInitialBase {
                initial: id,
                base: initial.base.0,
            })?;

        let mut object =
            SpaceObject::from_base(initial.base, &base, initial.owner, initial.location);
        object.direction = crate::math::rotation::normalize(initial.direction);
        object.initial = Some(id);

        let handle = self.objects.insert(object)?;
        self.level.bind_initial(id, handle);
        Ok(handle)
    }

    /// Resolves a level initial to its live object.
    pub fn initial_object(&self, id: InitialId) -> Option<ObjectHandle> {
        self.objects.live(self.level.initial(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{AdmiralSetup, BaseHandle, BaseObject};
    use crate::math::{Fixed, Point};

    struct TestBases;

    impl BaseObjectOracle for TestBases {
        fn base(&self, handle: BaseHandle) -> Option<BaseObject> {
            (handle.0 < 2).then(BaseObject::default)
        }
    }

    struct TestLevel {
        initials: Vec<InitialObject>,
        admirals: usize,
    }

    impl LevelOracle for TestLevel {
        fn initial(&self, id: InitialId) -> Option<InitialObject> {
            self.initials.get(id.index()).cloned()
        }

        fn initial_count(&self) -> usize {
            self.initials.len()
        }

        fn condition_count(&self) -> usize {
            3
        }

        fn admirals(&self) -> Vec<AdmiralSetup> {
            (0..self.admirals)
                .map(|_| AdmiralSetup {
                    cash: Fixed::from_int(100),
                })
                .collect()
        }
    }

    fn initial(base: u32, hidden: bool) -> InitialObject {
        InitialObject {
            base: BaseHandle(base),
            owner: Some(AdmiralId(0)),
            location: Point::new(10, 20),
            direction: -90,
            hidden,
        }
    }

    #[test]
    fn from_level_spawns_visible_initials_only() {
        let level = TestLevel {
            initials: vec![initial(0, false), initial(1, true), initial(1, false)],
            admirals: 2,
        };
        let state = GameState::from_level(7, &level, &TestBases).unwrap();

        assert_eq!(state.objects.len(), 2);
        assert!(state.initial_object(InitialId(0)).is_some());
        assert!(state.initial_object(InitialId(1)).is_none());
        assert_eq!(state.level.conditions.len(), 3);
        assert_eq!(state.admirals.len(), 2);

        let object = state
            .objects
            .get(state.initial_object(InitialId(2)).unwrap())
            .unwrap();
        assert_eq!(object.direction, 270);
        assert_eq!(object.initial, Some(InitialId(2)));
    }

    #[test]
    fn unknown_base_is_rejected() {
        let level = TestLevel {
            initials: vec![initial(9, false)],
            admirals: 1,
        };
        assert_eq!(
            GameState::from_level(0, &level, &TestBases),
            Err(StateError::UnknownInitialBase {
                initial: InitialId(0),
                base: 9
            })
        );
    }

    #[test]
    fn too_many_admirals_is_rejected() {
        let level = TestLevel {
            initials: Vec::new(),
            admirals: EngineConfig::MAX_ADMIRALS + 1,
        };
        assert!(matches!(
            GameState::from_level(0, &level, &TestBases),
            Err(StateError::AdmiralLedgerFull { .. })
        ));
    }
}
