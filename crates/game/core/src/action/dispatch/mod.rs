//! Verb dispatch.
//!
//! [`apply`] is one exhaustive match over [`Verb`]; each arm hands off to a
//! family module. Every verb treats a missing required role as a no-op, and
//! content mismatches (unknown admiral, unknown base type, full object table)
//! are logged and skipped rather than surfaced as errors, so one bad record
//! can never stall the simulation.
//!
//! Verbs mutate [`GameState`] in place. Anything that can run further tables
//! (removals, freshly created objects) is queued as a [`FollowUp`] for the
//! engine instead of recursing from inside a verb.

mod alter;
mod control;
mod feedback;
mod ledger;
mod spawn;
mod ui;

use super::{ActionRecord, Effect, FollowUp, RecordIndex, Removal, ResolvedRoles, Verb};
use crate::env::{
    BaseHandle, BaseObject, BaseObjectOracle, ConfigOracle, GameEnv, LevelOracle, OracleError,
    RngOracle, compute_seed,
};
use crate::math::{Fixed, FixedRange, PointOffset};
use crate::state::{AdmiralId, GameState, ObjectHandle, SpaceObject, WeaponMount};

// ============================================================================
// Dispatch Context
// ============================================================================

/// Everything a verb may read or mutate while it runs.
///
/// Created once per engine call and reused for every record it applies, so
/// effects and follow-ups accumulate in dispatch order.
pub struct DispatchContext<'s, 'e> {
    /// Mutable game state.
    pub state: &'s mut GameState,

    bases: &'e dyn BaseObjectOracle,
    level: &'e dyn LevelOracle,
    rng: &'e dyn RngOracle,
    max_sparks: u32,

    /// Record currently being applied; salts random rolls.
    record: RecordIndex,

    /// Host-visible effects, in the order they happened.
    pub effects: Vec<Effect>,

    /// Removals and create tables waiting for the engine.
    pub follow_ups: Vec<FollowUp>,
}

impl<'s, 'e> DispatchContext<'s, 'e> {
    /// # Errors
    ///
    /// Fails if `env` lacks the base, level, rng or config oracle.
    pub fn new(state: &'s mut GameState, env: &GameEnv<'e>) -> Result<Self, OracleError> {
        Ok(Self {
            state,
            bases: env.bases()?,
            level: env.level()?,
            rng: env.rng()?,
            max_sparks: env.config()?.max_sparks(),
            record: RecordIndex(0),
            effects: Vec::new(),
            follow_ups: Vec::new(),
        })
    }

    pub fn bases(&self) -> &'e dyn BaseObjectOracle {
        self.bases
    }

    pub fn level(&self) -> &'e dyn LevelOracle {
        self.level
    }

    /// Looks up a base definition, logging unknown types.
    pub fn base(&self, handle: BaseHandle) -> Option<BaseObject> {
        let base = self.bases.base(handle);
        if base.is_none() {
            tracing::warn!("record {} names unknown {}", self.record.0, handle);
        }
        base
    }

    pub fn object(&self, handle: Option<ObjectHandle>) -> Option<&SpaceObject> {
        handle.and_then(|handle| self.state.objects.get(handle))
    }

    pub fn object_mut(&mut self, handle: Option<ObjectHandle>) -> Option<&mut SpaceObject> {
        handle.and_then(|handle| self.state.objects.get_mut(handle))
    }

    pub fn owner_of(&self, handle: Option<ObjectHandle>) -> Option<AdmiralId> {
        self.object(handle).and_then(|object| object.owner)
    }

    pub fn emit(&mut self, effect: Effect) {
        self.effects.push(effect);
    }

    pub fn remove(&mut self, object: ObjectHandle, removal: Removal) {
        self.follow_ups.push(FollowUp::Remove { object, removal });
    }

    /// Uniform roll in `[0, range)`; zero for a non-positive range.
    ///
    /// Every call advances the state's roll counter, so rolls are reproducible
    /// from the game seed and the order in which records fire.
    pub fn roll(&mut self, about: Option<ObjectHandle>, range: i32) -> i32 {
        let object = about.map_or(0, |handle| handle.index);
        let seed = compute_seed(self.state.game_seed, self.state.rng_nonce, object, self.record.0);
        self.state.rng_nonce = self.state.rng_nonce.wrapping_add(1);
        self.rng.below(seed, range)
    }

    /// Draws from `[minimum, minimum + range)` at full fixed-point resolution.
    pub fn roll_fixed(&mut self, about: Option<ObjectHandle>, value: FixedRange) -> Fixed {
        value.minimum + Fixed::from_raw(self.roll(about, value.range.raw()))
    }
}

// ============================================================================
// Dispatch
// ============================================================================

/// Applies one record's verb to already-filtered roles.
pub fn apply(
    ctx: &mut DispatchContext<'_, '_>,
    index: RecordIndex,
    record: &ActionRecord,
    roles: ResolvedRoles,
    offset: Option<PointOffset>,
) {
    ctx.record = index;

    match record.verb {
        Verb::NoAction => {}
        Verb::CreateObject(create) => spawn::create_object(ctx, create, roles, offset, false),
        Verb::CreateObjectSetDest(create) => {
            spawn::create_object(ctx, create, roles, offset, true)
        }
        Verb::PlaySound(sound) => feedback::play_sound(ctx, sound, roles),
        Verb::Alter(alter) => alter::apply(ctx, alter, roles, record.reflexive),
        Verb::MakeSparks(sparks) => feedback::make_sparks(ctx, sparks, roles, offset),
        Verb::ReleaseEnergy { percent } => feedback::release_energy(ctx, percent, roles),
        Verb::LandAt { speed } => control::land_at(ctx, speed, roles),
        Verb::EnterWarp => control::enter_warp(ctx, roles),
        Verb::DisplayMessage(message) => feedback::display_message(ctx, message),
        Verb::ChangeScore(change) => ledger::change_score(ctx, change, roles),
        Verb::DeclareWinner(declare) => ledger::declare_winner(ctx, declare, roles),
        Verb::Die { kind } => control::die(ctx, kind, roles),
        Verb::SetDestination => control::set_destination(ctx, roles),
        Verb::ActivateSpecial => control::activate(ctx, WeaponMount::Special, roles),
        Verb::ActivatePulse => control::activate(ctx, WeaponMount::Pulse, roles),
        Verb::ActivateBeam => control::activate(ctx, WeaponMount::Beam, roles),
        Verb::ColorFlash(flash) => feedback::color_flash(ctx, flash),
        Verb::NilTarget => control::nil_target(ctx, roles),
        Verb::DisableKeys { mask } => ui::disable_keys(ctx, mask),
        Verb::EnableKeys { mask } => ui::enable_keys(ctx, mask),
        Verb::SetZoom { value } => ui::set_zoom(ctx, value),
        Verb::ComputerSelect { screen, line } => ui::computer_select(ctx, screen, line),
        Verb::AssumeInitialObject { which } => control::assume_initial(ctx, which, roles),
    }
}

// ============================================================================
// Test fixtures
// ============================================================================


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn rolls_are_reproducible_and_advance_the_nonce() {
        let mut first = World::new(vec![BaseObject::default()]);
        let mut second = World::new(vec![BaseObject::default()]);

        let mut a = Vec::new();
        first.run(|ctx| a.extend((0..16).map(|_| ctx.roll(None, 1000))));
        let mut b = Vec::new();
        second.run(|ctx| b.extend((0..16).map(|_| ctx.roll(None, 1000))));

        assert_eq!(a, b);
        assert!(a.iter().all(|roll| (0..1000).contains(roll)));
        assert_eq!(first.state.rng_nonce, 16);
    }

    #[test]
    fn no_action_changes_nothing() {
        let mut world = World::new(vec![BaseObject::default()]);
        let ship = world.spawn(0, Some(0));
        let before = world.state.clone();

        let (effects, follow_ups) = world.apply(&ActionRecord::new(Verb::NoAction), on_self(ship));
        assert!(effects.is_empty() && follow_ups.is_empty());
        assert_eq!(world.state, before);
    }
}
