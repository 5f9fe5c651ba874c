//! Orders, weapons, removal and identity: verbs that steer a single object.

use super::DispatchContext;
use crate::action::{DieKind, Effect, Removal, ResolvedRoles};
use crate::state::{AdmiralId, InitialId, Presence, WeaponMount};

pub(super) fn land_at(ctx: &mut DispatchContext<'_, '_>, speed: i32, roles: ResolvedRoles) {
    let Some(object) = roles.subject else {
        return;
    };
    let Some(subject) = ctx.object_mut(Some(object)) else {
        return;
    };
    subject.presence = Presence::Landing { speed };
    ctx.emit(Effect::LandingStarted { object, speed });
}

pub(super) fn enter_warp(ctx: &mut DispatchContext<'_, '_>, roles: ResolvedRoles) {
    let Some(object) = roles.subject else {
        return;
    };
    let Some(subject) = ctx.object_mut(Some(object)) else {
        return;
    };
    subject.presence = Presence::Warping;
    ctx.emit(Effect::WarpEntered { object });
}

/// Queues removal of the focus (`None`) or the subject (`Expire`, `Destroy`).
pub(super) fn die(ctx: &mut DispatchContext<'_, '_>, kind: DieKind, roles: ResolvedRoles) {
    let (victim, removal) = match kind {
        DieKind::None => (roles.focus, Removal::Quiet),
        DieKind::Expire => (roles.subject, Removal::Quiet),
        DieKind::Destroy => (roles.subject, Removal::Destroy),
    };
    if let Some(victim) = ctx.state.objects.live(victim) {
        ctx.remove(victim, removal);
    }
}

/// Sends the subject toward the focus.
pub(super) fn set_destination(ctx: &mut DispatchContext<'_, '_>, roles: ResolvedRoles) {
    let Some(focus) = ctx.state.objects.live(roles.focus) else {
        return;
    };
    if let Some(subject) = ctx.object_mut(roles.subject) {
        subject.destination = Some(focus);
    }
}

pub(super) fn nil_target(ctx: &mut DispatchContext<'_, '_>, roles: ResolvedRoles) {
    if let Some(subject) = ctx.object_mut(roles.subject) {
        subject.target = None;
    }
}

/// Fires one of the subject's weapon mounts at its current target.
///
/// Negative ammunition is unlimited; an empty or unarmed mount does nothing.
pub(super) fn activate(
    ctx: &mut DispatchContext<'_, '_>,
    mount: WeaponMount,
    roles: ResolvedRoles,
) {
    let Some(object) = roles.subject else {
        return;
    };
    let Some(subject) = ctx.state.objects.get_mut(object) else {
        return;
    };
    let target = subject.target;
    let slot = subject.weapon_mut(mount);
    let Some(weapon) = slot.base else {
        return;
    };
    if slot.ammo == 0 {
        tracing::trace!("{} {} is out of ammunition", object, mount);
        return;
    }
    if slot.ammo > 0 {
        slot.ammo -= 1;
    }

    let target = ctx.state.objects.live(target);
    ctx.emit(Effect::WeaponFired {
        object,
        mount,
        weapon,
        target,
    });
}

/// Binds the focus to a level initial slot, offset by admiral 0's first
/// score so campaign scripts can pick among several authored slots.
pub(super) fn assume_initial(ctx: &mut DispatchContext<'_, '_>, which: i32, roles: ResolvedRoles) {
    let Some(focus) = ctx.state.objects.live(roles.focus) else {
        return;
    };
    let bias = ctx
        .state
        .admirals
        .get(AdmiralId(0))
        .and_then(|admiral| admiral.score(0))
        .unwrap_or(0);
    let raw = which.wrapping_add(bias);
    let Some(initial) = InitialId::from_raw(raw) else {
        tracing::warn!("assume_initial resolved to invalid initial {}", raw);
        return;
    };
    if !ctx.state.level.bind_initial(initial, focus) {
        tracing::warn!("assume_initial names missing initial {}", initial.0);
        return;
    }
    if let Some(object) = ctx.object_mut(Some(focus)) {
        object.initial = Some(initial);
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::*;
    use super::*;
    use crate::action::{ActionRecord, FollowUp, Verb};
    use crate::env::{BaseHandle, BaseObject, WeaponMountDef};
    use crate::state::LevelState;

    fn bases() -> Vec<BaseObject> {
        vec![BaseObject {
            pulse: WeaponMountDef::new(Some(BaseHandle(0)), 2),
            special: WeaponMountDef::new(Some(BaseHandle(0)), -1),
            ..BaseObject::default()
        }]
    }

    #[test]
    fn die_kinds_pick_victim_and_removal() {
        let mut world = World::new(bases());
        let subject = world.spawn(0, None);
        let focus = world.spawn(0, None);
        let both = roles(Some(subject), Some(focus), Some(focus));

        for (kind, object, removal) in [
            (DieKind::None, focus, Removal::Quiet),
            (DieKind::Expire, subject, Removal::Quiet),
            (DieKind::Destroy, subject, Removal::Destroy),
        ] {
            let (_, follow_ups) = world.apply(&ActionRecord::new(Verb::Die { kind }), both);
            assert_eq!(follow_ups, vec![FollowUp::Remove { object, removal }]);
        }
        // Removal itself is the engine's job.
        assert_eq!(world.state.objects.len(), 2);
    }

    #[test]
    fn presence_changes_report_effects() {
        let mut world = World::new(bases());
        let ship = world.spawn(0, None);

        let (effects, _) = world.run(|ctx| land_at(ctx, 40, on_self(ship)));
        assert_eq!(world.object(ship).presence, Presence::Landing { speed: 40 });
        assert_eq!(effects, vec![Effect::LandingStarted { object: ship, speed: 40 }]);

        let (effects, _) = world.run(|ctx| enter_warp(ctx, on_self(ship)));
        assert_eq!(world.object(ship).presence, Presence::Warping);
        assert_eq!(effects, vec![Effect::WarpEntered { object: ship }]);
    }

    #[test]
    fn destination_and_target_orders() {
        let mut world = World::new(bases());
        let ship = world.spawn(0, None);
        let planet = world.spawn(0, None);
        world.object_mut(ship).target = Some(planet);

        world.run(|ctx| set_destination(ctx, roles(Some(ship), Some(planet), None)));
        assert_eq!(world.object(ship).destination, Some(planet));

        world.run(|ctx| nil_target(ctx, on_self(ship)));
        assert_eq!(world.object(ship).target, None);
    }

    #[test]
    fn weapons_spend_ammunition_until_empty() {
        let mut world = World::new(bases());
        let ship = world.spawn(0, None);

        let mut shots = 0;
        for _ in 0..4 {
            let (effects, _) = world.run(|ctx| activate(ctx, WeaponMount::Pulse, on_self(ship)));
            shots += effects.len();
        }
        assert_eq!(shots, 2);
        assert_eq!(world.object(ship).pulse.ammo, 0);

        let (effects, _) = world.run(|ctx| activate(ctx, WeaponMount::Special, on_self(ship)));
        assert_eq!(effects.len(), 1);
        assert_eq!(world.object(ship).special.ammo, -1);

        let (effects, _) = world.run(|ctx| activate(ctx, WeaponMount::Beam, on_self(ship)));
        assert!(effects.is_empty());
    }

    #[test]
    fn assume_initial_is_offset_by_first_score() {
        let mut world = World::new(bases());
        world.state.level = LevelState::new(4, 0);
        world.state.admirals.get_mut(AdmiralId(0)).unwrap().scores[0] = 2;
        let ship = world.spawn(0, Some(0));

        world.run(|ctx| assume_initial(ctx, 1, on_self(ship)));
        assert_eq!(world.state.initial_object(InitialId(3)), Some(ship));
        assert_eq!(world.object(ship).initial, Some(InitialId(3)));

        let other = world.spawn(0, Some(0));
        world.run(|ctx| assume_initial(ctx, 5, on_self(other)));
        assert_eq!(world.object(other).initial, None);
    }
}
