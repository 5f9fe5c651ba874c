//! The `Alter` family: in-place edits to an object, the level or the ledger.
//!
//! Unless noted otherwise a sub-op edits the focus. Sub-ops that read a
//! second object (the subject's heading, owner or location) need both roles
//! live and do nothing otherwise.

use std::ops::Range;

use super::{DispatchContext, ledger};
use crate::action::{AlterVerb, Effect, FollowUp, Removal, ResolvedRoles, TickRange, VelocityKind};
use crate::env::BaseHandle;
use crate::math::{Fixed, FixedPoint, FixedRange, Point, PointOffset, rotation};
use crate::state::{AdmiralId, Attributes, InitialId, SpaceObject, WeaponMount, WeaponSlot};

pub(super) fn apply(
    ctx: &mut DispatchContext<'_, '_>,
    alter: AlterVerb,
    roles: ResolvedRoles,
    reflexive: bool,
) {
    match alter {
        AlterVerb::Damage { value } => damage(ctx, value, roles),
        AlterVerb::Velocity { kind, value } => velocity(ctx, kind, value, roles),
        AlterVerb::Thrust { relative, value } => {
            let thrust = ctx.roll_fixed(roles.focus, value);
            edit_focus(ctx, roles, |focus| {
                if relative {
                    focus.thrust += thrust;
                } else {
                    focus.thrust = thrust;
                }
            });
        }
        AlterVerb::MaxThrust { value } => edit_focus(ctx, roles, |focus| focus.max_thrust = value),
        AlterVerb::MaxVelocity { value } => max_velocity(ctx, value, roles),
        AlterVerb::MaxTurnRate { value } => edit_focus(ctx, roles, |focus| focus.turn_rate = value),
        AlterVerb::Location { relative, by } => location(ctx, relative, by, roles),
        AlterVerb::Scale { value } => edit_focus(ctx, roles, |focus| focus.scale = value),
        AlterVerb::Weapon1 { base } => weapon(ctx, WeaponMount::Pulse, base, roles),
        AlterVerb::Weapon2 { base } => weapon(ctx, WeaponMount::Beam, base, roles),
        AlterVerb::Special { base } => weapon(ctx, WeaponMount::Special, base, roles),
        AlterVerb::Energy { value } => edit_focus(ctx, roles, |focus| focus.add_energy(value)),
        AlterVerb::Owner { relative, player } => owner(ctx, relative, player, roles, reflexive),
        AlterVerb::Hidden {
            first,
            count_minus_1,
        } => reveal_hidden(ctx, first, count_minus_1),
        AlterVerb::Cloak => edit_focus(ctx, roles, |focus| focus.cloaked = true),
        AlterVerb::Offline { value } => {
            let offline = ctx.roll_fixed(roles.focus, value);
            edit_focus(ctx, roles, |focus| focus.offline = offline);
        }
        AlterVerb::Spin { value } => spin(ctx, value, roles),
        AlterVerb::BaseType { keep_ammo, base } => base_type(ctx, keep_ammo, base, roles),
        AlterVerb::ConditionTrueYet {
            true_yet,
            first,
            count_minus_1,
        } => {
            let conditions = &mut ctx.state.level.conditions;
            for index in inclusive_span(first, count_minus_1, conditions.len()) {
                if let Some(condition) = conditions.get_mut(index as usize) {
                    *condition = true_yet;
                }
            }
        }
        AlterVerb::Occupation { value } => occupation(ctx, value, roles),
        AlterVerb::AbsoluteCash {
            relative,
            value,
            player,
        } => {
            let admiral = if relative {
                ctx.owner_of(roles.focus)
            } else {
                player
            };
            match admiral {
                Some(admiral) => ledger::pay(ctx, admiral, value),
                None => tracing::trace!("absolute_cash with no admiral to pay"),
            }
        }
        AlterVerb::Age { relative, value } => age(ctx, relative, value, roles),
        AlterVerb::Attributes { clear, mask } => edit_focus(ctx, roles, |focus| {
            focus.attributes.set(mask, !clear);
        }),
        AlterVerb::LevelKeyTag { tag } => {
            edit_focus(ctx, roles, |focus| focus.level_key_tag = tag)
        }
        AlterVerb::OrderKeyTag { tag } => {
            edit_focus(ctx, roles, |focus| focus.order_key_tag = tag)
        }
        AlterVerb::EngageKeyTag { tag } => {
            edit_focus(ctx, roles, |focus| focus.engage_key_tag = tag)
        }
        AlterVerb::AbsoluteLocation { relative, at } => absolute_location(ctx, relative, at, roles),
    }
}

fn edit_focus(
    ctx: &mut DispatchContext<'_, '_>,
    roles: ResolvedRoles,
    edit: impl FnOnce(&mut SpaceObject),
) {
    if let Some(focus) = ctx.object_mut(roles.focus) {
        edit(focus);
    }
}

/// `first ..= first + count_minus_1` clipped to `0..len`; empty when the count
/// is negative.
fn inclusive_span(first: i32, count_minus_1: i32, len: usize) -> Range<i32> {
    if count_minus_1 < 0 {
        return 0..0;
    }
    let len = i32::try_from(len).unwrap_or(i32::MAX);
    let end = first.saturating_add(count_minus_1).saturating_add(1).min(len);
    first.max(0)..end
}

/// Random per-axis displacement in `[-by, by)`.
fn scatter(ctx: &mut DispatchContext<'_, '_>, roles: ResolvedRoles, by: i32) -> PointOffset {
    if by <= 0 {
        return PointOffset::default();
    }
    let spread = by.saturating_mul(2);
    let dx = ctx.roll(roles.focus, spread) - by;
    let dy = ctx.roll(roles.focus, spread) - by;
    PointOffset::new(dx, dy)
}

/// Adds `value` to the focus's health; negative values hurt. Health below zero
/// queues the focus for destruction.
fn damage(ctx: &mut DispatchContext<'_, '_>, value: i32, roles: ResolvedRoles) {
    let Some(handle) = roles.focus else {
        return;
    };
    let Some(focus) = ctx.object_mut(Some(handle)) else {
        return;
    };
    focus.health = focus.health.saturating_add(value).min(focus.max_health);
    if focus.health < 0 {
        ctx.remove(handle, Removal::Destroy);
    }
}

fn velocity(
    ctx: &mut DispatchContext<'_, '_>,
    kind: VelocityKind,
    value: Fixed,
    roles: ResolvedRoles,
) {
    let subject = ctx
        .object(roles.subject)
        .map(|subject| (subject.velocity, subject.direction));
    let Some(focus) = ctx.object_mut(roles.focus) else {
        return;
    };
    let limit = focus.max_velocity;
    let cap = |velocity: FixedPoint| {
        if limit > Fixed::ZERO {
            velocity.capped(limit)
        } else {
            velocity
        }
    };

    match (kind, subject) {
        (VelocityKind::Stop, _) => focus.velocity = FixedPoint::ZERO,
        (VelocityKind::Decelerate, _) => {
            let remaining = focus.velocity.magnitude() - value;
            focus.velocity = if remaining > Fixed::ZERO {
                focus.velocity.with_magnitude(remaining)
            } else {
                FixedPoint::ZERO
            };
        }
        (VelocityKind::Cruise, _) => {
            focus.velocity = rotation::unit_vector(focus.direction).scaled(value);
        }
        (VelocityKind::Collide, Some((impulse, _))) => {
            focus.velocity = cap(focus.velocity + impulse.scaled(value));
        }
        (VelocityKind::Set, Some((_, heading))) => {
            focus.velocity = rotation::unit_vector(heading).scaled(value);
        }
        (VelocityKind::Boost, Some((_, heading))) => {
            focus.velocity = cap(focus.velocity + rotation::unit_vector(heading).scaled(value));
        }
        (VelocityKind::Collide | VelocityKind::Set | VelocityKind::Boost, None) => {}
    }
}

/// A negative value restores the base type's own limit.
fn max_velocity(ctx: &mut DispatchContext<'_, '_>, value: Fixed, roles: ResolvedRoles) {
    let Some(focus) = ctx.object(roles.focus) else {
        return;
    };
    let limit = if value.is_negative() {
        match ctx.base(focus.base) {
            Some(base) => base.max_velocity,
            None => return,
        }
    } else {
        value
    };
    edit_focus(ctx, roles, |focus| focus.max_velocity = limit);
}

/// Moves the focus to a random spot around the subject (`relative`) or around
/// its own location.
fn location(ctx: &mut DispatchContext<'_, '_>, relative: bool, by: i32, roles: ResolvedRoles) {
    let center = if relative { roles.subject } else { roles.focus };
    let Some(center) = ctx.object(center).map(|object| object.location) else {
        return;
    };
    if ctx.object(roles.focus).is_none() {
        return;
    }
    let at = center.offset_by(scatter(ctx, roles, by));
    edit_focus(ctx, roles, |focus| focus.location = at);
}

/// Refits one mount. `None` strips it; otherwise the mount gets the weapon
/// type's standard ammunition.
fn weapon(
    ctx: &mut DispatchContext<'_, '_>,
    mount: WeaponMount,
    base: Option<BaseHandle>,
    roles: ResolvedRoles,
) {
    if ctx.object(roles.focus).is_none() {
        return;
    }
    let slot = match base {
        None => WeaponSlot::default(),
        Some(handle) => match ctx.base(handle) {
            Some(weapon) => WeaponSlot::new(Some(handle), weapon.ammo),
            None => return,
        },
    };
    edit_focus(ctx, roles, |focus| *focus.weapon_mut(mount) = slot);
}

/// - relative, reflexive: the subject takes the direct object's owner.
/// - relative: the direct object takes the subject's owner.
/// - absolute: the focus takes `player`.
///
/// Reflexive records bind the direct object to the subject, so the relative
/// reflexive case leaves ownership where it was.
fn owner(
    ctx: &mut DispatchContext<'_, '_>,
    relative: bool,
    player: Option<AdmiralId>,
    roles: ResolvedRoles,
    reflexive: bool,
) {
    let (object, owner) = match (relative, reflexive) {
        (true, true) => (roles.subject, ctx.owner_of(roles.direct)),
        (true, false) => (roles.direct, ctx.owner_of(roles.subject)),
        (false, _) => (roles.focus, player),
    };
    let Some(handle) = object else {
        return;
    };
    let Some(target) = ctx.object_mut(Some(handle)) else {
        return;
    };
    if target.owner == owner {
        return;
    }
    target.owner = owner;
    target.occupation = Default::default();
    ctx.emit(Effect::OwnerChanged {
        object: handle,
        owner,
    });
}

/// Spawns every hidden level initial in the span that is not already live.
fn reveal_hidden(ctx: &mut DispatchContext<'_, '_>, first: i32, count_minus_1: i32) {
    let bases = ctx.bases();
    let level = ctx.level();
    for index in inclusive_span(first, count_minus_1, level.initial_count()) {
        let Some(id) = InitialId::from_raw(index) else {
            continue;
        };
        if ctx.state.initial_object(id).is_some() {
            continue;
        }
        let Some(initial) = level.initial(id) else {
            tracing::warn!("alter_hidden names missing initial {}", index);
            continue;
        };
        match ctx.state.spawn_initial(id, &initial, bases) {
            Ok(object) => {
                tracing::debug!("revealed initial {} as {}", index, object);
                ctx.emit(Effect::ObjectCreated {
                    object,
                    base: initial.base,
                });
                ctx.follow_ups.push(FollowUp::Created { object });
            }
            Err(error) => tracing::warn!("cannot reveal initial {}: {}", index, error),
        }
    }
}

/// Sets the spin rate to a random fraction of the focus's turn rate. Objects
/// that cannot turn are left alone.
fn spin(ctx: &mut DispatchContext<'_, '_>, value: FixedRange, roles: ResolvedRoles) {
    let turns = ctx
        .object(roles.focus)
        .is_some_and(|focus| focus.attributes.contains(Attributes::CAN_TURN));
    if !turns {
        return;
    }
    let factor = ctx.roll_fixed(roles.focus, value);
    edit_focus(ctx, roles, |focus| focus.spin = focus.turn_rate * factor);
}

fn base_type(
    ctx: &mut DispatchContext<'_, '_>,
    keep_ammo: bool,
    base: Option<BaseHandle>,
    roles: ResolvedRoles,
) {
    let Some(handle) = base else {
        return;
    };
    if ctx.object(roles.focus).is_none() {
        return;
    }
    let Some(definition) = ctx.base(handle) else {
        return;
    };
    edit_focus(ctx, roles, |focus| focus.change_base(handle, &definition, keep_ammo));
}

/// Adds occupation points for the subject's owner. A different occupier
/// starts over; reaching the base type's occupy count captures the focus.
fn occupation(ctx: &mut DispatchContext<'_, '_>, value: i32, roles: ResolvedRoles) {
    let Some(occupier) = ctx.owner_of(roles.subject) else {
        return;
    };
    let Some(handle) = roles.focus else {
        return;
    };
    let Some(base) = ctx.object(Some(handle)).map(|focus| focus.base) else {
        return;
    };
    let Some(needed) = ctx.base(base).map(|base| base.occupy_count) else {
        return;
    };
    if needed <= 0 {
        return;
    }
    let Some(focus) = ctx.object_mut(Some(handle)) else {
        return;
    };
    if focus.owner == Some(occupier) {
        return;
    }

    if focus.occupation.by == Some(occupier) {
        focus.occupation.points = focus.occupation.points.saturating_add(value);
    } else {
        focus.occupation.by = Some(occupier);
        focus.occupation.points = value;
    }
    if focus.occupation.points < needed {
        return;
    }

    focus.owner = Some(occupier);
    focus.occupation = Default::default();
    tracing::debug!("{} captured by admiral {}", handle, occupier.0);
    ctx.emit(Effect::ObjectCaptured {
        object: handle,
        by: occupier,
    });
}

/// `relative` extends the remaining lifetime; otherwise it is replaced.
fn age(ctx: &mut DispatchContext<'_, '_>, relative: bool, value: TickRange, roles: ResolvedRoles) {
    if ctx.object(roles.focus).is_none() {
        return;
    }
    let ticks = i64::from(value.minimum) + i64::from(ctx.roll(roles.focus, value.range));
    edit_focus(ctx, roles, |focus| {
        focus.age = Some(match (relative, focus.age) {
            (true, Some(remaining)) => remaining + ticks,
            _ => ticks,
        });
    });
}

fn absolute_location(
    ctx: &mut DispatchContext<'_, '_>,
    relative: bool,
    at: Point,
    roles: ResolvedRoles,
) {
    let at = if relative {
        match ctx.object(roles.subject) {
            Some(subject) => subject.location + at,
            None => return,
        }
    } else {
        at
    };
    edit_focus(ctx, roles, |focus| focus.location = at);
}
