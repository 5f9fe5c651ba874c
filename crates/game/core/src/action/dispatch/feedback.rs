//! Sound, particles, energy bursts and on-screen messages.

use super::DispatchContext;
use crate::action::{ColorFlash, DisplayMessage, Effect, MakeSparks, PlaySound, ResolvedRoles};
use crate::math::{Fixed, PointOffset, rotation};

pub(super) fn play_sound(
    ctx: &mut DispatchContext<'_, '_>,
    sound: PlaySound,
    roles: ResolvedRoles,
) {
    let id = sound.id_first.wrapping_add(ctx.roll(roles.focus, sound.id_range));
    ctx.emit(Effect::SoundPlayed {
        id,
        priority: sound.priority,
        persistence: sound.persistence,
        absolute: sound.absolute,
        volume: sound.volume,
        at: roles.focus,
    });
}

/// Scatters sparks from the focus, each at a random heading and a random speed
/// below the record's velocity.
pub(super) fn make_sparks(
    ctx: &mut DispatchContext<'_, '_>,
    sparks: MakeSparks,
    roles: ResolvedRoles,
    offset: Option<PointOffset>,
) {
    let Some(at) = ctx.object(roles.focus).map(|focus| focus.location) else {
        return;
    };
    let at = at.offset_by(offset.unwrap_or_default());

    let count = sparks.count.clamp(0, ctx.max_sparks as i32);
    for _ in 0..count {
        let heading = ctx.roll(roles.focus, rotation::FULL_CIRCLE);
        let speed = Fixed::from_raw(ctx.roll(roles.focus, sparks.velocity.raw()));
        ctx.emit(Effect::Spark {
            at,
            velocity: rotation::unit_vector(heading).scaled(speed),
            decay: sparks.decay,
            hue: sparks.hue,
        });
    }
}

/// Drains a fraction of the focus's energy into an outward burst.
pub(super) fn release_energy(
    ctx: &mut DispatchContext<'_, '_>,
    percent: Fixed,
    roles: ResolvedRoles,
) {
    let Some(from) = roles.focus else {
        return;
    };
    let Some(focus) = ctx.object_mut(Some(from)) else {
        return;
    };
    let amount = percent.scale_int(focus.energy).clamp(0, focus.energy.max(0));
    focus.energy -= amount;
    let at = focus.location;
    ctx.emit(Effect::EnergyReleased { from, at, amount });
}

pub(super) fn display_message(ctx: &mut DispatchContext<'_, '_>, message: DisplayMessage) {
    ctx.emit(Effect::MessageShown {
        id: message.id,
        first_page: message.first_page,
        page_count: message.page_count,
    });
}

pub(super) fn color_flash(ctx: &mut DispatchContext<'_, '_>, flash: ColorFlash) {
    ctx.emit(Effect::ColorFlash {
        length: flash.length,
        hue: flash.hue,
        shade: flash.shade,
    });
}
