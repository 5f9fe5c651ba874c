//! Admiral scores, cash and the level outcome.

use super::DispatchContext;
use crate::action::{ChangeScore, DeclareWinner, Effect, ResolvedRoles};
use crate::math::Fixed;
use crate::state::{AdmiralId, Outcome};

pub(super) fn change_score(
    ctx: &mut DispatchContext<'_, '_>,
    change: ChangeScore,
    roles: ResolvedRoles,
) {
    let Some(admiral) = change.player.or_else(|| ctx.owner_of(roles.focus)) else {
        tracing::trace!("change_score with no admiral to credit");
        return;
    };
    let Some(entry) = ctx.state.admirals.get_mut(admiral) else {
        tracing::warn!("change_score names unknown admiral {}", admiral.0);
        return;
    };
    let Some(score) = entry.scores.get_mut(change.which as usize) else {
        tracing::warn!("change_score names missing score {}", change.which);
        return;
    };
    *score = score.wrapping_add(change.value);
    let score = *score;
    ctx.emit(Effect::ScoreChanged {
        admiral,
        which: change.which,
        score,
    });
}

/// Records the level outcome. The first declaration wins; later ones are
/// ignored.
pub(super) fn declare_winner(
    ctx: &mut DispatchContext<'_, '_>,
    declare: DeclareWinner,
    roles: ResolvedRoles,
) {
    let outcome = Outcome {
        winner: declare.player.or_else(|| ctx.owner_of(roles.focus)),
        next_chapter: declare.next_chapter,
        text_id: declare.text_id,
    };
    if ctx.state.level.declare(outcome) {
        tracing::debug!("winner declared: {:?}", outcome.winner);
        ctx.emit(Effect::WinnerDeclared(outcome));
    } else {
        tracing::debug!("ignoring second winner declaration");
    }
}

/// Adds `value` to an admiral's cash.
pub(super) fn pay(ctx: &mut DispatchContext<'_, '_>, admiral: AdmiralId, value: Fixed) {
    let Some(entry) = ctx.state.admirals.get_mut(admiral) else {
        tracing::warn!("cash change names unknown admiral {}", admiral.0);
        return;
    };
    entry.cash += value;
    let cash = entry.cash;
    ctx.emit(Effect::CashChanged { admiral, cash });
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::*;
    use super::*;
    use crate::env::BaseObject;

    #[test]
    fn score_defaults_to_the_focus_owner() {
        let mut world = World::new(vec![BaseObject::default()]);
        let ship = world.spawn(0, Some(1));
        let change = ChangeScore {
            player: None,
            which: 2,
            value: 10,
        };

        world.run(|ctx| change_score(ctx, change, on_self(ship)));
        let (effects, _) = world.run(|ctx| change_score(ctx, change, on_self(ship)));

        assert_eq!(world.state.admirals.get(AdmiralId(1)).unwrap().scores, [0, 0, 20]);
        assert_eq!(
            effects,
            vec![Effect::ScoreChanged {
                admiral: AdmiralId(1),
                which: 2,
                score: 20,
            }]
        );
    }

    #[test]
    fn score_for_unknown_or_absent_admiral_is_skipped() {
        let mut world = World::new(vec![BaseObject::default()]);
        let debris = world.spawn(0, None);
        let before = world.state.admirals.clone();

        let ownerless = ChangeScore {
            player: None,
            which: 0,
            value: 1,
        };
        world.run(|ctx| change_score(ctx, ownerless, on_self(debris)));
        let unknown = ChangeScore {
            player: Some(AdmiralId(3)),
            ..ownerless
        };
        world.run(|ctx| change_score(ctx, unknown, on_self(debris)));

        assert_eq!(world.state.admirals, before);
    }

    #[test]
    fn first_declaration_wins() {
        let mut world = World::new(vec![BaseObject::default()]);
        let ship = world.spawn(0, Some(0));
        let declare = DeclareWinner {
            player: None,
            next_chapter: Some(3),
            text_id: 7,
        };

        let (first, _) = world.run(|ctx| declare_winner(ctx, declare, on_self(ship)));
        let later = DeclareWinner {
            player: Some(AdmiralId(1)),
            ..declare
        };
        let (second, _) = world.run(|ctx| declare_winner(ctx, later, on_self(ship)));

        let expected = Outcome {
            winner: Some(AdmiralId(0)),
            next_chapter: Some(3),
            text_id: 7,
        };
        assert_eq!(first, vec![Effect::WinnerDeclared(expected)]);
        assert!(second.is_empty());
        assert_eq!(world.state.level.outcome, Some(expected));
    }

    #[test]
    fn pay_touches_one_admiral() {
        let mut world = World::new(vec![BaseObject::default()]);
        world.run(|ctx| pay(ctx, AdmiralId(1), Fixed::from_int(250)));

        assert_eq!(world.state.admirals.get(AdmiralId(0)).unwrap().cash, Fixed::ZERO);
        assert_eq!(world.state.admirals.get(AdmiralId(1)).unwrap().cash, Fixed::from_int(250));
    }
}
