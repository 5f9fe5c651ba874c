//! Object creation verbs.

use super::DispatchContext;
use crate::action::{CreateObject, Effect, FollowUp, ResolvedRoles};
use crate::math::{PointOffset, rotation};
use crate::state::SpaceObject;

/// `CreateObject` / `CreateObjectSetDest`: spawns copies of a base type
/// around the focus.
///
/// Each copy rolls its own heading spread and placement. With `set_dest`, the
/// copies head for the focus's destination.
pub(super) fn create_object(
    ctx: &mut DispatchContext<'_, '_>,
    create: CreateObject,
    roles: ResolvedRoles,
    offset: Option<PointOffset>,
    set_dest: bool,
) {
    let Some(anchor_handle) = roles.focus else {
        tracing::trace!("create_object without a focus");
        return;
    };
    let Some(anchor) = ctx.object(Some(anchor_handle)).cloned() else {
        return;
    };
    let Some(base_handle) = create.base else {
        return;
    };
    let Some(base) = ctx.base(base_handle) else {
        return;
    };

    let count = create
        .count_minimum
        .saturating_add(ctx.roll(Some(anchor_handle), create.count_range));
    let origin = anchor.location.offset_by(offset.unwrap_or_default());

    for _ in 0..count.max(0) {
        let spread = ctx.roll(Some(anchor_handle), base.initial_direction_range);
        let mut direction =
            rotation::normalize(base.initial_direction) + rotation::normalize(spread);
        if create.relative_direction {
            direction += rotation::normalize(anchor.direction);
        }
        let direction = rotation::normalize(direction);

        let mut location = origin;
        if create.distance > 0 {
            let spread = create.distance.saturating_mul(2);
            let dx = ctx.roll(Some(anchor_handle), spread) - create.distance;
            let dy = ctx.roll(Some(anchor_handle), spread) - create.distance;
            location = location.offset_by(PointOffset::new(dx, dy));
        }

        let mut object = SpaceObject::from_base(base_handle, &base, anchor.owner, location);
        object.direction = direction;
        object.velocity = rotation::unit_vector(direction).scaled(base.initial_velocity);
        if create.relative_velocity {
            object.velocity = object.velocity + anchor.velocity;
        }
        object.target = if create.inherit {
            ctx.state.objects.live(anchor.target)
        } else {
            Some(anchor_handle)
        };
        if set_dest {
            object.destination = ctx.state.objects.live(anchor.destination);
        }

        match ctx.state.objects.insert(object) {
            Ok(handle) => {
                tracing::debug!("created {} as {}", base_handle, handle);
                ctx.emit(Effect::ObjectCreated {
                    object: handle,
                    base: base_handle,
                });
                ctx.follow_ups.push(FollowUp::Created { object: handle });
            }
            Err(error) => {
                tracing::warn!("cannot create {}: {}", base_handle, error);
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::*;
    use super::*;
    use crate::EngineConfig;
    use crate::action::{ActionRecord, Verb};
    use crate::env::{BaseHandle, BaseObject};
    use crate::math::{Fixed, FixedPoint, Point};
    use crate::state::ObjectHandle;

    fn bases() -> Vec<BaseObject> {
        vec![
            BaseObject::default(),
            BaseObject {
                initial_velocity: Fixed::from_int(2),
                initial_direction_range: 30,
                ..BaseObject::default()
            },
        ]
    }

    fn create(count_minimum: i32, count_range: i32) -> CreateObject {
        CreateObject {
            base: Some(BaseHandle(1)),
            count_minimum,
            count_range,
            ..CreateObject::default()
        }
    }

    fn spawned(effects: &[Effect]) -> Vec<ObjectHandle> {
        effects
            .iter()
            .filter_map(|effect| match effect {
                Effect::ObjectCreated { object, .. } => Some(*object),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn count_stays_within_minimum_plus_range() {
        let mut seen = std::collections::BTreeSet::new();
        for seed in 0..64 {
            let mut world = World::new(bases());
            world.state.game_seed = seed;
            let ship = world.spawn(0, Some(0));
            let (effects, follow_ups) =
                world.run(|ctx| create_object(ctx, create(2, 3), on_self(ship), None, false));

            let count = spawned(&effects).len();
            assert!((2..=4).contains(&count), "seed {seed} made {count}");
            assert_eq!(follow_ups.len(), count);
            seen.insert(count);
        }
        assert!(seen.len() > 1);
    }

    #[test]
    fn same_seed_reproduces_every_object() {
        let run = || {
            let mut world = World::new(bases());
            let ship = world.spawn(0, Some(1));
            let record = ActionRecord::new(Verb::CreateObject(CreateObject {
                distance: 50,
                ..create(2, 3)
            }));
            let (effects, _) = world.apply(&record, on_self(ship));
            spawned(&effects)
                .into_iter()
                .map(|handle| world.object(handle).clone())
                .collect::<Vec<_>>()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn spawned_objects_follow_the_anchor() {
        let mut world = World::new(bases());
        let ship = world.spawn(0, Some(1));
        let enemy = world.spawn(0, Some(0));
        let waypoint = world.spawn(0, None);
        {
            let anchor = world.object_mut(ship);
            anchor.direction = 90;
            anchor.velocity = FixedPoint::new(Fixed::ONE, Fixed::ZERO);
            anchor.target = Some(enemy);
            anchor.destination = Some(waypoint);
        }

        let args = CreateObject {
            relative_velocity: true,
            relative_direction: true,
            inherit: true,
            ..create(1, 0)
        };
        let offset = Some(PointOffset::new(5, -5));
        let (effects, _) = world.run(|ctx| create_object(ctx, args, on_self(ship), offset, true));

        let child = world.object(spawned(&effects)[0]);
        assert_eq!(child.owner, world.object(ship).owner);
        assert_eq!(child.location, Point::new(105, 95));
        assert!((90..120).contains(&child.direction));
        assert_eq!(child.target, Some(enemy));
        assert_eq!(child.destination, Some(waypoint));
        assert!(child.velocity.x > Fixed::ZERO);
        assert!(child.velocity.y > Fixed::ONE);
    }

    #[test]
    fn without_inherit_the_anchor_is_the_target() {
        let mut world = World::new(bases());
        let ship = world.spawn(0, None);
        let (effects, _) =
            world.run(|ctx| create_object(ctx, create(1, 0), on_self(ship), None, false));
        let child = world.object(spawned(&effects)[0]);
        assert_eq!(child.target, Some(ship));
        assert_eq!(child.destination, None);
    }

    #[test]
    fn huge_counts_fill_the_table_and_stop() {
        let mut world = World::new(bases());
        let ship = world.spawn(0, Some(0));
        let flood = create(i32::MAX, 1000);
        let (effects, follow_ups) =
            world.run(|ctx| create_object(ctx, flood, on_self(ship), None, false));

        assert_eq!(world.state.objects.len(), EngineConfig::MAX_OBJECTS);
        assert_eq!(spawned(&effects).len(), EngineConfig::MAX_OBJECTS - 1);
        assert_eq!(follow_ups.len(), EngineConfig::MAX_OBJECTS - 1);
    }

    #[test]
    fn extreme_headings_fold_into_a_circle() {
        let mut world = World::new(vec![
            BaseObject::default(),
            BaseObject {
                initial_direction: i32::MAX,
                initial_direction_range: i32::MAX,
                ..BaseObject::default()
            },
        ]);
        let ship = world.spawn(0, None);
        world.object_mut(ship).direction = i32::MAX;
        let args = CreateObject {
            relative_direction: true,
            ..create(3, 0)
        };
        let (effects, _) = world.run(|ctx| create_object(ctx, args, on_self(ship), None, false));

        let children = spawned(&effects);
        assert_eq!(children.len(), 3);
        for child in children {
            assert!((0..360).contains(&world.object(child).direction));
        }
    }

    #[test]
    fn missing_focus_or_base_is_a_no_op() {
        let mut world = World::new(bases());
        let (effects, _) = world.run(|ctx| {
            create_object(ctx, create(3, 0), ResolvedRoles::default(), None, false)
        });
        assert!(effects.is_empty());

        let ship = world.spawn(0, None);
        let unknown = CreateObject {
            base: Some(BaseHandle(9)),
            ..create(3, 0)
        };
        let (effects, _) = world.run(|ctx| create_object(ctx, unknown, on_self(ship), None, false));
        assert!(effects.is_empty());
        assert_eq!(world.state.objects.len(), 1);
    }
}
