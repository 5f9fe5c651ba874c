//! Interface state: key masks, zoom and the minicomputer cursor.

use super::DispatchContext;
use crate::action::Effect;
use crate::state::{KeyMask, MiniSelection};

pub(super) fn disable_keys(ctx: &mut DispatchContext<'_, '_>, mask: KeyMask) {
    ctx.state.ui.disabled_keys.insert(mask);
    let disabled = ctx.state.ui.disabled_keys;
    ctx.emit(Effect::KeysChanged { disabled });
}

pub(super) fn enable_keys(ctx: &mut DispatchContext<'_, '_>, mask: KeyMask) {
    ctx.state.ui.disabled_keys.remove(mask);
    let disabled = ctx.state.ui.disabled_keys;
    ctx.emit(Effect::KeysChanged { disabled });
}

/// Only an actual change is reported.
pub(super) fn set_zoom(ctx: &mut DispatchContext<'_, '_>, zoom: i32) {
    if ctx.state.ui.zoom == zoom {
        return;
    }
    ctx.state.ui.zoom = zoom;
    ctx.emit(Effect::ZoomChanged { zoom });
}

pub(super) fn computer_select(ctx: &mut DispatchContext<'_, '_>, screen: i32, line: i32) {
    let selection = MiniSelection { screen, line };
    ctx.state.ui.minicomputer = selection;
    ctx.emit(Effect::MinicomputerSelected(selection));
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::*;
    use super::*;
    use crate::env::BaseObject;

    #[test]
    fn key_masks_accumulate_and_clear() {
        let mut world = World::new(vec![BaseObject::default()]);
        world.run(|ctx| disable_keys(ctx, KeyMask::UP | KeyMask::DOWN));
        world.run(|ctx| disable_keys(ctx, KeyMask::MESSAGE_NEXT));
        let (effects, _) = world.run(|ctx| enable_keys(ctx, KeyMask::UP));

        let expected = KeyMask::DOWN | KeyMask::MESSAGE_NEXT;
        assert_eq!(world.state.ui.disabled_keys, expected);
        assert_eq!(effects, vec![Effect::KeysChanged { disabled: expected }]);
    }

    #[test]
    fn zoom_reports_changes_only() {
        let mut world = World::new(vec![BaseObject::default()]);
        let (effects, _) = world.run(|ctx| set_zoom(ctx, 3));
        assert_eq!(effects, vec![Effect::ZoomChanged { zoom: 3 }]);
        let (effects, _) = world.run(|ctx| set_zoom(ctx, 3));
        assert!(effects.is_empty());
    }

    #[test]
    fn computer_select_moves_the_cursor() {
        let mut world = World::new(vec![BaseObject::default()]);
        world.run(|ctx| computer_select(ctx, 2, 5));
        assert_eq!(world.state.ui.minicomputer, MiniSelection { screen: 2, line: 5 });
    }
}
