//! Player movement systems: turn input into planner requests, advance the
//! planner each frame, and react to cell arrivals (transitions, warp).

use bevy::prelude::*;

use crate::shared::*;
use crate::world::ActiveMap;

use super::planner::{MovementPlanner, Step};

/// Feed this frame's input into the movement planner.
///
/// A movement request against an unloaded map is a wiring bug, so it panics;
/// idle frames before the first map loads are fine.
pub fn plan_movement(
    input: Res<PlayerInput>,
    active_map: Res<ActiveMap>,
    mut player_query: Query<(&GridPosition, &mut MovementPlanner), With<Player>>,
) {
    let Ok((pos, mut planner)) = player_query.get_single_mut() else {
        return;
    };

    if input.cancel {
        planner.stop();
        return;
    }

    let request = input.click_tile.or_else(|| {
        input.step.map(|dir| {
            let (dx, dy) = dir.offset();
            (pos.x + dx, pos.y + dy)
        })
    });
    let Some(dest) = request else {
        return;
    };

    assert!(
        active_map.loaded(),
        "movement requested before any map was loaded"
    );

    // Key steps turn the player even when the step itself is blocked.
    if let Some(dir) = input.step {
        planner.facing = dir;
    }

    if (dest.0, dest.1) == (pos.x, pos.y) {
        return;
    }

    planner.request_move(
        (pos.x, pos.y),
        dest,
        &active_map.grid,
        active_map.tile_shift,
    );
}

/// Walk the player toward the committed cell and handle every arrival:
/// update the grid position, then check the warp tile and transition zones.
pub fn advance_movement(
    time: Res<Time>,
    active_map: Res<ActiveMap>,
    mut player_query: Query<(&mut Transform, &mut GridPosition, &mut MovementPlanner), With<Player>>,
    mut transitions: EventWriter<MapTransitionEvent>,
    mut rebuilds: EventWriter<DenRebuildEvent>,
) {
    let Ok((mut transform, mut pos, mut planner)) = player_query.get_single_mut() else {
        return;
    };

    let mut pixel = transform.translation.truncate();
    let step = planner.advance(&mut pixel, time.delta_secs(), PLAYER_SPEED);
    transform.translation.x = pixel.x;
    transform.translation.y = pixel.y;

    let Step::Arrived { x, y } = step else {
        return;
    };
    pos.x = x;
    pos.y = y;

    if active_map.warp() == Some((x, y)) {
        planner.stop();
        rebuilds.send(DenRebuildEvent);
        return;
    }

    for t in active_map.transitions() {
        if t.contains(x, y) {
            planner.stop();
            transitions.send(MapTransitionEvent {
                to_map: t.to_map,
                to_x: t.to_pos.0,
                to_y: t.to_pos.1,
            });
            return;
        }
    }
}

/// Teleport the player onto a tile of the active map, dropping any plan.
pub fn handle_relocate(
    mut events: EventReader<PlayerRelocateEvent>,
    mut player_query: Query<(&mut Transform, &mut GridPosition, &mut MovementPlanner), With<Player>>,
) {
    let Some(event) = events.read().last() else {
        return;
    };
    let Ok((mut transform, mut pos, mut planner)) = player_query.get_single_mut() else {
        return;
    };

    planner.stop();
    pos.x = event.x;
    pos.y = event.y;
    let center = grid_to_world(event.x, event.y);
    transform.translation.x = center.x;
    transform.translation.y = center.y;
}
