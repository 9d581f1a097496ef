//! Camera follow: smooth pursuit of the player with a snap for teleports.

use bevy::prelude::*;

use crate::shared::*;
use crate::world::ActiveMap;

/// Fraction of the remaining distance closed per second.
const FOLLOW_RATE: f32 = 6.0;

/// Beyond this distance the camera snaps instead of easing, so map changes
/// and warps don't produce a long pan across the world.
const SNAP_DISTANCE: f32 = TILE_SIZE * 4.0;

pub fn follow_player(
    time: Res<Time>,
    active_map: Res<ActiveMap>,
    player_query: Query<&Transform, (With<Player>, Without<Camera2d>)>,
    mut camera_query: Query<&mut Transform, With<Camera2d>>,
) {
    let Ok(player) = player_query.get_single() else {
        return;
    };
    let Ok(mut camera) = camera_query.get_single_mut() else {
        return;
    };

    let target = player.translation.truncate();
    let current = camera.translation.truncate();

    let mut next = if current.distance(target) > SNAP_DISTANCE {
        target
    } else {
        let t = (FOLLOW_RATE * time.delta_secs()).min(1.0);
        current.lerp(target, t)
    };

    // Clamp the view inside the map when the map is bigger than the view.
    if active_map.loaded() {
        let (min, max) = active_map.pixel_bounds();
        let half = Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT) / (2.0 * PIXEL_SCALE);
        if max.x - min.x > half.x * 2.0 {
            next.x = next.x.clamp(min.x + half.x, max.x - half.x);
        }
        if max.y - min.y > half.y * 2.0 {
            next.y = next.y.clamp(min.y + half.y, max.y - half.y);
        }
    }

    camera.translation.x = next.x;
    camera.translation.y = next.y;
}
