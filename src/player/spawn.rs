//! Player entity setup.

use bevy::prelude::*;

use crate::shared::*;

use super::planner::MovementPlanner;

const Z_PLAYER: f32 = 10.0;

/// Spawn the player pawn once, at the town plaza. Relocation events place
/// it properly as soon as the first map loads.
pub fn spawn_player(mut commands: Commands, existing: Query<(), With<Player>>) {
    if !existing.is_empty() {
        return;
    }

    let start = GridPosition::new(12, 11);
    let center = grid_to_world(start.x, start.y);
    commands.spawn((
        Player,
        start,
        MovementPlanner::default(),
        Sprite {
            color: Color::srgb(0.9, 0.75, 0.4),
            custom_size: Some(Vec2::new(TILE_SIZE * 0.8, TILE_SIZE * 0.9)),
            ..default()
        },
        Transform::from_translation(center.extend(Z_PLAYER)),
    ));
}
