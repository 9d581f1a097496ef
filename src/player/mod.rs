//! Player domain plugin: the pawn, its tile-to-tile movement, and the
//! camera that follows it.

use bevy::prelude::*;

use crate::shared::GameState;

pub mod camera;
pub mod movement;
pub mod planner;
pub mod spawn;

pub use planner::{MovementPlanner, Step};

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::Playing), spawn::spawn_player)
            .add_systems(
                Update,
                (
                    movement::handle_relocate,
                    movement::plan_movement,
                    movement::advance_movement,
                    camera::follow_player,
                )
                    .chain()
                    .run_if(in_state(GameState::Playing)),
            );
    }
}
