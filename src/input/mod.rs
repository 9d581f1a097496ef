//! Input domain plugin.
//!
//! Translates raw keyboard and mouse state into the `PlayerInput` resource
//! during PreUpdate, before any gameplay system runs. Nothing else in the
//! game touches bevy's input resources directly, which keeps headless tests
//! free to write `PlayerInput` themselves.

use bevy::prelude::*;

use crate::shared::*;

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlayerInput>()
            .add_systems(PreUpdate, collect_input);
    }
}

fn collect_input(
    keys: Res<ButtonInput<KeyCode>>,
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window>,
    cameras: Query<(&Camera, &GlobalTransform), With<Camera2d>>,
    mut input: ResMut<PlayerInput>,
) {
    *input = PlayerInput::default();

    input.step = if keys.pressed(KeyCode::KeyW) || keys.pressed(KeyCode::ArrowUp) {
        Some(Facing::Up)
    } else if keys.pressed(KeyCode::KeyS) || keys.pressed(KeyCode::ArrowDown) {
        Some(Facing::Down)
    } else if keys.pressed(KeyCode::KeyA) || keys.pressed(KeyCode::ArrowLeft) {
        Some(Facing::Left)
    } else if keys.pressed(KeyCode::KeyD) || keys.pressed(KeyCode::ArrowRight) {
        Some(Facing::Right)
    } else {
        None
    };

    input.interact = keys.just_pressed(KeyCode::KeyE) || keys.just_pressed(KeyCode::Space);
    input.cancel = keys.just_pressed(KeyCode::Escape);

    if buttons.just_pressed(MouseButton::Left) {
        input.click_tile = cursor_tile(&windows, &cameras);
    }
}

/// Tile under the cursor, if the cursor is inside the window.
fn cursor_tile(
    windows: &Query<&Window>,
    cameras: &Query<(&Camera, &GlobalTransform), With<Camera2d>>,
) -> Option<(i32, i32)> {
    let window = windows.get_single().ok()?;
    let cursor = window.cursor_position()?;
    let (camera, camera_transform) = cameras.get_single().ok()?;
    let world = camera.viewport_to_world_2d(camera_transform, cursor).ok()?;
    Some(world_to_grid(world.x, world.y))
}
