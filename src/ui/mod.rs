//! UI domain plugin: HUD and toast messages.

use bevy::prelude::*;

use crate::shared::GameState;

pub mod hud;
pub mod toast;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            OnEnter(GameState::Playing),
            (hud::spawn_hud, toast::spawn_toast_container),
        )
        .add_systems(
            Update,
            (
                hud::update_area_name,
                hud::update_party_count,
                toast::handle_toast_events,
                toast::update_toasts,
            )
                .run_if(in_state(GameState::Playing)),
        );
    }
}
