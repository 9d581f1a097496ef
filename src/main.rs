use bevy::prelude::*;

use mossvale::shared::{PIXEL_SCALE, SCREEN_HEIGHT, SCREEN_WIDTH};
use mossvale::{
    CreaturesPlugin, DenPlugin, InputPlugin, PlayerPlugin, SharedPlugin, UiPlugin, WorldPlugin,
};

fn main() {
    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Mossvale".to_string(),
                        resolution: (SCREEN_WIDTH, SCREEN_HEIGHT).into(),
                        resizable: false,
                        ..default()
                    }),
                    ..default()
                })
                .set(ImagePlugin::default_nearest()),
        )
        .add_plugins((
            SharedPlugin,
            InputPlugin,
            WorldPlugin,
            DenPlugin,
            PlayerPlugin,
            CreaturesPlugin,
            UiPlugin,
        ))
        .add_systems(Startup, setup_camera)
        .run();
}

fn setup_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        OrthographicProjection {
            scale: 1.0 / PIXEL_SCALE,
            ..OrthographicProjection::default_2d()
        },
    ));
}
