//! Dungeon domain plugin: the procedurally generated creature den.
//!
//! Generation itself lives in `blueprint`, `chunks`, and `builder`; this
//! module wires it into the app. Two den-specific behaviors live here:
//! stepping on the warp tile rebuilds the den in place, and interacting on
//! the entry tile leaves for the meadow.

use bevy::prelude::*;

use crate::shared::*;
use crate::world::{load_map, ActiveMap, MapTile};

pub mod blueprint;
pub mod builder;
pub mod chunks;

use chunks::ChunkLibrary;

pub struct DenPlugin;

impl Plugin for DenPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ChunkLibrary>().add_systems(
            Update,
            (handle_den_rebuild, handle_den_exit).run_if(in_state(GameState::Playing)),
        );
    }
}

/// Rebuild the den in place when the player reaches the warp tile. The old
/// layout is despawned wholesale and the player relocated to the new start.
fn handle_den_rebuild(
    mut commands: Commands,
    mut events: EventReader<DenRebuildEvent>,
    tile_query: Query<Entity, With<MapTile>>,
    mut active_map: ResMut<ActiveMap>,
    mut rng: ResMut<DenRng>,
    chunks: Res<ChunkLibrary>,
    mut relocate: EventWriter<PlayerRelocateEvent>,
    mut rebuilt: EventWriter<DenRebuiltEvent>,
    mut toasts: EventWriter<ToastEvent>,
) {
    if events.read().next().is_none() {
        return;
    }
    events.clear();

    if active_map.id() != Some(MapId::Den) {
        return;
    }

    for entity in tile_query.iter() {
        commands.entity(entity).despawn();
    }

    load_map(&mut commands, MapId::Den, &mut active_map, &mut rng, &chunks);

    let start = active_map
        .den_start()
        .expect("den just loaded without a start tile");
    relocate.send(PlayerRelocateEvent {
        x: start.0,
        y: start.1,
    });
    rebuilt.send(DenRebuiltEvent);
    toasts.send(ToastEvent {
        message: "The den shifts around you...".to_string(),
        duration_secs: 2.0,
    });
}

/// Interacting while standing on the den's entry tile returns to the meadow.
fn handle_den_exit(
    input: Res<PlayerInput>,
    active_map: Res<ActiveMap>,
    player_query: Query<&GridPosition, With<Player>>,
    mut transitions: EventWriter<MapTransitionEvent>,
) {
    if !input.interact {
        return;
    }
    let Some(start) = active_map.den_start() else {
        return;
    };
    let Ok(pos) = player_query.get_single() else {
        return;
    };
    if (pos.x, pos.y) == start {
        transitions.send(MapTransitionEvent {
            to_map: MapId::Meadow,
            to_x: 18,
            to_y: 5,
        });
    }
}
