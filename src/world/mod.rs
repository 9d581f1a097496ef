//! World domain plugin for Mossvale.
//!
//! Responsible for:
//! - Loading static maps and the generated den into the ActiveMap context
//! - Building the walkability grid each map exposes to movement
//! - Rendering tile and scenery sprites
//! - Map transitions between areas

use bevy::prelude::*;

use crate::dungeon::builder::{build_den, DenMap};
use crate::dungeon::chunks::ChunkLibrary;
use crate::pathfind::WalkGrid;
use crate::shared::*;

pub mod maps;

use maps::{generate_map, MapDef, SceneryKind};

// ═══════════════════════════════════════════════════════════════════════
// PLUGIN
// ═══════════════════════════════════════════════════════════════════════

pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ActiveMap>()
            .add_systems(OnEnter(GameState::Playing), spawn_initial_map)
            .add_systems(
                Update,
                handle_map_transition.run_if(in_state(GameState::Playing)),
            );
    }
}

// ═══════════════════════════════════════════════════════════════════════
// RESOURCES — the single active-map context
// ═══════════════════════════════════════════════════════════════════════

/// Which kind of map is currently active.
#[derive(Debug, Clone, Default)]
pub enum MapKind {
    #[default]
    Unloaded,
    Static {
        def: MapDef,
    },
    Procedural {
        den: DenMap,
    },
}

/// The active map: its kind, its walkability grid, and the coordinate shift
/// between map tiles and grid indices. There is exactly one active map;
/// loading or rebuilding replaces the whole resource state wholesale.
#[derive(Resource, Debug, Clone, Default)]
pub struct ActiveMap {
    pub kind: MapKind,
    pub grid: WalkGrid,
    /// Added to each axis of a map coordinate to index `grid`. Zero for
    /// static maps; `GLOBAL_TILE_MODIFIER` for the den.
    pub tile_shift: i32,
}

impl ActiveMap {
    pub fn loaded(&self) -> bool {
        !matches!(self.kind, MapKind::Unloaded)
    }

    pub fn id(&self) -> Option<MapId> {
        match &self.kind {
            MapKind::Unloaded => None,
            MapKind::Static { def } => Some(def.id),
            MapKind::Procedural { .. } => Some(MapId::Den),
        }
    }

    /// Walkability of a map-coordinate tile.
    pub fn is_walkable(&self, x: i32, y: i32) -> bool {
        self.grid.get(x + self.tile_shift, y + self.tile_shift)
    }

    pub fn transitions(&self) -> &[MapTransition] {
        match &self.kind {
            MapKind::Static { def } => &def.transitions,
            _ => &[],
        }
    }

    /// The regeneration trigger tile, if the active map has one.
    pub fn warp(&self) -> Option<(i32, i32)> {
        match &self.kind {
            MapKind::Procedural { den } => Some(den.warp),
            _ => None,
        }
    }

    /// The den's entry tile, if the active map is the den.
    pub fn den_start(&self) -> Option<(i32, i32)> {
        match &self.kind {
            MapKind::Procedural { den } => Some(den.start),
            _ => None,
        }
    }

    /// Pixel-space extents of the map, for camera clamping.
    pub fn pixel_bounds(&self) -> (Vec2, Vec2) {
        let min = -self.tile_shift as f32 * TILE_SIZE;
        let max_x = (self.grid.width() as i32 - self.tile_shift) as f32 * TILE_SIZE;
        let max_y = (self.grid.height() as i32 - self.tile_shift) as f32 * TILE_SIZE;
        (Vec2::splat(min), Vec2::new(max_x, max_y))
    }
}

// ═══════════════════════════════════════════════════════════════════════
// COMPONENTS
// ═══════════════════════════════════════════════════════════════════════

/// Marker for every map-owned entity (tiles, scenery, warp marker), used
/// for bulk despawn on map change or den rebuild.
#[derive(Component, Debug)]
pub struct MapTile;

// ═══════════════════════════════════════════════════════════════════════
// TILE COLORS
// ═══════════════════════════════════════════════════════════════════════

fn tile_color(kind: TileKind) -> Color {
    match kind {
        TileKind::Grass => Color::srgb(0.32, 0.7, 0.33),
        TileKind::Dirt => Color::srgb(0.6, 0.45, 0.3),
        TileKind::Path => Color::srgb(0.7, 0.65, 0.5),
        TileKind::Water => Color::srgb(0.2, 0.4, 0.8),
        TileKind::Sand => Color::srgb(0.9, 0.85, 0.6),
        TileKind::Stone => Color::srgb(0.5, 0.5, 0.55),
        TileKind::WoodFloor => Color::srgb(0.65, 0.5, 0.3),
        TileKind::CaveFloor => Color::srgb(0.38, 0.34, 0.4),
        TileKind::CaveWall => Color::srgb(0.16, 0.14, 0.2),
        TileKind::Moss => Color::srgb(0.25, 0.55, 0.35),
        TileKind::Void => Color::srgb(0.08, 0.08, 0.1),
    }
}

fn scenery_color(kind: SceneryKind) -> Color {
    match kind {
        SceneryKind::Tree => Color::srgb(0.13, 0.4, 0.18),
        SceneryKind::Boulder => Color::srgb(0.42, 0.4, 0.42),
        SceneryKind::Stump => Color::srgb(0.45, 0.32, 0.18),
    }
}

// ═══════════════════════════════════════════════════════════════════════
// MAP LOADING AND RENDERING
// ═══════════════════════════════════════════════════════════════════════

/// Z layers, bottom to top. Overlay tiles draw over the player.
const Z_BASE: f32 = 0.0;
const Z_WARP: f32 = 4.0;
const Z_SCENERY: f32 = 5.0;
const Z_OVERLAY: f32 = 20.0;

/// Load a map by id: rebuild the ActiveMap context and spawn its sprites.
/// The previous map's entities must already be despawned by the caller.
pub fn load_map(
    commands: &mut Commands,
    map_id: MapId,
    active_map: &mut ActiveMap,
    rng: &mut DenRng,
    chunks: &ChunkLibrary,
) {
    match map_id {
        MapId::Den => {
            let den = build_den(&mut rng.0, chunks);
            spawn_den_sprites(commands, &den);
            active_map.grid = den.grid.clone();
            active_map.tile_shift = GLOBAL_TILE_MODIFIER;
            active_map.kind = MapKind::Procedural { den };
        }
        _ => {
            let def = generate_map(map_id);
            let mut grid = WalkGrid::new(def.width, def.height);
            for y in 0..def.height as i32 {
                for x in 0..def.width as i32 {
                    grid.set(x, y, def.get_tile(x, y).walkable());
                }
            }
            // Scenery is solid.
            for s in &def.scenery {
                grid.set(s.x, s.y, false);
            }
            spawn_static_sprites(commands, &def);
            active_map.grid = grid;
            active_map.tile_shift = 0;
            active_map.kind = MapKind::Static { def };
        }
    }
}

fn tile_sprite(kind: TileKind, x: i32, y: i32, z: f32) -> (Sprite, Transform, MapTile) {
    let center = grid_to_world(x, y);
    (
        Sprite {
            color: tile_color(kind),
            custom_size: Some(Vec2::new(TILE_SIZE, TILE_SIZE)),
            ..default()
        },
        Transform::from_translation(center.extend(z)),
        MapTile,
    )
}

fn spawn_static_sprites(commands: &mut Commands, def: &MapDef) {
    for y in 0..def.height as i32 {
        for x in 0..def.width as i32 {
            commands.spawn(tile_sprite(def.get_tile(x, y), x, y, Z_BASE));
        }
    }
    for s in &def.scenery {
        let center = grid_to_world(s.x, s.y);
        commands.spawn((
            Sprite {
                color: scenery_color(s.kind),
                custom_size: Some(Vec2::new(TILE_SIZE, TILE_SIZE)),
                ..default()
            },
            Transform::from_translation(center.extend(Z_SCENERY)),
            MapTile,
        ));
    }
}

/// Spawn the den's stitched tile lists: base under the player, overlay over
/// it, plus a marker on the warp tile.
pub fn spawn_den_sprites(commands: &mut Commands, den: &DenMap) {
    for tile in &den.base_tiles {
        commands.spawn(tile_sprite(tile.kind, tile.x, tile.y, Z_BASE));
    }
    for tile in &den.overlay_tiles {
        commands.spawn(tile_sprite(tile.kind, tile.x, tile.y, Z_OVERLAY));
    }

    let warp_center = grid_to_world(den.warp.0, den.warp.1);
    commands.spawn((
        Sprite {
            color: Color::srgb(0.65, 0.3, 0.8),
            custom_size: Some(Vec2::new(TILE_SIZE * 0.75, TILE_SIZE * 0.75)),
            ..default()
        },
        Transform::from_translation(warp_center.extend(Z_WARP)),
        MapTile,
    ));
}

// ═══════════════════════════════════════════════════════════════════════
// SYSTEMS
// ═══════════════════════════════════════════════════════════════════════

/// Spawn the town when the game enters the Playing state.
fn spawn_initial_map(
    mut commands: Commands,
    mut active_map: ResMut<ActiveMap>,
    mut rng: ResMut<DenRng>,
    chunks: Res<ChunkLibrary>,
    mut relocate: EventWriter<PlayerRelocateEvent>,
) {
    load_map(&mut commands, MapId::Town, &mut active_map, &mut rng, &chunks);
    relocate.send(PlayerRelocateEvent { x: 12, y: 11 });
}

/// Handle MapTransitionEvent: despawn the current map, load the new one,
/// and relocate the player onto it.
pub fn handle_map_transition(
    mut commands: Commands,
    mut events: EventReader<MapTransitionEvent>,
    tile_query: Query<Entity, With<MapTile>>,
    mut active_map: ResMut<ActiveMap>,
    mut player_state: ResMut<PlayerState>,
    mut rng: ResMut<DenRng>,
    chunks: Res<ChunkLibrary>,
    mut relocate: EventWriter<PlayerRelocateEvent>,
    mut rebuilt: EventWriter<DenRebuiltEvent>,
    mut toasts: EventWriter<ToastEvent>,
) {
    for event in events.read() {
        // Don't transition to the map we're already on.
        if active_map.id() == Some(event.to_map) {
            continue;
        }

        for entity in tile_query.iter() {
            commands.entity(entity).despawn();
        }

        player_state.current_map = event.to_map;
        load_map(
            &mut commands,
            event.to_map,
            &mut active_map,
            &mut rng,
            &chunks,
        );

        // A freshly generated den decides its own entry tile.
        let (px, py) = match active_map.den_start() {
            Some(start) => start,
            None => (event.to_x, event.to_y),
        };
        relocate.send(PlayerRelocateEvent { x: px, y: py });

        if event.to_map == MapId::Den {
            rebuilt.send(DenRebuiltEvent);
        }

        toasts.send(ToastEvent {
            message: event.to_map.display_name().to_string(),
            duration_secs: 2.0,
        });
    }
}
