//! Shared components, resources, events, and states for Mossvale.
//!
//! This is the type contract. Every domain plugin imports from here, and
//! cross-domain writes travel as events. The one read-side exception is the
//! world's `ActiveMap` context, which movement and creature systems query
//! directly.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════════════════════════════════
// GAME STATE — top-level state machine
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, States, Default)]
pub enum GameState {
    #[default]
    Loading,
    Playing,
}

// ═══════════════════════════════════════════════════════════════════════
// SHARED PLUGIN — state, events, and cross-domain resources
// ═══════════════════════════════════════════════════════════════════════

/// Registers everything the domain plugins communicate through. Added first,
/// both by `main` and by headless test apps.
pub struct SharedPlugin;

impl Plugin for SharedPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .init_resource::<PlayerState>()
            .init_resource::<PlayerInput>()
            .init_resource::<DenRng>()
            .add_event::<MapTransitionEvent>()
            .add_event::<PlayerRelocateEvent>()
            .add_event::<DenRebuildEvent>()
            .add_event::<DenRebuiltEvent>()
            .add_event::<CreatureTamedEvent>()
            .add_event::<ToastEvent>()
            .add_systems(Update, finish_loading.run_if(in_state(GameState::Loading)));
    }
}

/// Everything is generated in code; loading is done as soon as it starts.
fn finish_loading(mut next_state: ResMut<NextState<GameState>>) {
    next_state.set(GameState::Playing);
}

// ═══════════════════════════════════════════════════════════════════════
// WORLD & MAPS
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MapId {
    Town,
    Meadow,
    BreedersHut,
    /// The procedural den. Regenerated every time the warp tile is reached.
    Den,
}

impl MapId {
    pub fn display_name(self) -> &'static str {
        match self {
            MapId::Town => "Mossvale",
            MapId::Meadow => "Eastern Meadow",
            MapId::BreedersHut => "Breeder's Hut",
            MapId::Den => "The Den",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileKind {
    Grass,
    Dirt,
    Path,
    Water,
    Sand,
    Stone,
    WoodFloor,
    CaveFloor,
    CaveWall,
    Moss,
    Void,
}

impl TileKind {
    /// Whether a pawn can stand on this tile kind, absent any scenery on top.
    pub fn walkable(self) -> bool {
        !matches!(self, TileKind::Water | TileKind::Void | TileKind::CaveWall)
    }
}

/// Integer tile coordinate of an entity. Kept in sync with its Transform.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPosition {
    pub x: i32,
    pub y: i32,
}

impl GridPosition {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A walk-on trigger area linking one map to a position on another.
#[derive(Debug, Clone)]
pub struct MapTransition {
    pub from_rect: (i32, i32, i32, i32), // x, y, w, h trigger area
    pub to_map: MapId,
    pub to_pos: (i32, i32),
}

impl MapTransition {
    pub fn contains(&self, x: i32, y: i32) -> bool {
        let (rx, ry, rw, rh) = self.from_rect;
        x >= rx && x < rx + rw && y >= ry && y < ry + rh
    }
}

// ═══════════════════════════════════════════════════════════════════════
// PLAYER
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Facing {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

impl Facing {
    /// Grid delta of a single step in this direction.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Facing::Up => (0, 1),
            Facing::Down => (0, -1),
            Facing::Left => (-1, 0),
            Facing::Right => (1, 0),
        }
    }
}

#[derive(Component, Debug, Clone, Default)]
pub struct Player;

#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct PlayerState {
    pub current_map: MapId,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            current_map: MapId::Town,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// INPUT — written by the input domain in PreUpdate, read everywhere else
// ═══════════════════════════════════════════════════════════════════════

/// The single translation of hardware input into game intent for a frame.
#[derive(Resource, Debug, Clone, Default)]
pub struct PlayerInput {
    /// One-tile step request from the movement keys.
    pub step: Option<Facing>,
    /// Destination tile under the cursor when the left button was pressed.
    pub click_tile: Option<(i32, i32)>,
    pub interact: bool,
    pub cancel: bool,
}

// ═══════════════════════════════════════════════════════════════════════
// CREATURES
// ═══════════════════════════════════════════════════════════════════════

/// A tamed or wild creature. The genome is a short gene string; see
/// `creatures::genetics` for how it is rolled and bred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creature {
    pub name: String,
    pub genome: String,
}

/// The player's tamed creatures, in taming order.
#[derive(Resource, Debug, Clone, Default)]
pub struct Party {
    pub members: Vec<Creature>,
}

// ═══════════════════════════════════════════════════════════════════════
// RANDOMNESS
// ═══════════════════════════════════════════════════════════════════════

/// Seeded generator used by den building, creature spawning, and breeding.
/// Tests construct it with a fixed seed for reproducible generation.
#[derive(Resource, Debug)]
pub struct DenRng(pub StdRng);

impl DenRng {
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl Default for DenRng {
    fn default() -> Self {
        Self(StdRng::from_entropy())
    }
}

// ═══════════════════════════════════════════════════════════════════════
// EVENTS — cross-domain communication
// ═══════════════════════════════════════════════════════════════════════

#[derive(Event, Debug, Clone)]
pub struct MapTransitionEvent {
    pub to_map: MapId,
    pub to_x: i32,
    pub to_y: i32,
}

/// Teleport the player to a tile on the (already loaded) active map.
#[derive(Event, Debug, Clone)]
pub struct PlayerRelocateEvent {
    pub x: i32,
    pub y: i32,
}

/// Request a full regeneration of the den (fired on warp arrival).
#[derive(Event, Debug, Clone)]
pub struct DenRebuildEvent;

/// The den has been (re)built and the active map replaced.
#[derive(Event, Debug, Clone)]
pub struct DenRebuiltEvent;

#[derive(Event, Debug, Clone)]
pub struct CreatureTamedEvent {
    pub creature: Creature,
}

#[derive(Event, Debug, Clone)]
pub struct ToastEvent {
    pub message: String,
    pub duration_secs: f32,
}

// ═══════════════════════════════════════════════════════════════════════
// CONSTANTS
// ═══════════════════════════════════════════════════════════════════════

pub const TILE_SIZE: f32 = 16.0;
pub const PIXEL_SCALE: f32 = 3.0; // render scale (16px × 3 = 48px on screen)
pub const SCREEN_WIDTH: f32 = 960.0;
pub const SCREEN_HEIGHT: f32 = 540.0;

/// Pixels per second of pawn movement.
pub const PLAYER_SPEED: f32 = 96.0;

/// Fine tiles along one side of a den chunk.
pub const CHUNK_TILES: i32 = 8;

/// Linear coarse-cell bound of the den. Coarse coordinates are confined to
/// `[-DEN_HALF, DEN_HALF]` on both axes.
pub const DEN_SIZE: i32 = 16;
pub const DEN_HALF: i32 = DEN_SIZE / 2;

/// Rooms grown beyond the 5-cell seed cross.
pub const DEN_EXTRA_ROOMS: usize = (DEN_SIZE / 2) as usize;

/// Offset added to fine-tile map coordinates so negative coarse cells index
/// the dense walkability grid at non-negative positions.
pub const GLOBAL_TILE_MODIFIER: i32 = DEN_HALF * CHUNK_TILES;

// ═══════════════════════════════════════════════════════════════════════
// COORDINATE HELPERS
// ═══════════════════════════════════════════════════════════════════════

/// World-space position of a tile's center.
pub fn grid_to_world(x: i32, y: i32) -> Vec2 {
    Vec2::new(
        x as f32 * TILE_SIZE + TILE_SIZE * 0.5,
        y as f32 * TILE_SIZE + TILE_SIZE * 0.5,
    )
}

/// Tile containing a world-space position.
pub fn world_to_grid(x: f32, y: f32) -> (i32, i32) {
    (
        (x / TILE_SIZE).floor() as i32,
        (y / TILE_SIZE).floor() as i32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_world_round_trip() {
        for &(x, y) in &[(0, 0), (5, 3), (-4, -9), (127, 1)] {
            let w = grid_to_world(x, y);
            assert_eq!(world_to_grid(w.x, w.y), (x, y));
        }
    }

    #[test]
    fn transition_rect_containment() {
        let t = MapTransition {
            from_rect: (2, 3, 4, 2),
            to_map: MapId::Meadow,
            to_pos: (1, 1),
        };
        assert!(t.contains(2, 3));
        assert!(t.contains(5, 4));
        assert!(!t.contains(6, 3));
        assert!(!t.contains(2, 5));
    }

    #[test]
    fn tile_modifier_covers_negative_coarse_range() {
        // The most negative fine tile of the most negative coarse cell must
        // land at grid index zero after the shift.
        assert_eq!(-DEN_HALF * CHUNK_TILES + GLOBAL_TILE_MODIFIER, 0);
    }
}
