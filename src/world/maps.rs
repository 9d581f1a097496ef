//! Map data definitions for the hand-authored areas.
//!
//! Each static map is defined as a 2D grid of TileKind values plus its
//! transition zones and scenery placements. The Den is not authored here;
//! it is generated by the dungeon domain.

use crate::shared::*;

/// Complete definition of a static game map.
#[derive(Debug, Clone)]
pub struct MapDef {
    pub id: MapId,
    pub width: usize,
    pub height: usize,
    /// Row-major tile data: tiles[y * width + x]
    pub tiles: Vec<TileKind>,
    /// Transition zones linking to other maps.
    pub transitions: Vec<MapTransition>,
    /// Solid scenery placed on the map at load time.
    pub scenery: Vec<SceneryPlacement>,
}

impl MapDef {
    pub fn get_tile(&self, x: i32, y: i32) -> TileKind {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            TileKind::Void
        } else {
            self.tiles[y as usize * self.width + x as usize]
        }
    }
}

/// A solid prop occupying one tile.
#[derive(Debug, Clone)]
pub struct SceneryPlacement {
    pub x: i32,
    pub y: i32,
    pub kind: SceneryKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneryKind {
    Tree,
    Boulder,
    Stump,
}

// ═══════════════════════════════════════════════════════════════════════
// MAP GENERATORS
// ═══════════════════════════════════════════════════════════════════════

pub fn generate_map(map_id: MapId) -> MapDef {
    match map_id {
        MapId::Town => generate_town(),
        MapId::Meadow => generate_meadow(),
        MapId::BreedersHut => generate_breeders_hut(),
        MapId::Den => unreachable!("the den is generated, not authored"),
    }
}

// ---------------------------------------------------------------------------
// Town map: 26x20
// Layout: plaza center, breeder's hut north-west, pond south, meadow exit east
// ---------------------------------------------------------------------------
fn generate_town() -> MapDef {
    let w = 26usize;
    let h = 20usize;
    let mut tiles = vec![TileKind::Grass; w * h];

    let fill_rect = |tiles: &mut Vec<TileKind>, x0: usize, y0: usize, rw: usize, rh: usize, kind: TileKind| {
        for dy in 0..rh {
            for dx in 0..rw {
                let xx = x0 + dx;
                let yy = y0 + dy;
                if xx < w && yy < h {
                    tiles[yy * w + xx] = kind;
                }
            }
        }
    };

    // Main road E-W through the middle
    fill_rect(&mut tiles, 0, 9, 26, 2, TileKind::Path);
    // Road N-S from the plaza down to the pond
    fill_rect(&mut tiles, 12, 3, 2, 14, TileKind::Path);

    // Central plaza
    fill_rect(&mut tiles, 10, 7, 6, 6, TileKind::Stone);
    fill_rect(&mut tiles, 12, 9, 2, 2, TileKind::Water); // Fountain

    // Breeder's hut footprint (north-west)
    fill_rect(&mut tiles, 3, 2, 6, 4, TileKind::Stone);
    fill_rect(&mut tiles, 5, 6, 2, 3, TileKind::Path); // Path to main road

    // Pond (south), sandy shore
    fill_rect(&mut tiles, 16, 15, 6, 4, TileKind::Water);
    fill_rect(&mut tiles, 15, 14, 8, 1, TileKind::Sand);
    fill_rect(&mut tiles, 15, 15, 1, 4, TileKind::Sand);
    fill_rect(&mut tiles, 22, 15, 1, 4, TileKind::Sand);

    // Market stalls (north-east, wood floor)
    fill_rect(&mut tiles, 17, 3, 3, 2, TileKind::WoodFloor);
    fill_rect(&mut tiles, 21, 3, 3, 2, TileKind::WoodFloor);

    let transitions = vec![
        // East exit -> Meadow
        MapTransition {
            from_rect: (25, 8, 1, 4),
            to_map: MapId::Meadow,
            to_pos: (1, 7),
        },
        // Breeder's hut entrance
        MapTransition {
            from_rect: (5, 5, 2, 1),
            to_map: MapId::BreedersHut,
            to_pos: (5, 1),
        },
    ];

    let mut scenery = Vec::new();

    // Trees along the top edge
    for x in (0..26).step_by(3) {
        scenery.push(SceneryPlacement { x: x as i32, y: 19, kind: SceneryKind::Tree });
    }
    // Scattered town trees
    for (tx, ty) in [(2, 12), (7, 14), (20, 12), (24, 14), (2, 7), (10, 3)] {
        scenery.push(SceneryPlacement { x: tx, y: ty, kind: SceneryKind::Tree });
    }
    // Boulders near the pond
    scenery.push(SceneryPlacement { x: 14, y: 16, kind: SceneryKind::Boulder });
    scenery.push(SceneryPlacement { x: 23, y: 17, kind: SceneryKind::Boulder });
    scenery.push(SceneryPlacement { x: 8, y: 16, kind: SceneryKind::Stump });

    MapDef {
        id: MapId::Town,
        width: w,
        height: h,
        tiles,
        transitions,
        scenery,
    }
}

// ---------------------------------------------------------------------------
// Meadow map: 22x14
// Layout: path from town winding east to the den mouth, stream across the
// north, dense trees at the edges
// ---------------------------------------------------------------------------
fn generate_meadow() -> MapDef {
    let w = 22usize;
    let h = 14usize;
    let mut tiles = vec![TileKind::Grass; w * h];

    let fill_rect = |tiles: &mut Vec<TileKind>, x0: usize, y0: usize, rw: usize, rh: usize, kind: TileKind| {
        for dy in 0..rh {
            for dx in 0..rw {
                let xx = x0 + dx;
                let yy = y0 + dy;
                if xx < w && yy < h {
                    tiles[yy * w + xx] = kind;
                }
            }
        }
    };

    // Path from the town exit winding toward the den
    fill_rect(&mut tiles, 0, 6, 9, 2, TileKind::Path);
    fill_rect(&mut tiles, 9, 5, 5, 2, TileKind::Path);
    fill_rect(&mut tiles, 14, 4, 5, 2, TileKind::Path);

    // Stream along the north edge
    fill_rect(&mut tiles, 0, 12, 22, 2, TileKind::Water);
    fill_rect(&mut tiles, 0, 11, 22, 1, TileKind::Sand);

    // Den mouth (east): a dark opening framed in stone
    fill_rect(&mut tiles, 18, 3, 4, 4, TileKind::Stone);
    fill_rect(&mut tiles, 19, 4, 2, 2, TileKind::CaveFloor);

    // Dirt clearing used by wild creatures that wander out
    fill_rect(&mut tiles, 5, 1, 5, 3, TileKind::Dirt);

    let transitions = vec![
        // West exit -> Town
        MapTransition {
            from_rect: (0, 6, 1, 2),
            to_map: MapId::Town,
            to_pos: (24, 9),
        },
        // Den mouth -> Den. The destination tile is ignored: the world
        // loader relocates to the freshly generated start instead.
        MapTransition {
            from_rect: (19, 4, 2, 2),
            to_map: MapId::Den,
            to_pos: (0, 0),
        },
    ];

    let mut scenery = Vec::new();
    for (tx, ty) in [(2, 2), (3, 9), (12, 2), (13, 9), (16, 8), (16, 1), (10, 10)] {
        scenery.push(SceneryPlacement { x: tx, y: ty, kind: SceneryKind::Tree });
    }
    scenery.push(SceneryPlacement { x: 17, y: 3, kind: SceneryKind::Boulder });
    scenery.push(SceneryPlacement { x: 17, y: 6, kind: SceneryKind::Boulder });
    scenery.push(SceneryPlacement { x: 7, y: 9, kind: SceneryKind::Stump });

    MapDef {
        id: MapId::Meadow,
        width: w,
        height: h,
        tiles,
        transitions,
        scenery,
    }
}

// ---------------------------------------------------------------------------
// Breeder's Hut: 11x9 interior — walls on the perimeter, door at the bottom
// ---------------------------------------------------------------------------
fn generate_breeders_hut() -> MapDef {
    let w = 11usize;
    let h = 9usize;
    let mut tiles = vec![TileKind::WoodFloor; w * h];

    let fill_rect = |tiles: &mut Vec<TileKind>, x0: usize, y0: usize, rw: usize, rh: usize, kind: TileKind| {
        for dy in 0..rh {
            for dx in 0..rw {
                let xx = x0 + dx;
                let yy = y0 + dy;
                if xx < w && yy < h {
                    tiles[yy * w + xx] = kind;
                }
            }
        }
    };

    // Void perimeter (walls)
    for x in 0..w {
        tiles[x] = TileKind::Void;
        tiles[(h - 1) * w + x] = TileKind::Void;
    }
    for y in 0..h {
        tiles[y * w] = TileKind::Void;
        tiles[y * w + (w - 1)] = TileKind::Void;
    }

    // Door opening at the front wall (y=0)
    tiles[5] = TileKind::WoodFloor;

    // Breeding pen: straw-colored nest area along the back wall
    fill_rect(&mut tiles, 2, 6, 7, 2, TileKind::Dirt);
    // Counter
    fill_rect(&mut tiles, 1, 4, 4, 1, TileKind::Stone);
    // Entrance mat
    tiles[w + 5] = TileKind::Path;

    let transitions = vec![
        MapTransition {
            from_rect: (5, 0, 1, 1),
            to_map: MapId::Town,
            to_pos: (5, 6),
        },
    ];

    MapDef {
        id: MapId::BreedersHut,
        width: w,
        height: h,
        tiles,
        transitions,
        scenery: Vec::new(),
    }
}
