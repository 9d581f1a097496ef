//! Den assembly: blueprint growth, chunk stitching, start/warp selection.
//!
//! `build_den` runs synchronously and returns a fully built map; there is no
//! partially-built state visible to callers. Rebuilding replaces the whole
//! `DenMap` wholesale.

use rand::prelude::*;
use rand::rngs::StdRng;
use std::collections::HashSet;

use crate::pathfind::WalkGrid;
use crate::shared::{
    TileKind, CHUNK_TILES, DEN_EXTRA_ROOMS, DEN_HALF, DEN_SIZE, GLOBAL_TILE_MODIFIER,
};

use super::blueprint::grow_blueprint;
use super::chunks::{connection_signature, ChunkLibrary};

/// Re-roll attempts for a warp tile distinct from the start tile before
/// falling back to a linear scan.
const WARP_REROLL_CAP: usize = 64;

/// One renderable fine tile produced by stitching, in map coordinates.
#[derive(Debug, Clone, Copy)]
pub struct DenTile {
    pub x: i32,
    pub y: i32,
    pub kind: TileKind,
}

/// A fully generated den. Fine-tile fields use map coordinates (possibly
/// negative); the walkability grid is indexed after adding
/// `GLOBAL_TILE_MODIFIER` to each axis.
#[derive(Debug, Clone)]
pub struct DenMap {
    pub blueprint: HashSet<(i32, i32)>,
    pub grid: WalkGrid,
    /// Terrain drawn under the player.
    pub base_tiles: Vec<DenTile>,
    /// Decorations drawn over the player.
    pub overlay_tiles: Vec<DenTile>,
    /// Every walkable fine tile, in stitching order.
    pub floor_tiles: Vec<(i32, i32)>,
    pub start: (i32, i32),
    pub warp: (i32, i32),
}

/// Build a new den from scratch. Panics if the chunk library is missing a
/// chunk for a computed signature — that is an authoring error, not a
/// recoverable runtime condition.
pub fn build_den(rng: &mut StdRng, chunks: &ChunkLibrary) -> DenMap {
    let blueprint = grow_blueprint(rng, DEN_EXTRA_ROOMS, DEN_HALF);

    let grid_side = ((DEN_SIZE + 1) * CHUNK_TILES) as usize;
    let mut grid = WalkGrid::new(grid_side, grid_side);
    let mut base_tiles = Vec::new();
    let mut overlay_tiles = Vec::new();
    let mut floor_tiles = Vec::new();

    // Stitch over the full coarse range; cells outside the blueprint stay
    // empty (void, non-walkable).
    for cy in -DEN_HALF..=DEN_HALF {
        for cx in -DEN_HALF..=DEN_HALF {
            if !blueprint.contains(&(cx, cy)) {
                continue;
            }

            let sig = connection_signature(
                blueprint.contains(&(cx, cy + 1)),
                blueprint.contains(&(cx, cy - 1)),
                blueprint.contains(&(cx - 1, cy)),
                blueprint.contains(&(cx + 1, cy)),
            );
            let chunk = chunks
                .get(&sig)
                .unwrap_or_else(|| panic!("no den chunk authored for signature '{sig}'"));

            for ty in 0..CHUNK_TILES {
                for tx in 0..CHUNK_TILES {
                    let idx = (ty * CHUNK_TILES + tx) as usize;
                    let map_x = cx * CHUNK_TILES + tx;
                    let map_y = cy * CHUNK_TILES + ty;

                    base_tiles.push(DenTile {
                        x: map_x,
                        y: map_y,
                        kind: chunk.base[idx],
                    });
                    if let Some(kind) = chunk.overlay[idx] {
                        overlay_tiles.push(DenTile {
                            x: map_x,
                            y: map_y,
                            kind,
                        });
                    }
                    if chunk.walkable[idx] {
                        grid.set(
                            map_x + GLOBAL_TILE_MODIFIER,
                            map_y + GLOBAL_TILE_MODIFIER,
                            true,
                        );
                        floor_tiles.push((map_x, map_y));
                    }
                }
            }
        }
    }

    let (start, warp) = pick_start_and_warp(rng, &floor_tiles);

    DenMap {
        blueprint,
        grid,
        base_tiles,
        overlay_tiles,
        floor_tiles,
        start,
        warp,
    }
}

/// Uniform start pick, then warp re-rolled until distinct. The re-roll is
/// capped: a single-candidate map falls back to warp == start, and cap
/// exhaustion falls back to the first differing candidate.
fn pick_start_and_warp(
    rng: &mut StdRng,
    candidates: &[(i32, i32)],
) -> ((i32, i32), (i32, i32)) {
    let start = *candidates
        .choose(rng)
        .expect("stitching produced no walkable tiles");

    if candidates.len() < 2 {
        return (start, start);
    }

    for _ in 0..WARP_REROLL_CAP {
        let warp = *candidates.choose(rng).unwrap();
        if warp != start {
            return (start, warp);
        }
    }
    let warp = *candidates
        .iter()
        .find(|&&c| c != start)
        .expect("candidate list has >= 2 distinct tiles");
    (start, warp)
}
