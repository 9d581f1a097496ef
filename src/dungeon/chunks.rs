//! Pre-authored tile chunks for den stitching.
//!
//! Each chunk is an 8×8 tile block keyed by a connection signature: the
//! sorted side labels ("b2", "l2", "r2", "t2") of the coarse-cell neighbors
//! present in the blueprint. A chunk has three layers: the base terrain
//! (drawn under the player), the walkable presence bits, and an overlay of
//! decorations drawn over the player.
//!
//! Doorways are two tiles wide and sit at the same offsets on every chunk,
//! so openings of adjacent chunks always line up into corridors.

use bevy::prelude::*;
use std::collections::HashMap;

use crate::shared::{TileKind, CHUNK_TILES};

/// Signature of a cell with no connected neighbors; resolves to the chunk
/// with all four sides open.
pub const CHUNK_OPEN_SIGNATURE: &str = "b2l2r2t2";

/// Build the lookup key for a coarse cell from which of its neighbors exist.
/// Labels are appended in sorted order (b, l, r, t).
pub fn connection_signature(top: bool, bottom: bool, left: bool, right: bool) -> String {
    let mut sig = String::new();
    if bottom {
        sig.push_str("b2");
    }
    if left {
        sig.push_str("l2");
    }
    if right {
        sig.push_str("r2");
    }
    if top {
        sig.push_str("t2");
    }
    if sig.is_empty() {
        CHUNK_OPEN_SIGNATURE.to_string()
    } else {
        sig
    }
}

/// One authored chunk. All layers are row-major `CHUNK_TILES × CHUNK_TILES`,
/// index = y * CHUNK_TILES + x.
#[derive(Debug, Clone)]
pub struct TileChunk {
    pub base: Vec<TileKind>,
    pub walkable: Vec<bool>,
    pub overlay: Vec<Option<TileKind>>,
}

/// Fixed signature → chunk lookup, built once at startup. A missing entry
/// for a computed signature is a fatal authoring error, not a runtime case.
#[derive(Resource, Debug, Clone)]
pub struct ChunkLibrary {
    chunks: HashMap<String, TileChunk>,
}

impl Default for ChunkLibrary {
    fn default() -> Self {
        Self::standard()
    }
}

impl ChunkLibrary {
    /// The full 15-signature set (every non-empty side combination), with
    /// the all-open chunk doubling as the zero-connection default.
    pub fn standard() -> Self {
        let mut chunks = HashMap::new();
        for mask in 1u8..16 {
            let top = mask & 1 != 0;
            let bottom = mask & 2 != 0;
            let left = mask & 4 != 0;
            let right = mask & 8 != 0;
            chunks.insert(
                connection_signature(top, bottom, left, right),
                author_chunk(top, bottom, left, right),
            );
        }
        Self { chunks }
    }

    pub fn get(&self, signature: &str) -> Option<&TileChunk> {
        self.chunks.get(signature)
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}

/// Doorway span along a chunk edge (two tiles, centered).
const DOOR_LO: i32 = CHUNK_TILES / 2 - 1;
const DOOR_HI: i32 = CHUNK_TILES / 2;

fn author_chunk(top: bool, bottom: bool, left: bool, right: bool) -> TileChunk {
    let n = (CHUNK_TILES * CHUNK_TILES) as usize;
    let mut base = vec![TileKind::CaveFloor; n];
    let mut walkable = vec![true; n];
    let mut overlay = vec![None; n];

    let idx = |x: i32, y: i32| (y * CHUNK_TILES + x) as usize;
    let max = CHUNK_TILES - 1;

    // Wall ring.
    for i in 0..CHUNK_TILES {
        for (x, y) in [(i, 0), (i, max), (0, i), (max, i)] {
            base[idx(x, y)] = TileKind::CaveWall;
            walkable[idx(x, y)] = false;
        }
    }

    // Doorways punch through the ring where a neighbor exists.
    let mut door = |x: i32, y: i32| {
        base[idx(x, y)] = TileKind::CaveFloor;
        walkable[idx(x, y)] = true;
    };
    if top {
        door(DOOR_LO, max);
        door(DOOR_HI, max);
    }
    if bottom {
        door(DOOR_LO, 0);
        door(DOOR_HI, 0);
    }
    if left {
        door(0, DOOR_LO);
        door(0, DOOR_HI);
    }
    if right {
        door(max, DOOR_LO);
        door(max, DOOR_HI);
    }

    // Overlay decorations: moss in two inner corners, and a center tuft in
    // dead-end rooms to make them read as grown-over.
    overlay[idx(1, max - 1)] = Some(TileKind::Moss);
    overlay[idx(max - 1, 1)] = Some(TileKind::Moss);
    let connections = [top, bottom, left, right].iter().filter(|c| **c).count();
    if connections == 1 {
        overlay[idx(CHUNK_TILES / 2, CHUNK_TILES / 2)] = Some(TileKind::Moss);
    }

    TileChunk {
        base,
        walkable,
        overlay,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_labels_are_sorted() {
        assert_eq!(connection_signature(true, false, false, false), "t2");
        assert_eq!(connection_signature(false, true, false, false), "b2");
        assert_eq!(connection_signature(true, true, true, true), "b2l2r2t2");
        assert_eq!(connection_signature(true, false, true, false), "l2t2");
        assert_eq!(connection_signature(false, true, false, true), "b2r2");
    }

    #[test]
    fn zero_connections_fall_back_to_open_signature() {
        assert_eq!(
            connection_signature(false, false, false, false),
            CHUNK_OPEN_SIGNATURE
        );
        assert!(ChunkLibrary::standard()
            .get(CHUNK_OPEN_SIGNATURE)
            .is_some());
    }

    #[test]
    fn every_possible_signature_resolves() {
        let lib = ChunkLibrary::standard();
        assert_eq!(lib.len(), 15);
        for mask in 0u8..16 {
            let sig = connection_signature(
                mask & 1 != 0,
                mask & 2 != 0,
                mask & 4 != 0,
                mask & 8 != 0,
            );
            assert!(lib.get(&sig).is_some(), "missing chunk for '{sig}'");
        }
    }

    #[test]
    fn doorways_line_up_between_facing_chunks() {
        let lib = ChunkLibrary::standard();
        let right_open = lib.get("r2").unwrap();
        let left_open = lib.get("l2").unwrap();
        let max = CHUNK_TILES - 1;
        let idx = |x: i32, y: i32| (y * CHUNK_TILES + x) as usize;
        for y in [DOOR_LO, DOOR_HI] {
            assert!(right_open.walkable[idx(max, y)], "right doorway at y={y}");
            assert!(left_open.walkable[idx(0, y)], "left doorway at y={y}");
        }
    }

    #[test]
    fn walls_block_everywhere_without_a_connection() {
        let lib = ChunkLibrary::standard();
        let chunk = lib.get("t2").unwrap();
        let idx = |x: i32, y: i32| (y * CHUNK_TILES + x) as usize;
        // Bottom edge has no doorway on a top-only chunk.
        for x in 0..CHUNK_TILES {
            assert!(!chunk.walkable[idx(x, 0)]);
            assert_eq!(chunk.base[idx(x, 0)], TileKind::CaveWall);
        }
    }

    #[test]
    fn interior_is_walkable_floor() {
        let lib = ChunkLibrary::standard();
        let chunk = lib.get(CHUNK_OPEN_SIGNATURE).unwrap();
        let idx = |x: i32, y: i32| (y * CHUNK_TILES + x) as usize;
        for y in 1..CHUNK_TILES - 1 {
            for x in 1..CHUNK_TILES - 1 {
                assert!(chunk.walkable[idx(x, y)]);
                assert_eq!(chunk.base[idx(x, y)], TileKind::CaveFloor);
            }
        }
    }
}
