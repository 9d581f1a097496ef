//! Room-blueprint growth for the den.
//!
//! The blueprint is a set of coarse cells; each cell later becomes one
//! stitched tile chunk. Growth starts from a 5-cell seed cross and only ever
//! adds cells adjacent to existing ones, so the blueprint is a single
//! connected component by construction.

use bevy::log::warn;
use rand::prelude::*;
use rand::rngs::StdRng;
use std::collections::HashSet;

/// Outer-loop attempts per room before growth gives up early. Unreachable
/// with the default bound, but keeps a too-tight bound from hanging a frame.
const MAX_ROOM_ATTEMPTS: usize = 256;

/// The four orthogonal neighbor coordinates of a coarse cell.
pub fn neighbors((x, y): (i32, i32)) -> [(i32, i32); 4] {
    [(x, y + 1), (x, y - 1), (x - 1, y), (x + 1, y)]
}

fn occupied_neighbor_count(blueprint: &HashSet<(i32, i32)>, cell: (i32, i32)) -> usize {
    neighbors(cell)
        .iter()
        .filter(|n| blueprint.contains(n))
        .count()
}

/// Connectivity cutoff for candidate source cells. 2 until growth is past
/// the halfway point, 3 afterward: early rooms sprawl, late rooms thicken.
fn connectivity_threshold(placed: usize, extra_rooms: usize) -> usize {
    if placed <= extra_rooms / 2 {
        2
    } else {
        3
    }
}

/// Grow a connected blueprint of `5 + extra_rooms` coarse cells, all within
/// `[-half_extent, half_extent]` on both axes.
///
/// Early rooms favor low-connectivity source cells (sprawl); once growth is
/// past the halfway point the connectivity threshold rises from 2 to 3 and
/// the shape thickens instead. Candidate pools are kept in insertion order
/// so the same seed always grows the same blueprint.
pub fn grow_blueprint(
    rng: &mut StdRng,
    extra_rooms: usize,
    half_extent: i32,
) -> HashSet<(i32, i32)> {
    // Seed cross: origin plus its four neighbors.
    let mut ordered: Vec<(i32, i32)> = vec![(0, 0)];
    ordered.extend(neighbors((0, 0)));
    let mut blueprint: HashSet<(i32, i32)> = ordered.iter().copied().collect();

    for placed in 0..extra_rooms {
        let threshold = connectivity_threshold(placed, extra_rooms);

        let mut attempts = 0;
        let grew = loop {
            attempts += 1;
            if attempts > MAX_ROOM_ATTEMPTS {
                break false;
            }

            // Prefer cells with room to branch; fall back to the whole
            // blueprint when everything is saturated.
            let low: Vec<(i32, i32)> = ordered
                .iter()
                .copied()
                .filter(|&c| occupied_neighbor_count(&blueprint, c) < threshold)
                .collect();
            let pool = if low.is_empty() { &ordered } else { &low };

            let Some(&cell) = pool.choose(rng) else {
                break false;
            };

            let mut open: Vec<(i32, i32)> = neighbors(cell)
                .into_iter()
                .filter(|n| !blueprint.contains(n))
                .collect();
            open.shuffle(rng);

            if let Some(&next) = open
                .iter()
                .find(|(x, y)| x.abs() <= half_extent && y.abs() <= half_extent)
            {
                blueprint.insert(next);
                ordered.push(next);
                break true;
            }
        };

        if !grew {
            warn!(
                "den blueprint growth stalled after {} of {} rooms; bound too tight",
                placed, extra_rooms
            );
            break;
        }
    }

    blueprint
}
