//! Breadth-first pathfinding over a dense boolean walkability grid.
//!
//! `find_path` is stateless and deterministic: given the same grid and
//! endpoints it always returns the same shortest 4-directional path. The
//! returned path excludes the source and ends with the goal; an empty vec
//! means either endpoint was non-walkable or the goal is unreachable.

use std::collections::VecDeque;

/// Rectangular boolean walkability matrix. `true` = traversable.
///
/// Owned by the active map; pathfinding and movement only read it. Out of
/// bounds queries report non-walkable rather than panicking.
#[derive(Debug, Clone, Default)]
pub struct WalkGrid {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl WalkGrid {
    /// A grid with every cell non-walkable.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![false; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return false;
        }
        self.cells[y as usize * self.width + x as usize]
    }

    pub fn set(&mut self, x: i32, y: i32, walkable: bool) {
        if x >= 0 && y >= 0 && x < self.width as i32 && y < self.height as i32 {
            self.cells[y as usize * self.width + x as usize] = walkable;
        }
    }
}

/// Neighbor exploration order. Only affects tie-breaking among equal-length
/// paths, never correctness.
const NEIGHBOR_ORDER: [(i32, i32); 4] = [(0, 1), (0, -1), (-1, 0), (1, 0)];

/// Shortest 4-directional path from `source` to `goal`.
///
/// If either endpoint is non-walkable the search is skipped entirely and an
/// empty path is returned; this is the expected no-op for clicking on a wall,
/// not an error. Each cell is visited at most once, so the search is
/// O(width × height) in both time and space.
pub fn find_path(grid: &WalkGrid, source: (i32, i32), goal: (i32, i32)) -> Vec<(i32, i32)> {
    if !grid.get(source.0, source.1) || !grid.get(goal.0, goal.1) {
        return Vec::new();
    }

    let mut visited = vec![false; grid.width() * grid.height()];
    let index = |(x, y): (i32, i32)| y as usize * grid.width() + x as usize;

    let mut queue: VecDeque<((i32, i32), Vec<(i32, i32)>)> = VecDeque::new();
    visited[index(source)] = true;
    queue.push_back((source, Vec::new()));

    while let Some((cell, path)) = queue.pop_front() {
        if cell == goal {
            return path;
        }

        for (dx, dy) in NEIGHBOR_ORDER {
            let next = (cell.0 + dx, cell.1 + dy);
            if !grid.get(next.0, next.1) || visited[index(next)] {
                continue;
            }
            // Mark at enqueue time so a cell is never queued twice.
            visited[index(next)] = true;
            let mut next_path = path.clone();
            next_path.push(next);
            queue.push_back((next, next_path));
        }
    }

    Vec::new()
}
