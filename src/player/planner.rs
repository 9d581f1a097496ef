//! Tile-to-tile movement planning and interpolation.
//!
//! The planner owns a queue of target cells (in map coordinates) and walks
//! the player's pixel position toward them one committed cell at a time.
//! It is a plain component with no world access of its own; systems feed it
//! a walkability grid when planning and a delta-time when advancing.

use bevy::prelude::*;
use std::collections::VecDeque;

use crate::pathfind::{find_path, WalkGrid};
use crate::shared::{grid_to_world, Facing};

/// What `advance` did this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    /// No queued movement; the planner is at rest.
    Idle,
    /// Moved toward (or committed to) a cell without reaching it.
    Moving,
    /// Snapped onto a cell center this frame.
    Arrived { x: i32, y: i32 },
}

#[derive(Component, Debug, Default)]
pub struct MovementPlanner {
    queue: VecDeque<(i32, i32)>,
    committed: Option<(i32, i32)>,
    pub walking: bool,
    pub facing: Facing,
    /// Number of times a request actually ran the pathfinder. Adjacent-cell
    /// requests bypass it and leave this untouched.
    pub paths_computed: u32,
}

impl MovementPlanner {
    /// Plan a walk from `from` to `dest`, both in map coordinates. `shift`
    /// converts map coordinates to grid indices.
    ///
    /// Rejected outright if the destination is not walkable. A destination
    /// orthogonally adjacent to the planning origin is enqueued directly
    /// without running the pathfinder. An unreachable destination is a
    /// silent no-op.
    pub fn request_move(&mut self, from: (i32, i32), dest: (i32, i32), grid: &WalkGrid, shift: i32) {
        if !grid.get(dest.0 + shift, dest.1 + shift) {
            return;
        }

        // An in-flight cell still completes, so a replan starts from it:
        // otherwise the new queue head could sit two steps from where the
        // pawn actually snaps, and the hop would cut corners.
        let from = self.committed.unwrap_or(from);
        if dest == from {
            self.queue.clear();
            return;
        }

        let manhattan = (dest.0 - from.0).abs() + (dest.1 - from.1).abs();
        if manhattan == 1 {
            self.queue.clear();
            self.queue.push_back(dest);
            self.walking = true;
            return;
        }

        self.paths_computed += 1;
        let path = find_path(
            grid,
            (from.0 + shift, from.1 + shift),
            (dest.0 + shift, dest.1 + shift),
        );
        if path.is_empty() {
            return;
        }

        self.queue.clear();
        for (gx, gy) in path {
            self.queue.push_back((gx - shift, gy - shift));
        }
        self.walking = true;
    }

    /// Move `pos` toward the committed cell by up to `speed * dt` pixels per
    /// axis, committing the next queued cell when none is in flight.
    pub fn advance(&mut self, pos: &mut Vec2, dt: f32, speed: f32) -> Step {
        if let Some((cx, cy)) = self.committed {
            let target = grid_to_world(cx, cy);
            let delta = target - *pos;
            let step = speed * dt;

            if delta.x.abs() <= step && delta.y.abs() <= step {
                *pos = target;
                self.committed = None;
                return Step::Arrived { x: cx, y: cy };
            }

            pos.x += delta.x.clamp(-step, step);
            pos.y += delta.y.clamp(-step, step);
            return Step::Moving;
        }

        if let Some((nx, ny)) = self.queue.pop_front() {
            let here = *pos;
            let target = grid_to_world(nx, ny);
            let delta = target - here;
            // Vertical movement wins the facing tie-break.
            self.facing = if delta.y.abs() >= delta.x.abs() {
                if delta.y > 0.0 {
                    Facing::Up
                } else {
                    Facing::Down
                }
            } else if delta.x > 0.0 {
                Facing::Right
            } else {
                Facing::Left
            };
            self.committed = Some((nx, ny));
            self.walking = true;
            return Step::Moving;
        }

        self.walking = false;
        Step::Idle
    }

    /// Abandon the current plan. The in-flight cell is dropped too; the
    /// player stays at whatever pixel position they reached.
    pub fn stop(&mut self) {
        self.queue.clear();
        self.committed = None;
        self.walking = false;
    }

    pub fn is_idle(&self) -> bool {
        self.committed.is_none() && self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::TILE_SIZE;

    fn open_grid(side: usize) -> WalkGrid {
        let mut grid = WalkGrid::new(side, side);
        for y in 0..side as i32 {
            for x in 0..side as i32 {
                grid.set(x, y, true);
            }
        }
        grid
    }

    /// Run the planner to completion, returning every cell it arrived on.
    fn walk_out(planner: &mut MovementPlanner, start: (i32, i32)) -> Vec<(i32, i32)> {
        let mut pos = grid_to_world(start.0, start.1);
        let mut arrivals = Vec::new();
        for _ in 0..10_000 {
            match planner.advance(&mut pos, 1.0 / 60.0, TILE_SIZE * 6.0) {
                Step::Idle => break,
                Step::Moving => {}
                Step::Arrived { x, y } => arrivals.push((x, y)),
            }
        }
        arrivals
    }

    #[test]
    fn walks_a_planned_path_cell_by_cell() {
        let grid = open_grid(8);
        let mut planner = MovementPlanner::default();
        planner.request_move((0, 0), (3, 0), &grid, 0);
        assert!(planner.walking);

        let arrivals = walk_out(&mut planner, (0, 0));
        assert_eq!(arrivals, vec![(1, 0), (2, 0), (3, 0)]);
        assert!(!planner.walking);
        assert!(planner.is_idle());
    }

    #[test]
    fn adjacent_destination_skips_the_pathfinder() {
        let grid = open_grid(8);
        let mut planner = MovementPlanner::default();
        planner.request_move((2, 2), (2, 3), &grid, 0);
        assert_eq!(planner.paths_computed, 0);

        let arrivals = walk_out(&mut planner, (2, 2));
        assert_eq!(arrivals, vec![(2, 3)]);
    }

    #[test]
    fn distant_destination_runs_the_pathfinder_once() {
        let grid = open_grid(8);
        let mut planner = MovementPlanner::default();
        planner.request_move((0, 0), (4, 4), &grid, 0);
        assert_eq!(planner.paths_computed, 1);
        assert!(!planner.is_idle());
    }

    #[test]
    fn non_walkable_destination_is_rejected() {
        let mut grid = open_grid(8);
        grid.set(5, 5, false);
        let mut planner = MovementPlanner::default();
        planner.request_move((0, 0), (5, 5), &grid, 0);
        assert!(planner.is_idle());
        assert!(!planner.walking);
        assert_eq!(planner.paths_computed, 0);
    }

    #[test]
    fn unreachable_destination_is_a_silent_no_op() {
        let mut grid = open_grid(8);
        for y in 0..8 {
            grid.set(4, y, false); // full wall
        }
        let mut planner = MovementPlanner::default();
        planner.request_move((0, 0), (7, 0), &grid, 0);
        assert_eq!(planner.paths_computed, 1);
        assert!(planner.is_idle());
        assert!(!planner.walking);
    }

    #[test]
    fn shifted_coordinates_plan_over_negative_cells() {
        let grid = open_grid(16);
        let shift = 8;
        let mut planner = MovementPlanner::default();
        planner.request_move((-3, -3), (-1, -3), &grid, shift);

        let arrivals = walk_out(&mut planner, (-3, -3));
        assert_eq!(arrivals, vec![(-2, -3), (-1, -3)]);
    }

    #[test]
    fn facing_tracks_movement_direction() {
        let grid = open_grid(8);
        let mut planner = MovementPlanner::default();
        let mut pos = grid_to_world(1, 1);

        planner.request_move((1, 1), (2, 1), &grid, 0);
        planner.advance(&mut pos, 1.0 / 60.0, TILE_SIZE);
        assert_eq!(planner.facing, Facing::Right);

        planner.stop();
        let mut pos = grid_to_world(1, 1);
        planner.request_move((1, 1), (1, 0), &grid, 0);
        planner.advance(&mut pos, 1.0 / 60.0, TILE_SIZE);
        assert_eq!(planner.facing, Facing::Down);
    }

    #[test]
    fn stop_abandons_the_plan_mid_walk() {
        let grid = open_grid(8);
        let mut planner = MovementPlanner::default();
        let mut pos = grid_to_world(0, 0);
        planner.request_move((0, 0), (5, 0), &grid, 0);
        planner.advance(&mut pos, 1.0 / 60.0, TILE_SIZE);
        assert!(planner.walking);

        planner.stop();
        assert!(planner.is_idle());
        assert_eq!(planner.advance(&mut pos, 1.0 / 60.0, TILE_SIZE), Step::Idle);
    }

    #[test]
    fn replanning_mid_flight_continues_from_the_committed_cell() {
        let grid = open_grid(8);
        let mut planner = MovementPlanner::default();
        let mut pos = grid_to_world(0, 0);

        planner.request_move((0, 0), (3, 0), &grid, 0);
        // One advance commits (1, 0) without reaching it.
        planner.advance(&mut pos, 1.0 / 60.0, TILE_SIZE);

        // Redirect while the first step is still in flight.
        planner.request_move((0, 0), (0, 1), &grid, 0);

        let mut arrivals = vec![];
        for _ in 0..10_000 {
            match planner.advance(&mut pos, 1.0 / 60.0, TILE_SIZE * 6.0) {
                Step::Idle => break,
                Step::Moving => {}
                Step::Arrived { x, y } => arrivals.push((x, y)),
            }
        }

        // The in-flight cell completes first, then every hop stays
        // orthogonally adjacent all the way to the new destination.
        assert_eq!(arrivals.first(), Some(&(1, 0)));
        assert_eq!(arrivals.last(), Some(&(0, 1)));
        for pair in arrivals.windows(2) {
            let d = (pair[1].0 - pair[0].0).abs() + (pair[1].1 - pair[0].1).abs();
            assert_eq!(d, 1, "non-adjacent hop {pair:?}");
        }
    }

    #[test]
    fn requesting_the_in_flight_cell_just_drops_the_rest_of_the_plan() {
        let grid = open_grid(8);
        let mut planner = MovementPlanner::default();
        let mut pos = grid_to_world(0, 0);

        planner.request_move((0, 0), (4, 0), &grid, 0);
        planner.advance(&mut pos, 1.0 / 60.0, TILE_SIZE);
        planner.request_move((0, 0), (1, 0), &grid, 0);

        let arrivals = walk_out(&mut planner, (0, 0));
        assert_eq!(arrivals, vec![(1, 0)]);
    }

    #[test]
    fn a_new_request_replaces_the_old_queue() {
        let grid = open_grid(8);
        let mut planner = MovementPlanner::default();
        planner.request_move((0, 0), (5, 0), &grid, 0);
        planner.request_move((0, 0), (0, 2), &grid, 0);

        let arrivals = walk_out(&mut planner, (0, 0));
        assert_eq!(arrivals.last(), Some(&(0, 2)));
        assert!(arrivals.iter().all(|&(x, _)| x == 0));
    }

    #[test]
    fn snap_lands_exactly_on_the_cell_center() {
        let grid = open_grid(4);
        let mut planner = MovementPlanner::default();
        let mut pos = grid_to_world(0, 0);
        planner.request_move((0, 0), (1, 0), &grid, 0);

        // Huge speed: first advance commits, second snaps.
        planner.advance(&mut pos, 1.0, TILE_SIZE * 100.0);
        let step = planner.advance(&mut pos, 1.0, TILE_SIZE * 100.0);
        assert_eq!(step, Step::Arrived { x: 1, y: 0 });
        assert_eq!(pos, grid_to_world(1, 0));
    }
}
