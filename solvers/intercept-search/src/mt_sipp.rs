//! Moving-target SIPP: SIPP whose goal is a time-parameterized trajectory.

use std::collections::BinaryHeap;

use intercept_core::{
    max_intervals_per_cell, ConstraintIndex, GridMap, SafeInterval, SafeIntervalIndex,
    TargetTrajectory, Time, T_MAX,
};

use crate::arena::{Arena, NodeId, OpenEntry};
use crate::path::{is_safe, PathState};
use crate::stastar::MOVES;

#[derive(Debug, Clone, Copy)]
struct Node {
    x: i32,
    y: i32,
    interval: SafeInterval,
    g: Time,
    arrival: Time,
}

/// Round-stamped g-value; entries from earlier rounds read as unset.
#[derive(Debug, Clone, Copy, Default)]
struct GStamp {
    g: Time,
    round: u32,
}

/// SIPP variant that intercepts a moving target.
///
/// Interception means sharing the target's cell at the arrival time, so
/// the goal test consults the trajectory at pop time and the heuristic is
/// the distance to the closest future trajectory sample.
///
/// The interceptor re-runs this solver many times against the same map
/// and constraints, so the per-(cell, interval) g-table is allocated once
/// and invalidated in O(1) by bumping an instance-scoped round counter at
/// each run.
pub struct MtSipp<'a> {
    grid: &'a GridMap,
    constraints: &'a ConstraintIndex,
    intervals: SafeIntervalIndex,
    g_table: Vec<Vec<GStamp>>,
    round: u32,
    arena: Arena<Node>,
    best: Option<NodeId>,
}

impl<'a> MtSipp<'a> {
    pub fn new(grid: &'a GridMap, constraints: &'a ConstraintIndex) -> Self {
        let cells = (grid.width() * grid.height()) as usize;
        let g_table = (0..cells)
            .map(|cell| vec![GStamp::default(); max_intervals_per_cell(constraints, cell as u32)])
            .collect();
        Self {
            grid,
            constraints,
            intervals: SafeIntervalIndex::build(grid, constraints),
            g_table,
            round: 0,
            arena: Arena::new(),
            best: None,
        }
    }

    #[inline]
    fn g_val(&self, cell: u32, key: u32) -> Time {
        let stamp = self.g_table[cell as usize][key as usize];
        if stamp.round == self.round {
            stamp.g
        } else {
            T_MAX
        }
    }

    /// Earliest interception time of `target` starting from (sx, sy) no
    /// earlier than `t0`, or `None` when the target cannot be reached.
    pub fn run(
        &mut self,
        sx: i32,
        sy: i32,
        t0: Time,
        target: &TargetTrajectory,
    ) -> Option<Time> {
        self.arena.clear();
        self.best = None;
        self.round += 1;

        if target.is_empty() || !self.grid.in_bounds(sx, sy) {
            return None;
        }

        let mut open = BinaryHeap::new();
        let start_cell = self.grid.cell_id(sx, sy);
        for &interval in self.intervals.intervals(start_cell) {
            if interval.end < t0 {
                continue;
            }
            let start_time = t0.max(interval.start);
            let id = self.arena.alloc(Node {
                x: sx,
                y: sy,
                interval,
                g: start_time,
                arrival: start_time,
            });
            self.g_table[start_cell as usize][interval.key as usize] = GStamp {
                g: start_time,
                round: self.round,
            };
            open.push(OpenEntry::new(
                start_time,
                target.min_dist_after(sx, sy, start_time),
                id,
            ));
        }

        while let Some(entry) = open.pop() {
            let current = *self.arena.get(entry.id);
            if target.position_at(current.arrival) == Some((current.x, current.y)) {
                self.best = Some(entry.id);
                break;
            }
            let cell = self.grid.cell_id(current.x, current.y);
            if self.g_val(cell, current.interval.key) < current.arrival {
                continue; // dominated since it was pushed
            }

            self.expand(entry.id, &current, target, &mut open);
        }

        self.best.map(|id| self.arena.get(id).g)
    }

    fn expand(
        &mut self,
        current_id: NodeId,
        current: &Node,
        target: &TargetTrajectory,
        open: &mut BinaryHeap<OpenEntry>,
    ) {
        for (dx, dy) in MOVES {
            let nx = current.x + dx;
            let ny = current.y + dy;
            let nt = current.arrival + 1;
            if !self.grid.in_bounds(nx, ny) || self.grid.is_obstacle(nx, ny) {
                continue;
            }
            let ncell = self.grid.cell_id(nx, ny);

            for &interval in self.intervals.intervals(ncell) {
                let arrival = nt.max(interval.start);
                if current.interval.end < arrival - 1 {
                    continue;
                }
                if arrival > interval.end {
                    continue;
                }
                if self.g_val(ncell, interval.key) <= arrival {
                    continue;
                }

                let id = self.arena.alloc(Node {
                    x: nx,
                    y: ny,
                    interval,
                    g: arrival,
                    arrival,
                });
                self.arena.set_parent(id, current_id);
                self.g_table[ncell as usize][interval.key as usize] = GStamp {
                    g: arrival,
                    round: self.round,
                };
                open.push(OpenEntry::new(
                    arrival,
                    target.min_dist_after(nx, ny, arrival),
                    id,
                ));
            }
        }
    }

    /// The space-time path of the last successful run, start first.
    pub fn get_path(&self) -> Vec<PathState> {
        let mut path = Vec::new();
        let mut current = self.best;
        while let Some(id) = current {
            let node = self.arena.get(id);
            path.push(PathState::new(node.x, node.y, node.arrival));
            current = self.arena.parent(id);
        }
        path.reverse();
        path
    }

    /// Whether every sample of a path respects the grid and the unsafe
    /// intervals.
    pub fn validate(&self, path: &[PathState]) -> bool {
        path.iter()
            .all(|s| is_safe(self.grid, self.constraints, s.x, s.y, s.t))
    }
}
