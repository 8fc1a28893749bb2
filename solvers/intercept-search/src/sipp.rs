//! Safe Interval Path Planning: search over (cell, safe-interval) states.

use std::collections::{BinaryHeap, HashMap};

use intercept_core::{
    critical_time, ConstraintIndex, GridMap, SafeInterval, SafeIntervalIndex, Time,
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
    /// Equal to g; the time the agent enters the interval.
    arrival: Time,
}

/// SIPP towards a stationary goal cell.
///
/// The time axis is compressed into per-cell safe intervals, so a state is
/// a (cell, interval) pair carrying its earliest known arrival time, and
/// waiting is implicit in the arrival-time clipping of the successor
/// generation.
pub struct Sipp<'a> {
    grid: &'a GridMap,
    constraints: &'a ConstraintIndex,
    intervals: SafeIntervalIndex,
    arena: Arena<Node>,
    /// Best arrival per (cell, interval key); later arrivals are dominated.
    state_g: HashMap<(u32, u32), Time>,
    best: Option<NodeId>,
}

impl<'a> Sipp<'a> {
    pub fn new(grid: &'a GridMap, constraints: &'a ConstraintIndex) -> Self {
        Self {
            grid,
            constraints,
            intervals: SafeIntervalIndex::build(grid, constraints),
            arena: Arena::new(),
            state_g: HashMap::new(),
            best: None,
        }
    }

    fn h_val(x: i32, y: i32, gx: i32, gy: i32) -> Time {
        (x - gx).abs() + (y - gy).abs()
    }

    /// Earliest arrival time at (gx, gy) starting from (sx, sy) at t = 0,
    /// or `None` when the goal is unreachable.
    pub fn run(&mut self, sx: i32, sy: i32, gx: i32, gy: i32) -> Option<Time> {
        self.arena.clear();
        self.state_g.clear();
        self.best = None;

        if !self.grid.in_bounds(sx, sy) || !self.grid.in_bounds(gx, gy) {
            return None;
        }
        let tau = critical_time(self.constraints, self.grid.cell_id(gx, gy));

        let mut open = BinaryHeap::new();
        let start_cell = self.grid.cell_id(sx, sy);
        for &interval in self.intervals.intervals(start_cell) {
            let id = self.arena.alloc(Node {
                x: sx,
                y: sy,
                interval,
                g: interval.start,
                arrival: interval.start,
            });
            self.state_g.insert((start_cell, interval.key), interval.start);
            open.push(OpenEntry::new(interval.start, Self::h_val(sx, sy, gx, gy), id));
        }

        while let Some(entry) = open.pop() {
            let current = *self.arena.get(entry.id);
            if !is_safe(self.grid, self.constraints, current.x, current.y, current.arrival) {
                continue;
            }
            if current.x == gx && current.y == gy {
                self.best = Some(entry.id);
                if current.g > tau {
                    break;
                }
                continue;
            }

            self.expand(entry.id, &current, gx, gy, &mut open);
        }

        self.best.map(|id| self.arena.get(id).g)
    }

    fn expand(
        &mut self,
        current_id: NodeId,
        current: &Node,
        gx: i32,
        gy: i32,
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
                // The agent leaves the current cell at arrival - 1, so its
                // own interval must still be open then.
                if current.interval.end < arrival - 1 {
                    continue;
                }
                if arrival > interval.end {
                    continue;
                }
                if self
                    .state_g
                    .get(&(ncell, interval.key))
                    .is_some_and(|&g| g <= arrival)
                {
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
                self.state_g.insert((ncell, interval.key), arrival);
                open.push(OpenEntry::new(arrival, Self::h_val(nx, ny, gx, gy), id));
            }
        }
    }

    /// The space-time path of the last successful run, start first.
    ///
    /// Consecutive samples may be more than one time step apart; the gap
    /// is an implicit wait inside the earlier sample's safe interval.
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
