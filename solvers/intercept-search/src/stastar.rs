//! Space-time A*: search over (x, y, t) with node-time constraints.

use std::collections::{BinaryHeap, HashSet};

use intercept_core::{critical_time, ConstraintIndex, GridMap, Time};

use crate::arena::{Arena, NodeId, OpenEntry};
use crate::path::{is_safe, PathState};

/// The four cardinal moves plus waiting in place; every action takes one
/// time step.
pub(crate) const MOVES: [(i32, i32); 5] = [(1, 0), (-1, 0), (0, 1), (0, -1), (0, 0)];

#[derive(Debug, Clone, Copy)]
struct Node {
    x: i32,
    y: i32,
    t: Time,
    g: Time,
}

/// A* over space-time states on a 4-connected grid.
///
/// States already enqueued are never enqueued again: with unit edge costs
/// the first enqueue of an (x, y, t) triple carries its minimal g, so the
/// frontier set is a sound closed list.
pub struct SpaceTimeAStar<'a> {
    grid: &'a GridMap,
    constraints: &'a ConstraintIndex,
    arena: Arena<Node>,
    frontier: HashSet<(i32, i32, Time)>,
    best: Option<NodeId>,
}

impl<'a> SpaceTimeAStar<'a> {
    pub fn new(grid: &'a GridMap, constraints: &'a ConstraintIndex) -> Self {
        Self {
            grid,
            constraints,
            arena: Arena::new(),
            frontier: HashSet::new(),
            best: None,
        }
    }

    fn h_val(x: i32, y: i32, gx: i32, gy: i32) -> Time {
        (x - gx).abs() + (y - gy).abs()
    }

    /// Earliest arrival time at (gx, gy) starting from (sx, sy) at t = 0,
    /// or `None` when the goal is unreachable.
    ///
    /// When the goal cell itself carries unsafe intervals, an arrival is
    /// only final once it is strictly later than the last of them; earlier
    /// goal pops are remembered but the search keeps going.
    pub fn run(&mut self, sx: i32, sy: i32, gx: i32, gy: i32) -> Option<Time> {
        self.arena.clear();
        self.frontier.clear();
        self.best = None;

        if !self.grid.in_bounds(gx, gy) {
            return None;
        }
        let tau = critical_time(self.constraints, self.grid.cell_id(gx, gy));

        // Once every unsafe window has passed the environment is static,
        // so any goal that is reachable at all is reached within one more
        // sweep of the grid. Capping time there keeps the wait move from
        // spinning forever when the goal is walled off.
        let latest_unsafe = self
            .constraints
            .values()
            .flatten()
            .map(|iv| iv.end)
            .max()
            .unwrap_or(0);
        let horizon = latest_unsafe.saturating_add(self.grid.width() * self.grid.height() + 1);

        let mut open = BinaryHeap::new();
        let start = self.arena.alloc(Node {
            x: sx,
            y: sy,
            t: 0,
            g: 0,
        });
        open.push(OpenEntry::new(0, Self::h_val(sx, sy, gx, gy), start));

        while let Some(entry) = open.pop() {
            let current = *self.arena.get(entry.id);
            if !is_safe(self.grid, self.constraints, current.x, current.y, current.t) {
                continue;
            }
            if current.x == gx && current.y == gy {
                self.best = Some(entry.id);
                if current.g > tau {
                    break;
                }
                continue;
            }

            for (dx, dy) in MOVES {
                let nx = current.x + dx;
                let ny = current.y + dy;
                let nt = current.t + 1;
                if nt > horizon {
                    continue;
                }
                if !self.grid.in_bounds(nx, ny) || self.grid.is_obstacle(nx, ny) {
                    continue;
                }
                if !is_safe(self.grid, self.constraints, nx, ny, nt) {
                    continue;
                }
                if self.frontier.contains(&(nx, ny, nt)) {
                    continue;
                }

                let id = self.arena.alloc(Node {
                    x: nx,
                    y: ny,
                    t: nt,
                    g: current.g + 1,
                });
                self.arena.set_parent(id, entry.id);
                self.frontier.insert((nx, ny, nt));
                open.push(OpenEntry::new(current.g + 1, Self::h_val(nx, ny, gx, gy), id));
            }
        }

        self.best.map(|id| self.arena.get(id).g)
    }

    /// The space-time path of the last successful run, start first.
    pub fn get_path(&self) -> Vec<PathState> {
        let mut path = Vec::new();
        let mut current = self.best;
        while let Some(id) = current {
            let node = self.arena.get(id);
            path.push(PathState::new(node.x, node.y, node.t));
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
