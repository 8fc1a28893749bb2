//! Spatial A* over an 8-connected grid.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use intercept_core::GridMap;

const SQRT_2: f64 = std::f64::consts::SQRT_2;

/// Heap entry; ordering inverted for `BinaryHeap` so the lowest `f` pops
/// first, ties broken towards the higher `g`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct OpenCell {
    x: i32,
    y: i32,
    g: f64,
    f: f64,
}

impl Eq for OpenCell {}

impl Ord for OpenCell {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| self.g.total_cmp(&other.g))
    }
}

impl PartialOrd for OpenCell {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Shortest-path search on the static grid, diagonal moves allowed.
///
/// Keeps a g-value and a parent cell per grid cell; both tables are
/// reinitialized at each [`run`](AStar::run) and the parent table is what
/// [`get_path`](AStar::get_path) walks afterwards.
pub struct AStar<'a> {
    grid: &'a GridMap,
    g_table: Vec<f64>,
    parent_table: Vec<Option<u32>>,
    goal: Option<(i32, i32)>,
}

impl<'a> AStar<'a> {
    pub fn new(grid: &'a GridMap) -> Self {
        Self {
            grid,
            g_table: Vec::new(),
            parent_table: Vec::new(),
            goal: None,
        }
    }

    /// Octile distance: admissible and consistent for 8-connectivity.
    fn h_val(x: i32, y: i32, gx: i32, gy: i32) -> f64 {
        let dx = (x - gx).abs();
        let dy = (y - gy).abs();
        let diag = dx.min(dy);
        let card = dx + dy - 2 * diag;
        card as f64 + diag as f64 * SQRT_2
    }

    /// Shortest distance from (sx, sy) to (gx, gy), or `None` when the
    /// goal is unreachable.
    pub fn run(&mut self, sx: i32, sy: i32, gx: i32, gy: i32) -> Option<f64> {
        let cells = (self.grid.width() * self.grid.height()) as usize;
        self.g_table.clear();
        self.g_table.resize(cells, f64::INFINITY);
        self.parent_table.clear();
        self.parent_table.resize(cells, None);
        self.goal = None;

        if self.grid.is_obstacle(sx, sy) || self.grid.is_obstacle(gx, gy) {
            return None;
        }

        let start_id = self.grid.cell_id(sx, sy) as usize;
        self.g_table[start_id] = 0.0;

        let mut open = BinaryHeap::new();
        open.push(OpenCell {
            x: sx,
            y: sy,
            g: 0.0,
            f: Self::h_val(sx, sy, gx, gy),
        });

        while let Some(current) = open.pop() {
            let cell = self.grid.cell_id(current.x, current.y) as usize;
            if current.g > self.g_table[cell] {
                continue; // a better path has already been recorded
            }
            if current.x == gx && current.y == gy {
                self.goal = Some((gx, gy));
                return Some(self.g_table[cell]);
            }

            for (nx, ny) in self.grid.neighbours_8(current.x, current.y) {
                let w = if nx == current.x || ny == current.y {
                    1.0
                } else {
                    SQRT_2
                };
                let tentative = current.g + w;
                let ncell = self.grid.cell_id(nx, ny) as usize;
                if tentative < self.g_table[ncell] {
                    self.g_table[ncell] = tentative;
                    self.parent_table[ncell] = Some(cell as u32);
                    open.push(OpenCell {
                        x: nx,
                        y: ny,
                        g: tentative,
                        f: tentative + Self::h_val(nx, ny, gx, gy),
                    });
                }
            }
        }

        None
    }

    /// The path found by the last successful run, start first.
    pub fn get_path(&self) -> Vec<(i32, i32)> {
        let mut path = Vec::new();
        let Some((gx, gy)) = self.goal else {
            return path;
        };

        let width = self.grid.width();
        let mut cell = Some(self.grid.cell_id(gx, gy));
        while let Some(c) = cell {
            path.push(((c as i32) % width, (c as i32) / width));
            cell = self.parent_table[c as usize];
        }
        path.reverse();
        path
    }

    /// Per-cell predecessor ids recorded by the last run.
    pub fn parent_table(&self) -> &[Option<u32>] {
        &self.parent_table
    }
}
