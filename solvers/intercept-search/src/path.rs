//! Space-time path samples and the safety predicate they are checked
//! against.

use intercept_core::{ConstraintIndex, GridMap, Time};

/// One step of a space-time plan: the agent occupies (x, y) at time t.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathState {
    pub x: i32,
    pub y: i32,
    pub t: Time,
}

impl PathState {
    pub fn new(x: i32, y: i32, t: Time) -> Self {
        Self { x, y, t }
    }
}

/// Whether the agent may occupy (x, y) at time t: in bounds, not an
/// obstacle, non-negative time, and outside every unsafe interval of the
/// cell.
pub fn is_safe(grid: &GridMap, constraints: &ConstraintIndex, x: i32, y: i32, t: Time) -> bool {
    if t < 0 || !grid.in_bounds(x, y) || grid.is_obstacle(x, y) {
        return false;
    }
    match constraints.get(&grid.cell_id(x, y)) {
        Some(intervals) => !intervals.iter().any(|iv| iv.contains(t)),
        None => true,
    }
}
