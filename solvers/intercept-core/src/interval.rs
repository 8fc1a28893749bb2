//! Unsafe intervals, their complement as per-cell safe intervals, and the
//! index the interval-based planners search over.

use std::collections::HashMap;

use crate::map::GridMap;

/// Discrete, non-negative time step.
pub type Time = i32;

/// Stand-in for an unbounded horizon; large enough that `g + h` never
/// overflows when both operands are at most `T_MAX`.
pub const T_MAX: Time = i32::MAX / 2;

/// A closed time range `[start, end]` during which a cell must not be
/// occupied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct UnsafeInterval {
    pub start: Time,
    pub end: Time,
}

impl UnsafeInterval {
    pub fn new(start: Time, end: Time) -> Self {
        Self { start, end }
    }

    #[inline]
    pub fn contains(&self, t: Time) -> bool {
        self.start <= t && t <= self.end
    }
}

/// Per-cell unsafe intervals, keyed by row-major cell id. A missing cell
/// has no constraints.
pub type ConstraintIndex = HashMap<u32, Vec<UnsafeInterval>>;

/// A maximal collision-free time range of one cell.
///
/// `key` is the interval's position in its cell's list, assigned at
/// construction and stable for the lifetime of the index; the planners use
/// it to address per-interval bookkeeping without hashing the interval
/// itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SafeInterval {
    pub start: Time,
    pub end: Time,
    pub key: u32,
}

/// For every cell, the complement of its unsafe intervals within
/// `[0, T_MAX - 1]`. Obstacle cells get an empty list.
#[derive(Debug, Clone)]
pub struct SafeIntervalIndex {
    per_cell: Vec<Vec<SafeInterval>>,
}

impl SafeIntervalIndex {
    /// Sweep each cell's sorted unsafe intervals and emit the gaps.
    pub fn build(map: &GridMap, constraints: &ConstraintIndex) -> Self {
        let cells = (map.width() * map.height()) as usize;
        let mut per_cell = vec![Vec::new(); cells];

        for y in 0..map.height() {
            for x in 0..map.width() {
                if map.is_obstacle(x, y) {
                    continue;
                }
                let cell = map.cell_id(x, y);

                let mut unsafe_intervals = constraints.get(&cell).cloned().unwrap_or_default();
                unsafe_intervals.sort();

                let safe = &mut per_cell[cell as usize];
                let mut last: Time = -1;
                let mut key = 0;
                for unsafe_iv in &unsafe_intervals {
                    if unsafe_iv.start > last + 1 {
                        safe.push(SafeInterval {
                            start: last + 1,
                            end: unsafe_iv.start - 1,
                            key,
                        });
                        key += 1;
                    }
                    last = last.max(unsafe_iv.end);
                }
                if last < T_MAX - 1 {
                    safe.push(SafeInterval {
                        start: last + 1,
                        end: T_MAX - 1,
                        key,
                    });
                }
            }
        }

        Self { per_cell }
    }

    /// The safe intervals of a cell, sorted by start time.
    #[inline]
    pub fn intervals(&self, cell: u32) -> &[SafeInterval] {
        &self.per_cell[cell as usize]
    }
}

/// Upper bound on the number of safe intervals a cell can have: one more
/// than its unsafe-interval count. Used to size per-interval tables.
pub fn max_intervals_per_cell(constraints: &ConstraintIndex, cell: u32) -> usize {
    constraints.get(&cell).map_or(1, |list| list.len() + 1)
}

/// Latest unsafe end time on a cell, or 0 when the cell is unconstrained.
///
/// An arrival at a goal cell is only final once it is strictly later than
/// this; an earlier arrival could still be displaced by a pending unsafe
/// window.
pub fn critical_time(constraints: &ConstraintIndex, cell: u32) -> Time {
    constraints
        .get(&cell)
        .and_then(|list| list.iter().map(|iv| iv.end).max())
        .unwrap_or(0)
        .max(0)
}
