//! Multi-target interception: a Held-Karp style bitmask DP whose edge
//! oracle is a moving-target SIPP query.

use intercept_core::{ConstraintIndex, GridMap, TargetTrajectory, Time, T_MAX};

use crate::mt_sipp::MtSipp;
use crate::path::PathState;

/// DP table entry for (visited-mask, last-intercepted-target).
#[derive(Debug, Clone, Copy)]
struct DpEntry {
    /// Earliest time this (mask, last) state can be reached.
    time: Time,
    /// Agent position right after the last interception.
    x: i32,
    y: i32,
    prev_last: Option<usize>,
    prev_mask: u32,
}

impl Default for DpEntry {
    fn default() -> Self {
        Self {
            time: T_MAX,
            x: -1,
            y: -1,
            prev_last: None,
            prev_mask: 0,
        }
    }
}

/// The outcome of a successful multi-target run.
#[derive(Debug, Clone)]
pub struct InterceptionPlan {
    /// Time of the last interception.
    pub total_time: Time,
    /// Target indices in interception order.
    pub order: Vec<usize>,
    /// Where and when each target of `order` was intercepted.
    pub events: Vec<PathState>,
    /// The agent's full trajectory, waits between segments made explicit.
    pub full_path: Vec<PathState>,
}

/// Plans the order in which to intercept a set of moving targets so that
/// the last interception happens as early as possible.
pub struct MultiTargetInterceptor<'a> {
    solver: MtSipp<'a>,
    trackers: &'a [TargetTrajectory],
}

impl<'a> MultiTargetInterceptor<'a> {
    pub fn new(
        grid: &'a GridMap,
        constraints: &'a ConstraintIndex,
        trackers: &'a [TargetTrajectory],
    ) -> Self {
        Self {
            solver: MtSipp::new(grid, constraints),
            trackers,
        }
    }

    /// Optimal interception plan from (sx, sy) at time `t0`, or `None`
    /// when some target can never be intercepted.
    pub fn run(&mut self, sx: i32, sy: i32, t0: Time) -> Option<InterceptionPlan> {
        let n = self.trackers.len();
        if n == 0 {
            return Some(InterceptionPlan {
                total_time: t0,
                order: Vec::new(),
                events: Vec::new(),
                full_path: vec![PathState::new(sx, sy, t0)],
            });
        }

        let full_mask = (1u32 << n) - 1;
        let mut table = vec![DpEntry::default(); (1usize << n) * n];
        let at = |mask: u32, last: usize| mask as usize * n + last;

        // Base: agent start to each single target.
        for (i, tracker) in self.trackers.iter().enumerate() {
            if let Some(time) = self.solver.run(sx, sy, t0, tracker) {
                let (x, y) = self
                    .solver
                    .get_path()
                    .last()
                    .map(|s| (s.x, s.y))
                    .unwrap_or((sx, sy));
                table[at(1 << i, i)] = DpEntry {
                    time,
                    x,
                    y,
                    prev_last: None,
                    prev_mask: 0,
                };
            }
        }

        // Transitions in increasing mask order; every mask is larger than
        // any of its proper subsets, so a plain scan visits subsets first.
        for mask in 1..=full_mask {
            for last in 0..n {
                if mask & (1 << last) == 0 {
                    continue;
                }
                let entry = table[at(mask, last)];
                if entry.time >= T_MAX {
                    continue;
                }
                for next in 0..n {
                    if mask & (1 << next) != 0 {
                        continue;
                    }
                    let Some(time) =
                        self.solver
                            .run(entry.x, entry.y, entry.time, &self.trackers[next])
                    else {
                        continue;
                    };
                    let (x, y) = self
                        .solver
                        .get_path()
                        .last()
                        .map(|s| (s.x, s.y))
                        .unwrap_or((entry.x, entry.y));
                    let new_mask = mask | (1 << next);
                    if time < table[at(new_mask, next)].time {
                        table[at(new_mask, next)] = DpEntry {
                            time,
                            x,
                            y,
                            prev_last: Some(last),
                            prev_mask: mask,
                        };
                    }
                }
            }
        }

        let (last, total_time) = (0..n)
            .map(|i| (i, table[at(full_mask, i)].time))
            .min_by_key(|&(_, time)| time)?;
        if total_time >= T_MAX {
            return None;
        }

        // Walk the prev links backwards to recover the visit order.
        let mut order = Vec::with_capacity(n);
        let mut mask = full_mask;
        let mut current = Some(last);
        while let Some(i) = current {
            order.push(i);
            let entry = table[at(mask, i)];
            current = entry.prev_last;
            mask = entry.prev_mask;
        }
        order.reverse();

        let (events, full_path) = self.rebuild_path(sx, sy, t0, &order)?;

        Some(InterceptionPlan {
            total_time,
            order,
            events,
            full_path,
        })
    }

    /// Re-run the solver along the chosen order and stitch the segments
    /// into one continuous trajectory.
    ///
    /// The DP already proved each segment feasible; a failure here means a
    /// solver invariant was violated and fails the whole run.
    fn rebuild_path(
        &mut self,
        sx: i32,
        sy: i32,
        t0: Time,
        order: &[usize],
    ) -> Option<(Vec<PathState>, Vec<PathState>)> {
        let mut events = Vec::with_capacity(order.len());
        let mut full_path: Vec<PathState> = Vec::new();
        let mut cursor = PathState::new(sx, sy, t0);

        for &target in order {
            self.solver
                .run(cursor.x, cursor.y, cursor.t, &self.trackers[target])?;
            let segment = self.solver.get_path();
            let head = *segment.first()?;
            events.push(*segment.last()?);

            match full_path.last().copied() {
                None => full_path.extend_from_slice(&segment),
                Some(tail) if tail == head => full_path.extend_from_slice(&segment[1..]),
                Some(tail) => {
                    for wait_t in tail.t + 1..head.t {
                        full_path.push(PathState::new(tail.x, tail.y, wait_t));
                    }
                    full_path.extend_from_slice(&segment);
                }
            }
            cursor = *full_path.last()?;
        }

        Some((events, full_path))
    }
}
