//! Time-indexed target trajectories.
//!
//! A trajectory is a list of `(x, y, t)` samples with piecewise-constant
//! semantics: the target sits at a sample's position from that sample's
//! time until the next one.

use std::path::Path;

use thiserror::Error;

use crate::interval::{Time, T_MAX};

/// Errors from loading or parsing a trajectory file.
#[derive(Debug, Error)]
pub enum TrajectoryError {
    #[error("malformed sample on line {line}: {content}")]
    MalformedSample { line: usize, content: String },

    #[error("failed to read trajectory file")]
    Io(#[from] std::io::Error),
}

/// One observed target position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrajectorySample {
    pub x: i32,
    pub y: i32,
    pub t: Time,
}

/// A target's known positions over time.
#[derive(Debug, Clone, Default)]
pub struct TargetTrajectory {
    samples: Vec<TrajectorySample>,
}

impl TargetTrajectory {
    pub fn new(mut samples: Vec<TrajectorySample>) -> Self {
        samples.sort_by_key(|s| s.t);
        Self { samples }
    }

    /// Parse one whitespace-separated `x y t` sample per line; samples are
    /// sorted by time.
    pub fn parse(input: &str) -> Result<Self, TrajectoryError> {
        Ok(Self::new(Self::parse_samples(input)?))
    }

    /// Like [`parse`](Self::parse) but preserving file order. The lookup
    /// scans backwards over the stored order, so fixtures can exercise
    /// deliberately unsorted files.
    pub fn parse_unsorted(input: &str) -> Result<Self, TrajectoryError> {
        Ok(Self {
            samples: Self::parse_samples(input)?,
        })
    }

    /// Read and parse a trajectory file from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TrajectoryError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    fn parse_samples(input: &str) -> Result<Vec<TrajectorySample>, TrajectoryError> {
        let mut samples = Vec::new();
        for (line_no, line) in input.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            let mut fields = trimmed.split_whitespace();
            let parsed = (|| {
                let x = fields.next()?.parse().ok()?;
                let y = fields.next()?.parse().ok()?;
                let t = fields.next()?.parse().ok()?;
                Some(TrajectorySample { x, y, t })
            })();
            match parsed {
                Some(sample) => samples.push(sample),
                None => {
                    return Err(TrajectoryError::MalformedSample {
                        line: line_no + 1,
                        content: trimmed.to_string(),
                    })
                }
            }
        }
        Ok(samples)
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[TrajectorySample] {
        &self.samples
    }

    /// The target's position at time `t`.
    ///
    /// Clamps to the first sample before the trajectory starts and to the
    /// last sample after it ends; in between, the latest sample with
    /// `sample.t <= t` wins. Returns `None` for an empty trajectory.
    pub fn position_at(&self, t: Time) -> Option<(i32, i32)> {
        let first = self.samples.first()?;
        let last = self.samples.last()?;

        if t >= last.t {
            return Some((last.x, last.y));
        }
        if t < first.t {
            return Some((first.x, first.y));
        }
        for window in self.samples.windows(2).rev() {
            if window[0].t <= t && window[1].t > t {
                return Some((window[0].x, window[0].y));
            }
        }
        Some((first.x, first.y))
    }

    /// Minimum Manhattan distance from (x, y) to any sample strictly later
    /// than `t`.
    ///
    /// The agent needs at least that many steps to reach any future target
    /// position, so this is an admissible estimate. `T_MAX` when no future
    /// sample exists.
    pub fn min_dist_after(&self, x: i32, y: i32, t: Time) -> Time {
        self.samples
            .iter()
            .filter(|s| s.t > t)
            .map(|s| (s.x - x).abs() + (s.y - y).abs())
            .min()
            .unwrap_or(T_MAX)
    }
}
