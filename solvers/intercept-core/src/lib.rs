//! Core types for planning on grids with time-windowed obstacles.
//!
//! Provides the grid map and its parser, the dynamic-scenario loader with
//! per-cell unsafe intervals, the safe-interval index the SIPP-family
//! planners search over, and time-indexed target trajectories.

mod interval;
mod map;
mod scenario;
mod trajectory;

pub use interval::{
    critical_time, max_intervals_per_cell, ConstraintIndex, SafeInterval, SafeIntervalIndex, Time,
    UnsafeInterval, T_MAX,
};
pub use map::{GridMap, MapError, Tile};
pub use scenario::{load_scenarios, parse_scenarios, DynScenario, ScenarioError};
pub use trajectory::{TargetTrajectory, TrajectoryError, TrajectorySample};
