//! Time-optimal single-agent search on grids with dynamic obstacles.
//!
//! Five planners over the `intercept-core` data model:
//! - [`AStar`]: spatial shortest path on an 8-connected grid.
//! - [`SpaceTimeAStar`]: (x, y, t) search honoring per-cell unsafe
//!   intervals.
//! - [`Sipp`]: the same problem with the time axis compressed into safe
//!   intervals.
//! - [`MtSipp`]: SIPP against a moving target with a known trajectory.
//! - [`MultiTargetInterceptor`]: optimal-order interception of several
//!   moving targets via a bitmask DP over [`MtSipp`] queries.

mod arena;
mod astar;
mod interceptor;
mod mt_sipp;
mod path;
mod sipp;
mod stastar;

pub use arena::{Arena, NodeId, OpenEntry};
pub use astar::AStar;
pub use interceptor::{InterceptionPlan, MultiTargetInterceptor};
pub use mt_sipp::MtSipp;
pub use path::{is_safe, PathState};
pub use sipp::Sipp;
pub use stastar::SpaceTimeAStar;
