//! Dynamic-scenario JSON loader.
//!
//! A scenario file carries one or more planning problems, each with a
//! source cell, a set of target cells and per-cell unsafe time windows:
//!
//! ```json
//! { "data": [ { "source": 12,
//!               "targetSet": [40, 77],
//!               "node_constraints": { "33": [[2, 5], [9, 9]] } } ] }
//! ```
//!
//! Cell ids are row-major (`y * width + x`).

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::interval::{ConstraintIndex, UnsafeInterval};

/// Errors from loading or parsing a scenario file.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("invalid scenario JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid cell id key: {0}")]
    InvalidCellId(String),

    #[error("invalid unsafe interval [{start}, {end}] at cell {cell}")]
    InvalidInterval { cell: u32, start: i32, end: i32 },

    #[error("failed to read scenario file")]
    Io(#[from] std::io::Error),
}

/// One planning problem from a scenario file.
#[derive(Debug, Clone)]
pub struct DynScenario {
    /// Source cell id of the agent.
    pub source: u32,
    /// Target cell ids, in file order.
    pub target_set: Vec<u32>,
    /// Per-cell unsafe intervals.
    pub constraints: ConstraintIndex,
}

#[derive(Deserialize)]
struct RawRoot {
    data: Vec<RawScenario>,
}

#[derive(Deserialize)]
struct RawScenario {
    source: u32,
    #[serde(rename = "targetSet")]
    target_set: Vec<u32>,
    #[serde(default)]
    node_constraints: serde_json::Map<String, serde_json::Value>,
}

/// Parse a scenario file's content.
pub fn parse_scenarios(input: &str) -> Result<Vec<DynScenario>, ScenarioError> {
    let root: RawRoot = serde_json::from_str(input)?;
    root.data.into_iter().map(convert_scenario).collect()
}

/// Read and parse a scenario file from disk.
pub fn load_scenarios(path: impl AsRef<Path>) -> Result<Vec<DynScenario>, ScenarioError> {
    let content = std::fs::read_to_string(path)?;
    parse_scenarios(&content)
}

fn convert_scenario(raw: RawScenario) -> Result<DynScenario, ScenarioError> {
    let mut constraints = ConstraintIndex::new();

    for (key, value) in raw.node_constraints {
        let cell: u32 = key
            .parse()
            .map_err(|_| ScenarioError::InvalidCellId(key.clone()))?;
        let pairs: Vec<[i32; 2]> = serde_json::from_value(value)?;

        let mut intervals = Vec::with_capacity(pairs.len());
        for [start, end] in pairs {
            if start < 0 || end < start {
                return Err(ScenarioError::InvalidInterval { cell, start, end });
            }
            intervals.push(UnsafeInterval::new(start, end));
        }
        constraints.insert(cell, intervals);
    }

    Ok(DynScenario {
        source: raw.source,
        target_set: raw.target_set,
        constraints,
    })
}
