//! Tests for map, scenario and trajectory parsing.

use intercept_core::{
    parse_scenarios, GridMap, MapError, ScenarioError, TargetTrajectory, Tile, TrajectoryError,
    UnsafeInterval,
};
use pretty_assertions::assert_eq;

// ─────────────────────────────────────────────────────────────────────────────
// GridMap tests
// ─────────────────────────────────────────────────────────────────────────────

const EMPTY_8X8_MAP: &str = r#"type octile
height 8
width 8
map
........
........
........
........
........
........
........
........
"#;

const MAZE_SNIPPET: &str = r#"type octile
height 4
width 6
map
@@@@@@
@....@
@.@@.@
@@@@@@
"#;

#[test]
fn parse_empty_8x8_map() {
    let map = GridMap::parse(EMPTY_8X8_MAP).expect("parse failed");
    assert_eq!(map.width(), 8);
    assert_eq!(map.height(), 8);
    for y in 0..8 {
        for x in 0..8 {
            assert_eq!(map.get(x, y), Some(Tile::Passable), "({x},{y}) should be passable");
        }
    }
}

#[test]
fn parse_maze_with_walls() {
    let map = GridMap::parse(MAZE_SNIPPET).expect("parse failed");
    assert_eq!(map.width(), 6);
    assert_eq!(map.height(), 4);
    // Corners are walls
    assert!(map.is_obstacle(0, 0));
    assert!(map.is_obstacle(5, 0));
    // Interior passable
    assert!(!map.is_obstacle(1, 1));
    assert!(!map.is_obstacle(2, 1));
    // Interior wall
    assert!(map.is_obstacle(2, 2));
}

#[test]
fn map_out_of_bounds_is_obstacle() {
    let map = GridMap::parse(MAZE_SNIPPET).unwrap();
    assert_eq!(map.get(100, 100), None);
    assert!(map.is_obstacle(100, 100));
    assert!(map.is_obstacle(-1, 0));
}

#[test]
fn map_parse_missing_header() {
    let bad = "map\n....";
    let err = GridMap::parse(bad).unwrap_err();
    assert!(matches!(err, MapError::MissingHeader(_)));
}

#[test]
fn map_parse_dimension_mismatch() {
    let bad = r#"type octile
height 2
width 4
map
....
"#;
    let err = GridMap::parse(bad).unwrap_err();
    assert!(matches!(err, MapError::DimensionMismatch { .. }));
}

#[test]
fn map_parse_row_width_mismatch() {
    let bad = r#"type octile
height 2
width 4
map
....
..
"#;
    let err = GridMap::parse(bad).unwrap_err();
    assert!(matches!(err, MapError::RowWidthMismatch { row: 1, .. }));
}

#[test]
fn map_neighbours_8_open_interior() {
    let map = GridMap::parse(EMPTY_8X8_MAP).unwrap();
    assert_eq!(map.neighbours_8(4, 4).len(), 8);
    // Corner cell only sees the three cells next to it
    assert_eq!(map.neighbours_8(0, 0).len(), 3);
}

#[test]
fn map_neighbours_8_no_corner_cutting() {
    // .#
    // #.
    // The diagonal between the two free cells squeezes between two
    // obstacles and must not be offered.
    let map = GridMap::from_bytes(2, 2, &[1, 0, 0, 1]).unwrap();
    assert_eq!(map.neighbours_8(0, 0), vec![]);
    assert_eq!(map.neighbours_8(1, 1), vec![]);
}

// ─────────────────────────────────────────────────────────────────────────────
// Scenario tests
// ─────────────────────────────────────────────────────────────────────────────

const SIMPLE_SCEN: &str = r#"{
  "data": [
    {
      "source": 12,
      "targetSet": [40, 77],
      "node_constraints": {
        "33": [[2, 5], [9, 9]],
        "40": [[0, 3]]
      }
    },
    {
      "source": 0,
      "targetSet": [8]
    }
  ]
}"#;

#[test]
fn parse_simple_scenario() {
    let scens = parse_scenarios(SIMPLE_SCEN).expect("parse failed");
    assert_eq!(scens.len(), 2);

    let s0 = &scens[0];
    assert_eq!(s0.source, 12);
    assert_eq!(s0.target_set, vec![40, 77]);
    assert_eq!(
        s0.constraints.get(&33),
        Some(&vec![UnsafeInterval::new(2, 5), UnsafeInterval::new(9, 9)])
    );
    assert_eq!(s0.constraints.get(&40), Some(&vec![UnsafeInterval::new(0, 3)]));
    assert_eq!(s0.constraints.get(&7), None);

    let s1 = &scens[1];
    assert_eq!(s1.source, 0);
    assert!(s1.constraints.is_empty());
}

#[test]
fn scenario_rejects_invalid_json() {
    let err = parse_scenarios("{ not json").unwrap_err();
    assert!(matches!(err, ScenarioError::Json(_)));
}

#[test]
fn scenario_rejects_bad_cell_key() {
    let bad = r#"{ "data": [ { "source": 0, "targetSet": [],
        "node_constraints": { "not-a-cell": [[0, 1]] } } ] }"#;
    let err = parse_scenarios(bad).unwrap_err();
    assert!(matches!(err, ScenarioError::InvalidCellId(_)));
}

#[test]
fn scenario_rejects_inverted_interval() {
    let bad = r#"{ "data": [ { "source": 0, "targetSet": [],
        "node_constraints": { "3": [[5, 2]] } } ] }"#;
    let err = parse_scenarios(bad).unwrap_err();
    assert!(matches!(
        err,
        ScenarioError::InvalidInterval { cell: 3, start: 5, end: 2 }
    ));
}

// ─────────────────────────────────────────────────────────────────────────────
// Trajectory tests
// ─────────────────────────────────────────────────────────────────────────────

const WANDERING_TARGET: &str = "3 0 0\n3 0 5\n2 0 6\n";

#[test]
fn trajectory_position_piecewise_constant() {
    let traj = TargetTrajectory::parse(WANDERING_TARGET).unwrap();
    // Before and at the first sample
    assert_eq!(traj.position_at(-1), Some((3, 0)));
    assert_eq!(traj.position_at(0), Some((3, 0)));
    // Held until the next sample time
    assert_eq!(traj.position_at(3), Some((3, 0)));
    assert_eq!(traj.position_at(5), Some((3, 0)));
    // From the last sample onwards
    assert_eq!(traj.position_at(6), Some((2, 0)));
    assert_eq!(traj.position_at(100), Some((2, 0)));
}

#[test]
fn trajectory_sorts_samples_on_load() {
    let shuffled = "2 0 6\n3 0 0\n3 0 5\n";
    let traj = TargetTrajectory::parse(shuffled).unwrap();
    let times: Vec<i32> = traj.samples().iter().map(|s| s.t).collect();
    assert_eq!(times, vec![0, 5, 6]);
    assert_eq!(traj.position_at(2), Some((3, 0)));
}

#[test]
fn trajectory_unsorted_keeps_file_order() {
    let shuffled = "2 0 6\n3 0 0\n3 0 5\n";
    let traj = TargetTrajectory::parse_unsorted(shuffled).unwrap();
    let times: Vec<i32> = traj.samples().iter().map(|s| s.t).collect();
    assert_eq!(times, vec![6, 0, 5]);
}

#[test]
fn trajectory_min_dist_after_scans_future_only() {
    let traj = TargetTrajectory::parse(WANDERING_TARGET).unwrap();
    // Samples after t=0: (3,0) at t=5 and (2,0) at t=6.
    assert_eq!(traj.min_dist_after(0, 0, 0), 2);
    // After t=5 only (2,0) at t=6 remains.
    assert_eq!(traj.min_dist_after(0, 0, 5), 2);
    assert_eq!(traj.min_dist_after(2, 0, 5), 0);
    // No future samples at all.
    assert_eq!(traj.min_dist_after(0, 0, 6), intercept_core::T_MAX);
}

#[test]
fn trajectory_rejects_malformed_line() {
    let err = TargetTrajectory::parse("1 2 3\n4 five 6\n").unwrap_err();
    assert!(matches!(err, TrajectoryError::MalformedSample { line: 2, .. }));
}

#[test]
fn trajectory_skips_blank_lines() {
    let traj = TargetTrajectory::parse("1 2 3\n\n4 5 6\n").unwrap();
    assert_eq!(traj.samples().len(), 2);
}
