//! Tests for the space-time A* solver.

use intercept_core::{ConstraintIndex, GridMap, UnsafeInterval};
use intercept_search::SpaceTimeAStar;

/// 5x1 corridor:
/// ```text
/// .....
/// ```
fn corridor_5x1() -> GridMap {
    GridMap::from_bytes(5, 1, &[1; 5]).unwrap()
}

#[test]
fn stastar_unconstrained_corridor() {
    let map = corridor_5x1();
    let constraints = ConstraintIndex::new();
    let mut solver = SpaceTimeAStar::new(&map, &constraints);

    assert_eq!(solver.run(0, 0, 4, 0), Some(4));
    let path = solver.get_path();
    assert_eq!(path.len(), 5);
    assert_eq!((path[0].x, path[0].y, path[0].t), (0, 0, 0));
    assert_eq!((path[4].x, path[4].y, path[4].t), (4, 0, 4));
}

#[test]
fn stastar_waits_out_a_blocked_cell() {
    // Unsafe [2,5] at (2,0): the agent must idle at (1,0) and enter the
    // blocked cell at t = 6, reaching the goal at t = 8.
    let map = corridor_5x1();
    let mut constraints = ConstraintIndex::new();
    constraints.insert(2, vec![UnsafeInterval::new(2, 5)]);
    let mut solver = SpaceTimeAStar::new(&map, &constraints);

    assert_eq!(solver.run(0, 0, 4, 0), Some(8));
    let path = solver.get_path();
    assert!(solver.validate(&path));
    // Every step advances time by exactly one, waits included.
    for window in path.windows(2) {
        assert_eq!(window[1].t - window[0].t, 1);
        let step = (window[1].x - window[0].x).abs() + (window[1].y - window[0].y).abs();
        assert!(step <= 1);
    }
}

#[test]
fn stastar_goal_critical_time() {
    // 2x1 grid with the goal cell unsafe through t = 3: arriving earlier
    // than t = 4 is impossible, and an arrival at exactly 4 is final.
    let map = GridMap::from_bytes(2, 1, &[1, 1]).unwrap();
    let mut constraints = ConstraintIndex::new();
    constraints.insert(1, vec![UnsafeInterval::new(0, 3)]);
    let mut solver = SpaceTimeAStar::new(&map, &constraints);

    assert_eq!(solver.run(0, 0, 1, 0), Some(4));
}

#[test]
fn stastar_goal_unsafe_window_ahead_of_arrival() {
    // The goal opens only after a late unsafe window [6, 9]; a pop at
    // t = 1 is provisional and the search must keep going until an
    // arrival after t = 9 (waiting at the goal is not modeled as staying
    // intercepted).
    let map = GridMap::from_bytes(2, 1, &[1, 1]).unwrap();
    let mut constraints = ConstraintIndex::new();
    constraints.insert(1, vec![UnsafeInterval::new(6, 9)]);
    let mut solver = SpaceTimeAStar::new(&map, &constraints);

    assert_eq!(solver.run(0, 0, 1, 0), Some(10));
}

#[test]
fn stastar_unreachable_goal() {
    // ..#.
    let map = GridMap::from_bytes(4, 1, &[1, 1, 0, 1]).unwrap();
    let constraints = ConstraintIndex::new();
    let mut solver = SpaceTimeAStar::new(&map, &constraints);
    assert_eq!(solver.run(0, 0, 3, 0), None);
}

#[test]
fn stastar_validate_flags_unsafe_sample() {
    let map = corridor_5x1();
    let mut constraints = ConstraintIndex::new();
    constraints.insert(2, vec![UnsafeInterval::new(2, 5)]);
    let mut solver = SpaceTimeAStar::new(&map, &constraints);
    solver.run(0, 0, 4, 0).expect("path expected");

    let mut path = solver.get_path();
    assert!(solver.validate(&path));
    path[2] = intercept_search::PathState::new(2, 0, 3);
    assert!(!solver.validate(&path));
}
