//! Tests for the multi-target Hamiltonian interceptor.

use intercept_core::{ConstraintIndex, GridMap, TargetTrajectory};
use intercept_search::{MtSipp, MultiTargetInterceptor};

fn open_5x5() -> GridMap {
    GridMap::from_bytes(5, 5, &[1; 25]).unwrap()
}

fn trajectory(samples: &str) -> TargetTrajectory {
    TargetTrajectory::parse(samples).unwrap()
}

#[test]
fn interceptor_no_targets_is_trivial() {
    let map = open_5x5();
    let constraints = ConstraintIndex::new();
    let trackers: Vec<TargetTrajectory> = Vec::new();
    let mut interceptor = MultiTargetInterceptor::new(&map, &constraints, &trackers);

    let plan = interceptor.run(1, 1, 7).expect("trivial plan expected");
    assert_eq!(plan.total_time, 7);
    assert!(plan.order.is_empty());
    assert!(plan.events.is_empty());
    assert_eq!(plan.full_path.len(), 1);
    assert_eq!(
        (plan.full_path[0].x, plan.full_path[0].y, plan.full_path[0].t),
        (1, 1, 7)
    );
}

#[test]
fn interceptor_single_target_matches_plain_solver() {
    let map = open_5x5();
    let constraints = ConstraintIndex::new();
    let trackers = vec![trajectory("3 3 0\n3 3 100\n")];
    let mut interceptor = MultiTargetInterceptor::new(&map, &constraints, &trackers);

    let plan = interceptor.run(0, 0, 0).expect("plan expected");

    let mut solver = MtSipp::new(&map, &constraints);
    let direct = solver.run(0, 0, 0, &trackers[0]).expect("path expected");

    assert_eq!(plan.total_time, direct);
    assert_eq!(plan.order, vec![0]);
    assert_eq!(plan.events.len(), 1);
    assert_eq!((plan.events[0].x, plan.events[0].y), (3, 3));
}

#[test]
fn interceptor_two_separable_targets() {
    // Parked targets at opposite corners: whichever is visited first, the
    // last interception lands at t = 4 + 8 = 12.
    let map = open_5x5();
    let constraints = ConstraintIndex::new();
    let trackers = vec![
        trajectory("4 0 0\n4 0 100\n"),
        trajectory("0 4 0\n0 4 100\n"),
    ];
    let mut interceptor = MultiTargetInterceptor::new(&map, &constraints, &trackers);

    let plan = interceptor.run(0, 0, 0).expect("plan expected");
    assert_eq!(plan.total_time, 12);
    assert_eq!(plan.order.len(), 2);
    assert_eq!(plan.events.len(), 2);
    assert_eq!(plan.events[0].t, 4);
    assert_eq!(plan.events[1].t, 12);
}

#[test]
fn interceptor_orders_targets_along_the_way() {
    // Both targets sit on the same corridor; sweeping outwards visits the
    // near one on the way to the far one. The greedy-looking order is
    // also the optimal one here, with the far target reached at t = 4.
    let map = GridMap::from_bytes(5, 1, &[1; 5]).unwrap();
    let constraints = ConstraintIndex::new();
    let trackers = vec![
        trajectory("1 0 0\n1 0 100\n"),
        trajectory("4 0 0\n4 0 100\n"),
    ];
    let mut interceptor = MultiTargetInterceptor::new(&map, &constraints, &trackers);

    let plan = interceptor.run(0, 0, 0).expect("plan expected");
    assert_eq!(plan.order, vec![0, 1]);
    assert_eq!(plan.total_time, 4);
}

#[test]
fn interceptor_full_path_is_continuous() {
    let map = open_5x5();
    let constraints = ConstraintIndex::new();
    let trackers = vec![
        trajectory("4 0 0\n4 0 100\n"),
        trajectory("0 4 0\n0 4 100\n"),
    ];
    let mut interceptor = MultiTargetInterceptor::new(&map, &constraints, &trackers);

    let plan = interceptor.run(0, 0, 0).expect("plan expected");
    let path = &plan.full_path;
    assert_eq!((path[0].x, path[0].y, path[0].t), (0, 0, 0));
    assert_eq!(path.last().unwrap().t, plan.total_time);
    for window in path.windows(2) {
        assert!(window[1].t > window[0].t);
        let step = (window[1].x - window[0].x).abs() + (window[1].y - window[0].y).abs();
        assert!(step <= 1, "teleport between {:?} and {:?}", window[0], window[1]);
    }
}

#[test]
fn interceptor_fails_when_one_target_is_unreachable() {
    // ..#. puts the second target behind the wall.
    let map = GridMap::from_bytes(4, 1, &[1, 1, 0, 1]).unwrap();
    let constraints = ConstraintIndex::new();
    let trackers = vec![
        trajectory("1 0 0\n1 0 100\n"),
        trajectory("3 0 0\n3 0 100\n"),
    ];
    let mut interceptor = MultiTargetInterceptor::new(&map, &constraints, &trackers);

    assert!(interceptor.run(0, 0, 0).is_none());
}

#[test]
fn interceptor_chases_moving_targets_in_optimal_order() {
    // Target 0 parks nearby; target 1 drifts away one cell per two steps.
    // Picking up the parked target first lets the agent cut the runner
    // off later.
    let map = GridMap::from_bytes(8, 1, &[1; 8]).unwrap();
    let constraints = ConstraintIndex::new();
    let trackers = vec![
        trajectory("1 0 0\n1 0 200\n"),
        trajectory("3 0 0\n4 0 2\n5 0 4\n6 0 6\n7 0 8\n7 0 200\n"),
    ];
    let mut interceptor = MultiTargetInterceptor::new(&map, &constraints, &trackers);

    let plan = interceptor.run(0, 0, 0).expect("plan expected");
    assert_eq!(plan.order.len(), 2);
    assert_eq!(plan.events.len(), 2);
    // The last event time is the reported total.
    assert_eq!(plan.events.last().unwrap().t, plan.total_time);
}
