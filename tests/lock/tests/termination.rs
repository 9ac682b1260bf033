//! Termination semantics: solved, exhausted and each cutoff reason stay
//! distinguishable.

use std::time::Duration;

use statespace_harness::runner::{run_world, run_world_with, MethodChoice, SolutionMode};
use statespace_harness::worlds::queens::NQueens;
use statespace_harness::worlds::river_crossing::RiverCrossing;
use statespace_harness::worlds::tiles::SlidingTiles;
use statespace_harness::worlds::water_buckets::WaterBuckets;
use statespace_search::outcome::CutoffReason;
use statespace_search::policy::SearchPolicy;
use statespace_search::Termination;

fn fifteen_puzzle() -> SlidingTiles {
    SlidingTiles::new(4, vec![14, 15, 13, 12, 11, 10, 9, 8, 7, 6, 5, 4, 3, 2, 1, 0]).unwrap()
}

#[test]
fn depth_limit_below_solution_is_a_cutoff_not_exhaustion() {
    let shallow = run_world(
        &RiverCrossing,
        MethodChoice::DepthLimited { limit: 3 },
        &SearchPolicy::new(),
    )
    .unwrap();
    assert_eq!(
        shallow.termination,
        Some(Termination::Cutoff(CutoffReason::DepthLimit))
    );
    assert!(shallow.stats.depth_denied > 0);

    let deep = run_world(
        &RiverCrossing,
        MethodChoice::DepthLimited { limit: 7 },
        &SearchPolicy::new(),
    )
    .unwrap();
    assert_eq!(deep.termination, Some(Termination::Solved));
}

#[test]
fn depth_limit_above_every_state_exhausts() {
    let report = run_world(
        &NQueens::new(3).unwrap(),
        MethodChoice::DepthLimited { limit: 10 },
        &SearchPolicy::new(),
    )
    .unwrap();
    assert_eq!(report.termination, Some(Termination::Exhausted));
}

#[test]
fn policy_depth_limit_applies_to_any_method() {
    let policy = SearchPolicy::new().with_depth_limit(1);
    let report = run_world(&NQueens::new(3).unwrap(), MethodChoice::BreadthFirst, &policy)
        .unwrap();
    assert_eq!(
        report.termination,
        Some(Termination::Cutoff(CutoffReason::DepthLimit))
    );
}

#[test]
fn iterative_deepening_stops_at_max_depth() {
    let report = run_world(
        &RiverCrossing,
        MethodChoice::IterativeDeepening { max_depth: 4 },
        &SearchPolicy::new(),
    )
    .unwrap();
    assert_eq!(
        report.termination,
        Some(Termination::Cutoff(CutoffReason::DepthLimit))
    );
    assert_eq!(report.iterations, 5);
}

#[test]
fn node_budget_is_a_cutoff() {
    let policy = SearchPolicy::new().with_node_budget(10);
    let report = run_world(&WaterBuckets::classic(), MethodChoice::BreadthFirst, &policy)
        .unwrap();
    assert_eq!(
        report.termination,
        Some(Termination::Cutoff(CutoffReason::NodeBudget))
    );
    assert_eq!(report.stats.expanded, 10);
}

#[test]
fn time_limit_is_a_cutoff() {
    let policy = SearchPolicy::new().with_time_limit(Duration::from_millis(1));
    let report = run_world(&fifteen_puzzle(), MethodChoice::BreadthFirst, &policy).unwrap();
    assert_eq!(
        report.termination,
        Some(Termination::Cutoff(CutoffReason::TimeLimit))
    );
}

#[test]
fn resumed_run_ends_exhausted_after_last_goal() {
    let report = run_world_with(
        &NQueens::new(4).unwrap(),
        MethodChoice::BreadthFirst,
        SolutionMode::All,
        &SearchPolicy::new(),
    )
    .unwrap();
    assert_eq!(report.solutions.len(), 2);
    assert_eq!(report.termination, Some(Termination::Exhausted));
}

#[test]
fn upper_bound_excludes_costly_goals() {
    let policy = SearchPolicy::new().with_upper_bound(7);
    let report = run_world(&RiverCrossing, MethodChoice::BreadthFirst, &policy).unwrap();
    assert_eq!(report.termination, Some(Termination::Exhausted));
    assert!(report.stats.bound_pruned > 0);

    let policy = SearchPolicy::new().with_upper_bound(8);
    let report = run_world(&RiverCrossing, MethodChoice::BreadthFirst, &policy).unwrap();
    assert_eq!(report.best().unwrap().cost, 7);
}
