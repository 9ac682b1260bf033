//! Resumed runs treat goals as leaves: every enumerated solution ends at
//! the first goal state on its path.

use statespace_harness::contract::World;
use statespace_harness::runner::{run_world_with, MethodChoice, SolutionMode};
use statespace_harness::worlds::bridge_crossing::{BridgeCrossing, CrossingOrder};
use statespace_harness::worlds::water_buckets::WaterBuckets;
use statespace_search::policy::SearchPolicy;
use statespace_search::{Method, Termination};

fn assert_goals_are_leaves<W: World>(world: &W) {
    let problem = world.problem();
    let methods = [
        Method::breadth_first(world.generator().unwrap()).unwrap(),
        Method::depth_first(world.generator().unwrap()).unwrap(),
    ];
    for method in &methods {
        let mut found = 0;
        for path in problem.solutions(method).unwrap() {
            let path = path.unwrap();
            let states: Vec<_> = path.states().collect();
            let (last, before) = states.split_last().unwrap();
            assert!(problem.is_goal(last));
            assert!(
                before.iter().all(|state| !problem.is_goal(state)),
                "{} solution passes through an earlier goal",
                world.world_id()
            );
            found += 1;
        }
        assert!(found > 0, "{} has a solution", world.world_id());
    }
}

#[test]
fn water_bucket_solutions_stop_at_first_goal() {
    assert_goals_are_leaves(&WaterBuckets::classic());
}

#[test]
fn bridge_solutions_stop_at_first_goal() {
    assert_goals_are_leaves(&BridgeCrossing::classic(CrossingOrder::Adaptive));
}

#[test]
fn all_mode_reports_no_goal_below_another() {
    let world = WaterBuckets::classic();
    let report = run_world_with(
        &world,
        MethodChoice::BreadthFirst,
        SolutionMode::All,
        &SearchPolicy::new(),
    )
    .unwrap();
    assert_eq!(report.termination, Some(Termination::Exhausted));
    assert!(!report.solutions.is_empty());
    assert_eq!(report.stats.solutions, report.solutions.len() as u64);

    let first = run_world_with(
        &world,
        MethodChoice::BreadthFirst,
        SolutionMode::First,
        &SearchPolicy::new(),
    )
    .unwrap();
    assert_eq!(report.solutions[0], first.solutions[0]);
}
