//! Every returned path replays from the initial state to a goal, through
//! valid states, using only registered operators.

use statespace_harness::contract::{World, WorldState};
use statespace_harness::worlds::bridge_crossing::{BridgeCrossing, CrossingOrder};
use statespace_harness::worlds::queens::NQueens;
use statespace_harness::worlds::river_crossing::RiverCrossing;
use statespace_harness::worlds::tiles::SlidingTiles;
use statespace_harness::worlds::water_buckets::WaterBuckets;
use statespace_kernel::generator::Generator;
use statespace_kernel::operators::operator::Cost;
use statespace_search::Method;

fn assert_replays<W: World>(world: &W) {
    let problem = world.problem();
    let heuristic = |state: &WorldState<W>| world.estimate(state);

    let paths = [
        Method::breadth_first(world.generator().unwrap())
            .unwrap()
            .search(&problem)
            .unwrap()
            .into_path(),
        Method::depth_first(world.generator().unwrap())
            .unwrap()
            .search(&problem)
            .unwrap()
            .into_path(),
        Method::a_star(world.generator().unwrap(), heuristic)
            .unwrap()
            .search(&problem)
            .unwrap()
            .into_path(),
    ];

    let generator = world.generator().unwrap();
    for path in paths {
        let path = path.unwrap_or_else(|| panic!("{} has a solution", world.world_id()));
        let replayed = path.replay().unwrap();
        assert_eq!(&replayed, path.goal_state());
        assert!(problem.is_goal(&replayed));
        assert_eq!(path.states().next(), Some(problem.initial()));
        for state in path.states() {
            assert!(generator.is_valid(state), "invalid state on path: {state}");
        }
        for action in path.actions() {
            assert!(generator.registry().contains(action.name()));
        }
    }
}

#[test]
fn river_crossing_paths_replay() {
    assert_replays(&RiverCrossing);
}

#[test]
fn water_bucket_paths_replay() {
    assert_replays(&WaterBuckets::classic());
}

#[test]
fn bridge_paths_replay() {
    for order in [
        CrossingOrder::SoloFirst,
        CrossingOrder::PairsFirst,
        CrossingOrder::Adaptive,
    ] {
        assert_replays(&BridgeCrossing::classic(order));
    }
}

#[test]
fn queens_paths_replay() {
    assert_replays(&NQueens::new(6).unwrap());
}

#[test]
fn tiles_paths_replay() {
    assert_replays(&SlidingTiles::new(3, vec![4, 1, 3, 7, 2, 6, 0, 5, 8]).unwrap());
}

#[test]
fn path_cost_is_sum_of_step_costs() {
    let world = BridgeCrossing::classic(CrossingOrder::Adaptive);
    let path = Method::uniform_cost(world.generator().unwrap())
        .unwrap()
        .search(&world.problem())
        .unwrap()
        .into_path()
        .unwrap();
    let summed: Cost = path.actions().map(|a| a.cost()).sum();
    assert_eq!(path.cost(), summed);
    assert_eq!(summed, 17);
}
