//! Known answers for every stock world under the stock methods.

use lock_tests::init_tracing;
use statespace_harness::contract::World;
use statespace_harness::runner::{run_world, run_world_with, MethodChoice, SolutionMode};
use statespace_harness::worlds::bridge_crossing::{BridgeCrossing, CrossingOrder};
use statespace_harness::worlds::queens::NQueens;
use statespace_harness::worlds::river_crossing::RiverCrossing;
use statespace_harness::worlds::tiles::SlidingTiles;
use statespace_harness::worlds::water_buckets::WaterBuckets;
use statespace_search::policy::SearchPolicy;
use statespace_search::Termination;

const ORDERS: [CrossingOrder; 3] = [
    CrossingOrder::SoloFirst,
    CrossingOrder::PairsFirst,
    CrossingOrder::Adaptive,
];

fn first_depth<W: World>(world: &W, method: MethodChoice) -> usize {
    let report = run_world(world, method, &SearchPolicy::new()).unwrap();
    assert_eq!(report.termination, Some(Termination::Solved), "{method:?}");
    report.best().unwrap().depth
}

// ---------------------------------------------------------------------------
// River crossing
// ---------------------------------------------------------------------------

#[test]
fn river_crossing_shortest_is_seven_trips() {
    init_tracing();
    assert_eq!(first_depth(&RiverCrossing, MethodChoice::BreadthFirst), 7);
    assert_eq!(
        first_depth(&RiverCrossing, MethodChoice::IterativeDeepening { max_depth: 20 }),
        7
    );
    assert_eq!(first_depth(&RiverCrossing, MethodChoice::UniformCost), 7);
    assert_eq!(first_depth(&RiverCrossing, MethodChoice::AStar), 7);
}

#[test]
fn river_crossing_depth_first_finds_some_crossing() {
    assert!(first_depth(&RiverCrossing, MethodChoice::DepthFirst) >= 7);
}

// ---------------------------------------------------------------------------
// Water buckets
// ---------------------------------------------------------------------------

#[test]
fn classic_buckets_need_fourteen_moves() {
    init_tracing();
    let world = WaterBuckets::classic();
    assert_eq!(first_depth(&world, MethodChoice::BreadthFirst), 14);
    assert_eq!(first_depth(&world, MethodChoice::UniformCost), 14);
}

#[test]
fn unmeasurable_amount_exhausts() {
    let world = WaterBuckets::new(vec![2, 4], 3).unwrap();
    let report = run_world(&world, MethodChoice::BreadthFirst, &SearchPolicy::new()).unwrap();
    assert_eq!(report.termination, Some(Termination::Exhausted));
    assert!(!report.is_solved());
}

// ---------------------------------------------------------------------------
// Bridge crossing
// ---------------------------------------------------------------------------

#[test]
fn bridge_optimum_is_seventeen_for_every_order() {
    init_tracing();
    for order in ORDERS {
        let world = BridgeCrossing::classic(order);
        for method in [MethodChoice::UniformCost, MethodChoice::AStar] {
            let report = run_world(&world, method, &SearchPolicy::new()).unwrap();
            assert_eq!(report.best().unwrap().cost, 17, "{order:?} {method:?}");
        }
    }
}

#[test]
fn breadth_first_crossing_is_short_but_not_cheapest() {
    let world = BridgeCrossing::classic(CrossingOrder::Adaptive);
    let report = run_world(&world, MethodChoice::BreadthFirst, &SearchPolicy::new()).unwrap();
    let best = report.best().unwrap();
    // Two over, one back, two over, one back, two over.
    assert_eq!(best.depth, 5);
    assert!(best.cost >= 17);
}

// ---------------------------------------------------------------------------
// Queens
// ---------------------------------------------------------------------------

#[test]
fn queens_solution_counts() {
    init_tracing();
    for (size, expected) in [(1, 1), (2, 0), (3, 0), (4, 2), (5, 10), (6, 4), (8, 92)] {
        let report = run_world_with(
            &NQueens::new(size).unwrap(),
            MethodChoice::DepthFirst,
            SolutionMode::All,
            &SearchPolicy::new(),
        )
        .unwrap();
        assert_eq!(report.solutions.len(), expected, "n={size}");
        assert_eq!(report.termination, Some(Termination::Exhausted));
    }
}

#[test]
fn queens_place_one_per_row() {
    let report = run_world(
        &NQueens::new(8).unwrap(),
        MethodChoice::DepthFirst,
        &SearchPolicy::new(),
    )
    .unwrap();
    let best = report.best().unwrap();
    assert_eq!(best.depth, 8);
    assert_eq!(best.goal.matches('Q').count(), 8);
}

// ---------------------------------------------------------------------------
// Tiles
// ---------------------------------------------------------------------------

#[test]
fn tiles_a_star_matches_breadth_first_depth() {
    init_tracing();
    for (cells, depth) in [
        (vec![1, 2, 3, 5, 0, 6, 4, 7, 8], 4),
        (vec![4, 1, 3, 7, 2, 6, 0, 5, 8], 6),
        (vec![2, 3, 6, 1, 5, 0, 4, 7, 8], 7),
    ] {
        let world = SlidingTiles::new(3, cells).unwrap();
        assert_eq!(first_depth(&world, MethodChoice::BreadthFirst), depth);
        assert_eq!(first_depth(&world, MethodChoice::AStar), depth);
    }
}

#[test]
fn tiles_greedy_solves_without_optimality() {
    let world = SlidingTiles::new(3, vec![4, 1, 3, 7, 2, 6, 0, 5, 8]).unwrap();
    assert!(first_depth(&world, MethodChoice::Greedy) >= 6);
}

#[test]
fn solved_tiles_are_a_root_goal() {
    let world = SlidingTiles::new(2, vec![1, 2, 3, 0]).unwrap();
    let report = run_world(&world, MethodChoice::AStar, &SearchPolicy::new()).unwrap();
    assert_eq!(report.best().unwrap().depth, 0);
    assert_eq!(report.stats.expanded, 0);
}
