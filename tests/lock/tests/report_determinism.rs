//! In-process determinism of reports, traces and registry digests.

use lock_tests::{fixture_config, fixture_lines, init_tracing};
use statespace_harness::runner::{run_world, MethodChoice, RunReport};
use statespace_harness::worlds::bridge_crossing::{BridgeCrossing, CrossingOrder};
use statespace_harness::worlds::tiles::SlidingTiles;
use statespace_search::policy::SearchPolicy;

fn traced() -> SearchPolicy {
    SearchPolicy::new().with_trace(true)
}

#[test]
fn fixture_lines_are_identical_across_runs() {
    init_tracing();
    let baseline = fixture_lines();
    for _ in 0..5 {
        assert_eq!(fixture_lines(), baseline);
    }
}

#[test]
fn report_survives_json_round_trip_with_same_digest() {
    let report = fixture_config().run().unwrap();
    let json = serde_json::to_vec(&report).unwrap();
    let back: RunReport = serde_json::from_slice(&json).unwrap();
    assert_eq!(back, report);
    assert_eq!(back.digest().unwrap(), report.digest().unwrap());
}

#[test]
fn canonical_bytes_are_sorted_and_single_line() {
    let report = fixture_config().run().unwrap();
    let bytes = report.to_canonical_json_bytes().unwrap();
    let text = String::from_utf8(bytes).unwrap();
    assert!(text.starts_with("{\"discipline\":"));
    assert!(!text.contains('\n'));
}

#[test]
fn generator_order_changes_trace_not_answer() {
    let solo = run_world(
        &BridgeCrossing::classic(CrossingOrder::SoloFirst),
        MethodChoice::BreadthFirst,
        &traced(),
    )
    .unwrap();
    let pairs = run_world(
        &BridgeCrossing::classic(CrossingOrder::PairsFirst),
        MethodChoice::BreadthFirst,
        &traced(),
    )
    .unwrap();
    assert_ne!(solo.trace_digest, pairs.trace_digest);
    assert_eq!(solo.registry_digest, pairs.registry_digest);
    assert_eq!(solo.best().unwrap().depth, pairs.best().unwrap().depth);
}

#[test]
fn method_choice_changes_trace_digest() {
    let world = SlidingTiles::new(3, vec![4, 1, 3, 7, 2, 6, 0, 5, 8]).unwrap();
    let bfs = run_world(&world, MethodChoice::BreadthFirst, &traced()).unwrap();
    let astar = run_world(&world, MethodChoice::AStar, &traced()).unwrap();
    assert_ne!(bfs.trace_digest, astar.trace_digest);
    assert_eq!(bfs.registry_digest, astar.registry_digest);
    assert!(astar.stats.expanded < bfs.stats.expanded);
}
