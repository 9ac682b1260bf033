//! Shared regimes for statespace benchmark suites.

use statespace_harness::runner::{MethodChoice, RunConfig, SolutionMode, WorldChoice};
use statespace_harness::worlds::bridge_crossing::CrossingOrder;
use statespace_search::frontier::FrontierEntry;
use statespace_search::node::NodeId;
use statespace_search::policy::SearchPolicy;

/// A named end-to-end run.
pub struct Regime {
    pub name: &'static str,
    pub config: RunConfig,
}

fn regime(
    name: &'static str,
    world: WorldChoice,
    method: MethodChoice,
    solutions: SolutionMode,
) -> Regime {
    Regime {
        name,
        config: RunConfig {
            world,
            method,
            solutions,
            policy: SearchPolicy::new(),
        },
    }
}

/// One regime per world, each sized to finish in milliseconds.
#[must_use]
pub fn regimes() -> Vec<Regime> {
    vec![
        regime(
            "river_bfs",
            WorldChoice::RiverCrossing,
            MethodChoice::BreadthFirst,
            SolutionMode::First,
        ),
        regime(
            "buckets_bfs",
            WorldChoice::WaterBuckets {
                capacities: vec![7, 11],
                target: 2,
            },
            MethodChoice::BreadthFirst,
            SolutionMode::First,
        ),
        regime(
            "bridge_ucs_optimal",
            WorldChoice::BridgeCrossing {
                times: vec![1, 2, 5, 10],
                order: CrossingOrder::Adaptive,
            },
            MethodChoice::UniformCost,
            SolutionMode::Optimal,
        ),
        regime(
            "queens8_all",
            WorldChoice::Queens { size: 8 },
            MethodChoice::DepthFirst,
            SolutionMode::All,
        ),
        regime(
            "tiles_a_star",
            WorldChoice::Tiles {
                size: 3,
                cells: vec![2, 3, 6, 1, 5, 0, 4, 7, 8],
            },
            MethodChoice::AStar,
            SolutionMode::First,
        ),
        regime(
            "tiles_iterative_deepening",
            WorldChoice::Tiles {
                size: 3,
                cells: vec![2, 3, 6, 1, 5, 0, 4, 7, 8],
            },
            MethodChoice::IterativeDeepening { max_depth: 12 },
            SolutionMode::First,
        ),
    ]
}

/// `n` frontier entries with scattered evaluations and depths.
#[must_use]
pub fn frontier_entries(n: usize) -> Vec<FrontierEntry> {
    (0..n)
        .map(|i| {
            let scrambled = i.wrapping_mul(2_654_435_761) % 1_000;
            FrontierEntry {
                node: NodeId::new(i),
                depth: u32::try_from(i % 32).unwrap_or(0),
                evaluation: i64::try_from(scrambled).unwrap_or(0),
            }
        })
        .collect()
}
