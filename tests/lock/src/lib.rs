//! Shared fixtures for the lock tests and the `report_fixture` binary.
//!
//! The fixture config lives here so the cross-process binary and the
//! in-process tests can never drift apart.

use std::sync::OnceLock;

use statespace_harness::runner::{MethodChoice, RunConfig, SolutionMode, WorldChoice};
use statespace_harness::worlds::bridge_crossing::CrossingOrder;
use statespace_search::policy::SearchPolicy;
use tracing_subscriber::EnvFilter;

static INIT: OnceLock<()> = OnceLock::new();

/// Install a test-writer subscriber filtered by `RUST_LOG`.
///
/// Safe to call from every test; only the first call has effect.
pub fn init_tracing() {
    INIT.get_or_init(|| {
        // Another harness may already own the global subscriber.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Bridge crossing under A* with a recorded trace.
///
/// Changing this changes every digest the cross-process test compares.
#[must_use]
pub fn fixture_config() -> RunConfig {
    RunConfig {
        world: WorldChoice::BridgeCrossing {
            times: vec![1, 2, 5, 10],
            order: CrossingOrder::Adaptive,
        },
        method: MethodChoice::AStar,
        solutions: SolutionMode::Optimal,
        policy: SearchPolicy::new().with_trace(true),
    }
}

/// Key=value lines describing a fixture run, in a fixed order.
///
/// # Panics
///
/// Panics if the fixture run fails; the fixture is known-good.
#[must_use]
pub fn fixture_lines() -> Vec<String> {
    let report = fixture_config().run().expect("fixture run succeeds");
    let best = report.best().expect("fixture is solvable");
    vec![
        format!("report_digest={}", report.digest().expect("report serializes")),
        format!(
            "trace_digest={}",
            report
                .trace_digest
                .as_ref()
                .map_or_else(|| "none".to_string(), ToString::to_string)
        ),
        format!("registry_digest={}", report.registry_digest),
        format!("termination={:?}", report.termination),
        format!("expanded={}", report.stats.expanded),
        format!("generated={}", report.stats.generated),
        format!("best_cost={}", best.cost),
        format!("best_actions={}", best.actions.join(";")),
    ]
}
