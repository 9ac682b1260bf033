//! Run configs load from TOML and JSON files, and bad configs fail before
//! any search step.

use std::io::Write;

use statespace_harness::runner::{MethodChoice, RunConfig, RunError, SolutionMode, WorldChoice};
use statespace_search::policy::ConfigError;
use statespace_search::Termination;

fn write_config(name: &str, contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    (dir, path)
}

#[test]
fn toml_file_round_trip_for_every_world() {
    let worlds = [
        r#"kind = "river_crossing""#,
        "kind = \"water_buckets\"\ncapacities = [7, 11]\ntarget = 2",
        "kind = \"bridge_crossing\"\ntimes = [1, 2, 5, 10]\norder = \"solo_first\"",
        "kind = \"queens\"\nsize = 5",
        "kind = \"tiles\"\nsize = 3\ncells = [1, 2, 3, 5, 0, 6, 4, 7, 8]",
    ];
    for world in worlds {
        let text = format!("[world]\n{world}\n\n[method]\nkind = \"breadth_first\"\n");
        let (_dir, path) = write_config("run.toml", &text);
        let config = RunConfig::load(&path).unwrap();
        assert_eq!(config.method, MethodChoice::BreadthFirst);
        assert_eq!(config.solutions, SolutionMode::First);
        let report = config.run().unwrap();
        assert_eq!(report.termination, Some(Termination::Solved), "{world}");
    }
}

#[test]
fn json_file_with_policy() {
    let json = r#"{
        "world": {"kind": "water_buckets", "capacities": [3, 5], "target": 4},
        "method": {"kind": "depth_limited", "limit": 8},
        "solutions": "first",
        "policy": {"node_budget": 500, "record_trace": true}
    }"#;
    let (_dir, path) = write_config("run.json", json);
    let config = RunConfig::load(&path).unwrap();
    assert_eq!(config.method, MethodChoice::DepthLimited { limit: 8 });
    assert_eq!(config.policy.node_budget, Some(500));
    assert_eq!(
        config.world,
        WorldChoice::WaterBuckets {
            capacities: vec![3, 5],
            target: 4
        }
    );
    let report = config.run().unwrap();
    assert!(report.trace_digest.is_some());
    assert!(report.is_solved());
}

#[test]
fn invalid_policy_is_rejected_at_load() {
    let text = "[world]\nkind = \"river_crossing\"\n\n[method]\nkind = \"a_star\"\n\n\
                [policy]\nnode_budget = 0\n";
    assert!(matches!(
        RunConfig::from_toml_str(text),
        Err(ConfigError::ZeroNodeBudget)
    ));

    let text = "[world]\nkind = \"river_crossing\"\n\n[method]\nkind = \"a_star\"\n\n\
                [policy]\nlower_bound = 5\nupper_bound = 5\n";
    assert!(matches!(
        RunConfig::from_toml_str(text),
        Err(ConfigError::EmptyCostWindow { lower: 5, upper: 5 })
    ));
}

#[test]
fn unknown_world_kind_is_a_parse_error() {
    let text = "[world]\nkind = \"sudoku\"\n\n[method]\nkind = \"a_star\"\n";
    assert!(matches!(
        RunConfig::from_toml_str(text),
        Err(ConfigError::Toml(_))
    ));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = RunConfig::load(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn bad_instance_fails_at_run() {
    let text = "[world]\nkind = \"bridge_crossing\"\ntimes = [1, 0]\norder = \"adaptive\"\n\n\
                [method]\nkind = \"uniform_cost\"\n";
    let config = RunConfig::from_toml_str(text).unwrap();
    assert!(matches!(config.run(), Err(RunError::World(_))));
}

#[test]
fn deepening_only_collects_first_solution() {
    let text = "solutions = \"optimal\"\n\n[world]\nkind = \"river_crossing\"\n\n\
                [method]\nkind = \"iterative_deepening\"\nmax_depth = 10\n";
    let config = RunConfig::from_toml_str(text).unwrap();
    assert!(matches!(
        config.run(),
        Err(RunError::UnsupportedMode {
            mode: SolutionMode::Optimal,
            ..
        })
    ));
}
