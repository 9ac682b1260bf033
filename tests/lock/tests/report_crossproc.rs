//! Cross-process determinism: the `report_fixture` binary prints the same
//! lines under different working directories and locale settings, and
//! those lines match the in-process run.

use std::path::Path;
use std::process::Command;

fn binary_path() -> String {
    let mut path = std::env::current_exe()
        .expect("can resolve test binary path")
        .parent()
        .expect("binary dir exists")
        .parent()
        .expect("deps parent exists")
        .to_path_buf();
    path.push("report_fixture");
    path.to_string_lossy().to_string()
}

fn workspace_root() -> String {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("tests/ exists")
        .parent()
        .expect("workspace root exists")
        .to_string_lossy()
        .to_string()
}

fn run_variant(work_dir: &str, env_overrides: &[(&str, &str)]) -> String {
    let bin = binary_path();

    let mut command = Command::new(&bin);
    command.current_dir(work_dir);

    command
        .env_remove("LC_ALL")
        .env_remove("LC_COLLATE")
        .env_remove("LANG")
        .env_remove("LANGUAGE")
        .env_remove("RUST_LOG");

    for &(key, val) in env_overrides {
        command.env(key, val);
    }

    let output = command.output().unwrap_or_else(|e| {
        panic!("failed to spawn {bin} (work_dir={work_dir}, overrides={env_overrides:?}): {e}")
    });

    assert!(
        output.status.success(),
        "report_fixture exited with {}: stderr={}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );

    String::from_utf8(output.stdout).expect("stdout is valid UTF-8")
}

#[test]
fn crossproc_determinism_four_env_variants() {
    let root = workspace_root();
    let tmp = std::env::temp_dir().to_string_lossy().to_string();
    let baseline = run_variant(&root, &[]);

    assert!(baseline.contains("report_digest=sha256:"));
    assert!(baseline.contains("trace_digest=sha256:"));
    assert!(baseline.contains("best_cost=17"));

    let variants: [(&str, &[(&str, &str)]); 3] = [
        (&tmp, &[]),
        (&root, &[("LC_ALL", "C")]),
        (&root, &[("LANG", "tr_TR.UTF-8"), ("TZ", "Pacific/Kiritimati")]),
    ];
    for (dir, env) in variants {
        assert_eq!(run_variant(dir, env), baseline, "dir={dir} env={env:?}");
    }
}

#[test]
fn crossproc_matches_inproc() {
    let expected: String = lock_tests::fixture_lines()
        .into_iter()
        .map(|line| line + "\n")
        .collect();
    assert_eq!(run_variant(&workspace_root(), &[]), expected);
}
