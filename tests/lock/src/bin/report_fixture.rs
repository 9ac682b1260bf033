//! Binary that runs the fixture config and prints deterministic
//! key=value lines for cross-process verification.
//!
//! Usage: `report_fixture`

fn main() {
    for line in lock_tests::fixture_lines() {
        println!("{line}");
    }
}
