use assert_cmd::Command;
use predicates::str::contains;
use std::fs;

const WORLD_WAR_2: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../fixtures/world_war_2.txt");

fn risk_sim() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_risk_sim"));
    cmd.env("RUST_LOG", "error");
    cmd
}

#[test]
fn help_lists_commands() {
    risk_sim()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("play"))
        .stdout(contains("simulate"));
}

#[test]
fn simulate_prints_summary() {
    risk_sim()
        .args(["simulate", WORLD_WAR_2, "--games", "3", "--seed", "5", "--max-turns", "150"])
        .assert()
        .success()
        .stdout(contains("Games: 3"))
        .stdout(contains("Cancelled:"));
}

#[test]
fn simulate_writes_json() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("summary.json");
    let rules = dir.path().join("rules.toml");
    fs::write(&rules, "max_turns = 100\n").unwrap();

    risk_sim()
        .arg("simulate")
        .arg(WORLD_WAR_2)
        .args(["--games", "2", "--rules"])
        .arg(&rules)
        .arg("--json")
        .arg(&out)
        .assert()
        .success();

    let summary: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(summary["games"], 2);
    assert!(summary["total_turns"].as_u64().unwrap() <= 200);
}

#[test]
fn missing_map_is_reported() {
    risk_sim()
        .args(["simulate", "/nonexistent/map.txt", "--games", "1"])
        .assert()
        .failure()
        .stderr(contains("/nonexistent/map.txt"));
}

#[test]
fn invalid_map_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let map = dir.path().join("map.txt");
    fs::write(&map, "Tiny\n1|Alice\n1|Bob\nA|North|B\nB|North|A\n").unwrap();

    risk_sim()
        .arg("simulate")
        .arg(&map)
        .assert()
        .failure()
        .stderr(contains("outside the allowed range"));
}

#[test]
fn play_exits_when_input_closes() {
    risk_sim()
        .args(["play", WORLD_WAR_2, "--seed", "1"])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(contains("game aborted before it finished"));
}
