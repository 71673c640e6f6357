//! CLI integration tests

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

/// Build command for the boardplan-cli binary (finds it in target/debug when run via cargo test).
fn boardplan_cli() -> Command {
    cargo_bin_cmd!("boardplan-cli")
}

/// Path to boardplan library test fixtures (relative to workspace).
fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("boardplan")
        .join("tests")
        .join("fixtures")
}

fn json_stdout(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.output().expect("binary should run");
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

fn temp_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_cli_help() {
    let mut cmd = boardplan_cli();

    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("placement"));
}

#[test]
fn test_cli_version() {
    let mut cmd = boardplan_cli();

    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_cli_layout_human() {
    let mut cmd = boardplan_cli();

    cmd.arg("layout").arg(fixtures_dir().join("mcu_board.json"));
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Board: 100 x 80 mm"))
        .stdout(predicate::str::contains("U1"))
        .stdout(predicate::str::contains("Constraints: 6"));
}

#[test]
fn test_cli_layout_json() {
    let mut cmd = boardplan_cli();
    cmd.arg("layout")
        .arg(fixtures_dir().join("mcu_board.json"))
        .arg("--format")
        .arg("json");

    let doc = json_stdout(&mut cmd);
    assert_eq!(doc["board"]["width_mm"], 100.0);
    assert_eq!(doc["placements"].as_array().unwrap().len(), 11);
    assert_eq!(doc["constraints"].as_array().unwrap().len(), 6);
    assert!(doc.get("overflows").is_none());
}

#[test]
fn test_cli_layout_board_override() {
    let mut cmd = boardplan_cli();
    cmd.arg("layout")
        .arg(fixtures_dir().join("scenario_a.json"))
        .args(["--width", "50", "--height", "40", "-f", "json"]);

    let doc = json_stdout(&mut cmd);
    assert_eq!(doc["board"]["width_mm"], 50.0);
    assert_eq!(doc["board"]["height_mm"], 40.0);
    assert_eq!(doc["placements"][0]["designator"], "C1");
    assert_eq!(doc["placements"][0]["x"], 20.83);
}

#[test]
fn test_cli_config_file() {
    let mut cmd = boardplan_cli();
    cmd.arg("--config")
        .arg(fixtures_dir().join("planner_config.json"))
        .arg("layout")
        .arg(fixtures_dir().join("mcu_board.json"))
        .args(["--format", "json"]);

    let doc = json_stdout(&mut cmd);
    assert_eq!(doc["board"]["width_mm"], 160.0);
    assert_eq!(doc["constraints"][0]["properties"]["min_clearance_mm"], 0.15);
}

#[test]
fn test_cli_commands() {
    let mut cmd = boardplan_cli();
    cmd.arg("commands").arg(fixtures_dir().join("mcu_board.json"));

    let commands = json_stdout(&mut cmd);
    let commands = commands.as_array().unwrap();
    assert_eq!(commands.len(), 11);
    assert_eq!(commands[0]["command"], "move_component");
    assert_eq!(commands[0]["parameters"]["designator"], "U2");
    assert_eq!(commands[0]["priority"], 0);
    assert_eq!(commands[0]["block"], "power");
}

#[test]
fn test_cli_rules_human() {
    let mut cmd = boardplan_cli();

    cmd.arg("rules").arg(fixtures_dir().join("usb_nets.json"));
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Width_Power"))
        .stdout(predicate::str::contains("Clearance_HighSpeed"))
        .stdout(predicate::str::contains("DiffPair_Rule").not());
}

#[test]
fn test_cli_rules_json() {
    let mut cmd = boardplan_cli();
    cmd.arg("rules")
        .arg(fixtures_dir().join("usb_nets.json"))
        .args(["--format", "json"]);

    let doc = json_stdout(&mut cmd);
    assert_eq!(doc["rules"].as_array().unwrap().len(), 6);
    assert_eq!(doc["net_classes"][2]["name"], "HighSpeed");
    assert_eq!(doc["net_classes"][2]["nets"][0], "USB_DP");
}

#[test]
fn test_cli_rules_script() {
    let mut cmd = boardplan_cli();

    cmd.arg("rules")
        .arg(fixtures_dir().join("usb_nets.json"))
        .args(["--format", "script"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Procedure CreateDesignRules;"))
        .stdout(predicate::str::contains("Rule.MinimumGap := MilsToCoord(7.87);"))
        .stdout(predicate::str::contains("Rule.MinWidth := MilsToCoord(19.69);"));
}

#[test]
fn test_cli_analyze() {
    let mut cmd = boardplan_cli();

    cmd.arg("analyze").arg(fixtures_dir().join("mcu_board.json"));
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Microcontroller Board"))
        .stdout(predicate::str::contains("Review score: 80/100"))
        .stdout(predicate::str::contains("High-speed   USB_DP, USB_DM, CLK_OUT"))
        .stdout(predicate::str::contains("decoupling"));
}

#[test]
fn test_cli_analyze_json() {
    let mut cmd = boardplan_cli();
    cmd.arg("analyze")
        .arg(fixtures_dir().join("mcu_board.json"))
        .args(["--format", "json"]);

    let doc = json_stdout(&mut cmd);
    assert_eq!(doc["design_type"], "Microcontroller Board");
    assert_eq!(doc["review"]["score"], 80);
    assert_eq!(doc["signals"]["power_nets"][0], "VCC_3V3");
    assert_eq!(doc["signals"]["differential_pairs"].as_array().unwrap().len(), 0);
    assert_eq!(doc["review"]["issues"][0]["type"], "warning");
}

#[test]
fn test_cli_analyze_differential_pairs() {
    let mut cmd = boardplan_cli();

    cmd.arg("analyze").arg(fixtures_dir().join("diff_pairs.json"));
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Differential pairs: LVDS_CLK, ETH_TX"));
}

#[test]
fn test_cli_empty_design() {
    let mut cmd = boardplan_cli();

    cmd.arg("layout").arg(fixtures_dir().join("empty.json"));
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("No components to place"));
}

#[test]
fn test_cli_missing_file() {
    let mut cmd = boardplan_cli();

    cmd.arg("layout").arg("does_not_exist.json");
    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("does_not_exist.json"));
}

#[test]
fn test_cli_malformed_export() {
    let file = temp_file("{\"components\": [");
    let mut cmd = boardplan_cli();

    cmd.arg("rules").arg(file.path());
    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Failed to decode design export"));
}

#[test]
fn test_cli_invalid_board() {
    let mut cmd = boardplan_cli();

    cmd.arg("layout")
        .arg(fixtures_dir().join("scenario_a.json"))
        .arg("--width=-10");
    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Invalid board"));
}

#[test]
fn test_cli_invalid_config() {
    let file = temp_file(r#"{"layout": {"margin_mm": "wide"}}"#);
    let mut cmd = boardplan_cli();

    cmd.arg("--config")
        .arg(file.path())
        .arg("analyze")
        .arg(fixtures_dir().join("mcu_board.json"));
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Invalid config"));
}

#[test]
fn test_cli_verbose_logs_to_stderr() {
    let mut cmd = boardplan_cli();

    cmd.arg("-vv").arg("commands").arg(fixtures_dir().join("mcu_board.json"));
    cmd.env_remove("RUST_LOG");
    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Emitted 11 placement commands"));
}
