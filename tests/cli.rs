use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn regionmark_cmd(config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("regionmark").expect("binary exists");
    cmd.env("XDG_CONFIG_HOME", config_home.path());
    cmd
}

fn write_config(config_home: &TempDir, contents: &str) {
    let dir = config_home.path().join("regionmark");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("config.toml"), contents).unwrap();
}

const DRAW_AND_PASTE: &str = r#"{
    "events": [
        { "event": "key", "key": "R" },
        { "event": "press", "x": 100, "y": 100 },
        { "event": "drag", "x": 150, "y": 150 },
        { "event": "release", "x": 150, "y": 150 },
        { "event": "press", "x": 125, "y": 125 },
        { "event": "release", "x": 125, "y": 125 },
        { "event": "key", "key": "Ctrl+C" },
        { "event": "key", "key": "Ctrl+V" }
    ]
}"#;

#[test]
fn regionmark_help_prints_about() {
    let home = TempDir::new().unwrap();
    regionmark_cmd(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Interaction engine for annotating captured screen regions",
        ));
}

#[test]
fn no_arguments_prints_usage() {
    let home = TempDir::new().unwrap();
    regionmark_cmd(&home)
        .assert()
        .success()
        .stdout(predicate::str::contains("regionmark --replay <SCRIPT>"));
}

#[test]
fn replay_prints_final_scene() {
    let home = TempDir::new().unwrap();
    let script = home.path().join("script.json");
    std::fs::write(&script, DRAW_AND_PASTE).unwrap();

    regionmark_cmd(&home)
        .arg("--replay")
        .arg(&script)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""kind": "rectangle""#))
        .stdout(predicate::str::contains(r#""x": 120.0"#))
        .stdout(predicate::str::contains(r#""undo_depth": 2"#));
}

#[test]
fn replay_honours_configured_paste_offset() {
    let home = TempDir::new().unwrap();
    write_config(&home, "[interaction]\npaste_offset = 50.0\n");
    let script = home.path().join("script.json");
    std::fs::write(&script, DRAW_AND_PASTE).unwrap();

    regionmark_cmd(&home)
        .arg("--replay")
        .arg(&script)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""x": 150.0"#));
}

#[test]
fn replay_missing_script_fails() {
    let home = TempDir::new().unwrap();
    regionmark_cmd(&home)
        .args(["--replay", "/nonexistent/script.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read replay script"));
}

#[test]
fn replay_rejects_unknown_event() {
    let home = TempDir::new().unwrap();
    let script = home.path().join("bad.json");
    std::fs::write(&script, r#"{ "events": [ { "event": "teleport" } ] }"#).unwrap();

    regionmark_cmd(&home)
        .arg("--replay")
        .arg(&script)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid replay script"));
}

#[test]
fn duplicate_keybindings_are_rejected() {
    let home = TempDir::new().unwrap();
    write_config(&home, "[keybindings]\ncopy = [\"Ctrl+Z\"]\n");
    let script = home.path().join("script.json");
    std::fs::write(&script, r#"{ "events": [] }"#).unwrap();

    regionmark_cmd(&home)
        .arg("--replay")
        .arg(&script)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Duplicate keybinding"));
}

#[test]
fn print_config_shows_clamped_values() {
    let home = TempDir::new().unwrap();
    write_config(&home, "[drawing]\nstroke_width = 500.0\n");

    regionmark_cmd(&home)
        .arg("--print-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("[drawing]"))
        .stdout(predicate::str::contains("stroke_width = 20.0"));
}

#[test]
fn explicit_config_path_overrides_default() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("custom.toml");
    std::fs::write(&path, "[readout]\ninterval_ms = 1000\n").unwrap();

    regionmark_cmd(&home)
        .arg("--config")
        .arg(&path)
        .arg("--print-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("interval_ms = 100"));
}

#[test]
fn invalid_config_reports_path() {
    let home = TempDir::new().unwrap();
    write_config(&home, "[drawing\n");

    regionmark_cmd(&home)
        .arg("--print-config")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config"));
}

#[test]
fn schema_dump_describes_config() {
    Command::cargo_bin("dump_config_schema")
        .expect("binary exists")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"Config\""))
        .stdout(predicate::str::contains("paste_offset"));
}
