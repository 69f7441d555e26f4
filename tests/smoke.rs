use std::fs;
use std::path::PathBuf;
use std::process::Command;

use vrwidgets_core::FrameTick;
use vrwidgets_testkit::{EventRecord, JsonlSink};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("vrwidgets-smoke-{}-{name}", std::process::id()));
    fs::create_dir_all(&dir).expect("can create scratch dir");
    dir
}

fn run_bin(args: &[&str]) -> (bool, serde_json::Value, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_vrwidgets"))
        .args(args)
        .output()
        .expect("binary runs");
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
    let summary = serde_json::from_slice(&output.stdout).unwrap_or(serde_json::Value::Null);
    (output.status.success(), summary, stderr)
}

#[test]
fn event_stream_can_be_written() {
    let path = scratch_dir("sink").join("eventlog.jsonl");
    let mut sink = JsonlSink::create(&path).expect("can create temp log");
    let record = EventRecord {
        tick: FrameTick::ZERO.advance(1),
        kind: "SmokeTest",
        payload: "ok",
    };
    sink.write(&record).expect("can write event");
    drop(sink);

    let line = fs::read_to_string(&path).expect("log readable");
    let value: serde_json::Value = serde_json::from_str(line.trim()).expect("valid json");
    assert_eq!(value["tick"], 1);
    assert_eq!(value["kind"], "SmokeTest");
}

#[test]
fn default_run_docks_and_logs_events() {
    let events = scratch_dir("default").join("events.jsonl");
    let (ok, summary, stderr) = run_bin(&["--events", events.to_str().expect("utf8 path")]);
    assert!(ok, "runner failed: {stderr}");
    assert_eq!(summary["docked"], true);
    assert_eq!(summary["button_validated"], true);
    assert_eq!(summary["elements"].as_array().map(Vec::len), Some(4));

    let log = fs::read_to_string(&events).expect("event log written");
    let kinds: Vec<String> = log
        .lines()
        .map(|line| {
            let value: serde_json::Value = serde_json::from_str(line).expect("valid json line");
            value["kind"].as_str().unwrap_or_default().to_string()
        })
        .collect();
    assert_eq!(kinds.first().map(String::as_str), Some("candidate"));
    assert!(kinds.iter().any(|k| k == "docked"), "{kinds:?}");
    assert_eq!(summary["dock_events"], kinds.len());
}

#[test]
fn short_run_stays_undocked() {
    let (ok, summary, stderr) = run_bin(&["--frames", "10"]);
    assert!(ok, "runner failed: {stderr}");
    assert_eq!(summary["frames"], 10);
    assert_eq!(summary["docked"], false);
}

#[test]
fn theme_and_config_files_are_applied() {
    let dir = scratch_dir("files");
    let config = dir.join("vrwidgets.toml");
    fs::write(
        &config,
        "[geometry]\ncorner_segments_fixed = 5\n\n[scenario]\nframes = 60\n",
    )
    .expect("write config");
    let theme = dir.join("theme.toml");
    fs::write(&theme, "[colors]\nbackground = [0.0, 0.0, 0.3, 1.0]\n").expect("write theme");

    let (ok, summary, stderr) = run_bin(&[
        "--strict",
        "--config",
        config.to_str().expect("utf8 path"),
        "--theme",
        theme.to_str().expect("utf8 path"),
    ]);
    assert!(ok, "runner failed: {stderr}");
    assert_eq!(summary["frames"], 60);
    assert_eq!(summary["docked"], true);
}

#[test]
fn strict_mode_rejects_bad_config() {
    let dir = scratch_dir("strict");
    let config = dir.join("broken.toml");
    fs::write(&config, "[docking]\npulse_step = \"fast\"\n").expect("write config");
    let path = config.to_str().expect("utf8 path");

    let (ok, _, stderr) = run_bin(&["--strict", "--config", path]);
    assert!(!ok);
    assert!(stderr.contains("broken.toml"), "{stderr}");

    let (ok, summary, stderr) = run_bin(&["--config", path]);
    assert!(ok, "lenient run failed: {stderr}");
    assert_eq!(summary["docked"], true);
}
