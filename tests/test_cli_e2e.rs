mod common;

use common::{fixture_path, spawn_command, spawn_command_with_env, stderr, stdout};

// ============================================================================
// version command
// ============================================================================

#[test]
fn version_human() {
    let output = spawn_command(&["version"]);
    assert!(
        output.status.success(),
        "version should exit 0: {}",
        stderr(&output)
    );

    let out = stdout(&output);
    assert!(out.contains("tempocue"), "missing name: {out}");
    assert!(out.contains('.'), "missing version number: {out}");
}

#[test]
fn version_json() {
    let output = spawn_command(&["version", "--format", "json"]);
    assert!(output.status.success());

    let parsed: serde_json::Value =
        serde_json::from_str(&stdout(&output)).expect("version JSON should be valid");
    assert_eq!(parsed["name"], "tempocue");
    assert_eq!(parsed["hold_marker"], "H");
}

// ============================================================================
// completions command
// ============================================================================

#[test]
fn completions_bash() {
    let output = spawn_command(&["completions", "bash"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("tempocue"));
}

#[test]
fn completions_fish() {
    let output = spawn_command(&["completions", "fish"]);
    assert!(output.status.success());
    assert!(!stdout(&output).is_empty());
}

// ============================================================================
// parse command
// ============================================================================

#[test]
fn parse_valid_tempo() {
    let output = spawn_command(&["parse", "3/1/1/0"]);
    assert!(output.status.success(), "{}", stderr(&output));

    let out = stdout(&output);
    assert!(out.starts_with("3/1/1/0"), "{out}");
    assert!(out.contains("eccentric 3s, pause 1s, concentric 1s, pause 0s"));
    assert!(out.contains("5s per rep"));
}

#[test]
fn parse_json_output() {
    let output = spawn_command(&["parse", " 2 / H / 1 / 0 ", "--format", "json"]);
    assert!(output.status.success(), "{}", stderr(&output));

    let parsed: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(parsed["notation"], "2/H/1/0");
    assert_eq!(parsed["has_hold"], true);
    assert_eq!(parsed["phases"].as_array().unwrap().len(), 4);
}

#[test]
fn parse_invalid_tempo_exits_4() {
    let output = spawn_command(&["parse", "3/1/1"]);
    assert_eq!(output.status.code(), Some(4));
    assert!(stderr(&output).contains("invalid tempo '3/1/1'"));
}

#[test]
fn parse_lowercase_hold_rejected() {
    let output = spawn_command(&["parse", "3/h/1/0"]);
    assert_eq!(output.status.code(), Some(4));
}

// ============================================================================
// presets command
// ============================================================================

#[test]
fn presets_list() {
    let output = spawn_command(&["presets", "list"]);
    assert!(output.status.success());

    let out = stdout(&output);
    for name in ["controlled", "slow-eccentric", "isometric-bottom"] {
        assert!(out.contains(name), "missing preset {name}: {out}");
    }
}

#[test]
fn presets_list_json() {
    let output = spawn_command(&["presets", "list", "--format", "json"]);
    assert!(output.status.success());

    let parsed: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let first = &parsed.as_array().unwrap()[0];
    assert_eq!(first["name"], "controlled");
    assert_eq!(first["seconds_per_rep"], 5);
}

#[test]
fn presets_show_known() {
    let output = spawn_command(&["presets", "show", "slow-eccentric"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("4/0/1/0"));
}

#[test]
fn presets_show_unknown_exits_64() {
    let output = spawn_command(&["presets", "show", "slow-eccentrc"]);
    assert_eq!(output.status.code(), Some(64));
    assert!(stderr(&output).contains("did you mean 'slow-eccentric'"));
}

// ============================================================================
// validate command
// ============================================================================

#[test]
fn validate_valid_plan() {
    let path = fixture_path("valid_plan.yaml");
    let output = spawn_command(&["validate", path.to_str().unwrap()]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).contains("ok (Lower body A, 3 exercises)"));
}

#[test]
fn validate_invalid_plan_exits_2() {
    let path = fixture_path("invalid_tempo_plan.yaml");
    let output = spawn_command(&["validate", path.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(2));

    let out = stdout(&output);
    assert!(out.contains("FAILED"), "{out}");
    assert!(out.contains("exercises[0].tempo"), "{out}");
    assert!(out.contains("exercises[1].tempo"), "{out}");
}

#[test]
fn validate_json_reports_every_file() {
    let valid = fixture_path("valid_plan.yaml");
    let invalid = fixture_path("invalid_tempo_plan.yaml");
    let output = spawn_command(&[
        "validate",
        valid.to_str().unwrap(),
        invalid.to_str().unwrap(),
        "--format",
        "json",
    ]);
    assert_eq!(output.status.code(), Some(2));

    let parsed: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let reports = parsed.as_array().unwrap();
    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0]["valid"], true);
    assert_eq!(reports[1]["valid"], false);
    assert_eq!(reports[1]["errors"][0]["severity"], "error");
}

#[test]
fn validate_strict_fails_on_warnings() {
    let path = fixture_path("hold_plan.yaml");
    let lenient = spawn_command(&["validate", path.to_str().unwrap()]);
    assert!(lenient.status.success());

    let strict = spawn_command(&["validate", path.to_str().unwrap(), "--strict"]);
    assert_eq!(strict.status.code(), Some(2));
}

#[test]
fn validate_missing_file_exits_2() {
    let output = spawn_command(&["validate", "/nonexistent/plan.yaml"]);
    assert_eq!(output.status.code(), Some(2));
}

// ============================================================================
// diagram command
// ============================================================================

#[test]
fn diagram_from_notation() {
    let output = spawn_command(&["diagram", "2/H/1/0"]);
    assert!(output.status.success());

    let out = stdout(&output);
    assert!(out.starts_with("stateDiagram-v2"));
    assert!(out.contains("[*] --> eccentric"));
    assert!(out.contains(": hold"));
    assert!(out.contains("rep++"));
}

#[test]
fn diagram_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let out_path = dir.path().join("cycle.mmd");
    let output = spawn_command(&[
        "diagram",
        "--preset",
        "controlled",
        "-o",
        out_path.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "{}", stderr(&output));

    let written = std::fs::read_to_string(&out_path).unwrap();
    assert!(written.contains("tempo 3/1/1/0"));
}

// ============================================================================
// run command
// ============================================================================

#[test]
fn run_stops_after_reps() {
    let output = spawn_command(&["run", "0/0/0/0", "--reps", "1", "--interval", "10ms"]);
    assert!(output.status.success(), "{}", stderr(&output));

    let out = stdout(&output);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 5, "{out}");
    assert_eq!(lines[0], "rep 1 · lower (eccentric) · 0s");
    assert!(lines[4].starts_with("rep 2 · lower"));
    assert!(stderr(&output).contains("1 reps completed in 4 ticks (target_reached)"));
}

#[test]
fn run_quiet_prints_nothing() {
    let output = spawn_command(&[
        "--quiet", "run", "0/0/0/0", "--reps", "1", "--interval", "5ms",
    ]);
    assert!(output.status.success());
    assert!(stdout(&output).is_empty());
}

#[test]
fn run_plan_exercise_uses_plan_reps() {
    let path = fixture_path("fast_plan.yaml");
    let output = spawn_command(&[
        "run",
        "--plan",
        path.to_str().unwrap(),
        "--exercise",
        "air squat",
        "--no-cues",
    ]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stderr(&output).contains("Air squat: 2 reps completed"));
}

#[test]
fn run_writes_events_file() {
    let dir = tempfile::tempdir().unwrap();
    let events = dir.path().join("events.jsonl");
    let output = spawn_command(&[
        "run",
        "0/0/0/0",
        "--reps",
        "1",
        "--interval",
        "5ms",
        "--no-cues",
        "--events-file",
        events.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "{}", stderr(&output));

    let raw = std::fs::read_to_string(&events).unwrap();
    let parsed: Vec<serde_json::Value> = raw
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(parsed.first().unwrap()["type"], "SessionStarted");
    assert_eq!(parsed.last().unwrap()["type"], "SessionStopped");
    assert_eq!(parsed.last().unwrap()["completed_repetitions"], 1);
    for (i, event) in parsed.iter().enumerate() {
        assert_eq!(event["sequence"], i as u64);
    }
}

#[test]
fn run_invalid_tempo_exits_4() {
    let output = spawn_command(&["run", "3/1/1/0/0"]);
    assert_eq!(output.status.code(), Some(4));
}

#[test]
fn run_unknown_preset_exits_64() {
    let output = spawn_command(&["run", "--preset", "nope"]);
    assert_eq!(output.status.code(), Some(64));
}

#[test]
fn run_invalid_plan_exits_2() {
    let path = fixture_path("invalid_tempo_plan.yaml");
    let output = spawn_command(&[
        "run",
        "--plan",
        path.to_str().unwrap(),
        "--exercise",
        "Dips",
    ]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn run_unreadable_plan_exits_3() {
    let dir = tempfile::tempdir().unwrap();
    let plan = dir.path().join("plan.yaml");
    std::fs::write(&plan, b"plan:\n  name: \xff\n").unwrap();
    let output = spawn_command(&["run", "--plan", plan.to_str().unwrap(), "-e", "Dips"]);
    assert_eq!(output.status.code(), Some(3), "{}", stderr(&output));
    assert!(stderr(&output).contains("cannot read"));
}

#[test]
fn run_without_source_exits_64() {
    let output = spawn_command(&["run"]);
    assert_eq!(output.status.code(), Some(64));
    assert!(stderr(&output).contains("--plan is required"));
}

#[test]
fn run_notation_with_plan_env_set() {
    let plan = fixture_path("valid_plan.yaml");
    let output = spawn_command_with_env(
        &["run", "0/0/0/0", "--reps", "1", "--interval", "10ms"],
        &[("TEMPOCUE_PLAN", plan.to_str().unwrap())],
    );
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stderr(&output).contains("0/0/0/0: 1 reps completed in 4 ticks (target_reached)"));
}

#[test]
fn run_preset_with_plan_env_set() {
    let plan = fixture_path("valid_plan.yaml");
    let output = spawn_command_with_env(
        &["run", "--preset", "explosive", "--reps", "1", "--interval", "5ms", "--no-cues"],
        &[("TEMPOCUE_PLAN", plan.to_str().unwrap())],
    );
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stderr(&output).contains("explosive: 1 reps completed"));
}

#[test]
fn run_exercise_from_plan_env() {
    let plan = fixture_path("fast_plan.yaml");
    let output = spawn_command_with_env(
        &["run", "--exercise", "air squat", "--no-cues"],
        &[("TEMPOCUE_PLAN", plan.to_str().unwrap())],
    );
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stderr(&output).contains("Air squat: 2 reps completed"));
}
