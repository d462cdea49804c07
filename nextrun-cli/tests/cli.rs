use assert_cmd::Command;
use predicates::prelude::*;

fn nextrun() -> Command {
    Command::cargo_bin("nextrun").unwrap()
}

const DAILY: &str = r#"{
    "type": "daily",
    "enabled": true,
    "currentDate": "2024-01-01T00:00:00",
    "limits": { "start": "2024-01-01T00:00:00", "end": "2024-01-03T23:59:59" },
    "hourRange": { "startHour": "09:00:00", "endHour": "17:00:00", "hourlyInterval": 2 }
}"#;

const WEEKLY: &str = r#"{
    "type": "weekly",
    "enabled": true,
    "currentDate": "2024-01-01T00:00:00",
    "limits": { "start": "2024-01-01T00:00:00" },
    "daysOfWeek": ["monday"],
    "hourRange": { "startHour": "09:00:00" }
}"#;

// ============================================================
// Computing executions
// ============================================================

#[test]
fn test_daily_from_stdin() {
    nextrun()
        .write_stdin(DAILY)
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-01-01T09:00:00"))
        .stdout(predicate::str::contains(
            "Occurs every day from 9:00 AM to 5:00 PM.",
        ))
        .stdout(predicate::str::contains("2024-01-03T11:00:00"))
        .stdout(predicate::str::contains("2024-01-03T13:00:00").not());
}

#[test]
fn test_dash_reads_stdin() {
    nextrun()
        .arg("-")
        .write_stdin(WEEKLY)
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-01-08T09:00:00"));
}

#[test]
fn test_reads_file_argument() {
    let path = std::env::temp_dir().join("nextrun-cli-weekly.json");
    std::fs::write(&path, WEEKLY).unwrap();
    nextrun()
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-01-15T09:00:00"));
    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_max_results() {
    let output = nextrun()
        .args(["--max-results", "3"])
        .write_stdin(WEEKLY)
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.lines().count(), 3);
}

#[test]
fn test_max_results_capped() {
    nextrun()
        .args(["--max-results", "5000"])
        .write_stdin(WEEKLY)
        .assert()
        .success()
        .stderr(predicate::str::contains("capped at 1000"));
}

#[test]
fn test_locale_override() {
    nextrun()
        .args(["--locale", "es-ES"])
        .write_stdin(WEEKLY)
        .assert()
        .success()
        .stdout(predicate::str::contains("Ocurre cada 1 semana(s) los lunes."));
}

#[test]
fn test_unknown_locale() {
    nextrun()
        .args(["--locale", "fr-FR"])
        .write_stdin(WEEKLY)
        .assert()
        .failure();
}

// ============================================================
// JSON output
// ============================================================

#[test]
fn test_json_output() {
    let output = nextrun()
        .args(["--json", "-n", "2"])
        .write_stdin(DAILY)
        .output()
        .unwrap();
    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let arr = parsed.as_array().unwrap();
    assert_eq!(arr.len(), 2);
    assert_eq!(arr[0]["executionTime"], "2024-01-01T09:00:00");
    assert_eq!(arr[1]["executionTime"], "2024-01-01T11:00:00");
    assert!(arr[0]["description"]
        .as_str()
        .unwrap()
        .starts_with("Occurs every day"));
}

// ============================================================
// Validation
// ============================================================

#[test]
fn test_check_valid() {
    nextrun()
        .arg("--check")
        .write_stdin(DAILY)
        .assert()
        .success()
        .stdout(predicate::str::contains("valid"));
}

#[test]
fn test_check_disabled() {
    nextrun()
        .arg("--check")
        .write_stdin(DAILY.replace("\"enabled\": true", "\"enabled\": false"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be enabled"));
}

#[test]
fn test_disabled_is_an_error() {
    nextrun()
        .write_stdin(WEEKLY.replace("\"enabled\": true", "\"enabled\": false"))
        .assert()
        .code(1);
}

#[test]
fn test_invalid_document() {
    nextrun()
        .write_stdin(r#"{"type": "yearly"}"#)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_past_target() {
    nextrun()
        .write_stdin(
            r#"{
                "type": "once",
                "enabled": true,
                "currentDate": "2024-01-02T00:00:00",
                "limits": { "start": "2024-01-01T00:00:00" },
                "targetDateTime": "2024-01-01T09:00:00"
            }"#,
        )
        .assert()
        .code(1)
        .stderr(predicate::str::contains("earlier than the current date"));
}

#[test]
fn test_no_input() {
    nextrun().write_stdin("").assert().code(2);
}

#[test]
fn test_empty_result() {
    nextrun()
        .write_stdin(WEEKLY.replace("[\"monday\"]", "[]"))
        .assert()
        .success()
        .stderr(predicate::str::contains("no upcoming executions"));
}

// ============================================================
// Templates
// ============================================================

#[test]
fn test_templates_are_valid_documents() {
    for kind in ["once", "daily", "weekly", "monthly-ordinal", "monthly-day"] {
        let output = nextrun().args(["--template", kind]).output().unwrap();
        assert!(output.status.success(), "template {kind} failed");
        nextrun()
            .arg("--check")
            .write_stdin(output.stdout)
            .assert()
            .success();
    }
}

#[test]
fn test_template_tag() {
    nextrun()
        .args(["--template", "monthly-ordinal"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"type\": \"monthly_ordinal\""));
}

// ============================================================
// Logging
// ============================================================

#[test]
fn test_verbose_logs_to_stderr() {
    nextrun()
        .arg("-v")
        .write_stdin(WEEKLY)
        .assert()
        .success()
        .stderr(predicate::str::contains("loaded configuration"));
}

#[test]
fn test_quiet_suppresses_warnings() {
    nextrun()
        .args(["-q", "--max-results", "5000"])
        .write_stdin(WEEKLY)
        .assert()
        .success()
        .stderr(predicate::str::contains("capped").not());
}

#[test]
fn test_verbose_and_quiet_conflict() {
    nextrun().args(["-v", "-q"]).assert().failure();
}
