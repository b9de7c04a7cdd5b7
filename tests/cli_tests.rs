//! Integration tests for the execp binary

#![cfg(unix)]

mod common;

use assert_cmd::Command;
use common::*;
use predicates::prelude::*;

fn execp() -> Command {
    let mut cmd = Command::cargo_bin("execp").expect("binary should build");
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_run_prints_stdout() {
    execp()
        .args(["run", "echo", "hello", "world"])
        .assert()
        .success()
        .stdout("hello world\n");
}

#[test]
fn test_run_passes_hyphenated_args_through() {
    execp()
        .args(["run", "sh", "-c", "printf '%s' \"$0\"", "-v"])
        .assert()
        .success()
        .stdout("-v");
}

#[test]
fn test_run_failure_prints_stderr_and_exits_nonzero() {
    execp()
        .args(["run", "sh", "-c", "printf 'boom' >&2; exit 3"])
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("boom"));
}

#[test]
fn test_run_nonzero_without_stderr_is_success() {
    execp()
        .args(["run", "sh", "-c", "printf 'kept'; exit 3"])
        .assert()
        .success()
        .stdout("kept");
}

#[test]
fn test_run_missing_program() {
    execp()
        .args(["run", "no_such_program_4242"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to launch 'no_such_program_4242'"));
}

#[test]
fn test_run_json_success() {
    let output = execp()
        .args(["run", "--format", "json", "printf", "abc"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["ok"], true);
    assert_eq!(json["stdout"], "abc");
}

#[test]
fn test_run_json_failure() {
    let output = execp()
        .args(["run", "-f", "json", "sh", "-c", "echo nope >&2; exit 9"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["ok"], false);
    assert_eq!(json["error"]["error_type"], "command_failed");
    assert_eq!(json["error"]["exit_code"], 9);
    assert_eq!(json["error"]["message"], "nope\n");
}

#[test]
fn test_run_strict_decode_from_config() {
    let (_dir, config) = create_config("[exec]\ndecode = \"strict\"\n");

    execp()
        .args(["-c", config.to_str().unwrap(), "run", "printf", "\\377"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not valid UTF-8"));
}

#[test]
fn test_run_decode_flag_overrides_config() {
    let (_dir, config) = create_config("[exec]\ndecode = \"strict\"\n");

    execp()
        .args([
            "-c",
            config.to_str().unwrap(),
            "run",
            "--decode",
            "lossy",
            "printf",
            "\\377",
        ])
        .assert()
        .success()
        .stdout("\u{FFFD}");
}

#[test]
fn test_config_shows_resolved_values() {
    let (_dir, config) = create_config("[logging]\nfilter = \"execp=info\"\n");

    execp()
        .args(["-c", config.to_str().unwrap(), "config", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"filter\": \"execp=info\""))
        .stdout(predicate::str::contains("\"decode\": \"lossy\""));
}

#[test]
fn test_env_override_reaches_binary() {
    execp()
        .env("EXECP_EXEC__DECODE", "strict")
        .args(["config", "--format", "toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("decode = \"strict\""));
}

#[test]
fn test_invalid_config_reports_error() {
    let (_dir, config) = create_config("[logging]\nformat = \"xml\"\n");

    execp()
        .args(["-c", config.to_str().unwrap(), "config"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load configuration"));
}

#[test]
fn test_missing_config_file_warns_after_logging_starts() {
    execp()
        .args(["-c", "/nonexistent/x.toml", "run", "echo", "hi"])
        .assert()
        .success()
        .stdout("hi\n")
        .stderr(predicate::str::contains("Override config not found"))
        .stderr(predicate::str::contains("/nonexistent/x.toml"));
}

#[test]
fn test_config_lists_explicit_file_as_loaded() {
    let (_dir, config) = create_config("[exec]\ndecode = \"strict\"\n");
    let expected = format!("# loaded: {}", config.display());

    execp()
        .args(["-c", config.to_str().unwrap(), "config"])
        .assert()
        .success()
        .stdout(predicate::str::contains(expected))
        .stdout(predicate::str::contains("decode = \"strict\""));
}
