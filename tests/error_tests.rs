//! Error scenario integration tests

use std::process::Command;

fn interview_coach_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_interview-coach"))
}

#[test]
fn config_set_unknown_key() {
    let output = interview_coach_bin()
        .args(["config", "set", "unknown_key", "value"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Unknown") || stderr.contains("Valid"),
        "Expected error about unknown key, got: {}",
        stderr
    );
}

#[test]
fn config_set_invalid_service_url() {
    let output = interview_coach_bin()
        .args(["config", "set", "service_url", "not-a-url"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("http"),
        "Expected error about URL format, got: {}",
        stderr
    );
}

#[test]
fn config_set_invalid_boolean() {
    let output = interview_coach_bin()
        .args(["config", "set", "audio_cues", "maybe"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("true") || stderr.contains("false"),
        "Expected error about invalid boolean, got: {}",
        stderr
    );
}

#[test]
fn config_list_with_no_file() {
    let output = interview_coach_bin()
        .args(["config", "list"])
        .env("HOME", "/nonexistent")
        .env("XDG_CONFIG_HOME", "/nonexistent")
        .output()
        .expect("Failed to execute command");

    // Should succeed with unset values shown as "(not set)"
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("not set") || stdout.contains("service_url"),
        "Expected config list output, got: {}",
        stdout
    );
}
