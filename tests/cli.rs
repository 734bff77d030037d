//! 命令行集成测试

use assert_cmd::prelude::*;
use std::process::Command;

#[test]
fn test_help_lists_options_and_environment() {
    let output = Command::cargo_bin("wattpad-burmese-web")
        .unwrap()
        .arg("--help")
        .output()
        .unwrap();

    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--port"));
    assert!(stdout.contains("--bind"));
    assert!(stdout.contains("GROQ_API_KEY_1..9"));
    assert!(stdout.contains("WATTPAD_FETCH_TIMEOUT_SECS"));
}

#[test]
fn test_unknown_argument_fails() {
    let output = Command::cargo_bin("wattpad-burmese-web")
        .unwrap()
        .arg("--nope")
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unknown argument"));
}
