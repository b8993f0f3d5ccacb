//! CLI Integration Tests for relay-console
//!
//! Runs the built binary against a temporary working directory so session
//! files never leak between tests. None of these touch the network.

mod common;

use common::alice_token;
use std::fs;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Helper to run relay-console with arguments in `dir`
fn run_relay(args: &[&str], dir: &TempDir) -> Output {
    Command::new(env!("CARGO_BIN_EXE_relay-console"))
        .args(["--no-color"])
        .args(args)
        .current_dir(dir.path())
        .env_remove("RELAY_API_BASE_URL")
        .env_remove("RELAY_PASSWORD")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute command")
}

// =============================================================================
// Help and Version Tests
// =============================================================================

#[test]
fn test_help_command() {
    let dir = TempDir::new().unwrap();
    let output = run_relay(&["--help"], &dir);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Relay Console"));
    for command in ["status", "login", "logout", "users", "decode", "theme", "config"] {
        assert!(stdout.contains(command), "help is missing {}", command);
    }
}

#[test]
fn test_version_command() {
    let dir = TempDir::new().unwrap();
    let output = run_relay(&["--version"], &dir);

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("relay-console"));
}

// =============================================================================
// Offline Commands
// =============================================================================

#[test]
fn test_status_when_signed_out() {
    let dir = TempDir::new().unwrap();
    let output = run_relay(&["status"], &dir);

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Not signed in"));
}

#[test]
fn test_decode_token() {
    let dir = TempDir::new().unwrap();
    let token = alice_token();
    let output = run_relay(&["decode", &token], &dir);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("alice"));
    assert!(stdout.contains("admin"));
}

#[test]
fn test_decode_malformed_token_fails() {
    let dir = TempDir::new().unwrap();
    let output = run_relay(&["decode", "only.two"], &dir);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Malformed token"));
}

#[test]
fn test_theme_persists_in_preferences_file() {
    let dir = TempDir::new().unwrap();

    assert!(run_relay(&["theme", "dark"], &dir).status.success());

    let prefs = fs::read_to_string(dir.path().join(".relay/preferences.json")).unwrap();
    assert!(prefs.contains("dark"));

    let output = run_relay(&["theme"], &dir);
    assert!(String::from_utf8_lossy(&output.stdout).contains("dark"));

    // logout clears the session but not the theme
    assert!(run_relay(&["logout"], &dir).status.success());
    let output = run_relay(&["theme"], &dir);
    assert!(String::from_utf8_lossy(&output.stdout).contains("dark"));
}

#[test]
fn test_config_validate_with_custom_file() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("custom.toml"),
        "[api]\nbase_url = \"https://relay.example.com/api\"\n",
    )
    .unwrap();

    let output = run_relay(&["--config", "custom.toml", "config", "--validate"], &dir);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("https://relay.example.com/api"));
    assert!(stdout.contains("Configuration is valid"));
}

#[test]
fn test_config_validate_rejects_bad_scheme() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("relay.toml"),
        "[api]\nbase_url = \"ftp://relay.example.com\"\n",
    )
    .unwrap();

    let output = run_relay(&["config", "--validate"], &dir);
    assert!(!output.status.success());
}

#[test]
fn test_login_rejects_short_password_offline() {
    let dir = TempDir::new().unwrap();
    let output = run_relay(
        &["login", "-e", "alice@example.com", "-p", "123"],
        &dir,
    );

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("at least 6 characters"));
}

#[test]
fn test_status_recovers_from_torn_session_file() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join(".relay")).unwrap();
    fs::write(
        dir.path().join(".relay/session.json"),
        r#"{"accessToken": "abc"#,
    )
    .unwrap();

    let output = run_relay(&["status"], &dir);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Not signed in"));

    assert!(run_relay(&["logout"], &dir).status.success());
}
