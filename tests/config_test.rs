#[path = "common/mod.rs"]
mod common;

use common::DrillTest;

// ============================================================================
// Config command tests
// ============================================================================

#[test]
fn test_config_show_defaults() {
    let drill = DrillTest::new();

    let output = drill.run_success(&["config", "show"]);
    assert!(output.contains("Configuration"));
    assert!(output.contains("http://localhost:5000"));
    assert!(output.contains("not configured"));
    assert!(output.contains("30s"));
    assert!(output.contains("75%"));
}

#[test]
fn test_config_path_honors_override() {
    let drill = DrillTest::new();

    let output = drill.run_success(&["config", "path"]);
    assert_eq!(output.trim(), drill.config_path().display().to_string());
}

#[test]
fn test_config_set_api_url_trims_trailing_slash() {
    let drill = DrillTest::new();

    drill.run_success(&["config", "set", "api_url", "https://exams.example.com/"]);
    let content = drill.read_config().expect("config file should be created");
    assert!(content.contains("https://exams.example.com"));
    assert!(!content.contains("example.com/"));

    let output = drill.run_success(&["config", "show"]);
    assert!(output.contains("https://exams.example.com"));
}

#[test]
fn test_config_set_token_is_masked() {
    let drill = DrillTest::new();

    let output = drill.run_success(&["config", "set", "auth.token", "tok_secret_value"]);
    assert!(!output.contains("tok_secret_value"));

    let output = drill.run_success(&["config", "show"]);
    assert!(!output.contains("tok_secret_value"));
    assert!(output.contains("to...ue"));

    let content = drill.read_config().unwrap();
    assert!(content.contains("token: tok_secret_value"));
}

#[cfg(unix)]
#[test]
fn test_config_file_is_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let drill = DrillTest::new();
    drill.run_success(&["config", "set", "auth.token", "tok_secret_value"]);

    let mode = std::fs::metadata(drill.config_path())
        .unwrap()
        .permissions()
        .mode();
    assert_eq!(mode & 0o777, 0o600);
}

#[test]
fn test_config_set_pass_mark_and_timeout() {
    let drill = DrillTest::new();

    drill.run_success(&["config", "set", "pass_mark", "80"]);
    drill.run_success(&["config", "set", "request_timeout", "5"]);

    let output = drill.run_success(&["config", "show"]);
    assert!(output.contains("80%"));
    assert!(output.contains("5s"));
}

#[test]
fn test_config_set_rejects_bad_values() {
    let drill = DrillTest::new();

    let stderr = drill.run_failure(&["config", "set", "pass_mark", "101"]);
    assert!(stderr.contains("Expected 0-100"));

    let stderr = drill.run_failure(&["config", "set", "request_timeout", "soon"]);
    assert!(stderr.contains("Expected seconds"));

    let stderr = drill.run_failure(&["config", "set", "api_url", "ftp://exams.example.com"]);
    assert!(stderr.contains("http or https"));

    assert!(drill.read_config().is_none());
}

#[test]
fn test_config_set_invalid_key() {
    let drill = DrillTest::new();

    let stderr = drill.run_failure(&["config", "set", "invalid.key", "value"]);
    assert!(stderr.contains("unknown config key"));
}

#[test]
fn test_config_rejects_underscore_token_key() {
    let drill = DrillTest::new();

    let stderr = drill.run_failure(&["config", "set", "auth_token", "value"]);
    assert!(stderr.contains("auth.token"));
}

#[test]
fn test_config_preserves_existing_values() {
    let drill = DrillTest::new();
    drill.write_config("api_url: https://exams.example.com\npass_mark: 70\n");

    drill.run_success(&["config", "set", "request_timeout", "10"]);

    let content = drill.read_config().unwrap();
    assert!(content.contains("https://exams.example.com"));
    assert!(content.contains("pass_mark: 70"));
    assert!(content.contains("request_timeout: 10"));
}

#[test]
fn test_config_show_rejects_malformed_file() {
    let drill = DrillTest::new();
    drill.write_config("api_url: [not, a, string\n");

    let stderr = drill.run_failure(&["config", "show"]);
    assert!(stderr.contains("YAML"));
}

// ============================================================================
// Practice without credentials
// ============================================================================

#[test]
fn test_practice_requires_token() {
    let drill = DrillTest::new();

    let stderr = drill.run_failure(&["practice", "acme-ACE"]);
    assert!(stderr.contains("no token configured"));
}
