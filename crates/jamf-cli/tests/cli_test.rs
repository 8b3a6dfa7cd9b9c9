//! Integration tests for the `jamf` CLI binary.
//!
//! Parsing, help, completions and config handling run without a server.
//! End-to-end tests point `--url` at a wiremock server.
#![allow(clippy::unwrap_used)]

use std::path::Path;
use std::process::Output;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{basic_auth, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `jamf` binary with env isolation.
///
/// Clears all `JAMF_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn jamf_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("jamf");
    cmd.env("HOME", "/tmp/jamf-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/jamf-cli-test-nonexistent")
        .env_remove("RUST_LOG");
    for var in [
        "JAMF_PROFILE",
        "JAMF_CONFIG",
        "JAMF_URL",
        "JAMF_USERNAME",
        "JAMF_PASSWORD",
        "JAMF_OUTPUT",
        "JAMF_INSECURE",
        "JAMF_TIMEOUT",
        "JAMF_DEFAULT_PROFILE",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

/// `jamf_cmd` aimed at `url` with throwaway credentials.
fn jamf_at(url: &str) -> assert_cmd::Command {
    let mut cmd = jamf_cmd();
    cmd.args(["--url", url, "--username", "api-reader", "--password", "hunter2"]);
    cmd
}

/// Run off the async worker so the mock server keeps serving.
async fn run(mut cmd: assert_cmd::Command) -> Output {
    tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap()
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

fn write_config(dir: &Path, contents: &str) -> String {
    let path = dir.join("config.toml");
    std::fs::write(&path, contents).unwrap();
    path.display().to_string()
}

const CONFIG: &str = r#"
default_profile = "prod"

[profiles.prod]
url = "https://example.jamfcloud.com"
username = "api-reader"
password = "plaintext-secret"
"#;

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = jamf_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    jamf_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("Jamf Pro")
            .and(predicate::str::contains("computers"))
            .and(predicate::str::contains("accounts"))
            .and(predicate::str::contains("extension-attributes"))
            .and(predicate::str::contains("policies")),
    );
}

#[test]
fn test_version_flag() {
    jamf_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("jamf"));
}

#[test]
fn test_computers_subcommands_exist() {
    jamf_cmd()
        .args(["computers", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("list")
                .and(predicate::str::contains("get"))
                .and(predicate::str::contains("hardware")),
        );
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    jamf_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    jamf_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

// ── Configuration ───────────────────────────────────────────────────

#[test]
fn test_computers_list_without_server() {
    let output = jamf_cmd().args(["computers", "list"]).output().unwrap();
    assert_eq!(output.status.code(), Some(8), "{}", combined_output(&output));
    assert!(
        combined_output(&output).contains("No Jamf Pro server configured"),
        "{}",
        combined_output(&output)
    );
}

#[test]
fn test_unknown_profile() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), CONFIG);

    let output = jamf_cmd()
        .args(["--config", &config, "--profile", "staging", "policies", "list"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(8));
    let text = combined_output(&output);
    assert!(text.contains("Profile 'staging' not found"), "{text}");
    assert!(text.contains("prod"), "{text}");
}

#[test]
fn test_config_path_honors_flag() {
    jamf_cmd()
        .args(["--config", "/etc/jamf/custom.toml", "config", "path"])
        .assert()
        .success()
        .stdout("/etc/jamf/custom.toml\n");
}

#[test]
fn test_config_show_masks_passwords() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), CONFIG);

    jamf_cmd()
        .args(["--config", &config, "config", "show"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("example.jamfcloud.com")
                .and(predicate::str::contains("********"))
                .and(predicate::str::contains("plaintext-secret").not()),
        );
}

#[test]
fn test_invalid_output_format() {
    let output = jamf_cmd()
        .args(["--output", "invalid", "computers", "list"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(
        text.contains("invalid") || text.contains("possible values"),
        "Expected error about valid output formats:\n{text}"
    );
}

#[test]
fn test_invalid_config_output_default() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), &format!("{CONFIG}\n[defaults]\noutput = \"xml\"\n"));

    let output = jamf_cmd()
        .args(["--config", &config, "computers", "list"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2), "{}", combined_output(&output));
    assert!(combined_output(&output).contains("defaults.output"));
}

#[test]
fn test_invalid_url_is_a_usage_error() {
    let output = jamf_at("ftp://jss.example.com")
        .args(["computers", "list"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2), "{}", combined_output(&output));
}

// ── Create payload validation (no request is sent) ──────────────────

#[test]
fn test_create_policy_rejects_malformed_json() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("policy.json");
    std::fs::write(&file, "{ not json").unwrap();

    let output = jamf_at("http://127.0.0.1:9")
        .args(["policies", "create", "--file"])
        .arg(&file)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2), "{}", combined_output(&output));
    assert!(combined_output(&output).contains("invalid JSON"));
}

#[test]
fn test_create_policy_requires_name() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("policy.json");
    std::fs::write(&file, r#"{"general": {"enabled": true}}"#).unwrap();

    let output = jamf_at("http://127.0.0.1:9")
        .args(["policies", "create", "--file"])
        .arg(&file)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2), "{}", combined_output(&output));
    assert!(combined_output(&output).contains("general.name"));
}

// ── End to end ──────────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_computers_list_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/JSSResource/computers"))
        .and(basic_auth("api-reader", "hunter2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "computers": [
                {"id": 1, "name": "Lab iMac"},
                {"id": 2, "name": "Front Desk"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut cmd = jamf_at(&server.uri());
    cmd.args(["-o", "json-compact", "computers", "list"]);
    let output = run(cmd).await;

    assert!(output.status.success(), "{}", combined_output(&output));
    let listed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        listed,
        json!([{"id": 1, "name": "Lab iMac"}, {"id": 2, "name": "Front Desk"}])
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_plain_output_from_config_profile() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/JSSResource/policies"))
        .and(basic_auth("api-reader", "plaintext-secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "policies": [{"id": 7, "name": "Install Rosetta"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config = write_config(
        dir.path(),
        &CONFIG.replace("https://example.jamfcloud.com", &server.uri()),
    );

    let mut cmd = jamf_cmd();
    cmd.args(["--config", &config, "-o", "plain", "policies", "list"]);
    let output = run(cmd).await;

    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(String::from_utf8_lossy(&output.stdout), "7\n");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_output_falls_back_to_config_default() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/JSSResource/policies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "policies": [{"id": 7, "name": "Install Rosetta"}]
        })))
        .expect(2)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config = write_config(
        dir.path(),
        &format!(
            "{}\n[defaults]\noutput = \"plain\"\n",
            CONFIG.replace("https://example.jamfcloud.com", &server.uri())
        ),
    );

    let mut cmd = jamf_cmd();
    cmd.args(["--config", &config, "policies", "list"]);
    let output = run(cmd).await;

    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(String::from_utf8_lossy(&output.stdout), "7\n");

    // An explicit flag still wins over the config default.
    let mut cmd = jamf_cmd();
    cmd.args(["--config", &config, "-o", "json-compact", "policies", "list"]);
    let output = run(cmd).await;

    assert!(output.status.success(), "{}", combined_output(&output));
    let listed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(listed, json!([{"id": 7, "name": "Install Rosetta"}]));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_missing_computer_exits_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/JSSResource/computers/id/999"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(&server)
        .await;

    let mut cmd = jamf_at(&server.uri());
    cmd.args(["computers", "get", "999"]);
    let output = run(cmd).await;

    assert_eq!(output.status.code(), Some(4), "{}", combined_output(&output));
    let text = combined_output(&output);
    assert!(text.contains("computer '999' not found"), "{text}");
    assert!(text.contains("jamf computers list"), "{text}");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_rejected_credentials_exit_auth() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/JSSResource/accounts"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&server)
        .await;

    let mut cmd = jamf_at(&server.uri());
    cmd.args(["accounts", "list"]);
    let output = run(cmd).await;

    assert_eq!(output.status.code(), Some(3), "{}", combined_output(&output));
    assert!(combined_output(&output).contains("Authentication failed (HTTP 401)"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_create_extension_attribute() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/JSSResource/computerextensionattributes/id/-1"))
        .respond_with(
            ResponseTemplate::new(201)
                .insert_header("content-type", "text/xml")
                .set_body_string(
                    "<computer_extension_attribute><id>12</id></computer_extension_attribute>",
                ),
        )
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("ea.json");
    std::fs::write(
        &file,
        r#"{
            "name": "Battery Cycle Count",
            "enabled": true,
            "data_type": "Integer",
            "input_type": {"type": "script", "platform": "Mac", "script": "echo 1"}
        }"#,
    )
    .unwrap();

    let mut cmd = jamf_at(&server.uri());
    cmd.args(["-o", "plain", "extension-attributes", "create", "--file"])
        .arg(&file);
    let output = run(cmd).await;

    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(String::from_utf8_lossy(&output.stdout), "12\n");
}

#[test]
fn test_unreachable_server_exits_connection() {
    let output = jamf_at("http://127.0.0.1:1")
        .args(["--timeout", "5", "computers", "list"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(7), "{}", combined_output(&output));
    assert!(combined_output(&output).contains("Could not reach Jamf Pro"));
}
