//! Integration tests for the `vidtube` CLI binary.
//!
//! Argument parsing, help output, completions and error exit codes run
//! without a backend; the rest point the binary at a wiremock server.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `vidtube` binary with env isolation.
///
/// Clears all `VIDTUBE_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn vidtube_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("vidtube");
    cmd.env("HOME", "/tmp/vidtube-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/vidtube-cli-test-nonexistent")
        .env_remove("VIDTUBE_PROFILE")
        .env_remove("VIDTUBE_API_URL")
        .env_remove("VIDTUBE_OUTPUT")
        .env_remove("VIDTUBE_INSECURE")
        .env_remove("VIDTUBE_TIMEOUT")
        .env_remove("VIDTUBE_PASSWORD")
        .env_remove("RUST_LOG");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

fn envelope(data: serde_json::Value) -> serde_json::Value {
    json!({ "statusCode": 200, "data": data, "message": "ok", "success": true })
}

/// Run the binary off the async runtime so the mock server keeps serving.
async fn run(args: Vec<String>) -> std::process::Output {
    tokio::task::spawn_blocking(move || vidtube_cmd().args(args).output().unwrap())
        .await
        .unwrap()
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = vidtube_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    vidtube_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("vidtube")
            .and(predicate::str::contains("videos"))
            .and(predicate::str::contains("playlists"))
            .and(predicate::str::contains("studio")),
    );
}

#[test]
fn test_version_flag() {
    vidtube_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("vidtube"));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    vidtube_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    vidtube_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_path_prints_location() {
    vidtube_cmd()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn test_invalid_subcommand() {
    let output = vidtube_cmd().arg("foobar").output().unwrap();
    assert!(!output.status.success());
    let text = combined_output(&output);
    assert!(
        text.contains("unrecognized") || text.contains("foobar"),
        "Expected error mentioning invalid subcommand:\n{text}"
    );
}

#[test]
fn test_invalid_api_url_is_usage_error() {
    let output = vidtube_cmd()
        .args(["--api-url", "not a url", "health"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("api-url"));
}

#[test]
fn test_unknown_profile_is_reported() {
    let output = vidtube_cmd()
        .args(["--profile", "nope", "health"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(combined_output(&output).contains("nope"));
}

#[test]
fn test_gated_command_without_credentials_asks_to_log_in() {
    let output = vidtube_cmd()
        .args(["--api-url", "http://127.0.0.1:9/api/v1", "tweets", "list"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3), "Expected auth exit code");
    assert!(combined_output(&output).contains("Please log in"));
}

#[test]
fn test_unreachable_backend_is_connection_error() {
    let output = vidtube_cmd()
        .args(["--api-url", "http://127.0.0.1:9/api/v1", "health"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(7));
}

// ── Against a mock backend ──────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_health_against_backend() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/healthcheck"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({}))))
        .expect(1)
        .mount(&server)
        .await;

    let output = run(vec![
        "--api-url".into(),
        format!("{}/api/v1", server.uri()),
        "health".into(),
    ])
    .await;
    assert!(output.status.success(), "{}", combined_output(&output));
    assert!(combined_output(&output).contains("is up"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_videos_list_plain_prints_ids() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/videos"))
        .and(query_param("page", "2"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "videos": [{ "_id": "v1", "title": "One" }, { "_id": "v2", "title": "Two" }]
        }))))
        .mount(&server)
        .await;

    let output = run(vec![
        "--api-url".into(),
        format!("{}/api/v1", server.uri()),
        "-o".into(),
        "plain".into(),
        "videos".into(),
        "list".into(),
        "--page".into(),
        "2".into(),
    ])
    .await;
    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "v1\nv2");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_anonymous_route_redirects_to_login() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/users/current-user"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "Unauthorized request" })),
        )
        .mount(&server)
        .await;

    let output = run(vec![
        "--api-url".into(),
        format!("{}/api/v1", server.uri()),
        "-o".into(),
        "plain".into(),
        "route".into(),
        "/profile".into(),
        "--anonymous".into(),
    ])
    .await;
    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "/login");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_missing_video_exits_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/users/current-user"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/videos/gone"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([]))))
        .mount(&server)
        .await;

    let output = run(vec![
        "--api-url".into(),
        format!("{}/api/v1", server.uri()),
        "videos".into(),
        "show".into(),
        "gone".into(),
    ])
    .await;
    assert_eq!(output.status.code(), Some(4), "{}", combined_output(&output));
}

#[test]
fn test_config_show_masks_plaintext_password() {
    let dir = tempfile::tempdir().unwrap();
    let config_dir = dir.path().join("vidtube");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(
        config_dir.join("config.toml"),
        r#"
default_profile = "local"

[profiles.local]
api_url = "http://localhost:8000/api/v1"
username = "ana"
password = "hunter2"
"#,
    )
    .unwrap();

    let output = vidtube_cmd()
        .env("XDG_CONFIG_HOME", dir.path())
        .args(["config", "show"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", combined_output(&output));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("ana"), "{stdout}");
    assert!(stdout.contains("********"), "{stdout}");
    assert!(!stdout.contains("hunter2"), "{stdout}");
}
