// tests/cli_exit.rs
//
// Exit-code policy of the `x402-discover` binary:
// - 2 on configuration errors (before any network call)
// - 1 when the listing fails
// - 0 with the rendered listing on success
//
// Each run uses an empty temp dir as CWD so no `.env` or `config/` is picked up.

use std::process::Output;

use axum::{routing::get, Router};
use tokio::process::Command;

const BIN: &str = env!("CARGO_BIN_EXE_x402-discover");
const LISTING: &str = include_str!("fixtures/discovery_resources.json");

async fn run_cli(envs: &[(&str, &str)]) -> Output {
    let cwd = tempfile::tempdir().expect("temp cwd");
    let mut cmd = Command::new(BIN);
    cmd.current_dir(cwd.path())
        .env_remove("CDP_API_KEY_ID")
        .env_remove("CDP_API_KEY_SECRET")
        .env_remove("X402_FACILITATOR_CONFIG_PATH")
        .env_remove("X402_FACILITATOR_URL")
        .env_remove("X402_FACILITATOR_TIMEOUT_SECS")
        .env("RUST_LOG", "off");
    for (k, v) in envs {
        cmd.env(k, v);
    }
    cmd.output().await.expect("run x402-discover")
}

async fn closed_port_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/x402")
}

#[tokio::test]
async fn missing_credentials_exit_with_two() {
    let out = run_cli(&[]).await;

    assert_eq!(out.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Error: configuration error"), "{stderr}");
    assert!(stderr.contains("CDP_API_KEY_ID"), "{stderr}");
    assert!(out.stdout.is_empty(), "nothing rendered");
}

#[tokio::test]
async fn invalid_facilitator_url_exits_with_two() {
    let out = run_cli(&[
        ("CDP_API_KEY_ID", "kid"),
        ("CDP_API_KEY_SECRET", "secret"),
        ("X402_FACILITATOR_URL", "ftp://nowhere/x402"),
    ])
    .await;
    assert_eq!(out.status.code(), Some(2));
}

#[tokio::test]
async fn header_unsafe_secret_exits_with_two() {
    let url = closed_port_url().await;
    let out = run_cli(&[
        ("CDP_API_KEY_ID", "kid"),
        ("CDP_API_KEY_SECRET", "bad\u{7}secret"),
        ("X402_FACILITATOR_URL", url.as_str()),
    ])
    .await;

    assert_eq!(out.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("invalid header characters"), "{stderr}");
}

#[tokio::test]
async fn unreachable_facilitator_exits_with_one() {
    let url = closed_port_url().await;
    let out = run_cli(&[
        ("CDP_API_KEY_ID", "kid"),
        ("CDP_API_KEY_SECRET", "secret"),
        ("X402_FACILITATOR_URL", url.as_str()),
        ("X402_FACILITATOR_TIMEOUT_SECS", "2"),
    ])
    .await;

    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Error: "), "{stderr}");
    assert!(stderr.contains("transport error"), "{stderr}");
    assert!(out.stdout.is_empty(), "no partial listing");
}

#[tokio::test]
async fn successful_listing_exits_with_zero() {
    let app = Router::new().route(
        "/x402/discovery/resources",
        get(|| async { ([("content-type", "application/json")], LISTING) }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });

    let url = format!("http://{addr}/x402");
    let out = run_cli(&[
        ("CDP_API_KEY_ID", "kid"),
        ("CDP_API_KEY_SECRET", "secret"),
        ("X402_FACILITATOR_URL", url.as_str()),
    ])
    .await;

    assert_eq!(out.status.code(), Some(0), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.starts_with("\nDiscovered X402 Resources:\n========================\n"), "{stdout}");
    assert!(stdout.contains("Resource 3:"), "{stdout}");
}
