use std::fs;

use clap::Parser;
use tempfile::tempdir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::registration_body;
use crate::config::{load_env_file, Cli};
use crate::error::{Error, Stage};
use crate::state::FileStateStore;
use crate::{report, run};

fn cli(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("fastddns").chain(args.iter().copied())).unwrap()
}

fn no_env(_: &str) -> Option<String> {
    None
}

#[tokio::test]
async fn test_missing_base_url_exits_1() {
    let dir = tempdir().unwrap();
    let state_path = dir.path().join("data.json");

    let result = run(&cli(&[]), no_env, FileStateStore::new(&state_path)).await;
    let (code, message) = report(&result);

    assert_eq!(code, 1);
    assert!(message.starts_with("Error: "));
    assert!(message.contains("baseUrl"));
    assert!(!state_path.exists());
}

#[tokio::test]
async fn test_registration_reports_success() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();
    let state_path = dir.path().join("data.json");

    Mock::given(method("GET"))
        .and(path("/fast/ip2a"))
        .respond_with(ResponseTemplate::new(200).set_body_json(registration_body("abc123")))
        .expect(1)
        .mount(&server)
        .await;

    let base_url = format!("--baseUrl={}", server.uri());
    let result = run(&cli(&[base_url.as_str()]), no_env, FileStateStore::new(&state_path)).await;
    let (code, message) = report(&result);

    assert_eq!(code, 0);
    assert_eq!(
        message,
        "Initialization complete, record information saved (home)"
    );
    assert!(state_path.exists());
}

#[tokio::test]
async fn test_registration_failure_is_labelled() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/fast/ip2a"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let base_url = server.uri();
    let result = run(
        &cli(&[]),
        |key: &str| (key == "BASE_URL").then(|| base_url.clone()),
        FileStateStore::new(dir.path().join("data.json")),
    )
    .await;
    let (code, message) = report(&result);

    assert_eq!(code, 1);
    assert!(message.starts_with("Error: Initialization failed"));
    assert!(message.contains("500"));
}

#[tokio::test]
async fn test_update_reports_success() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();
    let state_path = dir.path().join("data.json");
    fs::write(&state_path, registration_body("abc123").to_string()).unwrap();

    Mock::given(method("GET"))
        .and(path("/fast/updateRecord"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let base_url = format!("--baseUrl={}", server.uri());
    let result = run(&cli(&[base_url.as_str()]), no_env, FileStateStore::new(&state_path)).await;

    assert_eq!(report(&result), (0, "Record updated successfully".to_string()));
}

#[tokio::test]
async fn test_update_failure_is_labelled() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();
    let state_path = dir.path().join("data.json");
    fs::write(&state_path, registration_body("abc123").to_string()).unwrap();

    Mock::given(method("GET"))
        .and(path("/fast/updateRecord"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let base_url = format!("--baseUrl={}", server.uri());
    let result = run(&cli(&[base_url.as_str()]), no_env, FileStateStore::new(&state_path)).await;
    let (code, message) = report(&result);

    assert_eq!(code, 1);
    assert!(message.starts_with("Error: Update failed"));
    assert!(message.contains("404"));
}

#[tokio::test]
async fn test_malformed_state_is_labelled_update() {
    let dir = tempdir().unwrap();
    let state_path = dir.path().join("data.json");
    fs::write(&state_path, "{").unwrap();

    let result = run(
        &cli(&["--baseUrl", "http://127.0.0.1:1"]),
        no_env,
        FileStateStore::new(&state_path),
    )
    .await;
    let (code, message) = report(&result);

    assert_eq!(code, 1);
    assert!(message.starts_with("Error: Update failed"));
}

#[test]
fn test_client_build_error_has_no_stage() {
    let err = Error::HttpClient {
        reason: "tls backend unavailable".to_string(),
    };

    assert_eq!(err.stage(), None);
    assert!(!err.to_string().contains("registration"));
    assert_eq!(
        Error::StateWrite {
            path: "data.json".into(),
            source: std::io::Error::other("disk full"),
        }
        .stage(),
        Some(Stage::Register)
    );
}

#[test]
fn test_env_file_fills_unset_variables_only() {
    let dir = tempdir().unwrap();
    let env_path = dir.path().join(".env");
    fs::write(
        &env_path,
        "FASTDDNS_ENV_FILE_FRESH=from-file\nFASTDDNS_ENV_FILE_PRESET=from-file\n",
    )
    .unwrap();
    std::env::set_var("FASTDDNS_ENV_FILE_PRESET", "from-shell");

    assert!(load_env_file(&env_path));
    assert_eq!(std::env::var("FASTDDNS_ENV_FILE_FRESH").unwrap(), "from-file");
    assert_eq!(std::env::var("FASTDDNS_ENV_FILE_PRESET").unwrap(), "from-shell");
}

#[test]
fn test_missing_env_file_is_ignored() {
    let dir = tempdir().unwrap();

    assert!(!load_env_file(dir.path().join(".env")));
}
