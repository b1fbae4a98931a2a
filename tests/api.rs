//! End-to-end tests for the query endpoint.

use std::time::Duration;

use mta_hosting_optimizer::config::{EndpointConfig, InventorySource};
use serde_json::Value;

mod common;

const QUERY: &str = "/mta-hosting-optimizer";

async fn write_settings(dir: &tempfile::TempDir, body: &str) -> String {
    let path = dir.path().join(".env");
    tokio::fs::write(&path, body).await.unwrap();
    path.display().to_string()
}

#[tokio::test]
async fn test_threshold_from_settings_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = common::test_config("MTA_OPTIMIZER_IT_SETTINGS");
    config.threshold.env_file =
        Some(write_settings(&dir, "MTA_OPTIMIZER_IT_SETTINGS=1\n").await);
    let service = common::start_service(config).await;

    let res = common::client().get(service.url(QUERY)).send().await.unwrap();
    assert_eq!(res.status(), 200);
    assert!(res.headers().contains_key("x-request-id"));
    let names: Vec<String> = res.json().await.unwrap();
    assert_eq!(names, vec!["mta-prod-1", "mta-prod-3"]);
}

#[tokio::test]
async fn test_default_threshold_when_unset() {
    let mut config = common::test_config("MTA_OPTIMIZER_IT_DEFAULT");
    config.threshold.default = Some(2);
    let service = common::start_service(config).await;

    let names: Vec<String> = common::client()
        .get(service.url(QUERY))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(names, vec!["mta-prod-1", "mta-prod-2", "mta-prod-3"]);
}

#[tokio::test]
async fn test_invalid_threshold_returns_error_payload() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = common::test_config("MTA_OPTIMIZER_IT_INVALID");
    config.threshold.env_file =
        Some(write_settings(&dir, "MTA_OPTIMIZER_IT_INVALID=invalid\n").await);
    let service = common::start_service(config).await;

    let res = common::client().get(service.url(QUERY)).send().await.unwrap();
    assert_eq!(res.status(), 200);
    let json: Value = res.json().await.unwrap();
    assert!(json["result"].is_null());
    assert_eq!(json["status"], "Error");
    assert_eq!(json["error"]["kind"], "threshold_not_integer");
    assert!(json["error"]["message"].as_str().unwrap().contains("invalid"));
}

#[tokio::test]
async fn test_missing_threshold_without_default() {
    let mut config = common::test_config("MTA_OPTIMIZER_IT_MISSING");
    config.api.error_status = 503;
    let service = common::start_service(config).await;

    let res = common::client().get(service.url(QUERY)).send().await.unwrap();
    assert_eq!(res.status(), 503);
    let json: Value = res.json().await.unwrap();
    assert_eq!(json["error"]["kind"], "threshold_missing");
}

#[tokio::test]
async fn test_unreadable_settings_file_is_per_request_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = common::test_config("MTA_OPTIMIZER_IT_UNREADABLE");
    config.threshold.env_file = Some(dir.path().display().to_string());
    config.threshold.default = Some(1);
    let service = common::start_service(config).await;

    let json: Value = common::client()
        .get(service.url(QUERY))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(json["error"]["kind"], "configuration_load");

    // The service keeps answering other requests.
    let res = common::client().get(service.url("/healthz")).send().await.unwrap();
    assert_eq!(res.status(), 200);
}

#[tokio::test]
async fn test_post_is_rejected_without_result() {
    let mut config = common::test_config("MTA_OPTIMIZER_IT_POST");
    config.threshold.default = Some(2);
    let service = common::start_service(config).await;

    let res = common::client().post(service.url(QUERY)).send().await.unwrap();
    assert_eq!(res.status(), 405);
    assert!(res.text().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_inventory_from_config() {
    let mut config = common::test_config("MTA_OPTIMIZER_IT_INVENTORY");
    config.threshold.default = Some(0);
    config.inventory.source = InventorySource::Config;
    config.inventory.groups = vec!["mta-standby".into()];
    config.inventory.endpoints = vec![
        EndpointConfig {
            group: "mta-edge".into(),
            address: "10.0.0.1".into(),
            active: true,
        },
        EndpointConfig {
            group: "mta-drained".into(),
            address: "10.0.0.2".into(),
            active: false,
        },
    ];
    let service = common::start_service(config).await;

    let names: Vec<String> = common::client()
        .get(service.url(QUERY))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(names, vec!["mta-drained", "mta-standby"]);
}

#[tokio::test]
async fn test_settings_reload_changes_threshold() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = common::test_config("MTA_OPTIMIZER_IT_RELOAD");
    let path = write_settings(&dir, "MTA_OPTIMIZER_IT_RELOAD=0\n").await;
    config.threshold.env_file = Some(path.clone());
    config.threshold.watch = true;
    let service = common::start_service(config).await;
    let client = common::client();

    let names: Vec<String> = client.get(service.url(QUERY)).send().await.unwrap().json().await.unwrap();
    assert_eq!(names, vec!["mta-prod-3"]);

    tokio::fs::write(&path, "MTA_OPTIMIZER_IT_RELOAD=2\n").await.unwrap();

    let mut latest: Vec<String> = Vec::new();
    for _ in 0..50 {
        latest = client.get(service.url(QUERY)).send().await.unwrap().json().await.unwrap();
        if latest.len() == 3 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    assert_eq!(latest, vec!["mta-prod-1", "mta-prod-2", "mta-prod-3"]);
}

#[tokio::test]
async fn test_shutdown_stops_accepting() {
    let mut config = common::test_config("MTA_OPTIMIZER_IT_SHUTDOWN");
    config.threshold.default = Some(1);
    let service = common::start_service(config).await;
    let url = service.url("/healthz");

    service.shutdown.trigger();

    let mut refused = false;
    for _ in 0..50 {
        if common::client().get(&url).send().await.is_err() {
            refused = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert!(refused, "server should stop accepting after shutdown");
}
