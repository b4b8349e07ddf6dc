use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use pagesnap::config::Config;
use pagesnap::AppState;

fn test_app(folder: &str) -> Router {
    let config = Config {
        folder: folder.to_string(),
        ..Config::default()
    };
    pagesnap::app(Arc::new(AppState::new(config)))
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap();
    (status, body)
}

#[tokio::test]
async fn missing_url_is_reported_without_touching_disk() {
    let tmp = tempfile::tempdir().unwrap();
    let folder = tmp.path().join("shots");
    let app = test_app(folder.to_str().unwrap());

    let (status, body) = get_json(app, "/screenshot").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"], Value::Bool(false));
    assert!(!body["msg"].as_str().unwrap().is_empty());
    assert!(!folder.exists());
}

#[tokio::test]
async fn empty_url_is_treated_as_missing() {
    let tmp = tempfile::tempdir().unwrap();
    let folder = tmp.path().join("shots");
    let app = test_app(folder.to_str().unwrap());

    let (status, body) = get_json(app, "/screenshot?url=").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"], Value::Bool(false));
    assert!(!body["msg"].as_str().unwrap().is_empty());
    assert!(!folder.exists());
}

#[tokio::test]
async fn unknown_mode_is_rejected_before_any_capture() {
    let tmp = tempfile::tempdir().unwrap();
    let folder = tmp.path().join("shots");
    let app = test_app(folder.to_str().unwrap());

    let (status, body) =
        get_json(app, "/screenshot?url=https://example.com&mode=tablet").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"], Value::Bool(false));
    assert!(body["msg"].as_str().unwrap().contains("mode"));
    assert!(!folder.exists());
}

#[tokio::test]
async fn saved_images_are_served_from_the_static_mount() {
    let tmp = tempfile::tempdir().unwrap();
    let folder = tmp.path().join("shots");
    let date_dir = folder.join("2026").join("08").join("30");
    std::fs::create_dir_all(&date_dir).unwrap();
    std::fs::write(date_dir.join("1234.png"), b"png-bytes").unwrap();

    let folder_str = folder.to_str().unwrap();
    let app = test_app(folder_str);

    let uri = format!("/{}/2026/08/30/1234.png", folder_str.trim_matches('/'));
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"png-bytes");
}

#[tokio::test]
async fn unrelated_paths_are_not_claimed_by_the_service() {
    let tmp = tempfile::tempdir().unwrap();
    let folder = tmp.path().join("shots");
    let app = test_app(folder.to_str().unwrap());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/nope")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
