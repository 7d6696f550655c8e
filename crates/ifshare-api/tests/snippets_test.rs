//! Code and notes documents, share links and health checks.

mod helpers;

use helpers::{api_path, setup_test_app, PUBLIC_BASE_URL};
use serde_json::{json, Value};

#[tokio::test]
async fn test_save_and_get_code() {
    let app = setup_test_app().await;
    let client = app.client();

    let response = client
        .post(&api_path("/code"))
        .json(&json!({ "id": "abc123", "value": "fn main() {}", "language": "rust" }))
        .await;
    assert_eq!(response.status_code(), 200);
    let saved: Value = response.json();
    assert_eq!(saved["lock"], false);

    // Omitted language keeps the stored one
    client
        .post(&api_path("/code"))
        .json(&json!({ "id": "abc123", "value": "fn main() { todo!() }" }))
        .await;

    let code: Value = client
        .get(&api_path("/code"))
        .add_query_param("id", "abc123")
        .await
        .json();
    assert_eq!(code["value"], "fn main() { todo!() }");
    assert_eq!(code["language"], "rust");
}

#[tokio::test]
async fn test_missing_documents_are_null() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .get(&api_path("/code"))
        .add_query_param("id", "nothing")
        .await;
    assert_eq!(response.status_code(), 200);
    assert_eq!(response.json::<Value>(), Value::Null);

    let response = app
        .client()
        .get(&api_path("/notes"))
        .add_query_param("id", "nothing")
        .await;
    assert_eq!(response.status_code(), 200);
    assert_eq!(response.json::<Value>(), Value::Null);
}

#[tokio::test]
async fn test_save_and_get_note() {
    let app = setup_test_app().await;
    let client = app.client();

    client
        .post(&api_path("/notes"))
        .json(&json!({ "id": "n1", "value": "<p>draft</p>" }))
        .await;
    client
        .post(&api_path("/notes"))
        .json(&json!({ "id": "n1", "value": "<p>final</p>" }))
        .await;

    let note: Value = client
        .get(&api_path("/notes"))
        .add_query_param("id", "n1")
        .await
        .json();
    assert_eq!(note["value"], "<p>final</p>");
}

#[tokio::test]
async fn test_locked_code_rejects_saves() {
    let app = setup_test_app().await;
    let client = app.client();

    client
        .post(&api_path("/code"))
        .json(&json!({ "id": "abc123", "value": "print(1)" }))
        .await;
    app.snippets.lock_code("abc123");

    let response = client
        .post(&api_path("/code"))
        .json(&json!({ "id": "abc123", "value": "print(2)" }))
        .await;
    assert_eq!(response.status_code(), 409);
    let body: Value = response.json();
    assert_eq!(body["code"], "CONFLICT");
}

#[tokio::test]
async fn test_empty_snippet_id_is_rejected() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post(&api_path("/notes"))
        .json(&json!({ "id": "", "value": "x" }))
        .await;
    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn test_share_link_for_each_kind() {
    let app = setup_test_app().await;

    for kind in ["file", "code", "notes"] {
        let response = app
            .client()
            .get(&api_path(&format!("/share/{}/Ab12Cd", kind)))
            .await;
        assert_eq!(response.status_code(), 200);
        let link: Value = response.json();
        assert_eq!(link["url"], format!("{}/{}/Ab12Cd", PUBLIC_BASE_URL, kind));
        assert!(link["qr_code"]
            .as_str()
            .unwrap()
            .starts_with("data:image/png;base64,"));
    }

    let response = app.client().get(&api_path("/share/video/Ab12Cd")).await;
    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn test_liveness_and_openapi() {
    let app = setup_test_app().await;

    let response = app.client().get("/health/live").await;
    assert_eq!(response.status_code(), 200);
    assert_eq!(response.json::<Value>(), json!({ "status": "alive" }));

    let response = app.client().get("/api/openapi.json").await;
    assert_eq!(response.status_code(), 200);
    let spec: Value = response.json();
    assert!(spec["paths"]["/api/files"].is_object());
}
