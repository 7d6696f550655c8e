//! Upload pipeline integration tests.
//!
//! Run with: `cargo test -p ifshare-api --test files_test`

mod helpers;

use axum_test::multipart::{MultipartForm, Part};
use helpers::storage::{FailingStorage, FailingUploadStore};
use helpers::{api_path, setup_test_app, test_cipher, TestAppBuilder, PUBLIC_BASE_URL};
use ifshare_core::{extract_archive, is_public_id};
use ifshare_db::UploadRecordStore;
use ifshare_storage::Storage;
use serde_json::Value;
use std::sync::Arc;

fn text_part(name: &str, data: Vec<u8>) -> Part {
    Part::bytes(bytes::Bytes::from(data))
        .file_name(name.to_string())
        .mime_type("text/plain")
}

#[tokio::test]
async fn test_upload_single_file() {
    let app = setup_test_app().await;
    let client = app.client();

    let form = MultipartForm::new().add_part("file", text_part("a.txt", vec![b'x'; 1024]));
    let response = client.post(&api_path("/files")).multipart(form).await;

    assert_eq!(response.status_code(), 201);
    let body: Value = response.json();
    let id = body["id"].as_str().expect("id");
    assert!(is_public_id(id));
    assert_eq!(body["url"], format!("{}/file/{}", PUBLIC_BASE_URL, id));
    assert_eq!(body["file_name"], "a.txt");
    assert_eq!(body["file_type"], "text/plain");
    assert_eq!(body["file_size"], 1024);
    assert_eq!(body["metadata_recorded"], true);
    assert!(body["qr_code"]
        .as_str()
        .unwrap()
        .starts_with("data:image/png;base64,"));

    let key = body["storage_key"].as_str().unwrap();
    let (prefix, name) = key.split_once('_').unwrap();
    assert!(prefix.starts_with("public/"));
    assert!(prefix["public/".len()..].chars().all(|c| c.is_ascii_digit()));
    assert_eq!(name, "a.txt");
    assert_eq!(
        body["file_path"],
        format!("/storage/v1/object/public/uploads/{}", key)
    );

    let record = app.records.get(id).await.unwrap().expect("record stored");
    assert_eq!(record.file_name, "a.txt");
    assert_eq!(record.file_type, "text/plain");
    assert_eq!(record.file_size, 1024);

    // Stored bytes are sealed
    let sealed = app.storage.download(key).await.unwrap();
    assert_ne!(sealed, vec![b'x'; 1024]);
    assert_eq!(test_cipher().decrypt(&sealed).unwrap(), vec![b'x'; 1024]);
}

#[tokio::test]
async fn test_upload_zero_byte_file() {
    let app = setup_test_app().await;
    let client = app.client();

    let form = MultipartForm::new().add_part("file", text_part("empty.txt", Vec::new()));
    let response = client.post(&api_path("/files")).multipart(form).await;

    assert_eq!(response.status_code(), 201);
    let body: Value = response.json();
    assert!(is_public_id(body["id"].as_str().unwrap()));
    assert_eq!(body["file_name"], "empty.txt");
    assert_eq!(body["file_size"], 0);

    let sealed = app
        .storage
        .download(body["storage_key"].as_str().unwrap())
        .await
        .unwrap();
    assert!(test_cipher().decrypt(&sealed).unwrap().is_empty());
}

#[tokio::test]
async fn test_upload_several_files_stores_one_archive() {
    let app = setup_test_app().await;
    let client = app.client();

    let form = MultipartForm::new()
        .add_part("file", text_part("a.txt", b"first file".to_vec()))
        .add_part("file", text_part("b.txt", b"second file".to_vec()));
    let response = client.post(&api_path("/files")).multipart(form).await;

    assert_eq!(response.status_code(), 201);
    let body: Value = response.json();
    assert_eq!(body["file_name"], "files.zip");
    assert_eq!(body["file_type"], "application/zip");
    let key = body["storage_key"].as_str().unwrap();
    assert!(key.ends_with("_files.zip"));

    let sealed = app.storage.download(key).await.unwrap();
    let archive = test_cipher().decrypt(&sealed).unwrap();
    assert_eq!(body["file_size"], archive.len() as u64);

    let entries = extract_archive(&archive).unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].name, "a.txt");
    assert_eq!(entries[0].bytes, b"first file");
    assert_eq!(entries[1].name, "b.txt");
    assert_eq!(entries[1].bytes, b"second file");
}

#[tokio::test]
async fn test_oversized_file_is_dropped_from_batch() {
    let app = TestAppBuilder::default()
        .max_upload_size_bytes(16)
        .build()
        .await;
    let client = app.client();

    let form = MultipartForm::new()
        .add_part("file", text_part("big.txt", vec![b'x'; 64]))
        .add_part("file", text_part("small.txt", b"tiny".to_vec()));
    let response = client.post(&api_path("/files")).multipart(form).await;

    assert_eq!(response.status_code(), 201);
    let body: Value = response.json();
    assert_eq!(body["file_name"], "small.txt");
    assert_eq!(body["file_size"], 4);
}

#[tokio::test]
async fn test_batch_of_only_oversized_files_is_rejected() {
    let app = TestAppBuilder::default()
        .max_upload_size_bytes(16)
        .build()
        .await;

    let form = MultipartForm::new().add_part("file", text_part("big.txt", vec![b'x'; 64]));
    let response = app.client().post(&api_path("/files")).multipart(form).await;

    assert_eq!(response.status_code(), 413);
    let body: Value = response.json();
    assert_eq!(body["code"], "PAYLOAD_TOO_LARGE");
}

#[tokio::test]
async fn test_upload_without_files_is_rejected() {
    let app = setup_test_app().await;

    let form = MultipartForm::new().add_text("note", "no files here");
    let response = app.client().post(&api_path("/files")).multipart(form).await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_too_many_files_is_rejected() {
    let app = TestAppBuilder::default().max_files_per_batch(1).build().await;

    let form = MultipartForm::new()
        .add_part("file", text_part("a.txt", b"a".to_vec()))
        .add_part("file", text_part("b.txt", b"b".to_vec()));
    let response = app.client().post(&api_path("/files")).multipart(form).await;

    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn test_storage_failure_aborts_without_metadata() {
    let app = TestAppBuilder::default()
        .storage(Arc::new(FailingStorage))
        .build()
        .await;

    let form = MultipartForm::new().add_part("file", text_part("a.txt", b"hello".to_vec()));
    let response = app.client().post(&api_path("/files")).multipart(form).await;

    assert_eq!(response.status_code(), 500);
    let body: Value = response.json();
    assert_eq!(body["code"], "STORAGE_ERROR");
    assert!(body.get("details").is_none());
}

#[tokio::test]
async fn test_metadata_failure_still_returns_link() {
    let app = TestAppBuilder::default()
        .records(Arc::new(FailingUploadStore))
        .build()
        .await;

    let form = MultipartForm::new().add_part("file", text_part("a.txt", b"hello".to_vec()));
    let response = app.client().post(&api_path("/files")).multipart(form).await;

    assert_eq!(response.status_code(), 201);
    let body: Value = response.json();
    assert_eq!(body["metadata_recorded"], false);
    assert!(body["url"].as_str().unwrap().starts_with(PUBLIC_BASE_URL));

    // The object itself was stored
    let key = body["storage_key"].as_str().unwrap();
    assert!(app.storage.exists(key).await.unwrap());
}

#[tokio::test]
async fn test_get_and_download_upload() {
    let app = setup_test_app().await;
    let client = app.client();

    let form = MultipartForm::new().add_part("file", text_part("hello.txt", b"hello world".to_vec()));
    let uploaded: Value = client.post(&api_path("/files")).multipart(form).await.json();
    let id = uploaded["id"].as_str().unwrap();

    let response = client.get(&api_path(&format!("/files/{}", id))).await;
    assert_eq!(response.status_code(), 200);
    let record: Value = response.json();
    assert_eq!(record["id"], id);
    assert_eq!(record["file_name"], "hello.txt");
    assert_eq!(record["url"], uploaded["url"]);

    let response = client
        .get(&api_path(&format!("/files/{}/content", id)))
        .await;
    assert_eq!(response.status_code(), 200);
    assert_eq!(response.header("content-type"), "text/plain");
    assert_eq!(
        response.header("content-disposition"),
        "attachment; filename=\"hello.txt\""
    );
    assert_eq!(response.as_bytes().to_vec(), b"hello world".to_vec());
}

#[tokio::test]
async fn test_unknown_upload_is_not_found() {
    let app = setup_test_app().await;

    let response = app.client().get(&api_path("/files/zzzzzz")).await;
    assert_eq!(response.status_code(), 404);

    let response = app.client().get(&api_path("/files/zzzzzz/content")).await;
    assert_eq!(response.status_code(), 404);
}
