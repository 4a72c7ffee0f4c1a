//! Integration tests against an in-process fake backend.
//!
//! The fake speaks just enough of the backend contract to verify the
//! client's header, multipart field names, and error-body handling.

use axum::{
    extract::{Multipart, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use portal_api_client::{ClientError, PortalClient};
use portal_core::models::{EmailTemplate, UploadedFile};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
struct Captured {
    template: Arc<Mutex<Option<String>>>,
}

async fn preview_handler(headers: HeaderMap, mut multipart: Multipart) -> impl IntoResponse {
    if headers.get("x-api-key").and_then(|v| v.to_str().ok()) != Some("secret") {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"detail": "Invalid API Key"})),
        );
    }

    let mut file_name = None;
    let mut row_index = None;
    while let Some(field) = multipart.next_field().await.expect("read field") {
        match field.name() {
            Some("file") => {
                file_name = field.file_name().map(str::to_string);
                let _ = field.bytes().await.expect("file bytes");
            }
            Some("row_index") => row_index = Some(field.text().await.expect("row_index text")),
            _ => {}
        }
    }

    match file_name.as_deref() {
        Some("bad.csv") => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"detail": "parse error"})),
        ),
        Some("boom.csv") => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!("not an error object")),
        ),
        _ => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "chart": "aGk=",
                "content": "<html></html>",
                "metrics": {
                    "total": 5, "completed": 2, "pending": 2,
                    "past_due": 1, "completion_rate": 40.0
                },
                "row_index": row_index,
            })),
        ),
    }
}

async fn process_handler(
    State(captured): State<Captured>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    while let Some(field) = multipart.next_field().await.expect("read field") {
        if field.name() == Some("template") {
            let text = field.text().await.expect("template text");
            *captured.template.lock().expect("lock") = Some(text);
        } else {
            let _ = field.bytes().await.expect("field bytes");
        }
    }
    Json(json!({
        "success": true,
        "message": "CSV processed",
        "filename": "team.csv",
        "timestamp": "2026-01-05T10:00:00",
        "processed_rows": 9,
        "email_success": 8,
        "email_failure": 1,
    }))
}

async fn spawn_backend(captured: Captured) -> SocketAddr {
    let app = Router::new()
        .route("/api/preview-email", post(preview_handler))
        .route("/api/process-emails", post(process_handler))
        .with_state(captured);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    addr
}

fn csv_file(name: &str) -> UploadedFile {
    UploadedFile::new(name, Some("text/csv".to_string()), b"a,b\n1,2\n".to_vec())
}

#[tokio::test]
async fn preview_attaches_api_key_and_multipart_file() {
    let addr = spawn_backend(Captured::default()).await;
    let client = PortalClient::new(format!("http://{}", addr), "secret").expect("client");

    let response = client
        .preview(&csv_file("team.csv"), Some(3))
        .await
        .expect("preview");
    assert!(response.success);
    assert_eq!(response.metrics.total, 5);
    assert_eq!(response.chart, "aGk=");
}

#[tokio::test]
async fn preview_rejected_without_valid_key() {
    let addr = spawn_backend(Captured::default()).await;
    let client = PortalClient::new(format!("http://{}", addr), "wrong").expect("client");

    let err = client
        .preview(&csv_file("team.csv"), None)
        .await
        .expect_err("should fail");
    match err {
        ClientError::RequestFailed { status, detail } => {
            assert_eq!(status, 401);
            assert_eq!(detail, "Invalid API Key");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn preview_surfaces_backend_detail() {
    let addr = spawn_backend(Captured::default()).await;
    let client = PortalClient::new(format!("http://{}", addr), "secret").expect("client");

    let err = client
        .preview(&csv_file("bad.csv"), None)
        .await
        .expect_err("should fail");
    match err {
        ClientError::RequestFailed { status, detail } => {
            assert_eq!(status, 500);
            assert_eq!(detail, "parse error");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn preview_falls_back_when_error_body_is_not_structured() {
    let addr = spawn_backend(Captured::default()).await;
    let client = PortalClient::new(format!("http://{}", addr), "secret").expect("client");

    let err = client
        .preview(&csv_file("boom.csv"), None)
        .await
        .expect_err("should fail");
    match err {
        ClientError::RequestFailed { detail, .. } => {
            assert_eq!(detail, "Failed to generate preview");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn process_serializes_template_into_form_field() {
    let captured = Captured::default();
    let addr = spawn_backend(captured.clone()).await;
    let client = PortalClient::new(format!("http://{}", addr), "secret").expect("client");

    let mut template = EmailTemplate::default();
    template.subject = "Weekly update".to_string();
    let response = client
        .process(&csv_file("team.csv"), &template, true)
        .await
        .expect("process");
    assert_eq!(response.processed_rows, 9);
    assert_eq!(response.email_success, Some(8));

    let sent = captured
        .template
        .lock()
        .expect("lock")
        .clone()
        .expect("template field captured");
    let value: serde_json::Value = serde_json::from_str(&sent).expect("template is JSON");
    assert_eq!(
        value.get("subject").and_then(|v| v.as_str()),
        Some("Weekly update")
    );
    assert_eq!(
        value.get("sendTestCopy").and_then(|v| v.as_bool()),
        Some(true)
    );
}
