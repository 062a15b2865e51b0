//! Shared helpers for the router-level integration tests.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use tempfile::TempDir;
use tower::ServiceExt;
use user_management_api::api::create_router;
use user_management_api::{create_app_context, AppConfig};

pub const BOUNDARY: &str = "integration-boundary";

/// Router backed by the in-memory store, uploading into a temporary directory
pub struct TestApp {
    pub router: Router,
    pub upload_dir: TempDir,
}

impl TestApp {
    pub fn images_dir(&self) -> std::path::PathBuf {
        self.upload_dir.path().join("images")
    }

    /// Send a request and return the status plus the body parsed as JSON (or `Null`).
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let (status, body) = self.send_raw(request).await;
        let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    pub async fn send_raw(&self, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, body.to_vec())
    }

    pub async fn create_user(&self, full_name: &str, email: &str, password: &str) {
        let (status, body) = self
            .send(json_request(
                "POST",
                "/user/create",
                serde_json::json!({ "fullName": full_name, "email": email, "password": password }),
            ))
            .await;
        assert_eq!(status, StatusCode::CREATED, "unexpected body: {body}");
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(|_| {}).await
}

pub async fn spawn_app_with(configure: impl FnOnce(&mut AppConfig)) -> TestApp {
    let upload_dir = tempfile::tempdir().unwrap();

    let mut config = AppConfig::default();
    config.uploads.directory = upload_dir
        .path()
        .join("images")
        .to_string_lossy()
        .into_owned();
    configure(&mut config);

    let context = create_app_context(&config).await.unwrap();
    let router = create_router(context.state.clone(), &config);

    TestApp { router, upload_dir }
}

pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

/// A multipart part: field name, optional (file name, content type), content
pub struct Part<'a> {
    pub name: &'a str,
    pub file: Option<(&'a str, &'a str)>,
    pub content: &'a [u8],
}

pub fn file_part<'a>(name: &'a str, file_name: &'a str, content_type: &'a str, content: &'a [u8]) -> Part<'a> {
    Part {
        name,
        file: Some((file_name, content_type)),
        content,
    }
}

pub fn text_part<'a>(name: &'a str, value: &'a str) -> Part<'a> {
    Part {
        name,
        file: None,
        content: value.as_bytes(),
    }
}

pub fn multipart_request(uri: &str, parts: &[Part<'_>]) -> Request<Body> {
    let mut body = Vec::new();

    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part.file {
            Some((file_name, content_type)) => body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                    part.name, file_name, content_type
                )
                .as_bytes(),
            ),
            None => body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", part.name).as_bytes(),
            ),
        }
        body.extend_from_slice(part.content);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", format!("multipart/form-data; boundary={BOUNDARY}"))
        .body(Body::from(body))
        .unwrap()
}
