//! Integration tests for `POST /user/uploadImage`.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{file_part, multipart_request, spawn_app, spawn_app_with, text_part, TestApp};

const PNG: &[u8] = b"\x89PNG\r\n\x1a\nfake-png-data";

fn stored_files(app: &TestApp) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(app.images_dir())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[tokio::test]
async fn upload_png_is_stored() {
    let app = spawn_app().await;

    let (status, body) = app
        .send(multipart_request(
            "/user/uploadImage",
            &[file_part("image", "cat.png", "image/png", PNG)],
        ))
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Image uploaded successfully");

    let image_path = body["imagePath"].as_str().unwrap();
    assert!(image_path.ends_with(".png"));
    assert_eq!(std::fs::read(image_path).unwrap(), PNG);

    let files = stored_files(&app);
    assert_eq!(files.len(), 1);
    assert!(files[0].starts_with("image-"));
}

#[tokio::test]
async fn upload_uses_subtype_as_extension() {
    let app = spawn_app().await;

    for (content_type, extension) in [("image/jpeg", ".jpeg"), ("image/gif", ".gif")] {
        let (status, body) = app
            .send(multipart_request(
                "/user/uploadImage",
                &[file_part("image", "picture", content_type, b"data")],
            ))
            .await;

        assert_eq!(status, StatusCode::CREATED);
        assert!(body["imagePath"].as_str().unwrap().ends_with(extension));
    }

    assert_eq!(stored_files(&app).len(), 2);
}

#[tokio::test]
async fn repeated_uploads_never_overwrite() {
    let app = spawn_app().await;

    for _ in 0..5 {
        let (status, _) = app
            .send(multipart_request(
                "/user/uploadImage",
                &[file_part("image", "cat.png", "image/png", PNG)],
            ))
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    assert_eq!(stored_files(&app).len(), 5);
}

#[tokio::test]
async fn text_fields_are_ignored() {
    let app = spawn_app().await;

    let (status, _) = app
        .send(multipart_request(
            "/user/uploadImage",
            &[
                text_part("caption", "my cat"),
                file_part("image", "cat.png", "image/png", PNG),
            ],
        ))
        .await;

    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn upload_without_file_is_rejected() {
    let app = spawn_app().await;

    let (status, body) = app
        .send(multipart_request("/user/uploadImage", &[text_part("caption", "nothing")]))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "No image file provided");
}

#[tokio::test]
async fn disallowed_type_is_rejected() {
    let app = spawn_app().await;

    let (status, body) = app
        .send(multipart_request(
            "/user/uploadImage",
            &[file_part("image", "doc.pdf", "application/pdf", b"%PDF-1.7")],
        ))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Only JPEG, PNG, and GIF files are allowed");
    assert!(stored_files(&app).is_empty());
}

#[tokio::test]
async fn unexpected_file_field_is_rejected() {
    let app = spawn_app().await;

    let (status, body) = app
        .send(multipart_request(
            "/user/uploadImage",
            &[file_part("avatar", "cat.png", "image/png", PNG)],
        ))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Unexpected field 'avatar'");
}

#[tokio::test]
async fn second_image_is_rejected_without_writing() {
    let app = spawn_app().await;

    let (status, body) = app
        .send(multipart_request(
            "/user/uploadImage",
            &[
                file_part("image", "a.png", "image/png", PNG),
                file_part("image", "b.png", "image/png", PNG),
            ],
        ))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Only one image file may be uploaded");
    assert!(stored_files(&app).is_empty());
}

#[tokio::test]
async fn oversized_upload_is_rejected() {
    let app = spawn_app_with(|config| config.uploads.max_file_size_bytes = 1024).await;
    let big = vec![0u8; 64 * 1024];

    let (status, body) = app
        .send(multipart_request(
            "/user/uploadImage",
            &[file_part("image", "big.png", "image/png", &big)],
        ))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());
    assert!(stored_files(&app).is_empty());
}

#[tokio::test]
async fn non_multipart_body_is_rejected() {
    let app = spawn_app().await;
    let request = Request::builder()
        .method("POST")
        .uri("/user/uploadImage")
        .header("content-type", "application/json")
        .body(Body::from("{}"))
        .unwrap();

    let (status, _) = app.send(request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}
