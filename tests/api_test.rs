mod common;

use axum::http::StatusCode;
use common::{Part, get, json_body, multipart_request, png, ready_app, unavailable_app};
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn test_root_message() {
    let (_, app) = ready_app();
    let resp = app.oneshot(get("/")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        json_body(resp).await,
        json!({"message": "ECG Arrhythmia Classification API"})
    );
}

#[tokio::test]
async fn test_health_reports_readiness() {
    let (_, app) = ready_app();
    let resp = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        json_body(resp).await,
        json!({"status": "healthy", "message": "Model loaded and ready"})
    );

    let resp = unavailable_app().oneshot(get("/health")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        json_body(resp).await,
        json!({"status": "error", "message": "Model not loaded"})
    );
}

#[tokio::test]
async fn test_classes_returns_mapping_and_descriptions() {
    let (_, app) = ready_app();
    let resp = app.oneshot(get("/classes")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body = json_body(resp).await;
    assert_eq!(
        body["class_indices"],
        json!({"F": 0, "M": 1, "N": 2, "Q": 3, "S": 4, "V": 5})
    );
    assert_eq!(body["class_descriptions"]["N"], "Normal beat");
    assert_eq!(
        body["class_descriptions"]["V"],
        "Premature ventricular contraction"
    );
    assert_eq!(body["class_descriptions"].as_object().unwrap().len(), 6);
}

#[tokio::test]
async fn test_classes_without_model_has_null_indices() {
    let resp = unavailable_app().oneshot(get("/classes")).await.unwrap();
    let body = json_body(resp).await;
    assert!(body["class_indices"].is_null());
    assert_eq!(body["class_descriptions"].as_object().unwrap().len(), 6);
}

#[tokio::test]
async fn test_predict_returns_ranked_top_three() {
    let (model, app) = ready_app();
    let req = multipart_request("/predict/", &[Part::image("file", "beat.png", png(64, 64, 128))]);
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(model.calls(), 1);

    let body = json_body(resp).await;
    assert_eq!(body["class"], "N");
    assert_eq!(body["description"], "Normal beat");

    let top = body["top_predictions"].as_array().unwrap();
    assert_eq!(top.len(), 3);
    assert_eq!(top[0]["class"], body["class"]);
    assert_eq!(top[0]["confidence"], body["confidence"]);
    let classes: Vec<&str> = top.iter().map(|p| p["class"].as_str().unwrap()).collect();
    assert_eq!(classes, vec!["N", "V", "M"]);

    let confidences: Vec<f64> = top.iter().map(|p| p["confidence"].as_f64().unwrap()).collect();
    assert!(confidences.windows(2).all(|w| w[0] >= w[1]));
    assert!(confidences.iter().all(|c| (0.0..=1.0).contains(c)));
}

#[tokio::test]
async fn test_predict_without_trailing_slash() {
    let (_, app) = ready_app();
    let req = multipart_request("/predict", &[Part::image("file", "dark.png", png(30, 90, 0))]);
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await["class"], "F");
}

#[tokio::test]
async fn test_predict_is_deterministic() {
    let (_, app) = ready_app();
    let bytes = png(100, 40, 77);

    let first = app
        .clone()
        .oneshot(multipart_request("/predict/", &[Part::image("file", "a.png", bytes.clone())]))
        .await
        .unwrap();
    let second = app
        .oneshot(multipart_request("/predict/", &[Part::image("file", "a.png", bytes)]))
        .await
        .unwrap();
    assert_eq!(json_body(first).await, json_body(second).await);
}

#[tokio::test]
async fn test_predict_rejects_non_image_without_inference() {
    let (model, app) = ready_app();
    let part = Part {
        field: "file",
        filename: "notes.txt",
        content_type: Some("text/plain"),
        data: b"not an ecg".to_vec(),
    };
    let resp = app.oneshot(multipart_request("/predict/", &[part])).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(resp).await, json!({"detail": "File must be an image"}));
    assert_eq!(model.calls(), 0);
}

#[tokio::test]
async fn test_predict_missing_content_type_is_not_an_image() {
    let (model, app) = ready_app();
    let part = Part {
        field: "file",
        filename: "beat.png",
        content_type: None,
        data: png(8, 8, 8),
    };
    let resp = app.oneshot(multipart_request("/predict/", &[part])).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(model.calls(), 0);
}

#[tokio::test]
async fn test_predict_without_model_is_internal_error() {
    let req = multipart_request("/predict/", &[Part::image("file", "beat.png", png(8, 8, 8))]);
    let resp = unavailable_app().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json_body(resp).await, json!({"detail": "Model not loaded"}));
}

#[tokio::test]
async fn test_predict_missing_file_field() {
    let (_, app) = ready_app();
    let req = multipart_request("/predict/", &[Part::image("other", "beat.png", png(8, 8, 8))]);
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(resp).await, json!({"detail": "No file uploaded"}));
}

#[tokio::test]
async fn test_predict_corrupt_image_is_processing_error() {
    let (model, app) = ready_app();
    let req = multipart_request(
        "/predict/",
        &[Part::image("file", "broken.png", b"\x89PNG\r\n\x1a\nnope".to_vec())],
    );
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let detail = json_body(resp).await["detail"].as_str().unwrap().to_string();
    assert!(detail.starts_with("Error processing image: "), "{detail}");
    assert_eq!(model.calls(), 0);
}

#[tokio::test]
async fn test_predict_batch_isolates_corrupt_file() {
    let (_, app) = ready_app();
    let req = multipart_request(
        "/predict-batch/",
        &[
            Part::image("files", "first.png", png(64, 64, 128)),
            Part::image("files", "second.png", b"garbage".to_vec()),
            Part::image("files", "third.png", png(20, 50, 0)),
        ],
    );
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body = json_body(resp).await;
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 3);

    assert_eq!(items[0]["filename"], "first.png");
    assert_eq!(items[0]["class"], "N");
    assert!(items[0].get("error").is_none());

    assert_eq!(items[1]["filename"], "second.png");
    assert!(items[1]["error"].is_string());
    assert!(items[1].get("class").is_none());

    assert_eq!(items[2]["filename"], "third.png");
    assert_eq!(items[2]["class"], "F");
    assert!(items[2].get("top_predictions").is_none());
}

#[tokio::test]
async fn test_predict_batch_reports_non_images_per_item() {
    let (_, app) = ready_app();
    let req = multipart_request(
        "/predict-batch",
        &[
            Part {
                field: "files",
                filename: "readme.md",
                content_type: Some("text/markdown"),
                data: b"# hi".to_vec(),
            },
            Part::image("files", "beat.png", png(16, 16, 200)),
        ],
    );
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body = json_body(resp).await;
    assert_eq!(
        body[0],
        json!({"filename": "readme.md", "error": "File must be an image"})
    );
    assert_eq!(body[1]["filename"], "beat.png");
    assert!(body[1]["confidence"].is_number());
}

#[tokio::test]
async fn test_predict_batch_without_files() {
    let (_, app) = ready_app();
    let resp = app
        .oneshot(multipart_request("/predict-batch/", &[]))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(resp).await, json!({"detail": "No file uploaded"}));
}

#[tokio::test]
async fn test_predict_batch_without_model() {
    let req = multipart_request(
        "/predict-batch/",
        &[Part::image("files", "beat.png", png(8, 8, 8))],
    );
    let resp = unavailable_app().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json_body(resp).await, json!({"detail": "Model not loaded"}));
}
