#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, header};
use ecg_classifier::core::{Classifier, EcgError, ServerConfig, Tensor2D, Tensor4D};
use ecg_classifier::domain::ClassIndexMapping;
use ecg_classifier::predictor::EcgClassifier;
use ecg_classifier::registry::ModelRegistry;
use ecg_classifier::server::{AppState, build_app};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use serde_json::Value;
use std::io::Cursor;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

pub const BALANCED_INDICES: &str = r#"{"F": 0, "M": 1, "N": 2, "Q": 3, "S": 4, "V": 5}"#;

const BOUNDARY: &str = "ecg-test-boundary";

/// Linear classifier over the mean pixel intensity followed by softmax.
///
/// Brighter images shift mass from F towards N and V, so different inputs give
/// different but reproducible rankings.
#[derive(Debug, Default)]
pub struct FixedWeightClassifier {
    pub calls: AtomicUsize,
}

impl FixedWeightClassifier {
    const WEIGHTS: [f32; 6] = [-3.0, 0.5, 2.0, -1.0, 0.25, 1.5];
    const BIASES: [f32; 6] = [1.0, 0.0, 0.2, 0.1, 0.0, -0.4];

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Classifier for FixedWeightClassifier {
    fn name(&self) -> &str {
        "fixed-weight"
    }

    fn num_classes(&self) -> Option<usize> {
        Some(Self::WEIGHTS.len())
    }

    fn classify(&self, input: &Tensor4D) -> Result<Tensor2D, EcgError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mean = input.mean().unwrap_or(0.0);
        let logits: Vec<f32> = Self::WEIGHTS
            .iter()
            .zip(Self::BIASES)
            .map(|(w, b)| w * mean + b)
            .collect();
        let max = logits.iter().cloned().fold(f32::MIN, f32::max);
        let exps: Vec<f32> = logits.iter().map(|l| (l - max).exp()).collect();
        let sum: f32 = exps.iter().sum();
        Ok(Tensor2D::from_shape_fn((1, exps.len()), |(_, j)| {
            exps[j] / sum
        }))
    }
}

pub fn ready_app() -> (Arc<FixedWeightClassifier>, Router) {
    let model = Arc::new(FixedWeightClassifier::default());
    let mapping = ClassIndexMapping::from_json_str(BALANCED_INDICES).unwrap();
    let classifier = EcgClassifier::new(model.clone(), mapping).unwrap();
    let registry = ModelRegistry::from_classifier(classifier);
    let app = build_app(AppState::new(registry), &ServerConfig::default());
    (model, app)
}

pub fn unavailable_app() -> Router {
    let registry = ModelRegistry::unavailable("model file missing");
    build_app(AppState::new(registry), &ServerConfig::default())
}

pub fn png(width: u32, height: u32, level: u8) -> Vec<u8> {
    let img = RgbImage::from_pixel(width, height, Rgb([level; 3]));
    let mut buf = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(img)
        .write_to(&mut buf, ImageFormat::Png)
        .unwrap();
    buf.into_inner()
}

/// One part of a multipart body.
pub struct Part<'a> {
    pub field: &'a str,
    pub filename: &'a str,
    pub content_type: Option<&'a str>,
    pub data: Vec<u8>,
}

impl<'a> Part<'a> {
    pub fn image(field: &'a str, filename: &'a str, data: Vec<u8>) -> Self {
        Self {
            field,
            filename,
            content_type: Some("image/png"),
            data,
        }
    }
}

pub fn multipart_request(uri: &str, parts: &[Part<'_>]) -> Request<Body> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                part.field, part.filename
            )
            .as_bytes(),
        );
        if let Some(content_type) = part.content_type {
            body.extend_from_slice(format!("Content-Type: {content_type}\r\n").as_bytes());
        }
        body.extend_from_slice(b"\r\n");
        body.extend_from_slice(&part.data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub async fn json_body(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
