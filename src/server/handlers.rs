//! Route handlers.

use super::AppState;
use super::error::ApiError;
use super::upload::{BATCH_FILES_FIELD, SINGLE_FILE_FIELD, collect_uploads, single_upload};
use crate::domain::{BatchItem, ClassCode, ClassIndexMapping, Prediction, class_descriptions};
use axum::Json;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
}

/// Class metadata as loaded alongside the model.
#[derive(Debug, Serialize)]
pub struct ClassesResponse {
    /// `null` when the model is not loaded.
    pub class_indices: Option<ClassIndexMapping>,
    pub class_descriptions: BTreeMap<ClassCode, &'static str>,
}

pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "ECG Arrhythmia Classification API",
    })
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let response = if state.registry.is_ready() {
        HealthResponse {
            status: "healthy",
            message: "Model loaded and ready",
        }
    } else {
        HealthResponse {
            status: "error",
            message: "Model not loaded",
        }
    };
    Json(response)
}

pub async fn classes(State(state): State<AppState>) -> Json<ClassesResponse> {
    Json(ClassesResponse {
        class_indices: state.registry.class_indices().cloned(),
        class_descriptions: class_descriptions(),
    })
}

/// Classifies the image in the `file` field.
pub async fn predict(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<Prediction>, ApiError> {
    let classifier = Arc::clone(state.registry.ready()?);
    let mut multipart = multipart?;
    let upload = single_upload(&mut multipart, SINGLE_FILE_FIELD).await?;
    debug!(
        filename = %upload.filename,
        bytes = upload.data.len(),
        "received prediction request"
    );

    let prediction =
        tokio::task::spawn_blocking(move || classifier.predict_upload(&upload)).await??;
    Ok(Json(prediction))
}

/// Classifies every image in the repeated `files` field.
pub async fn predict_batch(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<Vec<BatchItem>>, ApiError> {
    let classifier = Arc::clone(state.registry.ready()?);
    let mut multipart = multipart?;
    let uploads = collect_uploads(&mut multipart, BATCH_FILES_FIELD).await?;
    if uploads.is_empty() {
        return Err(ApiError::no_file());
    }
    debug!(files = uploads.len(), "received batch prediction request");

    let items =
        tokio::task::spawn_blocking(move || classifier.predict_batch(&uploads)).await?;
    Ok(Json(items))
}
