//! HTTP error responses.

use crate::core::EcgError;
use crate::predictor::MODEL_METADATA_MISMATCH;
use axum::Json;
use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::{error, warn};

/// Message for requests that carry no usable file field.
pub const NO_FILE_UPLOADED: &str = "No file uploaded";

/// An error returned to the client as `{"detail": ...}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub detail: String,
}

impl ApiError {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, detail)
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, detail)
    }

    pub fn no_file() -> Self {
        Self::bad_request(NO_FILE_UPLOADED)
    }
}

impl From<EcgError> for ApiError {
    fn from(err: EcgError) -> Self {
        match err {
            EcgError::NotReady => Self::internal("Model not loaded"),
            EcgError::InvalidInput { message } => Self::bad_request(message),
            e @ EcgError::LabelMismatch { .. } => {
                error!("{e}");
                Self::internal(format!("{MODEL_METADATA_MISMATCH}: {e}"))
            }
            e => {
                warn!("request failed: {e}");
                Self::internal(format!("Error processing image: {e}"))
            }
        }
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text())
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        Self::new(err.status(), err.body_text())
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        error!("prediction task did not complete: {err}");
        Self::internal("Error processing image: prediction task failed")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        #[derive(Serialize)]
        struct ErrorBody<'a> {
            detail: &'a str,
        }

        (
            self.status,
            Json(ErrorBody {
                detail: &self.detail,
            }),
        )
            .into_response()
    }
}
