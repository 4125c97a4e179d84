//! Error types for the classification service.
//!
//! This module defines the errors that can occur while loading the model,
//! preprocessing uploaded images, running inference and ranking the output.
//! It also provides helper constructors that attach the failing stage and
//! context to an underlying error.

use std::path::Path;
use thiserror::Error;

/// Stage of the prediction pipeline an error originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingStage {
    /// Decoding the uploaded bytes into an image.
    Decode,
    /// Resizing the image to the model input size.
    Resize,
    /// Building the normalized input tensor.
    TensorOperation,
    /// Ranking the classifier output.
    PostProcessing,
}

impl std::fmt::Display for ProcessingStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProcessingStage::Decode => write!(f, "decode"),
            ProcessingStage::Resize => write!(f, "resize"),
            ProcessingStage::TensorOperation => write!(f, "tensor operation"),
            ProcessingStage::PostProcessing => write!(f, "post-processing"),
        }
    }
}

/// Errors produced by the classification service.
///
/// The variants follow the service's error taxonomy: the model may not be
/// ready, the input may be bad, processing may fail, or the model and its
/// class-index metadata may disagree.
#[derive(Error, Debug)]
pub enum EcgError {
    /// The model registry failed to initialize at startup.
    #[error("model not loaded")]
    NotReady,

    /// The uploaded bytes could not be decoded as an image.
    #[error("cannot identify image file: {0}")]
    ImageDecode(#[source] image::ImageError),

    /// Error occurred during a processing stage.
    #[error("{kind} failed: {context}")]
    Processing {
        /// The stage of processing where the error occurred.
        kind: ProcessingStage,
        /// Additional context about the error.
        context: String,
        /// The underlying error that caused this error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Error occurred while running the classifier.
    #[error("inference failed for model '{model_name}': {context}")]
    Inference {
        /// Name of the model that failed.
        model_name: String,
        /// Additional context about the error.
        context: String,
        /// The underlying error that caused this error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The request carried invalid input.
    #[error("invalid input: {message}")]
    InvalidInput {
        /// A message describing the invalid input.
        message: String,
    },

    /// A configuration problem, detected at load time or from settings.
    #[error("configuration: {message}")]
    ConfigError {
        /// A message describing the configuration error.
        message: String,
    },

    /// Loading the model artifact failed.
    #[error("failed to load model from '{path}': {reason}")]
    ModelLoad {
        /// Path to the model artifact.
        path: String,
        /// Why the load failed.
        reason: String,
        /// The underlying error, if any.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The classifier produced an index the class-index mapping does not know.
    ///
    /// This indicates version skew between the model and its metadata and is a
    /// deployment defect rather than a property of the input.
    #[error(
        "predicted class index {index} has no entry in the class index mapping ({known} classes known)"
    )]
    LabelMismatch {
        /// The unresolved output index.
        index: usize,
        /// Number of classes in the mapping.
        known: usize,
    },

    /// Error from the ONNX Runtime session.
    #[error(transparent)]
    Session(#[from] ort::Error),

    /// Error from tensor operations.
    #[error("tensor operation: {0}")]
    Tensor(#[from] ndarray::ShapeError),

    /// Error parsing JSON metadata or configuration.
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

impl EcgError {
    /// Creates an error for a failed processing stage.
    pub fn processing_error(
        kind: ProcessingStage,
        context: &str,
        error: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Processing {
            kind,
            context: context.to_string(),
            source: Box::new(error),
        }
    }

    /// Creates an error for tensor construction failures.
    pub fn tensor_operation(
        context: &str,
        error: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::processing_error(ProcessingStage::TensorOperation, context, error)
    }

    /// Creates an error for a failed forward pass.
    pub fn inference_error(
        model_name: &str,
        context: &str,
        error: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Inference {
            model_name: model_name.to_string(),
            context: context.to_string(),
            source: Box::new(error),
        }
    }

    /// Creates an error for invalid input.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Creates an error for configuration problems.
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Creates an error for configuration problems tied to a specific field.
    pub fn config_error_with_context(field: &str, value: &str, reason: &str) -> Self {
        Self::ConfigError {
            message: format!(
                "Configuration error in field '{}' with value '{}': {}",
                field, value, reason
            ),
        }
    }

    /// Creates an error for a model artifact that could not be loaded.
    pub fn model_load_error(
        path: &Path,
        reason: &str,
        error: Option<impl std::error::Error + Send + Sync + 'static>,
    ) -> Self {
        Self::ModelLoad {
            path: path.display().to_string(),
            reason: reason.to_string(),
            source: error.map(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>),
        }
    }

    /// Returns true when the error stems from the request rather than the service.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }

    /// Returns true when the error indicates a model/metadata mismatch.
    pub fn is_configuration_mismatch(&self) -> bool {
        matches!(self, Self::LabelMismatch { .. })
    }
}

impl From<image::ImageError> for EcgError {
    fn from(error: image::ImageError) -> Self {
        Self::ImageDecode(error)
    }
}

/// Lightweight error carrying only a message, used as a `source` where no
/// underlying error exists.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct SimpleError(String);

impl SimpleError {
    /// Creates a new error from a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}
