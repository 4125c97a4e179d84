//! # ECG Classifier
//!
//! An HTTP service that classifies ECG waveform images into one of six
//! arrhythmia categories using an ONNX model.
//!
//! ## Features
//!
//! - Fixed preprocessing: grayscale, 128x128 stretch, scaling into [0, 1]
//! - ONNX Runtime inference with a pooled set of sessions
//! - Top-3 ranking resolved through the training-time class index mapping
//! - Single and batch prediction endpoints with per-file error isolation
//!
//! ## Modules
//!
//! * [`core`] - Configuration, errors, constants and ONNX Runtime integration
//! * [`domain`] - Class codes, the class index mapping and prediction results
//! * [`processors`] - Image preprocessing and top-k ranking
//! * [`predictor`] - The end-to-end classifier
//! * [`registry`] - Startup-time model loading shared by request handlers
//! * [`server`] - The axum router and handlers
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ecg_classifier::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let classifier = EcgClassifier::from_config(&ModelConfig::default())?;
//! let bytes = std::fs::read("beat.png")?;
//! let prediction = classifier.predict_bytes(&bytes)?;
//! println!("{} ({:.2})", prediction.class, prediction.confidence);
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod domain;
pub mod predictor;
pub mod processors;
pub mod registry;
pub mod server;

/// Prelude module for convenient imports.
///
/// ```rust
/// use ecg_classifier::prelude::*;
/// ```
pub mod prelude {
    pub use crate::core::{Classifier, EcgError, ModelConfig, ServerConfig, ServiceConfig};
    pub use crate::domain::{BatchItem, ClassCode, ClassIndexMapping, Prediction, Upload};
    pub use crate::predictor::EcgClassifier;
    pub use crate::registry::ModelRegistry;
    pub use crate::server::{AppState, build_app};
}
