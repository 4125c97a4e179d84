//! The core module of the classification service.
//!
//! This module contains the fundamental components shared by the rest of the
//! crate:
//! - Configuration management
//! - Constants for the model input geometry and default paths
//! - Error handling
//! - ONNX Runtime inference integration
//! - Traits at the pipeline seams
//!
//! It also provides re-exports of commonly used types for convenience.

pub mod batch;
pub mod config;
pub mod constants;
pub mod errors;
pub mod inference;
pub mod traits;

pub use batch::{Tensor2D, Tensor4D};
pub use config::{ConfigError, ConfigValidator, ModelConfig, ServerConfig, ServiceConfig};
pub use constants::*;
pub use errors::{EcgError, ProcessingStage, SimpleError};
pub use inference::{OrtInfer, load_session};
pub use traits::Classifier;

/// Initializes the tracing subscriber for logging.
///
/// This function sets up the tracing subscriber with environment filter and formatting layer.
/// When `RUST_LOG` is unset, `info` level is used.
pub fn init_tracing() {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
