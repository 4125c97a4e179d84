//! Service configuration loaded from JSON and overridden from the command line.

use super::errors::{ConfigError, ConfigValidator};
use super::onnx::OrtSessionConfig;
use crate::core::constants::{
    DEFAULT_CLASS_INDICES_PATH, DEFAULT_HOST, DEFAULT_MAX_UPLOAD_BYTES, DEFAULT_MODEL_PATH,
    DEFAULT_PORT, DEFAULT_SESSION_POOL_SIZE,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Where the classifier and its metadata live, and how to run them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Path to the ONNX classifier artifact.
    pub model_path: PathBuf,
    /// Path to the JSON file mapping class codes to output indices.
    pub class_indices_path: PathBuf,
    /// Display name used in logs and errors. Defaults to the model file stem.
    pub model_name: Option<String>,
    /// Name of the model input tensor. Discovered from the session when unset.
    pub input_name: Option<String>,
    /// Name of the model output tensor. Discovered from the session when unset.
    pub output_name: Option<String>,
    /// Number of ONNX Runtime sessions to pool for concurrent requests.
    pub session_pool_size: usize,
    /// ONNX Runtime session options.
    pub ort_session: OrtSessionConfig,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            class_indices_path: PathBuf::from(DEFAULT_CLASS_INDICES_PATH),
            model_name: None,
            input_name: None,
            output_name: None,
            session_pool_size: DEFAULT_SESSION_POOL_SIZE,
            ort_session: OrtSessionConfig::default(),
        }
    }
}

impl ModelConfig {
    /// Returns the configured model name, falling back to the artifact's file stem.
    pub fn resolved_model_name(&self) -> String {
        self.model_name
            .clone()
            .or_else(|| {
                self.model_path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .map(|s| s.to_string())
            })
            .unwrap_or_else(|| "unknown_model".to_string())
    }
}

impl ConfigValidator for ModelConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        self.validate_positive("session_pool_size", self.session_pool_size)?;
        if let Some(threads) = self.ort_session.intra_threads {
            self.validate_positive("ort_session.intra_threads", threads)?;
        }
        if let Some(threads) = self.ort_session.inter_threads {
            self.validate_positive("ort_session.inter_threads", threads)?;
        }
        Ok(())
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Upper bound on a request body, in bytes.
    pub max_upload_bytes: usize,
    /// Allowed CORS origins. Empty means any origin.
    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            cors_allowed_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// Returns `host:port`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl ConfigValidator for ServerConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::InvalidConfig {
                message: "host must not be empty".to_string(),
            });
        }
        self.validate_positive("max_upload_bytes", self.max_upload_bytes)
    }
}

/// Top-level configuration of the classification service.
///
/// Every field has a default, so an empty JSON object is a valid file:
///
/// ```rust
/// use ecg_classifier::core::config::ServiceConfig;
///
/// let config: ServiceConfig = serde_json::from_str("{}").unwrap();
/// assert_eq!(config.server.port, 8000);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Model artifact settings.
    pub model: ModelConfig,
    /// HTTP listener settings.
    pub server: ServerConfig,
}

impl ServiceConfig {
    /// Loads and validates a configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let config: Self = serde_json::from_str(&content).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }
}

impl ConfigValidator for ServiceConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        self.model.validate()?;
        self.server.validate()
    }
}
