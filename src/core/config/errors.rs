//! Configuration error types and validation traits.

use std::path::Path;
use thiserror::Error;

/// Errors that can occur during configuration validation.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Error indicating that a model path does not exist.
    #[error("model path does not exist: {path}")]
    ModelPathNotFound { path: std::path::PathBuf },

    /// Error indicating that a configuration is invalid.
    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Error indicating that the configuration file could not be read or parsed.
    #[error("failed to load configuration from {path}: {message}")]
    LoadFailed {
        path: std::path::PathBuf,
        message: String,
    },
}

/// A trait for validating configuration parameters.
pub trait ConfigValidator {
    /// Validates the configuration.
    fn validate(&self) -> Result<(), ConfigError>;

    /// Validates that a file path exists and is a regular file.
    fn validate_file_path(&self, path: &Path) -> Result<(), ConfigError> {
        if !path.exists() {
            Err(ConfigError::ModelPathNotFound {
                path: path.to_path_buf(),
            })
        } else if !path.is_file() {
            Err(ConfigError::InvalidConfig {
                message: format!("Path is not a file: {}", path.display()),
            })
        } else {
            Ok(())
        }
    }

    /// Validates that a count-like value is strictly positive.
    fn validate_positive(&self, field: &str, value: usize) -> Result<(), ConfigError> {
        if value == 0 {
            Err(ConfigError::InvalidConfig {
                message: format!("{field} must be greater than 0"),
            })
        } else {
            Ok(())
        }
    }
}

impl From<ConfigError> for crate::core::EcgError {
    fn from(error: ConfigError) -> Self {
        Self::ConfigError {
            message: error.to_string(),
        }
    }
}
