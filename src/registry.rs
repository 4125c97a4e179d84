//! Model registry shared by all request handlers.
//!
//! The registry is built once before the listener binds and never changes
//! afterwards. A load failure does not stop the service: the registry records
//! the reason, health checks report the model as unavailable, and prediction
//! requests fail with [`EcgError::NotReady`].

use crate::core::{EcgError, ModelConfig};
use crate::domain::ClassIndexMapping;
use crate::predictor::EcgClassifier;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Debug, Clone)]
enum ModelState {
    Ready(Arc<EcgClassifier>),
    Unavailable { reason: String },
}

/// Holds the loaded classifier, or the reason it could not be loaded.
#[derive(Debug, Clone)]
pub struct ModelRegistry {
    state: ModelState,
}

impl ModelRegistry {
    /// Loads the model and class-index metadata named by `config`.
    ///
    /// Never fails; see [`ModelRegistry::is_ready`].
    pub fn load(config: &ModelConfig) -> Self {
        match EcgClassifier::from_config(config) {
            Ok(classifier) => {
                info!(
                    model = classifier.model_name(),
                    classes = classifier.class_indices().len(),
                    "model ready"
                );
                Self::from_classifier(classifier)
            }
            Err(e) => {
                error!(
                    model_path = %config.model_path.display(),
                    class_indices_path = %config.class_indices_path.display(),
                    "failed to load model: {e}"
                );
                Self::unavailable(e.to_string())
            }
        }
    }

    /// Wraps an already constructed classifier.
    pub fn from_classifier(classifier: EcgClassifier) -> Self {
        Self {
            state: ModelState::Ready(Arc::new(classifier)),
        }
    }

    /// A registry with no model.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            state: ModelState::Unavailable {
                reason: reason.into(),
            },
        }
    }

    /// Returns the classifier, or [`EcgError::NotReady`] when none is loaded.
    pub fn ready(&self) -> Result<&Arc<EcgClassifier>, EcgError> {
        match &self.state {
            ModelState::Ready(classifier) => Ok(classifier),
            ModelState::Unavailable { .. } => Err(EcgError::NotReady),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, ModelState::Ready(_))
    }

    /// Why the model is unavailable, if it is.
    pub fn unavailable_reason(&self) -> Option<&str> {
        match &self.state {
            ModelState::Ready(_) => None,
            ModelState::Unavailable { reason } => Some(reason),
        }
    }

    /// The loaded class-index mapping, if any.
    pub fn class_indices(&self) -> Option<&ClassIndexMapping> {
        self.ready().ok().map(|c| c.class_indices())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_missing_model_is_unavailable() {
        let mut indices = NamedTempFile::new().unwrap();
        write!(indices, r#"{{"N": 0, "V": 1}}"#).unwrap();
        let config = ModelConfig {
            model_path: "does/not/exist.onnx".into(),
            class_indices_path: indices.path().to_path_buf(),
            ..ModelConfig::default()
        };

        let registry = ModelRegistry::load(&config);
        assert!(!registry.is_ready());
        assert!(registry.unavailable_reason().is_some());
        assert!(registry.class_indices().is_none());
        assert!(matches!(registry.ready(), Err(EcgError::NotReady)));
    }

    #[test]
    fn test_missing_class_indices_is_unavailable() {
        let config = ModelConfig {
            class_indices_path: "does/not/exist.json".into(),
            ..ModelConfig::default()
        };
        assert!(!ModelRegistry::load(&config).is_ready());
    }

    #[test]
    fn test_unavailable_constructor() {
        let registry = ModelRegistry::unavailable("boom");
        assert_eq!(registry.unavailable_reason(), Some("boom"));
    }
}
