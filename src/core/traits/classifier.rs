//! The classifier interface the prediction pipeline runs against.

use crate::core::{EcgError, Tensor2D, Tensor4D};

/// A model that maps a normalized image batch to per-class probabilities.
///
/// Implementations must be shareable across request tasks: the same instance
/// serves every concurrent request for the lifetime of the process.
pub trait Classifier: Send + Sync + std::fmt::Debug {
    /// Human-readable model name used in logs and error messages.
    fn name(&self) -> &str;

    /// Number of output classes, when the model declares it statically.
    fn num_classes(&self) -> Option<usize> {
        None
    }

    /// Runs the model on a (batch, height, width, channels) tensor and returns
    /// a (batch, classes) probability matrix.
    fn classify(&self, input: &Tensor4D) -> Result<Tensor2D, EcgError>;
}
