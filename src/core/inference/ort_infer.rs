//! ONNX Runtime inference engine with a round-robin session pool.

use crate::core::errors::EcgError;
use ort::{session::Session, value::ValueType};
use std::sync::Mutex;

#[path = "ort_infer_builders.rs"]
mod ort_infer_builders;
#[path = "ort_infer_execution.rs"]
mod ort_infer_execution;
#[cfg(test)]
#[path = "ort_infer_tests.rs"]
mod ort_infer_tests;

pub struct OrtInfer {
    pub(super) sessions: Vec<Mutex<Session>>,
    pub(super) next_idx: std::sync::atomic::AtomicUsize,
    pub(super) input_name: String,
    pub(super) output_name: String,
    pub(super) model_path: std::path::PathBuf,
    pub(super) model_name: String,
}

impl std::fmt::Debug for OrtInfer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrtInfer")
            .field("sessions", &self.sessions.len())
            .field("input_name", &self.input_name)
            .field("output_name", &self.output_name)
            .field("model_path", &self.model_path)
            .field("model_name", &self.model_name)
            .finish()
    }
}

impl OrtInfer {
    /// Attempts to retrieve the primary output tensor shape from the first session.
    ///
    /// Dynamic dimensions (e.g., -1) are returned as-is.
    pub fn primary_output_shape(&self) -> Option<Vec<i64>> {
        let session_mutex = self.sessions.first()?;
        let session_guard = session_mutex.lock().ok()?;
        let output = session_guard
            .outputs
            .iter()
            .find(|o| o.name == self.output_name)?;
        match &output.output_type {
            ValueType::Tensor { shape, .. } => Some(shape.iter().copied().collect()),
            _ => None,
        }
    }

    /// Number of pooled sessions.
    pub fn pool_size(&self) -> usize {
        self.sessions.len()
    }

    /// Returns the model path associated with this inference engine.
    pub fn model_path(&self) -> &std::path::Path {
        &self.model_path
    }
}

/// Reads the class dimension out of a (batch, classes) output shape.
///
/// Returns `None` for dynamic or malformed shapes.
pub(crate) fn static_class_count(shape: &[i64]) -> Option<usize> {
    match shape {
        [_, classes] if *classes > 0 => Some(*classes as usize),
        _ => None,
    }
}
