//! Structures and helpers for ONNX Runtime inference.
//!
//! This module centralizes the session pool and the `Classifier`
//! implementation backed by it.

pub mod ort_infer;
pub mod session;

pub use ort_infer::OrtInfer;
pub use session::load_session;
