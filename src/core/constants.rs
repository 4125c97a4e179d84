//! Constants used throughout the classification service.
//!
//! This module defines the fixed model input geometry, ranking depth and the
//! default locations of the persisted model artifacts.

/// Side length, in pixels, of the square grayscale image the model expects.
pub const INPUT_SIZE: u32 = 128;

/// Number of channels in the model input tensor.
pub const INPUT_CHANNELS: usize = 1;

/// Divisor that maps 8-bit intensities into [0, 1].
pub const PIXEL_SCALE: f32 = 255.0;

/// Number of ranked alternatives returned with every single-image prediction.
pub const DEFAULT_TOPK: usize = 3;

/// Default location of the ONNX classifier artifact.
pub const DEFAULT_MODEL_PATH: &str = "model/ecg_model_final_balanced.onnx";

/// Default location of the class-index metadata written at training time.
pub const DEFAULT_CLASS_INDICES_PATH: &str = "model/class_indices_balanced.json";

/// Default address the HTTP server binds to.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default port the HTTP server listens on.
pub const DEFAULT_PORT: u16 = 8000;

/// Default upper bound on a request body, in bytes.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 32 * 1024 * 1024;

/// Default number of pooled ONNX Runtime sessions.
pub const DEFAULT_SESSION_POOL_SIZE: usize = 1;

/// Minimum batch size before batch preprocessing fans out over rayon.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 4;
