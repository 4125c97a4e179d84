//! Image processing utilities for the classification pipeline.
//!
//! # Modules
//!
//! * `grayscale` - Single-channel luminance conversion
//! * `preprocess` - Decode, resize and normalize uploads into model input tensors
//! * `topk` - Ranking of classifier outputs

pub mod grayscale;
pub mod preprocess;
pub mod topk;

pub use grayscale::{itu601_luma, to_grayscale};
pub use preprocess::EcgPreprocessor;
pub use topk::Topk;
