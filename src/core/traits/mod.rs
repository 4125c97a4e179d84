//! Traits at the seams of the prediction pipeline.

pub mod classifier;

pub use classifier::Classifier;
