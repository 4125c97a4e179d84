//! Predictors built on top of the inference core.
//!
//! A predictor owns a [`Classifier`](crate::core::Classifier) together with the
//! preprocessing and post-processing needed to turn uploads into results.

pub mod ecg_classifier;

pub use ecg_classifier::{EcgClassifier, MODEL_METADATA_MISMATCH, NOT_AN_IMAGE};
