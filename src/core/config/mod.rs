//! Configuration management for the classification service.
//!
//! This module provides the serde-backed configuration types, their
//! validation trait, and the ONNX Runtime session options.

pub mod errors;
pub mod onnx;
pub mod service;

pub use errors::{ConfigError, ConfigValidator};
pub use onnx::{OrtGraphOptimizationLevel, OrtSessionConfig};
pub use service::{ModelConfig, ServerConfig, ServiceConfig};
