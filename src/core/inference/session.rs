//! Helpers for working directly with ONNX Runtime sessions.

use crate::core::config::{OrtGraphOptimizationLevel, OrtSessionConfig};
use crate::core::errors::EcgError;
use ort::logging::LogLevel;
use ort::session::{Session, builder::GraphOptimizationLevel, builder::SessionBuilder};
use std::path::Path;

/// Creates one session for the model at `model_path`, applying `config`.
pub fn load_session(
    model_path: impl AsRef<Path>,
    config: &OrtSessionConfig,
) -> Result<Session, EcgError> {
    let path = model_path.as_ref();
    let builder = Session::builder()?.with_log_level(LogLevel::Error)?;
    let builder = apply_ort_config(builder, config)?;
    let session = builder.commit_from_file(path).map_err(|e| {
        EcgError::model_load_error(path, "failed to create ONNX session", Some(e))
    })?;
    Ok(session)
}

fn apply_ort_config(
    mut builder: SessionBuilder,
    cfg: &OrtSessionConfig,
) -> Result<SessionBuilder, ort::Error> {
    if let Some(intra) = cfg.intra_threads {
        builder = builder.with_intra_threads(intra)?;
    }
    if let Some(inter) = cfg.inter_threads {
        builder = builder.with_inter_threads(inter)?;
    }
    if let Some(par) = cfg.parallel_execution {
        builder = builder.with_parallel_execution(par)?;
    }
    if let Some(level) = cfg.optimization_level {
        let mapped = match level {
            OrtGraphOptimizationLevel::DisableAll => GraphOptimizationLevel::Disable,
            OrtGraphOptimizationLevel::Level1 => GraphOptimizationLevel::Level1,
            OrtGraphOptimizationLevel::Level2 => GraphOptimizationLevel::Level2,
            OrtGraphOptimizationLevel::Level3 => GraphOptimizationLevel::Level3,
        };
        builder = builder.with_optimization_level(mapped)?;
    }
    Ok(builder)
}
