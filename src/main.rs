//! ECG arrhythmia classification service.
//!
//! # Usage
//!
//! ```bash
//! ecg-classifier [OPTIONS]
//! ```
//!
//! # Example
//!
//! ```bash
//! ecg-classifier \
//!     --model-path model/ecg_model_final_balanced.onnx \
//!     --class-indices-path model/class_indices_balanced.json \
//!     --port 8000
//! ```

use clap::Parser;
use ecg_classifier::core::{ConfigValidator, ServiceConfig, init_tracing};
use ecg_classifier::registry::ModelRegistry;
use ecg_classifier::server;
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "ecg-classifier")]
#[command(about = "Serves ECG arrhythmia predictions over HTTP")]
struct Args {
    /// JSON configuration file; command-line flags take precedence over it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Interface to bind (default: 0.0.0.0)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (default: 8000)
    #[arg(short, long)]
    port: Option<u16>,

    /// Path to the ONNX model
    #[arg(long)]
    model_path: Option<PathBuf>,

    /// Path to the class index JSON written at training time
    #[arg(long)]
    class_indices_path: Option<PathBuf>,

    /// Number of ONNX Runtime sessions to pool
    #[arg(long)]
    session_pool_size: Option<usize>,
}

impl Args {
    fn apply_to(self, config: &mut ServiceConfig) {
        if let Some(host) = self.host {
            config.server.host = host;
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(path) = self.model_path {
            config.model.model_path = path;
        }
        if let Some(path) = self.class_indices_path {
            config.model.class_indices_path = path;
        }
        if let Some(size) = self.session_pool_size {
            config.model.session_pool_size = size;
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => {
            info!("loading configuration from {}", path.display());
            ServiceConfig::from_file(path)?
        }
        None => ServiceConfig::default(),
    };
    args.apply_to(&mut config);
    config.validate()?;

    let model_config = config.model.clone();
    let registry = tokio::task::spawn_blocking(move || ModelRegistry::load(&model_config)).await?;
    if let Some(reason) = registry.unavailable_reason() {
        error!("serving without a model: {reason}");
    }

    server::serve(&config.server, registry).await?;
    Ok(())
}
