use super::*;
use crate::core::config::ModelConfig;
use crate::core::inference::load_session;

impl OrtInfer {
    /// Creates an engine from `ModelConfig`, constructing a pool of
    /// `session_pool_size` sessions for concurrent predictions.
    ///
    /// Input and output tensor names are taken from the configuration when
    /// present and otherwise discovered from the first session.
    pub fn from_config(config: &ModelConfig) -> Result<Self, EcgError> {
        let path = config.model_path.as_path();
        let pool_size = config.session_pool_size.max(1);
        let mut sessions = Vec::with_capacity(pool_size);
        for _ in 0..pool_size {
            sessions.push(load_session(path, &config.ort_session)?);
        }

        let first = &sessions[0];
        let input_name = match &config.input_name {
            Some(name) => name.clone(),
            None => first
                .inputs
                .first()
                .map(|i| i.name.clone())
                .ok_or_else(|| {
                    EcgError::model_load_error(
                        path,
                        "model declares no inputs",
                        None::<crate::core::errors::SimpleError>,
                    )
                })?,
        };
        let output_name = match &config.output_name {
            Some(name) => name.clone(),
            None => first
                .outputs
                .first()
                .map(|o| o.name.clone())
                .ok_or_else(|| {
                    EcgError::model_load_error(
                        path,
                        "No outputs available in session - model may be invalid or corrupted",
                        None::<crate::core::errors::SimpleError>,
                    )
                })?,
        };

        Ok(OrtInfer {
            sessions: sessions.into_iter().map(Mutex::new).collect(),
            next_idx: std::sync::atomic::AtomicUsize::new(0),
            input_name,
            output_name,
            model_path: path.to_path_buf(),
            model_name: config.resolved_model_name(),
        })
    }
}
