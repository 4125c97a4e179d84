//! ECG Arrhythmia Classifier
//!
//! This module runs the complete prediction pipeline for uploaded ECG images:
//! preprocessing into the model input tensor, inference, and ranking of the
//! output probabilities into class codes.
//!
//! Batch requests are processed item by item. A bad file, including one whose
//! predicted index has no class code, only produces a failure entry for itself.

use crate::core::constants::{DEFAULT_PARALLEL_THRESHOLD, DEFAULT_TOPK};
use crate::core::errors::SimpleError;
use crate::core::{
    Classifier, ConfigValidator, EcgError, ModelConfig, OrtInfer, ProcessingStage, Tensor4D,
};
use crate::domain::{BatchItem, ClassIndexMapping, ClassScore, Prediction, Upload};
use crate::processors::{EcgPreprocessor, Topk};
use ndarray::{Array1, ArrayView1};
use rayon::prelude::*;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Message reported for uploads whose declared type is not an image.
pub const NOT_AN_IMAGE: &str = "File must be an image";

/// Prefix of the message reported when the model and its class index mapping disagree.
pub const MODEL_METADATA_MISMATCH: &str = "Model/metadata mismatch";

/// The loaded classifier together with everything needed to interpret it.
#[derive(Debug, Clone)]
pub struct EcgClassifier {
    classifier: Arc<dyn Classifier>,
    class_indices: ClassIndexMapping,
    preprocessor: EcgPreprocessor,
    topk: Topk,
    parallel_threshold: usize,
}

impl EcgClassifier {
    /// Pairs a classifier with its class index mapping.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the classifier declares a class
    /// count that the mapping cannot cover.
    pub fn new(
        classifier: Arc<dyn Classifier>,
        class_indices: ClassIndexMapping,
    ) -> Result<Self, EcgError> {
        if let Some(num_classes) = classifier.num_classes() {
            let uncovered = (0..num_classes).find(|&idx| class_indices.code_for(idx).is_err());
            if num_classes != class_indices.len() || uncovered.is_some() {
                return Err(EcgError::config_error(format!(
                    "model '{}' outputs {} classes but the class index mapping has {} entries",
                    classifier.name(),
                    num_classes,
                    class_indices.len()
                )));
            }
        }

        Ok(Self {
            classifier,
            class_indices,
            preprocessor: EcgPreprocessor::new(),
            topk: Topk::new(DEFAULT_TOPK)?,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        })
    }

    /// Loads the ONNX model and class-index metadata named by `config`.
    pub fn from_config(config: &ModelConfig) -> Result<Self, EcgError> {
        config.validate()?;
        config.validate_file_path(&config.model_path)?;
        config.validate_file_path(&config.class_indices_path)?;

        let class_indices = ClassIndexMapping::from_file(&config.class_indices_path)?;
        let inference = OrtInfer::from_config(config)?;
        info!(
            model = %inference.model_path().display(),
            sessions = inference.pool_size(),
            classes = class_indices.len(),
            "loaded classifier"
        );
        Self::new(Arc::new(inference), class_indices)
    }

    /// Overrides the preprocessing pipeline.
    pub fn with_preprocessor(mut self, preprocessor: EcgPreprocessor) -> Self {
        self.preprocessor = preprocessor;
        self
    }

    /// Overrides the batch size above which preprocessing runs in parallel.
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// The class index mapping loaded with the model.
    pub fn class_indices(&self) -> &ClassIndexMapping {
        &self.class_indices
    }

    /// Name of the underlying model.
    pub fn model_name(&self) -> &str {
        self.classifier.name()
    }

    /// Classifies one uploaded file.
    ///
    /// # Errors
    ///
    /// * [`EcgError::InvalidInput`] when the declared type is not an image;
    ///   no inference is attempted.
    /// * Decode, processing or inference errors for unusable content.
    /// * [`EcgError::LabelMismatch`] when the model and metadata disagree.
    pub fn predict_upload(&self, upload: &Upload) -> Result<Prediction, EcgError> {
        if !upload.is_image() {
            return Err(EcgError::invalid_input(NOT_AN_IMAGE));
        }
        self.predict_bytes(&upload.data)
    }

    /// Classifies raw image bytes.
    pub fn predict_bytes(&self, bytes: &[u8]) -> Result<Prediction, EcgError> {
        let tensor = self.preprocessor.apply(bytes)?;
        self.predict_tensor(&tensor)
    }

    /// Runs the classifier on a preprocessed (1, H, W, 1) tensor and ranks the output.
    pub fn predict_tensor(&self, tensor: &Tensor4D) -> Result<Prediction, EcgError> {
        let probabilities = self.probabilities(tensor)?;
        self.rank(probabilities.view())
    }

    /// Runs the classifier and returns the validated probability row.
    ///
    /// # Errors
    ///
    /// Returns an inference error unless the output is a single row of
    /// finite scores.
    fn probabilities(&self, tensor: &Tensor4D) -> Result<Array1<f32>, EcgError> {
        let output = self.classifier.classify(tensor)?;
        if output.nrows() != 1 || output.ncols() == 0 {
            return Err(EcgError::inference_error(
                self.classifier.name(),
                &format!(
                    "expected a (1, classes) output for a single image, got {:?}",
                    output.shape()
                ),
                SimpleError::new("unexpected output shape"),
            ));
        }
        if let Some(idx) = output.iter().position(|p| !p.is_finite()) {
            return Err(EcgError::inference_error(
                self.classifier.name(),
                &format!("score for class index {idx} is {}", output[[0, idx]]),
                SimpleError::new("non-finite model output"),
            ));
        }
        Ok(output.row(0).to_owned())
    }

    /// Ranks one probability vector into a prediction.
    ///
    /// # Errors
    ///
    /// Returns [`EcgError::LabelMismatch`] if any ranked index has no class code.
    pub fn rank(&self, probabilities: ArrayView1<'_, f32>) -> Result<Prediction, EcgError> {
        let (indexes, scores) = self.topk.rank(probabilities)?;

        let ranked = indexes
            .into_iter()
            .zip(scores)
            .map(|(idx, score)| {
                let code = self.class_indices.code_for(idx)?;
                Ok(ClassScore::new(code, score))
            })
            .collect::<Result<Vec<_>, EcgError>>()?;

        Prediction::from_ranked(ranked).ok_or_else(|| {
            EcgError::processing_error(
                ProcessingStage::PostProcessing,
                "ranking classifier output",
                SimpleError::new("classifier returned no scores"),
            )
        })
    }

    /// Classifies one upload, resolving only the most confident class.
    ///
    /// Used by batch requests, which report the top class alone.
    pub fn predict_top1(&self, upload: &Upload) -> Result<ClassScore, EcgError> {
        if !upload.is_image() {
            return Err(EcgError::invalid_input(NOT_AN_IMAGE));
        }
        let tensor = self.preprocessor.apply(&upload.data)?;
        let probabilities = self.probabilities(&tensor)?;
        let (indexes, scores) = self.topk.rank(probabilities.view())?;
        let (idx, score) = indexes.into_iter().zip(scores).next().ok_or_else(|| {
            EcgError::processing_error(
                ProcessingStage::PostProcessing,
                "ranking classifier output",
                SimpleError::new("classifier returned no scores"),
            )
        })?;
        Ok(ClassScore::new(self.class_indices.code_for(idx)?, score))
    }

    /// Classifies each upload independently, preserving input order.
    ///
    /// Every problem, including a model/metadata mismatch, becomes a
    /// [`BatchItem::Failure`] for that file alone.
    pub fn predict_batch(&self, uploads: &[Upload]) -> Vec<BatchItem> {
        debug!(files = uploads.len(), "processing batch");
        if uploads.len() > self.parallel_threshold {
            uploads
                .par_iter()
                .map(|upload| self.batch_item(upload))
                .collect()
        } else {
            uploads.iter().map(|upload| self.batch_item(upload)).collect()
        }
    }

    fn batch_item(&self, upload: &Upload) -> BatchItem {
        match self.predict_top1(upload) {
            Ok(top) => BatchItem::success(&upload.filename, &top),
            Err(EcgError::InvalidInput { message }) => BatchItem::failure(&upload.filename, message),
            Err(e) if e.is_configuration_mismatch() => {
                error!(
                    model = self.classifier.name(),
                    filename = %upload.filename,
                    "{e}"
                );
                BatchItem::failure(&upload.filename, format!("{MODEL_METADATA_MISMATCH}: {e}"))
            }
            Err(e) => {
                debug!(filename = %upload.filename, "batch item failed: {e}");
                BatchItem::failure(&upload.filename, e.to_string())
            }
        }
    }
}
