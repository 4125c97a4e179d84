use super::*;
use crate::core::errors::SimpleError;
use crate::core::traits::Classifier;
use crate::core::{Tensor2D, Tensor4D};
use ndarray::ArrayView2;
use ort::value::TensorRef;

impl OrtInfer {
    fn run_inference_with_processor<T>(
        &self,
        x: &Tensor4D,
        processor: impl FnOnce(&[i64], &[f32]) -> Result<T, EcgError>,
    ) -> Result<T, EcgError> {
        let input_shape = x.shape().to_vec();

        let input_tensor = TensorRef::from_array_view(x.view()).map_err(|e| {
            EcgError::inference_error(
                &self.model_name,
                &format!("Failed to convert input tensor with shape {:?}", input_shape),
                e,
            )
        })?;

        let inputs = ort::inputs![self.input_name.as_str() => input_tensor];

        let idx = self
            .next_idx
            .fetch_add(1, std::sync::atomic::Ordering::Relaxed)
            % self.sessions.len();
        let mut session_guard = self.sessions[idx].lock().map_err(|_| {
            EcgError::inference_error(
                &self.model_name,
                &format!(
                    "Failed to acquire session lock for session {}/{}",
                    idx,
                    self.sessions.len()
                ),
                SimpleError::new("Session lock acquisition failed"),
            )
        })?;

        let outputs = session_guard.run(inputs).map_err(|e| {
            EcgError::inference_error(
                &self.model_name,
                &format!(
                    "ONNX Runtime inference failed with input '{}' -> output '{}'",
                    self.input_name, self.output_name
                ),
                e,
            )
        })?;

        let (output_shape, output_data) = outputs[self.output_name.as_str()]
            .try_extract_tensor::<f32>()
            .map_err(|e| {
                EcgError::inference_error(
                    &self.model_name,
                    &format!("Failed to extract output tensor '{}' as f32", self.output_name),
                    e,
                )
            })?;

        processor(output_shape, output_data)
    }

    /// Runs the model and returns a (batch, classes) output matrix.
    pub fn infer_2d(&self, x: &Tensor4D) -> Result<Tensor2D, EcgError> {
        let batch_size = x.shape()[0];
        let input_shape = x.shape().to_vec();
        self.run_inference_with_processor(x, |output_shape, output_data| {
            if output_shape.len() != 2 {
                return Err(EcgError::inference_error(
                    &self.model_name,
                    &format!(
                        "expected 2D output tensor, got {}D with shape {:?}",
                        output_shape.len(),
                        output_shape
                    ),
                    SimpleError::new("Invalid output tensor dimensions"),
                ));
            }

            let num_classes = output_shape[1] as usize;
            let expected_len = batch_size * num_classes;

            if output_data.len() != expected_len {
                return Err(EcgError::inference_error(
                    &self.model_name,
                    &format!(
                        "output data size mismatch for input shape {:?} -> output shape {:?}",
                        input_shape, output_shape
                    ),
                    SimpleError::new("Output tensor data size mismatch"),
                ));
            }

            let array_view = ArrayView2::from_shape((batch_size, num_classes), output_data)?;
            Ok(array_view.to_owned())
        })
    }
}

impl Classifier for OrtInfer {
    fn name(&self) -> &str {
        &self.model_name
    }

    fn num_classes(&self) -> Option<usize> {
        self.primary_output_shape()
            .and_then(|shape| static_class_count(&shape))
    }

    fn classify(&self, input: &Tensor4D) -> Result<Tensor2D, EcgError> {
        self.infer_2d(input)
    }
}
