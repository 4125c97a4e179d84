//! Preprocessing of uploaded ECG images into model input tensors.
//!
//! The pipeline is fixed: decode, reduce to grayscale, stretch to
//! 128x128, scale by 1/255 and lay out as (1, 128, 128, 1). It is pure, so the
//! same bytes always produce the same tensor.

use crate::core::constants::{INPUT_CHANNELS, INPUT_SIZE, PIXEL_SCALE};
use crate::core::errors::SimpleError;
use crate::core::{EcgError, ProcessingStage, Tensor4D};
use crate::processors::grayscale::to_grayscale;
use image::{DynamicImage, GrayImage, imageops::FilterType};
use tracing::debug;

/// Converts uploaded image bytes into the normalized tensor the classifier expects.
#[derive(Debug, Clone)]
pub struct EcgPreprocessor {
    /// Output side length in pixels.
    input_size: u32,
    /// Resampling filter used for the stretch.
    resize_filter: FilterType,
}

impl Default for EcgPreprocessor {
    fn default() -> Self {
        Self::new()
    }
}

impl EcgPreprocessor {
    /// Creates a preprocessor for the 128x128 model input with bicubic resampling.
    pub fn new() -> Self {
        Self {
            input_size: INPUT_SIZE,
            resize_filter: FilterType::CatmullRom,
        }
    }

    /// Overrides the resampling filter.
    pub fn with_resize_filter(mut self, filter: FilterType) -> Self {
        self.resize_filter = filter;
        self
    }

    /// Output side length in pixels.
    pub fn input_size(&self) -> u32 {
        self.input_size
    }

    /// Runs the full pipeline on raw upload bytes.
    ///
    /// # Errors
    ///
    /// Fails when the bytes are empty or not a decodable image.
    pub fn apply(&self, bytes: &[u8]) -> Result<Tensor4D, EcgError> {
        let img = self.decode(bytes)?;
        self.apply_image(img)
    }

    /// Runs the pipeline on an already decoded image.
    pub fn apply_image(&self, img: DynamicImage) -> Result<Tensor4D, EcgError> {
        debug!(
            width = img.width(),
            height = img.height(),
            color = ?img.color(),
            "preprocessing image"
        );
        let gray = to_grayscale(img);
        let resized = self.resize(&gray)?;
        self.to_tensor(&resized)
    }

    /// Decodes bytes into an image, guessing the format from the content.
    pub fn decode(&self, bytes: &[u8]) -> Result<DynamicImage, EcgError> {
        if bytes.is_empty() {
            return Err(EcgError::processing_error(
                ProcessingStage::Decode,
                "empty upload",
                SimpleError::new("no image data"),
            ));
        }
        Ok(image::load_from_memory(bytes)?)
    }

    /// Stretches the image to `input_size` x `input_size`, ignoring aspect ratio.
    pub fn resize(&self, gray: &GrayImage) -> Result<GrayImage, EcgError> {
        let (width, height) = gray.dimensions();
        if width == 0 || height == 0 {
            return Err(EcgError::processing_error(
                ProcessingStage::Resize,
                &format!("cannot resize {width}x{height} image"),
                SimpleError::new("image has a zero dimension"),
            ));
        }
        Ok(image::imageops::resize(
            gray,
            self.input_size,
            self.input_size,
            self.resize_filter,
        ))
    }

    /// Scales intensities into [0, 1] and lays them out as (1, H, W, 1).
    pub fn to_tensor(&self, gray: &GrayImage) -> Result<Tensor4D, EcgError> {
        let (width, height) = gray.dimensions();
        let data: Vec<f32> = gray
            .as_raw()
            .iter()
            .map(|&v| v as f32 / PIXEL_SCALE)
            .collect();
        Tensor4D::from_shape_vec(
            (1, height as usize, width as usize, INPUT_CHANNELS),
            data,
        )
        .map_err(|e| EcgError::tensor_operation("failed to shape grayscale pixels", e))
    }
}
