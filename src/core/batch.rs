//! Tensor aliases shared by the preprocessing and inference stages.

/// A 2D tensor of `f32` values, laid out as (batch, classes).
pub type Tensor2D = ndarray::Array2<f32>;

/// A 4D tensor of `f32` values, laid out as (batch, height, width, channels).
pub type Tensor4D = ndarray::Array4<f32>;
