//! Domain-level structures of the classification service.
//!
//! This module groups the fixed label set, the training-time class index
//! mapping, uploaded files, and the prediction results shaped for clients.

pub mod class_index;
pub mod labels;
pub mod prediction;
pub mod upload;

pub use class_index::ClassIndexMapping;
pub use labels::{ClassCode, UnknownClassCode, class_descriptions};
pub use prediction::{BatchItem, ClassScore, Prediction};
pub use upload::Upload;
