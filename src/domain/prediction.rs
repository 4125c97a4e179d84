//! Prediction results returned to clients.

use crate::domain::labels::ClassCode;
use serde::Serialize;

/// One ranked class with its confidence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassScore {
    /// Predicted class code.
    pub class: ClassCode,
    /// Description of the class.
    pub description: &'static str,
    /// Classifier probability in [0, 1].
    pub confidence: f32,
}

impl ClassScore {
    /// Creates a score for `class`, filling in its description.
    pub fn new(class: ClassCode, confidence: f32) -> Self {
        Self {
            class,
            description: class.description(),
            confidence,
        }
    }
}

/// Full result of classifying one image.
///
/// The top-level fields describe the argmax class; `top_predictions` holds up
/// to three classes in descending confidence, its first entry being the same
/// class as the top-level one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    /// Argmax class code.
    pub class: ClassCode,
    /// Description of the argmax class.
    pub description: &'static str,
    /// Probability of the argmax class.
    pub confidence: f32,
    /// Highest-confidence classes, sorted descending.
    pub top_predictions: Vec<ClassScore>,
}

impl Prediction {
    /// Builds a prediction from a non-empty ranked list.
    ///
    /// Returns `None` when `ranked` is empty.
    pub fn from_ranked(ranked: Vec<ClassScore>) -> Option<Self> {
        let top = ranked.first()?.clone();
        Some(Self {
            class: top.class,
            description: top.description,
            confidence: top.confidence,
            top_predictions: ranked,
        })
    }
}

/// Outcome for one file in a batch request.
///
/// Serialized untagged, so clients see either
/// `{"filename", "class", "description", "confidence"}` or
/// `{"filename", "error"}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BatchItem {
    /// The file was classified.
    Success {
        /// Name of the uploaded file.
        filename: String,
        /// Argmax class code.
        class: ClassCode,
        /// Description of the argmax class.
        description: &'static str,
        /// Probability of the argmax class.
        confidence: f32,
    },
    /// The file could not be classified.
    Failure {
        /// Name of the uploaded file.
        filename: String,
        /// Human-readable reason.
        error: String,
    },
}

impl BatchItem {
    /// Creates a success entry from the top-ranked class.
    pub fn success(filename: impl Into<String>, top: &ClassScore) -> Self {
        Self::Success {
            filename: filename.into(),
            class: top.class,
            description: top.description,
            confidence: top.confidence,
        }
    }

    /// Creates a failure entry.
    pub fn failure(filename: impl Into<String>, error: impl Into<String>) -> Self {
        Self::Failure {
            filename: filename.into(),
            error: error.into(),
        }
    }

    /// Name of the file this entry describes.
    pub fn filename(&self) -> &str {
        match self {
            Self::Success { filename, .. } | Self::Failure { filename, .. } => filename,
        }
    }

    /// Whether the file was classified.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_prediction_serializes_with_class_key() {
        let prediction = Prediction::from_ranked(vec![
            ClassScore::new(ClassCode::N, 0.75),
            ClassScore::new(ClassCode::V, 0.25),
        ])
        .unwrap();

        let value = serde_json::to_value(&prediction).unwrap();
        assert_eq!(value["class"], "N");
        assert_eq!(value["description"], "Normal beat");
        assert_eq!(value["confidence"], json!(0.75));
        assert_eq!(value["top_predictions"][1]["class"], "V");
        assert_eq!(value["top_predictions"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_from_ranked_empty_is_none() {
        assert!(Prediction::from_ranked(Vec::new()).is_none());
    }

    #[test]
    fn test_batch_item_shapes() {
        let top = ClassScore::new(ClassCode::S, 0.5);
        let ok = serde_json::to_value(BatchItem::success("a.png", &top)).unwrap();
        assert_eq!(
            ok,
            json!({
                "filename": "a.png",
                "class": "S",
                "description": "Supraventricular premature beat",
                "confidence": 0.5
            })
        );

        let err = serde_json::to_value(BatchItem::failure("b.txt", "File must be an image")).unwrap();
        assert_eq!(
            err,
            json!({"filename": "b.txt", "error": "File must be an image"})
        );
    }
}
