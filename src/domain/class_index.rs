//! The training-time mapping between class codes and model output positions.

use crate::core::EcgError;
use crate::domain::labels::ClassCode;
use serde::{Serialize, Serializer};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// Bijection between class codes and classifier output indices.
///
/// The forward direction (code to index) is what training persisted; the
/// inverse (index to code) is what ranking needs. Construction rejects
/// mappings that are not one-to-one, so every index the mapping knows resolves
/// to exactly one code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassIndexMapping {
    by_code: BTreeMap<ClassCode, usize>,
    by_index: HashMap<usize, ClassCode>,
}

impl ClassIndexMapping {
    /// Builds a mapping from code/index pairs.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the mapping is empty or two codes
    /// share an index.
    pub fn new(by_code: BTreeMap<ClassCode, usize>) -> Result<Self, EcgError> {
        if by_code.is_empty() {
            return Err(EcgError::config_error("class index mapping is empty"));
        }

        let mut by_index = HashMap::with_capacity(by_code.len());
        for (&code, &index) in &by_code {
            if let Some(previous) = by_index.insert(index, code) {
                return Err(EcgError::config_error_with_context(
                    "class_indices",
                    &index.to_string(),
                    &format!("index is assigned to both '{previous}' and '{code}'"),
                ));
            }
        }

        Ok(Self { by_code, by_index })
    }

    /// Parses the JSON object persisted at training time, e.g. `{"F": 0, "M": 1}`.
    pub fn from_json_str(content: &str) -> Result<Self, EcgError> {
        let by_code: BTreeMap<ClassCode, usize> = serde_json::from_str(content)?;
        Self::new(by_code)
    }

    /// Reads and parses the class-index metadata file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, EcgError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Resolves a model output index to its class code.
    ///
    /// # Errors
    ///
    /// Returns [`EcgError::LabelMismatch`] when the index is unknown, which
    /// means the model and the metadata come from different training runs.
    pub fn code_for(&self, index: usize) -> Result<ClassCode, EcgError> {
        self.by_index
            .get(&index)
            .copied()
            .ok_or(EcgError::LabelMismatch {
                index,
                known: self.len(),
            })
    }

    /// Returns the output index assigned to `code`, if the model knows it.
    pub fn index_of(&self, code: ClassCode) -> Option<usize> {
        self.by_code.get(&code).copied()
    }

    /// Number of classes in the mapping.
    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    /// Always false; empty mappings are rejected at construction.
    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }

    /// Code-to-index view, as persisted.
    pub fn as_map(&self) -> &BTreeMap<ClassCode, usize> {
        &self.by_code
    }
}

impl Serialize for ClassIndexMapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.by_code.serialize(serializer)
    }
}
