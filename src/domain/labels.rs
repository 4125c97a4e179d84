//! The fixed arrhythmia label set.
//!
//! Class codes are single letters assigned to heartbeat categories. The set is
//! defined at build time and never changes at runtime; the model's output
//! positions are tied to these codes through the class index mapping.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Arrhythmia category predicted by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ClassCode {
    /// Fusion of ventricular and normal beat.
    F,
    /// Myocardial infarction.
    M,
    /// Normal beat.
    N,
    /// Unclassifiable beat.
    Q,
    /// Supraventricular premature beat.
    S,
    /// Premature ventricular contraction.
    V,
}

impl ClassCode {
    /// Every class code, in code order.
    pub const ALL: [ClassCode; 6] = [
        ClassCode::F,
        ClassCode::M,
        ClassCode::N,
        ClassCode::Q,
        ClassCode::S,
        ClassCode::V,
    ];

    /// The single-letter code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassCode::F => "F",
            ClassCode::M => "M",
            ClassCode::N => "N",
            ClassCode::Q => "Q",
            ClassCode::S => "S",
            ClassCode::V => "V",
        }
    }

    /// Human-readable description of the category.
    pub fn description(&self) -> &'static str {
        match self {
            ClassCode::F => "Fusion of ventricular and normal beat",
            ClassCode::M => "Myocardial infarction",
            ClassCode::N => "Normal beat",
            ClassCode::Q => "Unclassifiable beat",
            ClassCode::S => "Supraventricular premature beat",
            ClassCode::V => "Premature ventricular contraction",
        }
    }
}

impl std::fmt::Display for ClassCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not one of the known class codes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown class code '{0}'")]
pub struct UnknownClassCode(pub String);

impl FromStr for ClassCode {
    type Err = UnknownClassCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "F" => Ok(ClassCode::F),
            "M" => Ok(ClassCode::M),
            "N" => Ok(ClassCode::N),
            "Q" => Ok(ClassCode::Q),
            "S" => Ok(ClassCode::S),
            "V" => Ok(ClassCode::V),
            other => Err(UnknownClassCode(other.to_string())),
        }
    }
}

impl Serialize for ClassCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ClassCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// The description table served by the metadata endpoint.
pub fn class_descriptions() -> BTreeMap<ClassCode, &'static str> {
    ClassCode::ALL
        .iter()
        .map(|code| (*code, code.description()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips_every_code() {
        for code in ClassCode::ALL {
            assert_eq!(code.as_str().parse::<ClassCode>(), Ok(code));
        }
    }

    #[test]
    fn test_parse_rejects_unknown_and_lowercase() {
        assert!("X".parse::<ClassCode>().is_err());
        assert!("n".parse::<ClassCode>().is_err());
        assert!("".parse::<ClassCode>().is_err());
    }

    #[test]
    fn test_descriptions_table_is_complete() {
        let table = class_descriptions();
        assert_eq!(table.len(), 6);
        assert_eq!(table[&ClassCode::N], "Normal beat");
        assert_eq!(table[&ClassCode::V], "Premature ventricular contraction");
    }

    #[test]
    fn test_descriptions_serialize_as_letter_keys() {
        let json = serde_json::to_value(class_descriptions()).unwrap();
        assert_eq!(json["F"], "Fusion of ventricular and normal beat");
        assert_eq!(json["Q"], "Unclassifiable beat");
    }
}
