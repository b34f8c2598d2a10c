//! Datamodel JSON parsing
//!
//! The datamodel is the schema description exported by the schema loader:
//! models with their fields, plus the enums those fields can reference.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Datamodel document (subset of fields we care about)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Datamodel {
    /// Enum declarations
    #[serde(default)]
    pub enums: Vec<DatamodelEnum>,

    /// Model declarations
    #[serde(default)]
    pub models: Vec<DatamodelModel>,
}

impl Datamodel {
    /// Load datamodel from file
    pub fn from_file(path: &Path) -> Result<Self, DatamodelError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| DatamodelError::IoError(path.display().to_string(), e.to_string()))?;

        Self::from_str(&contents)
    }

    /// Parse datamodel from JSON string
    pub fn from_str(json: &str) -> Result<Self, DatamodelError> {
        serde_json::from_str(json).map_err(|e| DatamodelError::ParseError(e.to_string()))
    }
}

/// An enum declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatamodelEnum {
    /// Logical name
    pub name: String,

    /// Database name, when mapped to something else
    #[serde(default)]
    pub db_name: Option<String>,

    /// Declared values
    #[serde(default)]
    pub values: Vec<DatamodelEnumValue>,

    /// Documentation
    #[serde(default)]
    pub documentation: Option<String>,
}

/// A single enum value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatamodelEnumValue {
    pub name: String,

    #[serde(default)]
    pub db_name: Option<String>,
}

/// A model (table) declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatamodelModel {
    /// Logical name
    pub name: String,

    /// Database table name, when mapped to something else
    #[serde(default)]
    pub db_name: Option<String>,

    /// Database schema
    #[serde(default)]
    pub schema: Option<String>,

    /// Documentation
    #[serde(default)]
    pub documentation: Option<String>,

    /// Fields, in declaration order
    #[serde(default)]
    pub fields: Vec<DatamodelField>,
}

/// A field declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatamodelField {
    /// Logical name
    pub name: String,

    /// Database column name, when mapped to something else
    #[serde(default)]
    pub db_name: Option<String>,

    /// Field kind
    pub kind: FieldKind,

    /// Type name; for enum fields this is the enum's logical name
    #[serde(rename = "type")]
    pub field_type: String,

    /// Documentation
    #[serde(default)]
    pub documentation: Option<String>,
}

/// Kind of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Plain column
    Scalar,

    /// Column typed with an enum
    Enum,

    /// Relation to another model (no column of its own)
    Object,

    /// Anything else the loader reports
    #[serde(other)]
    Unsupported,
}

impl FieldKind {
    /// Whether fields of this kind are backed by a column
    pub fn is_column(&self) -> bool {
        matches!(self, Self::Scalar | Self::Enum)
    }
}

/// Datamodel error types
#[derive(Debug, thiserror::Error)]
pub enum DatamodelError {
    #[error("Failed to read datamodel file {0}: {1}")]
    IoError(String, String),

    #[error("Failed to parse datamodel JSON: {0}")]
    ParseError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal_datamodel() {
        let datamodel = Datamodel::from_str("{}").unwrap();
        assert!(datamodel.enums.is_empty());
        assert!(datamodel.models.is_empty());
    }

    #[test]
    fn parse_field_kinds() {
        let json = r#"{
            "models": [{
                "name": "User",
                "fields": [
                    { "name": "id", "kind": "scalar", "type": "Int" },
                    { "name": "role", "kind": "enum", "type": "Role" },
                    { "name": "posts", "kind": "object", "type": "Post" },
                    { "name": "geo", "kind": "composite", "type": "Point" }
                ]
            }]
        }"#;

        let datamodel = Datamodel::from_str(json).unwrap();
        let kinds: Vec<_> = datamodel.models[0].fields.iter().map(|f| f.kind).collect();

        assert_eq!(
            kinds,
            vec![FieldKind::Scalar, FieldKind::Enum, FieldKind::Object, FieldKind::Unsupported]
        );
        assert!(kinds[0].is_column());
        assert!(!kinds[2].is_column());
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(matches!(
            Datamodel::from_str("{ not json"),
            Err(DatamodelError::ParseError(_))
        ));
    }
}
