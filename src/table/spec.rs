//! Column specifications

use crate::error::Result;
use crate::types::ScalarType;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One entry of a [`ColumnSpec`]: a source column and its target type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDef {
    /// Source column name (must exist in the source header)
    pub name: String,
    /// Target scalar type
    #[serde(rename = "type")]
    pub scalar_type: ScalarType,
}

/// Ordered mapping from source column name to target scalar type
///
/// The order of entries is the order of columns in the resulting
/// [`crate::table::TypedTable`]. Serialized as a list of `{name, type}`
/// entries so ordering stays explicit in YAML and JSON.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnSpec {
    entries: Vec<ColumnDef>,
}

impl ColumnSpec {
    /// Create an empty spec
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a column entry, preserving insertion order
    #[must_use]
    pub fn with(mut self, name: &str, scalar_type: ScalarType) -> Self {
        self.entries.push(ColumnDef {
            name: name.to_string(),
            scalar_type,
        });
        self
    }

    /// Load a spec from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load a spec from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a spec from a file, dispatching on the `.json` extension
    /// (anything else is treated as YAML)
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&content),
            _ => Self::from_yaml_str(&content),
        }
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the spec has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in declared order
    pub fn iter(&self) -> impl Iterator<Item = &ColumnDef> {
        self.entries.iter()
    }

    /// Column names in declared order
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_preserves_order() {
        let spec = ColumnSpec::new()
            .with("b", ScalarType::Integer)
            .with("a", ScalarType::Text);
        assert_eq!(spec.names(), vec!["b", "a"]);
    }

    #[test]
    fn test_from_yaml() {
        let yaml = "- name: col1\n  type: text\n- name: col2\n  type: float64\n";
        let spec = ColumnSpec::from_yaml_str(yaml).unwrap();
        assert_eq!(spec.len(), 2);
        assert_eq!(spec.iter().nth(1).unwrap().scalar_type, ScalarType::Float64);
    }

    #[test]
    fn test_from_json() {
        let json = r#"[{"name": "id", "type": "integer"}]"#;
        let spec = ColumnSpec::from_json_str(json).unwrap();
        assert_eq!(spec.names(), vec!["id"]);
    }
}
