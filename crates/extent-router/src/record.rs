//! Insertion records

use extent_feature::{Geometry, Properties};
use serde::{Deserialize, Serialize};

/// One row ready for insertion into a feature table
///
/// Serializes flat: translated columns, then `project_extent_id` (drawn
/// features only), `source_layer` and `geography`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsertionRecord {
    /// Translated reference-layer columns
    #[serde(flatten)]
    pub attributes: Properties,
    /// Draw-identifier linking a drawn feature to its row
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_extent_id: Option<String>,
    /// Provenance tag
    pub source_layer: String,
    /// Wrapped multi-geometry
    pub geography: Geometry,
}

impl InsertionRecord {
    /// Column value
    #[inline]
    #[must_use]
    pub fn attribute(&self, column: &str) -> Option<&serde_json::Value> {
        self.attributes.get(column)
    }
}
