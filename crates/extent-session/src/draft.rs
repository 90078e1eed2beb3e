//! Draft components

use extent_feature::{DrawMode, Feature};
use extent_router::FeatureTable;
use serde::{Deserialize, Serialize};

/// An unsaved component being assembled in the editing session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftComponent {
    /// Component type reference
    #[serde(default)]
    pub component_id: Option<i64>,
    /// Free-text description
    #[serde(default)]
    pub description: Option<String>,
    /// Subcomponent references
    #[serde(default)]
    pub subcomponents: Vec<i64>,
    /// Work type references
    #[serde(default)]
    pub work_types: Vec<i64>,
    /// Tag references
    #[serde(default)]
    pub tags: Vec<i64>,
    /// Table the component's geometry is stored in
    pub feature_table: FeatureTable,
    /// Accumulated features (drawn and captured)
    #[serde(default)]
    pub features: Vec<Feature>,
}

impl DraftComponent {
    /// Create empty draft for a table
    #[inline]
    #[must_use]
    pub fn new(feature_table: FeatureTable) -> Self {
        Self {
            component_id: None,
            description: None,
            subcomponents: Vec::new(),
            work_types: Vec::new(),
            tags: Vec::new(),
            feature_table,
            features: Vec::new(),
        }
    }

    /// With component type
    #[inline]
    #[must_use]
    pub fn with_component_id(mut self, component_id: i64) -> Self {
        self.component_id = Some(component_id);
        self
    }

    /// With description
    #[inline]
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// With features (edit flow: the persisted features)
    #[inline]
    #[must_use]
    pub fn with_features(mut self, features: Vec<Feature>) -> Self {
        self.features = features;
        self
    }

    /// Attribute fields
    #[must_use]
    pub fn attributes(&self) -> DraftAttributes {
        DraftAttributes {
            component_id: self.component_id,
            description: self.description.clone(),
            subcomponents: self.subcomponents.clone(),
            work_types: self.work_types.clone(),
            tags: self.tags.clone(),
            feature_table: self.feature_table,
        }
    }

    /// Replace attribute fields, keeping features
    pub fn apply_attributes(&mut self, attributes: DraftAttributes) {
        self.component_id = attributes.component_id;
        self.description = attributes.description;
        self.subcomponents = attributes.subcomponents;
        self.work_types = attributes.work_types;
        self.tags = attributes.tags;
        self.feature_table = attributes.feature_table;
    }

    /// Draw mode for this component's geometry
    #[inline]
    #[must_use]
    pub fn draw_mode(&self) -> DrawMode {
        DrawMode::for_kind(self.feature_table.kind())
    }

    /// Check if this is a signal component
    #[inline]
    #[must_use]
    pub fn is_signal(&self) -> bool {
        self.feature_table.is_signal()
    }
}

/// Draft fields other than the feature list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftAttributes {
    /// Component type reference
    pub component_id: Option<i64>,
    /// Free-text description
    pub description: Option<String>,
    /// Subcomponent references
    pub subcomponents: Vec<i64>,
    /// Work type references
    pub work_types: Vec<i64>,
    /// Tag references
    pub tags: Vec<i64>,
    /// Feature table
    pub feature_table: FeatureTable,
}
