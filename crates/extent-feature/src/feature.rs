//! Map features
//!
//! Provides [`Feature`], a GeoJSON feature with an open property bag.

use crate::geometry::Geometry;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Property holding the application draw-identifier
pub const DRAW_ID_KEY: &str = "project_extent_id";

/// Property holding the layer tag (drawn layer or reference layer name)
pub const SOURCE_LAYER_KEY: &str = "sourceLayer";

/// Property holding the human-readable label of a captured feature
pub const LABEL_KEY: &str = "_label";

/// Feature property bag
pub type Properties = serde_json::Map<String, Value>;

/// GeoJSON feature id: numeric for persisted/reference rows, text otherwise
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureId {
    /// Numeric id (database row or reference-layer id)
    Number(i64),
    /// Text id (draw-identifier, asset registry id, or a tool-generated id)
    Text(String),
}

impl FeatureId {
    /// Check if the id is numeric
    #[inline]
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Number(_))
    }

    /// Numeric value, if any
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(_) => None,
        }
    }

    /// Convert a JSON property value into an id
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_i64().map(Self::Number),
            Value::String(s) if !s.is_empty() => Some(Self::Text(s.clone())),
            _ => None,
        }
    }

    /// Convert into a JSON value
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::Number(n) => Value::from(*n),
            Self::Text(s) => Value::from(s.as_str()),
        }
    }
}

impl fmt::Display for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for FeatureId {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for FeatureId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// A GeoJSON feature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "Feature")]
pub struct Feature {
    /// Feature id, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<FeatureId>,
    /// Geometry
    pub geometry: Geometry,
    /// Property bag
    #[serde(default, deserialize_with = "null_as_empty")]
    pub properties: Properties,
}

impl Feature {
    /// Create feature without id or properties
    #[inline]
    #[must_use]
    pub fn new(geometry: Geometry) -> Self {
        Self {
            id: None,
            geometry,
            properties: Properties::new(),
        }
    }

    /// With id
    #[inline]
    #[must_use]
    pub fn with_id(mut self, id: impl Into<FeatureId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// With property
    #[inline]
    #[must_use]
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// With geometry replaced, everything else kept
    #[inline]
    #[must_use]
    pub fn with_geometry(&self, geometry: Geometry) -> Self {
        Self {
            geometry,
            ..self.clone()
        }
    }

    /// Raw property value
    #[inline]
    #[must_use]
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key).filter(|v| !v.is_null())
    }

    /// String property value
    #[inline]
    #[must_use]
    pub fn property_str(&self, key: &str) -> Option<&str> {
        self.property(key).and_then(Value::as_str)
    }

    /// Layer tag (`sourceLayer`)
    #[inline]
    #[must_use]
    pub fn source_layer(&self) -> Option<&str> {
        self.property_str(SOURCE_LAYER_KEY)
    }

    /// Human-readable label of a captured feature
    #[inline]
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.property_str(LABEL_KEY)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Properties, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Properties>::deserialize(deserializer)?.unwrap_or_default())
}
