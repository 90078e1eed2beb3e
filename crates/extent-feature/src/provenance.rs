//! Draw provenance
//!
//! Splits features into *drawn* (created by the user on the drawing surface)
//! and *captured* (selected from a reference layer). The presence of the
//! draw-identifier is the only discriminator; [`is_drawn`] is what every other
//! crate uses to partition a feature list.

use crate::error::FeatureError;
use crate::feature::{Feature, FeatureId, DRAW_ID_KEY, SOURCE_LAYER_KEY};
use crate::geometry::GeometryKind;
use crate::reference::ReferenceLayer;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Application-generated identifier of a drawn feature
///
/// Stable for the whole editing session and persisted as `project_extent_id`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DrawId(String);

impl DrawId {
    /// Generate a fresh random identifier
    #[inline]
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wrap an existing identifier (e.g. loaded from the server)
    #[inline]
    #[must_use]
    pub fn from_existing(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Identifier text
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DrawId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which kind of geometry the drawing surface is producing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawMode {
    /// Drawing points
    Points,
    /// Drawing lines
    Lines,
}

impl DrawMode {
    /// Mode name
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Points => "points",
            Self::Lines => "lines",
        }
    }

    /// Layer tag assigned to features drawn in this mode
    #[inline]
    #[must_use]
    pub fn layer(&self) -> DrawnLayer {
        match self {
            Self::Points => DrawnLayer::Point,
            Self::Lines => DrawnLayer::Line,
        }
    }

    /// Draw mode producing the given geometry kind
    #[inline]
    #[must_use]
    pub fn for_kind(kind: GeometryKind) -> Self {
        match kind {
            GeometryKind::Point => Self::Points,
            GeometryKind::Line => Self::Lines,
        }
    }
}

impl FromStr for DrawMode {
    type Err = FeatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "points" => Ok(Self::Points),
            "lines" => Ok(Self::Lines),
            other => Err(FeatureError::UnknownDrawMode(other.to_string())),
        }
    }
}

/// Layer tag of a drawn feature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawnLayer {
    /// `drawnByUserLine`
    Line,
    /// `drawnByUserPoint`
    Point,
}

impl DrawnLayer {
    /// Tag stored in `sourceLayer`
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Line => "drawnByUserLine",
            Self::Point => "drawnByUserPoint",
        }
    }

    /// Parse a `sourceLayer` tag
    #[inline]
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "drawnByUserLine" => Some(Self::Line),
            "drawnByUserPoint" => Some(Self::Point),
            _ => None,
        }
    }

    /// Geometry kind stored under this tag
    #[inline]
    #[must_use]
    pub fn kind(&self) -> GeometryKind {
        match self {
            Self::Line => GeometryKind::Line,
            Self::Point => GeometryKind::Point,
        }
    }
}

/// Typed view of where a feature came from
#[derive(Debug, Clone, PartialEq)]
pub enum Provenance<'a> {
    /// Drawn on the surface by the user
    Drawn {
        /// Draw-identifier
        draw_id: DrawId,
        /// Layer tag, if present
        layer: Option<DrawnLayer>,
    },
    /// Selected from a reference layer
    Captured {
        /// Reference layer name
        source_layer: Option<&'a str>,
        /// Reference layer's own id
        reference_id: Option<&'a FeatureId>,
        /// Human-readable label
        label: Option<&'a str>,
    },
}

/// Key used to match a feature across tool events
///
/// Each variant is its own namespace: a reference-layer id never matches a
/// feature-table row id, even when the numbers are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FeatureKey {
    /// Drawn feature, matched by draw-identifier
    Drawn(DrawId),
    /// Feature of a reference layer, matched by the layer's own id
    Reference(ReferenceLayer, FeatureId),
    /// Persisted row without reference identity, matched by row id
    Row(i64),
}

/// Tag a freshly created feature as drawn
///
/// Returns a new feature carrying a generated draw-identifier (also mirrored
/// into the feature `id`) and the layer tag for `mode`. A feature that is
/// already drawn comes back unchanged.
#[must_use]
pub fn assign_draw_provenance(feature: &Feature, mode: DrawMode) -> Feature {
    assign_draw_provenance_with(feature, mode, DrawId::generate())
}

/// [`assign_draw_provenance`] with a caller-chosen identifier
#[must_use]
pub fn assign_draw_provenance_with(feature: &Feature, mode: DrawMode, draw_id: DrawId) -> Feature {
    if is_drawn(feature) {
        return feature.clone();
    }

    let mut drawn = feature.clone();
    drawn.id = Some(FeatureId::Text(draw_id.as_str().to_string()));
    drawn
        .properties
        .insert(DRAW_ID_KEY.to_string(), draw_id.as_str().into());
    drawn
        .properties
        .insert(SOURCE_LAYER_KEY.to_string(), mode.layer().as_str().into());
    drawn
}

/// Check if a feature was drawn by the user
#[inline]
#[must_use]
pub fn is_drawn(feature: &Feature) -> bool {
    feature.property_str(DRAW_ID_KEY).is_some()
}

/// Draw-identifier of a drawn feature
#[inline]
#[must_use]
pub fn draw_id(feature: &Feature) -> Option<DrawId> {
    feature.property_str(DRAW_ID_KEY).map(DrawId::from_existing)
}

/// Layer tag of a drawn feature
#[inline]
#[must_use]
pub fn drawn_layer(feature: &Feature) -> Option<DrawnLayer> {
    feature.source_layer().and_then(DrawnLayer::from_tag)
}

/// Classify a feature
#[must_use]
pub fn classify(feature: &Feature) -> Provenance<'_> {
    match draw_id(feature) {
        Some(draw_id) => Provenance::Drawn {
            draw_id,
            layer: drawn_layer(feature),
        },
        None => Provenance::Captured {
            source_layer: feature.source_layer(),
            reference_id: feature.id.as_ref(),
            label: feature.label(),
        },
    }
}

/// Stable matching key, if the feature has one
///
/// Drawn features match by draw-identifier. Features of a reference layer
/// (freshly captured or loaded from a feature table) match by the id the
/// layer itself assigns, read from the layer's id property, so a persisted
/// row id can never collide with a reference id. Remaining numeric ids are
/// row ids. Anything else carries a transient id generated by the drawing
/// tool.
#[must_use]
pub fn feature_key(feature: &Feature) -> Option<FeatureKey> {
    if let Some(draw_id) = draw_id(feature) {
        return Some(FeatureKey::Drawn(draw_id));
    }
    let reference = feature
        .source_layer()
        .and_then(ReferenceLayer::from_source_layer)
        .and_then(|layer| {
            feature
                .property(layer.id_key())
                .and_then(FeatureId::from_value)
                .map(|id| FeatureKey::Reference(layer, id))
        });
    reference.or_else(|| {
        feature
            .id
            .as_ref()
            .and_then(FeatureId::as_i64)
            .map(FeatureKey::Row)
    })
}

/// Check if the feature id is stable (not a transient tool id)
#[inline]
#[must_use]
pub fn has_stable_id(feature: &Feature) -> bool {
    feature_key(feature).is_some()
}

/// Split features into `(drawn, captured)`, keeping order
#[must_use]
pub fn partition(features: &[Feature]) -> (Vec<&Feature>, Vec<&Feature>) {
    features.iter().partition(|f| is_drawn(f))
}
