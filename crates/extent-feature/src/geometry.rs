//! GeoJSON geometries handled by the editor
//!
//! The drawing surface only ever produces [`Geometry::Point`] and
//! [`Geometry::LineString`]; the multi variants appear once a feature has been
//! wrapped for persistence or loaded back from the server.

use serde::{Deserialize, Serialize};

/// A single GeoJSON position (`[lng, lat]`, optionally with altitude)
pub type Position = Vec<f64>;

/// GeoJSON geometry
///
/// Serializes as `{ "type": "...", "coordinates": ... }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum Geometry {
    /// Single position
    Point(Position),
    /// Ordered positions forming a line
    LineString(Vec<Position>),
    /// Several points
    MultiPoint(Vec<Position>),
    /// Several lines
    MultiLineString(Vec<Vec<Position>>),
}

impl Geometry {
    /// Whether this geometry is point-like or line-like
    #[inline]
    #[must_use]
    pub fn kind(&self) -> GeometryKind {
        match self {
            Self::Point(_) | Self::MultiPoint(_) => GeometryKind::Point,
            Self::LineString(_) | Self::MultiLineString(_) => GeometryKind::Line,
        }
    }

    /// GeoJSON `type` name
    #[inline]
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Point(_) => "Point",
            Self::LineString(_) => "LineString",
            Self::MultiPoint(_) => "MultiPoint",
            Self::MultiLineString(_) => "MultiLineString",
        }
    }

    /// Check if this is already a multi-geometry
    #[inline]
    #[must_use]
    pub fn is_multi(&self) -> bool {
        matches!(self, Self::MultiPoint(_) | Self::MultiLineString(_))
    }
}

/// Point-like or line-like
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeometryKind {
    /// `Point` / `MultiPoint`
    Point,
    /// `LineString` / `MultiLineString`
    Line,
}

impl std::fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Point => f.write_str("point"),
            Self::Line => f.write_str("line"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_serializes_as_geojson() {
        let geometry = Geometry::Point(vec![-97.74, 30.27]);
        let json = serde_json::to_value(&geometry).unwrap();
        assert_eq!(json["type"], "Point");
        assert_eq!(json["coordinates"][0], -97.74);
    }

    #[test]
    fn line_string_deserializes() {
        let json = r#"{"type":"LineString","coordinates":[[0.0,0.0],[1.0,1.0]]}"#;
        let geometry: Geometry = serde_json::from_str(json).unwrap();
        assert_eq!(geometry.kind(), GeometryKind::Line);
        assert_eq!(geometry.type_name(), "LineString");
        assert!(!geometry.is_multi());
    }

    #[test]
    fn multi_kinds() {
        assert_eq!(Geometry::MultiPoint(vec![]).kind(), GeometryKind::Point);
        assert_eq!(Geometry::MultiLineString(vec![]).kind(), GeometryKind::Line);
        assert!(Geometry::MultiPoint(vec![]).is_multi());
    }
}
