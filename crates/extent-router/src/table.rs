//! Feature tables
//!
//! Static routing data: which reference properties each table keeps (and under
//! what column name), and which multi-geometry it stores.

use crate::error::RouterError;
use extent_feature::{DrawnLayer, Geometry, GeometryKind, ReferenceLayer};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Database table storing a component's geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FeatureTable {
    /// Street centerline segments
    #[serde(rename = "feature_street_segments")]
    StreetSegments,
    /// Street intersections
    #[serde(rename = "feature_intersections")]
    Intersections,
    /// Traffic signals
    #[serde(rename = "feature_signals")]
    Signals,
    /// Lines drawn by the user
    #[serde(rename = "feature_drawn_lines")]
    DrawnLines,
    /// Points drawn by the user
    #[serde(rename = "feature_drawn_points")]
    DrawnPoints,
    /// School zone beacons
    #[serde(rename = "feature_school_beacons")]
    SchoolBeacons,
}

/// Translation rules for one table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableRoute {
    /// Table
    pub table: FeatureTable,
    /// Geometry kind stored (decides the multi-geometry wrapping)
    pub kind: GeometryKind,
    /// `(source property, column)` pairs copied from captured features
    pub key_map: &'static [(&'static str, &'static str)],
    /// `source_layer` used when a feature carries no layer tag
    pub default_source_layer: &'static str,
}

const STREET_SEGMENT_KEYS: &[(&str, &str)] = &[
    ("CTN_SEGMENT_ID", "ctn_segment_id"),
    ("FROM_ADDRESS_MIN", "from_address_min"),
    ("TO_ADDRESS_MAX", "to_address_max"),
    ("FULL_STREET_NAME", "full_street_name"),
    ("LINE_TYPE", "line_type"),
    ("SYMBOL", "symbol"),
];

const INTERSECTION_KEYS: &[(&str, &str)] = &[("INTERSECTION_ID", "intersection_id")];

const SIGNAL_KEYS: &[(&str, &str)] = &[
    ("id", "knack_id"),
    ("signal_id", "signal_id"),
    ("location_name", "location_name"),
    ("signal_type", "signal_type"),
];

const SCHOOL_BEACON_KEYS: &[(&str, &str)] = &[
    ("id", "knack_id"),
    ("beacon_id", "beacon_id"),
    ("zone_name", "zone_name"),
    ("location_name", "location_name"),
];

static STREET_SEGMENTS: TableRoute = TableRoute {
    table: FeatureTable::StreetSegments,
    kind: GeometryKind::Line,
    key_map: STREET_SEGMENT_KEYS,
    default_source_layer: "ATD_ADMIN.CTN",
};

static INTERSECTIONS: TableRoute = TableRoute {
    table: FeatureTable::Intersections,
    kind: GeometryKind::Point,
    key_map: INTERSECTION_KEYS,
    default_source_layer: "ATD_ADMIN.CTN_Intersections",
};

static SIGNALS: TableRoute = TableRoute {
    table: FeatureTable::Signals,
    kind: GeometryKind::Point,
    key_map: SIGNAL_KEYS,
    default_source_layer: "ATD_ADMIN.signals",
};

static SCHOOL_BEACONS: TableRoute = TableRoute {
    table: FeatureTable::SchoolBeacons,
    kind: GeometryKind::Point,
    key_map: SCHOOL_BEACON_KEYS,
    default_source_layer: "ATD_ADMIN.school_beacons",
};

static DRAWN_LINES: TableRoute = TableRoute {
    table: FeatureTable::DrawnLines,
    kind: GeometryKind::Line,
    key_map: &[],
    default_source_layer: "drawnByUserLine",
};

static DRAWN_POINTS: TableRoute = TableRoute {
    table: FeatureTable::DrawnPoints,
    kind: GeometryKind::Point,
    key_map: &[],
    default_source_layer: "drawnByUserPoint",
};

impl FeatureTable {
    /// All tables
    pub const ALL: [Self; 6] = [
        Self::StreetSegments,
        Self::Intersections,
        Self::Signals,
        Self::DrawnLines,
        Self::DrawnPoints,
        Self::SchoolBeacons,
    ];

    /// Table name
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StreetSegments => "feature_street_segments",
            Self::Intersections => "feature_intersections",
            Self::Signals => "feature_signals",
            Self::DrawnLines => "feature_drawn_lines",
            Self::DrawnPoints => "feature_drawn_points",
            Self::SchoolBeacons => "feature_school_beacons",
        }
    }

    /// Translation rules
    #[inline]
    #[must_use]
    pub fn route(&self) -> &'static TableRoute {
        match self {
            Self::StreetSegments => &STREET_SEGMENTS,
            Self::Intersections => &INTERSECTIONS,
            Self::Signals => &SIGNALS,
            Self::DrawnLines => &DRAWN_LINES,
            Self::DrawnPoints => &DRAWN_POINTS,
            Self::SchoolBeacons => &SCHOOL_BEACONS,
        }
    }

    /// Geometry kind stored
    #[inline]
    #[must_use]
    pub fn kind(&self) -> GeometryKind {
        self.route().kind
    }

    /// Check if this is the signal table (dedicated transform, one feature max)
    #[inline]
    #[must_use]
    pub fn is_signal(&self) -> bool {
        matches!(self, Self::Signals)
    }

    /// Check if this table stores drawn features
    #[inline]
    #[must_use]
    pub fn is_drawn(&self) -> bool {
        matches!(self, Self::DrawnLines | Self::DrawnPoints)
    }

    /// Reference layer feeding this table, if any
    #[inline]
    #[must_use]
    pub fn reference_layer(&self) -> Option<ReferenceLayer> {
        match self {
            Self::StreetSegments => Some(ReferenceLayer::Centerline),
            Self::Intersections => Some(ReferenceLayer::Intersections),
            Self::Signals => Some(ReferenceLayer::Signals),
            Self::SchoolBeacons => Some(ReferenceLayer::SchoolBeacons),
            Self::DrawnLines | Self::DrawnPoints => None,
        }
    }

    /// Drawn table receiving features drawn for a component of this table
    #[inline]
    #[must_use]
    pub fn drawn_counterpart(&self) -> Self {
        Self::drawn_for(self.kind())
    }

    /// Drawn table for a geometry kind
    #[inline]
    #[must_use]
    pub fn drawn_for(kind: GeometryKind) -> Self {
        match kind {
            GeometryKind::Line => Self::DrawnLines,
            GeometryKind::Point => Self::DrawnPoints,
        }
    }

    /// Drawn table for a drawn layer tag
    #[inline]
    #[must_use]
    pub fn for_drawn_layer(layer: DrawnLayer) -> Self {
        Self::drawn_for(layer.kind())
    }

    /// Wrap a geometry in this table's multi-geometry envelope
    ///
    /// `Point` becomes a one-element `MultiPoint`, `LineString` a one-element
    /// `MultiLineString`. Geometries already wrapped pass through.
    pub fn wrap(&self, geometry: &Geometry) -> Result<Geometry, RouterError> {
        match (self.kind(), geometry) {
            (GeometryKind::Point, Geometry::Point(p)) => Ok(Geometry::MultiPoint(vec![p.clone()])),
            (GeometryKind::Line, Geometry::LineString(l)) => {
                Ok(Geometry::MultiLineString(vec![l.clone()]))
            }
            (GeometryKind::Point, Geometry::MultiPoint(_))
            | (GeometryKind::Line, Geometry::MultiLineString(_)) => Ok(geometry.clone()),
            (expected, found) => Err(RouterError::GeometryMismatch {
                table: self.as_str(),
                expected,
                found: found.type_name(),
            }),
        }
    }
}

impl fmt::Display for FeatureTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeatureTable {
    type Err = RouterError;

    /// Parse a table name
    ///
    /// An unknown name is a configuration error. With the `strict-debug`
    /// feature it panics instead of returning.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(table) = Self::ALL.into_iter().find(|t| t.as_str() == s) {
            return Ok(table);
        }

        tracing::error!(table = s, "unknown feature table");

        #[cfg(feature = "strict-debug")]
        panic!("unknown feature table: {s}");

        #[allow(unreachable_code)]
        Err(RouterError::UnknownTable(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_table_has_one_route() {
        for table in FeatureTable::ALL {
            assert_eq!(table.route().table, table);
            assert_eq!(table.as_str().parse::<FeatureTable>().unwrap(), table);
        }
    }

    #[test]
    fn line_tables() {
        assert_eq!(FeatureTable::StreetSegments.kind(), GeometryKind::Line);
        assert_eq!(FeatureTable::DrawnLines.kind(), GeometryKind::Line);
        for table in [
            FeatureTable::Intersections,
            FeatureTable::Signals,
            FeatureTable::DrawnPoints,
            FeatureTable::SchoolBeacons,
        ] {
            assert_eq!(table.kind(), GeometryKind::Point);
        }
    }

    #[test]
    fn drawn_counterparts() {
        assert_eq!(FeatureTable::StreetSegments.drawn_counterpart(), FeatureTable::DrawnLines);
        assert_eq!(FeatureTable::Signals.drawn_counterpart(), FeatureTable::DrawnPoints);
        assert_eq!(FeatureTable::for_drawn_layer(DrawnLayer::Line), FeatureTable::DrawnLines);
    }

    #[cfg(not(feature = "strict-debug"))]
    #[test]
    fn unknown_table_is_config_error() {
        let err = "feature_bike_lanes".parse::<FeatureTable>().unwrap_err();
        assert_eq!(err, RouterError::UnknownTable("feature_bike_lanes".to_string()));
        assert!(err.is_config_error());
        assert!(!err.is_recoverable());
    }

    #[test]
    fn wrap_point() {
        let wrapped = FeatureTable::Intersections
            .wrap(&Geometry::Point(vec![1.0, 2.0]))
            .unwrap();
        assert_eq!(wrapped, Geometry::MultiPoint(vec![vec![1.0, 2.0]]));
    }

    #[test]
    fn wrap_passes_multi_through() {
        let multi = Geometry::MultiLineString(vec![vec![vec![0.0, 0.0], vec![1.0, 0.0]]]);
        assert_eq!(FeatureTable::DrawnLines.wrap(&multi).unwrap(), multi);
    }

    #[test]
    fn wrap_rejects_wrong_kind() {
        let err = FeatureTable::StreetSegments
            .wrap(&Geometry::Point(vec![0.0, 0.0]))
            .unwrap_err();
        assert!(matches!(
            err,
            RouterError::GeometryMismatch {
                expected: GeometryKind::Line,
                found: "Point",
                ..
            }
        ));
        assert!(err.is_recoverable());
    }

    #[test]
    fn serde_uses_table_names() {
        let json = serde_json::to_value(FeatureTable::SchoolBeacons).unwrap();
        assert_eq!(json, "feature_school_beacons");
    }
}
