//! Reference layers
//!
//! Captured features come from layers outside the editor (street centerlines,
//! intersections, the signal and school-beacon asset registries). Each layer
//! names the property holding its own id and knows how to label a feature.

use crate::error::FeatureError;
use crate::feature::{Feature, FeatureId, LABEL_KEY, SOURCE_LAYER_KEY};
use crate::provenance::is_drawn;
use serde_json::Value;
use std::str::FromStr;

/// Layer a captured feature was selected from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceLayer {
    /// Street centerline segments
    Centerline,
    /// Street intersections
    Intersections,
    /// Traffic signal assets
    Signals,
    /// School zone beacon assets
    SchoolBeacons,
}

impl ReferenceLayer {
    /// All reference layers
    pub const ALL: [Self; 4] = [
        Self::Centerline,
        Self::Intersections,
        Self::Signals,
        Self::SchoolBeacons,
    ];

    /// Layer name stored in `sourceLayer`
    #[inline]
    #[must_use]
    pub fn source_layer(&self) -> &'static str {
        match self {
            Self::Centerline => "ATD_ADMIN.CTN",
            Self::Intersections => "ATD_ADMIN.CTN_Intersections",
            Self::Signals => "ATD_ADMIN.signals",
            Self::SchoolBeacons => "ATD_ADMIN.school_beacons",
        }
    }

    /// Property holding the layer's own feature id
    #[inline]
    #[must_use]
    pub fn id_key(&self) -> &'static str {
        match self {
            Self::Centerline => "CTN_SEGMENT_ID",
            Self::Intersections => "INTERSECTION_ID",
            Self::Signals | Self::SchoolBeacons => "id",
        }
    }

    /// Look up a layer by its `sourceLayer` name
    #[must_use]
    pub fn from_source_layer(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|layer| layer.source_layer() == name)
    }

    /// Human-readable label for a feature of this layer
    #[must_use]
    pub fn label(&self, feature: &Feature, id: &FeatureId) -> String {
        let text = |key: &str| feature.property(key).map(value_text);
        match self {
            Self::Centerline => text("FULL_STREET_NAME").unwrap_or_else(|| format!("Segment {id}")),
            Self::Intersections => format!("Intersection {id}"),
            Self::Signals => match (text("signal_id"), text("location_name")) {
                (Some(signal), Some(location)) => format!("{signal}: {location}"),
                (Some(signal), None) => format!("Signal {signal}"),
                (None, Some(location)) => location,
                (None, None) => format!("Signal {id}"),
            },
            Self::SchoolBeacons => text("zone_name").unwrap_or_else(|| format!("Beacon {id}")),
        }
    }
}

impl FromStr for ReferenceLayer {
    type Err = FeatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_source_layer(s).ok_or_else(|| FeatureError::UnknownReferenceLayer(s.to_string()))
    }
}

/// Tag a reference-layer candidate as captured
///
/// Sets `sourceLayer`, the feature id (from the layer's id property) and the
/// label. Captured features never receive a draw-identifier; a candidate that
/// already carries one is rejected.
pub fn capture_feature(raw: &Feature, layer: ReferenceLayer) -> Result<Feature, FeatureError> {
    if is_drawn(raw) {
        return Err(FeatureError::AlreadyDrawn(
            raw.id.as_ref().map(ToString::to_string).unwrap_or_default(),
        ));
    }

    let id = raw
        .property(layer.id_key())
        .and_then(FeatureId::from_value)
        .ok_or(FeatureError::MissingReferenceId {
            layer: layer.source_layer(),
            key: layer.id_key(),
        })?;

    let label = layer.label(raw, &id);
    let mut captured = raw.clone();
    captured.id = Some(id);
    captured
        .properties
        .insert(SOURCE_LAYER_KEY.to_string(), layer.source_layer().into());
    captured.properties.insert(LABEL_KEY.to_string(), label.into());
    Ok(captured)
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Geometry;
    use crate::provenance::{assign_draw_provenance, has_stable_id, DrawMode};

    fn segment() -> Feature {
        Feature::new(Geometry::LineString(vec![vec![0.0, 0.0], vec![0.0, 1.0]]))
            .with_property("CTN_SEGMENT_ID", 3_172_845)
            .with_property("FULL_STREET_NAME", "MAIN ST")
    }

    #[test]
    fn capture_centerline_segment() {
        let captured = capture_feature(&segment(), ReferenceLayer::Centerline).unwrap();
        assert_eq!(captured.id, Some(FeatureId::Number(3_172_845)));
        assert_eq!(captured.source_layer(), Some("ATD_ADMIN.CTN"));
        assert_eq!(captured.label(), Some("MAIN ST"));
        assert!(!is_drawn(&captured));
        assert!(has_stable_id(&captured));
    }

    #[test]
    fn capture_signal_with_text_id() {
        let signal = Feature::new(Geometry::Point(vec![-97.7, 30.2]))
            .with_property("id", "5e8f2c")
            .with_property("signal_id", 134)
            .with_property("location_name", "LAMAR BLVD / 5TH ST");
        let captured = capture_feature(&signal, ReferenceLayer::Signals).unwrap();
        assert_eq!(captured.label(), Some("134: LAMAR BLVD / 5TH ST"));
        assert!(has_stable_id(&captured));
    }

    #[test]
    fn capture_rejects_missing_id() {
        let raw = Feature::new(Geometry::Point(vec![0.0, 0.0]));
        let err = capture_feature(&raw, ReferenceLayer::Intersections).unwrap_err();
        assert!(matches!(err, FeatureError::MissingReferenceId { key: "INTERSECTION_ID", .. }));
        assert!(err.is_recoverable());
    }

    #[test]
    fn capture_rejects_drawn_feature() {
        let drawn = assign_draw_provenance(&segment(), DrawMode::Lines);
        let err = capture_feature(&drawn, ReferenceLayer::Centerline).unwrap_err();
        assert!(matches!(err, FeatureError::AlreadyDrawn(_)));
    }

    #[test]
    fn intersection_label_uses_id() {
        let raw = Feature::new(Geometry::Point(vec![0.0, 0.0])).with_property("INTERSECTION_ID", 5512);
        let captured = capture_feature(&raw, ReferenceLayer::Intersections).unwrap();
        assert_eq!(captured.label(), Some("Intersection 5512"));
    }

    #[test]
    fn layer_lookup() {
        assert_eq!(
            "ATD_ADMIN.CTN".parse::<ReferenceLayer>().unwrap(),
            ReferenceLayer::Centerline
        );
        assert!("drawnByUserLine".parse::<ReferenceLayer>().is_err());
    }
}
