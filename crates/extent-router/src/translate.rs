//! Feature to insertion-record translation
//!
//! All functions here are pure: they read the feature and the static table
//! routes and build a new [`InsertionRecord`].

use crate::error::RouterError;
use crate::record::InsertionRecord;
use crate::table::FeatureTable;
use extent_feature::{draw_id, Feature, GeometryKind, Properties, ReferenceLayer};
use serde_json::Value;

/// Translate a captured feature into a row of `table`
///
/// Copies every mapped property under its column name (missing properties
/// become `null`), takes `source_layer` from the feature's layer tag and wraps
/// the geometry.
pub fn translate_to_insertable(
    table: FeatureTable,
    feature: &Feature,
) -> Result<InsertionRecord, RouterError> {
    let route = table.route();

    let attributes: Properties = route
        .key_map
        .iter()
        .map(|(source, column)| {
            let value = feature.property(source).cloned().unwrap_or(Value::Null);
            ((*column).to_string(), value)
        })
        .collect();

    Ok(InsertionRecord {
        attributes,
        project_extent_id: None,
        source_layer: feature
            .source_layer()
            .unwrap_or(route.default_source_layer)
            .to_string(),
        geography: table.wrap(&feature.geometry)?,
    })
}

/// Translate a drawn feature into a row of the drawn table for `kind`
///
/// The draw-identifier becomes `project_extent_id`; no properties are copied.
pub fn translate_drawn_to_insertable(
    feature: &Feature,
    kind: GeometryKind,
) -> Result<InsertionRecord, RouterError> {
    let draw_id = draw_id(feature).ok_or_else(|| {
        RouterError::NotDrawn(feature.id.as_ref().map(ToString::to_string).unwrap_or_default())
    })?;
    let table = FeatureTable::drawn_for(kind);

    Ok(InsertionRecord {
        attributes: Properties::new(),
        project_extent_id: Some(draw_id.as_str().to_string()),
        source_layer: feature
            .source_layer()
            .unwrap_or(table.route().default_source_layer)
            .to_string(),
        geography: table.wrap(&feature.geometry)?,
    })
}

/// Translate a signal selection into a `feature_signals` row
///
/// Signal assets come from an external registry with their own property
/// shape: the registry record id becomes `knack_id` and a text `signal_id`
/// is normalized to a number. Drawn features keep their draw-identifier.
pub fn signal_record(feature: &Feature) -> Result<InsertionRecord, RouterError> {
    let table = FeatureTable::Signals;
    let mut attributes = Properties::new();

    let knack_id = feature
        .property("id")
        .cloned()
        .or_else(|| {
            feature
                .id
                .as_ref()
                .filter(|_| draw_id(feature).is_none())
                .map(extent_feature::FeatureId::to_value)
        })
        .unwrap_or(Value::Null);
    attributes.insert("knack_id".to_string(), knack_id);
    attributes.insert(
        "signal_id".to_string(),
        feature.property("signal_id").map_or(Value::Null, normalize_signal_id),
    );
    for column in ["location_name", "signal_type"] {
        attributes.insert(
            column.to_string(),
            feature.property(column).cloned().unwrap_or(Value::Null),
        );
    }

    Ok(InsertionRecord {
        attributes,
        project_extent_id: draw_id(feature).map(|id| id.as_str().to_string()),
        source_layer: feature
            .source_layer()
            .unwrap_or(ReferenceLayer::Signals.source_layer())
            .to_string(),
        geography: table.wrap(&feature.geometry)?,
    })
}

fn normalize_signal_id(value: &Value) -> Value {
    match value {
        Value::String(s) => s.trim().parse::<i64>().map_or_else(|_| value.clone(), Value::from),
        other => other.clone(),
    }
}
