//! Per-feature table selection shared by both payloads

use crate::error::PayloadError;
use extent_feature::{is_drawn, Feature, ReferenceLayer};
use extent_router::{
    signal_record, translate_drawn_to_insertable, translate_to_insertable, FeatureTable,
    InsertionRecord,
};

/// Table a captured feature is stored in
///
/// The draft's own table when it is a reference table, otherwise the table
/// matching the feature's source layer.
pub(crate) fn captured_table(
    declared: FeatureTable,
    feature: &Feature,
) -> Result<FeatureTable, PayloadError> {
    if declared.reference_layer().is_some() {
        return Ok(declared);
    }
    feature
        .source_layer()
        .and_then(ReferenceLayer::from_source_layer)
        .and_then(|layer| {
            FeatureTable::ALL
                .into_iter()
                .find(|table| table.reference_layer() == Some(layer))
        })
        .ok_or_else(|| PayloadError::UnroutableFeature {
            table: declared,
            id: feature.id.as_ref().map(ToString::to_string).unwrap_or_default(),
        })
}

/// Route one feature of an edited component
///
/// Drawn features follow their own geometry, since an edited component can
/// hold both lines and points.
pub(crate) fn route_feature(
    declared: FeatureTable,
    feature: &Feature,
) -> Result<(FeatureTable, InsertionRecord), PayloadError> {
    if declared.is_signal() {
        return Ok((FeatureTable::Signals, signal_record(feature)?));
    }
    if is_drawn(feature) {
        let kind = feature.geometry.kind();
        let record = translate_drawn_to_insertable(feature, kind)?;
        return Ok((FeatureTable::drawn_for(kind), record));
    }
    let table = captured_table(declared, feature)?;
    Ok((table, translate_to_insertable(table, feature)?))
}
