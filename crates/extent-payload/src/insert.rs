//! Create-flow payload

use crate::error::PayloadError;
use crate::routing::captured_table;
use extent_feature::{partition, Feature};
use extent_router::{
    signal_record, translate_drawn_to_insertable, translate_to_insertable, FeatureTable,
    InsertionRecord,
};
use extent_session::DraftComponent;
use serde::Serialize;
use std::collections::BTreeMap;

/// Nested insert wrapper, serialized as `{ "data": [...] }`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rows<T> {
    /// Rows to insert
    pub data: Vec<T>,
}

impl<T> Rows<T> {
    /// Wrap rows
    #[inline]
    #[must_use]
    pub fn new(data: Vec<T>) -> Self {
        Self { data }
    }

    /// Number of rows
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if there are no rows
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl<T> Default for Rows<T> {
    fn default() -> Self {
        Self { data: Vec::new() }
    }
}

/// Subcomponent association row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SubcomponentRow {
    /// Referenced subcomponent
    pub subcomponent_id: i64,
}

/// Work type association row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WorkTypeRow {
    /// Referenced work type
    pub work_type_id: i64,
}

/// Tag association row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TagRow {
    /// Referenced tag
    pub component_tag_id: i64,
}

/// Everything the insert call needs for one new component
///
/// Feature rows are keyed by table name. The draft's own table and both drawn
/// tables are always present, possibly empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsertComponentPayload {
    /// Owning project
    pub project_id: i64,
    /// Component type
    pub component_id: i64,
    /// Free-text description
    pub description: Option<String>,
    /// Feature rows per table
    #[serde(flatten)]
    pub tables: BTreeMap<FeatureTable, Rows<InsertionRecord>>,
    /// Subcomponent associations
    pub subcomponents: Rows<SubcomponentRow>,
    /// Work type associations
    pub work_types: Rows<WorkTypeRow>,
    /// Tag associations
    pub tags: Rows<TagRow>,
}

impl InsertComponentPayload {
    /// Rows for a table (empty when the table is not part of the payload)
    #[must_use]
    pub fn rows(&self, table: FeatureTable) -> &[InsertionRecord] {
        self.tables.get(&table).map_or(&[], |rows| rows.data.as_slice())
    }

    /// Total number of feature rows
    #[must_use]
    pub fn feature_count(&self) -> usize {
        self.tables.values().map(Rows::len).sum()
    }
}

/// Build the insert payload for a new component
///
/// Captured features go to the draft's table, drawn features to the drawn
/// table of the same geometry kind. Signal components route every feature
/// through [`signal_record`].
pub fn assemble_insert_payload(
    draft: &DraftComponent,
    project_id: i64,
) -> Result<InsertComponentPayload, PayloadError> {
    let component_id = draft.component_id.ok_or(PayloadError::MissingComponentType)?;
    let table = draft.feature_table;

    let mut tables: BTreeMap<FeatureTable, Rows<InsertionRecord>> =
        [table, FeatureTable::DrawnLines, FeatureTable::DrawnPoints]
            .into_iter()
            .map(|t| (t, Rows::default()))
            .collect();
    let mut push = |t: FeatureTable, record: InsertionRecord| {
        tables.entry(t).or_default().data.push(record);
    };

    if table.is_signal() {
        for feature in &draft.features {
            push(FeatureTable::Signals, signal_record(feature)?);
        }
    } else {
        let (drawn, captured): (Vec<&Feature>, Vec<&Feature>) = partition(&draft.features);
        for feature in captured {
            let target = captured_table(table, feature)?;
            push(target, translate_to_insertable(target, feature)?);
        }
        let drawn_table = table.drawn_counterpart();
        for feature in drawn {
            push(
                drawn_table,
                translate_drawn_to_insertable(feature, drawn_table.kind())?,
            );
        }
    }

    tracing::debug!(
        table = %table,
        features = draft.features.len(),
        "assembled insert payload"
    );

    Ok(InsertComponentPayload {
        project_id,
        component_id,
        description: draft.description.clone(),
        tables,
        subcomponents: Rows::new(
            draft
                .subcomponents
                .iter()
                .map(|&subcomponent_id| SubcomponentRow { subcomponent_id })
                .collect(),
        ),
        work_types: Rows::new(
            draft
                .work_types
                .iter()
                .map(|&work_type_id| WorkTypeRow { work_type_id })
                .collect(),
        ),
        tags: Rows::new(
            draft
                .tags
                .iter()
                .map(|&component_tag_id| TagRow { component_tag_id })
                .collect(),
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use extent_feature::{
        assign_draw_provenance_with, capture_feature, DrawId, DrawMode, Geometry, ReferenceLayer,
    };
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use serde_json::json;

    fn segment() -> Feature {
        let raw = Feature::new(Geometry::LineString(vec![vec![-97.75, 30.27], vec![-97.74, 30.27]]))
            .with_property("CTN_SEGMENT_ID", 3_172_845)
            .with_property("FULL_STREET_NAME", "MAIN ST")
            .with_property("LINE_TYPE", "Street");
        capture_feature(&raw, ReferenceLayer::Centerline).unwrap()
    }

    fn drawn_line(id: &str) -> Feature {
        let raw = Feature::new(Geometry::LineString(vec![vec![0.0, 0.0], vec![1.0, 1.0]]));
        assign_draw_provenance_with(&raw, DrawMode::Lines, DrawId::from_existing(id))
    }

    #[test]
    fn street_segment_payload() {
        let draft = DraftComponent::new(FeatureTable::StreetSegments)
            .with_component_id(14)
            .with_features(vec![segment()]);

        let payload = assemble_insert_payload(&draft, 301).unwrap();
        let rows = payload.rows(FeatureTable::StreetSegments);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].attribute("full_street_name"), Some(&json!("MAIN ST")));
        assert_eq!(rows[0].attribute("ctn_segment_id"), Some(&json!(3_172_845)));
        assert_eq!(rows[0].geography.type_name(), "MultiLineString");
        assert!(payload.rows(FeatureTable::DrawnLines).is_empty());
    }

    #[test]
    fn drawn_features_go_to_drawn_table() {
        let draft = DraftComponent::new(FeatureTable::StreetSegments)
            .with_component_id(14)
            .with_features(vec![segment(), drawn_line("d-1")]);

        let payload = assemble_insert_payload(&draft, 301).unwrap();
        assert_eq!(payload.rows(FeatureTable::StreetSegments).len(), 1);
        let drawn = payload.rows(FeatureTable::DrawnLines);
        assert_eq!(drawn.len(), 1);
        assert_eq!(drawn[0].project_extent_id.as_deref(), Some("d-1"));
        assert_eq!(drawn[0].source_layer, "drawnByUserLine");
        assert_eq!(payload.feature_count(), 2);
    }

    #[test]
    fn associations_are_wrapped() {
        let mut draft = DraftComponent::new(FeatureTable::DrawnLines).with_component_id(2);
        draft.subcomponents = vec![7];
        draft.work_types = vec![1, 3];
        draft.tags = vec![9];

        let value = serde_json::to_value(assemble_insert_payload(&draft, 5).unwrap()).unwrap();
        assert_eq!(value["subcomponents"], json!({ "data": [{ "subcomponent_id": 7 }] }));
        assert_eq!(
            value["work_types"],
            json!({ "data": [{ "work_type_id": 1 }, { "work_type_id": 3 }] })
        );
        assert_eq!(value["tags"], json!({ "data": [{ "component_tag_id": 9 }] }));
        assert_eq!(value["feature_drawn_points"], json!({ "data": [] }));
    }

    #[test]
    fn missing_component_type() {
        let draft = DraftComponent::new(FeatureTable::DrawnPoints);
        assert_eq!(
            assemble_insert_payload(&draft, 1),
            Err(PayloadError::MissingComponentType)
        );
    }

    #[test]
    fn captured_feature_in_drawn_component_follows_source_layer() {
        let draft = DraftComponent::new(FeatureTable::DrawnLines)
            .with_component_id(2)
            .with_features(vec![segment()]);
        let payload = assemble_insert_payload(&draft, 5).unwrap();
        assert_eq!(payload.rows(FeatureTable::StreetSegments).len(), 1);
    }

    #[test]
    fn point_in_line_component_is_rejected() {
        let raw = Feature::new(Geometry::Point(vec![0.0, 0.0]));
        let point = assign_draw_provenance_with(&raw, DrawMode::Points, DrawId::from_existing("p"));
        let draft = DraftComponent::new(FeatureTable::DrawnLines)
            .with_component_id(2)
            .with_features(vec![point]);

        let err = assemble_insert_payload(&draft, 5).unwrap_err();
        assert!(matches!(err, PayloadError::Router(_)));
        assert!(err.is_recoverable());
    }

    proptest! {
        #[test]
        fn every_feature_lands_in_one_table(segments in 0usize..6, lines in 0usize..6) {
            let mut features: Vec<Feature> = (0..segments).map(|_| segment()).collect();
            features.extend((0..lines).map(|i| drawn_line(&format!("d-{i}"))));
            let draft = DraftComponent::new(FeatureTable::StreetSegments)
                .with_component_id(14)
                .with_features(features);

            let payload = assemble_insert_payload(&draft, 301).unwrap();
            prop_assert_eq!(payload.feature_count(), segments + lines);
            prop_assert_eq!(payload.rows(FeatureTable::StreetSegments).len(), segments);
            prop_assert_eq!(payload.rows(FeatureTable::DrawnLines).len(), lines);
            prop_assert!(payload.rows(FeatureTable::DrawnPoints).is_empty());
        }
    }
}
