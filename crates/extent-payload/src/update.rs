//! Edit-flow payload
//!
//! Edits are reconciled against the features loaded when editing started.
//! Persisted features carry their feature-table row id as the feature id;
//! only rows that changed are sent.

use crate::error::PayloadError;
use crate::routing::route_feature;
use extent_feature::{feature_key, Feature, FeatureId, FeatureKey};
use extent_router::{FeatureTable, InsertionRecord};
use extent_session::DraftComponent;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Changed rows of an edited component
///
/// Every `*ToCreate` list is always serialized, empty when nothing changed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateComponentPayload {
    /// Component being edited
    pub project_component_id: i64,
    /// New `feature_street_segments` rows
    pub street_segments_to_create: Vec<InsertionRecord>,
    /// New `feature_intersections` rows
    pub intersections_to_create: Vec<InsertionRecord>,
    /// New `feature_signals` rows
    pub signals_to_create: Vec<InsertionRecord>,
    /// New `feature_school_beacons` rows
    pub school_beacons_to_create: Vec<InsertionRecord>,
    /// New `feature_drawn_lines` rows
    pub drawn_lines_to_create: Vec<InsertionRecord>,
    /// New `feature_drawn_points` rows
    pub drawn_points_to_create: Vec<InsertionRecord>,
    /// Row ids removed or replaced
    pub feature_ids_to_delete: Vec<i64>,
}

impl UpdateComponentPayload {
    /// Create payload with nothing to change
    #[must_use]
    pub fn new(project_component_id: i64) -> Self {
        Self {
            project_component_id,
            street_segments_to_create: Vec::new(),
            intersections_to_create: Vec::new(),
            signals_to_create: Vec::new(),
            school_beacons_to_create: Vec::new(),
            drawn_lines_to_create: Vec::new(),
            drawn_points_to_create: Vec::new(),
            feature_ids_to_delete: Vec::new(),
        }
    }

    /// Rows to create in a table
    #[must_use]
    pub fn to_create(&self, table: FeatureTable) -> &[InsertionRecord] {
        match table {
            FeatureTable::StreetSegments => &self.street_segments_to_create,
            FeatureTable::Intersections => &self.intersections_to_create,
            FeatureTable::Signals => &self.signals_to_create,
            FeatureTable::SchoolBeacons => &self.school_beacons_to_create,
            FeatureTable::DrawnLines => &self.drawn_lines_to_create,
            FeatureTable::DrawnPoints => &self.drawn_points_to_create,
        }
    }

    fn to_create_mut(&mut self, table: FeatureTable) -> &mut Vec<InsertionRecord> {
        match table {
            FeatureTable::StreetSegments => &mut self.street_segments_to_create,
            FeatureTable::Intersections => &mut self.intersections_to_create,
            FeatureTable::Signals => &mut self.signals_to_create,
            FeatureTable::SchoolBeacons => &mut self.school_beacons_to_create,
            FeatureTable::DrawnLines => &mut self.drawn_lines_to_create,
            FeatureTable::DrawnPoints => &mut self.drawn_points_to_create,
        }
    }

    /// Check if the edit changed nothing
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.feature_ids_to_delete.is_empty()
            && FeatureTable::ALL
                .into_iter()
                .all(|table| self.to_create(table).is_empty())
    }
}

/// Build the update payload for an edited component
///
/// A persisted feature missing from the draft is deleted. One whose geometry
/// changed is deleted and created again. Draft features not among the
/// persisted ones are created.
pub fn assemble_update_payload(
    persisted: &[Feature],
    draft: &DraftComponent,
    project_component_id: i64,
) -> Result<UpdateComponentPayload, PayloadError> {
    let mut payload = UpdateComponentPayload::new(project_component_id);

    let current: HashMap<FeatureKey, &Feature> = draft
        .features
        .iter()
        .filter_map(|f| feature_key(f).map(|key| (key, f)))
        .collect();

    let mut unchanged: HashSet<FeatureKey> = HashSet::new();
    for feature in persisted {
        match feature_key(feature) {
            Some(key)
                if current
                    .get(&key)
                    .is_some_and(|f| f.geometry == feature.geometry) =>
            {
                unchanged.insert(key);
            }
            _ => match feature.id.as_ref().and_then(FeatureId::as_i64) {
                Some(row_id) => payload.feature_ids_to_delete.push(row_id),
                None => tracing::warn!(id = ?feature.id, "persisted feature without a row id"),
            },
        }
    }

    for feature in &draft.features {
        match feature_key(feature) {
            Some(key) if unchanged.contains(&key) => {}
            Some(_) => {
                let (table, record) = route_feature(draft.feature_table, feature)?;
                payload.to_create_mut(table).push(record);
            }
            None => tracing::warn!(id = ?feature.id, "draft feature without a stable id skipped"),
        }
    }

    tracing::debug!(
        project_component_id,
        deleted = payload.feature_ids_to_delete.len(),
        "assembled update payload"
    );
    Ok(payload)
}
