//! Testing utilities for the Extent workspace
//!
//! Shared fixtures, a recording drawing surface and an in-memory store.

#![allow(missing_docs)]

use async_trait::async_trait;
use extent_bridge::{DrawSurface, ToolMode};
use extent_core::{ComponentEditor, ComponentStore, EditorConfig, PersistenceError};
use extent_feature::{capture_feature, Feature, Geometry, ReferenceLayer};
use extent_payload::{InsertComponentPayload, UpdateComponentPayload};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Arc;

pub const TEST_PROJECT_ID: i64 = 301;

/// Line as the drawing surface emits it, with a transient id
pub fn tool_line(tool_id: &str) -> Feature {
    Feature::new(Geometry::LineString(vec![
        vec![-97.7431, 30.2672],
        vec![-97.7425, 30.2681],
        vec![-97.7420, 30.2690],
    ]))
    .with_id(tool_id)
}

/// Point as the drawing surface emits it, with a transient id
pub fn tool_point(tool_id: &str) -> Feature {
    Feature::new(Geometry::Point(vec![-97.7398, 30.2747])).with_id(tool_id)
}

/// Raw centerline segment as the reference layer query returns it
pub fn raw_segment(ctn_segment_id: i64, street: &str) -> Feature {
    Feature::new(Geometry::LineString(vec![
        vec![-97.7510, 30.2701],
        vec![-97.7490, 30.2712],
    ]))
    .with_property("CTN_SEGMENT_ID", ctn_segment_id)
    .with_property("FULL_STREET_NAME", street)
    .with_property("FROM_ADDRESS_MIN", 100)
    .with_property("TO_ADDRESS_MAX", 198)
    .with_property("LINE_TYPE", "Street")
    .with_property("SYMBOL", 2)
}

/// Captured centerline segment
pub fn segment(ctn_segment_id: i64, street: &str) -> Feature {
    capture_feature(&raw_segment(ctn_segment_id, street), ReferenceLayer::Centerline).unwrap()
}

/// Raw signal asset from the signal registry
pub fn raw_signal(knack_id: &str, signal_id: i64, location: &str) -> Feature {
    Feature::new(Geometry::Point(vec![-97.7520, 30.2810]))
        .with_property("id", knack_id)
        .with_property("signal_id", signal_id.to_string())
        .with_property("location_name", location)
        .with_property("signal_type", "TRAFFIC")
}

/// Signal row as loaded for an edit, keyed by its row id
pub fn persisted_signal(row_id: i64, knack_id: &str) -> Feature {
    Feature::new(Geometry::MultiPoint(vec![vec![-97.7520, 30.2810]]))
        .with_id(row_id)
        .with_property("sourceLayer", ReferenceLayer::Signals.source_layer())
        .with_property("id", knack_id)
}

/// Raw intersection as the reference layer query returns it
pub fn raw_intersection(intersection_id: i64) -> Feature {
    Feature::new(Geometry::Point(vec![-97.7466, 30.2680]))
        .with_property("INTERSECTION_ID", intersection_id)
}

/// Intersection row as loaded for an edit, keyed by its row id
pub fn persisted_intersection(row_id: i64, intersection_id: i64) -> Feature {
    Feature::new(Geometry::MultiPoint(vec![vec![-97.7431, 30.2672]]))
        .with_id(row_id)
        .with_property("sourceLayer", ReferenceLayer::Intersections.source_layer())
        .with_property("INTERSECTION_ID", intersection_id)
}

/// Drawn point row as loaded for an edit
pub fn persisted_drawn_point(row_id: i64, draw_id: &str) -> Feature {
    Feature::new(Geometry::Point(vec![-97.7398, 30.2747]))
        .with_id(row_id)
        .with_property(extent_feature::DRAW_ID_KEY, draw_id)
        .with_property(extent_feature::SOURCE_LAYER_KEY, "drawnByUserPoint")
}

/// Surface that records every call
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub features: Vec<Feature>,
    pub syncs: usize,
    pub modes: Vec<ToolMode>,
}

impl DrawSurface for RecordingSurface {
    fn set_features(&mut self, features: &[Feature]) {
        self.features = features.to_vec();
        self.syncs += 1;
    }

    fn change_mode(&mut self, mode: &ToolMode) {
        self.modes.push(mode.clone());
    }
}

/// Store keeping payloads in memory; clones share state
#[derive(Debug, Clone)]
pub struct InMemoryStore {
    inserted: Arc<Mutex<Vec<InsertComponentPayload>>>,
    updated: Arc<Mutex<Vec<UpdateComponentPayload>>>,
    fail: Arc<AtomicBool>,
    next_id: Arc<AtomicI64>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self {
            inserted: Arc::default(),
            updated: Arc::default(),
            fail: Arc::default(),
            next_id: Arc::new(AtomicI64::new(1000)),
        }
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following call fail (or succeed again)
    pub fn set_failing(&self, failing: bool) {
        self.fail.store(failing, Ordering::SeqCst);
    }

    pub fn inserted(&self) -> Vec<InsertComponentPayload> {
        self.inserted.lock().clone()
    }

    pub fn updated(&self) -> Vec<UpdateComponentPayload> {
        self.updated.lock().clone()
    }
}

#[async_trait]
impl ComponentStore for InMemoryStore {
    async fn insert_component(
        &self,
        payload: &InsertComponentPayload,
    ) -> Result<i64, PersistenceError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(PersistenceError::Unavailable("store offline".into()));
        }
        self.inserted.lock().push(payload.clone());
        Ok(self.next_id.fetch_add(1, Ordering::SeqCst))
    }

    async fn update_component(
        &self,
        payload: &UpdateComponentPayload,
    ) -> Result<(), PersistenceError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(PersistenceError::Unavailable("store offline".into()));
        }
        self.updated.lock().push(payload.clone());
        Ok(())
    }
}

/// Editor over an in-memory store and a recording surface
pub fn setup_test_editor(store: InMemoryStore) -> ComponentEditor<InMemoryStore, RecordingSurface> {
    ComponentEditor::new(
        EditorConfig::new().with_project_id(TEST_PROJECT_ID),
        store,
        RecordingSurface::default(),
    )
}
