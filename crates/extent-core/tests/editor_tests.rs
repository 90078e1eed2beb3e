//! End-to-end editing sessions against the in-memory store

use extent_bridge::{DrawToolEvent, ToolMode, UpdateAction};
use extent_core::{EditorError, SaveOutcome};
use extent_feature::{is_drawn, DrawnLayer, Geometry, ReferenceLayer, DRAW_ID_KEY};
use extent_router::FeatureTable;
use extent_session::{DraftComponent, Phase};
use extent_test_utils::{
    persisted_drawn_point, persisted_intersection, persisted_signal, raw_intersection,
    raw_segment, raw_signal, setup_test_editor, tool_line, tool_point, InMemoryStore,
    TEST_PROJECT_ID,
};
use pretty_assertions::assert_eq;
use serde_json::json;

#[tokio::test]
async fn draw_one_line_and_save() {
    let store = InMemoryStore::new();
    let mut editor = setup_test_editor(store.clone());
    editor.start_create(DraftComponent::new(FeatureTable::DrawnLines).with_component_id(7));

    editor.handle_tool_event(DrawToolEvent::Create {
        features: vec![tool_line("tool-a1")],
    });

    let features = editor.session().features();
    assert_eq!(features.len(), 1);
    assert!(is_drawn(&features[0]));
    assert_eq!(features[0].source_layer(), Some(DrawnLayer::Line.as_str()));
    let draw_id = features[0].property_str(DRAW_ID_KEY).unwrap().to_string();
    // Surface was relabelled with the draw id
    assert_eq!(editor.surface().features, features);

    let outcome = editor.save().await.unwrap();
    assert!(matches!(outcome, SaveOutcome::Created { .. }));

    let inserted = store.inserted();
    assert_eq!(inserted.len(), 1);
    let row = &inserted[0].rows(FeatureTable::DrawnLines)[0];
    assert_eq!(row.project_extent_id.as_deref(), Some(draw_id.as_str()));
    assert_eq!(row.geography.type_name(), "MultiLineString");
    assert_eq!(inserted[0].project_id, TEST_PROJECT_ID);
}

#[tokio::test]
async fn selected_segment_saved_with_street_name() {
    let store = InMemoryStore::new();
    let mut editor = setup_test_editor(store.clone());
    editor.start_create(DraftComponent::new(FeatureTable::StreetSegments).with_component_id(14));

    editor
        .capture(&raw_segment(3_172_845, "MAIN ST"), ReferenceLayer::Centerline)
        .unwrap();
    editor.save().await.unwrap();

    let value = serde_json::to_value(&store.inserted()[0]).unwrap();
    let row = &value["feature_street_segments"]["data"][0];
    assert_eq!(row["full_street_name"], json!("MAIN ST"));
    assert_eq!(row["geography"]["type"], json!("MultiLineString"));
    assert_eq!(row["ctn_segment_id"], json!(3_172_845));
}

#[tokio::test]
async fn drag_saved_point_is_an_update() {
    let store = InMemoryStore::new();
    let mut editor = setup_test_editor(store.clone());
    let saved = persisted_drawn_point(90, "c7e1");
    editor.start_edit(
        55,
        DraftComponent::new(FeatureTable::DrawnPoints)
            .with_component_id(3)
            .with_features(vec![saved.clone()]),
    );

    let moved = saved.with_geometry(Geometry::Point(vec![-97.7300, 30.2800]));
    editor.handle_tool_event(DrawToolEvent::Update {
        features: vec![moved.clone()],
        action: UpdateAction::Move,
    });

    let features = editor.session().features();
    assert_eq!(features.len(), 1);
    assert_eq!(features[0].geometry, moved.geometry);
    assert_eq!(features[0].property_str(DRAW_ID_KEY), Some("c7e1"));

    let outcome = editor.save().await.unwrap();
    assert_eq!(
        outcome,
        SaveOutcome::Updated {
            project_component_id: 55
        }
    );
    let update = &store.updated()[0];
    assert_eq!(update.feature_ids_to_delete, vec![90]);
    assert_eq!(update.drawn_points_to_create.len(), 1);
    assert_eq!(
        update.drawn_points_to_create[0].project_extent_id.as_deref(),
        Some("c7e1")
    );
}

#[tokio::test]
async fn clearing_signal_sends_empty_signal_list() {
    let store = InMemoryStore::new();
    let mut editor = setup_test_editor(store.clone());
    editor.start_edit(
        912,
        DraftComponent::new(FeatureTable::Signals)
            .with_component_id(18)
            .with_features(vec![persisted_signal(77, "5e8f2c")]),
    );

    editor.select_signal(None).unwrap();
    editor.save().await.unwrap();

    let value = serde_json::to_value(&store.updated()[0]).unwrap();
    assert_eq!(value["featureIdsToDelete"], json!([77]));
    assert_eq!(value["signalsToCreate"], json!([]));
}

#[tokio::test]
async fn new_signal_component() {
    let store = InMemoryStore::new();
    let mut editor = setup_test_editor(store.clone());
    editor.start_create(DraftComponent::new(FeatureTable::Signals).with_component_id(18));

    editor
        .select_signal(Some(&raw_signal("k-1", 101, "LAMAR BLVD / 5TH ST")))
        .unwrap();
    editor
        .select_signal(Some(&raw_signal("k-2", 102, "LAMAR BLVD / 6TH ST")))
        .unwrap();
    assert_eq!(editor.session().features().len(), 1);

    editor.save().await.unwrap();
    let rows = store.inserted()[0].rows(FeatureTable::Signals).to_vec();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].attribute("knack_id"), Some(&json!("k-2")));
    assert_eq!(rows[0].attribute("signal_id"), Some(&json!(102)));
}

#[tokio::test]
async fn store_failure_keeps_draft_editable() {
    let store = InMemoryStore::new();
    store.set_failing(true);
    let mut editor = setup_test_editor(store.clone());
    editor.start_create(DraftComponent::new(FeatureTable::DrawnPoints).with_component_id(2));
    editor.handle_tool_event(DrawToolEvent::Create {
        features: vec![tool_point("tool-p1"), tool_point("tool-p2")],
    });

    let err = editor.save().await.unwrap_err();
    assert!(matches!(err, EditorError::Persistence(_)));
    assert_eq!(editor.session().phase(), Phase::Creating);
    assert_eq!(editor.session().features().len(), 2);
    assert_eq!(editor.surface().features.len(), 2);

    // Delete one, then retry
    let first = editor.session().features()[0].clone();
    editor.handle_tool_event(DrawToolEvent::Delete {
        features: vec![first],
    });
    store.set_failing(false);
    editor.save().await.unwrap();

    assert_eq!(store.inserted()[0].rows(FeatureTable::DrawnPoints).len(), 1);
    assert!(editor.session().state().last_error.is_none());
}

#[tokio::test]
async fn direct_select_is_overridden() {
    let mut editor = setup_test_editor(InMemoryStore::new());
    editor.start_create(DraftComponent::new(FeatureTable::DrawnLines));
    editor.handle_tool_event(DrawToolEvent::ModeChange {
        mode: ToolMode::DirectSelect,
    });
    assert_eq!(editor.surface().modes, vec![ToolMode::SimpleSelect]);
}

#[tokio::test]
async fn cancel_discards_without_saving() {
    let store = InMemoryStore::new();
    let mut editor = setup_test_editor(store.clone());
    editor.start_create(DraftComponent::new(FeatureTable::DrawnLines).with_component_id(7));
    editor.handle_tool_event(DrawToolEvent::Create {
        features: vec![tool_line("tool-a1")],
    });

    editor.cancel().unwrap();
    assert_eq!(editor.session().phase(), Phase::Idle);
    assert!(editor.surface().features.is_empty());
    assert!(store.inserted().is_empty());
}

#[tokio::test]
async fn captured_id_matching_a_row_id_keeps_saved_feature() {
    let store = InMemoryStore::new();
    let mut editor = setup_test_editor(store.clone());
    editor.start_edit(
        41,
        DraftComponent::new(FeatureTable::Intersections)
            .with_component_id(12)
            .with_features(vec![persisted_intersection(5512, 100)]),
    );

    editor
        .capture(&raw_intersection(5512), ReferenceLayer::Intersections)
        .unwrap();
    assert_eq!(editor.session().features().len(), 2);

    editor.save().await.unwrap();
    let update = &store.updated()[0];
    assert!(update.feature_ids_to_delete.is_empty());
    assert_eq!(update.intersections_to_create.len(), 1);
    assert_eq!(
        update.intersections_to_create[0].attribute("intersection_id"),
        Some(&json!(5512))
    );
}

#[tokio::test]
async fn mixed_update_batch_moves_and_creates() {
    let store = InMemoryStore::new();
    let mut editor = setup_test_editor(store.clone());
    editor.start_create(DraftComponent::new(FeatureTable::DrawnPoints).with_component_id(2));
    editor.handle_tool_event(DrawToolEvent::Create {
        features: vec![tool_point("tool-p1")],
    });
    let drawn = editor.session().features()[0].clone();
    let moved = drawn.with_geometry(Geometry::Point(vec![-97.7300, 30.2800]));

    editor.handle_tool_event(DrawToolEvent::Update {
        features: vec![moved.clone(), tool_point("tool-p2")],
        action: UpdateAction::Move,
    });

    let features = editor.session().features();
    assert_eq!(features.len(), 2);
    assert_eq!(features[0].geometry, moved.geometry);
    assert_eq!(editor.surface().features, features);

    editor.save().await.unwrap();
    let rows = store.inserted()[0].rows(FeatureTable::DrawnPoints).to_vec();
    assert_eq!(rows.len(), 2);
    assert_ne!(rows[0].project_extent_id, rows[1].project_extent_id);
}

#[tokio::test]
async fn point_drawn_while_editing_is_created() {
    let store = InMemoryStore::new();
    let mut editor = setup_test_editor(store.clone());
    editor.start_edit(
        55,
        DraftComponent::new(FeatureTable::DrawnPoints)
            .with_component_id(3)
            .with_features(vec![persisted_drawn_point(90, "c7e1")]),
    );

    editor.handle_tool_event(DrawToolEvent::Create {
        features: vec![tool_point("tool-p9")],
    });
    assert_eq!(editor.session().features().len(), 2);
    assert_eq!(editor.surface().features.len(), 2);

    editor.save().await.unwrap();
    let update = &store.updated()[0];
    assert!(update.feature_ids_to_delete.is_empty());
    assert_eq!(update.drawn_points_to_create.len(), 1);
    assert_ne!(
        update.drawn_points_to_create[0].project_extent_id.as_deref(),
        Some("c7e1")
    );
}
