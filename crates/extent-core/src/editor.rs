//! Component editor
//!
//! Owns the session, the bridge, the drawing surface and the store, and runs
//! the save lifecycle: assemble, clear optimistically, persist, restore on
//! failure.

use crate::config::EditorConfig;
use crate::error::EditorError;
use crate::store::ComponentStore;
use extent_bridge::{apply_commands, DrawSurface, DrawToolBridge, DrawToolEvent};
use extent_feature::{capture_feature, Feature, ReferenceLayer};
use extent_payload::{
    assemble_insert_payload, assemble_update_payload, InsertComponentPayload,
    UpdateComponentPayload,
};
use extent_session::{Action, DraftAttributes, DraftComponent, Phase, Session};
use serde::Serialize;

/// Payload the next save would submit
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ComponentPayload {
    /// New component
    Insert(InsertComponentPayload),
    /// Edited component
    Update(UpdateComponentPayload),
}

/// Result of a successful save
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Component inserted
    Created {
        /// Id assigned by the store
        project_component_id: i64,
    },
    /// Component updated
    Updated {
        /// Edited component
        project_component_id: i64,
    },
}

/// Editing front end for one map
#[derive(Debug)]
pub struct ComponentEditor<S, D> {
    config: EditorConfig,
    store: S,
    surface: D,
    session: Session,
    bridge: DrawToolBridge,
}

impl<S: ComponentStore, D: DrawSurface> ComponentEditor<S, D> {
    /// Create editor
    #[must_use]
    pub fn new(config: EditorConfig, store: S, surface: D) -> Self {
        let bridge = DrawToolBridge::new(extent_feature::DrawMode::Lines)
            .with_direct_select_override(config.direct_select_override);
        Self {
            config,
            store,
            surface,
            session: Session::new(),
            bridge,
        }
    }

    /// Configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Session
    #[inline]
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Bridge
    #[inline]
    #[must_use]
    pub fn bridge(&self) -> &DrawToolBridge {
        &self.bridge
    }

    /// Drawing surface
    #[inline]
    #[must_use]
    pub fn surface(&self) -> &D {
        &self.surface
    }

    /// Store
    #[inline]
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Begin creating a component
    pub fn start_create(&mut self, draft: DraftComponent) {
        tracing::info!(table = %draft.feature_table, "starting new component");
        self.bridge.reconfigure(draft.draw_mode());
        self.dispatch(Action::StartCreate { draft });
    }

    /// Begin editing a persisted component
    ///
    /// `draft` carries the persisted features, ids being their row ids.
    pub fn start_edit(&mut self, project_component_id: i64, draft: DraftComponent) {
        tracing::info!(project_component_id, "editing component");
        self.bridge.reconfigure(draft.draw_mode());
        self.dispatch(Action::StartEdit {
            project_component_id,
            draft,
        });
    }

    /// Forward a drawing surface event
    pub fn handle_tool_event(&mut self, event: DrawToolEvent) {
        self.bridge
            .handle(event, &mut self.session, &mut self.surface);
    }

    /// Replace the draft's attributes
    ///
    /// A different geometry kind switches the bridge's draw mode; features
    /// already drawn stay in the draft.
    pub fn store_attributes(&mut self, attributes: DraftAttributes) {
        let mode = extent_feature::DrawMode::for_kind(attributes.feature_table.kind());
        self.dispatch(Action::StoreDraftComponent(attributes));
        if self.session.phase().is_active() && mode != self.bridge.mode() {
            self.bridge.reconfigure(mode);
        }
    }

    /// Add a feature picked from a reference layer
    pub fn capture(&mut self, raw: &Feature, layer: ReferenceLayer) -> Result<(), EditorError> {
        let captured = capture_feature(raw, layer)?;
        let action = match self.session.phase() {
            Phase::Idle => return Err(EditorError::NoActiveDraft),
            Phase::Creating => Action::AddDrawnFeatures(vec![captured]),
            Phase::Editing { .. } => Action::edit_add(captured.geometry.kind(), vec![captured]),
        };
        self.dispatch(action);
        Ok(())
    }

    /// Replace the signal association
    pub fn select_signal(&mut self, raw: Option<&Feature>) -> Result<(), EditorError> {
        let selection = raw
            .map(|f| capture_feature(f, ReferenceLayer::Signals))
            .transpose()?;
        self.dispatch(Action::SelectSignal(selection));
        Ok(())
    }

    /// Abandon the active draft
    pub fn cancel(&mut self) -> Result<(), EditorError> {
        let action = match self.session.phase() {
            Phase::Idle => return Err(EditorError::NoActiveDraft),
            Phase::Creating => Action::CancelCreate,
            Phase::Editing { .. } => Action::CancelEdit,
        };
        self.dispatch(action);
        Ok(())
    }

    /// Assemble what a save would submit, without touching the session
    pub fn preview_payload(&self) -> Result<ComponentPayload, EditorError> {
        let state = self.session.state();
        let draft = state.draft.as_ref().ok_or(EditorError::NoActiveDraft)?;
        match state.phase {
            Phase::Idle => Err(EditorError::NoActiveDraft),
            Phase::Creating => {
                let project_id = self.config.project_id.ok_or(EditorError::MissingProject)?;
                Ok(ComponentPayload::Insert(assemble_insert_payload(
                    draft, project_id,
                )?))
            }
            Phase::Editing {
                project_component_id,
            } => Ok(ComponentPayload::Update(assemble_update_payload(
                &state.persisted,
                draft,
                project_component_id,
            )?)),
        }
    }

    /// Save the active draft
    ///
    /// Assembly errors leave the session untouched. Once assembled, the draft
    /// is cleared before the store is called and restored if the store fails.
    pub async fn save(&mut self) -> Result<SaveOutcome, EditorError> {
        let payload = self.preview_payload()?;

        let result = match &payload {
            ComponentPayload::Insert(insert) => {
                self.dispatch(Action::SaveCreate);
                self.store
                    .insert_component(insert)
                    .await
                    .map(|project_component_id| SaveOutcome::Created {
                        project_component_id,
                    })
            }
            ComponentPayload::Update(update) => {
                self.dispatch(Action::SaveEdit);
                self.store
                    .update_component(update)
                    .await
                    .map(|()| SaveOutcome::Updated {
                        project_component_id: update.project_component_id,
                    })
            }
        };

        match result {
            Ok(outcome) => {
                tracing::info!(?outcome, "component saved");
                self.dispatch(Action::SaveSucceeded);
                Ok(outcome)
            }
            Err(e) => {
                tracing::error!(error = %e, "save failed, restoring draft");
                self.dispatch(Action::SaveFailed {
                    message: e.to_string(),
                });
                Err(e.into())
            }
        }
    }

    fn dispatch(&mut self, action: Action) {
        let commands = self.session.dispatch(action);
        apply_commands(&mut self.surface, &commands);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PersistenceError;
    use async_trait::async_trait;
    use extent_bridge::ToolMode;
    use extent_feature::Geometry;
    use extent_router::FeatureTable;
    use mockall::mock;

    mock! {
        Store {}

        #[async_trait]
        impl ComponentStore for Store {
            async fn insert_component(
                &self,
                payload: &InsertComponentPayload,
            ) -> Result<i64, PersistenceError>;
            async fn update_component(
                &self,
                payload: &UpdateComponentPayload,
            ) -> Result<(), PersistenceError>;
        }
    }

    #[derive(Debug, Default)]
    struct Surface {
        features: Vec<Feature>,
    }

    impl DrawSurface for Surface {
        fn set_features(&mut self, features: &[Feature]) {
            self.features = features.to_vec();
        }

        fn change_mode(&mut self, _mode: &ToolMode) {}
    }

    fn draw_point(editor: &mut ComponentEditor<MockStore, Surface>) {
        let raw = Feature::new(Geometry::Point(vec![-97.74, 30.27])).with_id("tool-1");
        editor.handle_tool_event(DrawToolEvent::Create {
            features: vec![raw],
        });
    }

    fn editor(store: MockStore) -> ComponentEditor<MockStore, Surface> {
        ComponentEditor::new(
            EditorConfig::new().with_project_id(301),
            store,
            Surface::default(),
        )
    }

    #[tokio::test]
    async fn save_inserts_and_clears() {
        let mut store = MockStore::new();
        store
            .expect_insert_component()
            .withf(|payload| payload.rows(FeatureTable::DrawnPoints).len() == 1)
            .times(1)
            .returning(|_| Ok(88));

        let mut editor = editor(store);
        editor.start_create(DraftComponent::new(FeatureTable::DrawnPoints).with_component_id(5));
        draw_point(&mut editor);
        assert_eq!(editor.surface().features.len(), 1);

        let outcome = editor.save().await.unwrap();
        assert_eq!(
            outcome,
            SaveOutcome::Created {
                project_component_id: 88
            }
        );
        assert_eq!(editor.session().phase(), Phase::Idle);
        assert!(editor.session().state().pending.is_none());
        assert!(editor.surface().features.is_empty());
    }

    #[tokio::test]
    async fn failed_save_restores_draft() {
        let mut store = MockStore::new();
        store
            .expect_insert_component()
            .returning(|_| Err(PersistenceError::Unavailable("timeout".into())));

        let mut editor = editor(store);
        editor.start_create(DraftComponent::new(FeatureTable::DrawnPoints).with_component_id(5));
        draw_point(&mut editor);

        let err = editor.save().await.unwrap_err();
        assert!(matches!(err, EditorError::Persistence(_)));
        assert!(err.is_recoverable());
        assert_eq!(editor.session().phase(), Phase::Creating);
        assert_eq!(editor.session().features().len(), 1);
        assert_eq!(editor.surface().features.len(), 1);
        assert_eq!(
            editor.session().state().last_error.as_deref(),
            Some("unavailable: timeout")
        );
    }

    #[tokio::test]
    async fn assembly_error_leaves_session_alone() {
        let mut store = MockStore::new();
        store.expect_insert_component().times(0);

        let mut editor = editor(store);
        editor.start_create(DraftComponent::new(FeatureTable::DrawnPoints));
        draw_point(&mut editor);

        let err = editor.save().await.unwrap_err();
        assert!(matches!(err, EditorError::Payload(_)));
        assert_eq!(editor.session().phase(), Phase::Creating);
        assert!(editor.session().state().pending.is_none());
    }

    #[tokio::test]
    async fn save_without_draft() {
        let mut editor = editor(MockStore::new());
        assert!(matches!(
            editor.save().await,
            Err(EditorError::NoActiveDraft)
        ));
    }

    #[test]
    fn missing_project_is_fatal() {
        let mut editor = ComponentEditor::new(EditorConfig::new(), MockStore::new(), Surface::default());
        editor.start_create(DraftComponent::new(FeatureTable::DrawnPoints).with_component_id(5));
        let err = editor.preview_payload().unwrap_err();
        assert!(matches!(err, EditorError::MissingProject));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn attributes_switch_draw_mode() {
        let mut editor = editor(MockStore::new());
        editor.start_create(DraftComponent::new(FeatureTable::DrawnPoints));
        assert_eq!(editor.bridge().mode(), extent_feature::DrawMode::Points);

        let mut attributes = editor.session().state().draft.as_ref().unwrap().attributes();
        attributes.feature_table = FeatureTable::DrawnLines;
        editor.store_attributes(attributes);
        assert_eq!(editor.bridge().mode(), extent_feature::DrawMode::Lines);
    }

    #[test]
    fn cancel_requires_draft() {
        let mut editor = editor(MockStore::new());
        assert!(matches!(editor.cancel(), Err(EditorError::NoActiveDraft)));

        editor.start_create(DraftComponent::new(FeatureTable::DrawnPoints));
        draw_point(&mut editor);
        editor.cancel().unwrap();
        assert!(editor.session().features().is_empty());
        assert!(editor.surface().features.is_empty());
    }
}
