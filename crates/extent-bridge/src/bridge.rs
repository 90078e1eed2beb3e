//! Event adapter

use crate::event::{DrawToolEvent, ToolMode, UpdateAction};
use crate::surface::{apply_commands, DrawSurface};
use extent_feature::{assign_draw_provenance, has_stable_id, DrawMode, Feature, GeometryKind};
use extent_session::{Action, DrawState, Phase, Session};

/// UI affordance flags derived from surface events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BridgeSignals {
    /// Surface is in a drawing mode
    pub is_drawing: bool,
    /// At least one feature is selected
    pub has_selection: bool,
    /// Delete affordance is enabled
    pub trash_enabled: bool,
}

/// Forwards drawing surface events into a [`Session`]
///
/// The bridge holds no features. It classifies what the surface produces,
/// dispatches the matching action and executes the resulting commands against
/// the surface. Whether the create or edit actions are used follows the
/// session's phase; events arriving while idle are dropped.
#[derive(Debug, Clone)]
pub struct DrawToolBridge {
    mode: DrawMode,
    direct_select_override: bool,
    signals: BridgeSignals,
}

impl DrawToolBridge {
    /// Create bridge for a draw mode
    #[must_use]
    pub fn new(mode: DrawMode) -> Self {
        Self {
            mode,
            direct_select_override: true,
            signals: BridgeSignals::default(),
        }
    }

    /// Enable or disable forcing `direct_select` back to `simple_select`
    #[inline]
    #[must_use]
    pub fn with_direct_select_override(mut self, enabled: bool) -> Self {
        self.direct_select_override = enabled;
        self
    }

    /// Current draw mode
    #[inline]
    #[must_use]
    pub fn mode(&self) -> DrawMode {
        self.mode
    }

    /// Current affordance flags
    #[inline]
    #[must_use]
    pub fn signals(&self) -> BridgeSignals {
        self.signals
    }

    /// Switch between drawing points and lines
    ///
    /// Resets the bridge's own state; features already in the draft stay.
    pub fn reconfigure(&mut self, mode: DrawMode) {
        tracing::debug!(from = %self.mode.as_str(), to = %mode.as_str(), "bridge reconfigured");
        self.mode = mode;
        self.signals = BridgeSignals::default();
    }

    /// Route an event to its handler
    pub fn handle<S: DrawSurface + ?Sized>(
        &mut self,
        event: DrawToolEvent,
        session: &mut Session,
        surface: &mut S,
    ) {
        tracing::debug!(event = event.name(), "draw tool event");
        match event {
            DrawToolEvent::Create { features } => self.on_create(&features, session, surface),
            DrawToolEvent::Update { features, action } => {
                self.on_update(&features, &action, session, surface);
            }
            DrawToolEvent::Delete { features } => self.on_delete(&features, session, surface),
            DrawToolEvent::ModeChange { mode } => self.on_mode_change(&mode, session, surface),
            DrawToolEvent::SelectionChange { features } => {
                self.on_selection_change(&features, session);
            }
        }
    }

    /// Classify new features, add them to the draft and relabel the surface
    pub fn on_create<S: DrawSurface + ?Sized>(
        &mut self,
        features: &[Feature],
        session: &mut Session,
        surface: &mut S,
    ) {
        let classified: Vec<Feature> = features
            .iter()
            .map(|f| assign_draw_provenance(f, self.mode))
            .collect();
        let action = match session.phase() {
            Phase::Idle => {
                tracing::warn!("create event without an active draft");
                return;
            }
            Phase::Creating => Action::AddDrawnFeatures(classified),
            Phase::Editing { .. } => Action::edit_add(self.mode.layer().kind(), classified),
        };
        let commands = session.dispatch(action);
        apply_commands(surface, &commands);
    }

    /// Forward geometry changes
    ///
    /// Features still carrying a transient tool id were never committed; they
    /// take the create path while the rest of the batch is updated in place.
    pub fn on_update<S: DrawSurface + ?Sized>(
        &mut self,
        features: &[Feature],
        action: &UpdateAction,
        session: &mut Session,
        surface: &mut S,
    ) {
        if !action.changes_geometry() {
            tracing::debug!(%action, "ignoring non-geometry update");
            return;
        }
        if session
            .state()
            .draft
            .as_ref()
            .is_some_and(|d| d.is_signal())
        {
            tracing::debug!("signal features cannot be moved");
            return;
        }
        let (stable, transient): (Vec<Feature>, Vec<Feature>) =
            features.iter().cloned().partition(|f| has_stable_id(f));

        let actions = match session.phase() {
            Phase::Idle => {
                tracing::warn!("update event without an active draft");
                return;
            }
            Phase::Creating if stable.is_empty() => Vec::new(),
            Phase::Creating => vec![Action::UpdateDrawnFeatures(stable)],
            Phase::Editing { .. } => by_kind(&stable, Action::edit_update),
        };
        for action in actions {
            let commands = session.dispatch(action);
            apply_commands(surface, &commands);
        }

        if !transient.is_empty() {
            tracing::debug!(count = transient.len(), "update with transient ids, treating as create");
            self.on_create(&transient, session, surface);
        }
    }

    /// Remove features from the draft
    pub fn on_delete<S: DrawSurface + ?Sized>(
        &mut self,
        features: &[Feature],
        session: &mut Session,
        surface: &mut S,
    ) {
        let actions = match session.phase() {
            Phase::Idle => {
                tracing::warn!("delete event without an active draft");
                return;
            }
            Phase::Creating => vec![Action::DeleteDrawnFeatures(features.to_vec())],
            Phase::Editing { .. } => by_kind(features, Action::edit_delete),
        };
        for action in actions {
            let commands = session.dispatch(action);
            apply_commands(surface, &commands);
        }
        self.signals.trash_enabled = false;
        self.signals.has_selection = false;
        session.dispatch(Action::SetSelection(0));
    }

    /// Track drawing state; force vertex editing back to simple select
    pub fn on_mode_change<S: DrawSurface + ?Sized>(
        &mut self,
        mode: &ToolMode,
        session: &mut Session,
        surface: &mut S,
    ) {
        self.signals.is_drawing = mode.is_drawing();

        if *mode == ToolMode::DirectSelect && self.direct_select_override {
            tracing::debug!("direct_select overridden to simple_select");
            surface.change_mode(&ToolMode::SimpleSelect);
        }

        if session.phase().is_active() {
            let draw_state = match mode {
                ToolMode::DrawPoint => DrawState::DrawingPoints,
                ToolMode::DrawLineString => DrawState::DrawingLines,
                _ if self.signals.has_selection => DrawState::FeatureSelected,
                _ => DrawState::None,
            };
            session.dispatch(Action::SetDrawState(draw_state));
        }
    }

    /// Track selection and delete affordance
    pub fn on_selection_change(&mut self, features: &[Feature], session: &mut Session) {
        self.signals.has_selection = !features.is_empty();
        self.signals.trash_enabled = self.signals.has_selection;
        if session.phase().is_active() {
            session.dispatch(Action::SetSelection(features.len()));
        }
    }
}

/// Split features into per-kind edit actions, lines first
fn by_kind(features: &[Feature], make: fn(GeometryKind, Vec<Feature>) -> Action) -> Vec<Action> {
    [GeometryKind::Line, GeometryKind::Point]
        .into_iter()
        .filter_map(|kind| {
            let matching: Vec<Feature> = features
                .iter()
                .filter(|f| f.geometry.kind() == kind)
                .cloned()
                .collect();
            (!matching.is_empty()).then(|| make(kind, matching))
        })
        .collect()
}
