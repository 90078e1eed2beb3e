//! Session reducer
//!
//! `reduce` is pure: state and action in, state and commands out. It cannot
//! fail; inputs that make no sense in the current phase are dropped with a
//! warning and leave the state untouched.

use crate::action::{Action, Command};
use crate::draft::DraftComponent;
use crate::state::{DrawState, PendingSave, Phase, SessionState};
use crate::transitions::accepts;
use extent_feature::{feature_key, is_drawn, Feature, FeatureKey, GeometryKind};
use std::collections::HashSet;

/// Result of one reducer step
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    /// Next state
    pub state: SessionState,
    /// Side effects for the caller to execute, in order
    pub commands: Vec<Command>,
}

impl Transition {
    #[inline]
    fn unchanged(state: SessionState) -> Self {
        Self {
            state,
            commands: Vec::new(),
        }
    }

    #[inline]
    fn with(state: SessionState, commands: Vec<Command>) -> Self {
        Self { state, commands }
    }
}

/// Apply one action
#[must_use]
pub fn reduce(state: SessionState, action: Action) -> Transition {
    if !accepts(state.phase, &action) {
        tracing::warn!(
            action = action.name(),
            phase = ?state.phase,
            "action not accepted in current phase"
        );
        return Transition::unchanged(state);
    }
    tracing::debug!(action = action.name(), "reduce");

    let mut state = state;
    match action {
        Action::StartCreate { draft } => {
            let sync = drawn_features(&draft);
            state.phase = Phase::Creating;
            state.draw_state = DrawState::None;
            state.draft = Some(draft);
            state.persisted = Vec::new();
            state.last_error = None;
            Transition::with(state, vec![Command::SyncDrawTool(sync)])
        }
        Action::StartEdit {
            project_component_id,
            draft,
        } => {
            let sync = drawn_features(&draft);
            state.phase = Phase::Editing {
                project_component_id,
            };
            state.draw_state = DrawState::None;
            state.persisted = draft.features.clone();
            state.draft = Some(draft);
            state.last_error = None;
            Transition::with(state, vec![Command::SyncDrawTool(sync)])
        }
        Action::StoreDraftComponent(attributes) => {
            if let Some(draft) = state.draft.as_mut() {
                draft.apply_attributes(attributes);
            }
            Transition::unchanged(state)
        }
        Action::AddDrawnFeatures(features) => edit_draft(state, |draft| {
            for feature in features {
                upsert(draft, feature);
            }
            true
        }),
        Action::UpdateDrawnFeatures(features) => {
            edit_draft(state, |draft| update(draft, features, None))
        }
        Action::DeleteDrawnFeatures(features) => edit_draft(state, |draft| {
            remove(draft, &features, None);
            false
        }),
        Action::AddDrawnLine(features) => edit_draft(state, |draft| {
            merge(draft, features, GeometryKind::Line);
            true
        }),
        Action::AddDrawnPoint(features) => edit_draft(state, |draft| {
            merge(draft, features, GeometryKind::Point);
            true
        }),
        Action::UpdateDrawnLine(features) => {
            edit_draft(state, |draft| update(draft, features, Some(GeometryKind::Line)))
        }
        Action::UpdateDrawnPoint(features) => {
            edit_draft(state, |draft| update(draft, features, Some(GeometryKind::Point)))
        }
        Action::DeleteDrawnLine(features) => edit_draft(state, |draft| {
            remove(draft, &features, Some(GeometryKind::Line));
            false
        }),
        Action::DeleteDrawnPoint(features) => edit_draft(state, |draft| {
            remove(draft, &features, Some(GeometryKind::Point));
            false
        }),
        Action::SelectSignal(selection) => select_signal(state, selection),
        Action::SetDrawState(draw_state) => {
            state.draw_state = draw_state;
            Transition::unchanged(state)
        }
        Action::SetSelection(count) => {
            if count > 0 {
                state.draw_state = DrawState::FeatureSelected;
            } else if state.draw_state == DrawState::FeatureSelected {
                state.draw_state = DrawState::None;
            }
            Transition::unchanged(state)
        }
        Action::SaveCreate | Action::SaveEdit => begin_save(state),
        Action::SaveSucceeded => {
            if state.pending.take().is_none() {
                tracing::warn!("save confirmation without a pending save");
            }
            Transition::unchanged(state)
        }
        Action::SaveFailed { message } => fail_save(state, message),
        Action::CancelCreate | Action::CancelEdit => {
            state.phase = Phase::Idle;
            state.draw_state = DrawState::None;
            state.draft = None;
            state.persisted = Vec::new();
            state.last_error = None;
            Transition::with(state, vec![Command::ClearDrawTool])
        }
    }
}

/// Run `f` on the active draft; re-sync the tool when it returns `true`
fn edit_draft(
    mut state: SessionState,
    f: impl FnOnce(&mut DraftComponent) -> bool,
) -> Transition {
    let Some(draft) = state.draft.as_mut() else {
        tracing::warn!(phase = ?state.phase, "active phase without a draft");
        return Transition::unchanged(state);
    };
    if f(draft) {
        let sync = drawn_features(draft);
        Transition::with(state, vec![Command::SyncDrawTool(sync)])
    } else {
        Transition::unchanged(state)
    }
}

/// Features the drawing tool should hold
fn drawn_features(draft: &DraftComponent) -> Vec<Feature> {
    draft.features.iter().filter(|f| is_drawn(f)).cloned().collect()
}

fn position(draft: &DraftComponent, key: &FeatureKey) -> Option<usize> {
    draft
        .features
        .iter()
        .position(|f| feature_key(f).as_ref() == Some(key))
}

fn kind_matches(feature: &Feature, kind: Option<GeometryKind>) -> bool {
    kind.map_or(true, |k| feature.geometry.kind() == k)
}

/// Replace the feature with the same key, or append
///
/// Features without a stable key are appended as they are.
fn upsert(draft: &mut DraftComponent, feature: Feature) {
    match feature_key(&feature).and_then(|key| position(draft, &key)) {
        Some(index) => draft.features[index] = feature,
        None => draft.features.push(feature),
    }
}

/// Merge features into a draft that may already hold persisted ones
fn merge(draft: &mut DraftComponent, features: Vec<Feature>, kind: GeometryKind) {
    for feature in features {
        if !kind_matches(&feature, Some(kind)) {
            tracing::warn!(expected = %kind, "skipping feature of the wrong geometry kind");
            continue;
        }
        if feature_key(&feature).is_none() {
            tracing::warn!("skipping feature without a stable id");
            continue;
        }
        upsert(draft, feature);
    }
}

/// Replace geometry of known features
///
/// Features the draft does not hold yet were never committed to it; they take
/// the create path instead. Returns `true` when that happened so the tool is
/// re-synced.
fn update(draft: &mut DraftComponent, features: Vec<Feature>, kind: Option<GeometryKind>) -> bool {
    let mut redirected = false;
    for feature in features {
        if !kind_matches(&feature, kind) {
            tracing::warn!(expected = ?kind, "update of the wrong geometry kind ignored");
            continue;
        }
        let Some(key) = feature_key(&feature) else {
            tracing::warn!("update for a feature without a stable id ignored");
            continue;
        };
        match position(draft, &key) {
            Some(index) => draft.features[index].geometry = feature.geometry,
            None => {
                tracing::debug!(?key, "update for unknown feature, treating as create");
                draft.features.push(feature);
                redirected = true;
            }
        }
    }
    redirected
}

/// Remove features by key; unknown keys are a no-op
fn remove(draft: &mut DraftComponent, features: &[Feature], kind: Option<GeometryKind>) {
    let keys: HashSet<FeatureKey> = features
        .iter()
        .filter(|f| kind_matches(f, kind))
        .filter_map(feature_key)
        .collect();
    draft
        .features
        .retain(|f| feature_key(f).map_or(true, |k| !keys.contains(&k)));
}

fn select_signal(mut state: SessionState, selection: Option<Feature>) -> Transition {
    let Some(draft) = state.draft.as_mut() else {
        return Transition::unchanged(state);
    };
    if !draft.is_signal() {
        tracing::warn!(table = %draft.feature_table, "signal selection on a non-signal component");
        return Transition::unchanged(state);
    }
    state.draw_state = if selection.is_some() {
        DrawState::FeatureSelected
    } else {
        DrawState::None
    };
    draft.features = selection.into_iter().collect();
    Transition::unchanged(state)
}

fn begin_save(mut state: SessionState) -> Transition {
    let Some(draft) = state.draft.take() else {
        return Transition::unchanged(state);
    };
    if state.pending.is_some() {
        tracing::warn!("replacing an unresolved pending save");
    }
    state.pending = Some(PendingSave {
        phase: state.phase,
        draft,
        persisted: std::mem::take(&mut state.persisted),
    });
    state.phase = Phase::Idle;
    state.draw_state = DrawState::None;
    state.last_error = None;
    Transition::with(state, vec![Command::ClearDrawTool])
}

fn fail_save(mut state: SessionState, message: String) -> Transition {
    let mut commands = Vec::new();
    match state.pending.take() {
        Some(pending) if !state.phase.is_active() => {
            commands.push(Command::SyncDrawTool(drawn_features(&pending.draft)));
            state.phase = pending.phase;
            state.persisted = pending.persisted;
            state.draft = Some(pending.draft);
        }
        Some(_) => tracing::warn!("save failed after a newer session started; draft dropped"),
        None => tracing::warn!("save failure without a pending save"),
    }
    state.last_error = Some(message);
    Transition::with(state, commands)
}
