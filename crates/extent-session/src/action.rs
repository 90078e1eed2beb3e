//! Reducer actions and commands

use crate::draft::{DraftAttributes, DraftComponent};
use crate::state::DrawState;
use extent_feature::{Feature, GeometryKind};

/// Every input the session reducer understands
///
/// Create-flow and edit-flow feature actions are separate variants: the edit
/// flow merges into features loaded from the server, the create flow only
/// ever appends to a fresh draft.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Begin creating a component
    StartCreate {
        /// Initial draft
        draft: DraftComponent,
    },
    /// Begin editing a persisted component
    StartEdit {
        /// Row being edited
        project_component_id: i64,
        /// Draft pre-populated with the persisted features
        draft: DraftComponent,
    },
    /// Replace the draft's attributes, keeping its features
    StoreDraftComponent(DraftAttributes),

    /// Append newly drawn (already classified) features
    AddDrawnFeatures(Vec<Feature>),
    /// Replace geometry of known features
    UpdateDrawnFeatures(Vec<Feature>),
    /// Remove features
    DeleteDrawnFeatures(Vec<Feature>),

    /// Edit flow: merge drawn lines
    AddDrawnLine(Vec<Feature>),
    /// Edit flow: merge drawn points
    AddDrawnPoint(Vec<Feature>),
    /// Edit flow: move lines
    UpdateDrawnLine(Vec<Feature>),
    /// Edit flow: move points
    UpdateDrawnPoint(Vec<Feature>),
    /// Edit flow: remove lines
    DeleteDrawnLine(Vec<Feature>),
    /// Edit flow: remove points
    DeleteDrawnPoint(Vec<Feature>),

    /// Replace the signal association (at most one signal)
    SelectSignal(Option<Feature>),
    /// Track the drawing surface's sub-state
    SetDrawState(DrawState),
    /// Track how many features are selected on the surface
    SetSelection(usize),

    /// Submit a new component (optimistically clears the draft)
    SaveCreate,
    /// Submit an edited component (optimistically clears the draft)
    SaveEdit,
    /// Persistence confirmed the save
    SaveSucceeded,
    /// Persistence rejected the save; the draft is restored
    SaveFailed {
        /// Error shown to the user
        message: String,
    },
    /// Abandon a new component
    CancelCreate,
    /// Abandon an edit
    CancelEdit,
}

impl Action {
    /// Action name, used in logs
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::StartCreate { .. } => "start_create",
            Self::StartEdit { .. } => "start_edit",
            Self::StoreDraftComponent(_) => "store_draft_component",
            Self::AddDrawnFeatures(_) => "add_drawn_features",
            Self::UpdateDrawnFeatures(_) => "update_drawn_features",
            Self::DeleteDrawnFeatures(_) => "delete_drawn_features",
            Self::AddDrawnLine(_) => "add_drawn_line",
            Self::AddDrawnPoint(_) => "add_drawn_point",
            Self::UpdateDrawnLine(_) => "update_drawn_lines",
            Self::UpdateDrawnPoint(_) => "update_drawn_points",
            Self::DeleteDrawnLine(_) => "delete_drawn_line",
            Self::DeleteDrawnPoint(_) => "delete_drawn_point",
            Self::SelectSignal(_) => "select_signal",
            Self::SetDrawState(_) => "set_draw_state",
            Self::SetSelection(_) => "set_selection",
            Self::SaveCreate => "save_create",
            Self::SaveEdit => "save_edit",
            Self::SaveSucceeded => "save_succeeded",
            Self::SaveFailed { .. } => "save_failed",
            Self::CancelCreate => "cancel_create",
            Self::CancelEdit => "cancel_edit",
        }
    }

    /// Edit-flow add action for a geometry kind
    #[inline]
    #[must_use]
    pub fn edit_add(kind: GeometryKind, features: Vec<Feature>) -> Self {
        match kind {
            GeometryKind::Line => Self::AddDrawnLine(features),
            GeometryKind::Point => Self::AddDrawnPoint(features),
        }
    }

    /// Edit-flow update action for a geometry kind
    #[inline]
    #[must_use]
    pub fn edit_update(kind: GeometryKind, features: Vec<Feature>) -> Self {
        match kind {
            GeometryKind::Line => Self::UpdateDrawnLine(features),
            GeometryKind::Point => Self::UpdateDrawnPoint(features),
        }
    }

    /// Edit-flow delete action for a geometry kind
    #[inline]
    #[must_use]
    pub fn edit_delete(kind: GeometryKind, features: Vec<Feature>) -> Self {
        match kind {
            GeometryKind::Line => Self::DeleteDrawnLine(features),
            GeometryKind::Point => Self::DeleteDrawnPoint(features),
        }
    }
}

/// Side effect requested by the reducer
///
/// The reducer never touches the drawing surface itself; the caller executes
/// these after each dispatch.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Overwrite the drawing tool's feature collection with this list
    SyncDrawTool(Vec<Feature>),
    /// Remove everything from the drawing tool
    ClearDrawTool,
}
