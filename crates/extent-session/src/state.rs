//! Session state

use crate::draft::DraftComponent;
use extent_feature::Feature;

/// Session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// No active draft
    #[default]
    Idle,
    /// Creating a new component
    Creating,
    /// Editing a persisted component
    Editing {
        /// Row being edited
        project_component_id: i64,
    },
}

impl Phase {
    /// Check if a draft session is active
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Idle)
    }
}

/// Draw sub-state within an active phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawState {
    /// Nothing in progress
    #[default]
    None,
    /// Point drawing mode active
    DrawingPoints,
    /// Line drawing mode active
    DrawingLines,
    /// One or more features selected
    FeatureSelected,
}

/// Snapshot kept while a save is in flight
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSave {
    /// Phase the save was dispatched from
    pub phase: Phase,
    /// Draft as submitted
    pub draft: DraftComponent,
    /// Persisted features at edit start (empty for creates)
    pub persisted: Vec<Feature>,
}

/// Complete session state
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionState {
    /// Current phase
    pub phase: Phase,
    /// Draw sub-state
    pub draw_state: DrawState,
    /// Active draft, present iff the phase is active
    pub draft: Option<DraftComponent>,
    /// Features loaded from the server when editing started
    pub persisted: Vec<Feature>,
    /// In-flight save
    pub pending: Option<PendingSave>,
    /// Message of the last failed save
    pub last_error: Option<String>,
}

impl SessionState {
    /// Draft feature list (empty when idle)
    #[inline]
    #[must_use]
    pub fn features(&self) -> &[Feature] {
        self.draft.as_ref().map_or(&[], |d| d.features.as_slice())
    }
}
