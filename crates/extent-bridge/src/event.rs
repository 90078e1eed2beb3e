//! Drawing surface events

use extent_feature::Feature;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle event emitted by the drawing surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum DrawToolEvent {
    /// User finished drawing features
    Create {
        /// New features, carrying the tool's transient ids
        features: Vec<Feature>,
    },
    /// User changed existing features
    Update {
        /// Affected features with their new geometry
        features: Vec<Feature>,
        /// Kind of change
        action: UpdateAction,
    },
    /// User deleted features
    Delete {
        /// Removed features
        features: Vec<Feature>,
    },
    /// Surface switched interaction mode
    ModeChange {
        /// New mode
        mode: ToolMode,
    },
    /// Selection on the surface changed
    SelectionChange {
        /// Currently selected features
        features: Vec<Feature>,
    },
}

impl DrawToolEvent {
    /// Event name, used in logs
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Create { .. } => "create",
            Self::Update { .. } => "update",
            Self::Delete { .. } => "delete",
            Self::ModeChange { .. } => "mode_change",
            Self::SelectionChange { .. } => "selection_change",
        }
    }
}

/// Update action tag
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum UpdateAction {
    /// Whole features dragged
    Move,
    /// Vertices changed
    ChangeCoordinates,
    /// Any other tag (style changes and the like)
    Other(String),
}

impl UpdateAction {
    /// Tag as sent by the surface
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Move => "move",
            Self::ChangeCoordinates => "change_coordinates",
            Self::Other(tag) => tag,
        }
    }

    /// Check if the update changes geometry
    #[inline]
    #[must_use]
    pub fn changes_geometry(&self) -> bool {
        matches!(self, Self::Move | Self::ChangeCoordinates)
    }
}

impl From<String> for UpdateAction {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "move" => Self::Move,
            "change_coordinates" => Self::ChangeCoordinates,
            _ => Self::Other(tag),
        }
    }
}

impl From<&str> for UpdateAction {
    fn from(tag: &str) -> Self {
        Self::from(tag.to_string())
    }
}

impl From<UpdateAction> for String {
    fn from(action: UpdateAction) -> Self {
        action.as_str().to_string()
    }
}

impl fmt::Display for UpdateAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Interaction mode of the drawing surface
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ToolMode {
    /// Select and drag whole features
    SimpleSelect,
    /// Vertex editing (allows midpoint insertion)
    DirectSelect,
    /// Drawing points
    DrawPoint,
    /// Drawing lines
    DrawLineString,
    /// Any other mode
    Other(String),
}

impl ToolMode {
    /// Mode name as used by the surface
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::SimpleSelect => "simple_select",
            Self::DirectSelect => "direct_select",
            Self::DrawPoint => "draw_point",
            Self::DrawLineString => "draw_line_string",
            Self::Other(name) => name,
        }
    }

    /// Check if the mode draws new features
    #[inline]
    #[must_use]
    pub fn is_drawing(&self) -> bool {
        matches!(self, Self::DrawPoint | Self::DrawLineString)
    }
}

impl From<String> for ToolMode {
    fn from(name: String) -> Self {
        match name.as_str() {
            "simple_select" => Self::SimpleSelect,
            "direct_select" => Self::DirectSelect,
            "draw_point" => Self::DrawPoint,
            "draw_line_string" => Self::DrawLineString,
            _ => Self::Other(name),
        }
    }
}

impl From<&str> for ToolMode {
    fn from(name: &str) -> Self {
        Self::from(name.to_string())
    }
}

impl From<ToolMode> for String {
    fn from(mode: ToolMode) -> Self {
        mode.as_str().to_string()
    }
}

impl fmt::Display for ToolMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
