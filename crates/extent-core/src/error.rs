//! Error types for the editor

use extent_feature::FeatureError;
use extent_payload::PayloadError;

/// Main editor error type
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    /// Save or cancel without an active draft
    #[error("no active draft")]
    NoActiveDraft,

    /// Create flow needs a project
    #[error("no project configured for new components")]
    MissingProject,

    /// Reference feature could not be captured
    #[error("capture failed: {0}")]
    Capture(#[from] FeatureError),

    /// Payload could not be assembled; the draft is untouched
    #[error("payload assembly failed: {0}")]
    Payload(#[from] PayloadError),

    /// Persistence rejected the save; the draft was restored
    #[error("save failed: {0}")]
    Persistence(#[from] PersistenceError),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl EditorError {
    /// Check if the user can retry without losing work
    #[inline]
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::NoActiveDraft | Self::Capture(_) => true,
            Self::Payload(e) => e.is_recoverable(),
            Self::Persistence(e) => e.is_recoverable(),
            Self::MissingProject | Self::Config(_) => false,
        }
    }
}

/// Errors reported by a [`ComponentStore`](crate::ComponentStore)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PersistenceError {
    /// Backend refused the mutation
    #[error("rejected: {0}")]
    Rejected(String),

    /// Backend could not be reached
    #[error("unavailable: {0}")]
    Unavailable(String),
}

impl PersistenceError {
    /// Check if the save may succeed on retry
    #[inline]
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("cannot read {path}: {source}")]
    Io {
        /// File path
        path: String,
        /// Underlying error
        source: std::io::Error,
    },

    /// TOML did not match the schema
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Log filter directives did not parse
    #[error("invalid log filter: {0}")]
    LogFilter(String),
}

impl ConfigError {
    /// Configuration errors are always fatal
    #[inline]
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        false
    }
}
