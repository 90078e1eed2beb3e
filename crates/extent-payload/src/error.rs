//! Payload assembly errors

use extent_router::{FeatureTable, RouterError};

/// Errors raised while assembling a payload
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PayloadError {
    /// Draft was saved without choosing a component type
    #[error("draft has no component type")]
    MissingComponentType,

    /// Captured feature has no table to go to
    #[error("feature {id} cannot be stored in {table}")]
    UnroutableFeature {
        /// Table the draft declares
        table: FeatureTable,
        /// Feature id, empty when absent
        id: String,
    },

    /// Table routing failed
    #[error(transparent)]
    Router(#[from] RouterError),
}

impl PayloadError {
    /// Configuration errors mean a code/config mismatch and must not be retried
    #[inline]
    #[must_use]
    pub fn is_config_error(&self) -> bool {
        match self {
            Self::Router(e) => e.is_config_error(),
            Self::MissingComponentType | Self::UnroutableFeature { .. } => false,
        }
    }

    /// Check if the user can fix the draft and retry
    #[inline]
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        !self.is_config_error()
    }
}
