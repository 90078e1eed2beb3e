//! Routing errors

use extent_feature::GeometryKind;

/// Errors raised while routing features to tables
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouterError {
    /// Table name with no route; code and schema disagree
    #[error("unknown feature table: {0}")]
    UnknownTable(String),

    /// Geometry cannot be wrapped for the table
    #[error("{table} stores {expected} geometry, got {found}")]
    GeometryMismatch {
        /// Target table
        table: &'static str,
        /// Geometry kind the table stores
        expected: GeometryKind,
        /// GeoJSON type of the offending geometry
        found: &'static str,
    },

    /// Drawn translation requested for a captured feature
    #[error("feature {0} has no draw-identifier")]
    NotDrawn(String),
}

impl RouterError {
    /// Configuration errors mean a code/config mismatch and must not be retried
    #[inline]
    #[must_use]
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::UnknownTable(_))
    }

    /// Check if the error is recoverable
    #[inline]
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        !self.is_config_error()
    }
}
