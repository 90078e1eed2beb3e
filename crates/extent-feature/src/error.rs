//! Feature classification errors

/// Errors raised while classifying or capturing features
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FeatureError {
    /// Captured features must never carry a draw-identifier
    #[error("feature {0} carries a draw-identifier and cannot be captured")]
    AlreadyDrawn(String),

    /// Reference candidate lacks the layer's id property
    #[error("reference feature from {layer} is missing id property {key}")]
    MissingReferenceId {
        /// Reference layer name
        layer: &'static str,
        /// Expected id property
        key: &'static str,
    },

    /// Unknown draw mode name
    #[error("unknown draw mode: {0}")]
    UnknownDrawMode(String),

    /// Unknown reference layer name
    #[error("unknown reference layer: {0}")]
    UnknownReferenceLayer(String),
}

impl FeatureError {
    /// Check if the caller can recover (skip the feature and continue)
    ///
    /// Unknown mode/layer names point at a code or config mismatch.
    #[inline]
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::AlreadyDrawn(_) | Self::MissingReferenceId { .. }
        )
    }
}
