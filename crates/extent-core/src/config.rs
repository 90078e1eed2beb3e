//! Editor configuration

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Editor settings, loaded from TOML
///
/// ```toml
/// project_id = 301
/// direct_select_override = true
/// log_filter = "info,extent_session=debug"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Project new components are created in
    pub project_id: Option<i64>,
    /// Force the surface out of vertex editing
    pub direct_select_override: bool,
    /// `tracing` filter directives, overridden by `RUST_LOG`
    pub log_filter: String,
    /// Emit logs as JSON lines
    pub json_logs: bool,
}

impl EditorConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With project
    #[inline]
    #[must_use]
    pub fn with_project_id(mut self, project_id: i64) -> Self {
        self.project_id = Some(project_id);
        self
    }

    /// With direct select override
    #[inline]
    #[must_use]
    pub fn with_direct_select_override(mut self, enabled: bool) -> Self {
        self.direct_select_override = enabled;
        self
    }

    /// With log filter
    #[inline]
    #[must_use]
    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    /// Parse from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Load from a TOML file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            project_id: None,
            direct_select_override: true,
            log_filter: "info".to_string(),
            json_logs: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EditorError;
    use std::io::Write;

    #[test]
    fn defaults() {
        let config = EditorConfig::default();
        assert!(config.direct_select_override);
        assert_eq!(config.log_filter, "info");
        assert_eq!(config.project_id, None);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = EditorConfig::from_toml_str("project_id = 301").unwrap();
        assert_eq!(config.project_id, Some(301));
        assert!(config.direct_select_override);
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "direct_select_override = false").unwrap();
        writeln!(file, "log_filter = \"debug\"").unwrap();

        let config = EditorConfig::from_path(file.path()).unwrap();
        assert!(!config.direct_select_override);
        assert_eq!(config.log_filter, "debug");
    }

    #[test]
    fn missing_file() {
        let err = EditorConfig::from_path("/nonexistent/extent.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn invalid_toml() {
        let err = EditorConfig::from_toml_str("project_id = \"abc\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn config_failures_are_fatal_editor_errors() {
        let err: EditorError = EditorConfig::from_path("/nonexistent/extent.toml")
            .unwrap_err()
            .into();
        assert!(matches!(err, EditorError::Config(ConfigError::Io { .. })));
        assert!(!err.is_recoverable());
    }
}
