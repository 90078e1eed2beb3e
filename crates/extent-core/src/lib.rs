//! Extent Core
//!
//! Front end of the component geometry editor. Wires the drawing surface, the
//! draft session and the payload assemblers together and runs saves against a
//! persistence backend.
//!
//! # Core Concepts
//!
//! - [`ComponentEditor`]: start, edit, capture, cancel and save a component
//! - [`ComponentStore`]: the persistence backend (async, one call per save)
//! - [`EditorConfig`]: TOML settings
//! - [`init_tracing`]: subscriber setup honoring `RUST_LOG`
//!
//! # Example
//!
//! ```rust,no_run
//! use extent_core::{ComponentEditor, ComponentStore, EditorConfig, PersistenceError};
//! use extent_bridge::{DrawSurface, ToolMode};
//! use extent_feature::Feature;
//! use extent_payload::{InsertComponentPayload, UpdateComponentPayload};
//! use extent_router::FeatureTable;
//! use extent_session::DraftComponent;
//!
//! struct Backend;
//!
//! #[async_trait::async_trait]
//! impl ComponentStore for Backend {
//!     async fn insert_component(&self, _: &InsertComponentPayload) -> Result<i64, PersistenceError> {
//!         Ok(1)
//!     }
//!     async fn update_component(&self, _: &UpdateComponentPayload) -> Result<(), PersistenceError> {
//!         Ok(())
//!     }
//! }
//!
//! struct Map;
//!
//! impl DrawSurface for Map {
//!     fn set_features(&mut self, _: &[Feature]) {}
//!     fn change_mode(&mut self, _: &ToolMode) {}
//! }
//!
//! # async fn run() -> Result<(), extent_core::EditorError> {
//! let config = EditorConfig::new().with_project_id(301);
//! let mut editor = ComponentEditor::new(config, Backend, Map);
//! editor.start_create(DraftComponent::new(FeatureTable::DrawnLines).with_component_id(7));
//! // ... drawing surface events go to editor.handle_tool_event(...)
//! editor.save().await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod config;
mod editor;
mod error;
mod store;
mod telemetry;

pub use config::EditorConfig;
pub use editor::{ComponentEditor, ComponentPayload, SaveOutcome};
pub use error::{ConfigError, EditorError, PersistenceError};
pub use store::ComponentStore;
pub use telemetry::init_tracing;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
