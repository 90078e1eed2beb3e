//! Extent Draw-Tool Bridge
//!
//! Adapts the interactive drawing surface's lifecycle events into draft
//! session actions and pushes the session's view back into the surface.
//!
//! # Core Concepts
//!
//! - [`DrawToolEvent`]: create, update, delete, mode change, selection change
//! - [`DrawSurface`]: the two calls the bridge makes on the surface
//! - [`DrawToolBridge`]: classification, create/edit routing, affordance flags
//! - [`apply_commands`]: executes reducer commands against a surface
//!
//! # Example
//!
//! ```rust
//! use extent_bridge::{DrawSurface, DrawToolBridge, DrawToolEvent, ToolMode};
//! use extent_feature::{DrawMode, Feature, Geometry};
//! use extent_router::FeatureTable;
//! use extent_session::{Action, DraftComponent, Session};
//!
//! #[derive(Default)]
//! struct Surface(Vec<Feature>);
//!
//! impl DrawSurface for Surface {
//!     fn set_features(&mut self, features: &[Feature]) {
//!         self.0 = features.to_vec();
//!     }
//!     fn change_mode(&mut self, _mode: &ToolMode) {}
//! }
//!
//! let mut session = Session::new();
//! session.dispatch(Action::StartCreate {
//!     draft: DraftComponent::new(FeatureTable::DrawnPoints),
//! });
//!
//! let mut bridge = DrawToolBridge::new(DrawMode::Points);
//! let mut surface = Surface::default();
//! let raw = Feature::new(Geometry::Point(vec![-97.74, 30.27])).with_id("tool-1");
//! bridge.handle(DrawToolEvent::Create { features: vec![raw] }, &mut session, &mut surface);
//!
//! // The surface now holds the relabelled feature
//! assert_eq!(surface.0, session.features());
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod bridge;
mod event;
mod surface;

pub use bridge::{BridgeSignals, DrawToolBridge};
pub use event::{DrawToolEvent, ToolMode, UpdateAction};
pub use surface::{apply_commands, DrawSurface};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
