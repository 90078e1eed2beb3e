//! Extent Draft Session
//!
//! State machine for creating and editing one project component's geometry.
//!
//! # Core Concepts
//!
//! - [`Phase`]: idle, creating, or editing a persisted component
//! - [`Action`]: closed set of inputs, handled exhaustively by [`reduce`]
//! - [`Command`]: side effects (drawing tool re-sync) returned by the reducer
//! - [`PendingSave`]: snapshot restored when an optimistic save fails
//!
//! Drawn features are matched by their draw id; captured features by their
//! source id. Features without either are never committed.
//!
//! # Example
//!
//! ```rust
//! use extent_feature::{assign_draw_provenance, DrawMode, Feature, Geometry};
//! use extent_router::FeatureTable;
//! use extent_session::{Action, DraftComponent, Phase, Session};
//!
//! let mut session = Session::new();
//! session.dispatch(Action::StartCreate {
//!     draft: DraftComponent::new(FeatureTable::DrawnLines),
//! });
//!
//! let line = Feature::new(Geometry::LineString(vec![vec![0.0, 0.0], vec![1.0, 1.0]]));
//! let drawn = assign_draw_provenance(&line, DrawMode::Lines);
//! session.dispatch(Action::AddDrawnFeatures(vec![drawn]));
//!
//! assert_eq!(session.phase(), Phase::Creating);
//! assert_eq!(session.features().len(), 1);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod action;
mod draft;
mod reducer;
mod session;
mod state;
mod transitions;

pub use action::{Action, Command};
pub use draft::{DraftAttributes, DraftComponent};
pub use reducer::{reduce, Transition};
pub use session::Session;
pub use state::{DrawState, PendingSave, Phase, SessionState};
pub use transitions::accepts;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
