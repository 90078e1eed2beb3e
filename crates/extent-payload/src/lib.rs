//! Extent Payload Assembler
//!
//! Turns a finished draft into what the persistence layer stores. Both
//! assemblers are pure: no I/O, same input gives the same payload.
//!
//! # Core Concepts
//!
//! - [`assemble_insert_payload`]: full payload for a new component, feature
//!   rows nested under their table names as `{ "data": [...] }`
//! - [`assemble_update_payload`]: only the changed rows of an edited
//!   component, as `*ToCreate` lists and `featureIdsToDelete`
//! - [`PayloadError`]: missing component type, unroutable features, routing
//!   failures
//!
//! # Example
//!
//! ```rust
//! use extent_feature::{capture_feature, Feature, Geometry, ReferenceLayer};
//! use extent_payload::assemble_insert_payload;
//! use extent_router::FeatureTable;
//! use extent_session::DraftComponent;
//!
//! let raw = Feature::new(Geometry::Point(vec![-97.74, 30.27])).with_property("INTERSECTION_ID", 5512);
//! let intersection = capture_feature(&raw, ReferenceLayer::Intersections).unwrap();
//! let draft = DraftComponent::new(FeatureTable::Intersections)
//!     .with_component_id(18)
//!     .with_features(vec![intersection]);
//!
//! let payload = assemble_insert_payload(&draft, 240).unwrap();
//! assert_eq!(payload.rows(FeatureTable::Intersections).len(), 1);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod error;
mod insert;
mod routing;
mod update;

pub use error::PayloadError;
pub use insert::{
    assemble_insert_payload, InsertComponentPayload, Rows, SubcomponentRow, TagRow, WorkTypeRow,
};
pub use update::{assemble_update_payload, UpdateComponentPayload};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
