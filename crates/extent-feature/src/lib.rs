//! Extent Feature Model
//!
//! GeoJSON features and their provenance.
//!
//! # Core Concepts
//!
//! - [`Feature`]: GeoJSON feature with an open property bag
//! - [`Geometry`]: Point/line geometries (plus their multi forms)
//! - [`assign_draw_provenance`]: tags a freshly drawn feature with a [`DrawId`]
//! - [`is_drawn`]: the single drawn-vs-captured discriminator
//! - [`capture_feature`]: tags a [`ReferenceLayer`] candidate as captured
//!
//! # Example
//!
//! ```rust
//! use extent_feature::{assign_draw_provenance, is_drawn, DrawMode, Feature, Geometry};
//!
//! let raw = Feature::new(Geometry::LineString(vec![vec![0.0, 0.0], vec![1.0, 1.0]]));
//! let drawn = assign_draw_provenance(&raw, DrawMode::Lines);
//!
//! assert!(is_drawn(&drawn));
//! assert!(!is_drawn(&raw));
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod error;
mod feature;
mod geometry;
mod provenance;
mod reference;

pub use error::FeatureError;
pub use feature::{Feature, FeatureId, Properties, DRAW_ID_KEY, LABEL_KEY, SOURCE_LAYER_KEY};
pub use geometry::{Geometry, GeometryKind, Position};
pub use provenance::{
    assign_draw_provenance, assign_draw_provenance_with, classify, draw_id, drawn_layer,
    feature_key, has_stable_id, is_drawn, partition, DrawId, DrawMode, DrawnLayer, FeatureKey,
    Provenance,
};
pub use reference::{capture_feature, ReferenceLayer};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
