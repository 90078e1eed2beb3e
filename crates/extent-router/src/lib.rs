//! Extent Feature Table Router
//!
//! Maps a component's feature table to the rules that turn a map feature into
//! an insertable row.
//!
//! # Core Concepts
//!
//! - [`FeatureTable`]: the six tables a component's geometry can live in
//! - [`TableRoute`]: static key translations and the multi-geometry wrapping
//! - [`translate_to_insertable`]: captured feature to row
//! - [`translate_drawn_to_insertable`]: drawn feature to row
//! - [`signal_record`]: dedicated transform for signal assets
//!
//! # Example
//!
//! ```rust
//! use extent_feature::{Feature, Geometry};
//! use extent_router::{translate_to_insertable, FeatureTable};
//!
//! let feature = Feature::new(Geometry::Point(vec![-97.74, 30.27]))
//!     .with_property("INTERSECTION_ID", 5512);
//! let record = translate_to_insertable(FeatureTable::Intersections, &feature).unwrap();
//!
//! assert_eq!(record.geography.type_name(), "MultiPoint");
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod error;
mod record;
mod table;
mod translate;

pub use error::RouterError;
pub use record::InsertionRecord;
pub use table::{FeatureTable, TableRoute};
pub use translate::{signal_record, translate_drawn_to_insertable, translate_to_insertable};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
