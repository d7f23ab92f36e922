//! Slot geometry for pedigree charts
//!
//! Maps every slot coordinate of a fixed-depth ancestor grid to a rectangle
//! inside a caller-supplied content box and routes the elbow connectors
//! between each child and its parents. The geometry never depends on which
//! ancestors are known; see [`SlotGeometry::retain_known`] for pruning the
//! connectors of a specific grid.

pub mod config;
pub mod engine;
pub mod error;
pub mod routing;
pub mod types;

pub use config::GeometryConfig;
pub use engine::{compute_geometry, GEOMETRY_TOLERANCE};
pub use error::LayoutError;
pub use routing::{attachment_point, route_connectors, route_elbow, Edge};
pub use types::*;
