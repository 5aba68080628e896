//! # Geometry
//!
//! - [`primitives`] - triangle area, centroid, winding, axis clipping
//! - [`mesh`] - triangulated section with rigid transforms

pub mod mesh;
pub mod primitives;

pub use mesh::Mesh;
pub use primitives::{HalfPlane, Orientation, Point};
