//! # Meshers
//!
//! A [`Mesher`] turns geometry text into a triangulated [`Mesh`]. The
//! property engine only depends on the trait, so another triangulator can be
//! plugged in without touching the integrators.
//!
//! [`EarcutMesher`] is the shipped implementation: it discretises curves
//! with the characteristic lengths found in the text and triangulates every
//! plane surface (outer loop plus holes) with `earcutr`.
//!
//! ## Example
//!
//! ```rust
//! use section_core::mesher::{EarcutMesher, Mesher};
//!
//! let text = "
//!     Point(1) = {0, 0, 0, 0.1};
//!     Point(2) = {0.01, 0, 0, 0.1};
//!     Point(3) = {0.01, 0.1, 0, 0.1};
//!     Point(4) = {0, 0.1, 0, 0.1};
//!     Line(5) = {1, 2}; Line(6) = {2, 3}; Line(7) = {3, 4}; Line(8) = {4, 1};
//!     Line Loop(9) = {5, 6, 7, 8};
//!     Plane Surface(10) = {9};
//! ";
//! let mesh = EarcutMesher::default().triangulate(text).unwrap();
//! assert_eq!(mesh.triangle_count(), 2);
//! assert!((mesh.area() - 1e-3).abs() < 1e-15);
//! ```

pub mod geo;

use tracing::trace;

use crate::errors::{SectionError, SectionResult};
use crate::geometry::{Mesh, Point};

pub use geo::{GeoDocument, GeoWriter};

/// Default upper bound on mesh points
pub const DEFAULT_MAX_POINTS: usize = 2_000_000;

/// Geometry text to triangles.
pub trait Mesher {
    fn triangulate(&self, geometry: &str) -> SectionResult<Mesh>;
}

/// Ear-clipping mesher over the geometry subset read by [`GeoDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EarcutMesher {
    /// Meshes needing more points than this fail instead of allocating
    pub max_points: usize,
}

impl Default for EarcutMesher {
    fn default() -> Self {
        EarcutMesher { max_points: DEFAULT_MAX_POINTS }
    }
}

impl Mesher for EarcutMesher {
    fn triangulate(&self, geometry: &str) -> SectionResult<Mesh> {
        let doc = GeoDocument::parse(geometry)?;
        if doc.surfaces().is_empty() {
            return Err(SectionError::mesh_generation("geometry has no plane surface"));
        }

        let mut points: Vec<Point> = Vec::new();
        let mut triangles: Vec<[usize; 3]> = Vec::new();

        for (surface_id, loops) in doc.surfaces() {
            let mut ring: Vec<Point> = Vec::new();
            let mut holes: Vec<usize> = Vec::new();
            for (k, &loop_id) in loops.iter().enumerate() {
                if k > 0 {
                    holes.push(ring.len());
                }
                let budget = self.max_points.saturating_sub(points.len() + ring.len());
                ring.extend(doc.loop_polyline(loop_id, budget)?);
            }
            if points.len() + ring.len() > self.max_points {
                return Err(SectionError::mesh_generation(format!(
                    "mesh needs more than {} points",
                    self.max_points
                )));
            }

            let coords: Vec<f64> = ring.iter().flat_map(|p| [p.x, p.y]).collect();
            let indices = earcutr::earcut(&coords, &holes, 2).map_err(|e| {
                SectionError::mesh_generation(format!("surface {}: triangulation failed: {:?}", surface_id, e))
            })?;
            if indices.is_empty() {
                return Err(SectionError::mesh_generation(format!(
                    "surface {} produced no triangles",
                    surface_id
                )));
            }
            trace!(surface = surface_id, points = ring.len(), triangles = indices.len() / 3, "surface triangulated");

            let offset = points.len();
            triangles.extend(
                indices
                    .chunks_exact(3)
                    .map(|t| [offset + t[0], offset + t[1], offset + t[2]]),
            );
            points.extend(ring);
        }

        Mesh::new(points, triangles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn annulus(lc: f64) -> String {
        // r = 1 outer, r = 0.5 hole, each circle as four quarter arcs
        let mut geo = GeoWriter::new();
        let centre = geo.point(0.0, 0.0, lc);
        let circle = |geo: &mut GeoWriter, r: f64| {
            let p: Vec<i64> = [(r, 0.0), (0.0, r), (-r, 0.0), (0.0, -r)]
                .iter()
                .map(|&(x, y)| geo.point(x, y, lc))
                .collect();
            let arcs: Vec<i64> = (0..4).map(|i| geo.circle(p[i], centre, p[(i + 1) % 4])).collect();
            geo.line_loop(&arcs)
        };
        let outer = circle(&mut geo, 1.0);
        let inner = circle(&mut geo, 0.5);
        geo.plane_surface(&[outer, inner]);
        geo.finish()
    }

    #[test]
    fn test_annulus_with_hole() {
        let mesh = EarcutMesher::default().triangulate(&annulus(0.01)).unwrap();
        let exact = std::f64::consts::PI * (1.0 - 0.25);
        let area = mesh.area();
        assert!(area < exact);
        assert!((area - exact).abs() / exact < 1e-3, "area {}", area);
        let (x, y) = mesh.centroid();
        assert!(x.abs() < 1e-9 && y.abs() < 1e-9);
    }

    #[test]
    fn test_finer_mesh_is_closer() {
        let exact = std::f64::consts::PI * 0.75;
        let coarse = EarcutMesher::default().triangulate(&annulus(0.1)).unwrap().area();
        let fine = EarcutMesher::default().triangulate(&annulus(0.01)).unwrap().area();
        assert!((exact - fine) < (exact - coarse));
    }

    #[test]
    fn test_no_surface_is_error() {
        let err = EarcutMesher::default()
            .triangulate("Point(1) = {0, 0, 0};")
            .unwrap_err();
        assert_eq!(err.error_code(), "MESH_GENERATION");
    }

    #[test]
    fn test_point_budget() {
        let mesher = EarcutMesher { max_points: 50 };
        assert!(mesher.triangulate(&annulus(0.001)).is_err());
        assert!(mesher.triangulate(&annulus(1.0)).is_ok());
    }
}
