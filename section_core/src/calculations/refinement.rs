//! # Precision Refinement
//!
//! Meshes a shape with ever smaller elements until the measured area stops
//! changing. Each iteration halves the element size, asks the shape for new
//! geometry text and triangulates it; convergence is reached once the
//! relative area change falls below the tolerance, but never before
//! `min_iterations` have run, since a coarse element size can leave an arc
//! at the same chord twice in a row.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::errors::{SectionError, SectionResult};
use crate::geometry::Mesh;
use crate::mesher::Mesher;
use crate::settings::{CalculationSettings, NonConvergencePolicy};
use crate::shapes::GeometryProvider;

/// Outcome of the refinement loop
#[derive(Debug, Clone, PartialEq)]
pub struct RefinedMesh {
    pub mesh: Mesh,
    /// Area of `mesh`
    pub area: f64,
    /// Element size that produced `mesh`
    pub precision: f64,
    pub iterations: usize,
    pub converged: bool,
    /// Relative area change of the last iteration
    pub relative_change: f64,
}

/// How the final mesh of a calculation was reached
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeshSummary {
    pub precision: f64,
    pub iterations: usize,
    pub converged: bool,
    pub points: usize,
    pub triangles: usize,
}

impl RefinedMesh {
    pub fn summary(&self) -> MeshSummary {
        MeshSummary {
            precision: self.precision,
            iterations: self.iterations,
            converged: self.converged,
            points: self.mesh.points().len(),
            triangles: self.mesh.triangle_count(),
        }
    }
}

/// Refine the mesh of `shape` until its area is stable.
pub fn refine<G, M>(shape: &G, mesher: &M, settings: &CalculationSettings) -> SectionResult<RefinedMesh>
where
    G: GeometryProvider + ?Sized,
    M: Mesher + ?Sized,
{
    let mut precision = settings.initial_precision;
    let mut relative_change = f64::INFINITY;
    let mut last: Option<(Mesh, f64, f64)> = None;

    for iteration in 1..=settings.max_iterations {
        precision /= 2.0;
        let mesh = mesher.triangulate(&shape.geometry_at(precision))?;
        let area = mesh.area();
        if !(area > 0.0 && area.is_finite()) {
            return Err(SectionError::InvalidArea { area, precision });
        }
        debug!(
            iteration,
            precision,
            area,
            points = mesh.points().len(),
            triangles = mesh.triangle_count(),
            "refinement step"
        );

        if let Some((_, previous, _)) = &last {
            relative_change = ((area - previous) / area).abs();
            if relative_change < settings.area_tolerance && iteration >= settings.min_iterations {
                info!(iteration, precision, area, "mesh converged");
                return Ok(RefinedMesh {
                    mesh,
                    area,
                    precision,
                    iterations: iteration,
                    converged: true,
                    relative_change,
                });
            }
        }
        last = Some((mesh, area, precision));
    }

    let not_converged = SectionError::NotConverged {
        iterations: settings.max_iterations,
        relative_change,
    };
    match (settings.on_non_convergence, last) {
        (NonConvergencePolicy::Accept, Some((mesh, area, precision))) => {
            warn!(
                iterations = settings.max_iterations,
                relative_change, "mesh did not converge, keeping the last one"
            );
            Ok(RefinedMesh {
                mesh,
                area,
                precision,
                iterations: settings.max_iterations,
                converged: false,
                relative_change,
            })
        }
        _ => Err(not_converged),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesher::EarcutMesher;
    use crate::shapes::{Rectangle, Tube};
    use std::cell::Cell;

    /// Shape whose geometry text is fixed, to drive the loop directly
    struct FixedText(&'static str);

    impl GeometryProvider for FixedText {
        fn geometry_at(&self, _precision: f64) -> String {
            self.0.to_string()
        }

        fn identity(&self) -> String {
            "fixed".to_string()
        }
    }

    /// Mesher returning a square whose size shrinks every call
    struct Shrinking {
        calls: Cell<usize>,
    }

    impl Mesher for Shrinking {
        fn triangulate(&self, _geometry: &str) -> SectionResult<Mesh> {
            let n = self.calls.get() + 1;
            self.calls.set(n);
            let s = 1.0 / n as f64;
            let points = vec![
                crate::geometry::Point::new(0.0, 0.0),
                crate::geometry::Point::new(s, 0.0),
                crate::geometry::Point::new(s, s),
            ];
            Mesh::new(points, vec![[0, 1, 2]])
        }
    }

    #[test]
    fn test_polygon_converges_at_min_iterations() {
        let settings = CalculationSettings::default();
        let refined = refine(&Rectangle::new(0.1, 0.01), &EarcutMesher::default(), &settings).unwrap();
        assert!(refined.converged);
        assert_eq!(refined.iterations, settings.min_iterations);
        assert!((refined.area - 1.0e-3).abs() < 1e-15);
        assert!((refined.precision - 0.1 / 64.0).abs() < 1e-15);
    }

    #[test]
    fn test_curved_shape_converges() {
        let settings = CalculationSettings::default();
        let refined = refine(&Tube::new(0.1, 0.005), &EarcutMesher::default(), &settings).unwrap();
        assert!(refined.converged);
        assert!(refined.relative_change < settings.area_tolerance);
        assert!(refined.iterations >= settings.min_iterations);
        let summary = refined.summary();
        assert_eq!(summary.points, refined.mesh.points().len());
    }

    #[test]
    fn test_non_convergence_policies() {
        let shape = FixedText("");
        let mut settings = CalculationSettings {
            max_iterations: 5,
            min_iterations: 2,
            ..Default::default()
        };

        let accepted = refine(&shape, &Shrinking { calls: Cell::new(0) }, &settings).unwrap();
        assert!(!accepted.converged);
        assert_eq!(accepted.iterations, 5);
        assert!((accepted.area - 0.5 / 25.0).abs() < 1e-15);

        settings.on_non_convergence = NonConvergencePolicy::Error;
        let err = refine(&shape, &Shrinking { calls: Cell::new(0) }, &settings).unwrap_err();
        match err {
            SectionError::NotConverged { iterations, relative_change } => {
                assert_eq!(iterations, 5);
                // (1/32 - 1/50) / (1/50)
                assert!((relative_change - 0.5625).abs() < 1e-12);
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_mesher_error_propagates() {
        let err = refine(&FixedText("Point(1) = {0, 0, 0};"), &EarcutMesher::default(), &CalculationSettings::default())
            .unwrap_err();
        assert_eq!(err.error_code(), "MESH_GENERATION");
    }

    #[test]
    fn test_degenerate_area_is_rejected() {
        struct Flat;
        impl Mesher for Flat {
            fn triangulate(&self, _geometry: &str) -> SectionResult<Mesh> {
                let points = vec![
                    crate::geometry::Point::new(0.0, 0.0),
                    crate::geometry::Point::new(1.0, 0.0),
                    crate::geometry::Point::new(2.0, 0.0),
                ];
                Mesh::new(points, vec![[0, 1, 2]])
            }
        }
        let err = refine(&FixedText(""), &Flat, &CalculationSettings::default()).unwrap_err();
        assert!(matches!(err, SectionError::InvalidArea { area, .. } if area == 0.0));
    }
}
