//! Principal axis angle.
//!
//! Alpha ∈ [0, π) is the angle for which the mesh rotated by −Alpha has its
//! smallest Jxx, and with it a zero product of inertia. Rotating the mesh
//! by −θ gives
//!
//! ```text
//! Jxx(θ) = (Jxx + Jyy)/2 + (Jxx − Jyy)/2·cos 2θ − Jxy·sin 2θ
//! ```
//!
//! whose minimum has a closed form. A grid search over the mesh itself is
//! kept as an independent check.

use std::f64::consts::PI;

use tracing::debug;

use super::moments::jxx;
use crate::geometry::Mesh;

/// Closed-form angle from centroidal second moments, in [0, π)
///
/// ```rust
/// use section_core::calculations::principal::closed_form_angle;
///
/// // tall rectangle: strong axis horizontal, weak axis found a quarter turn away
/// let alpha = closed_form_angle(8.33e-7, 8.33e-9, 0.0);
/// assert!((alpha - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
/// ```
pub fn closed_form_angle(jxx: f64, jyy: f64, jxy: f64) -> f64 {
    let phi = (2.0 * jxy).atan2(jxx - jyy);
    ((PI - phi) / 2.0).rem_euclid(PI)
}

/// Multi-resolution grid search for the angle of minimum Jxx.
///
/// Starts with `initial_step` over [0, π], then repeatedly narrows to one
/// step either side of the best angle and quarters the step, until the step
/// is below `tolerance`.
pub fn search_angle(mesh: &Mesh, initial_step: f64, tolerance: f64) -> f64 {
    let jxx_at = |alpha: f64| jxx(&mesh.rotated(-alpha));
    let (mut lo, mut hi, mut step) = (0.0, PI, initial_step);
    let (mut best, mut best_j) = (0.0, f64::INFINITY);

    loop {
        let count = ((hi - lo) / step).round() as usize;
        for k in 0..=count {
            let alpha = lo + step * k as f64;
            let j = jxx_at(alpha);
            if j < best_j {
                best = alpha;
                best_j = j;
            }
        }
        debug!(step, alpha = best, jxx = best_j, "principal axis search level");
        if step < tolerance {
            break;
        }
        lo = best - step;
        hi = best + step;
        step /= 4.0;
    }

    best.rem_euclid(PI)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::moments::{jxy, jyy};
    use crate::geometry::Point;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    /// L-shaped polygon, centroid moved to the origin
    fn l_shape() -> Mesh {
        let points = vec![
            p(0.0, 0.0),
            p(3.0, 0.0),
            p(3.0, 1.0),
            p(1.0, 1.0),
            p(1.0, 2.0),
            p(0.0, 2.0),
        ];
        let mut mesh = Mesh::new(points, vec![[0, 1, 2], [0, 2, 3], [0, 3, 4], [0, 4, 5]]).unwrap();
        let (x, y) = mesh.centroid();
        mesh.translate(-x, -y);
        mesh
    }

    #[test]
    fn test_closed_form_special_cases() {
        // wide section: x is already the weak axis
        assert!((closed_form_angle(1.0, 4.0, 0.0)).abs() < 1e-12);
        // equal angle: diagonal at 3π/4 is the weak axis
        assert!((closed_form_angle(2.0, 2.0, -1.0) - 3.0 * PI / 4.0).abs() < 1e-12);
        // equal moments and no product: every axis is principal
        assert!((closed_form_angle(2.0, 2.0, 0.0) - PI / 2.0).abs() < 1e-12);
        assert_eq!(closed_form_angle(1.0, 4.0, -0.0), 0.0);
    }

    #[test]
    fn test_closed_form_zeroes_product() {
        let mut mesh = l_shape();
        let (a, b, c) = (jxx(&mesh), jyy(&mut mesh), jxy(&mesh));
        let alpha = closed_form_angle(a, b, c);
        assert!((0.0..PI).contains(&alpha));
        mesh.rotate(-alpha);
        let scale = a + b;
        assert!(jxy(&mesh).abs() < 1e-12 * scale);
        // and Jxx is the minimum
        assert!(jxx(&mesh) <= jyy(&mut mesh));
    }

    #[test]
    fn test_search_agrees_with_closed_form() {
        let mut mesh = l_shape();
        let (a, b, c) = (jxx(&mesh), jyy(&mut mesh), jxy(&mesh));
        let closed = closed_form_angle(a, b, c);
        let searched = search_angle(&mesh, PI / 8.0, 1e-6);
        assert!((closed - searched).abs() < 1e-4, "{} vs {}", closed, searched);
    }
}
