//! # Moment Integrator
//!
//! Second moments, product of inertia and first moment of a triangulated
//! section about the axes of the mesh's current frame.
//!
//! Jxx of one triangle uses the closed form for a triangle with a flat
//! (horizontal) edge; any other triangle is split at the level of its middle
//! vertex into two such triangles. Jyy reuses Jxx on the mesh turned a
//! quarter turn.

use crate::equations::section::{parallel_axis, triangle_moment_about_base};
use crate::geometry::primitives::{area3node, orientation, sort_by_y, Orientation, Point};
use crate::geometry::Mesh;

use std::f64::consts::FRAC_PI_2;

/// Relative size below which the product of inertia counts as zero
pub const PRODUCT_CUTOFF: f64 = 1e-12;

/// ∫y² dA of a triangle about the x axis
pub fn triangle_jxx(a: Point, b: Point, c: Point) -> f64 {
    let (low, mid, high) = sort_by_y(a, b, c);
    if low.y == mid.y {
        return flat_edge_jxx(high, low, mid);
    }
    if mid.y == high.y {
        return flat_edge_jxx(low, mid, high);
    }
    let t = (mid.y - low.y) / (high.y - low.y);
    let split = Point::new(low.x + (high.x - low.x) * t, mid.y);
    flat_edge_jxx(low, mid, split) + flat_edge_jxx(high, mid, split)
}

/// Triangle `apex, p, q` where `p` and `q` share the same y
fn flat_edge_jxx(apex: Point, p: Point, q: Point) -> f64 {
    let height = (apex.y - p.y).abs();
    let (left, right) = if p.x <= q.x { (p, q) } else { (q, p) };
    // halves on either side of the foot of the apex; a negative width means
    // the foot is outside the edge and that half is subtracted
    let w1 = apex.x - left.x;
    let w2 = right.x - apex.x;
    let about_base =
        w1.signum() * triangle_moment_about_base(w1, height) + w2.signum() * triangle_moment_about_base(w2, height);
    let area = area3node(apex, p, q);
    let offset = height / 3.0;
    let centroidal = about_base - area * offset * offset;
    let yc = (apex.y + p.y + q.y) / 3.0;
    parallel_axis(centroidal, area, yc)
}

/// ∫xy dA of a triangle, counter-clockwise winding enforced
pub fn triangle_jxy(a: Point, b: Point, c: Point) -> f64 {
    let vertices = match orientation(a, b, c) {
        Orientation::Clockwise => [a, c, b],
        _ => [a, b, c],
    };
    let mut sum = 0.0;
    for i in 0..3 {
        let p = vertices[i];
        let q = vertices[(i + 1) % 3];
        let cross = p.x * q.y - q.x * p.y;
        sum += cross * (p.x * q.y + 2.0 * p.x * p.y + 2.0 * q.x * q.y + q.x * p.y);
    }
    sum / 24.0
}

/// Jxx of the whole mesh, never negative
pub fn jxx(mesh: &Mesh) -> f64 {
    let sum: f64 = mesh.triangles().map(|(a, b, c)| triangle_jxx(a, b, c)).sum();
    sum.max(0.0)
}

/// Jyy of the whole mesh: Jxx after a quarter turn, mesh restored afterwards
pub fn jyy(mesh: &mut Mesh) -> f64 {
    mesh.rotate(FRAC_PI_2);
    let j = jxx(mesh);
    mesh.rotate(-FRAC_PI_2);
    j
}

/// Signed Jxy of the whole mesh
pub fn jxy(mesh: &Mesh) -> f64 {
    mesh.triangles().map(|(a, b, c)| triangle_jxy(a, b, c)).sum()
}

/// Zero out a product of inertia that is only round-off
pub fn clamp_product(jxy: f64, jxx: f64, jyy: f64) -> f64 {
    if jxy.abs() < PRODUCT_CUTOFF * (jxx + jyy) {
        0.0
    } else {
        jxy
    }
}

/// First moment of area about the x axis
pub fn sx(mesh: &Mesh) -> f64 {
    mesh.triangles()
        .map(|(a, b, c)| area3node(a, b, c) * (a.y + b.y + c.y) / 3.0)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, rel: f64) -> bool {
        (a - b).abs() <= rel * b.abs().max(1e-300)
    }

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    /// ∫y² dA through the polygon formula, for comparison
    fn polygon_jxx(v: [Point; 3]) -> f64 {
        let mut sum = 0.0;
        for i in 0..3 {
            let (a, b) = (v[i], v[(i + 1) % 3]);
            sum += (a.x * b.y - b.x * a.y) * (a.y * a.y + a.y * b.y + b.y * b.y);
        }
        (sum / 12.0).abs()
    }

    #[test]
    fn test_flat_base_triangle() {
        // base on the axis: b·h³/12
        let j = triangle_jxx(p(0.0, 0.0), p(4.0, 0.0), p(1.0, 3.0));
        assert!(approx_eq(j, 4.0 * 27.0 / 12.0, 1e-12));
    }

    #[test]
    fn test_apex_outside_base() {
        // obtuse triangle whose apex overhangs the base
        let tri = [p(0.0, 1.0), p(1.0, 1.0), p(3.0, 2.0)];
        let j = triangle_jxx(tri[0], tri[1], tri[2]);
        assert!(approx_eq(j, polygon_jxx(tri), 1e-12));
    }

    #[test]
    fn test_general_triangles_match_polygon_formula() {
        let cases = [
            [p(0.0, 0.0), p(2.0, 1.0), p(0.5, 3.0)],
            [p(-1.0, -2.0), p(3.0, 0.5), p(1.0, 4.0)],
            [p(0.3, -0.7), p(-0.2, 0.1), p(0.9, 0.4)],
            [p(5.0, 5.0), p(5.5, 7.0), p(4.0, 6.1)],
        ];
        for tri in cases {
            let j = triangle_jxx(tri[0], tri[1], tri[2]);
            assert!(approx_eq(j, polygon_jxx(tri), 1e-12), "{:?}", tri);
            // vertex order does not matter
            assert!(approx_eq(triangle_jxx(tri[2], tri[0], tri[1]), j, 1e-12));
        }
    }

    #[test]
    fn test_product_of_inertia_ignores_winding() {
        let (a, b, c) = (p(0.0, 0.0), p(1.0, 0.0), p(0.0, 1.0));
        assert!(approx_eq(triangle_jxy(a, b, c), 1.0 / 24.0, 1e-12));
        assert!(approx_eq(triangle_jxy(a, c, b), 1.0 / 24.0, 1e-12));
        // mirrored across the y axis flips the sign
        assert!(approx_eq(triangle_jxy(p(0.0, 0.0), p(-1.0, 0.0), p(0.0, 1.0)), -1.0 / 24.0, 1e-12));
    }

    #[test]
    fn test_rectangle_mesh() {
        // 0.01 × 0.1 rectangle centred on the origin, split into two triangles
        let points = vec![p(-0.005, -0.05), p(0.005, -0.05), p(0.005, 0.05), p(-0.005, 0.05)];
        let mut mesh = Mesh::new(points, vec![[0, 1, 2], [0, 2, 3]]).unwrap();
        assert!(approx_eq(jxx(&mesh), 0.01 * 0.1f64.powi(3) / 12.0, 1e-12));
        assert!(approx_eq(jyy(&mut mesh), 0.1 * 0.01f64.powi(3) / 12.0, 1e-12));
        let j = jxy(&mesh);
        assert_eq!(clamp_product(j, jxx(&mesh), 1e-10), 0.0);
        assert!(sx(&mesh).abs() < 1e-18);
        // mesh is back where it started
        assert_eq!(mesh.points()[1], p(0.005, -0.05));
    }

    #[test]
    fn test_first_moment_about_base() {
        let points = vec![p(0.0, 0.0), p(2.0, 0.0), p(2.0, 3.0), p(0.0, 3.0)];
        let mesh = Mesh::new(points, vec![[0, 1, 2], [0, 2, 3]]).unwrap();
        assert!(approx_eq(sx(&mesh), 6.0 * 1.5, 1e-12));
        assert!(approx_eq(jxx(&mesh), 2.0 * 27.0 / 3.0, 1e-12));
        assert!(approx_eq(jxy(&mesh), 4.0 * 9.0 / 4.0, 1e-12));
    }

    #[test]
    fn test_clamp_keeps_real_products() {
        assert_eq!(clamp_product(-0.5, 1.0, 2.0), -0.5);
        assert_eq!(clamp_product(1e-14, 1.0, 2.0), 0.0);
    }
}
