//! Plastic section moduli about the axes of the current frame.
//!
//! Every triangle is clipped against both half-planes of the bending axis;
//! each piece contributes its area times the distance of its centroid from
//! the axis. The axis passes through the mesh origin, so the caller decides
//! which neutral axis is used by moving the mesh first.

use crate::geometry::primitives::{area3node, center3node, clip_triangle, fan, HalfPlane, Point};
use crate::geometry::Mesh;

use std::f64::consts::FRAC_PI_2;

fn triangle_first_moments(a: Point, b: Point, c: Point) -> f64 {
    [HalfPlane::Upper, HalfPlane::Lower]
        .into_iter()
        .map(|side| {
            let piece = clip_triangle(a, b, c, side);
            fan(&piece)
                .map(|(p, q, r)| area3node(p, q, r) * center3node(p, q, r).y.abs())
                .sum::<f64>()
        })
        .sum()
}

/// Plastic modulus for bending about the x axis
pub fn wx_plastic(mesh: &Mesh) -> f64 {
    mesh.triangles().map(|(a, b, c)| triangle_first_moments(a, b, c)).sum()
}

/// Plastic modulus for bending about the y axis; the mesh is turned a
/// quarter turn and back
pub fn wy_plastic(mesh: &mut Mesh) -> f64 {
    mesh.rotate(FRAC_PI_2);
    let w = wx_plastic(mesh);
    mesh.rotate(-FRAC_PI_2);
    w
}
