//! # Mesh and Coordinate Transforms
//!
//! Points plus triangles referencing them by index. A mesh is produced by a
//! [`crate::mesher::Mesher`] and afterwards only moved rigidly: translated to
//! the centroid and rotated onto the principal axes.

use serde::{Deserialize, Serialize};

use crate::errors::{SectionError, SectionResult};
use crate::geometry::primitives::{area3node, center3node, Point};

use std::f64::consts::FRAC_PI_2;

/// Triangulated cross-section.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Mesh {
    points: Vec<Point>,
    triangles: Vec<[usize; 3]>,
}

impl Mesh {
    /// Build a mesh, rejecting triangles that reference missing points.
    pub fn new(points: Vec<Point>, triangles: Vec<[usize; 3]>) -> SectionResult<Self> {
        if let Some((i, tri)) = triangles
            .iter()
            .enumerate()
            .find(|(_, tri)| tri.iter().any(|&idx| idx >= points.len()))
        {
            return Err(SectionError::mesh_generation(format!(
                "triangle {} references point {:?} but the mesh has {} points",
                i,
                tri,
                points.len()
            )));
        }
        Ok(Mesh { points, triangles })
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Vertices of every triangle, in stored winding
    pub fn triangles(&self) -> impl Iterator<Item = (Point, Point, Point)> + '_ {
        self.triangles
            .iter()
            .map(move |&[a, b, c]| (self.points[a], self.points[b], self.points[c]))
    }

    /// Rotate all points about the origin, counter-clockwise by `angle` radians.
    ///
    /// Multiples of a quarter turn use exact sine and cosine values, so
    /// rotating by +90 degrees and back restores every coordinate bit for bit.
    pub fn rotate(&mut self, angle: f64) {
        let (sin, cos) = exact_sin_cos(angle);
        for p in &mut self.points {
            let x = p.x * cos - p.y * sin;
            let y = p.x * sin + p.y * cos;
            p.x = x;
            p.y = y;
        }
    }

    /// Rotated copy of the mesh
    pub fn rotated(&self, angle: f64) -> Mesh {
        let mut copy = self.clone();
        copy.rotate(angle);
        copy
    }

    /// Shift all points by `(dx, dy)`
    pub fn translate(&mut self, dx: f64, dy: f64) {
        for p in &mut self.points {
            p.x += dx;
            p.y += dy;
        }
    }

    /// Fail on the first point with a non-zero z coordinate.
    pub fn check_planarity(&self) -> SectionResult<()> {
        match self.points.iter().position(|p| p.z != 0.0) {
            Some(point_index) => Err(SectionError::PlanarityViolation {
                point_index,
                z: self.points[point_index].z,
            }),
            None => Ok(()),
        }
    }

    /// Sum of triangle areas
    pub fn area(&self) -> f64 {
        self.triangles().map(|(a, b, c)| area3node(a, b, c)).sum()
    }

    /// Area-weighted centroid `(x, y)`; the origin for an empty mesh.
    pub fn centroid(&self) -> (f64, f64) {
        let (mut area, mut sx, mut sy) = (0.0, 0.0, 0.0);
        for (a, b, c) in self.triangles() {
            let da = area3node(a, b, c);
            let center = center3node(a, b, c);
            area += da;
            sx += da * center.x;
            sy += da * center.y;
        }
        if area > 0.0 {
            (sx / area, sy / area)
        } else {
            (0.0, 0.0)
        }
    }

    /// Largest `|y|` over all points
    pub fn max_abs_y(&self) -> f64 {
        self.points.iter().fold(0.0, |m, p| m.max(p.y.abs()))
    }

    /// Largest `|x|` over all points
    pub fn max_abs_x(&self) -> f64 {
        self.points.iter().fold(0.0, |m, p| m.max(p.x.abs()))
    }
}

fn exact_sin_cos(angle: f64) -> (f64, f64) {
    let quarters = angle / FRAC_PI_2;
    let rounded = quarters.round();
    if (quarters - rounded).abs() < 1e-15 {
        match (rounded as i64).rem_euclid(4) {
            0 => (0.0, 1.0),
            1 => (1.0, 0.0),
            2 => (0.0, -1.0),
            _ => (-1.0, 0.0),
        }
    } else {
        angle.sin_cos()
    }
}
