//! # Geometric Primitives
//!
//! Small building blocks shared by the integrators: triangle area and
//! centroid, winding test, neutral-axis intersection and half-plane clipping.
//!
//! ## Example
//!
//! ```rust
//! use section_core::geometry::primitives::{area3node, Point};
//!
//! let a = area3node(Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(0.0, 2.0));
//! assert!((a - 1.0).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};

/// Mesh point. `z` must stay zero for every point of a section mesh.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
}

impl Point {
    /// Point in the XOY plane
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y, z: 0.0 }
    }

    /// Euclidean distance in 3D
    pub fn distance(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

/// Winding of three points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Collinear,
    Clockwise,
    CounterClockwise,
}

/// Side of the line `y = 0` kept by [`clip_triangle`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HalfPlane {
    /// `y >= 0`
    Upper,
    /// `y <= 0`
    Lower,
}

impl HalfPlane {
    fn contains(self, p: &Point) -> bool {
        match self {
            HalfPlane::Upper => p.y >= 0.0,
            HalfPlane::Lower => p.y <= 0.0,
        }
    }
}

/// Triangle area by Heron's formula.
///
/// Edges are sorted `a >= b >= c` and the product is arranged as
/// `(a + (b + c))(c - (a - b))(c + (a - b))(a + (b - c))` so that needle-like
/// triangles do not lose their area to cancellation.
pub fn area3node(a: Point, b: Point, c: Point) -> f64 {
    let mut edges = [b.distance(&c), a.distance(&c), a.distance(&b)];
    edges.sort_by(|l, r| r.total_cmp(l));
    let [la, lb, lc] = edges;
    let product = (la + (lb + lc)) * (lc - (la - lb)) * (lc + (la - lb)) * (la + (lb - lc));
    0.25 * product.max(0.0).sqrt()
}

/// Centroid of a triangle
pub fn center3node(a: Point, b: Point, c: Point) -> Point {
    Point {
        x: (a.x + b.x + c.x) / 3.0,
        y: (a.y + b.y + c.y) / 3.0,
        z: (a.z + b.z + c.z) / 3.0,
    }
}

/// Sign of the cross product `(b - a) x (c - b)`.
pub fn orientation(a: Point, b: Point, c: Point) -> Orientation {
    let cross = (b.x - a.x) * (c.y - b.y) - (b.y - a.y) * (c.x - b.x);
    if cross > 0.0 {
        Orientation::CounterClockwise
    } else if cross < 0.0 {
        Orientation::Clockwise
    } else {
        Orientation::Collinear
    }
}

/// Point on the line through `a` and `b` where `y = 0`.
///
/// Returns `None` for a line parallel to the axis.
pub fn on_axis(a: Point, b: Point) -> Option<Point> {
    let dy = a.y - b.y;
    if dy == 0.0 {
        return None;
    }
    let t = a.y / dy;
    Some(Point {
        x: a.x + (b.x - a.x) * t,
        y: 0.0,
        z: a.z + (b.z - a.z) * t,
    })
}

/// The three points ordered by non-decreasing `y`.
pub fn sort_by_y(a: Point, b: Point, c: Point) -> (Point, Point, Point) {
    let mut pts = [a, b, c];
    pts.sort_by(|l, r| l.y.total_cmp(&r.y));
    (pts[0], pts[1], pts[2])
}

/// Part of triangle `abc` lying in `side`.
///
/// The result is a convex polygon with 3 or 4 vertices, in the winding of
/// the input, or empty when nothing of positive extent remains.
pub fn clip_triangle(a: Point, b: Point, c: Point, side: HalfPlane) -> Vec<Point> {
    let input = [a, b, c];
    let mut out = Vec::with_capacity(4);
    for i in 0..3 {
        let p = input[i];
        let q = input[(i + 1) % 3];
        if side.contains(&p) {
            out.push(p);
        }
        let crosses = (p.y > 0.0 && q.y < 0.0) || (p.y < 0.0 && q.y > 0.0);
        if crosses {
            if let Some(x) = on_axis(p, q) {
                out.push(x);
            }
        }
    }
    if out.len() < 3 {
        out.clear();
    }
    out
}

/// Fan-split a convex polygon into triangles sharing its first vertex.
pub fn fan(polygon: &[Point]) -> impl Iterator<Item = (Point, Point, Point)> + '_ {
    let first = polygon.first().copied().unwrap_or_default();
    polygon
        .windows(2)
        .skip(1)
        .map(move |w| (first, w[0], w[1]))
}
