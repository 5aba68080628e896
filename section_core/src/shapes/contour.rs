//! Closed polygon with optionally rounded corners, written as geometry text.
//!
//! A rounded corner is replaced by a circular arc tangent to both adjacent
//! edges. For a corner with interior half-angle `θ` between its edges the
//! tangent points sit `r / tan θ` from the corner and the arc centre sits
//! `r / sin θ` along the bisector. The construction is the same for convex
//! corners (material removed) and re-entrant corners (material added).

use crate::errors::{SectionError, SectionResult};
use crate::geometry::Point;
use crate::mesher::GeoWriter;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Vertex {
    x: f64,
    y: f64,
    radius: f64,
}

/// Rounded corner resolved into tangent points and centre
#[derive(Debug, Clone, Copy)]
struct Corner {
    entry: Point,
    exit: Point,
    centre: Option<Point>,
    tangent: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Contour {
    vertices: Vec<Vertex>,
}

impl Contour {
    pub fn new() -> Self {
        Contour::default()
    }

    /// Sharp corner
    pub fn corner(mut self, x: f64, y: f64) -> Self {
        self.vertices.push(Vertex { x, y, radius: 0.0 });
        self
    }

    /// Corner rounded with radius `radius`
    pub fn fillet(mut self, x: f64, y: f64, radius: f64) -> Self {
        self.vertices.push(Vertex { x, y, radius });
        self
    }

    fn corners(&self) -> Vec<Corner> {
        let n = self.vertices.len();
        (0..n)
            .map(|i| {
                let v = self.vertices[i];
                let here = Point::new(v.x, v.y);
                let sharp = Corner { entry: here, exit: here, centre: None, tangent: 0.0 };
                if v.radius <= 0.0 || n < 3 {
                    return sharp;
                }
                let prev = self.vertices[(i + n - 1) % n];
                let next = self.vertices[(i + 1) % n];
                let (u1, l1) = unit(prev.x - v.x, prev.y - v.y);
                let (u2, l2) = unit(next.x - v.x, next.y - v.y);
                if l1 == 0.0 || l2 == 0.0 {
                    return sharp;
                }
                let cos = (u1.0 * u2.0 + u1.1 * u2.1).clamp(-1.0, 1.0);
                let half = cos.acos() / 2.0;
                // straight continuation or a cusp: nothing to round
                if half <= 1e-9 || half >= std::f64::consts::FRAC_PI_2 - 1e-9 {
                    return sharp;
                }
                let tangent = v.radius / half.tan();
                let (w, _) = unit(u1.0 + u2.0, u1.1 + u2.1);
                let offset = v.radius / half.sin();
                Corner {
                    entry: Point::new(v.x + u1.0 * tangent, v.y + u1.1 * tangent),
                    exit: Point::new(v.x + u2.0 * tangent, v.y + u2.1 * tangent),
                    centre: Some(Point::new(v.x + w.0 * offset, v.y + w.1 * offset)),
                    tangent,
                }
            })
            .collect()
    }

    /// Check that the polygon is usable and every rounded corner fits on
    /// its edges without overlapping its neighbours.
    pub fn check(&self, shape: &str) -> SectionResult<()> {
        let n = self.vertices.len();
        if n < 3 {
            return Err(SectionError::invalid_input(shape, n.to_string(), "Contour needs at least 3 corners"));
        }
        let corners = self.corners();
        for i in 0..n {
            let j = (i + 1) % n;
            let (a, b) = (self.vertices[i], self.vertices[j]);
            let edge = (b.x - a.x).hypot(b.y - a.y);
            if edge == 0.0 {
                return Err(SectionError::invalid_input(
                    shape,
                    format!("corner {}", i),
                    "Contour has a zero-length edge",
                ));
            }
            let used = corners[i].tangent + corners[j].tangent;
            if used >= edge {
                return Err(SectionError::invalid_input(
                    shape,
                    format!("radius {} / {}", a.radius, b.radius),
                    format!("Fillets need {:.6} but the edge is only {:.6} long", used, edge),
                ));
            }
        }
        Ok(())
    }

    /// Emit points, lines and arcs; returns the id of the closed loop.
    pub fn write(&self, geo: &mut GeoWriter, precision: f64) -> i64 {
        let corners = self.corners();
        let mut curves = Vec::with_capacity(corners.len() * 2);
        let mut ends: Vec<(i64, i64)> = Vec::with_capacity(corners.len());

        for corner in &corners {
            let entry = geo.point(corner.entry.x, corner.entry.y, precision);
            match corner.centre {
                Some(centre) => {
                    let c = geo.point(centre.x, centre.y, precision);
                    let exit = geo.point(corner.exit.x, corner.exit.y, precision);
                    ends.push((entry, exit));
                    curves.push(Some(geo.circle(entry, c, exit)));
                }
                None => {
                    ends.push((entry, entry));
                    curves.push(None);
                }
            }
        }

        let n = ends.len();
        let mut loop_curves = Vec::with_capacity(2 * n);
        for i in 0..n {
            if let Some(arc) = curves[i] {
                loop_curves.push(arc);
            }
            let from = ends[i].1;
            let to = ends[(i + 1) % n].0;
            loop_curves.push(geo.line(from, to));
        }
        geo.line_loop(&loop_curves)
    }
}

fn unit(x: f64, y: f64) -> ((f64, f64), f64) {
    let len = x.hypot(y);
    if len == 0.0 {
        ((0.0, 0.0), 0.0)
    } else {
        ((x / len, y / len), len)
    }
}
