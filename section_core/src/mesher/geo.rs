//! # Geometry Text
//!
//! Reader and writer for the numeric subset of the Gmsh `.geo` language used
//! by the shape generators:
//!
//! ```text
//! // comment
//! Point(1) = {x, y, z, lc};
//! Line(10) = {1, 2};
//! Circle(11) = {start, centre, end};
//! Line Loop(20) = {10, 11, -12};      // `Curve Loop` is accepted too
//! Plane Surface(30) = {20, 21};       // outer loop, then holes
//! ```
//!
//! Expressions and variables are not supported; every value is a literal.
//! Circular arcs run the short way from start to end and must span less
//! than half a turn.

use std::collections::BTreeMap;
use std::f64::consts::PI;

use crate::errors::{SectionError, SectionResult};
use crate::geometry::Point;

/// `Point` entity: coordinates plus characteristic length
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub position: Point,
    /// Target element size near this point; infinite when omitted
    pub lc: f64,
}

/// One-dimensional entity between two points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Curve {
    Line { start: i64, end: i64 },
    Circle { start: i64, centre: i64, end: i64 },
}

impl Curve {
    fn endpoints(&self) -> (i64, i64) {
        match *self {
            Curve::Line { start, end } | Curve::Circle { start, end, .. } => (start, end),
        }
    }
}

/// Parsed geometry description
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeoDocument {
    points: BTreeMap<i64, GeoPoint>,
    curves: BTreeMap<i64, Curve>,
    loops: BTreeMap<i64, Vec<i64>>,
    surfaces: Vec<(i64, Vec<i64>)>,
}

impl GeoDocument {
    /// Parse geometry text. Any syntax error, duplicate id or dangling
    /// reference is a [`SectionError::MeshGeneration`].
    pub fn parse(text: &str) -> SectionResult<Self> {
        let stripped: String = text
            .lines()
            .map(|line| match line.find("//") {
                Some(pos) => &line[..pos],
                None => line,
            })
            .collect::<Vec<_>>()
            .join("\n");

        let mut doc = GeoDocument::default();
        for (number, statement) in stripped.split(';').enumerate() {
            let statement = statement.trim();
            if statement.is_empty() {
                continue;
            }
            doc.parse_statement(statement)
                .map_err(|reason| SectionError::mesh_generation(format!("statement {} `{}`: {}", number + 1, statement, reason)))?;
        }
        doc.check_references()?;
        Ok(doc)
    }

    fn parse_statement(&mut self, statement: &str) -> Result<(), String> {
        let (lhs, rhs) = statement
            .split_once('=')
            .ok_or_else(|| "expected `Entity(id) = {...}`".to_string())?;
        let open = lhs.find('(').ok_or_else(|| "missing `(` after entity name".to_string())?;
        let close = lhs.rfind(')').ok_or_else(|| "missing `)` after entity id".to_string())?;
        if close < open || !lhs[close + 1..].trim().is_empty() {
            return Err("malformed entity id".to_string());
        }
        let keyword = lhs[..open].split_whitespace().collect::<Vec<_>>().join(" ");
        let id = parse_id(&lhs[open + 1..close])?;

        let rhs = rhs.trim();
        let body = rhs
            .strip_prefix('{')
            .and_then(|r| r.strip_suffix('}'))
            .ok_or_else(|| "right-hand side must be a `{...}` list".to_string())?;
        let items: Vec<&str> = body.split(',').map(str::trim).collect();

        match keyword.as_str() {
            "Point" => {
                if items.len() < 3 || items.len() > 4 {
                    return Err(format!("Point needs 3 or 4 values, got {}", items.len()));
                }
                let values = items.iter().map(|s| parse_number(s)).collect::<Result<Vec<_>, _>>()?;
                let point = GeoPoint {
                    position: Point { x: values[0], y: values[1], z: values[2] },
                    lc: values.get(3).copied().unwrap_or(f64::INFINITY),
                };
                if !(point.lc > 0.0) {
                    return Err(format!("characteristic length must be positive, got {}", point.lc));
                }
                insert_unique(&mut self.points, id, point, "Point")
            }
            "Line" => {
                let ids = parse_ids(&items, 2, "Line")?;
                insert_unique(&mut self.curves, id, Curve::Line { start: ids[0], end: ids[1] }, "curve")
            }
            "Circle" => {
                let ids = parse_ids(&items, 3, "Circle")?;
                let curve = Curve::Circle { start: ids[0], centre: ids[1], end: ids[2] };
                insert_unique(&mut self.curves, id, curve, "curve")
            }
            "Line Loop" | "Curve Loop" => {
                let ids = items.iter().map(|s| parse_id(s)).collect::<Result<Vec<_>, _>>()?;
                insert_unique(&mut self.loops, id, ids, "loop")
            }
            "Plane Surface" => {
                let ids = items.iter().map(|s| parse_id(s)).collect::<Result<Vec<_>, _>>()?;
                if self.surfaces.iter().any(|(existing, _)| *existing == id) {
                    return Err(format!("duplicate surface id {}", id));
                }
                self.surfaces.push((id, ids));
                Ok(())
            }
            other => Err(format!("unsupported entity `{}`", other)),
        }
    }

    fn check_references(&self) -> SectionResult<()> {
        for (id, curve) in &self.curves {
            let refs: &[i64] = match curve {
                Curve::Line { start, end } => &[*start, *end],
                Curve::Circle { start, centre, end } => &[*start, *centre, *end],
            };
            if let Some(missing) = refs.iter().find(|p| !self.points.contains_key(p)) {
                return Err(SectionError::mesh_generation(format!(
                    "curve {} references unknown point {}",
                    id, missing
                )));
            }
        }
        for (id, curves) in &self.loops {
            if let Some(missing) = curves.iter().find(|c| !self.curves.contains_key(&c.abs())) {
                return Err(SectionError::mesh_generation(format!(
                    "loop {} references unknown curve {}",
                    id, missing
                )));
            }
        }
        for (id, loops) in &self.surfaces {
            if loops.is_empty() {
                return Err(SectionError::mesh_generation(format!("surface {} has no loops", id)));
            }
            if let Some(missing) = loops.iter().find(|l| !self.loops.contains_key(&l.abs())) {
                return Err(SectionError::mesh_generation(format!(
                    "surface {} references unknown loop {}",
                    id, missing
                )));
            }
        }
        Ok(())
    }

    /// Surfaces in order of appearance: `(id, [outer loop, holes...])`
    pub fn surfaces(&self) -> &[(i64, Vec<i64>)] {
        &self.surfaces
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Closed polyline of a loop, without repeating the first point.
    ///
    /// Arcs are split into `ceil(length / lc)` chords, `lc` being the
    /// smaller characteristic length of the arc's end points. Fails when
    /// consecutive curves do not share end points, when the loop is open or
    /// when more than `budget` points would be produced.
    pub fn loop_polyline(&self, loop_id: i64, budget: usize) -> SectionResult<Vec<Point>> {
        let curves = self
            .loops
            .get(&loop_id.abs())
            .ok_or_else(|| SectionError::mesh_generation(format!("unknown loop {}", loop_id)))?;

        let mut polyline: Vec<Point> = Vec::new();
        let mut first_point: Option<i64> = None;
        let mut last_point: Option<i64> = None;

        for &signed in curves {
            let curve = self
                .curves
                .get(&signed.abs())
                .ok_or_else(|| SectionError::mesh_generation(format!("unknown curve {}", signed)))?;
            let (mut start, mut end) = curve.endpoints();
            let mut chords = self.discretize(signed.abs(), curve, budget.saturating_sub(polyline.len()))?;
            if signed < 0 {
                std::mem::swap(&mut start, &mut end);
                chords.reverse();
            }
            if let Some(previous) = last_point {
                if previous != start {
                    return Err(SectionError::mesh_generation(format!(
                        "loop {}: curve {} starts at point {} but the previous curve ends at point {}",
                        loop_id, signed, start, previous
                    )));
                }
            }
            first_point.get_or_insert(start);
            last_point = Some(end);
            chords.pop();
            polyline.extend(chords);
        }

        if first_point != last_point {
            return Err(SectionError::mesh_generation(format!(
                "loop {} is not closed: starts at point {:?}, ends at point {:?}",
                loop_id, first_point, last_point
            )));
        }
        if polyline.len() < 3 {
            return Err(SectionError::mesh_generation(format!(
                "loop {} has only {} distinct points",
                loop_id,
                polyline.len()
            )));
        }
        if loop_id < 0 {
            polyline.reverse();
        }
        Ok(polyline)
    }

    fn discretize(&self, id: i64, curve: &Curve, budget: usize) -> SectionResult<Vec<Point>> {
        let point = |pid: i64| {
            self.points
                .get(&pid)
                .copied()
                .ok_or_else(|| SectionError::mesh_generation(format!("curve {} references unknown point {}", id, pid)))
        };
        match *curve {
            Curve::Line { start, end } => Ok(vec![point(start)?.position, point(end)?.position]),
            Curve::Circle { start, centre, end } => {
                let (s, c, e) = (point(start)?, point(centre)?, point(end)?);
                let radius = s.position.distance(&c.position);
                let radius_end = e.position.distance(&c.position);
                if radius == 0.0 || ((radius - radius_end) / radius).abs() > 1e-6 {
                    return Err(SectionError::mesh_generation(format!(
                        "circle {}: end points are not equidistant from the centre ({} vs {})",
                        id, radius, radius_end
                    )));
                }
                let a0 = (s.position.y - c.position.y).atan2(s.position.x - c.position.x);
                let a1 = (e.position.y - c.position.y).atan2(e.position.x - c.position.x);
                let mut sweep = a1 - a0;
                if sweep > PI {
                    sweep -= 2.0 * PI;
                } else if sweep <= -PI {
                    sweep += 2.0 * PI;
                }
                if sweep.abs() >= PI - 1e-12 {
                    return Err(SectionError::mesh_generation(format!(
                        "circle {}: arcs must span less than half a turn",
                        id
                    )));
                }

                let lc = s.lc.min(e.lc);
                let segments = (radius * sweep.abs() / lc).ceil().max(1.0);
                if segments >= budget as f64 {
                    return Err(SectionError::mesh_generation(format!(
                        "circle {}: {} segments exceed the point budget",
                        id, segments
                    )));
                }
                let n = segments as usize;
                let mut chords = Vec::with_capacity(n + 1);
                chords.push(s.position);
                for k in 1..n {
                    let angle = a0 + sweep * k as f64 / n as f64;
                    chords.push(Point {
                        x: c.position.x + radius * angle.cos(),
                        y: c.position.y + radius * angle.sin(),
                        z: s.position.z,
                    });
                }
                chords.push(e.position);
                Ok(chords)
            }
        }
    }
}

fn insert_unique<T>(map: &mut BTreeMap<i64, T>, id: i64, value: T, what: &str) -> Result<(), String> {
    if map.insert(id, value).is_some() {
        return Err(format!("duplicate {} id {}", what, id));
    }
    Ok(())
}

fn parse_number(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|_| format!("`{}` is not a number", s))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(format!("`{}` is not finite", s))
    }
}

fn parse_id(s: &str) -> Result<i64, String> {
    s.trim().parse().map_err(|_| format!("`{}` is not an integer id", s.trim()))
}

fn parse_ids(items: &[&str], expected: usize, what: &str) -> Result<Vec<i64>, String> {
    if items.len() != expected {
        return Err(format!("{} needs {} point ids, got {}", what, expected, items.len()));
    }
    items.iter().map(|s| parse_id(s)).collect()
}

/// Incremental writer producing text that [`GeoDocument::parse`] reads back.
///
/// Ids are assigned sequentially across all entity kinds.
#[derive(Debug, Clone, Default)]
pub struct GeoWriter {
    text: String,
    next_id: i64,
}

impl GeoWriter {
    pub fn new() -> Self {
        GeoWriter { text: String::new(), next_id: 1 }
    }

    fn take_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn comment(&mut self, text: &str) {
        for line in text.lines() {
            self.text.push_str(&format!("// {}\n", line));
        }
    }

    pub fn point(&mut self, x: f64, y: f64, lc: f64) -> i64 {
        let id = self.take_id();
        self.text.push_str(&format!("Point({}) = {{{}, {}, 0, {}}};\n", id, x, y, lc));
        id
    }

    pub fn line(&mut self, start: i64, end: i64) -> i64 {
        let id = self.take_id();
        self.text.push_str(&format!("Line({}) = {{{}, {}}};\n", id, start, end));
        id
    }

    pub fn circle(&mut self, start: i64, centre: i64, end: i64) -> i64 {
        let id = self.take_id();
        self.text
            .push_str(&format!("Circle({}) = {{{}, {}, {}}};\n", id, start, centre, end));
        id
    }

    pub fn line_loop(&mut self, curves: &[i64]) -> i64 {
        let id = self.take_id();
        self.text.push_str(&format!("Line Loop({}) = {{{}}};\n", id, join(curves)));
        id
    }

    pub fn plane_surface(&mut self, loops: &[i64]) -> i64 {
        let id = self.take_id();
        self.text.push_str(&format!("Plane Surface({}) = {{{}}};\n", id, join(loops)));
        id
    }

    pub fn finish(self) -> String {
        self.text
    }
}

fn join(ids: &[i64]) -> String {
    ids.iter().map(|id| id.to_string()).collect::<Vec<_>>().join(", ")
}
