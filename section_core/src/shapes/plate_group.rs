//! Built-up section from independent rectangular plates.

use serde::{Deserialize, Serialize};

use super::{contour::Contour, mm, positive, GeometryProvider};
use crate::errors::{SectionError, SectionResult};
use crate::mesher::GeoWriter;

/// Axis-aligned plate given by its centre and full dimensions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plate {
    /// Centre x (m)
    pub xc: f64,
    /// Centre y (m)
    pub yc: f64,
    /// Width along x (m)
    pub x: f64,
    /// Height along y (m)
    pub y: f64,
}

impl Plate {
    pub fn new(xc: f64, yc: f64, x: f64, y: f64) -> Self {
        Plate { xc, yc, x, y }
    }
}

/// Group of plates meshed as separate surfaces.
///
/// Overlapping plates are counted once per plate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlateGroup {
    pub plates: Vec<Plate>,
}

impl PlateGroup {
    pub fn new(plates: Vec<Plate>) -> Self {
        PlateGroup { plates }
    }
}

impl GeometryProvider for PlateGroup {
    fn geometry_at(&self, precision: f64) -> String {
        let mut geo = GeoWriter::new();
        geo.comment(&self.identity());
        for plate in &self.plates {
            let (dx, dy) = (plate.x / 2.0, plate.y / 2.0);
            let outline = Contour::new()
                .corner(plate.xc - dx, plate.yc - dy)
                .corner(plate.xc + dx, plate.yc - dy)
                .corner(plate.xc + dx, plate.yc + dy)
                .corner(plate.xc - dx, plate.yc + dy);
            let outer = outline.write(&mut geo, precision);
            geo.plane_surface(&[outer]);
        }
        geo.finish()
    }

    fn identity(&self) -> String {
        let plates: Vec<String> = self
            .plates
            .iter()
            .map(|p| format!("{}x{}@{},{}", mm(p.x), mm(p.y), mm(p.xc), mm(p.yc)))
            .collect();
        format!("Plate group ({})", plates.join("; "))
    }

    fn validate(&self) -> SectionResult<()> {
        if self.plates.is_empty() {
            return Err(SectionError::invalid_input("PlateGroup.plates", "[]", "At least one plate is required"));
        }
        for plate in &self.plates {
            positive("Plate", "x", plate.x)?;
            positive("Plate", "y", plate.y)?;
            if !(plate.xc.is_finite() && plate.yc.is_finite()) {
                return Err(SectionError::invalid_input(
                    "Plate.xc/yc",
                    format!("{}/{}", plate.xc, plate.yc),
                    "Plate centre must be finite",
                ));
            }
        }
        Ok(())
    }
}
