//! Solid rectangular plate, standing on its short edge.

use serde::{Deserialize, Serialize};

use super::{contour::Contour, mm, positive, GeometryProvider};
use crate::errors::SectionResult;
use crate::mesher::GeoWriter;

/// Plate of height `h` and thickness `thk`.
///
/// The base frame has x ∈ [−thk/2, thk/2] and y ∈ [0, h].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    /// Height (m)
    pub h: f64,
    /// Thickness (m)
    pub thk: f64,
}

impl Rectangle {
    pub fn new(h: f64, thk: f64) -> Self {
        Rectangle { h, thk }
    }
}

impl GeometryProvider for Rectangle {
    fn geometry_at(&self, precision: f64) -> String {
        let half = self.thk / 2.0;
        let outline = Contour::new()
            .corner(-half, 0.0)
            .corner(half, 0.0)
            .corner(half, self.h)
            .corner(-half, self.h);
        let mut geo = GeoWriter::new();
        geo.comment(&self.identity());
        let outer = outline.write(&mut geo, precision);
        geo.plane_surface(&[outer]);
        geo.finish()
    }

    fn identity(&self) -> String {
        format!("Rectangle H{}x Thk{}", mm(self.h), mm(self.thk))
    }

    fn validate(&self) -> SectionResult<()> {
        positive("Rectangle", "h", self.h)?;
        positive("Rectangle", "thk", self.thk)
    }
}
