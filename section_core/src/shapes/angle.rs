//! Equal-leg angle with a root fillet and rounded toes.

use serde::{Deserialize, Serialize};

use super::{contour::Contour, mm, positive, GeometryProvider};
use crate::errors::{SectionError, SectionResult};
use crate::mesher::GeoWriter;

/// Equal angle `L b×thk`.
///
/// The heel sits at the origin with both legs along the positive axes.
///
/// ```text
///   │▒│
///   │▒│ b
///   │▒╰────┐ thk
///   └──────┘
///      b
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Angle {
    /// Leg length (m)
    pub b: f64,
    /// Leg thickness (m)
    pub thk: f64,
    /// Root fillet radius (m)
    pub r1: f64,
    /// Toe radius (m)
    pub r2: f64,
}

impl Angle {
    pub fn new(b: f64, thk: f64, r1: f64, r2: f64) -> Self {
        Angle { b, thk, r1, r2 }
    }

    fn outline(&self) -> Contour {
        let (b, t) = (self.b, self.thk);
        Contour::new()
            .corner(0.0, 0.0)
            .corner(b, 0.0)
            .fillet(b, t, self.r2)
            .fillet(t, t, self.r1)
            .fillet(t, b, self.r2)
            .corner(0.0, b)
    }
}

impl GeometryProvider for Angle {
    fn geometry_at(&self, precision: f64) -> String {
        let mut geo = GeoWriter::new();
        geo.comment(&self.identity());
        let outer = self.outline().write(&mut geo, precision);
        geo.plane_surface(&[outer]);
        geo.finish()
    }

    fn identity(&self) -> String {
        format!("L{}x{}", mm(self.b), mm(self.thk))
    }

    fn validate(&self) -> SectionResult<()> {
        positive("Angle", "b", self.b)?;
        positive("Angle", "thk", self.thk)?;
        if self.thk >= self.b {
            return Err(SectionError::invalid_input(
                "Angle.thk",
                self.thk.to_string(),
                "Leg thickness must be smaller than the leg length",
            ));
        }
        if self.r1 < 0.0 || self.r2 < 0.0 {
            return Err(SectionError::invalid_input(
                "Angle.r1/r2",
                format!("{}/{}", self.r1, self.r2),
                "Radii cannot be negative",
            ));
        }
        self.outline().check("Angle")
    }
}
