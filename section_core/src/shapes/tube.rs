//! Circular hollow section, or a solid bar when the wall fills the disc.

use serde::{Deserialize, Serialize};

use super::{mm, positive, GeometryProvider};
use crate::errors::{SectionError, SectionResult};
use crate::mesher::GeoWriter;

/// Tube of outer diameter `od` and wall thickness `thk`, centred on the
/// origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tube {
    /// Outer diameter (m)
    pub od: f64,
    /// Wall thickness (m); `od / 2` gives a solid bar
    pub thk: f64,
}

impl Tube {
    pub fn new(od: f64, thk: f64) -> Self {
        Tube { od, thk }
    }

    pub fn is_solid(&self) -> bool {
        2.0 * self.thk >= self.od
    }
}

/// Full circle as four quarter arcs around `centre`
fn circle(geo: &mut GeoWriter, centre: i64, radius: f64, lc: f64) -> i64 {
    let ends: Vec<i64> = [(radius, 0.0), (0.0, radius), (-radius, 0.0), (0.0, -radius)]
        .iter()
        .map(|&(x, y)| geo.point(x, y, lc))
        .collect();
    let arcs: Vec<i64> = (0..4).map(|i| geo.circle(ends[i], centre, ends[(i + 1) % 4])).collect();
    geo.line_loop(&arcs)
}

impl GeometryProvider for Tube {
    fn geometry_at(&self, precision: f64) -> String {
        let mut geo = GeoWriter::new();
        geo.comment(&self.identity());
        let centre = geo.point(0.0, 0.0, precision);
        let outer = circle(&mut geo, centre, self.od / 2.0, precision);
        if self.is_solid() {
            geo.plane_surface(&[outer]);
        } else {
            let inner = circle(&mut geo, centre, self.od / 2.0 - self.thk, precision);
            geo.plane_surface(&[outer, inner]);
        }
        geo.finish()
    }

    fn identity(&self) -> String {
        format!("DIA{}x{}", mm(self.od), mm(self.thk))
    }

    fn validate(&self) -> SectionResult<()> {
        positive("Tube", "od", self.od)?;
        positive("Tube", "thk", self.thk)?;
        if self.thk > self.od / 2.0 {
            return Err(SectionError::invalid_input(
                "Tube.thk",
                self.thk.to_string(),
                "Wall thickness exceeds the outer radius",
            ));
        }
        Ok(())
    }
}
