//! Plate girder: I-section welded from three plates with fillet welds.

use serde::{Deserialize, Serialize};

use super::{contour::Contour, mm, positive, GeometryProvider};
use crate::errors::{SectionError, SectionResult};
use crate::mesher::GeoWriter;

/// Welded I-section. The four web-to-flange welds are modelled as
/// triangular fillets of leg `weld`; a zero leg leaves sharp corners.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeldedISection {
    /// Overall depth (m)
    pub h: f64,
    /// Flange width (m)
    pub b: f64,
    /// Web thickness (m)
    pub tw: f64,
    /// Flange thickness (m)
    pub tf: f64,
    /// Weld leg (m)
    pub weld: f64,
}

impl WeldedISection {
    pub fn new(h: f64, b: f64, tw: f64, tf: f64, weld: f64) -> Self {
        WeldedISection { h, b, tw, tf, weld }
    }

    fn outline(&self) -> Contour {
        let (h, b, tf, w) = (self.h, self.b, self.tf, self.weld);
        let right = b / 2.0 + self.tw / 2.0;
        let left = b / 2.0 - self.tw / 2.0;
        let c = Contour::new().corner(0.0, 0.0).corner(b, 0.0).corner(b, tf);
        let c = weld_toe(c, (right + w, tf), (right, tf + w), w > 0.0);
        let c = weld_toe(c, (right, h - tf - w), (right + w, h - tf), w > 0.0);
        let c = c.corner(b, h - tf).corner(b, h).corner(0.0, h).corner(0.0, h - tf);
        let c = weld_toe(c, (left - w, h - tf), (left, h - tf - w), w > 0.0);
        let c = weld_toe(c, (left, tf + w), (left - w, tf), w > 0.0);
        c.corner(0.0, tf)
    }
}

/// Chamfer corner: both weld toes, or the single sharp corner they collapse to
fn weld_toe(contour: Contour, first: (f64, f64), second: (f64, f64), welded: bool) -> Contour {
    if welded {
        contour.corner(first.0, first.1).corner(second.0, second.1)
    } else {
        contour.corner(first.0, first.1)
    }
}

impl GeometryProvider for WeldedISection {
    fn geometry_at(&self, precision: f64) -> String {
        let mut geo = GeoWriter::new();
        geo.comment(&self.identity());
        let outer = self.outline().write(&mut geo, precision);
        geo.plane_surface(&[outer]);
        geo.finish()
    }

    fn identity(&self) -> String {
        format!(
            "WPG H{} x B{} x Tw{} x Tf{} x W{}",
            mm(self.h),
            mm(self.b),
            mm(self.tw),
            mm(self.tf),
            mm(self.weld)
        )
    }

    fn validate(&self) -> SectionResult<()> {
        positive("WeldedISection", "h", self.h)?;
        positive("WeldedISection", "b", self.b)?;
        positive("WeldedISection", "tw", self.tw)?;
        positive("WeldedISection", "tf", self.tf)?;
        if !(self.weld >= 0.0) {
            return Err(SectionError::invalid_input(
                "WeldedISection.weld",
                self.weld.to_string(),
                "Weld leg cannot be negative",
            ));
        }
        if self.weld >= (self.b - self.tw) / 2.0 {
            return Err(SectionError::invalid_input(
                "WeldedISection.weld",
                self.weld.to_string(),
                "Welds do not fit on the flange outstand",
            ));
        }
        if 2.0 * (self.tf + self.weld) >= self.h {
            return Err(SectionError::invalid_input(
                "WeldedISection.tf",
                self.tf.to_string(),
                "Flanges and welds leave no room for the web",
            ));
        }
        self.outline().check("WeldedISection")
    }
}
