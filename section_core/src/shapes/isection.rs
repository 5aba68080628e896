//! Rolled I- and H-sections with root fillets between web and flanges.

use serde::{Deserialize, Serialize};

use super::{contour::Contour, mm, positive, GeometryProvider};
use crate::errors::{SectionError, SectionResult};
use crate::mesher::GeoWriter;

/// Doubly symmetric rolled I-section.
///
/// The bottom-left flange corner sits at the origin.
///
/// ```text
///   ┌─────────┐ tf
///   └───╮ ╭───┘
///       │ │ tw     h
///   ┌───╯ ╰───┐
///   └─────────┘
///        b
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ISection {
    /// Overall depth (m)
    pub h: f64,
    /// Flange width (m)
    pub b: f64,
    /// Web thickness (m)
    pub tw: f64,
    /// Flange thickness (m)
    pub tf: f64,
    /// Root radius (m)
    pub r: f64,
}

impl ISection {
    pub fn new(h: f64, b: f64, tw: f64, tf: f64, r: f64) -> Self {
        ISection { h, b, tw, tf, r }
    }

    fn outline(&self) -> Contour {
        let (h, b, tf, r) = (self.h, self.b, self.tf, self.r);
        let right = b / 2.0 + self.tw / 2.0;
        let left = b / 2.0 - self.tw / 2.0;
        Contour::new()
            .corner(0.0, 0.0)
            .corner(b, 0.0)
            .corner(b, tf)
            .fillet(right, tf, r)
            .fillet(right, h - tf, r)
            .corner(b, h - tf)
            .corner(b, h)
            .corner(0.0, h)
            .corner(0.0, h - tf)
            .fillet(left, h - tf, r)
            .fillet(left, tf, r)
            .corner(0.0, tf)
    }
}

impl GeometryProvider for ISection {
    fn geometry_at(&self, precision: f64) -> String {
        let mut geo = GeoWriter::new();
        geo.comment(&self.identity());
        let outer = self.outline().write(&mut geo, precision);
        geo.plane_surface(&[outer]);
        geo.finish()
    }

    fn identity(&self) -> String {
        format!(
            "I H{} x B{} x Tf{} x Tw{}",
            mm(self.h),
            mm(self.b),
            mm(self.tf),
            mm(self.tw)
        )
    }

    fn validate(&self) -> SectionResult<()> {
        positive("ISection", "h", self.h)?;
        positive("ISection", "b", self.b)?;
        positive("ISection", "tw", self.tw)?;
        positive("ISection", "tf", self.tf)?;
        if self.tw >= self.b {
            return Err(SectionError::invalid_input(
                "ISection.tw",
                self.tw.to_string(),
                "Web must be thinner than the flange width",
            ));
        }
        if 2.0 * self.tf >= self.h {
            return Err(SectionError::invalid_input(
                "ISection.tf",
                self.tf.to_string(),
                "Flanges leave no room for the web",
            ));
        }
        if self.r < 0.0 {
            return Err(SectionError::invalid_input("ISection.r", self.r.to_string(), "Radius cannot be negative"));
        }
        self.outline().check("ISection")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equations::section::i_section_area;
    use crate::mesher::{EarcutMesher, Mesher};
    use std::f64::consts::PI;

    #[test]
    fn test_isection_area_with_fillets() {
        let beam = ISection::new(0.2, 0.1, 0.0055, 0.008, 0.011);
        assert!(beam.validate().is_ok());
        let mesh = EarcutMesher::default().triangulate(&beam.geometry_at(1e-5)).unwrap();
        let exact = i_section_area(0.2, 0.1, 0.0055, 0.008) + 4.0 * 0.011f64.powi(2) * (1.0 - PI / 4.0);
        assert!((mesh.area() - exact).abs() / exact < 1e-6);
        // STO ASChM 20-93, 20B1: 27.16 cm²
        assert!((mesh.area() * 1e4 - 27.16).abs() / 27.16 < 0.02);
    }

    #[test]
    fn test_sharp_isection() {
        let beam = ISection::new(0.3, 0.15, 0.007, 0.01, 0.0);
        let mesh = EarcutMesher::default().triangulate(&beam.geometry_at(0.1)).unwrap();
        let exact = i_section_area(0.3, 0.15, 0.007, 0.01);
        assert!((mesh.area() - exact).abs() / exact < 1e-12);
        let (x, y) = mesh.centroid();
        assert!((x - 0.075).abs() < 1e-12 && (y - 0.15).abs() < 1e-12);
    }

    #[test]
    fn test_isection_validation() {
        assert!(ISection::new(0.2, 0.1, 0.12, 0.008, 0.0).validate().is_err());
        assert!(ISection::new(0.2, 0.1, 0.005, 0.1, 0.0).validate().is_err());
        // root radius wider than the flange outstand
        assert!(ISection::new(0.2, 0.1, 0.005, 0.008, 0.06).validate().is_err());
        assert_eq!(
            ISection::new(0.2, 0.1, 0.0055, 0.008, 0.011).identity(),
            "I H200.00 x B100.00 x Tf8.00 x Tw5.50"
        );
    }
}
