//! Welded T made of a stem plate standing on a flange plate.

use serde::{Deserialize, Serialize};

use super::{contour::Contour, mm, positive, GeometryProvider};
use crate::errors::{SectionError, SectionResult};
use crate::mesher::GeoWriter;

/// T-section: stem `h × thk` on top of a flange `l × thk2`.
///
/// The stem runs from y = 0 to y = h, centred on x = 0; the flange hangs
/// below it over y ∈ [−thk2, 0].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TSection {
    /// Stem height (m)
    pub h: f64,
    /// Flange length (m)
    pub l: f64,
    /// Stem thickness (m)
    pub thk: f64,
    /// Flange thickness (m)
    pub thk2: f64,
}

impl TSection {
    pub fn new(h: f64, l: f64, thk: f64, thk2: f64) -> Self {
        TSection { h, l, thk, thk2 }
    }

    fn outline(&self) -> Contour {
        let stem = self.thk / 2.0;
        let flange = self.l / 2.0;
        Contour::new()
            .corner(-flange, -self.thk2)
            .corner(flange, -self.thk2)
            .corner(flange, 0.0)
            .corner(stem, 0.0)
            .corner(stem, self.h)
            .corner(-stem, self.h)
            .corner(-stem, 0.0)
            .corner(-flange, 0.0)
    }
}

impl GeometryProvider for TSection {
    fn geometry_at(&self, precision: f64) -> String {
        let mut geo = GeoWriter::new();
        geo.comment(&self.identity());
        let outer = self.outline().write(&mut geo, precision);
        geo.plane_surface(&[outer]);
        geo.finish()
    }

    fn identity(&self) -> String {
        format!(
            "Tsection H{} x L{} x Thk{} x Thk2{}",
            mm(self.h),
            mm(self.l),
            mm(self.thk),
            mm(self.thk2)
        )
    }

    fn validate(&self) -> SectionResult<()> {
        positive("TSection", "h", self.h)?;
        positive("TSection", "l", self.l)?;
        positive("TSection", "thk", self.thk)?;
        positive("TSection", "thk2", self.thk2)?;
        if self.thk >= self.l {
            return Err(SectionError::invalid_input(
                "TSection.thk",
                self.thk.to_string(),
                "Stem must be thinner than the flange is long",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesher::{EarcutMesher, Mesher};

    #[test]
    fn test_tsection_area_and_centroid() {
        let tee = TSection::new(0.1, 0.12, 0.008, 0.01);
        assert!(tee.validate().is_ok());
        let mesh = EarcutMesher::default().triangulate(&tee.geometry_at(0.1)).unwrap();
        let (stem, flange) = (0.1 * 0.008, 0.12 * 0.01);
        assert!((mesh.area() - (stem + flange)).abs() < 1e-15);
        let (x, y) = mesh.centroid();
        let expected = (stem * 0.05 - flange * 0.005) / (stem + flange);
        assert!(x.abs() < 1e-12);
        assert!((y - expected).abs() < 1e-12);
    }

    #[test]
    fn test_tsection_validation() {
        assert!(TSection::new(0.1, 0.008, 0.01, 0.01).validate().is_err());
        assert_eq!(
            TSection::new(0.1, 0.12, 0.008, 0.01).identity(),
            "Tsection H100.00 x L120.00 x Thk8.00 x Thk210.00"
        );
    }
}
