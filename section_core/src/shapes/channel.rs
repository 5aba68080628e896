//! Rolled channels with tapered flanges.

use serde::{Deserialize, Serialize};

use super::{contour::Contour, mm, positive, GeometryProvider};
use crate::errors::{SectionError, SectionResult};
use crate::mesher::GeoWriter;

/// Depth above which the shallow 5 % flange taper applies
const DEEP_CHANNEL: f64 = 0.300;

/// Channel with inner flange faces sloping towards the toes.
///
/// The back of the web lies on x = 0, the bottom flange on y = 0.
///
/// `tf` is the flange thickness at the reference line of DIN 1025-5: half
/// the flange width from the toe with an 8 % taper for depths up to
/// 300 mm, half the flange outstand with a 5 % taper above.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    /// Overall depth (m)
    pub h: f64,
    /// Flange width (m)
    pub b: f64,
    /// Mean flange thickness (m)
    pub tf: f64,
    /// Web thickness (m)
    pub tw: f64,
    /// Root radius (m)
    pub r1: f64,
    /// Toe radius (m)
    pub r2: f64,
}

impl Channel {
    pub fn new(h: f64, b: f64, tf: f64, tw: f64, r1: f64, r2: f64) -> Self {
        Channel { h, b, tf, tw, r1, r2 }
    }

    /// Distance of the thickness reference line from the toe, and taper
    fn taper(&self) -> (f64, f64) {
        if self.h > DEEP_CHANNEL {
            ((self.b - self.tw) / 2.0, 0.05)
        } else {
            (self.b / 2.0, 0.08)
        }
    }

    /// Inner flange face heights at the toe and at the web
    fn flange_faces(&self) -> (f64, f64) {
        let (u, slope) = self.taper();
        (self.tf - u * slope, self.tf + (self.b - self.tw - u) * slope)
    }

    fn outline(&self) -> Contour {
        let (h, b, tw) = (self.h, self.b, self.tw);
        let (toe, root) = self.flange_faces();
        Contour::new()
            .corner(0.0, 0.0)
            .corner(b, 0.0)
            .fillet(b, toe, self.r2)
            .fillet(tw, root, self.r1)
            .fillet(tw, h - root, self.r1)
            .fillet(b, h - toe, self.r2)
            .corner(b, h)
            .corner(0.0, h)
    }
}

impl GeometryProvider for Channel {
    fn geometry_at(&self, precision: f64) -> String {
        let mut geo = GeoWriter::new();
        geo.comment(&self.identity());
        let outer = self.outline().write(&mut geo, precision);
        geo.plane_surface(&[outer]);
        geo.finish()
    }

    fn identity(&self) -> String {
        format!(
            "UPN H{} x B{} x Tf{} x Tw{}",
            mm(self.h),
            mm(self.b),
            mm(self.tf),
            mm(self.tw)
        )
    }

    fn validate(&self) -> SectionResult<()> {
        positive("Channel", "h", self.h)?;
        positive("Channel", "b", self.b)?;
        positive("Channel", "tf", self.tf)?;
        positive("Channel", "tw", self.tw)?;
        if self.tw >= self.b {
            return Err(SectionError::invalid_input(
                "Channel.tw",
                self.tw.to_string(),
                "Web must be thinner than the flange width",
            ));
        }
        let (toe, root) = self.flange_faces();
        if toe <= 0.0 || 2.0 * root >= self.h {
            return Err(SectionError::invalid_input(
                "Channel.tf",
                self.tf.to_string(),
                "Tapered flanges do not fit the section depth",
            ));
        }
        if self.r1 < 0.0 || self.r2 < 0.0 {
            return Err(SectionError::invalid_input(
                "Channel.r1/r2",
                format!("{}/{}", self.r1, self.r2),
                "Radii cannot be negative",
            ));
        }
        self.outline().check("Channel")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesher::{EarcutMesher, Mesher};

    fn area_cm2(channel: &Channel) -> f64 {
        let mesh = EarcutMesher::default().triangulate(&channel.geometry_at(1e-4)).unwrap();
        mesh.area() * 1e4
    }

    #[test]
    fn test_upn_areas() {
        // DIN 1025-5 tabulated areas
        let upn120 = Channel::new(0.12, 0.055, 0.009, 0.007, 0.009, 0.0045);
        let upn400 = Channel::new(0.4, 0.11, 0.018, 0.014, 0.018, 0.009);
        assert!(upn120.validate().is_ok());
        assert!(upn400.validate().is_ok());
        assert!((area_cm2(&upn120) - 17.0).abs() / 17.0 < 0.02);
        assert!((area_cm2(&upn400) - 91.5).abs() / 91.5 < 0.02);
    }

    #[test]
    fn test_channel_symmetric_about_mid_depth() {
        let upn = Channel::new(0.2, 0.075, 0.0115, 0.0085, 0.0115, 0.006);
        let mesh = EarcutMesher::default().triangulate(&upn.geometry_at(1e-3)).unwrap();
        let (x, y) = mesh.centroid();
        assert!((y - 0.1).abs() < 1e-9);
        // material is concentrated at the web
        assert!(x < 0.075 / 2.0);
    }

    #[test]
    fn test_channel_taper_switches_with_depth() {
        let shallow = Channel::new(0.3, 0.1, 0.016, 0.01, 0.016, 0.008);
        let deep = Channel::new(0.32, 0.1, 0.0175, 0.014, 0.0175, 0.00875);
        assert_eq!(shallow.taper(), (0.05, 0.08));
        assert_eq!(deep.taper().1, 0.05);
    }

    #[test]
    fn test_channel_validation() {
        assert!(Channel::new(0.12, 0.055, 0.001, 0.007, 0.0, 0.0).validate().is_err());
        assert!(Channel::new(0.12, 0.055, 0.009, 0.06, 0.0, 0.0).validate().is_err());
    }
}
