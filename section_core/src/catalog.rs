//! # Standard Profile Catalog
//!
//! Named rolled profiles as plain dimension tables. Only dimensions are
//! stored; every property is computed by the mesh engine on request.
//!
//! Series included:
//!
//! - Equal angles, GOST 8509
//! - I-sections: STO ASChM 20-93 (B, K and SH series, suffixed `-ASCM`),
//!   IPE, HEA and HEB
//! - Channels: UPN (DIN 1025-5) and GOST 8240 U series
//! - Double channels, back to back, derived as I-sections named
//!   `"<channel>,Double"`
//! - Flat plates
//!
//! All dimensions in meters.
//!
//! ## Example
//!
//! ```rust
//! use section_core::catalog::ShapeCatalog;
//! use section_core::shapes::ShapeKind;
//!
//! let catalog = ShapeCatalog::standard();
//! let beam = catalog.resolve("20b1-ascm").unwrap();
//! assert_eq!(beam.kind(), ShapeKind::ISection);
//! assert!(catalog.resolve("W14X90").is_err());
//! ```

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{SectionError, SectionResult};
use crate::shapes::{Angle, Channel, GeometryProvider, ISection, Rectangle, ShapeDescriptor, ShapeKind};

// =============================================================================
// DIMENSION TABLES
// =============================================================================

/// Equal angles: name, b, thk, r1, r2
const ANGLES: &[(&str, f64, f64, f64, f64)] = &[
    ("L50x5", 0.050, 0.005, 0.007, 0.0035),
    ("L60x6", 0.060, 0.006, 0.008, 0.004),
    ("L63x6", 0.063, 0.006, 0.007, 0.004),
    ("L70x7", 0.070, 0.007, 0.009, 0.0045),
    ("L75x7", 0.075, 0.007, 0.008, 0.0045),
    ("L75x8", 0.075, 0.008, 0.009, 0.0045),
    ("L80x8", 0.080, 0.008, 0.010, 0.005),
    ("L90x9", 0.090, 0.009, 0.011, 0.0055),
    ("L100x10", 0.100, 0.010, 0.012, 0.006),
    ("L120x12", 0.120, 0.012, 0.013, 0.0065),
    ("L150x15", 0.150, 0.015, 0.016, 0.008),
];

/// I-sections: name, h, b, tw, tf, r
const I_SECTIONS: &[(&str, f64, f64, f64, f64, f64)] = &[
    // STO ASChM 20-93, normal (B) series
    ("10B1-ASCM", 0.100, 0.055, 0.0041, 0.0057, 0.007),
    ("12B1-ASCM", 0.1176, 0.064, 0.0038, 0.0051, 0.007),
    ("12B2-ASCM", 0.120, 0.064, 0.0044, 0.0063, 0.007),
    ("14B1-ASCM", 0.1374, 0.073, 0.0038, 0.0056, 0.007),
    ("14B2-ASCM", 0.140, 0.073, 0.0047, 0.0069, 0.007),
    ("16B1-ASCM", 0.157, 0.082, 0.0040, 0.0059, 0.009),
    ("16B2-ASCM", 0.160, 0.082, 0.0050, 0.0074, 0.009),
    ("18B1-ASCM", 0.177, 0.091, 0.0043, 0.0065, 0.009),
    ("18B2-ASCM", 0.180, 0.091, 0.0053, 0.0080, 0.009),
    ("20B1-ASCM", 0.200, 0.100, 0.0055, 0.0080, 0.011),
    ("25B1-ASCM", 0.248, 0.124, 0.0050, 0.0080, 0.012),
    ("25B2-ASCM", 0.250, 0.125, 0.0060, 0.0090, 0.012),
    ("30B1-ASCM", 0.298, 0.149, 0.0055, 0.0080, 0.013),
    ("30B2-ASCM", 0.300, 0.150, 0.0065, 0.0090, 0.013),
    ("35B1-ASCM", 0.346, 0.174, 0.0060, 0.0090, 0.014),
    ("35B2-ASCM", 0.350, 0.175, 0.0070, 0.0110, 0.014),
    ("40B1-ASCM", 0.396, 0.199, 0.0070, 0.0110, 0.016),
    ("40B2-ASCM", 0.400, 0.200, 0.0080, 0.0130, 0.016),
    // STO ASChM 20-93, column (K) series
    ("20K2-ASCM", 0.200, 0.200, 0.0080, 0.0120, 0.013),
    ("25K2-ASCM", 0.250, 0.250, 0.0090, 0.0140, 0.016),
    ("30K2-ASCM", 0.300, 0.300, 0.0100, 0.0150, 0.018),
    ("35K2-ASCM", 0.350, 0.350, 0.0120, 0.0190, 0.020),
    ("40K2-ASCM", 0.400, 0.400, 0.0130, 0.0210, 0.022),
    // STO ASChM 20-93, SH series
    ("100SH1-ASCM", 0.990, 0.320, 0.0160, 0.0210, 0.030),
    // IPE
    ("IPE160", 0.160, 0.082, 0.0050, 0.0074, 0.009),
    ("IPE180", 0.180, 0.091, 0.0053, 0.0080, 0.009),
    ("IPE200", 0.200, 0.100, 0.0056, 0.0085, 0.012),
    ("IPE240", 0.240, 0.120, 0.0062, 0.0098, 0.015),
    ("IPE300", 0.300, 0.150, 0.0071, 0.0107, 0.015),
    ("IPE500", 0.500, 0.200, 0.0102, 0.0160, 0.037),
    ("IPE550", 0.550, 0.210, 0.0111, 0.0172, 0.0412),
    // HEA
    ("HEA140", 0.133, 0.140, 0.0055, 0.0085, 0.012),
    ("HEA160", 0.152, 0.160, 0.0060, 0.0090, 0.015),
    ("HEA180", 0.171, 0.180, 0.0060, 0.0095, 0.015),
    ("HEA200", 0.190, 0.200, 0.0065, 0.0100, 0.018),
    ("HEA240", 0.230, 0.240, 0.0075, 0.0120, 0.021),
    ("HEA300", 0.290, 0.300, 0.0085, 0.0140, 0.027),
    ("HEA500", 0.490, 0.300, 0.0120, 0.0230, 0.027),
    // HEB
    ("HEB140", 0.140, 0.140, 0.0070, 0.0120, 0.012),
    ("HEB160", 0.160, 0.160, 0.0080, 0.0130, 0.015),
    ("HEB180", 0.180, 0.180, 0.0085, 0.0140, 0.015),
    ("HEB200", 0.200, 0.200, 0.0090, 0.0150, 0.018),
    ("HEB240", 0.240, 0.240, 0.0100, 0.0170, 0.021),
    ("HEB300", 0.300, 0.300, 0.0110, 0.0190, 0.027),
];

/// Channels: name, h, b, tf, tw, r1, r2
const CHANNELS: &[(&str, f64, f64, f64, f64, f64, f64)] = &[
    // DIN 1025-5
    ("UPN120", 0.120, 0.055, 0.0090, 0.0070, 0.0090, 0.0045),
    ("UPN140", 0.140, 0.060, 0.0100, 0.0070, 0.0100, 0.0050),
    ("UPN160", 0.160, 0.065, 0.0105, 0.0075, 0.0105, 0.0055),
    ("UPN180", 0.180, 0.070, 0.0110, 0.0080, 0.0110, 0.0055),
    ("UPN200", 0.200, 0.075, 0.0115, 0.0085, 0.0115, 0.0060),
    ("UPN240", 0.240, 0.085, 0.0130, 0.0095, 0.0130, 0.0065),
    ("UPN300", 0.300, 0.100, 0.0160, 0.0100, 0.0160, 0.0080),
    ("UPN400", 0.400, 0.110, 0.0180, 0.0140, 0.0180, 0.0090),
    // GOST 8240, tapered flanges
    ("12U GOST 8240", 0.120, 0.052, 0.0078, 0.0048, 0.0075, 0.0030),
    ("16U GOST 8240", 0.160, 0.064, 0.0084, 0.0050, 0.0085, 0.0035),
    ("20U GOST 8240", 0.200, 0.076, 0.0090, 0.0052, 0.0095, 0.0040),
    ("24U GOST 8240", 0.240, 0.090, 0.0100, 0.0056, 0.0105, 0.0040),
    ("30U GOST 8240", 0.300, 0.100, 0.0110, 0.0065, 0.0120, 0.0050),
    ("36U GOST 8240", 0.360, 0.110, 0.0126, 0.0075, 0.0140, 0.0060),
    ("40U GOST 8240", 0.400, 0.115, 0.0135, 0.0080, 0.0150, 0.0060),
];

/// Flat plates: name, h, thk
const PLATES: &[(&str, f64, f64)] = &[
    ("Plate 50x5", 0.050, 0.005),
    ("Plate 60x6", 0.060, 0.006),
    ("Plate 75x7", 0.075, 0.007),
    ("Plate 100x10", 0.100, 0.010),
];

/// Suffix of the derived back-to-back channel pairs
pub const DOUBLE_SUFFIX: &str = ",Double";

// =============================================================================
// CATALOG
// =============================================================================

/// Catalog entry: a shape under its catalog name.
///
/// Its identity is the catalog name, so computed properties and cache keys
/// read "20B1-ASCM" rather than the generic dimension string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogShape {
    pub name: String,
    pub shape: ShapeDescriptor,
}

impl GeometryProvider for CatalogShape {
    fn geometry_at(&self, precision: f64) -> String {
        self.shape.geometry_at(precision)
    }

    fn identity(&self) -> String {
        self.name.clone()
    }

    fn validate(&self) -> SectionResult<()> {
        self.shape.validate()
    }
}

/// Named shapes indexed for case-insensitive lookup
#[derive(Debug, Clone, Default)]
pub struct ShapeCatalog {
    /// Entries indexed by uppercase name
    shapes: HashMap<String, CatalogShape>,

    /// Uppercase names grouped by kind, in insertion order
    by_kind: HashMap<ShapeKind, Vec<String>>,

    /// Uppercase names in insertion order
    order: Vec<String>,
}

static STANDARD: Lazy<ShapeCatalog> = Lazy::new(ShapeCatalog::build_standard);

impl ShapeCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide catalog of the built-in tables, built on first use
    pub fn standard() -> &'static ShapeCatalog {
        &STANDARD
    }

    fn build_standard() -> ShapeCatalog {
        let mut catalog = ShapeCatalog::new();

        for &(name, b, thk, r1, r2) in ANGLES {
            catalog.insert(name, ShapeDescriptor::Angle(Angle::new(b, thk, r1, r2)));
        }
        for &(name, h, b, tw, tf, r) in I_SECTIONS {
            catalog.insert(name, ShapeDescriptor::ISection(ISection::new(h, b, tw, tf, r)));
        }
        for &(name, h, b, tf, tw, r1, r2) in CHANNELS {
            catalog.insert(name, ShapeDescriptor::Channel(Channel::new(h, b, tf, tw, r1, r2)));
        }
        // two channels back to back behave as an I-section with parallel flanges
        for &(name, h, b, tf, tw, r1, _) in CHANNELS {
            let double = ISection::new(h, 2.0 * b, 2.0 * tw, tf, r1);
            catalog.insert(&format!("{}{}", name, DOUBLE_SUFFIX), ShapeDescriptor::ISection(double));
        }
        for &(name, h, thk) in PLATES {
            catalog.insert(name, ShapeDescriptor::Rectangle(Rectangle::new(h, thk)));
        }

        catalog
    }

    /// Insert or replace a shape under `name`
    pub fn insert(&mut self, name: &str, shape: ShapeDescriptor) {
        let key = name.to_uppercase();
        let kind = shape.kind();
        let entry = CatalogShape { name: name.to_string(), shape };

        if let Some(previous) = self.shapes.insert(key.clone(), entry) {
            if let Some(keys) = self.by_kind.get_mut(&previous.shape.kind()) {
                keys.retain(|k| k != &key);
            }
            self.order.retain(|k| k != &key);
        }
        self.by_kind.entry(kind).or_default().push(key.clone());
        self.order.push(key);
    }

    /// Look up a catalog entry by name
    ///
    /// Name matching is case-insensitive and ignores surrounding spaces.
    pub fn entry(&self, name: &str) -> SectionResult<&CatalogShape> {
        let key = name.trim().to_uppercase();
        self.shapes.get(&key).ok_or_else(|| SectionError::not_found(name))
    }

    /// Descriptor of the shape named `name`
    pub fn resolve(&self, name: &str) -> SectionResult<ShapeDescriptor> {
        self.entry(name).map(|entry| entry.shape.clone())
    }

    /// All names in catalog order
    pub fn names(&self) -> Vec<&str> {
        self.order
            .iter()
            .filter_map(|k| self.shapes.get(k))
            .map(|entry| entry.name.as_str())
            .collect()
    }

    /// All entries of one kind, in catalog order
    pub fn shapes_of_kind(&self, kind: ShapeKind) -> Vec<&CatalogShape> {
        self.by_kind
            .get(&kind)
            .map(|keys| keys.iter().filter_map(|k| self.shapes.get(k)).collect())
            .unwrap_or_default()
    }

    /// Entries whose name starts with `prefix` (case-insensitive)
    pub fn search(&self, prefix: &str) -> Vec<&CatalogShape> {
        let prefix = prefix.trim().to_uppercase();
        self.order
            .iter()
            .filter(|k| k.starts_with(&prefix))
            .filter_map(|k| self.shapes.get(k))
            .collect()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Check if the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_counts() {
        let catalog = ShapeCatalog::standard();
        assert_eq!(catalog.shapes_of_kind(ShapeKind::Angle).len(), ANGLES.len());
        assert_eq!(catalog.shapes_of_kind(ShapeKind::Channel).len(), CHANNELS.len());
        assert_eq!(
            catalog.shapes_of_kind(ShapeKind::ISection).len(),
            I_SECTIONS.len() + CHANNELS.len()
        );
        assert_eq!(catalog.shapes_of_kind(ShapeKind::Rectangle).len(), PLATES.len());
        assert_eq!(
            catalog.len(),
            ANGLES.len() + I_SECTIONS.len() + 2 * CHANNELS.len() + PLATES.len()
        );
        assert_eq!(catalog.names().len(), catalog.len());
    }

    #[test]
    fn test_resolve_is_case_insensitive() {
        let catalog = ShapeCatalog::standard();
        let upper = catalog.resolve("IPE200").unwrap();
        let lower = catalog.resolve(" ipe200 ").unwrap();
        assert_eq!(upper, lower);
        assert_eq!(catalog.entry("ipe200").unwrap().identity(), "IPE200");
    }

    #[test]
    fn test_unknown_name_is_recoverable() {
        let err = ShapeCatalog::standard().resolve("HEB1000").unwrap_err();
        assert!(err.is_recoverable());
        assert_eq!(err.error_code(), "NOT_FOUND");
    }

    #[test]
    fn test_double_channel_is_derived() {
        let catalog = ShapeCatalog::standard();
        let double = catalog.resolve("UPN200,Double").unwrap();
        match double {
            ShapeDescriptor::ISection(i) => {
                assert_eq!(i.b, 0.150);
                assert_eq!(i.tw, 0.017);
                assert_eq!(i.r, 0.0115);
            }
            other => panic!("expected an I-section, got {:?}", other),
        }
    }

    #[test]
    fn test_every_entry_is_valid() {
        for entry in ShapeCatalog::standard().shapes_of_kind(ShapeKind::Channel) {
            assert!(entry.validate().is_ok(), "{}", entry.name);
        }
        for name in ShapeCatalog::standard().names() {
            let shape = ShapeCatalog::standard().resolve(name).unwrap();
            assert!(shape.validate().is_ok(), "{}", name);
        }
    }

    #[test]
    fn test_insert_replaces() {
        let mut catalog = ShapeCatalog::new();
        assert!(catalog.is_empty());
        catalog.insert("P1", ShapeDescriptor::Rectangle(Rectangle::new(0.1, 0.01)));
        catalog.insert("p1", ShapeDescriptor::Rectangle(Rectangle::new(0.2, 0.01)));
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.names(), vec!["p1"]);
        assert_eq!(catalog.shapes_of_kind(ShapeKind::Rectangle).len(), 1);
    }

    #[test]
    fn test_search_by_prefix() {
        let found = ShapeCatalog::standard().search("hea");
        assert_eq!(found.len(), 7);
        assert!(found.iter().all(|e| e.name.starts_with("HEA")));
    }
}
