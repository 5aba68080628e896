//! # Shape Descriptors
//!
//! One plain dimension struct per shape kind, all in meters. Every kind
//! implements [`GeometryProvider`]: it writes its outline as geometry text at
//! a requested element size and reports a stable identity used as cache key.
//!
//! [`ShapeDescriptor`] wraps the kinds in a single tagged enum so catalogs
//! and JSON files can hold any of them:
//!
//! ```json
//! { "type": "Rectangle", "h": 0.1, "thk": 0.01 }
//! ```
//!
//! ## Example
//!
//! ```rust
//! use section_core::shapes::{GeometryProvider, Rectangle, ShapeDescriptor};
//!
//! let plate = ShapeDescriptor::Rectangle(Rectangle::new(0.100, 0.010));
//! assert_eq!(plate.identity(), "Rectangle H100.00x Thk10.00");
//! assert!(plate.validate().is_ok());
//! assert!(plate.geometry_at(0.01).contains("Plane Surface"));
//! ```

pub mod angle;
pub mod channel;
mod contour;
pub mod isection;
pub mod plate_group;
pub mod rectangle;
pub mod tsection;
pub mod tube;
pub mod welded;

use serde::{Deserialize, Serialize};

use crate::errors::{SectionError, SectionResult};

pub use angle::Angle;
pub use channel::Channel;
pub use isection::ISection;
pub use plate_group::{Plate, PlateGroup};
pub use rectangle::Rectangle;
pub use tsection::TSection;
pub use tube::Tube;
pub use welded::WeldedISection;

/// Source of meshable geometry for one shape instance.
pub trait GeometryProvider {
    /// Geometry text with curves sized for element length `precision`
    fn geometry_at(&self, precision: f64) -> String;

    /// Stable name of the instance, used as cache key and report title
    fn identity(&self) -> String;

    /// Check dimensions before any meshing happens
    fn validate(&self) -> SectionResult<()> {
        Ok(())
    }
}

/// Shape kind, used to group catalog entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ShapeKind {
    Angle,
    Rectangle,
    Tube,
    ISection,
    Channel,
    TSection,
    WeldedISection,
    PlateGroup,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 8] = [
        ShapeKind::Angle,
        ShapeKind::Rectangle,
        ShapeKind::Tube,
        ShapeKind::ISection,
        ShapeKind::Channel,
        ShapeKind::TSection,
        ShapeKind::WeldedISection,
        ShapeKind::PlateGroup,
    ];

    /// Human-readable label
    pub fn display_name(&self) -> &'static str {
        match self {
            ShapeKind::Angle => "Equal angle",
            ShapeKind::Rectangle => "Plate",
            ShapeKind::Tube => "Circular tube",
            ShapeKind::ISection => "I-section",
            ShapeKind::Channel => "Channel",
            ShapeKind::TSection => "T-section",
            ShapeKind::WeldedISection => "Welded I-section",
            ShapeKind::PlateGroup => "Plate group",
        }
    }

    /// Parse a kind from a short, case-insensitive keyword
    ///
    /// ```rust
    /// use section_core::shapes::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::from_keyword("I"), Some(ShapeKind::ISection));
    /// assert_eq!(ShapeKind::from_keyword("upn"), Some(ShapeKind::Channel));
    /// assert_eq!(ShapeKind::from_keyword("zed"), None);
    /// ```
    pub fn from_keyword(keyword: &str) -> Option<ShapeKind> {
        match keyword.trim().to_lowercase().as_str() {
            "angle" | "l" => Some(ShapeKind::Angle),
            "rectangle" | "plate" => Some(ShapeKind::Rectangle),
            "tube" | "pipe" => Some(ShapeKind::Tube),
            "isection" | "i" | "beam" => Some(ShapeKind::ISection),
            "channel" | "upn" | "u" => Some(ShapeKind::Channel),
            "tsection" | "t" => Some(ShapeKind::TSection),
            "welded" | "weldedisection" | "wpg" => Some(ShapeKind::WeldedISection),
            "plategroup" | "group" => Some(ShapeKind::PlateGroup),
            _ => None,
        }
    }
}

impl std::fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Any shape kind behind one serializable type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ShapeDescriptor {
    Angle(Angle),
    Rectangle(Rectangle),
    Tube(Tube),
    ISection(ISection),
    Channel(Channel),
    TSection(TSection),
    WeldedISection(WeldedISection),
    PlateGroup(PlateGroup),
}

impl ShapeDescriptor {
    pub fn kind(&self) -> ShapeKind {
        match self {
            ShapeDescriptor::Angle(_) => ShapeKind::Angle,
            ShapeDescriptor::Rectangle(_) => ShapeKind::Rectangle,
            ShapeDescriptor::Tube(_) => ShapeKind::Tube,
            ShapeDescriptor::ISection(_) => ShapeKind::ISection,
            ShapeDescriptor::Channel(_) => ShapeKind::Channel,
            ShapeDescriptor::TSection(_) => ShapeKind::TSection,
            ShapeDescriptor::WeldedISection(_) => ShapeKind::WeldedISection,
            ShapeDescriptor::PlateGroup(_) => ShapeKind::PlateGroup,
        }
    }

    fn provider(&self) -> &dyn GeometryProvider {
        match self {
            ShapeDescriptor::Angle(s) => s,
            ShapeDescriptor::Rectangle(s) => s,
            ShapeDescriptor::Tube(s) => s,
            ShapeDescriptor::ISection(s) => s,
            ShapeDescriptor::Channel(s) => s,
            ShapeDescriptor::TSection(s) => s,
            ShapeDescriptor::WeldedISection(s) => s,
            ShapeDescriptor::PlateGroup(s) => s,
        }
    }
}

impl GeometryProvider for ShapeDescriptor {
    fn geometry_at(&self, precision: f64) -> String {
        self.provider().geometry_at(precision)
    }

    fn identity(&self) -> String {
        self.provider().identity()
    }

    fn validate(&self) -> SectionResult<()> {
        self.provider().validate()
    }
}

/// Reject non-finite or non-positive dimensions
pub(crate) fn positive(shape: &str, field: &str, value: f64) -> SectionResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SectionError::invalid_input(
            format!("{}.{}", shape, field),
            value.to_string(),
            "Must be a positive, finite length",
        ))
    }
}

/// Meters to millimeters with two decimals, as used in identities
pub(crate) fn mm(value: f64) -> String {
    format!("{:.2}", value * 1000.0)
}
