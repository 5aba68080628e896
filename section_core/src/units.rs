//! # Unit Types
//!
//! The engine works in meters. Reports can show lengths in meters,
//! centimeters or millimeters; every property is scaled by the power of the
//! length unit it carries (m², m³, m⁴).
//!
//! ## Example
//!
//! ```rust
//! use section_core::units::LengthUnit;
//!
//! let cm: LengthUnit = "cm".parse().unwrap();
//! assert_eq!(cm.scale(0.2, 1), 20.0);
//! assert!((cm.scale(2.716e-3, 2) - 27.16).abs() < 1e-9);
//! assert_eq!(cm.suffix(4), "cm⁴");
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::SectionError;

/// Length unit of a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LengthUnit {
    #[default]
    Meter,
    Centimeter,
    Millimeter,
}

impl LengthUnit {
    /// Units per meter
    pub fn per_meter(&self) -> f64 {
        match self {
            LengthUnit::Meter => 1.0,
            LengthUnit::Centimeter => 100.0,
            LengthUnit::Millimeter => 1000.0,
        }
    }

    /// Convert a value of dimension length^`power` from SI
    pub fn scale(&self, value: f64, power: i32) -> f64 {
        value * self.per_meter().powi(power)
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            LengthUnit::Meter => "m",
            LengthUnit::Centimeter => "cm",
            LengthUnit::Millimeter => "mm",
        }
    }

    /// Unit label for length^`power`, e.g. `cm³`
    pub fn suffix(&self, power: i32) -> String {
        let exponent = match power {
            1 => "",
            2 => "²",
            3 => "³",
            4 => "⁴",
            _ => "^",
        };
        if exponent == "^" {
            format!("{}^{}", self.symbol(), power)
        } else {
            format!("{}{}", self.symbol(), exponent)
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for LengthUnit {
    type Err = SectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "m" | "meter" | "meters" => Ok(LengthUnit::Meter),
            "cm" | "centimeter" | "centimeters" => Ok(LengthUnit::Centimeter),
            "mm" | "millimeter" | "millimeters" => Ok(LengthUnit::Millimeter),
            _ => Err(SectionError::invalid_input("units", s, "Expected one of m, cm, mm")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_powers() {
        let mm = LengthUnit::Millimeter;
        assert_eq!(mm.scale(0.1, 1), 100.0);
        assert!((mm.scale(8.333e-7, 4) - 833_300.0).abs() < 1e-6);
        assert_eq!(LengthUnit::Meter.scale(1.5, 3), 1.5);
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!("MM".parse::<LengthUnit>().unwrap(), LengthUnit::Millimeter);
        assert_eq!(LengthUnit::Centimeter.to_string(), "cm");
        assert!("inch".parse::<LengthUnit>().is_err());
    }

    #[test]
    fn test_suffix() {
        assert_eq!(LengthUnit::Meter.suffix(1), "m");
        assert_eq!(LengthUnit::Millimeter.suffix(2), "mm²");
        assert_eq!(LengthUnit::Meter.suffix(5), "m^5");
    }
}
