//! # Property Reports
//!
//! Two plain renderings of a [`Property`]:
//!
//! - [`render_table`]: aligned text, one row per quantity and one column per
//!   frame (base, centroid, principal). This is also the `Display` of
//!   `Property`, in meters.
//! - [`key_values`]: a flat SI map with dotted keys such as `center.jxx`,
//!   ordered by key so two reports diff line by line.

use std::collections::BTreeMap;
use std::fmt::{self, Write};

use crate::calculations::{BendingProperty, Property};
use crate::units::LengthUnit;

/// Row label, length power and accessor of each frame quantity
const ROWS: &[(&str, i32, fn(&BendingProperty) -> f64)] = &[
    ("jxx", 4, |b| b.jxx),
    ("ymax", 1, |b| b.ymax),
    ("wx", 3, |b| b.wx),
    ("rx", 1, |b| b.rx),
    ("sx", 3, |b| b.sx),
    ("wx_plastic", 3, |b| b.wx_plastic),
    ("jyy", 4, |b| b.jyy),
    ("xmax", 1, |b| b.xmax),
    ("wy", 3, |b| b.wy),
    ("ry", 1, |b| b.ry),
    ("wy_plastic", 3, |b| b.wy_plastic),
    ("jxy", 4, |b| b.jxy),
    ("jo", 4, |b| b.jo),
    ("ro", 1, |b| b.ro),
];

const FRAMES: [&str; 3] = ["base", "center", "principal"];

fn frames(property: &Property) -> [&BendingProperty; 3] {
    [
        &property.at_base_point,
        &property.at_center_point,
        &property.on_section_axe,
    ]
}

/// Short numeric form: fixed for ordinary magnitudes, scientific otherwise
fn number(value: f64) -> String {
    let magnitude = value.abs();
    if value == 0.0 || (1e-3..1e6).contains(&magnitude) {
        format!("{:.4}", value)
    } else {
        format!("{:.4e}", value)
    }
}

/// Render `property` as an aligned text table in `unit`.
pub fn render_table(property: &Property, unit: LengthUnit) -> String {
    let mut out = String::new();
    // writing into a String cannot fail
    let _ = write_table(&mut out, property, unit);
    out
}

fn write_table(out: &mut impl Write, property: &Property, unit: LengthUnit) -> fmt::Result {
    writeln!(out, "{}", property.name)?;
    writeln!(out)?;
    writeln!(out, "  area   {} {}", number(unit.scale(property.area, 2)), unit.suffix(2))?;
    writeln!(
        out,
        "  xc, yc {}, {} {}",
        number(unit.scale(property.xc, 1)),
        number(unit.scale(property.yc, 1)),
        unit.suffix(1)
    )?;
    writeln!(
        out,
        "  alpha  {:.4} rad ({:.2} deg)",
        property.alpha,
        property.alpha.to_degrees()
    )?;
    writeln!(
        out,
        "  mesh   {} points, {} triangles, {} iterations{}",
        property.mesh.points,
        property.mesh.triangles,
        property.mesh.iterations,
        if property.mesh.converged { "" } else { " (not converged)" }
    )?;
    writeln!(out)?;

    let cells: Vec<[String; 3]> = ROWS
        .iter()
        .map(|(_, power, get)| frames(property).map(|frame| number(unit.scale(get(frame), *power))))
        .collect();
    let width = cells
        .iter()
        .flatten()
        .map(String::len)
        .chain(FRAMES.iter().map(|f| f.len()))
        .max()
        .unwrap_or(0);

    write!(out, "  {:<12}{:<6}", "", "")?;
    for frame in FRAMES {
        write!(out, " {:>width$}", frame, width = width)?;
    }
    writeln!(out)?;

    for ((label, power, _), row) in ROWS.iter().zip(&cells) {
        write!(out, "  {:<12}{:<6}", label, unit.suffix(*power))?;
        for cell in row {
            write!(out, " {:>width$}", cell, width = width)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_table(f, self, LengthUnit::Meter)
    }
}

/// Flat SI key/value form of `property`.
pub fn key_values(property: &Property) -> BTreeMap<String, f64> {
    let mut map = BTreeMap::new();
    map.insert("area".to_string(), property.area);
    map.insert("xc".to_string(), property.xc);
    map.insert("yc".to_string(), property.yc);
    map.insert("alpha".to_string(), property.alpha);
    map.insert("mesh.precision".to_string(), property.mesh.precision);
    map.insert("mesh.iterations".to_string(), property.mesh.iterations as f64);

    for (frame, values) in FRAMES.iter().zip(frames(property)) {
        for (label, _, get) in ROWS {
            map.insert(format!("{}.{}", frame, label), get(values));
        }
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::SectionCalculator;
    use crate::shapes::Rectangle;

    fn plate() -> Property {
        SectionCalculator::default().calculate(&Rectangle::new(0.1, 0.01)).unwrap()
    }

    #[test]
    fn test_number_format() {
        assert_eq!(number(0.0), "0.0000");
        assert_eq!(number(27.16), "27.1600");
        assert_eq!(number(8.333e-7), "8.3330e-7");
    }

    #[test]
    fn test_table_in_centimeters() {
        let property = plate();
        let table = render_table(&property, LengthUnit::Centimeter);

        assert!(table.starts_with(&property.name));
        assert!(table.contains("area   10.0000 cm²"));
        let jxx_row = table.lines().find(|l| l.trim_start().starts_with("jxx")).unwrap();
        // centroidal jxx of a 1 x 10 cm plate
        assert!(jxx_row.contains("83.3333"));
        assert!(jxx_row.contains("cm⁴"));
        assert_eq!(table.lines().filter(|l| l.starts_with("  ")).count(), 4 + 1 + ROWS.len());
    }

    #[test]
    fn test_display_uses_meters() {
        let property = plate();
        assert_eq!(property.to_string(), render_table(&property, LengthUnit::Meter));
        assert!(property.to_string().contains("m²"));
    }

    #[test]
    fn test_key_values() {
        let property = plate();
        let map = key_values(&property);

        assert_eq!(map.len(), 6 + 3 * ROWS.len());
        assert_eq!(map["area"], property.area);
        assert_eq!(map["center.jxx"], property.at_center_point.jxx);
        assert_eq!(map["principal.wy_plastic"], property.on_section_axe.wy_plastic);
        assert_eq!(map["mesh.iterations"], property.mesh.iterations as f64);

        let keys: Vec<&String> = map.keys().collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
    }
}
