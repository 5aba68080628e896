//! # Cross-Section Property Formulas
//!
//! Closed-form second moments for the elementary figures used by the mesh
//! integrator, plus textbook results for simple sections that the mesh-based
//! engine is checked against.
//!
//! ## Notation
//!
//! - `A` = Cross-sectional area
//! - `J` = Second moment of area (moment of inertia)
//! - `W` = Elastic section modulus (J / distance to extreme fibre)
//! - `Wpl` = Plastic section modulus
//! - `R` = Radius of gyration (√(J/A))
//!
//! ## References
//!
//! - Roark's Formulas for Stress and Strain, 8th Edition, Appendix A
//! - Pilkey, Formulas for Stress, Strain, and Structural Matrices, Table 2-5

use std::f64::consts::PI;

// =============================================================================
// TRIANGLES
// Building blocks of the mesh integrator
// =============================================================================

/// Second moment of a triangle about its base
///
/// ```text
///        *
///       / \      h
///      /   \
///     *-----*  ← axis
///        b
/// ```
///
/// # Formula
/// J = |b·h³/12|
///
/// The apex position along the base does not matter, so the result holds for
/// each right-triangle half on either side of the apex as well.
///
/// # Example
/// ```rust
/// use section_core::equations::section::triangle_moment_about_base;
///
/// let j = triangle_moment_about_base(3.0, 2.0);
/// assert!((j - 2.0).abs() < 1e-12);
/// ```
#[inline]
pub fn triangle_moment_about_base(base: f64, height: f64) -> f64 {
    (base * height.powi(3) / 12.0).abs()
}

/// Parallel-axis theorem: move a centroidal second moment by distance `d`
///
/// # Formula
/// J = Jc + A·d²
#[inline]
pub fn parallel_axis(j_centroidal: f64, area: f64, d: f64) -> f64 {
    j_centroidal + area * d * d
}

/// Radius of gyration, zero for a zero area
///
/// # Formula
/// R = √(J/A)
#[inline]
pub fn radius_of_gyration(j: f64, area: f64) -> f64 {
    if area > 0.0 && j > 0.0 {
        (j / area).sqrt()
    } else {
        0.0
    }
}

// =============================================================================
// RECTANGLE
// =============================================================================

/// Moment of inertia of a `b × d` rectangle about its centroidal axis
/// parallel to `b`
///
/// # Formula
/// J = b·d³/12
///
/// # Example
/// ```rust
/// use section_core::equations::section::rectangle_moment_of_inertia;
///
/// // 10 mm plate, 100 mm deep
/// let j = rectangle_moment_of_inertia(0.010, 0.100);
/// assert!((j - 8.3333e-7).abs() < 1e-10);
/// ```
#[inline]
pub fn rectangle_moment_of_inertia(b: f64, d: f64) -> f64 {
    b * d.powi(3) / 12.0
}

/// Elastic section modulus of a rectangle
///
/// # Formula
/// W = b·d²/6
#[inline]
pub fn rectangle_section_modulus(b: f64, d: f64) -> f64 {
    b * d.powi(2) / 6.0
}

/// Plastic section modulus of a rectangle
///
/// # Formula
/// Wpl = b·d²/4 (shape factor 1.5)
#[inline]
pub fn rectangle_plastic_modulus(b: f64, d: f64) -> f64 {
    b * d.powi(2) / 4.0
}

// =============================================================================
// CIRCULAR TUBE
// =============================================================================

/// Area of a circular tube
///
/// # Formula
/// A = π(D² − d²)/4, d = D − 2t
#[inline]
pub fn tube_area(outer_diameter: f64, thickness: f64) -> f64 {
    let inner = outer_diameter - 2.0 * thickness;
    PI * (outer_diameter.powi(2) - inner.powi(2)) / 4.0
}

/// Moment of inertia of a circular tube about any diameter
///
/// # Formula
/// J = π(D⁴ − d⁴)/64
///
/// # Example
/// ```rust
/// use section_core::equations::section::tube_moment_of_inertia;
///
/// let j = tube_moment_of_inertia(0.1, 0.05); // solid 100 mm bar
/// assert!((j - 4.9087e-6).abs() < 1e-9);
/// ```
#[inline]
pub fn tube_moment_of_inertia(outer_diameter: f64, thickness: f64) -> f64 {
    let inner = outer_diameter - 2.0 * thickness;
    PI * (outer_diameter.powi(4) - inner.powi(4)) / 64.0
}

/// Plastic section modulus of a circular tube
///
/// # Formula
/// Wpl = (D³ − d³)/6
#[inline]
pub fn tube_plastic_modulus(outer_diameter: f64, thickness: f64) -> f64 {
    let inner = outer_diameter - 2.0 * thickness;
    (outer_diameter.powi(3) - inner.powi(3)) / 6.0
}

// =============================================================================
// SHARP-CORNERED I-SECTION
// Doubly symmetric, no fillets
// =============================================================================

/// Area of an I-section without fillets
///
/// # Formula
/// A = 2·b·tf + (h − 2tf)·tw
#[inline]
pub fn i_section_area(h: f64, b: f64, tw: f64, tf: f64) -> f64 {
    2.0 * b * tf + (h - 2.0 * tf) * tw
}

/// Strong-axis moment of inertia of an I-section without fillets
///
/// ```text
///   ┌───────┐  tf
///   └──┐ ┌──┘
///      │ │ tw      h
///   ┌──┘ └──┐
///   └───────┘
///       b
/// ```
///
/// # Formula
/// J = (b·h³ − (b − tw)(h − 2tf)³)/12
#[inline]
pub fn i_section_moment_of_inertia(h: f64, b: f64, tw: f64, tf: f64) -> f64 {
    (b * h.powi(3) - (b - tw) * (h - 2.0 * tf).powi(3)) / 12.0
}

/// Strong-axis plastic modulus of an I-section without fillets
///
/// # Formula
/// Wpl = b·tf·(h − tf) + tw·(h − 2tf)²/4
#[inline]
pub fn i_section_plastic_modulus(h: f64, b: f64, tw: f64, tf: f64) -> f64 {
    b * tf * (h - tf) + tw * (h - 2.0 * tf).powi(2) / 4.0
}

// =============================================================================
// UNIT TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, rel: f64) -> bool {
        (a - b).abs() <= rel * b.abs().max(1e-300)
    }

    #[test]
    fn test_triangle_about_base() {
        // right triangle halves add up to the whole triangle
        let whole = triangle_moment_about_base(4.0, 3.0);
        let halves = triangle_moment_about_base(1.0, 3.0) + triangle_moment_about_base(3.0, 3.0);
        assert!(approx_eq(whole, halves, 1e-12));
        assert!(approx_eq(whole, 9.0, 1e-12));
        // sign of the base does not matter
        assert_eq!(triangle_moment_about_base(-4.0, 3.0), whole);
    }

    #[test]
    fn test_parallel_axis_rectangle() {
        // rectangle about its base from the centroidal value
        let (b, d) = (2.0, 3.0);
        let about_base = parallel_axis(rectangle_moment_of_inertia(b, d), b * d, d / 2.0);
        assert!(approx_eq(about_base, b * d.powi(3) / 3.0, 1e-12));
    }

    #[test]
    fn test_rectangle_shape_factor() {
        let w = rectangle_section_modulus(0.010, 0.100);
        let wpl = rectangle_plastic_modulus(0.010, 0.100);
        assert!(approx_eq(wpl / w, 1.5, 1e-12));
        let j = rectangle_moment_of_inertia(0.010, 0.100);
        assert!(approx_eq(w, j / 0.050, 1e-12));
    }

    #[test]
    fn test_tube() {
        let a = tube_area(0.1, 0.005);
        assert!(approx_eq(a, PI * (0.01 - 0.0081) / 4.0, 1e-12));
        let j = tube_moment_of_inertia(0.1, 0.005);
        assert!(approx_eq(j, PI * (1e-4 - 0.0081 * 0.0081) / 64.0, 1e-12));
        assert!(tube_plastic_modulus(0.1, 0.005) > j / 0.05);
    }

    #[test]
    fn test_i_section_reduces_to_rectangle() {
        // web as wide as the flanges gives a solid rectangle
        let (h, b) = (0.2, 0.1);
        assert!(approx_eq(i_section_area(h, b, b, 0.01), h * b, 1e-12));
        assert!(approx_eq(
            i_section_moment_of_inertia(h, b, b, 0.01),
            rectangle_moment_of_inertia(b, h),
            1e-12
        ));
        assert!(approx_eq(
            i_section_plastic_modulus(h, b, b, 0.01),
            rectangle_plastic_modulus(b, h),
            1e-12
        ));
    }

    #[test]
    fn test_radius_of_gyration() {
        assert!(approx_eq(radius_of_gyration(8.0, 2.0), 2.0, 1e-12));
        assert_eq!(radius_of_gyration(1.0, 0.0), 0.0);
    }
}
