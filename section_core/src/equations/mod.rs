//! # Section Equations
//!
//! Closed-form formulas kept in one place so the mesh integrator and the
//! cross-checks in the tests use the same, documented expressions.
//!
//! ## Modules
//!
//! - [`section`] - triangle, rectangle, tube and I-section properties
//!
//! ## Sign Conventions
//!
//! - **Axes**: x to the right, y up; positive angles rotate counter-clockwise
//! - **Second moments**: always non-negative
//! - **Product of inertia**: Jxy = ∫xy dA, signed
//!
//! ## References
//!
//! - Roark's Formulas for Stress and Strain, 8th Edition
//! - Pilkey, Formulas for Stress, Strain, and Structural Matrices

pub mod section;

pub use section::{
    parallel_axis,
    radius_of_gyration,
    triangle_moment_about_base,
};
