//! # Section Calculations
//!
//! The mesh-based property engine. A shape is meshed until its area is
//! stable, then integrated in three frames:
//!
//! - **base**: the axes the shape was drawn in
//! - **centre**: parallel axes through the centroid
//! - **principal**: centroidal axes turned by the principal angle, with the
//!   weak axis along x
//!
//! ## Modules
//!
//! - [`refinement`] - precision halving until the area converges
//! - [`moments`] - Jxx, Jyy, Jxy and Sx of a mesh
//! - [`plastic`] - plastic section moduli by half-plane clipping
//! - [`principal`] - principal angle, closed form and grid search
//! - [`property`] - result types and the [`SectionCalculator`] pipeline

pub mod moments;
pub mod plastic;
pub mod principal;
pub mod property;
pub mod refinement;

pub use property::{BendingProperty, Property, SectionCalculator};
pub use refinement::{refine, MeshSummary, RefinedMesh};
