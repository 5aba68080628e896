//! # section_core - Cross-Section Property Engine
//!
//! `section_core` computes the geometric properties of structural
//! cross-sections (angles, channels, I-sections, tubes, tees, plates) by
//! meshing them into triangles and integrating over the mesh. Every input and
//! result type is JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Mesh-based**: any outline a shape can describe gets the same treatment,
//!   fillets and welds included
//! - **JSON-First**: shapes, settings, results and errors implement
//!   Serialize/Deserialize
//! - **Rich Errors**: structured error types, not strings
//! - **Explicit state**: the only shared state is a [`PropertyCache`] the
//!   caller owns
//!
//! ## Quick Start
//!
//! ```rust
//! use section_core::catalog::ShapeCatalog;
//! use section_core::calculations::SectionCalculator;
//! use section_core::report::render_table;
//! use section_core::units::LengthUnit;
//!
//! let shape = ShapeCatalog::standard().resolve("IPE200").unwrap();
//! let property = SectionCalculator::default().calculate(&shape).unwrap();
//! println!("{}", render_table(&property, LengthUnit::Centimeter));
//! ```
//!
//! ## Modules
//!
//! - [`shapes`] - shape descriptors and their geometry text
//! - [`catalog`] - rolled profiles by name
//! - [`mesher`] - geometry text to triangles
//! - [`geometry`] - points, triangles and meshes
//! - [`calculations`] - refinement loop, integrators and the calculator
//! - [`equations`] - closed-form section formulas
//! - [`cache`] - single-flight property cache
//! - [`report`] - text table and key/value output
//! - [`settings`] - calculation tunables
//! - [`units`] - report length units
//! - [`errors`] - structured error types
//! - [`file_io`] - atomic JSON persistence

pub mod cache;
pub mod calculations;
pub mod catalog;
pub mod equations;
pub mod errors;
pub mod file_io;
pub mod geometry;
pub mod mesher;
pub mod report;
pub mod settings;
pub mod shapes;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use cache::PropertyCache;
pub use calculations::{BendingProperty, Property, SectionCalculator};
pub use catalog::ShapeCatalog;
pub use errors::{SectionError, SectionResult};
pub use file_io::{load_property, load_settings, save_property, save_settings};
pub use mesher::{EarcutMesher, Mesher};
pub use settings::CalculationSettings;
pub use shapes::{GeometryProvider, ShapeDescriptor, ShapeKind};
pub use units::LengthUnit;
