//! # Error Types
//!
//! Structured error types for section_core. Every failure in the computation
//! path is returned as a value; nothing in the engine panics on bad input.
//!
//! ## Example
//!
//! ```rust
//! use section_core::errors::{SectionError, SectionResult};
//!
//! fn validate_height(h: f64) -> SectionResult<()> {
//!     if h <= 0.0 {
//!         return Err(SectionError::invalid_input("h", h.to_string(), "Height must be positive"));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_height(-1.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for section_core operations
pub type SectionResult<T> = Result<T, SectionError>;

/// Structured error type for section property operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum SectionError {
    /// Geometry text could not be parsed or triangulated
    #[error("Mesh generation failed: {reason}")]
    MeshGeneration { reason: String },

    /// Measured area is not strictly positive
    #[error("Invalid area {area:e} at precision {precision:e}")]
    InvalidArea { area: f64, precision: f64 },

    /// A mesh point does not lie in the XOY plane
    #[error("Point {point_index} is not planar: z = {z:e}")]
    PlanarityViolation { point_index: usize, z: f64 },

    /// The refinement loop hit its iteration cap without a stable area
    #[error("Area did not converge after {iterations} iterations (last relative change {relative_change:e})")]
    NotConverged {
        iterations: usize,
        relative_change: f64,
    },

    /// No shape with this name in the catalog
    #[error("Section with name `{name}` is not found")]
    NotFound { name: String },

    /// An input value is invalid (dimension out of range, bad setting, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl SectionError {
    /// Create a MeshGeneration error
    pub fn mesh_generation(reason: impl Into<String>) -> Self {
        SectionError::MeshGeneration {
            reason: reason.into(),
        }
    }

    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        SectionError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a NotFound error
    pub fn not_found(name: impl Into<String>) -> Self {
        SectionError::NotFound { name: name.into() }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        SectionError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Lookup misses are the only errors a caller is expected to handle
    /// (e.g. by retrying with another name); everything else aborts the
    /// current calculation.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, SectionError::NotFound { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            SectionError::MeshGeneration { .. } => "MESH_GENERATION",
            SectionError::InvalidArea { .. } => "INVALID_AREA",
            SectionError::PlanarityViolation { .. } => "PLANARITY_VIOLATION",
            SectionError::NotConverged { .. } => "NOT_CONVERGED",
            SectionError::NotFound { .. } => "NOT_FOUND",
            SectionError::InvalidInput { .. } => "INVALID_INPUT",
            SectionError::FileError { .. } => "FILE_ERROR",
            SectionError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for SectionError {
    fn from(e: serde_json::Error) -> Self {
        SectionError::SerializationError {
            reason: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = SectionError::invalid_input("h", "-0.1", "Height must be positive");
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: SectionError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(SectionError::not_found("IPE999").error_code(), "NOT_FOUND");
        assert_eq!(SectionError::mesh_generation("empty").error_code(), "MESH_GENERATION");
        assert_eq!(
            SectionError::InvalidArea { area: 0.0, precision: 0.05 }.error_code(),
            "INVALID_AREA"
        );
    }

    #[test]
    fn test_only_lookup_is_recoverable() {
        assert!(SectionError::not_found("X").is_recoverable());
        assert!(!SectionError::mesh_generation("bad").is_recoverable());
        assert!(!SectionError::PlanarityViolation { point_index: 3, z: 1.0 }.is_recoverable());
    }

    #[test]
    fn test_not_found_message() {
        let e = SectionError::not_found("HEB999");
        assert_eq!(e.to_string(), "Section with name `HEB999` is not found");
    }
}
