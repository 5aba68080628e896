//! # Calculation Settings
//!
//! Tunables of the property engine. Every field has a default, so a settings
//! file only needs to name what it changes:
//!
//! ```json
//! { "on_non_convergence": "Error", "principal_axis": "Search" }
//! ```
//!
//! ## Example
//!
//! ```rust
//! use section_core::settings::{CalculationSettings, NonConvergencePolicy};
//!
//! let settings: CalculationSettings =
//!     serde_json::from_str(r#"{ "on_non_convergence": "Error" }"#).unwrap();
//! assert_eq!(settings.on_non_convergence, NonConvergencePolicy::Error);
//! assert_eq!(settings.max_iterations, 200);
//! assert!(settings.validate().is_ok());
//! ```

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::errors::{SectionError, SectionResult};

/// What the refinement loop does when it reaches `max_iterations` without a
/// stable area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NonConvergencePolicy {
    /// Keep the last mesh, log a warning and mark the result as not converged
    #[default]
    Accept,
    /// Fail with [`SectionError::NotConverged`]
    Error,
}

/// How the principal axis angle is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PrincipalAxisMethod {
    /// Closed-form angle from the centroidal Jxx, Jyy and Jxy
    #[default]
    ClosedForm,
    /// Multi-resolution grid search for the angle of minimum Jxx
    Search,
}

impl std::fmt::Display for PrincipalAxisMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PrincipalAxisMethod::ClosedForm => write!(f, "closed form"),
            PrincipalAxisMethod::Search => write!(f, "search"),
        }
    }
}

/// Engine configuration, loaded from JSON via [`crate::file_io::load_settings`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculationSettings {
    /// Element size before the first halving, in the shape's length units
    pub initial_precision: f64,

    /// Hard cap on refinement iterations
    pub max_iterations: usize,

    /// Convergence is not accepted before this many iterations have run
    pub min_iterations: usize,

    /// Relative area change below which the mesh counts as converged
    pub area_tolerance: f64,

    /// Behaviour when `max_iterations` is reached without convergence
    pub on_non_convergence: NonConvergencePolicy,

    /// Principal angle strategy
    pub principal_axis: PrincipalAxisMethod,

    /// First angular step of the principal axis search (radians)
    pub initial_search_step: f64,

    /// The search stops once its step falls below this (radians)
    pub search_tolerance: f64,
}

impl Default for CalculationSettings {
    fn default() -> Self {
        CalculationSettings {
            initial_precision: 0.1,
            max_iterations: 200,
            min_iterations: 6,
            area_tolerance: 1e-6,
            on_non_convergence: NonConvergencePolicy::Accept,
            principal_axis: PrincipalAxisMethod::ClosedForm,
            initial_search_step: PI / 8.0,
            search_tolerance: 1e-6,
        }
    }
}

impl CalculationSettings {
    /// Check that all values are usable by the engine.
    pub fn validate(&self) -> SectionResult<()> {
        if !(self.initial_precision.is_finite() && self.initial_precision > 0.0) {
            return Err(SectionError::invalid_input(
                "initial_precision",
                self.initial_precision.to_string(),
                "Initial precision must be positive",
            ));
        }
        if self.max_iterations < 2 {
            return Err(SectionError::invalid_input(
                "max_iterations",
                self.max_iterations.to_string(),
                "At least two iterations are needed to compare areas",
            ));
        }
        if self.min_iterations > self.max_iterations {
            return Err(SectionError::invalid_input(
                "min_iterations",
                self.min_iterations.to_string(),
                format!("Must not exceed max_iterations ({})", self.max_iterations),
            ));
        }
        if !(self.area_tolerance > 0.0 && self.area_tolerance < 1.0) {
            return Err(SectionError::invalid_input(
                "area_tolerance",
                self.area_tolerance.to_string(),
                "Tolerance must be between 0 and 1",
            ));
        }
        if !(self.initial_search_step > 0.0 && self.initial_search_step <= PI / 2.0) {
            return Err(SectionError::invalid_input(
                "initial_search_step",
                self.initial_search_step.to_string(),
                "Search step must be in (0, pi/2]",
            ));
        }
        if !(self.search_tolerance > 0.0 && self.search_tolerance < self.initial_search_step) {
            return Err(SectionError::invalid_input(
                "search_tolerance",
                self.search_tolerance.to_string(),
                "Search tolerance must be positive and below the initial step",
            ));
        }
        Ok(())
    }
}
