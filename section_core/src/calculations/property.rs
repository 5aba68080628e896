//! # Section Properties
//!
//! [`SectionCalculator::calculate`] runs the whole pipeline for one shape:
//!
//! 1. refine the mesh until the area is stable
//! 2. check that every point lies in the section plane
//! 3. evaluate the properties about the base axes of the shape
//! 4. move the mesh to its centroid and evaluate again
//! 5. find the principal angle, turn the mesh onto the principal axes and
//!    evaluate a third time
//!
//! ## Example
//!
//! ```rust
//! use section_core::calculations::SectionCalculator;
//! use section_core::shapes::Rectangle;
//!
//! let calculator = SectionCalculator::default();
//! let property = calculator.calculate(&Rectangle::new(0.100, 0.010)).unwrap();
//!
//! assert!((property.area - 1.0e-3).abs() < 1e-12);
//! let jxx = property.at_center_point.jxx;
//! assert!((jxx - 0.010 * 0.100f64.powi(3) / 12.0).abs() / jxx < 1e-9);
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::moments;
use super::plastic;
use super::principal;
use super::refinement::{refine, MeshSummary};
use crate::equations::radius_of_gyration;
use crate::errors::SectionResult;
use crate::geometry::Mesh;
use crate::mesher::{EarcutMesher, Mesher};
use crate::settings::{CalculationSettings, PrincipalAxisMethod};
use crate::shapes::GeometryProvider;

/// Bending properties in one frame
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BendingProperty {
    /// Second moment about x (m⁴)
    pub jxx: f64,
    /// Extreme fibre distance from the x axis (m)
    pub ymax: f64,
    /// Elastic modulus about x (m³)
    pub wx: f64,
    /// Radius of gyration about x (m)
    pub rx: f64,
    /// First moment about x (m³)
    pub sx: f64,
    /// Plastic modulus about x (m³)
    pub wx_plastic: f64,
    pub jyy: f64,
    pub xmax: f64,
    pub wy: f64,
    pub ry: f64,
    pub wy_plastic: f64,
    /// Product of inertia (m⁴), signed
    pub jxy: f64,
    /// Polar moment Jxx + Jyy (m⁴)
    pub jo: f64,
    /// Polar radius of gyration (m)
    pub ro: f64,
}

impl BendingProperty {
    /// Properties of `mesh` about the axes of its current frame.
    ///
    /// The mesh is turned a quarter turn and back for the y quantities and
    /// ends up where it started.
    pub fn evaluate(mesh: &mut Mesh, area: f64) -> BendingProperty {
        let jxx = moments::jxx(mesh);
        let jyy = moments::jyy(mesh);
        let jxy = moments::clamp_product(moments::jxy(mesh), jxx, jyy);
        let ymax = mesh.max_abs_y();
        let xmax = mesh.max_abs_x();
        let jo = jxx + jyy;

        BendingProperty {
            jxx,
            ymax,
            wx: modulus(jxx, ymax),
            rx: radius_of_gyration(jxx, area),
            sx: moments::sx(mesh),
            wx_plastic: plastic::wx_plastic(mesh),
            jyy,
            xmax,
            wy: modulus(jyy, xmax),
            ry: radius_of_gyration(jyy, area),
            wy_plastic: plastic::wy_plastic(mesh),
            jxy,
            jo,
            ro: radius_of_gyration(jo, area),
        }
    }
}

fn modulus(j: f64, extreme: f64) -> f64 {
    if extreme > 0.0 {
        j / extreme
    } else {
        0.0
    }
}

/// All properties of one section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    /// Identity of the shape
    pub name: String,
    /// Centroid in the base frame (m)
    pub xc: f64,
    pub yc: f64,
    /// Principal angle (rad), in [0, π)
    pub alpha: f64,
    /// Area (m²)
    pub area: f64,
    /// About the axes the shape was drawn in
    pub at_base_point: BendingProperty,
    /// About centroidal axes parallel to the base axes
    pub at_center_point: BendingProperty,
    /// About the principal axes
    pub on_section_axe: BendingProperty,
    /// Refinement that produced the mesh
    pub mesh: MeshSummary,
}

/// Property engine: a mesher plus settings.
#[derive(Debug, Clone)]
pub struct SectionCalculator<M: Mesher = EarcutMesher> {
    mesher: M,
    settings: CalculationSettings,
}

impl Default for SectionCalculator<EarcutMesher> {
    fn default() -> Self {
        SectionCalculator::new(CalculationSettings::default())
    }
}

impl SectionCalculator<EarcutMesher> {
    pub fn new(settings: CalculationSettings) -> Self {
        SectionCalculator { mesher: EarcutMesher::default(), settings }
    }
}

impl<M: Mesher> SectionCalculator<M> {
    pub fn with_mesher(mesher: M, settings: CalculationSettings) -> Self {
        SectionCalculator { mesher, settings }
    }

    pub fn settings(&self) -> &CalculationSettings {
        &self.settings
    }

    pub fn mesher(&self) -> &M {
        &self.mesher
    }

    /// Compute every property of `shape`.
    pub fn calculate<G: GeometryProvider + ?Sized>(&self, shape: &G) -> SectionResult<Property> {
        self.settings.validate()?;
        shape.validate()?;
        let name = shape.identity();
        info!(section = %name, "calculating section properties");

        let refined = refine(shape, &self.mesher, &self.settings)?;
        let summary = refined.summary();
        let area = refined.area;
        let mut mesh = refined.mesh;
        mesh.check_planarity()?;

        let (xc, yc) = mesh.centroid();
        debug!(section = %name, xc, yc, area, "centroid");

        let at_base_point = BendingProperty::evaluate(&mut mesh, area);
        debug!(section = %name, jxx = at_base_point.jxx, jyy = at_base_point.jyy, "base frame");

        mesh.translate(-xc, -yc);
        let at_center_point = BendingProperty::evaluate(&mut mesh, area);
        debug!(
            section = %name,
            jxx = at_center_point.jxx,
            jyy = at_center_point.jyy,
            jxy = at_center_point.jxy,
            "centroid frame"
        );

        let alpha = match self.settings.principal_axis {
            PrincipalAxisMethod::ClosedForm => {
                principal::closed_form_angle(at_center_point.jxx, at_center_point.jyy, at_center_point.jxy)
            }
            PrincipalAxisMethod::Search => principal::search_angle(
                &mesh,
                self.settings.initial_search_step,
                self.settings.search_tolerance,
            ),
        };
        mesh.rotate(-alpha);
        let on_section_axe = BendingProperty::evaluate(&mut mesh, area);
        debug!(
            section = %name,
            alpha,
            method = %self.settings.principal_axis,
            jxx = on_section_axe.jxx,
            jyy = on_section_axe.jyy,
            "principal frame"
        );

        info!(section = %name, area, iterations = summary.iterations, converged = summary.converged, "section properties ready");
        Ok(Property {
            name,
            xc,
            yc,
            alpha,
            area,
            at_base_point,
            at_center_point,
            on_section_axe,
            mesh: summary,
        })
    }
}
