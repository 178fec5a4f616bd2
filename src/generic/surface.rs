//! Generic surfaces

use super::curve::Curve;
use super::primitives::{Point, Vector};

/// Planar region bounded by one external and any number of internal curves
#[derive(Debug, Clone, PartialEq)]
pub struct PlanarSurface {
    pub external_boundary: Curve,
    pub internal_boundaries: Vec<Curve>,
}

impl PlanarSurface {
    pub fn new(external_boundary: Curve, internal_boundaries: Vec<Curve>) -> Self {
        PlanarSurface {
            external_boundary,
            internal_boundaries,
        }
    }
}

/// Trim curve of a NURBS surface, in model space and in parameter space
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceTrim {
    pub curve3d: Curve,
    pub curve2d: Curve,
}

/// NURBS surface; control points are u-major and the knots are full vectors
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NurbsSurface {
    pub control_points: Vec<Point>,
    pub weights: Vec<f64>,
    pub u_knots: Vec<f64>,
    pub v_knots: Vec<f64>,
    pub u_degree: usize,
    pub v_degree: usize,
    pub inner_trims: Vec<SurfaceTrim>,
    pub outer_trims: Vec<SurfaceTrim>,
}

impl NurbsSurface {
    /// Control point counts `(u, v)` implied by the knot vectors
    pub fn uv_count(&self) -> (usize, usize) {
        (
            self.u_knots.len().saturating_sub(self.u_degree + 1),
            self.v_knots.len().saturating_sub(self.v_degree + 1),
        )
    }

    pub fn has_trims(&self) -> bool {
        !self.inner_trims.is_empty() || !self.outer_trims.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PolySurface {
    pub surfaces: Vec<Surface>,
}

/// Curve swept along a direction vector
#[derive(Debug, Clone, PartialEq)]
pub struct Extrusion {
    pub curve: Curve,
    pub direction: Vector,
    pub capped: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Surface {
    Planar(PlanarSurface),
    Nurbs(NurbsSurface),
    Poly(PolySurface),
    Extrusion(Extrusion),
}

impl Surface {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Surface::Planar(_) => "PlanarSurface",
            Surface::Nurbs(_) => "NurbsSurface",
            Surface::Poly(_) => "PolySurface",
            Surface::Extrusion(_) => "Extrusion",
        }
    }
}
