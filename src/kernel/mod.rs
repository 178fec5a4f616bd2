//! Geometry kernel seam
//!
//! The converters never construct or analyse native geometry on their own
//! beyond plain records; shape recognition, planar face creation, region
//! booleans and sweeps all go through [`GeometryKernel`]. [`ReferenceKernel`]
//! is the in-process implementation.

pub mod fit;
pub mod ops;
pub mod planar;

use crate::native::{
    Arc, Brep, Circle, Cone, Curve, Cylinder, Ellipse, Extrusion, Line, Plane, Polyline, Sphere,
    Surface, Torus,
};
use crate::types::Vector3;

/// Operations the converters need from a native geometry kernel
pub trait GeometryKernel {
    /// Line through a curve that is straight within `tolerance`
    fn try_get_line(&self, curve: &Curve, tolerance: f64) -> Option<Line>;

    /// Full circle matching a closed curve
    fn try_get_circle(&self, curve: &Curve, tolerance: f64) -> Option<Circle>;

    /// Arc matching a curve; a closed circular curve gives a full-turn arc
    fn try_get_arc(&self, curve: &Curve, tolerance: f64) -> Option<Arc>;

    /// Vertices of a curve made only of straight pieces
    fn try_get_polyline(&self, curve: &Curve, tolerance: f64) -> Option<Polyline>;

    /// Ellipse matching a closed planar curve
    fn try_get_ellipse(&self, curve: &Curve, tolerance: f64) -> Option<Ellipse>;

    /// Plane containing the curve
    fn try_get_plane(&self, curve: &Curve, tolerance: f64) -> Option<Plane>;

    fn is_planar(&self, curve: &Curve, tolerance: f64) -> bool {
        self.try_get_plane(curve, tolerance).is_some()
    }

    /// Chain curves by their end points
    fn join_curves(&self, curves: &[Curve], tolerance: f64) -> Vec<Curve>;

    /// Planar faces bounded by closed planar curves
    fn create_planar_breps(&self, curves: &[Curve], tolerance: f64) -> Vec<Brep>;

    /// Boundary curves of the region of `outer` not covered by `inners`
    fn boolean_difference(&self, outer: &Curve, inners: &[Curve], tolerance: f64) -> Vec<Curve>;

    /// 3d curve traced on `surface` by a parameter-space curve
    fn pushup(&self, surface: &Surface, curve2d: &Curve, tolerance: f64) -> Option<Curve>;

    /// Surfaces swept by `profile` along a straight rail
    fn sweep_one_rail(&self, profile: &Curve, rail_start: Vector3, rail_end: Vector3) -> Vec<Brep>;

    /// Extrusion of a planar profile along its normal by `height`
    fn create_extrusion(&self, profile: &Curve, height: f64, capped: bool, tolerance: f64) -> Option<Extrusion>;

    fn try_get_sphere(&self, surface: &Surface, tolerance: f64) -> Option<Sphere>;

    fn try_get_torus(&self, surface: &Surface, tolerance: f64) -> Option<Torus>;

    fn try_get_cone(&self, surface: &Surface, tolerance: f64) -> Option<Cone>;

    fn try_get_cylinder(&self, surface: &Surface, tolerance: f64) -> Option<Cylinder>;
}

/// Pure-Rust kernel over the native object model
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceKernel;

impl GeometryKernel for ReferenceKernel {
    fn try_get_line(&self, curve: &Curve, tolerance: f64) -> Option<Line> {
        fit::line(curve, tolerance)
    }

    fn try_get_circle(&self, curve: &Curve, tolerance: f64) -> Option<Circle> {
        fit::circle(curve, tolerance)
    }

    fn try_get_arc(&self, curve: &Curve, tolerance: f64) -> Option<Arc> {
        fit::arc(curve, tolerance)
    }

    fn try_get_polyline(&self, curve: &Curve, tolerance: f64) -> Option<Polyline> {
        fit::polyline(curve, tolerance)
    }

    fn try_get_ellipse(&self, curve: &Curve, tolerance: f64) -> Option<Ellipse> {
        fit::ellipse(curve, tolerance)
    }

    fn try_get_plane(&self, curve: &Curve, tolerance: f64) -> Option<Plane> {
        fit::plane(curve, tolerance)
    }

    fn join_curves(&self, curves: &[Curve], tolerance: f64) -> Vec<Curve> {
        ops::join_curves(curves, tolerance)
    }

    fn create_planar_breps(&self, curves: &[Curve], tolerance: f64) -> Vec<Brep> {
        planar::create_planar_breps(curves, tolerance)
    }

    fn boolean_difference(&self, outer: &Curve, inners: &[Curve], tolerance: f64) -> Vec<Curve> {
        planar::boolean_difference(outer, inners, tolerance)
    }

    fn pushup(&self, surface: &Surface, curve2d: &Curve, tolerance: f64) -> Option<Curve> {
        ops::pushup(surface, curve2d, tolerance)
    }

    fn sweep_one_rail(&self, profile: &Curve, rail_start: Vector3, rail_end: Vector3) -> Vec<Brep> {
        ops::sweep_one_rail(profile, rail_start, rail_end)
    }

    fn create_extrusion(&self, profile: &Curve, height: f64, capped: bool, tolerance: f64) -> Option<Extrusion> {
        ops::create_extrusion(profile, height, capped, tolerance)
    }

    fn try_get_sphere(&self, surface: &Surface, tolerance: f64) -> Option<Sphere> {
        fit::sphere(surface, tolerance)
    }

    fn try_get_torus(&self, surface: &Surface, tolerance: f64) -> Option<Torus> {
        fit::torus(surface, tolerance)
    }

    fn try_get_cone(&self, surface: &Surface, tolerance: f64) -> Option<Cone> {
        fit::cone(surface, tolerance)
    }

    fn try_get_cylinder(&self, surface: &Surface, tolerance: f64) -> Option<Cylinder> {
        fit::cylinder(surface, tolerance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kernel_is_object_safe() {
        let kernel: &dyn GeometryKernel = &ReferenceKernel;
        let line = Curve::line(Vector3::ZERO, Vector3::UNIT_X);
        assert!(kernel.try_get_line(&line, 1e-6).is_some());
        assert!(!kernel.is_planar(&Curve::polyline(vec![Vector3::ZERO]), 1e-6));
    }
}
