//! Analytic native solids and their boundary representations

use super::brep::{Brep, BREP_TOLERANCE};
use super::curve::Curve;
use super::plane::Plane;
use super::primitives::{Arc, Circle, Line};
use super::surface::{RevSurface, Surface};
use crate::types::{Interval, Vector3};
use std::f64::consts::{FRAC_PI_2, PI, TAU};

/// Sphere around the origin of its equatorial plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub plane: Plane,
    pub radius: f64,
}

impl Sphere {
    pub fn new(center: Vector3, radius: f64) -> Self {
        Sphere {
            plane: Plane { origin: center, ..Plane::world_xy() },
            radius,
        }
    }

    pub fn center(&self) -> Vector3 {
        self.plane.origin
    }

    pub fn is_valid(&self) -> bool {
        self.radius > 0.0 && self.plane.is_valid()
    }

    pub fn volume(&self) -> f64 {
        4.0 / 3.0 * PI * self.radius.powi(3)
    }

    /// Meridian arc from the south pole to the north pole
    pub fn profile(&self) -> Curve {
        let p = self.plane;
        let meridian = Plane::from_frame(p.origin, p.x_axis, p.z_axis);
        Curve::arc(Arc::new(meridian, self.radius, Interval::new(-FRAC_PI_2, FRAC_PI_2)))
    }

    pub fn to_brep(&self) -> Brep {
        Brep::from_surface(Surface::Revolution(RevSurface::new(
            self.profile(),
            Line::new(self.center(), self.center() + self.plane.z_axis),
            Interval::new(0.0, TAU),
        )))
    }
}

/// Torus in `plane`, centred on its origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Torus {
    pub plane: Plane,
    pub major_radius: f64,
    pub minor_radius: f64,
}

impl Torus {
    pub fn new(plane: Plane, major_radius: f64, minor_radius: f64) -> Self {
        Torus {
            plane,
            major_radius,
            minor_radius,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.minor_radius > 0.0 && self.major_radius > self.minor_radius && self.plane.is_valid()
    }

    pub fn volume(&self) -> f64 {
        2.0 * PI * PI * self.major_radius * self.minor_radius.powi(2)
    }

    pub fn to_brep(&self) -> Brep {
        let p = self.plane;
        let tube = Plane::from_frame(p.origin + p.x_axis * self.major_radius, p.x_axis, p.z_axis);
        let profile = Curve::arc(Arc::new(tube, self.minor_radius, Interval::new(0.0, TAU)));
        Brep::from_surface(Surface::Revolution(RevSurface::new(
            profile,
            Line::new(p.origin, p.origin + p.z_axis),
            Interval::new(0.0, TAU),
        )))
    }
}

/// Right circular cone
///
/// The plane origin is the apex and the plane z axis points from the apex
/// towards the base, which lies `height` away.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cone {
    pub plane: Plane,
    pub height: f64,
    pub radius: f64,
}

impl Cone {
    pub fn new(plane: Plane, height: f64, radius: f64) -> Self {
        Cone {
            plane,
            height,
            radius,
        }
    }

    pub fn apex(&self) -> Vector3 {
        self.plane.origin
    }

    pub fn base_point(&self) -> Vector3 {
        self.plane.origin + self.plane.z_axis * self.height
    }

    pub fn axis(&self) -> Vector3 {
        self.plane.z_axis
    }

    pub fn is_valid(&self) -> bool {
        self.height > 0.0 && self.radius > 0.0 && self.plane.is_valid()
    }

    pub fn volume(&self) -> f64 {
        PI * self.radius * self.radius * self.height / 3.0
    }

    pub fn to_brep(&self) -> Brep {
        let p = self.plane;
        let base = self.base_point();
        let rim = base + p.x_axis * self.radius;
        let mut brep = Brep::from_surface(Surface::Revolution(RevSurface::new(
            Curve::line(self.apex(), rim),
            Line::new(self.apex(), base),
            Interval::new(0.0, TAU),
        )));
        let cap_plane = Plane { origin: base, ..p };
        let cap = Curve::arc(Circle::new(cap_plane, self.radius).into());
        brep.append(&Brep::from_planar_loops(cap_plane, &cap, &[], BREP_TOLERANCE));
        brep.join_naked_edges(BREP_TOLERANCE);
        brep
    }
}

/// Cylinder over `circle` between two heights along the circle normal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cylinder {
    pub circle: Circle,
    pub height1: f64,
    pub height2: f64,
}

impl Cylinder {
    pub fn new(circle: Circle, height1: f64, height2: f64) -> Self {
        Cylinder {
            circle,
            height1,
            height2,
        }
    }

    pub fn axis(&self) -> Vector3 {
        self.circle.normal()
    }

    pub fn total_height(&self) -> f64 {
        self.height2 - self.height1
    }

    pub fn is_finite(&self) -> bool {
        self.height1 != self.height2 && self.height1.is_finite() && self.height2.is_finite()
    }

    pub fn is_valid(&self) -> bool {
        self.circle.radius > 0.0 && self.is_finite() && self.circle.plane.is_valid()
    }

    pub fn volume(&self) -> f64 {
        PI * self.circle.radius.powi(2) * self.total_height().abs()
    }

    pub fn circle_at(&self, height: f64) -> Circle {
        let p = self.circle.plane;
        Circle::new(
            Plane {
                origin: p.origin + p.z_axis * height,
                ..p
            },
            self.circle.radius,
        )
    }

    pub fn to_brep(&self) -> Brep {
        let (h1, h2) = (self.height1.min(self.height2), self.height1.max(self.height2));
        let (bottom, top) = (self.circle_at(h1), self.circle_at(h2));
        let x = self.circle.plane.x_axis * self.circle.radius;
        let mut brep = Brep::from_surface(Surface::Revolution(RevSurface::new(
            Curve::line(bottom.center() + x, top.center() + x),
            Line::new(bottom.center(), top.center()),
            Interval::new(0.0, TAU),
        )));
        let bottom_plane = bottom.plane.flipped();
        let bottom_curve = Curve::arc(Circle::new(bottom_plane, bottom.radius).into());
        let top_curve = Curve::arc(top.into());
        brep.append(&Brep::from_planar_loops(bottom_plane, &bottom_curve, &[], BREP_TOLERANCE));
        brep.append(&Brep::from_planar_loops(top.plane, &top_curve, &[], BREP_TOLERANCE));
        brep.join_naked_edges(BREP_TOLERANCE);
        brep
    }
}

/// Axis-aligned box in the frame of `plane`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NativeBox {
    pub plane: Plane,
    pub x: Interval,
    pub y: Interval,
    pub z: Interval,
}

impl NativeBox {
    pub fn new(plane: Plane, x: Interval, y: Interval, z: Interval) -> Self {
        NativeBox { plane, x, y, z }
    }

    pub fn is_valid(&self) -> bool {
        self.x.length() != 0.0 && self.y.length() != 0.0 && self.z.length() != 0.0 && self.plane.is_valid()
    }

    pub fn volume(&self) -> f64 {
        (self.x.length() * self.y.length() * self.z.length()).abs()
    }

    pub fn point_at(&self, x: f64, y: f64, z: f64) -> Vector3 {
        self.plane.from_local(Vector3::new(x, y, z))
    }

    pub fn center(&self) -> Vector3 {
        self.point_at(self.x.mid(), self.y.mid(), self.z.mid())
    }

    pub fn to_brep(&self) -> Brep {
        let (x0, x1) = (self.x.min(), self.x.max());
        let (y0, y1) = (self.y.min(), self.y.max());
        let (z0, z1) = (self.z.min(), self.z.max());
        let (ax, ay, az) = (self.plane.x_axis, self.plane.y_axis, self.plane.z_axis);
        let c = |x, y, z| self.point_at(x, y, z);
        // (outward frame, four corners) per face
        let faces = [
            ((ay, ax), [c(x0, y0, z0), c(x1, y0, z0), c(x1, y1, z0), c(x0, y1, z0)]),
            ((ax, ay), [c(x0, y0, z1), c(x1, y0, z1), c(x1, y1, z1), c(x0, y1, z1)]),
            ((ax, az), [c(x0, y0, z0), c(x1, y0, z0), c(x1, y0, z1), c(x0, y0, z1)]),
            ((az, ax), [c(x0, y1, z0), c(x1, y1, z0), c(x1, y1, z1), c(x0, y1, z1)]),
            ((az, ay), [c(x0, y0, z0), c(x0, y1, z0), c(x0, y1, z1), c(x0, y0, z1)]),
            ((ay, az), [c(x1, y0, z0), c(x1, y1, z0), c(x1, y1, z1), c(x1, y0, z1)]),
        ];
        let mut brep = Brep::new();
        for ((u, v), corners) in faces {
            let plane = Plane::from_frame(corners[0], u, v);
            let mut pts = corners.to_vec();
            pts.push(corners[0]);
            brep.append(&Brep::from_planar_loops(plane, &Curve::polyline(pts), &[], BREP_TOLERANCE));
        }
        brep.join_naked_edges(BREP_TOLERANCE);
        brep
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_solid(brep: &Brep, faces: usize, volume: f64, tol: f64) {
        let (valid, log) = brep.is_valid_with_log();
        assert!(valid, "{log}");
        assert_eq!(brep.faces.len(), faces);
        assert!(brep.is_solid());
        assert!((brep.volume() - volume).abs() < tol, "volume {}", brep.volume());
    }

    #[test]
    fn test_sphere_brep() {
        let s = Sphere::new(Vector3::new(1.0, 2.0, 3.0), 2.0);
        assert_solid(&s.to_brep(), 1, s.volume(), 0.2);
    }

    #[test]
    fn test_torus_brep() {
        let t = Torus::new(Plane::world_xy(), 3.0, 1.0);
        let brep = t.to_brep();
        assert_eq!(brep.edges.len(), 2);
        assert_solid(&brep, 1, t.volume(), 0.5);
    }

    #[test]
    fn test_cone_brep() {
        let c = Cone::new(Plane::world_xy(), 2.0, 1.0);
        let brep = c.to_brep();
        assert_eq!(brep.surfaces.len(), 2);
        assert_solid(&brep, 2, c.volume(), 0.05);
    }

    #[test]
    fn test_cylinder_brep() {
        let c = Cylinder::new(Circle::new(Plane::world_xy(), 1.0), 0.0, 2.0);
        let brep = c.to_brep();
        assert_eq!(brep.surfaces.len(), 3);
        assert_solid(&brep, 3, c.volume(), 0.05);
    }

    #[test]
    fn test_box_brep() {
        let b = NativeBox::new(
            Plane::world_xy(),
            Interval::new(0.0, 1.0),
            Interval::new(0.0, 2.0),
            Interval::new(0.0, 3.0),
        );
        let brep = b.to_brep();
        assert_eq!(brep.edges.len(), 12);
        assert_eq!(brep.vertices.len(), 8);
        assert_solid(&brep, 6, 6.0, 1e-9);
    }
}
