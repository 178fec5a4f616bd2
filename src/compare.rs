//! Tolerance-based equality between generic and native values
//!
//! Used to check that a conversion preserved what it was given. Every
//! comparison is component-wise within one tolerance; counts of points,
//! weights, knots or segments must match exactly.

use crate::generic as g;
use crate::native as n;
use crate::types::Vector3;

/// Equality of a generic value with its native counterpart
pub trait IsEqual<Native: ?Sized> {
    fn is_equal(&self, native: &Native, tolerance: f64) -> bool;
}

fn close(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() <= tolerance
}

fn all_close(a: &[f64], b: &[f64], tolerance: f64) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| close(*x, *y, tolerance))
}

fn all_points<P: IsEqual<Vector3>>(a: &[P], b: &[Vector3], tolerance: f64) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.is_equal(y, tolerance))
}

/// Generic point against a native location
fn at(p: &g::Point, v: &Vector3, tolerance: f64) -> bool {
    close(p.x, v.x, tolerance) && close(p.y, v.y, tolerance) && close(p.z, v.z, tolerance)
}

impl IsEqual<Vector3> for g::Point {
    fn is_equal(&self, v: &Vector3, tolerance: f64) -> bool {
        at(self, v, tolerance)
    }
}

impl IsEqual<Vector3> for g::Vector {
    fn is_equal(&self, v: &Vector3, tolerance: f64) -> bool {
        close(self.x, v.x, tolerance) && close(self.y, v.y, tolerance) && close(self.z, v.z, tolerance)
    }
}

impl IsEqual<n::Plane> for g::Plane {
    fn is_equal(&self, plane: &n::Plane, tolerance: f64) -> bool {
        at(&self.origin, &plane.origin, tolerance) && self.normal.normalise().is_equal(&plane.z_axis, tolerance)
    }
}

impl IsEqual<n::Plane> for g::CartesianCoordinateSystem {
    fn is_equal(&self, plane: &n::Plane, tolerance: f64) -> bool {
        at(&self.origin, &plane.origin, tolerance)
            && self.x.is_equal(&plane.x_axis, tolerance)
            && self.y.is_equal(&plane.y_axis, tolerance)
            && self.z.is_equal(&plane.z_axis, tolerance)
    }
}

impl IsEqual<n::Line> for g::Line {
    fn is_equal(&self, line: &n::Line, tolerance: f64) -> bool {
        at(&self.start, &line.from, tolerance) && at(&self.end, &line.to, tolerance)
    }
}

impl IsEqual<n::Arc> for g::Arc {
    fn is_equal(&self, arc: &n::Arc, tolerance: f64) -> bool {
        self.coordinate_system.is_equal(&arc.plane, tolerance)
            && close(self.radius, arc.radius, tolerance)
            && close(self.start_angle, arc.angle.t0, tolerance)
            && close(self.end_angle, arc.angle.t1, tolerance)
    }
}

impl IsEqual<n::Circle> for g::Circle {
    fn is_equal(&self, circle: &n::Circle, tolerance: f64) -> bool {
        at(&self.centre, &circle.center(), tolerance)
            && self.normal.normalise().is_equal(&circle.normal(), tolerance)
            && close(self.radius, circle.radius, tolerance)
    }
}

impl IsEqual<n::Ellipse> for g::Ellipse {
    fn is_equal(&self, ellipse: &n::Ellipse, tolerance: f64) -> bool {
        at(&self.centre, &ellipse.center(), tolerance)
            && self.axis1.normalise().is_equal(&ellipse.plane.x_axis, tolerance)
            && self.axis2.normalise().is_equal(&ellipse.plane.y_axis, tolerance)
            && close(self.radius1, ellipse.radius1, tolerance)
            && close(self.radius2, ellipse.radius2, tolerance)
    }
}

impl IsEqual<n::Polyline> for g::Polyline {
    fn is_equal(&self, polyline: &n::Polyline, tolerance: f64) -> bool {
        all_points(&self.control_points, &polyline.points, tolerance)
    }
}

impl IsEqual<n::NurbsCurve> for g::NurbsCurve {
    fn is_equal(&self, nurbs: &n::NurbsCurve, tolerance: f64) -> bool {
        all_points(&self.control_points, &nurbs.locations(), tolerance)
            && all_close(&self.weights, &nurbs.weights(), tolerance)
            && all_close(&self.knots, &nurbs.full_knots(), tolerance)
    }
}

impl IsEqual<n::PolyCurve> for g::PolyCurve {
    fn is_equal(&self, poly: &n::PolyCurve, tolerance: f64) -> bool {
        let mine: Vec<g::Curve> = self.curves.iter().flat_map(g::Curve::sub_parts).collect();
        let theirs = poly.remove_nesting().segments;
        mine.len() == theirs.len() && mine.iter().zip(&theirs).all(|(a, b)| a.is_equal(b, tolerance))
    }
}

impl IsEqual<n::Curve> for g::Curve {
    fn is_equal(&self, curve: &n::Curve, tolerance: f64) -> bool {
        match (self, curve) {
            (g::Curve::Line(l), n::Curve::Line(c)) => l.is_equal(&c.line, tolerance),
            (g::Curve::Arc(a), n::Curve::Arc(c)) => a.is_equal(&c.arc, tolerance),
            (g::Curve::Circle(circle), n::Curve::Arc(c)) => {
                c.is_completed_circle() && circle.is_equal(&n::Circle::new(c.arc.plane, c.arc.radius), tolerance)
            }
            (g::Curve::Ellipse(e), n::Curve::Nurbs(c)) => {
                let plane = n::Plane::from_frame(e.centre.into(), e.axis1.into(), e.axis2.into());
                let (points, weights, knots) = n::Ellipse::new(plane, e.radius1, e.radius2).nurbs_form();
                c.locations().len() == points.len()
                    && c.locations().iter().zip(&points).all(|(a, b)| a.almost_equal(b, tolerance))
                    && all_close(&weights, &c.weights(), tolerance)
                    && all_close(&knots, &c.full_knots(), tolerance)
            }
            (g::Curve::Polyline(p), n::Curve::Polyline(c)) => all_points(&p.control_points, &c.points, tolerance),
            (g::Curve::Nurbs(a), n::Curve::Nurbs(b)) => a.is_equal(b, tolerance),
            (g::Curve::Poly(a), n::Curve::Poly(b)) => a.is_equal(b, tolerance),
            _ => false,
        }
    }
}

impl IsEqual<n::Mesh> for g::Mesh {
    fn is_equal(&self, mesh: &n::Mesh, tolerance: f64) -> bool {
        all_points(&self.vertices, &mesh.vertices, tolerance)
            && self.faces.len() == mesh.faces.len()
            && self.faces.iter().zip(&mesh.faces).all(|(a, b)| a.indices() == b.indices())
    }
}

impl IsEqual<n::Sphere> for g::Sphere {
    fn is_equal(&self, sphere: &n::Sphere, tolerance: f64) -> bool {
        at(&self.centre, &sphere.center(), tolerance) && close(self.radius, sphere.radius, tolerance)
    }
}
