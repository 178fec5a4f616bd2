//! Native value primitives: lines, arcs, circles, ellipses and polylines
//!
//! These are plain geometric records. The curve objects in
//! [`curve`](super::curve) wrap them with a parameter domain.

use super::plane::Plane;
use crate::nurbs;
use crate::types::{Interval, Vector3};
use std::f64::consts::TAU;

/// A bounded line segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub from: Vector3,
    pub to: Vector3,
}

impl Line {
    pub fn new(from: Vector3, to: Vector3) -> Self {
        Line { from, to }
    }

    pub fn length(&self) -> f64 {
        self.from.distance(&self.to)
    }

    /// Unnormalized direction `to - from`
    pub fn direction(&self) -> Vector3 {
        self.to - self.from
    }

    /// Point at normalized parameter `t`
    pub fn point_at(&self, t: f64) -> Vector3 {
        self.from.lerp(&self.to, t)
    }

    /// Normalized parameter of the closest point on the infinite line
    pub fn closest_parameter(&self, p: Vector3) -> f64 {
        let d = self.direction();
        let len2 = d.length_squared();
        if len2 == 0.0 {
            0.0
        } else {
            (p - self.from).dot(&d) / len2
        }
    }

    /// Distance from `p` to the infinite line
    pub fn distance_to(&self, p: Vector3) -> f64 {
        p.distance(&self.point_at(self.closest_parameter(p)))
    }
}

/// A full circle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub plane: Plane,
    pub radius: f64,
}

impl Circle {
    pub fn new(plane: Plane, radius: f64) -> Self {
        Circle { plane, radius }
    }

    pub fn center(&self) -> Vector3 {
        self.plane.origin
    }

    pub fn normal(&self) -> Vector3 {
        self.plane.z_axis
    }

    pub fn point_at(&self, angle: f64) -> Vector3 {
        self.plane.origin
            + (self.plane.x_axis * angle.cos() + self.plane.y_axis * angle.sin()) * self.radius
    }

    pub fn circumference(&self) -> f64 {
        TAU * self.radius
    }
}

/// A circular arc: a circle restricted to an angle interval
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arc {
    pub plane: Plane,
    pub radius: f64,
    pub angle: Interval,
}

impl Arc {
    pub fn new(plane: Plane, radius: f64, angle: Interval) -> Self {
        Arc {
            plane,
            radius,
            angle,
        }
    }

    /// Arc through three points, running from `start` through `interior` to `end`
    pub fn from_three_points(start: Vector3, interior: Vector3, end: Vector3) -> Option<Arc> {
        let a = interior - start;
        let b = end - start;
        let axb = a.cross(&b);
        let denom = 2.0 * axb.length_squared();
        if denom < 1e-24 {
            return None;
        }
        let offset = (axb.cross(&a) * b.length_squared() + b.cross(&axb) * a.length_squared()) / denom;
        let center = start + offset;
        let radius = offset.length();

        let normal = (interior - start).cross(&(end - interior)).normalize();
        let x_axis = (start - center).normalize();
        let y_axis = normal.cross(&x_axis).normalize();
        let plane = Plane {
            origin: center,
            x_axis,
            y_axis,
            z_axis: normal,
        };
        let (u, v) = plane.closest_parameter(end);
        let mut sweep = v.atan2(u);
        if sweep <= 0.0 {
            sweep += TAU;
        }
        Some(Arc::new(plane, radius, Interval::new(0.0, sweep)))
    }

    pub fn center(&self) -> Vector3 {
        self.plane.origin
    }

    pub fn point_at(&self, angle: f64) -> Vector3 {
        Circle::new(self.plane, self.radius).point_at(angle)
    }

    pub fn start_point(&self) -> Vector3 {
        self.point_at(self.angle.t0)
    }

    pub fn mid_point(&self) -> Vector3 {
        self.point_at(self.angle.mid())
    }

    pub fn end_point(&self) -> Vector3 {
        self.point_at(self.angle.t1)
    }

    /// Swept angle in radians
    pub fn sweep(&self) -> f64 {
        self.angle.length()
    }

    /// True if the arc sweeps a full turn
    pub fn is_circle(&self) -> bool {
        (self.sweep().abs() - TAU).abs() < 1e-9
    }

    pub fn length(&self) -> f64 {
        self.sweep().abs() * self.radius
    }
}

impl From<Circle> for Arc {
    fn from(circle: Circle) -> Self {
        Arc::new(circle.plane, circle.radius, Interval::new(0.0, TAU))
    }
}

/// An ellipse with `radius1` along the plane's x axis and `radius2` along y
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipse {
    pub plane: Plane,
    pub radius1: f64,
    pub radius2: f64,
}

impl Ellipse {
    pub fn new(plane: Plane, radius1: f64, radius2: f64) -> Self {
        Ellipse {
            plane,
            radius1,
            radius2,
        }
    }

    pub fn center(&self) -> Vector3 {
        self.plane.origin
    }

    pub fn point_at(&self, angle: f64) -> Vector3 {
        self.plane.origin
            + self.plane.x_axis * (self.radius1 * angle.cos())
            + self.plane.y_axis * (self.radius2 * angle.sin())
    }

    /// Exact rational representation: control points, weights, full knots
    pub fn nurbs_form(&self) -> (Vec<Vector3>, Vec<f64>, Vec<f64>) {
        nurbs::arc_control_points(
            self.plane.origin,
            self.plane.x_axis * self.radius1,
            self.plane.y_axis * self.radius2,
            1.0,
            0.0,
            TAU,
        )
    }
}

/// An ordered list of points joined by straight segments
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polyline {
    pub points: Vec<Vector3>,
}

impl Polyline {
    pub fn new(points: Vec<Vector3>) -> Self {
        Polyline { points }
    }

    pub fn segment_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    pub fn segments(&self) -> impl Iterator<Item = Line> + '_ {
        self.points.windows(2).map(|w| Line::new(w[0], w[1]))
    }

    pub fn length(&self) -> f64 {
        self.segments().map(|s| s.length()).sum()
    }

    /// True if first and last points coincide and there are at least 3 segments
    pub fn is_closed(&self, tolerance: f64) -> bool {
        self.points.len() >= 4
            && self.points[0].distance(&self.points[self.points.len() - 1]) <= tolerance
    }
}
