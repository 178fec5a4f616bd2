//! Generic curves and the queries the converters rely on

use super::primitives::{CartesianCoordinateSystem, Point, Vector};
use crate::nurbs;
use crate::types::{arbitrary_axis, Vector3};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub start: Point,
    pub end: Point,
    pub infinite: bool,
}

impl Line {
    pub fn new(start: Point, end: Point) -> Self {
        Line {
            start,
            end,
            infinite: false,
        }
    }

    pub fn length(&self) -> f64 {
        self.start.distance(&self.end)
    }
}

/// Arc in the xy plane of `coordinate_system`, angles measured from its x axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arc {
    pub coordinate_system: CartesianCoordinateSystem,
    pub radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl Arc {
    /// Arc through three points, starting at `start` and passing `mid`
    ///
    /// None for collinear or coincident points.
    pub fn from_three_points(start: Point, mid: Point, end: Point) -> Option<Arc> {
        let a = mid - start;
        let b = end - start;
        let normal = a.cross(&b);
        let n2 = normal.dot(&normal);
        if n2 <= f64::EPSILON * a.dot(&a).max(1.0) * b.dot(&b).max(1.0) {
            return None;
        }
        // circumcentre of the triangle
        let offset = (b.cross(&normal) * a.dot(&a) + normal.cross(&a) * b.dot(&b)) * (0.5 / n2);
        let centre = start + offset;
        let radius = offset.length();
        let x = (start - centre).normalise();
        let z = normal.normalise();
        let coordinate_system = CartesianCoordinateSystem {
            origin: centre,
            x,
            y: z.cross(&x),
            z,
        };
        let angle_of = |p: Point| {
            let d = p - centre;
            let t = d.dot(&coordinate_system.y).atan2(d.dot(&x));
            if t < 0.0 {
                t + std::f64::consts::TAU
            } else {
                t
            }
        };
        Some(Arc {
            coordinate_system,
            radius,
            start_angle: 0.0,
            end_angle: angle_of(end),
        })
    }

    pub fn point_at_angle(&self, angle: f64) -> Point {
        let cs = &self.coordinate_system;
        cs.origin + cs.x * (self.radius * angle.cos()) + cs.y * (self.radius * angle.sin())
    }

    pub fn start_point(&self) -> Point {
        self.point_at_angle(self.start_angle)
    }

    pub fn end_point(&self) -> Point {
        self.point_at_angle(self.end_angle)
    }

    pub fn sweep(&self) -> f64 {
        self.end_angle - self.start_angle
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub centre: Point,
    pub normal: Vector,
    pub radius: f64,
}

impl Circle {
    /// In-plane x axis derived from the normal
    pub fn reference_axis(&self) -> Vector {
        let (x, _) = arbitrary_axis(Vector3::new(self.normal.x, self.normal.y, self.normal.z));
        Vector::new(x.x, x.y, x.z)
    }

    pub fn start_point(&self) -> Point {
        self.centre + self.reference_axis() * self.radius
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipse {
    pub centre: Point,
    pub axis1: Vector,
    pub axis2: Vector,
    pub radius1: f64,
    pub radius2: f64,
}

impl Ellipse {
    pub fn start_point(&self) -> Point {
        self.centre + self.axis1.normalise() * self.radius1
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polyline {
    pub control_points: Vec<Point>,
}

impl Polyline {
    pub fn new(control_points: Vec<Point>) -> Self {
        Polyline { control_points }
    }
}

/// NURBS curve with a full (`points + degree + 1`) knot vector
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NurbsCurve {
    pub control_points: Vec<Point>,
    pub weights: Vec<f64>,
    pub knots: Vec<f64>,
}

impl NurbsCurve {
    /// Degree implied by the knot and point counts
    pub fn degree(&self) -> usize {
        (self.knots.len() + 1)
            .saturating_sub(self.control_points.len())
            .saturating_sub(2)
    }

    pub fn is_valid(&self) -> bool {
        self.weights.len() == self.control_points.len()
            && self.weights.iter().all(|w| *w > 0.0)
            && nurbs::validate_knots(&self.knots, self.control_points.len(), self.degree())
    }

    fn homogeneous(&self) -> Vec<nurbs::Homogeneous> {
        self.control_points
            .iter()
            .zip(&self.weights)
            .map(|(p, w)| nurbs::to_homogeneous(Vector3::new(p.x, p.y, p.z), *w))
            .collect()
    }

    /// Point at parameter `t`; None for a malformed curve
    pub fn point_at(&self, t: f64) -> Option<Point> {
        if !self.is_valid() {
            return None;
        }
        let p = nurbs::evaluate_curve(&self.homogeneous(), &self.knots, self.degree(), t);
        Some(Point::new(p.x, p.y, p.z))
    }

    pub fn domain(&self) -> Option<(f64, f64)> {
        self.is_valid()
            .then(|| nurbs::parameter_domain(&self.knots, self.control_points.len(), self.degree()))
    }
}

/// Contiguous chain of curves
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PolyCurve {
    pub curves: Vec<Curve>,
}

impl PolyCurve {
    pub fn new(curves: Vec<Curve>) -> Self {
        PolyCurve { curves }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Curve {
    Line(Line),
    Arc(Arc),
    Circle(Circle),
    Ellipse(Ellipse),
    Polyline(Polyline),
    Nurbs(NurbsCurve),
    Poly(PolyCurve),
}

impl Curve {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Curve::Line(_) => "Line",
            Curve::Arc(_) => "Arc",
            Curve::Circle(_) => "Circle",
            Curve::Ellipse(_) => "Ellipse",
            Curve::Polyline(_) => "Polyline",
            Curve::Nurbs(_) => "NurbsCurve",
            Curve::Poly(_) => "PolyCurve",
        }
    }

    pub fn start_point(&self) -> Option<Point> {
        match self {
            Curve::Line(l) => Some(l.start),
            Curve::Arc(a) => Some(a.start_point()),
            Curve::Circle(c) => Some(c.start_point()),
            Curve::Ellipse(e) => Some(e.start_point()),
            Curve::Polyline(p) => p.control_points.first().copied(),
            Curve::Nurbs(n) => n.domain().and_then(|(t0, _)| n.point_at(t0)),
            Curve::Poly(p) => p.curves.first().and_then(Curve::start_point),
        }
    }

    pub fn end_point(&self) -> Option<Point> {
        match self {
            Curve::Line(l) => Some(l.end),
            Curve::Arc(a) => Some(a.end_point()),
            Curve::Circle(c) => Some(c.start_point()),
            Curve::Ellipse(e) => Some(e.start_point()),
            Curve::Polyline(p) => p.control_points.last().copied(),
            Curve::Nurbs(n) => n.domain().and_then(|(_, t1)| n.point_at(t1)),
            Curve::Poly(p) => p.curves.last().and_then(Curve::end_point),
        }
    }

    pub fn is_closed(&self, tolerance: f64) -> bool {
        match self {
            Curve::Circle(_) | Curve::Ellipse(_) => true,
            Curve::Line(_) => false,
            _ => match (self.start_point(), self.end_point()) {
                (Some(s), Some(e)) => s.distance(&e) <= tolerance,
                _ => false,
            },
        }
    }

    /// Same geometry traversed the other way
    pub fn reversed(&self) -> Curve {
        match self {
            Curve::Line(l) => Curve::Line(Line {
                start: l.end,
                end: l.start,
                infinite: l.infinite,
            }),
            Curve::Arc(a) => {
                // mirror the frame so angles run backwards
                let cs = a.coordinate_system;
                Curve::Arc(Arc {
                    coordinate_system: CartesianCoordinateSystem {
                        origin: cs.origin,
                        x: cs.x,
                        y: -cs.y,
                        z: -cs.z,
                    },
                    radius: a.radius,
                    start_angle: -a.end_angle,
                    end_angle: -a.start_angle,
                })
            }
            Curve::Circle(c) => Curve::Circle(Circle {
                normal: -c.normal,
                ..*c
            }),
            Curve::Ellipse(e) => Curve::Ellipse(Ellipse {
                axis2: -e.axis2,
                ..*e
            }),
            Curve::Polyline(p) => {
                Curve::Polyline(Polyline::new(p.control_points.iter().rev().copied().collect()))
            }
            Curve::Nurbs(n) => {
                let (a, b) = match (n.knots.first(), n.knots.last()) {
                    (Some(a), Some(b)) => (*a, *b),
                    _ => return self.clone(),
                };
                Curve::Nurbs(NurbsCurve {
                    control_points: n.control_points.iter().rev().copied().collect(),
                    weights: n.weights.iter().rev().copied().collect(),
                    knots: n.knots.iter().rev().map(|k| a + b - k).collect(),
                })
            }
            Curve::Poly(p) => Curve::Poly(PolyCurve::new(p.curves.iter().rev().map(Curve::reversed).collect())),
        }
    }

    /// Leaf curves with all poly-curve nesting removed
    pub fn sub_parts(&self) -> Vec<Curve> {
        match self {
            Curve::Poly(p) => p.curves.iter().flat_map(Curve::sub_parts).collect(),
            other => vec![other.clone()],
        }
    }
}
