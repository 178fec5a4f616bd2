//! Native surface objects

use super::curve::Curve;
use super::plane::Plane;
use super::primitives::Line;
use crate::nurbs::{self, Homogeneous};
use crate::types::{Interval, Transform, Vector3};

/// A rectangular patch of a plane
#[derive(Debug, Clone, PartialEq)]
pub struct PlaneSurface {
    pub plane: Plane,
    pub u: Interval,
    pub v: Interval,
}

impl PlaneSurface {
    pub fn new(plane: Plane, u: Interval, v: Interval) -> Self {
        PlaneSurface { plane, u, v }
    }
}

/// Tensor-product NURBS surface
///
/// Knots are stored in native form. Control points are homogeneous and laid
/// out u-major: index `i * v_count + j`.
#[derive(Debug, Clone, PartialEq)]
pub struct NurbsSurface {
    pub degree_u: usize,
    pub degree_v: usize,
    pub u_count: usize,
    pub v_count: usize,
    pub knots_u: Vec<f64>,
    pub knots_v: Vec<f64>,
    pub cvs: Vec<Homogeneous>,
}

impl NurbsSurface {
    /// Build from euclidean points (u-major), weights and full knot vectors
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        degree_u: usize,
        degree_v: usize,
        u_count: usize,
        v_count: usize,
        points: &[Vector3],
        weights: &[f64],
        full_knots_u: &[f64],
        full_knots_v: &[f64],
    ) -> Option<Self> {
        if points.len() != u_count * v_count
            || weights.len() != points.len()
            || !nurbs::validate_knots(full_knots_u, u_count, degree_u)
            || !nurbs::validate_knots(full_knots_v, v_count, degree_v)
        {
            return None;
        }
        Some(NurbsSurface {
            degree_u,
            degree_v,
            u_count,
            v_count,
            knots_u: nurbs::native_knots(full_knots_u),
            knots_v: nurbs::native_knots(full_knots_v),
            cvs: points
                .iter()
                .zip(weights)
                .map(|(p, w)| nurbs::to_homogeneous(*p, *w))
                .collect(),
        })
    }

    pub fn full_knots_u(&self) -> Vec<f64> {
        nurbs::full_knots(&self.knots_u)
    }

    pub fn full_knots_v(&self) -> Vec<f64> {
        nurbs::full_knots(&self.knots_v)
    }

    pub fn location(&self, u_index: usize, v_index: usize) -> Vector3 {
        nurbs::from_homogeneous(self.cvs[u_index * self.v_count + v_index])
    }

    pub fn weight(&self, u_index: usize, v_index: usize) -> f64 {
        self.cvs[u_index * self.v_count + v_index][3]
    }

    pub fn is_valid(&self) -> bool {
        self.cvs.len() == self.u_count * self.v_count
            && nurbs::validate_knots(&self.full_knots_u(), self.u_count, self.degree_u)
            && nurbs::validate_knots(&self.full_knots_v(), self.v_count, self.degree_v)
            && self.cvs.iter().all(|cv| cv[3] > 0.0)
    }

    pub fn domain(&self, direction: usize) -> Interval {
        let (knots, count, degree) = if direction == 0 {
            (&self.knots_u, self.u_count, self.degree_u)
        } else {
            (&self.knots_v, self.v_count, self.degree_v)
        };
        if degree == 0 || knots.len() < count {
            return Interval::new(0.0, 0.0);
        }
        Interval::new(knots[degree - 1], knots[count - 1])
    }

    pub fn point_at(&self, u: f64, v: f64) -> Vector3 {
        if !self.is_valid() {
            return Vector3::ZERO;
        }
        nurbs::evaluate_surface(
            &self.cvs,
            self.u_count,
            self.v_count,
            &self.full_knots_u(),
            &self.full_knots_v(),
            self.degree_u,
            self.degree_v,
            u,
            v,
        )
    }

    /// Iso-curve at fixed `v` (direction 0) or fixed `u` (direction 1)
    pub fn iso_curve(&self, direction: usize, constant: f64) -> Option<super::NurbsCurve> {
        if !self.is_valid() {
            return None;
        }
        let (count, degree, knots) = if direction == 0 {
            (self.u_count, self.degree_u, self.full_knots_u())
        } else {
            (self.v_count, self.degree_v, self.full_knots_v())
        };
        // collapse the other direction by evaluating its basis at `constant`
        let (other_count, other_degree, other_knots) = if direction == 0 {
            (self.v_count, self.degree_v, self.full_knots_v())
        } else {
            (self.u_count, self.degree_u, self.full_knots_u())
        };
        let span = nurbs::find_span(&other_knots, other_count - 1, other_degree, constant);
        let basis = nurbs::basis_functions(&other_knots, span, other_degree, constant);
        let points: Vec<Homogeneous> = (0..count)
            .map(|i| {
                let mut acc = [0.0; 4];
                for (k, b) in basis.iter().enumerate() {
                    let j = span - other_degree + k;
                    let idx = if direction == 0 {
                        i * self.v_count + j
                    } else {
                        j * self.v_count + i
                    };
                    for c in 0..4 {
                        acc[c] += b * self.cvs[idx][c];
                    }
                }
                acc
            })
            .collect();
        Some(super::NurbsCurve::from_homogeneous(degree, points, &knots))
    }
}

/// Surface of revolution: `profile` swept around `axis` through `angle`
///
/// The u parameter is the rotation angle, v follows the profile.
#[derive(Debug, Clone, PartialEq)]
pub struct RevSurface {
    pub profile: Curve,
    pub axis: Line,
    pub angle: Interval,
}

impl RevSurface {
    pub fn new(profile: Curve, axis: Line, angle: Interval) -> Self {
        RevSurface {
            profile,
            axis,
            angle,
        }
    }

    pub fn axis_direction(&self) -> Vector3 {
        self.axis.direction().normalize()
    }

    pub fn point_at(&self, u: f64, v: f64) -> Vector3 {
        let p = self.profile.point_at(v);
        Transform::rotation(u, self.axis_direction(), self.axis.from).transform_point(p)
    }

    fn to_nurbs(&self) -> Option<NurbsSurface> {
        let profile = self.profile.to_nurbs()?;
        let axis = self.axis_direction();
        let (circle, circle_weights, circle_knots) =
            nurbs::arc_control_points(Vector3::ZERO, Vector3::UNIT_X, Vector3::UNIT_Y, 1.0, self.angle.t0, self.angle.t1);
        let knots_u: Vec<f64> = circle_knots.iter().map(|k| self.angle.parameter_at(*k)).collect();

        let profile_points = profile.locations();
        let profile_weights = profile.weights();
        let u_count = circle.len();
        let v_count = profile_points.len();
        let mut cvs = Vec::with_capacity(u_count * v_count);
        for (c, wc) in circle.iter().zip(&circle_weights) {
            for (q, wq) in profile_points.iter().zip(&profile_weights) {
                let foot = self.axis.from + axis * (*q - self.axis.from).dot(&axis);
                let radial = *q - foot;
                let p = foot + radial * c.x + axis.cross(&radial) * c.y;
                cvs.push(nurbs::to_homogeneous(p, wc * wq));
            }
        }
        Some(NurbsSurface {
            degree_u: 2,
            degree_v: profile.degree(),
            u_count,
            v_count,
            knots_u: nurbs::native_knots(&knots_u),
            knots_v: profile.knots().to_vec(),
            cvs,
        })
    }
}

/// Any native surface
#[derive(Debug, Clone, PartialEq)]
pub enum Surface {
    Plane(PlaneSurface),
    Nurbs(NurbsSurface),
    Revolution(RevSurface),
}

impl Surface {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Surface::Plane(_) => "PlaneSurface",
            Surface::Nurbs(_) => "NurbsSurface",
            Surface::Revolution(_) => "RevSurface",
        }
    }

    /// Parameter domain in `direction` 0 (u) or 1 (v)
    pub fn domain(&self, direction: usize) -> Interval {
        match self {
            Surface::Plane(s) => {
                if direction == 0 {
                    s.u
                } else {
                    s.v
                }
            }
            Surface::Nurbs(s) => s.domain(direction),
            Surface::Revolution(s) => {
                if direction == 0 {
                    s.angle
                } else {
                    s.profile.domain()
                }
            }
        }
    }

    pub fn point_at(&self, u: f64, v: f64) -> Vector3 {
        match self {
            Surface::Plane(s) => s.plane.point_at(u, v),
            Surface::Nurbs(s) => s.point_at(u, v),
            Surface::Revolution(s) => s.point_at(u, v),
        }
    }

    /// First partial derivatives by central differences
    pub fn derivatives_at(&self, u: f64, v: f64) -> (Vector3, Vector3) {
        let (du, dv) = (self.domain(0), self.domain(1));
        let hu = (du.length().abs() * 1e-6).max(1e-9);
        let hv = (dv.length().abs() * 1e-6).max(1e-9);
        let (u0, u1) = ((u - hu).max(du.min()), (u + hu).min(du.max()));
        let (v0, v1) = ((v - hv).max(dv.min()), (v + hv).min(dv.max()));
        let su = (self.point_at(u1, v) - self.point_at(u0, v)) / (u1 - u0).max(1e-300);
        let sv = (self.point_at(u, v1) - self.point_at(u, v0)) / (v1 - v0).max(1e-300);
        (su, sv)
    }

    /// Unit normal `Su × Sv`; zero at singular points
    pub fn normal_at(&self, u: f64, v: f64) -> Vector3 {
        match self {
            Surface::Plane(s) => s.plane.z_axis,
            _ => {
                let (su, sv) = self.derivatives_at(u, v);
                su.cross(&sv).normalize()
            }
        }
    }

    /// Plane the surface lies in, if any
    pub fn try_get_plane(&self, tolerance: f64) -> Option<Plane> {
        match self {
            Surface::Plane(s) => Some(s.plane),
            _ => {
                let (du, dv) = (self.domain(0), self.domain(1));
                let mut samples = Vec::with_capacity(81);
                for i in 0..=8 {
                    for j in 0..=8 {
                        samples.push(
                            self.point_at(du.parameter_at(i as f64 / 8.0), dv.parameter_at(j as f64 / 8.0)),
                        );
                    }
                }
                let normal = self.normal_at(du.mid(), dv.mid());
                if normal.is_tiny(1e-12) {
                    return None;
                }
                let plane = Plane::new(self.point_at(du.mid(), dv.mid()), normal);
                samples
                    .iter()
                    .all(|p| plane.distance_to(*p).abs() <= tolerance)
                    .then_some(plane)
            }
        }
    }

    pub fn is_planar(&self, tolerance: f64) -> bool {
        self.try_get_plane(tolerance).is_some()
    }

    /// NURBS form of the surface
    pub fn to_nurbs(&self) -> Option<NurbsSurface> {
        match self {
            Surface::Plane(s) => {
                let corners = [
                    s.plane.point_at(s.u.t0, s.v.t0),
                    s.plane.point_at(s.u.t0, s.v.t1),
                    s.plane.point_at(s.u.t1, s.v.t0),
                    s.plane.point_at(s.u.t1, s.v.t1),
                ];
                NurbsSurface::from_parts(
                    1,
                    1,
                    2,
                    2,
                    &corners,
                    &[1.0; 4],
                    &[s.u.t0, s.u.t0, s.u.t1, s.u.t1],
                    &[s.v.t0, s.v.t0, s.v.t1, s.v.t1],
                )
            }
            Surface::Nurbs(s) => Some(s.clone()),
            Surface::Revolution(s) => s.to_nurbs(),
        }
    }

    /// Iso-curve along `direction` (0 = varying u) at the fixed other parameter
    pub fn iso_curve(&self, direction: usize, constant: f64) -> Option<Curve> {
        match self {
            Surface::Plane(s) => {
                let line = if direction == 0 {
                    Line::new(s.plane.point_at(s.u.t0, constant), s.plane.point_at(s.u.t1, constant))
                } else {
                    Line::new(s.plane.point_at(constant, s.v.t0), s.plane.point_at(constant, s.v.t1))
                };
                Some(Curve::Line(super::LineCurve {
                    line,
                    domain: self.domain(direction),
                }))
            }
            Surface::Revolution(s) if direction == 0 => {
                let axis = s.axis_direction();
                let q = s.profile.point_at(constant);
                let foot = s.axis.from + axis * (q - s.axis.from).dot(&axis);
                let radial = q - foot;
                if radial.is_tiny(1e-12) {
                    return Some(super::brep::point_curve(q));
                }
                let plane = Plane::from_frame(foot, radial, axis.cross(&radial));
                Some(Curve::Arc(super::ArcCurve::new(super::Arc::new(
                    plane,
                    radial.length(),
                    s.angle,
                ))))
            }
            Surface::Revolution(s) if direction == 1 => {
                let rotate = Transform::rotation(constant, s.axis_direction(), s.axis.from);
                Some(s.profile.map_points(&move |p| rotate.transform_point(p)))
            }
            _ => self.to_nurbs()?.iso_curve(direction, constant).map(Curve::Nurbs),
        }
    }

    pub fn is_valid(&self) -> bool {
        match self {
            Surface::Plane(s) => s.plane.is_valid() && s.u.length() != 0.0 && s.v.length() != 0.0,
            Surface::Nurbs(s) => s.is_valid(),
            Surface::Revolution(s) => {
                s.profile.is_valid() && s.axis.length() > 0.0 && s.angle.length() != 0.0
            }
        }
    }
}
