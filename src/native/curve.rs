//! Native curve objects
//!
//! A [`Curve`] is one of the concrete curve kinds a native document can hold.
//! Each kind carries a parameter domain; [`Curve::point_at`] evaluates in
//! that domain.

use super::primitives::{Arc, Line, Polyline};
use crate::nurbs::{self, BezierSpan, Homogeneous};
use crate::types::{Interval, Vector3};

/// How the raw 4-tuples handed to [`NurbsCurve::set_point`] are interpreted
///
/// Version 5 documents take euclidean coordinates plus a separate weight.
/// Version 6 and later take homogeneous coordinates, already multiplied by
/// the weight. Mixing the two silently produces a different curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlPointConvention {
    /// `(x, y, z, w)` with unweighted coordinates
    Euclidean,
    /// `(w·x, w·y, w·z, w)`
    Homogeneous,
}

impl ControlPointConvention {
    /// Convention used by the given document version
    pub fn for_version(version: u32) -> Self {
        if version >= 6 {
            ControlPointConvention::Homogeneous
        } else {
            ControlPointConvention::Euclidean
        }
    }
}

/// Straight segment with a parameter domain
#[derive(Debug, Clone, PartialEq)]
pub struct LineCurve {
    pub line: Line,
    pub domain: Interval,
}

impl LineCurve {
    pub fn new(line: Line) -> Self {
        LineCurve {
            domain: Interval::new(0.0, line.length()),
            line,
        }
    }
}

/// Circular arc (possibly a full circle) with a parameter domain
#[derive(Debug, Clone, PartialEq)]
pub struct ArcCurve {
    pub arc: Arc,
    pub domain: Interval,
}

impl ArcCurve {
    pub fn new(arc: Arc) -> Self {
        ArcCurve {
            domain: arc.angle,
            arc,
        }
    }

    /// True if the arc closes on itself
    pub fn is_completed_circle(&self) -> bool {
        self.arc.is_circle()
    }
}

/// Polyline curve; the domain runs `0..segment_count`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PolylineCurve {
    pub points: Vec<Vector3>,
}

impl PolylineCurve {
    pub fn new(points: Vec<Vector3>) -> Self {
        PolylineCurve { points }
    }

    pub fn to_polyline(&self) -> Polyline {
        Polyline::new(self.points.clone())
    }
}

/// Non-uniform rational B-spline curve
///
/// Knots are stored in native form (`cv_count + degree - 1` values); control
/// points are stored exactly as they were passed to [`set_point`](Self::set_point),
/// and decoded according to the curve's [`ControlPointConvention`].
#[derive(Debug, Clone, PartialEq)]
pub struct NurbsCurve {
    degree: usize,
    knots: Vec<f64>,
    cvs: Vec<[f64; 4]>,
    convention: ControlPointConvention,
}

impl NurbsCurve {
    /// Allocate a curve with `cv_count` zeroed control points of weight 1
    pub fn new(degree: usize, cv_count: usize, convention: ControlPointConvention) -> Self {
        NurbsCurve {
            degree,
            knots: vec![0.0; (cv_count + degree).saturating_sub(1)],
            cvs: vec![[0.0, 0.0, 0.0, 1.0]; cv_count],
            convention,
        }
    }

    /// Build from euclidean points, weights and a full (`n + p + 1`) knot vector
    pub fn from_parts(
        degree: usize,
        points: &[Vector3],
        weights: &[f64],
        full_knots: &[f64],
    ) -> Option<Self> {
        if points.len() != weights.len() || !nurbs::validate_knots(full_knots, points.len(), degree) {
            return None;
        }
        Some(NurbsCurve {
            degree,
            knots: nurbs::native_knots(full_knots),
            cvs: points
                .iter()
                .zip(weights)
                .map(|(p, w)| nurbs::to_homogeneous(*p, *w))
                .collect(),
            convention: ControlPointConvention::Homogeneous,
        })
    }

    /// Build from homogeneous points and a full knot vector
    pub fn from_homogeneous(degree: usize, points: Vec<Homogeneous>, full_knots: &[f64]) -> Self {
        NurbsCurve {
            degree,
            knots: nurbs::native_knots(full_knots),
            cvs: points,
            convention: ControlPointConvention::Homogeneous,
        }
    }

    /// Store a raw control point; returns false when `index` is out of range
    pub fn set_point(&mut self, index: usize, x: f64, y: f64, z: f64, w: f64) -> bool {
        match self.cvs.get_mut(index) {
            Some(cv) => {
                *cv = [x, y, z, w];
                true
            }
            None => false,
        }
    }

    /// Store a native knot value; returns false when `index` is out of range
    pub fn set_knot(&mut self, index: usize, value: f64) -> bool {
        match self.knots.get_mut(index) {
            Some(k) => {
                *k = value;
                true
            }
            None => false,
        }
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn order(&self) -> usize {
        self.degree + 1
    }

    pub fn cv_count(&self) -> usize {
        self.cvs.len()
    }

    pub fn convention(&self) -> ControlPointConvention {
        self.convention
    }

    /// Native knot vector (`cv_count + degree - 1` values)
    pub fn knots(&self) -> &[f64] {
        &self.knots
    }

    /// Full knot vector (`cv_count + degree + 1` values)
    pub fn full_knots(&self) -> Vec<f64> {
        nurbs::full_knots(&self.knots)
    }

    /// Raw control point tuples as stored
    pub fn raw_points(&self) -> &[[f64; 4]] {
        &self.cvs
    }

    pub fn weight(&self, index: usize) -> f64 {
        self.cvs[index][3]
    }

    pub fn weights(&self) -> Vec<f64> {
        self.cvs.iter().map(|cv| cv[3]).collect()
    }

    /// Euclidean location of control point `index`
    pub fn location(&self, index: usize) -> Vector3 {
        let cv = self.cvs[index];
        match self.convention {
            ControlPointConvention::Euclidean => Vector3::new(cv[0], cv[1], cv[2]),
            ControlPointConvention::Homogeneous => nurbs::from_homogeneous(cv),
        }
    }

    pub fn locations(&self) -> Vec<Vector3> {
        (0..self.cvs.len()).map(|i| self.location(i)).collect()
    }

    /// Control points in homogeneous form regardless of storage convention
    pub fn homogeneous_points(&self) -> Vec<Homogeneous> {
        match self.convention {
            ControlPointConvention::Homogeneous => self.cvs.clone(),
            ControlPointConvention::Euclidean => self
                .cvs
                .iter()
                .map(|cv| nurbs::to_homogeneous(Vector3::new(cv[0], cv[1], cv[2]), cv[3]))
                .collect(),
        }
    }

    /// Same curve re-encoded with the homogeneous convention
    pub fn to_homogeneous_convention(&self) -> NurbsCurve {
        NurbsCurve {
            degree: self.degree,
            knots: self.knots.clone(),
            cvs: self.homogeneous_points(),
            convention: ControlPointConvention::Homogeneous,
        }
    }

    pub fn is_rational(&self) -> bool {
        self.cvs.iter().any(|cv| (cv[3] - 1.0).abs() > 1e-12)
    }

    pub fn is_valid(&self) -> bool {
        self.degree >= 1
            && nurbs::validate_knots(&self.full_knots(), self.cvs.len(), self.degree)
            && self.cvs.iter().all(|cv| cv[3] > 0.0 && cv.iter().all(|v| v.is_finite()))
    }

    pub fn domain(&self) -> Interval {
        if self.knots.len() < self.cvs.len() || self.degree == 0 {
            return Interval::new(0.0, 0.0);
        }
        Interval::new(self.knots[self.degree - 1], self.knots[self.cvs.len() - 1])
    }

    pub fn span_count(&self) -> usize {
        if !self.is_valid() {
            return 0;
        }
        nurbs::span_count(&self.full_knots(), self.cvs.len(), self.degree)
    }

    pub fn point_at(&self, t: f64) -> Vector3 {
        if self.cvs.is_empty() || self.degree == 0 {
            return Vector3::ZERO;
        }
        nurbs::evaluate_curve(&self.homogeneous_points(), &self.full_knots(), self.degree, t)
    }

    /// Split into Bezier spans
    pub fn bezier_spans(&self) -> Vec<BezierSpan> {
        nurbs::decompose_bezier(&self.homogeneous_points(), &self.full_knots(), self.degree)
    }

    /// Same geometry, opposite direction
    pub fn reversed(&self) -> NurbsCurve {
        let full = self.full_knots();
        let (a, b) = (full[0], full[full.len() - 1]);
        let knots: Vec<f64> = full.iter().rev().map(|k| a + b - k).collect();
        let mut cvs = self.homogeneous_points();
        cvs.reverse();
        NurbsCurve::from_homogeneous(self.degree, cvs, &knots)
    }
}

/// Ordered sequence of curve segments
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PolyCurve {
    pub segments: Vec<Curve>,
}

impl PolyCurve {
    pub fn new(segments: Vec<Curve>) -> Self {
        PolyCurve { segments }
    }

    /// Append a segment
    pub fn append(&mut self, curve: Curve) {
        self.segments.push(curve);
    }

    /// Flatten nested poly-curves into a single level
    pub fn remove_nesting(&self) -> PolyCurve {
        let mut flat = Vec::new();
        for segment in &self.segments {
            match segment {
                Curve::Poly(inner) => flat.extend(inner.remove_nesting().segments),
                other => flat.push(other.clone()),
            }
        }
        PolyCurve::new(flat)
    }
}

/// Any native curve
#[derive(Debug, Clone, PartialEq)]
pub enum Curve {
    Line(LineCurve),
    Arc(ArcCurve),
    Polyline(PolylineCurve),
    Nurbs(NurbsCurve),
    Poly(PolyCurve),
}

impl Curve {
    /// Name of the concrete kind, used in diagnostics
    pub fn kind_name(&self) -> &'static str {
        match self {
            Curve::Line(_) => "LineCurve",
            Curve::Arc(_) => "ArcCurve",
            Curve::Polyline(_) => "PolylineCurve",
            Curve::Nurbs(_) => "NurbsCurve",
            Curve::Poly(_) => "PolyCurve",
        }
    }

    pub fn line(from: Vector3, to: Vector3) -> Curve {
        Curve::Line(LineCurve::new(Line::new(from, to)))
    }

    pub fn arc(arc: Arc) -> Curve {
        Curve::Arc(ArcCurve::new(arc))
    }

    pub fn polyline(points: Vec<Vector3>) -> Curve {
        Curve::Polyline(PolylineCurve::new(points))
    }

    pub fn domain(&self) -> Interval {
        match self {
            Curve::Line(c) => c.domain,
            Curve::Arc(c) => c.domain,
            Curve::Polyline(c) => Interval::new(0.0, c.points.len().saturating_sub(1) as f64),
            Curve::Nurbs(c) => c.domain(),
            Curve::Poly(c) => Interval::new(0.0, c.segments.len() as f64),
        }
    }

    pub fn point_at(&self, t: f64) -> Vector3 {
        match self {
            Curve::Line(c) => c.line.point_at(c.domain.normalized_parameter_at(t)),
            Curve::Arc(c) => {
                let s = c.domain.normalized_parameter_at(t);
                c.arc.point_at(c.arc.angle.parameter_at(s))
            }
            Curve::Polyline(c) => {
                let n = c.points.len();
                match n {
                    0 => Vector3::ZERO,
                    1 => c.points[0],
                    _ => {
                        let t = t.clamp(0.0, (n - 1) as f64);
                        let i = (t.floor() as usize).min(n - 2);
                        c.points[i].lerp(&c.points[i + 1], t - i as f64)
                    }
                }
            }
            Curve::Nurbs(c) => c.point_at(t),
            Curve::Poly(c) => {
                let n = c.segments.len();
                if n == 0 {
                    return Vector3::ZERO;
                }
                let t = t.clamp(0.0, n as f64);
                let i = (t.floor() as usize).min(n - 1);
                let segment = &c.segments[i];
                segment.point_at(segment.domain().parameter_at(t - i as f64))
            }
        }
    }

    pub fn point_at_start(&self) -> Vector3 {
        self.point_at(self.domain().t0)
    }

    pub fn point_at_end(&self) -> Vector3 {
        self.point_at(self.domain().t1)
    }

    /// True when start and end coincide (a curve of zero length is not closed)
    pub fn is_closed(&self, tolerance: f64) -> bool {
        match self {
            Curve::Line(_) => false,
            Curve::Arc(c) => c.is_completed_circle(),
            _ => {
                self.point_at_start().distance(&self.point_at_end()) <= tolerance
                    && self.sample(4).iter().any(|p| p.distance(&self.point_at_start()) > tolerance)
            }
        }
    }

    /// Number of smooth pieces
    pub fn span_count(&self) -> usize {
        match self {
            Curve::Line(_) => 1,
            Curve::Arc(_) => 1,
            Curve::Polyline(c) => c.points.len().saturating_sub(1),
            Curve::Nurbs(c) => c.span_count(),
            Curve::Poly(c) => c.segments.iter().map(|s| s.span_count()).sum(),
        }
    }

    /// Polynomial degree of the NURBS form
    pub fn degree(&self) -> usize {
        match self {
            Curve::Line(_) | Curve::Polyline(_) => 1,
            Curve::Arc(_) => 2,
            Curve::Nurbs(c) => c.degree(),
            Curve::Poly(c) => c.segments.iter().map(|s| s.degree()).max().unwrap_or(1),
        }
    }

    /// `count + 1` points at equal parameter steps, ends included
    pub fn sample(&self, count: usize) -> Vec<Vector3> {
        let count = count.max(1);
        let domain = self.domain();
        (0..=count)
            .map(|i| self.point_at(domain.parameter_at(i as f64 / count as f64)))
            .collect()
    }

    /// Dense sampling that keeps polyline corners exact
    pub fn sample_dense(&self, per_span: usize) -> Vec<Vector3> {
        match self {
            Curve::Line(c) => vec![c.line.from, c.line.to],
            Curve::Polyline(c) => c.points.clone(),
            Curve::Poly(c) => {
                let mut out: Vec<Vector3> = Vec::new();
                for segment in &c.segments {
                    let pts = segment.sample_dense(per_span);
                    let skip = usize::from(!out.is_empty());
                    out.extend(pts.into_iter().skip(skip));
                }
                out
            }
            _ => self.sample(per_span * self.span_count().max(1)),
        }
    }

    /// Approximate arc length
    pub fn length(&self) -> f64 {
        match self {
            Curve::Line(c) => c.line.length(),
            Curve::Arc(c) => c.arc.length(),
            Curve::Polyline(c) => c.to_polyline().length(),
            _ => self.sample_dense(32).windows(2).map(|w| w[0].distance(&w[1])).sum(),
        }
    }

    /// Same geometry traversed in the opposite direction
    pub fn reversed(&self) -> Curve {
        match self {
            Curve::Line(c) => Curve::Line(LineCurve {
                line: Line::new(c.line.to, c.line.from),
                domain: c.domain,
            }),
            Curve::Arc(c) => {
                let arc = c.arc;
                // mirror the frame so the reversed arc keeps an increasing angle domain
                let plane = super::Plane {
                    origin: arc.plane.origin,
                    x_axis: arc.plane.x_axis,
                    y_axis: -arc.plane.y_axis,
                    z_axis: -arc.plane.z_axis,
                };
                let angle = Interval::new(-arc.angle.t1, -arc.angle.t0);
                Curve::Arc(ArcCurve {
                    arc: Arc::new(plane, arc.radius, angle),
                    domain: c.domain,
                })
            }
            Curve::Polyline(c) => {
                let mut points = c.points.clone();
                points.reverse();
                Curve::polyline(points)
            }
            Curve::Nurbs(c) => Curve::Nurbs(c.reversed()),
            Curve::Poly(c) => Curve::Poly(PolyCurve::new(
                c.segments.iter().rev().map(|s| s.reversed()).collect(),
            )),
        }
    }

    /// Apply a similarity map (rotation, translation, uniform scale) to the geometry
    pub fn map_points(&self, f: &dyn Fn(Vector3) -> Vector3) -> Curve {
        match self {
            Curve::Line(c) => Curve::Line(LineCurve {
                line: Line::new(f(c.line.from), f(c.line.to)),
                domain: c.domain,
            }),
            Curve::Arc(c) => {
                let p = c.arc.plane;
                let origin = f(p.origin);
                let x = f(p.origin + p.x_axis) - origin;
                let y = f(p.origin + p.y_axis) - origin;
                let scale = x.length();
                let z = x.cross(&y).normalize();
                let plane = super::Plane {
                    origin,
                    x_axis: x.normalize(),
                    y_axis: y.normalize(),
                    z_axis: z,
                };
                Curve::Arc(ArcCurve {
                    arc: Arc::new(plane, c.arc.radius * scale, c.arc.angle),
                    domain: c.domain,
                })
            }
            Curve::Polyline(c) => Curve::polyline(c.points.iter().map(|p| f(*p)).collect()),
            Curve::Nurbs(c) => {
                let points: Vec<Homogeneous> = (0..c.cv_count())
                    .map(|i| nurbs::to_homogeneous(f(c.location(i)), c.weight(i)))
                    .collect();
                Curve::Nurbs(NurbsCurve::from_homogeneous(c.degree(), points, &c.full_knots()))
            }
            Curve::Poly(c) => Curve::Poly(PolyCurve::new(
                c.segments.iter().map(|s| s.map_points(f)).collect(),
            )),
        }
    }

    /// Express the curve in the local frame of `plane` (z dropped to the plane)
    pub fn transformed_2d(&self, plane: &super::Plane) -> Curve {
        let plane = *plane;
        self.map_points(&move |p| {
            let local = plane.to_local(p);
            Vector3::new(local.x, local.y, 0.0)
        })
    }

    /// Flat list of non-poly segments
    pub fn explode(&self) -> Vec<Curve> {
        match self {
            Curve::Poly(c) => c.remove_nesting().segments,
            other => vec![other.clone()],
        }
    }

    /// NURBS form with homogeneous storage; `None` for an empty poly-curve
    pub fn to_nurbs(&self) -> Option<NurbsCurve> {
        match self {
            Curve::Line(c) => {
                let (t0, t1) = (c.domain.t0, c.domain.t1);
                NurbsCurve::from_parts(1, &[c.line.from, c.line.to], &[1.0, 1.0], &[t0, t0, t1, t1])
            }
            Curve::Arc(c) => {
                let arc = c.arc;
                let (points, weights, knots) = nurbs::arc_control_points(
                    arc.plane.origin,
                    arc.plane.x_axis,
                    arc.plane.y_axis,
                    arc.radius,
                    arc.angle.t0,
                    arc.angle.t1,
                );
                let knots: Vec<f64> = knots.iter().map(|k| c.domain.parameter_at(*k)).collect();
                NurbsCurve::from_parts(2, &points, &weights, &knots)
            }
            Curve::Polyline(c) => {
                let n = c.points.len();
                if n < 2 {
                    return None;
                }
                let mut knots = vec![0.0];
                knots.extend((0..n).map(|i| i as f64));
                knots.push((n - 1) as f64);
                NurbsCurve::from_parts(1, &c.points, &vec![1.0; n], &knots)
            }
            Curve::Nurbs(c) => Some(c.to_homogeneous_convention()),
            Curve::Poly(c) => {
                let parts: Vec<NurbsCurve> = c
                    .remove_nesting()
                    .segments
                    .iter()
                    .map(|s| s.to_nurbs())
                    .collect::<Option<Vec<_>>>()?;
                let degree = parts.iter().map(|p| p.degree()).max()?;
                let mut spans = Vec::new();
                let mut offset = 0.0;
                for part in &parts {
                    for span in part.bezier_spans() {
                        let len = (span.t1 - span.t0).abs();
                        spans.push(BezierSpan {
                            points: nurbs::elevate_bezier(&span.points, degree - part.degree()),
                            t0: offset,
                            t1: offset + len,
                        });
                        offset += len;
                    }
                }
                if spans.is_empty() {
                    return None;
                }
                let (points, knots) = nurbs::join_bezier_spans(&spans, degree);
                Some(NurbsCurve::from_homogeneous(degree, points, &knots))
            }
        }
    }

    pub fn is_valid(&self) -> bool {
        match self {
            Curve::Line(c) => c.line.length() > 0.0 && c.line.from.is_valid() && c.line.to.is_valid(),
            Curve::Arc(c) => c.arc.radius > 0.0 && c.arc.sweep() != 0.0,
            Curve::Polyline(c) => c.points.len() >= 2,
            Curve::Nurbs(c) => c.is_valid(),
            Curve::Poly(c) => !c.segments.is_empty() && c.segments.iter().all(|s| s.is_valid()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::native::Plane;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn quarter_arc() -> Curve {
        Curve::arc(Arc::new(Plane::world_xy(), 1.0, Interval::new(0.0, FRAC_PI_2)))
    }

    #[test]
    fn test_convention_by_version() {
        assert_eq!(ControlPointConvention::for_version(5), ControlPointConvention::Euclidean);
        assert_eq!(ControlPointConvention::for_version(6), ControlPointConvention::Homogeneous);
        assert_eq!(ControlPointConvention::for_version(8), ControlPointConvention::Homogeneous);
    }

    #[test]
    fn test_euclidean_and_homogeneous_storage_agree() {
        let mut a = NurbsCurve::new(2, 3, ControlPointConvention::Euclidean);
        let mut b = NurbsCurve::new(2, 3, ControlPointConvention::Homogeneous);
        let pts = [(1.0, 0.0, 1.0), (1.0, 1.0, 0.5), (0.0, 1.0, 1.0)];
        for (i, (x, y, w)) in pts.iter().enumerate() {
            a.set_point(i, *x, *y, 0.0, *w);
            b.set_point(i, x * w, y * w, 0.0, *w);
        }
        for (i, k) in [0.0, 0.0, 1.0, 1.0].iter().enumerate() {
            a.set_knot(i, *k);
            b.set_knot(i, *k);
        }
        for i in 0..=8 {
            let t = i as f64 / 8.0;
            assert!(a.point_at(t).almost_equal(&b.point_at(t), 1e-12));
        }
        assert_eq!(a.location(1), b.location(1));
    }

    #[test]
    fn test_arc_curve_to_nurbs_matches() {
        let arc = quarter_arc();
        let nurbs = arc.to_nurbs().unwrap();
        let domain = arc.domain();
        for i in 0..=10 {
            let t = domain.parameter_at(i as f64 / 10.0);
            assert!((nurbs.point_at(t).length() - 1.0).abs() < 1e-9);
        }
        assert!(nurbs.point_at(domain.t1).almost_equal(&arc.point_at_end(), 1e-9));
    }

    #[test]
    fn test_reversed_arc() {
        let arc = quarter_arc();
        let rev = arc.reversed();
        assert!(rev.point_at_start().almost_equal(&arc.point_at_end(), 1e-12));
        assert!(rev.point_at_end().almost_equal(&arc.point_at_start(), 1e-12));
    }

    #[test]
    fn test_polyline_point_at() {
        let c = Curve::polyline(vec![Vector3::ZERO, Vector3::UNIT_X, Vector3::new(1.0, 1.0, 0.0)]);
        assert_eq!(c.domain(), Interval::new(0.0, 2.0));
        assert!(c.point_at(1.5).almost_equal(&Vector3::new(1.0, 0.5, 0.0), 1e-12));
        assert_eq!(c.span_count(), 2);
    }

    #[test]
    fn test_poly_curve_to_nurbs_mixed_degrees() {
        let poly = Curve::Poly(PolyCurve::new(vec![
            Curve::line(Vector3::new(-1.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0)),
            Curve::arc(Arc::new(Plane::world_xy(), 1.0, Interval::new(0.0, PI))),
        ]));
        let nurbs = poly.to_nurbs().unwrap();
        assert_eq!(nurbs.degree(), 2);
        let d = nurbs.domain();
        assert!(nurbs.point_at(d.t0).almost_equal(&Vector3::new(-1.0, 0.0, 0.0), 1e-9));
        assert!(nurbs.point_at(d.t1).almost_equal(&Vector3::new(-1.0, 0.0, 0.0), 1e-9));
        assert!(poly.is_closed(1e-9));
    }

    #[test]
    fn test_remove_nesting() {
        let inner = Curve::Poly(PolyCurve::new(vec![
            Curve::line(Vector3::ZERO, Vector3::UNIT_X),
            Curve::line(Vector3::UNIT_X, Vector3::new(1.0, 1.0, 0.0)),
        ]));
        let outer = Curve::Poly(PolyCurve::new(vec![
            inner,
            Curve::line(Vector3::new(1.0, 1.0, 0.0), Vector3::UNIT_Y),
        ]));
        assert_eq!(outer.explode().len(), 3);
    }
}
