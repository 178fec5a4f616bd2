//! Sample-based shape recognition for curves and surfaces
//!
//! Every predicate samples the candidate, builds the analytic shape from a
//! few of the samples and then checks all samples against it.

use crate::native::brep::signed_area;
use crate::native::{
    Arc, Circle, Cone, Curve, Cylinder, Ellipse, Line, Plane, Polyline, Sphere, Surface, Torus,
};
use crate::types::{arbitrary_axis, Interval, Vector2, Vector3};
use nalgebra::{DMatrix, Matrix2, SymmetricEigen};
use std::f64::consts::{PI, TAU};

/// Samples used for fitting; grows with the number of spans
fn samples(curve: &Curve) -> Vec<Vector3> {
    let count = (16 * curve.span_count()).clamp(32, 512);
    curve.sample(count)
}

pub fn line(curve: &Curve, tolerance: f64) -> Option<Line> {
    if let Curve::Line(c) = curve {
        return (c.line.length() > tolerance).then_some(c.line);
    }
    let (start, end) = (curve.point_at_start(), curve.point_at_end());
    if start.distance(&end) <= tolerance {
        return None;
    }
    let candidate = Line::new(start, end);
    let mut last = 0.0;
    for p in curve.sample_dense(16) {
        let t = candidate.closest_parameter(p);
        // must be straight and must not double back
        if candidate.distance_to(p) > tolerance || t < last - 1e-9 {
            return None;
        }
        last = t;
    }
    Some(candidate)
}

/// Plane of a planar curve
///
/// Closed curves get a normal that makes them run counterclockwise. A
/// straight curve gets some plane containing it.
pub fn plane(curve: &Curve, tolerance: f64) -> Option<Plane> {
    let points = curve.sample_dense(16);
    match Plane::fit(&points, tolerance) {
        Some(plane) => {
            if curve.is_closed(tolerance) {
                let polygon: Vec<Vector2> = points.iter().map(|p| plane.to_local(*p).to_2d()).collect();
                if signed_area(&polygon) < 0.0 {
                    return Some(plane.flipped());
                }
            }
            Some(plane)
        }
        None => {
            let l = line(curve, tolerance)?;
            let dir = l.direction().normalize();
            let (perp, _) = arbitrary_axis(dir);
            Some(Plane::from_frame(l.from, dir, perp))
        }
    }
}

pub fn circle(curve: &Curve, tolerance: f64) -> Option<Circle> {
    if let Curve::Arc(c) = curve {
        return c.is_completed_circle().then(|| Circle::new(c.arc.plane, c.arc.radius));
    }
    if !curve.is_closed(tolerance) {
        return None;
    }
    let pts = samples(curve);
    let n = pts.len() - 1;
    let arc = Arc::from_three_points(pts[0], pts[n / 3], pts[2 * n / 3])?;
    on_circle(&pts, &arc, tolerance).then(|| Circle::new(arc.plane, arc.radius))
}

pub fn arc(curve: &Curve, tolerance: f64) -> Option<Arc> {
    if let Curve::Arc(c) = curve {
        return Some(c.arc);
    }
    if curve.is_closed(tolerance) {
        return circle(curve, tolerance).map(Arc::from);
    }
    let pts = samples(curve);
    let n = pts.len() - 1;
    let arc = Arc::from_three_points(pts[0], pts[n / 2], pts[n])?;
    if !on_circle(&pts, &arc, tolerance) {
        return None;
    }
    // samples must advance monotonically around the centre
    let mut last = 0.0;
    for p in &pts[1..] {
        let (u, v) = arc.plane.closest_parameter(*p);
        let mut a = v.atan2(u);
        if a < last - 1e-9 {
            a += TAU;
        }
        if a < last - 1e-9 || a > arc.sweep() + 1e-9 {
            return None;
        }
        last = a;
    }
    Some(arc)
}

fn on_circle(points: &[Vector3], arc: &Arc, tolerance: f64) -> bool {
    points.iter().all(|p| {
        (p.distance(&arc.center()) - arc.radius).abs() <= tolerance
            && arc.plane.distance_to(*p).abs() <= tolerance
    })
}

pub fn polyline(curve: &Curve, tolerance: f64) -> Option<Polyline> {
    let points = match curve {
        Curve::Polyline(c) => c.points.clone(),
        Curve::Line(c) => vec![c.line.from, c.line.to],
        Curve::Nurbs(c) if c.degree() == 1 => c.locations(),
        Curve::Poly(_) => {
            let mut points: Vec<Vector3> = Vec::new();
            for segment in curve.explode() {
                let part = match &segment {
                    Curve::Arc(_) | Curve::Poly(_) => return None,
                    Curve::Nurbs(c) if c.degree() > 1 => vec![line(&segment, tolerance)?.from, segment.point_at_end()],
                    other => polyline(other, tolerance)?.points,
                };
                let skip = usize::from(points.last().is_some_and(|p| p.distance(&part[0]) <= tolerance));
                points.extend(part.into_iter().skip(skip));
            }
            points
        }
        _ => return None,
    };
    let mut deduped: Vec<Vector3> = Vec::with_capacity(points.len());
    for p in points {
        if deduped.last().map_or(true, |q| q.distance(&p) > tolerance) {
            deduped.push(p);
        }
    }
    (deduped.len() >= 2).then(|| Polyline::new(deduped))
}

/// Ellipse through a closed planar curve, from a least-squares conic fit
pub fn ellipse(curve: &Curve, tolerance: f64) -> Option<Ellipse> {
    if !curve.is_closed(tolerance) {
        return None;
    }
    let plane = plane(curve, tolerance)?;
    let pts = samples(curve);
    let local: Vec<Vector2> = pts.iter().map(|p| plane.to_local(*p).to_2d()).collect();

    // normalize for conditioning
    let n = local.len() as f64;
    let mean = local.iter().fold(Vector2::ZERO, |acc, p| acc + *p) * (1.0 / n);
    let scale = local
        .iter()
        .map(|p| (*p - mean).length())
        .fold(0.0, f64::max)
        .max(f64::MIN_POSITIVE);
    let rows: Vec<f64> = local
        .iter()
        .flat_map(|p| {
            let (x, y) = ((p.x - mean.x) / scale, (p.y - mean.y) / scale);
            [x * x, x * y, y * y, x, y, 1.0]
        })
        .collect();
    let design = DMatrix::from_row_slice(local.len(), 6, &rows);
    let svd = design.svd(false, true);
    let v_t = svd.v_t?;
    let smallest = svd
        .singular_values
        .iter()
        .enumerate()
        .min_by(|a, b| a.1.total_cmp(b.1))?
        .0;
    let c = v_t.row(smallest);
    let (a, b, cc, d, e, f) = (c[0], c[1], c[2], c[3], c[4], c[5]);

    let det = 4.0 * a * cc - b * b;
    if det <= 0.0 {
        return None;
    }
    let x0 = (b * e - 2.0 * cc * d) / det;
    let y0 = (b * d - 2.0 * a * e) / det;
    let f0 = f + 0.5 * (d * x0 + e * y0);
    let eigen = SymmetricEigen::new(Matrix2::new(a, b / 2.0, b / 2.0, cc));
    let r2: Vec<f64> = eigen.eigenvalues.iter().map(|l| -f0 / l).collect();
    if r2.iter().any(|r| *r <= 0.0) {
        return None;
    }
    let (major, minor) = if r2[0] >= r2[1] { (0, 1) } else { (1, 0) };
    let radius1 = r2[major].sqrt() * scale;
    let radius2 = r2[minor].sqrt() * scale;
    let axis = eigen.eigenvectors.column(major);

    let center = plane.point_at(mean.x + x0 * scale, mean.y + y0 * scale);
    let x_axis = plane.x_axis * axis[0] + plane.y_axis * axis[1];
    let frame = Plane::from_frame(center, x_axis, plane.z_axis.cross(&x_axis));
    let ellipse = Ellipse::new(frame, radius1, radius2);

    let fits = pts.iter().all(|p| {
        let q = frame.to_local(*p);
        let r = ((q.x / radius1).powi(2) + (q.y / radius2).powi(2)).sqrt();
        q.z.abs() <= tolerance && (r - 1.0).abs() * radius2 <= tolerance
    });
    fits.then_some(ellipse)
}

/// Foot of `p` on the surface axis and its distance from it
fn axis_foot(axis: &Line, p: Vector3) -> (Vector3, f64) {
    let foot = axis.point_at(axis.closest_parameter(p));
    (foot, p.distance(&foot))
}

fn full_turn(angle: Interval) -> bool {
    (angle.length().abs() - TAU).abs() < 1e-9
}

pub fn sphere(surface: &Surface, tolerance: f64) -> Option<Sphere> {
    let Surface::Revolution(rev) = surface else {
        return None;
    };
    if !full_turn(rev.angle) {
        return None;
    }
    let arc = arc(&rev.profile, tolerance)?;
    let (_, off_axis) = axis_foot(&rev.axis, arc.center());
    let poles_on_axis = rev.axis.distance_to(arc.start_point()) <= tolerance
        && rev.axis.distance_to(arc.end_point()) <= tolerance;
    if off_axis > tolerance || !poles_on_axis || (arc.sweep().abs() - PI).abs() > 1e-6 {
        return None;
    }
    Some(Sphere {
        plane: Plane::new(arc.center(), rev.axis_direction()),
        radius: arc.radius,
    })
}

pub fn torus(surface: &Surface, tolerance: f64) -> Option<Torus> {
    let Surface::Revolution(rev) = surface else {
        return None;
    };
    if !full_turn(rev.angle) {
        return None;
    }
    let tube = circle(&rev.profile, tolerance)?;
    let axis = rev.axis_direction();
    let (foot, major) = axis_foot(&rev.axis, tube.center());
    // the tube circle must lie in a plane through the axis
    if tube.normal().dot(&axis).abs() > 1e-6 || major <= tube.radius {
        return None;
    }
    Some(Torus::new(Plane::new(foot, axis), major, tube.radius))
}

pub fn cone(surface: &Surface, tolerance: f64) -> Option<Cone> {
    let Surface::Revolution(rev) = surface else {
        return None;
    };
    if !full_turn(rev.angle) {
        return None;
    }
    let generator = line(&rev.profile, tolerance)?;
    let (apex, rim) = if rev.axis.distance_to(generator.from) <= tolerance {
        (generator.from, generator.to)
    } else if rev.axis.distance_to(generator.to) <= tolerance {
        (generator.to, generator.from)
    } else {
        return None;
    };
    let (base, radius) = axis_foot(&rev.axis, rim);
    let height = apex.distance(&base);
    if radius <= tolerance || height <= tolerance {
        return None;
    }
    let apex = rev.axis.point_at(rev.axis.closest_parameter(apex));
    Some(Cone::new(Plane::new(apex, base - apex), height, radius))
}

pub fn cylinder(surface: &Surface, tolerance: f64) -> Option<Cylinder> {
    let Surface::Revolution(rev) = surface else {
        return None;
    };
    if !full_turn(rev.angle) {
        return None;
    }
    let generator = line(&rev.profile, tolerance)?;
    let (bottom, radius) = axis_foot(&rev.axis, generator.from);
    let (top, top_radius) = axis_foot(&rev.axis, generator.to);
    if radius <= tolerance || (radius - top_radius).abs() > tolerance {
        return None;
    }
    let height = bottom.distance(&top);
    if height <= tolerance {
        return None;
    }
    let plane = Plane::from_frame(bottom, generator.from - bottom, (top - bottom).cross(&(generator.from - bottom)));
    Some(Cylinder::new(Circle::new(plane, radius), 0.0, height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::native::RevSurface;
    use std::f64::consts::FRAC_PI_2;

    const TOL: f64 = 1e-6;

    fn nurbs_circle() -> Curve {
        let c = Curve::arc(Circle::new(Plane::new(Vector3::new(1.0, 2.0, 3.0), Vector3::new(0.0, 1.0, 1.0)), 2.5).into());
        Curve::Nurbs(c.to_nurbs().unwrap())
    }

    #[test]
    fn test_line_from_degree_one_nurbs() {
        let c = Curve::Nurbs(Curve::line(Vector3::ZERO, Vector3::new(3.0, 0.0, 0.0)).to_nurbs().unwrap());
        let l = line(&c, TOL).unwrap();
        assert!(l.to.almost_equal(&Vector3::new(3.0, 0.0, 0.0), 1e-12));
    }

    #[test]
    fn test_bent_polyline_is_not_a_line() {
        let c = Curve::polyline(vec![Vector3::ZERO, Vector3::UNIT_X, Vector3::new(2.0, 0.5, 0.0)]);
        assert!(line(&c, TOL).is_none());
    }

    #[test]
    fn test_circle_from_nurbs() {
        let c = circle(&nurbs_circle(), TOL).unwrap();
        assert!((c.radius - 2.5).abs() < 1e-9);
        assert!(c.center().almost_equal(&Vector3::new(1.0, 2.0, 3.0), 1e-9));
        assert!(c.normal().almost_equal(&Vector3::new(0.0, 1.0, 1.0).normalize(), 1e-9));
    }

    #[test]
    fn test_arc_from_nurbs() {
        let source = Arc::new(Plane::world_xy(), 2.0, Interval::new(0.0, FRAC_PI_2 * 3.0));
        let c = Curve::Nurbs(Curve::arc(source).to_nurbs().unwrap());
        let a = arc(&c, TOL).unwrap();
        assert!((a.radius - 2.0).abs() < 1e-9);
        assert!((a.sweep() - FRAC_PI_2 * 3.0).abs() < 1e-9);
        assert!(a.end_point().almost_equal(&Vector3::new(0.0, -2.0, 0.0), 1e-9));
    }

    #[test]
    fn test_ellipse_fit() {
        let plane = Plane::from_frame(Vector3::new(5.0, 0.0, 1.0), Vector3::new(1.0, 1.0, 0.0), Vector3::new(-1.0, 1.0, 0.0));
        let source = Ellipse::new(plane, 4.0, 1.5);
        let (points, weights, knots) = source.nurbs_form();
        let c = Curve::Nurbs(crate::native::NurbsCurve::from_parts(2, &points, &weights, &knots).unwrap());
        assert!(circle(&c, TOL).is_none());
        let e = ellipse(&c, TOL).unwrap();
        assert!((e.radius1 - 4.0).abs() < 1e-7);
        assert!((e.radius2 - 1.5).abs() < 1e-7);
        assert!(e.center().almost_equal(&Vector3::new(5.0, 0.0, 1.0), 1e-7));
        assert!(e.plane.x_axis.cross(&plane.x_axis).length() < 1e-6);
    }

    #[test]
    fn test_closed_curve_plane_is_counterclockwise() {
        let square = Curve::polyline(vec![
            Vector3::ZERO,
            Vector3::UNIT_Y,
            Vector3::new(1.0, 1.0, 0.0),
            Vector3::UNIT_X,
            Vector3::ZERO,
        ]);
        let p = plane(&square, TOL).unwrap();
        assert!(p.z_axis.almost_equal(&-Vector3::UNIT_Z, 1e-9));
    }

    #[test]
    fn test_polyline_from_poly_curve() {
        let poly = Curve::Poly(crate::native::PolyCurve::new(vec![
            Curve::line(Vector3::ZERO, Vector3::UNIT_X),
            Curve::polyline(vec![Vector3::UNIT_X, Vector3::new(1.0, 1.0, 0.0), Vector3::UNIT_Y]),
        ]));
        assert_eq!(polyline(&poly, TOL).unwrap().points.len(), 4);
        let with_arc = Curve::Poly(crate::native::PolyCurve::new(vec![
            Curve::line(Vector3::ZERO, Vector3::UNIT_X),
            Curve::arc(Arc::new(Plane::world_xy(), 1.0, Interval::new(0.0, 1.0))),
        ]));
        assert!(polyline(&with_arc, TOL).is_none());
    }

    #[test]
    fn test_solid_fits() {
        let s = Sphere::new(Vector3::new(0.0, 0.0, 1.0), 2.0).to_brep();
        let fitted_sphere = sphere(&s.surfaces[0], TOL).unwrap();
        assert!((fitted_sphere.radius - 2.0).abs() < 1e-9);
        assert!(cylinder(&s.surfaces[0], TOL).is_none());

        let c = Cone::new(Plane::world_xy(), 3.0, 1.0).to_brep();
        let fitted_cone = cone(&c.surfaces[0], TOL).unwrap();
        assert!((fitted_cone.height - 3.0).abs() < 1e-9);
        assert!(fitted_cone.base_point().almost_equal(&Vector3::new(0.0, 0.0, 3.0), 1e-9));

        let y = Cylinder::new(Circle::new(Plane::world_xy(), 1.5), 1.0, 4.0).to_brep();
        let fitted_cylinder = cylinder(&y.surfaces[0], TOL).unwrap();
        assert!((fitted_cylinder.total_height() - 3.0).abs() < 1e-9);
        assert!(fitted_cylinder.circle.center().almost_equal(&Vector3::new(0.0, 0.0, 1.0), 1e-9));

        let t = Torus::new(Plane::world_xy(), 3.0, 1.0).to_brep();
        let fitted_torus = torus(&t.surfaces[0], TOL).unwrap();
        assert!((fitted_torus.major_radius - 3.0).abs() < 1e-9);
        assert!(sphere(&t.surfaces[0], TOL).is_none());
    }

    #[test]
    fn test_partial_revolution_is_not_a_sphere() {
        let profile = Curve::arc(Arc::new(
            Plane::from_frame(Vector3::ZERO, Vector3::UNIT_X, Vector3::UNIT_Z),
            1.0,
            Interval::new(-FRAC_PI_2, FRAC_PI_2),
        ));
        let s = Surface::Revolution(RevSurface::new(profile, Line::new(Vector3::ZERO, Vector3::UNIT_Z), Interval::new(0.0, PI)));
        assert!(sphere(&s, TOL).is_none());
    }
}
