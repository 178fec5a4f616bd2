//! Curve joining, pushup, sweeps and extrusions

use super::fit;
use crate::native::brep::point_curve;
use crate::native::extrusion::translational_surface;
use crate::native::{Arc, ArcCurve, Brep, Curve, Extrusion, PolyCurve, Surface};
use crate::types::{Interval, Vector3};

/// Chain curves end to start, reversing pieces where needed
///
/// Every input curve ends up in exactly one output curve. Chains of more
/// than one piece come back as poly-curves.
pub fn join_curves(curves: &[Curve], tolerance: f64) -> Vec<Curve> {
    let mut remaining: Vec<Curve> = curves.to_vec();
    let mut joined = Vec::new();
    while !remaining.is_empty() {
        let mut chain = vec![remaining.remove(0)];
        loop {
            let head = chain[0].point_at_start();
            let tail = chain[chain.len() - 1].point_at_end();
            if chain.len() > 1 && head.distance(&tail) <= tolerance {
                break;
            }
            let found = remaining.iter().enumerate().find_map(|(i, c)| {
                let (s, e) = (c.point_at_start(), c.point_at_end());
                if s.distance(&tail) <= tolerance {
                    Some((i, false, false))
                } else if e.distance(&tail) <= tolerance {
                    Some((i, true, false))
                } else if e.distance(&head) <= tolerance {
                    Some((i, false, true))
                } else if s.distance(&head) <= tolerance {
                    Some((i, true, true))
                } else {
                    None
                }
            });
            let Some((i, reverse, prepend)) = found else {
                break;
            };
            let c = remaining.remove(i);
            let c = if reverse { c.reversed() } else { c };
            if prepend {
                chain.insert(0, c);
            } else {
                chain.push(c);
            }
        }
        joined.push(if chain.len() == 1 {
            chain.remove(0)
        } else {
            Curve::Poly(PolyCurve::new(chain))
        });
    }
    joined
}

/// 3d image of a parameter-space curve on `surface`
///
/// Exact on plane surfaces, for iso-curves spanning a full surface
/// direction, and for constant-v arcs on revolution surfaces. Anything else
/// comes back as a sampled polyline.
pub fn pushup(surface: &Surface, curve2d: &Curve, tolerance: f64) -> Option<Curve> {
    if let Surface::Plane(s) = surface {
        let plane = s.plane;
        return Some(curve2d.map_points(&move |p| plane.point_at(p.x, p.y)));
    }

    let (start, end) = (curve2d.point_at_start(), curve2d.point_at_end());
    if fit::line(curve2d, tolerance).is_some() || start.distance(&end) <= tolerance {
        if let Some(curve) = iso_pushup(surface, start.x, start.y, end.x, end.y, tolerance) {
            return Some(curve);
        }
    }

    let count = (32 * curve2d.span_count()).clamp(32, 1024);
    let points: Vec<Vector3> = curve2d
        .sample(count)
        .iter()
        .map(|p| surface.point_at(p.x, p.y))
        .collect();
    if points.iter().all(|p| p.distance(&points[0]) <= tolerance) {
        return Some(point_curve(points[0]));
    }
    Some(Curve::polyline(points))
}

fn iso_pushup(surface: &Surface, u0: f64, v0: f64, u1: f64, v1: f64, tolerance: f64) -> Option<Curve> {
    let (du, dv) = (surface.domain(0), surface.domain(1));
    let spans = |d: Interval, a: f64, b: f64| {
        ((a - d.t0).abs() <= tolerance && (b - d.t1).abs() <= tolerance)
            || ((a - d.t1).abs() <= tolerance && (b - d.t0).abs() <= tolerance)
    };
    let forward = |d: Interval, a: f64, b: f64| (b - a) * d.length() > 0.0;

    if (u0 - u1).abs() <= tolerance && (v0 - v1).abs() <= tolerance {
        let p = surface.point_at(u0, v0);
        return Some(point_curve(p));
    }
    if (v0 - v1).abs() <= tolerance {
        if let Surface::Revolution(_) = surface {
            return match surface.iso_curve(0, v0)? {
                Curve::Arc(full) => Some(arc_between(full, u0, u1)),
                collapsed => Some(collapsed),
            };
        }
        if spans(du, u0, u1) {
            let iso = surface.iso_curve(0, v0)?;
            return Some(if forward(du, u0, u1) { iso } else { iso.reversed() });
        }
    }
    if (u0 - u1).abs() <= tolerance && spans(dv, v0, v1) {
        let iso = surface.iso_curve(1, u0)?;
        return Some(if forward(dv, v0, v1) { iso } else { iso.reversed() });
    }
    None
}

/// Piece of `full` from angle `a0` to `a1`, which may run backwards
fn arc_between(full: ArcCurve, a0: f64, a1: f64) -> Curve {
    let arc = |t0, t1| Curve::arc(Arc::new(full.arc.plane, full.arc.radius, Interval::new(t0, t1)));
    if a1 >= a0 {
        arc(a0, a1)
    } else {
        arc(a1, a0).reversed()
    }
}

/// Sweep `profile` along the straight rail `rail_start -> rail_end`
pub fn sweep_one_rail(profile: &Curve, rail_start: Vector3, rail_end: Vector3) -> Vec<Brep> {
    translational_surface(profile, rail_end - rail_start)
        .map(|s| Brep::from_surface(Surface::Nurbs(s)))
        .into_iter()
        .collect()
}

/// Extrusion of a planar profile along its plane normal
///
/// A negative `height` extrudes against the normal.
pub fn create_extrusion(profile: &Curve, height: f64, capped: bool, tolerance: f64) -> Option<Extrusion> {
    if height.abs() <= tolerance {
        return None;
    }
    let plane = fit::plane(profile, tolerance)?;
    let start = plane.origin;
    Some(Extrusion::new(
        profile.clone(),
        start,
        start + plane.z_axis * height,
        capped && profile.is_closed(tolerance),
    ))
}
