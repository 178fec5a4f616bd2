//! Planar regions bounded by closed curves
//!
//! Faces are built by nesting depth: a curve inside an even number of other
//! curves bounds a face, one inside an odd number is a hole of its nearest
//! container. The region difference works on sampled polygons: every edge is
//! split where it meets another polygon, each piece is kept or dropped by
//! probing just beside it, and the kept pieces are chained back into loops.

use super::fit;
use crate::native::brep::signed_area;
use crate::native::{Brep, Curve, Plane};
use crate::types::{BoundingBox2D, Vector2};

/// Winding-number containment test
pub fn point_in_polygon(point: Vector2, polygon: &[Vector2]) -> bool {
    if polygon.len() < 3 {
        return false;
    }
    let mut winding = 0i32;
    let n = polygon.len();
    for i in 0..n {
        let (p1, p2) = (polygon[i], polygon[(i + 1) % n]);
        if p1.y <= point.y {
            if p2.y > point.y && is_left(p1, p2, point) > 0.0 {
                winding += 1;
            }
        } else if p2.y <= point.y && is_left(p1, p2, point) < 0.0 {
            winding -= 1;
        }
    }
    winding != 0
}

fn is_left(p0: Vector2, p1: Vector2, p2: Vector2) -> f64 {
    (p1.x - p0.x) * (p2.y - p0.y) - (p2.x - p0.x) * (p1.y - p0.y)
}

fn distance_to_segment(p: Vector2, a: Vector2, b: Vector2) -> f64 {
    let ab = b - a;
    let len2 = ab.dot(&ab);
    let t = if len2 == 0.0 { 0.0 } else { ((p - a).dot(&ab) / len2).clamp(0.0, 1.0) };
    p.distance(&(a + ab * t))
}

fn on_boundary(p: Vector2, polygon: &[Vector2], tolerance: f64) -> bool {
    let n = polygon.len();
    (0..n).any(|i| distance_to_segment(p, polygon[i], polygon[(i + 1) % n]) <= tolerance)
}

/// Closed curve as a polygon in plane coordinates, without the repeated end point
fn polygon(curve: &Curve, plane: &Plane, tolerance: f64) -> Vec<Vector2> {
    let mut points: Vec<Vector2> = curve
        .sample_dense(32)
        .iter()
        .map(|p| plane.to_local(*p).to_2d())
        .collect();
    if points.len() > 1 && points[0].distance(&points[points.len() - 1]) <= tolerance {
        points.pop();
    }
    points
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Containment {
    Inside,
    Outside,
    Overlapping,
}

/// Where `inner` lies relative to `outer`; samples on the boundary do not count
fn classify(inner: &[Vector2], outer: &[Vector2], tolerance: f64) -> Containment {
    let (mut inside, mut outside) = (false, false);
    for p in inner {
        if on_boundary(*p, outer, tolerance) {
            continue;
        }
        if point_in_polygon(*p, outer) {
            inside = true;
        } else {
            outside = true;
        }
    }
    match (inside, outside) {
        (true, false) => Containment::Inside,
        (false, true) => Containment::Outside,
        // crossing, or lying entirely on the other boundary
        _ => Containment::Overlapping,
    }
}

fn coplanar(a: &Plane, b: &Plane, tolerance: f64) -> bool {
    a.z_axis.cross(&b.z_axis).length() <= 1e-6 && a.distance_to(b.origin).abs() <= tolerance
}

/// One planar face per outer region of the closed planar `curves`
///
/// Open or non-planar curves are ignored. Curves that partially overlap
/// each give their own face.
pub fn create_planar_breps(curves: &[Curve], tolerance: f64) -> Vec<Brep> {
    let mut pending: Vec<(&Curve, Plane)> = curves
        .iter()
        .filter(|c| c.is_closed(tolerance))
        .filter_map(|c| fit::plane(c, tolerance).map(|p| (c, p)))
        .collect();
    let mut breps = Vec::new();
    while let Some(&(_, plane)) = pending.first() {
        let (group, rest): (Vec<_>, Vec<_>) = pending
            .into_iter()
            .partition(|(_, p)| coplanar(&plane, p, tolerance));
        pending = rest;
        breps.extend(faces_in_plane(&plane, &group, tolerance));
    }
    breps
}

fn faces_in_plane(plane: &Plane, group: &[(&Curve, Plane)], tolerance: f64) -> Vec<Brep> {
    let polygons: Vec<Vec<Vector2>> = group.iter().map(|(c, _)| polygon(c, plane, tolerance)).collect();
    let areas: Vec<f64> = polygons.iter().map(|p| signed_area(p).abs()).collect();
    let n = group.len();

    let containers: Vec<Vec<usize>> = (0..n)
        .map(|j| {
            (0..n)
                .filter(|&i| {
                    i != j
                        && areas[i] > areas[j]
                        && classify(&polygons[j], &polygons[i], tolerance) == Containment::Inside
                })
                .collect()
        })
        .collect();

    let mut breps = Vec::new();
    for i in (0..n).filter(|&i| containers[i].len() % 2 == 0) {
        let depth = containers[i].len();
        let holes: Vec<Curve> = (0..n)
            .filter(|&j| containers[j].len() == depth + 1 && containers[j].contains(&i))
            .map(|j| group[j].0.clone())
            .collect();
        let (outer, outer_plane) = group[i];
        breps.push(Brep::from_planar_loops(outer_plane, outer, &holes, tolerance));
    }
    breps
}

type Segment = (Vector2, Vector2);

/// Region of `outer` not covered by any of `inners`
///
/// Returns closed polylines in the plane of `outer`: boundaries of the
/// remaining pieces run counterclockwise, holes clockwise. Curved input is
/// sampled.
pub fn boolean_difference(outer: &Curve, inners: &[Curve], tolerance: f64) -> Vec<Curve> {
    let Some(plane) = fit::plane(outer, tolerance) else {
        return Vec::new();
    };
    let counterclockwise = |c: &Curve| {
        let mut p = polygon(c, &plane, tolerance);
        if signed_area(&p) < 0.0 {
            p.reverse();
        }
        p
    };
    let mut polygons = vec![counterclockwise(outer)];
    polygons.extend(inners.iter().map(counterclockwise).filter(|p| p.len() >= 3));
    if polygons[0].len() < 3 {
        return Vec::new();
    }

    let all: Vec<Vector2> = polygons.iter().flatten().copied().collect();
    let scale = BoundingBox2D::from_points(&all)
        .map(|b| b.min.distance(&b.max))
        .unwrap_or(1.0)
        .max(tolerance);
    let snap = tolerance.max(scale * 1e-9);
    let probe = (scale * 1e-6).max(snap * 4.0);

    let mut kept: Vec<Segment> = Vec::new();
    for (start, end) in split_edges(0, &polygons, snap) {
        let inside = beside(start, end, probe);
        if !polygons[1..].iter().any(|h| point_in_polygon(inside, h)) {
            kept.push((start, end));
        }
    }
    for k in 1..polygons.len() {
        for (start, end) in split_edges(k, &polygons, snap) {
            let outside = beside(start, end, -probe);
            let covered = polygons[1..]
                .iter()
                .enumerate()
                .any(|(m, h)| m + 1 != k && point_in_polygon(outside, h));
            if point_in_polygon(outside, &polygons[0]) && !covered {
                kept.push((end, start));
            }
        }
    }

    let mut unique: Vec<Segment> = Vec::with_capacity(kept.len());
    for s in kept {
        if !unique
            .iter()
            .any(|u| u.0.distance(&s.0) <= snap && u.1.distance(&s.1) <= snap)
        {
            unique.push(s);
        }
    }

    chain(&unique, snap)
        .into_iter()
        .map(|ring| {
            let mut points: Vec<_> = ring.iter().map(|p| plane.point_at(p.x, p.y)).collect();
            points.push(points[0]);
            Curve::polyline(points)
        })
        .collect()
}

/// Midpoint of the segment moved `offset` to its left
fn beside(start: Vector2, end: Vector2, offset: f64) -> Vector2 {
    let d = end - start;
    let len = d.length().max(f64::MIN_POSITIVE);
    let normal = Vector2::new(-d.y / len, d.x / len);
    (start + end) * 0.5 + normal * offset
}

/// Edges of `polygons[index]` split wherever another polygon touches them
fn split_edges(index: usize, polygons: &[Vec<Vector2>], snap: f64) -> Vec<Segment> {
    let poly = &polygons[index];
    let n = poly.len();
    let mut pieces = Vec::new();
    for k in 0..n {
        let (a, b) = (poly[k], poly[(k + 1) % n]);
        let r = b - a;
        let len = r.length();
        if len <= snap {
            continue;
        }
        let eps = snap / len;
        let mut ts = Vec::new();
        for (m, other) in polygons.iter().enumerate() {
            if m == index {
                continue;
            }
            for l in 0..other.len() {
                let (c, d) = (other[l], other[(l + 1) % other.len()]);
                let s = d - c;
                let ac = c - a;
                let denom = r.cross(&s);
                if denom.abs() > 1e-12 * len * s.length() {
                    let t = ac.cross(&s) / denom;
                    let u = ac.cross(&r) / denom;
                    let eps_u = snap / s.length().max(f64::MIN_POSITIVE);
                    if (-eps_u..=1.0 + eps_u).contains(&u) {
                        ts.push(t);
                    }
                } else if ac.cross(&r).abs() <= snap * len {
                    // collinear overlap: split at the other segment's ends
                    ts.push(ac.dot(&r) / (len * len));
                    ts.push((d - a).dot(&r) / (len * len));
                }
            }
        }
        ts.retain(|t| *t > eps && *t < 1.0 - eps);
        ts.sort_by(f64::total_cmp);
        let mut last = 0.0;
        let mut from = a;
        for t in ts {
            if t - last <= eps {
                continue;
            }
            let to = a + r * t;
            pieces.push((from, to));
            from = to;
            last = t;
        }
        pieces.push((from, b));
    }
    pieces
}

/// Chain directed segments into closed rings, taking the sharpest left turn at branch points
fn chain(segments: &[Segment], snap: f64) -> Vec<Vec<Vector2>> {
    let mut used = vec![false; segments.len()];
    let mut rings = Vec::new();
    for first in 0..segments.len() {
        if used[first] {
            continue;
        }
        used[first] = true;
        let (start, mut end) = segments[first];
        let mut ring = vec![start];
        let mut heading = end - start;
        let closed = loop {
            if end.distance(&start) <= snap {
                break true;
            }
            let next = (0..segments.len())
                .filter(|&i| !used[i] && segments[i].0.distance(&end) <= snap)
                .max_by(|&i, &j| {
                    let turn = |k: usize| {
                        let d = segments[k].1 - segments[k].0;
                        heading.cross(&d).atan2(heading.dot(&d))
                    };
                    turn(i).total_cmp(&turn(j))
                });
            let Some(i) = next else {
                break false;
            };
            used[i] = true;
            ring.push(end);
            heading = segments[i].1 - segments[i].0;
            end = segments[i].1;
        };
        if closed {
            let ring = drop_collinear(ring, snap);
            if ring.len() >= 3 && signed_area(&ring).abs() > snap * snap {
                rings.push(ring);
            }
        }
    }
    rings
}

fn drop_collinear(mut ring: Vec<Vector2>, snap: f64) -> Vec<Vector2> {
    let mut changed = true;
    while changed && ring.len() > 3 {
        changed = false;
        let n = ring.len();
        for i in 0..n {
            let (p, q, r) = (ring[(i + n - 1) % n], ring[i], ring[(i + 1) % n]);
            let (d1, d2) = (q - p, r - q);
            let straight = d1.cross(&d2).abs() <= snap * (d1.length() + d2.length()) && d1.dot(&d2) > 0.0;
            if d1.length() <= snap || straight {
                ring.remove(i);
                changed = true;
                break;
            }
        }
    }
    ring
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::native::{Arc, LoopType};
    use crate::types::{Interval, Vector3};
    use std::f64::consts::TAU;

    const TOL: f64 = 1e-6;

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Curve {
        Curve::polyline(vec![
            Vector3::new(x0, y0, 0.0),
            Vector3::new(x1, y0, 0.0),
            Vector3::new(x1, y1, 0.0),
            Vector3::new(x0, y1, 0.0),
            Vector3::new(x0, y0, 0.0),
        ])
    }

    fn areas(curves: &[Curve]) -> Vec<f64> {
        let mut a: Vec<f64> = curves
            .iter()
            .map(|c| {
                let pts: Vec<Vector2> = c.sample_dense(1).iter().map(|p| p.to_2d()).collect();
                signed_area(&pts[..pts.len() - 1])
            })
            .collect();
        a.sort_by(f64::total_cmp);
        a
    }

    #[test]
    fn test_point_in_polygon() {
        let square = [Vector2::new(0.0, 0.0), Vector2::new(2.0, 0.0), Vector2::new(2.0, 2.0), Vector2::new(0.0, 2.0)];
        assert!(point_in_polygon(Vector2::new(1.0, 1.0), &square));
        assert!(!point_in_polygon(Vector2::new(3.0, 1.0), &square));
    }

    #[test]
    fn test_nested_curves_make_one_face() {
        let breps = create_planar_breps(&[rect(0.0, 0.0, 10.0, 10.0), rect(2.0, 2.0, 4.0, 4.0)], TOL);
        assert_eq!(breps.len(), 1);
        let face = &breps[0].faces[0];
        assert_eq!(face.loops.len(), 2);
        assert_eq!(breps[0].loops[face.loops[1]].loop_type, LoopType::Inner);
    }

    #[test]
    fn test_island_in_hole_is_its_own_face() {
        let curves = [rect(0.0, 0.0, 10.0, 10.0), rect(2.0, 2.0, 8.0, 8.0), rect(4.0, 4.0, 6.0, 6.0)];
        let breps = create_planar_breps(&curves, TOL);
        assert_eq!(breps.len(), 2);
    }

    #[test]
    fn test_overlapping_curves_make_separate_faces() {
        let breps = create_planar_breps(&[rect(0.0, 0.0, 10.0, 10.0), rect(8.0, 2.0, 12.0, 4.0)], TOL);
        assert_eq!(breps.len(), 2);
    }

    #[test]
    fn test_difference_keeps_inner_hole() {
        let result = boolean_difference(&rect(0.0, 0.0, 10.0, 10.0), &[rect(2.0, 2.0, 4.0, 4.0)], TOL);
        let a = areas(&result);
        assert_eq!(a.len(), 2);
        assert!((a[0] + 4.0).abs() < 1e-9);
        assert!((a[1] - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_difference_clips_crossing_inner() {
        let result = boolean_difference(&rect(0.0, 0.0, 10.0, 10.0), &[rect(8.0, 2.0, 12.0, 4.0)], TOL);
        let a = areas(&result);
        assert_eq!(a.len(), 1);
        assert!((a[0] - 96.0).abs() < 1e-9);
        assert_eq!(result[0].span_count(), 8);
    }

    #[test]
    fn test_difference_with_shared_edges() {
        let result = boolean_difference(&rect(0.0, 0.0, 10.0, 10.0), &[rect(0.0, 0.0, 2.0, 2.0)], TOL);
        let a = areas(&result);
        assert_eq!(a.len(), 1);
        assert!((a[0] - 96.0).abs() < 1e-9);
    }

    #[test]
    fn test_difference_covered_outer_is_empty() {
        let result = boolean_difference(&rect(0.0, 0.0, 10.0, 10.0), &[rect(-1.0, -1.0, 11.0, 11.0)], TOL);
        assert!(result.is_empty());
    }

    #[test]
    fn test_difference_splits_into_pieces() {
        let result = boolean_difference(&rect(0.0, 0.0, 10.0, 10.0), &[rect(-1.0, 4.0, 11.0, 6.0)], TOL);
        let a = areas(&result);
        assert_eq!(a.len(), 2);
        assert!((a[0] - 40.0).abs() < 1e-9 && (a[1] - 40.0).abs() < 1e-9);
        assert_eq!(create_planar_breps(&result, TOL).len(), 2);
    }

    #[test]
    fn test_difference_with_circle() {
        let circle = Curve::arc(Arc::new(Plane::world_xy(), 2.0, Interval::new(0.0, TAU)));
        let result = boolean_difference(&rect(-1.0, -1.0, 1.0, 1.0), &[circle], TOL);
        assert!(result.is_empty());
    }
}
