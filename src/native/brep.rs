//! Boundary representation topology
//!
//! A [`Brep`] stores geometry in flat pools (`surfaces`, `curves2d`,
//! `curves3d`) and topology in index-linked records:
//!
//! ```text
//! face -> loops -> trims -> edge -> vertices
//!   \-> surface     \-> curve2d  \-> curve3d
//! ```
//!
//! Every edge curve runs from `vertices[0]` to `vertices[1]`. A trim with
//! `reversed` set runs against its edge. Trims run counterclockwise around
//! outer loops and clockwise around inner loops, in surface parameter space.

use super::curve::{Curve, LineCurve};
use super::plane::Plane;
use super::primitives::Line;
use super::surface::{PlaneSurface, Surface};
use crate::types::{BoundingBox2D, Interval, Vector2, Vector3};
use std::fmt::Write as _;

/// Default tolerance used when the caller gives none
pub const BREP_TOLERANCE: f64 = 1e-5;

/// Where a trim lies relative to the surface parameter rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IsoStatus {
    #[default]
    None,
    /// Constant u (an x-iso curve in parameter space)
    X,
    /// Constant v
    Y,
    West,
    South,
    East,
    North,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TrimType {
    #[default]
    Unknown,
    /// The only trim on its edge
    Boundary,
    /// Shares its edge with a trim of another face
    Mated,
    /// Shares its edge with a trim of the same face
    Seam,
    /// Collapsed side at a pole; has no edge
    Singular,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoopType {
    Outer,
    Inner,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BrepVertex {
    pub point: Vector3,
    pub tolerance: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BrepEdge {
    pub curve3d: usize,
    pub vertices: [usize; 2],
    pub trims: Vec<usize>,
    pub tolerance: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BrepTrim {
    pub curve2d: usize,
    pub edge: Option<usize>,
    pub vertices: [usize; 2],
    pub loop_index: usize,
    pub iso: IsoStatus,
    pub trim_type: TrimType,
    pub reversed: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BrepLoop {
    pub face: usize,
    pub trims: Vec<usize>,
    pub loop_type: LoopType,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BrepFace {
    pub surface: usize,
    pub loops: Vec<usize>,
    pub reversed: bool,
}

/// Boundary representation
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Brep {
    pub surfaces: Vec<Surface>,
    pub curves2d: Vec<Curve>,
    pub curves3d: Vec<Curve>,
    pub vertices: Vec<BrepVertex>,
    pub edges: Vec<BrepEdge>,
    pub trims: Vec<BrepTrim>,
    pub loops: Vec<BrepLoop>,
    pub faces: Vec<BrepFace>,
}

/// Check whether two curves trace the same geometry.
///
/// `samples + 1` points of `a` are projected onto `b`; each must land within
/// `tolerance`. Returns `Some(false)` when the curves run the same way,
/// `Some(true)` when they run in opposite directions.
pub fn curve_overlap(a: &Curve, b: &Curve, samples: usize, tolerance: f64) -> Option<bool> {
    let projector = CurveProjector::new(b);
    let da = a.domain();
    let mut params = Vec::with_capacity(samples + 1);
    for i in 0..=samples {
        let p = a.point_at(da.parameter_at(i as f64 / samples.max(1) as f64));
        let (t, distance) = projector.project(p);
        if distance > tolerance {
            return None;
        }
        params.push(t);
    }
    // compare the order of two interior samples, away from a closed curve's seam
    let (i, j) = (samples * 3 / 10, samples * 9 / 20);
    let forward = if i < j && params[i] != params[j] {
        params[j] > params[i]
    } else {
        a.point_at_start().distance(&b.point_at_start()) <= tolerance
    };
    Some(!forward)
}

/// Closest-point queries against a fixed curve
pub struct CurveProjector<'a> {
    curve: &'a Curve,
    coarse: Vec<(f64, Vector3)>,
}

impl<'a> CurveProjector<'a> {
    pub fn new(curve: &'a Curve) -> Self {
        let n = (32 * curve.span_count().max(1)).min(512);
        let domain = curve.domain();
        let coarse = (0..=n)
            .map(|i| {
                let t = domain.parameter_at(i as f64 / n as f64);
                (t, curve.point_at(t))
            })
            .collect();
        CurveProjector { curve, coarse }
    }

    /// Parameter of the closest point and its distance
    pub fn project(&self, p: Vector3) -> (f64, f64) {
        let Some(best) = (0..self.coarse.len()).min_by(|&x, &y| {
            p.distance(&self.coarse[x].1).total_cmp(&p.distance(&self.coarse[y].1))
        }) else {
            return (0.0, f64::INFINITY);
        };
        let mut lo = self.coarse[best.saturating_sub(1)].0;
        let mut hi = self.coarse[(best + 1).min(self.coarse.len() - 1)].0;
        if lo > hi {
            std::mem::swap(&mut lo, &mut hi);
        }
        // golden-section search on the bracketing interval
        let ratio = 0.5 * (5f64.sqrt() - 1.0);
        let dist = |t: f64| p.distance(&self.curve.point_at(t));
        let mut x1 = hi - ratio * (hi - lo);
        let mut x2 = lo + ratio * (hi - lo);
        let (mut f1, mut f2) = (dist(x1), dist(x2));
        for _ in 0..60 {
            if f1 < f2 {
                hi = x2;
                x2 = x1;
                f2 = f1;
                x1 = hi - ratio * (hi - lo);
                f1 = dist(x1);
            } else {
                lo = x1;
                x1 = x2;
                f1 = f2;
                x2 = lo + ratio * (hi - lo);
                f2 = dist(x2);
            }
        }
        let t = 0.5 * (lo + hi);
        let refined = dist(t);
        let coarse = p.distance(&self.coarse[best].1);
        if coarse < refined {
            (self.coarse[best].0, coarse)
        } else {
            (t, refined)
        }
    }
}

impl Brep {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_surface(&mut self, surface: Surface) -> usize {
        self.surfaces.push(surface);
        self.surfaces.len() - 1
    }

    pub fn add_curve2d(&mut self, curve: Curve) -> usize {
        self.curves2d.push(curve);
        self.curves2d.len() - 1
    }

    pub fn add_curve3d(&mut self, curve: Curve) -> usize {
        self.curves3d.push(curve);
        self.curves3d.len() - 1
    }

    pub fn add_vertex(&mut self, point: Vector3) -> usize {
        self.vertices.push(BrepVertex {
            point,
            tolerance: 0.0,
        });
        self.vertices.len() - 1
    }

    /// Index of an existing vertex within `tolerance` of `point`, or a new one
    pub fn find_or_add_vertex(&mut self, point: Vector3, tolerance: f64) -> usize {
        match self
            .vertices
            .iter()
            .position(|v| v.point.distance(&point) <= tolerance)
        {
            Some(i) => i,
            None => self.add_vertex(point),
        }
    }

    pub fn add_edge(&mut self, curve3d: usize, start: usize, end: usize, tolerance: f64) -> usize {
        self.edges.push(BrepEdge {
            curve3d,
            vertices: [start, end],
            trims: Vec::new(),
            tolerance,
        });
        self.edges.len() - 1
    }

    pub fn add_face(&mut self, surface: usize, reversed: bool) -> usize {
        self.faces.push(BrepFace {
            surface,
            loops: Vec::new(),
            reversed,
        });
        self.faces.len() - 1
    }

    pub fn add_loop(&mut self, face: usize, loop_type: LoopType) -> usize {
        self.loops.push(BrepLoop {
            face,
            trims: Vec::new(),
            loop_type,
        });
        let index = self.loops.len() - 1;
        if let Some(f) = self.faces.get_mut(face) {
            f.loops.push(index);
        }
        index
    }

    /// Add a trim running along (or against, if `reversed`) an edge
    pub fn add_trim(
        &mut self,
        curve2d: usize,
        edge: usize,
        loop_index: usize,
        reversed: bool,
        iso: IsoStatus,
    ) -> usize {
        let [a, b] = self.edges.get(edge).map(|e| e.vertices).unwrap_or([0, 0]);
        let vertices = if reversed { [b, a] } else { [a, b] };
        let index = self.push_trim(BrepTrim {
            curve2d,
            edge: Some(edge),
            vertices,
            loop_index,
            iso,
            trim_type: TrimType::Unknown,
            reversed,
        });
        if let Some(e) = self.edges.get_mut(edge) {
            e.trims.push(index);
        }
        index
    }

    /// Add a singular trim collapsed onto `vertex`
    pub fn add_singular_trim(
        &mut self,
        curve2d: usize,
        vertex: usize,
        loop_index: usize,
        iso: IsoStatus,
    ) -> usize {
        self.push_trim(BrepTrim {
            curve2d,
            edge: None,
            vertices: [vertex, vertex],
            loop_index,
            iso,
            trim_type: TrimType::Singular,
            reversed: false,
        })
    }

    fn push_trim(&mut self, trim: BrepTrim) -> usize {
        let loop_index = trim.loop_index;
        self.trims.push(trim);
        let index = self.trims.len() - 1;
        if let Some(l) = self.loops.get_mut(loop_index) {
            l.trims.push(index);
        }
        index
    }

    /// Single-face brep covering the whole parameter rectangle of `surface`
    ///
    /// Collapsed sides become singular trims and coincident opposite sides
    /// share one seam edge.
    pub fn from_surface(surface: Surface) -> Brep {
        Self::from_surface_with_tolerance(surface, BREP_TOLERANCE)
    }

    pub fn from_surface_with_tolerance(surface: Surface, tolerance: f64) -> Brep {
        let mut brep = Brep::new();
        let (du, dv) = (surface.domain(0), surface.domain(1));
        let (u0, u1, v0, v1) = (du.t0, du.t1, dv.t0, dv.t1);

        let side_points = |fixed_u: Option<f64>, fixed_v: Option<f64>| -> Vec<Vector3> {
            (0..=16)
                .map(|i| {
                    let s = i as f64 / 16.0;
                    match (fixed_u, fixed_v) {
                        (Some(u), _) => surface.point_at(u, dv.parameter_at(s)),
                        (_, Some(v)) => surface.point_at(du.parameter_at(s), v),
                        _ => Vector3::ZERO,
                    }
                })
                .collect()
        };
        let collapsed = |pts: &[Vector3]| pts.iter().all(|p| p.distance(&pts[0]) <= tolerance);
        let same = |a: &[Vector3], b: &[Vector3]| a.iter().zip(b).all(|(p, q)| p.distance(q) <= tolerance);

        let south = side_points(None, Some(v0));
        let north = side_points(None, Some(v1));
        let west = side_points(Some(u0), None);
        let east = side_points(Some(u1), None);
        let u_seam = !collapsed(&west) && same(&west, &east);
        let v_seam = !collapsed(&south) && same(&south, &north);

        let s_index = brep.add_surface(surface.clone());
        let face = brep.add_face(s_index, false);
        let outer = brep.add_loop(face, LoopType::Outer);

        let corners = [
            surface.point_at(u0, v0),
            surface.point_at(u1, v0),
            surface.point_at(u1, v1),
            surface.point_at(u0, v1),
        ];
        let mut corner_vertex = [0usize; 4];
        for (i, p) in corners.iter().enumerate() {
            corner_vertex[i] = brep.find_or_add_vertex(*p, tolerance);
        }

        // sides in loop order: (iso, 2d start, 2d end, start corner, end corner, natural direction)
        let sides = [
            (IsoStatus::South, (u0, v0), (u1, v0), 0usize, 1usize, true),
            (IsoStatus::East, (u1, v0), (u1, v1), 1, 2, true),
            (IsoStatus::North, (u1, v1), (u0, v1), 2, 3, false),
            (IsoStatus::West, (u0, v1), (u0, v0), 3, 0, false),
        ];
        let mut side_edges: [Option<usize>; 4] = [None; 4];

        for (k, (iso, a, b, ca, cb, natural)) in sides.iter().enumerate() {
            let c2 = brep.add_curve2d(Curve::line(
                Vector3::new(a.0, a.1, 0.0),
                Vector3::new(b.0, b.1, 0.0),
            ));
            let pts = match iso {
                IsoStatus::South => &south,
                IsoStatus::North => &north,
                IsoStatus::West => &west,
                _ => &east,
            };
            if collapsed(pts) {
                brep.add_singular_trim(c2, corner_vertex[*ca], outer, *iso);
                continue;
            }
            // north reuses south, west reuses east
            let partner = match iso {
                IsoStatus::North if v_seam => side_edges[0],
                IsoStatus::West if u_seam => side_edges[1],
                _ => None,
            };
            let edge = match partner {
                Some(e) => e,
                None => {
                    let iso_curve = match iso {
                        IsoStatus::South => surface.iso_curve(0, v0),
                        IsoStatus::North => surface.iso_curve(0, v1),
                        IsoStatus::West => surface.iso_curve(1, u0),
                        _ => surface.iso_curve(1, u1),
                    };
                    let (start, end) = if *natural {
                        (corner_vertex[*ca], corner_vertex[*cb])
                    } else {
                        (corner_vertex[*cb], corner_vertex[*ca])
                    };
                    let curve = iso_curve.unwrap_or_else(|| {
                        Curve::line(brep.vertices[start].point, brep.vertices[end].point)
                    });
                    let c3 = brep.add_curve3d(curve);
                    brep.add_edge(c3, start, end, tolerance)
                }
            };
            side_edges[k] = Some(edge);
            brep.add_trim(c2, edge, outer, !natural, *iso);
        }
        brep.set_trim_types();
        brep
    }

    /// Planar face bounded by closed curves lying in `plane`
    ///
    /// Loop orientation is normalized: the outer loop runs counterclockwise
    /// in plane coordinates and inner loops clockwise.
    pub fn from_planar_loops(plane: Plane, outer: &Curve, inners: &[Curve], tolerance: f64) -> Brep {
        let mut brep = Brep::new();
        let mut extents: Vec<Vector2> = outer
            .sample_dense(16)
            .iter()
            .map(|p| plane.to_local(*p).to_2d())
            .collect();
        for inner in inners {
            extents.extend(inner.sample_dense(16).iter().map(|p| plane.to_local(*p).to_2d()));
        }
        let bounds = BoundingBox2D::from_points(&extents).unwrap_or_default();
        let pad = (bounds.max.x - bounds.min.x).max(bounds.max.y - bounds.min.y).max(1.0) * 0.01;
        let surface = Surface::Plane(PlaneSurface::new(
            plane,
            Interval::new(bounds.min.x - pad, bounds.max.x + pad),
            Interval::new(bounds.min.y - pad, bounds.max.y + pad),
        ));
        let s = brep.add_surface(surface);
        let face = brep.add_face(s, false);
        brep.add_planar_loop(face, &plane, outer, LoopType::Outer, tolerance);
        for inner in inners {
            brep.add_planar_loop(face, &plane, inner, LoopType::Inner, tolerance);
        }
        brep.set_trim_types();
        brep
    }

    fn add_planar_loop(
        &mut self,
        face: usize,
        plane: &Plane,
        curve: &Curve,
        loop_type: LoopType,
        tolerance: f64,
    ) {
        let polygon: Vec<Vector2> = curve
            .sample_dense(16)
            .iter()
            .map(|p| plane.to_local(*p).to_2d())
            .collect();
        let ccw = signed_area(&polygon) >= 0.0;
        let want_ccw = loop_type == LoopType::Outer;
        let oriented = if ccw == want_ccw { curve.clone() } else { curve.reversed() };

        let l = self.add_loop(face, loop_type);
        for segment in line_segments(&oriented) {
            let start = self.find_or_add_vertex(segment.point_at_start(), tolerance);
            let end = self.find_or_add_vertex(segment.point_at_end(), tolerance);
            let c2 = self.add_curve2d(segment.transformed_2d(plane));
            let c3 = self.add_curve3d(segment);
            let e = self.add_edge(c3, start, end, tolerance);
            self.add_trim(c2, e, l, false, IsoStatus::None);
        }
    }

    /// Recompute trim types from the edge sharing pattern
    pub fn set_trim_types(&mut self) {
        for t in 0..self.trims.len() {
            let trim_type = match self.trims[t].edge {
                None => TrimType::Singular,
                Some(e) => {
                    let shared = self.edges.get(e).map(|e| e.trims.clone()).unwrap_or_default();
                    if shared.len() < 2 {
                        TrimType::Boundary
                    } else {
                        let face = self.trim_face(t);
                        let same_face = shared
                            .iter()
                            .filter(|&&o| o != t)
                            .any(|&o| self.trim_face(o) == face);
                        if same_face {
                            TrimType::Seam
                        } else {
                            TrimType::Mated
                        }
                    }
                }
            };
            self.trims[t].trim_type = trim_type;
        }
    }

    fn trim_face(&self, trim: usize) -> Option<usize> {
        let l = self.trims.get(trim)?.loop_index;
        Some(self.loops.get(l)?.face)
    }

    /// Validity check with a human-readable log of every problem found
    pub fn is_valid_with_log(&self) -> (bool, String) {
        let mut log = String::new();
        for (fi, face) in self.faces.iter().enumerate() {
            if face.surface >= self.surfaces.len() {
                let _ = writeln!(log, "face {fi} references missing surface {}", face.surface);
            } else if !self.surfaces[face.surface].is_valid() {
                let _ = writeln!(log, "face {fi} has an invalid surface");
            }
            if face.loops.is_empty() {
                let _ = writeln!(log, "face {fi} has no loops");
            }
            for (k, &li) in face.loops.iter().enumerate() {
                let Some(lp) = self.loops.get(li) else {
                    let _ = writeln!(log, "face {fi} references missing loop {li}");
                    continue;
                };
                if lp.face != fi {
                    let _ = writeln!(log, "loop {li} does not point back to face {fi}");
                }
                if (k == 0) != (lp.loop_type == LoopType::Outer) {
                    let _ = writeln!(log, "face {fi} must have exactly one outer loop, listed first");
                }
            }
        }
        for (li, lp) in self.loops.iter().enumerate() {
            if lp.trims.is_empty() {
                let _ = writeln!(log, "loop {li} has no trims");
                continue;
            }
            for &ti in &lp.trims {
                let Some(trim) = self.trims.get(ti) else {
                    let _ = writeln!(log, "loop {li} references missing trim {ti}");
                    continue;
                };
                if trim.loop_index != li {
                    let _ = writeln!(log, "trim {ti} does not point back to loop {li}");
                }
            }
            let ends: Vec<Option<(Vector3, Vector3)>> = lp
                .trims
                .iter()
                .map(|&ti| {
                    let c = self.curves2d.get(self.trims.get(ti)?.curve2d)?;
                    Some((c.point_at_start(), c.point_at_end()))
                })
                .collect();
            for i in 0..ends.len() {
                let next = (i + 1) % ends.len();
                if let (Some((_, end)), Some((start, _))) = (ends[i], ends[next]) {
                    let tol = BREP_TOLERANCE * (1.0 + end.length());
                    if end.distance(&start) > tol {
                        let _ = writeln!(
                            log,
                            "loop {li} is not closed in parameter space between trims {} and {}",
                            lp.trims[i], lp.trims[next]
                        );
                    }
                }
            }
        }
        for (ti, trim) in self.trims.iter().enumerate() {
            if trim.curve2d >= self.curves2d.len() {
                let _ = writeln!(log, "trim {ti} references missing 2d curve {}", trim.curve2d);
            }
            if trim.vertices.iter().any(|&v| v >= self.vertices.len()) {
                let _ = writeln!(log, "trim {ti} references a missing vertex");
            }
            match trim.edge {
                Some(e) if e >= self.edges.len() => {
                    let _ = writeln!(log, "trim {ti} references missing edge {e}");
                }
                Some(e) if !self.edges[e].trims.contains(&ti) => {
                    let _ = writeln!(log, "edge {e} does not list trim {ti}");
                }
                None if trim.trim_type != TrimType::Singular => {
                    let _ = writeln!(log, "trim {ti} has no edge but is not singular");
                }
                _ => {}
            }
        }
        for (ei, edge) in self.edges.iter().enumerate() {
            let Some(curve) = self.curves3d.get(edge.curve3d) else {
                let _ = writeln!(log, "edge {ei} references missing 3d curve {}", edge.curve3d);
                continue;
            };
            if edge.trims.is_empty() {
                let _ = writeln!(log, "edge {ei} has no trims");
            }
            let tol = edge.tolerance.max(BREP_TOLERANCE);
            for (k, p) in [curve.point_at_start(), curve.point_at_end()].iter().enumerate() {
                match self.vertices.get(edge.vertices[k]) {
                    Some(v) if v.point.distance(p) <= tol * (1.0 + p.length()) => {}
                    Some(_) => {
                        let _ = writeln!(log, "edge {ei} curve end {k} is away from vertex {}", edge.vertices[k]);
                    }
                    None => {
                        let _ = writeln!(log, "edge {ei} references missing vertex {}", edge.vertices[k]);
                    }
                }
            }
        }
        (log.is_empty(), log)
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid_with_log().0
    }

    /// True for a closed, non-degenerate solid
    pub fn is_solid(&self) -> bool {
        !self.faces.is_empty()
            && self.edges.iter().all(|e| e.trims.len() == 2)
            && self.volume().abs() > BREP_TOLERANCE
    }

    /// Single planar face
    pub fn is_planar_surface(&self, tolerance: f64) -> bool {
        self.faces.len() == 1
            && self
                .surfaces
                .get(self.faces[0].surface)
                .is_some_and(|s| s.is_planar(tolerance))
    }

    /// Polygon of a loop in surface parameter space
    pub fn loop_polygon_2d(&self, loop_index: usize) -> Vec<Vector2> {
        let mut polygon: Vec<Vector2> = Vec::new();
        if let Some(lp) = self.loops.get(loop_index) {
            for &ti in &lp.trims {
                if let Some(c) = self.trims.get(ti).and_then(|t| self.curves2d.get(t.curve2d)) {
                    let pts = c.sample_dense(64);
                    let skip = usize::from(!polygon.is_empty());
                    polygon.extend(pts.iter().skip(skip).map(|p| p.to_2d()));
                }
            }
        }
        polygon
    }

    /// Signed enclosed volume; positive when faces point outward
    pub fn volume(&self) -> f64 {
        let mut volume = 0.0;
        for face in &self.faces {
            let Some(surface) = self.surfaces.get(face.surface) else {
                continue;
            };
            let sign = if face.reversed { -1.0 } else { 1.0 };
            volume += sign
                * match surface {
                    Surface::Plane(ps) => {
                        let area: f64 = face.loops.iter().map(|&l| signed_area(&self.loop_polygon_2d(l))).sum();
                        ps.plane.origin.dot(&ps.plane.z_axis) * area / 3.0
                    }
                    other => grid_volume(other, 64),
                };
        }
        volume
    }

    /// 3d curves of naked edges, oriented along their trims
    pub fn naked_edge_curves(&self, outer: bool, inner: bool) -> Vec<Curve> {
        let mut curves = Vec::new();
        for edge in &self.edges {
            if edge.trims.len() != 1 {
                continue;
            }
            let trim = &self.trims[edge.trims[0]];
            let loop_type = self.loops.get(trim.loop_index).map(|l| l.loop_type);
            let wanted = match loop_type {
                Some(LoopType::Outer) => outer,
                Some(LoopType::Inner) => inner,
                None => false,
            };
            if !wanted {
                continue;
            }
            if let Some(c) = self.curves3d.get(edge.curve3d) {
                curves.push(if trim.reversed { c.reversed() } else { c.clone() });
            }
        }
        curves
    }

    /// Copy every element of `other` into this brep
    pub fn append(&mut self, other: &Brep) {
        let (s0, c20, c30) = (self.surfaces.len(), self.curves2d.len(), self.curves3d.len());
        let (v0, e0, t0, l0, f0) = (
            self.vertices.len(),
            self.edges.len(),
            self.trims.len(),
            self.loops.len(),
            self.faces.len(),
        );
        self.surfaces.extend(other.surfaces.iter().cloned());
        self.curves2d.extend(other.curves2d.iter().cloned());
        self.curves3d.extend(other.curves3d.iter().cloned());
        self.vertices.extend(other.vertices.iter().cloned());
        self.edges.extend(other.edges.iter().map(|e| BrepEdge {
            curve3d: e.curve3d + c30,
            vertices: [e.vertices[0] + v0, e.vertices[1] + v0],
            trims: e.trims.iter().map(|t| t + t0).collect(),
            tolerance: e.tolerance,
        }));
        self.trims.extend(other.trims.iter().map(|t| BrepTrim {
            curve2d: t.curve2d + c20,
            edge: t.edge.map(|e| e + e0),
            vertices: [t.vertices[0] + v0, t.vertices[1] + v0],
            loop_index: t.loop_index + l0,
            ..t.clone()
        }));
        self.loops.extend(other.loops.iter().map(|l| BrepLoop {
            face: l.face + f0,
            trims: l.trims.iter().map(|t| t + t0).collect(),
            loop_type: l.loop_type,
        }));
        self.faces.extend(other.faces.iter().map(|f| BrepFace {
            surface: f.surface + s0,
            loops: f.loops.iter().map(|l| l + l0).collect(),
            reversed: f.reversed,
        }));
    }

    /// Merge coincident naked edges; returns the number of joins made
    pub fn join_naked_edges(&mut self, tolerance: f64) -> usize {
        if !self.is_valid() {
            return 0;
        }
        // merge coincident vertices first
        let mut vertex_map: Vec<usize> = (0..self.vertices.len()).collect();
        for i in 0..self.vertices.len() {
            for j in 0..i {
                if vertex_map[j] == j && self.vertices[i].point.distance(&self.vertices[j].point) <= tolerance {
                    vertex_map[i] = j;
                    break;
                }
            }
        }
        for edge in &mut self.edges {
            edge.vertices = [vertex_map[edge.vertices[0]], vertex_map[edge.vertices[1]]];
        }
        for trim in &mut self.trims {
            trim.vertices = [vertex_map[trim.vertices[0]], vertex_map[trim.vertices[1]]];
        }

        let mut joined = 0;
        for i in 0..self.edges.len() {
            if self.edges[i].trims.len() != 1 {
                continue;
            }
            for j in (i + 1)..self.edges.len() {
                if self.edges[j].trims.len() != 1 {
                    continue;
                }
                let (a, b) = (&self.edges[i], &self.edges[j]);
                let same_ends = a.vertices == b.vertices || a.vertices == [b.vertices[1], b.vertices[0]];
                if !same_ends {
                    continue;
                }
                let overlap = curve_overlap(
                    &self.curves3d[a.curve3d],
                    &self.curves3d[b.curve3d],
                    16,
                    tolerance.max(BREP_TOLERANCE),
                );
                if let Some(flipped) = overlap {
                    let t = self.edges[j].trims[0];
                    self.edges[j].trims.clear();
                    self.trims[t].edge = Some(i);
                    self.trims[t].reversed ^= flipped;
                    self.edges[i].trims.push(t);
                    joined += 1;
                    break;
                }
            }
        }
        self.compact();
        self.set_trim_types();
        joined
    }

    /// Drop edges without trims and any curves or vertices left unused
    fn compact(&mut self) {
        let edge_keep: Vec<bool> = self.edges.iter().map(|e| !e.trims.is_empty()).collect();

        let mut curve_used = vec![false; self.curves3d.len()];
        let mut vertex_used = vec![false; self.vertices.len()];
        for (e, keep) in self.edges.iter().zip(&edge_keep) {
            if *keep {
                curve_used[e.curve3d] = true;
                vertex_used[e.vertices[0]] = true;
                vertex_used[e.vertices[1]] = true;
            }
        }
        for t in &self.trims {
            vertex_used[t.vertices[0]] = true;
            vertex_used[t.vertices[1]] = true;
        }

        let edge_map = remap(&edge_keep);
        let curve_map = remap(&curve_used);
        let vertex_map = remap(&vertex_used);

        self.edges = std::mem::take(&mut self.edges)
            .into_iter()
            .zip(&edge_keep)
            .filter(|(_, k)| **k)
            .map(|(mut e, _)| {
                e.curve3d = curve_map[e.curve3d];
                e.vertices = [vertex_map[e.vertices[0]], vertex_map[e.vertices[1]]];
                e
            })
            .collect();
        self.curves3d = std::mem::take(&mut self.curves3d)
            .into_iter()
            .zip(&curve_used)
            .filter(|(_, k)| **k)
            .map(|(c, _)| c)
            .collect();
        self.vertices = std::mem::take(&mut self.vertices)
            .into_iter()
            .zip(&vertex_used)
            .filter(|(_, k)| **k)
            .map(|(v, _)| v)
            .collect();
        for t in &mut self.trims {
            t.edge = t.edge.map(|e| edge_map[e]);
            t.vertices = [vertex_map[t.vertices[0]], vertex_map[t.vertices[1]]];
        }
    }
}

/// Exploded segments with polylines split into single lines
fn line_segments(curve: &Curve) -> Vec<Curve> {
    curve
        .explode()
        .into_iter()
        .flat_map(|segment| match segment {
            Curve::Polyline(p) => p
                .points
                .windows(2)
                .filter(|w| w[0] != w[1])
                .map(|w| Curve::line(w[0], w[1]))
                .collect(),
            other => vec![other],
        })
        .collect()
}

fn remap(keep: &[bool]) -> Vec<usize> {
    let mut next = 0;
    keep.iter()
        .map(|k| {
            let index = next;
            if *k {
                next += 1;
            }
            index
        })
        .collect()
}

/// Shoelace area; positive for counterclockwise polygons
pub fn signed_area(polygon: &[Vector2]) -> f64 {
    if polygon.len() < 3 {
        return 0.0;
    }
    let n = polygon.len();
    (0..n)
        .map(|i| polygon[i].cross(&polygon[(i + 1) % n]))
        .sum::<f64>()
        * 0.5
}

/// Divergence-theorem volume of an untrimmed surface, oriented by `Su × Sv`
fn grid_volume(surface: &Surface, n: usize) -> f64 {
    let (du, dv) = (surface.domain(0), surface.domain(1));
    let grid: Vec<Vec<Vector3>> = (0..=n)
        .map(|i| {
            let u = du.parameter_at(i as f64 / n as f64);
            (0..=n)
                .map(|j| surface.point_at(u, dv.parameter_at(j as f64 / n as f64)))
                .collect()
        })
        .collect();
    let tet = |a: Vector3, b: Vector3, c: Vector3| a.dot(&b.cross(&c)) / 6.0;
    let mut volume = 0.0;
    for i in 0..n {
        for j in 0..n {
            let (p00, p10, p11, p01) = (grid[i][j], grid[i + 1][j], grid[i + 1][j + 1], grid[i][j + 1]);
            volume += tet(p00, p10, p11) + tet(p00, p11, p01);
        }
    }
    volume
}

/// Degenerate line used for collapsed edges and failed conversions
pub fn point_curve(p: Vector3) -> Curve {
    Curve::Line(LineCurve {
        line: Line::new(p, p),
        domain: Interval::new(0.0, 1.0),
    })
}
