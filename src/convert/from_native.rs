//! Native to generic conversion

use super::Converter;
use crate::generic::{self as g, Geometry};
use crate::kernel::GeometryKernel;
use crate::native::{self as n, Brep, BrepFace, BrepLoop, Curve, LoopType, NativeGeometry};
use crate::notification::NotificationCollection;
use crate::types::{BoundingBox3D, Quaternion, Transform, Vector3};

impl From<Vector3> for g::Point {
    fn from(v: Vector3) -> Self {
        g::Point::new(v.x, v.y, v.z)
    }
}

impl From<Vector3> for g::Vector {
    fn from(v: Vector3) -> Self {
        g::Vector::new(v.x, v.y, v.z)
    }
}

impl From<n::Plane> for g::Plane {
    fn from(p: n::Plane) -> Self {
        g::Plane {
            origin: p.origin.into(),
            normal: p.z_axis.into(),
        }
    }
}

impl From<n::Plane> for g::CartesianCoordinateSystem {
    fn from(p: n::Plane) -> Self {
        g::CartesianCoordinateSystem {
            origin: p.origin.into(),
            x: p.x_axis.into(),
            y: p.y_axis.into(),
            z: p.z_axis.into(),
        }
    }
}

impl From<&BoundingBox3D> for g::BoundingBox {
    fn from(b: &BoundingBox3D) -> Self {
        g::BoundingBox {
            min: b.min.into(),
            max: b.max.into(),
        }
    }
}

impl From<&Transform> for g::TransformMatrix {
    fn from(t: &Transform) -> Self {
        g::TransformMatrix { matrix: t.m }
    }
}

impl From<&Quaternion> for g::Quaternion {
    fn from(q: &Quaternion) -> Self {
        g::Quaternion {
            w: q.a,
            x: q.b,
            y: q.c,
            z: q.d,
        }
    }
}

fn line(l: &n::Line) -> g::Line {
    g::Line::new(l.from.into(), l.to.into())
}

fn arc(a: &n::Arc) -> g::Arc {
    g::Arc {
        coordinate_system: a.plane.into(),
        radius: a.radius,
        start_angle: a.angle.t0,
        end_angle: a.angle.t1,
    }
}

fn circle(c: &n::Circle) -> g::Circle {
    g::Circle {
        centre: c.center().into(),
        normal: c.normal().into(),
        radius: c.radius,
    }
}

fn ellipse(e: &n::Ellipse) -> g::Ellipse {
    g::Ellipse {
        centre: e.plane.origin.into(),
        axis1: e.plane.x_axis.into(),
        axis2: e.plane.y_axis.into(),
        radius1: e.radius1,
        radius2: e.radius2,
    }
}

fn polyline(p: &n::Polyline) -> g::Polyline {
    g::Polyline::new(p.points.iter().map(|v| (*v).into()).collect())
}

fn mesh(m: &n::Mesh) -> g::Mesh {
    let faces = m
        .faces
        .iter()
        .map(|f| {
            if f.is_quad() {
                g::Face::quad(f.a, f.b, f.c, f.d)
            } else {
                g::Face::triangle(f.a, f.b, f.c)
            }
        })
        .collect();
    g::Mesh::new(m.vertices.iter().map(|v| (*v).into()).collect(), faces)
}

fn sphere(s: &n::Sphere) -> g::Sphere {
    g::Sphere {
        centre: s.center().into(),
        radius: s.radius,
    }
}

fn torus(t: &n::Torus) -> g::Torus {
    g::Torus {
        centre: t.plane.origin.into(),
        axis: t.plane.z_axis.into(),
        radius_major: t.major_radius,
        radius_minor: t.minor_radius,
    }
}

/// The generic cone stands on its base and its axis points at the apex
fn cone(c: &n::Cone) -> g::Cone {
    g::Cone {
        centre: c.base_point().into(),
        axis: (-c.axis()).into(),
        radius: c.radius,
        height: c.height,
    }
}

fn cylinder(c: &n::Cylinder) -> g::Cylinder {
    let axis = c.axis();
    g::Cylinder {
        centre: (c.circle.center() + axis * c.height1).into(),
        axis: axis.into(),
        radius: c.circle.radius,
        height: c.total_height(),
    }
}

fn cuboid(b: &n::NativeBox) -> g::Cuboid {
    g::Cuboid {
        coordinate_system: n::Plane { origin: b.center(), ..b.plane }.into(),
        length: b.x.length().abs(),
        depth: b.y.length().abs(),
        height: b.z.length().abs(),
    }
}

impl<K: GeometryKernel> Converter<K> {
    /// Convert any native object to its generic counterpart
    pub fn to_generic(&self, native: &NativeGeometry, log: &mut NotificationCollection) -> Option<Geometry> {
        match native {
            NativeGeometry::Point(p) => Some(Geometry::Point((*p).into())),
            NativeGeometry::Vector(v) => Some(Geometry::Vector((*v).into())),
            NativeGeometry::Plane(p) => Some(Geometry::Plane((*p).into())),
            NativeGeometry::Line(l) => Some(line(l).into()),
            NativeGeometry::Arc(a) => Some(arc(a).into()),
            NativeGeometry::Circle(c) => Some(circle(c).into()),
            NativeGeometry::Ellipse(e) => Some(ellipse(e).into()),
            NativeGeometry::Polyline(p) => Some(polyline(p).into()),
            NativeGeometry::Curve(c) => self.curve_to_generic(c, log).map(Geometry::Curve),
            NativeGeometry::Surface(s) => self.surface_to_generic(s, log).map(Geometry::Surface),
            NativeGeometry::Brep(b) => self.brep_to_generic(b, log),
            NativeGeometry::Mesh(m) => Some(mesh(m).into()),
            NativeGeometry::Extrusion(e) => self.extrusion_to_generic(e, log).map(Geometry::from),
            NativeGeometry::Sphere(s) => Some(sphere(s).into()),
            NativeGeometry::Torus(t) => Some(torus(t).into()),
            NativeGeometry::Cone(c) => Some(cone(c).into()),
            NativeGeometry::Cylinder(c) => Some(cylinder(c).into()),
            NativeGeometry::Box(b) => Some(cuboid(b).into()),
            NativeGeometry::BoundingBox(b) => Some(Geometry::BoundingBox(b.into())),
            NativeGeometry::Transform(t) => Some(Geometry::Transform(t.into())),
            NativeGeometry::Quaternion(q) => Some(Geometry::Quaternion(q.into())),
            NativeGeometry::Group(items) => Some(Geometry::Composite(g::CompositeGeometry {
                elements: items.iter().filter_map(|i| self.to_generic(i, log)).collect(),
            })),
        }
    }

    /// Classify a native curve by shape and convert it
    ///
    /// The checks run in a fixed order: line, circle, arc, polyline, closed
    /// ellipse, then by storage kind.
    pub fn curve_to_generic(&self, curve: &Curve, log: &mut NotificationCollection) -> Option<g::Curve> {
        let tol = self.fitting();
        let k = &self.kernel;

        if curve.span_count() < 2 && (matches!(curve, Curve::Line(_)) || k.try_get_line(curve, tol).is_some()) {
            return Some(g::Curve::Line(g::Line::new(
                curve.point_at_start().into(),
                curve.point_at_end().into(),
            )));
        }
        if let Some(c) = k.try_get_circle(curve, tol) {
            return Some(g::Curve::Circle(circle(&c)));
        }
        let as_arc = match curve {
            Curve::Arc(a) => Some(a.arc),
            _ => k.try_get_arc(curve, tol),
        };
        if let Some(a) = as_arc {
            return Some(g::Curve::Arc(arc(&a)));
        }
        let as_polyline = match curve {
            Curve::Polyline(p) => Some(p.to_polyline()),
            _ => k.try_get_polyline(curve, tol),
        };
        if let Some(p) = as_polyline {
            return Some(g::Curve::Polyline(polyline(&p)));
        }
        if curve.is_closed(self.distance()) {
            if let Some(e) = k.try_get_ellipse(curve, tol) {
                return Some(g::Curve::Ellipse(ellipse(&e)));
            }
        }

        match curve {
            Curve::Nurbs(nc) => Some(self.nurbs_curve_to_generic(nc)),
            Curve::Poly(pc) => {
                let flat = pc.remove_nesting();
                let curves = flat
                    .segments
                    .iter()
                    .map(|s| self.curve_to_generic(s, log))
                    .collect::<Option<Vec<_>>>()?;
                Some(g::Curve::Poly(g::PolyCurve::new(curves)))
            }
            other => match other.to_nurbs() {
                Some(nc) => Some(self.nurbs_curve_to_generic(&nc)),
                None => {
                    self.no_conversion(other.kind_name(), log);
                    None
                }
            },
        }
    }

    fn nurbs_curve_to_generic(&self, nc: &n::NurbsCurve) -> g::Curve {
        let tol = self.fitting();
        let curve = Curve::Nurbs(nc.clone());
        if let Some(p) = self.kernel.try_get_polyline(&curve, tol) {
            return g::Curve::Polyline(polyline(&p));
        }
        if curve.is_closed(self.distance()) {
            if let Some(e) = self.kernel.try_get_ellipse(&curve, tol) {
                return g::Curve::Ellipse(ellipse(&e));
            }
        }
        g::Curve::Nurbs(g::NurbsCurve {
            control_points: nc.locations().into_iter().map(Into::into).collect(),
            weights: nc.weights(),
            knots: nc.full_knots(),
        })
    }

    /// Trim curves keep arcs as arcs, even closed ones
    fn trim_curve_to_generic(&self, curve: &Curve, log: &mut NotificationCollection) -> Option<g::Curve> {
        match self.kernel.try_get_arc(curve, self.fitting()) {
            Some(a) => Some(g::Curve::Arc(arc(&a))),
            None => self.curve_to_generic(curve, log),
        }
    }

    /// A bare surface: planar ones become a planar region, others NURBS
    pub fn surface_to_generic(&self, surface: &n::Surface, log: &mut NotificationCollection) -> Option<g::Surface> {
        if surface.is_planar(self.distance()) {
            let edges = Brep::from_surface(surface.clone()).naked_edge_curves(true, false);
            let external = self.kernel.join_curves(&edges, self.distance()).into_iter().next()?;
            let external = self.curve_to_generic(&external, log)?;
            return Some(g::Surface::Planar(g::PlanarSurface::new(external, Vec::new())));
        }
        match surface.to_nurbs() {
            Some(ns) => Some(g::Surface::Nurbs(nurbs_surface(&ns, Vec::new(), Vec::new()))),
            None => {
                self.no_conversion(surface.kind_name(), log);
                None
            }
        }
    }

    /// Classify a brep: invalid, empty, solid, planar region, face or poly-surface
    pub fn brep_to_generic(&self, brep: &Brep, log: &mut NotificationCollection) -> Option<Geometry> {
        let (valid, report) = brep.is_valid_with_log();
        if !valid {
            log.error(format!("Conversion failed, native Brep is invalid: {report}"));
            return None;
        }
        if brep.faces.is_empty() {
            return None;
        }
        if brep.is_solid() {
            return Some(Geometry::Solid(self.brep_to_solid(brep, log)));
        }

        let tol = self.distance();
        if brep.is_planar_surface(tol) {
            let outer = self.kernel.join_curves(&brep.naked_edge_curves(true, false), tol);
            let external = self.curve_to_generic(outer.first()?, log)?;
            let internal = self
                .kernel
                .join_curves(&brep.naked_edge_curves(false, true), tol)
                .iter()
                .filter_map(|c| self.curve_to_generic(c, log))
                .collect();
            return Some(g::PlanarSurface::new(external, internal).into());
        }

        if brep.faces.len() == 1 {
            return self.face_to_generic(brep, &brep.faces[0], log).map(Geometry::Surface);
        }
        let surfaces = brep
            .faces
            .iter()
            .filter_map(|f| self.face_to_generic(brep, f, log))
            .collect();
        Some(g::PolySurface { surfaces }.into())
    }

    /// Analytic recognition by surface count, else a boundary representation
    fn brep_to_solid(&self, brep: &Brep, log: &mut NotificationCollection) -> g::Solid {
        let (k, tol) = (&self.kernel, self.fitting());
        if let Some(surface) = brep.surfaces.first() {
            match brep.surfaces.len() {
                1 => {
                    if let Some(s) = k.try_get_sphere(surface, tol) {
                        return g::Solid::Sphere(sphere(&s));
                    }
                    if let Some(t) = k.try_get_torus(surface, tol) {
                        return g::Solid::Torus(torus(&t));
                    }
                }
                2 => {
                    if let Some(c) = k.try_get_cone(surface, tol) {
                        return g::Solid::Cone(cone(&c));
                    }
                }
                3 => {
                    if let Some(c) = k.try_get_cylinder(surface, tol) {
                        return g::Solid::Cylinder(cylinder(&c));
                    }
                }
                _ => {}
            }
        }
        g::Solid::BoundaryRepresentation(g::BoundaryRepresentation {
            surfaces: brep
                .faces
                .iter()
                .filter_map(|f| self.face_to_generic(brep, f, log))
                .collect(),
            volume: brep.volume(),
        })
    }

    fn face_to_generic(&self, brep: &Brep, face: &BrepFace, log: &mut NotificationCollection) -> Option<g::Surface> {
        let surface = brep.surfaces.get(face.surface)?;
        if surface.is_planar(self.distance()) {
            return self.planar_face(brep, face, surface, log).map(g::Surface::Planar);
        }
        let Some(ns) = surface.to_nurbs() else {
            self.no_conversion(surface.kind_name(), log);
            return None;
        };
        let (mut inner, mut outer) = (Vec::new(), Vec::new());
        for lp in face.loops.iter().filter_map(|&l| brep.loops.get(l)) {
            let trim = self.loop_to_trim(brep, surface, lp, log)?;
            match lp.loop_type {
                LoopType::Outer => outer.push(trim),
                LoopType::Inner => inner.push(trim),
            }
        }
        Some(g::Surface::Nurbs(nurbs_surface(&ns, inner, outer)))
    }

    /// Planar face bounded by its pushed-up loops
    fn planar_face(
        &self,
        brep: &Brep,
        face: &BrepFace,
        surface: &n::Surface,
        log: &mut NotificationCollection,
    ) -> Option<g::PlanarSurface> {
        let mut external = None;
        let mut internal = Vec::new();
        for lp in face.loops.iter().filter_map(|&l| brep.loops.get(l)) {
            let curves = lp
                .trims
                .iter()
                .map(|&t| {
                    let c = self.trim_curve3d(brep, surface, t)?;
                    self.curve_to_generic(&c, log)
                })
                .collect::<Option<Vec<_>>>()?;
            let boundary = g::Curve::Poly(g::PolyCurve::new(curves));
            match lp.loop_type {
                LoopType::Outer => external = Some(boundary),
                LoopType::Inner => internal.push(boundary),
            }
        }
        let external = match external {
            Some(e) => e,
            None => match self.surface_to_generic(surface, log)? {
                g::Surface::Planar(p) => p.external_boundary,
                _ => return None,
            },
        };
        Some(g::PlanarSurface::new(external, internal))
    }

    fn loop_to_trim(
        &self,
        brep: &Brep,
        surface: &n::Surface,
        lp: &BrepLoop,
        log: &mut NotificationCollection,
    ) -> Option<g::SurfaceTrim> {
        let mut curves2d = Vec::with_capacity(lp.trims.len());
        let mut curves3d = Vec::with_capacity(lp.trims.len());
        for &t in &lp.trims {
            let trim = brep.trims.get(t)?;
            let c2 = brep.curves2d.get(trim.curve2d)?;
            curves2d.push(self.trim_curve_to_generic(c2, log)?);
            let c3 = self.trim_curve3d(brep, surface, t)?;
            curves3d.push(self.trim_curve_to_generic(&c3, log)?);
        }
        Some(g::SurfaceTrim {
            curve3d: g::Curve::Poly(g::PolyCurve::new(curves3d)),
            curve2d: g::Curve::Poly(g::PolyCurve::new(curves2d)),
        })
    }

    /// Model-space image of a trim; falls back to its edge curve
    fn trim_curve3d(&self, brep: &Brep, surface: &n::Surface, trim_index: usize) -> Option<Curve> {
        let trim = brep.trims.get(trim_index)?;
        let c2 = brep.curves2d.get(trim.curve2d)?;
        self.kernel.pushup(surface, c2, self.distance()).or_else(|| {
            let edge = brep.edges.get(trim.edge?)?;
            let c3 = brep.curves3d.get(edge.curve3d)?;
            Some(if trim.reversed { c3.reversed() } else { c3.clone() })
        })
    }

    pub fn extrusion_to_generic(&self, e: &n::Extrusion, log: &mut NotificationCollection) -> Option<g::Extrusion> {
        Some(g::Extrusion {
            curve: self.curve_to_generic(&e.profile, log)?,
            direction: e.path_vector().into(),
            capped: e.capped,
        })
    }
}

fn nurbs_surface(s: &n::NurbsSurface, inner_trims: Vec<g::SurfaceTrim>, outer_trims: Vec<g::SurfaceTrim>) -> g::NurbsSurface {
    let indices = (0..s.u_count).flat_map(|i| (0..s.v_count).map(move |j| (i, j)));
    g::NurbsSurface {
        control_points: indices.clone().map(|(i, j)| s.location(i, j).into()).collect(),
        weights: indices.map(|(i, j)| s.weight(i, j)).collect(),
        u_knots: s.full_knots_u(),
        v_knots: s.full_knots_v(),
        u_degree: s.degree_u,
        v_degree: s.degree_v,
        inner_trims,
        outer_trims,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::ConvertConfig;
    use crate::native::{Arc, ArcCurve, Circle, Cone, Cylinder, Mesh, MeshFace, Plane, PolyCurve, Sphere, Torus};
    use crate::types::Interval;
    use std::f64::consts::{FRAC_PI_2, TAU};

    fn converter() -> Converter {
        Converter::new(ConvertConfig::default())
    }

    #[test]
    fn test_circle_from_every_storage_kind() {
        let c = Converter::new(ConvertConfig::default());
        let mut log = NotificationCollection::new();
        let circle = Circle::new(Plane::world_xy(), 2.0);
        let as_arc = Curve::Arc(ArcCurve::new(Arc::from(circle)));
        let as_nurbs = Curve::Nurbs(as_arc.to_nurbs().unwrap());
        let halves = Curve::Poly(PolyCurve::new(vec![
            Curve::arc(Arc::new(Plane::world_xy(), 2.0, Interval::new(0.0, TAU / 2.0))),
            Curve::arc(Arc::new(Plane::world_xy(), 2.0, Interval::new(TAU / 2.0, TAU))),
        ]));
        for curve in [as_arc, as_nurbs, halves] {
            match c.curve_to_generic(&curve, &mut log) {
                Some(g::Curve::Circle(gc)) => assert!((gc.radius - 2.0).abs() < 1e-6),
                other => panic!("expected a circle from {}, got {other:?}", curve.kind_name()),
            }
        }
        assert!(log.is_empty());
    }

    #[test]
    fn test_open_arc_and_straight_polyline() {
        let c = converter();
        let mut log = NotificationCollection::new();
        let quarter = Curve::arc(Arc::new(Plane::world_xy(), 1.0, Interval::new(0.0, FRAC_PI_2)));
        assert!(matches!(c.curve_to_generic(&quarter, &mut log), Some(g::Curve::Arc(_))));

        let bent = Curve::polyline(vec![Vector3::ZERO, Vector3::UNIT_X, Vector3::new(1.0, 1.0, 0.0)]);
        assert!(matches!(c.curve_to_generic(&bent, &mut log), Some(g::Curve::Polyline(_))));

        let two_points = Curve::polyline(vec![Vector3::ZERO, Vector3::UNIT_X]);
        assert!(matches!(c.curve_to_generic(&two_points, &mut log), Some(g::Curve::Line(_))));
    }

    #[test]
    fn test_mixed_poly_curve_keeps_segments() {
        let c = converter();
        let mut log = NotificationCollection::new();
        let poly = Curve::Poly(PolyCurve::new(vec![
            Curve::line(Vector3::new(-1.0, 0.0, 0.0), Vector3::UNIT_X),
            Curve::arc(Arc::new(Plane::world_xy(), 1.0, Interval::new(0.0, FRAC_PI_2))),
        ]));
        match c.curve_to_generic(&poly, &mut log) {
            Some(g::Curve::Poly(p)) => {
                assert_eq!(p.curves.len(), 2);
                assert!(matches!(p.curves[1], g::Curve::Arc(_)));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_sphere_brep_becomes_sphere() {
        let c = converter();
        let mut log = NotificationCollection::new();
        let brep = Sphere::new(Vector3::new(1.0, 2.0, 3.0), 4.0).to_brep();
        match c.brep_to_generic(&brep, &mut log) {
            Some(Geometry::Solid(g::Solid::Sphere(s))) => {
                assert!((s.radius - 4.0).abs() < 1e-6);
                assert!(s.centre.is_equal(&g::Point::new(1.0, 2.0, 3.0), 1e-6));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_torus_brep_becomes_torus() {
        let c = converter();
        let mut log = NotificationCollection::new();
        let brep = Torus::new(Plane::world_xy(), 5.0, 1.0).to_brep();
        match c.brep_to_generic(&brep, &mut log) {
            Some(Geometry::Solid(g::Solid::Torus(t))) => {
                assert!((t.radius_major - 5.0).abs() < 1e-6);
                assert!((t.radius_minor - 1.0).abs() < 1e-6);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(log.is_empty());
    }

    #[test]
    fn test_capped_cone_brep_becomes_cone() {
        let c = converter();
        let mut log = NotificationCollection::new();
        let brep = Cone::new(Plane::world_xy(), 3.0, 1.5).to_brep();
        assert_eq!(brep.surfaces.len(), 2);
        match c.brep_to_generic(&brep, &mut log) {
            Some(Geometry::Solid(g::Solid::Cone(cone))) => {
                assert!((cone.radius - 1.5).abs() < 1e-6);
                assert!((cone.height - 3.0).abs() < 1e-6);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_capped_cylinder_brep_becomes_cylinder() {
        let c = converter();
        let mut log = NotificationCollection::new();
        let brep = Cylinder::new(Circle::new(Plane::world_xy(), 2.0), 0.0, 4.0).to_brep();
        assert_eq!(brep.surfaces.len(), 3);
        match c.brep_to_generic(&brep, &mut log) {
            Some(Geometry::Solid(g::Solid::Cylinder(cyl))) => {
                assert!((cyl.radius - 2.0).abs() < 1e-6);
                assert!((cyl.height.abs() - 4.0).abs() < 1e-6);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_invalid_brep_logs_exactly_one_error() {
        let c = converter();
        let mut log = NotificationCollection::new();
        let mut brep = Sphere::new(Vector3::ZERO, 1.0).to_brep();
        brep.trims[0].curve2d = 99;
        assert!(c.brep_to_generic(&brep, &mut log).is_none());
        assert_eq!(log.len(), 1);
        let message = &log.iter().next().unwrap().message;
        assert!(message.starts_with("Conversion failed, native Brep is invalid: "));
        assert!(message.len() > "Conversion failed, native Brep is invalid: ".len());
    }

    #[test]
    fn test_mesh_faces_keep_arity() {
        let c = converter();
        let mut log = NotificationCollection::new();
        let mut m = Mesh::new();
        for p in [Vector3::ZERO, Vector3::UNIT_X, Vector3::new(1.0, 1.0, 0.0), Vector3::UNIT_Y] {
            m.add_vertex(p);
        }
        m.add_face(MeshFace::quad(0, 1, 2, 3));
        m.add_face(MeshFace::triangle(0, 1, 2));
        match c.to_generic(&NativeGeometry::Mesh(m), &mut log) {
            Some(Geometry::Mesh(gm)) => {
                assert_eq!(gm.vertices.len(), 4);
                assert!(gm.faces[0].is_quad());
                assert!(!gm.faces[1].is_quad());
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_planar_brep_with_hole() {
        let c = converter();
        let mut log = NotificationCollection::new();
        let square = Curve::polyline(vec![
            Vector3::ZERO,
            Vector3::new(10.0, 0.0, 0.0),
            Vector3::new(10.0, 10.0, 0.0),
            Vector3::new(0.0, 10.0, 0.0),
            Vector3::ZERO,
        ]);
        let hole = Curve::arc(Arc::from(Circle::new(
            Plane::new(Vector3::new(5.0, 5.0, 0.0), Vector3::UNIT_Z),
            1.0,
        )));
        let brep = Brep::from_planar_loops(Plane::world_xy(), &square, &[hole], 1e-6);
        match c.brep_to_generic(&brep, &mut log) {
            Some(Geometry::Surface(g::Surface::Planar(p))) => {
                assert_eq!(p.internal_boundaries.len(), 1);
                assert!(p.external_boundary.is_closed(1e-6));
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
