//! Generic to native conversion

use super::Converter;
use crate::generic::{self as g, Geometry};
use crate::kernel::GeometryKernel;
use crate::native::{
    self as n, Brep, ControlPointConvention, Curve, MeshFace, NativeGeometry, PolyCurve,
};
use crate::notification::NotificationCollection;
use crate::nurbs;
use crate::types::{BoundingBox3D, Interval, Quaternion, Transform, Vector3};

impl From<g::Point> for Vector3 {
    fn from(p: g::Point) -> Self {
        Vector3::new(p.x, p.y, p.z)
    }
}

impl From<g::Vector> for Vector3 {
    fn from(v: g::Vector) -> Self {
        Vector3::new(v.x, v.y, v.z)
    }
}

impl From<g::Plane> for n::Plane {
    fn from(p: g::Plane) -> Self {
        n::Plane::new(p.origin.into(), p.normal.into())
    }
}

impl From<g::CartesianCoordinateSystem> for n::Plane {
    fn from(cs: g::CartesianCoordinateSystem) -> Self {
        n::Plane::from_frame(cs.origin.into(), cs.x.into(), cs.y.into())
    }
}

fn arc(a: &g::Arc) -> n::Arc {
    n::Arc::new(a.coordinate_system.into(), a.radius, Interval::new(a.start_angle, a.end_angle))
}

fn circle(c: &g::Circle) -> n::Circle {
    n::Circle::new(n::Plane::new(c.centre.into(), c.normal.into()), c.radius)
}

fn ellipse(e: &g::Ellipse) -> n::Ellipse {
    let plane = n::Plane::from_frame(e.centre.into(), e.axis1.into(), e.axis2.into());
    n::Ellipse::new(plane, e.radius1, e.radius2)
}

fn sphere(s: &g::Sphere) -> n::Sphere {
    n::Sphere::new(s.centre.into(), s.radius)
}

fn torus(t: &g::Torus) -> n::Torus {
    n::Torus::new(n::Plane::new(t.centre.into(), t.axis.into()), t.radius_major, t.radius_minor)
}

/// Native cones keep the apex at the plane origin
fn cone(c: &g::Cone) -> n::Cone {
    let axis = Vector3::from(c.axis).normalize();
    let apex = Vector3::from(c.centre) + axis * c.height;
    n::Cone::new(n::Plane::new(apex, -axis), c.height, c.radius)
}

fn cylinder(c: &g::Cylinder) -> n::Cylinder {
    let base = n::Circle::new(n::Plane::new(c.centre.into(), c.axis.into()), c.radius);
    n::Cylinder::new(base, 0.0, c.height)
}

fn cuboid(c: &g::Cuboid) -> n::NativeBox {
    let half = |size: f64| Interval::new(-size / 2.0, size / 2.0);
    n::NativeBox::new(c.coordinate_system.into(), half(c.length), half(c.depth), half(c.height))
}

impl<K: GeometryKernel> Converter<K> {
    /// Convert any generic value to its native counterpart
    pub fn to_native(&self, generic: &Geometry, log: &mut NotificationCollection) -> Option<NativeGeometry> {
        match generic {
            Geometry::Point(p) => Some(NativeGeometry::Point((*p).into())),
            Geometry::Vector(v) => Some(NativeGeometry::Vector((*v).into())),
            Geometry::Plane(p) => Some(NativeGeometry::Plane((*p).into())),
            Geometry::CoordinateSystem(cs) => Some(NativeGeometry::Plane((*cs).into())),
            Geometry::Curve(c) => self.curve_to_native(c, log).map(NativeGeometry::Curve),
            Geometry::Surface(s) => self.surface_to_native(s, log),
            Geometry::Solid(s) => self.solid_to_native(s, log),
            Geometry::Mesh(m) => Some(NativeGeometry::Mesh(self.mesh_to_native(m, log))),
            Geometry::Transform(t) => Some(NativeGeometry::Transform(Transform { m: t.matrix })),
            Geometry::Quaternion(q) => Some(NativeGeometry::Quaternion(Quaternion::new(q.w, q.x, q.y, q.z))),
            Geometry::BoundingBox(b) => Some(NativeGeometry::BoundingBox(BoundingBox3D::new(
                b.min.into(),
                b.max.into(),
            ))),
            Geometry::Composite(c) => Some(NativeGeometry::Group(
                c.elements.iter().filter_map(|e| self.to_native(e, log)).collect(),
            )),
        }
    }

    /// Convert a curve to its direct native equivalent
    pub fn curve_to_native(&self, curve: &g::Curve, log: &mut NotificationCollection) -> Option<Curve> {
        match curve {
            g::Curve::Line(l) => Some(Curve::line(l.start.into(), l.end.into())),
            g::Curve::Arc(a) => Some(Curve::arc(arc(a))),
            g::Curve::Circle(c) => Some(Curve::arc(circle(c).into())),
            g::Curve::Ellipse(e) => {
                let (points, weights, knots) = ellipse(e).nurbs_form();
                match n::NurbsCurve::from_parts(2, &points, &weights, &knots) {
                    Some(nc) => Some(Curve::Nurbs(nc)),
                    None => {
                        log.error("Ellipse could not be converted: its radii or axes are degenerate.");
                        None
                    }
                }
            }
            g::Curve::Polyline(p) => Some(Curve::polyline(p.control_points.iter().map(|p| (*p).into()).collect())),
            g::Curve::Nurbs(nc) => self.nurbs_curve_to_native(nc, log).map(Curve::Nurbs),
            g::Curve::Poly(pc) => self.poly_curve_to_native(pc, log).map(Curve::Poly),
        }
    }

    /// Control points are written in the convention of the target version
    pub fn nurbs_curve_to_native(&self, nc: &g::NurbsCurve, log: &mut NotificationCollection) -> Option<n::NurbsCurve> {
        let count = nc.control_points.len();
        let degree = nc.degree();
        if nc.weights.len() != count || !nurbs::validate_knots(&nc.knots, count, degree) {
            log.error(format!(
                "NurbsCurve is malformed: {count} control points, {} weights and {} knots.",
                nc.weights.len(),
                nc.knots.len()
            ));
            return None;
        }

        let convention = ControlPointConvention::for_version(self.config.version);
        let mut native = n::NurbsCurve::new(degree, count, convention);
        for (i, k) in nurbs::native_knots(&nc.knots).into_iter().enumerate() {
            native.set_knot(i, k);
        }
        for (i, (p, w)) in nc.control_points.iter().zip(&nc.weights).enumerate() {
            match convention {
                ControlPointConvention::Homogeneous => native.set_point(i, p.x * w, p.y * w, p.z * w, *w),
                ControlPointConvention::Euclidean => native.set_point(i, p.x, p.y, p.z, *w),
            };
        }
        Some(native)
    }

    /// All-or-nothing: the pieces must form one chain and all must convert
    pub fn poly_curve_to_native(&self, pc: &g::PolyCurve, log: &mut NotificationCollection) -> Option<PolyCurve> {
        if pc.curves.is_empty() {
            log.error("PolyCurve has no curves.");
            return None;
        }
        let mut chains = g::join(&pc.curves, self.distance());
        if chains.len() != 1 {
            log.error(format!(
                "PolyCurve is not contiguous: its {} curves form {} separate chains.",
                pc.curves.len(),
                chains.len()
            ));
            return None;
        }
        let chain = chains.remove(0);
        let segments = chain
            .curves
            .iter()
            .map(|c| self.curve_to_native(c, log))
            .collect::<Option<Vec<_>>>()?;
        Some(PolyCurve::new(segments))
    }

    pub fn surface_to_native(&self, surface: &g::Surface, log: &mut NotificationCollection) -> Option<NativeGeometry> {
        match surface {
            g::Surface::Planar(p) => self.planar_surface_to_native(p, log).map(NativeGeometry::Brep),
            g::Surface::Nurbs(s) => self.nurbs_surface_to_native(s, log),
            g::Surface::Poly(p) => self.surfaces_to_brep(&p.surfaces, log).map(NativeGeometry::Brep),
            g::Surface::Extrusion(e) => self.extrusion_to_native(e, log),
        }
    }

    /// Planar face from boundaries, falling back to a region difference
    /// when the internal boundaries do not sit cleanly inside
    pub fn planar_surface_to_native(&self, ps: &g::PlanarSurface, log: &mut NotificationCollection) -> Option<Brep> {
        let (k, tol, fit) = (&self.kernel, self.distance(), self.fitting());
        let external = self.curve_to_native(&ps.external_boundary, log)?;
        if !k.is_planar(&external, fit) {
            log.error("The external boundary of the PlanarSurface is not planar.");
            return None;
        }

        let mut internals = Vec::with_capacity(ps.internal_boundaries.len());
        let mut skipped = 0;
        for boundary in &ps.internal_boundaries {
            match self.curve_to_native(boundary, log) {
                Some(c) if k.is_planar(&c, fit) => internals.push(c),
                _ => skipped += 1,
            }
        }
        if skipped > 0 {
            log.warn(format!("{skipped} internal boundaries skipped due to a failed planarity test."));
        }

        let mut boundaries = internals.clone();
        boundaries.push(external.clone());
        let mut breps = k.create_planar_breps(&boundaries, tol);
        match breps.len() {
            0 => {
                log.error("No planar surface could be created from the boundaries of the PlanarSurface.");
                return None;
            }
            1 => return breps.pop(),
            _ => {}
        }

        let difference = k.boolean_difference(&external, &internals, tol);
        if difference.is_empty() {
            return Some(Brep::new());
        }
        let mut result = k.create_planar_breps(&difference, tol);
        if result.len() == 1 {
            log.warn(
                "The internal edges overlap with the external. Boolean difference has been performed to \
                 try to get out the correct geometry. Topology might have changed for the surface object.",
            );
            return result.pop();
        }
        log.warn(
            "Surface edges are not coplanar or their intersection is not empty. The conversion to native \
             results into multiple Breps and only the first brep will be returned.",
        );
        Some(breps.swap_remove(0))
    }

    /// Raw NURBS surface, or a brep rebuilt from its trims
    pub fn nurbs_surface_to_native(&self, s: &g::NurbsSurface, log: &mut NotificationCollection) -> Option<NativeGeometry> {
        let (u_count, v_count) = s.uv_count();
        let points: Vec<Vector3> = s.control_points.iter().map(|p| (*p).into()).collect();
        let Some(surface) = n::NurbsSurface::from_parts(
            s.u_degree, s.v_degree, u_count, v_count, &points, &s.weights, &s.u_knots, &s.v_knots,
        ) else {
            log.error(format!(
                "NurbsSurface is malformed: {} control points, {} weights, {}x{} knots for degrees {}x{}.",
                s.control_points.len(),
                s.weights.len(),
                s.u_knots.len(),
                s.v_knots.len(),
                s.u_degree,
                s.v_degree
            ));
            return None;
        };
        let surface = n::Surface::Nurbs(surface);
        if !s.has_trims() {
            return Some(NativeGeometry::Surface(surface));
        }
        Some(NativeGeometry::Brep(self.trimmed_brep(surface, &s.outer_trims, &s.inner_trims, log)))
    }

    /// Joined brep of several surfaces
    pub fn surfaces_to_brep(&self, surfaces: &[g::Surface], log: &mut NotificationCollection) -> Option<Brep> {
        let mut brep = Brep::new();
        for surface in surfaces {
            match self.surface_to_native(surface, log) {
                Some(NativeGeometry::Brep(b)) => brep.append(&b),
                Some(NativeGeometry::Surface(s)) => brep.append(&Brep::from_surface(s)),
                Some(NativeGeometry::Extrusion(e)) => {
                    if let Some(b) = e.to_brep() {
                        brep.append(&b);
                    }
                }
                _ => {}
            }
        }
        if brep.faces.is_empty() {
            log.error("None of the surfaces could be converted.");
            return None;
        }
        brep.join_naked_edges(self.distance());
        Some(brep)
    }

    /// Direct extrusion along the profile normal, else a one-rail sweep
    pub fn extrusion_to_native(&self, e: &g::Extrusion, log: &mut NotificationCollection) -> Option<NativeGeometry> {
        let (k, tol) = (&self.kernel, self.distance());
        let profile = self.curve_to_native(&e.curve, log)?;
        let Some(plane) = k.try_get_plane(&profile, self.fitting()) else {
            log.error("The base curve of the Extrusion must be planar.");
            return None;
        };
        let direction = Vector3::from(e.direction);
        if direction.is_tiny(tol) {
            log.error("The direction of the Extrusion has zero length.");
            return None;
        }

        let angle = plane.z_axis.angle_to(&direction);
        let parallel = self.config.tolerance.angle.max(1e-9);
        let height = if angle <= parallel {
            Some(direction.length())
        } else if std::f64::consts::PI - angle <= parallel {
            Some(-direction.length())
        } else {
            None
        };
        if let Some(height) = height {
            return match k.create_extrusion(&profile, height, e.capped, tol) {
                Some(x) => Some(NativeGeometry::Extrusion(x)),
                None => {
                    log.error("The Extrusion could not be created from its base curve.");
                    None
                }
            };
        }

        let centroid = Vector3::centroid(&profile.sample_dense(16))?;
        let mut breps = k.sweep_one_rail(&profile, centroid, centroid + direction);
        if breps.len() != 1 {
            log.error("The Extrusion could not be converted to a single surface.");
            return None;
        }
        if e.capped {
            log.warn("Extrusions oblique to their base curve are created without caps.");
        }
        breps.pop().map(NativeGeometry::Brep)
    }

    pub fn solid_to_native(&self, solid: &g::Solid, log: &mut NotificationCollection) -> Option<NativeGeometry> {
        match solid {
            g::Solid::Sphere(s) => Some(NativeGeometry::Sphere(sphere(s))),
            g::Solid::Torus(t) => Some(NativeGeometry::Torus(torus(t))),
            g::Solid::Cone(c) => Some(NativeGeometry::Cone(cone(c))),
            g::Solid::Cylinder(c) => Some(NativeGeometry::Cylinder(cylinder(c))),
            g::Solid::Cuboid(c) => Some(NativeGeometry::Box(cuboid(c))),
            g::Solid::BoundaryRepresentation(b) => self.surfaces_to_brep(&b.surfaces, log).map(NativeGeometry::Brep),
        }
    }

    /// Faces referencing missing vertices are dropped, one warning each
    pub fn mesh_to_native(&self, mesh: &g::Mesh, log: &mut NotificationCollection) -> n::Mesh {
        let mut native = n::Mesh::new();
        for v in &mesh.vertices {
            native.add_vertex((*v).into());
        }
        let count = mesh.vertices.len();
        for (i, face) in mesh.faces.iter().enumerate() {
            if face.indices().iter().any(|&v| v >= count) {
                log.warn(format!(
                    "Mesh face {i} references a vertex outside the {count} mesh vertices and was dropped."
                ));
                continue;
            }
            native.add_face(match face.d {
                Some(d) => MeshFace::quad(face.a, face.b, face.c, d),
                None => MeshFace::triangle(face.a, face.b, face.c),
            });
        }
        native
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::ConvertConfig;
    use crate::notification::NotificationType;

    fn converter(version: u32) -> Converter {
        Converter::new(ConvertConfig::default().with_version(version))
    }

    fn p(x: f64, y: f64) -> g::Point {
        g::Point::new(x, y, 0.0)
    }

    fn rectangle(x0: f64, y0: f64, x1: f64, y1: f64) -> g::Curve {
        g::Curve::Polyline(g::Polyline::new(vec![p(x0, y0), p(x1, y0), p(x1, y1), p(x0, y1), p(x0, y0)]))
    }

    fn weighted_arc() -> g::NurbsCurve {
        let w = std::f64::consts::FRAC_1_SQRT_2;
        g::NurbsCurve {
            control_points: vec![p(1.0, 0.0), p(1.0, 1.0), p(0.0, 1.0)],
            weights: vec![1.0, w, 1.0],
            knots: vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0],
        }
    }

    #[test]
    fn test_nurbs_weights_are_homogeneous_from_version_6() {
        let mut log = NotificationCollection::new();
        let native = converter(6).nurbs_curve_to_native(&weighted_arc(), &mut log).unwrap();
        let w = std::f64::consts::FRAC_1_SQRT_2;
        assert_eq!(native.raw_points()[1], [w, w, 0.0, w]);
        assert_eq!(native.knots(), &[0.0, 0.0, 1.0, 1.0]);
        let mid = native.point_at(0.5);
        assert!((mid.length() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_nurbs_weights_are_euclidean_before_version_6() {
        let mut log = NotificationCollection::new();
        let native = converter(5).nurbs_curve_to_native(&weighted_arc(), &mut log).unwrap();
        let w = std::f64::consts::FRAC_1_SQRT_2;
        assert_eq!(native.raw_points()[1], [1.0, 1.0, 0.0, w]);
        assert!((native.point_at(0.5).length() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_poly_curve_must_be_one_chain() {
        let c = converter(6);
        let mut log = NotificationCollection::new();
        let joined = g::PolyCurve::new(vec![
            g::Curve::Line(g::Line::new(p(1.0, 0.0), p(1.0, 1.0))),
            g::Curve::Line(g::Line::new(p(0.0, 0.0), p(1.0, 0.0))),
        ]);
        let native = c.poly_curve_to_native(&joined, &mut log).unwrap();
        assert_eq!(native.segments.len(), 2);
        assert!(log.is_empty());

        let split = g::PolyCurve::new(vec![
            g::Curve::Line(g::Line::new(p(0.0, 0.0), p(1.0, 0.0))),
            g::Curve::Line(g::Line::new(p(2.0, 0.0), p(3.0, 0.0))),
        ]);
        assert!(c.poly_curve_to_native(&split, &mut log).is_none());
        assert!(log.has_type(NotificationType::Error));
    }

    #[test]
    fn test_empty_poly_curve() {
        let mut log = NotificationCollection::new();
        assert!(converter(6).poly_curve_to_native(&g::PolyCurve::new(vec![]), &mut log).is_none());
        assert_eq!(log.len(), 1);
        assert_eq!(log.iter().next().unwrap().message, "PolyCurve has no curves.");
    }

    #[test]
    fn test_mesh_drops_out_of_range_faces() {
        let c = converter(6);
        let mut log = NotificationCollection::new();
        let mesh = g::Mesh::new(
            vec![p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0)],
            vec![g::Face::triangle(0, 1, 2), g::Face::triangle(0, 1, 3), g::Face::quad(0, 1, 2, 7)],
        );
        let native = c.mesh_to_native(&mesh, &mut log);
        assert_eq!(native.faces.len(), 1);
        assert_eq!(log.of_type(NotificationType::Warning).len(), 2);
    }

    #[test]
    fn test_planar_surface_with_clean_hole() {
        let c = converter(6);
        let mut log = NotificationCollection::new();
        let ps = g::PlanarSurface::new(rectangle(0.0, 0.0, 10.0, 10.0), vec![rectangle(4.0, 4.0, 6.0, 6.0)]);
        let brep = c.planar_surface_to_native(&ps, &mut log).unwrap();
        assert_eq!(brep.faces.len(), 1);
        assert_eq!(brep.faces[0].loops.len(), 2);
        assert!(log.is_empty());
    }

    #[test]
    fn test_planar_surface_with_overlapping_hole() {
        let c = converter(6);
        let mut log = NotificationCollection::new();
        let ps = g::PlanarSurface::new(rectangle(0.0, 0.0, 10.0, 10.0), vec![rectangle(8.0, 4.0, 12.0, 6.0)]);
        let brep = c.planar_surface_to_native(&ps, &mut log).unwrap();
        assert_eq!(brep.faces.len(), 1);
        assert_eq!(brep.faces[0].loops.len(), 1);
        assert_eq!(log.of_type(NotificationType::Warning).len(), 1);
        assert!(log.iter().next().unwrap().message.contains("Topology might have changed"));
    }

    #[test]
    fn test_planar_surface_with_hole_covering_everything() {
        let c = converter(6);
        let mut log = NotificationCollection::new();
        let ps = g::PlanarSurface::new(rectangle(0.0, 0.0, 10.0, 10.0), vec![rectangle(0.0, 0.0, 10.0, 10.0)]);
        let brep = c.planar_surface_to_native(&ps, &mut log).unwrap();
        assert!(brep.faces.is_empty());
        assert!(log.is_empty());
    }

    #[test]
    fn test_planar_surface_split_by_hole_keeps_first_brep() {
        let c = converter(6);
        let mut log = NotificationCollection::new();
        let ps = g::PlanarSurface::new(rectangle(0.0, 0.0, 10.0, 10.0), vec![rectangle(4.0, -2.0, 6.0, 12.0)]);
        let brep = c.planar_surface_to_native(&ps, &mut log).unwrap();
        assert_eq!(brep.faces.len(), 1);
        assert_eq!(log.len(), 1);
        assert_eq!(log.of_type(NotificationType::Warning).len(), 1);
        assert!(log.iter().next().unwrap().message.contains("only the first brep will be returned"));
    }

    #[test]
    fn test_planar_surface_skips_non_planar_holes() {
        let c = converter(6);
        let mut log = NotificationCollection::new();
        let twisted = g::Curve::Polyline(g::Polyline::new(vec![
            g::Point::new(4.0, 4.0, 0.0),
            g::Point::new(6.0, 4.0, 1.0),
            g::Point::new(6.0, 6.0, 0.0),
            g::Point::new(4.0, 6.0, 1.0),
            g::Point::new(4.0, 4.0, 0.0),
        ]));
        let ps = g::PlanarSurface::new(rectangle(0.0, 0.0, 10.0, 10.0), vec![twisted]);
        let brep = c.planar_surface_to_native(&ps, &mut log).unwrap();
        assert_eq!(brep.faces[0].loops.len(), 1);
        assert_eq!(
            log.iter().next().unwrap().message,
            "1 internal boundaries skipped due to a failed planarity test."
        );
    }

    #[test]
    fn test_extrusion_along_negative_normal() {
        let c = converter(6);
        let mut log = NotificationCollection::new();
        let e = g::Extrusion {
            curve: rectangle(0.0, 0.0, 1.0, 1.0),
            direction: g::Vector::new(0.0, 0.0, -3.0),
            capped: true,
        };
        match c.extrusion_to_native(&e, &mut log) {
            Some(NativeGeometry::Extrusion(x)) => {
                assert!(x.path_vector().almost_equal(&Vector3::new(0.0, 0.0, -3.0), 1e-9));
                assert!(x.capped);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_oblique_extrusion_is_swept() {
        let c = converter(6);
        let mut log = NotificationCollection::new();
        let e = g::Extrusion {
            curve: rectangle(0.0, 0.0, 1.0, 1.0),
            direction: g::Vector::new(1.0, 0.0, 1.0),
            capped: false,
        };
        match c.extrusion_to_native(&e, &mut log) {
            Some(NativeGeometry::Brep(b)) => assert_eq!(b.faces.len(), 1),
            other => panic!("unexpected {other:?}"),
        }
        assert!(log.is_empty());
    }

    #[test]
    fn test_cone_round_trip_keeps_apex() {
        let c = converter(6);
        let mut log = NotificationCollection::new();
        let gc = g::Cone {
            centre: g::Point::ORIGIN,
            axis: g::Vector::Z_AXIS,
            radius: 1.0,
            height: 2.0,
        };
        let native = cone(&gc);
        assert!(native.apex().almost_equal(&Vector3::new(0.0, 0.0, 2.0), 1e-12));
        match c.to_generic(&NativeGeometry::Cone(native), &mut log) {
            Some(Geometry::Solid(g::Solid::Cone(back))) => assert_eq!(back, gc),
            other => panic!("unexpected {other:?}"),
        }
    }
}
