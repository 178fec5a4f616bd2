//! Binary encoding of native geometry inside the object table
//!
//! Every value starts with a tag byte naming its kind; curves and surfaces
//! carry a second tag for the concrete representation. Integers are `u32`,
//! reals `f64`, all little endian.

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::Write;

use super::format::{read_count, read_vector, write_vector};
use crate::error::{BridgeError, Result};
use crate::native::{
    Arc, ArcCurve, Brep, BrepEdge, BrepFace, BrepLoop, BrepTrim, BrepVertex, Circle, Cone,
    ControlPointConvention, Curve, Cylinder, Ellipse, Extrusion, IsoStatus, Line, LineCurve,
    LoopType, Mesh, MeshFace, NativeBox, NativeGeometry, NurbsCurve, NurbsSurface, Plane,
    PlaneSurface, PolyCurve, Polyline, PolylineCurve, RevSurface, Sphere, Surface, Torus, TrimType,
};
use crate::types::{BoundingBox3D, Interval, Quaternion, Transform, Vector3};

/// Nesting limit for poly-curves and groups
const MAX_DEPTH: usize = 64;

mod tag {
    pub const POINT: u8 = 1;
    pub const VECTOR: u8 = 2;
    pub const PLANE: u8 = 3;
    pub const LINE: u8 = 4;
    pub const ARC: u8 = 5;
    pub const CIRCLE: u8 = 6;
    pub const ELLIPSE: u8 = 7;
    pub const POLYLINE: u8 = 8;
    pub const CURVE: u8 = 9;
    pub const SURFACE: u8 = 10;
    pub const BREP: u8 = 11;
    pub const MESH: u8 = 12;
    pub const EXTRUSION: u8 = 13;
    pub const SPHERE: u8 = 14;
    pub const TORUS: u8 = 15;
    pub const CONE: u8 = 16;
    pub const CYLINDER: u8 = 17;
    pub const BOX: u8 = 18;
    pub const BOUNDING_BOX: u8 = 19;
    pub const TRANSFORM: u8 = 20;
    pub const QUATERNION: u8 = 21;
    pub const GROUP: u8 = 22;

    pub const LINE_CURVE: u8 = 1;
    pub const ARC_CURVE: u8 = 2;
    pub const POLYLINE_CURVE: u8 = 3;
    pub const NURBS_CURVE: u8 = 4;
    pub const POLY_CURVE: u8 = 5;

    pub const PLANE_SURFACE: u8 = 1;
    pub const NURBS_SURFACE: u8 = 2;
    pub const REV_SURFACE: u8 = 3;
}

// ===========================================================================
// Writing
// ===========================================================================

/// Serialises geometry into any byte sink
pub struct GeometryWriter<W: Write> {
    writer: W,
}

impl<W: Write> GeometryWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn u8(&mut self, v: u8) -> Result<()> {
        self.writer.write_u8(v)?;
        Ok(())
    }

    fn u32(&mut self, v: usize) -> Result<()> {
        let v = u32::try_from(v).map_err(|_| BridgeError::InvalidFormat(format!("{v} does not fit in 32 bits")))?;
        self.writer.write_u32::<LittleEndian>(v)?;
        Ok(())
    }

    fn f64(&mut self, v: f64) -> Result<()> {
        self.writer.write_f64::<LittleEndian>(v)?;
        Ok(())
    }

    fn bool(&mut self, v: bool) -> Result<()> {
        self.u8(v as u8)
    }

    fn vector(&mut self, v: Vector3) -> Result<()> {
        write_vector(&mut self.writer, v)
    }

    fn interval(&mut self, i: Interval) -> Result<()> {
        self.f64(i.t0)?;
        self.f64(i.t1)
    }

    fn reals(&mut self, values: &[f64]) -> Result<()> {
        self.u32(values.len())?;
        values.iter().try_for_each(|v| self.f64(*v))
    }

    fn points(&mut self, points: &[Vector3]) -> Result<()> {
        self.u32(points.len())?;
        points.iter().try_for_each(|p| self.vector(*p))
    }

    fn plane(&mut self, p: &Plane) -> Result<()> {
        self.vector(p.origin)?;
        self.vector(p.x_axis)?;
        self.vector(p.y_axis)?;
        self.vector(p.z_axis)
    }

    fn line(&mut self, l: &Line) -> Result<()> {
        self.vector(l.from)?;
        self.vector(l.to)
    }

    fn arc(&mut self, a: &Arc) -> Result<()> {
        self.plane(&a.plane)?;
        self.f64(a.radius)?;
        self.interval(a.angle)
    }

    fn circle(&mut self, c: &Circle) -> Result<()> {
        self.plane(&c.plane)?;
        self.f64(c.radius)
    }

    /// Write one tagged geometry value
    pub fn write_geometry(&mut self, g: &NativeGeometry) -> Result<()> {
        match g {
            NativeGeometry::Point(p) => {
                self.u8(tag::POINT)?;
                self.vector(*p)
            }
            NativeGeometry::Vector(v) => {
                self.u8(tag::VECTOR)?;
                self.vector(*v)
            }
            NativeGeometry::Plane(p) => {
                self.u8(tag::PLANE)?;
                self.plane(p)
            }
            NativeGeometry::Line(l) => {
                self.u8(tag::LINE)?;
                self.line(l)
            }
            NativeGeometry::Arc(a) => {
                self.u8(tag::ARC)?;
                self.arc(a)
            }
            NativeGeometry::Circle(c) => {
                self.u8(tag::CIRCLE)?;
                self.circle(c)
            }
            NativeGeometry::Ellipse(e) => {
                self.u8(tag::ELLIPSE)?;
                self.plane(&e.plane)?;
                self.f64(e.radius1)?;
                self.f64(e.radius2)
            }
            NativeGeometry::Polyline(p) => {
                self.u8(tag::POLYLINE)?;
                self.points(&p.points)
            }
            NativeGeometry::Curve(c) => {
                self.u8(tag::CURVE)?;
                self.curve(c)
            }
            NativeGeometry::Surface(s) => {
                self.u8(tag::SURFACE)?;
                self.surface(s)
            }
            NativeGeometry::Brep(b) => {
                self.u8(tag::BREP)?;
                self.brep(b)
            }
            NativeGeometry::Mesh(m) => {
                self.u8(tag::MESH)?;
                self.points(&m.vertices)?;
                self.u32(m.faces.len())?;
                m.faces.iter().try_for_each(|f| {
                    [f.a, f.b, f.c, f.d].iter().try_for_each(|i| self.u32(*i))
                })
            }
            NativeGeometry::Extrusion(e) => {
                self.u8(tag::EXTRUSION)?;
                self.curve(&e.profile)?;
                self.vector(e.path_start)?;
                self.vector(e.path_end)?;
                self.bool(e.capped)
            }
            NativeGeometry::Sphere(s) => {
                self.u8(tag::SPHERE)?;
                self.plane(&s.plane)?;
                self.f64(s.radius)
            }
            NativeGeometry::Torus(t) => {
                self.u8(tag::TORUS)?;
                self.plane(&t.plane)?;
                self.f64(t.major_radius)?;
                self.f64(t.minor_radius)
            }
            NativeGeometry::Cone(c) => {
                self.u8(tag::CONE)?;
                self.plane(&c.plane)?;
                self.f64(c.height)?;
                self.f64(c.radius)
            }
            NativeGeometry::Cylinder(c) => {
                self.u8(tag::CYLINDER)?;
                self.circle(&c.circle)?;
                self.f64(c.height1)?;
                self.f64(c.height2)
            }
            NativeGeometry::Box(b) => {
                self.u8(tag::BOX)?;
                self.plane(&b.plane)?;
                self.interval(b.x)?;
                self.interval(b.y)?;
                self.interval(b.z)
            }
            NativeGeometry::BoundingBox(b) => {
                self.u8(tag::BOUNDING_BOX)?;
                self.vector(b.min)?;
                self.vector(b.max)
            }
            NativeGeometry::Transform(t) => {
                self.u8(tag::TRANSFORM)?;
                t.m.iter().flatten().try_for_each(|v| self.f64(*v))
            }
            NativeGeometry::Quaternion(q) => {
                self.u8(tag::QUATERNION)?;
                [q.a, q.b, q.c, q.d].iter().try_for_each(|v| self.f64(*v))
            }
            NativeGeometry::Group(members) => {
                self.u8(tag::GROUP)?;
                self.u32(members.len())?;
                members.iter().try_for_each(|m| self.write_geometry(m))
            }
        }
    }

    fn curve(&mut self, c: &Curve) -> Result<()> {
        match c {
            Curve::Line(l) => {
                self.u8(tag::LINE_CURVE)?;
                self.line(&l.line)?;
                self.interval(l.domain)
            }
            Curve::Arc(a) => {
                self.u8(tag::ARC_CURVE)?;
                self.arc(&a.arc)?;
                self.interval(a.domain)
            }
            Curve::Polyline(p) => {
                self.u8(tag::POLYLINE_CURVE)?;
                self.points(&p.points)
            }
            Curve::Nurbs(n) => {
                self.u8(tag::NURBS_CURVE)?;
                self.u32(n.degree())?;
                self.u8(match n.convention() {
                    ControlPointConvention::Euclidean => 0,
                    ControlPointConvention::Homogeneous => 1,
                })?;
                self.reals(n.knots())?;
                self.u32(n.raw_points().len())?;
                n.raw_points().iter().flatten().try_for_each(|v| self.f64(*v))
            }
            Curve::Poly(p) => {
                self.u8(tag::POLY_CURVE)?;
                self.u32(p.segments.len())?;
                p.segments.iter().try_for_each(|s| self.curve(s))
            }
        }
    }

    fn surface(&mut self, s: &Surface) -> Result<()> {
        match s {
            Surface::Plane(p) => {
                self.u8(tag::PLANE_SURFACE)?;
                self.plane(&p.plane)?;
                self.interval(p.u)?;
                self.interval(p.v)
            }
            Surface::Nurbs(n) => {
                self.u8(tag::NURBS_SURFACE)?;
                self.u32(n.degree_u)?;
                self.u32(n.degree_v)?;
                self.u32(n.u_count)?;
                self.u32(n.v_count)?;
                self.reals(&n.knots_u)?;
                self.reals(&n.knots_v)?;
                self.u32(n.cvs.len())?;
                n.cvs.iter().flatten().try_for_each(|v| self.f64(*v))
            }
            Surface::Revolution(r) => {
                self.u8(tag::REV_SURFACE)?;
                self.curve(&r.profile)?;
                self.line(&r.axis)?;
                self.interval(r.angle)
            }
        }
    }

    fn brep(&mut self, b: &Brep) -> Result<()> {
        self.u32(b.surfaces.len())?;
        b.surfaces.iter().try_for_each(|s| self.surface(s))?;
        self.u32(b.curves2d.len())?;
        b.curves2d.iter().try_for_each(|c| self.curve(c))?;
        self.u32(b.curves3d.len())?;
        b.curves3d.iter().try_for_each(|c| self.curve(c))?;

        self.u32(b.vertices.len())?;
        for v in &b.vertices {
            self.vector(v.point)?;
            self.f64(v.tolerance)?;
        }
        self.u32(b.edges.len())?;
        for e in &b.edges {
            self.u32(e.curve3d)?;
            self.u32(e.vertices[0])?;
            self.u32(e.vertices[1])?;
            self.f64(e.tolerance)?;
            self.u32(e.trims.len())?;
            e.trims.iter().try_for_each(|t| self.u32(*t))?;
        }
        self.u32(b.trims.len())?;
        for t in &b.trims {
            self.u32(t.curve2d)?;
            // u32::MAX marks a trim without an edge
            match t.edge {
                Some(e) => self.u32(e)?,
                None => self.writer.write_u32::<LittleEndian>(u32::MAX)?,
            }
            self.u32(t.vertices[0])?;
            self.u32(t.vertices[1])?;
            self.u32(t.loop_index)?;
            self.u8(iso_to_u8(t.iso))?;
            self.u8(trim_type_to_u8(t.trim_type))?;
            self.bool(t.reversed)?;
        }
        self.u32(b.loops.len())?;
        for l in &b.loops {
            self.u32(l.face)?;
            self.bool(l.loop_type == LoopType::Inner)?;
            self.u32(l.trims.len())?;
            l.trims.iter().try_for_each(|t| self.u32(*t))?;
        }
        self.u32(b.faces.len())?;
        for f in &b.faces {
            self.u32(f.surface)?;
            self.bool(f.reversed)?;
            self.u32(f.loops.len())?;
            f.loops.iter().try_for_each(|l| self.u32(*l))?;
        }
        Ok(())
    }
}

fn iso_to_u8(iso: IsoStatus) -> u8 {
    match iso {
        IsoStatus::None => 0,
        IsoStatus::X => 1,
        IsoStatus::Y => 2,
        IsoStatus::West => 3,
        IsoStatus::South => 4,
        IsoStatus::East => 5,
        IsoStatus::North => 6,
    }
}

fn iso_from_u8(v: u8) -> Result<IsoStatus> {
    Ok(match v {
        0 => IsoStatus::None,
        1 => IsoStatus::X,
        2 => IsoStatus::Y,
        3 => IsoStatus::West,
        4 => IsoStatus::South,
        5 => IsoStatus::East,
        6 => IsoStatus::North,
        _ => return Err(BridgeError::InvalidFormat(format!("unknown iso status {v}"))),
    })
}

fn trim_type_to_u8(t: TrimType) -> u8 {
    match t {
        TrimType::Unknown => 0,
        TrimType::Boundary => 1,
        TrimType::Mated => 2,
        TrimType::Seam => 3,
        TrimType::Singular => 4,
    }
}

fn trim_type_from_u8(v: u8) -> Result<TrimType> {
    Ok(match v {
        0 => TrimType::Unknown,
        1 => TrimType::Boundary,
        2 => TrimType::Mated,
        3 => TrimType::Seam,
        4 => TrimType::Singular,
        _ => return Err(BridgeError::InvalidFormat(format!("unknown trim type {v}"))),
    })
}

// ===========================================================================
// Reading
// ===========================================================================

/// Decodes geometry from an in-memory buffer
pub struct GeometryReader<'a> {
    input: &'a [u8],
    depth: usize,
}

impl<'a> GeometryReader<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self { input, depth: 0 }
    }

    /// Bytes not yet consumed
    pub fn remaining(&self) -> &'a [u8] {
        self.input
    }

    fn u8(&mut self) -> Result<u8> {
        Ok(self.input.read_u8()?)
    }

    fn u32(&mut self) -> Result<usize> {
        Ok(self.input.read_u32::<LittleEndian>()? as usize)
    }

    fn f64(&mut self) -> Result<f64> {
        Ok(self.input.read_f64::<LittleEndian>()?)
    }

    fn bool(&mut self) -> Result<bool> {
        Ok(self.u8()? != 0)
    }

    /// Element count, checked against the bytes left
    fn count(&mut self, min_item_size: usize) -> Result<usize> {
        read_count(&mut self.input, min_item_size)
    }

    fn vector(&mut self) -> Result<Vector3> {
        read_vector(&mut self.input)
    }

    fn interval(&mut self) -> Result<Interval> {
        Ok(Interval::new(self.f64()?, self.f64()?))
    }

    fn reals(&mut self) -> Result<Vec<f64>> {
        let n = self.count(8)?;
        (0..n).map(|_| self.f64()).collect()
    }

    fn points(&mut self) -> Result<Vec<Vector3>> {
        let n = self.count(24)?;
        (0..n).map(|_| self.vector()).collect()
    }

    fn indices(&mut self) -> Result<Vec<usize>> {
        let n = self.count(4)?;
        (0..n).map(|_| self.u32()).collect()
    }

    fn plane(&mut self) -> Result<Plane> {
        Ok(Plane {
            origin: self.vector()?,
            x_axis: self.vector()?,
            y_axis: self.vector()?,
            z_axis: self.vector()?,
        })
    }

    fn line(&mut self) -> Result<Line> {
        Ok(Line::new(self.vector()?, self.vector()?))
    }

    fn arc(&mut self) -> Result<Arc> {
        Ok(Arc {
            plane: self.plane()?,
            radius: self.f64()?,
            angle: self.interval()?,
        })
    }

    fn circle(&mut self) -> Result<Circle> {
        Ok(Circle {
            plane: self.plane()?,
            radius: self.f64()?,
        })
    }

    fn descend(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(BridgeError::InvalidFormat("geometry nested too deeply".into()));
        }
        Ok(())
    }

    /// Read one tagged geometry value
    pub fn read_geometry(&mut self) -> Result<NativeGeometry> {
        let kind = self.u8()?;
        Ok(match kind {
            tag::POINT => NativeGeometry::Point(self.vector()?),
            tag::VECTOR => NativeGeometry::Vector(self.vector()?),
            tag::PLANE => NativeGeometry::Plane(self.plane()?),
            tag::LINE => NativeGeometry::Line(self.line()?),
            tag::ARC => NativeGeometry::Arc(self.arc()?),
            tag::CIRCLE => NativeGeometry::Circle(self.circle()?),
            tag::ELLIPSE => NativeGeometry::Ellipse(Ellipse {
                plane: self.plane()?,
                radius1: self.f64()?,
                radius2: self.f64()?,
            }),
            tag::POLYLINE => NativeGeometry::Polyline(Polyline::new(self.points()?)),
            tag::CURVE => NativeGeometry::Curve(self.curve()?),
            tag::SURFACE => NativeGeometry::Surface(self.surface()?),
            tag::BREP => NativeGeometry::Brep(self.brep()?),
            tag::MESH => {
                let vertices = self.points()?;
                let n = self.count(16)?;
                let faces = (0..n)
                    .map(|_| Ok(MeshFace::quad(self.u32()?, self.u32()?, self.u32()?, self.u32()?)))
                    .collect::<Result<Vec<_>>>()?;
                NativeGeometry::Mesh(Mesh { vertices, faces })
            }
            tag::EXTRUSION => NativeGeometry::Extrusion(Extrusion {
                profile: self.curve()?,
                path_start: self.vector()?,
                path_end: self.vector()?,
                capped: self.bool()?,
            }),
            tag::SPHERE => NativeGeometry::Sphere(Sphere {
                plane: self.plane()?,
                radius: self.f64()?,
            }),
            tag::TORUS => NativeGeometry::Torus(Torus {
                plane: self.plane()?,
                major_radius: self.f64()?,
                minor_radius: self.f64()?,
            }),
            tag::CONE => NativeGeometry::Cone(Cone {
                plane: self.plane()?,
                height: self.f64()?,
                radius: self.f64()?,
            }),
            tag::CYLINDER => NativeGeometry::Cylinder(Cylinder {
                circle: self.circle()?,
                height1: self.f64()?,
                height2: self.f64()?,
            }),
            tag::BOX => NativeGeometry::Box(NativeBox {
                plane: self.plane()?,
                x: self.interval()?,
                y: self.interval()?,
                z: self.interval()?,
            }),
            tag::BOUNDING_BOX => NativeGeometry::BoundingBox(BoundingBox3D::new(self.vector()?, self.vector()?)),
            tag::TRANSFORM => {
                let mut m = [[0.0; 4]; 4];
                for row in m.iter_mut() {
                    for v in row.iter_mut() {
                        *v = self.f64()?;
                    }
                }
                NativeGeometry::Transform(Transform { m })
            }
            tag::QUATERNION => {
                NativeGeometry::Quaternion(Quaternion::new(self.f64()?, self.f64()?, self.f64()?, self.f64()?))
            }
            tag::GROUP => {
                self.descend()?;
                let n = self.count(1)?;
                let members = (0..n).map(|_| self.read_geometry()).collect::<Result<Vec<_>>>()?;
                self.depth -= 1;
                NativeGeometry::Group(members)
            }
            other => return Err(BridgeError::InvalidFormat(format!("unknown geometry tag {other}"))),
        })
    }

    fn curve(&mut self) -> Result<Curve> {
        let kind = self.u8()?;
        Ok(match kind {
            tag::LINE_CURVE => Curve::Line(LineCurve {
                line: self.line()?,
                domain: self.interval()?,
            }),
            tag::ARC_CURVE => Curve::Arc(ArcCurve {
                arc: self.arc()?,
                domain: self.interval()?,
            }),
            tag::POLYLINE_CURVE => Curve::Polyline(PolylineCurve::new(self.points()?)),
            tag::NURBS_CURVE => {
                let degree = self.u32()?;
                let convention = match self.u8()? {
                    0 => ControlPointConvention::Euclidean,
                    _ => ControlPointConvention::Homogeneous,
                };
                let knots = self.reals()?;
                let count = self.count(32)?;
                if degree == 0 || count <= degree || knots.len() + 1 != count + degree {
                    return Err(BridgeError::InvalidFormat(format!(
                        "NURBS curve of degree {degree} with {count} points cannot have {} knots",
                        knots.len()
                    )));
                }
                let mut nurbs = NurbsCurve::new(degree, count, convention);
                for (i, k) in knots.into_iter().enumerate() {
                    nurbs.set_knot(i, k);
                }
                for i in 0..count {
                    nurbs.set_point(i, self.f64()?, self.f64()?, self.f64()?, self.f64()?);
                }
                Curve::Nurbs(nurbs)
            }
            tag::POLY_CURVE => {
                self.descend()?;
                let n = self.count(1)?;
                let segments = (0..n).map(|_| self.curve()).collect::<Result<Vec<_>>>()?;
                self.depth -= 1;
                Curve::Poly(PolyCurve::new(segments))
            }
            other => return Err(BridgeError::InvalidFormat(format!("unknown curve tag {other}"))),
        })
    }

    fn surface(&mut self) -> Result<Surface> {
        let kind = self.u8()?;
        Ok(match kind {
            tag::PLANE_SURFACE => Surface::Plane(PlaneSurface::new(self.plane()?, self.interval()?, self.interval()?)),
            tag::NURBS_SURFACE => {
                let (degree_u, degree_v, u_count, v_count) = (self.u32()?, self.u32()?, self.u32()?, self.u32()?);
                let knots_u = self.reals()?;
                let knots_v = self.reals()?;
                let n = self.count(32)?;
                if n != u_count.saturating_mul(v_count) {
                    return Err(BridgeError::InvalidFormat(format!(
                        "NURBS surface of {u_count}x{v_count} points stores {n}"
                    )));
                }
                let cvs = (0..n)
                    .map(|_| Ok([self.f64()?, self.f64()?, self.f64()?, self.f64()?]))
                    .collect::<Result<Vec<_>>>()?;
                Surface::Nurbs(NurbsSurface {
                    degree_u,
                    degree_v,
                    u_count,
                    v_count,
                    knots_u,
                    knots_v,
                    cvs,
                })
            }
            tag::REV_SURFACE => Surface::Revolution(RevSurface::new(self.curve()?, self.line()?, self.interval()?)),
            other => return Err(BridgeError::InvalidFormat(format!("unknown surface tag {other}"))),
        })
    }

    fn brep(&mut self) -> Result<Brep> {
        let mut b = Brep::new();
        let n = self.count(1)?;
        b.surfaces = (0..n).map(|_| self.surface()).collect::<Result<_>>()?;
        let n = self.count(1)?;
        b.curves2d = (0..n).map(|_| self.curve()).collect::<Result<_>>()?;
        let n = self.count(1)?;
        b.curves3d = (0..n).map(|_| self.curve()).collect::<Result<_>>()?;

        let n = self.count(32)?;
        for _ in 0..n {
            b.vertices.push(BrepVertex {
                point: self.vector()?,
                tolerance: self.f64()?,
            });
        }
        let n = self.count(24)?;
        for _ in 0..n {
            b.edges.push(BrepEdge {
                curve3d: self.u32()?,
                vertices: [self.u32()?, self.u32()?],
                tolerance: self.f64()?,
                trims: self.indices()?,
            });
        }
        let n = self.count(23)?;
        for _ in 0..n {
            let curve2d = self.u32()?;
            let edge = match self.input.read_u32::<LittleEndian>()? {
                u32::MAX => None,
                e => Some(e as usize),
            };
            b.trims.push(BrepTrim {
                curve2d,
                edge,
                vertices: [self.u32()?, self.u32()?],
                loop_index: self.u32()?,
                iso: iso_from_u8(self.u8()?)?,
                trim_type: trim_type_from_u8(self.u8()?)?,
                reversed: self.bool()?,
            });
        }
        let n = self.count(9)?;
        for _ in 0..n {
            b.loops.push(BrepLoop {
                face: self.u32()?,
                loop_type: if self.bool()? { LoopType::Inner } else { LoopType::Outer },
                trims: self.indices()?,
            });
        }
        let n = self.count(9)?;
        for _ in 0..n {
            b.faces.push(BrepFace {
                surface: self.u32()?,
                reversed: self.bool()?,
                loops: self.indices()?,
            });
        }
        Ok(b)
    }
}

/// Encode one geometry value into a fresh buffer
pub fn encode(g: &NativeGeometry) -> Result<Vec<u8>> {
    let mut writer = GeometryWriter::new(Vec::new());
    writer.write_geometry(g)?;
    Ok(writer.into_inner())
}

/// Decode one geometry value; trailing bytes are an error
pub fn decode(bytes: &[u8]) -> Result<NativeGeometry> {
    let mut reader = GeometryReader::new(bytes);
    let g = reader.read_geometry()?;
    if !reader.remaining().is_empty() {
        return Err(BridgeError::InvalidFormat(format!(
            "{} trailing bytes after geometry",
            reader.remaining().len()
        )));
    }
    Ok(g)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::native::{Sphere, Torus};
    use std::f64::consts::PI;

    fn round_trip(g: NativeGeometry) {
        let bytes = encode(&g).unwrap();
        assert_eq!(decode(&bytes).unwrap(), g);
    }

    #[test]
    fn test_sphere_brep_survives_encoding() {
        round_trip(NativeGeometry::Brep(Sphere::new(Vector3::new(1.0, 2.0, 3.0), 4.0).to_brep()));
    }

    #[test]
    fn test_nested_poly_curve_and_nurbs() {
        let w = std::f64::consts::FRAC_1_SQRT_2;
        let mut nurbs = NurbsCurve::new(2, 3, ControlPointConvention::Euclidean);
        for (i, k) in [0.0, 0.0, 1.0, 1.0].into_iter().enumerate() {
            nurbs.set_knot(i, k);
        }
        nurbs.set_point(0, 1.0, 0.0, 0.0, 1.0);
        nurbs.set_point(1, 1.0, 1.0, 0.0, w);
        nurbs.set_point(2, 0.0, 1.0, 0.0, 1.0);
        let inner = Curve::Poly(PolyCurve::new(vec![
            Curve::line(Vector3::ZERO, Vector3::UNIT_X),
            Curve::Nurbs(nurbs),
        ]));
        let outer = Curve::Poly(PolyCurve::new(vec![
            inner,
            Curve::arc(Arc::new(Plane::world_xy(), 1.0, Interval::new(PI / 2.0, PI))),
        ]));
        round_trip(NativeGeometry::Curve(outer));
    }

    #[test]
    fn test_solids_and_mesh() {
        round_trip(NativeGeometry::Torus(Torus::new(Plane::world_xy(), 5.0, 1.0)));
        let mut mesh = Mesh::new();
        for p in [Vector3::ZERO, Vector3::UNIT_X, Vector3::UNIT_Y, Vector3::new(1.0, 1.0, 0.0)] {
            mesh.add_vertex(p);
        }
        mesh.add_face(MeshFace::quad(0, 1, 3, 2));
        mesh.add_face(MeshFace::triangle(0, 1, 2));
        round_trip(NativeGeometry::Mesh(mesh));
    }

    #[test]
    fn test_unknown_tag_is_rejected() {
        assert!(matches!(decode(&[200]), Err(BridgeError::InvalidFormat(_))));
    }

    #[test]
    fn test_huge_count_is_rejected_before_allocating() {
        let mut bytes = vec![tag::POLYLINE];
        bytes.extend_from_slice(&u32::MAX.to_le_bytes());
        assert!(matches!(decode(&bytes), Err(BridgeError::InvalidFormat(_))));
    }

    #[test]
    fn test_truncated_input_is_an_error() {
        let bytes = encode(&NativeGeometry::Point(Vector3::UNIT_Z)).unwrap();
        assert!(decode(&bytes[..bytes.len() - 1]).is_err());
    }
}
