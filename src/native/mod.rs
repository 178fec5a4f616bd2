//! Native CAD object model
//!
//! Geometry as it is stored in a `.3dm` document: concrete curve kinds with
//! parameter domains, surfaces, boundary representations with explicit
//! trim topology, meshes, extrusions and analytic solids.

pub mod brep;
pub mod curve;
pub mod extrusion;
pub mod mesh;
pub mod plane;
pub mod primitives;
pub mod solid;
pub mod surface;

pub use brep::{
    Brep, BrepEdge, BrepFace, BrepLoop, BrepTrim, BrepVertex, IsoStatus, LoopType, TrimType,
};
pub use curve::{ArcCurve, ControlPointConvention, Curve, LineCurve, NurbsCurve, PolyCurve, PolylineCurve};
pub use extrusion::Extrusion;
pub use mesh::{Mesh, MeshFace};
pub use plane::Plane;
pub use primitives::{Arc, Circle, Ellipse, Line, Polyline};
pub use solid::{Cone, Cylinder, NativeBox, Sphere, Torus};
pub use surface::{NurbsSurface, PlaneSurface, RevSurface, Surface};

use crate::types::{BoundingBox3D, Quaternion, Transform, Vector3};

/// Any object the native model can hold or a converter can produce
#[derive(Debug, Clone, PartialEq)]
pub enum NativeGeometry {
    Point(Vector3),
    Vector(Vector3),
    Plane(Plane),
    Line(Line),
    Arc(Arc),
    Circle(Circle),
    Ellipse(Ellipse),
    Polyline(Polyline),
    Curve(Curve),
    Surface(Surface),
    Brep(Brep),
    Mesh(Mesh),
    Extrusion(Extrusion),
    Sphere(Sphere),
    Torus(Torus),
    Cone(Cone),
    Cylinder(Cylinder),
    Box(NativeBox),
    BoundingBox(BoundingBox3D),
    Transform(Transform),
    Quaternion(Quaternion),
    /// Several objects produced by one conversion
    Group(Vec<NativeGeometry>),
}

impl NativeGeometry {
    /// Name of the concrete kind, used in diagnostics
    pub fn kind_name(&self) -> &'static str {
        match self {
            NativeGeometry::Point(_) => "Point",
            NativeGeometry::Vector(_) => "Vector",
            NativeGeometry::Plane(_) => "Plane",
            NativeGeometry::Line(_) => "Line",
            NativeGeometry::Arc(_) => "Arc",
            NativeGeometry::Circle(_) => "Circle",
            NativeGeometry::Ellipse(_) => "Ellipse",
            NativeGeometry::Polyline(_) => "Polyline",
            NativeGeometry::Curve(c) => c.kind_name(),
            NativeGeometry::Surface(s) => s.kind_name(),
            NativeGeometry::Brep(_) => "Brep",
            NativeGeometry::Mesh(_) => "Mesh",
            NativeGeometry::Extrusion(_) => "Extrusion",
            NativeGeometry::Sphere(_) => "Sphere",
            NativeGeometry::Torus(_) => "Torus",
            NativeGeometry::Cone(_) => "Cone",
            NativeGeometry::Cylinder(_) => "Cylinder",
            NativeGeometry::Box(_) => "Box",
            NativeGeometry::BoundingBox(_) => "BoundingBox",
            NativeGeometry::Transform(_) => "Transform",
            NativeGeometry::Quaternion(_) => "Quaternion",
            NativeGeometry::Group(_) => "Group",
        }
    }

    /// True for kinds a document stores as model objects
    pub fn is_document_object(&self) -> bool {
        !matches!(
            self,
            NativeGeometry::Vector(_)
                | NativeGeometry::Plane(_)
                | NativeGeometry::Transform(_)
                | NativeGeometry::Quaternion(_)
                | NativeGeometry::Group(_)
        )
    }
}

macro_rules! impl_from_native {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(impl From<$ty> for NativeGeometry {
            fn from(value: $ty) -> Self {
                NativeGeometry::$variant(value)
            }
        })*
    };
}

impl_from_native! {
    Plane => Plane,
    Line => Line,
    Arc => Arc,
    Circle => Circle,
    Ellipse => Ellipse,
    Polyline => Polyline,
    Curve => Curve,
    Surface => Surface,
    Brep => Brep,
    Mesh => Mesh,
    Extrusion => Extrusion,
    Sphere => Sphere,
    Torus => Torus,
    Cone => Cone,
    Cylinder => Cylinder,
    NativeBox => Box,
    BoundingBox3D => BoundingBox,
    Transform => Transform,
    Quaternion => Quaternion,
}
