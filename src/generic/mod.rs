//! Generic building-geometry model
//!
//! Plain owned values with no parameter domains and no topology. Every
//! conversion builds these fresh; nothing here refers back to a native
//! object.

pub mod curve;
pub mod join;
pub mod mesh;
pub mod primitives;
pub mod solid;
pub mod surface;

pub use curve::{Arc, Circle, Curve, Ellipse, Line, NurbsCurve, PolyCurve, Polyline};
pub use join::join;
pub use mesh::{Face, Mesh};
pub use primitives::{
    BoundingBox, CartesianCoordinateSystem, Plane, Point, Quaternion, TransformMatrix, Vector,
};
pub use solid::{BoundaryRepresentation, Cone, Cuboid, Cylinder, Solid, Sphere, Torus};
pub use surface::{Extrusion, NurbsSurface, PlanarSurface, PolySurface, Surface, SurfaceTrim};

/// Group of geometries carried as one value
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompositeGeometry {
    pub elements: Vec<Geometry>,
}

/// Any generic geometry value
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point(Point),
    Vector(Vector),
    Plane(Plane),
    CoordinateSystem(CartesianCoordinateSystem),
    Curve(Curve),
    Surface(Surface),
    Solid(Solid),
    Mesh(Mesh),
    Transform(TransformMatrix),
    Quaternion(Quaternion),
    BoundingBox(BoundingBox),
    Composite(CompositeGeometry),
}

impl Geometry {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Geometry::Point(_) => "Point",
            Geometry::Vector(_) => "Vector",
            Geometry::Plane(_) => "Plane",
            Geometry::CoordinateSystem(_) => "CartesianCoordinateSystem",
            Geometry::Curve(c) => c.kind_name(),
            Geometry::Surface(s) => s.kind_name(),
            Geometry::Solid(s) => s.kind_name(),
            Geometry::Mesh(_) => "Mesh",
            Geometry::Transform(_) => "TransformMatrix",
            Geometry::Quaternion(_) => "Quaternion",
            Geometry::BoundingBox(_) => "BoundingBox",
            Geometry::Composite(_) => "CompositeGeometry",
        }
    }
}

macro_rules! impl_from_generic {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(impl From<$ty> for Geometry {
            fn from(value: $ty) -> Self {
                Geometry::$variant(value)
            }
        })*
    };
}

impl_from_generic! {
    Point => Point,
    Vector => Vector,
    Plane => Plane,
    CartesianCoordinateSystem => CoordinateSystem,
    Curve => Curve,
    Surface => Surface,
    Solid => Solid,
    Mesh => Mesh,
    TransformMatrix => Transform,
    Quaternion => Quaternion,
    BoundingBox => BoundingBox,
    CompositeGeometry => Composite,
}

macro_rules! impl_from_variant {
    ($outer:ident, $($ty:ty => $variant:ident),* $(,)?) => {
        $(impl From<$ty> for Geometry {
            fn from(value: $ty) -> Self {
                Geometry::$outer($outer::$variant(value))
            }
        })*
    };
}

impl_from_variant!(Curve, Line => Line, Arc => Arc, Circle => Circle, Ellipse => Ellipse,
    Polyline => Polyline, NurbsCurve => Nurbs, PolyCurve => Poly);
impl_from_variant!(Surface, PlanarSurface => Planar, NurbsSurface => Nurbs,
    PolySurface => Poly, Extrusion => Extrusion);
impl_from_variant!(Solid, Sphere => Sphere, Torus => Torus, Cone => Cone, Cylinder => Cylinder,
    Cuboid => Cuboid, BoundaryRepresentation => BoundaryRepresentation);
