//! Generic solids

use super::primitives::{CartesianCoordinateSystem, Point, Vector};
use super::surface::Surface;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub centre: Point,
    pub radius: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Torus {
    pub centre: Point,
    pub axis: Vector,
    pub radius_major: f64,
    pub radius_minor: f64,
}

/// Cone standing on its base circle; the apex is `centre + axis * height`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cone {
    pub centre: Point,
    pub axis: Vector,
    pub radius: f64,
    pub height: f64,
}

/// Cylinder whose bottom circle is centred on `centre`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cylinder {
    pub centre: Point,
    pub axis: Vector,
    pub radius: f64,
    pub height: f64,
}

/// Box centred on the origin of its coordinate system
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cuboid {
    pub coordinate_system: CartesianCoordinateSystem,
    pub length: f64,
    pub depth: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BoundaryRepresentation {
    pub surfaces: Vec<Surface>,
    pub volume: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Solid {
    Sphere(Sphere),
    Torus(Torus),
    Cone(Cone),
    Cylinder(Cylinder),
    Cuboid(Cuboid),
    BoundaryRepresentation(BoundaryRepresentation),
}

impl Solid {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Solid::Sphere(_) => "Sphere",
            Solid::Torus(_) => "Torus",
            Solid::Cone(_) => "Cone",
            Solid::Cylinder(_) => "Cylinder",
            Solid::Cuboid(_) => "Cuboid",
            Solid::BoundaryRepresentation(_) => "BoundaryRepresentation",
        }
    }
}
