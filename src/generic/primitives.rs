//! Generic points, vectors, planes and frames

use std::ops::{Add, Mul, Neg, Sub};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point {
    pub const ORIGIN: Point = Point::new(0.0, 0.0, 0.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Point { x, y, z }
    }

    pub fn distance(&self, other: &Point) -> f64 {
        (*self - *other).length()
    }

    /// Component-wise comparison within `tolerance`
    pub fn is_equal(&self, other: &Point, tolerance: f64) -> bool {
        (self.x - other.x).abs() <= tolerance
            && (self.y - other.y).abs() <= tolerance
            && (self.z - other.z).abs() <= tolerance
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector {
    pub const X_AXIS: Vector = Vector::new(1.0, 0.0, 0.0);
    pub const Y_AXIS: Vector = Vector::new(0.0, 1.0, 0.0);
    pub const Z_AXIS: Vector = Vector::new(0.0, 0.0, 1.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Vector { x, y, z }
    }

    pub fn length(&self) -> f64 {
        self.dot(self).sqrt()
    }

    pub fn dot(&self, other: &Vector) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(&self, other: &Vector) -> Vector {
        Vector::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Unit vector; the zero vector stays zero
    pub fn normalise(&self) -> Vector {
        let len = self.length();
        if len == 0.0 {
            *self
        } else {
            *self * (1.0 / len)
        }
    }

    pub fn angle(&self, other: &Vector) -> f64 {
        let denom = self.length() * other.length();
        if denom == 0.0 {
            return 0.0;
        }
        (self.dot(other) / denom).clamp(-1.0, 1.0).acos()
    }
}

impl Add<Vector> for Point {
    type Output = Point;
    fn add(self, v: Vector) -> Point {
        Point::new(self.x + v.x, self.y + v.y, self.z + v.z)
    }
}

impl Sub for Point {
    type Output = Vector;
    fn sub(self, other: Point) -> Vector {
        Vector::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl Add for Vector {
    type Output = Vector;
    fn add(self, other: Vector) -> Vector {
        Vector::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl Sub for Vector {
    type Output = Vector;
    fn sub(self, other: Vector) -> Vector {
        Vector::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;
    fn mul(self, s: f64) -> Vector {
        Vector::new(self.x * s, self.y * s, self.z * s)
    }
}

impl Neg for Vector {
    type Output = Vector;
    fn neg(self) -> Vector {
        Vector::new(-self.x, -self.y, -self.z)
    }
}

/// Plane given by a point and a normal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub origin: Point,
    pub normal: Vector,
}

/// Origin plus three axes; the axes are stored as given
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CartesianCoordinateSystem {
    pub origin: Point,
    pub x: Vector,
    pub y: Vector,
    pub z: Vector,
}

impl CartesianCoordinateSystem {
    /// Frame from an x direction and an in-plane y direction
    pub fn new(origin: Point, x: Vector, y: Vector) -> Self {
        let x = x.normalise();
        let y = (y - x * y.dot(&x)).normalise();
        CartesianCoordinateSystem {
            origin,
            x,
            y,
            z: x.cross(&y),
        }
    }

    pub fn global_xy() -> Self {
        CartesianCoordinateSystem {
            origin: Point::ORIGIN,
            x: Vector::X_AXIS,
            y: Vector::Y_AXIS,
            z: Vector::Z_AXIS,
        }
    }

    /// World point at local coordinates
    pub fn point_at(&self, x: f64, y: f64, z: f64) -> Point {
        self.origin + self.x * x + self.y * y + self.z * z
    }
}

impl Default for CartesianCoordinateSystem {
    fn default() -> Self {
        Self::global_xy()
    }
}

/// Row-major 4×4 affine matrix
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformMatrix {
    pub matrix: [[f64; 4]; 4],
}

impl Default for TransformMatrix {
    fn default() -> Self {
        let mut matrix = [[0.0; 4]; 4];
        for (i, row) in matrix.iter_mut().enumerate() {
            row[i] = 1.0;
        }
        TransformMatrix { matrix }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quaternion {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Point,
    pub max: Point,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_system_is_orthonormal() {
        let cs = CartesianCoordinateSystem::new(Point::ORIGIN, Vector::new(2.0, 0.0, 0.0), Vector::new(1.0, 1.0, 0.0));
        assert!((cs.y.dot(&cs.x)).abs() < 1e-12);
        assert!((cs.z - Vector::Z_AXIS).length() < 1e-12);
    }

    #[test]
    fn test_point_tolerance() {
        let a = Point::new(1.0, 2.0, 3.0);
        assert!(a.is_equal(&Point::new(1.0, 2.0, 3.0 + 1e-7), 1e-6));
        assert!(!a.is_equal(&Point::new(1.0, 2.0, 3.1), 1e-6));
    }
}
