//! Transformation types for geometric operations
//!
//! Provides the 4x4 transform and quaternion types stored in native
//! documents, plus the arbitrary-axis rule used to complete a plane frame
//! from a single normal.

use crate::types::Vector3;
use nalgebra::{Matrix4, Quaternion as NaQuaternion, UnitQuaternion, Vector3 as NaVector3};
use std::ops::Mul;

/// Complete a right-handed frame around `normal`
///
/// Uses the arbitrary axis algorithm: the reference axis is world Y when the
/// normal is close to world Z, world Z otherwise. Returns `(x_axis, y_axis)`.
pub fn arbitrary_axis(normal: Vector3) -> (Vector3, Vector3) {
    const ARBITRARY_AXIS_THRESHOLD: f64 = 1.0 / 64.0;

    let normal = normal.normalize();
    let reference = if normal.x.abs() < ARBITRARY_AXIS_THRESHOLD
        && normal.y.abs() < ARBITRARY_AXIS_THRESHOLD
    {
        Vector3::UNIT_Y
    } else {
        Vector3::UNIT_Z
    };

    let x_dir = reference.cross(&normal).normalize();
    let y_dir = normal.cross(&x_dir).normalize();
    (x_dir, y_dir)
}

/// 4x4 transformation matrix, row-major
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Matrix elements stored in row-major order
    pub m: [[f64; 4]; 4],
}

impl Transform {
    /// Create identity transform
    pub fn identity() -> Self {
        let mut m = [[0.0; 4]; 4];
        for (i, row) in m.iter_mut().enumerate() {
            row[i] = 1.0;
        }
        Self { m }
    }

    /// Create translation transform
    pub fn translation(offset: Vector3) -> Self {
        let mut t = Self::identity();
        t.m[0][3] = offset.x;
        t.m[1][3] = offset.y;
        t.m[2][3] = offset.z;
        t
    }

    /// Create uniform scaling about `origin`
    pub fn scaling(origin: Vector3, factor: f64) -> Self {
        let mut s = Self::identity();
        for i in 0..3 {
            s.m[i][i] = factor;
        }
        Self::translation(origin) * s * Self::translation(-origin)
    }

    /// Create rotation around an axis through `center` (Rodrigues' rotation formula)
    pub fn rotation(angle: f64, axis: Vector3, center: Vector3) -> Self {
        let axis = axis.normalize();
        let (sin, cos) = angle.sin_cos();
        let one_minus_cos = 1.0 - cos;
        let (x, y, z) = (axis.x, axis.y, axis.z);

        let r = Self {
            m: [
                [
                    cos + x * x * one_minus_cos,
                    x * y * one_minus_cos - z * sin,
                    x * z * one_minus_cos + y * sin,
                    0.0,
                ],
                [
                    y * x * one_minus_cos + z * sin,
                    cos + y * y * one_minus_cos,
                    y * z * one_minus_cos - x * sin,
                    0.0,
                ],
                [
                    z * x * one_minus_cos - y * sin,
                    z * y * one_minus_cos + x * sin,
                    cos + z * z * one_minus_cos,
                    0.0,
                ],
                [0.0, 0.0, 0.0, 1.0],
            ],
        };
        Self::translation(center) * r * Self::translation(-center)
    }

    /// Transform a point (applies full transformation including translation)
    pub fn transform_point(&self, v: Vector3) -> Vector3 {
        let w = self.m[3][0] * v.x + self.m[3][1] * v.y + self.m[3][2] * v.z + self.m[3][3];
        let w = if w.abs() < 1e-12 { 1.0 } else { w };

        Vector3::new(
            (self.m[0][0] * v.x + self.m[0][1] * v.y + self.m[0][2] * v.z + self.m[0][3]) / w,
            (self.m[1][0] * v.x + self.m[1][1] * v.y + self.m[1][2] * v.z + self.m[1][3]) / w,
            (self.m[2][0] * v.x + self.m[2][1] * v.y + self.m[2][2] * v.z + self.m[2][3]) / w,
        )
    }

    /// Transform a direction vector (ignores translation)
    pub fn transform_direction(&self, v: Vector3) -> Vector3 {
        Vector3::new(
            self.m[0][0] * v.x + self.m[0][1] * v.y + self.m[0][2] * v.z,
            self.m[1][0] * v.x + self.m[1][1] * v.y + self.m[1][2] * v.z,
            self.m[2][0] * v.x + self.m[2][1] * v.y + self.m[2][2] * v.z,
        )
    }

    /// Inverse transform, `None` when singular
    pub fn inverse(&self) -> Option<Self> {
        let inv = self.to_nalgebra().try_inverse()?;
        Some(Self::from_nalgebra(&inv))
    }

    /// View as an nalgebra matrix
    pub fn to_nalgebra(&self) -> Matrix4<f64> {
        Matrix4::from_fn(|i, j| self.m[i][j])
    }

    /// Build from an nalgebra matrix
    pub fn from_nalgebra(matrix: &Matrix4<f64>) -> Self {
        let mut m = [[0.0; 4]; 4];
        for (i, row) in m.iter_mut().enumerate() {
            for (j, value) in row.iter_mut().enumerate() {
                *value = matrix[(i, j)];
            }
        }
        Self { m }
    }
}

impl Mul for Transform {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        let mut result = [[0.0; 4]; 4];
        for (i, row) in result.iter_mut().enumerate() {
            for (j, value) in row.iter_mut().enumerate() {
                *value = (0..4).map(|k| self.m[i][k] * rhs.m[k][j]).sum();
            }
        }
        Self { m: result }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Quaternion `a + bi + cj + dk`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quaternion {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

impl Quaternion {
    /// Create a quaternion from its four components
    pub const fn new(a: f64, b: f64, c: f64, d: f64) -> Self {
        Quaternion { a, b, c, d }
    }

    /// Identity rotation
    pub const IDENTITY: Quaternion = Quaternion::new(1.0, 0.0, 0.0, 0.0);

    /// Rotation of `angle` radians around `axis`
    pub fn rotation(angle: f64, axis: Vector3) -> Self {
        let axis = NaVector3::new(axis.x, axis.y, axis.z);
        match nalgebra::Unit::try_new(axis, 1e-12) {
            Some(unit) => {
                let q = UnitQuaternion::from_axis_angle(&unit, angle);
                Quaternion::new(q.w, q.i, q.j, q.k)
            }
            None => Self::IDENTITY,
        }
    }

    /// Rotation matrix for a unit quaternion; non-unit input is normalized
    pub fn to_transform(&self) -> Transform {
        let q = UnitQuaternion::from_quaternion(NaQuaternion::new(self.a, self.b, self.c, self.d));
        Transform::from_nalgebra(&q.to_homogeneous())
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}
