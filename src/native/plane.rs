//! Native plane: an origin plus an orthonormal frame

use crate::types::{arbitrary_axis, Vector3};
use nalgebra::{Matrix3, SymmetricEigen};

/// An oriented plane with a right-handed orthonormal frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub origin: Vector3,
    pub x_axis: Vector3,
    pub y_axis: Vector3,
    pub z_axis: Vector3,
}

impl Plane {
    /// Plane through `origin` with the given normal; the in-plane axes
    /// follow the arbitrary axis algorithm
    pub fn new(origin: Vector3, normal: Vector3) -> Self {
        let z_axis = normal.normalize();
        let (x_axis, y_axis) = arbitrary_axis(z_axis);
        Plane {
            origin,
            x_axis,
            y_axis,
            z_axis,
        }
    }

    /// Plane through `origin` spanned by `x_dir` and `y_dir`
    ///
    /// `y_dir` is re-orthogonalized against `x_dir`.
    pub fn from_frame(origin: Vector3, x_dir: Vector3, y_dir: Vector3) -> Self {
        let x_axis = x_dir.normalize();
        let y_axis = (y_dir - x_axis * y_dir.dot(&x_axis)).normalize();
        let z_axis = x_axis.cross(&y_axis).normalize();
        Plane {
            origin,
            x_axis,
            y_axis,
            z_axis,
        }
    }

    /// The world XY plane
    pub fn world_xy() -> Self {
        Plane {
            origin: Vector3::ZERO,
            x_axis: Vector3::UNIT_X,
            y_axis: Vector3::UNIT_Y,
            z_axis: Vector3::UNIT_Z,
        }
    }

    /// The plane normal
    pub fn normal(&self) -> Vector3 {
        self.z_axis
    }

    /// Point at plane coordinates `(u, v)`
    pub fn point_at(&self, u: f64, v: f64) -> Vector3 {
        self.origin + self.x_axis * u + self.y_axis * v
    }

    /// Plane coordinates of the projection of `p`
    pub fn closest_parameter(&self, p: Vector3) -> (f64, f64) {
        let d = p - self.origin;
        (d.dot(&self.x_axis), d.dot(&self.y_axis))
    }

    /// Map `p` into plane-local coordinates `(u, v, height)`
    pub fn to_local(&self, p: Vector3) -> Vector3 {
        let d = p - self.origin;
        Vector3::new(d.dot(&self.x_axis), d.dot(&self.y_axis), d.dot(&self.z_axis))
    }

    /// Map plane-local coordinates back to world space
    pub fn from_local(&self, local: Vector3) -> Vector3 {
        self.origin + self.x_axis * local.x + self.y_axis * local.y + self.z_axis * local.z
    }

    /// Signed distance from the plane to `p`
    pub fn distance_to(&self, p: Vector3) -> f64 {
        (p - self.origin).dot(&self.z_axis)
    }

    /// Same plane with the normal reversed (y axis flipped)
    pub fn flipped(&self) -> Self {
        Plane {
            origin: self.origin,
            x_axis: self.x_axis,
            y_axis: -self.y_axis,
            z_axis: -self.z_axis,
        }
    }

    /// Least-squares plane through `points`
    ///
    /// The normal is the eigenvector of the smallest covariance eigenvalue.
    /// Returns `None` for fewer than three points, collinear input, or when a
    /// point deviates from the fitted plane by more than `tolerance`.
    pub fn fit(points: &[Vector3], tolerance: f64) -> Option<Plane> {
        if points.len() < 3 {
            return None;
        }
        let centroid = Vector3::centroid(points)?;
        let mut cov = Matrix3::zeros();
        for p in points {
            let d = *p - centroid;
            let v = nalgebra::Vector3::new(d.x, d.y, d.z);
            cov += v * v.transpose();
        }
        let eigen = SymmetricEigen::new(cov);
        let mut order = [0usize, 1, 2];
        order.sort_by(|a, b| eigen.eigenvalues[*a].total_cmp(&eigen.eigenvalues[*b]));
        // two vanishing eigenvalues means the points are collinear
        let scale = eigen.eigenvalues[order[2]].abs().max(1e-300);
        if eigen.eigenvalues[order[1]].abs() / scale < 1e-14 {
            return None;
        }
        let n = eigen.eigenvectors.column(order[0]);
        let plane = Plane::new(centroid, Vector3::new(n[0], n[1], n[2]));
        points
            .iter()
            .all(|p| plane.distance_to(*p).abs() <= tolerance)
            .then_some(plane)
    }

    /// True when the frame is finite and has unit, non-degenerate axes
    pub fn is_valid(&self) -> bool {
        self.origin.is_valid()
            && (self.x_axis.length() - 1.0).abs() < 1e-9
            && (self.y_axis.length() - 1.0).abs() < 1e-9
            && (self.z_axis.length() - 1.0).abs() < 1e-9
    }
}

impl Default for Plane {
    fn default() -> Self {
        Plane::world_xy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_frame_orthogonalizes() {
        let p = Plane::from_frame(Vector3::ZERO, Vector3::UNIT_X, Vector3::new(1.0, 1.0, 0.0));
        assert!(p.y_axis.almost_equal(&Vector3::UNIT_Y, 1e-12));
        assert!(p.z_axis.almost_equal(&Vector3::UNIT_Z, 1e-12));
    }

    #[test]
    fn test_local_round_trip() {
        let plane = Plane::new(Vector3::new(1.0, 2.0, 3.0), Vector3::new(1.0, 1.0, 1.0));
        let p = Vector3::new(-4.0, 0.5, 9.0);
        let local = plane.to_local(p);
        assert!(plane.from_local(local).almost_equal(&p, 1e-12));
        assert!((plane.distance_to(p) - local.z).abs() < 1e-12);
    }

    #[test]
    fn test_fit_tilted_points() {
        let plane = Plane::new(Vector3::new(0.0, 0.0, 2.0), Vector3::new(0.0, 1.0, 1.0));
        let pts: Vec<Vector3> = (0..12)
            .map(|i| {
                let a = i as f64 * 0.5;
                plane.point_at(a.cos() * 3.0, a.sin())
            })
            .collect();
        let fit = Plane::fit(&pts, 1e-9).unwrap();
        assert!(fit.z_axis.cross(&plane.z_axis).length() < 1e-9);
        assert!(Plane::fit(&[Vector3::ZERO, Vector3::UNIT_X, Vector3::UNIT_X * 2.0], 1e-9).is_none());
    }

    #[test]
    fn test_flipped() {
        let f = Plane::world_xy().flipped();
        assert_eq!(f.z_axis, -Vector3::UNIT_Z);
        assert!(f.is_valid());
    }
}
