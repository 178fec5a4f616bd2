//! Bounding box types

use super::{Vector2, Vector3};
use std::fmt;

/// Axis-aligned rectangle in a surface's parameter space or a plane's local
/// coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingBox2D {
    /// Minimum corner
    pub min: Vector2,
    /// Maximum corner
    pub max: Vector2,
}

impl BoundingBox2D {
    /// Create a bounding box that contains all given points
    pub fn from_points(points: &[Vector2]) -> Option<Self> {
        let first = points.first()?;
        let mut bbox = BoundingBox2D {
            min: *first,
            max: *first,
        };
        for p in &points[1..] {
            bbox.min.x = bbox.min.x.min(p.x);
            bbox.min.y = bbox.min.y.min(p.y);
            bbox.max.x = bbox.max.x.max(p.x);
            bbox.max.y = bbox.max.y.max(p.y);
        }
        Some(bbox)
    }

    /// Check if this box contains `other` entirely, allowing `tolerance` slack
    pub fn contains_box(&self, other: &BoundingBox2D, tolerance: f64) -> bool {
        other.min.x >= self.min.x - tolerance
            && other.min.y >= self.min.y - tolerance
            && other.max.x <= self.max.x + tolerance
            && other.max.y <= self.max.y + tolerance
    }

    /// Area of the box
    pub fn area(&self) -> f64 {
        (self.max.x - self.min.x) * (self.max.y - self.min.y)
    }
}

/// 3D bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox3D {
    /// Minimum point
    pub min: Vector3,
    /// Maximum point
    pub max: Vector3,
}

impl Default for BoundingBox3D {
    fn default() -> Self {
        BoundingBox3D {
            min: Vector3::ZERO,
            max: Vector3::ZERO,
        }
    }
}

impl BoundingBox3D {
    /// Create a new bounding box from min and max points
    pub fn new(min: Vector3, max: Vector3) -> Self {
        BoundingBox3D { min, max }
    }

    /// Create a bounding box that contains all given points
    pub fn from_points(points: &[Vector3]) -> Option<Self> {
        let first = points.first()?;
        let mut bbox = BoundingBox3D::new(*first, *first);
        for point in &points[1..] {
            bbox.expand_to_include(*point);
        }
        Some(bbox)
    }

    /// Get the center point of the bounding box
    pub fn center(&self) -> Vector3 {
        (self.min + self.max) * 0.5
    }

    /// Length of the min-max diagonal
    pub fn diagonal(&self) -> f64 {
        self.min.distance(&self.max)
    }

    /// True when `min` does not exceed `max` on any axis
    pub fn is_valid(&self) -> bool {
        self.min.is_valid()
            && self.max.is_valid()
            && self.min.x <= self.max.x
            && self.min.y <= self.max.y
            && self.min.z <= self.max.z
    }

    /// The eight corner points, bottom face first
    pub fn corners(&self) -> [Vector3; 8] {
        let (a, b) = (self.min, self.max);
        [
            Vector3::new(a.x, a.y, a.z),
            Vector3::new(b.x, a.y, a.z),
            Vector3::new(b.x, b.y, a.z),
            Vector3::new(a.x, b.y, a.z),
            Vector3::new(a.x, a.y, b.z),
            Vector3::new(b.x, a.y, b.z),
            Vector3::new(b.x, b.y, b.z),
            Vector3::new(a.x, b.y, b.z),
        ]
    }

    /// Check if this bounding box contains a point
    pub fn contains(&self, point: Vector3) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }

    /// Expand the bounding box to include another point
    pub fn expand_to_include(&mut self, point: Vector3) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.min.z = self.min.z.min(point.z);
        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
        self.max.z = self.max.z.max(point.z);
    }
}

impl fmt::Display for BoundingBox3D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BBox3D[{} -> {}]", self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bbox3d_from_points() {
        let points = vec![
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(10.0, 5.0, 3.0),
            Vector3::new(-5.0, 3.0, -2.0),
        ];
        let bbox = BoundingBox3D::from_points(&points).unwrap();
        assert_eq!(bbox.min, Vector3::new(-5.0, 0.0, -2.0));
        assert_eq!(bbox.max, Vector3::new(10.0, 5.0, 3.0));
        assert!(bbox.is_valid());
    }

    #[test]
    fn test_bbox3d_corners() {
        let bbox = BoundingBox3D::new(Vector3::ZERO, Vector3::new(1.0, 2.0, 3.0));
        let corners = bbox.corners();
        assert_eq!(corners[0], Vector3::ZERO);
        assert_eq!(corners[6], Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(bbox.center(), Vector3::new(0.5, 1.0, 1.5));
    }

    #[test]
    fn test_bbox2d_contains_box() {
        let outer = BoundingBox2D::from_points(&[Vector2::new(0.0, 0.0), Vector2::new(10.0, 10.0)]).unwrap();
        let inner = BoundingBox2D::from_points(&[Vector2::new(2.0, 2.0), Vector2::new(4.0, 4.0)]).unwrap();
        assert!(outer.contains_box(&inner, 0.0));
        assert!(!inner.contains_box(&outer, 0.0));
        assert_eq!(outer.area(), 100.0);
    }
}
