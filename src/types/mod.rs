//! Core value types shared by the native model, the generic model and the
//! document layer

pub mod bounds;
pub mod color;
pub mod interval;
pub mod tolerance;
pub mod transform;
pub mod vector;

pub use bounds::{BoundingBox2D, BoundingBox3D};
pub use color::{Color, ColorSource};
pub use interval::Interval;
pub use tolerance::Tolerance;
pub use transform::{arbitrary_axis, Quaternion, Transform};
pub use vector::{Vector2, Vector3};
