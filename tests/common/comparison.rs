//! Tolerance-based assertions for tests.
//!
//! Scalar and point checks plus a wrapper around the crate's `IsEqual`
//! oracle that reports both sides on failure.

#![allow(dead_code)]

use std::fmt::Debug;
use threedm_bridge::generic as g;
use threedm_bridge::types::Vector3;
use threedm_bridge::IsEqual;

/// Default tolerance for floating-point comparisons.
pub const TOL: f64 = 1e-6;

// ===========================================================================
// Scalar & point assertions
// ===========================================================================

/// Check approximate equality of two f64 values within `tol`.
pub fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() < tol
}

/// Assert two f64 values are approximately equal.
pub fn assert_f64_eq(a: f64, b: f64, tol: f64) {
    assert!(
        approx_eq(a, b, tol),
        "f64 mismatch: {a} vs {b} (delta={}, tol={tol})",
        (a - b).abs()
    );
}

/// Assert two Vector3 values are approximately equal component-wise.
pub fn assert_vec3_eq(a: &Vector3, b: &Vector3, tol: f64) {
    assert!(
        approx_eq(a.x, b.x, tol) && approx_eq(a.y, b.y, tol) && approx_eq(a.z, b.z, tol),
        "Vector3 mismatch: ({},{},{}) vs ({},{},{}) tol={tol}",
        a.x, a.y, a.z, b.x, b.y, b.z
    );
}

/// Assert two generic points are approximately equal component-wise.
pub fn assert_point_eq(a: &g::Point, b: &g::Point, tol: f64) {
    assert!(
        a.is_equal(b, tol),
        "Point mismatch: ({},{},{}) vs ({},{},{}) tol={tol}",
        a.x, a.y, a.z, b.x, b.y, b.z
    );
}

// ===========================================================================
// Cross-model assertions
// ===========================================================================

/// Assert a generic value matches a native one under the equality oracle.
pub fn assert_is_equal<G, N>(generic: &G, native: &N, tol: f64)
where
    G: IsEqual<N> + Debug,
    N: Debug + ?Sized,
{
    assert!(
        generic.is_equal(native, tol),
        "generic and native differ at tol={tol}:\n  generic: {generic:?}\n  native:  {native:?}"
    );
}

/// Largest distance between matching points of two equally long lists.
pub fn max_deviation(a: &[g::Point], b: &[g::Point]) -> f64 {
    assert_eq!(a.len(), b.len(), "point counts differ");
    a.iter().zip(b).map(|(p, q)| p.distance(q)).fold(0.0, f64::max)
}
