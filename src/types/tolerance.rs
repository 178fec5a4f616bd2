//! Geometric tolerances shared by the converters and the kernel

/// Default model distance tolerance
pub const DISTANCE: f64 = 1e-6;

/// Default angular tolerance in radians
pub const ANGLE: f64 = 1e-6;

/// Number of samples used when comparing curves for coincidence
pub const SAMPLE_COUNT: usize = 100;

/// Tolerance settings carried through a conversion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    /// Maximum distance at which two points are considered the same
    pub distance: f64,
    /// Maximum angle (radians) at which two directions are considered parallel
    pub angle: f64,
    /// Samples used for curve-coincidence checks
    pub sample_count: usize,
}

impl Tolerance {
    /// Tolerance with a custom distance and default angle
    pub fn with_distance(distance: f64) -> Self {
        Tolerance {
            distance,
            ..Self::default()
        }
    }

    /// Distance tolerance used by shape-fitting predicates
    ///
    /// Fitting works on sampled points, so it is looser than the modelling
    /// tolerance but never tighter.
    pub fn fitting(&self) -> f64 {
        (self.distance * 100.0).max(1e-7)
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Tolerance {
            distance: DISTANCE,
            angle: ANGLE,
            sample_count: SAMPLE_COUNT,
        }
    }
}
