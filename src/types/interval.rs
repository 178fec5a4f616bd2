//! Parameter intervals

use std::fmt;

/// A closed parameter interval `[t0, t1]`; may be decreasing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub t0: f64,
    pub t1: f64,
}

impl Interval {
    /// Create a new interval
    pub const fn new(t0: f64, t1: f64) -> Self {
        Interval { t0, t1 }
    }

    /// Signed length `t1 - t0`
    pub fn length(&self) -> f64 {
        self.t1 - self.t0
    }

    /// Midpoint of the interval
    pub fn mid(&self) -> f64 {
        0.5 * (self.t0 + self.t1)
    }

    /// Minimum end
    pub fn min(&self) -> f64 {
        self.t0.min(self.t1)
    }

    /// Maximum end
    pub fn max(&self) -> f64 {
        self.t0.max(self.t1)
    }

    /// True if `t0 < t1`
    pub fn is_increasing(&self) -> bool {
        self.t0 < self.t1
    }

    /// Map a normalized parameter in `[0, 1]` into the interval
    pub fn parameter_at(&self, normalized: f64) -> f64 {
        self.t0 + normalized * (self.t1 - self.t0)
    }

    /// Map a parameter in the interval to `[0, 1]`
    pub fn normalized_parameter_at(&self, t: f64) -> f64 {
        let len = self.length();
        if len == 0.0 {
            0.0
        } else {
            (t - self.t0) / len
        }
    }

    /// True if `t` lies in the interval, within `tolerance`
    pub fn includes(&self, t: f64, tolerance: f64) -> bool {
        t >= self.min() - tolerance && t <= self.max() + tolerance
    }

    /// Swapped interval
    pub fn reversed(&self) -> Self {
        Interval::new(self.t1, self.t0)
    }
}

impl Default for Interval {
    fn default() -> Self {
        Interval::new(0.0, 1.0)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.t0, self.t1)
    }
}
