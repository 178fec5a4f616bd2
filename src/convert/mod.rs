//! Conversion between the native and the generic geometry models
//!
//! A [`Converter`] pairs a [`ConvertConfig`] with a [`GeometryKernel`]. Every
//! conversion returns `Option`: `None` means the object could not be
//! converted, and the reason has been written to the notification log.
//! Nothing in here panics on bad input.
//!
//! # Example
//!
//! ```
//! use threedm_bridge::convert::{ConvertConfig, Converter};
//! use threedm_bridge::generic::{Geometry, Line, Point};
//! use threedm_bridge::NotificationCollection;
//!
//! let converter = Converter::new(ConvertConfig::default());
//! let mut log = NotificationCollection::new();
//! let line: Geometry = Line::new(Point::ORIGIN, Point::new(1.0, 0.0, 0.0)).into();
//! let native = converter.to_native(&line, &mut log).unwrap();
//! let back = converter.to_generic(&native, &mut log).unwrap();
//! assert_eq!(back, line);
//! ```

mod from_native;
mod to_native;
mod trims;

use crate::kernel::{GeometryKernel, ReferenceKernel};
use crate::notification::NotificationCollection;
use crate::types::Tolerance;

/// Settings for one conversion run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConvertConfig {
    /// Target document version; selects the NURBS control point convention
    pub version: u32,
    pub tolerance: Tolerance,
}

impl ConvertConfig {
    pub fn with_version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.tolerance = tolerance;
        self
    }
}

impl Default for ConvertConfig {
    fn default() -> Self {
        ConvertConfig {
            version: 6,
            tolerance: Tolerance::default(),
        }
    }
}

/// Converts geometry in both directions using a kernel
#[derive(Debug, Clone, Default)]
pub struct Converter<K = ReferenceKernel> {
    kernel: K,
    config: ConvertConfig,
}

impl Converter<ReferenceKernel> {
    pub fn new(config: ConvertConfig) -> Self {
        Converter {
            kernel: ReferenceKernel,
            config,
        }
    }
}

impl<K: GeometryKernel> Converter<K> {
    pub fn with_kernel(kernel: K, config: ConvertConfig) -> Self {
        Converter { kernel, config }
    }

    pub fn config(&self) -> &ConvertConfig {
        &self.config
    }

    pub fn kernel(&self) -> &K {
        &self.kernel
    }

    /// Modelling tolerance for coincidence tests
    fn distance(&self) -> f64 {
        self.config.tolerance.distance
    }

    /// Looser tolerance for sample-based shape recognition
    fn fitting(&self) -> f64 {
        self.config.tolerance.fitting()
    }

    fn no_conversion(&self, kind: &str, log: &mut NotificationCollection) {
        log.error(format!(
            "No conversion could be found between {kind} and generic geometry."
        ));
    }
}
