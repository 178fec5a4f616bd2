//! File and conversion settings for the adapter

use std::path::{Path, PathBuf};

use crate::convert::ConvertConfig;
use crate::document::{MAX_VERSION, MIN_VERSION};
use crate::error::{BridgeError, Result};
use crate::types::Tolerance;

/// Extension every file the adapter writes or reads must carry
pub const EXTENSION: &str = "3dm";

/// Where the adapter reads from and writes to
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FileSettings {
    /// File name, optionally with its own directory part
    pub file_name: String,
    /// Directory holding the file, or the files to read
    pub directory: String,
}

impl FileSettings {
    pub fn new(file_name: impl Into<String>, directory: impl Into<String>) -> Self {
        FileSettings {
            file_name: file_name.into(),
            directory: directory.into(),
        }
    }

    /// Settings for a single file path
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        FileSettings {
            file_name: path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default(),
            directory: path.parent().map(|d| d.to_string_lossy().into_owned()).unwrap_or_default(),
        }
    }

    /// Directory joined with the file name
    pub fn full_file_name(&self) -> PathBuf {
        if self.directory.is_empty() {
            PathBuf::from(&self.file_name)
        } else {
            Path::new(&self.directory).join(&self.file_name)
        }
    }
}

/// Whether `path` ends in `.3dm`
pub fn has_3dm_extension(path: &Path) -> bool {
    path.extension().map_or(false, |e| e == EXTENSION)
}

/// Settings for pushing and pulling `.3dm` files
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdapterConfig {
    /// Document version written by push
    pub version: u32,
    pub tolerance: Tolerance,
}

impl AdapterConfig {
    pub fn with_version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Reject settings that no file could be written with
    pub fn validate(&self) -> Result<()> {
        if !(MIN_VERSION..=MAX_VERSION).contains(&self.version) {
            return Err(BridgeError::Configuration(format!(
                "Version {} is not supported; use a version from {MIN_VERSION} to {MAX_VERSION}.",
                self.version
            )));
        }
        if !(self.tolerance.distance > 0.0) {
            return Err(BridgeError::Configuration(format!(
                "Tolerance must be positive, got {}.",
                self.tolerance.distance
            )));
        }
        Ok(())
    }

    pub fn convert_config(&self) -> ConvertConfig {
        ConvertConfig::default()
            .with_version(self.version)
            .with_tolerance(self.tolerance)
    }
}

impl Default for AdapterConfig {
    fn default() -> Self {
        AdapterConfig {
            version: 6,
            tolerance: Tolerance::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_file_name() {
        let settings = FileSettings::new("model.3dm", "out");
        assert_eq!(settings.full_file_name(), Path::new("out").join("model.3dm"));
        assert_eq!(FileSettings::new("model.3dm", "").full_file_name(), PathBuf::from("model.3dm"));
        assert_eq!(FileSettings::from_path("out/model.3dm"), settings);
    }

    #[test]
    fn test_extension_check() {
        assert!(has_3dm_extension(Path::new("a/b.3dm")));
        assert!(!has_3dm_extension(Path::new("a/b.3dmbak")));
        assert!(!has_3dm_extension(Path::new("a/b")));
    }

    #[test]
    fn test_validate() {
        assert!(AdapterConfig::default().validate().is_ok());
        assert!(matches!(
            AdapterConfig::default().with_version(4).validate(),
            Err(BridgeError::Configuration(_))
        ));
        assert!(AdapterConfig::default()
            .with_tolerance(Tolerance::with_distance(0.0))
            .validate()
            .is_err());
    }
}
