//! Push: always a create into a fresh file

use super::settings::has_3dm_extension;
use super::{CreateInput, CreateSummary, PushType, ThreeDmAdapter};
use crate::error::{BridgeError, Result};
use crate::kernel::GeometryKernel;
use crate::notification::NotificationCollection;

impl<K: GeometryKernel> ThreeDmAdapter<K> {
    /// Write `input` to the adapter's path as a new file
    ///
    /// Any push type other than `CreateOnly` is treated as one. A target that
    /// is not a `.3dm` file gives an empty summary; an existing target is
    /// refused before anything is converted.
    pub fn push(
        &self,
        input: CreateInput,
        push_type: PushType,
        log: &mut NotificationCollection,
    ) -> Result<CreateSummary> {
        if push_type != PushType::CreateOnly {
            log.warn("The 3dm adapter is a create-only adapter. All objects are pushed to a new file.");
        }
        if !has_3dm_extension(self.path()) {
            return Ok(CreateSummary::default());
        }
        self.config().validate()?;
        if self.path().exists() {
            let path = self.path().display().to_string();
            log.error(format!("File already exists; refusing to overwrite: {path}"));
            return Err(BridgeError::FileExists(path));
        }
        self.create(input, log)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::{AdapterConfig, FileSettings};
    use crate::generic::{Geometry, Point};
    use crate::notification::NotificationType;
    use std::fs;
    use std::path::PathBuf;

    fn scratch_dir() -> PathBuf {
        let dir = std::env::temp_dir().join("threedm_bridge_push");
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn points() -> CreateInput {
        CreateInput::Geometries(vec![Geometry::Point(Point::default())])
    }

    #[test]
    fn test_push_refuses_to_overwrite() {
        let dir = scratch_dir();
        let path = dir.join("existing.3dm");
        fs::write(&path, b"keep me").unwrap();

        let mut log = NotificationCollection::new();
        let adapter = ThreeDmAdapter::new(FileSettings::from_path(&path), AdapterConfig::default(), &mut log);
        let result = adapter.push(points(), PushType::CreateOnly, &mut log);

        assert!(matches!(result, Err(BridgeError::FileExists(_))));
        assert!(log.has_type(NotificationType::Error));
        assert_eq!(fs::read(&path).unwrap(), b"keep me");
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_push_non_3dm_target_is_empty() {
        let mut log = NotificationCollection::new();
        let adapter = ThreeDmAdapter::new(FileSettings::new("model.txt", ""), AdapterConfig::default(), &mut log);
        let summary = adapter.push(points(), PushType::AdapterDefault, &mut log).unwrap();

        assert_eq!(summary, CreateSummary::default());
        assert_eq!(log.of_type(NotificationType::Warning).len(), 2);
        assert!(!std::path::Path::new("model.txt").exists());
    }

    #[test]
    fn test_push_bad_version_fails_before_writing() {
        let path = scratch_dir().join("bad_version.3dm");
        fs::remove_file(&path).ok();
        let mut log = NotificationCollection::new();
        let config = AdapterConfig::default().with_version(42);
        let adapter = ThreeDmAdapter::new(FileSettings::from_path(&path), config, &mut log);

        assert!(matches!(
            adapter.push(points(), PushType::CreateOnly, &mut log),
            Err(BridgeError::Configuration(_))
        ));
        assert!(!path.exists());
    }

    #[test]
    fn test_push_writes_new_file() {
        let path = scratch_dir().join("fresh.3dm");
        fs::remove_file(&path).ok();
        let mut log = NotificationCollection::new();
        let adapter = ThreeDmAdapter::new(FileSettings::from_path(&path), AdapterConfig::default(), &mut log);
        let summary = adapter.push(points(), PushType::CreateOnly, &mut log).unwrap();

        assert_eq!(summary.written, 1);
        assert!(log.is_empty());
        let doc = crate::io::Reader3dm::from_file(&path).unwrap().read().unwrap();
        assert_eq!(doc.object_count(), 1);
        fs::remove_file(&path).ok();
    }
}
