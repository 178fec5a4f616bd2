//! Read: resolve `.3dm` files and convert their objects to generic ones

use std::fs;
use std::path::{Path, PathBuf};

use super::settings::has_3dm_extension;
use super::{FileSettings, ThreeDmAdapter, ThreeDmObject};
use crate::document::NativeDocument;
use crate::io::Reader3dm;
use crate::kernel::GeometryKernel;
use crate::notification::NotificationCollection;

/// Backup files share the directory but never count as models
const BACKUP_MARKER: &str = "3dmbak";

/// Turn file settings into the list of files to read
///
/// - a bare file name names one file;
/// - a directory alone means every `.3dm` file directly inside it;
/// - a directory and a file name pick that file out of the directory.
///
/// Problems are reported to `log` and give an empty list.
pub fn resolve_files(settings: &FileSettings, log: &mut NotificationCollection) -> Vec<PathBuf> {
    if settings.file_name.is_empty() && settings.directory.is_empty() {
        log.error(
            "Either provide a file name and directory to pull a single .3dm file, or a directory to pull multiple .3dm files.",
        );
        return Vec::new();
    }

    if settings.directory.is_empty() {
        let path = Path::new(&settings.file_name);
        if !has_3dm_extension(path) {
            log.error("File name must contain a file .3dm extension.");
            return Vec::new();
        }
        if !path.is_file() {
            log.error("File does not exist.");
            return Vec::new();
        }
        return vec![settings.full_file_name()];
    }

    let directory = Path::new(&settings.directory);
    if !directory.is_dir() {
        log.error("Directory provided does not exist.");
        return Vec::new();
    }

    let mut files = match list_models(directory) {
        Ok(files) => files,
        Err(e) => {
            log.error(format!("Could not list {}: {e}", directory.display()));
            return Vec::new();
        }
    };
    if files.is_empty() {
        log.error("No .3dm files found in the directory.");
        return Vec::new();
    }

    if settings.file_name.is_empty() {
        files.sort();
        return files;
    }
    let wanted = Path::new(&settings.file_name).file_name();
    if files.iter().any(|f| f.file_name() == wanted) {
        vec![settings.full_file_name()]
    } else {
        log.error("File specified was not found in the directory.");
        Vec::new()
    }
}

/// `.3dm` files directly inside `directory`, backups excluded
fn list_models(directory: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(directory)? {
        let path = entry?.path();
        if path.is_file() && has_3dm_extension(&path) && !is_backup(&path) {
            files.push(path);
        }
    }
    Ok(files)
}

/// Only the file name is checked; directory names may contain the marker
fn is_backup(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name.to_string_lossy().contains(BACKUP_MARKER))
}

/// File name used as the layer prefix for objects read from `path`
pub(super) fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

impl<K: GeometryKernel> ThreeDmAdapter<K> {
    /// Read every object from the files named by the adapter's settings
    ///
    /// A file that cannot be opened is reported and skipped.
    pub fn read(&self, log: &mut NotificationCollection) -> Vec<ThreeDmObject> {
        let mut objects = Vec::new();
        for path in resolve_files(self.settings(), log) {
            match Reader3dm::from_file(&path).and_then(Reader3dm::read) {
                Ok(doc) => objects.extend(self.read_document(&doc, &display_name(&path), log)),
                Err(e) => log.error(format!("Could not read {}: {e}", path.display())),
            }
        }
        objects
    }

    /// Convert the objects of one document, naming layers `"{file}::{layer}"`
    pub fn read_document(
        &self,
        doc: &NativeDocument,
        file_name: &str,
        log: &mut NotificationCollection,
    ) -> Vec<ThreeDmObject> {
        log.extend(doc.notifications.clone());
        doc.objects()
            .map(|object| {
                let layer = doc.object_layer(object);
                ThreeDmObject {
                    layer: format!("{file_name}::{}", layer.map_or("", |l| l.name.as_str())),
                    geometry: self.converter().to_generic(&object.geometry, log),
                    layer_colour: layer.map(|l| l.color).unwrap_or_default(),
                    object_colour: object.attributes.color,
                    colour_source: object.attributes.color_source,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::AdapterConfig;
    use crate::document::ObjectAttributes;
    use crate::generic::Geometry;
    use crate::native::NativeGeometry;
    use crate::tables::Layer;
    use crate::types::{Color, ColorSource, Vector3};

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join("threedm_bridge_read").join(name);
        fs::remove_dir_all(&dir).ok();
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn messages(log: &NotificationCollection) -> Vec<String> {
        log.iter().map(|n| n.message.clone()).collect()
    }

    #[test]
    fn test_resolve_reports_missing_settings() {
        let mut log = NotificationCollection::new();
        assert!(resolve_files(&FileSettings::default(), &mut log).is_empty());
        assert!(resolve_files(&FileSettings::new("model.obj", ""), &mut log).is_empty());
        assert!(resolve_files(&FileSettings::new("no_such_model.3dm", ""), &mut log).is_empty());
        assert!(resolve_files(&FileSettings::new("", "/no/such/directory"), &mut log).is_empty());
        assert_eq!(
            messages(&log),
            vec![
                "Either provide a file name and directory to pull a single .3dm file, or a directory to pull multiple .3dm files.",
                "File name must contain a file .3dm extension.",
                "File does not exist.",
                "Directory provided does not exist.",
            ]
        );
    }

    #[test]
    fn test_resolve_directory_skips_backups() {
        let dir = scratch_dir("listing");
        for name in ["b.3dm", "a.3dm", "a.3dmbak", "notes.txt"] {
            fs::write(dir.join(name), b"").unwrap();
        }
        let mut log = NotificationCollection::new();
        let dir_name = dir.to_string_lossy().into_owned();

        let all = resolve_files(&FileSettings::new("", dir_name.as_str()), &mut log);
        assert_eq!(all, vec![dir.join("a.3dm"), dir.join("b.3dm")]);

        let one = resolve_files(&FileSettings::new("b.3dm", dir_name.as_str()), &mut log);
        assert_eq!(one, vec![dir.join("b.3dm")]);

        assert!(resolve_files(&FileSettings::new("c.3dm", dir_name.as_str()), &mut log).is_empty());
        assert_eq!(messages(&log), vec!["File specified was not found in the directory."]);

        let empty = scratch_dir("empty");
        resolve_files(&FileSettings::new("", empty.to_string_lossy().into_owned()), &mut log);
        assert_eq!(log.iter().last().map(|n| n.message.as_str()), Some("No .3dm files found in the directory."));
    }

    #[test]
    fn test_resolve_directory_named_like_a_backup() {
        let dir = scratch_dir("old_3dmbak_models");
        for name in ["tower.3dm", "tower.3dmbak.3dm"] {
            fs::write(dir.join(name), b"").unwrap();
        }
        let mut log = NotificationCollection::new();
        let files = resolve_files(&FileSettings::new("", dir.to_string_lossy().into_owned()), &mut log);
        assert_eq!(files, vec![dir.join("tower.3dm")]);
        assert!(log.is_empty());
    }

    #[test]
    fn test_read_attaches_layer_and_colours() {
        let dir = scratch_dir("objects");
        let path = dir.join("site.3dm");
        let mut doc = NativeDocument::new();
        let trees = doc.add_layer(Layer::with_color("Trees", Color::GREEN));
        let attributes = ObjectAttributes {
            layer_index: trees,
            color: Color::RED,
            color_source: ColorSource::ByObject,
            name: String::new(),
        };
        doc.add_object(NativeGeometry::Point(Vector3::new(1.0, 2.0, 3.0)), attributes)
            .unwrap();
        crate::io::Writer3dm::new(&doc).write_to_file(&path, 6).unwrap();

        let mut log = NotificationCollection::new();
        let adapter = ThreeDmAdapter::new(FileSettings::from_path(&path), AdapterConfig::default(), &mut log);
        let objects = adapter.read(&mut log);

        assert_eq!(objects.len(), 1);
        let object = &objects[0];
        assert_eq!(object.layer, "site.3dm::Trees");
        assert_eq!(object.layer_colour, Color::GREEN);
        assert_eq!(object.object_colour, Color::RED);
        assert_eq!(object.colour_source, ColorSource::ByObject);
        assert!(matches!(object.geometry, Some(Geometry::Point(p)) if p.z == 3.0));
        assert!(log.is_empty());
    }
}
