//! Bulk extraction of native geometry from many files

use std::path::Path;

use super::read::display_name;
use crate::io::Reader3dm;
use crate::native::NativeGeometry;
use crate::notification::NotificationCollection;
use crate::types::Color;

/// Everything pulled out of a set of models, one entry per object
///
/// The three lists are parallel.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ModelData {
    /// `"{file}::{layer}"` for each object
    pub layer_names: Vec<String>,
    /// Color of each object's layer
    pub layer_colours: Vec<Color>,
    pub geometries: Vec<NativeGeometry>,
}

impl ModelData {
    pub fn len(&self) -> usize {
        self.geometries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.geometries.is_empty()
    }
}

/// Read every object of every file; nothing happens unless `go` is set
///
/// Each call owns its result, so overlapping calls never see each other's
/// data. Unreadable files are reported and skipped.
pub fn collect_all_model_data<P: AsRef<Path>>(files: &[P], go: bool, log: &mut NotificationCollection) -> ModelData {
    let mut data = ModelData::default();
    if !go {
        return data;
    }

    for file in files {
        let path = file.as_ref();
        let doc = match Reader3dm::from_file(path).and_then(Reader3dm::read) {
            Ok(doc) => doc,
            Err(e) => {
                log.error(format!("Could not read {}: {e}", path.display()));
                continue;
            }
        };
        let name = display_name(path);
        for object in doc.objects() {
            let layer = doc.object_layer(object);
            data.layer_names
                .push(format!("{name}::{}", layer.map_or("", |l| l.name.as_str())));
            data.layer_colours.push(layer.map(|l| l.color).unwrap_or_default());
            data.geometries.push(object.geometry.clone());
        }
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{NativeDocument, ObjectAttributes};
    use crate::io::Writer3dm;
    use crate::tables::Layer;
    use crate::types::Vector3;
    use std::fs;
    use std::path::PathBuf;

    fn model(dir: &Path, name: &str, layer: &str, points: usize) -> PathBuf {
        let mut doc = NativeDocument::new();
        let index = doc.add_layer(Layer::with_color(layer, Color::BLUE));
        for i in 0..points {
            doc.add_object(
                NativeGeometry::Point(Vector3::new(i as f64, 0.0, 0.0)),
                ObjectAttributes::on_layer(index),
            )
            .unwrap();
        }
        let path = dir.join(name);
        Writer3dm::new(&doc).write_to_file(&path, 6).unwrap();
        path
    }

    #[test]
    fn test_collect_requires_go() {
        let mut log = NotificationCollection::new();
        let data = collect_all_model_data(&["does/not/matter.3dm"], false, &mut log);
        assert!(data.is_empty());
        assert!(log.is_empty());
    }

    #[test]
    fn test_collect_is_independent_per_call() {
        let dir = std::env::temp_dir().join("threedm_bridge_collect");
        fs::create_dir_all(&dir).unwrap();
        let a = model(&dir, "a.3dm", "Roof", 2);
        let b = model(&dir, "b.3dm", "Floor", 1);

        let mut log = NotificationCollection::new();
        let first = collect_all_model_data(&[&a, &b], true, &mut log);
        let second = collect_all_model_data(&[&b], true, &mut log);

        assert_eq!(first.layer_names, vec!["a.3dm::Roof", "a.3dm::Roof", "b.3dm::Floor"]);
        assert_eq!(first.layer_colours, vec![Color::BLUE; 3]);
        assert_eq!(first.len(), 3);
        assert_eq!(second.layer_names, vec!["b.3dm::Floor"]);
        assert!(log.is_empty());
    }

    #[test]
    fn test_unreadable_file_is_reported() {
        let mut log = NotificationCollection::new();
        let data = collect_all_model_data(&[Path::new("/no/such/file.3dm")], true, &mut log);
        assert!(data.is_empty());
        assert_eq!(log.len(), 1);
    }
}
