//! CRUD adapter over `.3dm` files
//!
//! Converts generic geometry into native documents on push and native
//! documents into generic objects on read. Every call reports through a
//! [`NotificationCollection`]; only configuration problems and refusals to
//! touch the file system come back as `Err`.

mod collect;
mod create;
mod push;
mod read;
mod scoped;
pub mod settings;

pub use collect::{collect_all_model_data, ModelData};
pub use create::CreateSummary;
pub use read::resolve_files;
pub use scoped::ScopedDocument;
pub use settings::{AdapterConfig, FileSettings};

use std::path::{Path, PathBuf};

use crate::convert::Converter;
use crate::error::{BridgeError, Result};
use crate::generic::Geometry;
use crate::kernel::{GeometryKernel, ReferenceKernel};
use crate::notification::NotificationCollection;
use crate::types::{Color, ColorSource};

/// A geometry together with the layer and colour it is shown with
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ThreeDmObject {
    /// Layer name; objects read from files use `"{file}::{layer}"`
    pub layer: String,
    /// `None` when the native geometry had no generic counterpart
    pub geometry: Option<Geometry>,
    pub layer_colour: Color,
    pub object_colour: Color,
    pub colour_source: ColorSource,
}

impl ThreeDmObject {
    pub fn new(layer: impl Into<String>, geometry: Geometry) -> Self {
        ThreeDmObject {
            layer: layer.into(),
            geometry: Some(geometry),
            ..Default::default()
        }
    }

    pub fn with_layer_colour(mut self, colour: Color) -> Self {
        self.layer_colour = colour;
        self
    }

    /// Give the object its own colour
    pub fn with_object_colour(mut self, colour: Color) -> Self {
        self.object_colour = colour;
        self.colour_source = ColorSource::ByObject;
        self
    }
}

/// Objects to place in a document: attributed objects plus bare geometry
/// that lands on the default layer
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DocumentBuilder {
    pub objects: Vec<ThreeDmObject>,
    pub geometry: Vec<Geometry>,
}

/// One item of a mixed push
#[derive(Debug, Clone, PartialEq)]
pub enum AdapterObject {
    Geometry(Geometry),
    Object(ThreeDmObject),
    /// Anything else the caller holds, named by its type; never written
    Other(String),
}

/// The kinds of collection `create` accepts
#[derive(Debug, Clone, PartialEq)]
pub enum CreateInput {
    Geometries(Vec<Geometry>),
    Objects(Vec<ThreeDmObject>),
    Wrapped(Vec<AdapterObject>),
    Builder(DocumentBuilder),
}

impl CreateInput {
    /// Flatten into items in document order
    pub fn into_items(self) -> Vec<AdapterObject> {
        match self {
            CreateInput::Geometries(g) => g.into_iter().map(AdapterObject::Geometry).collect(),
            CreateInput::Objects(o) => o.into_iter().map(AdapterObject::Object).collect(),
            CreateInput::Wrapped(items) => items,
            CreateInput::Builder(builder) => builder
                .objects
                .into_iter()
                .map(AdapterObject::Object)
                .chain(builder.geometry.into_iter().map(AdapterObject::Geometry))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            CreateInput::Geometries(g) => g.len(),
            CreateInput::Objects(o) => o.len(),
            CreateInput::Wrapped(items) => items.len(),
            CreateInput::Builder(b) => b.objects.len() + b.geometry.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Vec<Geometry>> for CreateInput {
    fn from(geometry: Vec<Geometry>) -> Self {
        CreateInput::Geometries(geometry)
    }
}

impl From<Vec<ThreeDmObject>> for CreateInput {
    fn from(objects: Vec<ThreeDmObject>) -> Self {
        CreateInput::Objects(objects)
    }
}

impl From<DocumentBuilder> for CreateInput {
    fn from(builder: DocumentBuilder) -> Self {
        CreateInput::Builder(builder)
    }
}

/// How a push treats objects already in the target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PushType {
    #[default]
    AdapterDefault,
    CreateOnly,
    UpdateOnly,
    UpdateOrCreateOnly,
    DeleteThenCreate,
}

/// Adapter bound to one `.3dm` path, or a directory of them for reading
#[derive(Debug, Clone)]
pub struct ThreeDmAdapter<K = ReferenceKernel> {
    settings: FileSettings,
    config: AdapterConfig,
    path: PathBuf,
    converter: Converter<K>,
}

impl ThreeDmAdapter<ReferenceKernel> {
    /// Create an adapter; a path without the `.3dm` extension is reported
    /// but still accepted
    pub fn new(settings: FileSettings, config: AdapterConfig, log: &mut NotificationCollection) -> Self {
        Self::with_kernel(ReferenceKernel, settings, config, log)
    }
}

impl<K: GeometryKernel> ThreeDmAdapter<K> {
    pub fn with_kernel(
        kernel: K,
        settings: FileSettings,
        config: AdapterConfig,
        log: &mut NotificationCollection,
    ) -> Self {
        let path = settings.full_file_name();
        if !settings::has_3dm_extension(&path) {
            log.warn("The file extension must be .3dm.");
        }
        ThreeDmAdapter {
            converter: Converter::with_kernel(kernel, config.convert_config()),
            settings,
            config,
            path,
        }
    }

    /// Target file of push and create
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn settings(&self) -> &FileSettings {
        &self.settings
    }

    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    pub fn converter(&self) -> &Converter<K> {
        &self.converter
    }

    /// Named commands; the adapter knows none
    pub fn execute(&self, command: &str, log: &mut NotificationCollection) -> Result<()> {
        let message = format!("{command} is not a recognised command for the 3dm adapter.");
        log.notify(crate::notification::NotificationType::NotImplemented, message.clone());
        Err(BridgeError::Unsupported(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generic::Point;

    #[test]
    fn test_wrong_extension_warns() {
        let mut log = NotificationCollection::new();
        let adapter = ThreeDmAdapter::new(FileSettings::new("model.dwg", "out"), AdapterConfig::default(), &mut log);
        assert_eq!(adapter.path(), Path::new("out").join("model.dwg"));
        assert_eq!(log.len(), 1);
        assert_eq!(log.iter().next().map(|n| n.message.as_str()), Some("The file extension must be .3dm."));
    }

    #[test]
    fn test_builder_flattens_objects_first() {
        let builder = DocumentBuilder {
            objects: vec![ThreeDmObject::new("A", Geometry::Point(Point { x: 1.0, y: 0.0, z: 0.0 }))],
            geometry: vec![Geometry::Point(Point::default())],
        };
        let input = CreateInput::from(builder);
        assert_eq!(input.len(), 2);
        let items = input.into_items();
        assert!(matches!(items[0], AdapterObject::Object(_)));
        assert!(matches!(items[1], AdapterObject::Geometry(_)));
    }

    #[test]
    fn test_execute_is_not_implemented() {
        let mut log = NotificationCollection::new();
        let adapter = ThreeDmAdapter::new(FileSettings::new("m.3dm", ""), AdapterConfig::default(), &mut log);
        assert!(adapter.execute("Purge", &mut log).is_err());
        assert!(log.has_type(crate::notification::NotificationType::NotImplemented));
    }
}
