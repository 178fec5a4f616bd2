//! Native `.3dm` document structure

use crate::error::BridgeError;
use crate::native::NativeGeometry;
use crate::notification::NotificationCollection;
use crate::tables::{Layer, Table};
use crate::types::{Color, ColorSource};
use crate::Result;

/// Oldest and newest document versions the codec reads and writes
pub const MIN_VERSION: u32 = 5;
pub const MAX_VERSION: u32 = 8;

/// Display attributes attached to each model object
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjectAttributes {
    /// Index into the document's layer table
    pub layer_index: usize,
    /// Object color, used when `color_source` is `ByObject`
    pub color: Color,
    pub color_source: ColorSource,
    pub name: String,
}

impl ObjectAttributes {
    pub fn on_layer(layer_index: usize) -> Self {
        ObjectAttributes {
            layer_index,
            ..Default::default()
        }
    }
}

/// A geometry stored in the document together with its attributes
#[derive(Debug, Clone, PartialEq)]
pub struct ModelObject {
    pub geometry: NativeGeometry,
    pub attributes: ObjectAttributes,
}

/// In-memory `.3dm` model
#[derive(Debug, Clone)]
pub struct NativeDocument {
    /// Document version (5 to 8)
    pub version: u32,

    /// Name of the application that wrote the file
    pub application_name: String,

    /// Free-form document notes
    pub notes: String,

    /// Layer table
    pub layers: Table<Layer>,

    /// Notifications collected during the last read/write operation
    pub notifications: NotificationCollection,

    /// Model objects in insertion order
    objects: Vec<ModelObject>,
}

impl NativeDocument {
    /// Create an empty document holding only the default layer
    pub fn new() -> Self {
        let mut doc = NativeDocument {
            version: 6,
            application_name: concat!("threedm-bridge ", env!("CARGO_PKG_VERSION")).to_string(),
            notes: String::new(),
            layers: Table::new(),
            notifications: NotificationCollection::new(),
            objects: Vec::new(),
        };
        doc.layers.add(Layer::default_layer()).ok();
        doc
    }

    /// Create a document with a specific version
    pub fn with_version(version: u32) -> Self {
        let mut doc = Self::new();
        doc.version = version;
        doc
    }

    /// Document with nothing in it, not even the default layer; used by the reader
    pub(crate) fn empty(version: u32) -> Self {
        let mut doc = Self::with_version(version);
        doc.layers.clear();
        doc
    }

    /// Add a layer, or return the index of the existing layer with that name
    pub fn add_layer(&mut self, layer: Layer) -> usize {
        if let Some(index) = self.layers.index_of(&layer.name) {
            return index;
        }
        let index = self.layers.len();
        self.layers.add(layer).unwrap_or(index)
    }

    /// Index of the layer called `name` (case-insensitive)
    pub fn layer_index(&self, name: &str) -> Option<usize> {
        self.layers.index_of(name)
    }

    pub fn layer(&self, index: usize) -> Option<&Layer> {
        self.layers.get_by_index(index)
    }

    /// Add a model object; groups are flattened into one object per member
    ///
    /// Returns the number of objects added.
    pub fn add_object(&mut self, geometry: NativeGeometry, attributes: ObjectAttributes) -> Result<usize> {
        if self.layers.get_by_index(attributes.layer_index).is_none() {
            return Err(BridgeError::NotFound(format!("layer index {}", attributes.layer_index)));
        }
        match geometry {
            NativeGeometry::Group(members) => {
                let mut added = 0;
                for member in members {
                    added += self.add_object(member, attributes.clone())?;
                }
                Ok(added)
            }
            g if g.is_document_object() => {
                self.objects.push(ModelObject { geometry: g, attributes });
                Ok(1)
            }
            g => Err(BridgeError::Unsupported(format!(
                "Could not add object of type {} to the 3dm file.",
                g.kind_name()
            ))),
        }
    }

    /// Append an object read from a file without any checks
    pub(crate) fn push_object(&mut self, object: ModelObject) {
        self.objects.push(object);
    }

    /// Iterate over all model objects
    pub fn objects(&self) -> impl Iterator<Item = &ModelObject> {
        self.objects.iter()
    }

    /// Get the number of model objects
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Layer of an object, if its index is in range
    pub fn object_layer(&self, object: &ModelObject) -> Option<&Layer> {
        self.layer(object.attributes.layer_index)
    }
}

impl Default for NativeDocument {
    fn default() -> Self {
        Self::new()
    }
}
