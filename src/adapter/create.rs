//! Create: convert generic objects and write them to a new file

use super::{AdapterObject, CreateInput, ScopedDocument, ThreeDmAdapter, ThreeDmObject};
use crate::document::{NativeDocument, ObjectAttributes};
use crate::error::Result;
use crate::generic::Geometry;
use crate::kernel::GeometryKernel;
use crate::notification::NotificationCollection;
use crate::tables::Layer;

/// Outcome of a create call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CreateSummary {
    /// Items that produced at least one document object
    pub written: usize,
    /// Items that were reported and left out
    pub skipped: usize,
    /// Document objects after groups were flattened
    pub objects: usize,
}

impl<K: GeometryKernel> ThreeDmAdapter<K> {
    /// Convert `input` and write it to the adapter's path
    ///
    /// Items that fail to convert are reported and skipped; the file is
    /// written with whatever converted. The target must not exist.
    pub fn create(&self, input: CreateInput, log: &mut NotificationCollection) -> Result<CreateSummary> {
        self.config().validate()?;
        let mut doc = ScopedDocument::create(self.path(), self.config().version);
        let summary = self.fill_document(&mut doc, input, log);
        doc.commit()?;
        Ok(summary)
    }

    /// Convert `input` into `doc` without writing anything
    pub fn fill_document(
        &self,
        doc: &mut NativeDocument,
        input: CreateInput,
        log: &mut NotificationCollection,
    ) -> CreateSummary {
        let mut summary = CreateSummary::default();
        for item in input.into_items() {
            let added = match item {
                AdapterObject::Geometry(geometry) => self.add_geometry(doc, &geometry, ObjectAttributes::default(), log),
                AdapterObject::Object(object) => self.add_attributed(doc, &object, log),
                AdapterObject::Other(kind) => {
                    log.error(format!("Unable to write objects of type: {kind}"));
                    0
                }
            };
            if added > 0 {
                summary.written += 1;
                summary.objects += added;
            } else {
                summary.skipped += 1;
            }
        }
        summary
    }

    fn add_attributed(&self, doc: &mut NativeDocument, object: &ThreeDmObject, log: &mut NotificationCollection) -> usize {
        let Some(geometry) = &object.geometry else {
            log.error(format!("Object on layer {} has no geometry to write.", object.layer));
            return 0;
        };
        let layer_index = if object.layer.is_empty() {
            0
        } else {
            doc.add_layer(Layer::with_color(object.layer.as_str(), object.layer_colour))
        };
        let attributes = ObjectAttributes {
            layer_index,
            color: object.object_colour,
            color_source: object.colour_source,
            name: String::new(),
        };
        self.add_geometry(doc, geometry, attributes, log)
    }

    fn add_geometry(
        &self,
        doc: &mut NativeDocument,
        geometry: &Geometry,
        attributes: ObjectAttributes,
        log: &mut NotificationCollection,
    ) -> usize {
        let Some(native) = self.converter().to_native(geometry, log) else {
            return 0;
        };
        match doc.add_object(native, attributes) {
            Ok(added) => added,
            Err(e) => {
                log.error(e.to_string());
                0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::{AdapterConfig, DocumentBuilder, FileSettings};
    use crate::generic::{Line, Point, Vector};
    use crate::types::{Color, ColorSource};

    fn adapter(log: &mut NotificationCollection) -> ThreeDmAdapter {
        ThreeDmAdapter::new(FileSettings::new("unused.3dm", ""), AdapterConfig::default(), log)
    }

    fn point(x: f64) -> Geometry {
        Geometry::Point(Point { x, y: 0.0, z: 0.0 })
    }

    #[test]
    fn test_layers_are_created_once_by_name() {
        let mut log = NotificationCollection::new();
        let adapter = adapter(&mut log);
        let mut doc = NativeDocument::new();
        let input = CreateInput::Objects(vec![
            ThreeDmObject::new("Walls", point(0.0)).with_layer_colour(Color::RED),
            ThreeDmObject::new("walls", point(1.0)).with_object_colour(Color::BLUE),
            ThreeDmObject::new("Slabs", point(2.0)),
        ]);
        let summary = adapter.fill_document(&mut doc, input, &mut log);

        assert_eq!(summary, CreateSummary { written: 3, skipped: 0, objects: 3 });
        assert_eq!(doc.layers.names().collect::<Vec<_>>(), vec!["Default", "Walls", "Slabs"]);
        assert_eq!(doc.layer(1).map(|l| l.color), Some(Color::RED));

        let second = doc.objects().nth(1).unwrap();
        assert_eq!(second.attributes.layer_index, 1);
        assert_eq!(second.attributes.color, Color::BLUE);
        assert_eq!(second.attributes.color_source, ColorSource::ByObject);
        assert!(log.is_empty());
    }

    #[test]
    fn test_unwritable_items_are_skipped() {
        let mut log = NotificationCollection::new();
        let adapter = adapter(&mut log);
        let mut doc = NativeDocument::new();
        let input = CreateInput::Wrapped(vec![
            AdapterObject::Other("Material".into()),
            AdapterObject::Geometry(Geometry::Vector(Vector { x: 0.0, y: 0.0, z: 1.0 })),
            AdapterObject::Geometry(Geometry::Curve(crate::generic::Curve::Line(Line {
                start: Point::default(),
                end: Point { x: 1.0, y: 1.0, z: 0.0 },
                infinite: false,
            }))),
        ]);
        let summary = adapter.fill_document(&mut doc, input, &mut log);

        assert_eq!(summary.written, 1);
        assert_eq!(summary.skipped, 2);
        assert_eq!(doc.object_count(), 1);
        let messages: Vec<_> = log.iter().map(|n| n.message.clone()).collect();
        assert_eq!(messages[0], "Unable to write objects of type: Material");
        assert!(messages[1].contains("Could not add object of type Vector"));
    }

    #[test]
    fn test_builder_geometry_lands_on_default_layer() {
        let mut log = NotificationCollection::new();
        let adapter = adapter(&mut log);
        let mut doc = NativeDocument::new();
        let builder = DocumentBuilder {
            objects: vec![ThreeDmObject::new("Grid", point(5.0))],
            geometry: vec![point(6.0)],
        };
        adapter.fill_document(&mut doc, builder.into(), &mut log);
        let layers: Vec<_> = doc.objects().map(|o| o.attributes.layer_index).collect();
        assert_eq!(layers, vec![1, 0]);
    }
}
