//! `.3dm` file reader

use byteorder::{LittleEndian, ReadBytesExt};
use flate2::read::ZlibDecoder;
use std::io::Read;
use std::path::Path;

use super::format::{
    crc32, read_count, read_header, read_string, typecode, AttributeFlags, LayerFlags, CHUNK_HEADER_LENGTH,
    HEADER_LENGTH,
};
use super::geometry::GeometryReader;
use crate::document::{ModelObject, NativeDocument, ObjectAttributes};
use crate::error::{BridgeError, Result};
use crate::tables::Layer;
use crate::types::{Color, ColorSource};

/// Configuration for the `.3dm` reader.
#[derive(Debug, Clone, Default)]
pub struct Reader3dmConfiguration {
    /// When `true`, an object record that cannot be decoded is reported as a
    /// notification and skipped instead of aborting the read.
    ///
    /// Default: `false` (strict mode).
    pub failsafe: bool,
}

/// `.3dm` file reader
pub struct Reader3dm {
    data: Vec<u8>,
    config: Reader3dmConfiguration,
}

impl Reader3dm {
    /// Create a reader over an in-memory file image
    pub fn from_bytes(data: impl Into<Vec<u8>>) -> Self {
        Self {
            data: data.into(),
            config: Reader3dmConfiguration::default(),
        }
    }

    /// Create a reader from a file path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::from_bytes(std::fs::read(path)?))
    }

    /// Set the reader configuration.
    pub fn with_configuration(mut self, config: Reader3dmConfiguration) -> Self {
        self.config = config;
        self
    }

    /// Read the file and return a document
    pub fn read(self) -> Result<NativeDocument> {
        let version = read_header(&self.data)?;
        let mut doc = NativeDocument::empty(version);
        let mut input = &self.data[HEADER_LENGTH..];

        loop {
            if input.len() < CHUNK_HEADER_LENGTH {
                return Err(BridgeError::InvalidFormat("file ends without an end-of-file chunk".into()));
            }
            let code = input.read_u32::<LittleEndian>()?;
            let length = input.read_u64::<LittleEndian>()?;
            let length = usize::try_from(length)
                .ok()
                .filter(|l| *l <= input.len())
                .ok_or_else(|| {
                    BridgeError::InvalidFormat(format!("chunk {code:#x} claims {length} bytes, {} left", input.len()))
                })?;
            let (payload, rest) = input.split_at(length);
            input = rest;

            match code {
                typecode::PROPERTIES => self.read_properties(payload, &mut doc)?,
                typecode::LAYER_TABLE => self.read_layer_table(payload, &mut doc)?,
                typecode::OBJECT_TABLE => self.read_object_table(payload, &mut doc)?,
                typecode::END_OF_FILE => break,
                other => doc
                    .notifications
                    .warn(format!("Skipped unknown chunk {other:#010x} of {length} bytes")),
            }
        }

        Ok(doc)
    }

    fn read_properties(&self, mut payload: &[u8], doc: &mut NativeDocument) -> Result<()> {
        doc.application_name = read_string(&mut payload)?;
        doc.notes = read_string(&mut payload)?;
        Ok(())
    }

    fn read_layer_table(&self, mut payload: &[u8], doc: &mut NativeDocument) -> Result<()> {
        // name length, color and flags
        let count = read_count(&mut payload, 9)?;
        for _ in 0..count {
            let name = read_string(&mut payload)?;
            let color = Color::from_u32(payload.read_u32::<LittleEndian>()?);
            let flags = LayerFlags::from_bits_truncate(payload.read_u8()?);

            let mut layer = Layer::with_color(name, color);
            layer.visible = flags.contains(LayerFlags::VISIBLE);
            layer.locked = flags.contains(LayerFlags::LOCKED);
            if let Err(e) = doc.layers.add(layer) {
                doc.notifications.warn(e);
            }
        }
        Ok(())
    }

    fn read_object_table(&self, mut payload: &[u8], doc: &mut NativeDocument) -> Result<()> {
        let expected = payload.read_u32::<LittleEndian>()?;
        let length = payload.read_u64::<LittleEndian>()?;

        let mut data = Vec::new();
        ZlibDecoder::new(payload)
            .take(length)
            .read_to_end(&mut data)
            .map_err(|e| BridgeError::Compression(e.to_string()))?;
        if data.len() as u64 != length {
            return Err(BridgeError::Compression(format!(
                "object table inflated to {} bytes, expected {length}",
                data.len()
            )));
        }
        let actual = crc32(&data);
        if actual != expected {
            return Err(BridgeError::ChecksumMismatch { expected, actual });
        }

        let mut input = data.as_slice();
        let count = read_count(&mut input, 4)?;
        for index in 0..count {
            let size = read_count(&mut input, 1)?;
            let record = input.get(..size).ok_or_else(|| {
                BridgeError::InvalidFormat(format!("object {index} claims {size} bytes, {} left", input.len()))
            })?;
            input = &input[size..];

            match read_object(record) {
                Ok(object) => {
                    if doc.layer(object.attributes.layer_index).is_none() {
                        doc.notifications.warn(format!(
                            "Object {index} refers to missing layer {}",
                            object.attributes.layer_index
                        ));
                    }
                    doc.push_object(object);
                }
                Err(e) if self.config.failsafe => {
                    doc.notifications.error(format!("Object {index} could not be read: {e}"));
                }
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }
}

/// Decode one object record: attributes followed by the geometry
fn read_object(mut record: &[u8]) -> Result<ModelObject> {
    let layer_index = record.read_u32::<LittleEndian>()? as usize;
    let flags = AttributeFlags::from_bits_truncate(record.read_u8()?);

    let mut attributes = ObjectAttributes::on_layer(layer_index);
    if flags.contains(AttributeFlags::HAS_COLOR) {
        attributes.color_source = ColorSource::from_u8(record.read_u8()?);
        attributes.color = Color::from_u32(record.read_u32::<LittleEndian>()?);
    }
    if flags.contains(AttributeFlags::HAS_NAME) {
        attributes.name = read_string(&mut record)?;
    }

    let mut geometry = GeometryReader::new(record);
    let object = ModelObject {
        geometry: geometry.read_geometry()?,
        attributes,
    };
    if !geometry.remaining().is_empty() {
        return Err(BridgeError::InvalidFormat(format!(
            "{} unread bytes at the end of an object record",
            geometry.remaining().len()
        )));
    }
    Ok(object)
}
