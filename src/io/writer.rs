//! `.3dm` file writer

use byteorder::{LittleEndian, WriteBytesExt};
use flate2::write::ZlibEncoder;
use flate2::Compression;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::format::{check_version, crc32, typecode, write_header, write_string, AttributeFlags, LayerFlags};
use super::geometry::GeometryWriter;
use crate::document::{ModelObject, NativeDocument};
use crate::error::{BridgeError, Result};
use crate::types::ColorSource;

/// `.3dm` file writer
pub struct Writer3dm<'a> {
    document: &'a NativeDocument,
}

impl<'a> Writer3dm<'a> {
    pub fn new(document: &'a NativeDocument) -> Self {
        Self { document }
    }

    /// Write to a new file, replacing any file at `path`
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P, version: u32) -> Result<()> {
        check_version(version)?;
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.write_to_writer(&mut writer, version)?;
        writer.flush()?;
        Ok(())
    }

    /// Write to a byte vector
    pub fn write_to_vec(&self, version: u32) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.write_to_writer(&mut buffer, version)?;
        Ok(buffer)
    }

    /// Write to any writer
    pub fn write_to_writer<W: Write>(&self, writer: &mut W, version: u32) -> Result<()> {
        check_version(version)?;
        write_header(writer, version)?;
        write_chunk(writer, typecode::PROPERTIES, &self.properties()?)?;
        write_chunk(writer, typecode::LAYER_TABLE, &self.layer_table()?)?;
        write_chunk(writer, typecode::OBJECT_TABLE, &self.object_table()?)?;
        write_chunk(writer, typecode::END_OF_FILE, &[])
    }

    fn properties(&self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        write_string(&mut out, &self.document.application_name)?;
        write_string(&mut out, &self.document.notes)?;
        Ok(out)
    }

    fn layer_table(&self) -> Result<Vec<u8>> {
        let layers = &self.document.layers;
        let mut out = Vec::new();
        out.write_u32::<LittleEndian>(layers.len() as u32)?;
        for layer in layers.iter() {
            write_string(&mut out, &layer.name)?;
            out.write_u32::<LittleEndian>(layer.color.to_u32())?;
            let mut flags = LayerFlags::empty();
            flags.set(LayerFlags::VISIBLE, layer.visible);
            flags.set(LayerFlags::LOCKED, layer.locked);
            out.write_u8(flags.bits())?;
        }
        Ok(out)
    }

    /// CRC and inflated length, then the zlib-compressed object records
    fn object_table(&self) -> Result<Vec<u8>> {
        let mut data = Vec::new();
        data.write_u32::<LittleEndian>(self.document.object_count() as u32)?;
        for object in self.document.objects() {
            let record = object_record(object)?;
            data.write_u32::<LittleEndian>(record.len() as u32)?;
            data.extend_from_slice(&record);
        }

        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder
            .write_all(&data)
            .map_err(|e| BridgeError::Compression(e.to_string()))?;
        let compressed = encoder.finish().map_err(|e| BridgeError::Compression(e.to_string()))?;

        let mut out = Vec::with_capacity(compressed.len() + 12);
        out.write_u32::<LittleEndian>(crc32(&data))?;
        out.write_u64::<LittleEndian>(data.len() as u64)?;
        out.extend_from_slice(&compressed);
        Ok(out)
    }
}

fn write_chunk<W: Write>(writer: &mut W, code: u32, payload: &[u8]) -> Result<()> {
    writer.write_u32::<LittleEndian>(code)?;
    writer.write_u64::<LittleEndian>(payload.len() as u64)?;
    writer.write_all(payload)?;
    Ok(())
}

fn object_record(object: &ModelObject) -> Result<Vec<u8>> {
    let attributes = &object.attributes;
    let mut flags = AttributeFlags::empty();
    flags.set(AttributeFlags::HAS_NAME, !attributes.name.is_empty());
    flags.set(
        AttributeFlags::HAS_COLOR,
        attributes.color_source != ColorSource::ByLayer || attributes.color != Default::default(),
    );

    let mut out = Vec::new();
    out.write_u32::<LittleEndian>(attributes.layer_index as u32)?;
    out.write_u8(flags.bits())?;
    if flags.contains(AttributeFlags::HAS_COLOR) {
        out.write_u8(attributes.color_source.to_u8())?;
        out.write_u32::<LittleEndian>(attributes.color.to_u32())?;
    }
    if flags.contains(AttributeFlags::HAS_NAME) {
        write_string(&mut out, &attributes.name)?;
    }

    let mut geometry = GeometryWriter::new(out);
    geometry.write_geometry(&object.geometry)?;
    Ok(geometry.into_inner())
}
