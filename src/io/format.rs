//! Low-level pieces of the `.3dm` container
//!
//! A file is the 32-byte header followed by chunks. Each chunk is a little
//! endian `u32` typecode, a `u64` payload length and the payload itself.

use bitflags::bitflags;
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use nom::bytes::complete::{tag, take};
use nom::combinator::map_res;
use nom::sequence::preceded;
use nom::IResult;
use std::io::{Read, Write};

use crate::document::{MAX_VERSION, MIN_VERSION};
use crate::error::{BridgeError, Result};
use crate::types::Vector3;

/// Fixed start of every file
pub const SIGNATURE: &[u8] = b"3D Geometry File Format ";

/// Signature plus the 8-character version field
pub const HEADER_LENGTH: usize = 32;

/// Size of a chunk's typecode and length fields
pub const CHUNK_HEADER_LENGTH: usize = 12;

/// Chunk typecodes
pub mod typecode {
    pub const PROPERTIES: u32 = 0x0000_0001;
    pub const LAYER_TABLE: u32 = 0x0000_0002;
    pub const OBJECT_TABLE: u32 = 0x0000_0003;
    pub const END_OF_FILE: u32 = 0x7FFF_FFFF;
}

bitflags! {
    /// Layer state bits
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct LayerFlags: u8 {
        const VISIBLE = 0b0000_0001;
        const LOCKED = 0b0000_0010;
    }
}

bitflags! {
    /// Which optional attribute fields follow an object record
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct AttributeFlags: u8 {
        const HAS_NAME = 0b0000_0001;
        const HAS_COLOR = 0b0000_0010;
    }
}

/// Parse the version out of a file header
///
/// The version field is right-aligned and padded with spaces.
pub fn parse_header(input: &[u8]) -> IResult<&[u8], u32> {
    preceded(
        tag(SIGNATURE),
        map_res(take(8usize), |field: &[u8]| {
            std::str::from_utf8(field)
                .map_err(|_| ())
                .and_then(|s| s.trim_start().parse::<u32>().map_err(|_| ()))
        }),
    )(input)
}

/// Check a file header and return its version
pub fn read_header(input: &[u8]) -> Result<u32> {
    let (_, version) = parse_header(input).map_err(|_| {
        let shown = String::from_utf8_lossy(&input[..input.len().min(HEADER_LENGTH)]).into_owned();
        BridgeError::InvalidHeader(format!("not a 3dm header: {shown:?}"))
    })?;
    check_version(version)?;
    Ok(version)
}

pub fn check_version(version: u32) -> Result<()> {
    if (MIN_VERSION..=MAX_VERSION).contains(&version) {
        Ok(())
    } else {
        Err(BridgeError::UnsupportedVersion(version))
    }
}

pub fn write_header<W: Write>(writer: &mut W, version: u32) -> Result<()> {
    writer.write_all(SIGNATURE)?;
    writer.write_all(format!("{version:>8}").as_bytes())?;
    Ok(())
}

/// CRC-32 of `data`
pub fn crc32(data: &[u8]) -> u32 {
    let mut crc = flate2::Crc::new();
    crc.update(data);
    crc.sum()
}

/// Length-prefixed UTF-16LE string
pub fn write_string<W: Write>(writer: &mut W, value: &str) -> Result<()> {
    let units: Vec<u16> = value.encode_utf16().collect();
    writer.write_u32::<LittleEndian>((units.len() * 2) as u32)?;
    for unit in units {
        writer.write_u16::<LittleEndian>(unit)?;
    }
    Ok(())
}

pub fn read_string<R: Read>(reader: &mut R) -> Result<String> {
    let length = reader.read_u32::<LittleEndian>()? as usize;
    if length % 2 != 0 {
        return Err(BridgeError::Encoding(format!("odd UTF-16 byte length {length}")));
    }
    let mut bytes = Vec::new();
    reader.by_ref().take(length as u64).read_to_end(&mut bytes)?;
    if bytes.len() != length {
        return Err(BridgeError::InvalidFormat("string runs past the end of its chunk".into()));
    }
    encoding_rs::UTF_16LE
        .decode_without_bom_handling_and_without_replacement(&bytes)
        .map(|s| s.into_owned())
        .ok_or_else(|| BridgeError::Encoding("invalid UTF-16LE string".into()))
}

pub fn write_vector<W: Write>(writer: &mut W, v: Vector3) -> Result<()> {
    writer.write_f64::<LittleEndian>(v.x)?;
    writer.write_f64::<LittleEndian>(v.y)?;
    writer.write_f64::<LittleEndian>(v.z)?;
    Ok(())
}

pub fn read_vector<R: Read>(reader: &mut R) -> Result<Vector3> {
    let x = reader.read_f64::<LittleEndian>()?;
    let y = reader.read_f64::<LittleEndian>()?;
    let z = reader.read_f64::<LittleEndian>()?;
    Ok(Vector3::new(x, y, z))
}

/// Read a count and reject values that cannot fit in the data after it
pub fn read_count(input: &mut &[u8], min_item_size: usize) -> Result<usize> {
    let count = input.read_u32::<LittleEndian>()? as usize;
    let remaining = input.len();
    if count.saturating_mul(min_item_size.max(1)) > remaining {
        return Err(BridgeError::InvalidFormat(format!(
            "count {count} exceeds the {remaining} bytes left"
        )));
    }
    Ok(count)
}
