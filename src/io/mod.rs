//! I/O module for reading and writing `.3dm` documents

pub mod format;
pub mod geometry;
pub mod reader;
pub mod writer;

pub use reader::{Reader3dm, Reader3dmConfiguration};
pub use writer::Writer3dm;

use crate::document::NativeDocument;
use crate::error::Result;

/// Read a document from an in-memory file image
pub fn read_from_bytes(data: &[u8]) -> Result<NativeDocument> {
    Reader3dm::from_bytes(data).read()
}

/// Write a document to an in-memory file image
pub fn write_to_vec(document: &NativeDocument, version: u32) -> Result<Vec<u8>> {
    Writer3dm::new(document).write_to_vec(version)
}
