//! Document owned for the length of one adapter call

use std::fs::{self, OpenOptions};
use std::io::{BufWriter, ErrorKind, Write};
use std::ops::{Deref, DerefMut};
use std::path::{Path, PathBuf};

use crate::document::NativeDocument;
use crate::error::{BridgeError, Result};
use crate::io::{Reader3dm, Writer3dm};

/// A document bound to the file it will be written to
///
/// Nothing touches the disk until [`commit`](Self::commit). Dropping the
/// value on any other path, including `?` returns, discards the document.
#[derive(Debug)]
pub struct ScopedDocument {
    path: PathBuf,
    version: u32,
    document: NativeDocument,
}

impl ScopedDocument {
    /// Start a new document for `path`
    pub fn create(path: impl Into<PathBuf>, version: u32) -> Self {
        ScopedDocument {
            path: path.into(),
            version,
            document: NativeDocument::with_version(version),
        }
    }

    /// Load the document stored at `path`
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let document = Reader3dm::from_file(&path)?.read()?;
        Ok(ScopedDocument {
            version: document.version,
            path,
            document,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the document to a file that must not exist yet
    ///
    /// The bytes are encoded in memory first so a failed encode leaves no
    /// file behind.
    pub fn commit(self) -> Result<NativeDocument> {
        let bytes = Writer3dm::new(&self.document).write_to_vec(self.version)?;
        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
            .map_err(|e| match e.kind() {
                ErrorKind::AlreadyExists => BridgeError::FileExists(self.path.display().to_string()),
                _ => BridgeError::Io(e),
            })?;
        let mut writer = BufWriter::new(file);
        if let Err(e) = writer.write_all(&bytes).and_then(|_| writer.flush()) {
            drop(writer);
            // A half-written file is worse than none
            fs::remove_file(&self.path).ok();
            return Err(e.into());
        }
        Ok(self.document)
    }
}

impl Deref for ScopedDocument {
    type Target = NativeDocument;

    fn deref(&self) -> &NativeDocument {
        &self.document
    }
}

impl DerefMut for ScopedDocument {
    fn deref_mut(&mut self) -> &mut NativeDocument {
        &mut self.document
    }
}
