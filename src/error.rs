//! Error types for threedm-bridge

use std::io;
use thiserror::Error;

/// Main error type for threedm-bridge operations
///
/// Conversion problems on a single object are never reported through this
/// type; they go to a [`NotificationCollection`](crate::notification::NotificationCollection)
/// and the object is skipped. `BridgeError` is reserved for failures that
/// abort a whole call (file I/O, malformed documents, bad settings).
#[derive(Debug, Error)]
pub enum BridgeError {
    /// IO error occurred during file operations
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Unsupported document version
    #[error("Unsupported 3dm version: {0}")]
    UnsupportedVersion(u32),

    /// Error during compression/decompression
    #[error("Compression error: {0}")]
    Compression(String),

    /// Invalid file header
    #[error("Invalid file header: {0}")]
    InvalidHeader(String),

    /// Invalid file format
    #[error("Invalid file format: {0}")]
    InvalidFormat(String),

    /// CRC checksum mismatch
    #[error("CRC checksum mismatch: expected {expected:#X}, got {actual:#X}")]
    ChecksumMismatch { expected: u32, actual: u32 },

    /// Encoding error
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Geometry rejected by the kernel
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    /// Conversion or operation that has no supported mapping
    #[error("Unsupported: {0}")]
    Unsupported(String),

    /// Invalid adapter or file settings
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Target file already exists and the operation is create-only
    #[error("File already exists; refusing to overwrite: {0}")]
    FileExists(String),

    /// File or directory missing
    #[error("Not found: {0}")]
    NotFound(String),

    /// Generic error with custom message
    #[error("{0}")]
    Custom(String),
}

/// Result type alias for threedm-bridge operations
pub type Result<T> = std::result::Result<T, BridgeError>;

impl From<String> for BridgeError {
    fn from(s: String) -> Self {
        BridgeError::Custom(s)
    }
}

impl From<&str> for BridgeError {
    fn from(s: &str) -> Self {
        BridgeError::Custom(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BridgeError::UnsupportedVersion(3);
        assert_eq!(err.to_string(), "Unsupported 3dm version: 3");
    }

    #[test]
    fn test_checksum_error() {
        let err = BridgeError::ChecksumMismatch {
            expected: 0x1234,
            actual: 0x5678,
        };
        assert!(err.to_string().contains("0x1234"));
        assert!(err.to_string().contains("0x5678"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: BridgeError = io_err.into();
        assert!(matches!(err, BridgeError::Io(_)));
    }

    #[test]
    fn test_file_exists_message() {
        let err = BridgeError::FileExists("model.3dm".into());
        assert_eq!(
            err.to_string(),
            "File already exists; refusing to overwrite: model.3dm"
        );
    }
}
