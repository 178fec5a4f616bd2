//! Shared test utilities for threedm-bridge integration tests.
//!
//! Consolidates path resolution, converter setup, notification checks and
//! the file round trip into a single module that all test crates import
//! via `mod common;`.

#![allow(dead_code)]

pub mod builders;
pub mod comparison;

use std::path::PathBuf;
use threedm_bridge::document::{NativeDocument, ObjectAttributes};
use threedm_bridge::generic::Geometry;
use threedm_bridge::native::NativeGeometry;
use threedm_bridge::{io, ConvertConfig, Converter, NotificationCollection, NotificationType};

// ===========================================================================
// Paths
// ===========================================================================

/// Resolve path into the `test_output/` directory, creating it if needed.
pub fn test_output_path(filename: &str) -> PathBuf {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("test_output");
    let _ = std::fs::create_dir_all(&dir);
    dir.join(filename)
}

/// Like [`test_output_path`], but removes any file left by an earlier run.
pub fn fresh_output_path(filename: &str) -> PathBuf {
    let path = test_output_path(filename);
    let _ = std::fs::remove_file(&path);
    path
}

// ===========================================================================
// Versions
// ===========================================================================

/// Every document version the codec accepts.
pub const ALL_VERSIONS: [u32; 4] = [5, 6, 7, 8];

pub fn converter(version: u32) -> Converter {
    Converter::new(ConvertConfig::default().with_version(version))
}

// ===========================================================================
// Notification helpers
// ===========================================================================

pub fn messages(log: &NotificationCollection) -> Vec<String> {
    log.iter().map(|n| n.message.clone()).collect()
}

pub fn count_of(log: &NotificationCollection, kind: NotificationType) -> usize {
    log.of_type(kind).len()
}

/// Fail with every message if `log` holds an error.
pub fn assert_no_errors(log: &NotificationCollection) {
    assert!(
        !log.has_type(NotificationType::Error),
        "unexpected errors: {:#?}",
        messages(log)
    );
}

// ===========================================================================
// Round trips
// ===========================================================================

/// Generic → native, panicking with the log on failure.
pub fn to_native(version: u32, geometry: &Geometry) -> NativeGeometry {
    let mut log = NotificationCollection::new();
    converter(version)
        .to_native(geometry, &mut log)
        .unwrap_or_else(|| panic!("no native form for {}: {:#?}", geometry.kind_name(), messages(&log)))
}

/// Native → generic, panicking with the log on failure.
pub fn to_generic(version: u32, native: &NativeGeometry) -> Geometry {
    let mut log = NotificationCollection::new();
    converter(version)
        .to_generic(native, &mut log)
        .unwrap_or_else(|| panic!("no generic form for {}: {:#?}", native.kind_name(), messages(&log)))
}

/// Store `native` in a document, write it, read it back and return the
/// single object's geometry.
pub fn through_file(version: u32, native: NativeGeometry) -> NativeGeometry {
    let mut doc = NativeDocument::with_version(version);
    doc.add_object(native, ObjectAttributes::default())
        .expect("object should be storable");
    let bytes = io::write_to_vec(&doc, version).expect("write");
    let back = io::read_from_bytes(&bytes).expect("read");
    assert_eq!(back.object_count(), 1);
    let geometry = back.objects().next().map(|o| o.geometry.clone()).expect("one object");
    geometry
}
