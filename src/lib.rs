//! # threedm-bridge
//!
//! Bidirectional conversion between a native `.3dm` CAD geometry model and a
//! generic building-geometry model, with a reader and writer for `.3dm`
//! documents and a small create/read adapter on top.
//!
//! ## Features
//!
//! - Curves, surfaces, breps, meshes, extrusions and analytic solids in both
//!   directions
//! - Trimmed-surface reconstruction with shared edges and singular trims
//! - Version-aware NURBS control point conventions (documents 5 to 8)
//! - Chunked `.3dm` container with a compressed, checksummed object table
//! - Layer and colour attributes carried through create and read
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use threedm_bridge::{ConvertConfig, Converter, NotificationCollection};
//! use threedm_bridge::io::Reader3dm;
//!
//! let doc = Reader3dm::from_file("site.3dm")?.read()?;
//! let converter = Converter::new(ConvertConfig::default());
//! let mut log = NotificationCollection::new();
//!
//! for object in doc.objects() {
//!     if let Some(generic) = converter.to_generic(&object.geometry, &mut log) {
//!         println!("{}", generic.kind_name());
//!     }
//! }
//! for note in log.iter() {
//!     eprintln!("{note}");
//! }
//! # Ok::<(), threedm_bridge::BridgeError>(())
//! ```
//!
//! ## Architecture
//!
//! - [`native`] - the `.3dm` object model (curves with domains, brep topology)
//! - [`generic`] - the building-geometry model (plain values, no topology)
//! - [`kernel`] - `GeometryKernel`, the geometric predicates conversion needs
//! - [`convert`] - `Converter`, one entry point per direction
//! - [`compare`] - `IsEqual`, tolerance comparison across the two models
//! - [`document`], [`tables`], [`io`] - documents, layers and the file format
//! - [`adapter`] - push, create and read against files on disk
//!
//! Conversions never fail loudly: anything that cannot be converted is
//! reported to a [`NotificationCollection`] and yields `None`.

#![allow(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod adapter;
pub mod compare;
pub mod convert;
pub mod document;
pub mod error;
pub mod generic;
pub mod io;
pub mod kernel;
pub mod native;
pub mod notification;
pub mod nurbs;
pub mod tables;
pub mod types;

// Re-export commonly used types
pub use error::{BridgeError, Result};
pub use notification::{Notification, NotificationCollection, NotificationType};
pub use types::{BoundingBox3D, Color, ColorSource, Interval, Tolerance, Vector2, Vector3};

pub use compare::IsEqual;
pub use convert::{ConvertConfig, Converter};
pub use kernel::{GeometryKernel, ReferenceKernel};
pub use native::NativeGeometry;

pub use document::{ModelObject, NativeDocument, ObjectAttributes};
pub use tables::{Layer, Table, TableEntry};

pub use io::{Reader3dm, Writer3dm};

pub use adapter::{AdapterConfig, CreateInput, FileSettings, PushType, ThreeDmAdapter, ThreeDmObject};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
