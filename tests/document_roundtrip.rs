//! Whole-document round trips through files on disk, and the adapter's
//! push/read cycle on top of them.

mod common;

use common::builders::*;
use common::*;

use threedm_bridge::adapter::{collect_all_model_data, AdapterConfig, FileSettings};
use threedm_bridge::generic::{self as g, Geometry};
use threedm_bridge::io::{Reader3dm, Writer3dm};
use threedm_bridge::{
    BridgeError, Color, ColorSource, CreateInput, NotificationCollection, NotificationType, PushType, ThreeDmAdapter,
    ThreeDmObject,
};

// ===========================================================================
// Codec
// ===========================================================================

#[test]
fn all_kinds_document_round_trips_in_every_version() {
    let doc = create_all_kinds_document();
    for version in ALL_VERSIONS {
        let path = fresh_output_path(&format!("all_kinds_v{version}.3dm"));
        Writer3dm::new(&doc).write_to_file(&path, version).expect("write");

        let back = Reader3dm::from_file(&path).and_then(Reader3dm::read).expect("read");
        assert_eq!(back.version, version);
        assert!(back.notifications.is_empty(), "v{version}: {:#?}", messages(&back.notifications));

        let names: Vec<&str> = back.layers.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, ["Default", "Curves", "Solids"]);
        assert_eq!(back.layers.get("Curves").map(|l| l.color), Some(Color::RED));

        assert_eq!(back.object_count(), doc.object_count());
        for (written, read) in doc.objects().zip(back.objects()) {
            assert_eq!(read, written, "v{version}: {} changed", written.geometry.kind_name());
        }
    }
}

#[test]
fn every_stored_object_converts_to_generic() {
    let doc = create_all_kinds_document();
    let bytes = threedm_bridge::io::write_to_vec(&doc, 7).expect("write");
    let back = threedm_bridge::io::read_from_bytes(&bytes).expect("read");

    let c = converter(7);
    let mut log = NotificationCollection::new();
    let converted = back.objects().filter_map(|o| c.to_generic(&o.geometry, &mut log)).count();
    assert_no_errors(&log);
    assert_eq!(converted, back.object_count());
}

#[test]
fn truncated_file_is_rejected() {
    let doc = create_all_kinds_document();
    let bytes = threedm_bridge::io::write_to_vec(&doc, 6).expect("write");
    let cut = &bytes[..bytes.len() / 2];
    match threedm_bridge::io::read_from_bytes(cut) {
        Err(BridgeError::InvalidFormat(_)) | Err(BridgeError::Compression(_)) => {}
        other => panic!("expected a format error, got {other:?}"),
    }
}

// ===========================================================================
// Adapter
// ===========================================================================

fn adapter_for(file_name: &str, log: &mut NotificationCollection) -> ThreeDmAdapter {
    let path = fresh_output_path(file_name);
    ThreeDmAdapter::new(FileSettings::from_path(&path), AdapterConfig::default().with_version(7), log)
}

#[test]
fn push_then_read_restores_layers_and_colours() {
    let mut log = NotificationCollection::new();
    let adapter = adapter_for("adapter_push_read.3dm", &mut log);

    let input = CreateInput::Objects(vec![
        ThreeDmObject::new("Walls", rectangle(0.0, 0.0, 4.0, 3.0).into()).with_layer_colour(Color::RED),
        ThreeDmObject::new("Walls", g::Curve::Nurbs(free_form_nurbs()).into()),
        ThreeDmObject::new("Slabs", plate_with_hole().into()).with_object_colour(Color::GREEN),
        ThreeDmObject::new("", two_triangle_mesh().into()),
    ]);
    let summary = adapter.push(input, PushType::CreateOnly, &mut log).expect("push");
    assert_eq!(summary.written, 4);
    assert_eq!(summary.skipped, 0);
    assert_no_errors(&log);

    let objects = adapter.read(&mut log);
    assert_no_errors(&log);
    assert_eq!(objects.len(), 4);

    let layers: Vec<&str> = objects.iter().map(|o| o.layer.as_str()).collect();
    assert_eq!(
        layers,
        [
            "adapter_push_read.3dm::Walls",
            "adapter_push_read.3dm::Walls",
            "adapter_push_read.3dm::Slabs",
            "adapter_push_read.3dm::Default",
        ]
    );
    assert_eq!(objects[0].layer_colour, Color::RED);
    assert_eq!(objects[2].colour_source, ColorSource::ByObject);
    assert_eq!(objects[2].object_colour, Color::GREEN);
    assert_eq!(objects[0].colour_source, ColorSource::ByLayer);

    assert!(matches!(objects[0].geometry, Some(Geometry::Curve(g::Curve::Polyline(_)))));
    assert!(matches!(objects[1].geometry, Some(Geometry::Curve(g::Curve::Nurbs(_)))));
    assert!(matches!(objects[2].geometry, Some(Geometry::Surface(g::Surface::Planar(_)))));
    assert!(matches!(objects[3].geometry, Some(Geometry::Mesh(_))));
}

#[test]
fn second_push_is_refused_and_file_is_untouched() {
    let mut log = NotificationCollection::new();
    let adapter = adapter_for("adapter_second_push.3dm", &mut log);
    let points = || CreateInput::Geometries(vec![pt(1.0, 2.0, 3.0).into()]);

    adapter.push(points(), PushType::CreateOnly, &mut log).expect("first push");
    let before = std::fs::read(adapter.path()).expect("file written");

    let err = adapter.push(points(), PushType::UpdateOrCreateOnly, &mut log).unwrap_err();
    assert!(matches!(err, BridgeError::FileExists(_)));
    assert_eq!(count_of(&log, NotificationType::Warning), 1);
    assert_eq!(count_of(&log, NotificationType::Error), 1);
    assert_eq!(std::fs::read(adapter.path()).expect("file kept"), before);
}

#[test]
fn collect_reads_every_file() {
    let mut log = NotificationCollection::new();
    let first = fresh_output_path("collect_a.3dm");
    let second = fresh_output_path("collect_b.3dm");
    let doc = create_all_kinds_document();
    Writer3dm::new(&doc).write_to_file(&first, 6).expect("write a");
    Writer3dm::new(&doc).write_to_file(&second, 8).expect("write b");

    let data = collect_all_model_data(&[&first, &second], true, &mut log);
    assert_no_errors(&log);
    assert_eq!(data.len(), 2 * doc.object_count());
    assert_eq!(data.layer_names.len(), data.len());
    assert_eq!(data.layer_colours.len(), data.len());
    assert_eq!(data.layer_names[1], "collect_a.3dm::Curves");
    assert!(data.layer_names.last().is_some_and(|n| n.starts_with("collect_b.3dm::")));

    assert!(collect_all_model_data(&[&first], false, &mut log).is_empty());
}
