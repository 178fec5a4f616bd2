//! Benchmarks for conversion and the document codec.
//!
//! Run with: cargo bench --bench conversion
//!
//! To compare against baseline:
//! 1. First run: cargo bench --bench conversion -- --save-baseline main
//! 2. After changes: cargo bench --bench conversion -- --baseline main

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use threedm_bridge::document::{NativeDocument, ObjectAttributes};
use threedm_bridge::generic::{self as g, Geometry};
use threedm_bridge::native::{Arc, ArcCurve, Circle, Curve, NativeGeometry, Plane, Sphere};
use threedm_bridge::types::Vector3;
use threedm_bridge::{io, ConvertConfig, Converter, NotificationCollection};

// =============================================================================
// Test Geometry
// =============================================================================

fn rectangle(x0: f64, y0: f64, x1: f64, y1: f64) -> g::Curve {
    g::Curve::Polyline(g::Polyline::new(vec![
        g::Point::new(x0, y0, 0.0),
        g::Point::new(x1, y0, 0.0),
        g::Point::new(x1, y1, 0.0),
        g::Point::new(x0, y1, 0.0),
        g::Point::new(x0, y0, 0.0),
    ]))
}

/// Plate with a grid of square holes
fn perforated_plate(holes_per_side: usize) -> Geometry {
    let pitch = 3.0;
    let size = pitch * holes_per_side as f64 + 1.0;
    let holes = (0..holes_per_side)
        .flat_map(|i| (0..holes_per_side).map(move |j| (i, j)))
        .map(|(i, j)| {
            let x = 1.0 + pitch * i as f64;
            let y = 1.0 + pitch * j as f64;
            rectangle(x, y, x + 1.0, y + 1.0)
        })
        .collect();
    g::PlanarSurface::new(rectangle(0.0, 0.0, size, size), holes).into()
}

/// Document of `count` mixed objects
fn mixed_document(count: usize) -> NativeDocument {
    let mut doc = NativeDocument::new();
    for i in 0..count {
        let origin = Vector3::new(i as f64, 0.0, 0.0);
        let geometry = match i % 4 {
            0 => NativeGeometry::Point(origin),
            1 => NativeGeometry::Curve(Curve::line(origin, origin + Vector3::UNIT_Y)),
            2 => NativeGeometry::Circle(Circle::new(Plane::new(origin, Vector3::UNIT_Z), 0.5)),
            _ => NativeGeometry::Brep(Sphere::new(origin, 0.5).to_brep()),
        };
        doc.add_object(geometry, ObjectAttributes::default())
            .expect("storable kind");
    }
    doc
}

// =============================================================================
// Conversion Benchmarks
// =============================================================================

fn bench_to_generic(c: &mut Criterion) {
    let mut group = c.benchmark_group("to_generic");
    let converter = Converter::new(ConvertConfig::default());

    let circle = Circle::new(Plane::world_xy(), 2.0);
    let nurbs_circle = Curve::Arc(ArcCurve::new(Arc::from(circle)))
        .to_nurbs()
        .map(|n| NativeGeometry::Curve(Curve::Nurbs(n)))
        .expect("circle has a NURBS form");
    let sphere = NativeGeometry::Brep(Sphere::new(Vector3::ZERO, 3.0).to_brep());

    group.bench_function("classify_nurbs_circle", |b| {
        b.iter(|| {
            let mut log = NotificationCollection::new();
            converter.to_generic(black_box(&nurbs_circle), &mut log)
        });
    });

    group.bench_function("sphere_brep", |b| {
        b.iter(|| {
            let mut log = NotificationCollection::new();
            converter.to_generic(black_box(&sphere), &mut log)
        });
    });

    group.finish();
}

fn bench_to_native(c: &mut Criterion) {
    let mut group = c.benchmark_group("to_native");
    let converter = Converter::new(ConvertConfig::default());

    for holes in [1, 4, 8] {
        let plate = perforated_plate(holes);
        group.bench_function(format!("planar_surface_{}_holes", holes * holes), |b| {
            b.iter(|| {
                let mut log = NotificationCollection::new();
                converter.to_native(black_box(&plate), &mut log)
            });
        });
    }

    group.finish();
}

// =============================================================================
// Codec Benchmarks
// =============================================================================

fn bench_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");

    let doc = mixed_document(2_000);
    let bytes = io::write_to_vec(&doc, 7).expect("failed to write document");
    group.throughput(Throughput::Elements(doc.object_count() as u64));

    group.bench_function("write", |b| b.iter(|| io::write_to_vec(black_box(&doc), 7)));

    group.bench_function("read", |b| b.iter(|| io::read_from_bytes(black_box(&bytes))));

    group.finish();
}

// =============================================================================
// Criterion Setup
// =============================================================================

criterion_group!(benches, bench_to_generic, bench_to_native, bench_codec);
criterion_main!(benches);
