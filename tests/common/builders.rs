//! Test geometry builders.
//!
//! Generic shapes used across the integration tests, plus
//! `create_all_kinds_document()` which holds one native object of every
//! storable kind laid out on a grid.

#![allow(dead_code)]

use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_2, PI};
use threedm_bridge::document::{NativeDocument, ObjectAttributes};
use threedm_bridge::generic as g;
use threedm_bridge::native::{
    Arc, Circle, Cone, Curve, Cylinder, Ellipse, Extrusion, Mesh, MeshFace, NativeBox, NativeGeometry, Plane,
    PolyCurve, Sphere, Torus,
};
use threedm_bridge::tables::Layer;
use threedm_bridge::types::{BoundingBox3D, Color, ColorSource, Interval, Vector3};

pub fn pt(x: f64, y: f64, z: f64) -> g::Point {
    g::Point::new(x, y, z)
}

/// Closed axis-aligned rectangle in the XY plane
pub fn rectangle(x0: f64, y0: f64, x1: f64, y1: f64) -> g::Curve {
    g::Curve::Polyline(g::Polyline::new(vec![
        pt(x0, y0, 0.0),
        pt(x1, y0, 0.0),
        pt(x1, y1, 0.0),
        pt(x0, y1, 0.0),
        pt(x0, y0, 0.0),
    ]))
}

pub fn circle(x: f64, y: f64, radius: f64) -> g::Curve {
    g::Curve::Circle(g::Circle {
        centre: pt(x, y, 0.0),
        normal: g::Vector::Z_AXIS,
        radius,
    })
}

/// Rational quadratic quarter circle of radius 1
pub fn quarter_circle_nurbs() -> g::NurbsCurve {
    g::NurbsCurve {
        control_points: vec![pt(1.0, 0.0, 0.0), pt(1.0, 1.0, 0.0), pt(0.0, 1.0, 0.0)],
        weights: vec![1.0, FRAC_1_SQRT_2, 1.0],
        knots: vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0],
    }
}

/// Non-rational cubic that no shape predicate recognises
pub fn free_form_nurbs() -> g::NurbsCurve {
    g::NurbsCurve {
        control_points: vec![
            pt(0.0, 0.0, 0.0),
            pt(1.0, 2.0, 0.5),
            pt(3.0, -1.0, 1.0),
            pt(4.0, 1.5, 0.0),
            pt(6.0, 0.0, 2.0),
        ],
        weights: vec![1.0; 5],
        knots: vec![0.0, 0.0, 0.0, 0.0, 0.5, 1.0, 1.0, 1.0, 1.0],
    }
}

/// A closed chain: two lines and a half circle
pub fn slot_poly_curve() -> g::PolyCurve {
    let cs = g::CartesianCoordinateSystem::new(pt(2.0, 1.0, 0.0), g::Vector::X_AXIS, g::Vector::Y_AXIS);
    g::PolyCurve::new(vec![
        g::Curve::Line(g::Line::new(pt(0.0, 0.0, 0.0), pt(2.0, 0.0, 0.0))),
        g::Curve::Arc(g::Arc {
            coordinate_system: cs,
            radius: 1.0,
            start_angle: -FRAC_PI_2,
            end_angle: FRAC_PI_2,
        }),
        g::Curve::Line(g::Line::new(pt(2.0, 2.0, 0.0), pt(0.0, 2.0, 0.0))),
        g::Curve::Line(g::Line::new(pt(0.0, 2.0, 0.0), pt(0.0, 0.0, 0.0))),
    ])
}

/// 10 x 10 plate with a 2 x 2 hole in the middle
pub fn plate_with_hole() -> g::PlanarSurface {
    g::PlanarSurface::new(rectangle(0.0, 0.0, 10.0, 10.0), vec![rectangle(4.0, 4.0, 6.0, 6.0)])
}

/// 10 x 10 plate whose "hole" crosses the right edge
pub fn plate_with_overlapping_hole() -> g::PlanarSurface {
    g::PlanarSurface::new(rectangle(0.0, 0.0, 10.0, 10.0), vec![rectangle(8.0, 4.0, 12.0, 6.0)])
}

pub fn two_triangle_mesh() -> g::Mesh {
    g::Mesh::new(
        vec![pt(0.0, 0.0, 0.0), pt(1.0, 0.0, 0.0), pt(1.0, 1.0, 0.0), pt(0.0, 1.0, 0.0)],
        vec![g::Face::triangle(0, 1, 2), g::Face::triangle(0, 2, 3)],
    )
}

/// Document holding one object of every storable native kind, each offset
/// along x by 20 units.
pub fn create_all_kinds_document() -> NativeDocument {
    let mut doc = NativeDocument::new();
    let curves = doc.add_layer(Layer::with_color("Curves", Color::RED));
    let solids = doc.add_layer(Layer::with_color("Solids", Color::BLUE));

    let sp = 20.0;
    let at = |i: usize| Plane::new(Vector3::new(i as f64 * sp, 0.0, 0.0), Vector3::UNIT_Z);
    let on_curves = ObjectAttributes::on_layer(curves);
    let on_solids = ObjectAttributes::on_layer(solids);

    let mut square = Mesh::new();
    for p in [Vector3::ZERO, Vector3::UNIT_X, Vector3::new(1.0, 1.0, 0.0), Vector3::UNIT_Y] {
        square.add_vertex(p);
    }
    square.add_face(MeshFace::quad(0, 1, 2, 3));

    let objects: Vec<(NativeGeometry, ObjectAttributes)> = vec![
        (NativeGeometry::Point(at(0).origin), ObjectAttributes::default()),
        (
            NativeGeometry::Line(threedm_bridge::native::Line::new(at(1).origin, at(1).point_at(5.0, 5.0))),
            on_curves.clone(),
        ),
        (NativeGeometry::Circle(Circle::new(at(2), 3.0)), on_curves.clone()),
        (
            NativeGeometry::Arc(Arc::new(at(3), 3.0, Interval::new(0.0, PI))),
            on_curves.clone(),
        ),
        (NativeGeometry::Ellipse(Ellipse::new(at(4), 4.0, 2.0)), on_curves.clone()),
        (
            NativeGeometry::Curve(Curve::Poly(PolyCurve::new(vec![
                Curve::line(at(5).origin, at(5).point_at(5.0, 0.0)),
                Curve::line(at(5).point_at(5.0, 0.0), at(5).point_at(5.0, 5.0)),
            ]))),
            ObjectAttributes {
                color: Color::GREEN,
                color_source: ColorSource::ByObject,
                name: "bracket".into(),
                ..on_curves.clone()
            },
        ),
        (NativeGeometry::Mesh(square), ObjectAttributes::default()),
        (NativeGeometry::Sphere(Sphere::new(at(7).origin, 2.0)), on_solids.clone()),
        (NativeGeometry::Torus(Torus::new(at(8), 4.0, 1.0)), on_solids.clone()),
        (NativeGeometry::Cone(Cone::new(at(9), 5.0, 2.0)), on_solids.clone()),
        (
            NativeGeometry::Cylinder(Cylinder::new(Circle::new(at(10), 2.0), 0.0, 6.0)),
            on_solids.clone(),
        ),
        (
            NativeGeometry::Box(NativeBox {
                plane: at(11),
                x: Interval::new(0.0, 2.0),
                y: Interval::new(0.0, 3.0),
                z: Interval::new(0.0, 4.0),
            }),
            on_solids.clone(),
        ),
        (
            NativeGeometry::Extrusion(Extrusion::new(
                Curve::polyline(vec![
                    at(12).origin,
                    at(12).point_at(2.0, 0.0),
                    at(12).point_at(2.0, 2.0),
                    at(12).origin,
                ]),
                at(12).origin,
                at(12).origin + Vector3::new(0.0, 0.0, 3.0),
                true,
            )),
            on_solids.clone(),
        ),
        (
            NativeGeometry::Brep(Sphere::new(at(13).origin, 1.5).to_brep()),
            on_solids.clone(),
        ),
        (
            NativeGeometry::BoundingBox(BoundingBox3D::new(at(14).origin, at(14).origin + Vector3::new(1.0, 2.0, 3.0))),
            ObjectAttributes::default(),
        ),
    ];
    for (geometry, attributes) in objects {
        doc.add_object(geometry, attributes).expect("storable kind");
    }
    doc
}
