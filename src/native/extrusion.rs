//! Native extrusion: a profile curve swept along a straight path

use super::brep::{signed_area, Brep, BREP_TOLERANCE};
use super::curve::Curve;
use super::plane::Plane;
use super::surface::{NurbsSurface, Surface};
use crate::nurbs;
use crate::types::Vector3;

#[derive(Debug, Clone, PartialEq)]
pub struct Extrusion {
    pub profile: Curve,
    pub path_start: Vector3,
    pub path_end: Vector3,
    pub capped: bool,
}

impl Extrusion {
    pub fn new(profile: Curve, path_start: Vector3, path_end: Vector3, capped: bool) -> Self {
        Extrusion {
            profile,
            path_start,
            path_end,
            capped,
        }
    }

    pub fn path_vector(&self) -> Vector3 {
        self.path_end - self.path_start
    }

    /// Height along the path
    pub fn height(&self) -> f64 {
        self.path_vector().length()
    }

    /// Side wall as a translational NURBS surface (u along the profile, v along the path)
    pub fn side_surface(&self) -> Option<NurbsSurface> {
        translational_surface(&self.profile, self.path_vector())
    }

    /// Boundary representation of the extrusion, with caps for a closed planar profile
    pub fn to_brep(&self) -> Option<Brep> {
        let dir = self.path_vector();
        let plane = Plane::fit(&self.profile.sample_dense(16), BREP_TOLERANCE);
        let closed = self.profile.is_closed(BREP_TOLERANCE);

        // profile counterclockwise about the path gives an outward side normal
        let profile = match plane {
            Some(p) if closed => {
                let normal = if p.z_axis.dot(&dir) < 0.0 { p.flipped() } else { p };
                let poly: Vec<_> = self
                    .profile
                    .sample_dense(16)
                    .iter()
                    .map(|q| normal.to_local(*q).to_2d())
                    .collect();
                if signed_area(&poly) < 0.0 {
                    self.profile.reversed()
                } else {
                    self.profile.clone()
                }
            }
            _ => self.profile.clone(),
        };

        let side = translational_surface(&profile, dir)?;
        let mut brep = Brep::from_surface(Surface::Nurbs(side));
        if self.capped && closed {
            if let Some(p) = plane {
                let p = if p.z_axis.dot(&dir) < 0.0 { p.flipped() } else { p };
                let bottom = Brep::from_planar_loops(p.flipped(), &profile, &[], BREP_TOLERANCE);
                let top_plane = Plane { origin: p.origin + dir, ..p };
                let top_curve = profile.map_points(&|q| q + dir);
                let top = Brep::from_planar_loops(top_plane, &top_curve, &[], BREP_TOLERANCE);
                brep.append(&bottom);
                brep.append(&top);
                brep.join_naked_edges(BREP_TOLERANCE);
            }
        }
        Some(brep)
    }
}

/// Surface swept by translating `profile` along `direction`
pub fn translational_surface(profile: &Curve, direction: Vector3) -> Option<NurbsSurface> {
    let nc = profile.to_nurbs()?;
    let mut cvs = Vec::with_capacity(nc.cv_count() * 2);
    for i in 0..nc.cv_count() {
        let (p, w) = (nc.location(i), nc.weight(i));
        cvs.push(nurbs::to_homogeneous(p, w));
        cvs.push(nurbs::to_homogeneous(p + direction, w));
    }
    Some(NurbsSurface {
        degree_u: nc.degree(),
        degree_v: 1,
        u_count: nc.cv_count(),
        v_count: 2,
        knots_u: nc.knots().to_vec(),
        knots_v: vec![0.0, direction.length().max(f64::MIN_POSITIVE)],
        cvs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::native::primitives::Arc;
    use crate::types::Interval;
    use std::f64::consts::{PI, TAU};

    #[test]
    fn test_side_surface_spans_path() {
        let e = Extrusion::new(
            Curve::line(Vector3::ZERO, Vector3::UNIT_X),
            Vector3::ZERO,
            Vector3::new(0.0, 0.0, 2.0),
            false,
        );
        let s = Surface::Nurbs(e.side_surface().unwrap());
        let (du, dv) = (s.domain(0), s.domain(1));
        assert!(s.point_at(du.t1, dv.t1).almost_equal(&Vector3::new(1.0, 0.0, 2.0), 1e-12));
    }

    #[test]
    fn test_capped_circle_is_solid() {
        let circle = Curve::arc(Arc::new(Plane::world_xy(), 1.0, Interval::new(0.0, TAU)));
        let e = Extrusion::new(circle, Vector3::ZERO, Vector3::new(0.0, 0.0, 3.0), true);
        let brep = e.to_brep().unwrap();
        let (valid, log) = brep.is_valid_with_log();
        assert!(valid, "{log}");
        assert_eq!(brep.faces.len(), 3);
        assert!(brep.is_solid());
        assert!((brep.volume() - 3.0 * PI).abs() < 0.05);
    }
}
