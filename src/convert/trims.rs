//! Brep topology rebuilt from the trim curves of a generic NURBS surface

use ahash::AHashMap;

use super::Converter;
use crate::generic::SurfaceTrim;
use crate::kernel::GeometryKernel;
use crate::native::brep::curve_overlap;
use crate::native::{Brep, Curve, IsoStatus, LoopType, Surface};
use crate::notification::NotificationCollection;
use crate::types::{Interval, Vector3};

/// Samples used to decide whether a new edge coincides with an existing one
const OVERLAP_SAMPLES: usize = 100;

/// Spatial hash over brep vertices so lookups stay local
struct VertexGrid {
    cell: f64,
    tolerance: f64,
    cells: AHashMap<(i64, i64, i64), Vec<usize>>,
}

impl VertexGrid {
    fn new(tolerance: f64) -> Self {
        VertexGrid {
            cell: tolerance.max(1e-9) * 2.0,
            tolerance,
            cells: AHashMap::new(),
        }
    }

    fn key(&self, p: Vector3) -> (i64, i64, i64) {
        let k = |v: f64| (v / self.cell).floor() as i64;
        (k(p.x), k(p.y), k(p.z))
    }

    fn find_or_add(&mut self, brep: &mut Brep, p: Vector3) -> usize {
        let (x, y, z) = self.key(p);
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let Some(candidates) = self.cells.get(&(x + dx, y + dy, z + dz)) else {
                        continue;
                    };
                    if let Some(&v) = candidates
                        .iter()
                        .find(|&&v| brep.vertices[v].point.distance(&p) <= self.tolerance)
                    {
                        return v;
                    }
                }
            }
        }
        let v = brep.add_vertex(p);
        self.cells.entry((x, y, z)).or_default().push(v);
        v
    }
}

/// Which side of the parameter rectangle a 2d trim curve runs along
fn iso_status(curve2d: &Curve, u: Interval, v: Interval, tolerance: f64) -> IsoStatus {
    let samples = curve2d.sample(4);
    let constant = |f: fn(&Vector3) -> f64| {
        let first = samples.first().map(f)?;
        samples.iter().all(|p| (f(p) - first).abs() <= tolerance).then_some(first)
    };
    if let Some(x) = constant(|p| p.x) {
        return if (x - u.t0).abs() <= tolerance {
            IsoStatus::West
        } else if (x - u.t1).abs() <= tolerance {
            IsoStatus::East
        } else {
            IsoStatus::X
        };
    }
    if let Some(y) = constant(|p| p.y) {
        return if (y - v.t0).abs() <= tolerance {
            IsoStatus::South
        } else if (y - v.t1).abs() <= tolerance {
            IsoStatus::North
        } else {
            IsoStatus::Y
        };
    }
    IsoStatus::None
}

impl<K: GeometryKernel> Converter<K> {
    /// Single-face brep on `surface` bounded by the given trim loops
    pub(super) fn trimmed_brep(
        &self,
        surface: Surface,
        outer: &[SurfaceTrim],
        inner: &[SurfaceTrim],
        log: &mut NotificationCollection,
    ) -> Brep {
        let tol = self.distance();
        let (u, v) = (surface.domain(0), surface.domain(1));
        let mut brep = Brep::new();
        let s = brep.add_surface(surface);
        let face = brep.add_face(s, false);
        let mut grid = VertexGrid::new(tol);
        let mut edges_by_ends: AHashMap<(usize, usize), Vec<usize>> = AHashMap::new();

        let loops = outer
            .iter()
            .map(|t| (t, LoopType::Outer))
            .chain(inner.iter().map(|t| (t, LoopType::Inner)));
        for (trim, loop_type) in loops {
            let parts3d = trim.curve3d.sub_parts();
            let parts2d = trim.curve2d.sub_parts();
            if parts3d.len() != parts2d.len() {
                log.error(format!(
                    "SurfaceTrim skipped: {} curves in 3d against {} in parameter space.",
                    parts3d.len(),
                    parts2d.len()
                ));
                continue;
            }
            let l = brep.add_loop(face, loop_type);
            for (c3, c2) in parts3d.iter().zip(&parts2d) {
                let Some(native2d) = self.curve_to_native(c2, log) else {
                    continue;
                };
                let iso = iso_status(&native2d, u, v, tol);
                let uv = native2d.point_at_start();
                let native3d = self.curve_to_native(c3, log);
                let c2_index = brep.add_curve2d(native2d);

                let edge_curve = match native3d {
                    Some(c) if c.length() > tol => c,
                    other => {
                        let at = match other {
                            Some(c) => c.point_at_start(),
                            None => brep.surfaces[s].point_at(uv.x, uv.y),
                        };
                        let vertex = grid.find_or_add(&mut brep, at);
                        brep.add_singular_trim(c2_index, vertex, l, iso);
                        continue;
                    }
                };

                let start = grid.find_or_add(&mut brep, edge_curve.point_at_start());
                let end = grid.find_or_add(&mut brep, edge_curve.point_at_end());
                let key = (start.min(end), start.max(end));
                let shared = edges_by_ends.get(&key).and_then(|candidates| {
                    candidates.iter().find_map(|&e| {
                        let existing = &brep.curves3d[brep.edges[e].curve3d];
                        curve_overlap(&edge_curve, existing, OVERLAP_SAMPLES, tol).map(|rev| (e, rev))
                    })
                });
                match shared {
                    Some((e, reversed)) => {
                        brep.add_trim(c2_index, e, l, reversed, iso);
                    }
                    None => {
                        let c3_index = brep.add_curve3d(edge_curve);
                        let e = brep.add_edge(c3_index, start, end, tol);
                        edges_by_ends.entry(key).or_default().push(e);
                        brep.add_trim(c2_index, e, l, false, iso);
                    }
                }
            }
        }

        brep.set_trim_types();
        let (valid, problems) = brep.is_valid_with_log();
        if !valid {
            log.warn(format!("The trimmed surface was rebuilt into an invalid Brep: {}", problems.trim()));
        }
        brep
    }
}
