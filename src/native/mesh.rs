//! Native polygon mesh

use crate::types::Vector3;
use ahash::AHashMap;

/// Mesh face; a triangle repeats its third index (`c == d`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshFace {
    pub a: usize,
    pub b: usize,
    pub c: usize,
    pub d: usize,
}

impl MeshFace {
    pub fn triangle(a: usize, b: usize, c: usize) -> Self {
        MeshFace { a, b, c, d: c }
    }

    pub fn quad(a: usize, b: usize, c: usize, d: usize) -> Self {
        MeshFace { a, b, c, d }
    }

    pub fn is_quad(&self) -> bool {
        self.c != self.d
    }

    pub fn is_triangle(&self) -> bool {
        !self.is_quad()
    }

    /// Corner indices in order (3 or 4 of them)
    pub fn indices(&self) -> Vec<usize> {
        if self.is_quad() {
            vec![self.a, self.b, self.c, self.d]
        } else {
            vec![self.a, self.b, self.c]
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mesh {
    pub vertices: Vec<Vector3>,
    pub faces: Vec<MeshFace>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_vertex(&mut self, p: Vector3) -> usize {
        self.vertices.push(p);
        self.vertices.len() - 1
    }

    pub fn add_face(&mut self, face: MeshFace) -> usize {
        self.faces.push(face);
        self.faces.len() - 1
    }

    /// True when every face index refers to an existing vertex
    pub fn is_valid(&self) -> bool {
        let n = self.vertices.len();
        !self.vertices.is_empty()
            && self
                .faces
                .iter()
                .all(|f| f.a < n && f.b < n && f.c < n && f.d < n)
    }

    /// Vertex index pairs of edges used by exactly one face
    pub fn naked_edges(&self) -> Vec<(usize, usize)> {
        let mut uses: AHashMap<(usize, usize), usize> = AHashMap::new();
        let mut order = Vec::new();
        for face in &self.faces {
            let idx = face.indices();
            for k in 0..idx.len() {
                let (a, b) = (idx[k], idx[(k + 1) % idx.len()]);
                let key = (a.min(b), a.max(b));
                let count = uses.entry(key).or_insert(0);
                if *count == 0 {
                    order.push((a, b));
                }
                *count += 1;
            }
        }
        order
            .into_iter()
            .filter(|(a, b)| uses.get(&((*a).min(*b), (*a).max(*b))) == Some(&1))
            .collect()
    }

    pub fn is_closed(&self) -> bool {
        !self.faces.is_empty() && self.naked_edges().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_triangles() -> Mesh {
        let mut m = Mesh::new();
        for p in [Vector3::ZERO, Vector3::UNIT_X, Vector3::new(1.0, 1.0, 0.0), Vector3::UNIT_Y] {
            m.add_vertex(p);
        }
        m.add_face(MeshFace::triangle(0, 1, 2));
        m.add_face(MeshFace::triangle(0, 2, 3));
        m
    }

    #[test]
    fn test_face_kinds() {
        assert!(MeshFace::quad(0, 1, 2, 3).is_quad());
        assert!(MeshFace::triangle(0, 1, 2).is_triangle());
        assert_eq!(MeshFace::triangle(4, 5, 6).indices(), vec![4, 5, 6]);
    }

    #[test]
    fn test_naked_edges() {
        let m = two_triangles();
        assert_eq!(m.naked_edges().len(), 4);
        assert!(!m.is_closed());
        assert!(m.is_valid());
    }

    #[test]
    fn test_out_of_range_is_invalid() {
        let mut m = two_triangles();
        m.add_face(MeshFace::triangle(0, 1, 9));
        assert!(!m.is_valid());
    }
}
