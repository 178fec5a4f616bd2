//! Generic polygon mesh

use super::primitives::Point;

/// Triangle (`d` is None) or quad referencing mesh vertices by index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Face {
    pub a: usize,
    pub b: usize,
    pub c: usize,
    pub d: Option<usize>,
}

impl Face {
    pub fn triangle(a: usize, b: usize, c: usize) -> Self {
        Face { a, b, c, d: None }
    }

    pub fn quad(a: usize, b: usize, c: usize, d: usize) -> Self {
        Face { a, b, c, d: Some(d) }
    }

    pub fn is_quad(&self) -> bool {
        self.d.is_some()
    }

    pub fn indices(&self) -> Vec<usize> {
        let mut indices = vec![self.a, self.b, self.c];
        indices.extend(self.d);
        indices
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mesh {
    pub vertices: Vec<Point>,
    pub faces: Vec<Face>,
}

impl Mesh {
    pub fn new(vertices: Vec<Point>, faces: Vec<Face>) -> Self {
        Mesh { vertices, faces }
    }
}
