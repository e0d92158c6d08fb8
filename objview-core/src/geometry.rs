/// Geometry primitives for polygonal meshes
use std::collections::BTreeSet;

use approx::AbsDiffEq;
use nalgebra::Point3;

/// Per-coordinate tolerance used when comparing vertices
pub const VERTEX_EPSILON: f32 = 1e-6;

/// A 3D vertex position
#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    pub position: Point3<f32>,
}

impl Vertex {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            position: Point3::new(x, y, z),
        }
    }

    pub fn x(&self) -> f32 {
        self.position.x
    }

    pub fn y(&self) -> f32 {
        self.position.y
    }

    pub fn z(&self) -> f32 {
        self.position.z
    }
}

/// Vertices compare equal when every coordinate is within [`VERTEX_EPSILON`].
impl PartialEq for Vertex {
    fn eq(&self, other: &Self) -> bool {
        self.position.abs_diff_eq(&other.position, VERTEX_EPSILON)
    }
}

/// A face given by an ordered list of 0-based vertex indices
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Polygon {
    pub vertex_indices: Vec<usize>,
}

impl Polygon {
    pub fn new(vertex_indices: Vec<usize>) -> Self {
        Self { vertex_indices }
    }

    /// A polygon is valid when it references at least three distinct
    /// vertices and every index is below `vertex_count`.
    pub fn is_valid(&self, vertex_count: usize) -> bool {
        if self.vertex_indices.len() < 3 {
            return false;
        }

        let mut unique = BTreeSet::new();
        for &index in &self.vertex_indices {
            if index >= vertex_count {
                return false;
            }
            unique.insert(index);
        }

        unique.len() >= 3
    }

    /// Consecutive index pairs, including the closing pair (last, first).
    /// Pairs that repeat the same index are skipped.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        let n = self.vertex_indices.len();
        (0..n).filter_map(move |i| {
            let start = self.vertex_indices[i];
            let end = self.vertex_indices[(i + 1) % n];
            (start != end).then(|| Edge::new(start, end))
        })
    }
}

/// An unordered pair of vertex indices, stored as (min, max)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge(pub usize, pub usize);

impl Edge {
    pub fn new(a: usize, b: usize) -> Self {
        if a <= b {
            Self(a, b)
        } else {
            Self(b, a)
        }
    }
}
