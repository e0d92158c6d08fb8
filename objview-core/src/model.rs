/// Mesh model: loading, validation, edge derivation and normalization
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use nalgebra::Point3;
use tracing::{debug, warn};

use crate::error::{ErrorCode, LoadError, LoadResult};
use crate::geometry::{Edge, Polygon, Vertex};
use crate::obj::{self, Record};

/// Bounding radius below which every vertex is treated as coincident
const DEGENERATE_RADIUS: f32 = 1e-6;

/// A polygonal mesh loaded from an OBJ-style file
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    path: PathBuf,
    vertices: Vec<Vertex>,
    polygons: Vec<Polygon>,
    last_error: ErrorCode,
    last_error_message: String,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a mesh from `path`, replacing any previous contents, and
    /// normalize it into the unit sphere.
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> LoadResult<()> {
        self.load_without_normalization(path)?;
        self.normalize();
        Ok(())
    }

    /// Same as [`Mesh::load`] but keeps the raw parsed coordinates.
    pub fn load_without_normalization<P: AsRef<Path>>(&mut self, path: P) -> LoadResult<()> {
        let path = path.as_ref();
        self.clear();
        self.path = path.to_path_buf();

        let file = match File::open(path) {
            Ok(file) => file,
            Err(source) => {
                return self.fail(LoadError::FileOpen {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        self.read_records(BufReader::new(file))
    }

    /// Run the load pipeline over an in-memory or already opened source.
    /// No normalization is applied.
    pub fn load_from_reader<R: BufRead>(&mut self, reader: R) -> LoadResult<()> {
        self.clear();
        self.read_records(reader)
    }

    fn read_records<R: BufRead>(&mut self, reader: R) -> LoadResult<()> {
        let mut has_valid_data = false;

        for (index, bytes) in reader.split(b'\n').enumerate() {
            let line_number = index + 1;
            let bytes = match bytes {
                Ok(bytes) => bytes,
                Err(source) => return self.fail(LoadError::Read { source }),
            };
            let line = String::from_utf8_lossy(&bytes);

            match obj::parse_line(&line, self.vertices.len()) {
                Ok(Record::Vertex(vertex)) => {
                    self.vertices.push(vertex);
                    has_valid_data = true;
                }
                Ok(Record::Face(indices)) => {
                    let polygon = Polygon::new(indices);
                    if polygon.is_valid(self.vertices.len()) {
                        self.polygons.push(polygon);
                        has_valid_data = true;
                    } else {
                        debug!(line = line_number, "dropping degenerate face");
                    }
                }
                Ok(Record::Blank | Record::Ignored) => {}
                Err(source) => {
                    let err = LoadError::InvalidLine {
                        line: line_number,
                        source,
                    };
                    warn!(path = %self.path.display(), error = %err, "skipping malformed line");
                    self.record_error(&err);
                }
            }
        }

        if !has_valid_data {
            return self.fail(LoadError::NoValidData);
        }

        // Final consistency gate; faces were already filtered on insertion.
        if !self.is_valid() {
            return self.fail(LoadError::InvalidMesh);
        }

        debug!(
            path = %self.path.display(),
            vertices = self.vertices.len(),
            polygons = self.polygons.len(),
            "mesh loaded"
        );
        Ok(())
    }

    fn fail(&mut self, err: LoadError) -> LoadResult<()> {
        self.vertices.clear();
        self.polygons.clear();
        self.record_error(&err);
        Err(err)
    }

    fn record_error(&mut self, err: &LoadError) {
        self.last_error = err.code();
        self.last_error_message = err.to_string();
    }

    /// Drop all geometry and error state.
    pub fn clear(&mut self) {
        self.path = PathBuf::new();
        self.vertices.clear();
        self.polygons.clear();
        self.last_error = ErrorCode::Success;
        self.last_error_message.clear();
    }

    pub fn last_error(&self) -> ErrorCode {
        self.last_error
    }

    pub fn last_error_message(&self) -> &str {
        &self.last_error_message
    }

    /// Path of the most recent load attempt.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Mutable access for in-place transforms. The vertex count cannot change
    /// through this view, so polygon indices stay in range.
    pub fn vertices_mut(&mut self) -> &mut [Vertex] {
        &mut self.vertices
    }

    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    /// Unique edges over all polygons, recomputed on every call.
    pub fn edges(&self) -> BTreeSet<Edge> {
        self.polygons.iter().flat_map(|polygon| polygon.edges()).collect()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn polygon_count(&self) -> usize {
        self.polygons.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges().len()
    }

    /// True when there is at least one vertex and every polygon is valid
    /// against the current vertex count.
    pub fn is_valid(&self) -> bool {
        !self.vertices.is_empty()
            && self
                .polygons
                .iter()
                .all(|polygon| polygon.is_valid(self.vertices.len()))
    }

    /// Axis-aligned bounding box as (min, max), or `None` for an empty mesh.
    pub fn bounds(&self) -> Option<(Point3<f32>, Point3<f32>)> {
        let first = self.vertices.first()?.position;
        Some(
            self.vertices
                .iter()
                .fold((first, first), |(min, max), vertex| {
                    (min.inf(&vertex.position), max.sup(&vertex.position))
                }),
        )
    }

    /// Recenter on the bounding-box midpoint and scale so the box's
    /// half-diagonal becomes 1.
    pub fn normalize(&mut self) {
        let Some((min, max)) = self.bounds() else {
            return;
        };

        let center = nalgebra::center(&min, &max);
        let mut radius = (max - min).norm() * 0.5;
        if radius < DEGENERATE_RADIUS {
            radius = 1.0;
        }
        let scale = 1.0 / radius;

        for vertex in &mut self.vertices {
            vertex.position = Point3::from((vertex.position - center) * scale);
        }
    }

    /// An axis-aligned cube of edge length `size` centered at the origin,
    /// with one quad per side.
    pub fn cube(size: f32) -> Self {
        let half = size / 2.0;
        let vertices = vec![
            Vertex::new(-half, -half, -half),
            Vertex::new(half, -half, -half),
            Vertex::new(half, half, -half),
            Vertex::new(-half, half, -half),
            Vertex::new(-half, -half, half),
            Vertex::new(half, -half, half),
            Vertex::new(half, half, half),
            Vertex::new(-half, half, half),
        ];
        let polygons = [
            [0, 3, 2, 1], // back
            [4, 5, 6, 7], // front
            [0, 1, 5, 4], // bottom
            [3, 7, 6, 2], // top
            [0, 4, 7, 3], // left
            [1, 2, 6, 5], // right
        ]
        .into_iter()
        .map(|quad| Polygon::new(quad.to_vec()))
        .collect();

        Self {
            vertices,
            polygons,
            ..Self::default()
        }
    }
}
