/// Owner of the single active mesh
use std::path::Path;

use tracing::debug;

use crate::error::LoadResult;
use crate::model::Mesh;
use crate::transform::Transform;

/// Holds at most one mesh and hands it to whoever needs it.
///
/// There is no internal locking. Load and transform calls are expected to
/// come from one thread in sequence; a multi-threaded host has to wrap the
/// holder in its own lock.
#[derive(Debug, Default)]
pub struct MeshHolder {
    mesh: Option<Mesh>,
}

impl MeshHolder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start out holding an already built mesh.
    pub fn with_mesh(mesh: Mesh) -> Self {
        Self { mesh: Some(mesh) }
    }

    pub fn current_mesh(&self) -> Option<&Mesh> {
        self.mesh.as_ref()
    }

    pub fn current_mesh_mut(&mut self) -> Option<&mut Mesh> {
        self.mesh.as_mut()
    }

    /// Replace the held mesh with one freshly loaded (and normalized) from
    /// `path`. The new mesh is kept even when loading fails so its error
    /// state can be inspected.
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> LoadResult<()> {
        self.replace_with(|mesh| mesh.load(path))
    }

    /// Like [`MeshHolder::load`] without normalization.
    pub fn load_without_normalization<P: AsRef<Path>>(&mut self, path: P) -> LoadResult<()> {
        self.replace_with(|mesh| mesh.load_without_normalization(path))
    }

    fn replace_with<F>(&mut self, load: F) -> LoadResult<()>
    where
        F: FnOnce(&mut Mesh) -> LoadResult<()>,
    {
        let mesh = self.mesh.insert(Mesh::new());
        load(mesh)
    }

    /// Discard the held mesh.
    pub fn reset(&mut self) {
        self.mesh = None;
    }

    /// Apply `op` to the held mesh. Without a mesh this does nothing.
    pub fn apply(&mut self, op: Transform) {
        match self.mesh.as_mut() {
            Some(mesh) => op.apply(mesh),
            None => debug!(?op, "no mesh loaded, transform skipped"),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.mesh.as_ref().map_or(0, Mesh::vertex_count)
    }

    pub fn edge_count(&self) -> usize {
        self.mesh.as_ref().map_or(0, Mesh::edge_count)
    }

    pub fn last_error_message(&self) -> &str {
        self.mesh
            .as_ref()
            .map_or("no mesh loaded", Mesh::last_error_message)
    }
}
