// Integration tests for loading OBJ files from disk

use std::fs;
use std::path::{Path, PathBuf};

use approx::assert_relative_eq;
use objview_core::{Edge, ErrorCode, LoadError, Mesh, MeshHolder, Transform, Vertex};
use tempfile::TempDir;

fn write_obj(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn load_raw(path: &Path) -> Mesh {
    let mut mesh = Mesh::new();
    mesh.load_without_normalization(path).unwrap();
    mesh
}

fn snapshot(mesh: &Mesh) -> Vec<Vertex> {
    mesh.vertices().to_vec()
}

const TETRAHEDRON: &str = "\
# tetrahedron
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 0.0 1.0 0.0
v 0.0 0.0 1.0
f 1 2 3
f 1 2 4
f 1 3 4
f 2 3 4
";

#[test]
fn integration_load_well_formed_file() {
    let dir = TempDir::new().unwrap();
    let path = write_obj(&dir, "tetra.obj", TETRAHEDRON);

    let mesh = load_raw(&path);
    assert_eq!(mesh.vertex_count(), 4);
    assert_eq!(mesh.polygon_count(), 4);
    assert_eq!(mesh.edge_count(), 6);
    assert_eq!(mesh.path(), path.as_path());
    assert_eq!(mesh.last_error(), ErrorCode::Success);
    assert_eq!(mesh.vertices()[3], Vertex::new(0.0, 0.0, 1.0));
}

#[test]
fn integration_nonexistent_file() {
    let dir = TempDir::new().unwrap();
    let mut mesh = Mesh::new();

    let result = mesh.load(dir.path().join("missing.obj"));
    assert!(matches!(result, Err(LoadError::FileOpen { .. })));
    assert_eq!(mesh.last_error(), ErrorCode::FileOpenError);
    assert!(mesh.last_error_message().starts_with("failed to open file"));
    assert_eq!(mesh.vertex_count(), 0);
    assert!(mesh.polygons().is_empty());
}

#[test]
fn integration_empty_file() {
    let dir = TempDir::new().unwrap();
    let path = write_obj(&dir, "empty.obj", "");

    let mut mesh = Mesh::new();
    assert!(mesh.load(&path).is_err());
    assert_eq!(mesh.last_error(), ErrorCode::NoValidData);
    assert_eq!(mesh.vertex_count(), 0);
}

#[test]
fn integration_only_invalid_lines() {
    let dir = TempDir::new().unwrap();
    let path = write_obj(
        &dir,
        "invalid.obj",
        "v 1.0 2.0\nv abc def ghi\nf 1 2 3 4\nf a b c\nf -1 2 3\nf 1 2 3 4 5\n",
    );

    let mut mesh = Mesh::new();
    assert!(mesh.load(&path).is_err());
    assert_eq!(mesh.last_error(), ErrorCode::NoValidData);
    assert!(mesh.vertices().is_empty());
    assert!(mesh.polygons().is_empty());
}

#[test]
fn integration_faces_filtered_by_validity() {
    let dir = TempDir::new().unwrap();
    let path = write_obj(
        &dir,
        "mixed.obj",
        "v 0 0 0\nv 1 0 0\nv 1 1 0\nf 1 2 3\nf 1 1 1\nf 1 2 2\nf 1 2 4\nv 0 1 0\nf 1 2 3 4\n",
    );

    let mut mesh = Mesh::new();
    assert!(mesh.load_without_normalization(&path).is_ok());
    assert_eq!(mesh.vertex_count(), 4);
    // `f 1 2 4` referenced a vertex that had not been read yet
    let faces: Vec<Vec<usize>> = mesh
        .polygons()
        .iter()
        .map(|p| p.vertex_indices.clone())
        .collect();
    assert_eq!(faces, vec![vec![0, 1, 2], vec![0, 1, 2, 3]]);
    assert_eq!(mesh.last_error(), ErrorCode::InvalidData);
    assert_eq!(mesh.last_error_message(), "error at line 7: invalid face index: 4");
}

#[test]
fn integration_face_suffixes_and_crlf() {
    let dir = TempDir::new().unwrap();
    let path = write_obj(
        &dir,
        "suffix.obj",
        "v 0 0 0\r\nv 1 0 0\r\nv 1 1 0\r\nvt 0 0\r\nvn 0 0 1\r\nf 1/1/1 2/1/1 3//1\r\n",
    );

    let mesh = load_raw(&path);
    assert_eq!(mesh.polygon_count(), 1);
    assert_eq!(mesh.polygons()[0].vertex_indices, vec![0, 1, 2]);
    assert_eq!(mesh.last_error(), ErrorCode::Success);
}

#[test]
fn integration_edges_triangle_and_quad() {
    let dir = TempDir::new().unwrap();
    let tri = write_obj(&dir, "tri.obj", "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n");
    let quad = write_obj(
        &dir,
        "quad.obj",
        "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n",
    );

    let edges: Vec<Edge> = load_raw(&tri).edges().into_iter().collect();
    assert_eq!(edges, vec![Edge(0, 1), Edge(0, 2), Edge(1, 2)]);

    let edges: Vec<Edge> = load_raw(&quad).edges().into_iter().collect();
    assert_eq!(edges, vec![Edge(0, 1), Edge(0, 3), Edge(1, 2), Edge(2, 3)]);
}

#[test]
fn integration_load_normalizes() {
    let dir = TempDir::new().unwrap();
    let path = write_obj(&dir, "box.obj", "v 10 20 30\nv 14 26 42\nv 12 20 30\nf 1 2 3\n");

    let mut mesh = Mesh::new();
    mesh.load(&path).unwrap();

    let (min, max) = mesh.bounds().unwrap();
    assert_relative_eq!((max - min).norm() * 0.5, 1.0, epsilon = 1e-5);
    let center = nalgebra::center(&min, &max);
    assert_relative_eq!(center.coords.norm(), 0.0, epsilon = 1e-5);
}

#[test]
fn integration_non_finite_vertices_do_not_poison_normalize() {
    let dir = TempDir::new().unwrap();
    let path = write_obj(
        &dir,
        "overflow.obj",
        "v 1e39 0 0\nv inf 0 0\nv nan 0 0\nv 0 0 0\nv 1 1 1\nf 1 2 3\n",
    );

    let mut mesh = Mesh::new();
    mesh.load(&path).unwrap();
    assert_eq!(mesh.last_error(), ErrorCode::InvalidData);
    assert_eq!(mesh.vertex_count(), 2);

    for vertex in mesh.vertices() {
        assert!(vertex.x().is_finite() && vertex.y().is_finite() && vertex.z().is_finite());
    }
    let (min, max) = mesh.bounds().unwrap();
    assert_relative_eq!((max - min).norm() * 0.5, 1.0, epsilon = 1e-5);
}

#[test]
fn integration_translate_is_invertible() {
    let dir = TempDir::new().unwrap();
    let path = write_obj(&dir, "tetra.obj", TETRAHEDRON);
    let mut mesh = load_raw(&path);
    let before = snapshot(&mesh);

    Transform::translate(1.5, -2.25, 0.75).apply(&mut mesh);
    assert_ne!(snapshot(&mesh), before);
    Transform::translate(-1.5, 2.25, -0.75).apply(&mut mesh);
    assert_eq!(snapshot(&mesh), before);
}

#[test]
fn integration_scale_is_invertible() {
    let dir = TempDir::new().unwrap();
    let path = write_obj(&dir, "tetra.obj", TETRAHEDRON);
    let mut mesh = load_raw(&path);
    let before = snapshot(&mesh);

    Transform::scale(4.0).apply(&mut mesh);
    Transform::scale(0.25).apply(&mut mesh);
    assert_eq!(snapshot(&mesh), before);

    Transform::scale(0.0).apply(&mut mesh);
    Transform::scale(-1.0).apply(&mut mesh);
    assert_eq!(snapshot(&mesh), before);
}

#[test]
fn integration_holder_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = write_obj(&dir, "tetra.obj", TETRAHEDRON);

    let mut holder = MeshHolder::new();
    holder.apply(Transform::scale(2.0));
    assert!(holder.current_mesh().is_none());

    holder.load_without_normalization(&path).unwrap();
    assert_eq!(holder.vertex_count(), 4);
    assert_eq!(holder.edge_count(), 6);

    holder.apply(Transform::rotate(0.0, 0.0, 90.0));
    let mesh = holder.current_mesh().unwrap();
    assert_eq!(mesh.vertices()[1], Vertex::new(0.0, 1.0, 0.0));

    holder.load(dir.path().join("gone.obj")).unwrap_err();
    assert_eq!(holder.vertex_count(), 0);
    assert!(holder.last_error_message().contains("gone.obj"));
}
