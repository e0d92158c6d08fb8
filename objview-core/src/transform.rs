/// In-place geometric transforms over a mesh's vertex buffer
use nalgebra::Vector3;
use tracing::debug;

use crate::geometry::Vertex;
use crate::model::Mesh;

/// A one-shot transform. Applying it mutates vertices and leaves no record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transform {
    /// Offset every vertex.
    Translate { dx: f32, dy: f32, dz: f32 },
    /// Rotate about X, then Y, then Z. Angles are in degrees.
    Rotate { ax: f32, ay: f32, az: f32 },
    /// Uniform scale about the origin. Non-positive factors are ignored.
    Scale { factor: f32 },
}

impl Transform {
    pub fn translate(dx: f32, dy: f32, dz: f32) -> Self {
        Self::Translate { dx, dy, dz }
    }

    pub fn rotate(ax: f32, ay: f32, az: f32) -> Self {
        Self::Rotate { ax, ay, az }
    }

    pub fn scale(factor: f32) -> Self {
        Self::Scale { factor }
    }

    /// Apply to every vertex of `mesh`.
    pub fn apply(&self, mesh: &mut Mesh) {
        let vertices = mesh.vertices_mut();
        match *self {
            Self::Translate { dx, dy, dz } => {
                let offset = Vector3::new(dx, dy, dz);
                for vertex in vertices {
                    vertex.position.coords += offset;
                }
            }
            Self::Rotate { ax, ay, az } => rotate_vertices(vertices, ax, ay, az),
            Self::Scale { factor } => {
                if factor <= 0.0 || factor.is_nan() {
                    debug!(factor, "ignoring non-positive scale");
                    return;
                }
                for vertex in vertices {
                    vertex.position.coords *= factor;
                }
            }
        }
    }
}

/// Apply `op` to the mesh if there is one.
pub fn apply(mesh: Option<&mut Mesh>, op: Transform) {
    if let Some(mesh) = mesh {
        op.apply(mesh);
    }
}

fn rotate_vertices(vertices: &mut [Vertex], ax: f32, ay: f32, az: f32) {
    let (ax, ay, az) = (ax.to_radians(), ay.to_radians(), az.to_radians());

    // Zero angles are skipped entirely; coordinates must stay bit-identical.
    for vertex in vertices {
        let p = &mut vertex.position;
        if ax != 0.0 {
            let (y, z) = rotate_pair(p.y, p.z, ax);
            p.y = y;
            p.z = z;
        }
        if ay != 0.0 {
            let (z, x) = rotate_pair(p.z, p.x, ay);
            p.z = z;
            p.x = x;
        }
        if az != 0.0 {
            let (x, y) = rotate_pair(p.x, p.y, az);
            p.x = x;
            p.y = y;
        }
    }
}

/// 2D rotation of the pair (a, b) by `angle` radians.
fn rotate_pair(a: f32, b: f32, angle: f32) -> (f32, f32) {
    let (sin, cos) = angle.sin_cos();
    (a * cos - b * sin, a * sin + b * cos)
}
