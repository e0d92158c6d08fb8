//! objview core library - mesh loading, validation and transforms
//!
//! Parses the line-oriented OBJ-style text format into a vertex and polygon
//! buffer, checks it for consistency, derives the unique edge set and applies
//! in-place translate, rotate and scale operations.

pub mod error;
pub mod geometry;
pub mod holder;
pub mod model;
pub mod obj;
pub mod transform;

// Re-export commonly used types
pub use error::{ErrorCode, LoadError, LoadResult, ParseError};
pub use geometry::{Edge, Polygon, Vertex, VERTEX_EPSILON};
pub use holder::MeshHolder;
pub use model::Mesh;
pub use transform::Transform;
