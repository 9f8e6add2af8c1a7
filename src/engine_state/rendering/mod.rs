//! Rendering-side data for the voxel engine.
//!
//! This module turns chunks into GPU-ready geometry without touching a GPU:
//! the vertex layouts a pipeline binds, the per-block texture atlas table and
//! the mesher with its cache. Uploading buffers and issuing draws is left to
//! whatever graphics layer consumes the meshes.

pub mod meshing;
pub mod texture_atlas;
pub mod vertex;

// Re-export commonly used types
pub use meshing::{ChunkMesher, Mesh, MeshManager, MeshOptions};
pub use texture_atlas::{TextureAtlas, TextureMap, TextureRect};
pub use vertex::{DebugVertex, Vertex};
