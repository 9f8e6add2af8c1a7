//! Mesh generation for voxel rendering.
//!
//! This module converts chunk data into flat triangle lists, culling every
//! face that another block in the chunk hides.
//!
//! # Architecture
//! - [`ChunkMesher`]: walks a chunk and emits its visible faces
//! - [`Face`]: a single quad with its block, side and extent
//! - [`Mesh`]: the resulting faces and vertex buffer
//! - Face merging: an optional post-pass joining coplanar runs of faces
//!
//! # Usage
//! ```
//! use voxel_terrain::engine_state::{
//!     rendering::{meshing::ChunkMesher, texture_atlas::TextureAtlas},
//!     voxels::{block::Block, chunk::Chunk},
//! };
//!
//! let chunk = Chunk::filled(Block::from_id(1));
//! let mesh = ChunkMesher::default()
//!     .build_mesh(&chunk, &TextureAtlas::standard())
//!     .unwrap();
//! assert_eq!(mesh.vertex_count(), 9216);
//! ```

mod face;
mod greedy;
#[allow(clippy::module_inception)]
mod mesh;

pub use face::Face;
pub use greedy::merge_faces;
pub use mesh::*;
