//! # Voxel Data
//!
//! This module contains the voxel data model: what a block is, how blocks are
//! stored in chunks, how chunks are filled and how they are indexed in space.
//!
//! ## Architecture
//!
//! * **Block**: single-byte block ids, named block types and face directions
//! * **Chunk**: fixed-size 3D arrays of blocks with change tracking
//! * **Terrain**: fills new chunks from fractal noise or debug patterns
//! * **World**: the ordered index from chunk coordinates to shared chunks
//!
//! ## Data Flow
//!
//! 1. The engine asks the world for chunks around a centre coordinate
//! 2. Missing chunks are produced by the terrain generator and stored
//! 3. Edits mark a chunk changed, which makes its cached mesh stale
//! 4. The mesher reads chunks (and, optionally, their neighbours) to build meshes
//!
//! ## Threading
//!
//! Everything here runs on the caller's thread. Chunks are shared through
//! [`crate::core::StResource`], one lock per chunk.

pub mod block;
pub mod chunk;
pub mod terrain;
pub mod world;
