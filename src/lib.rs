#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel Terrain
//!
//! Procedural voxel terrain and face-culling chunk meshing.
//!
//! This crate fills fixed-size chunks from fractal gradient noise, keeps them
//! in a sparse world index, and converts them into flat, non-indexed triangle
//! lists that a graphics pipeline can upload as-is.
//!
//! ## Key Modules
//!
//! * `noise_field` - Gradient noise and fractal sampling
//! * `engine_state` - Voxel data, terrain generation, meshing and the headless coordinator
//! * `core` - Shared-ownership resource container
//! * `config` - JSON engine configuration
//! * `error` - The crate-wide error type
//!
//! ## Usage
//!
//! ```rust
//! use voxel_terrain::{ChunkMesher, TerrainGenerator, TextureAtlas};
//!
//! let chunk = TerrainGenerator::default().generate_chunk(0, 0, 0);
//! let mesh = ChunkMesher::default()
//!     .build_mesh(&chunk, &TextureAtlas::standard())
//!     .unwrap();
//! assert_eq!(mesh.vertex_count(), mesh.face_count() * 6);
//! ```
//!
//! The binary runs one headless load-and-mesh pass:
//!
//! ```bash
//! RUST_LOG=debug VOXEL_TERRAIN_CONFIG=terrain.json cargo run --release
//! ```

use log::info;

pub mod config;
pub mod core;
pub mod engine_state;
pub mod error;
pub mod noise_field;

pub use config::EngineConfig;
pub use engine_state::{
    rendering::{ChunkMesher, Mesh, MeshManager, TextureAtlas, Vertex},
    voxels::{
        block::Block,
        chunk::Chunk,
        terrain::TerrainGenerator,
        world::{ChunkCoord, World},
    },
    DrawItem, EngineState,
};
pub use error::{VoxelError, VoxelResult};

/// Initialises logging, loads the config named by `VOXEL_TERRAIN_CONFIG`
/// (or the defaults) and performs one load-and-mesh pass around the origin.
pub fn run() -> VoxelResult<()> {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();
    info!("Logger initialized");

    let config = EngineConfig::from_env()?;
    let mut state = EngineState::new(config)?;

    let center = ChunkCoord::default();
    let generated = state.load_chunks_around(center);
    let draw_list = state.build_draw_list(center)?;

    let faces: usize = draw_list.iter().map(|item| item.mesh.face_count()).sum();
    let vertices: usize = draw_list.iter().map(|item| item.mesh.vertex_count()).sum();
    info!(
        "Generated {generated} chunks, meshed {} chunks: {faces} faces, {vertices} vertices ({} bytes)",
        draw_list.len(),
        vertices * Vertex::STRIDE
    );
    Ok(())
}
