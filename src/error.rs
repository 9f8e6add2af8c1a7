//! # Error Module
//!
//! Errors raised by chunk access, texture lookups and configuration loading.
//! Noise sampling is infallible and world lookups report absence through
//! `Option`, so neither appears here.

use thiserror::Error;

use crate::engine_state::voxels::block::BlockId;

/// Errors that can occur while generating, storing or meshing voxel data.
#[derive(Error, Debug)]
pub enum VoxelError {
    /// A chunk-local coordinate fell outside `[0,L) x [0,L) x [0,H)`.
    #[error("chunk-local coordinate ({x}, {y}, {z}) is out of range")]
    IndexOutOfRange {
        /// Requested x coordinate.
        x: i64,
        /// Requested y coordinate.
        y: i64,
        /// Requested z coordinate.
        z: i64,
    },

    /// A texture lookup was attempted for an air block.
    #[error("air (block id 0) has no texture map")]
    AirHasNoTexture,

    /// The texture atlas table does not cover the requested block id.
    #[error("no texture map for block id {block_id} (table covers ids 1..={populated})")]
    MissingTextureMap {
        /// The block id that was looked up.
        block_id: BlockId,
        /// Number of populated entries in the table.
        populated: usize,
    },

    /// Configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Reading a configuration or atlas file failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration or atlas file was not valid JSON for its schema.
    #[error("malformed json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for voxel operations.
pub type VoxelResult<T> = Result<T, VoxelError>;
