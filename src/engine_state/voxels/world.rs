//! # World Module
//!
//! This module provides the `World` struct, the sparse index from chunk-grid
//! coordinates to shared chunks.
//!
//! ## Ownership
//!
//! Each entry holds a [`SharedChunk`] handle. Removing an entry only drops
//! the world's handle; a mesher or renderer still holding a clone keeps the
//! chunk alive until it lets go.
//!
//! ## Ordering
//!
//! Chunks are kept in a `BTreeMap`, so iteration visits coordinates in
//! lexicographic `(x, y, z)` order and is reproducible between runs.

use std::collections::BTreeMap;

use cgmath::Point3;
use serde::{Deserialize, Serialize};

use super::{
    block::{block_side::BlockSide, Block},
    chunk::{Chunk, CHUNK_HEIGHT, CHUNK_LENGTH},
    terrain::TerrainGenerator,
};
use crate::core::StResource;

/// A chunk shared between the world index and its current consumers.
pub type SharedChunk = StResource<Chunk>;

/// Position of a chunk in chunk-grid space (not block space).
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct ChunkCoord {
    /// Grid x.
    pub x: i32,
    /// Grid y.
    pub y: i32,
    /// Grid z.
    pub z: i32,
}

impl ChunkCoord {
    /// Creates a coordinate.
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        ChunkCoord { x, y, z }
    }

    /// The coordinate of the chunk adjacent on `side`.
    ///
    /// Returns `None` when the step would leave the `i32` grid.
    pub fn neighbor(self, side: BlockSide) -> Option<Self> {
        let [dx, dy, dz] = side.normal();
        self.offset(dx, dy, dz)
    }

    /// The coordinate `(dx, dy, dz)` chunks away, or `None` past the grid edge.
    pub fn offset(self, dx: i32, dy: i32, dz: i32) -> Option<Self> {
        Some(ChunkCoord::new(
            self.x.checked_add(dx)?,
            self.y.checked_add(dy)?,
            self.z.checked_add(dz)?,
        ))
    }

    /// Block-space position of this chunk's `(0, 0, 0)` block.
    ///
    /// Widened to `i64` since block space spans sixteen times the grid.
    pub fn block_origin(self) -> [i64; 3] {
        [
            i64::from(self.x) * CHUNK_LENGTH as i64,
            i64::from(self.y) * CHUNK_LENGTH as i64,
            i64::from(self.z) * CHUNK_HEIGHT as i64,
        ]
    }

    /// Chebyshev distance to `other`, in chunks.
    pub fn chebyshev_distance(self, other: ChunkCoord) -> u32 {
        self.x
            .abs_diff(other.x)
            .max(self.y.abs_diff(other.y))
            .max(self.z.abs_diff(other.z))
    }

    /// Every coordinate within `radius` chunks of `self` on each axis,
    /// in ascending order. Coordinates past the `i32` grid are skipped.
    pub fn cube_around(self, radius: i32) -> impl Iterator<Item = ChunkCoord> {
        (-radius..=radius).flat_map(move |dx| {
            (-radius..=radius).flat_map(move |dy| {
                (-radius..=radius).filter_map(move |dz| self.offset(dx, dy, dz))
            })
        })
    }
}

impl From<Point3<i32>> for ChunkCoord {
    fn from(point: Point3<i32>) -> Self {
        ChunkCoord::new(point.x, point.y, point.z)
    }
}

impl From<ChunkCoord> for Point3<i32> {
    fn from(coord: ChunkCoord) -> Self {
        Point3::new(coord.x, coord.y, coord.z)
    }
}

/// Answers block queries that may cross chunk boundaries.
///
/// The mesher uses this to look past a chunk's own edge when seam-aware
/// culling is enabled.
pub trait NeighborLookup {
    /// The block at chunk-local `(x, y, z)` relative to the chunk at `coord`.
    ///
    /// Coordinates outside `[0,L) x [0,L) x [0,H)` resolve into the adjacent
    /// chunk. Returns `None` when that chunk is not loaded.
    fn block_near(&self, coord: ChunkCoord, x: i32, y: i32, z: i32) -> Option<Block>;
}

/// Represents a voxel world composed of multiple chunks.
///
/// # Examples
///
/// ```
/// use voxel_terrain::{Chunk, ChunkCoord, World};
///
/// let mut world = World::new();
/// let origin = ChunkCoord::new(0, 0, 0);
/// world.insert_chunk(origin, Chunk::empty());
///
/// assert!(world.chunk_at(origin).is_some());
/// world.remove_chunk(origin);
/// assert!(world.chunk_at(origin).is_none());
/// ```
#[derive(Default, Debug)]
pub struct World {
    chunks: BTreeMap<ChunkCoord, SharedChunk>,
}

impl World {
    /// Creates a new, empty world.
    pub fn new() -> Self {
        World {
            chunks: BTreeMap::new(),
        }
    }

    /// Retrieves a handle to the chunk at `coord`, or `None` if absent.
    pub fn chunk_at(&self, coord: ChunkCoord) -> Option<SharedChunk> {
        self.chunks.get(&coord).cloned()
    }

    /// Inserts `chunk` at `coord`, replacing and returning any previous entry.
    pub fn set_chunk(&mut self, coord: ChunkCoord, chunk: SharedChunk) -> Option<SharedChunk> {
        self.chunks.insert(coord, chunk)
    }

    /// Wraps `chunk` in a shared handle and stores it at `coord`.
    pub fn insert_chunk(&mut self, coord: ChunkCoord, chunk: Chunk) -> SharedChunk {
        let shared = StResource::new(chunk);
        self.set_chunk(coord, shared.clone());
        shared
    }

    /// Removes the entry at `coord`, returning the world's handle if any.
    pub fn remove_chunk(&mut self, coord: ChunkCoord) -> Option<SharedChunk> {
        self.chunks.remove(&coord)
    }

    /// Generates and stores a chunk at `coord` unless one is already present.
    ///
    /// Returns `true` if a chunk was generated.
    pub fn add_chunk_at(&mut self, coord: ChunkCoord, generator: &TerrainGenerator) -> bool {
        if self.chunks.contains_key(&coord) {
            return false;
        }
        let chunk = generator.generate_chunk(coord.x, coord.y, coord.z);
        self.insert_chunk(coord, chunk);
        true
    }

    /// Whether a chunk is stored at `coord`.
    pub fn contains(&self, coord: ChunkCoord) -> bool {
        self.chunks.contains_key(&coord)
    }

    /// Number of stored chunks.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// `true` when no chunks are stored.
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Stored coordinates in ascending order.
    pub fn coords(&self) -> impl Iterator<Item = ChunkCoord> + '_ {
        self.chunks.keys().copied()
    }

    /// Stored entries in ascending coordinate order.
    pub fn iter(&self) -> impl Iterator<Item = (ChunkCoord, &SharedChunk)> + '_ {
        self.chunks.iter().map(|(coord, chunk)| (*coord, chunk))
    }
}

impl NeighborLookup for World {
    fn block_near(&self, coord: ChunkCoord, x: i32, y: i32, z: i32) -> Option<Block> {
        let length = CHUNK_LENGTH as i32;
        let height = CHUNK_HEIGHT as i32;
        let target = coord.offset(
            x.div_euclid(length),
            y.div_euclid(length),
            z.div_euclid(height),
        )?;
        let chunk = self.chunks.get(&target)?;
        let block = chunk.get().try_block_at(
            x.rem_euclid(length),
            y.rem_euclid(length),
            z.rem_euclid(height),
        );
        block
    }
}
