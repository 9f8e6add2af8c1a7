//! # Chunk Module
//!
//! This module provides the `Chunk` struct: a dense, fixed-size grid of
//! block ids plus the bookkeeping the mesh cache needs.
//!
//! ## Storage
//!
//! Every chunk holds exactly `CHUNK_LENGTH * CHUNK_LENGTH * CHUNK_HEIGHT`
//! blocks addressed by [`Chunk::idx`]:
//!
//! ```text
//! idx(x, y, z) = x * L * H + y * H + z
//! ```
//!
//! so `z` (height) varies fastest. Holes are stored as air, never as gaps.
//!
//! ## Change tracking
//!
//! * `changed` - set by any mutation, cleared once a mesh has been built
//! * `stamp` - a process-wide unique value refreshed on every mutation, so a
//!   cached mesh can tell its chunk apart from a replacement chunk

use std::{
    cell::Cell,
    sync::atomic::{AtomicU64, Ordering},
};

use chunk_iteration::ChunkBlockIterator;

use super::block::Block;
use crate::error::{VoxelError, VoxelResult};

pub mod chunk_iteration;

/// Edge length of a chunk along x and y, in blocks.
pub const CHUNK_LENGTH: usize = 16;
/// Height of a chunk along z, in blocks.
pub const CHUNK_HEIGHT: usize = 16;
/// Number of blocks in one x slab (`L * H`).
pub const CHUNK_SLAB_SIZE: usize = CHUNK_LENGTH * CHUNK_HEIGHT;
/// The total number of blocks in a chunk.
pub const CHUNK_VOLUME: usize = CHUNK_LENGTH * CHUNK_SLAB_SIZE;

static NEXT_STAMP: AtomicU64 = AtomicU64::new(1);

fn next_stamp() -> u64 {
    NEXT_STAMP.fetch_add(1, Ordering::Relaxed)
}

/// Represents a 16x16x16 collection of voxel blocks.
///
/// Chunks are shared between the world index and the mesher through
/// [`crate::core::StResource`]; the `changed` flag uses a `Cell` so a mesh
/// pass holding only a read guard can still clear it.
#[derive(Clone)]
pub struct Chunk {
    blocks: Box<[Block; CHUNK_VOLUME]>,
    changed: Cell<bool>,
    stamp: u64,
}

impl Chunk {
    /// Creates a new, completely empty chunk (all blocks are air).
    pub fn empty() -> Self {
        Self::filled(Block::AIR)
    }

    /// Creates a chunk with every block set to `block`.
    pub fn filled(block: Block) -> Self {
        Self::from_blocks(Box::new([block; CHUNK_VOLUME]))
    }

    /// Wraps an existing block array, laid out by [`Chunk::idx`].
    pub fn from_blocks(blocks: Box<[Block; CHUNK_VOLUME]>) -> Self {
        Chunk {
            blocks,
            changed: Cell::new(false),
            stamp: next_stamp(),
        }
    }

    /// Builds a chunk by evaluating `f(x, y, z)` for every position.
    pub fn from_fn(mut f: impl FnMut(usize, usize, usize) -> Block) -> Self {
        let mut blocks = Box::new([Block::AIR; CHUNK_VOLUME]);
        for x in 0..CHUNK_LENGTH {
            for y in 0..CHUNK_LENGTH {
                for z in 0..CHUNK_HEIGHT {
                    blocks[Self::idx(x, y, z)] = f(x, y, z);
                }
            }
        }
        Self::from_blocks(blocks)
    }

    /// Creates a chunk with a 3D checkerboard of dirt and air.
    pub fn checkerboard() -> Self {
        Self::from_fn(|x, y, z| {
            if (x + y + z) % 2 == 0 {
                Block::from_id(1)
            } else {
                Block::AIR
            }
        })
    }

    /// Row-major index of `(x, y, z)`. Does not validate its input.
    #[inline]
    pub const fn idx(x: usize, y: usize, z: usize) -> usize {
        x * CHUNK_SLAB_SIZE + y * CHUNK_HEIGHT + z
    }

    /// Inverse of [`Chunk::idx`].
    #[inline]
    pub const fn position_of(index: usize) -> (usize, usize, usize) {
        (
            index / CHUNK_SLAB_SIZE,
            (index / CHUNK_HEIGHT) % CHUNK_LENGTH,
            index % CHUNK_HEIGHT,
        )
    }

    /// Whether a signed chunk-local coordinate lies inside the chunk.
    #[inline]
    pub fn contains(x: i32, y: i32, z: i32) -> bool {
        (0..CHUNK_LENGTH as i32).contains(&x)
            && (0..CHUNK_LENGTH as i32).contains(&y)
            && (0..CHUNK_HEIGHT as i32).contains(&z)
    }

    /// Bounds-checked [`Chunk::idx`].
    pub fn index(x: usize, y: usize, z: usize) -> VoxelResult<usize> {
        if x < CHUNK_LENGTH && y < CHUNK_LENGTH && z < CHUNK_HEIGHT {
            Ok(Self::idx(x, y, z))
        } else {
            Err(VoxelError::IndexOutOfRange {
                x: x as i64,
                y: y as i64,
                z: z as i64,
            })
        }
    }

    /// Gets the block at the specified chunk-local coordinates.
    pub fn block_at(&self, x: usize, y: usize, z: usize) -> VoxelResult<Block> {
        Ok(self.blocks[Self::index(x, y, z)?])
    }

    /// Gets the block at signed chunk-local coordinates, or `None` outside.
    pub fn try_block_at(&self, x: i32, y: i32, z: i32) -> Option<Block> {
        Self::contains(x, y, z)
            .then(|| self.blocks[Self::idx(x as usize, y as usize, z as usize)])
    }

    /// Sets the block at the specified chunk-local coordinates and marks the
    /// chunk as changed.
    pub fn set_block_at(&mut self, x: usize, y: usize, z: usize, block: Block) -> VoxelResult<()> {
        let index = Self::index(x, y, z)?;
        self.blocks[index] = block;
        self.touch();
        Ok(())
    }

    /// Read-only view of every block in [`Chunk::idx`] order.
    pub fn blocks(&self) -> &[Block; CHUNK_VOLUME] {
        &self.blocks
    }

    /// Mutable view of every block. Marks the chunk as changed.
    pub fn blocks_mut(&mut self) -> &mut [Block; CHUNK_VOLUME] {
        self.touch();
        &mut self.blocks
    }

    /// Iterates over all non-air blocks with their positions.
    pub fn iter_solid(&self) -> ChunkBlockIterator<'_> {
        ChunkBlockIterator::new(self)
    }

    /// Number of non-air blocks.
    pub fn solid_count(&self) -> usize {
        self.blocks.iter().filter(|b| b.is_solid()).count()
    }

    /// Whether the chunk was modified since its mesh was last built.
    pub fn changed(&self) -> bool {
        self.changed.get()
    }

    /// Sets or clears the changed flag.
    pub fn set_changed(&self, changed: bool) {
        self.changed.set(changed);
    }

    /// Unique stamp of the current contents.
    pub fn stamp(&self) -> u64 {
        self.stamp
    }

    fn touch(&mut self) {
        self.changed.set(true);
        self.stamp = next_stamp();
    }
}

impl Default for Chunk {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::fmt::Debug for Chunk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Chunk")
            .field("solid_blocks", &self.solid_count())
            .field("changed", &self.changed.get())
            .field("stamp", &self.stamp)
            .finish()
    }
}
