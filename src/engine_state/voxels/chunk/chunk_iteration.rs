//! # Chunk Iteration Module
//!
//! An iterator over the non-air blocks of a chunk, in [`Chunk::idx`] order
//! (x outermost, z innermost).

use cgmath::Point3;

use crate::engine_state::voxels::block::Block;

use super::{Chunk, CHUNK_VOLUME};

/// An iterator over all non-air blocks in a chunk.
///
/// Yields the chunk-local position of each solid block together with the
/// block itself. Air is skipped.
pub struct ChunkBlockIterator<'a> {
    /// Reference to the chunk being iterated over
    chunk_ref: &'a Chunk,
    /// Next linear index to inspect
    offset: usize,
}

impl<'a> ChunkBlockIterator<'a> {
    /// Creates a new `ChunkBlockIterator` positioned before the first block.
    pub fn new(chunk_ref: &'a Chunk) -> Self {
        ChunkBlockIterator {
            chunk_ref,
            offset: 0,
        }
    }
}

impl Iterator for ChunkBlockIterator<'_> {
    type Item = (Point3<usize>, Block);

    fn next(&mut self) -> Option<Self::Item> {
        let blocks = self.chunk_ref.blocks();
        while self.offset < CHUNK_VOLUME {
            let index = self.offset;
            self.offset += 1;

            let block = blocks[index];
            if block.is_solid() {
                let (x, y, z) = Chunk::position_of(index);
                return Some((Point3::new(x, y, z), block));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(CHUNK_VOLUME - self.offset))
    }
}
