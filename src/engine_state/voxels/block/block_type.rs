//! # Block Type Module
//!
//! Named block identifiers known to the standard texture table.

use num_derive::FromPrimitive;
use num_traits::FromPrimitive;

use super::BlockId;

/// Enumerates the block types the built-in generators produce.
///
/// Block ids outside this set are still valid chunk contents; they just have
/// no name and rely on a custom texture atlas table.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive)]
pub enum BlockType {
    /// Empty space.
    AIR = 0,

    /// Plain dirt, the only material the reference terrain generator emits.
    DIRT = 1,

    /// Grass, with a distinct top and bottom texture.
    GRASS = 2,
}

impl BlockType {
    /// Converts a raw id into a named block type, if it has one.
    pub fn from_id(id: BlockId) -> Option<Self> {
        FromPrimitive::from_u8(id)
    }

    /// The raw block id of this type.
    pub fn id(self) -> BlockId {
        self as BlockId
    }
}
