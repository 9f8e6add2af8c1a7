//! # Block Module
//!
//! Single-byte block identifiers and the face directions of a block.

use block_type::BlockType;

pub mod block_side;
pub mod block_type;

/// The underlying integer type used to represent block ids in memory.
pub type BlockId = u8;

/// Represents a single voxel block in the world.
///
/// Id `0` is air; any other id is solid and selects the texture map at
/// `id - 1` in the atlas table.
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable, Debug, PartialEq, Eq, Hash, Default)]
pub struct Block {
    /// Raw block id.
    pub id: BlockId,
}

impl Block {
    /// The empty block.
    pub const AIR: Block = Block { id: 0 };

    /// Creates a block from a raw id.
    pub const fn from_id(id: BlockId) -> Self {
        Block { id }
    }

    /// Creates a block of the specified named type.
    pub fn new(block_type: BlockType) -> Self {
        Block {
            id: block_type.id(),
        }
    }

    /// `true` for id `0`.
    pub const fn is_air(&self) -> bool {
        self.id == 0
    }

    /// `true` for every non-zero id.
    pub const fn is_solid(&self) -> bool {
        self.id != 0
    }

    /// The named type of this block, if it has one.
    pub fn block_type(&self) -> Option<BlockType> {
        BlockType::from_id(self.id)
    }
}

impl From<BlockType> for Block {
    fn from(block_type: BlockType) -> Self {
        Block::new(block_type)
    }
}
