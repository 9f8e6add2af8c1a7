//! # Block Side Module
//!
//! The six face directions of a block, in texture-map order.

/// One of the three coordinate axes.
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug, PartialOrd, Ord)]
pub enum Axis {
    /// The x axis.
    X = 0,
    /// The y axis.
    Y = 1,
    /// The z axis (up).
    Z = 2,
}

/// Represents the six possible faces of a voxel block.
///
/// The discriminants follow the texture map layout: `-x, +x, -y, +y, -z, +z`.
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug, PartialOrd, Ord)]
pub enum BlockSide {
    /// Facing negative x.
    NegX = 0,
    /// Facing positive x.
    PosX = 1,
    /// Facing negative y.
    NegY = 2,
    /// Facing positive y.
    PosY = 3,
    /// Facing negative z (bottom).
    NegZ = 4,
    /// Facing positive z (top).
    PosZ = 5,
}

impl BlockSide {
    /// Returns all six sides in texture-map order.
    pub fn all() -> [BlockSide; 6] {
        [
            BlockSide::NegX,
            BlockSide::PosX,
            BlockSide::NegY,
            BlockSide::PosY,
            BlockSide::NegZ,
            BlockSide::PosZ,
        ]
    }

    /// The axis this side's normal lies on.
    pub fn axis(self) -> Axis {
        match self {
            BlockSide::NegX | BlockSide::PosX => Axis::X,
            BlockSide::NegY | BlockSide::PosY => Axis::Y,
            BlockSide::NegZ | BlockSide::PosZ => Axis::Z,
        }
    }

    /// Whether the normal points along the positive axis direction.
    pub fn is_positive(self) -> bool {
        matches!(self, BlockSide::PosX | BlockSide::PosY | BlockSide::PosZ)
    }

    /// Unit offset to the neighbouring block this side faces.
    pub fn normal(self) -> [i32; 3] {
        match self {
            BlockSide::NegX => [-1, 0, 0],
            BlockSide::PosX => [1, 0, 0],
            BlockSide::NegY => [0, -1, 0],
            BlockSide::PosY => [0, 1, 0],
            BlockSide::NegZ => [0, 0, -1],
            BlockSide::PosZ => [0, 0, 1],
        }
    }

    /// The side facing the opposite direction.
    pub fn opposite(self) -> BlockSide {
        match self {
            BlockSide::NegX => BlockSide::PosX,
            BlockSide::PosX => BlockSide::NegX,
            BlockSide::NegY => BlockSide::PosY,
            BlockSide::PosY => BlockSide::NegY,
            BlockSide::NegZ => BlockSide::PosZ,
            BlockSide::PosZ => BlockSide::NegZ,
        }
    }

    /// The two in-plane axes of a face on this side, as `(u axis, v axis)`.
    ///
    /// Texture `u` follows the first axis and `v` the second.
    pub fn plane_axes(self) -> (Axis, Axis) {
        match self.axis() {
            Axis::X => (Axis::Y, Axis::Z),
            Axis::Y => (Axis::X, Axis::Z),
            Axis::Z => (Axis::X, Axis::Y),
        }
    }
}
