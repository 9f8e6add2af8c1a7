use crate::engine_state::{
    rendering::{
        texture_atlas::TextureMap,
        vertex::{DebugVertex, Vertex},
    },
    voxels::block::{block_side::BlockSide, Block},
};

/// Two triangles sharing the `c0`-`c2` diagonal.
const TRIANGLE_CORNERS: [usize; 6] = [0, 1, 2, 2, 3, 0];

/// Corner offsets of a face along its `(u, v)` plane axes, in emission order.
///
/// Every sequence winds clockwise when the face is seen from outside the
/// block.
const fn corner_offsets(side: BlockSide) -> [[u8; 2]; 4] {
    match side {
        BlockSide::NegY | BlockSide::PosX | BlockSide::PosZ => [[0, 0], [0, 1], [1, 1], [1, 0]],
        BlockSide::PosY | BlockSide::NegX => [[1, 0], [1, 1], [0, 1], [0, 0]],
        BlockSide::NegZ => [[0, 0], [1, 0], [1, 1], [0, 1]],
    }
}

/// Represents a single quad on the surface of a chunk.
///
/// A face starts out covering one side of one block. The merge pass may
/// stretch it along its second in-plane axis, which is what `extent` records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Face {
    /// Chunk-local position of the (first) block the face belongs to
    pub origin: [u8; 3],
    /// Size in blocks along the side's `(u, v)` plane axes
    pub extent: [u8; 2],
    /// The block the face belongs to, used for texture mapping
    pub block: Block,
    /// Which side of the block this face represents
    pub side: BlockSide,
}

impl Face {
    /// Creates a unit face on `side` of the block at `(x, y, z)`.
    pub fn new(x: usize, y: usize, z: usize, block: Block, side: BlockSide) -> Self {
        Face {
            origin: [x as u8, y as u8, z as u8],
            extent: [1, 1],
            block,
            side,
        }
    }

    /// The four corners of the quad in emission order.
    pub fn corners(&self) -> [[i8; 3]; 4] {
        let normal_axis = self.side.axis() as usize;
        let (u_axis, v_axis) = self.side.plane_axes();
        let base = self.origin.map(|c| c as i8);
        let [u_len, v_len] = self.extent.map(|e| e as i8);
        let lift = i8::from(self.side.is_positive());

        corner_offsets(self.side).map(|[du, dv]| {
            let mut corner = base;
            corner[normal_axis] += lift;
            corner[u_axis as usize] += du as i8 * u_len;
            corner[v_axis as usize] += dv as i8 * v_len;
            corner
        })
    }

    /// The six textured vertices of the quad.
    ///
    /// A vertex on the far edge of the face along an in-plane axis takes that
    /// coordinate from the rectangle's second corner, otherwise from the
    /// first. Only the corner far on both axes gets the full second corner;
    /// a `+z` vertex at `(i, j + 1, k + 1)` is far on `y` alone and gets
    /// `[u0, v1]`.
    ///
    /// A merged face still spans a single atlas cell, so its texture is
    /// stretched over the whole extent.
    pub fn vertices(&self, map: &TextureMap) -> [Vertex; 6] {
        let rect = map.rect(self.side);
        let corners = self.corners();
        let offsets = corner_offsets(self.side);
        TRIANGLE_CORNERS.map(|c| {
            let [du, dv] = offsets[c];
            let u = if du > 0 { rect.second()[0] } else { rect.first()[0] };
            let v = if dv > 0 { rect.second()[1] } else { rect.first()[1] };
            Vertex::new(corners[c], [u, v])
        })
    }

    /// The six untextured vertices of the quad.
    pub fn debug_vertices(&self) -> [DebugVertex; 6] {
        let corners = self.corners();
        TRIANGLE_CORNERS.map(|c| DebugVertex {
            position: corners[c],
            block_id: self.block.id,
        })
    }

    /// Attempts to merge this face with `other`, which must continue it
    /// directly along the second in-plane axis.
    ///
    /// # Returns
    /// `Some(merged_face)` if the faces lie in the same plane, share a block
    /// and a `u` span, and touch end to end; `None` otherwise.
    pub fn merge_along_v(&self, other: &Face) -> Option<Face> {
        let normal_axis = self.side.axis() as usize;
        let (u_axis, v_axis) = self.side.plane_axes();
        let (u, v) = (u_axis as usize, v_axis as usize);

        let joinable = self.side == other.side
            && self.block == other.block
            && self.origin[normal_axis] == other.origin[normal_axis]
            && self.origin[u] == other.origin[u]
            && self.extent[0] == other.extent[0]
            && self.origin[v] + self.extent[1] == other.origin[v];

        joinable.then(|| Face {
            extent: [self.extent[0], self.extent[1] + other.extent[1]],
            ..*self
        })
    }
}
