//! Vertex data structures and layouts for voxel rendering.
//!
//! This module defines the vertex formats the mesher emits and the attribute
//! table an external graphics pipeline binds them with. Both formats are
//! `bytemuck::Pod`, so a mesh's vertex buffer can be uploaded as raw bytes.

use super::texture_atlas::ATLAS_CELLS;

/// Component format of a vertex attribute.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum VertexFormat {
    /// Three signed bytes.
    Sint8x3,
    /// Two signed bytes.
    Sint8x2,
    /// One unsigned byte.
    Uint8,
}

impl VertexFormat {
    /// Size of the attribute in bytes.
    pub const fn size(self) -> usize {
        match self {
            VertexFormat::Sint8x3 => 3,
            VertexFormat::Sint8x2 => 2,
            VertexFormat::Uint8 => 1,
        }
    }
}

/// One entry of a vertex layout table.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct VertexAttribute {
    /// Shader input location.
    pub shader_location: u32,
    /// Byte offset within the vertex.
    pub offset: usize,
    /// Component format.
    pub format: VertexFormat,
}

/// A vertex in the voxel rendering pipeline.
///
/// Positions are block-local corner coordinates (`0..=16`); texture
/// coordinates are atlas-cell corners taken from the block's texture map.
///
/// # Memory Layout
/// - Position: 3x i8 (3 bytes)
/// - Texture Coordinates: 2x i8 (2 bytes)
///
/// Total size: 5 bytes
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Chunk-local corner position
    pub position: [i8; 3],
    /// Atlas-cell texture coordinates
    pub tex_coords: [i8; 2],
}

impl Vertex {
    /// Attribute table matching the memory layout.
    ///
    /// # Shader Attributes
    /// - `location = 0`: position (i8, i8, i8)
    /// - `location = 1`: tex_coords (i8, i8)
    pub const ATTRIBUTES: [VertexAttribute; 2] = [
        VertexAttribute {
            shader_location: 0,
            offset: 0,
            format: VertexFormat::Sint8x3,
        },
        VertexAttribute {
            shader_location: 1,
            offset: VertexFormat::Sint8x3.size(),
            format: VertexFormat::Sint8x2,
        },
    ];

    /// Distance in bytes between consecutive vertices.
    pub const STRIDE: usize = std::mem::size_of::<Vertex>();

    /// Creates a new vertex.
    pub const fn new(position: [i8; 3], tex_coords: [i8; 2]) -> Self {
        Vertex {
            position,
            tex_coords,
        }
    }

    /// Texture coordinates scaled into `[0, 1]` for a square atlas of
    /// [`ATLAS_CELLS`] cells per side, as the fragment stage samples them.
    pub fn normalized_tex_coords(&self) -> [f32; 2] {
        [
            f32::from(self.tex_coords[0]) / ATLAS_CELLS as f32,
            f32::from(self.tex_coords[1]) / ATLAS_CELLS as f32,
        ]
    }
}

/// Untextured vertex carrying the raw block id, for flat-colour debug
/// shading.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DebugVertex {
    /// Chunk-local corner position
    pub position: [i8; 3],
    /// Id of the block the face belongs to
    pub block_id: u8,
}

impl DebugVertex {
    /// Attribute table matching the memory layout.
    pub const ATTRIBUTES: [VertexAttribute; 2] = [
        VertexAttribute {
            shader_location: 0,
            offset: 0,
            format: VertexFormat::Sint8x3,
        },
        VertexAttribute {
            shader_location: 1,
            offset: VertexFormat::Sint8x3.size(),
            format: VertexFormat::Uint8,
        },
    ];

    /// Distance in bytes between consecutive vertices.
    pub const STRIDE: usize = std::mem::size_of::<DebugVertex>();
}
