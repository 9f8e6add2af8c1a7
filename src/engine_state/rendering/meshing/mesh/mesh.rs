//! Mesh data structures and the face-culling mesher.
//!
//! A block face is emitted when it points out of the chunk or when the block
//! next to it inside the chunk is air. What happens at the chunk boundary is
//! decided by the [`SeamPolicy`]: `Isolated` always emits boundary faces,
//! even when a loaded neighbour would hide them, while `NeighborAware` asks a
//! [`NeighborLookup`] about the block on the other side.

use log::{debug, trace};
use web_time::Instant;

use crate::{
    config::{MeshingConfig, SeamPolicy},
    engine_state::{
        rendering::{
            texture_atlas::TextureAtlas,
            vertex::{DebugVertex, Vertex},
        },
        voxels::{
            block::block_side::BlockSide,
            chunk::{Chunk, CHUNK_HEIGHT, CHUNK_LENGTH},
            world::{ChunkCoord, NeighborLookup},
        },
    },
    error::VoxelResult,
};

use super::{face::Face, greedy};

/// Order in which a block's faces are emitted.
const EMISSION_ORDER: [BlockSide; 6] = [
    BlockSide::NegY,
    BlockSide::PosX,
    BlockSide::PosY,
    BlockSide::NegX,
    BlockSide::NegZ,
    BlockSide::PosZ,
];

/// Number of vertices per emitted face (two triangles, no index buffer).
pub const VERTICES_PER_FACE: usize = 6;

/// A chunk's renderable geometry: a flat, non-indexed triangle list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    faces: Vec<Face>,
    vertices: Vec<Vertex>,
}

impl Mesh {
    /// Emitted faces, in emission order (or merge order when merged).
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Number of emitted faces.
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// The vertex buffer, six vertices per face.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Number of vertices in the buffer.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// `true` when the chunk has no visible faces.
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// The vertex buffer as raw bytes, ready for upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}

/// Settings for one [`ChunkMesher`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MeshOptions {
    /// How boundary faces are treated when neighbours are available.
    pub seam_policy: SeamPolicy,
    /// Run the face merging post-pass. Textures on merged faces are
    /// stretched, not tiled.
    pub merge_faces: bool,
}

impl From<&MeshingConfig> for MeshOptions {
    fn from(config: &MeshingConfig) -> Self {
        MeshOptions {
            seam_policy: config.seam_policy,
            merge_faces: config.merge_faces,
        }
    }
}

/// Converts chunks into meshes.
///
/// The mesher holds no state between calls; every build recomputes the mesh
/// from the chunk's current blocks. See
/// [`MeshManager`](crate::engine_state::rendering::meshing::MeshManager) for
/// the caching layer.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChunkMesher {
    options: MeshOptions,
}

impl ChunkMesher {
    /// Creates a mesher with the given options.
    pub fn new(options: MeshOptions) -> Self {
        ChunkMesher { options }
    }

    /// The options this mesher was built with.
    pub fn options(&self) -> MeshOptions {
        self.options
    }

    /// Builds the mesh of an isolated chunk.
    ///
    /// Every boundary face is emitted since nothing is known about adjacent
    /// chunks. Clears the chunk's changed flag.
    ///
    /// # Arguments
    ///
    /// * `chunk` - The chunk to mesh, walked in `idx` order
    /// * `atlas` - Texture table resolving each block id to six rectangles
    ///
    /// # Returns
    ///
    /// Six vertices per visible face, emitted per block in the order
    /// `-y, +x, +y, -x, -z, +z`.
    ///
    /// # Errors
    /// Fails with a lookup error if the chunk holds a block id the atlas does
    /// not cover.
    pub fn build_mesh(&self, chunk: &Chunk, atlas: &TextureAtlas) -> VoxelResult<Mesh> {
        let faces = self.collect_faces(chunk, |_, _, _| false);
        self.finish(chunk, faces, atlas)
    }

    /// Builds the mesh of the chunk stored at `coord`, consulting `neighbors`
    /// for boundary faces when the seam policy is `NeighborAware`.
    ///
    /// Clears the chunk's changed flag.
    pub fn build_with_neighbors(
        &self,
        chunk: &Chunk,
        coord: ChunkCoord,
        neighbors: &impl NeighborLookup,
        atlas: &TextureAtlas,
    ) -> VoxelResult<Mesh> {
        let faces = match self.options.seam_policy {
            SeamPolicy::Isolated => self.collect_faces(chunk, |_, _, _| false),
            SeamPolicy::NeighborAware => self.collect_faces(chunk, |x, y, z| {
                neighbors
                    .block_near(coord, x, y, z)
                    .is_some_and(|block| block.is_solid())
            }),
        };
        self.finish(chunk, faces, atlas)
    }

    /// Builds the untextured debug vertex buffer of an isolated chunk.
    ///
    /// Clears the chunk's changed flag.
    pub fn build_debug(&self, chunk: &Chunk) -> Vec<DebugVertex> {
        let faces = self.collect_faces(chunk, |_, _, _| false);
        let faces = if self.options.merge_faces {
            greedy::merge_faces(&faces)
        } else {
            faces
        };
        chunk.set_changed(false);
        faces.iter().flat_map(Face::debug_vertices).collect()
    }

    /// Collects the visible faces of `chunk`.
    ///
    /// `outside_is_solid` answers for positions beyond the chunk boundary, in
    /// chunk-local coordinates.
    fn collect_faces(
        &self,
        chunk: &Chunk,
        outside_is_solid: impl Fn(i32, i32, i32) -> bool,
    ) -> Vec<Face> {
        let mut faces = Vec::new();
        for (position, block) in chunk.iter_solid() {
            let (x, y, z) = (position.x, position.y, position.z);
            for side in EMISSION_ORDER {
                let [dx, dy, dz] = side.normal();
                let (nx, ny, nz) = (x as i32 + dx, y as i32 + dy, z as i32 + dz);
                let hidden = match chunk.try_block_at(nx, ny, nz) {
                    Some(neighbor) => neighbor.is_solid(),
                    None => outside_is_solid(nx, ny, nz),
                };
                if !hidden {
                    faces.push(Face::new(x, y, z, block, side));
                }
            }
        }
        faces
    }

    fn finish(&self, chunk: &Chunk, faces: Vec<Face>, atlas: &TextureAtlas) -> VoxelResult<Mesh> {
        let start = Instant::now();
        let emitted = faces.len();
        let faces = if self.options.merge_faces {
            greedy::merge_faces(&faces)
        } else {
            faces
        };

        let mut vertices = Vec::with_capacity(faces.len() * VERTICES_PER_FACE);
        for face in &faces {
            let map = atlas.lookup(face.block)?;
            trace!("Face {:?} of block {} at {:?}", face.side, face.block.id, face.origin);
            vertices.extend_from_slice(&face.vertices(map));
        }

        chunk.set_changed(false);
        debug!(
            "Meshed chunk: {} faces ({} before merging), {} vertices in {:?}",
            faces.len(),
            emitted,
            vertices.len(),
            start.elapsed()
        );
        Ok(Mesh { faces, vertices })
    }
}

/// Whether a chunk-local position sits on the boundary plane `side` faces.
pub fn is_boundary(x: usize, y: usize, z: usize, side: BlockSide) -> bool {
    match side {
        BlockSide::NegX => x == 0,
        BlockSide::PosX => x == CHUNK_LENGTH - 1,
        BlockSide::NegY => y == 0,
        BlockSide::PosY => y == CHUNK_LENGTH - 1,
        BlockSide::NegZ => z == 0,
        BlockSide::PosZ => z == CHUNK_HEIGHT - 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        engine_state::voxels::{
            block::{block_type::BlockType, Block},
            chunk::CHUNK_VOLUME,
            world::World,
        },
        error::VoxelError,
    };

    fn build(chunk: &Chunk) -> Mesh {
        ChunkMesher::default()
            .build_mesh(chunk, &TextureAtlas::standard())
            .unwrap()
    }

    fn lower_half() -> Chunk {
        Chunk::from_fn(|_, _, z| {
            if z < CHUNK_HEIGHT / 2 {
                Block::from_id(1)
            } else {
                Block::AIR
            }
        })
    }

    #[test]
    fn solid_chunk_emits_only_its_shell() {
        let mesh = build(&Chunk::filled(Block::from_id(1)));
        assert_eq!(mesh.face_count(), 6 * 16 * 16);
        assert_eq!(mesh.vertex_count(), 9216);
        assert_eq!(mesh.as_bytes().len(), 9216 * Vertex::STRIDE);
    }

    #[test]
    fn empty_chunk_emits_nothing() {
        let mesh = build(&Chunk::empty());
        assert!(mesh.is_empty());
        assert_eq!(mesh.vertex_count(), 0);
    }

    #[test]
    fn lower_half_emits_floor_surface_and_walls() {
        let mesh = build(&lower_half());
        let half = CHUNK_HEIGHT / 2;
        let count = |side| mesh.faces().iter().filter(|f| f.side == side).count();

        assert_eq!(count(BlockSide::NegZ), CHUNK_LENGTH * CHUNK_LENGTH);
        assert_eq!(count(BlockSide::PosZ), CHUNK_LENGTH * CHUNK_LENGTH);
        for side in [BlockSide::NegX, BlockSide::PosX, BlockSide::NegY, BlockSide::PosY] {
            assert_eq!(count(side), CHUNK_LENGTH * half);
        }
        assert_eq!(mesh.face_count(), 1024);
        assert_eq!(mesh.vertex_count(), 6144);

        for face in mesh.faces() {
            match face.side {
                BlockSide::NegZ => assert_eq!(face.origin[2], 0),
                BlockSide::PosZ => assert_eq!(face.origin[2] as usize, half - 1),
                _ => {}
            }
        }
    }

    #[test]
    fn interior_faces_are_never_emitted() {
        let chunk = Chunk::checkerboard();
        let mut solid = Chunk::filled(Block::from_id(1));
        solid.set_block_at(8, 8, 8, Block::AIR).unwrap();

        for chunk in [chunk, solid] {
            let mesh = build(&chunk);
            for face in mesh.faces() {
                let [x, y, z] = face.origin.map(usize::from);
                if is_boundary(x, y, z, face.side) {
                    continue;
                }
                let [dx, dy, dz] = face.side.normal();
                let neighbor = chunk
                    .try_block_at(x as i32 + dx, y as i32 + dy, z as i32 + dz)
                    .unwrap();
                assert!(neighbor.is_air());
            }
        }
    }

    #[test]
    fn cavity_adds_six_inward_faces() {
        let mut chunk = Chunk::filled(Block::from_id(1));
        chunk.set_block_at(8, 8, 8, Block::AIR).unwrap();
        assert_eq!(build(&chunk).face_count(), 1536 + 6);
    }

    #[test]
    fn isolated_policy_always_emits_boundary_faces() {
        let mut world = World::new();
        let origin = ChunkCoord::new(0, 0, 0);
        let chunk = world.insert_chunk(origin, Chunk::filled(Block::from_id(1)));
        for side in BlockSide::all() {
            let neighbor = origin.neighbor(side).unwrap();
            world.insert_chunk(neighbor, Chunk::filled(Block::from_id(1)));
        }

        let mesher = ChunkMesher::new(MeshOptions::default());
        let mesh = mesher
            .build_with_neighbors(&chunk.get(), origin, &world, &TextureAtlas::standard())
            .unwrap();
        assert_eq!(mesh.face_count(), 1536);
    }

    #[test]
    fn neighbor_aware_policy_culls_hidden_seams() {
        let mut world = World::new();
        let origin = ChunkCoord::new(0, 0, 0);
        let chunk = world.insert_chunk(origin, Chunk::filled(Block::from_id(1)));
        world.insert_chunk(
            origin.neighbor(BlockSide::PosX).unwrap(),
            Chunk::filled(Block::from_id(1)),
        );
        world.insert_chunk(origin.neighbor(BlockSide::NegX).unwrap(), Chunk::empty());

        let mesher = ChunkMesher::new(MeshOptions {
            seam_policy: SeamPolicy::NeighborAware,
            merge_faces: false,
        });
        let mesh = mesher
            .build_with_neighbors(&chunk.get(), origin, &world, &TextureAtlas::standard())
            .unwrap();

        assert_eq!(mesh.face_count(), 1536 - 256);
        assert!(mesh.faces().iter().all(|f| f.side != BlockSide::PosX));
    }

    #[test]
    fn meshing_clears_the_changed_flag() {
        let mut chunk = Chunk::empty();
        chunk.set_block_at(0, 0, 0, Block::from_id(1)).unwrap();
        assert!(chunk.changed());
        build(&chunk);
        assert!(!chunk.changed());

        chunk.set_block_at(1, 0, 0, Block::from_id(1)).unwrap();
        ChunkMesher::default().build_debug(&chunk);
        assert!(!chunk.changed());
    }

    #[test]
    fn uncovered_block_ids_fail_the_build() {
        let mut chunk = Chunk::empty();
        chunk.set_block_at(4, 4, 4, Block::from_id(3)).unwrap();
        let result = ChunkMesher::default().build_mesh(&chunk, &TextureAtlas::standard());
        assert!(matches!(
            result,
            Err(VoxelError::MissingTextureMap { block_id: 3, .. })
        ));
    }

    #[test]
    fn grass_faces_use_grass_rectangles() {
        let mut chunk = Chunk::empty();
        chunk
            .set_block_at(2, 2, 2, Block::new(BlockType::GRASS))
            .unwrap();
        let mesh = build(&chunk);
        for (face, vertices) in mesh.faces().iter().zip(mesh.vertices().chunks(6)) {
            let expected: &[[i8; 2]] = match face.side {
                BlockSide::PosZ => &[[1, 0], [2, 0], [1, 1], [2, 1]],
                BlockSide::NegZ => &[[2, 0], [3, 0], [2, 1], [3, 1]],
                _ => &[[0, 0], [1, 0], [0, 1], [1, 1]],
            };
            assert!(vertices.iter().all(|v| expected.contains(&v.tex_coords)));
        }
    }

    #[test]
    fn merged_solid_chunk_collapses_to_strips() {
        let mesher = ChunkMesher::new(MeshOptions {
            merge_faces: true,
            ..MeshOptions::default()
        });
        let mesh = mesher
            .build_mesh(&Chunk::filled(Block::from_id(1)), &TextureAtlas::standard())
            .unwrap();
        assert_eq!(mesh.face_count(), 6 * 16);
        assert_eq!(mesh.vertex_count(), 6 * 16 * VERTICES_PER_FACE);
    }

    #[test]
    fn debug_vertices_match_textured_geometry() {
        let chunk = lower_half();
        let textured = build(&chunk);
        let debug = ChunkMesher::default().build_debug(&chunk);
        assert_eq!(debug.len(), textured.vertex_count());
        assert!(debug
            .iter()
            .zip(textured.vertices())
            .all(|(d, t)| d.position == t.position && d.block_id == 1));
        assert!(chunk.solid_count() < CHUNK_VOLUME);
    }
}
