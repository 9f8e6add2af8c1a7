//! # Engine State Module
//!
//! The headless coordinator tying terrain generation, the world index and the
//! mesh cache together.
//!
//! ## Key Components
//!
//! * `EngineState` - owns the config, generator, world, atlas table and mesh cache
//! * `rendering` - vertex layouts, texture atlas table and meshing
//! * `voxels` - blocks, chunks, terrain generation and the world index
//!
//! ## Frame Flow
//!
//! A consumer drives the engine around a moving centre coordinate:
//!
//! 1. `load_chunks_around` generates any missing chunk within the load radius
//! 2. `unload_chunks_outside` drops chunks (and cached meshes) that fell out of range
//! 3. `build_draw_list` returns one mesh plus model translation per present chunk
//!
//! Coordinates with no chunk are skipped; absence is never an error.

use std::rc::Rc;

use cgmath::Vector3;
use log::{debug, info, trace, warn};
use web_time::Instant;

use crate::{config::EngineConfig, error::VoxelResult};

use rendering::{meshing::MeshManager, texture_atlas::TextureAtlas, Mesh};
use voxels::{
    terrain::TerrainGenerator,
    world::{ChunkCoord, World},
};

pub mod rendering;
pub mod voxels;

/// One entry of a draw list: a chunk's mesh and where to place it.
#[derive(Debug, Clone)]
pub struct DrawItem {
    /// The chunk the mesh belongs to
    pub coord: ChunkCoord,
    /// The chunk's mesh, shared with the cache
    pub mesh: Rc<Mesh>,
    /// Model translation from chunk-local to world space
    pub translation: Vector3<f32>,
}

/// The main state container for the voxel engine.
///
/// # Examples
///
/// ```
/// use voxel_terrain::{config::EngineConfig, engine_state::EngineState, ChunkCoord};
///
/// let mut engine = EngineState::new(EngineConfig::default()).unwrap();
/// let center = ChunkCoord::new(0, 0, 0);
/// engine.load_chunks_around(center);
///
/// let draw_list = engine.build_draw_list(center).unwrap();
/// assert_eq!(draw_list.len(), 27);
/// ```
pub struct EngineState {
    /// Settings the engine was created with
    config: EngineConfig,
    /// Fills newly loaded chunks
    generator: TerrainGenerator,
    /// The voxel world containing all chunk data
    world: World,
    /// Texture rectangles per block id
    atlas: TextureAtlas,
    /// Mesh builder and cache
    mesh_manager: MeshManager,
}

impl EngineState {
    /// Creates a new engine state with all subsystems initialized.
    ///
    /// # Arguments
    ///
    /// * `config` - Engine settings; validated before anything is built
    ///
    /// # Returns
    ///
    /// An engine with an empty world, an empty mesh cache and either the
    /// configured texture atlas table or the standard one.
    ///
    /// # Errors
    ///
    /// Fails if the config does not validate or a configured texture atlas
    /// table cannot be loaded.
    pub fn new(config: EngineConfig) -> VoxelResult<Self> {
        config.validate()?;
        let atlas = match &config.meshing.texture_atlas {
            Some(path) => TextureAtlas::load(path)?,
            None => TextureAtlas::standard(),
        };
        info!(
            "Engine state created: {:?} terrain, {:?} seams, load radius {}",
            config.terrain.method, config.meshing.seam_policy, config.world.load_radius
        );
        Ok(EngineState {
            generator: TerrainGenerator::new(config.terrain.clone()),
            world: World::new(),
            atlas,
            mesh_manager: MeshManager::from_config(&config.meshing),
            config,
        })
    }

    /// The engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The world index.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable access to the world index, for edits and manual placement.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// The texture atlas table used for meshing.
    pub fn atlas(&self) -> &TextureAtlas {
        &self.atlas
    }

    /// The mesh cache.
    pub fn mesh_manager(&self) -> &MeshManager {
        &self.mesh_manager
    }

    /// Generates every missing chunk within the load radius of `center`.
    ///
    /// Returns the number of chunks generated.
    pub fn load_chunks_around(&mut self, center: ChunkCoord) -> usize {
        let start = Instant::now();
        let mut generated = 0;
        for coord in center.cube_around(self.config.world.load_radius) {
            if self.world.add_chunk_at(coord, &self.generator) {
                generated += 1;
            }
        }
        debug!(
            "Loaded {generated} chunks around {center:?} in {:?}",
            start.elapsed()
        );
        generated
    }

    /// Removes every chunk farther than the load radius from `center`, along
    /// with its cached mesh.
    ///
    /// Returns the number of chunks removed.
    pub fn unload_chunks_outside(&mut self, center: ChunkCoord) -> usize {
        let radius = self.config.world.load_radius.unsigned_abs();
        let stale: Vec<ChunkCoord> = self
            .world
            .coords()
            .filter(|coord| coord.chebyshev_distance(center) > radius)
            .collect();
        for coord in &stale {
            self.world.remove_chunk(*coord);
            self.mesh_manager.invalidate(*coord);
        }
        if !stale.is_empty() {
            debug!("Unloaded {} chunks outside {center:?}", stale.len());
        }
        stale.len()
    }

    /// Returns the mesh and model translation of every chunk within the load
    /// radius of `center`, in ascending coordinate order.
    ///
    /// # Errors
    ///
    /// Fails if a chunk holds a block id the texture atlas table does not
    /// cover.
    pub fn build_draw_list(&mut self, center: ChunkCoord) -> VoxelResult<Vec<DrawItem>> {
        let mut draw_list = Vec::new();
        for coord in center.cube_around(self.config.world.load_radius) {
            let mesh = match self.mesh_manager.mesh_for(&self.world, coord, &self.atlas) {
                Ok(Some(mesh)) => mesh,
                Ok(None) => {
                    trace!("No chunk at {coord:?}, skipping");
                    continue;
                }
                Err(error) => {
                    warn!("Meshing chunk {coord:?} failed: {error}");
                    return Err(error);
                }
            };
            draw_list.push(DrawItem {
                coord,
                mesh,
                translation: Self::model_translation(coord),
            });
        }
        Ok(draw_list)
    }

    /// World-space offset of a chunk's block `(0, 0, 0)`, i.e. `(L·x, L·y, H·z)`.
    ///
    /// # Arguments
    ///
    /// * `coord` - Any chunk coordinate; the full `i32` grid is valid
    ///
    /// # Returns
    ///
    /// The model translation the render pipeline applies to the chunk's mesh.
    pub fn model_translation(coord: ChunkCoord) -> Vector3<f32> {
        let [x, y, z] = coord.block_origin();
        Vector3::new(x as f32, y as f32, z as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::GenerationMethod,
        engine_state::voxels::{block::Block, chunk::Chunk},
        error::VoxelError,
    };

    fn engine_with(method: GenerationMethod) -> EngineState {
        let mut config = EngineConfig::default();
        config.terrain.method = method;
        EngineState::new(config).unwrap()
    }

    #[test]
    fn loading_fills_the_radius_once() {
        let mut engine = engine_with(GenerationMethod::Fractal);
        let center = ChunkCoord::new(0, 0, 0);
        assert_eq!(engine.load_chunks_around(center), 27);
        assert_eq!(engine.load_chunks_around(center), 0);
        assert_eq!(engine.world().len(), 27);
    }

    #[test]
    fn moving_the_centre_unloads_far_chunks() {
        let mut engine = engine_with(GenerationMethod::Empty);
        engine.load_chunks_around(ChunkCoord::new(0, 0, 0));
        engine.build_draw_list(ChunkCoord::new(0, 0, 0)).unwrap();

        let moved = ChunkCoord::new(1, 0, 0);
        assert_eq!(engine.unload_chunks_outside(moved), 9);
        assert_eq!(engine.load_chunks_around(moved), 9);
        assert_eq!(engine.world().len(), 27);
        assert!(!engine.mesh_manager().is_cached(ChunkCoord::new(-1, 0, 0)));
    }

    #[test]
    fn draw_list_skips_absent_chunks_and_places_present_ones() {
        let mut engine = engine_with(GenerationMethod::Solid);
        let placed = ChunkCoord::new(1, -1, 2);
        engine
            .world_mut()
            .insert_chunk(placed, Chunk::filled(Block::from_id(1)));

        let draw_list = engine.build_draw_list(ChunkCoord::new(1, -1, 1)).unwrap();
        assert_eq!(draw_list.len(), 1);
        assert_eq!(draw_list[0].coord, placed);
        assert_eq!(draw_list[0].translation, Vector3::new(16.0, -16.0, 32.0));
        assert_eq!(draw_list[0].mesh.face_count(), 1536);
    }

    #[test]
    fn draw_list_reuses_cached_meshes() {
        let mut engine = engine_with(GenerationMethod::Checkerboard);
        let center = ChunkCoord::new(0, 0, 0);
        engine.load_chunks_around(center);
        let first = engine.build_draw_list(center).unwrap();
        let second = engine.build_draw_list(center).unwrap();
        assert!(first
            .iter()
            .zip(&second)
            .all(|(a, b)| Rc::ptr_eq(&a.mesh, &b.mesh)));
        assert_eq!(engine.mesh_manager().stats().hits, 27);
    }

    #[test]
    fn uncovered_block_ids_surface_as_errors() {
        let mut engine = engine_with(GenerationMethod::Empty);
        let mut chunk = Chunk::empty();
        chunk.set_block_at(0, 0, 0, Block::from_id(9)).unwrap();
        engine.world_mut().insert_chunk(ChunkCoord::new(0, 0, 0), chunk);
        assert!(matches!(
            engine.build_draw_list(ChunkCoord::new(0, 0, 0)),
            Err(VoxelError::MissingTextureMap { block_id: 9, .. })
        ));
    }

    #[test]
    fn far_coordinates_mesh_and_place_without_overflow() {
        let mut engine = engine_with(GenerationMethod::Solid);
        let far = ChunkCoord::new(200_000_000, 0, 0);
        assert_eq!(engine.load_chunks_around(far), 27);

        let draw_list = engine.build_draw_list(far).unwrap();
        assert_eq!(draw_list.len(), 27);
        let item = draw_list.iter().find(|item| item.coord == far).unwrap();
        assert_eq!(item.translation, Vector3::new(3_200_000_000.0, 0.0, 0.0));
    }

    #[test]
    fn loading_at_the_grid_edge_skips_missing_coordinates() {
        let mut engine = engine_with(GenerationMethod::Empty);
        let edge = ChunkCoord::new(i32::MAX, i32::MIN, 0);
        assert_eq!(engine.load_chunks_around(edge), 12);
        assert_eq!(engine.build_draw_list(edge).unwrap().len(), 12);
        assert_eq!(engine.unload_chunks_outside(ChunkCoord::new(0, 0, 0)), 12);
        assert!(engine.world().is_empty());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut config = EngineConfig::default();
        config.meshing.cache_capacity = 0;
        assert!(EngineState::new(config).is_err());
    }
}
