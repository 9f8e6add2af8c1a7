//! Mesh generation and caching for voxel rendering.
//!
//! # Architecture
//! - `MeshManager`: hands out chunk meshes, rebuilding only stale ones
//! - `mesh/`: the face-culling mesher and its data structures
//!
//! # Cache keys
//! A cached mesh remembers the stamp of the chunk it was built from and, when
//! seams are culled against neighbours, the stamps of the six adjacent
//! chunks. It is reused only while all of them still match and the chunk's
//! changed flag is clear. A chunk replaced in the world gets a fresh stamp, so
//! replacement is detected the same way as mutation. Passing a different
//! texture atlas table than the previous request drops every cached mesh.

use std::{num::NonZeroUsize, rc::Rc};

use log::{debug, trace};
use lru::LruCache;

/// Face-culling mesher and its data structures.
mod mesh;

pub use mesh::*;

use crate::{
    config::{MeshingConfig, SeamPolicy},
    engine_state::{
        rendering::texture_atlas::TextureAtlas,
        voxels::{
            block::block_side::BlockSide,
            world::{ChunkCoord, World},
        },
    },
    error::VoxelResult,
};

struct CachedMesh {
    stamp: u64,
    neighbor_stamps: [Option<u64>; 6],
    mesh: Rc<Mesh>,
}

/// Hit and miss counters of a [`MeshManager`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    /// Requests served from the cache.
    pub hits: u64,
    /// Requests that rebuilt a mesh.
    pub misses: u64,
}

/// Builds chunk meshes on demand and keeps the most recently used ones.
pub struct MeshManager {
    mesher: ChunkMesher,
    cache: LruCache<ChunkCoord, CachedMesh>,
    /// Table the cached meshes were textured with
    atlas: Option<TextureAtlas>,
    stats: CacheStats,
}

impl MeshManager {
    /// Creates a manager holding at most `capacity` meshes (at least one).
    pub fn new(options: MeshOptions, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        MeshManager {
            mesher: ChunkMesher::new(options),
            cache: LruCache::new(capacity),
            atlas: None,
            stats: CacheStats::default(),
        }
    }

    /// Creates a manager from the meshing section of the engine config.
    pub fn from_config(config: &MeshingConfig) -> Self {
        Self::new(MeshOptions::from(config), config.cache_capacity)
    }

    /// The mesher used for rebuilds.
    pub fn mesher(&self) -> &ChunkMesher {
        &self.mesher
    }

    /// Returns the mesh of the chunk at `coord`, rebuilding it if the chunk
    /// (or, for neighbour-aware seams, an adjacent chunk) changed since the
    /// cached build.
    ///
    /// # Arguments
    ///
    /// * `world` - The world index holding the chunk and its neighbours
    /// * `coord` - Chunk-grid coordinate of the chunk to mesh
    /// * `atlas` - Texture table; a table that differs from the previous
    ///   request invalidates the whole cache
    ///
    /// # Returns
    ///
    /// `Ok(None)` when no chunk is stored at `coord`, otherwise the shared
    /// mesh, which stays cached until the chunk changes or is evicted.
    ///
    /// # Errors
    ///
    /// Fails if the chunk holds a block id `atlas` does not cover.
    pub fn mesh_for(
        &mut self,
        world: &World,
        coord: ChunkCoord,
        atlas: &TextureAtlas,
    ) -> VoxelResult<Option<Rc<Mesh>>> {
        let Some(shared) = world.chunk_at(coord) else {
            return Ok(None);
        };
        if self.atlas.as_ref() != Some(atlas) {
            if !self.cache.is_empty() {
                debug!("Texture atlas table changed, dropping {} meshes", self.cache.len());
                self.cache.clear();
            }
            self.atlas = Some(atlas.clone());
        }
        let chunk = shared.get();
        let neighbor_stamps = self.neighbor_stamps(world, coord);

        if let Some(cached) = self.cache.get(&coord) {
            if cached.stamp == chunk.stamp()
                && cached.neighbor_stamps == neighbor_stamps
                && !chunk.changed()
            {
                self.stats.hits += 1;
                trace!("Mesh cache hit for {coord:?}");
                return Ok(Some(Rc::clone(&cached.mesh)));
            }
        }

        self.stats.misses += 1;
        debug!("Rebuilding mesh for {coord:?}");
        let mesh = Rc::new(
            self.mesher
                .build_with_neighbors(&chunk, coord, world, atlas)?,
        );
        self.cache.put(
            coord,
            CachedMesh {
                stamp: chunk.stamp(),
                neighbor_stamps,
                mesh: Rc::clone(&mesh),
            },
        );
        Ok(Some(mesh))
    }

    /// Drops the cached mesh of `coord`. Returns whether one was cached.
    pub fn invalidate(&mut self, coord: ChunkCoord) -> bool {
        self.cache.pop(&coord).is_some()
    }

    /// Drops every cached mesh.
    pub fn clear(&mut self) {
        self.cache.clear();
    }

    /// Whether a mesh for `coord` is cached, without touching recency.
    pub fn is_cached(&self, coord: ChunkCoord) -> bool {
        self.cache.contains(&coord)
    }

    /// Number of cached meshes.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// `true` when nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Hit and miss counts since creation.
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    fn neighbor_stamps(&self, world: &World, coord: ChunkCoord) -> [Option<u64>; 6] {
        match self.mesher.options().seam_policy {
            SeamPolicy::Isolated => [None; 6],
            SeamPolicy::NeighborAware => BlockSide::all().map(|side| {
                coord
                    .neighbor(side)
                    .and_then(|neighbor| world.chunk_at(neighbor))
                    .map(|neighbor| neighbor.get().stamp())
            }),
        }
    }
}
