//! # Configuration Module
//!
//! Engine settings, loadable from JSON. Every field has a default, so a
//! config file only needs to name what it changes:
//!
//! ```json
//! { "terrain": { "seed": 7 }, "meshing": { "merge_faces": true } }
//! ```

use std::path::{Path, PathBuf};

use log::info;
use serde::{Deserialize, Serialize};

use crate::{
    engine_state::voxels::chunk::CHUNK_LENGTH,
    error::{VoxelError, VoxelResult},
};

/// Environment variable naming a JSON config file.
pub const CONFIG_ENV_VAR: &str = "VOXEL_TERRAIN_CONFIG";

/// How new chunks are filled.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum GenerationMethod {
    /// Fractal-noise terrain.
    #[default]
    Fractal,
    /// Alternating dirt and air.
    Checkerboard,
    /// Every block dirt.
    Solid,
    /// Every block air.
    Empty,
}

/// How faces on a chunk's outer boundary are treated.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SeamPolicy {
    /// Boundary faces are always emitted, whatever the adjacent chunk holds.
    #[default]
    Isolated,
    /// Boundary faces are culled when the adjacent chunk is loaded and solid there.
    NeighborAware,
}

/// Terrain generator settings.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct TerrainConfig {
    /// Chunk fill strategy.
    pub method: GenerationMethod,
    /// Seed for a shuffled permutation table; `None` keeps the classic table.
    pub seed: Option<u64>,
    /// Base noise period in blocks.
    pub cell_size: usize,
    /// Number of fractal octaves.
    pub octaves: usize,
    /// Subtracted from the fractal value before scaling by the chunk height.
    pub noise_bias: f64,
    /// Height-bias level at or above which a displaced cell is solid.
    pub solid_threshold: f64,
    /// Sample noise at each chunk's world position instead of the origin.
    pub world_space_sampling: bool,
    /// Turn solid blocks with air above them into grass.
    pub grass_surface: bool,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            method: GenerationMethod::default(),
            seed: None,
            cell_size: CHUNK_LENGTH / 2,
            octaves: 4,
            noise_bias: 0.3,
            solid_threshold: 0.5,
            world_space_sampling: false,
            grass_surface: false,
        }
    }
}

/// Mesher settings.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct MeshingConfig {
    /// Boundary face policy.
    pub seam_policy: SeamPolicy,
    /// Merge runs of coplanar same-material faces after culling.
    ///
    /// Merged faces stretch one atlas cell over their whole length, so this
    /// suits the debug vertex path better than textured output.
    pub merge_faces: bool,
    /// Number of chunk meshes kept in the cache.
    pub cache_capacity: usize,
    /// JSON texture atlas table; the built-in table is used when absent.
    pub texture_atlas: Option<PathBuf>,
}

impl Default for MeshingConfig {
    fn default() -> Self {
        Self {
            seam_policy: SeamPolicy::default(),
            merge_faces: false,
            cache_capacity: 64,
            texture_atlas: None,
        }
    }
}

/// World streaming settings.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct WorldConfig {
    /// Chunks within this many chunks of the centre (per axis) stay loaded.
    pub load_radius: i32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self { load_radius: 1 }
    }
}

/// Top-level engine configuration.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct EngineConfig {
    /// Terrain generator settings.
    pub terrain: TerrainConfig,
    /// Mesher settings.
    pub meshing: MeshingConfig,
    /// World streaming settings.
    pub world: WorldConfig,
}

impl EngineConfig {
    /// Parses and validates a JSON document.
    pub fn from_json_str(json: &str) -> VoxelResult<Self> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON file.
    pub fn load(path: impl AsRef<Path>) -> VoxelResult<Self> {
        let path = path.as_ref();
        info!("Loading engine config from {}", path.display());
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Loads the file named by [`CONFIG_ENV_VAR`], or returns the defaults
    /// when the variable is unset.
    pub fn from_env() -> VoxelResult<Self> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::load(path),
            None => {
                info!("{CONFIG_ENV_VAR} not set, using default config");
                Ok(Self::default())
            }
        }
    }

    /// Rejects settings the generator or mesher cannot work with.
    pub fn validate(&self) -> VoxelResult<()> {
        if self.terrain.cell_size == 0 {
            return Err(VoxelError::InvalidConfig(
                "terrain.cell_size must be positive".into(),
            ));
        }
        if self.terrain.octaves == 0 {
            return Err(VoxelError::InvalidConfig(
                "terrain.octaves must be positive".into(),
            ));
        }
        if self.meshing.cache_capacity == 0 {
            return Err(VoxelError::InvalidConfig(
                "meshing.cache_capacity must be positive".into(),
            ));
        }
        if self.world.load_radius < 0 {
            return Err(VoxelError::InvalidConfig(format!(
                "world.load_radius must not be negative (got {})",
                self.world.load_radius
            )));
        }
        Ok(())
    }
}
