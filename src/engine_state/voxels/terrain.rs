//! # Terrain Module
//!
//! Fills chunks from fractal noise.
//!
//! Each cell `(i, j, k)` has a height bias of `k / H`. A fractal field over
//! the chunk volume is shifted by `-noise_bias` and scaled by `H`, giving a
//! vertical displacement of roughly `[-H/2, H/2]`. The block at `(i, j, k)`
//! is solid when the bias at the displaced height
//! `kk = clamp(round(k + displacement), 0, H - 1)` reaches the solid
//! threshold.

use log::debug;
use web_time::Instant;

use super::{
    block::{block_type::BlockType, Block},
    chunk::{Chunk, CHUNK_HEIGHT, CHUNK_LENGTH},
};
use crate::{
    config::{GenerationMethod, TerrainConfig},
    noise_field::{FractalSampler, GradientNoise},
};

/// Produces chunk contents from a [`TerrainConfig`].
///
/// Generation is synchronous and pure; the same config always yields the
/// same chunks.
#[derive(Debug, Clone)]
pub struct TerrainGenerator {
    sampler: FractalSampler,
    config: TerrainConfig,
}

impl TerrainGenerator {
    /// Creates a generator. A configured seed shuffles the noise table.
    pub fn new(config: TerrainConfig) -> Self {
        let noise = match config.seed {
            Some(seed) => GradientNoise::with_seed(seed),
            None => GradientNoise::new(),
        };
        Self {
            sampler: FractalSampler::new(noise),
            config,
        }
    }

    /// The settings this generator was built with.
    pub fn config(&self) -> &TerrainConfig {
        &self.config
    }

    /// Generates the chunk whose base chunk-grid coordinate is
    /// `(base_x, base_y, base_z)`.
    ///
    /// Unless `world_space_sampling` is enabled the base is ignored and every
    /// chunk comes out identical.
    ///
    /// # Arguments
    ///
    /// * `base_x`, `base_y` - Chunk-grid position on the horizontal axes
    /// * `base_z` - Chunk-grid position on the vertical axis
    ///
    /// # Returns
    ///
    /// A fully populated chunk with a fresh stamp. Fractal terrain only
    /// holds air and dirt unless `grass_surface` caps exposed columns.
    pub fn generate_chunk(&self, base_x: i32, base_y: i32, base_z: i32) -> Chunk {
        let start = Instant::now();
        let chunk = match self.config.method {
            GenerationMethod::Fractal => self.fractal_chunk([base_x, base_y, base_z]),
            GenerationMethod::Checkerboard => Chunk::checkerboard(),
            GenerationMethod::Solid => Chunk::filled(Block::new(BlockType::DIRT)),
            GenerationMethod::Empty => Chunk::empty(),
        };
        debug!(
            "Generated chunk ({base_x}, {base_y}, {base_z}) via {:?}: {} solid blocks in {:?}",
            self.config.method,
            chunk.solid_count(),
            start.elapsed()
        );
        chunk
    }

    fn fractal_chunk(&self, base: [i32; 3]) -> Chunk {
        let origin = if self.config.world_space_sampling {
            [
                f64::from(base[0]) * CHUNK_LENGTH as f64,
                f64::from(base[1]) * CHUNK_LENGTH as f64,
                f64::from(base[2]) * CHUNK_HEIGHT as f64,
            ]
        } else {
            [0.0; 3]
        };

        let mut displacement = self.sampler.sample3d(
            origin,
            CHUNK_LENGTH,
            CHUNK_LENGTH,
            CHUNK_HEIGHT,
            self.config.cell_size as f64,
            self.config.octaves,
        );
        displacement.add_scalar(-self.config.noise_bias);
        displacement.mul_scalar(CHUNK_HEIGHT as f64);

        // The field has the chunk's own dimensions, so it shares `Chunk::idx`.
        let offsets = displacement.values();
        let threshold = self.config.solid_threshold;
        let mut chunk = Chunk::from_fn(|i, j, k| {
            let displaced = (k as f64 + offsets[Chunk::idx(i, j, k)]).round();
            let kk = displaced.clamp(0.0, (CHUNK_HEIGHT - 1) as f64) as usize;
            if height_bias(kk) >= threshold {
                Block::new(BlockType::DIRT)
            } else {
                Block::AIR
            }
        });

        if self.config.grass_surface {
            cover_with_grass(&mut chunk);
        }
        chunk
    }
}

impl Default for TerrainGenerator {
    fn default() -> Self {
        Self::new(TerrainConfig::default())
    }
}

/// Linear height bias: `0` at the bottom layer, approaching `1` at the top.
#[inline]
fn height_bias(k: usize) -> f64 {
    k as f64 / CHUNK_HEIGHT as f64
}

/// Replaces every solid block whose upper neighbour is air, or that sits in
/// the top layer, with grass.
fn cover_with_grass(chunk: &mut Chunk) {
    let grass = Block::new(BlockType::GRASS);
    let blocks = chunk.blocks_mut();
    for x in 0..CHUNK_LENGTH {
        for y in 0..CHUNK_LENGTH {
            for z in 0..CHUNK_HEIGHT {
                let index = Chunk::idx(x, y, z);
                let exposed = z == CHUNK_HEIGHT - 1 || blocks[index + 1].is_air();
                if blocks[index].is_solid() && exposed {
                    blocks[index] = grass;
                }
            }
        }
    }
    chunk.set_changed(false);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::chunk::CHUNK_VOLUME;

    #[test]
    fn reference_chunks_only_hold_air_and_dirt() {
        let chunk = TerrainGenerator::default().generate_chunk(0, 0, 0);
        assert_eq!(chunk.blocks().len(), CHUNK_VOLUME);
        assert!(chunk.blocks().iter().all(|b| b.id == 0 || b.id == 1));
        assert!(chunk.solid_count() > 0);
        assert!(chunk.solid_count() < CHUNK_VOLUME);
    }

    #[test]
    fn generation_is_deterministic_and_position_independent() {
        let generator = TerrainGenerator::default();
        let a = generator.generate_chunk(0, 0, 0);
        let b = generator.generate_chunk(0, 0, 0);
        let c = generator.generate_chunk(5, -3, 2);
        assert_eq!(a.blocks(), b.blocks());
        assert_eq!(a.blocks(), c.blocks());
        assert_eq!(
            a.blocks(),
            TerrainGenerator::default().generate_chunk(0, 0, 0).blocks()
        );
    }

    #[test]
    fn displacement_bounds_fix_the_lowest_and_highest_layers() {
        // The 4-octave average never exceeds 1.875 / 4, so the displacement
        // stays within [-4.8, 2.7]: layers below 5 are always air and layers
        // from 13 up are always solid.
        let chunk = TerrainGenerator::default().generate_chunk(0, 0, 0);
        for x in 0..CHUNK_LENGTH {
            for y in 0..CHUNK_LENGTH {
                for z in 0..5 {
                    assert!(chunk.block_at(x, y, z).unwrap().is_air());
                }
                for z in 13..CHUNK_HEIGHT {
                    assert!(chunk.block_at(x, y, z).unwrap().is_solid());
                }
            }
        }
    }

    #[test]
    fn fresh_chunks_are_not_marked_changed() {
        let generator = TerrainGenerator::new(TerrainConfig {
            grass_surface: true,
            ..TerrainConfig::default()
        });
        assert!(!generator.generate_chunk(0, 0, 0).changed());
    }

    #[test]
    fn world_space_sampling_varies_by_position() {
        let generator = TerrainGenerator::new(TerrainConfig {
            world_space_sampling: true,
            ..TerrainConfig::default()
        });
        let origin = generator.generate_chunk(0, 0, 0);
        let far = generator.generate_chunk(5, 2, 0);
        assert_ne!(origin.blocks(), far.blocks());
        assert_eq!(
            origin.blocks(),
            TerrainGenerator::default().generate_chunk(0, 0, 0).blocks()
        );
    }

    #[test]
    fn grass_caps_exposed_columns() {
        let generator = TerrainGenerator::new(TerrainConfig {
            grass_surface: true,
            ..TerrainConfig::default()
        });
        let chunk = generator.generate_chunk(0, 0, 0);
        assert!(chunk.blocks().iter().all(|b| b.id <= 2));
        for x in 0..CHUNK_LENGTH {
            for y in 0..CHUNK_LENGTH {
                let top = chunk.block_at(x, y, CHUNK_HEIGHT - 1).unwrap();
                assert_eq!(top.block_type(), Some(BlockType::GRASS));
            }
        }
    }

    #[test]
    fn debug_methods_fill_as_named() {
        let with = |method| {
            TerrainGenerator::new(TerrainConfig {
                method,
                ..TerrainConfig::default()
            })
            .generate_chunk(0, 0, 0)
        };
        assert_eq!(with(GenerationMethod::Empty).solid_count(), 0);
        assert_eq!(with(GenerationMethod::Solid).solid_count(), CHUNK_VOLUME);
        assert_eq!(
            with(GenerationMethod::Checkerboard).solid_count(),
            CHUNK_VOLUME / 2
        );
    }
}
