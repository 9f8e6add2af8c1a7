//! # Noise Field Module
//!
//! Deterministic coherent noise and its fractal (multi-octave) sums, used by
//! the terrain generator.
//!
//! * [`GradientNoise`] - 2D/3D lattice gradient noise in `[0, 1]`
//! * [`FractalSampler`] - averages octaves of the noise into dense fields

mod fractal;
mod gradient;

pub use fractal::{Field2D, Field3D, FractalSampler};
pub use gradient::{GradientNoise, PERMUTATION_SIZE};
