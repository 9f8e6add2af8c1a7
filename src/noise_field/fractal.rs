//! Octave summation of gradient noise into dense fields.
//!
//! Octave `l` has amplitude `1 / 2^l` and period `cell_size / 2^l`. The
//! weighted octaves are summed and the sum is divided by the octave count.
//! The amplitudes are not renormalised, so adding octaves flattens the field.

use super::gradient::GradientNoise;

/// A dense 3D field of samples, indexed `i * height * depth + j * depth + k`.
#[derive(Debug, Clone, PartialEq)]
pub struct Field3D {
    width: usize,
    height: usize,
    depth: usize,
    values: Vec<f64>,
}

impl Field3D {
    fn zeroed(width: usize, height: usize, depth: usize) -> Self {
        Self {
            width,
            height,
            depth,
            values: vec![0.0; width * height * depth],
        }
    }

    /// Extent along the first axis.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Extent along the second axis.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Extent along the third axis.
    pub fn depth(&self) -> usize {
        self.depth
    }

    #[inline]
    fn index(&self, i: usize, j: usize, k: usize) -> usize {
        i * self.height * self.depth + j * self.depth + k
    }

    /// Sample at `(i, j, k)`, or `None` outside the field.
    pub fn get(&self, i: usize, j: usize, k: usize) -> Option<f64> {
        if i >= self.width || j >= self.height || k >= self.depth {
            return None;
        }
        Some(self.values[self.index(i, j, k)])
    }

    /// All samples in index order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Adds `offset` to every sample.
    pub fn add_scalar(&mut self, offset: f64) {
        self.values.iter_mut().for_each(|v| *v += offset);
    }

    /// Multiplies every sample by `factor`.
    pub fn mul_scalar(&mut self, factor: f64) {
        self.values.iter_mut().for_each(|v| *v *= factor);
    }
}

/// A dense 2D field of samples, indexed `i * width + j`.
#[derive(Debug, Clone, PartialEq)]
pub struct Field2D {
    height: usize,
    width: usize,
    values: Vec<f64>,
}

impl Field2D {
    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Sample at row `i`, column `j`, or `None` outside the field.
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        if i >= self.height || j >= self.width {
            return None;
        }
        Some(self.values[i * self.width + j])
    }

    /// All samples in row-major order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

/// Sums octaves of a [`GradientNoise`] into dense fields.
#[derive(Debug, Clone, Default)]
pub struct FractalSampler {
    noise: GradientNoise,
}

impl FractalSampler {
    /// Creates a sampler over the given noise source.
    pub fn new(noise: GradientNoise) -> Self {
        Self { noise }
    }

    /// The underlying noise source.
    pub fn noise(&self) -> &GradientNoise {
        &self.noise
    }

    /// Fractal 3D field sampled from the origin.
    pub fn fractal3d(
        &self,
        width: usize,
        height: usize,
        depth: usize,
        cell_size: f64,
        octave_count: usize,
    ) -> Field3D {
        self.sample3d([0.0; 3], width, height, depth, cell_size, octave_count)
    }

    /// Fractal 3D field whose cell `(0, 0, 0)` sits at `origin` in noise space
    /// (before scaling by the octave period).
    ///
    /// An `octave_count` of zero yields an all-zero field.
    pub fn sample3d(
        &self,
        origin: [f64; 3],
        width: usize,
        height: usize,
        depth: usize,
        cell_size: f64,
        octave_count: usize,
    ) -> Field3D {
        let mut field = Field3D::zeroed(width, height, depth);
        if octave_count == 0 {
            return field;
        }

        for octave in 0..octave_count {
            let (amplitude, period) = octave_weights(octave, cell_size);
            for i in 0..width {
                for j in 0..height {
                    for k in 0..depth {
                        let sample = self.noise.noise3d(
                            (origin[0] + i as f64) / period,
                            (origin[1] + j as f64) / period,
                            (origin[2] + k as f64) / period,
                        );
                        let index = field.index(i, j, k);
                        field.values[index] += sample * amplitude;
                    }
                }
            }
        }

        field.mul_scalar(1.0 / octave_count as f64);
        field
    }

    /// Fractal 2D field with `height` rows and `width` columns.
    ///
    /// An `octave_count` of zero yields an all-zero field.
    pub fn fractal2d(
        &self,
        height: usize,
        width: usize,
        cell_size: f64,
        octave_count: usize,
    ) -> Field2D {
        let mut values = vec![0.0; height * width];
        if octave_count > 0 {
            for octave in 0..octave_count {
                let (amplitude, period) = octave_weights(octave, cell_size);
                for i in 0..height {
                    for j in 0..width {
                        values[i * width + j] +=
                            self.noise.noise2d(i as f64 / period, j as f64 / period) * amplitude;
                    }
                }
            }
            values.iter_mut().for_each(|v| *v /= octave_count as f64);
        }

        Field2D {
            height,
            width,
            values,
        }
    }
}

/// Amplitude and spatial period of an octave.
#[inline]
fn octave_weights(octave: usize, cell_size: f64) -> (f64, f64) {
    let frequency = 2f64.powi(octave as i32);
    (1.0 / frequency, cell_size / frequency)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_dimensions_match_request() {
        let sampler = FractalSampler::default();
        let field = sampler.fractal3d(4, 5, 6, 8.0, 3);
        assert_eq!(field.values().len(), 4 * 5 * 6);
        assert_eq!((field.width(), field.height(), field.depth()), (4, 5, 6));
        assert!(field.get(3, 4, 5).is_some());
        assert!(field.get(4, 0, 0).is_none());

        let flat = sampler.fractal2d(3, 7, 4.0, 2);
        assert_eq!(flat.values().len(), 21);
        assert!(flat.get(2, 6).is_some());
        assert!(flat.get(3, 0).is_none());
    }

    #[test]
    fn sum_is_divided_by_octave_count_without_renormalising() {
        // The origin is a lattice point in every octave, where noise is 0.5.
        let sampler = FractalSampler::default();
        let expected = |octaves: usize| {
            (0..octaves).map(|l| 0.5 / 2f64.powi(l as i32)).sum::<f64>() / octaves as f64
        };

        for octaves in 1..=5 {
            let field = sampler.fractal3d(1, 1, 1, 8.0, octaves);
            let value = field.get(0, 0, 0).unwrap();
            assert!((value - expected(octaves)).abs() < 1e-12, "octaves={octaves}");
        }
        assert!((sampler.fractal3d(1, 1, 1, 8.0, 4).values()[0] - 0.234375).abs() < 1e-12);
    }

    #[test]
    fn more_octaves_flatten_the_field() {
        let sampler = FractalSampler::default();
        let one = sampler.fractal3d(16, 16, 16, 8.0, 1);
        let four = sampler.fractal3d(16, 16, 16, 8.0, 4);
        let max = |f: &Field3D| f.values().iter().cloned().fold(f64::MIN, f64::max);
        assert!(max(&four) < max(&one));
    }

    #[test]
    fn values_stay_within_unit_range() {
        let sampler = FractalSampler::default();
        for value in sampler.fractal3d(16, 16, 16, 8.0, 4).values() {
            assert!((0.0..=1.0).contains(value));
        }
        for value in sampler.fractal2d(16, 16, 4.0, 2).values() {
            assert!((0.0..=1.0).contains(value));
        }
    }

    #[test]
    fn zero_octaves_yield_zero_field() {
        let sampler = FractalSampler::default();
        assert!(sampler.fractal3d(2, 2, 2, 8.0, 0).values().iter().all(|v| *v == 0.0));
        assert!(sampler.fractal2d(2, 2, 8.0, 0).values().iter().all(|v| *v == 0.0));
    }

    #[test]
    fn offset_sampling_shifts_the_field() {
        let sampler = FractalSampler::default();
        let base = sampler.fractal3d(8, 8, 8, 8.0, 2);
        let shifted = sampler.sample3d([2.0, 0.0, 0.0], 6, 8, 8, 8.0, 2);
        for i in 0..6 {
            for j in 0..8 {
                for k in 0..8 {
                    assert_eq!(shifted.get(i, j, k), base.get(i + 2, j, k));
                }
            }
        }
    }
}
