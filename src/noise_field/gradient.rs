//! Classic lattice gradient noise in two and three dimensions.
//!
//! Values are remapped from `[-1, 1]` into `[0, 1]`. The permutation table is
//! either the classic fixed table or a seeded shuffle of the identity table.

use ::noise::NoiseFn;

/// Number of distinct lattice hashes.
pub const PERMUTATION_SIZE: usize = 256;

/// The classic 256-entry permutation table.
const CLASSIC_PERMUTATION: [u8; PERMUTATION_SIZE] = [
    151, 160, 137, 91, 90, 15, 131, 13, 201, 95, 96, 53, 194, 233, 7, 225, 140, 36, 103, 30, 69,
    142, 8, 99, 37, 240, 21, 10, 23, 190, 6, 148, 247, 120, 234, 75, 0, 26, 197, 62, 94, 252, 219,
    203, 117, 35, 11, 32, 57, 177, 33, 88, 237, 149, 56, 87, 174, 20, 125, 136, 171, 168, 68, 175,
    74, 165, 71, 134, 139, 48, 27, 166, 77, 146, 158, 231, 83, 111, 229, 122, 60, 211, 133, 230,
    220, 105, 92, 41, 55, 46, 245, 40, 244, 102, 143, 54, 65, 25, 63, 161, 1, 216, 80, 73, 209, 76,
    132, 187, 208, 89, 18, 169, 200, 196, 135, 130, 116, 188, 159, 86, 164, 100, 109, 198, 173,
    186, 3, 64, 52, 217, 226, 250, 124, 123, 5, 202, 38, 147, 118, 126, 255, 82, 85, 212, 207, 206,
    59, 227, 47, 16, 58, 17, 182, 189, 28, 42, 223, 183, 170, 213, 119, 248, 152, 2, 44, 154, 163,
    70, 221, 153, 101, 155, 167, 43, 172, 9, 129, 22, 39, 253, 19, 98, 108, 110, 79, 113, 224, 232,
    178, 185, 112, 104, 218, 246, 97, 228, 251, 34, 242, 193, 238, 210, 144, 12, 191, 179, 162,
    241, 81, 51, 145, 235, 249, 14, 239, 107, 49, 192, 214, 31, 181, 199, 106, 157, 184, 84, 204,
    176, 115, 121, 50, 45, 127, 4, 150, 254, 138, 236, 205, 93, 222, 114, 67, 29, 24, 72, 243, 141,
    128, 195, 78, 66, 215, 61, 156, 180,
];

/// Deterministic coherent noise built from lattice gradients.
///
/// The table is stored doubled (512 entries) so that `p[p[x] + y + 1]`
/// never needs an explicit wrap.
///
/// # Examples
///
/// ```
/// use voxel_terrain::noise_field::GradientNoise;
///
/// let noise = GradientNoise::new();
/// let value = noise.noise3d(1.5, 2.25, 0.75);
/// assert!((0.0..=1.0).contains(&value));
/// assert_eq!(value, noise.noise3d(1.5, 2.25, 0.75));
/// ```
#[derive(Clone)]
pub struct GradientNoise {
    permutation: [u8; PERMUTATION_SIZE * 2],
    seed: Option<u64>,
}

impl GradientNoise {
    /// Creates noise backed by the classic fixed permutation table.
    pub fn new() -> Self {
        Self::from_table(CLASSIC_PERMUTATION, None)
    }

    /// Creates noise backed by a Fisher-Yates shuffle of the identity table.
    ///
    /// The same seed always produces the same table.
    pub fn with_seed(seed: u64) -> Self {
        let mut table = [0u8; PERMUTATION_SIZE];
        for (i, entry) in table.iter_mut().enumerate() {
            *entry = i as u8;
        }
        fastrand::Rng::with_seed(seed).shuffle(&mut table);
        Self::from_table(table, Some(seed))
    }

    fn from_table(table: [u8; PERMUTATION_SIZE], seed: Option<u64>) -> Self {
        let mut permutation = [0u8; PERMUTATION_SIZE * 2];
        permutation[..PERMUTATION_SIZE].copy_from_slice(&table);
        permutation[PERMUTATION_SIZE..].copy_from_slice(&table);
        Self { permutation, seed }
    }

    /// The seed the table was shuffled with, or `None` for the classic table.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    #[inline]
    fn p(&self, index: usize) -> usize {
        self.permutation[index] as usize
    }

    /// Samples 3D noise. The result is in `[0, 1]`.
    pub fn noise3d(&self, x: f64, y: f64, z: f64) -> f64 {
        let (xi, xf) = lattice(x);
        let (yi, yf) = lattice(y);
        let (zi, zf) = lattice(z);
        let u = fade(xf);
        let v = fade(yf);
        let w = fade(zf);

        let hash = |dx: usize, dy: usize, dz: usize| {
            self.p(self.p(self.p(xi + dx) + yi + dy) + zi + dz)
        };

        let aaa = hash(0, 0, 0);
        let aba = hash(0, 1, 0);
        let aab = hash(0, 0, 1);
        let abb = hash(0, 1, 1);
        let baa = hash(1, 0, 0);
        let bab = hash(1, 0, 1);
        let bba = hash(1, 1, 0);
        let bbb = hash(1, 1, 1);

        let x1 = lerp(grad3(aaa, xf, yf, zf), grad3(baa, xf - 1.0, yf, zf), u);
        let x2 = lerp(grad3(aba, xf, yf - 1.0, zf), grad3(bba, xf - 1.0, yf - 1.0, zf), u);
        let y1 = lerp(x1, x2, v);

        let x1 = lerp(grad3(aab, xf, yf, zf - 1.0), grad3(bab, xf - 1.0, yf, zf - 1.0), u);
        let x2 = lerp(
            grad3(abb, xf, yf - 1.0, zf - 1.0),
            grad3(bbb, xf - 1.0, yf - 1.0, zf - 1.0),
            u,
        );
        let y2 = lerp(x1, x2, v);

        to_unit_range(lerp(y1, y2, w))
    }

    /// Samples 2D noise. The result is in `[0, 1]`.
    pub fn noise2d(&self, x: f64, y: f64) -> f64 {
        let (xi, xf) = lattice(x);
        let (yi, yf) = lattice(y);
        let u = fade(xf);
        let v = fade(yf);

        let hash = |dx: usize, dy: usize| self.p(self.p(xi + dx) + yi + dy);

        let aa = hash(0, 0);
        let ab = hash(0, 1);
        let ba = hash(1, 0);
        let bb = hash(1, 1);

        let x1 = lerp(grad2(aa, xf, yf), grad2(ba, xf - 1.0, yf), u);
        let x2 = lerp(grad2(ab, xf, yf - 1.0), grad2(bb, xf - 1.0, yf - 1.0), u);

        to_unit_range(lerp(x1, x2, v))
    }
}

impl Default for GradientNoise {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for GradientNoise {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GradientNoise")
            .field("seed", &self.seed)
            .finish_non_exhaustive()
    }
}

impl NoiseFn<f64, 2> for GradientNoise {
    fn get(&self, point: [f64; 2]) -> f64 {
        self.noise2d(point[0], point[1])
    }
}

impl NoiseFn<f64, 3> for GradientNoise {
    fn get(&self, point: [f64; 3]) -> f64 {
        self.noise3d(point[0], point[1], point[2])
    }
}

/// Splits a coordinate into its wrapped lattice cell and fractional offset.
#[inline]
fn lattice(value: f64) -> (usize, f64) {
    let floor = value.floor();
    let cell = (floor as i64).rem_euclid(PERMUTATION_SIZE as i64) as usize;
    (cell, value - floor)
}

/// `6t^5 - 15t^4 + 10t^3`
#[inline]
fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + t * (b - a)
}

#[inline]
fn to_unit_range(value: f64) -> f64 {
    ((value + 1.0) / 2.0).clamp(0.0, 1.0)
}

#[inline]
fn grad3(hash: usize, x: f64, y: f64, z: f64) -> f64 {
    match hash & 0xF {
        0x0 => x + y,
        0x1 => -x + y,
        0x2 => x - y,
        0x3 => -x - y,
        0x4 => x + z,
        0x5 => -x + z,
        0x6 => x - z,
        0x7 => -x - z,
        0x8 => y + z,
        0x9 => -y + z,
        0xA => y - z,
        0xB => -y - z,
        0xC => y + x,
        0xD => -y + z,
        0xE => y - x,
        _ => -y - z,
    }
}

#[inline]
fn grad2(hash: usize, x: f64, y: f64) -> f64 {
    match hash & 0x3 {
        0x0 => x + y,
        0x1 => -x + y,
        0x2 => x - y,
        _ => -x - y,
    }
}
