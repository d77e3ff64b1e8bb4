//! SuperSimplex (`OpenSimplex2S`) 2D noise: seeded instance and standard
//! point evaluation.
//!
//! The evaluator works on the A2* (triangular) lattice: input coordinates are
//! skewed into lattice space, an 8-way cell classification picks the four
//! candidate vertices out of a static lookup, and each in-range vertex
//! contributes `(2/3 - d²)⁴ · (g · d)`.

use crate::math::{SKEW_2D, UNSKEW_2D, fast_floor};
use crate::noise::GRADIENTS_2D;

/// Multiplier of the permutation-shuffle linear congruence.
const PERM_LCG_MULTIPLIER: i64 = 6364136223846793005;
/// Increment of the permutation-shuffle linear congruence.
const PERM_LCG_INCREMENT: i64 = 1442695040888963407;

/// Seeded SuperSimplex noise instance.
///
/// Owns two parallel 1024-entry tables: `perm` is a seeded permutation of
/// `0..1024`, and `perm_grad[i] = (perm[i] % 12) * 2` caches the base index
/// into [`GRADIENTS_2D`] for that slot. Instances are immutable once built
/// and can be shared freely across threads behind a reference.
#[derive(Debug, Clone)]
pub struct SuperSimplexNoise {
    perm: [u16; 1024],
    perm_grad: [u16; 1024],
}

impl SuperSimplexNoise {
    /// Build the permutation tables from a 64-bit seed.
    ///
    /// A Fisher-Yates shuffle walks the source array from the top index down,
    /// advancing the seed through a 64-bit linear congruence at every step.
    /// The pick index is reduced with [`i64::rem_euclid`], which reproduces
    /// the signed-modulo-plus-fixup of the original tables for every seed,
    /// negative seeds included.
    #[must_use]
    pub fn new(seed: i64) -> Self {
        let mut perm = [0u16; 1024];
        let mut perm_grad = [0u16; 1024];
        let mut source = [0u16; 1024];
        for (i, slot) in source.iter_mut().enumerate() {
            *slot = i as u16;
        }

        let mut state = seed;
        for i in (0..1024usize).rev() {
            state = state
                .wrapping_mul(PERM_LCG_MULTIPLIER)
                .wrapping_add(PERM_LCG_INCREMENT);
            let r = state.wrapping_add(31).rem_euclid(i as i64 + 1) as usize;
            perm[i] = source[r];
            perm_grad[i] = (perm[i] % 12) * 2;
            source[r] = source[i];
        }

        Self { perm, perm_grad }
    }

    /// Gradient vector assigned to the lattice vertex `(xsv, ysv)`.
    ///
    /// The base index `perm_grad[perm[xsv & 1023] ^ (ysv & 1023)]` is always
    /// even and in `0..=22`, selecting one of the 12 dodecagon gradients.
    #[inline]
    pub(crate) fn gradient(&self, xsv: i32, ysv: i32) -> (f64, f64) {
        let pxm = (xsv & 1023) as usize;
        let pym = (ysv & 1023) as usize;
        let gi = usize::from(self.perm_grad[usize::from(self.perm[pxm]) ^ pym]);
        (GRADIENTS_2D[gi], GRADIENTS_2D[gi + 1])
    }

    /// Sample the noise at a single point.
    ///
    /// This is the standard per-point evaluation path, used as the
    /// correctness reference for [`generate`](Self::generate). Returns a
    /// value typically in `[-1, 1]`; values marginally outside occur near
    /// gradient peaks, so clamp when a strict range is required.
    #[must_use]
    #[allow(clippy::similar_names)]
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        // Skew into A2* lattice coordinates.
        let s = SKEW_2D * (x + y);
        let xs = x + s;
        let ys = y + s;

        // Base cell and offsets within it.
        let xsb = fast_floor(xs);
        let ysb = fast_floor(ys);
        let xsi = xs - f64::from(xsb);
        let ysi = ys - f64::from(ysb);

        // 8-way cell classification from three sign tests, shifted into bits
        // 2..4 so it strides the 4-entry lookup groups directly.
        let a = (xsi + ysi) as i32;
        let index = ((a << 2)
            | (((xsi - ysi / 2.0 + 1.0 - f64::from(a) / 2.0) as i32) << 3)
            | (((ysi - xsi / 2.0 + 1.0 - f64::from(a) / 2.0) as i32) << 4)) as usize;

        let ssi = (xsi + ysi) * UNSKEW_2D;
        let xi = xsi + ssi;
        let yi = ysi + ssi;

        let mut value = 0.0;
        for corner in &LOOKUP_2D[index..index + 4] {
            let dx = xi + corner.dx;
            let dy = yi + corner.dy;
            let attn = 2.0 / 3.0 - dx * dx - dy * dy;
            if attn <= 0.0 {
                continue;
            }

            let (gx, gy) = self.gradient(xsb + corner.xsv, ysb + corner.ysv);
            let extrapolation = gx * dx + gy * dy;
            let attn = attn * attn;
            value += attn * attn * extrapolation;
        }
        value
    }
}

/// A contributing vertex of a simplex cell: skewed integer coordinates plus
/// the unskewed offset from the vertex back to the cell origin.
#[derive(Debug, Clone, Copy)]
struct LatticePoint {
    xsv: i32,
    ysv: i32,
    dx: f64,
    dy: f64,
}

impl LatticePoint {
    #[allow(clippy::cast_lossless)]
    const fn new(xsv: i32, ysv: i32) -> Self {
        let ssv = (xsv + ysv) as f64 * UNSKEW_2D;
        Self {
            xsv,
            ysv,
            dx: -(xsv as f64) - ssv,
            dy: -(ysv as f64) - ssv,
        }
    }
}

/// Static corner lookup: for each of the 8 cell cases, the 4 vertices that
/// can contribute to a point classified into that case.
static LOOKUP_2D: [LatticePoint; 32] = build_lookup_2d();

const fn build_lookup_2d() -> [LatticePoint; 32] {
    let mut table = [LatticePoint::new(0, 0); 32];
    let mut case = 0;
    while case < 8 {
        let (i1, j1) = if case & 1 == 0 {
            if case & 2 == 0 { (-1, 0) } else { (1, 0) }
        } else if case & 2 != 0 {
            (2, 1)
        } else {
            (0, 1)
        };
        let (i2, j2) = if case & 1 == 0 {
            if case & 4 == 0 { (0, -1) } else { (0, 1) }
        } else if case & 4 != 0 {
            (1, 2)
        } else {
            (1, 0)
        };
        table[case * 4] = LatticePoint::new(0, 0);
        table[case * 4 + 1] = LatticePoint::new(1, 1);
        table[case * 4 + 2] = LatticePoint::new(i1, j1);
        table[case * 4 + 3] = LatticePoint::new(i2, j2);
        case += 1;
    }
    table
}
