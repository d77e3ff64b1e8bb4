//! SuperSimplex noise primitives.
//!
//! This module provides the two entry points of the crate:
//!
//! - [`SuperSimplexNoise`] - Seeded noise instance with standard per-point
//!   evaluation ([`sample`](SuperSimplexNoise::sample))
//! - [`GenerateContext`] + [`generate`](SuperSimplexNoise::generate) - Whole-area
//!   generation via kernel splatting over a vertex flood fill
//!
//! The two paths share the permutation tables and the gradient set but are
//! deliberately separate code: the per-point evaluator is the correctness
//! reference, the area generator is the fast path.

mod area_gen;
mod super_simplex;

pub use area_gen::{GenerateContext, GenerationConfigError};
pub use super_simplex::SuperSimplexNoise;

/// 2D gradient vectors: 12 points of a regular dodecagon, flattened to
/// `(gx, gy)` pairs.
///
/// The magnitude (~18.5185) folds the noise normalization constant into the
/// gradients, so neither evaluation path needs a final rescale. The literals
/// are kept digit-for-digit so outputs stay comparable across ports.
#[rustfmt::skip]
#[allow(clippy::unreadable_literal, clippy::excessive_precision)]
pub(crate) const GRADIENTS_2D: [f64; 24] = [
    0.0, 18.518518518518519,
    9.259259259259260, 16.037507477489605,
    16.037507477489605, 9.259259259259260,
    18.518518518518519, 0.0,
    16.037507477489605, -9.259259259259260,
    9.259259259259260, -16.037507477489605,
    0.0, -18.518518518518519,
    -9.259259259259260, -16.037507477489605,
    -16.037507477489605, -9.259259259259260,
    -18.518518518518519, 0.0,
    -16.037507477489605, 9.259259259259260,
    -9.259259259259260, 16.037507477489605,
];

#[cfg(test)]
mod tests {
    use super::GRADIENTS_2D;

    #[test]
    fn gradients_lie_on_a_dodecagon() {
        let expected = 18.518518518518519_f64;
        for pair in GRADIENTS_2D.chunks_exact(2) {
            let magnitude = (pair[0] * pair[0] + pair[1] * pair[1]).sqrt();
            assert!(
                (magnitude - expected).abs() < 1e-9,
                "gradient ({}, {}) has magnitude {magnitude}",
                pair[0],
                pair[1]
            );
        }
    }
}
