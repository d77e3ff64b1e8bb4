//! SuperSimplex (`OpenSimplex2S`) gradient noise on the 2D triangular (A2*)
//! lattice, with a whole-area generator.
//!
//! Instead of evaluating the noise independently at every output pixel, the
//! area generator visits each lattice vertex once, splats a precomputed radial
//! attenuation kernel over the affected pixels, and walks vertex-to-vertex
//! through a flood fill confined to the window. Per-pixel work is traded for
//! per-vertex work: at a fixed frequency, every vertex contributes to the same
//! set of relative pixel offsets with the same precomputable weights.
//!
//! # Key types
//!
//! - [`SuperSimplexNoise`] - Seeded noise instance with the reference
//!   point evaluator and the area generator
//! - [`GenerateContext`] - Precomputed per-frequency kernel, reusable across
//!   generate calls
//! - [`NoiseGrid`] - Caller-owned destination buffer the generator
//!   accumulates into
//!
//! # Example
//!
//! ```
//! use hexfield::{GenerateContext, NoiseGrid, SuperSimplexNoise};
//!
//! let noise = SuperSimplexNoise::new(1);
//! let context = GenerateContext::new(1.0 / 64.0)?;
//! let mut grid = NoiseGrid::new(256, 256);
//! noise.generate(&context, &mut grid, 0, 0);
//! # Ok::<(), hexfield::GenerationConfigError>(())
//! ```

pub mod grid;
mod math;
pub mod noise;

pub use grid::NoiseGrid;
pub use noise::{GenerateContext, GenerationConfigError, SuperSimplexNoise};
