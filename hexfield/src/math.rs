//! Lattice math shared by the point evaluator and the area generator.

/// Skew factor for the 2D A2* lattice: `(sqrt(3) - 1) / 2`.
///
/// Kept as the exact literal the gradient tables were generated against.
pub(crate) const SKEW_2D: f64 = 0.366025403784439;

/// Unskew factor, negated so it can be applied by addition: `-(3 - sqrt(3)) / 6`.
pub(crate) const UNSKEW_2D: f64 = -0.211324865405187;

/// Floor for doubles in normal range, without the libm call.
///
/// Truncates toward zero, then corrects downward for negative inputs.
#[inline]
#[must_use]
pub(crate) fn fast_floor(x: f64) -> i32 {
    let xi = x as i32;
    if x < f64::from(xi) { xi - 1 } else { xi }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fast_floor_matches_floor() {
        for &x in &[
            -3.0, -2.75, -2.0, -1.5, -1.0, -0.5, -0.25, 0.0, 0.25, 0.5, 1.0, 1.5, 2.0, 2.75,
            1234.5678, -1234.5678,
        ] {
            #[allow(clippy::float_cmp)]
            {
                assert_eq!(f64::from(fast_floor(x)), x.floor(), "fast_floor({x})");
            }
        }
    }
}
