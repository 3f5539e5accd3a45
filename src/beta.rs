/// LogLog-Beta polynomial coefficients fitted for 2^14 registers.
///
/// `BETA[0]` multiplies the number of zero registers, `BETA[k]` multiplies `ln(z + 1)^k`.
const BETA: [f64; 8] = [
    -0.370393911,
    0.070471823,
    0.17393686,
    0.16339839,
    -0.09237745,
    0.03738027,
    -0.005384159,
    0.00042419,
];

/// Computes LogLog-Beta estimate bias correction using Horner's method.
///
/// Paper: https://arxiv.org/pdf/1612.02284.pdf
/// Wikipedia: https://en.wikipedia.org/wiki/Horner%27s_method
#[inline]
pub(crate) fn beta_horner(z: f64) -> f64 {
    let zl = (z + 1.0).ln();
    let mut res = 0.0;
    for i in (1..8).rev() {
        res = res * zl + BETA[i];
    }
    res * zl + BETA[0] * z
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    /// Straightforward power sum used as reference for Horner's evaluation.
    fn beta_naive(z: f64) -> f64 {
        let zl = (z + 1.0).ln();
        BETA[0] * z + (1..8).map(|i| BETA[i] * zl.powi(i as i32)).sum::<f64>()
    }

    #[test]
    fn test_beta_zero() {
        assert_eq!(beta_horner(0.0), 0.0);
    }

    #[test_case(1.0)]
    #[test_case(100.0)]
    #[test_case(8192.0)]
    #[test_case(16384.0)]
    fn test_beta_matches_power_sum(z: f64) {
        let expected = beta_naive(z);
        assert!((beta_horner(z) - expected).abs() <= 1e-9 * expected.abs().max(1.0));
    }
}
