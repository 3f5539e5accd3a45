//! Expected number of registers two independent sketches share by chance.
//!
//! Two sketches built from disjoint sets still hold identical registers whenever the winning
//! elements of a register happen to agree on both rank and signature. Similarity subtracts this
//! expectation from the observed number of matching registers.
//!
//! Paper: https://arxiv.org/pdf/1710.08436.pdf (Algorithm 2.1.5)

use tracing::trace;

use crate::{M, P, Q, R};

/// Asymptotic collision constant for large cardinalities.
const C: f64 = 0.169919487159739093975315012348;

/// Return expected number of colliding registers for sketches of estimated cardinalities `n` and `m`.
pub(crate) fn approx_expected_collisions(n: f64, m: f64) -> f64 {
    let (n, m) = if n < m { (m, n) } else { (n, m) };

    if n > 2f64.powi(((1 << Q) + R) as i32) {
        trace!(n, m, regime = "saturated", "expected collisions");
        u64::MAX as f64
    } else if n > 2f64.powi((P + 5) as i32) {
        trace!(n, m, regime = "approximate", "expected collisions");
        let d = (4.0 * n / m) / (1.0 + n / m).powi(2);
        C * 2f64.powi(P as i32 - R as i32) * d
    } else {
        trace!(n, m, regime = "exact", "expected collisions");
        expected_collisions(n, m)
    }
}

/// Sum collision probability over every (rank, signature) cell of a single register.
///
/// The sum is a per-register probability, so it is scaled by the register count `M = 2^P`
/// (not by `P`) and rounded to the nearest whole register.
fn expected_collisions(n: f64, m: f64) -> f64 {
    let two_q: usize = 1 << Q;
    let two_r: usize = 1 << R;

    let mut x = 0.0;
    for i in 1..=two_q {
        for j in 1..=two_r {
            let (b1, b2) = if i != two_q {
                let den = 2f64.powi((P + R + i) as i32);
                ((two_r + j) as f64 / den, (two_r + j + 1) as f64 / den)
            } else {
                let den = 2f64.powi((P + R + i - 1) as i32);
                (j as f64 / den, (j + 1) as f64 / den)
            };

            let prx = pow_complement(b2, n) - pow_complement(b1, n);
            let pry = pow_complement(b2, m) - pow_complement(b1, m);
            x += prx * pry;
        }
    }

    (x * M as f64 + 0.5).floor()
}

/// Return `(1 - b)^n` without rounding `1 - b` to one for tiny `b`.
#[inline]
fn pow_complement(b: f64, n: f64) -> f64 {
    (n * (-b).ln_1p()).exp()
}
