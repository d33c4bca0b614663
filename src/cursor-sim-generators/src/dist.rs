//! Small hand-rolled sampling helpers built directly on `rand`'s
//! uniform draws — the corpus this workspace draws from never pulls in
//! a distributions crate, so Poisson/lognormal/geometric sampling is
//! implemented here instead of depending on one.

use rand::Rng;

/// Knuth's algorithm: number of events of a Poisson process with rate
/// `lambda` in one unit of time. `lambda <= 0.0` always yields `0`.
pub fn poisson(rng: &mut impl Rng, lambda: f64) -> u64 {
    if lambda <= 0.0 {
        return 0;
    }
    let l = (-lambda).exp();
    let mut k: u64 = 0;
    let mut p = 1.0_f64;
    loop {
        k += 1;
        p *= rng.random::<f64>();
        if p <= l {
            break;
        }
    }
    k - 1
}

/// One standard-normal draw via the Box-Muller transform.
fn standard_normal(rng: &mut impl Rng) -> f64 {
    let u1: f64 = rng.random_range(f64::EPSILON..1.0);
    let u2: f64 = rng.random();
    (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()
}

/// A right-skewed draw with the given median and shape. `sigma` widens
/// the tail; `median` sets the distribution's center (`exp(mu) ==
/// median`).
pub fn lognormal_like(rng: &mut impl Rng, median: f64, sigma: f64) -> f64 {
    let mu = median.max(1.0).ln();
    (mu + sigma * standard_normal(rng)).exp()
}

/// A Bernoulli trial with success probability `p`, clamped to `[0,1]`.
pub fn bernoulli(rng: &mut impl Rng, p: f64) -> bool {
    rng.random_bool(p.clamp(0.0, 1.0))
}

/// Number of Bernoulli(`p`) trials until (and including) the first
/// success, capped at `max` to keep tails bounded. Used for review
/// iteration counts.
pub fn geometric_like(rng: &mut impl Rng, mean: f64, max: u32) -> u32 {
    let p = (1.0 / mean.max(1.0)).clamp(0.01, 1.0);
    let mut k = 1;
    while k < max && !bernoulli(rng, p) {
        k += 1;
    }
    k
}

/// A uniform draw in `[lo, hi)`.
pub fn uniform_f64(rng: &mut impl Rng, lo: f64, hi: f64) -> f64 {
    rng.random_range(lo..hi)
}

/// Pick a weighted index, or a uniform index when `weights` is `None`
/// or its length does not match `len`.
pub fn weighted_index(rng: &mut impl Rng, len: usize, weights: Option<&[f64]>) -> usize {
    if len == 0 {
        return 0;
    }
    match weights {
        Some(w) if w.len() == len && w.iter().sum::<f64>() > 0.0 => {
            let total: f64 = w.iter().sum();
            let mut x = uniform_f64(rng, 0.0, total);
            for (i, weight) in w.iter().enumerate() {
                if x < *weight {
                    return i;
                }
                x -= weight;
            }
            len - 1
        }
        _ => rng.random_range(0..len),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::ChaCha8Rng;
    use rand::SeedableRng;

    #[test]
    fn poisson_zero_rate_is_always_zero() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..20 {
            assert_eq!(poisson(&mut rng, 0.0), 0);
        }
    }

    #[test]
    fn poisson_average_tracks_lambda() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let lambda = 4.0;
        let n = 20_000;
        let sum: u64 = (0..n).map(|_| poisson(&mut rng, lambda)).sum();
        let mean = sum as f64 / n as f64;
        assert!((mean - lambda).abs() < 0.15, "mean={mean}");
    }

    #[test]
    fn lognormal_like_is_always_positive() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..1000 {
            assert!(lognormal_like(&mut rng, 50.0, 0.6) > 0.0);
        }
    }

    #[test]
    fn geometric_like_respects_cap() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        for _ in 0..1000 {
            let k = geometric_like(&mut rng, 1.6, 10);
            assert!((1..=10).contains(&k));
        }
    }

    #[test]
    fn weighted_index_without_weights_is_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for _ in 0..100 {
            assert!(weighted_index(&mut rng, 4, None) < 4);
        }
    }
}
