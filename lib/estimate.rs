//! Estimating the size of a space from the number of collisions observed when
//! sampling it.
//!
//! Drawing `m` items independently and uniformly from a space of size `N`
//! yields, on average,
//!
//! > E[duplicates] = m − N + N (1 − 1/N)<sup>m</sup>
//!
//! repeats (the birthday problem). This is strictly decreasing in `N` but has
//! no closed-form inverse, so [`estimate_space_size`] inverts it by repeated
//! bracketing.

use tracing::{ trace, warn };
use crate::error::{ Error, Result };

/// Number of evenly spaced posts, including both ends, evaluated across the
/// bracket at every step.
pub const POSTS: u64 = 10;

/// Expected number of duplicates among `sample_num` uniform draws from a
/// space of `size` elements.
///
/// A space of size zero is treated as size one.
pub fn expected_duplicates(sample_num: u64, size: u64) -> f64 {
    let m = sample_num as f64;
    if size <= 1 { return (m - 1.0).max(0.0); }
    let n = size as f64;
    // N (1 - 1/N)^m - N, written to avoid cancellation when N >> m
    m + n * (m * (-1.0 / n).ln_1p()).exp_m1()
}

/// Estimate the size of a space given that `observed` duplicates were found
/// among `sample_num` draws, searching within `[lower, upper]`.
///
/// If `observed` is zero, nothing distinguishes a large space from an
/// arbitrarily larger one, and `upper` is returned as is. Otherwise the
/// bracket is repeatedly split by [`POSTS`] evenly spaced posts; the post
/// whose expected duplicate count is closest to `observed` (the smallest one,
/// on ties) is kept, and the bracket shrinks to the gap between it and the
/// neighboring post on the side where the true size must lie. The search
/// returns the best post once its expectation is within 1 of `observed`, once
/// the bracket is too narrow to hold `POSTS` distinct posts, or once the
/// required neighbor would fall outside the bracket.
///
/// Fails if `lower == 0` or `lower > upper`.
pub fn estimate_space_size(sample_num: u64, observed: u64, lower: u64, upper: u64)
    -> Result<u64>
{
    if lower == 0 || lower > upper {
        return Err(Error::InvalidBracket { lower, upper });
    }
    if observed == 0 {
        warn!(sample_num, upper, "no duplicates observed; returning upper bound");
        return Ok(upper);
    }
    let target = observed as f64;
    let mut lo = lower;
    let mut hi = upper;
    loop {
        let span = hi - lo;
        let posts: Vec<u64>
            = (0..POSTS)
            .map(|i| lo + ((span as u128 * i as u128) / (POSTS - 1) as u128) as u64)
            .collect();
        let (best, dist)
            = posts.iter()
            .map(|p| (expected_duplicates(sample_num, *p) - target).abs())
            .enumerate()
            .fold((0, f64::INFINITY), |(kb, db), (k, d)| {
                if d < db { (k, d) } else { (kb, db) }
            });
        trace!(lo, hi, best = posts[best], dist, "estimator step");
        if dist < 1.0 || span < POSTS { return Ok(posts[best]); }
        if expected_duplicates(sample_num, posts[best]) > target {
            // too many duplicates expected: the space is larger
            if best + 1 == posts.len() { return Ok(posts[best]); }
            lo = posts[best];
            hi = posts[best + 1];
        } else {
            if best == 0 { return Ok(posts[best]); }
            lo = posts[best - 1];
            hi = posts[best];
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn expectation_values() {
        // (1 - 1/1000)^1000 ~ 1/e
        let e = expected_duplicates(1000, 1000);
        assert!((e - 367.695).abs() < 1e-2, "{}", e);
        assert_eq!(expected_duplicates(10, 1), 9.0);
        assert_eq!(expected_duplicates(0, 1), 0.0);
        assert!(expected_duplicates(1, 50) .abs() < 1e-9);
        // m^2 / 2N for N >> m
        let e = expected_duplicates(100, 1_000_000_000_000);
        assert!((e - 100.0 * 99.0 / 2e12).abs() < 1e-12, "{}", e);
    }

    #[test]
    fn expectation_decreasing() {
        let mut prev = f64::INFINITY;
        for size in (1..5000).step_by(37) {
            let e = expected_duplicates(1000, size);
            assert!(e < prev);
            prev = e;
        }
    }

    #[test]
    fn recovers_known_size() {
        let est = estimate_space_size(1000, 368, 1, 2000).unwrap();
        assert!((990..=1010).contains(&est), "{}", est);

        for size in [500_u64, 20_736, 50_625] {
            let observed = expected_duplicates(size, size).round() as u64;
            let est = estimate_space_size(size, observed, 1, 10 * size).unwrap();
            let rel = (est as f64 - size as f64).abs() / size as f64;
            assert!(rel < 0.01, "{} {}", size, est);
        }
    }

    #[test]
    fn zero_duplicates_returns_upper() {
        assert_eq!(estimate_space_size(1000, 0, 1, 77).unwrap(), 77);
        assert_eq!(estimate_space_size(5, 0, 3, 3).unwrap(), 3);
    }

    #[test]
    fn edge_fallbacks() {
        // root lies below the bracket
        assert_eq!(estimate_space_size(1000, 368, 5000, 10_000).unwrap(), 5000);
        // root lies above the bracket
        assert_eq!(estimate_space_size(1000, 368, 1, 100).unwrap(), 100);
        // degenerate bracket
        assert_eq!(estimate_space_size(1000, 368, 7, 7).unwrap(), 7);
    }

    #[test]
    fn invalid_brackets() {
        assert!(matches!(
            estimate_space_size(10, 1, 0, 10),
            Err(Error::InvalidBracket { lower: 0, upper: 10 }),
        ));
        assert!(matches!(
            estimate_space_size(10, 1, 11, 10),
            Err(Error::InvalidBracket { lower: 11, upper: 10 }),
        ));
    }
}
