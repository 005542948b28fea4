//! Nearest allowed value lookup for off-scale numbers.

use crate::tokens::Px;
use std::collections::BTreeSet;

/// Return the allowed value closest to `target`.
///
/// Candidates are visited in ascending order and only a strictly smaller
/// distance replaces the current best, so ties resolve to the smaller value.
/// Returns `None` for an empty set.
pub fn closest(target: f64, allowed: &BTreeSet<Px>) -> Option<f64> {
    let mut best: Option<(f64, f64)> = None;
    for &Px(v) in allowed {
        let diff = (target - v).abs();
        match best {
            Some((_, d)) if diff >= d => {}
            _ => best = Some((v, diff)),
        }
    }
    best.map(|(v, _)| v)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(values: &[f64]) -> BTreeSet<Px> {
        values.iter().copied().map(Px).collect()
    }

    #[test]
    fn test_closest_picks_smallest_distance() {
        let s = set(&[0.0, 8.0, 16.0, 24.0]);
        assert_eq!(closest(17.0, &s), Some(16.0));
        assert_eq!(closest(23.0, &s), Some(24.0));
        assert_eq!(closest(500.0, &s), Some(24.0));
    }

    #[test]
    fn test_closest_tie_prefers_smaller_value() {
        let s = set(&[24.0, 16.0, 8.0, 0.0]);
        assert_eq!(closest(12.0, &s), Some(8.0));
        assert_eq!(closest(20.0, &s), Some(16.0));
    }

    #[test]
    fn test_closest_exact_and_fractional() {
        let s = set(&[4.0, 8.0]);
        assert_eq!(closest(8.0, &s), Some(8.0));
        assert_eq!(closest(5.5, &s), Some(4.0));
        assert_eq!(closest(6.5, &s), Some(8.0));
    }

    #[test]
    fn test_closest_empty_set_is_none() {
        assert_eq!(closest(10.0, &BTreeSet::new()), None);
    }
}
