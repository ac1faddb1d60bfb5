//! Weighted (roulette-wheel) selection over candidate states

use rand::{Rng, distr::StandardUniform};

/// Normalise weights into selection probabilities.
///
/// Each probability is `weight / total`. Returns an empty vector for empty
/// input; a non-positive total falls back to a uniform distribution.
///
/// # Examples
///
/// ```
/// use hexapawn::selector::chances;
///
/// let probabilities = chances(&[1.0, 2.0, 1.0]);
/// assert_eq!(probabilities, vec![0.25, 0.5, 0.25]);
/// ```
pub fn chances(weights: &[f64]) -> Vec<f64> {
    if weights.is_empty() {
        return Vec::new();
    }

    let total: f64 = weights.iter().sum();
    if total <= 0.0 || !total.is_finite() {
        let uniform = 1.0 / weights.len() as f64;
        return vec![uniform; weights.len()];
    }

    weights.iter().map(|w| w / total).collect()
}

/// Draw an index with probability proportional to its weight.
///
/// Draws a threshold uniformly from `[0, total)` and returns the first index
/// whose cumulative weight exceeds it. Returns `None` only for empty input.
pub fn choose_index<R: Rng>(rng: &mut R, weights: &[f64]) -> Option<usize> {
    if weights.is_empty() {
        return None;
    }

    let total: f64 = weights.iter().sum();
    if total <= 0.0 || !total.is_finite() {
        return Some(rng.random_range(0..weights.len()));
    }

    let threshold = rng.sample::<f64, _>(StandardUniform) * total;
    let mut cumulative = 0.0;
    for (index, weight) in weights.iter().enumerate() {
        cumulative += weight;
        if threshold < cumulative {
            return Some(index);
        }
    }

    // Rounding can leave the threshold just past the last cumulative sum
    Some(weights.len() - 1)
}

/// Sample an item from `(item, weight)` pairs.
///
/// # Examples
///
/// ```
/// use hexapawn::selector::weighted_sample;
/// use rand::{SeedableRng, rngs::StdRng};
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let only = weighted_sample(&mut rng, &[("a", 1.0)]);
/// assert_eq!(only, Some("a"));
/// ```
pub fn weighted_sample<R, T>(rng: &mut R, items: &[(T, f64)]) -> Option<T>
where
    R: Rng,
    T: Clone,
{
    let weights: Vec<f64> = items.iter().map(|(_, w)| *w).collect();
    choose_index(rng, &weights).map(|index| items[index].0.clone())
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn test_chances_sum_to_one() {
        let probabilities = chances(&[0.1, 0.1, 10.0]);
        let total: f64 = probabilities.iter().sum();
        assert!((total - 1.0).abs() < 1e-12);
        assert!(probabilities.iter().all(|p| (0.0..=1.0).contains(p)));
    }

    #[test]
    fn test_chances_empty() {
        assert!(chances(&[]).is_empty());
    }

    #[test]
    fn test_choose_index_empty() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(choose_index(&mut rng, &[]), None);
    }

    #[test]
    fn test_single_candidate_always_chosen() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            assert_eq!(choose_index(&mut rng, &[0.1]), Some(0));
        }
    }
}
