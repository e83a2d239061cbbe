//! Weighted sampling pool: a list of items paired with a `WeightedIndex`.

use crate::error::SamplerError;
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

/// An immutable population of items with precomputed weighted-draw state.
///
/// Weights are proportional, not normalized; `WeightedIndex` renormalizes
/// internally. Zero-weight items stay in the population but can never be
/// drawn. Construction fails for an empty population or an all-zero weight
/// sum, so a pool that exists can always be sampled.
#[derive(Debug, Clone)]
pub(crate) struct WeightedPool<T> {
    items: Vec<T>,
    index: WeightedIndex<f64>,
}

impl<T> WeightedPool<T> {
    /// Build a pool from `(item, weight)` pairs.
    ///
    /// `context` names the distribution in the error when the weights are
    /// unusable.
    pub(crate) fn new(
        context: impl Into<String>,
        entries: Vec<(T, f64)>,
    ) -> Result<Self, SamplerError> {
        let (items, weights): (Vec<T>, Vec<f64>) = entries.into_iter().unzip();
        let index = WeightedIndex::new(&weights)
            .map_err(|_| SamplerError::DegenerateDistribution(context.into()))?;
        Ok(Self { items, index })
    }

    /// Draw one item, weighted.
    pub(crate) fn sample<R: Rng>(&self, rng: &mut R) -> &T {
        &self.items[self.index.sample(rng)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_weighted_draws_follow_weights() {
        let pool =
            WeightedPool::new("test", vec![("heavy", 90.0), ("light", 10.0)]).unwrap();
        let mut rng = StdRng::seed_from_u64(42);

        let mut heavy = 0;
        for _ in 0..10_000 {
            if *pool.sample(&mut rng) == "heavy" {
                heavy += 1;
            }
        }
        // Expected 9000; a seeded run stays well within this band.
        assert!((8700..=9300).contains(&heavy), "heavy drawn {heavy} times");
    }

    #[test]
    fn test_zero_weight_item_never_drawn() {
        let pool =
            WeightedPool::new("test", vec![("live", 1.0), ("dead", 0.0)]).unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..1_000 {
            assert_eq!(*pool.sample(&mut rng), "live");
        }
    }

    #[test]
    fn test_empty_population_rejected() {
        let entries: Vec<(&str, f64)> = vec![];
        let err = WeightedPool::new("empty pool", entries).unwrap_err();
        assert!(matches!(err, SamplerError::DegenerateDistribution(_)));
    }

    #[test]
    fn test_all_zero_weights_rejected() {
        let err =
            WeightedPool::new("zeros", vec![("a", 0.0), ("b", 0.0)]).unwrap_err();
        assert!(matches!(err, SamplerError::DegenerateDistribution(_)));
    }
}
