use pokerga_engine::Organism;
use pokerga_evaluator::ScoredResult;
use rand::{
    RngCore,
    seq::{IndexedRandom, SliceRandom},
};

use super::Selector;

/// Carries the best `count` organisms over unchanged.
#[derive(Debug, Clone, Copy)]
pub struct ElitistSelector {
    count: usize,
}

impl ElitistSelector {
    #[must_use]
    pub fn new(count: usize) -> Self {
        Self { count }
    }
}

impl Selector for ElitistSelector {
    fn select<'a>(
        &self,
        results: &[&'a ScoredResult],
        _rng: &mut dyn RngCore,
    ) -> Vec<&'a Organism> {
        results
            .iter()
            .take(self.count)
            .map(|&r| r.organism())
            .collect()
    }

    fn can_mutate(&self) -> bool {
        false
    }
}

/// Picks `count` organisms uniformly at random, without replacement, as
/// material for mutation.
#[derive(Debug, Clone, Copy)]
pub struct RandomSelector {
    count: usize,
}

impl RandomSelector {
    #[must_use]
    pub fn new(count: usize) -> Self {
        Self { count }
    }
}

impl Selector for RandomSelector {
    fn select<'a>(&self, results: &[&'a ScoredResult], rng: &mut dyn RngCore) -> Vec<&'a Organism> {
        let mut selected = results
            .choose_multiple(rng, self.count)
            .map(|&r| r.organism())
            .collect::<Vec<_>>();
        // choose_multiple does not randomize the order, and crossover pairs
        // neighbors
        selected.shuffle(rng);
        selected
    }

    fn can_mutate(&self) -> bool {
        true
    }
}

/// Carries every organism over unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentitySelector;

impl Selector for IdentitySelector {
    fn select<'a>(
        &self,
        results: &[&'a ScoredResult],
        _rng: &mut dyn RngCore,
    ) -> Vec<&'a Organism> {
        results.iter().map(|&r| r.organism()).collect()
    }

    fn can_mutate(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    use super::*;
    use crate::operator::test_support::scored;

    fn names(organisms: &[&Organism]) -> Vec<String> {
        organisms.iter().map(|o| o.name().to_owned()).collect()
    }

    #[test]
    fn test_elitist_takes_top() {
        let results = (0..5).map(|i| scored(i, &[1])).collect::<Vec<_>>();
        let refs = results.iter().collect::<Vec<_>>();
        let mut rng = Pcg32::seed_from_u64(0);

        let selected = ElitistSelector::new(2).select(&refs, &mut rng);
        assert_eq!(names(&selected), ["00000000", "00000001"]);
        assert!(!ElitistSelector::new(2).can_mutate());

        let all = ElitistSelector::new(10).select(&refs, &mut rng);
        assert_eq!(all.len(), 5);
    }

    #[test]
    fn test_random_never_repeats() {
        let results = (0..30).map(|i| scored(i, &[1])).collect::<Vec<_>>();
        let refs = results.iter().collect::<Vec<_>>();
        let mut rng = Pcg32::seed_from_u64(42);

        for count in [0, 1, 10, 30, 100] {
            let selected = RandomSelector::new(count).select(&refs, &mut rng);
            assert_eq!(selected.len(), count.min(30));
            let unique = names(&selected).into_iter().collect::<HashSet<_>>();
            assert_eq!(unique.len(), selected.len());
        }
        assert!(RandomSelector::new(1).can_mutate());
    }

    #[test]
    fn test_random_is_deterministic_per_seed() {
        let results = (0..30).map(|i| scored(i, &[1])).collect::<Vec<_>>();
        let refs = results.iter().collect::<Vec<_>>();
        let pick = |seed| {
            let mut rng = Pcg32::seed_from_u64(seed);
            names(&RandomSelector::new(8).select(&refs, &mut rng))
        };
        assert_eq!(pick(5), pick(5));
    }

    #[test]
    fn test_identity_keeps_everything() {
        let results = (0..3).map(|i| scored(i, &[1])).collect::<Vec<_>>();
        let refs = results.iter().collect::<Vec<_>>();
        let mut rng = Pcg32::seed_from_u64(0);
        let selected = IdentitySelector.select(&refs, &mut rng);
        assert_eq!(names(&selected), ["00000000", "00000001", "00000002"]);
        assert!(!IdentitySelector.can_mutate());
    }
}
