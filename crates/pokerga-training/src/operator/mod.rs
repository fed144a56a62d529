//! Genetic operators and the pipeline that turns a ranking into the next
//! generation.
//!
//! # Pipeline
//!
//! Given the scored results of a generation, sorted best first:
//!
//! 1. **Filters** narrow the ranking, in configuration order.
//! 2. **Selectors** each pick organisms from the filtered ranking. Organisms
//!    from selectors that allow mutation become mutation material; the others
//!    are carried over unchanged.
//! 3. **Mutators** each consume all of the mutation material. Their output
//!    chromosomes are concatenated and wrapped into newly named organisms.
//! 4. **Repopulation**: carried-over organisms come first, followed by the
//!    new ones. An organism picked by several non-mutating selectors is
//!    carried once. The list is padded with freshly generated organisms, or its
//!    newest entries are dropped, so it has exactly the population size.
//!
//! The ranking is only ever borrowed. Operators draw randomness from the
//! generator passed in by the caller, so a run is reproducible from its seed.

use std::{collections::HashSet, fmt};

use pokerga_engine::{Chromosome, ChromosomeError, Organism};
use pokerga_evaluator::ScoredResult;
use rand::RngCore;

pub use self::{filter::*, mutator::*, selector::*, spec::*};

use crate::naming::OrganismGenerator;

mod filter;
mod mutator;
mod selector;
mod spec;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum OperatorError {
    #[display("crossover parents have different lengths: {left} and {right}")]
    ParentLengthMismatch { left: usize, right: usize },
    #[display("crossover produced a chromosome of length {actual}, expected {expected}")]
    OffspringLengthMismatch { expected: usize, actual: usize },
    #[display("chromosome of length {length} is too short for crossover")]
    ChromosomeTooShort { length: usize },
    #[display("{_0}")]
    #[from]
    Chromosome(ChromosomeError),
}

/// Narrows a ranking before selection.
pub trait Filter: fmt::Debug {
    fn filter<'a>(&self, results: Vec<&'a ScoredResult>) -> Vec<&'a ScoredResult>;
}

/// Picks organisms from a ranking.
pub trait Selector: fmt::Debug {
    fn select<'a>(&self, results: &[&'a ScoredResult], rng: &mut dyn RngCore)
    -> Vec<&'a Organism>;

    /// Whether the selected organisms are mutation material (`true`) or are
    /// carried over unchanged (`false`).
    fn can_mutate(&self) -> bool;
}

/// Produces new chromosomes from mutation material.
pub trait Mutator: fmt::Debug {
    fn mutate(
        &self,
        organisms: &[&Organism],
        rng: &mut dyn RngCore,
    ) -> Result<Vec<Chromosome>, OperatorError>;
}

/// The configured sequence of filters, selectors and mutators.
#[derive(Debug)]
pub struct OperatorPipeline {
    filters: Vec<Box<dyn Filter>>,
    selectors: Vec<Box<dyn Selector>>,
    mutators: Vec<Box<dyn Mutator>>,
    population_size: usize,
}

impl OperatorPipeline {
    #[must_use]
    pub fn new(
        filters: Vec<Box<dyn Filter>>,
        selectors: Vec<Box<dyn Selector>>,
        mutators: Vec<Box<dyn Mutator>>,
        population_size: usize,
    ) -> Self {
        Self {
            filters,
            selectors,
            mutators,
            population_size,
        }
    }

    #[must_use]
    pub fn from_specs(
        filters: &[FilterSpec],
        selectors: &[SelectorSpec],
        mutators: &[MutatorSpec],
        population_size: usize,
    ) -> Self {
        Self::new(
            filters.iter().map(FilterSpec::build).collect(),
            selectors.iter().map(SelectorSpec::build).collect(),
            mutators.iter().map(MutatorSpec::build).collect(),
            population_size,
        )
    }

    #[must_use]
    pub fn population_size(&self) -> usize {
        self.population_size
    }

    /// Builds the organisms of the next generation from a ranking.
    ///
    /// # Panics
    ///
    /// Panics if the result does not have exactly the population size, which
    /// would be a bug in repopulation.
    pub fn next_generation(
        &self,
        ranking: &[ScoredResult],
        generator: &OrganismGenerator<'_>,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<Organism>, OperatorError> {
        let mut results = ranking.iter().collect::<Vec<_>>();
        for filter in &self.filters {
            results = filter.filter(results);
        }

        let mut immutables = vec![];
        let mut mutables = vec![];
        for selector in &self.selectors {
            let selected = selector.select(&results, rng);
            if selector.can_mutate() {
                mutables.extend(selected);
            } else {
                immutables.extend(selected);
            }
        }

        let mut chromosomes = vec![];
        for mutator in &self.mutators {
            chromosomes.extend(mutator.mutate(&mutables, rng)?);
        }

        let mut seen = HashSet::new();
        immutables.retain(|&organism| seen.insert(organism.name()));

        let carried = immutables.len();
        let offspring = chromosomes.len();
        let factory = generator.factory();
        let mut organisms = immutables
            .into_iter()
            .cloned()
            .chain(chromosomes.into_iter().map(|c| factory.create(c)))
            .collect::<Vec<_>>();

        let padded = self.population_size.saturating_sub(organisms.len());
        while organisms.len() < self.population_size {
            organisms.push(generator.generate(rng));
        }
        let truncated = organisms.len() - self.population_size;
        organisms.truncate(self.population_size);
        assert_eq!(organisms.len(), self.population_size);

        tracing::debug!(
            filtered = results.len(),
            carried,
            mutables = mutables.len(),
            offspring,
            padded,
            truncated,
            "operators applied"
        );
        Ok(organisms)
    }
}


#[cfg(test)]
mod tests {
    use pokerga_evaluator::CategoryCounts;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    use super::{test_support::scored, *};
    use crate::naming::{NameSequence, OrganismFactory};

    fn ranking(len: u32) -> Vec<ScoredResult> {
        (0..len).map(|i| scored(i, &[i])).collect()
    }

    #[test]
    fn test_output_size_is_exact() {
        let names = NameSequence::starting_at(1000);
        let generator = OrganismGenerator::new(OrganismFactory::new(&names), 4);
        let mut rng = Pcg32::seed_from_u64(0);
        let ranking = ranking(10);

        // too few: padded with generated organisms
        let sparse = OperatorPipeline::new(
            vec![],
            vec![Box::new(ElitistSelector::new(2))],
            vec![Box::new(RandomMutator::new(0, 0))],
            10,
        );
        let next = sparse.next_generation(&ranking, &generator, &mut rng).unwrap();
        assert_eq!(next.len(), 10);
        assert_eq!(next[0].name(), "00000000");
        assert_eq!(next[1].name(), "00000001");
        assert!(next[2..].iter().all(|o| o.chromosome().len() == 4));

        // too many: newest entries dropped
        let crowded = OperatorPipeline::new(
            vec![],
            vec![
                Box::new(IdentitySelector),
                Box::new(RandomSelector::new(10)),
            ],
            vec![Box::new(RandomMutator::new(100, 100))],
            10,
        );
        let next = crowded.next_generation(&ranking, &generator, &mut rng).unwrap();
        let expected = ranking.iter().map(ScoredResult::organism).cloned().collect::<Vec<_>>();
        assert_eq!(next, expected);
    }

    #[test]
    fn test_overlapping_immutables_are_carried_once() {
        let names = NameSequence::starting_at(0x100);
        let generator = OrganismGenerator::new(OrganismFactory::new(&names), 4);
        let mut rng = Pcg32::seed_from_u64(5);
        let ranking = ranking(6);

        let pipeline = OperatorPipeline::from_specs(
            &[],
            &[SelectorSpec::Elitist { count: 2 }, SelectorSpec::Identity],
            &[],
            10,
        );
        let next = pipeline.next_generation(&ranking, &generator, &mut rng).unwrap();
        let carried = next[..6].iter().map(Organism::name).collect::<Vec<_>>();
        assert_eq!(
            carried,
            ["00000000", "00000001", "00000002", "00000003", "00000004", "00000005"]
        );
        let unique = next.iter().map(Organism::name).collect::<HashSet<_>>();
        assert_eq!(unique.len(), 10);
    }

    #[test]
    fn test_immutables_come_first_then_offspring() {
        let names = NameSequence::starting_at(0x100);
        let generator = OrganismGenerator::new(OrganismFactory::new(&names), 4);
        let mut rng = Pcg32::seed_from_u64(9);
        let ranking = ranking(6);

        let pipeline = OperatorPipeline::from_specs(
            &[],
            &[
                SelectorSpec::Random { count: 3 },
                SelectorSpec::Elitist { count: 1 },
            ],
            &[MutatorSpec::Random {
                organism_chance: 0,
                gene_chance: 0,
            }],
            4,
        );
        let next = pipeline.next_generation(&ranking, &generator, &mut rng).unwrap();
        assert_eq!(next[0].name(), "00000000");
        // mutation output gets fresh names even when genes are unchanged
        assert_eq!(
            next[1..].iter().map(Organism::name).collect::<Vec<_>>(),
            ["00000100", "00000101", "00000102"]
        );
    }

    #[test]
    fn test_filters_apply_before_selection() {
        let names = NameSequence::starting_at(0x100);
        let generator = OrganismGenerator::new(OrganismFactory::new(&names), 4);
        let mut rng = Pcg32::seed_from_u64(0);
        let ranking = vec![scored(0, &[5]), scored(1, &[5]), scored(2, &[4])];

        let pipeline = OperatorPipeline::from_specs(
            &[FilterSpec::DuplicateEliminator],
            &[SelectorSpec::Elitist { count: 2 }],
            &[MutatorSpec::Crossover { max_parents: 2 }],
            2,
        );
        let next = pipeline.next_generation(&ranking, &generator, &mut rng).unwrap();
        assert_eq!(
            next.iter().map(Organism::name).collect::<Vec<_>>(),
            ["00000000", "00000002"]
        );
    }

    #[test]
    fn test_mutator_error_propagates() {
        let names = NameSequence::new();
        let generator = OrganismGenerator::new(OrganismFactory::new(&names), 4);
        let mut rng = Pcg32::seed_from_u64(0);
        let ranking = vec![
            ScoredResult::new(
                test_support::organism(0, "00"),
                CategoryCounts::default(),
                0.5,
            ),
            ScoredResult::new(
                test_support::organism(1, "0000"),
                CategoryCounts::default(),
                0.0,
            ),
        ];
        let pipeline = OperatorPipeline::from_specs(
            &[],
            &[SelectorSpec::Elitist { count: 0 }, SelectorSpec::Identity],
            &[MutatorSpec::Crossover { max_parents: 2 }],
            2,
        );
        // identity selections are not mutation material
        assert!(pipeline.next_generation(&ranking, &generator, &mut rng).is_ok());

        let pipeline = OperatorPipeline::from_specs(
            &[],
            &[SelectorSpec::Random { count: 2 }],
            &[MutatorSpec::Crossover { max_parents: 2 }],
            2,
        );
        assert!(matches!(
            pipeline.next_generation(&ranking, &generator, &mut rng),
            Err(OperatorError::ParentLengthMismatch { .. })
        ));
    }
}
