use pokerga_engine::Organism;
use rand::Rng;

use crate::naming::OrganismGenerator;

/// One generation of organisms.
///
/// A population is never modified in place: [`advance`](Self::advance)
/// produces the next generation as a new value.
#[derive(Debug, Clone)]
pub struct Population {
    generation: usize,
    organisms: Vec<Organism>,
}

impl Population {
    #[must_use]
    pub fn new(generation: usize, organisms: Vec<Organism>) -> Self {
        Self {
            generation,
            organisms,
        }
    }

    /// Creates generation 0 from `size` randomly generated organisms.
    pub fn random<R>(size: usize, generator: &OrganismGenerator<'_>, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let organisms = (0..size).map(|_| generator.generate(rng)).collect();
        Self::new(0, organisms)
    }

    #[must_use]
    pub fn generation(&self) -> usize {
        self.generation
    }

    #[must_use]
    pub fn organisms(&self) -> &[Organism] {
        &self.organisms
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.organisms.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.organisms.is_empty()
    }

    /// Returns the next generation, made of `organisms`.
    ///
    /// # Panics
    ///
    /// Panics if `organisms` does not have the size of this population.
    #[must_use]
    pub fn advance(&self, organisms: Vec<Organism>) -> Self {
        assert_eq!(
            organisms.len(),
            self.organisms.len(),
            "population size must be preserved across generations"
        );
        Self::new(self.generation + 1, organisms)
    }
}
