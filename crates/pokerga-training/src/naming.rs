use std::sync::atomic::{AtomicU64, Ordering};

use pokerga_engine::{Chromosome, Organism};
use rand::Rng;

/// Source of unique organism names.
///
/// Names are the sequence number rendered as at least eight uppercase hex
/// digits (`00000000`, `00000001`, ...). A single sequence is shared by
/// everything that creates organisms during a run, and is passed around by
/// reference rather than kept in a global.
#[derive(Debug, Default)]
pub struct NameSequence {
    next: AtomicU64,
}

impl NameSequence {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }

    pub fn next_name(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{n:08X}")
    }

    /// Number of names handed out so far, counted from zero.
    #[must_use]
    pub fn issued(&self) -> u64 {
        self.next.load(Ordering::Relaxed)
    }
}

/// Wraps chromosomes into freshly named organisms.
#[derive(Debug, Clone, Copy)]
pub struct OrganismFactory<'a> {
    names: &'a NameSequence,
}

impl<'a> OrganismFactory<'a> {
    #[must_use]
    pub fn new(names: &'a NameSequence) -> Self {
        Self { names }
    }

    #[must_use]
    pub fn create(&self, chromosome: Chromosome) -> Organism {
        Organism::new(self.names.next_name(), chromosome)
    }
}

/// Creates organisms with random chromosomes of a fixed length.
#[derive(Debug, Clone, Copy)]
pub struct OrganismGenerator<'a> {
    factory: OrganismFactory<'a>,
    chromosome_length: usize,
}

impl<'a> OrganismGenerator<'a> {
    #[must_use]
    pub fn new(factory: OrganismFactory<'a>, chromosome_length: usize) -> Self {
        Self {
            factory,
            chromosome_length,
        }
    }

    #[must_use]
    pub fn factory(&self) -> OrganismFactory<'a> {
        self.factory
    }

    #[must_use]
    pub fn chromosome_length(&self) -> usize {
        self.chromosome_length
    }

    /// Generates an organism whose genes are uniformly random hex digits.
    pub fn generate<R>(&self, rng: &mut R) -> Organism
    where
        R: Rng + ?Sized,
    {
        let genes = (0..self.chromosome_length).map(|_| rng.random_range(0..16));
        self.factory.create(Chromosome::from_nibbles(genes))
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    use super::*;

    #[test]
    fn test_names_are_sequential_hex() {
        let names = NameSequence::starting_at(9);
        assert_eq!(names.next_name(), "00000009");
        assert_eq!(names.next_name(), "0000000A");
        assert_eq!(names.issued(), 11);

        let wide = NameSequence::starting_at(0x1_0000_0000);
        assert_eq!(wide.next_name(), "100000000");
    }

    #[test]
    fn test_generated_organisms() {
        let names = NameSequence::new();
        let generator = OrganismGenerator::new(OrganismFactory::new(&names), 256);
        let mut rng = Pcg32::seed_from_u64(1);

        let a = generator.generate(&mut rng);
        let b = generator.generate(&mut rng);
        assert_eq!(a.name(), "00000000");
        assert_eq!(b.name(), "00000001");
        assert_eq!(a.chromosome().len(), 256);
        assert!(
            a.chromosome()
                .as_bytes()
                .iter()
                .all(|b| Chromosome::GENE_ALPHABET.contains(b))
        );
        assert_ne!(a.chromosome(), b.chromosome());
    }
}
