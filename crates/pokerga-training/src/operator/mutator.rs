use pokerga_engine::{Chromosome, Organism};
use rand::{Rng, RngCore};

use super::{Mutator, OperatorError};

/// Two-point crossover of consecutive pairs.
///
/// Organisms are paired up in order (`[0, 1]`, `[2, 3]`, ...). At most
/// `max_parents` organisms take part, rounded down to an even count, so an
/// odd leftover is ignored. For a pair of parents
/// `p1`, `p2` of length `len`, cut points `x1` in `[0, len/2)` and `x2` in
/// `[len/2, len)` are drawn, and two children are produced:
///
/// ```text
/// child A = p2[..x1] + p1[x1..x2] + p2[x2..]
/// child B = p1[..x1] + p2[x1..x2] + p1[x2..]
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CrossoverMutator {
    max_parents: usize,
}

impl CrossoverMutator {
    #[must_use]
    pub fn new(max_parents: usize) -> Self {
        Self { max_parents }
    }

    fn cross(
        p1: &[u8],
        p2: &[u8],
        rng: &mut dyn RngCore,
    ) -> Result<[Chromosome; 2], OperatorError> {
        if p1.len() != p2.len() {
            return Err(OperatorError::ParentLengthMismatch {
                left: p1.len(),
                right: p2.len(),
            });
        }
        let mid = p1.len() / 2;
        if mid == 0 {
            return Err(OperatorError::ChromosomeTooShort { length: p1.len() });
        }
        let x1 = rng.random_range(0..mid);
        let x2 = mid + rng.random_range(0..mid);

        let a = [&p2[..x1], &p1[x1..x2], &p2[x2..]].concat();
        let b = [&p1[..x1], &p2[x1..x2], &p1[x2..]].concat();
        for child in [&a, &b] {
            if child.len() != p1.len() {
                return Err(OperatorError::OffspringLengthMismatch {
                    expected: p1.len(),
                    actual: child.len(),
                });
            }
        }
        Ok([Chromosome::from_bytes(a)?, Chromosome::from_bytes(b)?])
    }
}

impl Mutator for CrossoverMutator {
    fn mutate(
        &self,
        organisms: &[&Organism],
        rng: &mut dyn RngCore,
    ) -> Result<Vec<Chromosome>, OperatorError> {
        let parents = organisms.len().min(self.max_parents) & !1;
        let mut children = Vec::with_capacity(parents);
        for pair in organisms[..parents].chunks_exact(2) {
            children.extend(Self::cross(
                pair[0].chromosome().as_bytes(),
                pair[1].chromosome().as_bytes(),
                rng,
            )?);
        }
        Ok(children)
    }
}

/// Point mutation.
///
/// Every input yields exactly one output chromosome. With probability
/// `organism_chance`% the organism is mutated, in which case each gene is
/// independently replaced by a random hex digit with probability
/// `gene_chance`%. Otherwise the chromosome is passed through unchanged.
#[derive(Debug, Clone, Copy)]
pub struct RandomMutator {
    organism_chance: u8,
    gene_chance: u8,
}

impl RandomMutator {
    #[must_use]
    pub fn new(organism_chance: u8, gene_chance: u8) -> Self {
        Self {
            organism_chance,
            gene_chance,
        }
    }

    fn hits(rng: &mut dyn RngCore, chance: u8) -> bool {
        rng.random_range(0..100) < chance
    }
}

impl Mutator for RandomMutator {
    fn mutate(
        &self,
        organisms: &[&Organism],
        rng: &mut dyn RngCore,
    ) -> Result<Vec<Chromosome>, OperatorError> {
        organisms
            .iter()
            .map(|organism| {
                let chromosome = organism.chromosome();
                if !Self::hits(rng, self.organism_chance) {
                    return Ok(chromosome.clone());
                }
                let genes = chromosome
                    .as_bytes()
                    .iter()
                    .map(|&gene| {
                        if Self::hits(rng, self.gene_chance) {
                            let index = rng.random_range(0..Chromosome::GENE_ALPHABET.len());
                            Chromosome::GENE_ALPHABET[index]
                        } else {
                            gene
                        }
                    })
                    .collect();
                Ok(Chromosome::from_bytes(genes)?)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    use super::*;
    use crate::operator::test_support::organism;

    #[test]
    fn test_crossover_children_are_complementary() {
        let p1 = organism(0, &"0".repeat(32));
        let p2 = organism(1, &"F".repeat(32));
        let mut rng = Pcg32::seed_from_u64(3);

        let children = CrossoverMutator::new(2).mutate(&[&p1, &p2], &mut rng).unwrap();
        let [a, b] = children.as_slice() else {
            panic!("expected two children, got {}", children.len());
        };
        assert_eq!(a.len(), 32);
        assert_eq!(b.len(), 32);
        for (x, y) in a.as_bytes().iter().zip(b.as_bytes()) {
            assert_ne!(x, y);
        }
        // a takes a non-empty middle segment from p1 that straddles the midpoint
        let x1 = a.as_str().find('0').unwrap();
        let x2 = a.as_str().rfind('0').unwrap() + 1;
        assert!(x1 < 16 && x2 >= 16);
        assert!(a.as_str()[x1..x2].bytes().all(|g| g == b'0'));
    }

    #[test]
    fn test_crossover_pairing() {
        let parents = (0..7).map(|i| organism(i, "0123456789")).collect::<Vec<_>>();
        let refs = parents.iter().collect::<Vec<_>>();
        let mut rng = Pcg32::seed_from_u64(0);

        // odd leftover ignored
        let all = CrossoverMutator::new(10).mutate(&refs, &mut rng).unwrap();
        assert_eq!(all.len(), 6);
        // capped by parent count, rounded down to even
        let capped = CrossoverMutator::new(4).mutate(&refs, &mut rng).unwrap();
        assert_eq!(capped.len(), 4);
        let capped = CrossoverMutator::new(5).mutate(&refs, &mut rng).unwrap();
        assert_eq!(capped.len(), 4);
        assert!(CrossoverMutator::new(1).mutate(&refs, &mut rng).unwrap().is_empty());
        // identical parents reproduce themselves
        assert!(all.iter().all(|c| c.as_str() == "0123456789"));
    }

    #[test]
    fn test_crossover_length_mismatch() {
        let p1 = organism(0, "0000");
        let p2 = organism(1, "000000");
        let mut rng = Pcg32::seed_from_u64(0);
        assert_eq!(
            CrossoverMutator::new(2).mutate(&[&p1, &p2], &mut rng),
            Err(OperatorError::ParentLengthMismatch { left: 4, right: 6 })
        );

        let tiny = organism(2, "0");
        assert_eq!(
            CrossoverMutator::new(2).mutate(&[&tiny, &tiny], &mut rng),
            Err(OperatorError::ChromosomeTooShort { length: 1 })
        );
    }

    #[test]
    fn test_random_mutator_rates() {
        let parents = (0..20)
            .map(|i| organism(i, &"x".repeat(64)))
            .collect::<Vec<_>>();
        let refs = parents.iter().collect::<Vec<_>>();
        let mut rng = Pcg32::seed_from_u64(11);

        let untouched = RandomMutator::new(0, 100).mutate(&refs, &mut rng).unwrap();
        assert_eq!(untouched.len(), 20);
        assert!(untouched.iter().all(|c| c.as_str() == "x".repeat(64)));

        let unchanged = RandomMutator::new(100, 0).mutate(&refs, &mut rng).unwrap();
        assert_eq!(unchanged.len(), 20);
        assert!(unchanged.iter().all(|c| c.as_str() == "x".repeat(64)));

        let rewritten = RandomMutator::new(100, 100).mutate(&refs, &mut rng).unwrap();
        assert_eq!(rewritten.len(), 20);
        for chromosome in &rewritten {
            assert_eq!(chromosome.len(), 64);
            assert!(
                chromosome
                    .as_bytes()
                    .iter()
                    .all(|b| Chromosome::GENE_ALPHABET.contains(b))
            );
        }

        let partial = RandomMutator::new(100, 50).mutate(&refs, &mut rng).unwrap();
        let changed = partial
            .iter()
            .flat_map(|c| c.as_bytes())
            .filter(|&&b| b != b'x')
            .count();
        assert!((400..=880).contains(&changed), "changed {changed} of 1280 genes");
    }
}
