use serde::{Deserialize, Serialize};

use super::{
    CrossoverMutator, DuplicateEliminator, ElitistSelector, Filter, IdentitySelector, Mutator,
    RandomMutator, RandomSelector, Selector,
};

/// Configuration form of a [`Filter`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FilterSpec {
    DuplicateEliminator,
}

impl FilterSpec {
    #[must_use]
    pub fn build(&self) -> Box<dyn Filter> {
        match self {
            FilterSpec::DuplicateEliminator => Box::new(DuplicateEliminator),
        }
    }
}

/// Configuration form of a [`Selector`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SelectorSpec {
    Elitist { count: usize },
    Random { count: usize },
    Identity,
}

impl SelectorSpec {
    #[must_use]
    pub fn build(&self) -> Box<dyn Selector> {
        match *self {
            SelectorSpec::Elitist { count } => Box::new(ElitistSelector::new(count)),
            SelectorSpec::Random { count } => Box::new(RandomSelector::new(count)),
            SelectorSpec::Identity => Box::new(IdentitySelector),
        }
    }
}

/// Configuration form of a [`Mutator`].
///
/// Chances are percentages in `0..=100`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MutatorSpec {
    Crossover {
        max_parents: usize,
    },
    Random {
        organism_chance: u8,
        gene_chance: u8,
    },
}

impl MutatorSpec {
    #[must_use]
    pub fn build(&self) -> Box<dyn Mutator> {
        match *self {
            MutatorSpec::Crossover { max_parents } => {
                Box::new(CrossoverMutator::new(max_parents))
            },
            MutatorSpec::Random {
                organism_chance,
                gene_chance,
            } => Box::new(RandomMutator::new(organism_chance, gene_chance)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_form() {
        let selectors: Vec<SelectorSpec> = serde_json::from_str(
            r#"[{"kind": "elitist", "count": 10}, {"kind": "random", "count": 40}, {"kind": "identity"}]"#,
        )
        .unwrap();
        assert_eq!(
            selectors,
            [
                SelectorSpec::Elitist { count: 10 },
                SelectorSpec::Random { count: 40 },
                SelectorSpec::Identity,
            ]
        );

        let mutator = MutatorSpec::Random {
            organism_chance: 50,
            gene_chance: 5,
        };
        assert_eq!(
            serde_json::to_string(&mutator).unwrap(),
            r#"{"kind":"random","organism_chance":50,"gene_chance":5}"#
        );
        assert_eq!(
            serde_json::to_string(&FilterSpec::DuplicateEliminator).unwrap(),
            r#"{"kind":"duplicate_eliminator"}"#
        );
    }

    #[test]
    fn test_build() {
        assert!(!SelectorSpec::Elitist { count: 1 }.build().can_mutate());
        assert!(SelectorSpec::Random { count: 1 }.build().can_mutate());
        assert!(!SelectorSpec::Identity.build().can_mutate());
    }
}
