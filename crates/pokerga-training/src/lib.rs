//! Genetic algorithm training of poker hand classifiers.
//!
//! # How Training Works
//!
//! 1. **Population** - Generate organisms with random chromosomes
//! 2. **Evaluation** - Run every organism against every hand of the dataset
//! 3. **Fitness** - Score each organism by its mean per-category accuracy
//! 4. **Operators** - Filter the ranking, select survivors and mutation
//!    material, mutate, and refill the population to its fixed size
//! 5. **Repeat** - Continue for the configured number of generations
//!
//! # Architecture
//!
//! ```text
//! Trainer
//!   ├─ Population ──────────── OrganismGenerator ── NameSequence
//!   ├─ EvaluationPipeline (pokerga-evaluator, rayon worker pool)
//!   ├─ Scorer (pokerga-evaluator)
//!   └─ OperatorPipeline
//!        ├─ Filter:   DuplicateEliminator
//!        ├─ Selector: ElitistSelector, RandomSelector, IdentitySelector
//!        └─ Mutator:  CrossoverMutator, RandomMutator
//! ```
//!
//! # Example
//!
//! ```
//! use pokerga_engine::Hand;
//! use pokerga_training::{Seed, Trainer, TrainingConfig};
//!
//! let hands = ["1,1,2,2,3,3,4,4,6,1,0", "1,1,1,2,3,3,4,4,6,1,1"]
//!     .map(|line| line.parse::<Hand>().unwrap())
//!     .to_vec();
//! let config = TrainingConfig {
//!     population_size: 20,
//!     chromosome_length: 32,
//!     generations: 3,
//!     ..TrainingConfig::default()
//! };
//! let trainer = Trainer::new(config, Seed::from_bytes([1; 16])).unwrap();
//!
//! let mut generations = vec![];
//! let outcome = trainer
//!     .run(&hands, |report| generations.push(report.generation))
//!     .unwrap();
//!
//! assert_eq!(generations, [0, 1, 2]);
//! assert_eq!(outcome.ranking.len(), 20);
//! ```
//!
//! # Current Limitations
//!
//! - **Fixed schedule**: the run always lasts the configured number of
//!   generations; there is no convergence-based early stop
//! - **No persistence**: a run cannot be resumed from a previous outcome

pub use self::{config::*, naming::*, population::*, seed::*, trainer::*};

pub mod config;
pub mod naming;
pub mod operator;
pub mod population;
pub mod seed;
pub mod trainer;
