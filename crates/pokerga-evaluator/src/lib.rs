//! Generation evaluation for the poker hand classifier.
//!
//! This crate takes a list of organisms and a dataset of hands and produces a
//! fitness ranking:
//!
//! ```text
//! HandSource ──hands──▶ EvaluationPipeline ──Evaluation──▶ Aggregator
//!                        (rayon worker pool)                    │
//!                                                               ▼
//!                          Vec<ScoredResult> ◀──score_all── Scorer
//! ```
//!
//! - [`hand_source`]: the dataset contract, implemented for in-memory hands
//! - [`pipeline`]: concurrent interpretation of every (organism, hand) pair
//! - [`aggregator`]: lock-light per-category counters
//! - [`scorer`]: fitness function and ranking
//!
//! # Example
//!
//! ```
//! use pokerga_engine::{Chromosome, Hand, Organism, vm::Interpreter};
//! use pokerga_evaluator::{EvaluationPipeline, StandardScorer, score_all};
//!
//! let hands = vec![
//!     "1,1,2,2,3,3,4,4,6,1,0".parse::<Hand>().unwrap(),
//!     "1,1,1,2,3,3,4,4,6,1,1".parse::<Hand>().unwrap(),
//! ];
//! let organisms = vec![
//!     // PUSH(0) RET
//!     Organism::new("00000000".into(), Chromosome::new("009").unwrap()),
//!     // PUSH(1) RET
//!     Organism::new("00000001".into(), Chromosome::new("019").unwrap()),
//! ];
//!
//! let interpreter = Interpreter::default();
//! let pool = rayon::ThreadPoolBuilder::new().num_threads(2).build().unwrap();
//! let aggregator = EvaluationPipeline::new(&interpreter, &pool)
//!     .evaluate(&organisms, &hands)
//!     .unwrap();
//! let ranking = score_all(&StandardScorer, aggregator.into_counts());
//!
//! assert_eq!(ranking[0].score(), 0.5);
//! assert_eq!(ranking[0].organism().name(), "00000000");
//! ```

pub use self::{aggregator::*, hand_source::*, pipeline::*, scorer::*};

pub mod aggregator;
pub mod hand_source;
pub mod pipeline;
pub mod scorer;
