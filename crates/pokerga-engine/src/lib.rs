//! Core value types and the bytecode interpreter for evolving poker hand
//! classifiers.
//!
//! - [`Card`], [`Hand`] and [`Category`] describe evaluation samples.
//! - [`Organism`] and [`Chromosome`] describe candidate programs.
//! - [`vm`] executes a chromosome against a hand and produces a verdict.

pub use self::{core::*, organism::*};

pub mod core;
pub mod organism;
pub mod vm;
