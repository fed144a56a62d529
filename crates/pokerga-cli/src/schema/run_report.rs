use std::path::Path;

use anyhow::Context as _;
use chrono::{DateTime, Utc};
use pokerga_engine::{Category, Chromosome, vm};
use pokerga_evaluator::ScoredResult;
use pokerga_stats::descriptive::DescriptiveStats;
use pokerga_training::{Seed, TrainingConfig, TrainingOutcome};
use serde::{Deserialize, Serialize};

/// JSON summary of a finished training run.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RunReport {
    pub trained_at: DateTime<Utc>,
    pub seed: Seed,
    pub hands_file: String,
    pub max_hands: usize,
    pub config: TrainingConfig,
    pub organisms_created: u64,
    pub final_fitness: DescriptiveStats,
    pub winner: Winner,
    /// The last generation, best first.
    pub ranking: Vec<ScoredResult>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Winner {
    pub name: String,
    pub chromosome: Chromosome,
    pub score: f64,
    pub categories: Vec<CategoryAccuracy>,
    /// The decoded instruction listing of the chromosome.
    pub disassembly: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CategoryAccuracy {
    pub category: Category,
    pub name: String,
    pub correct: u32,
    pub total: u32,
}

impl Winner {
    pub fn from_result(result: &ScoredResult) -> Self {
        let organism = result.organism();
        Self {
            name: organism.name().to_owned(),
            chromosome: organism.chromosome().clone(),
            score: result.score(),
            categories: category_accuracy(result),
            disassembly: disassemble(organism.chromosome()),
        }
    }
}

impl RunReport {
    pub fn new(
        outcome: TrainingOutcome,
        config: TrainingConfig,
        hands_file: &Path,
        max_hands: usize,
    ) -> anyhow::Result<Self> {
        let best = outcome
            .ranking
            .first()
            .context("Training produced an empty ranking")?;
        let winner = Winner::from_result(best);
        let final_fitness = DescriptiveStats::new(outcome.ranking.iter().map(ScoredResult::score))
            .context("Training produced an empty ranking")?;
        Ok(Self {
            trained_at: Utc::now(),
            seed: outcome.seed,
            hands_file: hands_file.display().to_string(),
            max_hands,
            config,
            organisms_created: outcome.organisms_created,
            final_fitness,
            winner,
            ranking: outcome.ranking,
        })
    }
}

pub fn category_accuracy(result: &ScoredResult) -> Vec<CategoryAccuracy> {
    Category::all()
        .map(|category| CategoryAccuracy {
            category,
            name: category.name().to_owned(),
            correct: result.correct()[category.index()],
            total: result.total()[category.index()],
        })
        .collect()
}

pub fn disassemble(chromosome: &Chromosome) -> String {
    vm::disassemble(chromosome.as_bytes())
        .map(|inst| inst.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
