use std::path::PathBuf;

use anyhow::Context as _;
use pokerga_engine::{Chromosome, Organism, vm::Interpreter};
use pokerga_evaluator::{EvaluationPipeline, StandardScorer, score_all};
use rayon::ThreadPoolBuilder;

use crate::{data::HandReader, schema::run_report};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct EvaluateArg {
    /// CSV file with one hand per line
    #[arg(long)]
    pub(crate) hands: PathBuf,
    /// Chromosome to run, as hex digits
    #[arg(long)]
    pub(crate) chromosome: String,
    /// Maximum number of hands read from the file, 0 for all
    #[arg(long, default_value_t = 1000)]
    pub(crate) max_hands: usize,
}

pub(crate) fn run(arg: &EvaluateArg) -> anyhow::Result<()> {
    let EvaluateArg {
        hands,
        chromosome,
        max_hands,
    } = arg;

    let chromosome = Chromosome::new(chromosome.as_str()).context("Invalid chromosome")?;
    let organism = Organism::new("00000000".to_owned(), chromosome);
    let reader = HandReader::open(hands, *max_hands)?;

    let interpreter = Interpreter::default();
    let pool = ThreadPoolBuilder::new()
        .build()
        .context("Failed to build the worker pool")?;
    let aggregator = EvaluationPipeline::new(&interpreter, &pool)
        .evaluate(std::slice::from_ref(&organism), &reader)
        .context("Evaluation failed")?;
    let ranking = score_all(&StandardScorer, aggregator.into_counts());
    let result = ranking
        .first()
        .context("Evaluation produced no result")?;

    println!("{}", run_report::disassemble(organism.chromosome()));
    println!();
    println!("{:>2}  {:<16} {:>7} {:>7}", "#", "category", "correct", "total");
    for accuracy in run_report::category_accuracy(result) {
        println!(
            "{:>2}  {:<16} {:>7} {:>7}",
            accuracy.category.value(),
            accuracy.name,
            accuracy.correct,
            accuracy.total
        );
    }
    println!();
    println!("score: {:.4}", result.score());
    Ok(())
}
