use std::{num::NonZeroUsize, path::PathBuf};

use anyhow::Context as _;
use pokerga_training::{GenerationReport, Seed, Trainer, TrainingConfig};
use rand::Rng as _;

use crate::{
    data::HandReader,
    schema::run_report::{self, RunReport},
    util::{self, Output},
};

/// Number of top organisms printed after each generation.
const SHOW_TOP: usize = 5;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct TrainArg {
    /// CSV file with one hand per line
    #[arg(long)]
    pub(crate) hands: PathBuf,
    /// JSON training configuration; absent fields take default values
    #[arg(long)]
    pub(crate) config: Option<PathBuf>,
    /// 32 hex digits; a random seed is used if omitted
    #[arg(long)]
    pub(crate) seed: Option<Seed>,
    /// Number of generations (overrides the config file)
    #[arg(long)]
    pub(crate) generations: Option<usize>,
    /// Population size (overrides the config file)
    #[arg(long)]
    pub(crate) population: Option<usize>,
    /// Maximum number of hands read from the file, 0 for all
    #[arg(long, default_value_t = 1000)]
    pub(crate) max_hands: usize,
    /// Worker threads (overrides the config file)
    #[arg(long)]
    pub(crate) threads: Option<NonZeroUsize>,
    /// Output file path for the run report
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

pub(crate) fn run(arg: &TrainArg) -> anyhow::Result<()> {
    let TrainArg {
        hands,
        config,
        seed,
        generations,
        population,
        max_hands,
        threads,
        output,
    } = arg;

    let mut training_config = match config {
        Some(path) => util::read_config_file(path)?,
        None => TrainingConfig::default(),
    };
    if let Some(generations) = generations {
        training_config.generations = *generations;
    }
    if let Some(population) = population {
        training_config.population_size = *population;
    }
    if let Some(threads) = threads {
        training_config.threads = Some(*threads);
    }
    training_config
        .validate()
        .context("Invalid training configuration")?;

    let seed = seed.unwrap_or_else(|| rand::rng().random());
    tracing::info!(%seed, "training seed");

    let reader = HandReader::open(hands, *max_hands)?;
    let trainer = Trainer::new(training_config.clone(), seed)?;

    eprintln!(
        "Training {} organisms for {} generations on {}",
        training_config.population_size,
        training_config.generations,
        reader.path().display()
    );
    let outcome = trainer
        .run(&reader, print_generation)
        .context("Training failed")?;

    eprintln!("Training completed.");
    eprintln!("Best Organisms:");
    for (i, result) in outcome.ranking.iter().take(SHOW_TOP).enumerate() {
        eprintln!("  {i:2}: {result}");
    }

    let report = RunReport::new(outcome, training_config, hands, *max_hands)?;
    eprintln!();
    eprintln!("Winner: {} (score {:.4})", report.winner.name, report.winner.score);
    eprintln!("  {}", report.winner.disassembly);

    Output::save_json(&report, output.clone())?;
    if let Some(path) = output {
        eprintln!("Report saved to {}", path.display());
    }

    Ok(())
}

fn print_generation(report: &GenerationReport<'_>) {
    let GenerationReport {
        generation,
        ranking,
        fitness,
        elapsed,
    } = report;
    eprintln!("Generation #{generation} ({elapsed:.2?}):");
    for (i, result) in ranking.iter().take(SHOW_TOP).enumerate() {
        eprintln!("  {i:2}: {result}");
    }
    if let Some(best) = ranking.first() {
        let accuracy = run_report::category_accuracy(best)
            .iter()
            .map(|c| format!("{}/{}", c.correct, c.total))
            .collect::<Vec<_>>();
        eprintln!("  Best by category: [{}]", accuracy.join(" "));
    }
    eprintln!("  Fitness Stats:");
    eprintln!("    Min:    {:.4}", fitness.min);
    eprintln!("    Max:    {:.4}", fitness.max);
    eprintln!("    Mean:   {:.4}", fitness.mean);
    eprintln!("    Median: {:.4}", fitness.median);
    eprintln!("    StdDev: {:.4}", fitness.std_dev);
}
