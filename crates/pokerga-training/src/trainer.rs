use std::{
    num::NonZeroUsize,
    time::{Duration, Instant},
};

use pokerga_engine::vm::Interpreter;
use pokerga_evaluator::{
    EvaluationError, EvaluationPipeline, HandSource, ScoredResult, Scorer, StandardScorer,
    score_all,
};
use pokerga_stats::descriptive::DescriptiveStats;
use rayon::{ThreadPoolBuildError, ThreadPoolBuilder};

use crate::{
    config::{ConfigError, TrainingConfig},
    naming::{NameSequence, OrganismFactory, OrganismGenerator},
    operator::{OperatorError, OperatorPipeline},
    population::Population,
    seed::Seed,
};

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum TrainingError<E> {
    #[display("invalid configuration: {_0}")]
    #[from]
    Config(ConfigError),
    #[display("failed to build the worker pool: {_0}")]
    #[from]
    ThreadPool(ThreadPoolBuildError),
    #[display("evaluation of generation {generation} failed: {source}")]
    Evaluation {
        generation: usize,
        source: EvaluationError<E>,
    },
    #[display("breeding generation {generation} failed: {source}")]
    Operator {
        generation: usize,
        source: OperatorError,
    },
}

/// What the trainer knows about a generation once it has been scored.
#[derive(Debug, Clone, Copy)]
pub struct GenerationReport<'a> {
    pub generation: usize,
    /// Scored organisms, best first.
    pub ranking: &'a [ScoredResult],
    pub fitness: DescriptiveStats,
    /// Wall-clock time spent evaluating and scoring.
    pub elapsed: Duration,
}

/// The result of a completed run.
#[derive(Debug, Clone)]
pub struct TrainingOutcome {
    pub seed: Seed,
    /// The last generation.
    pub population: Population,
    /// Scores of the last generation, best first.
    pub ranking: Vec<ScoredResult>,
    /// Total number of organisms created during the run.
    pub organisms_created: u64,
}

/// Drives the generation loop.
///
/// ```text
/// Population(0) ─▶ evaluate ─▶ score ─▶ report ─▶ operators ─▶ Population(1) ─▶ ...
/// ```
///
/// The last generation is evaluated, scored and reported but not bred; its
/// ranking is the outcome of the run.
///
/// # Resources
///
/// A worker pool sized by [`TrainingConfig::threads`] is created when
/// [`run`](Self::run) starts and torn down when it returns, whether the run
/// succeeded or not.
///
/// # Reproducibility
///
/// Every random decision is drawn from the [`Seed`]'s generator on the calling
/// thread, and names are handed out sequentially. Evaluation runs in parallel
/// but only produces order-independent counts, so the same seed,
/// configuration and dataset always yield the same names, chromosomes and
/// scores.
#[derive(Debug)]
pub struct Trainer {
    config: TrainingConfig,
    seed: Seed,
    interpreter: Interpreter,
    operators: OperatorPipeline,
    scorer: Box<dyn Scorer>,
}

impl Trainer {
    /// Validates `config` and prepares a run.
    pub fn new(config: TrainingConfig, seed: Seed) -> Result<Self, ConfigError> {
        config.validate()?;
        let interpreter = config.build_interpreter()?;
        let operators = config.build_operators();
        Ok(Self {
            config,
            seed,
            interpreter,
            operators,
            scorer: Box::new(StandardScorer),
        })
    }

    /// Replaces the fitness function.
    #[must_use]
    pub fn with_scorer(mut self, scorer: Box<dyn Scorer>) -> Self {
        self.scorer = scorer;
        self
    }

    #[must_use]
    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    #[must_use]
    pub fn seed(&self) -> Seed {
        self.seed
    }

    /// Runs all generations against `source`, calling `observer` after each
    /// one is scored.
    pub fn run<S, F>(
        &self,
        source: &S,
        mut observer: F,
    ) -> Result<TrainingOutcome, TrainingError<S::Error>>
    where
        S: HandSource + ?Sized,
        F: FnMut(&GenerationReport<'_>),
    {
        let pool = ThreadPoolBuilder::new()
            .num_threads(self.config.threads.map_or(0, NonZeroUsize::get))
            .thread_name(|i| format!("pokerga-eval-{i}"))
            .build()?;
        tracing::debug!(
            threads = pool.current_num_threads(),
            seed = %self.seed,
            "starting training run"
        );

        let names = NameSequence::new();
        let generator = OrganismGenerator::new(
            OrganismFactory::new(&names),
            self.config.chromosome_length,
        );
        let mut rng = self.seed.rng();
        let evaluation = EvaluationPipeline::new(&self.interpreter, &pool);

        let mut population = Population::random(self.config.population_size, &generator, &mut rng);
        let mut ranking = self.score_generation(&evaluation, &population, source, &mut observer)?;

        for _ in 1..self.config.generations {
            let organisms = self
                .operators
                .next_generation(&ranking, &generator, &mut rng)
                .map_err(|err| TrainingError::Operator {
                    generation: population.generation(),
                    source: err,
                })?;
            population = population.advance(organisms);
            ranking = self.score_generation(&evaluation, &population, source, &mut observer)?;
        }

        Ok(TrainingOutcome {
            seed: self.seed,
            population,
            ranking,
            organisms_created: names.issued(),
        })
    }

    fn score_generation<S, F>(
        &self,
        evaluation: &EvaluationPipeline<'_>,
        population: &Population,
        source: &S,
        observer: &mut F,
    ) -> Result<Vec<ScoredResult>, TrainingError<S::Error>>
    where
        S: HandSource + ?Sized,
        F: FnMut(&GenerationReport<'_>),
    {
        let started = Instant::now();
        let generation = population.generation();
        let aggregator = evaluation
            .evaluate(population.organisms(), source)
            .map_err(|err| TrainingError::Evaluation {
                generation,
                source: err,
            })?;
        let ranking = score_all(self.scorer.as_ref(), aggregator.into_counts());
        let elapsed = started.elapsed();

        // the aggregator pre-registers every organism, and populations are
        // never empty
        let fitness = DescriptiveStats::new(ranking.iter().map(ScoredResult::score))
            .expect("ranking covers the whole population");
        tracing::info!(
            generation,
            best = fitness.max,
            mean = fitness.mean,
            elapsed_ms = elapsed.as_millis(),
            "generation scored"
        );

        observer(&GenerationReport {
            generation,
            ranking: &ranking,
            fitness,
            elapsed,
        });
        Ok(ranking)
    }
}
