//! Fitness scoring of aggregated counts.

use std::fmt;

use pokerga_engine::Organism;
use serde::{Deserialize, Serialize};

use crate::aggregator::CategoryCounts;

/// Turns an organism's counters into a single fitness value.
pub trait Scorer: fmt::Debug {
    /// Returns the fitness for `counts`. Higher is better.
    fn score(&self, counts: &CategoryCounts) -> f64;
}

/// Mean per-category accuracy over the categories that were observed.
///
/// Each category with `total[c] > 0` contributes `correct[c] / total[c]`;
/// unobserved categories are left out of both the sum and the divisor, so the
/// score does not depend on how many categories the dataset happens to
/// contain. The result lies in `[0, 1]`, and is `0.0` if nothing was observed.
///
/// ```
/// use pokerga_evaluator::{CategoryCounts, Scorer, StandardScorer};
///
/// let mut counts = CategoryCounts::default();
/// counts.correct[0] = 3;
/// counts.total[0] = 4;
/// counts.correct[1] = 0;
/// counts.total[1] = 2;
/// assert_eq!(StandardScorer.score(&counts), 0.375);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardScorer;

impl Scorer for StandardScorer {
    fn score(&self, counts: &CategoryCounts) -> f64 {
        let (sum, observed) = counts
            .correct
            .iter()
            .zip(&counts.total)
            .filter(|&(_, &total)| total > 0)
            .fold((0.0, 0_u32), |(sum, observed), (&correct, &total)| {
                (sum + f64::from(correct) / f64::from(total), observed + 1)
            });
        if observed == 0 {
            0.0
        } else {
            sum / f64::from(observed)
        }
    }
}

/// An organism with its counters and fitness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredResult {
    organism: Organism,
    counts: CategoryCounts,
    score: f64,
}

impl ScoredResult {
    #[must_use]
    pub fn new(organism: Organism, counts: CategoryCounts, score: f64) -> Self {
        Self {
            organism,
            counts,
            score,
        }
    }

    #[must_use]
    pub fn organism(&self) -> &Organism {
        &self.organism
    }

    #[must_use]
    pub fn counts(&self) -> &CategoryCounts {
        &self.counts
    }

    #[must_use]
    pub fn correct(&self) -> &[u32] {
        &self.counts.correct
    }

    #[must_use]
    pub fn total(&self) -> &[u32] {
        &self.counts.total
    }

    #[must_use]
    pub fn score(&self) -> f64 {
        self.score
    }
}

impl fmt::Display for ScoredResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}=[", self.organism)?;
        for (i, (correct, total)) in self.counts.correct.iter().zip(&self.counts.total).enumerate()
        {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{correct}/{total}")?;
        }
        write!(f, "] score={}", self.score)
    }
}

/// Scores every organism and sorts the results by score, best first.
///
/// The sort is stable, so organisms with equal scores keep their input order.
pub fn score_all<S, I>(scorer: &S, counts: I) -> Vec<ScoredResult>
where
    S: Scorer + ?Sized,
    I: IntoIterator<Item = (Organism, CategoryCounts)>,
{
    let mut results = counts
        .into_iter()
        .map(|(organism, counts)| {
            let score = scorer.score(&counts);
            ScoredResult::new(organism, counts, score)
        })
        .collect::<Vec<_>>();
    results.sort_by(|a, b| b.score.total_cmp(&a.score));
    results
}
