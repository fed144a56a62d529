//! Per-organism tally of correct and total guesses by category.

use std::{
    collections::HashMap,
    sync::{
        PoisonError, RwLock,
        atomic::{AtomicU32, Ordering},
    },
};

use pokerga_engine::{Category, Organism, vm::Evaluation};
use serde::{Deserialize, Serialize};

/// Snapshot of one organism's counters.
///
/// `correct[c]` counts the hands of category `c` the organism classified
/// correctly; `total[c]` counts all hands of category `c` it was run against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCounts {
    pub correct: [u32; Category::LEN],
    pub total: [u32; Category::LEN],
}

impl CategoryCounts {
    /// Number of categories that were observed at least once.
    #[must_use]
    pub fn observed_categories(&self) -> usize {
        self.total.iter().filter(|&&t| t > 0).count()
    }
}

#[derive(Debug, Default)]
struct AtomicCounts {
    correct: [AtomicU32; Category::LEN],
    total: [AtomicU32; Category::LEN],
}

impl AtomicCounts {
    fn record(&self, category: Category, correct: bool) {
        let index = category.index();
        self.total[index].fetch_add(1, Ordering::Relaxed);
        if correct {
            self.correct[index].fetch_add(1, Ordering::Relaxed);
        }
    }

    fn snapshot(&self) -> CategoryCounts {
        CategoryCounts {
            correct: self.correct.each_ref().map(|c| c.load(Ordering::Relaxed)),
            total: self.total.each_ref().map(|t| t.load(Ordering::Relaxed)),
        }
    }
}

#[derive(Debug, Default)]
struct Registry {
    index: HashMap<String, usize>,
    entries: Vec<(Organism, AtomicCounts)>,
}

impl Registry {
    fn register(&mut self, organism: &Organism) -> usize {
        if let Some(&index) = self.index.get(organism.name()) {
            return index;
        }
        let index = self.entries.len();
        self.index.insert(organism.name().to_owned(), index);
        self.entries.push((organism.clone(), AtomicCounts::default()));
        index
    }
}

/// Concurrency-safe accumulator of [`Evaluation`]s for one generation.
///
/// Organisms are keyed by name. The registry lock is only taken for writing
/// when an organism is seen for the first time; recording against a known
/// organism takes a shared lock and bumps atomic counters, so evaluation
/// threads never serialize on each other.
///
/// Entries are kept in registration order. Registering the population up
/// front with [`with_organisms`](Self::with_organisms) makes
/// [`into_counts`](Self::into_counts) return them in population order, which
/// in turn makes score ties resolve deterministically.
#[derive(Debug, Default)]
pub struct Aggregator {
    registry: RwLock<Registry>,
}

impl Aggregator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an aggregator with the given organisms registered in order.
    #[must_use]
    pub fn with_organisms<'a, I>(organisms: I) -> Self
    where
        I: IntoIterator<Item = &'a Organism>,
    {
        let mut registry = Registry::default();
        for organism in organisms {
            registry.register(organism);
        }
        Self {
            registry: RwLock::new(registry),
        }
    }

    /// Adds one evaluation to its organism's counters.
    pub fn record(&self, evaluation: &Evaluation<'_>) {
        let category = evaluation.hand.category();
        let correct = evaluation.is_correct();

        {
            let registry = self.registry.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(&index) = registry.index.get(evaluation.organism.name()) {
                registry.entries[index].1.record(category, correct);
                return;
            }
        }

        let mut registry = self
            .registry
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let index = registry.register(evaluation.organism);
        registry.entries[index].1.record(category, correct);
    }

    /// Returns the current counters of the named organism.
    #[must_use]
    pub fn counts(&self, name: &str) -> Option<CategoryCounts> {
        let registry = self.registry.read().unwrap_or_else(PoisonError::into_inner);
        let &index = registry.index.get(name)?;
        Some(registry.entries[index].1.snapshot())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.registry
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Consumes the aggregator, returning every organism with its counters in
    /// registration order.
    #[must_use]
    pub fn into_counts(self) -> Vec<(Organism, CategoryCounts)> {
        self.registry
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .into_iter()
            .map(|(organism, counts)| (organism, counts.snapshot()))
            .collect()
    }
}
