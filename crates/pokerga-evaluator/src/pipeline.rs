//! Concurrent evaluation of a generation against a hand dataset.

use std::{
    any::Any,
    panic::{self, AssertUnwindSafe},
    sync::atomic::{AtomicUsize, Ordering},
};

use pokerga_engine::{
    Hand, Organism,
    vm::{Evaluation, Interpreter},
};
use rayon::{ThreadPool, prelude::*};

use crate::{aggregator::Aggregator, hand_source::HandSource};

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum EvaluationError<E> {
    #[display("failed to read hands: {_0}")]
    Source(E),
    #[display("evaluation task panicked: {message}")]
    TaskPanicked {
        #[error(not(source))]
        message: String,
    },
}

/// Runs every organism of a generation against every hand of a source.
///
/// # Scheduling
///
/// The hand source is read on the calling thread. Each hand is dispatched to
/// the worker pool as soon as the source produces it, and the organisms are
/// then evaluated against that hand as independent parallel jobs. The call
/// returns once the source is exhausted and all jobs have finished, which
/// makes each generation a barrier.
///
/// The [`Aggregator`] is the only state the jobs share.
///
/// # Failures
///
/// A failing source or a panicking job turns the whole evaluation into an
/// [`EvaluationError`]; partial counts are never returned.
#[derive(Debug)]
pub struct EvaluationPipeline<'a> {
    interpreter: &'a Interpreter,
    pool: &'a ThreadPool,
}

impl<'a> EvaluationPipeline<'a> {
    #[must_use]
    pub fn new(interpreter: &'a Interpreter, pool: &'a ThreadPool) -> Self {
        Self { interpreter, pool }
    }

    /// Evaluates `organisms` against every hand of `source`.
    ///
    /// The returned aggregator has `organisms` registered in order.
    pub fn evaluate<S>(
        &self,
        organisms: &[Organism],
        source: &S,
    ) -> Result<Aggregator, EvaluationError<S::Error>>
    where
        S: HandSource + ?Sized,
    {
        let interpreter = self.interpreter;
        self.evaluate_with(organisms, source, |hand, organism| {
            interpreter.process(hand, organism)
        })
    }

    fn evaluate_with<S, F>(
        &self,
        organisms: &[Organism],
        source: &S,
        process: F,
    ) -> Result<Aggregator, EvaluationError<S::Error>>
    where
        S: HandSource + ?Sized,
        F: for<'e> Fn(&'e Hand, &'e Organism) -> Evaluation<'e> + Sync,
    {
        let aggregator = Aggregator::with_organisms(organisms);
        let dispatched = AtomicUsize::new(0);
        let process = &process;

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            self.pool.in_place_scope(|scope| {
                let aggregator = &aggregator;
                let dispatched = &dispatched;
                source.read_hands(&mut |hand| {
                    let count = dispatched.fetch_add(1, Ordering::Relaxed) + 1;
                    tracing::trace!(count, %hand, "dispatching hand");
                    scope.spawn(move |_| {
                        organisms.par_iter().for_each(|organism| {
                            aggregator.record(&process(&hand, organism));
                        });
                    });
                })
            })
        }));

        match outcome {
            Ok(Ok(())) => {
                tracing::debug!(
                    hands = dispatched.into_inner(),
                    organisms = organisms.len(),
                    "evaluation finished"
                );
                Ok(aggregator)
            }
            Ok(Err(e)) => Err(EvaluationError::Source(e)),
            Err(payload) => Err(EvaluationError::TaskPanicked {
                message: panic_message(payload.as_ref()),
            }),
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_owned()
    }
}
