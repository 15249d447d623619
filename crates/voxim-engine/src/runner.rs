//! Parallel execution of independent episodes.

use crate::error::EpisodeError;
use crate::locomotion::{Locomotion, Outcome};
use voxim_voxel::{CompoundDescription, Controller};

use indexmap::IndexMap;
use std::sync::Arc;
use std::thread;

/// One episode to evaluate: a robot design and its controller.
pub struct EpisodeJob {
    /// The robot design.
    pub description: CompoundDescription,
    /// The control strategy.
    pub controller: Arc<dyn Controller>,
}

/// Aggregate of one batch, keyed by submission index.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// Per-episode results in submission order.
    pub outcomes: IndexMap<usize, Result<Outcome, EpisodeError>>,
    /// Number of failed episodes.
    pub failed: usize,
}

impl BatchOutcome {
    /// Iterate successful outcomes in submission order.
    pub fn successes(&self) -> impl Iterator<Item = (usize, &Outcome)> {
        self.outcomes
            .iter()
            .filter_map(|(&i, r)| r.as_ref().ok().map(|o| (i, o)))
    }

    /// Iterate failures in submission order.
    pub fn failures(&self) -> impl Iterator<Item = (usize, &EpisodeError)> {
        self.outcomes
            .iter()
            .filter_map(|(&i, r)| r.as_ref().err().map(|e| (i, e)))
    }
}

/// Runs batches of episodes on a bounded pool of worker threads.
///
/// Each job owns its engine and compound, so workers share nothing
/// mutable. A failing job is logged and recorded without cancelling
/// its siblings; there is no mid-step cancellation.
#[derive(Clone, Copy, Debug)]
pub struct EpisodeRunner {
    worker_count: usize,
}

impl EpisodeRunner {
    /// A runner with the given number of workers (at least 1).
    pub fn new(worker_count: usize) -> Self {
        Self { worker_count: worker_count.max(1) }
    }

    /// Runs every job under `task`, blocking until all finish.
    pub fn run_all(&self, task: &Locomotion, jobs: Vec<EpisodeJob>) -> BatchOutcome {
        let total = jobs.len();
        let (job_tx, job_rx) = crossbeam_channel::unbounded::<(usize, EpisodeJob)>();
        let (result_tx, result_rx) =
            crossbeam_channel::unbounded::<(usize, Result<Outcome, EpisodeError>)>();
        for indexed in jobs.into_iter().enumerate() {
            // Unbounded channel: send cannot fail while we hold rx.
            let _ = job_tx.send(indexed);
        }
        drop(job_tx);

        thread::scope(|scope| {
            for _ in 0..self.worker_count.min(total.max(1)) {
                let job_rx = job_rx.clone();
                let result_tx = result_tx.clone();
                scope.spawn(move || {
                    while let Ok((index, job)) = job_rx.recv() {
                        let shape =
                            (job.description.shape.width(), job.description.shape.height());
                        log::debug!("episode {index} ({}x{}) starting", shape.0, shape.1);
                        let result = task.run(&job.description, job.controller, None);
                        match &result {
                            Ok(outcome) => log::debug!(
                                "episode {index} finished: travelled {:.3}",
                                outcome.travelled_x
                            ),
                            Err(err) => log::warn!(
                                "episode {index} ({}x{} grid) failed: {err}",
                                shape.0,
                                shape.1
                            ),
                        }
                        let _ = result_tx.send((index, result));
                    }
                });
            }
            drop(result_tx);

            let mut results: Vec<(usize, Result<Outcome, EpisodeError>)> =
                result_rx.iter().collect();
            results.sort_by_key(|(index, _)| *index);
            let mut batch = BatchOutcome::default();
            for (index, result) in results {
                if result.is_err() {
                    batch.failed += 1;
                }
                batch.outcomes.insert(index, result);
            }
            batch
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxim_test_utils::{worm_description, ConstController, WrongShapeController};

    fn quick_task() -> Locomotion {
        Locomotion { duration: 0.5, ..Locomotion::default() }
    }

    fn good_job() -> EpisodeJob {
        EpisodeJob {
            description: worm_description(2),
            controller: Arc::new(ConstController::new(0.2)),
        }
    }

    #[test]
    fn batch_preserves_submission_order() {
        let runner = EpisodeRunner::new(4);
        let jobs = (0..6).map(|_| good_job()).collect();
        let batch = runner.run_all(&quick_task(), jobs);
        assert_eq!(batch.failed, 0);
        let keys: Vec<usize> = batch.outcomes.keys().copied().collect();
        assert_eq!(keys, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn one_failure_does_not_cancel_siblings() {
        let runner = EpisodeRunner::new(3);
        let mut jobs: Vec<EpisodeJob> = (0..4).map(|_| good_job()).collect();
        jobs.insert(
            2,
            EpisodeJob {
                description: worm_description(2),
                controller: Arc::new(WrongShapeController),
            },
        );
        let batch = runner.run_all(&quick_task(), jobs);
        assert_eq!(batch.outcomes.len(), 5);
        assert_eq!(batch.failed, 1);
        assert_eq!(batch.successes().count(), 4);
        let (index, err) = batch.failures().next().unwrap();
        assert_eq!(index, 2);
        assert!(matches!(err, EpisodeError::Control(_)));
    }

    #[test]
    fn identical_jobs_produce_identical_outcomes() {
        let runner = EpisodeRunner::new(2);
        let jobs = (0..2).map(|_| good_job()).collect();
        let batch = runner.run_all(&quick_task(), jobs);
        let outcomes: Vec<&Outcome> = batch.successes().map(|(_, o)| o).collect();
        assert_eq!(outcomes[0], outcomes[1]);
    }
}
