//! Parallel attempt execution over a bounded worker pool.
//!
//! Attempts are embarrassingly parallel: each one works on its own
//! cloned snapshot and its own freshly constructed simulation context,
//! so no locking is needed. Attempt indices are dispatched in ascending
//! order through a crossbeam channel; when one succeeds, its index
//! becomes a cutoff and workers skip any not-yet-started attempt above
//! it. Every attempt below the final cutoff is guaranteed to have been
//! evaluated, so the lowest decisive index wins and the parallel result
//! equals the sequential result for the same seed.

use std::sync::atomic::{AtomicU32, Ordering};
use std::thread;

use augur_core::{Action, Forecaster, Goal, PredictError, Snapshot};
use crossbeam_channel::unbounded;
use log::{debug, warn};

use crate::cancel::CancelToken;
use crate::outcome::{ExhaustionReport, PlanError, SearchOutcome};
use crate::search::{anchor_candidates, AttemptEval, Planner};

/// Per-attempt result sent back from a worker.
enum AttemptReport {
    Hit { attempt: u32, action: Action },
    Fatal { attempt: u32, error: PredictError },
    Miss,
    EngineFailure,
    SkippedCancelled,
    SkippedCutoff,
}

impl<F: Forecaster + Sync> Planner<F> {
    /// [`find_plan`](Planner::find_plan) over a bounded worker pool.
    ///
    /// Same contract and same result as the sequential search for the
    /// same seed; the worker count comes from
    /// [`PlannerConfig::resolved_workers`](crate::PlannerConfig::resolved_workers).
    /// The cancellation token stops unstarted attempts; in-flight
    /// forecasts run to completion.
    pub fn find_plan_parallel(
        &self,
        initial: &Snapshot,
        goal: &(dyn Goal + Sync),
        max_attempts: u32,
        horizon_seconds: f32,
        token: &CancelToken,
    ) -> Result<SearchOutcome, PlanError> {
        let anchors = anchor_candidates(initial)?;
        if max_attempts == 0 {
            return Ok(SearchOutcome::Exhausted(ExhaustionReport {
                attempts: 0,
                engine_failures: 0,
            }));
        }

        let workers = self.config().resolved_workers().min(max_attempts as usize);
        debug!("parallel search: {workers} workers, budget {max_attempts}");

        // Lowest attempt index known to be decisive (hit or fatal).
        // Attempts above it no longer matter.
        let cutoff = AtomicU32::new(u32::MAX);

        let (task_tx, task_rx) = unbounded::<u32>();
        for attempt in 0..max_attempts {
            let _ = task_tx.send(attempt);
        }
        drop(task_tx);

        let (report_tx, report_rx) = unbounded::<AttemptReport>();
        thread::scope(|scope| {
            for _ in 0..workers {
                let task_rx = task_rx.clone();
                let report_tx = report_tx.clone();
                let cutoff = &cutoff;
                let anchors = &anchors;
                scope.spawn(move || {
                    while let Ok(attempt) = task_rx.recv() {
                        let report = if token.is_cancelled() {
                            AttemptReport::SkippedCancelled
                        } else if attempt > cutoff.load(Ordering::SeqCst) {
                            AttemptReport::SkippedCutoff
                        } else {
                            match self.evaluate_attempt(
                                initial,
                                goal,
                                anchors,
                                attempt,
                                horizon_seconds,
                            ) {
                                AttemptEval::Hit(action) => {
                                    cutoff.fetch_min(attempt, Ordering::SeqCst);
                                    AttemptReport::Hit { attempt, action }
                                }
                                AttemptEval::Miss => AttemptReport::Miss,
                                AttemptEval::EngineFailure(err) => {
                                    warn!("attempt {attempt}: engine failure, skipping: {err}");
                                    AttemptReport::EngineFailure
                                }
                                AttemptEval::Fatal(error) => {
                                    cutoff.fetch_min(attempt, Ordering::SeqCst);
                                    AttemptReport::Fatal { attempt, error }
                                }
                            }
                        };
                        if report_tx.send(report).is_err() {
                            break;
                        }
                    }
                });
            }
        });
        drop(report_tx);

        let mut best_hit: Option<(u32, Action)> = None;
        let mut best_fatal: Option<(u32, PredictError)> = None;
        let mut engine_failures = 0u32;
        let mut cancelled = false;
        for report in report_rx.iter() {
            match report {
                AttemptReport::Hit { attempt, action } => {
                    if best_hit.as_ref().map_or(true, |(best, _)| attempt < *best) {
                        best_hit = Some((attempt, action));
                    }
                }
                AttemptReport::Fatal { attempt, error } => {
                    if best_fatal.as_ref().map_or(true, |(best, _)| attempt < *best) {
                        best_fatal = Some((attempt, error));
                    }
                }
                AttemptReport::Miss => {}
                AttemptReport::EngineFailure => engine_failures += 1,
                AttemptReport::SkippedCancelled => cancelled = true,
                AttemptReport::SkippedCutoff => {}
            }
        }

        match (best_hit, best_fatal) {
            (Some((attempt, action)), Some((fatal_at, error))) => {
                if attempt < fatal_at {
                    Ok(SearchOutcome::Planned { action, attempt })
                } else {
                    Err(PlanError::Fatal(error))
                }
            }
            (Some((attempt, action)), None) => Ok(SearchOutcome::Planned { action, attempt }),
            (None, Some((_, error))) => Err(PlanError::Fatal(error)),
            (None, None) => {
                if cancelled || token.is_cancelled() {
                    Err(PlanError::Cancelled)
                } else {
                    Ok(SearchOutcome::Exhausted(ExhaustionReport {
                        attempts: max_attempts,
                        engine_failures,
                    }))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use augur_core::{EngineError, EntityKind};
    use augur_test_utils::{fixtures, MockForecaster, MockOutcome};

    use crate::config::PlannerConfig;

    fn config(workers: usize) -> PlannerConfig {
        PlannerConfig {
            workers: Some(workers),
            ..PlannerConfig::default()
        }
    }

    #[test]
    fn parallel_result_matches_sequential() {
        let (snap, _) = fixtures::scene_with_settled_box();
        let goal = |s: &Snapshot| s.of_kind(EntityKind::Box).count() >= 2;

        let sequential = Planner::new(MockForecaster::identity(), config(4))
            .find_plan(&snap, &goal, 10, 2.0)
            .unwrap();
        let parallel = Planner::new(MockForecaster::identity(), config(4))
            .find_plan_parallel(&snap, &goal, 10, 2.0, &CancelToken::new())
            .unwrap();
        assert_eq!(parallel, sequential);
    }

    #[test]
    fn parallel_exhaustion_evaluates_the_whole_budget() {
        let (snap, _) = fixtures::scene_with_settled_box();
        let goal = |_: &Snapshot| false;
        let planner = Planner::new(MockForecaster::identity(), config(3));

        let outcome = planner
            .find_plan_parallel(&snap, &goal, 9, 2.0, &CancelToken::new())
            .unwrap();
        assert_eq!(
            outcome,
            SearchOutcome::Exhausted(ExhaustionReport {
                attempts: 9,
                engine_failures: 0,
            })
        );
    }

    #[test]
    fn cancelled_token_skips_unstarted_attempts() {
        let (snap, _) = fixtures::scene_with_settled_box();
        let goal = |_: &Snapshot| false;
        let planner = Planner::new(MockForecaster::identity(), config(2));
        let token = CancelToken::new();
        token.cancel();

        let err = planner
            .find_plan_parallel(&snap, &goal, 10, 2.0, &token)
            .unwrap_err();
        assert_eq!(err, PlanError::Cancelled);
    }

    #[test]
    fn systemic_failure_is_fatal_in_parallel_too() {
        let (snap, _) = fixtures::scene_with_settled_box();
        let goal = |_: &Snapshot| false;
        let mock = MockForecaster::failing(PredictError::Engine(
            EngineError::ContextConstruction {
                reason: "backend unavailable".into(),
            },
        ));
        let planner = Planner::new(mock, config(4));

        let err = planner
            .find_plan_parallel(&snap, &goal, 10, 2.0, &CancelToken::new())
            .unwrap_err();
        assert!(matches!(err, PlanError::Fatal(_)));
    }

    #[test]
    fn single_worker_isolates_engine_failures_deterministically() {
        let (snap, _) = fixtures::scene_with_settled_box();
        let goal = |s: &Snapshot| s.of_kind(EntityKind::Box).count() >= 2;
        let mock = MockForecaster::scripted(vec![MockOutcome::Fail(PredictError::Engine(
            EngineError::Step {
                reason: "solver blew up".into(),
            },
        ))]);
        let planner = Planner::new(mock, config(1));

        match planner
            .find_plan_parallel(&snap, &goal, 10, 2.0, &CancelToken::new())
            .unwrap()
        {
            SearchOutcome::Planned { attempt, .. } => assert_eq!(attempt, 1),
            other => panic!("expected a plan, got {other:?}"),
        }
    }

    #[test]
    fn zero_budget_exhausts_immediately() {
        let (snap, _) = fixtures::scene_with_settled_box();
        let goal = |_: &Snapshot| false;
        let planner = Planner::new(MockForecaster::identity(), config(4));

        let outcome = planner
            .find_plan_parallel(&snap, &goal, 0, 2.0, &CancelToken::new())
            .unwrap();
        assert_eq!(
            outcome,
            SearchOutcome::Exhausted(ExhaustionReport {
                attempts: 0,
                engine_failures: 0,
            })
        );
    }
}
