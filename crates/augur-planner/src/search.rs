//! The sequential search loop and candidate sampling.

use augur_core::{
    Action, EntityKind, Forecaster, Goal, PredictError, Shape, Snapshot, Vec2,
};
use log::{debug, warn};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use smallvec::SmallVec;

use crate::cancel::CancelToken;
use crate::config::PlannerConfig;
use crate::outcome::{ExhaustionReport, InvalidGoalInput, PlanError, SearchOutcome};

/// A settled box usable as the base of a spawn candidate.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Anchor {
    pub(crate) position: Vec2,
    pub(crate) height: f32,
}

/// Result of evaluating one candidate action.
pub(crate) enum AttemptEval {
    /// The forecast satisfied the goal.
    Hit(Action),
    /// The forecast did not satisfy the goal.
    Miss,
    /// An isolated engine failure; only this attempt is lost.
    EngineFailure(PredictError),
    /// A failure every later attempt would hit identically.
    Fatal(PredictError),
}

/// Searches for a single action whose forecast satisfies a goal.
///
/// Generic over the [`Forecaster`] contract rather than a concrete
/// oracle, so search logic is testable against scripted mocks and any
/// backend can supply the forecasts.
pub struct Planner<F: Forecaster> {
    forecaster: F,
    config: PlannerConfig,
}

impl<F: Forecaster> Planner<F> {
    /// Create a planner over `forecaster` with the given configuration.
    pub fn new(forecaster: F, config: PlannerConfig) -> Self {
        Self { forecaster, config }
    }

    /// The planner's configuration.
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Search for one action whose forecast satisfies `goal`.
    ///
    /// Performs up to `max_attempts` independent attempts. Each attempt
    /// clones `initial`, spawns one candidate box above a randomly
    /// chosen settled anchor box, forecasts the branch over
    /// `horizon_seconds`, and evaluates `goal` on the forecast. The
    /// first satisfying action is returned; a spent budget yields
    /// [`SearchOutcome::Exhausted`].
    ///
    /// # Errors
    ///
    /// [`PlanError::InvalidGoalInput`] if the preconditions fail (no
    /// boxes, or no settled base) — checked before any forecast is
    /// made. [`PlanError::Fatal`] if the snapshot is malformed or the
    /// adapter cannot construct contexts at all; isolated engine
    /// failures are logged, counted, and skipped instead.
    pub fn find_plan(
        &self,
        initial: &Snapshot,
        goal: &dyn Goal,
        max_attempts: u32,
        horizon_seconds: f32,
    ) -> Result<SearchOutcome, PlanError> {
        self.find_plan_cancellable(initial, goal, max_attempts, horizon_seconds, &CancelToken::new())
    }

    /// [`find_plan`](Planner::find_plan) with a cooperative cancellation token.
    ///
    /// The token is checked between attempts; an in-flight forecast
    /// runs to completion.
    pub fn find_plan_cancellable(
        &self,
        initial: &Snapshot,
        goal: &dyn Goal,
        max_attempts: u32,
        horizon_seconds: f32,
        token: &CancelToken,
    ) -> Result<SearchOutcome, PlanError> {
        let anchors = anchor_candidates(initial)?;
        debug!(
            "search: {} anchors, budget {max_attempts}, horizon {horizon_seconds}s",
            anchors.len()
        );

        let mut engine_failures = 0u32;
        for attempt in 0..max_attempts {
            if token.is_cancelled() {
                return Err(PlanError::Cancelled);
            }
            match self.evaluate_attempt(initial, goal, &anchors, attempt, horizon_seconds) {
                AttemptEval::Hit(action) => {
                    debug!("attempt {attempt}: goal satisfied");
                    return Ok(SearchOutcome::Planned { action, attempt });
                }
                AttemptEval::Miss => {}
                AttemptEval::EngineFailure(err) => {
                    warn!("attempt {attempt}: engine failure, skipping: {err}");
                    engine_failures += 1;
                }
                AttemptEval::Fatal(err) => return Err(PlanError::Fatal(err)),
            }
        }
        Ok(SearchOutcome::Exhausted(ExhaustionReport {
            attempts: max_attempts,
            engine_failures,
        }))
    }

    /// Sample the candidate action for one attempt.
    ///
    /// Deterministic per `(seed, attempt)`: the RNG stream is derived
    /// as `seed ^ attempt`, so the sequential and parallel paths sample
    /// identical candidates.
    pub(crate) fn candidate(&self, anchors: &[Anchor], attempt: u32) -> Action {
        let mut rng = ChaCha8Rng::seed_from_u64(self.config.seed ^ u64::from(attempt));
        let anchor = anchors[rng.gen_range(0..anchors.len())];
        let jitter = if self.config.jitter > 0.0 {
            rng.gen_range(-self.config.jitter..=self.config.jitter)
        } else {
            0.0
        };
        // Directly above the anchor: both half-heights plus clearance,
        // subtracted because y grows downward.
        let rise = anchor.height / 2.0 + self.config.spawn_box.height / 2.0 + self.config.clearance;
        Action::Spawn {
            shape: Shape::Box(self.config.spawn_box),
            position: Vec2::new(anchor.position.x + jitter, anchor.position.y - rise),
        }
    }

    /// Clone, intervene, forecast, and evaluate one attempt.
    pub(crate) fn evaluate_attempt(
        &self,
        initial: &Snapshot,
        goal: &dyn Goal,
        anchors: &[Anchor],
        attempt: u32,
        horizon_seconds: f32,
    ) -> AttemptEval {
        let action = self.candidate(anchors, attempt);
        let mut branch = initial.clone();
        if let Err(err) = action.apply(&mut branch) {
            // A fresh ID can never collide; treat a failure here as fatal.
            return AttemptEval::Fatal(PredictError::Engine(augur_core::EngineError::Step {
                reason: err.to_string(),
            }));
        }
        match self.forecaster.predict(&branch, horizon_seconds) {
            Ok(forecast) if goal.is_met(&forecast) => AttemptEval::Hit(action),
            Ok(_) => AttemptEval::Miss,
            Err(err) if is_fatal(&err) => AttemptEval::Fatal(err),
            Err(err) => AttemptEval::EngineFailure(err),
        }
    }
}

/// Precompute the settled-box anchors a search draws from.
///
/// Fails fast — before any simulation — when the snapshot holds no
/// boxes, or holds boxes but none of them is settled.
pub(crate) fn anchor_candidates(
    snapshot: &Snapshot,
) -> Result<SmallVec<[Anchor; 4]>, InvalidGoalInput> {
    let mut saw_box = false;
    let mut anchors: SmallVec<[Anchor; 4]> = SmallVec::new();
    for entity in snapshot.of_kind(EntityKind::Box) {
        saw_box = true;
        if !entity.state.settled {
            continue;
        }
        if let Shape::Box(props) = entity.shape {
            anchors.push(Anchor {
                position: entity.state.position,
                height: props.height,
            });
        }
    }
    if !saw_box {
        Err(InvalidGoalInput::NoBoxes)
    } else if anchors.is_empty() {
        Err(InvalidGoalInput::NoSettledBase)
    } else {
        Ok(anchors)
    }
}

/// Whether a predict error would recur identically on every attempt.
fn is_fatal(err: &PredictError) -> bool {
    match err {
        PredictError::MissingGround
        | PredictError::MultipleGround { .. }
        | PredictError::Configuration(_) => true,
        PredictError::Engine(engine) => engine.is_systemic(),
    }
}
