//! Test utilities and mock types for Augur development.
//!
//! Provides a scriptable mock implementation of the [`Forecaster`]
//! seam trait plus snapshot fixtures shared by the oracle and planner
//! test suites.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use augur_core::{Forecaster, PredictError, Snapshot};

/// One scripted outcome for a [`MockForecaster`] call.
#[derive(Clone, Debug)]
pub enum MockOutcome {
    /// Return the input snapshot unchanged.
    Identity,
    /// Fail with the given error.
    Fail(PredictError),
}

/// Scriptable mock of the [`Forecaster`] contract.
///
/// Counts calls and replays a queue of per-call outcomes; once the
/// queue is drained every further call takes the constructor's fallback
/// (identity for [`scripted`](MockForecaster::scripted), the error for
/// [`failing`](MockForecaster::failing)). Thread-safe, so it also backs
/// the parallel planner tests.
pub struct MockForecaster {
    calls: AtomicUsize,
    script: Mutex<VecDeque<MockOutcome>>,
    exhausted: MockOutcome,
}

impl MockForecaster {
    /// A forecaster that always echoes its input.
    pub fn identity() -> Self {
        Self::scripted(Vec::new())
    }

    /// A forecaster replaying `outcomes` in order, then echoing.
    pub fn scripted(outcomes: Vec<MockOutcome>) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            script: Mutex::new(outcomes.into()),
            exhausted: MockOutcome::Identity,
        }
    }

    /// A forecaster that fails every call with `error`.
    pub fn failing(error: PredictError) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            script: Mutex::new(VecDeque::new()),
            exhausted: MockOutcome::Fail(error),
        }
    }

    /// Number of `predict` calls made so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Forecaster for MockForecaster {
    fn predict(&self, snapshot: &Snapshot, _horizon_seconds: f32) -> Result<Snapshot, PredictError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let outcome = self
            .script
            .lock()
            .expect("mock script lock poisoned")
            .pop_front()
            .unwrap_or_else(|| self.exhausted.clone());
        match outcome {
            MockOutcome::Identity => Ok(snapshot.clone()),
            MockOutcome::Fail(err) => Err(err),
        }
    }
}

/// Canned shapes and scenes matching the reference sandbox.
pub mod fixtures {
    use augur_core::{
        BallProps, BoxProps, DynamicState, Entity, EntityId, GroundProps, Shape, Snapshot, Vec2,
    };

    /// The reference ground: a thick horizontal segment near y=750.
    pub fn ground_shape() -> Shape {
        Shape::Ground(GroundProps {
            start: Vec2::new(0.0, 750.0),
            end: Vec2::new(1200.0, 750.0),
            thickness: 5.0,
            friction: 0.8,
            elasticity: 0.4,
        })
    }

    /// The reference ball: mass 10, radius 25.
    pub fn ball_shape() -> Shape {
        Shape::Ball(BallProps {
            mass: 10.0,
            radius: 25.0,
            friction: 0.7,
            elasticity: 0.6,
        })
    }

    /// The reference box: mass 15, 50x50.
    pub fn box_shape() -> Shape {
        Shape::Box(BoxProps {
            mass: 15.0,
            width: 50.0,
            height: 50.0,
            friction: 0.6,
            elasticity: 0.5,
        })
    }

    /// A snapshot holding only the reference ground.
    pub fn scene_with_ground() -> Snapshot {
        let mut snap = Snapshot::new();
        snap.insert(Entity::new(ground_shape(), DynamicState::default()))
            .expect("fresh snapshot accepts ground");
        snap
    }

    /// A settled reference box at `(x, y)`.
    pub fn settled_box_at(x: f32, y: f32) -> Entity {
        Entity::new(
            box_shape(),
            DynamicState {
                position: Vec2::new(x, y),
                settled: true,
                ..DynamicState::default()
            },
        )
    }

    /// Ground plus one settled box resting on it; returns the box's ID.
    pub fn scene_with_settled_box() -> (Snapshot, EntityId) {
        let mut snap = scene_with_ground();
        let anchor = settled_box_at(600.0, 720.0);
        let id = anchor.id;
        snap.insert(anchor).expect("fresh id");
        (snap, id)
    }
}
