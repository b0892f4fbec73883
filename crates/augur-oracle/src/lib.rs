//! The oracle: a pure forecasting function over world-state snapshots.
//!
//! `predict` reconstructs the scene in a brand-new isolated simulation
//! context, advances it a fixed number of steps, and returns the
//! resulting snapshot. It shares no mutable state with the live system
//! or with other concurrent calls, and it never mutates its input.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

use augur_core::{EngineError, EntityKind, Forecaster, PredictError, Snapshot};
use augur_sim::{SimBackend, WorldParams};
use log::debug;

/// Forecasts snapshots by deterministic replay in an isolated sandbox.
///
/// Holds the simulation backend and the same global parameters the live
/// system runs with; every `predict` call builds a fresh context from
/// them, so the horizon couples to step count rather than wall-clock
/// time and calls are embarrassingly parallel.
pub struct Oracle<B: SimBackend> {
    backend: B,
    params: WorldParams,
}

impl<B: SimBackend> Oracle<B> {
    /// Create an oracle over `backend` with the live system's parameters.
    pub fn new(backend: B, params: WorldParams) -> Self {
        Self { backend, params }
    }

    /// The world parameters every forecast context is configured with.
    pub fn params(&self) -> &WorldParams {
        &self.params
    }

    /// Forecast `snapshot` forward by `horizon_seconds`.
    ///
    /// Validates the snapshot (exactly one ground entity, well-formed
    /// static properties on every entity) before any context is built,
    /// then registers every entity seeded with its recorded dynamic
    /// state, advances `round(horizon × step_rate)` fixed steps, and
    /// returns a new snapshot with identical identities and shapes and
    /// updated dynamic states.
    ///
    /// # Errors
    ///
    /// [`PredictError::MissingGround`] / [`PredictError::MultipleGround`]
    /// for an ill-formed scene, [`PredictError::Configuration`] naming
    /// the offending entity and field for malformed static properties,
    /// and [`PredictError::Engine`] for failures in the underlying
    /// engine.
    pub fn predict(
        &self,
        snapshot: &Snapshot,
        horizon_seconds: f32,
    ) -> Result<Snapshot, PredictError> {
        validate(snapshot)?;

        let steps = self.params.steps_for_horizon(horizon_seconds);
        debug!(
            "predict: {} entities, horizon {horizon_seconds}s -> {steps} steps",
            snapshot.len()
        );

        let mut context = self.backend.new_context(&self.params)?;
        for entity in snapshot.entities() {
            context.add_entity(entity.id, &entity.shape, &entity.state)?;
        }
        for _ in 0..steps {
            context.step();
        }

        let mut forecast = snapshot.clone();
        let ids: Vec<_> = snapshot.entities().map(|e| e.id).collect();
        for id in ids {
            let state = context.read_state(id)?;
            forecast.set_state(id, state).map_err(|err| EngineError::Step {
                reason: err.to_string(),
            })?;
        }
        Ok(forecast)
    }
}

impl<B: SimBackend> Forecaster for Oracle<B> {
    fn predict(&self, snapshot: &Snapshot, horizon_seconds: f32) -> Result<Snapshot, PredictError> {
        Oracle::predict(self, snapshot, horizon_seconds)
    }
}

/// Check the scene invariants a forecast relies on.
fn validate(snapshot: &Snapshot) -> Result<(), PredictError> {
    let mut grounds = snapshot.of_kind(EntityKind::Ground);
    let first = grounds.next().ok_or(PredictError::MissingGround)?;
    if let Some(second) = grounds.next() {
        return Err(PredictError::MultipleGround {
            first: first.id,
            second: second.id,
        });
    }
    for entity in snapshot.entities() {
        entity.shape.validate(entity.id)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use augur_test_utils::fixtures;

    #[test]
    fn empty_snapshot_is_missing_ground() {
        assert_eq!(validate(&Snapshot::new()), Err(PredictError::MissingGround));
    }

    #[test]
    fn two_grounds_are_rejected() {
        let mut snap = fixtures::scene_with_ground();
        let second = augur_core::Entity::new(fixtures::ground_shape(), Default::default());
        snap.insert(second).unwrap();
        assert!(matches!(
            validate(&snap),
            Err(PredictError::MultipleGround { .. })
        ));
    }

    #[test]
    fn malformed_props_name_entity_and_field() {
        let mut snap = fixtures::scene_with_ground();
        let bad = augur_core::Entity::new(
            augur_core::Shape::Ball(augur_core::BallProps {
                mass: -1.0,
                radius: 25.0,
                friction: 0.7,
                elasticity: 0.6,
            }),
            Default::default(),
        );
        let bad_id = bad.id;
        snap.insert(bad).unwrap();
        match validate(&snap) {
            Err(PredictError::Configuration(err)) => {
                assert_eq!(err.entity, bad_id);
                assert_eq!(err.field, "mass");
            }
            other => panic!("expected configuration error, got {other:?}"),
        }
    }
}
