//! The forecasting seam between oracle and planner.

use crate::error::PredictError;
use crate::snapshot::Snapshot;

/// Forecasts a snapshot forward in time.
///
/// The planner depends only on this contract, never on a concrete
/// oracle, which keeps search logic testable against scripted mocks.
///
/// Implementations must be pure functions of their inputs: the input
/// snapshot is never mutated, concurrent calls on independent inputs
/// must not cross-contaminate, and repeated calls with identical inputs
/// yield identical (or numerically near-identical) outputs.
pub trait Forecaster {
    /// Predict the scene `horizon_seconds` into the future.
    ///
    /// A zero horizon returns a snapshot equal to the input in all
    /// kinds, static properties, and dynamic states.
    fn predict(&self, snapshot: &Snapshot, horizon_seconds: f32) -> Result<Snapshot, PredictError>;
}
