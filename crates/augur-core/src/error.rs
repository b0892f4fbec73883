//! Error types shared across the Augur workspace.
//!
//! Organized by subsystem: snapshot construction, static-property
//! configuration, the simulation engine boundary, and forecasting.
//! Planner-specific results (`InvalidGoalInput`, exhaustion) live in the
//! planner crate; they are typed outcomes rather than failures here.

use std::error::Error;
use std::fmt;

use crate::id::EntityId;

/// Errors from snapshot construction and mutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SnapshotError {
    /// An entity with this ID is already present in the snapshot.
    DuplicateId {
        /// The colliding identifier.
        id: EntityId,
    },
    /// No entity with this ID exists in the snapshot.
    UnknownEntity {
        /// The missing identifier.
        id: EntityId,
    },
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateId { id } => write!(f, "duplicate entity id {id}"),
            Self::UnknownEntity { id } => write!(f, "unknown entity id {id}"),
        }
    }
}

impl Error for SnapshotError {}

/// A malformed static property on one entity.
///
/// Fatal for the call that detected it: the offending entity and field
/// are named rather than guessed around with a default.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConfigurationError {
    /// The entity carrying the bad property.
    pub entity: EntityId,
    /// Name of the offending static property.
    pub field: &'static str,
    /// The rejected value.
    pub value: f32,
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "entity {}: static property '{}' is invalid (value {})",
            self.entity, self.field, self.value
        )
    }
}

impl Error for ConfigurationError {}

/// Failures at the simulation engine boundary.
#[derive(Clone, Debug, PartialEq)]
pub enum EngineError {
    /// The adapter could not construct a simulation context at all.
    ///
    /// Systemic: every subsequent context would fail identically, so
    /// callers abort rather than retry.
    ContextConstruction {
        /// Engine-reported reason.
        reason: String,
    },
    /// A context was asked about an entity it never registered.
    UnknownEntity {
        /// The unregistered identifier.
        id: EntityId,
    },
    /// The engine failed while advancing or populating one context.
    ///
    /// Isolatable: only the rollout that triggered it is lost.
    Step {
        /// Engine-reported reason.
        reason: String,
    },
}

impl EngineError {
    /// Whether this failure would recur for every future context.
    pub fn is_systemic(&self) -> bool {
        matches!(self, Self::ContextConstruction { .. })
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ContextConstruction { reason } => {
                write!(f, "failed to construct simulation context: {reason}")
            }
            Self::UnknownEntity { id } => write!(f, "entity {id} not registered in context"),
            Self::Step { reason } => write!(f, "simulation step failed: {reason}"),
        }
    }
}

impl Error for EngineError {}

/// Errors from [`Forecaster::predict`](crate::Forecaster::predict).
#[derive(Clone, Debug, PartialEq)]
pub enum PredictError {
    /// The snapshot contains no ground entity.
    MissingGround,
    /// The snapshot contains more than one ground entity.
    MultipleGround {
        /// The first ground entity encountered.
        first: EntityId,
        /// The second ground entity encountered.
        second: EntityId,
    },
    /// An entity's static properties are malformed.
    Configuration(ConfigurationError),
    /// The underlying simulation engine failed.
    Engine(EngineError),
}

impl fmt::Display for PredictError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingGround => write!(f, "snapshot has no ground entity"),
            Self::MultipleGround { first, second } => {
                write!(f, "snapshot has multiple ground entities ({first}, {second})")
            }
            Self::Configuration(err) => write!(f, "configuration error: {err}"),
            Self::Engine(err) => write!(f, "engine error: {err}"),
        }
    }
}

impl Error for PredictError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Configuration(err) => Some(err),
            Self::Engine(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ConfigurationError> for PredictError {
    fn from(err: ConfigurationError) -> Self {
        Self::Configuration(err)
    }
}

impl From<EngineError> for PredictError {
    fn from(err: EngineError) -> Self {
        Self::Engine(err)
    }
}
