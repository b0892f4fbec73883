//! Engine-agnostic world-state model and core traits for Augur.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the portable snapshot data model (entities, shapes, dynamic state),
//! stable entity identifiers, the [`Goal`] and [`Forecaster`] seam
//! traits, and the error taxonomy shared by the rest of the workspace.
//!
//! Nothing in this crate knows about any particular physics engine;
//! snapshots are plain values that can be cloned, serialized, and
//! replayed in an isolated sandbox by the oracle crate.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod action;
pub mod entity;
pub mod error;
pub mod goal;
pub mod id;
pub mod snapshot;
pub mod traits;

pub use action::Action;
pub use entity::{BallProps, BoxProps, DynamicState, Entity, EntityKind, GroundProps, Shape, Vec2};
pub use error::{ConfigurationError, EngineError, PredictError, SnapshotError};
pub use goal::Goal;
pub use id::EntityId;
pub use snapshot::Snapshot;
pub use traits::Forecaster;
