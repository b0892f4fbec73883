//! Simulation adapter: the capability surface Augur requires from a 2D
//! rigid-body physics engine, plus the reference binding to `rapier2d`.
//!
//! The adapter deliberately exposes the minimum the oracle needs:
//! construct isolated contexts, populate them from snapshot data,
//! advance them in fixed steps, and read per-entity dynamic state back.
//! Collision detection, integration, and sleeping are the engine's
//! business; nothing here reimplements them.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod context;
pub mod params;
pub mod rapier;

pub use context::{moment_of_inertia, SimBackend, SimContext};
pub use params::WorldParams;
pub use rapier::RapierBackend;
