//! Augur: forecast-and-search planning over a 2D rigid-body sandbox.
//!
//! Augur lets an agent reason about a dynamic physical scene without
//! perturbing it: sample the live scene into a portable [`types::Snapshot`],
//! replay it deterministically in an isolated sandbox to forecast its
//! future ([`oracle::Oracle`]), and search over hypothetical single
//! actions for one whose forecast satisfies a goal
//! ([`planner::Planner`]).
//!
//! This is the top-level facade crate that re-exports the public API
//! from all Augur sub-crates. For most users, adding `augur` as a
//! single dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use augur::prelude::*;
//!
//! // Describe the live scene: a ground segment and one settled box.
//! let mut scene = Snapshot::new();
//! scene.insert(Entity::new(
//!     Shape::Ground(GroundProps {
//!         start: Vec2::new(0.0, 750.0),
//!         end: Vec2::new(1200.0, 750.0),
//!         thickness: 5.0,
//!         friction: 0.8,
//!         elasticity: 0.4,
//!     }),
//!     DynamicState::default(),
//! )).unwrap();
//! scene.insert(Entity::new(
//!     Shape::Box(BoxProps {
//!         mass: 15.0,
//!         width: 50.0,
//!         height: 50.0,
//!         friction: 0.6,
//!         elasticity: 0.5,
//!     }),
//!     DynamicState {
//!         position: Vec2::new(600.0, 720.0),
//!         settled: true,
//!         ..DynamicState::default()
//!     },
//! )).unwrap();
//!
//! // Forecast half a second ahead in an isolated sandbox.
//! let oracle = Oracle::new(RapierBackend::new(), WorldParams::default());
//! let forecast = oracle.predict(&scene, 0.5).unwrap();
//! assert_eq!(forecast.len(), scene.len());
//!
//! // Search for a spawn action that stacks two boxes.
//! let planner = Planner::new(oracle, PlannerConfig::default());
//! let outcome = planner
//!     .find_plan(&scene, &StackedBoxes::default(), 8, 2.0)
//!     .unwrap();
//! match outcome {
//!     SearchOutcome::Planned { action, attempt } => {
//!         println!("attempt {attempt} found {action:?}");
//!     }
//!     SearchOutcome::Exhausted(report) => println!("{report}"),
//! }
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in
//! the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `augur-core` | Snapshot data model, IDs, goal/forecast traits, errors |
//! | [`sim`] | `augur-sim` | Simulation adapter contract and the rapier2d binding |
//! | [`oracle`] | `augur-oracle` | The forecasting oracle |
//! | [`planner`] | `augur-planner` | Sequential and parallel search, reference goals |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Snapshot data model, IDs, seam traits, and errors (`augur-core`).
pub use augur_core as types;

/// Simulation adapter contract and rapier2d binding (`augur-sim`).
///
/// Provides the [`sim::SimBackend`]/[`sim::SimContext`] capability
/// traits, [`sim::WorldParams`], analytic [`sim::moment_of_inertia`],
/// and [`sim::RapierBackend`].
pub use augur_sim as sim;

/// The forecasting oracle (`augur-oracle`).
pub use augur_oracle as oracle;

/// Single-action search over forecasts (`augur-planner`).
///
/// [`planner::Planner`] drives the search; [`planner::StackedBoxes`] is
/// the reference goal predicate.
pub use augur_planner as planner;

/// Common imports for typical Augur usage.
///
/// ```rust
/// use augur::prelude::*;
/// ```
pub mod prelude {
    // Data model
    pub use augur_core::{
        Action, BallProps, BoxProps, DynamicState, Entity, EntityId, EntityKind, Forecaster,
        Goal, GroundProps, Shape, Snapshot, Vec2,
    };

    // Errors
    pub use augur_core::{ConfigurationError, EngineError, PredictError, SnapshotError};

    // Simulation adapter
    pub use augur_sim::{RapierBackend, SimBackend, SimContext, WorldParams};

    // Oracle
    pub use augur_oracle::Oracle;

    // Planner
    pub use augur_planner::{
        CancelToken, ExhaustionReport, InvalidGoalInput, PlanError, PlannerConfig, Planner,
        SearchOutcome, StackedBoxes,
    };
}
