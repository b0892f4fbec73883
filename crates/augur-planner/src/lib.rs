//! The planner: bounded stochastic search over single hypothetical
//! actions, using a [`Forecaster`](augur_core::Forecaster) to judge each
//! candidate.
//!
//! Each attempt clones the initial snapshot, applies exactly one
//! candidate spawn action, forecasts the branch, and evaluates the goal
//! on the forecast — never on the live original. Attempts are
//! independent (no state carried forward beyond the precomputed anchor
//! list and the attempt counter), which is what makes the
//! [`parallel`] worker-pool variant possible without locking.
//!
//! Search is satisficing: the first action whose forecast satisfies the
//! goal wins, and a spent budget is an expected outcome
//! ([`ExhaustionReport`]), not a failure.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cancel;
pub mod config;
pub mod goals;
pub mod outcome;
pub mod parallel;
pub mod search;

pub use cancel::CancelToken;
pub use config::PlannerConfig;
pub use goals::StackedBoxes;
pub use outcome::{ExhaustionReport, InvalidGoalInput, PlanError, SearchOutcome};
pub use search::Planner;
