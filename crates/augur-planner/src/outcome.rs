//! Typed search results and planner errors.
//!
//! The taxonomy keeps every failure kind distinguishable: unmet search
//! preconditions and a spent budget are benign typed outcomes, while
//! systemic engine or configuration failures abort the whole search.
//! None of them is ever conflated with "goal not yet met".

use std::error::Error;
use std::fmt;

use augur_core::{Action, PredictError};

/// Successful completion of a search, one way or the other.
#[derive(Clone, Debug, PartialEq)]
pub enum SearchOutcome {
    /// An action whose forecast satisfied the goal.
    Planned {
        /// The winning action.
        action: Action,
        /// Zero-based index of the attempt that found it.
        attempt: u32,
    },
    /// The attempt budget was spent without satisfying the goal.
    Exhausted(ExhaustionReport),
}

/// Report returned when the search budget is spent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExhaustionReport {
    /// Number of attempts performed (equals the requested budget).
    pub attempts: u32,
    /// How many of those attempts were lost to isolated engine errors.
    pub engine_failures: u32,
}

impl fmt::Display for ExhaustionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "search exhausted after {} attempts ({} engine failures)",
            self.attempts, self.engine_failures
        )
    }
}

/// Search preconditions that failed before any forecast was made.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvalidGoalInput {
    /// The initial snapshot contains no box entities.
    NoBoxes,
    /// No box entity is currently settled, so there is no base anchor.
    NoSettledBase,
}

impl fmt::Display for InvalidGoalInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoBoxes => write!(f, "initial snapshot contains no boxes"),
            Self::NoSettledBase => write!(f, "no settled box to anchor a spawn on"),
        }
    }
}

impl Error for InvalidGoalInput {}

/// Errors that abort a search.
#[derive(Clone, Debug, PartialEq)]
pub enum PlanError {
    /// Preconditions unmet; no forecast was attempted.
    InvalidGoalInput(InvalidGoalInput),
    /// A failure every subsequent attempt would hit identically
    /// (malformed snapshot, or the adapter cannot construct contexts).
    Fatal(PredictError),
    /// The search observed its cancellation token.
    Cancelled,
}

impl fmt::Display for PlanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidGoalInput(err) => write!(f, "invalid goal input: {err}"),
            Self::Fatal(err) => write!(f, "search aborted: {err}"),
            Self::Cancelled => write!(f, "search cancelled"),
        }
    }
}

impl Error for PlanError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidGoalInput(err) => Some(err),
            Self::Fatal(err) => Some(err),
            Self::Cancelled => None,
        }
    }
}

impl From<InvalidGoalInput> for PlanError {
    fn from(err: InvalidGoalInput) -> Self {
        Self::InvalidGoalInput(err)
    }
}
