//! Goal predicates: pure boolean tests over snapshots.

use crate::snapshot::Snapshot;

/// A pure predicate defining search success.
///
/// Implementations must be deterministic, side-effect-free, and
/// independent of entity enumeration order. The planner evaluates goals
/// only on oracle outputs, never on the live original snapshot.
pub trait Goal {
    /// Whether the snapshot satisfies the goal.
    fn is_met(&self, snapshot: &Snapshot) -> bool;
}

impl<F> Goal for F
where
    F: Fn(&Snapshot) -> bool,
{
    fn is_met(&self, snapshot: &Snapshot) -> bool {
        self(snapshot)
    }
}
