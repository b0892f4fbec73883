//! Stable entity identifiers.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Counter for unique [`EntityId`] allocation.
static ENTITY_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Stable identifier for one entity.
///
/// Allocated from a monotonic atomic counter via [`EntityId::next`] when
/// an entity is first created, and preserved verbatim across every
/// snapshot/reconstruction cycle. Two distinct entities always have
/// different IDs, and an ID is never reused after its entity is gone.
///
/// Engine-internal body handles are deliberately *not* usable here:
/// they are only valid within one simulation context and are reassigned
/// on every isolated reconstruction. All cross-context bookkeeping keys
/// on `EntityId`.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct EntityId(u64);

impl EntityId {
    /// Allocate a fresh, unique entity ID.
    ///
    /// Each call returns an ID that has never been returned before
    /// within this process. Thread-safe.
    pub fn next() -> Self {
        Self(ENTITY_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        let a = EntityId::next();
        let b = EntityId::next();
        assert_ne!(a, b);
    }

    #[test]
    fn ids_are_monotonic() {
        let a = EntityId::next();
        let b = EntityId::next();
        assert!(b > a);
    }
}
