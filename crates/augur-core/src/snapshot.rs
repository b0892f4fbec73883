//! The world-state snapshot: a portable, engine-agnostic scene description.

use indexmap::IndexMap;
use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};

use crate::entity::{Entity, EntityKind};
use crate::error::SnapshotError;
use crate::id::EntityId;

/// An engine-agnostic description of every entity in a scene.
///
/// A snapshot is a value type: `Clone` produces a fully independent deep
/// copy, so hypothetical search branches never alias the original.
/// Entity IDs are unique within a snapshot (enforced on insert), and a
/// well-formed snapshot holds exactly one [`EntityKind::Ground`] entity
/// plus zero or more dynamic entities — the oracle validates that
/// invariant before forecasting.
///
/// Iteration order is deterministic (insertion order), but consumers
/// must not attach meaning to it; goal predicates in particular are
/// required to be order-independent.
///
/// # Examples
///
/// ```
/// use augur_core::{DynamicState, Entity, GroundProps, Shape, Snapshot, Vec2};
///
/// let mut snapshot = Snapshot::new();
/// let ground = Entity::new(
///     Shape::Ground(GroundProps {
///         start: Vec2::new(0.0, 750.0),
///         end: Vec2::new(1200.0, 750.0),
///         thickness: 5.0,
///         friction: 0.8,
///         elasticity: 0.4,
///     }),
///     DynamicState::default(),
/// );
/// let id = ground.id;
/// snapshot.insert(ground).unwrap();
///
/// assert_eq!(snapshot.len(), 1);
/// assert_eq!(snapshot.ground().unwrap().id, id);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Snapshot {
    entities: IndexMap<EntityId, Entity>,
}

/// Snapshots serialize as a flat entity list; the id-keyed index is an
/// in-memory convenience, not part of the wire format.
impl Serialize for Snapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.entities.values())
    }
}

impl<'de> Deserialize<'de> for Snapshot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entities = Vec::<Entity>::deserialize(deserializer)?;
        let mut snapshot = Snapshot::new();
        for entity in entities {
            snapshot.insert(entity).map_err(serde::de::Error::custom)?;
        }
        Ok(snapshot)
    }
}

impl Snapshot {
    /// Create an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entity, rejecting duplicate IDs.
    pub fn insert(&mut self, entity: Entity) -> Result<(), SnapshotError> {
        if self.entities.contains_key(&entity.id) {
            return Err(SnapshotError::DuplicateId { id: entity.id });
        }
        self.entities.insert(entity.id, entity);
        Ok(())
    }

    /// Look up an entity by ID.
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    /// Replace the dynamic state of an existing entity.
    pub fn set_state(
        &mut self,
        id: EntityId,
        state: crate::entity::DynamicState,
    ) -> Result<(), SnapshotError> {
        match self.entities.get_mut(&id) {
            Some(entity) => {
                entity.state = state;
                Ok(())
            }
            None => Err(SnapshotError::UnknownEntity { id }),
        }
    }

    /// Iterate over all entities in insertion order.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    /// Iterate over entities of one kind.
    pub fn of_kind(&self, kind: EntityKind) -> impl Iterator<Item = &Entity> + '_ {
        self.entities.values().filter(move |e| e.shape.kind() == kind)
    }

    /// The ground entity, if present.
    ///
    /// Returns the first ground encountered; the oracle rejects
    /// snapshots where more than one exists.
    pub fn ground(&self) -> Option<&Entity> {
        self.of_kind(EntityKind::Ground).next()
    }

    /// Number of entities.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the snapshot holds no entities.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Structured dump of the snapshot as a JSON document.
    ///
    /// The read-only inspection surface for logging and telemetry;
    /// stable across runs for identical snapshots.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{BoxProps, DynamicState, Shape, Vec2};

    fn test_box(x: f32, y: f32) -> Entity {
        Entity::new(
            Shape::Box(BoxProps {
                mass: 15.0,
                width: 50.0,
                height: 50.0,
                friction: 0.6,
                elasticity: 0.5,
            }),
            DynamicState::spawned_at(Vec2::new(x, y)),
        )
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut snap = Snapshot::new();
        let entity = test_box(100.0, 500.0);
        snap.insert(entity).unwrap();
        assert_eq!(
            snap.insert(entity),
            Err(SnapshotError::DuplicateId { id: entity.id })
        );
        assert_eq!(snap.len(), 1);
    }

    #[test]
    fn clone_is_an_independent_deep_copy() {
        let mut original = Snapshot::new();
        let entity = test_box(100.0, 500.0);
        let id = entity.id;
        original.insert(entity).unwrap();

        let mut branch = original.clone();
        let mut state = branch.get(id).unwrap().state;
        state.position.x = 999.0;
        state.settled = true;
        branch.set_state(id, state).unwrap();

        assert_eq!(original.get(id).unwrap().state.position.x, 100.0);
        assert!(!original.get(id).unwrap().state.settled);
        assert_eq!(branch.get(id).unwrap().state.position.x, 999.0);
    }

    #[test]
    fn set_state_on_unknown_entity_fails() {
        let mut snap = Snapshot::new();
        let stray = test_box(0.0, 0.0);
        assert_eq!(
            snap.set_state(stray.id, stray.state),
            Err(SnapshotError::UnknownEntity { id: stray.id })
        );
    }

    #[test]
    fn json_dump_round_trips() {
        let mut snap = Snapshot::new();
        snap.insert(test_box(100.0, 500.0)).unwrap();
        snap.insert(test_box(200.0, 500.0)).unwrap();

        let dump = snap.to_json().unwrap();
        let restored: Snapshot = serde_json::from_str(&dump).unwrap();
        assert_eq!(restored, snap);
    }
}
