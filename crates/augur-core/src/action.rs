//! Hypothetical interventions on a snapshot.

use serde::{Deserialize, Serialize};

use crate::entity::{DynamicState, Entity, Shape, Vec2};
use crate::error::SnapshotError;
use crate::id::EntityId;
use crate::snapshot::Snapshot;

/// A tagged description of one hypothetical intervention.
///
/// Used both to branch a snapshot during search and to report a found
/// plan back to the caller, who may then enact it on the live system.
/// The enum is non-exhaustive so further interventions (impulses,
/// removals) can be added without touching the oracle or planner
/// contracts.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Action {
    /// Introduce a new dynamic entity at a position.
    Spawn {
        /// Kind and static properties of the new entity.
        shape: Shape,
        /// Where the entity materializes.
        position: Vec2,
    },
}

impl Action {
    /// Materialize this action on a snapshot.
    ///
    /// Spawned entities get a freshly allocated [`EntityId`], zero
    /// velocity and orientation, and start unsettled. Returns the new
    /// entity's ID.
    pub fn apply(&self, snapshot: &mut Snapshot) -> Result<EntityId, SnapshotError> {
        match self {
            Self::Spawn { shape, position } => {
                let entity = Entity::new(*shape, DynamicState::spawned_at(*position));
                let id = entity.id;
                snapshot.insert(entity)?;
                Ok(id)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::BoxProps;

    fn spawn_box(x: f32, y: f32) -> Action {
        Action::Spawn {
            shape: Shape::Box(BoxProps {
                mass: 15.0,
                width: 50.0,
                height: 50.0,
                friction: 0.6,
                elasticity: 0.5,
            }),
            position: Vec2::new(x, y),
        }
    }

    #[test]
    fn apply_inserts_a_fresh_unsettled_entity() {
        let mut snap = Snapshot::new();
        let id = spawn_box(300.0, 400.0).apply(&mut snap).unwrap();

        let entity = snap.get(id).unwrap();
        assert_eq!(entity.state.position, Vec2::new(300.0, 400.0));
        assert_eq!(entity.state.velocity, Vec2::ZERO);
        assert_eq!(entity.state.angle, 0.0);
        assert!(!entity.state.settled);
    }

    #[test]
    fn repeated_application_allocates_distinct_ids() {
        let mut snap = Snapshot::new();
        let action = spawn_box(300.0, 400.0);
        let a = action.apply(&mut snap).unwrap();
        let b = action.apply(&mut snap).unwrap();
        assert_ne!(a, b);
        assert_eq!(snap.len(), 2);
    }
}
