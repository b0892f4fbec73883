//! Property tests over the snapshot data model.

use augur_core::{
    BallProps, BoxProps, DynamicState, Entity, GroundProps, Shape, Snapshot, SnapshotError, Vec2,
};
use proptest::prelude::*;

fn vec2() -> impl Strategy<Value = Vec2> {
    (-10_000.0f32..10_000.0, -10_000.0f32..10_000.0).prop_map(|(x, y)| Vec2::new(x, y))
}

fn dynamic_state() -> impl Strategy<Value = DynamicState> {
    (vec2(), vec2(), -3.2f32..3.2, -10.0f32..10.0, any::<bool>()).prop_map(
        |(position, velocity, angle, angular_velocity, settled)| DynamicState {
            position,
            velocity,
            angle,
            angular_velocity,
            settled,
        },
    )
}

fn shape() -> impl Strategy<Value = Shape> {
    let ball = (0.1f32..100.0, 1.0f32..100.0, 0.0f32..1.0, 0.0f32..1.0).prop_map(
        |(mass, radius, friction, elasticity)| {
            Shape::Ball(BallProps {
                mass,
                radius,
                friction,
                elasticity,
            })
        },
    );
    let boxed = (
        0.1f32..100.0,
        1.0f32..200.0,
        1.0f32..200.0,
        0.0f32..1.0,
        0.0f32..1.0,
    )
        .prop_map(|(mass, width, height, friction, elasticity)| {
            Shape::Box(BoxProps {
                mass,
                width,
                height,
                friction,
                elasticity,
            })
        });
    let ground = (vec2(), 1.0f32..500.0, 1.0f32..20.0, 0.0f32..1.0, 0.0f32..1.0).prop_map(
        |(start, span, thickness, friction, elasticity)| {
            Shape::Ground(GroundProps {
                start,
                end: Vec2::new(start.x + span, start.y),
                thickness,
                friction,
                elasticity,
            })
        },
    );
    prop_oneof![ball, boxed, ground]
}

fn entity() -> impl Strategy<Value = Entity> {
    (shape(), dynamic_state()).prop_map(|(shape, state)| Entity::new(shape, state))
}

fn snapshot() -> impl Strategy<Value = Snapshot> {
    prop::collection::vec(entity(), 0..8).prop_map(|entities| {
        let mut snap = Snapshot::new();
        for entity in entities {
            snap.insert(entity).expect("fresh ids never collide");
        }
        snap
    })
}

proptest! {
    #[test]
    fn generated_shapes_always_validate(entity in entity()) {
        prop_assert!(entity.shape.validate(entity.id).is_ok());
    }

    #[test]
    fn json_dump_round_trips(snap in snapshot()) {
        let dump = snap.to_json().expect("serializable");
        let restored: Snapshot = serde_json::from_str(&dump).expect("deserializable");
        prop_assert_eq!(restored, snap);
    }

    #[test]
    fn reinserting_any_entity_is_rejected(snap in snapshot()) {
        let mut copy = snap.clone();
        for entity in snap.entities() {
            prop_assert_eq!(
                copy.insert(entity.clone()),
                Err(SnapshotError::DuplicateId { id: entity.id })
            );
        }
        prop_assert_eq!(copy, snap);
    }

    #[test]
    fn mutating_a_clone_leaves_the_original_alone(snap in snapshot(), state in dynamic_state()) {
        let original = snap.clone();
        let mut copy = snap.clone();
        for entity in snap.entities() {
            copy.set_state(entity.id, state).expect("known id");
        }
        prop_assert_eq!(snap, original);
    }
}
