//! Reference goal predicates.

use augur_core::{EntityKind, Goal, Shape, Snapshot};

/// True when two distinct settled boxes stand stacked on each other.
///
/// Satisfied iff there exist two distinct box entities, both settled,
/// whose horizontal positions agree within `alignment_tolerance` and
/// whose vertical separation is one box height within
/// `vertical_tolerance` (remember y grows downward, so the upper box
/// has the smaller y). Pure and independent of entity enumeration
/// order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StackedBoxes {
    /// Maximum horizontal misalignment between the two box centers.
    /// Default: 25.
    pub alignment_tolerance: f32,
    /// Allowed deviation of the vertical gap from one box height.
    /// Default: 10.
    pub vertical_tolerance: f32,
    /// Expected box height for the vertical gap. `None` uses the base
    /// box's own height. Default: `None`.
    pub expected_height: Option<f32>,
}

impl Default for StackedBoxes {
    fn default() -> Self {
        Self {
            alignment_tolerance: 25.0,
            vertical_tolerance: 10.0,
            expected_height: None,
        }
    }
}

impl Goal for StackedBoxes {
    fn is_met(&self, snapshot: &Snapshot) -> bool {
        let boxes: Vec<_> = snapshot
            .of_kind(EntityKind::Box)
            .filter(|e| e.state.settled)
            .collect();
        // Every ordered pair is examined, so the verdict cannot depend
        // on enumeration order.
        for upper in &boxes {
            for base in &boxes {
                if upper.id == base.id {
                    continue;
                }
                let Shape::Box(base_props) = base.shape else {
                    continue;
                };
                let expected = self.expected_height.unwrap_or(base_props.height);
                let aligned = (upper.state.position.x - base.state.position.x).abs()
                    <= self.alignment_tolerance;
                let gap = base.state.position.y - upper.state.position.y;
                if aligned && (gap - expected).abs() <= self.vertical_tolerance {
                    return true;
                }
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use augur_core::{DynamicState, Entity, Vec2};
    use augur_test_utils::fixtures;
    use proptest::prelude::*;

    fn boxed(x: f32, y: f32, settled: bool) -> Entity {
        Entity::new(
            fixtures::box_shape(),
            DynamicState {
                position: Vec2::new(x, y),
                settled,
                ..DynamicState::default()
            },
        )
    }

    fn scene(entities: Vec<Entity>) -> Snapshot {
        let mut snap = fixtures::scene_with_ground();
        for entity in entities {
            snap.insert(entity).unwrap();
        }
        snap
    }

    #[test]
    fn aligned_settled_pair_is_a_stack() {
        let snap = scene(vec![boxed(100.0, 500.0, true), boxed(100.0, 550.0, true)]);
        assert!(StackedBoxes::default().is_met(&snap));
    }

    #[test]
    fn unsettled_member_is_not_a_stack() {
        let snap = scene(vec![boxed(100.0, 500.0, false), boxed(100.0, 550.0, true)]);
        assert!(!StackedBoxes::default().is_met(&snap));

        let snap = scene(vec![boxed(100.0, 500.0, true), boxed(100.0, 550.0, false)]);
        assert!(!StackedBoxes::default().is_met(&snap));
    }

    #[test]
    fn horizontal_offset_beyond_tolerance_is_not_a_stack() {
        let snap = scene(vec![boxed(130.0, 500.0, true), boxed(100.0, 550.0, true)]);
        assert!(!StackedBoxes::default().is_met(&snap));
    }

    #[test]
    fn vertical_gap_beyond_tolerance_is_not_a_stack() {
        // Side by side on the ground, not stacked.
        let snap = scene(vec![boxed(100.0, 550.0, true), boxed(110.0, 550.0, true)]);
        assert!(!StackedBoxes::default().is_met(&snap));
    }

    #[test]
    fn a_single_box_is_never_a_stack() {
        let snap = scene(vec![boxed(100.0, 550.0, true)]);
        assert!(!StackedBoxes::default().is_met(&snap));
    }

    #[test]
    fn explicit_expected_height_overrides_the_base_box() {
        let goal = StackedBoxes {
            expected_height: Some(80.0),
            ..StackedBoxes::default()
        };
        let snap = scene(vec![boxed(100.0, 470.0, true), boxed(100.0, 550.0, true)]);
        assert!(goal.is_met(&snap));
        assert!(!StackedBoxes::default().is_met(&snap));
    }

    proptest! {
        /// The verdict must not depend on entity insertion order.
        #[test]
        fn insertion_order_is_irrelevant(
            xs in proptest::collection::vec(0f32..1200.0, 2..6),
            ys in proptest::collection::vec(0f32..750.0, 2..6),
        ) {
            let n = xs.len().min(ys.len());
            let entities: Vec<Entity> = (0..n)
                .map(|i| boxed(xs[i], ys[i], true))
                .collect();
            let mut reversed = entities.clone();
            reversed.reverse();

            let goal = StackedBoxes::default();
            prop_assert_eq!(
                goal.is_met(&scene(entities)),
                goal.is_met(&scene(reversed))
            );
        }
    }
}
