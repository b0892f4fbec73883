//! The simulation capability contract and analytic mass properties.

use augur_core::{DynamicState, EngineError, EntityId, Shape};

use crate::params::WorldParams;

/// One isolated, independently steppable simulation world.
///
/// A context owns its entire physics state and an internal registry
/// mapping [`EntityId`]s to engine handles; engine handles never leak
/// across the boundary because they are not stable between contexts.
/// `step` must not block on, consult, or mutate any other context.
pub trait SimContext {
    /// Register one entity, seeded with its recorded dynamic state.
    ///
    /// Ground registers static immovable geometry; every other kind
    /// registers a dynamic body with analytic mass properties.
    fn add_entity(
        &mut self,
        id: EntityId,
        shape: &Shape,
        state: &DynamicState,
    ) -> Result<(), EngineError>;

    /// Advance the context by one fixed timestep.
    fn step(&mut self);

    /// Read the current dynamic state of a registered entity.
    fn read_state(&self, id: EntityId) -> Result<DynamicState, EngineError>;
}

/// Constructs isolated simulation contexts.
///
/// Two contexts constructed from identical entity lists and stepped the
/// same number of times must evolve identically; an engine that cannot
/// guarantee this (e.g. one with multithreaded float reductions) breaks
/// the oracle's determinism property and must not be bound here.
pub trait SimBackend {
    /// Create a fresh, empty context configured with `params`.
    fn new_context(&self, params: &WorldParams) -> Result<Box<dyn SimContext>, EngineError>;
}

/// Analytic moment of inertia for a shape, or `None` for static geometry.
///
/// Solid disc `m·r²/2`; solid box `m·(w²+h²)/12`. Required to construct
/// a dynamically consistent body regardless of the engine's own density
/// bookkeeping.
pub fn moment_of_inertia(shape: &Shape) -> Option<f32> {
    match shape {
        Shape::Ground(_) => None,
        Shape::Ball(p) => Some(p.mass * p.radius * p.radius / 2.0),
        Shape::Box(p) => Some(p.mass * (p.width * p.width + p.height * p.height) / 12.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use augur_core::{BallProps, BoxProps, GroundProps, Vec2};

    #[test]
    fn disc_inertia() {
        let shape = Shape::Ball(BallProps {
            mass: 10.0,
            radius: 25.0,
            friction: 0.7,
            elasticity: 0.6,
        });
        assert_eq!(moment_of_inertia(&shape), Some(3125.0));
    }

    #[test]
    fn box_inertia() {
        let shape = Shape::Box(BoxProps {
            mass: 15.0,
            width: 50.0,
            height: 50.0,
            friction: 0.6,
            elasticity: 0.5,
        });
        // 15 * (2500 + 2500) / 12
        assert_eq!(moment_of_inertia(&shape), Some(6250.0));
    }

    #[test]
    fn ground_has_no_inertia() {
        let shape = Shape::Ground(GroundProps {
            start: Vec2::new(0.0, 750.0),
            end: Vec2::new(1200.0, 750.0),
            thickness: 5.0,
            friction: 0.8,
            elasticity: 0.4,
        });
        assert_eq!(moment_of_inertia(&shape), None);
    }
}
