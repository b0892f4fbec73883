//! Reference binding of the simulation contract to the Rapier 2D engine.
//!
//! Every [`RapierContext`] owns its entire pipeline state — body and
//! collider sets, broad/narrow phase, solver scratch — so contexts are
//! fully isolated from one another and from the live system. Rapier is
//! single-threaded here and evolves identically for identical entity
//! lists and step counts on a given target, which is what the oracle's
//! determinism property requires.

use augur_core::{DynamicState, EngineError, EntityId, Shape, Vec2};
use indexmap::IndexMap;
use log::{debug, trace};
use rapier2d::dynamics::MassProperties;
use rapier2d::prelude::*;

use crate::context::{moment_of_inertia, SimBackend, SimContext};
use crate::params::WorldParams;

/// Factory for isolated Rapier contexts.
#[derive(Clone, Copy, Debug, Default)]
pub struct RapierBackend;

impl RapierBackend {
    /// Create the backend.
    pub fn new() -> Self {
        Self
    }
}

impl SimBackend for RapierBackend {
    fn new_context(&self, params: &WorldParams) -> Result<Box<dyn SimContext>, EngineError> {
        Ok(Box::new(RapierContext::new(params)))
    }
}

/// How one entity is registered inside a context.
enum Registered {
    /// Static geometry never moves; its recorded state is echoed back.
    Fixed { state: DynamicState },
    /// Dynamic body read back from the engine on demand.
    Dynamic { handle: RigidBodyHandle },
}

/// One isolated Rapier simulation world.
pub struct RapierContext {
    params: WorldParams,
    gravity: Vector<Real>,
    integration_parameters: IntegrationParameters,
    pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: BroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,
    registry: IndexMap<EntityId, Registered>,
}

impl RapierContext {
    fn new(params: &WorldParams) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        integration_parameters.dt = params.dt();
        debug!(
            "rapier context: gravity ({}, {}), dt {}",
            params.gravity.x,
            params.gravity.y,
            params.dt()
        );
        Self {
            params: *params,
            gravity: vector![params.gravity.x, params.gravity.y],
            integration_parameters,
            pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: BroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            registry: IndexMap::new(),
        }
    }

    fn add_ground(&mut self, id: EntityId, shape: &Shape, state: &DynamicState) {
        let Shape::Ground(props) = *shape else {
            unreachable!("add_ground called for non-ground shape");
        };
        let dx = props.end.x - props.start.x;
        let dy = props.end.y - props.start.y;
        let center = Vec2::new(
            (props.start.x + props.end.x) / 2.0,
            (props.start.y + props.end.y) / 2.0,
        );
        let half_length = (dx * dx + dy * dy).sqrt() / 2.0;
        let angle = dy.atan2(dx);

        let body = RigidBodyBuilder::fixed()
            .translation(vector![center.x, center.y])
            .rotation(angle)
            .build();
        let handle = self.bodies.insert(body);
        // The segment is realized as a thin cuboid so the registered
        // collision geometry is never zero-area.
        let collider = ColliderBuilder::cuboid(half_length, props.thickness)
            .friction(props.friction)
            .restitution(props.elasticity)
            .build();
        self.colliders
            .insert_with_parent(collider, handle, &mut self.bodies);
        self.registry.insert(id, Registered::Fixed { state: *state });
        trace!("registered ground {id} ({half_length}x{} half-extents)", props.thickness);
    }

    fn add_dynamic(
        &mut self,
        id: EntityId,
        shape: &Shape,
        state: &DynamicState,
    ) -> Result<(), EngineError> {
        let mass = shape.mass().ok_or_else(|| EngineError::Step {
            reason: format!("entity {id}: dynamic body without mass"),
        })?;
        let inertia = moment_of_inertia(shape).ok_or_else(|| EngineError::Step {
            reason: format!("entity {id}: dynamic body without inertia"),
        })?;

        let body = RigidBodyBuilder::dynamic()
            .translation(vector![state.position.x, state.position.y])
            .linvel(vector![state.velocity.x, state.velocity.y])
            .rotation(state.angle)
            .angvel(state.angular_velocity)
            .sleeping(state.settled)
            .additional_mass_properties(MassProperties::new(point![0.0, 0.0], mass, inertia))
            .build();
        let handle = self.bodies.insert(body);

        // Collider density zero: mass properties come solely from the
        // analytic values above.
        let collider = match shape {
            Shape::Ball(p) => ColliderBuilder::ball(p.radius),
            Shape::Box(p) => ColliderBuilder::cuboid(p.width / 2.0, p.height / 2.0),
            Shape::Ground(_) => unreachable!("ground handled by add_ground"),
        }
        .density(0.0)
        .friction(shape.friction())
        .restitution(shape.elasticity())
        .build();
        self.colliders
            .insert_with_parent(collider, handle, &mut self.bodies);

        if let Some(body) = self.bodies.get_mut(handle) {
            let activation = body.activation_mut();
            activation.linear_threshold = self.params.settle_linear_threshold;
            activation.angular_threshold = self.params.settle_angular_threshold;
        }

        self.registry.insert(id, Registered::Dynamic { handle });
        trace!("registered {} {id} at ({}, {})", shape.kind(), state.position.x, state.position.y);
        Ok(())
    }
}

impl SimContext for RapierContext {
    fn add_entity(
        &mut self,
        id: EntityId,
        shape: &Shape,
        state: &DynamicState,
    ) -> Result<(), EngineError> {
        if self.registry.contains_key(&id) {
            return Err(EngineError::Step {
                reason: format!("entity {id} registered twice in one context"),
            });
        }
        match shape {
            Shape::Ground(_) => {
                self.add_ground(id, shape, state);
                Ok(())
            }
            Shape::Ball(_) | Shape::Box(_) => self.add_dynamic(id, shape, state),
        }
    }

    fn step(&mut self) {
        self.pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &(),
        );
    }

    fn read_state(&self, id: EntityId) -> Result<DynamicState, EngineError> {
        match self.registry.get(&id) {
            Some(Registered::Fixed { state }) => Ok(*state),
            Some(Registered::Dynamic { handle }) => {
                let body = self.bodies.get(*handle).ok_or_else(|| EngineError::Step {
                    reason: format!("entity {id}: body handle no longer valid"),
                })?;
                let translation = body.translation();
                let linvel = body.linvel();
                Ok(DynamicState {
                    position: Vec2::new(translation.x, translation.y),
                    velocity: Vec2::new(linvel.x, linvel.y),
                    angle: body.rotation().angle(),
                    angular_velocity: body.angvel(),
                    settled: body.is_sleeping(),
                })
            }
            None => Err(EngineError::UnknownEntity { id }),
        }
    }
}
