//! Entities: shapes, static properties, and instantaneous dynamic state.
//!
//! The coordinate convention is screen-style throughout: `y` increases
//! downward, so gravity is a positive `y` vector and "above" means a
//! smaller `y` value.

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;
use crate::id::EntityId;

/// A 2D vector in world units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    /// Horizontal component.
    pub x: f32,
    /// Vertical component (downward-increasing).
    pub y: f32,
}

impl Vec2 {
    /// The zero vector.
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    /// Construct a vector from components.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Tag identifying an entity's kind.
///
/// The set of kinds is closed; each kind's static properties live in the
/// matching [`Shape`] variant, so there are no runtime field-presence
/// checks anywhere downstream.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// Static immovable geometry. Exactly one per snapshot; has no mass.
    Ground,
    /// A dynamic circular body.
    Ball,
    /// A dynamic rectangular body.
    Box,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ground => write!(f, "ground"),
            Self::Ball => write!(f, "ball"),
            Self::Box => write!(f, "box"),
        }
    }
}

/// Static properties of the ground: a thick line segment.
///
/// `start`/`end` are the segment endpoints; `thickness` is the half-width
/// of the collision geometry, so the registered collider is never
/// degenerate.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GroundProps {
    /// One endpoint of the segment.
    pub start: Vec2,
    /// The other endpoint of the segment.
    pub end: Vec2,
    /// Half-thickness of the collision geometry.
    pub thickness: f32,
    /// Surface friction coefficient.
    pub friction: f32,
    /// Surface elasticity (restitution) coefficient.
    pub elasticity: f32,
}

/// Static properties of a ball.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BallProps {
    /// Body mass.
    pub mass: f32,
    /// Circle radius.
    pub radius: f32,
    /// Surface friction coefficient.
    pub friction: f32,
    /// Surface elasticity (restitution) coefficient.
    pub elasticity: f32,
}

/// Static properties of a box.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoxProps {
    /// Body mass.
    pub mass: f32,
    /// Full width.
    pub width: f32,
    /// Full height.
    pub height: f32,
    /// Surface friction coefficient.
    pub friction: f32,
    /// Surface elasticity (restitution) coefficient.
    pub elasticity: f32,
}

/// An entity's kind together with that kind's static properties.
///
/// One variant per [`EntityKind`], each carrying exactly the fields the
/// kind requires.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    /// Static ground geometry.
    Ground(GroundProps),
    /// A circular dynamic body.
    Ball(BallProps),
    /// A rectangular dynamic body.
    Box(BoxProps),
}

impl Shape {
    /// The kind tag for this shape.
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Ground(_) => EntityKind::Ground,
            Self::Ball(_) => EntityKind::Ball,
            Self::Box(_) => EntityKind::Box,
        }
    }

    /// Body mass, or `None` for static geometry.
    pub fn mass(&self) -> Option<f32> {
        match self {
            Self::Ground(_) => None,
            Self::Ball(p) => Some(p.mass),
            Self::Box(p) => Some(p.mass),
        }
    }

    /// Surface friction coefficient.
    pub fn friction(&self) -> f32 {
        match self {
            Self::Ground(p) => p.friction,
            Self::Ball(p) => p.friction,
            Self::Box(p) => p.friction,
        }
    }

    /// Surface elasticity (restitution) coefficient.
    pub fn elasticity(&self) -> f32 {
        match self {
            Self::Ground(p) => p.elasticity,
            Self::Ball(p) => p.elasticity,
            Self::Box(p) => p.elasticity,
        }
    }

    /// Validate the static properties, naming the offending field.
    ///
    /// Called by the oracle before any simulation context is built; a
    /// malformed property is a fatal configuration error for the whole
    /// call, never a silent default.
    pub fn validate(&self, entity: EntityId) -> Result<(), ConfigurationError> {
        let check = |field: &'static str, value: f32, strictly_positive: bool| {
            let ok = value.is_finite() && if strictly_positive { value > 0.0 } else { value >= 0.0 };
            if ok {
                Ok(())
            } else {
                Err(ConfigurationError {
                    entity,
                    field,
                    value,
                })
            }
        };
        match self {
            Self::Ground(p) => {
                check("thickness", p.thickness, true)?;
                check("friction", p.friction, false)?;
                check("elasticity", p.elasticity, false)?;
                let dx = p.end.x - p.start.x;
                let dy = p.end.y - p.start.y;
                let length = (dx * dx + dy * dy).sqrt();
                check("segment length", length, true)
            }
            Self::Ball(p) => {
                check("mass", p.mass, true)?;
                check("radius", p.radius, true)?;
                check("friction", p.friction, false)?;
                check("elasticity", p.elasticity, false)
            }
            Self::Box(p) => {
                check("mass", p.mass, true)?;
                check("width", p.width, true)?;
                check("height", p.height, true)?;
                check("friction", p.friction, false)?;
                check("elasticity", p.elasticity, false)
            }
        }
    }
}

/// Instantaneous motion state of an entity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DynamicState {
    /// Position of the body's center of mass.
    pub position: Vec2,
    /// Linear velocity.
    pub velocity: Vec2,
    /// Orientation angle in radians.
    pub angle: f32,
    /// Angular velocity in radians per second.
    pub angular_velocity: f32,
    /// True when the engine's rest heuristic judges the body motionless.
    pub settled: bool,
}

impl DynamicState {
    /// State for a freshly spawned body: at `position`, motionless but
    /// not yet settled.
    pub fn spawned_at(position: Vec2) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }
}

/// One physical object: a stable identity, its shape, and its current
/// dynamic state.
///
/// Entities live only inside a [`Snapshot`](crate::Snapshot); they have
/// no independent lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Stable identifier, assigned once at creation.
    pub id: EntityId,
    /// Kind and static properties.
    pub shape: Shape,
    /// Instantaneous dynamic state.
    pub state: DynamicState,
}

impl Entity {
    /// Create an entity with a freshly allocated [`EntityId`].
    pub fn new(shape: Shape, state: DynamicState) -> Self {
        Self {
            id: EntityId::next(),
            shape,
            state,
        }
    }
}
