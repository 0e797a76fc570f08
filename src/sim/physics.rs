//! Physics collaborator seam
//!
//! The stacking rules never integrate motion themselves. Any backend that can
//! create bodies, move a suspended body, report positions and emit contact
//! pairs can drive a run.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::shape::ShapeDescriptor;

/// Opaque body identity owned by the physics backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BodyHandle(pub u32);

/// Material and mobility of a new body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyConfig {
    pub friction: f32,
    pub restitution: f32,
    pub is_static: bool,
}

impl BodyConfig {
    /// Immovable ground
    pub const FLOOR: Self = Self {
        friction: 1.0,
        restitution: 0.0,
        is_static: true,
    };

    /// Pieces start suspended and are released later
    pub const PILE: Self = Self {
        friction: 1.0,
        restitution: 0.0,
        is_static: true,
    };
}

/// Two bodies in contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ContactPair {
    pub a: BodyHandle,
    pub b: BodyHandle,
}

impl ContactPair {
    pub fn new(a: BodyHandle, b: BodyHandle) -> Self {
        Self { a, b }
    }

    #[inline]
    pub fn involves(&self, body: BodyHandle) -> bool {
        self.a == body || self.b == body
    }
}

/// Contact batches reported by one physics sub-step
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactEvents {
    /// Pairs that started touching this sub-step
    pub begin: Vec<ContactPair>,
    /// Pairs still touching from an earlier sub-step
    pub sustained: Vec<ContactPair>,
}

impl ContactEvents {
    pub fn is_empty(&self) -> bool {
        self.begin.is_empty() && self.sustained.is_empty()
    }
}

/// Capabilities the game needs from a rigid-body engine
pub trait PhysicsWorld {
    /// Create a body from a rectangle (or any descriptor the backend can box)
    fn create_static_body(
        &mut self,
        shape: &ShapeDescriptor,
        position: Vec2,
        config: BodyConfig,
    ) -> BodyHandle;

    /// Create a body from an anchored vertex outline
    fn create_polygon_body(
        &mut self,
        vertices: &[Vec2],
        position: Vec2,
        config: BodyConfig,
    ) -> BodyHandle;

    /// Switch a body between suspended (static) and simulated (dynamic)
    fn set_dynamic(&mut self, body: BodyHandle, dynamic: bool);

    fn set_velocity_x(&mut self, body: BodyHandle, vx: f32);

    /// Teleport a body; used to steer a suspended piece
    fn set_position(&mut self, body: BodyHandle, position: Vec2);

    /// Current position, `None` for unknown handles
    fn position(&self, body: BodyHandle) -> Option<Vec2>;

    /// Advance the world by `dt` seconds, returning one batch per internal sub-step
    fn step(&mut self, dt: f32) -> Vec<ContactEvents>;

    /// Drop every body (run teardown)
    fn clear(&mut self);
}
