//! The [`PhysicsEngine`] boundary trait and its registration types.

use crate::error::PhysicsError;
use voxim_core::{BodyId, JointId, Point2, Vector2};

/// Registration parameters for a point-mass body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodyDef {
    /// Initial world position.
    pub position: Point2,
    /// Body mass (kg). Must be positive; the engine does not validate,
    /// callers do (fail-fast at voxel construction).
    pub mass: f64,
    /// Collision radius for ground contact.
    pub radius: f64,
    /// Linear velocity damping coefficient.
    pub linear_damping: f64,
    /// Ground friction coefficient.
    pub friction: f64,
    /// Ground restitution in `[0, 1]`.
    pub restitution: f64,
    /// Whether this body participates in body-body collision. The
    /// reference backend ignores this (body-body contact is engine
    /// territory the core never relies on); real backends honour it.
    pub collides: bool,
}

/// Registration parameters for a joint between two bodies.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum JointDef {
    /// A spring-damper between two bodies.
    Spring {
        /// First endpoint.
        a: BodyId,
        /// Second endpoint.
        b: BodyId,
        /// Rest length (m).
        rest_length: f64,
        /// Oscillation frequency (Hz) defining stiffness relative to
        /// the endpoint masses.
        frequency_hz: f64,
        /// Damping ratio (1.0 = critically damped).
        damping_ratio: f64,
    },
    /// A rigid point-to-point weld binding two bodies together.
    Weld {
        /// First endpoint.
        a: BodyId,
        /// Second endpoint.
        b: BodyId,
    },
}

/// The external physics-engine collaborator.
///
/// The core constructs nothing beyond point masses and joints; contact
/// resolution and constraint solving are owned by the implementation.
/// Pose/velocity queries return `None` for handles the engine never
/// issued; mutations report the bad handle instead.
///
/// Within one episode all calls are strictly sequential — no
/// implementation is required to be safe for concurrent mutation.
pub trait PhysicsEngine: Send {
    /// Register a body, returning its handle.
    fn add_body(&mut self, def: BodyDef) -> BodyId;

    /// Register a joint between two already-registered bodies.
    fn add_joint(&mut self, def: JointDef) -> Result<JointId, PhysicsError>;

    /// Advance the simulation by one fixed step of `dt` seconds.
    fn step(&mut self, dt: f64) -> Result<(), PhysicsError>;

    /// Current position of a body, or `None` for an unknown handle.
    fn position(&self, body: BodyId) -> Option<Point2>;

    /// Current linear velocity of a body, or `None` for an unknown handle.
    fn velocity(&self, body: BodyId) -> Option<Vector2>;

    /// Whether a body was in ground contact during the last step, or
    /// `None` for an unknown handle.
    fn in_contact(&self, body: BodyId) -> Option<bool>;

    /// Current rest length of a spring joint, or `None` for an unknown
    /// or non-spring handle.
    fn rest_length(&self, joint: JointId) -> Option<f64>;

    /// Accumulate an external force on a body, consumed by the next step.
    fn apply_force(&mut self, body: BodyId, force: Vector2) -> Result<(), PhysicsError>;

    /// Retarget a spring joint's rest length.
    fn set_rest_length(&mut self, joint: JointId, rest_length: f64) -> Result<(), PhysicsError>;

    /// Scale a spring joint's stiffness relative to its registered value.
    fn set_stiffness_scale(&mut self, joint: JointId, scale: f64) -> Result<(), PhysicsError>;

    /// Number of registered bodies.
    fn body_count(&self) -> usize;

    /// Number of registered joints.
    fn joint_count(&self) -> usize;
}
