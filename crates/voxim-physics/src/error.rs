//! Physics boundary error types.

use std::error::Error;
use std::fmt;

use voxim_core::{BodyId, JointId};

/// Errors from physics-engine operations.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PhysicsError {
    /// A body handle was never issued by this engine.
    UnknownBody(BodyId),
    /// A joint handle was never issued by this engine.
    UnknownJoint(JointId),
    /// A spring-only operation was applied to a weld joint.
    NotASpring(JointId),
    /// `step` was called with a non-finite or non-positive timestep.
    InvalidTimestep {
        /// The offending value.
        dt: f64,
    },
}

impl fmt::Display for PhysicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownBody(id) => write!(f, "unknown body {id}"),
            Self::UnknownJoint(id) => write!(f, "unknown joint {id}"),
            Self::NotASpring(id) => write!(f, "joint {id} is not a spring"),
            Self::InvalidTimestep { dt } => {
                write!(f, "timestep must be finite and positive, got {dt}")
            }
        }
    }
}

impl Error for PhysicsError {}
