//! Episode-level error type.

use std::error::Error;
use std::fmt;

use voxim_physics::PhysicsError;
use voxim_voxel::{CompoundError, ControlError, VoxelError};

/// Why an episode could not be run to completion.
#[derive(Clone, Debug, PartialEq)]
pub enum EpisodeError {
    /// A task parameter failed validation.
    InvalidTask {
        /// Which parameter failed.
        field: &'static str,
        /// The offending value.
        value: f64,
    },
    /// The compound could not be built into the engine.
    Compound(CompoundError),
    /// The controller misbehaved mid-episode.
    Control(ControlError),
    /// A voxel operation failed mid-episode.
    Voxel(VoxelError),
    /// The physics engine rejected a step.
    Physics(PhysicsError),
}

impl fmt::Display for EpisodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTask { field, value } => {
                write!(f, "task parameter {field} is invalid: {value}")
            }
            Self::Compound(_) => write!(f, "compound construction failed"),
            Self::Control(_) => write!(f, "controller failed mid-episode"),
            Self::Voxel(_) => write!(f, "voxel operation failed mid-episode"),
            Self::Physics(_) => write!(f, "physics step failed"),
        }
    }
}

impl Error for EpisodeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidTask { .. } => None,
            Self::Compound(err) => Some(err),
            Self::Control(err) => Some(err),
            Self::Voxel(err) => Some(err),
            Self::Physics(err) => Some(err),
        }
    }
}

impl From<CompoundError> for EpisodeError {
    fn from(err: CompoundError) -> Self {
        Self::Compound(err)
    }
}

impl From<ControlError> for EpisodeError {
    fn from(err: ControlError) -> Self {
        Self::Control(err)
    }
}

impl From<VoxelError> for EpisodeError {
    fn from(err: VoxelError) -> Self {
        Self::Voxel(err)
    }
}

impl From<PhysicsError> for EpisodeError {
    fn from(err: PhysicsError) -> Self {
        Self::Physics(err)
    }
}
