//! Voxel, compound, and control error types.

use std::error::Error;
use std::fmt;

use voxim_core::{BodyId, GridError};
use voxim_physics::PhysicsError;

/// Errors from validating a [`VoxelSpec`](crate::VoxelSpec).
#[derive(Clone, Debug, PartialEq)]
pub enum SpecError {
    /// A numeric field must be finite and strictly positive.
    NonPositive {
        /// Which field failed.
        field: &'static str,
        /// The offending value.
        value: f64,
    },
    /// `mass_side_length_ratio` must lie in `(0, 1)`.
    MassRatioOutOfRange {
        /// The offending value.
        value: f64,
    },
    /// The area-ratio band must satisfy `0 < min < 1 < max`.
    InvalidAreaBand {
        /// Lower edge of the band.
        min: f64,
        /// Upper edge of the band.
        max: f64,
    },
    /// The scaffolding set selects no springs at all.
    EmptyScaffolding,
    /// An actuation parameter must be finite and non-negative.
    InvalidActuation {
        /// Which parameter failed.
        field: &'static str,
        /// The offending value.
        value: f64,
    },
}

impl fmt::Display for SpecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositive { field, value } => {
                write!(f, "{field} must be finite and positive, got {value}")
            }
            Self::MassRatioOutOfRange { value } => {
                write!(f, "mass_side_length_ratio must be in (0, 1), got {value}")
            }
            Self::InvalidAreaBand { min, max } => {
                write!(f, "area-ratio band must satisfy 0 < min < 1 < max, got [{min}, {max}]")
            }
            Self::EmptyScaffolding => write!(f, "scaffolding set selects no springs"),
            Self::InvalidActuation { field, value } => {
                write!(f, "{field} must be finite and non-negative, got {value}")
            }
        }
    }
}

impl Error for SpecError {}

/// Errors from operating a built voxel against its physics engine.
#[derive(Clone, Debug, PartialEq)]
pub enum VoxelError {
    /// The engine no longer answers queries for one of the voxel's
    /// corner bodies. Indicates the voxel is paired with the wrong
    /// engine instance.
    DetachedBody(BodyId),
    /// A physics mutation was rejected.
    Physics(PhysicsError),
}

impl fmt::Display for VoxelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DetachedBody(id) => {
                write!(f, "corner body {id} is not registered with this engine")
            }
            Self::Physics(_) => write!(f, "physics operation failed"),
        }
    }
}

impl Error for VoxelError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Physics(err) => Some(err),
            Self::DetachedBody(_) => None,
        }
    }
}

impl From<PhysicsError> for VoxelError {
    fn from(err: PhysicsError) -> Self {
        Self::Physics(err)
    }
}

/// Errors from building a [`VoxelCompound`](crate::VoxelCompound).
#[derive(Clone, Debug, PartialEq)]
pub enum CompoundError {
    /// The voxel specification failed validation.
    Spec(SpecError),
    /// The shape grid could not be parsed.
    Grid(GridError),
    /// The shape grid contains no present cells.
    EmptyShape,
    /// A voxel or weld could not be registered with the engine.
    Physics(PhysicsError),
}

impl fmt::Display for CompoundError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spec(_) => write!(f, "invalid voxel specification"),
            Self::Grid(_) => write!(f, "malformed shape grid"),
            Self::EmptyShape => write!(f, "shape grid has no present cells"),
            Self::Physics(_) => write!(f, "engine rejected compound registration"),
        }
    }
}

impl Error for CompoundError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Spec(err) => Some(err),
            Self::Grid(err) => Some(err),
            Self::Physics(err) => Some(err),
            Self::EmptyShape => None,
        }
    }
}

impl From<SpecError> for CompoundError {
    fn from(err: SpecError) -> Self {
        Self::Spec(err)
    }
}

impl From<GridError> for CompoundError {
    fn from(err: GridError) -> Self {
        Self::Grid(err)
    }
}

impl From<PhysicsError> for CompoundError {
    fn from(err: PhysicsError) -> Self {
        Self::Physics(err)
    }
}

/// Errors from applying a control grid to a compound.
#[derive(Clone, Debug, PartialEq)]
pub enum ControlError {
    /// The controller produced a grid of the wrong shape.
    ShapeMismatch {
        /// Compound shape (width, height).
        expected: (usize, usize),
        /// Controller output shape (width, height).
        actual: (usize, usize),
    },
    /// Applying an actuation signal failed.
    Actuation(VoxelError),
}

impl fmt::Display for ControlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShapeMismatch { expected, actual } => write!(
                f,
                "control grid is {}x{}, compound is {}x{}",
                actual.0, actual.1, expected.0, expected.1
            ),
            Self::Actuation(_) => write!(f, "actuation signal rejected"),
        }
    }
}

impl Error for ControlError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Actuation(err) => Some(err),
            Self::ShapeMismatch { .. } => None,
        }
    }
}

impl From<VoxelError> for ControlError {
    fn from(err: VoxelError) -> Self {
        Self::Actuation(err)
    }
}
