//! The deformable voxel model and its grid assembly.
//!
//! A [`Voxel`] is the smallest simulated unit: four corner point masses
//! joined by a spring scaffolding inside a physics engine. A
//! [`SensingVoxel`] adds an ordered sensor list; a [`VoxelCompound`]
//! welds a rectangular grid of voxels into one body and drives it
//! through a [`Controller`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod compound;
pub mod control;
pub mod error;
pub mod sensing;
pub mod spec;
pub mod voxel;

pub use compound::{CompoundDescription, VoxelCompound};
pub use control::{Controller, PhaseSineController, RandomController, TimeFunctionController};
pub use error::{CompoundError, ControlError, SpecError, VoxelError};
pub use sensing::SensingVoxel;
pub use spec::{Actuation, Scaffolding, ScaffoldingSet, VoxelSpec};
pub use voxel::Voxel;
