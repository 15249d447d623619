//! Core types for the voxim soft-robot simulation core.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental value types used throughout the voxim workspace:
//! physics handles, planar geometry, the bottom-origin grid container,
//! sensor reading domains, and the immutable snapshot records.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod domain;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod ids;
pub mod snapshot;

pub use domain::Domain;
pub use error::GridError;
pub use geometry::{Point2, Poly, Vector2};
pub use grid::Grid;
pub use ids::{BodyId, JointId};
pub use snapshot::{Component, CompoundRecord, Reading, SensorRecord, Snapshot, VoxelRecord};
