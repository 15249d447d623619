//! Voxim: deterministic 2D voxel soft-body robot simulation.
//!
//! This is the top-level facade crate that re-exports the public API
//! from all Voxim sub-crates. For most users, adding `voxim` as a
//! single dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use voxim::prelude::*;
//! use std::sync::Arc;
//!
//! // A 3-voxel worm hovering just above the ground, sensing area
//! // ratio and ground contact.
//! let mut description = CompoundDescription::from_rows("XXX").unwrap();
//! description.origin = Point2::new(0.0, 1.0);
//! description.sensors = vec![Arc::new(AreaRatio), Arc::new(Touch)];
//!
//! // Drive it with a travelling sine wave for half a second.
//! let controller = Arc::new(PhaseSineController::travelling(3, 1, 1.0, 1.0, 0.6));
//! let task = Locomotion { duration: 0.5, ..Locomotion::default() };
//! let outcome = task.run(&description, controller, None).unwrap();
//! assert!(outcome.steps > 0);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in
//! the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `voxim-core` | Geometry, grids, domains, snapshot records |
//! | [`physics`] | `voxim-physics` | The `PhysicsEngine` boundary and `SoftWorld` backend |
//! | [`sensor`] | `voxim-sensor` | The `Sensor` trait and the sensed voxel state |
//! | [`sensors`] | `voxim-sensors` | Concrete sensors (velocity, area ratio, touch, angle) |
//! | [`voxel`] | `voxim-voxel` | Voxels, compounds, and controllers |
//! | [`engine`] | `voxim-engine` | Episode stepping, snapshot delivery, parallel runner |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Geometry, grids, domains, and snapshot records (`voxim-core`).
pub use voxim_core as types;

/// The physics boundary and reference backend (`voxim-physics`).
///
/// The [`physics::PhysicsEngine`] trait is the seam for alternative
/// backends; [`physics::SoftWorld`] is the deterministic reference.
pub use voxim_physics as physics;

/// The sensing seam (`voxim-sensor`).
///
/// The [`sensor::Sensor`] trait plus the [`sensor::VoxelState`] value
/// it observes.
pub use voxim_sensor as sensor;

/// Concrete sensor implementations (`voxim-sensors`).
pub use voxim_sensors as sensors;

/// Voxels, compound assembly, and controllers (`voxim-voxel`).
///
/// [`voxel::CompoundDescription`] is the usual entry point: describe a
/// shape, equip sensors, and build into an engine.
pub use voxim_voxel as voxel;

/// Episode execution (`voxim-engine`).
///
/// [`engine::Locomotion`] runs single episodes;
/// [`engine::EpisodeRunner`] evaluates batches in parallel.
pub use voxim_engine as engine;

/// Common imports for typical Voxim usage.
///
/// ```rust
/// use voxim::prelude::*;
/// ```
pub mod prelude {
    // Geometry and records
    pub use voxim_core::{
        CompoundRecord, Domain, Grid, Point2, Poly, Reading, Snapshot, Vector2,
    };

    // Physics boundary
    pub use voxim_physics::{PhysicsEngine, SoftWorld, SoftWorldConfig};

    // Sensing
    pub use voxim_sensor::{Sensor, VoxelState};
    pub use voxim_sensors::{Angle, AreaRatio, Touch, Velocity};

    // Voxels and control
    pub use voxim_voxel::{
        Actuation, CompoundDescription, Controller, PhaseSineController, RandomController,
        ScaffoldingSet, SensingVoxel, TimeFunctionController, VoxelCompound, VoxelSpec,
    };

    // Episodes
    pub use voxim_engine::{
        advance_world, BatchOutcome, EpisodeJob, EpisodeRunner, Locomotion, Outcome,
        SnapshotListener, SnapshotLog,
    };

    // Errors
    pub use voxim_core::GridError;
    pub use voxim_engine::EpisodeError;
    pub use voxim_physics::PhysicsError;
    pub use voxim_voxel::{CompoundError, ControlError, SpecError, VoxelError};
}
