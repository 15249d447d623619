//! Physics-engine boundary and reference backend for voxim.
//!
//! The simulation core never talks to a concrete physics library.
//! Voxels register bodies and joints through the object-safe
//! [`PhysicsEngine`] trait and address them with the opaque handles
//! from `voxim-core`. [`SoftWorld`] is the deterministic reference
//! backend: point masses under gravity, frequency/damping-ratio
//! spring-dampers, iterative weld relaxation, and a flat ground plane
//! with friction and restitution.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod engine;
pub mod error;
pub mod soft;

pub use engine::{BodyDef, JointDef, PhysicsEngine};
pub use error::PhysicsError;
pub use soft::{SoftWorld, SoftWorldConfig};
