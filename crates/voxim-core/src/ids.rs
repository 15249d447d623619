//! Strongly-typed handles for physics-engine objects.
//!
//! The core never holds references into a physics engine. Bodies and
//! joints are addressed through these opaque ids, which the engine
//! allocates sequentially at registration time. This keeps domain
//! objects engine-agnostic and trivially movable between backends.

use std::fmt;

/// Identifies a body (point mass) registered with a physics engine.
///
/// Ids are allocated sequentially by the engine: `BodyId(n)` is the
/// n-th body added. An id is only meaningful to the engine that
/// issued it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub u32);

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for BodyId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Identifies a joint (spring or weld) registered with a physics engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JointId(pub u32);

impl fmt::Display for JointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for JointId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}
