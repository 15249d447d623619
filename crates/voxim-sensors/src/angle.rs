//! Orientation sensing.

use smallvec::smallvec;
use voxim_core::{Domain, Reading};
use voxim_sensor::{Domains, Sensor, VoxelState};

use std::f64::consts::PI;

/// Senses the voxel's orientation angle, domain `[−π, π]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Angle;

impl Sensor for Angle {
    fn name(&self) -> &str {
        "angle"
    }

    fn domains(&self) -> Domains {
        smallvec![Domain::of(-PI, PI)]
    }

    fn sense(&self, state: &VoxelState, _t: f64) -> Reading {
        smallvec![state.angle]
    }
}
