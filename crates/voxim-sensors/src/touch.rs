//! Ground-contact sensing.

use smallvec::smallvec;
use voxim_core::{Domain, Reading};
use voxim_sensor::{Domains, Sensor, VoxelState};

/// Senses ground contact: 1.0 if any corner body touched the ground
/// during the last step, else 0.0. Domain `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Touch;

impl Sensor for Touch {
    fn name(&self) -> &str {
        "touch"
    }

    fn domains(&self) -> Domains {
        smallvec![Domain::of(0.0, 1.0)]
    }

    fn sense(&self, state: &VoxelState, _t: f64) -> Reading {
        smallvec![if state.touching_ground { 1.0 } else { 0.0 }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxim_core::{Point2, Vector2};

    fn state(touching_ground: bool) -> VoxelState {
        VoxelState {
            center: Point2::new(0.0, 0.0),
            angle: 0.0,
            linear_velocity: Vector2::zero(),
            area_ratio: 1.0,
            touching_ground,
        }
    }

    #[test]
    fn touch_is_binary() {
        assert_eq!(Touch.sense(&state(true), 0.0).as_slice(), &[1.0]);
        assert_eq!(Touch.sense(&state(false), 0.0).as_slice(), &[0.0]);
    }
}
