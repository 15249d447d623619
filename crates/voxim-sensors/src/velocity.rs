//! Linear-velocity sensing along a configurable axis subset.

use smallvec::{smallvec, SmallVec};
use voxim_core::{Domain, Reading, Vector2};
use voxim_sensor::{Domains, Sensor, VoxelState};

use std::f64::consts::FRAC_PI_2;

/// A velocity measurement axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    /// Horizontal component.
    X,
    /// Vertical component.
    Y,
}

/// Senses the voxel's linear velocity.
///
/// With `rotated = false` the reading holds raw world-frame components
/// for each selected axis. With `rotated = true` the velocity is
/// projected onto the voxel's own orientation axes instead: dot
/// products with unit vectors at the voxel angle and at the voxel
/// angle plus 90°. Each channel is clamped to
/// `±max_velocity_norm`.
///
/// Axis order in the reading is always X before Y, regardless of the
/// order passed at construction.
#[derive(Clone, Debug, PartialEq)]
pub struct Velocity {
    rotated: bool,
    max_velocity_norm: f64,
    x: bool,
    y: bool,
}

impl Velocity {
    /// Create a velocity sensor over the given axes.
    pub fn new(rotated: bool, max_velocity_norm: f64, axes: &[Axis]) -> Self {
        Self {
            rotated,
            max_velocity_norm,
            x: axes.contains(&Axis::X),
            y: axes.contains(&Axis::Y),
        }
    }

    fn channel_count(&self) -> usize {
        usize::from(self.x) + usize::from(self.y)
    }

    fn component(&self, velocity: Vector2, angle: f64, axis: Axis) -> f64 {
        match (self.rotated, axis) {
            (false, Axis::X) => velocity.x,
            (false, Axis::Y) => velocity.y,
            (true, Axis::X) => velocity.dot(Vector2::unit_at(angle)),
            (true, Axis::Y) => velocity.dot(Vector2::unit_at(angle + FRAC_PI_2)),
        }
    }
}

impl Sensor for Velocity {
    fn name(&self) -> &str {
        "velocity"
    }

    fn domains(&self) -> Domains {
        smallvec![
            Domain::of(-self.max_velocity_norm, self.max_velocity_norm);
            self.channel_count()
        ]
    }

    fn sense(&self, state: &VoxelState, _t: f64) -> Reading {
        let mut values: Reading = SmallVec::new();
        if self.x {
            values.push(self.component(state.linear_velocity, state.angle, Axis::X));
        }
        if self.y {
            values.push(self.component(state.linear_velocity, state.angle, Axis::Y));
        }
        values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxim_core::Point2;
    use voxim_sensor::clamp_reading;

    fn moving(vx: f64, vy: f64, angle: f64) -> VoxelState {
        VoxelState {
            center: Point2::new(0.0, 0.0),
            angle,
            linear_velocity: Vector2::new(vx, vy),
            area_ratio: 1.0,
            touching_ground: false,
        }
    }

    #[test]
    fn world_frame_x_axis_reads_raw_component() {
        let sensor = Velocity::new(false, 10.0, &[Axis::X]);
        let reading = sensor.sense(&moving(3.0, -4.0, 0.0), 0.0);
        assert_eq!(reading.as_slice(), &[3.0]);
    }

    #[test]
    fn reading_clamps_to_max_norm() {
        let sensor = Velocity::new(false, 2.0, &[Axis::X]);
        let raw = sensor.sense(&moving(3.0, -4.0, 0.0), 0.0);
        let clamped = clamp_reading(raw, &sensor.domains());
        assert_eq!(clamped.as_slice(), &[2.0]);
    }

    #[test]
    fn rotated_projection_uses_voxel_frame() {
        // Voxel rotated 90° CCW: its x axis points along world +y.
        let sensor = Velocity::new(true, 10.0, &[Axis::X, Axis::Y]);
        let reading = sensor.sense(&moving(0.0, 1.0, FRAC_PI_2), 0.0);
        assert!((reading[0] - 1.0).abs() < 1e-12);
        assert!(reading[1].abs() < 1e-12);
    }

    #[test]
    fn axis_order_is_x_then_y() {
        let sensor = Velocity::new(false, 10.0, &[Axis::Y, Axis::X]);
        let reading = sensor.sense(&moving(1.0, 2.0, 0.0), 0.0);
        assert_eq!(reading.as_slice(), &[1.0, 2.0]);
    }

    proptest::proptest! {
        #[test]
        fn rotated_readings_clamp_into_domain(
            vx in -100.0f64..100.0,
            vy in -100.0f64..100.0,
            angle in -3.2f64..3.2,
        ) {
            let sensor = Velocity::new(true, 5.0, &[Axis::X, Axis::Y]);
            let clamped = clamp_reading(sensor.sense(&moving(vx, vy, angle), 0.0), &sensor.domains());
            for (v, d) in clamped.iter().zip(&sensor.domains()) {
                proptest::prop_assert!(d.contains(*v));
            }
        }
    }

    #[test]
    fn domains_match_channel_count() {
        assert_eq!(Velocity::new(false, 1.0, &[Axis::X]).domains().len(), 1);
        assert_eq!(
            Velocity::new(false, 1.0, &[Axis::X, Axis::Y]).domains().len(),
            2
        );
        assert_eq!(Velocity::new(false, 1.0, &[]).domains().len(), 0);
    }
}
