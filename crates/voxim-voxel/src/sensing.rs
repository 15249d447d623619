//! A voxel paired with an ordered list of sensors.

use crate::error::VoxelError;
use crate::voxel::Voxel;
use voxim_core::{Component, Reading};
use voxim_physics::PhysicsEngine;
use voxim_sensor::{clamp_reading, Sensor, VoxelState};

use smallvec::smallvec;
use std::sync::Arc;

/// A [`Voxel`] that carries sensors and caches their readings.
///
/// Sensors are stateless and shared (`Arc`), so one sensor list can
/// equip every voxel of a compound. Readings are refreshed as one unit
/// in [`act`](SensingVoxel::act): a snapshot taken between steps never
/// mixes readings from different steps.
pub struct SensingVoxel {
    voxel: Voxel,
    sensors: Vec<Arc<dyn Sensor>>,
    readings: Vec<Reading>,
    last_state: VoxelState,
}

impl SensingVoxel {
    /// Wraps a built voxel with `sensors`, priming every reading to
    /// zeros of the sensor's arity.
    pub fn new(
        voxel: Voxel,
        sensors: Vec<Arc<dyn Sensor>>,
        engine: &dyn PhysicsEngine,
    ) -> Result<Self, VoxelError> {
        let readings = sensors
            .iter()
            .map(|sensor| smallvec![0.0; sensor.domains().len()])
            .collect();
        let last_state = voxel.state(engine)?;
        Ok(Self { voxel, sensors, readings, last_state })
    }

    /// The wrapped voxel.
    pub fn voxel(&self) -> &Voxel {
        &self.voxel
    }

    /// The wrapped voxel, mutably.
    pub fn voxel_mut(&mut self) -> &mut Voxel {
        &mut self.voxel
    }

    /// Number of attached sensors.
    pub fn sensor_count(&self) -> usize {
        self.sensors.len()
    }

    /// The most recent clamped readings, one per sensor, in sensor
    /// order.
    pub fn readings(&self) -> &[Reading] {
        &self.readings
    }

    /// Per-step housekeeping plus sensing: runs the voxel's own act,
    /// then senses the fresh state and replaces the reading set
    /// wholesale.
    pub fn act(&mut self, t: f64, engine: &mut dyn PhysicsEngine) -> Result<(), VoxelError> {
        self.voxel.act(engine)?;
        let state = self.voxel.state(engine)?;
        let readings = self
            .sensors
            .iter()
            .map(|sensor| clamp_reading(sensor.sense(&state, t), &sensor.domains()))
            .collect();
        self.readings = readings;
        self.last_state = state;
        Ok(())
    }

    /// Projects the voxel and its readings into snapshot components:
    /// the voxel record first, then one sensor record per sensor.
    pub fn components(&self, engine: &dyn PhysicsEngine) -> Result<Vec<Component>, VoxelError> {
        let mut components = Vec::with_capacity(1 + self.sensors.len());
        components.push(Component::Voxel(self.voxel.immutable(engine)?));
        let sensor_count = self.sensors.len();
        for (sensor_index, (sensor, values)) in
            self.sensors.iter().zip(&self.readings).enumerate()
        {
            let record = voxim_core::SensorRecord {
                values: values.clone(),
                domains: sensor.domains(),
                sensor_index,
                sensor_count,
            };
            components.push(Component::Reading(sensor.augment(record, &self.last_state)));
        }
        Ok(components)
    }
}

impl std::fmt::Debug for SensingVoxel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SensingVoxel")
            .field("voxel", &self.voxel)
            .field("sensors", &self.sensors.iter().map(|s| s.name().to_owned()).collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}
