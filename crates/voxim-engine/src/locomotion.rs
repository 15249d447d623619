//! The locomotion evaluation task.

use crate::error::EpisodeError;
use crate::listener::SnapshotListener;
use crate::step::{advance_world, Robot};
use voxim_core::{Point2, Vector2};
use voxim_physics::{SoftWorld, SoftWorldConfig};
use voxim_voxel::{CompoundDescription, CompoundError, Controller};

use std::sync::Arc;

/// Runs one robot on flat ground for a fixed duration and measures how
/// far it travelled.
///
/// The task owns the end condition; [`advance_world`] stays a pure
/// single-tick primitive. Episodes are fully deterministic: the same
/// description, controller, and task settings produce bit-identical
/// snapshot sequences.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Locomotion {
    /// Episode length in simulated seconds.
    pub duration: f64,
    /// Fixed timestep (s).
    pub dt: f64,
    /// World gravity.
    pub gravity: Vector2,
    /// Height of the flat ground.
    pub ground_y: f64,
}

impl Default for Locomotion {
    fn default() -> Self {
        Self {
            duration: 30.0,
            dt: 1.0 / 60.0,
            gravity: Vector2::new(0.0, -9.81),
            ground_y: 0.0,
        }
    }
}

/// What one locomotion episode produced.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Outcome {
    /// Signed x displacement of the compound center.
    pub travelled_x: f64,
    /// Compound center at episode start.
    pub start_center: Point2,
    /// Compound center at episode end.
    pub final_center: Point2,
    /// Ticks executed.
    pub steps: usize,
    /// Ticks on which at least one voxel was flagged degenerate.
    pub degenerate_steps: usize,
    /// Simulated time at episode end.
    pub elapsed: f64,
}

impl Locomotion {
    /// Checks the task parameters.
    pub fn validate(&self) -> Result<(), EpisodeError> {
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(EpisodeError::InvalidTask { field: "dt", value: self.dt });
        }
        if !self.duration.is_finite() || self.duration < 0.0 {
            return Err(EpisodeError::InvalidTask { field: "duration", value: self.duration });
        }
        if !self.ground_y.is_finite() {
            return Err(EpisodeError::InvalidTask { field: "ground_y", value: self.ground_y });
        }
        Ok(())
    }

    /// Builds a fresh world and compound, steps until `t ≥ duration`,
    /// and reports the outcome.
    pub fn run(
        &self,
        description: &CompoundDescription,
        controller: Arc<dyn Controller>,
        mut listener: Option<&mut dyn SnapshotListener>,
    ) -> Result<Outcome, EpisodeError> {
        self.validate()?;
        let mut engine = SoftWorld::new(SoftWorldConfig {
            gravity: self.gravity,
            ground_y: self.ground_y,
            ..SoftWorldConfig::default()
        });
        let mut compound = description.build(&mut engine)?;
        // Prime readings so the first snapshot reflects t = 0 state.
        compound.act(0.0, &mut engine)?;
        let start_center = compound
            .center(&engine)?
            .ok_or(EpisodeError::Compound(CompoundError::EmptyShape))?;

        let mut robots = [Robot { compound, controller }];
        let mut t = 0.0;
        let mut steps = 0usize;
        let mut degenerate_steps = 0usize;
        while t < self.duration {
            t = advance_world(t, self.dt, &mut engine, &mut robots, listener.as_deref_mut())?;
            steps += 1;
            if robots[0].compound.any_degenerate() {
                degenerate_steps += 1;
            }
        }

        let final_center = robots[0]
            .compound
            .center(&engine)?
            .ok_or(EpisodeError::Compound(CompoundError::EmptyShape))?;
        Ok(Outcome {
            travelled_x: final_center.x - start_center.x,
            start_center,
            final_center,
            steps,
            degenerate_steps,
            elapsed: t,
        })
    }
}
