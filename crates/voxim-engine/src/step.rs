//! The single-step advancement primitive.

use crate::error::EpisodeError;
use crate::listener::SnapshotListener;
use voxim_core::Snapshot;
use voxim_physics::PhysicsEngine;
use voxim_voxel::{Controller, VoxelCompound};

use std::sync::Arc;

/// A compound paired with the controller that drives it.
pub struct Robot {
    /// The simulated body.
    pub compound: VoxelCompound,
    /// Its control strategy, shared across episodes.
    pub controller: Arc<dyn Controller>,
}

/// Advances the world one fixed tick of `dt` seconds and returns the
/// new simulated time.
///
/// Order per tick: the physics step consumes the previous tick's
/// signals, then each robot is controlled and acted for the new time,
/// then (if a listener is given) one snapshot of every robot is
/// assembled and delivered synchronously.
pub fn advance_world(
    t: f64,
    dt: f64,
    engine: &mut dyn PhysicsEngine,
    robots: &mut [Robot],
    listener: Option<&mut (dyn SnapshotListener + '_)>,
) -> Result<f64, EpisodeError> {
    engine.step(dt)?;
    let new_t = t + dt;
    for robot in robots.iter_mut() {
        robot.compound.control(new_t, dt, robot.controller.as_ref(), engine)?;
        robot.compound.act(new_t, engine)?;
    }
    if let Some(listener) = listener {
        let mut objects = Vec::with_capacity(robots.len());
        for robot in robots.iter() {
            objects.push(robot.compound.immutable(engine)?);
        }
        listener.on_snapshot(&Snapshot { time: new_t, objects });
    }
    Ok(new_t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listener::SnapshotLog;
    use voxim_core::Point2;
    use voxim_physics::{SoftWorld, SoftWorldConfig};
    use voxim_test_utils::{worm_description, ConstController};

    #[test]
    fn advance_delivers_one_snapshot_per_tick() {
        let mut engine = SoftWorld::new(SoftWorldConfig::default());
        let mut description = worm_description(3);
        description.origin = Point2::new(0.0, 1.0);
        let compound = description.build(&mut engine).unwrap();
        let mut robots = vec![Robot {
            compound,
            controller: Arc::new(ConstController::new(0.0)),
        }];

        let mut log = SnapshotLog::new();
        let mut t = 0.0;
        for _ in 0..5 {
            t = advance_world(t, 0.01, &mut engine, &mut robots, Some(&mut log)).unwrap();
        }

        assert!((t - 0.05).abs() < 1e-12);
        assert_eq!(log.snapshots().len(), 5);
        let times: Vec<f64> = log.snapshots().iter().map(|s| s.time).collect();
        assert!(times.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(log.snapshots()[0].objects.len(), 1);
    }

    #[test]
    fn invalid_dt_is_surfaced() {
        let mut engine = SoftWorld::new(SoftWorldConfig::default());
        let result = advance_world(0.0, -1.0, &mut engine, &mut [], None);
        assert!(matches!(result, Err(EpisodeError::Physics(_))));
    }
}
