//! Shared fixtures for cross-crate tests: canned robot designs and
//! deliberately simple (or deliberately broken) controllers.

#![deny(missing_docs)]
#![forbid(unsafe_code)]

use std::sync::Arc;

use voxim_core::{Grid, Point2};
use voxim_sensors::{AreaRatio, Touch};
use voxim_voxel::{CompoundDescription, Controller, SensingVoxel};

/// A horizontal worm of `length` voxels, hovering just above the
/// ground, with area-ratio and touch sensors on every voxel.
pub fn worm_description(length: usize) -> CompoundDescription {
    let mut description = CompoundDescription::new(Grid::filled(length.max(1), 1, true));
    description.origin = Point2::new(0.0, 1.0);
    description.sensors = vec![Arc::new(AreaRatio), Arc::new(Touch)];
    description
}

/// A `side` × `side` block of voxels, hovering just above the ground,
/// without sensors.
pub fn block_description(side: usize) -> CompoundDescription {
    let side = side.max(1);
    let mut description = CompoundDescription::new(Grid::filled(side, side, true));
    description.origin = Point2::new(0.0, 1.0);
    description
}

/// Emits the same signal for every voxel on every step.
#[derive(Clone, Copy, Debug)]
pub struct ConstController {
    signal: f64,
}

impl ConstController {
    /// A controller that always emits `signal`.
    pub fn new(signal: f64) -> Self {
        Self { signal }
    }
}

impl Controller for ConstController {
    fn name(&self) -> &str {
        "const"
    }

    fn control(&self, _t: f64, _dt: f64, voxels: &Grid<Option<SensingVoxel>>) -> Grid<Option<f64>> {
        voxels.map(|_, _, v| v.as_ref().map(|_| self.signal))
    }
}

/// Always answers with a 1×1 grid, whatever the compound's shape.
/// Exists to exercise the shape-mismatch failure path.
#[derive(Clone, Copy, Debug)]
pub struct WrongShapeController;

impl Controller for WrongShapeController {
    fn name(&self) -> &str {
        "wrong_shape"
    }

    fn control(
        &self,
        _t: f64,
        _dt: f64,
        _voxels: &Grid<Option<SensingVoxel>>,
    ) -> Grid<Option<f64>> {
        Grid::filled(1, 1, Some(0.0))
    }
}
