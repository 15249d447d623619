//! Welding a grid of voxels into one compound body.

use crate::control::Controller;
use crate::error::{CompoundError, ControlError, VoxelError};
use crate::sensing::SensingVoxel;
use crate::spec::VoxelSpec;
use crate::voxel::Voxel;
use voxim_core::{CompoundRecord, Grid, JointId, Point2, Vector2};
use voxim_physics::{JointDef, PhysicsEngine, PhysicsError};
use voxim_sensor::Sensor;

use std::fmt;
use std::sync::Arc;

/// Everything needed to build a [`VoxelCompound`] into an engine.
///
/// Descriptions are cheap to clone (sensors are shared handles) and
/// engine-free, so one description can spawn identical fresh compounds
/// across any number of episodes.
pub struct CompoundDescription {
    /// World position of the shape's bottom-left grid cell.
    pub origin: Point2,
    /// Which grid cells hold a voxel.
    pub shape: Grid<bool>,
    /// Parameters shared by every voxel of the compound.
    pub spec: VoxelSpec,
    /// Sensors attached to every voxel, in reading order.
    pub sensors: Vec<Arc<dyn Sensor>>,
}

impl CompoundDescription {
    /// A description with the given shape at the world origin, default
    /// spec, and no sensors.
    pub fn new(shape: Grid<bool>) -> Self {
        Self {
            origin: Point2::new(0.0, 0.0),
            shape,
            spec: VoxelSpec::default(),
            sensors: Vec::new(),
        }
    }

    /// Parses the shape from comma-separated rows (see
    /// [`Grid::from_rows`]).
    pub fn from_rows(rows: &str) -> Result<Self, CompoundError> {
        Ok(Self::new(Grid::from_rows(rows)?))
    }

    /// Checks the spec and shape without touching an engine.
    pub fn validate(&self) -> Result<(), CompoundError> {
        self.spec.validate()?;
        if self.shape.present_count() == 0 {
            return Err(CompoundError::EmptyShape);
        }
        Ok(())
    }

    /// Builds a fresh compound into `engine`.
    pub fn build(&self, engine: &mut dyn PhysicsEngine) -> Result<VoxelCompound, CompoundError> {
        self.validate()?;
        let side = self.spec.side_length;
        let mut voxels: Grid<Option<SensingVoxel>> =
            Grid::create_with(self.shape.width(), self.shape.height(), |_, _| None);
        let mut welds = Vec::new();
        for (x, y, present) in self.shape.entries() {
            if !*present {
                continue;
            }
            let voxel = Voxel::build(
                self.spec,
                self.origin.x + x as f64 * side,
                self.origin.y + y as f64 * side,
                engine,
            )
            .map_err(weld_error)?;
            let corners = voxel.corners();
            // Canonical order guarantees left and below neighbours are
            // already built. Each shared edge gets two welds, one per
            // shared corner pair.
            if x > 0 {
                if let Some(Some(left)) = voxels.get(x - 1, y) {
                    let other = left.voxel().corners();
                    welds.push(engine.add_joint(JointDef::Weld { a: corners[0], b: other[1] })?);
                    welds.push(engine.add_joint(JointDef::Weld { a: corners[3], b: other[2] })?);
                }
            }
            if y > 0 {
                if let Some(Some(below)) = voxels.get(x, y - 1) {
                    let other = below.voxel().corners();
                    welds.push(engine.add_joint(JointDef::Weld { a: corners[3], b: other[0] })?);
                    welds.push(engine.add_joint(JointDef::Weld { a: corners[2], b: other[1] })?);
                }
            }
            let sensing = SensingVoxel::new(voxel, self.sensors.clone(), engine)
                .map_err(weld_error)?;
            voxels.set(x, y, Some(sensing));
        }
        Ok(VoxelCompound { voxels, welds })
    }
}

impl Clone for CompoundDescription {
    fn clone(&self) -> Self {
        Self {
            origin: self.origin,
            shape: self.shape.clone(),
            spec: self.spec,
            sensors: self.sensors.clone(),
        }
    }
}

impl fmt::Debug for CompoundDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompoundDescription")
            .field("origin", &self.origin)
            .field("shape", &format_args!("{}x{}", self.shape.width(), self.shape.height()))
            .field("voxels", &self.shape.present_count())
            .field("sensors", &self.sensors.iter().map(|s| s.name().to_owned()).collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

fn weld_error(err: VoxelError) -> CompoundError {
    match err {
        VoxelError::Physics(err) => CompoundError::Physics(err),
        VoxelError::DetachedBody(id) => CompoundError::Physics(PhysicsError::UnknownBody(id)),
    }
}

/// A grid of sensing voxels welded into one body.
#[derive(Debug)]
pub struct VoxelCompound {
    voxels: Grid<Option<SensingVoxel>>,
    welds: Vec<JointId>,
}

impl VoxelCompound {
    /// The voxel grid. Cells are `None` where the shape is absent.
    pub fn voxels(&self) -> &Grid<Option<SensingVoxel>> {
        &self.voxels
    }

    /// Number of voxels in the compound.
    pub fn voxel_count(&self) -> usize {
        self.voxels.values().filter(|v| v.is_some()).count()
    }

    /// Number of weld joints binding adjacent voxels.
    pub fn weld_count(&self) -> usize {
        self.welds.len()
    }

    /// Per-step housekeeping and sensing for every voxel.
    pub fn act(&mut self, t: f64, engine: &mut dyn PhysicsEngine) -> Result<(), VoxelError> {
        for (_, _, cell) in self.voxels.entries_mut() {
            if let Some(voxel) = cell.as_mut() {
                voxel.act(t, engine)?;
            }
        }
        Ok(())
    }

    /// Asks `controller` for this step's signals and applies them.
    ///
    /// Signals for absent cells, and `None` cells of the control grid,
    /// are skipped.
    pub fn control(
        &mut self,
        t: f64,
        dt: f64,
        controller: &dyn Controller,
        engine: &mut dyn PhysicsEngine,
    ) -> Result<(), ControlError> {
        let signals = controller.control(t, dt, &self.voxels);
        if !signals.same_shape(&self.voxels) {
            return Err(ControlError::ShapeMismatch {
                expected: (self.voxels.width(), self.voxels.height()),
                actual: (signals.width(), signals.height()),
            });
        }
        for (x, y, cell) in self.voxels.entries_mut() {
            if let (Some(voxel), Some(Some(signal))) = (cell.as_mut(), signals.get(x, y)) {
                voxel.voxel_mut().apply_actuation(*signal, engine)?;
            }
        }
        Ok(())
    }

    /// Mean of the voxel centers, or `None` for an empty compound.
    pub fn center(&self, engine: &dyn PhysicsEngine) -> Result<Option<Point2>, VoxelError> {
        let mut sum = Vector2::zero();
        let mut count = 0usize;
        for cell in self.voxels.values() {
            if let Some(voxel) = cell {
                let center = voxel.voxel().center(engine)?;
                sum = sum + (center - Point2::new(0.0, 0.0));
                count += 1;
            }
        }
        if count == 0 {
            return Ok(None);
        }
        let mean = sum * (1.0 / count as f64);
        Ok(Some(Point2::new(mean.x, mean.y)))
    }

    /// Whether any voxel has latched the degenerate flag.
    pub fn any_degenerate(&self) -> bool {
        self.voxels
            .values()
            .flatten()
            .any(|voxel| voxel.voxel().degenerate())
    }

    /// Projects the whole compound into a snapshot record, voxels in
    /// canonical grid order.
    pub fn immutable(&self, engine: &dyn PhysicsEngine) -> Result<CompoundRecord, VoxelError> {
        let mut components = Vec::new();
        for cell in self.voxels.values() {
            if let Some(voxel) = cell {
                components.extend(voxel.components(engine)?);
            }
        }
        Ok(CompoundRecord { components })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxim_physics::{SoftWorld, SoftWorldConfig};

    fn world() -> SoftWorld {
        SoftWorld::new(SoftWorldConfig {
            gravity: Vector2::zero(),
            ..SoftWorldConfig::default()
        })
    }

    fn build(rows: &str) -> (SoftWorld, VoxelCompound) {
        let mut engine = world();
        let mut description = CompoundDescription::from_rows(rows).unwrap();
        description.origin = Point2::new(0.0, 10.0);
        let compound = description.build(&mut engine).unwrap();
        (engine, compound)
    }

    #[test]
    fn worm_weld_count() {
        // 4 voxels in a row: 3 shared edges, 2 welds each.
        let (engine, compound) = build("XXXX");
        assert_eq!(compound.voxel_count(), 4);
        assert_eq!(compound.weld_count(), 6);
        assert_eq!(engine.body_count(), 16);
    }

    #[test]
    fn square_weld_count() {
        // 2x2 block: 4 shared edges.
        let (_, compound) = build("XX,XX");
        assert_eq!(compound.weld_count(), 8);
    }

    #[test]
    fn diagonal_cells_are_not_welded() {
        let (_, compound) = build("X , X");
        assert_eq!(compound.voxel_count(), 2);
        assert_eq!(compound.weld_count(), 0);
    }

    #[test]
    fn empty_shape_is_rejected() {
        let mut engine = world();
        let description = CompoundDescription::new(Grid::filled(3, 2, false));
        assert!(matches!(
            description.build(&mut engine),
            Err(CompoundError::EmptyShape)
        ));
    }

    #[test]
    fn description_rebuilds_identically() {
        let description = CompoundDescription::from_rows("XX,X ").unwrap();
        let mut first = world();
        let mut second = world();
        let a = description.build(&mut first).unwrap();
        let b = description.clone().build(&mut second).unwrap();
        assert_eq!(a.voxel_count(), b.voxel_count());
        assert_eq!(a.weld_count(), b.weld_count());
        assert_eq!(first.body_count(), second.body_count());
        assert_eq!(first.joint_count(), second.joint_count());
    }

    #[test]
    fn center_averages_voxel_centers() {
        let (engine, compound) = build("XX");
        let center = compound.center(&engine).unwrap().unwrap();
        // Two default voxels side by side starting at (0, 10).
        assert!((center.x - 3.0).abs() < 1e-9);
        assert!((center.y - 11.5).abs() < 1e-9);
    }

    #[test]
    fn shape_mismatch_is_reported() {
        struct WrongShape;
        impl Controller for WrongShape {
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
        let (mut engine, mut compound) = build("XXX");
        let err = compound.control(0.0, 0.1, &WrongShape, &mut engine).unwrap_err();
        assert_eq!(
            err,
            ControlError::ShapeMismatch { expected: (3, 1), actual: (1, 1) }
        );
    }
}
