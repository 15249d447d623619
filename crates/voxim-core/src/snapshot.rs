//! Immutable per-step snapshot records.
//!
//! A [`Snapshot`] is a serialization-ready view of one simulation step:
//! every simulated object projected into owned records with no live
//! references back into mutable simulation state. Listeners (metrics,
//! renderers) consume snapshots in increasing time order.

use crate::domain::Domain;
use crate::geometry::Poly;
use smallvec::SmallVec;

/// A sensor reading: one value per declared output channel.
///
/// Readings hold at most a handful of channels, so they live inline.
pub type Reading = SmallVec<[f64; 4]>;

/// Projection of one voxel's shape state.
#[derive(Clone, Debug, PartialEq)]
pub struct VoxelRecord {
    /// The corner polygon (NW, NE, SE, SW).
    pub poly: Poly,
    /// Current polygon area divided by rest area.
    pub area_ratio: f64,
    /// Set when the corners degenerated to a collinear or
    /// reversed-winding configuration despite the contraction limiter.
    /// The step does not fail; the caller decides whether to terminate
    /// the episode early.
    pub degenerate: bool,
    /// The actuation signal applied on the step this record describes,
    /// if any.
    pub applied_signal: Option<f64>,
}

/// Projection of one sensor's reading for one step.
#[derive(Clone, Debug, PartialEq)]
pub struct SensorRecord {
    /// Domain-clamped values, one per channel.
    pub values: Reading,
    /// Declared per-channel domains.
    pub domains: SmallVec<[Domain; 4]>,
    /// Index of this sensor among its voxel's sensors.
    pub sensor_index: usize,
    /// Total number of sensors on the owning voxel.
    pub sensor_count: usize,
}

/// One component of a compound's projection.
#[derive(Clone, Debug, PartialEq)]
pub enum Component {
    /// A voxel shape record.
    Voxel(VoxelRecord),
    /// A sensor reading record, following its voxel's record.
    Reading(SensorRecord),
}

/// Projection of one simulated object (a voxel compound).
///
/// Components are ordered breadth-first: each voxel's record, followed
/// by one reading record per sensor in declaration order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CompoundRecord {
    /// Ordered component records.
    pub components: Vec<Component>,
}

impl CompoundRecord {
    /// Iterate only the voxel shape records.
    pub fn voxels(&self) -> impl Iterator<Item = &VoxelRecord> {
        self.components.iter().filter_map(|c| match c {
            Component::Voxel(v) => Some(v),
            Component::Reading(_) => None,
        })
    }

    /// Iterate only the sensor reading records.
    pub fn readings(&self) -> impl Iterator<Item = &SensorRecord> {
        self.components.iter().filter_map(|c| match c {
            Component::Reading(r) => Some(r),
            Component::Voxel(_) => None,
        })
    }

    /// Whether any voxel in this record is flagged degenerate.
    pub fn any_degenerate(&self) -> bool {
        self.voxels().any(|v| v.degenerate)
    }
}

/// One step's immutable record of all simulated objects.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    /// Simulation time at the end of the step this snapshot describes.
    pub time: f64,
    /// One record per simulated object, in registration order.
    pub objects: Vec<CompoundRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point2;
    use smallvec::smallvec;

    fn voxel_record(degenerate: bool) -> VoxelRecord {
        VoxelRecord {
            poly: Poly::new(vec![
                Point2::new(0.0, 1.0),
                Point2::new(1.0, 1.0),
                Point2::new(1.0, 0.0),
                Point2::new(0.0, 0.0),
            ]),
            area_ratio: 1.0,
            degenerate,
            applied_signal: None,
        }
    }

    #[test]
    fn record_iterators_split_components() {
        let record = CompoundRecord {
            components: vec![
                Component::Voxel(voxel_record(false)),
                Component::Reading(SensorRecord {
                    values: smallvec![0.5],
                    domains: smallvec![Domain::of(0.0, 1.0)],
                    sensor_index: 0,
                    sensor_count: 1,
                }),
            ],
        };
        assert_eq!(record.voxels().count(), 1);
        assert_eq!(record.readings().count(), 1);
        assert!(!record.any_degenerate());
    }

    #[test]
    fn any_degenerate_finds_flagged_voxel() {
        let record = CompoundRecord {
            components: vec![
                Component::Voxel(voxel_record(false)),
                Component::Voxel(voxel_record(true)),
            ],
        };
        assert!(record.any_degenerate());
    }
}
