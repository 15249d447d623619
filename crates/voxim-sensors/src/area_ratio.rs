//! Area-ratio sensing.

use smallvec::smallvec;
use voxim_core::{Domain, Reading, SensorRecord};
use voxim_sensor::{Domains, Sensor, VoxelState};

/// Senses the voxel's area ratio (current polygon area ÷ rest area).
///
/// The raw domain is `[0, 2]`: symmetric around the rest ratio 1 and
/// wide enough that the contraction-limiter band sits strictly inside
/// it. The snapshot record is augmented to the signed deviation from
/// rest (`ratio − 1`, domain `[−1, 1]`), which is the quantity
/// feedback controllers actually consume.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AreaRatio;

impl Sensor for AreaRatio {
    fn name(&self) -> &str {
        "area_ratio"
    }

    fn domains(&self) -> Domains {
        smallvec![Domain::of(0.0, 2.0)]
    }

    fn sense(&self, state: &VoxelState, _t: f64) -> Reading {
        smallvec![state.area_ratio]
    }

    fn augment(&self, record: SensorRecord, _state: &VoxelState) -> SensorRecord {
        let deviation = Domain::of(-1.0, 1.0);
        SensorRecord {
            values: record.values.iter().map(|v| deviation.clamp(v - 1.0)).collect(),
            domains: smallvec![deviation],
            ..record
        }
    }
}
