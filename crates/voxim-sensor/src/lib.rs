//! The sensor capability trait for voxim.
//!
//! A sensor is a stateless mapping from a voxel's physical state (plus
//! time) to a bounded reading vector. Sensors declare their per-channel
//! numeric domains at construction; readings are always clamped into
//! the declared domains before anything downstream sees them.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

use smallvec::SmallVec;
use voxim_core::{Domain, Point2, Reading, SensorRecord, Vector2};

/// Per-channel domains. Sensors expose at most a handful of channels.
pub type Domains = SmallVec<[Domain; 4]>;

/// A voxel's physical state at one instant, as seen by sensors.
///
/// Computed once per step by the owning voxel after the engine has
/// advanced, then handed to every sensor in declaration order. Sensors
/// hold no engine handles and cannot perturb the simulation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VoxelState {
    /// Centroid of the four corner bodies.
    pub center: Point2,
    /// Orientation: mean direction of the top and bottom edges.
    pub angle: f64,
    /// Mean linear velocity of the four corner bodies.
    pub linear_velocity: Vector2,
    /// Current polygon area divided by rest area.
    pub area_ratio: f64,
    /// Whether any corner body is in ground contact.
    pub touching_ground: bool,
}

/// A stateless sensor over voxel physical state.
///
/// # Contract
///
/// - `domains()` is decided entirely by construction parameters, never
///   by runtime state, and its length fixes the reading length.
/// - `sense()` returns exactly `domains().len()` values; the caller
///   clamps each into its domain, so implementations may return raw
///   physical quantities.
/// - `sense()` must be pure: same `(state, t)` yields the same reading.
///
/// # Object safety
///
/// The trait is object-safe; sensing voxels share sensors as
/// `Arc<dyn Sensor>` handles.
pub trait Sensor: Send + Sync {
    /// Human-readable name for error reporting and telemetry.
    fn name(&self) -> &str;

    /// Per-channel output domains.
    fn domains(&self) -> Domains;

    /// Measure the voxel state at time `t`.
    fn sense(&self, state: &VoxelState, t: f64) -> Reading;

    /// Transform the clamped reading record before it enters the
    /// snapshot. The default is the identity; a sensor may expose
    /// derived or alternate values instead of the raw ones.
    fn augment(&self, record: SensorRecord, _state: &VoxelState) -> SensorRecord {
        record
    }
}

/// Clamp a raw reading into the declared domains.
///
/// `raw` and `domains` must be the same length; extra raw values are a
/// sensor programming error and are truncated.
pub fn clamp_reading(raw: Reading, domains: &Domains) -> Reading {
    domains
        .iter()
        .zip(raw)
        .map(|(d, v)| d.clamp(v))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use smallvec::smallvec;

    #[test]
    fn clamp_reading_respects_each_domain() {
        let domains: Domains = smallvec![Domain::of(-1.0, 1.0), Domain::of(0.0, 10.0)];
        let clamped = clamp_reading(smallvec![5.0, -3.0], &domains);
        assert_eq!(clamped.as_slice(), &[1.0, 0.0]);
    }

    #[test]
    fn clamp_reading_truncates_extra_values() {
        let domains: Domains = smallvec![Domain::of(0.0, 1.0)];
        let clamped = clamp_reading(smallvec![0.5, 9.0], &domains);
        assert_eq!(clamped.len(), 1);
    }

    proptest! {
        #[test]
        fn clamped_readings_stay_in_domain(
            raw in proptest::collection::vec(-1e6f64..1e6, 3),
            lo in -10.0f64..0.0,
            hi in 0.0f64..10.0,
        ) {
            let domains: Domains = smallvec![Domain::of(lo, hi); 3];
            let reading: Reading = raw.into_iter().collect();
            let clamped = clamp_reading(reading, &domains);
            for (v, d) in clamped.iter().zip(&domains) {
                prop_assert!(d.contains(*v));
            }
        }
    }
}
