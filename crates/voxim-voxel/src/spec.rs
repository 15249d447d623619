//! Voxel material and actuation parameters.

use crate::error::SpecError;

/// How an actuation signal in `[−1, 1]` deforms a voxel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Actuation {
    /// Push each corner along its ray from the voxel center with a
    /// force proportional to the signal. Positive signals contract.
    Force {
        /// Force magnitude (N) applied per corner at full signal.
        max_force: f64,
    },
    /// Retarget spring rest lengths toward an area scaled by the
    /// signal, ramping the applied delta by at most
    /// `max_delta_per_step` per control step. Positive signals
    /// contract.
    RestArea {
        /// Largest change of the area delta applied in one step.
        max_delta_per_step: f64,
    },
}

/// One family of springs in the voxel scaffolding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scaffolding {
    /// The four perimeter springs along the square's edges.
    Edges,
    /// The two diagonal springs. Besides stiffening the voxel they are
    /// what resists shear, so a set without them will collapse under
    /// lateral load.
    Crosses,
}

/// The set of scaffolding families a voxel is built with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScaffoldingSet {
    edges: bool,
    crosses: bool,
}

impl ScaffoldingSet {
    /// Every family: four edges plus both diagonals.
    pub const fn full() -> Self {
        Self { edges: true, crosses: true }
    }

    /// Perimeter springs only.
    pub const fn edges_only() -> Self {
        Self { edges: true, crosses: false }
    }

    /// Diagonal springs only.
    pub const fn crosses_only() -> Self {
        Self { edges: false, crosses: true }
    }

    /// Whether the set includes the given family.
    pub fn contains(&self, scaffolding: Scaffolding) -> bool {
        match scaffolding {
            Scaffolding::Edges => self.edges,
            Scaffolding::Crosses => self.crosses,
        }
    }

    /// Whether the set selects no springs at all.
    pub fn is_empty(&self) -> bool {
        !self.edges && !self.crosses
    }
}

impl Default for ScaffoldingSet {
    fn default() -> Self {
        Self::full()
    }
}

/// Material, geometry, and actuation parameters of one voxel.
///
/// The defaults describe a 3 m soft voxel that holds its shape under
/// gravity yet deforms visibly under full actuation. [`validate`] is
/// called once at compound construction so per-step code can assume
/// every field is sane.
///
/// [`validate`]: VoxelSpec::validate
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VoxelSpec {
    /// Side length of the square at rest (m).
    pub side_length: f64,
    /// Total voxel mass (kg), split evenly across the four corners.
    pub mass: f64,
    /// Corner body diameter as a fraction of the side length, in `(0, 1)`.
    pub mass_side_length_ratio: f64,
    /// Spring oscillation frequency (Hz); higher is stiffer.
    pub spring_frequency_hz: f64,
    /// Spring damping ratio (1.0 = critically damped).
    pub spring_damping_ratio: f64,
    /// Linear velocity damping of the corner bodies.
    pub linear_damping: f64,
    /// Ground friction coefficient of the corner bodies.
    pub friction: f64,
    /// Ground restitution of the corner bodies, in `[0, 1]`.
    pub restitution: f64,
    /// Whether corner bodies collide with bodies of other voxels.
    pub mass_collision: bool,
    /// Whether the passive contraction limiter is active.
    pub limit_contraction: bool,
    /// Lower edge of the allowed area-ratio band.
    pub min_area_ratio: f64,
    /// Upper edge of the allowed area-ratio band.
    pub max_area_ratio: f64,
    /// Which spring families the voxel is built with.
    pub scaffoldings: ScaffoldingSet,
    /// How actuation signals deform the voxel.
    pub actuation: Actuation,
}

impl Default for VoxelSpec {
    fn default() -> Self {
        Self {
            side_length: 3.0,
            mass: 1.0,
            mass_side_length_ratio: 0.30,
            spring_frequency_hz: 8.0,
            spring_damping_ratio: 0.3,
            linear_damping: 1.0,
            friction: 100.0,
            restitution: 0.1,
            mass_collision: false,
            limit_contraction: true,
            min_area_ratio: 0.5,
            max_area_ratio: 1.5,
            scaffoldings: ScaffoldingSet::full(),
            actuation: Actuation::RestArea { max_delta_per_step: 0.2 },
        }
    }
}

impl VoxelSpec {
    /// Checks every parameter, reporting the first violation.
    pub fn validate(&self) -> Result<(), SpecError> {
        for (field, value) in [
            ("side_length", self.side_length),
            ("mass", self.mass),
            ("spring_frequency_hz", self.spring_frequency_hz),
            ("spring_damping_ratio", self.spring_damping_ratio),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(SpecError::NonPositive { field, value });
            }
        }
        for (field, value) in [
            ("linear_damping", self.linear_damping),
            ("friction", self.friction),
            ("restitution", self.restitution),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(SpecError::NonPositive { field, value });
            }
        }
        if !self.mass_side_length_ratio.is_finite()
            || self.mass_side_length_ratio <= 0.0
            || self.mass_side_length_ratio >= 1.0
        {
            return Err(SpecError::MassRatioOutOfRange { value: self.mass_side_length_ratio });
        }
        if !self.min_area_ratio.is_finite()
            || !self.max_area_ratio.is_finite()
            || self.min_area_ratio <= 0.0
            || self.min_area_ratio >= 1.0
            || self.max_area_ratio <= 1.0
        {
            return Err(SpecError::InvalidAreaBand {
                min: self.min_area_ratio,
                max: self.max_area_ratio,
            });
        }
        if self.scaffoldings.is_empty() {
            return Err(SpecError::EmptyScaffolding);
        }
        match self.actuation {
            Actuation::Force { max_force } => {
                if !max_force.is_finite() || max_force < 0.0 {
                    return Err(SpecError::InvalidActuation {
                        field: "max_force",
                        value: max_force,
                    });
                }
            }
            Actuation::RestArea { max_delta_per_step } => {
                if !max_delta_per_step.is_finite()
                    || max_delta_per_step < 0.0
                    || max_delta_per_step >= 1.0
                {
                    return Err(SpecError::InvalidActuation {
                        field: "max_delta_per_step",
                        value: max_delta_per_step,
                    });
                }
            }
        }
        Ok(())
    }

    /// Radius of one corner body (m).
    pub fn corner_radius(&self) -> f64 {
        self.side_length * self.mass_side_length_ratio / 2.0
    }

    /// Mass of one corner body (kg).
    pub fn corner_mass(&self) -> f64 {
        self.mass / 4.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert_eq!(VoxelSpec::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_zero_side() {
        let spec = VoxelSpec { side_length: 0.0, ..VoxelSpec::default() };
        assert_eq!(
            spec.validate(),
            Err(SpecError::NonPositive { field: "side_length", value: 0.0 })
        );
    }

    #[test]
    fn rejects_inverted_band() {
        let spec = VoxelSpec {
            min_area_ratio: 1.2,
            max_area_ratio: 0.8,
            ..VoxelSpec::default()
        };
        assert!(matches!(spec.validate(), Err(SpecError::InvalidAreaBand { .. })));
    }

    #[test]
    fn rejects_empty_scaffolding() {
        let spec = VoxelSpec {
            scaffoldings: ScaffoldingSet { edges: false, crosses: false },
            ..VoxelSpec::default()
        };
        assert_eq!(spec.validate(), Err(SpecError::EmptyScaffolding));
    }

    #[test]
    fn rejects_full_contraction_ramp() {
        let spec = VoxelSpec {
            actuation: Actuation::RestArea { max_delta_per_step: 1.0 },
            ..VoxelSpec::default()
        };
        assert!(matches!(spec.validate(), Err(SpecError::InvalidActuation { .. })));
    }

    #[test]
    fn corner_geometry_follows_side() {
        let spec = VoxelSpec::default();
        assert!((spec.corner_radius() - 0.45).abs() < 1e-12);
        assert!((spec.corner_mass() - 0.25).abs() < 1e-12);
    }
}
