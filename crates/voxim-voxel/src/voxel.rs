//! A single deformable voxel inside a physics engine.

use crate::error::VoxelError;
use crate::spec::{Actuation, Scaffolding, VoxelSpec};
use voxim_core::{BodyId, JointId, Point2, Poly, Vector2, VoxelRecord};
use voxim_physics::{BodyDef, JointDef, PhysicsEngine};
use voxim_sensor::VoxelState;

/// Area ratio below which a voxel is considered collapsed.
const COLLAPSE_RATIO: f64 = 0.01;

/// Stiffness boost applied per unit of relative band violation by the
/// contraction limiter.
const LIMITER_GAIN: f64 = 4.0;

/// Hard cap on the limiter's stiffness scale. Scaling stiffness by `n`
/// raises the spring frequency by `√n`; at the default 8 Hz and a 60 Hz
/// step, scales much beyond this leave the semi-implicit integrator's
/// stable region and the voxel blows up instead of stiffening.
const LIMITER_MAX_SCALE: f64 = 2.0;

/// Largest change of the limiter scale per step. Ramping keeps a deep
/// transient excursion from slamming the springs to the cap in one
/// step.
const LIMITER_RATE: f64 = 0.25;

/// A spring joint together with the rest length it was built with.
#[derive(Clone, Copy, Debug)]
struct SpringHandle {
    joint: JointId,
    base_rest: f64,
}

/// Four corner point masses joined by springs.
///
/// Corners are ordered NW, NE, SE, SW; at rest that winding is
/// clockwise, so the rest polygon's signed area is negative. The voxel
/// owns no engine: every operation takes the engine the voxel was
/// built into, and answers [`VoxelError::DetachedBody`] when handed a
/// different one.
#[derive(Debug)]
pub struct Voxel {
    spec: VoxelSpec,
    corners: [BodyId; 4],
    springs: Vec<SpringHandle>,
    rest_area: f64,
    rest_area_sign: f64,
    applied_delta: f64,
    limiter_scale: f64,
    last_signal: Option<f64>,
    last_area_ratio: f64,
    degenerate: bool,
}

impl Voxel {
    /// Registers a voxel's bodies and springs with `engine`, with its
    /// square's bottom-left corner at `(x, y)`.
    ///
    /// The spec must already be validated; compound construction does
    /// this once for the whole grid.
    pub fn build(
        spec: VoxelSpec,
        x: f64,
        y: f64,
        engine: &mut dyn PhysicsEngine,
    ) -> Result<Self, VoxelError> {
        let s = spec.side_length;
        let positions = [
            Point2::new(x, y + s),     // NW
            Point2::new(x + s, y + s), // NE
            Point2::new(x + s, y),     // SE
            Point2::new(x, y),         // SW
        ];
        let mut corners = [BodyId(0); 4];
        for (corner, position) in corners.iter_mut().zip(positions) {
            *corner = engine.add_body(BodyDef {
                position,
                mass: spec.corner_mass(),
                radius: spec.corner_radius(),
                linear_damping: spec.linear_damping,
                friction: spec.friction,
                restitution: spec.restitution,
                collides: spec.mass_collision,
            });
        }

        let mut pairs: Vec<(usize, usize, f64)> = Vec::with_capacity(6);
        if spec.scaffoldings.contains(Scaffolding::Edges) {
            pairs.extend([(0, 1, s), (1, 2, s), (2, 3, s), (3, 0, s)]);
        }
        if spec.scaffoldings.contains(Scaffolding::Crosses) {
            let diagonal = s * std::f64::consts::SQRT_2;
            pairs.extend([(0, 2, diagonal), (1, 3, diagonal)]);
        }
        let mut springs = Vec::with_capacity(pairs.len());
        for (a, b, rest_length) in pairs {
            let joint = engine.add_joint(JointDef::Spring {
                a: corners[a],
                b: corners[b],
                rest_length,
                frequency_hz: spec.spring_frequency_hz,
                damping_ratio: spec.spring_damping_ratio,
            })?;
            springs.push(SpringHandle { joint, base_rest: rest_length });
        }

        Ok(Self {
            spec,
            corners,
            springs,
            rest_area: s * s,
            rest_area_sign: -1.0,
            applied_delta: 0.0,
            limiter_scale: 1.0,
            last_signal: None,
            last_area_ratio: 1.0,
            degenerate: false,
        })
    }

    /// The voxel's material and actuation parameters.
    pub fn spec(&self) -> &VoxelSpec {
        &self.spec
    }

    /// Corner body handles in NW, NE, SE, SW order.
    pub fn corners(&self) -> [BodyId; 4] {
        self.corners
    }

    /// Number of springs the voxel was built with.
    pub fn spring_count(&self) -> usize {
        self.springs.len()
    }

    /// The current corner polygon in NW, NE, SE, SW order.
    pub fn poly(&self, engine: &dyn PhysicsEngine) -> Result<Poly, VoxelError> {
        let mut vertices = [Point2::new(0.0, 0.0); 4];
        for (vertex, corner) in vertices.iter_mut().zip(self.corners) {
            *vertex = engine.position(corner).ok_or(VoxelError::DetachedBody(corner))?;
        }
        Ok(Poly::new(vertices.to_vec()))
    }

    /// Centroid of the corner polygon.
    pub fn center(&self, engine: &dyn PhysicsEngine) -> Result<Point2, VoxelError> {
        Ok(self.poly(engine)?.center())
    }

    /// Mean linear velocity of the four corners.
    pub fn linear_velocity(&self, engine: &dyn PhysicsEngine) -> Result<Vector2, VoxelError> {
        let mut sum = Vector2::zero();
        for corner in self.corners {
            sum = sum + engine.velocity(corner).ok_or(VoxelError::DetachedBody(corner))?;
        }
        Ok(sum * 0.25)
    }

    /// Orientation angle: the direction of the summed top and bottom
    /// edge vectors. Zero for an undeformed, unrotated voxel.
    pub fn angle(&self, engine: &dyn PhysicsEngine) -> Result<f64, VoxelError> {
        let poly = self.poly(engine)?;
        let v = poly.vertices();
        let top = v[1] - v[0];
        let bottom = v[2] - v[3];
        Ok((top + bottom).angle())
    }

    /// Whether any corner body touched the ground during the last step.
    pub fn touching_ground(&self, engine: &dyn PhysicsEngine) -> Result<bool, VoxelError> {
        for corner in self.corners {
            if engine.in_contact(corner).ok_or(VoxelError::DetachedBody(corner))? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Current area ÷ rest area, as of the last [`act`](Voxel::act).
    pub fn area_ratio(&self) -> f64 {
        self.last_area_ratio
    }

    /// Whether the voxel has ever collapsed or inverted.
    pub fn degenerate(&self) -> bool {
        self.degenerate
    }

    /// The kinematic state a sensor observes, as of now.
    pub fn state(&self, engine: &dyn PhysicsEngine) -> Result<VoxelState, VoxelError> {
        Ok(VoxelState {
            center: self.center(engine)?,
            angle: self.angle(engine)?,
            linear_velocity: self.linear_velocity(engine)?,
            area_ratio: self.last_area_ratio,
            touching_ground: self.touching_ground(engine)?,
        })
    }

    /// Per-step housekeeping, called once before each physics step:
    /// refreshes the area ratio, latches degeneracy, and drives the
    /// passive contraction limiter.
    pub fn act(&mut self, engine: &mut dyn PhysicsEngine) -> Result<(), VoxelError> {
        let signed = self.poly(engine)?.signed_area();
        let ratio = signed.abs() / self.rest_area;
        self.last_area_ratio = ratio;
        if signed.signum() != self.rest_area_sign || ratio < COLLAPSE_RATIO {
            self.degenerate = true;
        }
        if self.spec.limit_contraction {
            let min = self.spec.min_area_ratio;
            let max = self.spec.max_area_ratio;
            let target = if ratio < min {
                1.0 + LIMITER_GAIN * (min - ratio) / min
            } else if ratio > max {
                1.0 + LIMITER_GAIN * (ratio - max) / max
            } else {
                1.0
            };
            let target = target.min(LIMITER_MAX_SCALE);
            self.limiter_scale += (target - self.limiter_scale).clamp(-LIMITER_RATE, LIMITER_RATE);
            for spring in &self.springs {
                engine.set_stiffness_scale(spring.joint, self.limiter_scale)?;
            }
        }
        Ok(())
    }

    /// Applies an actuation signal, clamped to `[−1, 1]`. Positive
    /// signals contract the voxel, negative expand it.
    pub fn apply_actuation(
        &mut self,
        signal: f64,
        engine: &mut dyn PhysicsEngine,
    ) -> Result<(), VoxelError> {
        let signal = if signal.is_finite() { signal.clamp(-1.0, 1.0) } else { 0.0 };
        self.last_signal = Some(signal);
        match self.spec.actuation {
            Actuation::Force { max_force } => {
                let center = self.center(engine)?;
                for corner in self.corners {
                    let position =
                        engine.position(corner).ok_or(VoxelError::DetachedBody(corner))?;
                    let outward = (position - center).normalized();
                    engine.apply_force(corner, outward * (-signal * max_force))?;
                }
            }
            Actuation::RestArea { max_delta_per_step } => {
                // Full positive signal targets the bottom of the area
                // band, full negative the top.
                let target = if signal >= 0.0 {
                    signal * (1.0 - self.spec.min_area_ratio)
                } else {
                    signal * (self.spec.max_area_ratio - 1.0)
                };
                let step = (target - self.applied_delta)
                    .clamp(-max_delta_per_step, max_delta_per_step);
                self.applied_delta += step;
                let side_factor = (1.0 - self.applied_delta).sqrt();
                for spring in &self.springs {
                    engine.set_rest_length(spring.joint, spring.base_rest * side_factor)?;
                }
            }
        }
        Ok(())
    }

    /// Projects the voxel into an immutable snapshot record.
    pub fn immutable(&self, engine: &dyn PhysicsEngine) -> Result<VoxelRecord, VoxelError> {
        Ok(VoxelRecord {
            poly: self.poly(engine)?,
            area_ratio: self.last_area_ratio,
            degenerate: self.degenerate,
            applied_signal: self.last_signal,
        })
    }
}
