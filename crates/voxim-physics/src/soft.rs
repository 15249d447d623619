//! [`SoftWorld`], the deterministic reference backend.
//!
//! Semi-implicit Euler point masses with spring-dampers, iterative weld
//! relaxation, and a flat ground plane. Good enough for the voxel model
//! (point corners joined by springs); real rigid-body backends can be
//! substituted behind [`PhysicsEngine`] without touching the core.
//!
//! Determinism: bodies, springs, and welds are integrated in
//! registration order with no hidden state, so identical call sequences
//! produce bit-identical trajectories.

use crate::engine::{BodyDef, JointDef, PhysicsEngine};
use crate::error::PhysicsError;
use voxim_core::{BodyId, JointId, Point2, Vector2};

use std::f64::consts::TAU;

/// Construction parameters for a [`SoftWorld`].
#[derive(Clone, Copy, Debug)]
pub struct SoftWorldConfig {
    /// Gravitational acceleration applied to every body.
    pub gravity: Vector2,
    /// Height of the flat ground plane.
    pub ground_y: f64,
    /// Weld relaxation passes per step. More passes stiffen welds at
    /// the cost of per-step work.
    pub weld_iterations: usize,
}

impl Default for SoftWorldConfig {
    fn default() -> Self {
        Self {
            gravity: Vector2::new(0.0, -9.81),
            ground_y: 0.0,
            weld_iterations: 4,
        }
    }
}

struct Body {
    position: Point2,
    velocity: Vector2,
    accumulated_force: Vector2,
    mass: f64,
    radius: f64,
    linear_damping: f64,
    friction: f64,
    restitution: f64,
    in_contact: bool,
}

enum Joint {
    Spring {
        a: BodyId,
        b: BodyId,
        rest_length: f64,
        frequency_hz: f64,
        damping_ratio: f64,
        stiffness_scale: f64,
    },
    Weld {
        a: BodyId,
        b: BodyId,
    },
}

/// Reference soft-body physics backend.
pub struct SoftWorld {
    config: SoftWorldConfig,
    bodies: Vec<Body>,
    joints: Vec<Joint>,
}

impl SoftWorld {
    /// Create an empty world.
    pub fn new(config: SoftWorldConfig) -> Self {
        Self {
            config,
            bodies: Vec::new(),
            joints: Vec::new(),
        }
    }

    fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(id.0 as usize)
    }

    fn check_body(&self, id: BodyId) -> Result<(), PhysicsError> {
        if (id.0 as usize) < self.bodies.len() {
            Ok(())
        } else {
            Err(PhysicsError::UnknownBody(id))
        }
    }

    fn apply_spring_forces(&mut self) {
        for joint in &self.joints {
            let Joint::Spring {
                a,
                b,
                rest_length,
                frequency_hz,
                damping_ratio,
                stiffness_scale,
            } = joint
            else {
                continue;
            };
            let (ia, ib) = (a.0 as usize, b.0 as usize);
            let (pa, pb) = (self.bodies[ia].position, self.bodies[ib].position);
            let delta = pb - pa;
            let dist = delta.norm();
            if dist <= f64::EPSILON {
                continue;
            }
            let dir = delta * (1.0 / dist);
            let (ma, mb) = (self.bodies[ia].mass, self.bodies[ib].mass);
            let m_eff = ma * mb / (ma + mb);
            let omega = TAU * frequency_hz;
            let k = m_eff * omega * omega * stiffness_scale;
            let c = 2.0 * damping_ratio * (k * m_eff).sqrt();
            let rel = (self.bodies[ib].velocity - self.bodies[ia].velocity).dot(dir);
            let magnitude = k * (dist - rest_length) + c * rel;
            let force = dir * magnitude;
            self.bodies[ia].accumulated_force = self.bodies[ia].accumulated_force + force;
            self.bodies[ib].accumulated_force = self.bodies[ib].accumulated_force - force;
        }
    }

    fn integrate(&mut self, dt: f64) {
        let gravity = self.config.gravity;
        for body in &mut self.bodies {
            let accel = body.accumulated_force * (1.0 / body.mass) + gravity;
            body.velocity = body.velocity + accel * dt;
            // Implicit linear damping keeps large coefficients stable.
            let damp = 1.0 / (1.0 + body.linear_damping * dt);
            body.velocity = body.velocity * damp;
            body.position = body.position.translate(body.velocity * dt);
            body.accumulated_force = Vector2::zero();
        }
    }

    fn resolve_ground(&mut self, dt: f64) {
        let ground = self.config.ground_y;
        for body in &mut self.bodies {
            let floor = ground + body.radius;
            if body.position.y < floor {
                body.position.y = floor;
                if body.velocity.y < 0.0 {
                    body.velocity.y = -body.velocity.y * body.restitution;
                }
                // Implicit tangential friction while in contact.
                body.velocity.x *= 1.0 / (1.0 + body.friction * dt);
                body.in_contact = true;
            } else {
                body.in_contact = false;
            }
        }
    }

    fn relax_welds(&mut self) {
        for _ in 0..self.config.weld_iterations {
            for i in 0..self.joints.len() {
                let Joint::Weld { a, b } = &self.joints[i] else {
                    continue;
                };
                let (ia, ib) = (a.0 as usize, b.0 as usize);
                let (ma, mb) = (self.bodies[ia].mass, self.bodies[ib].mass);
                let total = ma + mb;
                let pa = self.bodies[ia].position;
                let pb = self.bodies[ib].position;
                let merged = Point2::new(
                    (pa.x * ma + pb.x * mb) / total,
                    (pa.y * ma + pb.y * mb) / total,
                );
                let va = self.bodies[ia].velocity;
                let vb = self.bodies[ib].velocity;
                let vel = Vector2::new(
                    (va.x * ma + vb.x * mb) / total,
                    (va.y * ma + vb.y * mb) / total,
                );
                self.bodies[ia].position = merged;
                self.bodies[ib].position = merged;
                self.bodies[ia].velocity = vel;
                self.bodies[ib].velocity = vel;
            }
        }
    }
}

impl PhysicsEngine for SoftWorld {
    fn add_body(&mut self, def: BodyDef) -> BodyId {
        let id = BodyId(self.bodies.len() as u32);
        self.bodies.push(Body {
            position: def.position,
            velocity: Vector2::zero(),
            accumulated_force: Vector2::zero(),
            mass: def.mass,
            radius: def.radius,
            linear_damping: def.linear_damping,
            friction: def.friction,
            restitution: def.restitution,
            in_contact: false,
        });
        id
    }

    fn add_joint(&mut self, def: JointDef) -> Result<JointId, PhysicsError> {
        let joint = match def {
            JointDef::Spring {
                a,
                b,
                rest_length,
                frequency_hz,
                damping_ratio,
            } => {
                self.check_body(a)?;
                self.check_body(b)?;
                Joint::Spring {
                    a,
                    b,
                    rest_length,
                    frequency_hz,
                    damping_ratio,
                    stiffness_scale: 1.0,
                }
            }
            JointDef::Weld { a, b } => {
                self.check_body(a)?;
                self.check_body(b)?;
                Joint::Weld { a, b }
            }
        };
        let id = JointId(self.joints.len() as u32);
        self.joints.push(joint);
        Ok(id)
    }

    fn step(&mut self, dt: f64) -> Result<(), PhysicsError> {
        if !dt.is_finite() || dt <= 0.0 {
            return Err(PhysicsError::InvalidTimestep { dt });
        }
        self.apply_spring_forces();
        self.integrate(dt);
        self.resolve_ground(dt);
        self.relax_welds();
        Ok(())
    }

    fn position(&self, body: BodyId) -> Option<Point2> {
        self.body(body).map(|b| b.position)
    }

    fn velocity(&self, body: BodyId) -> Option<Vector2> {
        self.body(body).map(|b| b.velocity)
    }

    fn in_contact(&self, body: BodyId) -> Option<bool> {
        self.body(body).map(|b| b.in_contact)
    }

    fn rest_length(&self, joint: JointId) -> Option<f64> {
        match self.joints.get(joint.0 as usize) {
            Some(Joint::Spring { rest_length, .. }) => Some(*rest_length),
            _ => None,
        }
    }

    fn apply_force(&mut self, body: BodyId, force: Vector2) -> Result<(), PhysicsError> {
        let b = self
            .bodies
            .get_mut(body.0 as usize)
            .ok_or(PhysicsError::UnknownBody(body))?;
        b.accumulated_force = b.accumulated_force + force;
        Ok(())
    }

    fn set_rest_length(&mut self, joint: JointId, new_rest: f64) -> Result<(), PhysicsError> {
        match self.joints.get_mut(joint.0 as usize) {
            Some(Joint::Spring { rest_length, .. }) => {
                *rest_length = new_rest;
                Ok(())
            }
            Some(Joint::Weld { .. }) => Err(PhysicsError::NotASpring(joint)),
            None => Err(PhysicsError::UnknownJoint(joint)),
        }
    }

    fn set_stiffness_scale(&mut self, joint: JointId, scale: f64) -> Result<(), PhysicsError> {
        match self.joints.get_mut(joint.0 as usize) {
            Some(Joint::Spring {
                stiffness_scale, ..
            }) => {
                *stiffness_scale = scale;
                Ok(())
            }
            Some(Joint::Weld { .. }) => Err(PhysicsError::NotASpring(joint)),
            None => Err(PhysicsError::UnknownJoint(joint)),
        }
    }

    fn body_count(&self) -> usize {
        self.bodies.len()
    }

    fn joint_count(&self) -> usize {
        self.joints.len()
    }
}
