//! Bilateral constraints between body pairs: distance, spring, revolute.

use crate::body::{pair_mut, RigidBody};
use crate::float::Float;
use crate::vec::Vec2;

/// A joint between two bodies.
///
/// Each variant keeps its own target configuration and an optional
/// breaking threshold: once the computed restoring force exceeds
/// `break_force`, the joint flips to a permanent broken state and stops
/// acting.
pub enum Joint<F: Float> {
    Distance(DistanceJoint<F>),
    Spring(SpringJoint<F>),
    Revolute(RevoluteJoint<F>),
}

impl<F: Float> Joint<F> {
    /// Solve the constraint once against the body arena.
    pub fn solve(&mut self, bodies: &mut [RigidBody<F>], dt: F) {
        match self {
            Joint::Distance(j) => j.solve(bodies, dt),
            Joint::Spring(j) => j.solve(bodies, dt),
            Joint::Revolute(j) => j.solve(bodies),
        }
    }

    /// True once the joint has broken. Broken joints never reactivate.
    pub fn is_broken(&self) -> bool {
        match self {
            Joint::Distance(j) => j.is_broken,
            Joint::Spring(j) => j.is_broken,
            Joint::Revolute(j) => j.is_broken,
        }
    }

    /// The two body indices the joint connects.
    pub fn bodies(&self) -> (usize, usize) {
        match self {
            Joint::Distance(j) => (j.a, j.b),
            Joint::Spring(j) => (j.a, j.b),
            Joint::Revolute(j) => (j.a, j.b),
        }
    }
}

/// Maintains a rest distance between two body centers with a damped
/// restoring force.
pub struct DistanceJoint<F: Float> {
    pub a: usize,
    pub b: usize,
    pub rest_distance: F,
    pub stiffness: F,
    pub damping: F,
    pub break_force: F,
    pub is_broken: bool,
}

impl<F: Float> DistanceJoint<F> {
    pub fn new(a: usize, b: usize, rest_distance: F) -> Self {
        DistanceJoint {
            a,
            b,
            rest_distance,
            stiffness: F::one(),
            damping: F::from_f32(0.1),
            break_force: F::infinity(),
            is_broken: false,
        }
    }

    /// Use the bodies' current separation as the rest distance.
    pub fn from_bodies(a: usize, b: usize, bodies: &[RigidBody<F>]) -> Self {
        let rest = bodies[a].position.distance(bodies[b].position);
        Self::new(a, b, rest)
    }

    pub fn with_stiffness(mut self, stiffness: F) -> Self {
        self.stiffness = stiffness;
        self
    }

    pub fn with_damping(mut self, damping: F) -> Self {
        self.damping = damping;
        self
    }

    pub fn with_break_force(mut self, break_force: F) -> Self {
        self.break_force = break_force;
        self
    }

    /// Damped restoring force along the center line, applied as a force
    /// scaled by `dt`. Exceeding `break_force` breaks the joint instead.
    pub fn solve(&mut self, bodies: &mut [RigidBody<F>], dt: F) {
        if self.is_broken || self.a == self.b {
            return;
        }
        let (body_a, body_b) = pair_mut(bodies, self.a, self.b);

        let delta = body_b.position - body_a.position;
        let current = delta.length();
        if current.is_near_zero(F::from_f32(1e-6)) {
            return;
        }
        let direction = delta.scale(F::one() / current);

        let violation = current - self.rest_distance;
        let relative_velocity = (body_b.velocity - body_a.velocity).dot(direction);
        let magnitude = -self.stiffness * violation - self.damping * relative_velocity;

        if magnitude.abs() > self.break_force {
            self.is_broken = true;
            return;
        }

        let force = direction.scale(magnitude * dt);
        body_a.apply_force(-force);
        body_b.apply_force(force);
    }
}

/// Hooke's-law spring with velocity damping along the spring axis.
pub struct SpringJoint<F: Float> {
    pub a: usize,
    pub b: usize,
    pub rest_length: F,
    pub spring_constant: F,
    pub damping: F,
    pub break_force: F,
    pub is_broken: bool,
}

impl<F: Float> SpringJoint<F> {
    pub fn new(a: usize, b: usize, rest_length: F) -> Self {
        SpringJoint {
            a,
            b,
            rest_length,
            spring_constant: F::from_f32(100.0),
            damping: F::from_f32(5.0),
            break_force: F::infinity(),
            is_broken: false,
        }
    }

    /// Use the bodies' current separation as the rest length.
    pub fn from_bodies(a: usize, b: usize, bodies: &[RigidBody<F>]) -> Self {
        let rest = bodies[a].position.distance(bodies[b].position);
        Self::new(a, b, rest)
    }

    pub fn with_spring_constant(mut self, k: F) -> Self {
        self.spring_constant = k;
        self
    }

    pub fn with_damping(mut self, damping: F) -> Self {
        self.damping = damping;
        self
    }

    pub fn with_break_force(mut self, break_force: F) -> Self {
        self.break_force = break_force;
        self
    }

    /// Spring force applied directly; the integrator scales accumulated
    /// force by `dt` later.
    pub fn solve(&mut self, bodies: &mut [RigidBody<F>], _dt: F) {
        if self.is_broken || self.a == self.b {
            return;
        }
        let (body_a, body_b) = pair_mut(bodies, self.a, self.b);

        let delta = body_b.position - body_a.position;
        let current = delta.length();
        if current.is_near_zero(F::from_f32(1e-6)) {
            return;
        }
        let direction = delta.scale(F::one() / current);

        let extension = current - self.rest_length;
        let spring = -self.spring_constant * extension;
        let damping = -self.damping * (body_b.velocity - body_a.velocity).dot(direction);
        let magnitude = spring + damping;

        if magnitude.abs() > self.break_force {
            self.is_broken = true;
            return;
        }

        let force = direction.scale(magnitude);
        body_a.apply_force(-force);
        body_b.apply_force(force);
    }
}

/// Pins two local anchor points together, allowing relative rotation.
///
/// Position-only: the gap between the world-space anchors receives a
/// partial correction each solve, intentionally soft rather than
/// iteratively converged.
pub struct RevoluteJoint<F: Float> {
    pub a: usize,
    pub b: usize,
    pub local_anchor_a: Vec2<F>,
    pub local_anchor_b: Vec2<F>,
    pub is_broken: bool,
}

impl<F: Float> RevoluteJoint<F> {
    pub fn new(a: usize, b: usize, local_anchor_a: Vec2<F>, local_anchor_b: Vec2<F>) -> Self {
        RevoluteJoint {
            a,
            b,
            local_anchor_a,
            local_anchor_b,
            is_broken: false,
        }
    }

    /// World-space position of the anchor on body A.
    pub fn world_anchor_a(&self, bodies: &[RigidBody<F>]) -> Vec2<F> {
        let body = &bodies[self.a];
        body.position + self.local_anchor_a.rotate(body.angle)
    }

    /// World-space position of the anchor on body B.
    pub fn world_anchor_b(&self, bodies: &[RigidBody<F>]) -> Vec2<F> {
        let body = &bodies[self.b];
        body.position + self.local_anchor_b.rotate(body.angle)
    }

    pub fn solve(&mut self, bodies: &mut [RigidBody<F>]) {
        if self.is_broken || self.a == self.b {
            return;
        }
        let gap = self.world_anchor_b(bodies) - self.world_anchor_a(bodies);
        if gap.length_sq() < F::from_f32(1e-6) {
            return;
        }

        let (body_a, body_b) = pair_mut(bodies, self.a, self.b);
        let total_inv_mass = body_a.inv_mass + body_b.inv_mass;
        if total_inv_mass <= F::zero() {
            return;
        }

        let correction = gap.scale(F::from_f32(0.8));
        body_a.translate(correction.scale(body_a.inv_mass / total_inv_mass));
        body_b.translate(-correction.scale(body_b.inv_mass / total_inv_mass));
    }
}
