//! Rigid bodies: mass, inertia, kinematic state, shapes, and integration.

use crate::config::PhysicsConfig;
use crate::error::PhysicsError;
use crate::float::Float;
use crate::vec::Vec2;
use alloc::vec::Vec as AllocVec;

/// Smallest mass a dynamic body may have. Non-positive masses are clamped
/// up to this instead of failing construction.
const MIN_MASS: f32 = 1e-3;

/// Collision shape of a rigid body.
///
/// Polygon vertices are stored in local space with clockwise winding, so
/// each edge's `perp()` faces outward.
#[derive(Clone, Debug)]
pub enum Shape<F: Float> {
    /// Circle with the given radius.
    Circle(F),
    /// Convex polygon described by local-space vertices.
    Polygon(AllocVec<Vec2<F>>),
}

/// Axis-aligned bounding box.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb<F: Float> {
    pub min: Vec2<F>,
    pub max: Vec2<F>,
}

impl<F: Float> Aabb<F> {
    /// True if the boxes overlap on both axes.
    pub fn overlaps(&self, other: &Aabb<F>) -> bool {
        !(self.max.x < other.min.x
            || other.max.x < self.min.x
            || self.max.y < other.min.y
            || other.max.y < self.min.y)
    }
}

/// A rigid body with linear and angular state.
///
/// Static bodies have zero inverse mass and inverse inertia and are never
/// moved by integration, resolution, or constraints. Sleeping is a
/// performance optimization only: it suspends integration but leaves the
/// inverse mass untouched, so sleeping bodies still collide like obstacles.
#[derive(Clone, Debug)]
pub struct RigidBody<F: Float> {
    pub position: Vec2<F>,
    pub velocity: Vec2<F>,
    pub acceleration: Vec2<F>,
    pub force: Vec2<F>,
    pub angle: F,
    pub angular_velocity: F,
    pub angular_acceleration: F,
    pub torque: F,
    pub mass: F,
    pub inv_mass: F,
    pub inertia: F,
    pub inv_inertia: F,
    pub restitution: F,
    pub friction: F,
    pub is_static: bool,
    pub sleeping: bool,
    /// Accumulated time spent below the sleep energy threshold.
    pub low_energy_time: F,
    pub shape: Shape<F>,
    /// World-space polygon vertices, kept in sync with position and angle.
    world_vertices: AllocVec<Vec2<F>>,
}

impl<F: Float> RigidBody<F> {
    /// Create a dynamic circle body. Mass is clamped to a small positive
    /// minimum; circle inertia is `0.5 * m * r^2`. A degenerate radius
    /// yields zero inertia, encoded as zero inverse inertia (no rotation)
    /// rather than a division by zero.
    pub fn circle(position: Vec2<F>, radius: F, mass: F) -> Self {
        let mass = mass.max(F::from_f32(MIN_MASS));
        let inertia = F::half() * mass * radius * radius;
        RigidBody {
            position,
            velocity: Vec2::zero(),
            acceleration: Vec2::zero(),
            force: Vec2::zero(),
            angle: F::zero(),
            angular_velocity: F::zero(),
            angular_acceleration: F::zero(),
            torque: F::zero(),
            mass,
            inv_mass: F::one() / mass,
            inertia,
            inv_inertia: inv_or_zero(inertia),
            restitution: F::from_f32(0.8),
            friction: F::from_f32(0.3),
            is_static: false,
            sleeping: false,
            low_energy_time: F::zero(),
            shape: Shape::Circle(radius),
            world_vertices: AllocVec::new(),
        }
    }

    /// Create a dynamic convex polygon body from local-space vertices.
    ///
    /// Vertices may be given in either winding; they are normalized to
    /// clockwise so edge perpendiculars face outward. Fails for fewer
    /// than 3 vertices or a zero-area vertex list.
    pub fn polygon(
        position: Vec2<F>,
        vertices: AllocVec<Vec2<F>>,
        mass: F,
    ) -> Result<Self, PhysicsError> {
        if vertices.len() < 3 {
            return Err(PhysicsError::InsufficientVertices { count: vertices.len() });
        }

        let mut signed_area_2 = F::zero();
        let mut inertia_sum = F::zero();
        for i in 0..vertices.len() {
            let j = (i + 1) % vertices.len();
            let v1 = vertices[i];
            let v2 = vertices[j];
            let cross = v1.cross(v2);
            signed_area_2 = signed_area_2 + cross;
            inertia_sum = inertia_sum + cross * (v1.dot(v1) + v1.dot(v2) + v2.dot(v2));
        }

        let area = (signed_area_2 * F::half()).abs();
        if area.is_near_zero(F::from_f32(1e-9)) {
            return Err(PhysicsError::DegeneratePolygon);
        }

        let mut vertices = vertices;
        if signed_area_2 > F::zero() {
            vertices.reverse();
        }

        let mass = mass.max(F::from_f32(MIN_MASS));
        let inertia = mass * (inertia_sum.abs() / F::from_f32(12.0)) / area;

        let mut body = RigidBody {
            position,
            velocity: Vec2::zero(),
            acceleration: Vec2::zero(),
            force: Vec2::zero(),
            angle: F::zero(),
            angular_velocity: F::zero(),
            angular_acceleration: F::zero(),
            torque: F::zero(),
            mass,
            inv_mass: F::one() / mass,
            inertia,
            inv_inertia: inv_or_zero(inertia),
            restitution: F::from_f32(0.8),
            friction: F::from_f32(0.3),
            is_static: false,
            sleeping: false,
            low_energy_time: F::zero(),
            shape: Shape::Polygon(vertices),
            world_vertices: AllocVec::new(),
        };
        body.sync_world_vertices();
        Ok(body)
    }

    /// Set the initial velocity.
    pub fn with_velocity(mut self, velocity: Vec2<F>) -> Self {
        self.velocity = velocity;
        self
    }

    /// Set the restitution (bounciness), typically in [0, 1].
    pub fn with_restitution(mut self, restitution: F) -> Self {
        self.restitution = restitution;
        self
    }

    /// Set the friction coefficient (>= 0).
    pub fn with_friction(mut self, friction: F) -> Self {
        self.friction = friction;
        self
    }

    /// Mark the body static: infinite mass and inertia, never moved.
    pub fn make_static(mut self) -> Self {
        self.is_static = true;
        self.inv_mass = F::zero();
        self.inv_inertia = F::zero();
        self
    }

    /// Accumulate a force through the center of mass.
    ///
    /// Forces do not wake a sleeping body; while asleep, integration is
    /// suspended and accumulated forces have no effect.
    pub fn apply_force(&mut self, force: Vec2<F>) {
        if self.is_static {
            return;
        }
        self.force = self.force + force;
    }

    /// Accumulate a force applied at a world-space point, adding the
    /// resulting torque `(point - position) x force`.
    pub fn apply_force_at(&mut self, force: Vec2<F>, point: Vec2<F>) {
        if self.is_static {
            return;
        }
        self.force = self.force + force;
        let r = point - self.position;
        self.torque = self.torque + r.cross(force);
    }

    /// Apply an impulse through the center of mass, changing velocity
    /// immediately. Wakes the body.
    pub fn apply_impulse(&mut self, impulse: Vec2<F>) {
        if self.is_static {
            return;
        }
        self.wake_up();
        self.velocity = self.velocity + impulse.scale(self.inv_mass);
    }

    /// Apply an impulse at a world-space point, also changing angular
    /// velocity by `(point - position) x impulse * inv_inertia`.
    pub fn apply_impulse_at(&mut self, impulse: Vec2<F>, point: Vec2<F>) {
        if self.is_static {
            return;
        }
        self.wake_up();
        self.velocity = self.velocity + impulse.scale(self.inv_mass);
        let r = point - self.position;
        self.angular_velocity = self.angular_velocity + r.cross(impulse) * self.inv_inertia;
    }

    /// Turn accumulated force and torque into accelerations.
    pub fn integrate_forces(&mut self, _dt: F) {
        if self.is_static || self.sleeping {
            return;
        }
        self.acceleration = self.force.scale(self.inv_mass);
        self.angular_acceleration = self.torque * self.inv_inertia;
    }

    /// Semi-implicit Euler step: velocity from acceleration, position from
    /// velocity, then a small damping factor on both velocities to bleed
    /// off numerical energy gain.
    pub fn integrate_velocity(&mut self, dt: F, config: &PhysicsConfig<F>) {
        if self.is_static || self.sleeping {
            return;
        }

        self.velocity = self.velocity + self.acceleration.scale(dt);
        self.position = self.position + self.velocity.scale(dt);

        self.angular_velocity = self.angular_velocity + self.angular_acceleration * dt;
        self.angle = self.angle + self.angular_velocity * dt;

        self.velocity = self.velocity.scale(config.damping);
        self.angular_velocity = self.angular_velocity * config.damping;

        self.sync_world_vertices();
    }

    /// Zero accumulated force and torque. Call once per tick after
    /// integration.
    pub fn clear_forces(&mut self) {
        self.force = Vec2::zero();
        self.torque = F::zero();
    }

    /// Advance the sleep state machine: a body that stays below the energy
    /// threshold for longer than the configured delay falls asleep; any
    /// energy spike wakes it.
    pub fn update_sleep_state(&mut self, dt: F, config: &PhysicsConfig<F>) {
        if self.is_static {
            return;
        }
        if self.kinetic_energy() < config.sleep_energy_threshold {
            self.low_energy_time = self.low_energy_time + dt;
            if self.low_energy_time > config.sleep_delay {
                self.sleeping = true;
            }
        } else {
            self.low_energy_time = F::zero();
            self.sleeping = false;
        }
    }

    /// Wake the body and reset its low-energy timer.
    pub fn wake_up(&mut self) {
        self.sleeping = false;
        self.low_energy_time = F::zero();
    }

    /// Combined linear and rotational kinetic energy.
    pub fn kinetic_energy(&self) -> F {
        let linear = F::half() * self.mass * self.velocity.length_sq();
        let angular = F::half() * self.inertia * self.angular_velocity * self.angular_velocity;
        linear + angular
    }

    /// Move the body by a delta, keeping the world-vertex cache in sync.
    /// Used by positional correction; does not wake the body.
    pub fn translate(&mut self, delta: Vec2<F>) {
        self.position = self.position + delta;
        self.sync_world_vertices();
    }

    /// Set the position directly, re-syncing the world-vertex cache.
    pub fn set_position(&mut self, position: Vec2<F>) {
        self.position = position;
        self.sync_world_vertices();
    }

    /// Set the orientation angle, re-syncing the world-vertex cache.
    pub fn set_angle(&mut self, angle: F) {
        self.angle = angle;
        self.sync_world_vertices();
    }

    /// Recompute world-space polygon vertices from local vertices, the
    /// current position, and the current angle. No-op for circles.
    pub fn sync_world_vertices(&mut self) {
        if let Shape::Polygon(local) = &self.shape {
            let cos_a = self.angle.cos();
            let sin_a = self.angle.sin();
            self.world_vertices.clear();
            for v in local.iter() {
                let rotated = Vec2::new(v.x * cos_a - v.y * sin_a, v.x * sin_a + v.y * cos_a);
                self.world_vertices.push(rotated + self.position);
            }
        }
    }

    /// World-space polygon vertices. Empty for circles.
    pub fn world_vertices(&self) -> &[Vec2<F>] {
        &self.world_vertices
    }

    /// Current axis-aligned bounding box.
    pub fn aabb(&self) -> Aabb<F> {
        match &self.shape {
            Shape::Circle(radius) => Aabb {
                min: self.position - Vec2::splat(*radius),
                max: self.position + Vec2::splat(*radius),
            },
            Shape::Polygon(_) => {
                let mut min = self.world_vertices[0];
                let mut max = min;
                for v in self.world_vertices.iter().skip(1) {
                    min.x = min.x.min(v.x);
                    min.y = min.y.min(v.y);
                    max.x = max.x.max(v.x);
                    max.y = max.y.max(v.y);
                }
                Aabb { min, max }
            }
        }
    }

    /// Point containment test: distance check for circles, even-odd ray
    /// cast over world vertices for polygons.
    pub fn contains_point(&self, point: Vec2<F>) -> bool {
        match &self.shape {
            Shape::Circle(radius) => self.position.distance(point) <= *radius,
            Shape::Polygon(_) => {
                let verts = &self.world_vertices;
                let mut inside = false;
                let mut j = verts.len() - 1;
                for i in 0..verts.len() {
                    let v1 = verts[j];
                    let v2 = verts[i];
                    if (v1.y > point.y) != (v2.y > point.y)
                        && point.x < (v2.x - v1.x) * (point.y - v1.y) / (v2.y - v1.y) + v1.x
                    {
                        inside = !inside;
                    }
                    j = i;
                }
                inside
            }
        }
    }
}

/// Inverse of a positive quantity; non-positive values encode "no
/// rotation" as zero inverse inertia instead of dividing by zero.
fn inv_or_zero<F: Float>(value: F) -> F {
    if value > F::zero() {
        F::one() / value
    } else {
        F::zero()
    }
}

/// Mutably borrow two distinct bodies from the arena at once.
///
/// Panics if `a == b`; all callers pair distinct indices.
pub(crate) fn pair_mut<F: Float>(
    bodies: &mut [RigidBody<F>],
    a: usize,
    b: usize,
) -> (&mut RigidBody<F>, &mut RigidBody<F>) {
    if a < b {
        let (left, right) = bodies.split_at_mut(b);
        (&mut left[a], &mut right[0])
    } else {
        let (left, right) = bodies.split_at_mut(a);
        (&mut right[0], &mut left[b])
    }
}
