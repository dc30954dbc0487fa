//! Deformable bodies built from the rigid core: a ring of small circle
//! bodies joined by spring joints.

use crate::error::PhysicsError;
use crate::float::Float;
use crate::joint::{Joint, SpringJoint};
use crate::body::RigidBody;
use crate::vec::Vec2;
use crate::world::PhysicsWorld;
use alloc::vec::Vec as AllocVec;

/// Configuration for building a soft body.
pub struct SoftBodyConfig<F: Float> {
    /// Number of perimeter bodies. Minimum 3.
    pub segments: usize,
    /// Mass of each perimeter body.
    pub particle_mass: F,
    /// Collision radius of each perimeter body.
    pub particle_radius: F,
    /// Spring constant for perimeter springs; cross springs use half.
    pub spring_constant: F,
    /// Spring damping.
    pub damping: F,
}

impl<F: Float> Default for SoftBodyConfig<F> {
    fn default() -> Self {
        SoftBodyConfig {
            segments: 12,
            particle_mass: F::one(),
            particle_radius: F::from_f32(2.0),
            spring_constant: F::from_f32(100.0),
            damping: F::from_f32(5.0),
        }
    }
}

/// Handles of the bodies and joints making up one soft body.
///
/// The bodies and joints live in the world; this struct only records
/// which handles belong to the soft body.
pub struct SoftBody {
    pub bodies: AllocVec<usize>,
    pub joints: AllocVec<usize>,
}

impl SoftBody {
    /// Build a deformable ring: perimeter bodies connected by sequential
    /// springs, plus opposite-point cross springs at half stiffness for
    /// structural integrity.
    pub fn circle<F: Float>(
        world: &mut PhysicsWorld<F>,
        center: Vec2<F>,
        radius: F,
        config: &SoftBodyConfig<F>,
    ) -> Result<Self, PhysicsError> {
        if config.segments < 3 {
            return Err(PhysicsError::InsufficientSegments);
        }

        let two_pi = F::two() * F::pi();
        let mut bodies = AllocVec::with_capacity(config.segments);
        for i in 0..config.segments {
            let angle = two_pi * F::from_f32(i as f32) / F::from_f32(config.segments as f32);
            let pos = center + Vec2::new(radius * angle.cos(), radius * angle.sin());
            bodies.push(world.add_body(RigidBody::circle(
                pos,
                config.particle_radius,
                config.particle_mass,
            )));
        }

        let mut joints = AllocVec::new();

        // Perimeter springs between sequential neighbors.
        for i in 0..config.segments {
            let j = (i + 1) % config.segments;
            let spring = SpringJoint::from_bodies(bodies[i], bodies[j], world.bodies())
                .with_spring_constant(config.spring_constant)
                .with_damping(config.damping);
            joints.push(world.add_joint(Joint::Spring(spring)));
        }

        // Cross springs between opposite points, half stiffness.
        if config.segments >= 4 {
            let half = config.segments / 2;
            for i in 0..half {
                let j = i + half;
                let spring = SpringJoint::from_bodies(bodies[i], bodies[j], world.bodies())
                    .with_spring_constant(config.spring_constant * F::half())
                    .with_damping(config.damping);
                joints.push(world.add_joint(Joint::Spring(spring)));
            }
        }

        Ok(SoftBody { bodies, joints })
    }

    /// Pin the `index`-th perimeter body in place by making it static.
    pub fn pin<F: Float>(&self, world: &mut PhysicsWorld<F>, index: usize) {
        let handle = self.bodies[index];
        let body = world.body_mut(handle);
        body.is_static = true;
        body.inv_mass = F::zero();
        body.inv_inertia = F::zero();
        body.velocity = Vec2::zero();
        body.angular_velocity = F::zero();
    }

    /// Average position of the perimeter bodies.
    pub fn center<F: Float>(&self, world: &PhysicsWorld<F>) -> Vec2<F> {
        let mut sum = Vec2::zero();
        for &handle in self.bodies.iter() {
            sum = sum + world.body(handle).position;
        }
        sum.scale(F::one() / F::from_f32(self.bodies.len() as f32))
    }
}
