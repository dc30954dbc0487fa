//! Impulse-based collision resolution: normal impulses, positional
//! correction, and Coulomb friction.

use crate::body::{pair_mut, RigidBody};
use crate::config::PhysicsConfig;
use crate::float::Float;
use crate::manifold::ContactManifold;

/// Resolves contact manifolds against the body arena.
///
/// Resolution order per manifold: wake sleeping bodies, normal impulse,
/// positional correction, friction. Separating contacts (relative normal
/// velocity pointing apart) receive neither impulse nor friction.
pub struct CollisionResolver<F: Float> {
    config: PhysicsConfig<F>,
}

impl<F: Float> CollisionResolver<F> {
    pub fn new(config: PhysicsConfig<F>) -> Self {
        CollisionResolver { config }
    }

    /// Resolve one contact manifold, mutating both referenced bodies.
    pub fn resolve(&self, bodies: &mut [RigidBody<F>], manifold: &ContactManifold<F>) {
        if manifold.a == manifold.b {
            return;
        }
        let (body_a, body_b) = pair_mut(bodies, manifold.a, manifold.b);

        // Only bodies that are actually asleep get woken; calling wake_up
        // unconditionally would reset the low-energy timer of resting
        // bodies on every persistent contact and nothing would ever sleep.
        if body_a.sleeping {
            body_a.wake_up();
        }
        if body_b.sleeping {
            body_b.wake_up();
        }

        let normal = manifold.normal;
        let relative_velocity = body_b.velocity - body_a.velocity;
        let velocity_along_normal = relative_velocity.dot(normal);

        // Never resolve separating contacts.
        let mut normal_impulse = F::zero();
        if velocity_along_normal <= F::zero() {
            normal_impulse =
                Self::resolve_velocity(body_a, body_b, manifold, velocity_along_normal);
        }

        self.correct_positions(body_a, body_b, manifold);

        // Friction is clamped by the applied normal impulse, so a pair
        // that received no impulse receives no friction either.
        if normal_impulse != F::zero() {
            Self::apply_friction(body_a, body_b, manifold, normal_impulse);
        }
    }

    /// Normal impulse with restitution and, when a contact point exists,
    /// angular lever-arm terms. Returns the applied impulse magnitude for
    /// the friction clamp.
    fn resolve_velocity(
        body_a: &mut RigidBody<F>,
        body_b: &mut RigidBody<F>,
        manifold: &ContactManifold<F>,
        velocity_along_normal: F,
    ) -> F {
        let normal = manifold.normal;
        let inv_mass_sum = body_a.inv_mass + body_b.inv_mass;

        let angular_term = match manifold.contact {
            Some(contact) => {
                let ra = contact - body_a.position;
                let rb = contact - body_b.position;
                let ra_n = ra.cross(normal);
                let rb_n = rb.cross(normal);
                ra_n * ra_n * body_a.inv_inertia + rb_n * rb_n * body_b.inv_inertia
            }
            None => F::zero(),
        };

        let denom = inv_mass_sum + angular_term;
        if denom.is_near_zero(F::from_f32(1e-10)) {
            return F::zero(); // two static-like bodies
        }

        let j = -(F::one() + manifold.restitution) * velocity_along_normal / denom;
        let impulse = normal.scale(j);

        body_a.velocity = body_a.velocity - impulse.scale(body_a.inv_mass);
        body_b.velocity = body_b.velocity + impulse.scale(body_b.inv_mass);

        if let Some(contact) = manifold.contact {
            let ra = contact - body_a.position;
            let rb = contact - body_b.position;
            body_a.angular_velocity =
                body_a.angular_velocity - ra.cross(impulse) * body_a.inv_inertia;
            body_b.angular_velocity =
                body_b.angular_velocity + rb.cross(impulse) * body_b.inv_inertia;
        }

        j
    }

    /// Baumgarte-style positional correction: push the bodies apart along
    /// the normal by a fraction of the penetration beyond the slop, split
    /// proportionally to inverse mass.
    fn correct_positions(
        &self,
        body_a: &mut RigidBody<F>,
        body_b: &mut RigidBody<F>,
        manifold: &ContactManifold<F>,
    ) {
        if manifold.penetration <= self.config.slop {
            return;
        }
        let total_inv_mass = body_a.inv_mass + body_b.inv_mass;
        if total_inv_mass <= F::zero() {
            return;
        }

        let magnitude =
            (manifold.penetration - self.config.slop) * self.config.correction_percent;
        let correction = manifold.normal.scale(magnitude);

        // translate() re-syncs polygon world vertices.
        body_a.translate(-correction.scale(body_a.inv_mass / total_inv_mass));
        body_b.translate(correction.scale(body_b.inv_mass / total_inv_mass));
    }

    /// Coulomb friction: a tangential impulse opposing the post-impulse
    /// tangential relative velocity, clamped to `friction * |j|`.
    fn apply_friction(
        body_a: &mut RigidBody<F>,
        body_b: &mut RigidBody<F>,
        manifold: &ContactManifold<F>,
        normal_impulse: F,
    ) {
        let normal = manifold.normal;
        let relative_velocity = body_b.velocity - body_a.velocity;
        let tangent = relative_velocity - normal.scale(relative_velocity.dot(normal));

        if tangent.length_sq() < F::from_f32(1e-6) {
            return; // no relative tangential motion
        }
        let tangent = tangent.normalize();

        let inv_mass_sum = body_a.inv_mass + body_b.inv_mass;
        if inv_mass_sum.is_near_zero(F::from_f32(1e-10)) {
            return;
        }

        let velocity_along_tangent = relative_velocity.dot(tangent);
        let mut jt = -velocity_along_tangent / inv_mass_sum;

        let max_friction = manifold.friction * normal_impulse.abs();
        jt = jt.clamp(-max_friction, max_friction);

        let friction_impulse = tangent.scale(jt);

        body_a.velocity = body_a.velocity - friction_impulse.scale(body_a.inv_mass);
        body_b.velocity = body_b.velocity + friction_impulse.scale(body_b.inv_mass);

        if let Some(contact) = manifold.contact {
            let ra = contact - body_a.position;
            let rb = contact - body_b.position;
            body_a.angular_velocity =
                body_a.angular_velocity - ra.cross(friction_impulse) * body_a.inv_inertia;
            body_b.angular_velocity =
                body_b.angular_velocity + rb.cross(friction_impulse) * body_b.inv_inertia;
        }
    }
}
