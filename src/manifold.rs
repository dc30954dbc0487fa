//! Contact manifolds: the output of narrow-phase collision detection.

use crate::body::RigidBody;
use crate::float::Float;
use crate::vec::Vec2;

/// Collision data for one body pair, valid for a single tick.
///
/// Bodies are referenced by arena index; the normal is a unit vector
/// pointing from body A toward body B. Material properties are combined
/// at construction: restitution takes the minimum, friction the geometric
/// mean of the two bodies' coefficients.
#[derive(Copy, Clone, Debug)]
pub struct ContactManifold<F: Float> {
    /// Index of body A.
    pub a: usize,
    /// Index of body B.
    pub b: usize,
    /// Unit normal, pointing from A to B.
    pub normal: Vec2<F>,
    /// Non-negative penetration depth along the normal.
    pub penetration: F,
    /// Representative contact point in world space, when one is known.
    /// All shipped shape pairs produce a single point; full polygon
    /// clipping is out of scope.
    pub contact: Option<Vec2<F>>,
    /// Combined restitution: `min(a, b)`.
    pub restitution: F,
    /// Combined friction: `sqrt(a * b)`.
    pub friction: F,
}

impl<F: Float> ContactManifold<F> {
    /// Build a manifold for the pair, combining material properties.
    pub fn new(a: usize, b: usize, body_a: &RigidBody<F>, body_b: &RigidBody<F>) -> Self {
        ContactManifold {
            a,
            b,
            normal: Vec2::zero(),
            penetration: F::zero(),
            contact: None,
            restitution: body_a.restitution.min(body_b.restitution),
            friction: (body_a.friction * body_b.friction).sqrt(),
        }
    }

    /// Swap the body order, flipping the normal to match.
    pub fn flipped(mut self) -> Self {
        core::mem::swap(&mut self.a, &mut self.b);
        self.normal = -self.normal;
        self
    }
}
