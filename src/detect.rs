//! Narrow-phase collision detection: circle-circle, circle-polygon, and
//! polygon-polygon via the Separating Axis Theorem.

use crate::body::{RigidBody, Shape};
use crate::float::Float;
use crate::manifold::ContactManifold;
use crate::vec::Vec2;

/// Test a candidate pair for collision.
///
/// An AABB overlap precheck gates the shape-specific tests. Returns a
/// manifold whose normal points from `body_a` toward `body_b`, or `None`
/// when the bodies do not overlap.
pub fn detect<F: Float>(
    a: usize,
    b: usize,
    body_a: &RigidBody<F>,
    body_b: &RigidBody<F>,
) -> Option<ContactManifold<F>> {
    if !body_a.aabb().overlaps(&body_b.aabb()) {
        return None;
    }

    match (&body_a.shape, &body_b.shape) {
        (Shape::Circle(ra), Shape::Circle(rb)) => circle_circle(a, b, body_a, body_b, *ra, *rb),
        (Shape::Circle(r), Shape::Polygon(_)) => circle_polygon(a, b, body_a, body_b, *r),
        (Shape::Polygon(_), Shape::Circle(r)) => {
            // Reuse the circle-polygon routine with body order flipped.
            circle_polygon(b, a, body_b, body_a, *r).map(ContactManifold::flipped)
        }
        (Shape::Polygon(_), Shape::Polygon(_)) => polygon_polygon(a, b, body_a, body_b),
    }
}

fn circle_circle<F: Float>(
    a: usize,
    b: usize,
    body_a: &RigidBody<F>,
    body_b: &RigidBody<F>,
    ra: F,
    rb: F,
) -> Option<ContactManifold<F>> {
    let delta = body_b.position - body_a.position;
    let distance = delta.length();
    let radius_sum = ra + rb;

    // Coincident centers have no meaningful normal; skip the pair.
    if distance <= F::zero() || distance >= radius_sum {
        return None;
    }

    let mut manifold = ContactManifold::new(a, b, body_a, body_b);
    manifold.normal = delta.scale(F::one() / distance);
    manifold.penetration = radius_sum - distance;
    manifold.contact = Some(body_a.position + manifold.normal.scale(ra));
    Some(manifold)
}

/// Circle against polygon, treating each polygon edge normal as a
/// candidate separating axis for the circle center.
///
/// The edge of maximum (least negative) separation provides the contact
/// axis. The circle-center-near-a-vertex region is not special-cased
/// (no Voronoi region test); the edge normal is used as-is.
fn circle_polygon<F: Float>(
    circle_idx: usize,
    polygon_idx: usize,
    circle: &RigidBody<F>,
    polygon: &RigidBody<F>,
    radius: F,
) -> Option<ContactManifold<F>> {
    let verts = polygon.world_vertices();
    let mut max_separation = -F::infinity();
    let mut best_normal = Vec2::zero();

    for i in 0..verts.len() {
        let j = (i + 1) % verts.len();
        let edge = verts[j] - verts[i];
        let normal = edge.perp().normalize();
        if normal == Vec2::zero() {
            continue; // degenerate edge
        }

        let to_circle = circle.position - verts[i];
        let separation = to_circle.dot(normal) - radius;

        if separation > F::zero() {
            return None; // separating axis found
        }
        if separation > max_separation {
            max_separation = separation;
            best_normal = normal;
        }
    }

    if best_normal == Vec2::zero() {
        return None;
    }

    let mut manifold = ContactManifold::new(circle_idx, polygon_idx, circle, polygon);
    // Edge normals face out of the polygon; the contact normal points
    // from the circle into the polygon.
    manifold.normal = -best_normal;
    manifold.penetration = -max_separation;
    manifold.contact = Some(circle.position - best_normal.scale(radius));
    Some(manifold)
}

/// Polygon against polygon via SAT: every edge normal of both polygons is
/// a candidate axis; the axis of minimum overlap is the collision normal.
///
/// The contact point is approximated by the midpoint of the two body
/// centers; full clipping contact generation is out of scope.
fn polygon_polygon<F: Float>(
    a: usize,
    b: usize,
    body_a: &RigidBody<F>,
    body_b: &RigidBody<F>,
) -> Option<ContactManifold<F>> {
    let verts_a = body_a.world_vertices();
    let verts_b = body_b.world_vertices();

    let mut min_overlap = F::infinity();
    let mut best_axis = Vec2::zero();

    for verts in [verts_a, verts_b] {
        for i in 0..verts.len() {
            let j = (i + 1) % verts.len();
            let edge = verts[j] - verts[i];
            let axis = edge.perp().normalize();
            if axis == Vec2::zero() {
                continue;
            }

            let (min_a, max_a) = project(verts_a, axis);
            let (min_b, max_b) = project(verts_b, axis);

            let overlap = max_a.min(max_b) - min_a.max(min_b);
            if overlap <= F::zero() {
                return None; // separating axis found
            }
            if overlap < min_overlap {
                min_overlap = overlap;
                best_axis = axis;
            }
        }
    }

    let mut manifold = ContactManifold::new(a, b, body_a, body_b);

    // Orient the minimum-translation axis from A toward B.
    let center_to_center = body_b.position - body_a.position;
    manifold.normal = if center_to_center.dot(best_axis) < F::zero() {
        -best_axis
    } else {
        best_axis
    };
    manifold.penetration = min_overlap;
    manifold.contact = Some((body_a.position + body_b.position).scale(F::half()));
    Some(manifold)
}

/// Project a vertex set onto an axis, returning (min, max).
fn project<F: Float>(verts: &[Vec2<F>], axis: Vec2<F>) -> (F, F) {
    let mut min = verts[0].dot(axis);
    let mut max = min;
    for v in verts.iter().skip(1) {
        let p = v.dot(axis);
        min = min.min(p);
        max = max.max(p);
    }
    (min, max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec as AllocVec;

    fn square(half: f32) -> AllocVec<Vec2<f32>> {
        vec![
            Vec2::new(-half, -half),
            Vec2::new(half, -half),
            Vec2::new(half, half),
            Vec2::new(-half, half),
        ]
    }

    #[test]
    fn overlapping_circles_collide() {
        let a = RigidBody::circle(Vec2::new(0.0f32, 0.0), 10.0, 1.0);
        let b = RigidBody::circle(Vec2::new(15.0f32, 0.0), 10.0, 1.0);
        let m = detect(0, 1, &a, &b).expect("circles overlap");
        assert!((m.penetration - 5.0).abs() < 1e-6);
        assert!((m.normal.x - 1.0).abs() < 1e-6);
        assert!(m.normal.y.abs() < 1e-6);
        let contact = m.contact.unwrap();
        assert!((contact.x - 10.0).abs() < 1e-6);
    }

    #[test]
    fn separated_circles_do_not_collide() {
        let a = RigidBody::circle(Vec2::new(0.0f32, 0.0), 10.0, 1.0);
        let b = RigidBody::circle(Vec2::new(25.0f32, 0.0), 10.0, 1.0);
        assert!(detect(0, 1, &a, &b).is_none());
    }

    #[test]
    fn coincident_circles_skipped() {
        let a = RigidBody::circle(Vec2::new(0.0f32, 0.0), 10.0, 1.0);
        let b = RigidBody::circle(Vec2::new(0.0f32, 0.0), 10.0, 1.0);
        assert!(detect(0, 1, &a, &b).is_none());
    }

    #[test]
    fn circle_inside_polygon_edge_region() {
        let circle = RigidBody::circle(Vec2::new(0.0f32, 12.0), 5.0, 1.0);
        let polygon = RigidBody::polygon(Vec2::<f32>::zero(), square(10.0), 1.0).unwrap();
        let m = detect(0, 1, &circle, &polygon).expect("circle touches top edge");
        // Normal points from the circle down into the polygon.
        assert!(m.normal.y < 0.0);
        assert!((m.penetration - 3.0).abs() < 1e-5);
    }

    #[test]
    fn circle_clear_of_polygon() {
        let circle = RigidBody::circle(Vec2::new(0.0f32, 16.0), 5.0, 1.0);
        let polygon = RigidBody::polygon(Vec2::<f32>::zero(), square(10.0), 1.0).unwrap();
        assert!(detect(0, 1, &circle, &polygon).is_none());
    }

    #[test]
    fn polygon_circle_order_flips_normal() {
        let circle = RigidBody::circle(Vec2::new(0.0f32, 12.0), 5.0, 1.0);
        let polygon = RigidBody::polygon(Vec2::<f32>::zero(), square(10.0), 1.0).unwrap();

        let cp = detect(0, 1, &circle, &polygon).unwrap();
        let pc = detect(1, 0, &polygon, &circle).unwrap();
        assert_eq!(pc.a, 1);
        assert_eq!(pc.b, 0);
        assert!((cp.normal.y + pc.normal.y).abs() < 1e-6);
        assert!((cp.penetration - pc.penetration).abs() < 1e-6);
    }

    #[test]
    fn sat_overlap_matches_displacement() {
        let a = RigidBody::polygon(Vec2::<f32>::zero(), square(10.0), 1.0).unwrap();
        let b = RigidBody::polygon(Vec2::new(15.0f32, 0.0), square(10.0), 1.0).unwrap();
        let m = detect(0, 1, &a, &b).expect("squares overlap by 5");
        assert!((m.penetration - 5.0).abs() < 1e-5);
        assert!((m.normal.x - 1.0).abs() < 1e-6);
    }

    #[test]
    fn sat_separated_squares() {
        let a = RigidBody::polygon(Vec2::<f32>::zero(), square(10.0), 1.0).unwrap();
        let b = RigidBody::polygon(Vec2::new(20.0f32, 0.0), square(10.0), 1.0).unwrap();
        assert!(detect(0, 1, &a, &b).is_none());

        let c = RigidBody::polygon(Vec2::new(25.0f32, 0.0), square(10.0), 1.0).unwrap();
        assert!(detect(0, 1, &a, &c).is_none());
    }

    #[test]
    fn sat_contact_is_center_midpoint() {
        let a = RigidBody::polygon(Vec2::<f32>::zero(), square(10.0), 1.0).unwrap();
        let b = RigidBody::polygon(Vec2::new(12.0f32, 0.0), square(10.0), 1.0).unwrap();
        let m = detect(0, 1, &a, &b).unwrap();
        let contact = m.contact.unwrap();
        assert!((contact.x - 6.0).abs() < 1e-6);
        assert!(contact.y.abs() < 1e-6);
    }

    #[test]
    fn aabb_precheck_rejects_distant_pair() {
        // Far apart on the y axis only; x extents overlap.
        let a = RigidBody::circle(Vec2::new(0.0f32, 0.0), 10.0, 1.0);
        let b = RigidBody::circle(Vec2::new(5.0f32, 100.0), 10.0, 1.0);
        assert!(detect(0, 1, &a, &b).is_none());
    }

    #[test]
    fn combined_materials() {
        let a = RigidBody::circle(Vec2::new(0.0f32, 0.0), 10.0, 1.0)
            .with_restitution(0.2)
            .with_friction(0.4);
        let b = RigidBody::circle(Vec2::new(15.0f32, 0.0), 10.0, 1.0)
            .with_restitution(0.9)
            .with_friction(0.9);
        let m = detect(0, 1, &a, &b).unwrap();
        assert!((m.restitution - 0.2).abs() < 1e-6);
        assert!((m.friction - (0.4f32 * 0.9).sqrt()).abs() < 1e-6);
    }
}
