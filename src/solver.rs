//! Constraint solver: owns the joint list and runs solve passes.

use crate::body::RigidBody;
use crate::float::Float;
use crate::joint::Joint;
use alloc::vec::Vec as AllocVec;

/// Owns the joints and solves each once per pass.
///
/// Callers run one pass per tick after collision resolution. Articulated
/// rigs (ragdoll-style chains) use `solve_iterations` with a small fixed
/// count to approximate convergence.
pub struct ConstraintSolver<F: Float> {
    joints: AllocVec<Joint<F>>,
}

impl<F: Float> ConstraintSolver<F> {
    pub fn new() -> Self {
        ConstraintSolver { joints: AllocVec::new() }
    }

    /// Add a joint, returning its handle.
    pub fn add_joint(&mut self, joint: Joint<F>) -> usize {
        let index = self.joints.len();
        self.joints.push(joint);
        index
    }

    /// Remove and return the joint at `index`. The last joint takes its
    /// slot, so only that one handle is invalidated.
    pub fn remove_joint(&mut self, index: usize) -> Joint<F> {
        self.joints.swap_remove(index)
    }

    pub fn joint(&self, index: usize) -> &Joint<F> {
        &self.joints[index]
    }

    pub fn joint_mut(&mut self, index: usize) -> &mut Joint<F> {
        &mut self.joints[index]
    }

    pub fn joint_count(&self) -> usize {
        self.joints.len()
    }

    pub fn clear(&mut self) {
        self.joints.clear();
    }

    /// Solve every live joint once.
    pub fn solve(&mut self, bodies: &mut [RigidBody<F>], dt: F) {
        for joint in self.joints.iter_mut() {
            if !joint.is_broken() {
                joint.solve(bodies, dt);
            }
        }
    }

    /// Run `iterations` full solve passes. Articulated chains use 3.
    pub fn solve_iterations(&mut self, bodies: &mut [RigidBody<F>], dt: F, iterations: usize) {
        for _ in 0..iterations {
            self.solve(bodies, dt);
        }
    }
}

impl<F: Float> Default for ConstraintSolver<F> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::joint::SpringJoint;
    use crate::vec::Vec2;
    use alloc::vec;

    #[test]
    fn broken_joints_are_skipped() {
        let mut bodies = vec![
            RigidBody::circle(Vec2::new(0.0f32, 0.0), 5.0, 1.0),
            RigidBody::circle(Vec2::new(200.0f32, 0.0), 5.0, 1.0),
        ];
        let mut solver = ConstraintSolver::new();
        solver.add_joint(Joint::Spring(
            SpringJoint::new(0, 1, 20.0).with_break_force(10.0),
        ));

        solver.solve(&mut bodies, 1.0 / 60.0);
        assert!(solver.joint(0).is_broken());
        assert_eq!(bodies[0].force, Vec2::zero());

        // Further passes leave the broken joint inert.
        solver.solve(&mut bodies, 1.0 / 60.0);
        assert_eq!(bodies[0].force, Vec2::zero());
    }

    #[test]
    fn iterations_converge_further_than_single_pass() {
        let make_bodies = || {
            vec![
                RigidBody::circle(Vec2::new(0.0f32, 0.0), 5.0, 1.0).make_static(),
                RigidBody::circle(Vec2::new(30.0f32, 0.0), 5.0, 1.0),
            ]
        };
        let make_solver = || {
            let mut s = ConstraintSolver::new();
            s.add_joint(Joint::Revolute(crate::joint::RevoluteJoint::new(
                0,
                1,
                Vec2::new(10.0, 0.0),
                Vec2::new(-10.0, 0.0),
            )));
            s
        };

        let mut single = make_bodies();
        make_solver().solve(&mut single, 1.0 / 60.0);

        let mut triple = make_bodies();
        make_solver().solve_iterations(&mut triple, 1.0 / 60.0, 3);

        let target = 20.0f32;
        assert!((triple[1].position.x - target).abs() < (single[1].position.x - target).abs());
    }
}
