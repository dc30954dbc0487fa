//! Per-tick simulation driver tying all subsystems together.

use crate::body::RigidBody;
use crate::broadphase::SpatialHash;
use crate::config::PhysicsConfig;
use crate::detect::detect;
use crate::float::Float;
use crate::joint::Joint;
use crate::observer::StepObserver;
use crate::resolve::CollisionResolver;
use crate::solver::ConstraintSolver;
use alloc::vec::Vec as AllocVec;

/// A complete simulation: body arena, broad phase, resolver, and
/// constraint solver.
///
/// Bodies live in an arena and are addressed by stable index handles;
/// manifolds and joints reference bodies through those handles, never
/// through aliasing pointers. One `step` runs a whole tick to completion
/// on the calling thread:
///
/// 1. gravity accumulation for awake dynamic bodies
/// 2. broad phase rebuild and candidate pair collection
/// 3. narrow phase and impulse resolution per candidate pair
/// 4. one constraint solver pass (joints accumulate forces)
/// 5. force + velocity integration, force clearing, and sleep update
///    per body
pub struct PhysicsWorld<F: Float> {
    bodies: AllocVec<RigidBody<F>>,
    broad_phase: SpatialHash<F>,
    resolver: CollisionResolver<F>,
    pub solver: ConstraintSolver<F>,
    config: PhysicsConfig<F>,
}

impl<F: Float> PhysicsWorld<F> {
    pub fn new(config: PhysicsConfig<F>) -> Self {
        PhysicsWorld {
            bodies: AllocVec::new(),
            broad_phase: SpatialHash::new(config.cell_size),
            resolver: CollisionResolver::new(config),
            solver: ConstraintSolver::new(),
            config,
        }
    }

    /// Add a body to the arena, returning its handle.
    pub fn add_body(&mut self, body: RigidBody<F>) -> usize {
        let index = self.bodies.len();
        self.bodies.push(body);
        index
    }

    /// Add a joint to the constraint solver, returning its handle.
    pub fn add_joint(&mut self, joint: Joint<F>) -> usize {
        self.solver.add_joint(joint)
    }

    pub fn body(&self, index: usize) -> &RigidBody<F> {
        &self.bodies[index]
    }

    pub fn body_mut(&mut self, index: usize) -> &mut RigidBody<F> {
        &mut self.bodies[index]
    }

    pub fn bodies(&self) -> &[RigidBody<F>] {
        &self.bodies
    }

    pub fn bodies_mut(&mut self) -> &mut [RigidBody<F>] {
        &mut self.bodies
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn config(&self) -> &PhysicsConfig<F> {
        &self.config
    }

    /// Remove every body and joint. Used when a simulation mode resets.
    pub fn clear(&mut self) {
        self.bodies.clear();
        self.solver.clear();
        self.broad_phase.clear();
    }

    /// Advance the simulation by `dt` seconds.
    pub fn step<O: StepObserver>(&mut self, dt: F, observer: &mut O) {
        // Gravity accumulation. Sleeping bodies are skipped: sleep
        // suspends integration, not collision.
        for body in self.bodies.iter_mut() {
            if body.is_static || body.sleeping {
                continue;
            }
            let gravity_force = self.config.gravity.scale(body.mass);
            body.force = body.force + gravity_force;
        }

        self.broad_phase.rebuild(&self.bodies);
        let pairs = self.broad_phase.potential_pairs();
        observer.on_broad_phase(pairs.len());

        let mut contacts = 0;
        for (a, b) in pairs {
            if let Some(manifold) = detect(a, b, &self.bodies[a], &self.bodies[b]) {
                self.resolver.resolve(&mut self.bodies, &manifold);
                contacts += 1;
            }
        }
        observer.on_contacts_resolved(contacts);

        self.solver.solve(&mut self.bodies, dt);
        observer.on_constraints_solved();

        // Joint forces accumulated by the solver integrate in the same
        // tick they were applied.
        for body in self.bodies.iter_mut() {
            body.integrate_forces(dt);
            body.integrate_velocity(dt, &self.config);
            body.clear_forces();
            body.update_sleep_state(dt, &self.config);
        }

        observer.on_step_complete();
    }
}
