//! Impulse-based 2D rigid body physics for games.
//!
//! `rigid2d` provides rigid bodies (circles and convex polygons), spatial-hash
//! broad phase, SAT narrow phase, impulse-based collision resolution with
//! Coulomb friction, and a small joint system (distance, spring, revolute).
//! Designed for plausible, stable, real-time behavior rather than scientific
//! accuracy.
//!
//! # Features
//!
//! - **Rigid bodies**: circles and convex polygons with mass, inertia,
//!   restitution, friction, and a sleep state machine
//! - **Broad phase**: uniform-grid spatial hash with deduplicated pairs
//! - **Narrow phase**: circle-circle, circle-polygon, and polygon-polygon
//!   (Separating Axis Theorem) contact generation
//! - **Resolution**: normal impulses with angular lever arms, Coulomb
//!   friction, and Baumgarte-style positional correction
//! - **Joints**: distance, spring, and revolute constraints with breakage
//! - **Soft bodies**: deformable rings built from bodies and spring joints
//! - **Observable**: monitor simulation steps via the `StepObserver` trait
//! - **`no_std` compatible**: works in embedded and WASM environments

#![no_std]

extern crate alloc;

pub mod float;
pub mod vec;
pub mod body;
pub mod broadphase;
pub mod manifold;
pub mod detect;
pub mod resolve;
pub mod joint;
pub mod solver;
pub mod world;
pub mod softbody;
pub mod observer;
pub mod config;
pub mod error;

// Re-export primary API
pub use float::Float;
pub use vec::Vec2;
pub use body::{Aabb, RigidBody, Shape};
pub use broadphase::SpatialHash;
pub use manifold::ContactManifold;
pub use detect::detect;
pub use resolve::CollisionResolver;
pub use joint::{DistanceJoint, Joint, RevoluteJoint, SpringJoint};
pub use solver::ConstraintSolver;
pub use world::PhysicsWorld;
pub use softbody::{SoftBody, SoftBodyConfig};
pub use config::PhysicsConfig;
pub use observer::{NoOpStepObserver, StepObserver};
pub use error::PhysicsError;
