use rigid2d::{
    NoOpStepObserver, PhysicsConfig, PhysicsWorld, RigidBody, SoftBody, SoftBodyConfig,
    StepObserver, Vec2,
};

#[derive(Default)]
struct CountingObserver {
    broad_phases: usize,
    candidates: usize,
    contacts: usize,
    steps: usize,
}

impl StepObserver for CountingObserver {
    fn on_broad_phase(&mut self, candidates: usize) {
        self.broad_phases += 1;
        self.candidates += candidates;
    }
    fn on_contacts_resolved(&mut self, contacts: usize) {
        self.contacts += contacts;
    }
    fn on_step_complete(&mut self) {
        self.steps += 1;
    }
}

#[test]
fn observer_sees_candidates_and_contacts() {
    let mut world = PhysicsWorld::new(PhysicsConfig::<f32>::new());
    world.add_body(RigidBody::circle(Vec2::new(0.0, 0.0), 10.0, 1.0));
    world.add_body(
        RigidBody::circle(Vec2::new(15.0, 0.0), 10.0, 1.0)
            .with_velocity(Vec2::new(-1.0, 0.0)),
    );

    let mut observer = CountingObserver::default();
    world.step(1.0 / 60.0, &mut observer);

    assert_eq!(observer.broad_phases, 1);
    assert_eq!(observer.candidates, 1);
    assert_eq!(observer.contacts, 1);
    assert_eq!(observer.steps, 1);
}

#[test]
fn colliding_circles_end_up_separated() {
    let mut world = PhysicsWorld::new(PhysicsConfig::<f32>::new());
    let a = world.add_body(
        RigidBody::circle(Vec2::new(0.0, 0.0), 10.0, 1.0)
            .with_velocity(Vec2::new(20.0, 0.0))
            .with_restitution(0.5),
    );
    let b = world.add_body(
        RigidBody::circle(Vec2::new(25.0, 0.0), 10.0, 1.0).with_restitution(0.5),
    );

    for _ in 0..120 {
        world.step(1.0 / 60.0, &mut NoOpStepObserver);
    }

    let distance = world.body(a).position.distance(world.body(b).position);
    assert!(distance >= 20.0 - 0.5, "circles should separate, distance {distance}");
    // The hit transferred momentum to b.
    assert!(world.body(b).velocity.x > 0.0);
}

#[test]
fn soft_body_survives_drop_onto_floor() {
    let config = PhysicsConfig::new().with_gravity(Vec2::new(0.0f32, -100.0));
    let mut world = PhysicsWorld::new(config);

    let floor_vertices = vec![
        Vec2::new(-200.0f32, -10.0),
        Vec2::new(200.0, -10.0),
        Vec2::new(200.0, 10.0),
        Vec2::new(-200.0, 10.0),
    ];
    world.add_body(
        RigidBody::polygon(Vec2::new(0.0, -10.0), floor_vertices, 1.0)
            .unwrap()
            .make_static()
            .with_restitution(0.1),
    );

    let blob_config = SoftBodyConfig {
        segments: 8,
        spring_constant: 200.0,
        damping: 10.0,
        ..Default::default()
    };
    let blob = SoftBody::circle(&mut world, Vec2::new(0.0, 60.0), 15.0, &blob_config).unwrap();

    for _ in 0..300 {
        world.step(1.0 / 60.0, &mut NoOpStepObserver);
    }

    // The blob should have landed (center dropped) without collapsing:
    // every perimeter body sits above the floor surface.
    let center = blob.center(&world);
    assert!(center.y < 60.0);
    for &handle in &blob.bodies {
        assert!(
            world.body(handle).position.y > -1.0,
            "perimeter body sank into the floor"
        );
    }
}

#[test]
fn pinned_soft_body_point_stays_put() {
    let config = PhysicsConfig::new().with_gravity(Vec2::new(0.0f32, -50.0));
    let mut world = PhysicsWorld::new(config);

    let blob = SoftBody::circle(
        &mut world,
        Vec2::new(0.0, 0.0),
        20.0,
        &SoftBodyConfig::default(),
    )
    .unwrap();
    blob.pin(&mut world, 0);
    let pinned = blob.bodies[0];
    let anchor_pos = world.body(pinned).position;

    for _ in 0..120 {
        world.step(1.0 / 60.0, &mut NoOpStepObserver);
    }

    assert_eq!(world.body(pinned).position, anchor_pos);
    // The rest of the blob hangs below its original position.
    let center = blob.center(&world);
    assert!(center.y < 0.0);
}
