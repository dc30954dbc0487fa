use rigid2d::{detect, RigidBody, SpatialHash, Vec2};

fn square(half: f32) -> Vec<Vec2<f32>> {
    vec![
        Vec2::new(-half, -half),
        Vec2::new(half, -half),
        Vec2::new(half, half),
        Vec2::new(-half, half),
    ]
}

#[test]
fn circle_circle_reference_numbers() {
    let a = RigidBody::circle(Vec2::new(0.0f32, 0.0), 10.0, 1.0);
    let b = RigidBody::circle(Vec2::new(15.0f32, 0.0), 10.0, 1.0);

    let m = detect(0, 1, &a, &b).expect("radius sum 20 > distance 15");
    assert!((m.penetration - 5.0).abs() < 1e-6);
    assert!((m.normal.x - 1.0).abs() < 1e-6);
    assert!(m.normal.y.abs() < 1e-6);

    let c = RigidBody::circle(Vec2::new(25.0f32, 0.0), 10.0, 1.0);
    assert!(detect(0, 1, &a, &c).is_none(), "distance 25 >= radius sum 20");
}

#[test]
fn sat_squares_overlap_tracks_displacement() {
    let fixed = RigidBody::polygon(Vec2::<f32>::zero(), square(10.0), 1.0).unwrap();

    for displacement in [2.0f32, 8.0, 15.0, 19.5] {
        let moved =
            RigidBody::polygon(Vec2::new(displacement, 0.0), square(10.0), 1.0).unwrap();
        let m = detect(0, 1, &fixed, &moved).expect("squares must overlap");
        let expected = 20.0 - displacement;
        assert!(
            (m.penetration - expected).abs() < 1e-4,
            "displacement {displacement}: expected {expected}, got {}",
            m.penetration
        );
    }

    for displacement in [20.0f32, 25.0, 40.0] {
        let moved =
            RigidBody::polygon(Vec2::new(displacement, 0.0), square(10.0), 1.0).unwrap();
        assert!(detect(0, 1, &fixed, &moved).is_none());
    }
}

#[test]
fn rotated_squares_still_collide() {
    let a = RigidBody::polygon(Vec2::<f32>::zero(), square(10.0), 1.0).unwrap();
    let mut b = RigidBody::polygon(Vec2::new(14.0f32, 0.0), square(10.0), 1.0).unwrap();
    b.set_angle(std::f32::consts::FRAC_PI_4);

    // Rotated square's corner reaches ~14.14 back toward the origin.
    let m = detect(0, 1, &a, &b).expect("corner overlaps edge");
    assert!(m.penetration > 0.0);
    assert!(m.normal.x > 0.0, "normal should point from a toward b");
}

#[test]
fn circle_against_triangle() {
    let triangle = RigidBody::polygon(
        Vec2::<f32>::zero(),
        vec![Vec2::new(-10.0, 0.0), Vec2::new(10.0, 0.0), Vec2::new(0.0, 15.0)],
        1.0,
    )
    .unwrap();
    let circle = RigidBody::circle(Vec2::new(0.0f32, -3.0), 5.0, 1.0);

    let m = detect(0, 1, &circle, &triangle).expect("circle overlaps bottom edge");
    assert!((m.penetration - 2.0).abs() < 1e-4);
    // Normal points from the circle up into the triangle.
    assert!(m.normal.y > 0.0);
}

#[test]
fn spatial_hash_reference_scenario() {
    let bodies = vec![
        RigidBody::circle(Vec2::new(25.0f32, 25.0), 30.0, 1.0),
        RigidBody::circle(Vec2::new(75.0f32, 25.0), 30.0, 1.0),
        RigidBody::circle(Vec2::new(400.0f32, 400.0), 30.0, 1.0),
    ];
    let mut hash = SpatialHash::new(50.0f32);
    hash.rebuild(&bodies);

    let pairs = hash.potential_pairs();
    assert!(pairs.contains(&(0, 1)), "neighbors must be candidates");
    for &(a, b) in &pairs {
        assert!(a != 2 && b != 2, "distant body must not appear in any pair");
    }
}

#[test]
fn broad_and_narrow_phase_agree() {
    // Broad-phase candidates that fail narrow phase: close cells but no
    // geometric overlap.
    let bodies = vec![
        RigidBody::circle(Vec2::new(10.0f32, 10.0), 8.0, 1.0),
        RigidBody::circle(Vec2::new(40.0f32, 10.0), 8.0, 1.0),
    ];
    let mut hash = SpatialHash::new(50.0f32);
    hash.rebuild(&bodies);

    assert_eq!(hash.potential_pairs(), vec![(0, 1)]);
    assert!(detect(0, 1, &bodies[0], &bodies[1]).is_none());
}
