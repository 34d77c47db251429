use nannou::prelude::{vec3, Vec3};
use sonic_boids::force::{self, G};
use sonic_boids::physics::{origin_force, spawn_ring, step_bodies, ORIGIN_DRIFT};
use sonic_boids::{
    amplitude_channel, Body, DampingMode, LayoutParams, Simulation, SimulationConfig, StepReport,
};

const DT: f32 = 1.0 / 60.0;

/// Two unit-mass bodies at rest, `distance` apart along x
fn two_bodies(distance: f32) -> Vec<Body> {
    vec![
        Body::new(Vec3::ZERO, Vec3::ZERO, 1.0),
        Body::new(vec3(distance, 0.0, 0.0), Vec3::ZERO, 1.0),
    ]
}

/// Pair forces only: no origin terms, no damping, a cap out of the way
fn pair_only_config(push_distance: f32) -> SimulationConfig {
    SimulationConfig {
        push_force: 2.0,
        push_distance,
        max_acceleration: 1.0e6,
        origin_x: 0.0,
        damping_factor: 1.0,
        cohesion_factor: 1.0,
        move_towards_origin: false,
        move_away_from_origin: false,
        damping_mode: DampingMode::PerStep,
        enable_parallel: false,
    }
}

fn assert_vec_close(actual: Vec3, expected: Vec3, tolerance: f32) {
    assert!(
        (actual - expected).length() <= tolerance,
        "expected {expected:?}, got {actual:?}"
    );
}

// ==================================================================================
// Force model
// ==================================================================================

#[test]
fn force_follows_inverse_square_law() {
    let bodies = two_bodies(10.0);
    let f = force::force_between(&bodies[0], &bodies[1]);
    assert_vec_close(f, vec3(G / 100.0, 0.0, 0.0), 1e-3);

    let heavy = Body::new(vec3(0.0, 20.0, 0.0), Vec3::ZERO, 3.0);
    let f = force::force_between(&bodies[0], &heavy);
    assert_vec_close(f, vec3(0.0, G * 3.0 / 400.0, 0.0), 1e-3);
}

#[test]
fn force_is_antisymmetric() {
    let a = Body::new(vec3(1.0, 2.0, 3.0), Vec3::ZERO, 2.0);
    let b = Body::new(vec3(-4.0, 0.5, 7.0), Vec3::ZERO, 5.0);
    let ab = force::force_between(&a, &b);
    let ba = force::force_between(&b, &a);
    assert_vec_close(ab, -ba, 1e-4);
}

// ==================================================================================
// Pair branches
// ==================================================================================

#[test]
fn distant_pair_attracts_with_expected_magnitude() {
    // distance^2 = 100 > push_distance = 4: attraction, 5000 * 1 * 1 / 100 = 50
    let mut bodies = two_bodies(10.0);
    step_bodies(&mut bodies, &pair_only_config(4.0), DT);

    assert_vec_close(bodies[0].acceleration, vec3(50.0, 0.0, 0.0), 1e-3);
    assert_vec_close(bodies[1].acceleration, vec3(-50.0, 0.0, 0.0), 1e-3);
}

#[test]
fn close_pair_repels() {
    let mut bodies = two_bodies(1.0);
    let config = pair_only_config(4.0);
    step_bodies(&mut bodies, &config, DT);

    // Pointing away from each other along the connecting axis
    assert!(bodies[0].acceleration.x < 0.0);
    assert!(bodies[1].acceleration.x > 0.0);
    assert_vec_close(bodies[0].acceleration, -bodies[1].acceleration, 1e-2);

    let expected = G * config.push_force;
    assert!((bodies[1].acceleration.x - expected).abs() / expected < 1e-5);
}

#[test]
fn boundary_distance_attracts() {
    // distance^2 == push_distance exactly
    let mut bodies = two_bodies(2.0);
    step_bodies(&mut bodies, &pair_only_config(4.0), DT);

    assert!(bodies[0].acceleration.x > 0.0);
    assert!(bodies[1].acceleration.x < 0.0);
}

#[test]
fn mass_scales_each_side_separately() {
    let mut bodies = vec![
        Body::new(Vec3::ZERO, Vec3::ZERO, 1.0),
        Body::new(vec3(10.0, 0.0, 0.0), Vec3::ZERO, 4.0),
    ];
    step_bodies(&mut bodies, &pair_only_config(4.0), DT);

    // Force is 5000 * 4 / 100 = 200, divided by each body's own mass
    assert_vec_close(bodies[0].acceleration, vec3(200.0, 0.0, 0.0), 1e-2);
    assert_vec_close(bodies[1].acceleration, vec3(-50.0, 0.0, 0.0), 1e-2);
}

#[test]
fn parallel_accumulation_matches_sequential() {
    let layout = LayoutParams {
        count: 64,
        ..LayoutParams::default()
    };
    let sequential_config = SimulationConfig {
        enable_parallel: false,
        max_acceleration: 1.0e6,
        ..SimulationConfig::default()
    };
    let parallel_config = SimulationConfig {
        enable_parallel: true,
        ..sequential_config
    };

    let mut sequential = spawn_ring(&layout);
    let mut parallel = spawn_ring(&layout);
    step_bodies(&mut sequential, &sequential_config, DT);
    step_bodies(&mut parallel, &parallel_config, DT);

    for (s, p) in sequential.iter().zip(parallel.iter()) {
        let scale = s.acceleration.length().max(1.0);
        assert!((s.acceleration - p.acceleration).length() / scale < 1e-2);
        assert_vec_close(s.position, p.position, 1e-3);
    }
}

// ==================================================================================
// Acceleration cap
// ==================================================================================

#[test]
fn acceleration_never_exceeds_cap() {
    let layout = LayoutParams {
        count: 40,
        radius: 3.0,
        ..LayoutParams::default()
    };

    for &(push_force, push_distance, max_acceleration, cohesion) in &[
        (3.0, 3.0, 2.0, 2.0),
        (100.0, 100.0, 0.5, 10.0),
        (0.0, 0.0, 5.0, 0.0),
        (50.0, 9.0, 0.01, 1.0),
    ] {
        for &parallel in &[false, true] {
            let config = SimulationConfig {
                push_force,
                push_distance,
                max_acceleration,
                cohesion_factor: cohesion,
                enable_parallel: parallel,
                ..SimulationConfig::default()
            };
            let mut bodies = spawn_ring(&layout);
            for _ in 0..5 {
                step_bodies(&mut bodies, &config, DT);
                for body in &bodies {
                    assert!(body.acceleration.length() <= max_acceleration * (1.0 + 1e-5));
                }
            }
        }
    }
}

#[test]
fn negative_cap_means_no_acceleration() {
    let mut bodies = two_bodies(10.0);
    let config = SimulationConfig {
        max_acceleration: -1.0,
        ..pair_only_config(4.0)
    };
    step_bodies(&mut bodies, &config, DT);
    assert_eq!(bodies[0].acceleration, Vec3::ZERO);
    assert_eq!(bodies[1].acceleration, Vec3::ZERO);
}

#[test]
fn coincident_bodies_stay_finite() {
    let mut bodies = vec![
        Body::new(vec3(1.0, 1.0, 1.0), Vec3::ZERO, 1.0),
        Body::new(vec3(1.0, 1.0, 1.0), Vec3::ZERO, 1.0),
    ];
    step_bodies(&mut bodies, &SimulationConfig::default(), DT);

    for body in &bodies {
        assert!(body.position.is_finite());
        assert!(body.velocity.is_finite());
        assert!(body.acceleration.is_finite());
    }
}

// ==================================================================================
// Integration and damping
// ==================================================================================

#[test]
fn undamped_free_body_keeps_velocity() {
    let velocity = vec3(1.0, -2.0, 0.5);
    let mut bodies = vec![Body::new(vec3(3.0, 4.0, 5.0), velocity, 1.0)];
    step_bodies(&mut bodies, &pair_only_config(4.0), 0.5);

    assert_eq!(bodies[0].velocity, velocity);
    assert_vec_close(bodies[0].position, vec3(3.5, 3.0, 5.25), 1e-6);
}

#[test]
fn damping_shrinks_speed_without_forces() {
    let mut bodies = vec![Body::new(Vec3::ZERO, vec3(4.0, 0.0, 3.0), 1.0)];
    let config = SimulationConfig {
        damping_factor: 0.9,
        ..pair_only_config(4.0)
    };

    let mut previous = bodies[0].velocity.length();
    for _ in 0..10 {
        step_bodies(&mut bodies, &config, DT);
        let speed = bodies[0].velocity.length();
        assert!(speed < previous);
        previous = speed;
    }
    assert!((previous - 5.0 * 0.9f32.powi(10)).abs() < 1e-4);
}

#[test]
fn normalized_damping_is_independent_of_step_count() {
    let config = SimulationConfig {
        damping_factor: 0.9,
        damping_mode: DampingMode::Normalized { reference_dt: DT },
        ..pair_only_config(4.0)
    };

    let mut coarse = vec![Body::new(Vec3::ZERO, vec3(1.0, 0.0, 0.0), 1.0)];
    let mut fine = coarse.clone();
    step_bodies(&mut coarse, &config, DT);
    step_bodies(&mut fine, &config, DT / 4.0);
    step_bodies(&mut fine, &config, DT / 4.0);
    step_bodies(&mut fine, &config, DT / 4.0);
    step_bodies(&mut fine, &config, DT / 4.0);

    assert!((coarse[0].velocity.x - fine[0].velocity.x).abs() < 1e-5);
}

// ==================================================================================
// Origin terms
// ==================================================================================

#[test]
fn origin_terms_follow_toggles() {
    let base = SimulationConfig {
        push_force: 3.0,
        origin_x: 0.0,
        move_towards_origin: false,
        move_away_from_origin: false,
        ..SimulationConfig::default()
    };
    let far = vec3(10.0, 0.0, 0.0);

    assert_eq!(origin_force(far, &base), Vec3::ZERO);

    // Unit vector towards the origin is -x, subtracted with weight clamp(0.2, 0.5, 2)
    let towards = SimulationConfig {
        move_towards_origin: true,
        ..base
    };
    assert_vec_close(origin_force(far, &towards), vec3(0.5, 0.0, 0.0), 1e-6);

    let away = SimulationConfig {
        move_away_from_origin: true,
        ..base
    };
    assert_vec_close(origin_force(far, &away), vec3(ORIGIN_DRIFT, 0.0, 0.0), 1e-6);

    // Inside the push radius the outward term is push_force * 2
    let near = vec3(0.0, 2.0, 0.0);
    assert_vec_close(origin_force(near, &away), vec3(0.0, 6.0, 0.0), 1e-5);

    let both = SimulationConfig {
        move_towards_origin: true,
        move_away_from_origin: true,
        ..base
    };
    let sum = origin_force(far, &towards) + origin_force(far, &away);
    assert_vec_close(origin_force(far, &both), sum, 1e-6);
}

#[test]
fn origin_follows_origin_x() {
    let config = SimulationConfig {
        origin_x: -20.0,
        move_towards_origin: false,
        move_away_from_origin: true,
        ..SimulationConfig::default()
    };
    let f = origin_force(vec3(-20.0, 0.0, 30.0), &config);
    assert_vec_close(f, vec3(0.0, 0.0, ORIGIN_DRIFT), 1e-6);
}

// ==================================================================================
// Initial layout
// ==================================================================================

#[test]
fn ring_layout_is_distinct_and_seeded() {
    let layout = LayoutParams::default();
    let bodies = spawn_ring(&layout);
    assert_eq!(bodies.len(), layout.count);

    for (i, body) in bodies.iter().enumerate() {
        let radial = body.position.truncate().length();
        assert!((radial - layout.radius).abs() < 1e-3);
        assert!(body.position.z >= layout.depth_min && body.position.z < layout.depth_max);
        assert!((body.velocity.length() - layout.radius / 10.0).abs() < 1e-3);
        assert_eq!(body.velocity.z, 0.0);
        assert_eq!(body.mass, layout.mass);
        assert_eq!(body.acceleration, Vec3::ZERO);

        for other in &bodies[i + 1..] {
            assert!(body.position.distance_squared(other.position) > 0.0);
        }
    }

    assert_eq!(bodies, spawn_ring(&layout));

    let reseeded = spawn_ring(&LayoutParams {
        seed: layout.seed + 1,
        ..layout.clone()
    });
    assert_ne!(bodies, reseeded);
}

// ==================================================================================
// Simulation
// ==================================================================================

#[test]
fn steps_publish_nothing_until_measured() {
    let (publisher, reader) = amplitude_channel();
    let layout = LayoutParams {
        count: 16,
        ..LayoutParams::default()
    };
    let mut simulation = Simulation::new(layout, SimulationConfig::default(), publisher);

    for _ in 0..8 {
        simulation.step(DT);
    }
    assert_eq!(simulation.steps(), 8);
    assert_eq!(simulation.measurements(), 0);
    assert_eq!(reader.load(), 0.0);

    let report = simulation.measure();
    assert_eq!(simulation.measurements(), 1);
    assert!(report.mean_distance.is_some());
    assert!(report.amplitude > 0.0);
    assert_eq!(reader.load(), report.amplitude);
}

#[test]
fn single_body_simulation_is_silent() {
    let (publisher, reader) = amplitude_channel();
    let body = Body::new(vec3(10.0, 0.0, 0.0), vec3(0.0, 1.0, 0.0), 1.0);
    let mut simulation = Simulation::from_bodies(vec![body], SimulationConfig::default(), publisher);

    simulation.step(DT);
    let report = simulation.measure();
    assert_eq!(
        report,
        StepReport {
            mean_distance: None,
            amplitude: 0.0,
        }
    );
    assert_eq!(reader.load(), 0.0);
    assert!(simulation.bodies()[0].position.is_finite());
}

#[test]
fn reset_restores_the_ring() {
    let (publisher, reader) = amplitude_channel();
    let layout = LayoutParams {
        count: 12,
        ..LayoutParams::default()
    };
    let mut simulation = Simulation::new(layout, SimulationConfig::default(), publisher);
    let initial = simulation.bodies().to_vec();

    for _ in 0..30 {
        simulation.step(DT);
    }
    assert_ne!(simulation.bodies(), &initial[..]);

    let report = simulation.reset();
    assert_eq!(simulation.bodies(), &initial[..]);
    assert_eq!(simulation.steps(), 0);
    assert_eq!(reader.load(), report.amplitude);
}

#[test]
fn explicit_bodies_reset_to_a_ring_of_the_same_size() {
    let (publisher, _reader) = amplitude_channel();
    let mut simulation = Simulation::from_bodies(two_bodies(4.0), SimulationConfig::default(), publisher);
    assert_eq!(simulation.layout().count, 2);

    simulation.reset();
    let expected = spawn_ring(&LayoutParams {
        count: 2,
        ..LayoutParams::default()
    });
    assert_eq!(simulation.bodies(), &expected[..]);
}
