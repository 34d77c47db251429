/*
 * Physics Module
 *
 * This module handles the n-body integration of the swarm.
 * Every step rebuilds each body's acceleration from:
 * - the pairwise force field (attraction beyond the push distance,
 *   repulsion inside it)
 * - the origin terms toggled in the configuration
 * then caps it and integrates velocity (with damping) and position.
 *
 * Pairs are evaluated brute force, O(n^2). With parallel processing enabled
 * each body sums its own row of the pair matrix on the rayon pool.
 */

use nannou::prelude::{vec3, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use std::f32::consts::TAU;
use tracing::debug;

use crate::body::Body;
use crate::force;
use crate::params::{LayoutParams, SimulationConfig};

/// Inside this distance from the origin the outward push uses `push_force * 2`
pub const ORIGIN_PUSH_RADIUS: f32 = 5.0;

/// Constant outward push applied beyond `ORIGIN_PUSH_RADIUS`
pub const ORIGIN_DRIFT: f32 = 0.5;

/// Build the ring initial condition.
///
/// Body `i` sits at angle `2*pi*i/n` on a circle of `radius` in the xy plane,
/// at a seeded random depth in `[depth_min, depth_max)`, and starts with a
/// rotating velocity of magnitude `radius / 10`.
pub fn spawn_ring(layout: &LayoutParams) -> Vec<Body> {
    let mut rng = StdRng::seed_from_u64(layout.seed);
    let n = layout.count;
    let r = layout.radius;

    let bodies: Vec<Body> = (0..n)
        .map(|i| {
            let angle = TAU / n as f32 * i as f32;
            let depth = if layout.depth_max > layout.depth_min {
                rng.gen_range(layout.depth_min..layout.depth_max)
            } else {
                layout.depth_min
            };
            let position = vec3(r * angle.cos(), r * angle.sin(), depth);

            let spin = TAU / 3.0 * i as f32;
            let velocity = vec3(r / 10.0 * spin.sin(), r / 10.0 * spin.cos(), 0.0);

            Body::new(position, velocity, layout.mass)
        })
        .collect();

    debug!(count = n, radius = r, seed = layout.seed, "spawned ring layout");
    bodies
}

// Reset bodies to the initial layout, resizing if the count changed
pub fn reset_bodies(bodies: &mut Vec<Body>, layout: &LayoutParams) {
    bodies.clear();
    bodies.extend(spawn_ring(layout));
}

/// Origin term for a body at `position`.
///
/// `move_towards_origin` subtracts the unit vector towards `(origin_x, 0, 0)`
/// scaled by `clamp(2 / distance, 0.5, 2)`. `move_away_from_origin` adds the
/// outward unit vector scaled by `push_force * 2` inside `ORIGIN_PUSH_RADIUS`
/// and by `ORIGIN_DRIFT` outside it. Both toggles sum.
pub fn origin_force(position: Vec3, config: &SimulationConfig) -> Vec3 {
    let origin = vec3(config.origin_x, 0.0, 0.0);
    let towards = origin - position;
    let distance = towards.length();

    // A body sitting on the origin has no direction to follow
    let towards_dir = if distance > f32::MIN_POSITIVE {
        towards / distance
    } else {
        Vec3::ZERO
    };

    let mut acceleration = Vec3::ZERO;

    if config.move_towards_origin {
        acceleration -= towards_dir * (2.0 / distance).clamp(0.5, 2.0);
    }

    if config.move_away_from_origin {
        let away_dir = -towards_dir;
        if distance < ORIGIN_PUSH_RADIUS {
            acceleration += away_dir * config.push_force * 2.0;
        } else {
            acceleration += away_dir * ORIGIN_DRIFT;
        }
    }

    acceleration
}

/// Advance every body by one step of length `dt`.
pub fn step_bodies(bodies: &mut [Body], config: &SimulationConfig, dt: f32) {
    for body in bodies.iter_mut() {
        body.acceleration = Vec3::ZERO;
    }

    if config.enable_parallel {
        accumulate_pair_forces_parallel(bodies, config);
    } else {
        accumulate_pair_forces(bodies, config);
    }

    let damping = config.damping_mode.factor(config.damping_factor, dt);

    for body in bodies.iter_mut() {
        let origin = origin_force(body.position, config);
        body.apply_force(origin);
        body.clamp_acceleration(config.max_acceleration);
        body.integrate(dt, damping);
    }
}

// Each unordered pair once, Newton's third law with per-body 1/mass scaling
fn accumulate_pair_forces(bodies: &mut [Body], config: &SimulationConfig) {
    let n = bodies.len();

    for i in 0..n {
        for j in (i + 1)..n {
            let displacement = bodies[j].position - bodies[i].position;
            let m1 = bodies[i].mass;
            let m2 = bodies[j].mass;

            let gravity = force::gravity(displacement, m1, m2);

            // Strict test: the boundary belongs to attraction
            if displacement.length_squared() > config.push_distance {
                bodies[i].apply_force(gravity / m1 * config.cohesion_factor);
                bodies[j].apply_force(-(gravity / m2 * config.cohesion_factor));
            } else {
                bodies[i].apply_force(-(gravity / m1 * config.push_force));
                bodies[j].apply_force(gravity / m2 * config.push_force);
            }
        }
    }
}

// Row-wise variant: every body sums the whole pair matrix row on its own
fn accumulate_pair_forces_parallel(bodies: &mut [Body], config: &SimulationConfig) {
    let snapshot: Vec<(Vec3, f32)> = bodies.iter().map(|b| (b.position, b.mass)).collect();

    // Chunked to keep the number of rayon tasks close to the thread count
    let chunk_size = std::cmp::max(bodies.len() / rayon::current_num_threads(), 1);

    bodies
        .par_chunks_mut(chunk_size)
        .enumerate()
        .for_each(|(chunk_idx, chunk)| {
            for (i_in_chunk, body) in chunk.iter_mut().enumerate() {
                let i = chunk_idx * chunk_size + i_in_chunk;
                let mut acceleration = Vec3::ZERO;

                for (j, &(position, mass)) in snapshot.iter().enumerate() {
                    if i == j {
                        continue;
                    }

                    let displacement = position - body.position;
                    let gravity = force::gravity(displacement, body.mass, mass);

                    let scale = if displacement.length_squared() > config.push_distance {
                        config.cohesion_factor
                    } else {
                        -config.push_force
                    };
                    acceleration += gravity / body.mass * scale;
                }

                body.apply_force(acceleration);
            }
        });
}
