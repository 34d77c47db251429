/*
 * Force Module
 *
 * Inverse-square pair force shared by the attraction and repulsion branches
 * of the integrator. Pure functions, no state.
 */

use nannou::prelude::Vec3;

use crate::body::Body;

/// Gravitational constant of the swarm's force field
pub const G: f32 = 5000.0;

/// Force exerted on a body of mass `m1` by a body of mass `m2` at `displacement`
/// (pointing from the first body to the second).
///
/// Magnitude is `G * m1 * m2 / |d|^2`, direction along `d`. Coincident bodies
/// have no defined direction and get a zero force.
#[inline]
pub fn gravity(displacement: Vec3, m1: f32, m2: f32) -> Vec3 {
    let distance_squared = displacement.length_squared();
    if distance_squared <= f32::MIN_POSITIVE {
        return Vec3::ZERO;
    }

    let direction = displacement / distance_squared.sqrt();
    direction * (G * m1 * m2 / distance_squared)
}

/// Force on `a` directed towards `b`
pub fn force_between(a: &Body, b: &Body) -> Vec3 {
    gravity(b.position - a.position, a.mass, b.mass)
}
