/*
 * Body Module
 *
 * This module defines the Body struct, one point mass of the swarm.
 * Acceleration is derived state: it is zeroed and rebuilt on every
 * integration step, then capped and folded into velocity and position.
 */

use nannou::prelude::Vec3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Body {
    pub position: Vec3,
    pub velocity: Vec3,
    pub acceleration: Vec3,
    pub mass: f32,
}

impl Body {
    pub fn new(position: Vec3, velocity: Vec3, mass: f32) -> Self {
        Self {
            position,
            velocity,
            acceleration: Vec3::ZERO,
            mass,
        }
    }

    // Accumulate an acceleration contribution
    pub fn apply_force(&mut self, acceleration: Vec3) {
        self.acceleration += acceleration;
    }

    /// Caps the acceleration magnitude at `max_acceleration`, keeping its direction.
    ///
    /// A negative cap is treated as zero and a non-finite acceleration (from a
    /// degenerate pair) is dropped, so the result always satisfies
    /// `|a| <= max(max_acceleration, 0)`.
    pub fn clamp_acceleration(&mut self, max_acceleration: f32) {
        if !self.acceleration.is_finite() {
            self.acceleration = Vec3::ZERO;
            return;
        }

        let cap = max_acceleration.max(0.0);
        let length_squared = self.acceleration.length_squared();
        if length_squared > cap * cap {
            let length = length_squared.sqrt();
            self.acceleration *= cap / length;
        }
    }

    // Semi-implicit Euler: velocity first, then damping, then position
    pub fn integrate(&mut self, dt: f32, damping: f32) {
        self.velocity += self.acceleration * dt;
        self.velocity *= damping;
        self.position += self.velocity * dt;
    }
}
