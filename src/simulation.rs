/*
 * Simulation Module
 *
 * The simulation side of the swarm: owns the bodies and the writing half of
 * the amplitude slot. Stepping only integrates the bodies; measuring computes
 * the mean pairwise distance and publishes the resulting amplitude. Hosts
 * measure once per frame, after however many steps the frame ran, so the
 * O(n^2) metric never runs more often than the amplitude is read.
 * Positions never leave this side; only the amplitude crosses to the audio
 * context.
 */

use nannou::prelude::Vec3;
use tracing::{debug, info};

use crate::amplitude::AmplitudePublisher;
use crate::body::Body;
use crate::metric;
use crate::params::{LayoutParams, SimulationConfig};
use crate::physics;

// Emit a debug summary every this many measurements
const REPORT_INTERVAL: u64 = 600;

/// What one measurement found
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StepReport {
    /// `None` when the swarm has fewer than two bodies
    pub mean_distance: Option<f32>,
    pub amplitude: f32,
}

pub struct Simulation {
    bodies: Vec<Body>,
    pub config: SimulationConfig,
    layout: LayoutParams,
    amplitude: AmplitudePublisher,
    // Reused position buffer for the distance metric
    positions: Vec<Vec3>,
    steps: u64,
    measurements: u64,
}

impl Simulation {
    pub fn new(layout: LayoutParams, config: SimulationConfig, amplitude: AmplitudePublisher) -> Self {
        let bodies = physics::spawn_ring(&layout);
        info!(bodies = bodies.len(), "simulation created");
        let positions = Vec::with_capacity(bodies.len());
        Self {
            bodies,
            config,
            layout,
            amplitude,
            positions,
            steps: 0,
            measurements: 0,
        }
    }

    /// Start from explicit bodies instead of the ring layout.
    /// `reset` replaces them with a default ring of the same size.
    pub fn from_bodies(bodies: Vec<Body>, config: SimulationConfig, amplitude: AmplitudePublisher) -> Self {
        let layout = LayoutParams {
            count: bodies.len(),
            ..LayoutParams::default()
        };
        let positions = Vec::with_capacity(bodies.len());
        Self {
            bodies,
            config,
            layout,
            amplitude,
            positions,
            steps: 0,
            measurements: 0,
        }
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn layout(&self) -> &LayoutParams {
        &self.layout
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Measurements published so far
    pub fn measurements(&self) -> u64 {
        self.measurements
    }

    /// Integrate one step of length `dt`. Nothing is published.
    pub fn step(&mut self, dt: f32) {
        physics::step_bodies(&mut self.bodies, &self.config, dt);
        self.steps += 1;
    }

    /// Measure the current swarm and publish its amplitude
    pub fn measure(&mut self) -> StepReport {
        self.positions.clear();
        self.positions.extend(self.bodies.iter().map(|b| b.position));

        // Fewer than two bodies: no distance, silence
        let mean_distance = metric::mean_distance(&self.positions, self.config.enable_parallel).ok();
        let amplitude = mean_distance.map_or(0.0, metric::amplitude_for_distance);
        self.amplitude.publish(amplitude);
        self.measurements += 1;

        if self.measurements % REPORT_INTERVAL == 0 {
            debug!(
                steps = self.steps,
                mean_distance = ?mean_distance,
                amplitude,
                "swarm status"
            );
        }

        StepReport {
            mean_distance,
            amplitude,
        }
    }

    /// Restore the initial layout and republish the amplitude
    pub fn reset(&mut self) -> StepReport {
        physics::reset_bodies(&mut self.bodies, &self.layout);
        self.steps = 0;
        info!(bodies = self.bodies.len(), "simulation reset");
        self.measure()
    }
}
