/*
 * Simulation Parameters Module
 *
 * This module defines the parameter structs of the swarm: the force-field
 * configuration that a UI may adjust between steps, the initial layout of
 * the swarm, and the synthesizer settings. It also provides slider ranges
 * and change detection for the configuration.
 */

use std::ops::RangeInclusive;

use crate::DEFAULT_SWARM_SIZE;

/// How `damping_factor` is applied to velocity each step
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DampingMode {
    /// `v *= damping` once per step, whatever the step length
    PerStep,
    /// `v *= damping^(dt / reference_dt)`, independent of frame rate
    Normalized { reference_dt: f32 },
}

impl DampingMode {
    /// Multiplier applied to velocity for a step of length `dt`
    pub fn factor(self, damping: f32, dt: f32) -> f32 {
        match self {
            DampingMode::PerStep => damping,
            DampingMode::Normalized { reference_dt } => {
                if reference_dt > 0.0 {
                    damping.powf(dt / reference_dt)
                } else {
                    damping
                }
            }
        }
    }
}

// Force-field configuration, read-only during a step
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulationConfig {
    pub push_force: f32,
    // Compared against the squared pair distance
    pub push_distance: f32,
    pub max_acceleration: f32,
    pub origin_x: f32,
    pub damping_factor: f32,
    pub cohesion_factor: f32,
    pub move_towards_origin: bool,
    pub move_away_from_origin: bool,
    pub damping_mode: DampingMode,
    pub enable_parallel: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            push_force: 3.0,
            push_distance: 3.0,
            max_acceleration: 2.0,
            origin_x: 0.0,
            damping_factor: 0.99,
            cohesion_factor: 2.0,
            move_towards_origin: true,
            move_away_from_origin: true,
            damping_mode: DampingMode::PerStep,
            enable_parallel: true,
        }
    }
}

impl SimulationConfig {
    // Get parameter ranges for UI sliders
    pub fn get_push_force_range() -> RangeInclusive<f32> {
        0.0..=100.0
    }

    pub fn get_push_distance_range() -> RangeInclusive<f32> {
        0.0..=100.0
    }

    pub fn get_max_acceleration_range() -> RangeInclusive<f32> {
        0.0..=5.0
    }

    pub fn get_origin_x_range() -> RangeInclusive<f32> {
        -50.0..=50.0
    }

    pub fn get_damping_range() -> RangeInclusive<f32> {
        0.0..=1.0
    }

    pub fn get_cohesion_range() -> RangeInclusive<f32> {
        0.0..=10.0
    }
}

/// Remembers the last configuration seen so callers can react to edits
#[derive(Debug, Default)]
pub struct ConfigTracker {
    previous: Option<SimulationConfig>,
}

impl ConfigTracker {
    /// Returns true when `current` differs from the previously observed value.
    /// The first observation only records the snapshot.
    pub fn changed(&mut self, current: &SimulationConfig) -> bool {
        let changed = matches!(self.previous, Some(prev) if prev != *current);
        self.previous = Some(*current);
        changed
    }
}

// Initial conditions of the swarm
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutParams {
    pub count: usize,
    pub radius: f32,
    pub depth_min: f32,
    pub depth_max: f32,
    pub mass: f32,
    pub seed: u64,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            count: DEFAULT_SWARM_SIZE,
            radius: 50.0,
            depth_min: 100.0,
            depth_max: 200.0,
            mass: 1.0,
            seed: 0x5eed,
        }
    }
}

// Oscillator settings, fixed once the audio context is running
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SynthParams {
    pub speed: f32,
    pub sample_rate: f32,
    pub carrier_multiplier: f32,
    pub modulator_multiplier: f32,
    pub channels: usize,
}

impl Default for SynthParams {
    fn default() -> Self {
        Self {
            speed: 1.0,
            sample_rate: 44100.0,
            carrier_multiplier: 1.0,
            modulator_multiplier: 0.5,
            channels: 2,
        }
    }
}

impl SynthParams {
    pub fn get_speed_range() -> RangeInclusive<f32> {
        0.1..=5.0
    }
}
