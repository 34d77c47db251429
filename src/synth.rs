/*
 * Synth Module
 *
 * Two summed sinusoids on a shared phase accumulator, scaled by the
 * amplitude the simulation publishes. Runs inside the audio callback:
 * no allocation, no locks, cost independent of the swarm size.
 */

use std::f64::consts::TAU;

use crate::amplitude::AmplitudeReader;
use crate::params::SynthParams;

/// Two-oscillator wave: `sin(phase * carrier) + sin(phase * modulator)`
#[inline]
pub fn fm(phase: f64, carrier_multiplier: f32, modulator_multiplier: f32) -> f32 {
    ((phase * carrier_multiplier as f64).sin() + (phase * modulator_multiplier as f64).sin()) as f32
}

pub struct Synth {
    params: SynthParams,
    // Kept in [0, 2*pi) after every sample
    phase: f64,
    phase_increment: f64,
    amplitude: AmplitudeReader,
}

impl Synth {
    pub fn new(params: SynthParams, amplitude: AmplitudeReader) -> Self {
        let phase_increment = TAU * params.speed as f64 / params.sample_rate as f64;
        // Zero or non-finite sample rate: hold the phase, render silence
        let phase_increment = if phase_increment.is_finite() {
            phase_increment
        } else {
            0.0
        };
        Self {
            params,
            phase: 0.0,
            phase_increment,
            amplitude,
        }
    }

    pub fn params(&self) -> &SynthParams {
        &self.params
    }

    pub fn phase(&self) -> f64 {
        self.phase
    }

    /// Latest published amplitude
    pub fn amplitude(&self) -> f32 {
        self.amplitude.load()
    }

    /// One mono sample, reading the amplitude for this sample only
    pub fn next_sample(&mut self) -> f32 {
        let amplitude = self.amplitude.load();
        self.render(amplitude)
    }

    /// Fill an interleaved buffer, duplicating each mono sample across
    /// `channels`. The amplitude is read once for the whole buffer; a
    /// trailing partial frame is zeroed, as is the whole buffer when
    /// `channels` is 0.
    pub fn fill_interleaved(&mut self, out: &mut [f32], channels: usize) {
        if channels == 0 {
            out.fill(0.0);
            return;
        }

        let amplitude = self.amplitude.load();
        let mut frames = out.chunks_exact_mut(channels);
        for frame in &mut frames {
            let sample = self.render(amplitude);
            frame.fill(sample);
        }
        frames.into_remainder().fill(0.0);
    }

    #[inline]
    fn render(&mut self, amplitude: f32) -> f32 {
        self.phase += self.phase_increment;

        let wave = fm(
            self.phase,
            self.params.carrier_multiplier,
            self.params.modulator_multiplier,
        );
        let sample = amplitude * wave;

        // Equivalent to `phase -= 2*pi` while the increment stays below 2*pi;
        // negative speeds wrap from below
        if !(0.0..TAU).contains(&self.phase) {
            self.phase = self.phase.rem_euclid(TAU);
        }

        sample
    }
}
