/*
 * Clock Module
 *
 * The two periodic drivers of the swarm and the flag that stops them.
 * - SimulationClock: frame-rate loop on its own thread, steps the simulation
 * - AudioClock: called once per output buffer from the audio callback
 * - FixedTimestep: accumulator for hosts that already own a frame loop
 *
 * The clocks never wait on each other. Each checks its own liveness flag
 * before every cycle, so either side can be torn down alone.
 */

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::info;

use crate::error::{Result, SwarmError};
use crate::simulation::{Simulation, StepReport};
use crate::synth::Synth;

/// Shared run/stop flag for one execution context
#[derive(Clone, Debug)]
pub struct Liveness(Arc<AtomicBool>);

impl Default for Liveness {
    fn default() -> Self {
        Self::new()
    }
}

impl Liveness {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    pub fn stop(&self) {
        self.0.store(false, Ordering::Release);
    }

    pub fn resume(&self) {
        self.0.store(true, Ordering::Release);
    }
}

/// Fixed timestep accumulator: turns variable frame times into a whole
/// number of equal physics steps.
#[derive(Debug)]
pub struct FixedTimestep {
    step: Duration,
    accumulator: Duration,
    max_steps: usize,
}

impl FixedTimestep {
    pub fn new(rate_hz: f32, max_steps: usize) -> Self {
        Self {
            step: Duration::from_secs_f32(1.0 / rate_hz.max(1.0)),
            accumulator: Duration::ZERO,
            max_steps: max_steps.max(1),
        }
    }

    pub fn set_rate(&mut self, rate_hz: f32) {
        self.step = Duration::from_secs_f32(1.0 / rate_hz.max(1.0));
    }

    /// Length of one step in seconds
    pub fn dt(&self) -> f32 {
        self.step.as_secs_f32()
    }

    /// Add `elapsed` and return how many steps are due. Time beyond
    /// `max_steps` steps is dropped so a long stall cannot snowball.
    pub fn advance(&mut self, elapsed: Duration) -> usize {
        self.accumulator += elapsed;

        let mut steps = 0;
        while self.accumulator >= self.step && steps < self.max_steps {
            self.accumulator -= self.step;
            steps += 1;
        }

        if steps == self.max_steps && self.accumulator >= self.step {
            self.accumulator = Duration::ZERO;
        }

        steps
    }
}

/// Drives a `Simulation` from a dedicated thread at a target frame rate
#[derive(Debug)]
pub struct SimulationClock {
    pub frame_interval: Duration,
    // Upper bound on the measured dt handed to a step
    pub max_dt: f32,
    liveness: Liveness,
}

impl SimulationClock {
    pub fn new(frame_interval: Duration, liveness: Liveness) -> Self {
        Self {
            frame_interval,
            max_dt: 0.1,
            liveness,
        }
    }

    pub fn liveness(&self) -> &Liveness {
        &self.liveness
    }

    /// Run the simulation until the liveness flag is cleared, then hand it back.
    ///
    /// Each cycle steps once with the measured frame time (capped at
    /// `max_dt`), measures once, and passes the simulation and its report to
    /// `on_frame`, which is where a renderer reads positions. Keep
    /// `frame_interval` at or above the audio buffer period.
    pub fn spawn<F>(self, mut simulation: Simulation, mut on_frame: F) -> Result<JoinHandle<Simulation>>
    where
        F: FnMut(&Simulation, &StepReport) + Send + 'static,
    {
        thread::Builder::new()
            .name("simulation".into())
            .spawn(move || {
                info!(interval = ?self.frame_interval, "simulation clock started");
                let mut last = Instant::now();

                while self.liveness.is_alive() {
                    let frame_start = Instant::now();
                    let dt = frame_start.duration_since(last).as_secs_f32().min(self.max_dt);
                    last = frame_start;

                    simulation.step(dt);
                    let report = simulation.measure();
                    on_frame(&simulation, &report);

                    if let Some(remaining) = self.frame_interval.checked_sub(frame_start.elapsed()) {
                        thread::sleep(remaining);
                    }
                }

                info!(steps = simulation.steps(), "simulation clock stopped");
                simulation
            })
            .map_err(|source| SwarmError::Spawn {
                name: "simulation",
                source,
            })
    }
}

/// Per-buffer driver for the synthesizer, owned by the audio callback
#[derive(Debug)]
pub struct AudioClock {
    liveness: Liveness,
    buffers: u64,
}

impl AudioClock {
    pub fn new(liveness: Liveness) -> Self {
        Self { liveness, buffers: 0 }
    }

    /// Buffers rendered so far (silent buffers excluded)
    pub fn buffers(&self) -> u64 {
        self.buffers
    }

    /// Render one interleaved buffer. When stopped, writes silence and
    /// leaves the synthesizer untouched. Returns whether audio was rendered.
    pub fn process(&mut self, synth: &mut Synth, out: &mut [f32], channels: usize) -> bool {
        if !self.liveness.is_alive() {
            out.fill(0.0);
            return false;
        }

        synth.fill_interleaved(out, channels);
        self.buffers += 1;
        true
    }
}
