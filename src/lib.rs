/*
 * Sonic Boids - Module Definitions
 *
 * A swarm of point masses under an attraction/repulsion force field whose
 * mean pairwise distance drives the amplitude of a real-time synthesizer.
 * The simulation and the audio callback run in separate contexts and share
 * only that amplitude, through a lock-free slot.
 */

// Re-export key components for easier access
pub use amplitude::{amplitude_channel, AmplitudePublisher, AmplitudeReader};
pub use audio::AudioOutput;
pub use body::Body;
pub use clock::{AudioClock, FixedTimestep, Liveness, SimulationClock};
pub use error::{Result, SwarmError};
pub use params::{ConfigTracker, DampingMode, LayoutParams, SimulationConfig, SynthParams};
pub use simulation::{Simulation, StepReport};
pub use synth::Synth;

// Define modules
pub mod amplitude;
pub mod audio;
pub mod body;
pub mod clock;
pub mod error;
pub mod force;
pub mod metric;
pub mod params;
pub mod physics;
pub mod simulation;
pub mod synth;

// Constants
pub const DEFAULT_SWARM_SIZE: usize = 200;
