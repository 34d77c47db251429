/*
 * Error Module
 *
 * Errors surfaced by the swarm core and its audio output. Degenerate
 * geometry and out-of-range configuration are absorbed by the integrator
 * (force guards and the acceleration cap), so they have no variant here.
 */

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SwarmError {
    /// Pairwise statistics need at least one pair
    #[error("at least 2 bodies are required to measure pairwise distance, got {count}")]
    InsufficientBodies { count: usize },

    #[error("no audio output device available")]
    NoOutputDevice,

    #[error("failed to query default output config: {0}")]
    DefaultStreamConfig(#[from] cpal::DefaultStreamConfigError),

    #[error("failed to build output stream: {0}")]
    BuildStream(#[from] cpal::BuildStreamError),

    #[error("failed to start output stream: {0}")]
    PlayStream(#[from] cpal::PlayStreamError),

    #[error("unsupported output sample format {0:?}, only f32 streams are rendered")]
    UnsupportedSampleFormat(cpal::SampleFormat),

    #[error("failed to spawn {name} thread: {source}")]
    Spawn {
        name: &'static str,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, SwarmError>;
