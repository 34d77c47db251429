//! Lock-free handoff of the amplitude from the simulation to the audio context.
//!
//! The slot is a single `AtomicU32` holding the bits of an `f32`, so the
//! reader always sees a whole value and never waits on the writer. Both
//! halves are move-only: one writer, one reader.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

/// Create a connected publisher/reader pair, initially silent
pub fn amplitude_channel() -> (AmplitudePublisher, AmplitudeReader) {
    let slot = Arc::new(AtomicU32::new(0.0f32.to_bits()));
    (
        AmplitudePublisher { slot: slot.clone() },
        AmplitudeReader { slot },
    )
}

#[inline]
fn sanitize(amplitude: f32) -> f32 {
    if amplitude.is_finite() {
        amplitude.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Writing half, held by the simulation
#[derive(Debug)]
pub struct AmplitudePublisher {
    slot: Arc<AtomicU32>,
}

impl AmplitudePublisher {
    pub fn publish(&self, amplitude: f32) {
        self.slot
            .store(sanitize(amplitude).to_bits(), Ordering::Relaxed);
    }
}

/// Reading half, held by the synthesizer
#[derive(Debug)]
pub struct AmplitudeReader {
    slot: Arc<AtomicU32>,
}

impl AmplitudeReader {
    #[inline]
    pub fn load(&self) -> f32 {
        sanitize(f32::from_bits(self.slot.load(Ordering::Relaxed)))
    }
}
