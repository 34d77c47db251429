/*
 * Audio Output Module
 *
 * Connects the synthesizer to the default output device through cpal.
 * The stream callback owns the Synth and an AudioClock; the only thing it
 * shares with the rest of the program is the amplitude reader and the
 * audio liveness flag, both lock-free.
 */

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use tracing::{info, warn};

use crate::amplitude::AmplitudeReader;
use crate::clock::{AudioClock, Liveness};
use crate::error::{Result, SwarmError};
use crate::params::SynthParams;
use crate::synth::Synth;

pub struct AudioOutput {
    stream: Option<cpal::Stream>,
    pub sample_rate: u32,
    pub channels: u16,
    liveness: Liveness,
}

impl AudioOutput {
    /// Open the default output device and start playing.
    ///
    /// The device's sample rate and channel count override those in `params`.
    pub fn start(params: SynthParams, amplitude: AmplitudeReader, liveness: Liveness) -> Result<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or(SwarmError::NoOutputDevice)?;

        let supported_config = device.default_output_config()?;
        let sample_format = supported_config.sample_format();
        if sample_format != cpal::SampleFormat::F32 {
            return Err(SwarmError::UnsupportedSampleFormat(sample_format));
        }

        let config: cpal::StreamConfig = supported_config.config();
        let sample_rate = config.sample_rate.0;
        let channels = config.channels;

        let mut synth = Synth::new(
            SynthParams {
                sample_rate: sample_rate as f32,
                channels: channels as usize,
                ..params
            },
            amplitude,
        );
        let mut clock = AudioClock::new(liveness.clone());
        let channel_count = channels as usize;

        let stream = device.build_output_stream(
            &config,
            move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                clock.process(&mut synth, data, channel_count);
            },
            |err| warn!(error = %err, "audio stream error"),
            None,
        )?;
        stream.play()?;

        let device_name = device.name().unwrap_or_else(|_| "unknown".to_string());
        info!(device = %device_name, sample_rate, channels, "audio output started");

        Ok(Self {
            stream: Some(stream),
            sample_rate,
            channels,
            liveness,
        })
    }

    pub fn liveness(&self) -> &Liveness {
        &self.liveness
    }

    pub fn is_running(&self) -> bool {
        self.stream.is_some()
    }

    pub fn stop(&mut self) {
        self.liveness.stop();
        if self.stream.take().is_some() {
            info!("audio output stopped");
        }
    }
}

impl Drop for AudioOutput {
    fn drop(&mut self) {
        self.stop();
    }
}
