/*
 * Debug Information Module
 *
 * This module defines the DebugInfo struct that contains performance metrics
 * and swarm/audio readings to be displayed in the UI.
 */

use std::time::Duration;

// Debug information to display
#[derive(Default)]
pub struct DebugInfo {
    pub fps: f32,
    pub frame_time: Duration,
    pub physics_updates_per_frame: usize,
    pub steps: u64,
    pub mean_distance: Option<f32>,
    pub amplitude: f32,
    pub sample_rate: Option<u32>,
    pub audio_running: bool,
}
