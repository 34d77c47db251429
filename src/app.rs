/*
 * Application Module
 *
 * This module defines the viewer model and its update loop.
 * The window's frame loop is the simulation clock: every update advances
 * a fixed-timestep accumulator and runs the due physics steps. Audio runs
 * on the device callback and only ever sees the published amplitude.
 */

use nannou::prelude::*;
use nannou_egui::Egui;
use tracing::{debug, info, warn};

use sonic_boids::{
    amplitude_channel, AudioOutput, ConfigTracker, FixedTimestep, LayoutParams, Liveness,
    Simulation, SimulationConfig, StepReport, SynthParams,
};

use crate::camera::Camera;
use crate::debug::DebugInfo;
use crate::input;
use crate::renderer;
use crate::ui;

// Physics steps allowed per rendered frame before time is dropped
const MAX_STEPS_PER_FRAME: usize = 8;

// Viewer-only settings
pub struct ViewerParams {
    pub show_debug: bool,
    pub pause_simulation: bool,
    pub mute_audio: bool,
    pub physics_fps: f32,
    pub synth: SynthParams,
}

impl Default for ViewerParams {
    fn default() -> Self {
        Self {
            show_debug: false,
            pause_simulation: false,
            mute_audio: false,
            physics_fps: 60.0,
            synth: SynthParams::default(),
        }
    }
}

impl ViewerParams {
    pub fn get_physics_fps_range() -> std::ops::RangeInclusive<f32> {
        10.0..=240.0
    }
}

// Main model for the application
pub struct Model {
    pub simulation: Simulation,
    pub params: ViewerParams,
    pub egui: Egui,
    pub debug_info: DebugInfo,
    pub camera: Camera,
    pub mouse_position: Vec2,
    pub timestep: FixedTimestep,
    pub audio: Option<AudioOutput>,
    pub audio_liveness: Liveness,
    pub config_tracker: ConfigTracker,
    pub last_report: StepReport,
}

// Initialize the model
pub fn model(app: &App) -> Model {
    let window_id = app
        .new_window()
        .title("Sonic Boids")
        .size(1280, 800)
        .view(renderer::view)
        .mouse_moved(input::mouse_moved)
        .mouse_pressed(input::mouse_pressed)
        .mouse_released(input::mouse_released)
        .mouse_wheel(input::mouse_wheel)
        .raw_event(input::raw_window_event)
        .build()
        .expect("failed to build window");

    let window = app.window(window_id).expect("window closed during setup");
    let egui = Egui::from_window(&window);

    let params = ViewerParams::default();
    let (publisher, reader) = amplitude_channel();

    let mut simulation = Simulation::new(LayoutParams::default(), SimulationConfig::default(), publisher);
    let last_report = simulation.measure();

    // Keep running without sound if there is no usable device
    let audio_liveness = Liveness::new();
    let audio = match AudioOutput::start(params.synth, reader, audio_liveness.clone()) {
        Ok(output) => Some(output),
        Err(err) => {
            warn!(error = %err, "audio unavailable, running silent");
            None
        }
    };

    let mut debug_info = DebugInfo::default();
    debug_info.sample_rate = audio.as_ref().map(|output| output.sample_rate);

    info!(bodies = simulation.bodies().len(), "viewer ready");

    Model {
        timestep: FixedTimestep::new(params.physics_fps, MAX_STEPS_PER_FRAME),
        simulation,
        params,
        egui,
        debug_info,
        camera: Camera::new(),
        mouse_position: Vec2::ZERO,
        audio,
        audio_liveness,
        config_tracker: ConfigTracker::default(),
        last_report,
    }
}

// Update the model
pub fn update(app: &App, model: &mut Model, update: Update) {
    model.debug_info.fps = app.fps();
    model.debug_info.frame_time = update.since_last;

    let (should_reset_swarm, should_reset_camera) = ui::update_ui(
        &mut model.egui,
        &mut model.simulation.config,
        &mut model.params,
        &model.debug_info,
    );

    if model.config_tracker.changed(&model.simulation.config) {
        debug!(config = ?model.simulation.config, "configuration changed");
    }

    model.timestep.set_rate(model.params.physics_fps);

    if should_reset_swarm {
        model.last_report = model.simulation.reset();
    }

    if should_reset_camera {
        model.camera.reset();
    }

    // Muting tears down the audio context only; the swarm keeps running
    if model.params.mute_audio {
        model.audio_liveness.stop();
    } else {
        model.audio_liveness.resume();
    }

    if !model.params.pause_simulation {
        let steps = model.timestep.advance(update.since_last);
        let dt = model.timestep.dt();

        for _ in 0..steps {
            model.simulation.step(dt);
        }

        // One measurement per frame, however many steps ran
        if steps > 0 {
            model.last_report = model.simulation.measure();
        }

        model.debug_info.physics_updates_per_frame = steps;
    }

    model.debug_info.steps = model.simulation.steps();
    model.debug_info.mean_distance = model.last_report.mean_distance;
    model.debug_info.amplitude = model.last_report.amplitude;
    model.debug_info.audio_running = model
        .audio
        .as_ref()
        .map_or(false, |output| output.is_running() && output.liveness().is_alive());
}
