/*
 * UI Module
 *
 * This module contains functions for creating and updating the user interface
 * using nannou_egui. Every force-field parameter gets a slider; edits land in
 * the config between simulation steps.
 */

use nannou_egui::{egui, Egui};
use sonic_boids::{DampingMode, SimulationConfig, SynthParams};

use crate::app::ViewerParams;
use crate::debug::DebugInfo;

// Reference step for frame-rate independent damping
const DAMPING_REFERENCE_DT: f32 = 1.0 / 60.0;

// Update the UI and return whether the swarm and the camera should be reset
pub fn update_ui(
    egui: &mut Egui,
    config: &mut SimulationConfig,
    params: &mut ViewerParams,
    debug_info: &DebugInfo,
) -> (bool, bool) {
    let mut should_reset_swarm = false;
    let mut should_reset_camera = false;

    let ctx = egui.begin_frame();

    egui::Window::new("Simulation Controls")
        .default_pos([10.0, 10.0])
        .show(&ctx, |ui| {
            ui.collapsing("Force Field", |ui| {
                ui.add(egui::Slider::new(&mut config.push_force, SimulationConfig::get_push_force_range()).text("Push Force"));
                ui.add(egui::Slider::new(&mut config.push_distance, SimulationConfig::get_push_distance_range()).text("Push Distance"));
                ui.add(egui::Slider::new(&mut config.cohesion_factor, SimulationConfig::get_cohesion_range()).text("Cohesion"));
                ui.add(egui::Slider::new(&mut config.max_acceleration, SimulationConfig::get_max_acceleration_range()).text("Max Acceleration"));
                ui.add(egui::Slider::new(&mut config.damping_factor, SimulationConfig::get_damping_range()).text("Damping"));

                let mut normalized = matches!(config.damping_mode, DampingMode::Normalized { .. });
                if ui.checkbox(&mut normalized, "Frame-rate Independent Damping").changed() {
                    config.damping_mode = if normalized {
                        DampingMode::Normalized { reference_dt: DAMPING_REFERENCE_DT }
                    } else {
                        DampingMode::PerStep
                    };
                }
            });

            ui.collapsing("Origin", |ui| {
                ui.add(egui::Slider::new(&mut config.origin_x, SimulationConfig::get_origin_x_range()).text("Origin X"));
                ui.checkbox(&mut config.move_towards_origin, "Move Towards Origin");
                ui.checkbox(&mut config.move_away_from_origin, "Move Away From Origin");
            });

            ui.collapsing("Swarm", |ui| {
                if ui.button("Reset Swarm").clicked() {
                    should_reset_swarm = true;
                }
                if ui.button("Reset Camera").clicked() {
                    should_reset_camera = true;
                }
                ui.add(egui::Slider::new(&mut params.physics_fps, ViewerParams::get_physics_fps_range()).text("Physics Rate (Hz)"));
                ui.checkbox(&mut config.enable_parallel, "Enable Parallel Processing");
            });

            ui.collapsing("Sound", |ui| {
                ui.checkbox(&mut params.mute_audio, "Mute");
                ui.add(egui::ProgressBar::new(debug_info.amplitude).text(format!("Amplitude {:.4}", debug_info.amplitude)));
                match debug_info.mean_distance {
                    Some(distance) => ui.label(format!("Mean Distance: {:.2}", distance)),
                    None => ui.label("Mean Distance: n/a"),
                };
                let speed = SynthParams::get_speed_range();
                ui.label(format!("Speed: {:.2} Hz (range {:.1}..={:.1})", params.synth.speed, speed.start(), speed.end()));
                match debug_info.sample_rate {
                    Some(rate) => ui.label(format!("Sample Rate: {} Hz", rate)),
                    None => ui.label("No audio device"),
                };
            });

            ui.checkbox(&mut params.show_debug, "Show Debug Info");
            ui.checkbox(&mut params.pause_simulation, "Pause Simulation");
        });

    (should_reset_swarm, should_reset_camera)
}

// Draw debug information on the screen
pub fn draw_debug_info(
    draw: &nannou::Draw,
    debug_info: &DebugInfo,
    window_rect: nannou::geom::Rect,
    bodies_len: usize,
    camera_zoom: f32,
) {
    let margin = 20.0;
    let line_height = 20.0;

    let mean_distance = debug_info
        .mean_distance
        .map_or_else(|| "n/a".to_string(), |d| format!("{:.2}", d));

    let debug_texts = [
        format!("FPS: {:.1}", debug_info.fps),
        format!("Frame time: {:.2} ms", debug_info.frame_time.as_secs_f64() * 1000.0),
        format!("Steps/frame: {}", debug_info.physics_updates_per_frame),
        format!("Total steps: {}", debug_info.steps),
        format!("Bodies: {}", bodies_len),
        format!("Mean distance: {}", mean_distance),
        format!("Amplitude: {:.4}", debug_info.amplitude),
        format!("Audio: {}", if debug_info.audio_running { "on" } else { "off" }),
        format!("Zoom: {:.2}x", camera_zoom),
    ];

    let panel_width = 220.0;
    let panel_height = line_height * debug_texts.len() as f32 + margin;
    draw.rect()
        .x_y(window_rect.right() - panel_width / 2.0, window_rect.top() - panel_height / 2.0)
        .w_h(panel_width, panel_height)
        .color(nannou::color::rgba(0.0, 0.0, 0.0, 0.7));

    let text_x = window_rect.right() - panel_width / 2.0;
    let text_y = window_rect.top() - margin;

    for (i, text) in debug_texts.iter().enumerate() {
        draw.text(text)
            .x_y(text_x, text_y - i as f32 * line_height)
            .w(panel_width - margin)
            .left_justify()
            .color(nannou::color::WHITE)
            .font_size(14);
    }
}
