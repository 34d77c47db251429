/*
 * Renderer Module
 *
 * Draws the swarm from the simulation's body positions. The renderer only
 * reads positions; it owns no simulation state.
 */

use nannou::prelude::*;
use tracing::warn;

use crate::app::Model;
use crate::ui;

const BODY_SIZE: f32 = 0.6;
const ORIGIN_MARKER_SIZE: f32 = 5.0;

// Near bodies are white, far ones fade to violet
fn depth_color(depth: f32, depth_min: f32, depth_max: f32) -> Rgba {
    let span = (depth_max - depth_min).max(f32::EPSILON);
    let t = ((depth - depth_min) / span).clamp(0.0, 1.0);
    rgba(1.0 - 0.5 * t, 1.0 - t, 1.0, 0.9)
}

// Render the model
pub fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    draw.background().color(BLACK);

    let window_rect = app.window_rect();
    let camera = &model.camera;
    let simulation = &model.simulation;
    let layout = simulation.layout();

    let origin = camera.project(vec3(simulation.config.origin_x, 0.0, 0.0), window_rect);
    draw.ellipse()
        .xy(origin)
        .radius(ORIGIN_MARKER_SIZE * camera.zoom)
        .no_fill()
        .stroke(rgba(0.3, 0.3, 0.3, 1.0))
        .stroke_weight(1.0);

    let radius = (BODY_SIZE * camera.zoom).max(1.0);
    for body in simulation.bodies() {
        draw.ellipse()
            .xy(camera.project(body.position, window_rect))
            .radius(radius)
            .color(depth_color(body.position.z, layout.depth_min, layout.depth_max));
    }

    if model.params.show_debug {
        // Velocity of the first body
        if let Some(first) = simulation.bodies().first() {
            let start = camera.project(first.position, window_rect);
            let end = camera.project(first.position + first.velocity, window_rect);
            draw.arrow().start(start).end(end).color(YELLOW).stroke_weight(2.0);
        }

        ui::draw_debug_info(
            &draw,
            &model.debug_info,
            window_rect,
            simulation.bodies().len(),
            camera.zoom,
        );
    }

    if let Err(err) = draw.to_frame(app, &frame) {
        warn!(error = ?err, "failed to draw frame");
    }
    if let Err(err) = model.egui.draw_to_frame(&frame) {
        warn!(error = ?err, "failed to draw ui");
    }
}
