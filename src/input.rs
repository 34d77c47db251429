/*
 * Input Module
 *
 * Mouse handlers for the viewer camera: drag to pan, wheel to zoom.
 * Clicks that land on the egui window are left to egui.
 */

use nannou::prelude::*;
use nannou::winit::event::{MouseButton, MouseScrollDelta, TouchPhase, WindowEvent};

use crate::app::Model;

pub fn mouse_moved(_app: &App, model: &mut Model, pos: Point2) {
    model.mouse_position = pos;
    model.camera.drag(pos);
}

pub fn mouse_pressed(_app: &App, model: &mut Model, button: MouseButton) {
    if button == MouseButton::Left && !model.egui.ctx().is_pointer_over_area() {
        model.camera.start_drag(model.mouse_position);
    }
}

pub fn mouse_released(_app: &App, model: &mut Model, button: MouseButton) {
    if button == MouseButton::Left {
        model.camera.end_drag();
    }
}

pub fn mouse_wheel(app: &App, model: &mut Model, delta: MouseScrollDelta, _phase: TouchPhase) {
    let scroll = match delta {
        MouseScrollDelta::LineDelta(_, y) => y,
        MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.01,
    };
    model.camera.zoom_at(scroll, model.mouse_position, app.window_rect());
}

// Pass events to egui
pub fn raw_window_event(_app: &App, model: &mut Model, event: &WindowEvent) {
    model.egui.handle_raw_event(event);
}
