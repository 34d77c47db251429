/*
 * Camera Module
 *
 * Pan/zoom camera looking down the z axis at the swarm. Bodies are
 * projected orthographically onto the xy plane; depth only tints them.
 */

use nannou::prelude::*;

// Swarm radius is 50, so start zoomed in to fill the window
const DEFAULT_ZOOM: f32 = 4.0;

pub struct Camera {
    pub position: Vec2,
    pub zoom: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,
    pub is_dragging: bool,
    pub last_cursor_pos: Vec2,
}

impl Camera {
    pub fn new() -> Self {
        Self {
            position: Vec2::ZERO,
            zoom: DEFAULT_ZOOM,
            min_zoom: 0.1,
            max_zoom: 40.0,
            is_dragging: false,
            last_cursor_pos: Vec2::ZERO,
        }
    }

    pub fn reset(&mut self) {
        self.position = Vec2::ZERO;
        self.zoom = DEFAULT_ZOOM;
        self.is_dragging = false;
    }

    // Drop depth and map to screen space
    pub fn project(&self, point: Vec3, window_rect: Rect) -> Vec2 {
        self.world_to_screen(point.truncate(), window_rect)
    }

    pub fn world_to_screen(&self, point: Vec2, window_rect: Rect) -> Vec2 {
        (point - self.position) * self.zoom + window_rect.xy()
    }

    pub fn screen_to_world(&self, point: Vec2, window_rect: Rect) -> Vec2 {
        (point - window_rect.xy()) / self.zoom + self.position
    }

    // Zoom around the cursor so the point under it stays put
    pub fn zoom_at(&mut self, scroll: f32, cursor: Vec2, window_rect: Rect) {
        let before = self.screen_to_world(cursor, window_rect);
        self.zoom = (self.zoom * (1.0 + scroll * 0.1)).clamp(self.min_zoom, self.max_zoom);
        let after = self.screen_to_world(cursor, window_rect);
        self.position += before - after;
    }

    pub fn start_drag(&mut self, position: Vec2) {
        self.last_cursor_pos = position;
        self.is_dragging = true;
    }

    pub fn drag(&mut self, position: Vec2) {
        if !self.is_dragging {
            return;
        }
        let delta = position - self.last_cursor_pos;
        self.position -= delta / self.zoom;
        self.last_cursor_pos = position;
    }

    pub fn end_drag(&mut self) {
        self.is_dragging = false;
    }
}
