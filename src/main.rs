/*
 * Sonic Boids Viewer
 *
 * Hosts the swarm in a nannou window: steps the simulation every frame,
 * draws body positions, exposes the force-field parameters as sliders and
 * plays the synthesizer on the default audio device.
 *
 * Set RUST_LOG (e.g. RUST_LOG=sonic_boids=debug) to adjust logging.
 */

mod app;
mod camera;
mod debug;
mod input;
mod renderer;
mod ui;

use tracing_subscriber::EnvFilter;

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    nannou::app(app::model).update(app::update).run();
}
