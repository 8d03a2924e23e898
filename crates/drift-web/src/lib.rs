pub mod runner;

pub use runner::{CameraFeed, SimRunner};

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<SimRunner>> = RefCell::new(None);
}

fn with_runner<R>(f: impl FnOnce(&mut SimRunner) -> R) -> R {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        let runner = borrow
            .as_mut()
            .expect("Simulation not initialized. Call sim_init() first.");
        f(runner)
    })
}

/// Create the runner for a canvas of the given size. Call once before
/// anything else; calling again replaces the whole simulation.
#[wasm_bindgen]
pub fn sim_init(width: f32, height: f32) {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(SimRunner::new(width, height));
    });
    log::info!("drift: initialized {}x{}", width, height);
}

/// Apply a JSON field config (particle_count, interaction_radius, ...).
/// Returns false if the JSON did not parse; the old config stays.
#[wasm_bindgen]
pub fn sim_configure(json: &str) -> bool {
    with_runner(|r| r.configure(json))
}

/// One animation-frame callback; `dt` in seconds.
#[wasm_bindgen]
pub fn sim_tick(dt: f32) {
    with_runner(|r| r.tick(dt));
}

#[wasm_bindgen]
pub fn sim_start() {
    with_runner(|r| r.start());
}

#[wasm_bindgen]
pub fn sim_stop() {
    with_runner(|r| r.stop());
}

#[wasm_bindgen]
pub fn sim_reinitialize() {
    with_runner(|r| r.reinitialize());
}

#[wasm_bindgen]
pub fn sim_resize(width: f32, height: f32) {
    with_runner(|r| r.resize(width, height));
}

// ---- Direct pointer input (mouse/touch, canvas-space coordinates) ----

#[wasm_bindgen]
pub fn sim_set_pointer(x: f32, y: f32, open: bool) {
    with_runner(|r| r.set_pointer(x, y, open));
}

#[wasm_bindgen]
pub fn sim_clear_pointer() {
    with_runner(|r| r.clear_pointer());
}

// ---- Motion estimator control ----

#[wasm_bindgen]
pub fn estimator_start() {
    with_runner(|r| r.estimator_start());
}

#[wasm_bindgen]
pub fn estimator_stop() {
    with_runner(|r| r.estimator_stop());
}

/// Push one downscaled RGBA camera frame (analysis_width × analysis_height).
#[wasm_bindgen]
pub fn camera_frame(data: &[u8]) {
    with_runner(|r| r.push_camera_frame(data));
}

/// Relay a `getUserMedia` failure: 1 = permission denied, 2 = no device.
#[wasm_bindgen]
pub fn camera_failed(code: u32) {
    with_runner(|r| r.camera_failed(code));
}

/// 0 idle, 1 initializing, 2 active, 3 denied, 4 no device, 5 timeout.
#[wasm_bindgen]
pub fn estimator_status() -> u32 {
    with_runner(|r| r.estimator_status())
}

// ---- Frame buffer accessors (direct WASM-memory reads) ----

#[wasm_bindgen]
pub fn frame_ptr() -> *const u8 {
    with_runner(|r| r.frame_ptr())
}

#[wasm_bindgen]
pub fn frame_len() -> u32 {
    with_runner(|r| r.frame_len())
}

#[wasm_bindgen]
pub fn frame_width() -> u32 {
    with_runner(|r| r.frame_width())
}

#[wasm_bindgen]
pub fn frame_height() -> u32 {
    with_runner(|r| r.frame_height())
}

// ---- Analysis-surface dimensions (the size the shell downscales to) ----

#[wasm_bindgen]
pub fn analysis_width() -> u32 {
    with_runner(|r| r.analysis_width())
}

#[wasm_bindgen]
pub fn analysis_height() -> u32 {
    with_runner(|r| r.analysis_height())
}

#[wasm_bindgen]
pub fn particle_count() -> u32 {
    with_runner(|r| r.particle_count())
}
