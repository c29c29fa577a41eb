pub mod runner;

pub use runner::{SimRunner, BODY_FLOATS};

use std::cell::RefCell;

use glam::Vec3;
use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<SimRunner>> = RefCell::new(None);
}

/// Run `f` against the live runner. `None` before `sim_init` or after `sim_teardown`.
fn with_runner<R>(f: impl FnOnce(&mut SimRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| cell.borrow_mut().as_mut().map(f))
}

/// Create the simulation. `config_json` may be empty for defaults.
/// Returns false (and logs why) when the config is rejected.
#[wasm_bindgen]
pub fn sim_init(config_json: &str) -> bool {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    match SimRunner::from_json(config_json) {
        Ok(runner) => {
            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });
            log::info!("starfall: initialized");
            true
        }
        Err(e) => {
            log::error!("starfall: init failed: {e}");
            false
        }
    }
}

/// Queue a launch for the next tick. False when the ray is not finite or the
/// simulation is not running.
#[wasm_bindgen]
pub fn sim_launch(ox: f32, oy: f32, oz: f32, dx: f32, dy: f32, dz: f32) -> bool {
    with_runner(|r| r.push_launch(Vec3::new(ox, oy, oz), Vec3::new(dx, dy, dz))).unwrap_or(false)
}

#[wasm_bindgen]
pub fn sim_tick(dt: f32) {
    with_runner(|r| r.tick(dt));
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn sim_render_records_ptr() -> *const f32 {
    with_runner(|r| r.render_records_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn sim_render_record_count() -> u32 {
    with_runner(|r| r.render_record_count()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn sim_render_record_floats() -> u32 {
    starfall::RenderRecord::FLOATS as u32
}

#[wasm_bindgen]
pub fn sim_impact_records_ptr() -> *const f32 {
    with_runner(|r| r.impact_records_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn sim_impact_count() -> u32 {
    with_runner(|r| r.impact_count()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn sim_body_positions_ptr() -> *const f32 {
    with_runner(|r| r.body_positions_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn sim_body_count() -> u32 {
    with_runner(|r| r.body_count()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn sim_status() -> String {
    with_runner(|r| r.status().to_owned()).unwrap_or_default()
}

#[wasm_bindgen]
pub fn sim_live_count() -> u32 {
    with_runner(|r| r.live_count()).unwrap_or(0)
}

/// Destroy every visual and drop the simulation. Returns the number of
/// destroy records; they are lost with the runner, so JS should clear its
/// scene wholesale after this call.
#[wasm_bindgen]
pub fn sim_teardown() -> u32 {
    let runner = RUNNER.with(|cell| cell.borrow_mut().take());
    match runner {
        Some(runner) => {
            let destroyed = runner.teardown().len() as u32;
            log::info!("starfall: torn down, {destroyed} visuals released");
            destroyed
        }
        None => 0,
    }
}
