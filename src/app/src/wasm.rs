//! WebAssembly bindings of the sensor portal core
//!
//! The page served by the device loads this module, forwards user input and
//! timer ticks as serialized events and executes the returned effects.

use lazy_static::lazy_static;
use wasm_bindgen::prelude::wasm_bindgen;

use crux_core::{bridge::Bridge, Core};

use crate::App;

lazy_static! {
    static ref CORE: Bridge<App> = Bridge::new(Core::new());
}

/// Set up logging to the browser console.
///
/// Runs automatically when the module is loaded.
#[wasm_bindgen(start)]
pub fn init_wasm() {
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        wasm_bindgen::throw_str(&format!("failed to initialize logger: {e}"));
    }
}

/// Process a serialized `Event` and return the serialized effect requests
#[wasm_bindgen]
pub fn process_event(event_bytes: &[u8]) -> Vec<u8> {
    let mut effects = Vec::new();
    if let Err(e) = CORE.update(event_bytes, &mut effects) {
        wasm_bindgen::throw_str(&format!("failed to process event: {e}"));
    }
    effects
}

/// Serialized view model
#[wasm_bindgen]
pub fn view() -> Vec<u8> {
    let mut view = Vec::new();
    if let Err(e) = CORE.view(&mut view) {
        wasm_bindgen::throw_str(&format!("failed to serialize view model: {e}"));
    }
    view
}

/// Resolve the effect `id` with the serialized shell output.
///
/// Returns the serialized effect requests that follow from it, e.g. the
/// render after an HTTP response.
#[wasm_bindgen]
pub fn handle_response(id: u32, response_bytes: &[u8]) -> Vec<u8> {
    let mut effects = Vec::new();
    if let Err(e) = CORE.resolve(
        crux_core::bridge::EffectId(id),
        response_bytes,
        &mut effects,
    ) {
        wasm_bindgen::throw_str(&format!("failed to resolve effect {id}: {e}"));
    }
    effects
}
