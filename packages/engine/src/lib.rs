//! Cellflow Engine - cellular liquid flow and light propagation in WASM
//!
//! Architecture:
//! - core/        - Safety macros, browser console logger
//! - domain/      - Cell, color and settings value types
//! - spatial/     - Cell grid and light buffers
//! - systems/     - Water solver and light engine
//! - simulation/  - Frame driver, edit commands, render extraction, WASM facade

// Utils with safety macros (must be first for macro export!)
#[macro_use]
pub mod core;
pub mod domain;
pub mod spatial;
pub mod systems;
pub mod simulation;

use wasm_bindgen::prelude::*;

// Re-export wasm-bindgen-rayon for thread pool initialization
#[cfg(all(feature = "parallel", target_arch = "wasm32"))]
pub use wasm_bindgen_rayon::init_thread_pool;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    #[cfg(target_arch = "wasm32")]
    {
        crate::core::console_logger::init_console_logger(log::LevelFilter::Info);
        web_sys::console::log_1(&"Cellflow WASM engine initialized".into());
    }
    #[cfg(not(target_arch = "wasm32"))]
    log::info!("Cellflow engine initialized");
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Re-export main types
pub use domain::cell::{Cell, CellKind, SourceRate};
pub use domain::color::Color24;
pub use domain::settings::{SettingsError, SimSettings};
pub use simulation::{SimulationCore, World};
pub use spatial::grid::CellGrid;
pub use spatial::light_map::LightMap;
pub use systems::light::{compute_transmittance, propagate_light, LightParams};
pub use systems::water::{step_water, WaterParams};

// Cell kind tags for JS
#[wasm_bindgen]
pub fn kind_air_or_water() -> u8 { CellKind::AirOrWater as u8 }
#[wasm_bindgen]
pub fn kind_solid() -> u8 { CellKind::Solid as u8 }
#[wasm_bindgen]
pub fn kind_hole() -> u8 { CellKind::Hole as u8 }
