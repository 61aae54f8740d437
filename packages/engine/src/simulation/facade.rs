use wasm_bindgen::prelude::*;

use crate::domain::cell::{Cell, CellKind};
use crate::domain::color::Color24;
use crate::domain::settings::SimSettings;

use super::perf_stats::PerfStats;
use super::SimulationCore;

#[wasm_bindgen]
pub struct World {
    core: SimulationCore,
}

#[wasm_bindgen]
impl World {
    /// Create a new world with given dimensions (at least 2x1)
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            core: SimulationCore::new(width, height),
        }
    }

    #[wasm_bindgen(js_name = newWithSettings)]
    pub fn new_with_settings(width: u32, height: u32, settings_json: String) -> Result<World, JsValue> {
        let settings =
            SimSettings::from_json(&settings_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self {
            core: SimulationCore::with_settings(width, height, settings),
        })
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 { self.core.width() }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 { self.core.height() }

    #[wasm_bindgen(getter)]
    pub fn frame(&self) -> u64 { self.core.frame() }

    /// Liquid held by air/water cells, sources excluded
    pub fn total_liquid(&self) -> f64 {
        self.core.grid().total_liquid() as f64
    }

    // === Settings ===

    pub fn load_settings(&mut self, json: String) -> Result<(), JsValue> {
        self.core
            .load_settings_json(&json)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(())
    }

    pub fn get_settings_json(&self) -> Result<String, JsValue> {
        self.core
            .settings_json()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Enable or disable per-step perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        self.core.enable_perf_metrics(enabled);
    }

    /// Get last step perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        self.core.get_perf_stats()
    }

    // === Stepping ===

    /// Advance by `dt_seconds` of wall time; returns the water ticks run
    pub fn step(&mut self, dt_seconds: f64) -> u32 {
        self.core.step(dt_seconds)
    }

    pub fn step_water_once(&mut self) {
        self.core.step_water_once();
    }

    // === Brush ===

    pub fn set_solid(&mut self, x: i32, y: i32) -> bool {
        self.core.set_solid(x, y)
    }

    pub fn set_hole(&mut self, x: i32, y: i32) -> bool {
        self.core.set_hole(x, y)
    }

    pub fn set_source(&mut self, x: i32, y: i32, rate: i16) -> bool {
        self.core.set_source(x, y, rate)
    }

    pub fn add_liquid(&mut self, x: i32, y: i32, amount: i32, replace: bool) -> bool {
        self.core.add_liquid(x, y, amount, replace)
    }

    pub fn add_liquid_in_radius(&mut self, cx: i32, cy: i32, radius: i32, amount: i32) -> u32 {
        self.core.add_liquid_in_radius(cx, cy, radius, amount)
    }

    pub fn erase(&mut self, x: i32, y: i32) -> bool {
        self.core.erase(x, y)
    }

    pub fn erase_in_radius(&mut self, cx: i32, cy: i32, radius: i32) -> u32 {
        self.core.erase_in_radius(cx, cy, radius)
    }

    /// Stamp a disk of `kind` (0 air/water, 1 solid, 2 hole) holding `liquid`,
    /// with `light` packed as 0x00BBGGRR. Unknown kinds paint nothing.
    pub fn paint_circle(&mut self, cx: i32, cy: i32, radius: i32, kind: u8, liquid: i16, light: u32) -> u32 {
        let Some(kind) = CellKind::from_u8(kind) else {
            return 0;
        };
        let cell = Cell::new(kind, 0, liquid.max(0));
        self.core
            .paint_circle(cx, cy, radius, cell, Color24::from_u32(light))
    }

    pub fn set_light_source(&mut self, x: i32, y: i32, r: u8, g: u8, b: u8) -> bool {
        self.core.set_light_source(x, y, Color24::new(r, g, b))
    }

    /// Light source from a 3-3-2 packed brush preset byte
    pub fn set_light_source_rgb332(&mut self, x: i32, y: i32, rgb: u8) -> bool {
        self.core.set_light_source(x, y, Color24::from_rgb332(rgb))
    }

    pub fn clear(&mut self) {
        self.core.clear();
    }

    // === Buffers ===

    pub fn cell_count(&self) -> usize {
        self.core.cell_count()
    }

    /// Get pointer to cells (kind u8, option u8, liquid i16 per cell)
    pub fn cells_ptr(&self) -> *const Cell {
        self.core.cells_ptr()
    }

    /// Get pointer to the light field (r, g, b bytes per cell)
    pub fn field_ptr(&self) -> *const Color24 {
        self.core.field_ptr()
    }

    /// Get pointer to the transmittance buffer (r, g, b bytes per cell)
    pub fn medium_ptr(&self) -> *const Color24 {
        self.core.medium_ptr()
    }

    pub fn extract_light_pixels(&mut self) -> *const u32 {
        self.core.extract_light_pixels()
    }

    pub fn extract_albedo_pixels(&mut self) -> *const u32 {
        self.core.extract_albedo_pixels()
    }

    pub fn extract_lit_pixels(&mut self) -> *const u32 {
        self.core.extract_lit_pixels()
    }

    pub fn pixels_len_bytes(&self) -> usize {
        self.core.cell_count() * std::mem::size_of::<u32>()
    }
}
