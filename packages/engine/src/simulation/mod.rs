//! Simulation - owns the grid and light buffers and drives them frame by frame
//!
//! Per frame:
//! 1. convert elapsed time into 0..N water ticks (capped catch-up)
//! 2. run the water ticks
//! 3. regenerate transmittance and albedo from cell kinds
//! 4. rebuild the light field from the source overlay
//!
//! Edit commands mutate the committed grid and the source overlay between
//! frames only.

use crate::domain::cell::Cell;
use crate::domain::color::Color24;
use crate::domain::settings::{SettingsError, SimSettings};
use crate::spatial::grid::CellGrid;
use crate::spatial::light_map::LightMap;

#[path = "perf/perf_timer.rs"]
mod perf_timer;
#[path = "perf/perf_stats.rs"]
mod perf_stats;
#[path = "step/substep.rs"]
mod substep;
#[path = "step/step.rs"]
mod step;
#[path = "commands/commands.rs"]
mod commands;
#[path = "render/render_extract.rs"]
mod render_extract;
#[path = "init/init.rs"]
mod init;
#[path = "init/settings.rs"]
mod settings;
mod facade;

pub use facade::World;
pub use perf_stats::PerfStats;
pub use render_extract::cell_albedo;
pub use substep::{SubSteps, TickAccumulator};

use perf_timer::PerfTimer;

/// Display buffers, refreshed every frame and packed on demand
pub(crate) struct RenderBuffers {
    pub(crate) albedo: Vec<Color24>,
    pub(crate) albedo_rgba: Vec<u32>,
    pub(crate) light_rgba: Vec<u32>,
    pub(crate) lit_rgba: Vec<u32>,
}

pub struct SimulationCore {
    grid: CellGrid,
    light: LightMap,
    settings: SimSettings,
    accumulator: TickAccumulator,
    frame: u64,

    render: RenderBuffers,

    // Perf metrics
    perf_enabled: bool,
    perf_stats: PerfStats,
}

impl SimulationCore {
    /// Dry, dark simulation with default settings
    pub fn new(width: u32, height: u32) -> Self {
        init::create_simulation_core(width, height, SimSettings::default())
    }

    pub fn with_settings(width: u32, height: u32, settings: SimSettings) -> Self {
        init::create_simulation_core(width, height, settings)
    }

    pub fn width(&self) -> u32 { self.grid.width() }

    pub fn height(&self) -> u32 { self.grid.height() }

    pub fn frame(&self) -> u64 { self.frame }

    pub fn grid(&self) -> &CellGrid { &self.grid }

    pub fn grid_mut(&mut self) -> &mut CellGrid { &mut self.grid }

    pub fn light(&self) -> &LightMap { &self.light }

    pub fn light_mut(&mut self) -> &mut LightMap { &mut self.light }

    pub fn albedo(&self) -> &[Color24] { &self.render.albedo }

    pub fn accumulator(&self) -> &TickAccumulator { &self.accumulator }

    // === Settings ===
    pub fn settings(&self) -> &SimSettings { &self.settings }

    /// Replace the settings; UI-ranged values are clamped
    pub fn set_settings(&mut self, settings: SimSettings) {
        settings::apply_settings(self, settings);
    }

    pub fn load_settings_json(&mut self, json: &str) -> Result<(), SettingsError> {
        settings::load_settings_json(self, json)
    }

    pub fn settings_json(&self) -> Result<String, SettingsError> {
        self.settings.to_json()
    }

    /// Enable or disable per-step perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        settings::enable_perf_metrics(self, enabled);
    }

    /// Get last step perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        settings::get_perf_stats(self)
    }

    // === Stepping ===

    /// Advance by `dt_seconds` of wall time; returns the water ticks run
    pub fn step(&mut self, dt_seconds: f64) -> u32 {
        step::step(self, dt_seconds)
    }

    /// Exactly one water tick, ignoring the accumulator. Light is untouched.
    pub fn step_water_once(&mut self) {
        step::step_water_once(self);
    }

    // === Edit commands ===
    pub fn set_cell(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        commands::set_cell(self, x, y, cell)
    }

    pub fn set_solid(&mut self, x: i32, y: i32) -> bool {
        commands::set_cell(self, x, y, Cell::solid())
    }

    pub fn set_hole(&mut self, x: i32, y: i32) -> bool {
        commands::set_cell(self, x, y, Cell::hole())
    }

    /// Water source emitting `rate` per tick (negative rates clamp to 0)
    pub fn set_source(&mut self, x: i32, y: i32, rate: i16) -> bool {
        commands::set_source(self, x, y, rate)
    }

    pub fn add_liquid(&mut self, x: i32, y: i32, amount: i32, replace: bool) -> bool {
        commands::add_liquid(self, x, y, amount, replace)
    }

    pub fn add_liquid_in_radius(&mut self, cx: i32, cy: i32, radius: i32, amount: i32) -> u32 {
        commands::add_liquid_in_radius(self, cx, cy, radius, amount)
    }

    pub fn erase(&mut self, x: i32, y: i32) -> bool {
        commands::erase(self, x, y)
    }

    pub fn erase_in_radius(&mut self, cx: i32, cy: i32, radius: i32) -> u32 {
        commands::erase_in_radius(self, cx, cy, radius)
    }

    pub fn paint_circle(&mut self, cx: i32, cy: i32, radius: i32, cell: Cell, light: Color24) -> u32 {
        commands::paint_circle(self, cx, cy, radius, cell, light)
    }

    pub fn set_light_source(&mut self, x: i32, y: i32, color: Color24) -> bool {
        commands::set_light_source(self, x, y, color)
    }

    /// Dry air everywhere, no light sources, no pending time
    pub fn clear(&mut self) {
        commands::clear(self)
    }

    // === Render ===

    /// Pack the light field as RGBA and return the buffer pointer
    pub fn extract_light_pixels(&mut self) -> *const u32 {
        render_extract::extract_light_pixels(self)
    }

    pub fn extract_albedo_pixels(&mut self) -> *const u32 {
        render_extract::extract_albedo_pixels(self)
    }

    /// Albedo modulated by light, packed as RGBA
    pub fn extract_lit_pixels(&mut self) -> *const u32 {
        render_extract::extract_lit_pixels(self)
    }

    pub fn light_rgba(&self) -> &[u32] { &self.render.light_rgba }

    pub fn albedo_rgba(&self) -> &[u32] { &self.render.albedo_rgba }

    pub fn lit_rgba(&self) -> &[u32] { &self.render.lit_rgba }

    /// Get pointer to the cell array (4 bytes per cell)
    pub fn cells_ptr(&self) -> *const Cell { self.grid.cells_ptr() }

    /// Get pointer to the light field (3 bytes per cell)
    pub fn field_ptr(&self) -> *const Color24 { self.light.field_ptr() }

    /// Get pointer to the transmittance buffer (3 bytes per cell)
    pub fn medium_ptr(&self) -> *const Color24 { self.light.medium_ptr() }

    pub fn cell_count(&self) -> usize { self.grid.size() }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
