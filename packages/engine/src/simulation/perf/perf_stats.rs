use wasm_bindgen::prelude::*;

#[wasm_bindgen]
#[derive(Clone, Debug, Default)]
pub struct PerfStats {
    pub(super) step_ms: f64,
    pub(super) water_ms: f64,
    pub(super) medium_ms: f64,
    pub(super) light_ms: f64,
    pub(super) water_ticks: u32,
    /// Backlog discarded by the catch-up cap, in ticks
    pub(super) ticks_dropped: u32,
    pub(super) total_liquid: f64,
    pub(super) wet_cells: u32,
    pub(super) grid_size: u32,
}

impl PerfStats {
    pub(crate) fn reset(&mut self) {
        *self = PerfStats::default();
    }
}

#[wasm_bindgen]
impl PerfStats {
    #[wasm_bindgen(getter)]
    pub fn step_ms(&self) -> f64 { self.step_ms }
    #[wasm_bindgen(getter)]
    pub fn water_ms(&self) -> f64 { self.water_ms }
    #[wasm_bindgen(getter)]
    pub fn medium_ms(&self) -> f64 { self.medium_ms }
    #[wasm_bindgen(getter)]
    pub fn light_ms(&self) -> f64 { self.light_ms }
    #[wasm_bindgen(getter)]
    pub fn water_ticks(&self) -> u32 { self.water_ticks }
    #[wasm_bindgen(getter)]
    pub fn ticks_dropped(&self) -> u32 { self.ticks_dropped }
    /// Sum of liquid over AirOrWater cells (f64 so JS gets an exact number)
    #[wasm_bindgen(getter)]
    pub fn total_liquid(&self) -> f64 { self.total_liquid }
    #[wasm_bindgen(getter)]
    pub fn wet_cells(&self) -> u32 { self.wet_cells }
    #[wasm_bindgen(getter)]
    pub fn grid_size(&self) -> u32 { self.grid_size }
}
