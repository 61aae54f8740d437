use crate::domain::color::Color24;
use crate::domain::settings::SimSettings;
use crate::spatial::grid::CellGrid;
use crate::spatial::light_map::LightMap;

use super::perf_stats::PerfStats;
use super::substep::TickAccumulator;
use super::RenderBuffers;
use super::SimulationCore;

pub(super) fn create_simulation_core(width: u32, height: u32, settings: SimSettings) -> SimulationCore {
    let grid = CellGrid::new(width, height);
    let size = grid.size();
    log::info!("creating {}x{} simulation", width, height);

    SimulationCore {
        grid,
        light: LightMap::new(width, height),
        settings: settings.clamped(),
        accumulator: TickAccumulator::new(),
        frame: 0,

        render: RenderBuffers {
            albedo: vec![Color24::WHITE; size],
            albedo_rgba: vec![0u32; size],
            light_rgba: vec![0u32; size],
            lit_rgba: vec![0u32; size],
        },
        perf_enabled: false,
        perf_stats: PerfStats::default(),
    }
}
