use crate::systems::light::{compute_transmittance, propagate_light};
use crate::systems::water::step_water;

use super::render_extract::compute_albedo;
use super::{PerfTimer, SimulationCore};

/// Run `ticks` water ticks back to back
fn run_water(sim: &mut SimulationCore, ticks: u32) {
    let params = sim.settings.water_params();
    for _ in 0..ticks {
        step_water(&mut sim.grid, &params);
    }
}

/// Regenerate transmittance and display colors from the current cell kinds
fn refresh_medium(sim: &mut SimulationCore) {
    let params = sim.settings.light_params();
    compute_transmittance(&sim.grid.cells, sim.light.medium_mut(), &params);
    compute_albedo(&sim.grid.cells, &mut sim.render.albedo, sim.settings.max_liquid);
}

pub(super) fn step_water_once(sim: &mut SimulationCore) {
    run_water(sim, 1);
}

pub(super) fn step(sim: &mut SimulationCore, dt_seconds: f64) -> u32 {
    sim.light.assert_matches(sim.grid.width(), sim.grid.height());

    let perf_on = sim.perf_enabled;
    if perf_on {
        sim.perf_stats.reset();
        sim.perf_stats.grid_size = sim.grid.size() as u32;
    }
    let step_start = if perf_on { Some(PerfTimer::start()) } else { None };

    let substeps = {
        let s = &sim.settings;
        sim.accumulator.advance(
            dt_seconds,
            s.liquid_ticks_per_second,
            s.max_ticks_per_frame,
            s.max_pending_seconds,
        )
    };
    if substeps.capped() {
        log::debug!(
            "frame {}: water catch-up capped at {} ticks, {} dropped",
            sim.frame,
            substeps.ticks,
            substeps.dropped
        );
    }
    // The accumulator keeps draining while water is paused
    let ticks = if sim.settings.water_enabled { substeps.ticks } else { 0 };

    // === WATER ===
    if perf_on {
        let ((), ms) = PerfTimer::time(|| run_water(sim, ticks));
        sim.perf_stats.water_ms = ms;
    } else {
        run_water(sim, ticks);
    }

    // === MEDIUM + ALBEDO ===
    if perf_on {
        let ((), ms) = PerfTimer::time(|| refresh_medium(sim));
        sim.perf_stats.medium_ms = ms;
    } else {
        refresh_medium(sim);
    }

    // === LIGHT ===
    // With light off the field keeps its last result
    if sim.settings.light_enabled {
        if perf_on {
            let ((), ms) = PerfTimer::time(|| propagate_light(&mut sim.light));
            sim.perf_stats.light_ms = ms;
        } else {
            propagate_light(&mut sim.light);
        }
    }

    if perf_on {
        sim.perf_stats.water_ticks = ticks;
        sim.perf_stats.ticks_dropped = substeps.dropped;
        sim.perf_stats.total_liquid = sim.grid.total_liquid() as f64;
        sim.perf_stats.wet_cells = sim.grid.wet_cell_count();
        if let Some(start) = step_start {
            sim.perf_stats.step_ms = start.elapsed_ms();
        }
    }

    sim.frame += 1;
    ticks
}
