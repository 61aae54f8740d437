use crate::domain::settings::{SettingsError, SimSettings};

use super::perf_stats::PerfStats;
use super::SimulationCore;

pub(super) fn enable_perf_metrics(sim: &mut SimulationCore, enabled: bool) {
    sim.perf_enabled = enabled;
    if !enabled {
        sim.perf_stats.reset();
    }
}

pub(super) fn get_perf_stats(sim: &SimulationCore) -> PerfStats {
    sim.perf_stats.clone()
}

pub(super) fn apply_settings(sim: &mut SimulationCore, settings: SimSettings) {
    let clamped = settings.clamped();
    if clamped != settings {
        log::warn!("settings clamped into UI ranges");
    }
    sim.settings = clamped;
}

pub(super) fn load_settings_json(sim: &mut SimulationCore, json: &str) -> Result<(), SettingsError> {
    let settings = SimSettings::from_json(json)?;
    apply_settings(sim, settings);
    log::info!("settings reloaded");
    Ok(())
}
