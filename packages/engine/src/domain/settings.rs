use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::cell::MAX_CELL_LIQUID;
use crate::systems::light::LightParams;
use crate::systems::water::WaterParams;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Tunables of one simulation. Every field falls back to its default when
/// missing from the JSON.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimSettings {
    pub max_liquid: i32,
    pub min_liquid: i32,
    pub compression_ratio: f32,
    pub flow_speed: f32,
    pub horizontal_flow_factor: i32,

    pub liquid_ticks_per_second: u32,
    pub max_ticks_per_frame: u32,
    pub max_pending_seconds: f64,

    pub holes_drain: bool,
    pub water_enabled: bool,
    pub light_enabled: bool,

    pub air_attenuation: u8,
    pub block_attenuation: u8,
    pub water_tint: u8,
}

impl Default for SimSettings {
    fn default() -> Self {
        Self {
            max_liquid: 512,
            min_liquid: 4,
            compression_ratio: 0.03,
            flow_speed: 0.8,
            horizontal_flow_factor: 3,
            liquid_ticks_per_second: 60,
            max_ticks_per_frame: 10,
            max_pending_seconds: 2.0,
            holes_drain: false,
            water_enabled: true,
            light_enabled: true,
            air_attenuation: 12,
            block_attenuation: 75,
            water_tint: 10,
        }
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> SettingsError {
    SettingsError::Invalid {
        field,
        reason: reason.into(),
    }
}

impl SimSettings {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: SimSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Rejects values the solver cannot run with. UI ranges are not checked
    /// here, see `clamped`.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(1..=MAX_CELL_LIQUID).contains(&self.max_liquid) {
            return Err(invalid(
                "maxLiquid",
                format!("{} is outside 1..={}", self.max_liquid, MAX_CELL_LIQUID),
            ));
        }
        if !(0..self.max_liquid).contains(&self.min_liquid) {
            return Err(invalid(
                "minLiquid",
                format!("{} is outside 0..{}", self.min_liquid, self.max_liquid),
            ));
        }
        if !self.compression_ratio.is_finite() {
            return Err(invalid("compressionRatio", "must be finite"));
        }
        if !self.flow_speed.is_finite() {
            return Err(invalid("flowSpeed", "must be finite"));
        }
        if !self.max_pending_seconds.is_finite() || self.max_pending_seconds < 0.0 {
            return Err(invalid("maxPendingSeconds", "must be a finite, non-negative number"));
        }
        Ok(())
    }

    /// Pull every UI-ranged value into its range
    pub fn clamped(&self) -> Self {
        Self {
            compression_ratio: self.compression_ratio.clamp(0.0, 1.0),
            flow_speed: self.flow_speed.clamp(0.0, 1.0),
            horizontal_flow_factor: self.horizontal_flow_factor.clamp(1, 10),
            liquid_ticks_per_second: self.liquid_ticks_per_second.clamp(1, 300),
            air_attenuation: self.air_attenuation.max(1),
            block_attenuation: self.block_attenuation.max(1),
            ..self.clone()
        }
    }

    /// Extra volume per cell of pressure: `maxLiquid * compressionRatio`
    pub fn compression(&self) -> i32 {
        (self.max_liquid as f32 * self.compression_ratio) as i32
    }

    pub fn water_params(&self) -> WaterParams {
        WaterParams {
            max_liquid: self.max_liquid,
            min_liquid: self.min_liquid,
            compression: self.compression(),
            flow_speed: self.flow_speed,
            horizontal_flow_factor: self.horizontal_flow_factor,
            holes_drain: self.holes_drain,
        }
    }

    pub fn light_params(&self) -> LightParams {
        LightParams {
            air_attenuation: self.air_attenuation,
            block_attenuation: self.block_attenuation,
            water_tint: self.water_tint,
        }
    }
}
