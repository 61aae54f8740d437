//! Medium - per-cell transmittance, regenerated from cell kinds every tick

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::domain::cell::{Cell, CellKind};
use crate::domain::color::Color24;

/// Attenuation inputs of the medium pass. An attenuation `a` lets
/// `256 - a` of every 256 units of light through one cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LightParams {
    pub air_attenuation: u8,
    pub block_attenuation: u8,
    /// Red/green loss of air cells holding liquid
    pub water_tint: u8,
}

impl Default for LightParams {
    fn default() -> Self {
        Self {
            air_attenuation: 12,
            block_attenuation: 75,
            water_tint: 10,
        }
    }
}

#[inline]
fn transmittance(attenuation: u8) -> u8 {
    // attenuation 0 would be 256, one past a byte
    (256 - attenuation as u16).min(255) as u8
}

/// Transmittance of a single cell
#[inline]
pub fn transmittance_of(cell: &Cell, params: &LightParams) -> Color24 {
    match cell.kind {
        CellKind::AirOrWater => {
            let air = transmittance(params.air_attenuation);
            if cell.liquid > 0 {
                let tinted = air.saturating_sub(params.water_tint);
                Color24::new(tinted, tinted, air)
            } else {
                Color24::gray(air)
            }
        }
        CellKind::Solid | CellKind::Hole => Color24::gray(transmittance(params.block_attenuation)),
    }
}

/// Regenerate `medium` from `cells`, one entry per cell
pub fn compute_transmittance(cells: &[Cell], medium: &mut [Color24], params: &LightParams) {
    assert_eq!(
        cells.len(),
        medium.len(),
        "compute_transmittance: {} cells for a medium of {}",
        cells.len(),
        medium.len()
    );

    #[cfg(feature = "parallel")]
    {
        medium
            .par_iter_mut()
            .zip(cells.par_iter())
            .for_each(|(m, cell)| *m = transmittance_of(cell, params));
    }

    #[cfg(not(feature = "parallel"))]
    {
        for (m, cell) in medium.iter_mut().zip(cells) {
            *m = transmittance_of(cell, params);
        }
    }
}
