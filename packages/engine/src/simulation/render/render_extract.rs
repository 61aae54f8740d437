//! Render extraction - per-cell display colors and packed canvas buffers

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::domain::cell::{Cell, CellKind};
use crate::domain::color::Color24;

use super::SimulationCore;

const SOLID_COLOR: Color24 = Color24::new(116, 97, 82);
const SOURCE_COLOR: Color24 = Color24::new(0, 255, 255);

/// Display color of one cell. Water fades from pale to deep blue as it
/// fills, then darkens further under pressure.
pub fn cell_albedo(cell: &Cell, max_liquid: i32) -> Color24 {
    match cell.kind {
        CellKind::AirOrWater => {
            let liquid = cell.liquid as i32;
            if liquid <= 0 {
                return Color24::WHITE;
            }
            let max = max_liquid.max(1);
            let fill = liquid * 128 / max;
            if liquid < max {
                let w = (128 - fill).clamp(0, 128) as u8;
                Color24::new(w, w, 255)
            } else {
                let b = (383 - fill).clamp(128, 255) as u8;
                Color24::new(0, 0, b)
            }
        }
        CellKind::Solid if cell.liquid != 0 => SOURCE_COLOR,
        CellKind::Solid => SOLID_COLOR,
        CellKind::Hole => Color24::BLACK,
    }
}

pub(crate) fn compute_albedo(cells: &[Cell], albedo: &mut [Color24], max_liquid: i32) {
    #[cfg(feature = "parallel")]
    {
        albedo
            .par_iter_mut()
            .zip(cells.par_iter())
            .for_each(|(a, cell)| *a = cell_albedo(cell, max_liquid));
    }

    #[cfg(not(feature = "parallel"))]
    {
        for (a, cell) in albedo.iter_mut().zip(cells) {
            *a = cell_albedo(cell, max_liquid);
        }
    }
}

fn pack_abgr(src: &[Color24], dst: &mut [u32]) {
    for (d, c) in dst.iter_mut().zip(src) {
        *d = c.to_abgr();
    }
}

/// Pack the light field into the RGBA transfer buffer; returns its pointer
pub(super) fn extract_light_pixels(sim: &mut SimulationCore) -> *const u32 {
    pack_abgr(sim.light.field(), &mut sim.render.light_rgba);
    sim.render.light_rgba.as_ptr()
}

/// Pack the albedo buffer into the RGBA transfer buffer; returns its pointer
pub(super) fn extract_albedo_pixels(sim: &mut SimulationCore) -> *const u32 {
    pack_abgr(&sim.render.albedo, &mut sim.render.albedo_rgba);
    sim.render.albedo_rgba.as_ptr()
}

/// Albedo lit by the light field, packed for the canvas: `albedo * light / 256`
pub(super) fn extract_lit_pixels(sim: &mut SimulationCore) -> *const u32 {
    let render = &mut sim.render;
    for ((d, a), l) in render
        .lit_rgba
        .iter_mut()
        .zip(render.albedo.iter())
        .zip(sim.light.field())
    {
        *d = a.attenuate(*l).to_abgr();
    }
    render.lit_rgba.as_ptr()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cell::SourceRate;

    #[test]
    fn dry_air_is_white_and_walls_have_fixed_colors() {
        assert_eq!(cell_albedo(&Cell::air(), 512), Color24::WHITE);
        assert_eq!(cell_albedo(&Cell::solid(), 512), SOLID_COLOR);
        assert_eq!(cell_albedo(&Cell::source(SourceRate(50)), 512), SOURCE_COLOR);
        assert_eq!(cell_albedo(&Cell::hole(), 512), Color24::BLACK);
    }

    #[test]
    fn water_deepens_with_volume() {
        // half full: 128 - 64
        assert_eq!(cell_albedo(&Cell::water(256), 512), Color24::new(64, 64, 255));
        // barely wet stays pale
        assert_eq!(cell_albedo(&Cell::water(1), 512), Color24::new(128, 128, 255));
        // exactly full: 383 - 128
        assert_eq!(cell_albedo(&Cell::water(512), 512), Color24::new(0, 0, 255));
        // pressurized water bottoms out at 128
        assert_eq!(cell_albedo(&Cell::water(2048), 512), Color24::new(0, 0, 128));
    }
}
