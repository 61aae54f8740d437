use crate::domain::cell::{clamp_liquid, Cell, CellKind, SourceRate};
use crate::domain::color::Color24;

use super::SimulationCore;

pub(super) fn set_cell(sim: &mut SimulationCore, x: i32, y: i32, cell: Cell) -> bool {
    sim.grid.set(x, y, cell)
}

pub(super) fn set_source(sim: &mut SimulationCore, x: i32, y: i32, rate: i16) -> bool {
    set_cell(sim, x, y, Cell::source(SourceRate(rate.max(0))))
}

/// Pour `amount` into an air/water cell. Other kinds refuse unless `replace`,
/// which turns them into water first.
pub(super) fn add_liquid(sim: &mut SimulationCore, x: i32, y: i32, amount: i32, replace: bool) -> bool {
    let Some(cell) = sim.grid.get_mut(x, y) else {
        return false;
    };
    if cell.kind != CellKind::AirOrWater {
        if !replace {
            return false;
        }
        *cell = Cell::air();
    }
    cell.liquid = clamp_liquid((cell.liquid as i32).saturating_add(amount));
    true
}

/// Reset a cell to dry air and drop its light source
pub(super) fn erase(sim: &mut SimulationCore, x: i32, y: i32) -> bool {
    if !sim.grid.set(x, y, Cell::air()) {
        return false;
    }
    sim.light.set_source(x, y, Color24::BLACK);
    true
}

pub(super) fn set_light_source(sim: &mut SimulationCore, x: i32, y: i32, color: Color24) -> bool {
    sim.light.set_source(x, y, color)
}

/// Visit every in-grid cell of the disk `dx² + dy² <= r²`, scanning only the
/// part of its bounding box inside the grid
fn for_each_in_disk(
    sim: &mut SimulationCore,
    cx: i32,
    cy: i32,
    radius: i32,
    mut f: impl FnMut(&mut SimulationCore, i32, i32),
) -> u32 {
    if radius < 0 {
        return 0;
    }
    let (cx, cy, r) = (cx as i64, cy as i64, radius as i64);
    let r2 = r * r;
    let min_x = (cx - r).max(0);
    let max_x = (cx + r).min(sim.grid.width() as i64 - 1);
    let min_y = (cy - r).max(0);
    let max_y = (cy + r).min(sim.grid.height() as i64 - 1);

    let mut visited = 0u32;
    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let (dx, dy) = (x - cx, y - cy);
            if dx * dx + dy * dy > r2 {
                continue;
            }
            // in 0..width / 0..height, so both fit in i32
            f(sim, x as i32, y as i32);
            visited += 1;
        }
    }
    visited
}

/// Stamp `cell` and the light overlay `light` over a disk; returns cells painted
pub(super) fn paint_circle(
    sim: &mut SimulationCore,
    cx: i32,
    cy: i32,
    radius: i32,
    cell: Cell,
    light: Color24,
) -> u32 {
    for_each_in_disk(sim, cx, cy, radius, |sim, x, y| {
        sim.grid.set(x, y, cell);
        sim.light.set_source(x, y, light);
    })
}

/// Pour `amount` into every air/water cell of a disk; returns cells filled
pub(super) fn add_liquid_in_radius(sim: &mut SimulationCore, cx: i32, cy: i32, radius: i32, amount: i32) -> u32 {
    let mut filled = 0u32;
    for_each_in_disk(sim, cx, cy, radius, |sim, x, y| {
        if add_liquid(sim, x, y, amount, false) {
            filled += 1;
        }
    });
    filled
}

pub(super) fn erase_in_radius(sim: &mut SimulationCore, cx: i32, cy: i32, radius: i32) -> u32 {
    for_each_in_disk(sim, cx, cy, radius, |sim, x, y| {
        erase(sim, x, y);
    })
}

pub(super) fn clear(sim: &mut SimulationCore) {
    sim.grid.clear();
    sim.light.clear_sources();
    sim.accumulator.reset();
    sim.frame = 0;
}
