//! Phase 1: per-row flow computation
//!
//! Each cell looks at the previous tick's neighbours in a fixed order
//! (bottom, top, left, right). Only AirOrWater cells pay for their outflow,
//! so Solid cells carrying liquid (sources) emit their full rate forever.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::WaterParams;
use crate::domain::cell::{Cell, CellFlow, FlowDelta};

/// Liquid still available to a cell while its four flows are evaluated
struct Budget {
    remaining: i32,
    drains: bool,
}

impl Budget {
    /// Charge `flow` to the cell. Returns true when it is left with less
    /// than `min_liquid` and must stop flowing this tick.
    #[inline]
    fn spend(&mut self, flow: i32, next: &mut Cell, min_liquid: i32) -> bool {
        if !self.drains {
            return false;
        }
        self.remaining -= flow;
        next.liquid = self.remaining as i16;
        self.remaining < min_liquid
    }
}

/// Flows out of the cell at `idx` = (x, y)
pub(super) fn cell_flow(
    cells: &[Cell],
    idx: usize,
    x: usize,
    y: usize,
    width: usize,
    height: usize,
    p: &WaterParams,
) -> CellFlow {
    let cell = *fast!(cells, [idx]);
    let mut out = CellFlow::unchanged(cell);
    if cell.liquid == 0 {
        return out;
    }
    let mut budget = Budget {
        remaining: cell.liquid as i32,
        drains: cell.is_air_or_water(),
    };

    // Down: dry space below takes everything at once
    if y > 0 {
        let below = *fast!(cells, [idx - width]);
        if !below.blocks_flow(p.holes_drain) {
            let below_liquid = below.liquid as i32;
            let mut flow = p.equalize(budget.remaining, below_liquid) - below_liquid;
            if flow > 0 {
                if below_liquid > 0 {
                    flow = p.damp(flow);
                }
                let flow = flow.min(budget.remaining);
                out.to_bottom = flow as i16;
                if budget.spend(flow, &mut out.next, p.min_liquid) {
                    return out;
                }
            }
        }
    }

    // Up: only under pressure, always damped
    if y + 1 < height {
        let above = *fast!(cells, [idx + width]);
        if !above.blocks_flow(p.holes_drain) {
            let flow = budget.remaining - p.equalize(budget.remaining, above.liquid as i32);
            if flow > 0 {
                let flow = p.damp(flow.min(budget.remaining));
                out.to_top = flow as i16;
                if budget.spend(flow, &mut out.next, p.min_liquid) {
                    return out;
                }
            }
        }
    }

    // Grid edges behave as walls
    let left = if x == 0 { Cell::solid() } else { *fast!(cells, [idx - 1]) };
    let right = if x + 1 == width { Cell::solid() } else { *fast!(cells, [idx + 1]) };
    let remaining_before_sideways = budget.remaining;

    if !left.blocks_flow(p.holes_drain) {
        let mut flow = (budget.remaining - left.liquid as i32) / 4;
        if flow > 0 {
            if right.blocks_flow(p.holes_drain) || budget.remaining < right.liquid as i32 {
                flow *= p.horizontal_flow_factor;
            }
            if flow >= p.min_liquid {
                flow = p.damp(flow);
            }
            let flow = flow.min(budget.remaining);
            out.to_left = flow as i16;
            if budget.spend(flow, &mut out.next, p.min_liquid) {
                return out;
            }
        }
    }

    if !right.blocks_flow(p.holes_drain) {
        let mut flow = budget.remaining - right.liquid as i32;
        if flow > 0 {
            // uneven denominators: with both sides open, leftward flow wins
            if left.blocks_flow(p.holes_drain) || remaining_before_sideways < left.liquid as i32 {
                flow = flow * p.horizontal_flow_factor / 4;
            } else {
                flow /= 3;
            }
            if flow >= p.min_liquid {
                flow = p.damp(flow);
            }
            let flow = flow.min(budget.remaining);
            out.to_right = flow as i16;
            budget.spend(flow, &mut out.next, p.min_liquid);
        }
    }

    out
}

/// Scan row `y` left to right, folding sideways flow into the neighbours.
///
/// Cell `x - 1` is only published once cell `x` is known, since the leftward
/// flow of `x` lands in it.
pub(super) fn compute_row(
    cells: &[Cell],
    row_out: &mut [FlowDelta],
    y: usize,
    width: usize,
    height: usize,
    p: &WaterParams,
) {
    let offset = y * width;
    let mut pending = cell_flow(cells, offset, 0, y, width, height, p);
    let mut inflow_from_left = 0i32;

    for x in 1..width {
        let current = cell_flow(cells, offset + x, x, y, width, height, p);
        fast!(row_out, [x - 1] = pending.publish(inflow_from_left + current.to_left as i32));
        inflow_from_left = pending.to_right as i32;
        pending = current;
    }
    fast!(row_out, [width - 1] = pending.publish(inflow_from_left));
}

/// Phase 1 over the whole grid. Reads `cells` only; writes one row of
/// `deltas` per task.
pub fn compute_flows(
    cells: &[Cell],
    deltas: &mut [FlowDelta],
    width: usize,
    height: usize,
    params: &WaterParams,
) {
    assert!(
        cells.len() == width * height && deltas.len() == cells.len(),
        "compute_flows: {} cells / {} deltas for a {}x{} grid",
        cells.len(),
        deltas.len(),
        width,
        height
    );

    #[cfg(feature = "parallel")]
    {
        deltas
            .par_chunks_mut(width)
            .enumerate()
            .for_each(|(y, row_out)| compute_row(cells, row_out, y, width, height, params));
    }

    #[cfg(not(feature = "parallel"))]
    {
        for (y, row_out) in deltas.chunks_mut(width).enumerate() {
            compute_row(cells, row_out, y, width, height, params);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cell::SourceRate;

    #[test]
    fn dry_cell_is_skipped() {
        let cells = [Cell::water(0), Cell::water(0)];
        let f = cell_flow(&cells, 0, 0, 0, 2, 1, &WaterParams::default());
        assert_eq!(f, CellFlow::unchanged(Cell::water(0)));
    }

    #[test]
    fn left_wins_when_both_sides_open() {
        let p = WaterParams::default();
        let cells = [Cell::water(0), Cell::water(400), Cell::water(0)];
        let f = cell_flow(&cells, 1, 1, 0, 3, 1, &p);
        // left: 400 / 4 = 100, damped to 80
        assert_eq!(f.to_left, 80);
        // right: (320 - 0) / 3 = 106, damped to 84
        assert_eq!(f.to_right, 84);
        assert_eq!(f.next.liquid, 400 - 80 - 84);
    }

    #[test]
    fn source_emits_without_spending() {
        let p = WaterParams::default();
        let cells = [Cell::water(0), Cell::source(SourceRate(100)), Cell::water(0)];
        let f = cell_flow(&cells, 1, 1, 0, 3, 1, &p);
        assert_eq!(f.to_left, 20);
        assert_eq!(f.to_right, 26);
        assert_eq!(f.next, Cell::source(SourceRate(100)));
    }

    #[test]
    fn early_stop_skips_remaining_directions() {
        let p = WaterParams::default();
        // 2 wide, 2 tall: the top-left cell empties downward and never looks sideways
        let cells = [Cell::water(0), Cell::solid(), Cell::water(50), Cell::water(0)];
        let f = cell_flow(&cells, 2, 0, 1, 2, 2, &p);
        assert_eq!(f.to_bottom, 50);
        assert_eq!(f.to_right, 0);
        assert_eq!(f.next.liquid, 0);
    }

    #[test]
    fn row_fold_conserves_sideways_flow() {
        let p = WaterParams::default();
        let cells = [Cell::water(0), Cell::water(400), Cell::water(0)];
        let mut out = [FlowDelta::default(); 3];
        compute_row(&cells, &mut out, 0, 3, 1, &p);
        let liquids: Vec<i16> = out.iter().map(|d| d.next.liquid).collect();
        assert_eq!(liquids, vec![80, 236, 84]);
    }
}
