//! Water - two-phase cellular automaton advancing liquid one tick at a time
//!
//! Phase 1 (compute): every row is scanned left to right against the previous
//! tick's cells only, producing one `FlowDelta` per cell. Horizontal flow is
//! folded into the neighbours' `next` inside the row scan; vertical flow is
//! published as `to_top`/`to_bottom` because adjacent rows run concurrently.
//!
//! Phase 2 (apply): every row sums its own `next` with the vertical inflow the
//! rows above and below published, then floors tiny volumes to empty.
//!
//! Rows are the unit of parallel work in both phases. The two phases are
//! separate fork-joins, so phase 2 never observes a partially computed
//! phase 1.

mod apply;
mod compute;

pub use apply::apply_flows;
pub use compute::compute_flows;

use crate::spatial::grid::CellGrid;

/// Solver parameters. Ranges are the caller's responsibility:
/// `max_liquid >= 1`, `0 <= flow_speed <= 1`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaterParams {
    /// Capacity of one cell before compression kicks in
    pub max_liquid: i32,
    /// Volumes below this empty out at the end of a tick
    pub min_liquid: i32,
    /// Extra volume a cell accepts per cell of pressure above it
    pub compression: i32,
    /// Damping applied to transfers, in [0, 1]
    pub flow_speed: f32,
    /// Sideways bias when the opposite side is walled off or fuller
    pub horizontal_flow_factor: i32,
    /// Holes swallow inflow instead of blocking it
    pub holes_drain: bool,
}

impl Default for WaterParams {
    fn default() -> Self {
        Self {
            max_liquid: 512,
            min_liquid: 4,
            compression: 15,
            flow_speed: 0.8,
            horizontal_flow_factor: 3,
            holes_drain: false,
        }
    }
}

impl WaterParams {
    /// Level two vertically adjacent volumes settle at.
    ///
    /// - together within one cell: the lower cell fills to capacity
    /// - up to twice capacity: compressed blend
    /// - beyond: even split biased by `compression`
    #[inline]
    pub fn equalize(&self, remaining: i32, destination: i32) -> i32 {
        let sum = (remaining + destination) as i64;
        let max = self.max_liquid as i64;
        let compression = self.compression as i64;
        if sum <= max {
            self.max_liquid
        } else if sum < 2 * max + compression {
            ((max * max + sum * compression) / (max + compression)) as i32
        } else {
            ((sum + compression) / 2) as i32
        }
    }

    #[inline]
    pub(crate) fn damp(&self, flow: i32) -> i32 {
        (flow as f32 * self.flow_speed) as i32
    }
}

/// Advance the grid by exactly one tick, in place
pub fn step_water(grid: &mut CellGrid, params: &WaterParams) {
    grid.assert_consistent();
    let width = grid.width() as usize;
    let height = grid.height() as usize;

    compute_flows(&grid.cells, &mut grid.deltas, width, height, params);
    apply_flows(&mut grid.cells, &grid.deltas, width, height, params.min_liquid);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cell::{Cell, FlowDelta, SourceRate};
    use proptest::prelude::*;

    fn row(cells: &[Cell]) -> CellGrid {
        CellGrid::from_cells(cells.len() as u32, 1, cells.to_vec())
    }

    fn liquids(grid: &CellGrid) -> Vec<i16> {
        grid.cells.iter().map(|c| c.liquid).collect()
    }

    #[test]
    fn equalize_covers_all_three_regimes() {
        let p = WaterParams::default();
        // fits in one cell
        assert_eq!(p.equalize(300, 200), 512);
        assert_eq!(p.equalize(512, 0), 512);
        // compressed blend: (512^2 + 600*15) / 527
        assert_eq!(p.equalize(600, 0), 514);
        // well past double capacity
        assert_eq!(p.equalize(1000, 100), 557);
    }

    #[test]
    fn three_cell_row_spreads_into_the_open_neighbour() {
        let p = WaterParams::default();
        let mut grid = row(&[Cell::water(512), Cell::water(0), Cell::solid()]);

        step_water(&mut grid, &p);
        assert_eq!(liquids(&grid), vec![205, 307, 0]);

        step_water(&mut grid, &p);
        assert_eq!(liquids(&grid), vec![265, 247, 0]);

        step_water(&mut grid, &p);
        assert_eq!(liquids(&grid), vec![255, 257, 0]);

        // settled within min_liquid, and stays there
        for _ in 0..20 {
            step_water(&mut grid, &p);
        }
        assert_eq!(liquids(&grid), vec![255, 257, 0]);
        assert_eq!(grid.cells[2], Cell::solid());
    }

    #[test]
    fn water_drops_into_dry_cell_undamped() {
        let p = WaterParams::default();
        let mut grid = CellGrid::from_cells(
            2,
            2,
            vec![Cell::water(0), Cell::solid(), Cell::water(100), Cell::solid()],
        );
        step_water(&mut grid, &p);
        assert_eq!(grid.get(0, 0).map(|c| c.liquid), Some(100));
        assert_eq!(grid.get(0, 1).map(|c| c.liquid), Some(0));
    }

    #[test]
    fn compressed_water_pushes_up_damped() {
        let p = WaterParams::default();
        let mut grid = CellGrid::from_cells(
            2,
            2,
            vec![Cell::water(600), Cell::solid(), Cell::water(0), Cell::solid()],
        );
        step_water(&mut grid, &p);
        // 600 - equalize(600, 0) = 86, damped to 68
        assert_eq!(grid.get(0, 0).map(|c| c.liquid), Some(532));
        assert_eq!(grid.get(0, 1).map(|c| c.liquid), Some(68));
    }

    #[test]
    fn source_never_drains() {
        let p = WaterParams::default();
        let rate = SourceRate(1024);
        let mut grid = row(&[Cell::source(rate), Cell::water(0), Cell::water(0), Cell::solid()]);
        for _ in 0..50 {
            step_water(&mut grid, &p);
            assert_eq!(grid.cells[0], Cell::source(rate));
        }
        assert!(grid.total_liquid() > 0);
    }

    #[test]
    fn tiny_volumes_evaporate() {
        let p = WaterParams::default();
        let mut grid = row(&[Cell::water(3), Cell::solid()]);
        step_water(&mut grid, &p);
        assert_eq!(grid.cells[0], Cell::default());
    }

    #[test]
    fn holes_block_by_default() {
        let p = WaterParams::default();
        let mut grid = row(&[Cell::water(100), Cell::hole(), Cell::water(0)]);
        step_water(&mut grid, &p);
        assert_eq!(liquids(&grid), vec![100, 0, 0]);
    }

    #[test]
    fn draining_holes_swallow_inflow() {
        let p = WaterParams {
            holes_drain: true,
            ..WaterParams::default()
        };
        let mut grid = row(&[Cell::water(100), Cell::hole(), Cell::water(0)]);
        step_water(&mut grid, &p);
        // 100 * 3 / 4 = 75, damped to 60, gone into the hole
        assert_eq!(liquids(&grid), vec![40, 0, 0]);
        assert_eq!(grid.cells[1], Cell::hole());
    }

    #[test]
    fn option_byte_survives_a_tick() {
        let p = WaterParams::default();
        let mut tagged = Cell::water(300);
        tagged.option = 7;
        let mut grid = row(&[tagged, Cell::solid()]);
        step_water(&mut grid, &p);
        assert_eq!(grid.cells[0].option, 7);
    }

    /// Both phases one row at a time, visiting rows in `order`
    fn step_rows_in_order(grid: &CellGrid, p: &WaterParams, order: &[usize]) -> Vec<Cell> {
        let (w, h) = (grid.width() as usize, grid.height() as usize);
        let mut deltas = vec![FlowDelta::default(); w * h];
        for &y in order {
            compute::compute_row(&grid.cells, &mut deltas[y * w..(y + 1) * w], y, w, h, p);
        }
        let mut cells = grid.cells.clone();
        for &y in order.iter().rev() {
            apply::apply_row(&mut cells[y * w..(y + 1) * w], &deltas, y, w, h, p.min_liquid);
        }
        cells
    }

    fn arb_cell() -> impl Strategy<Value = Cell> {
        prop_oneof![
            6 => (0i32..=700).prop_map(Cell::water),
            1 => Just(Cell::solid()),
            1 => Just(Cell::hole()),
            1 => (1i16..=1024).prop_map(|r| Cell::source(SourceRate(r))),
        ]
    }

    fn arb_grid_and_order() -> impl Strategy<Value = (CellGrid, Vec<usize>)> {
        (2u32..=7, 2u32..=7).prop_flat_map(|(w, h)| {
            (
                prop::collection::vec(arb_cell(), (w * h) as usize)
                    .prop_map(move |cells| CellGrid::from_cells(w, h, cells)),
                Just((0..h as usize).collect::<Vec<_>>()).prop_shuffle(),
            )
        })
    }

    proptest! {
        #[test]
        fn rows_are_independent_within_a_phase(
            (grid, order) in arb_grid_and_order(),
            holes_drain in any::<bool>(),
        ) {
            let p = WaterParams { holes_drain, ..WaterParams::default() };
            let expected = step_rows_in_order(&grid, &p, &order);

            let mut stepped = grid.clone();
            step_water(&mut stepped, &p);
            prop_assert_eq!(stepped.cells, expected);
        }
    }
}
