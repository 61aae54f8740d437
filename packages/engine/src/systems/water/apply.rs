//! Phase 2: commit phase 1 results, adding vertical inflow from the rows
//! above and below.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::domain::cell::{clamp_liquid, Cell, CellKind, FlowDelta};

pub(super) fn apply_row(
    row: &mut [Cell],
    deltas: &[FlowDelta],
    y: usize,
    width: usize,
    height: usize,
    min_liquid: i32,
) {
    let offset = y * width;
    for x in 0..width {
        let idx = offset + x;
        let mut next = fast!(deltas, [idx]).next;
        // Solid/Hole cells are never flow targets; sources keep their rate
        if next.kind != CellKind::AirOrWater {
            continue;
        }

        let mut liquid = next.liquid as i32;
        if y + 1 != height {
            liquid += fast!(deltas, [idx + width]).to_bottom as i32;
        }
        if y != 0 {
            liquid += fast!(deltas, [idx - width]).to_top as i32;
        }

        if liquid < min_liquid {
            fast!(row, [x] = Cell::default());
        } else {
            next.liquid = clamp_liquid(liquid);
            fast!(row, [x] = next);
        }
    }
}

/// Phase 2 over the whole grid. Reads `deltas` only; writes one row of
/// `cells` per task.
pub fn apply_flows(
    cells: &mut [Cell],
    deltas: &[FlowDelta],
    width: usize,
    height: usize,
    min_liquid: i32,
) {
    assert!(
        cells.len() == width * height && deltas.len() == cells.len(),
        "apply_flows: {} cells / {} deltas for a {}x{} grid",
        cells.len(),
        deltas.len(),
        width,
        height
    );

    #[cfg(feature = "parallel")]
    {
        cells
            .par_chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| apply_row(row, deltas, y, width, height, min_liquid));
    }

    #[cfg(not(feature = "parallel"))]
    {
        for (y, row) in cells.chunks_mut(width).enumerate() {
            apply_row(row, deltas, y, width, height, min_liquid);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn delta(liquid: i32, to_bottom: i16, to_top: i16) -> FlowDelta {
        FlowDelta {
            next: Cell::water(liquid),
            to_bottom,
            to_top,
        }
    }

    #[test]
    fn vertical_inflow_is_summed_from_both_neighbour_rows() {
        // 2x3 column pair; middle row receives from above and below
        let deltas = [
            delta(10, 0, 7),
            FlowDelta { next: Cell::solid(), ..FlowDelta::default() },
            delta(20, 0, 0),
            FlowDelta { next: Cell::solid(), ..FlowDelta::default() },
            delta(30, 5, 0),
            FlowDelta { next: Cell::solid(), ..FlowDelta::default() },
        ];
        let mut cells = [Cell::default(); 6];
        apply_flows(&mut cells, &deltas, 2, 3, 4);
        assert_eq!(cells[2].liquid, 20 + 5 + 7);
        // bottom row only takes from above, top row only from below
        assert_eq!(cells[0].liquid, 10);
        assert_eq!(cells[4].liquid, 30);
    }

    #[test]
    fn non_water_cells_are_left_untouched() {
        let deltas = [
            FlowDelta { next: Cell::hole(), to_bottom: 0, to_top: 0 },
            delta(50, 0, 0),
        ];
        let mut cells = [Cell::solid(), Cell::default()];
        apply_flows(&mut cells, &deltas, 2, 1, 4);
        assert_eq!(cells[0], Cell::solid());
        assert_eq!(cells[1].liquid, 50);
    }

    #[test]
    fn floor_resets_to_default() {
        let mut next = Cell::water(3);
        next.option = 9;
        let deltas = [
            FlowDelta { next, to_bottom: 0, to_top: 0 },
            delta(4, 0, 0),
        ];
        let mut cells = [Cell::default(); 2];
        apply_flows(&mut cells, &deltas, 2, 1, 4);
        assert_eq!(cells[0], Cell::default());
        assert_eq!(cells[1].liquid, 4);
    }
}
