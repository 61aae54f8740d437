//! CellGrid - flat row-major cell storage for the liquid solver
//!
//! Addressing is `x + y * width` with the origin at the bottom-left:
//! `idx - width` is the cell below, `idx + width` the cell above.
//!
//! The phase 1 delta buffer lives next to the cells so both are allocated
//! once and always have matching dimensions.

use crate::domain::cell::{Cell, FlowDelta};

mod indexing;
mod accessors;

#[derive(Clone, Debug)]
pub struct CellGrid {
    width: u32,
    height: u32,
    size: usize,

    pub cells: Vec<Cell>,
    /// Phase 1 output, only meaningful between the two solver phases
    pub(crate) deltas: Vec<FlowDelta>,
}

impl CellGrid {
    /// Empty (all dry air) grid.
    ///
    /// Panics if `width < 2` or `height < 1`: the solver treats the two edge
    /// columns as closed walls and needs at least one real neighbour pair.
    pub fn new(width: u32, height: u32) -> Self {
        if width < 2 || height < 1 {
            log::error!("rejecting {}x{} cell grid", width, height);
        }
        assert!(
            width >= 2 && height >= 1,
            "CellGrid::new: grid must be at least 2x1, got {}x{}",
            width,
            height
        );
        let size = (width as usize) * (height as usize);
        Self {
            width,
            height,
            size,
            cells: vec![Cell::default(); size],
            deltas: vec![FlowDelta::default(); size],
        }
    }

    /// Grid from existing cells in row-major order (bottom row first)
    pub fn from_cells(width: u32, height: u32, cells: Vec<Cell>) -> Self {
        let mut grid = Self::new(width, height);
        assert_eq!(
            cells.len(),
            grid.size,
            "CellGrid::from_cells: {} cells for a {}x{} grid",
            cells.len(),
            width,
            height
        );
        grid.cells = cells;
        grid
    }

    /// Fatal check that every buffer still matches `width * height`
    #[inline]
    pub(crate) fn assert_consistent(&self) {
        assert!(
            self.cells.len() == self.size && self.deltas.len() == self.size,
            "CellGrid: buffer sizes (cells {}, deltas {}) do not match {}x{}",
            self.cells.len(),
            self.deltas.len(),
            self.width,
            self.height
        );
    }
}
