use super::super::*;

impl CellGrid {
    /// Cell at (x, y), `None` outside the grid
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        if !self.in_bounds(x, y) {
            return None;
        }
        Some(self.cells[self.index(x as u32, y as u32)])
    }

    #[inline]
    pub fn get_idx(&self, idx: usize) -> Cell {
        self.cells[idx]
    }

    /// Overwrite one cell; returns false outside the grid
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        if !self.in_bounds(x, y) {
            return false;
        }
        let idx = self.index(x as u32, y as u32);
        self.cells[idx] = cell;
        true
    }

    /// Mutable cell at (x, y)
    #[inline]
    pub fn get_mut(&mut self, x: i32, y: i32) -> Option<&mut Cell> {
        if !self.in_bounds(x, y) {
            return None;
        }
        let idx = self.index(x as u32, y as u32);
        Some(&mut self.cells[idx])
    }

    /// One row, left to right
    #[inline]
    pub fn row(&self, y: u32) -> &[Cell] {
        let start = (y as usize) * (self.width as usize);
        &self.cells[start..start + self.width as usize]
    }

    /// Reset every cell to dry air
    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
        self.deltas.fill(FlowDelta::default());
    }
}
