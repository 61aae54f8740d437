use super::super::*;

impl CellGrid {
    // === Raw pointer for JS interop (4 bytes per cell: kind, option, liquid) ===
    pub fn cells_ptr(&self) -> *const Cell {
        self.cells.as_ptr()
    }
}
