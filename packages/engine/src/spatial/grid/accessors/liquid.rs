use super::super::*;

impl CellGrid {
    /// Sum of liquid held by AirOrWater cells (sources excluded)
    pub fn total_liquid(&self) -> i64 {
        self.cells
            .iter()
            .filter(|c| c.is_air_or_water())
            .map(|c| c.liquid as i64)
            .sum()
    }

    /// Number of AirOrWater cells holding any liquid
    pub fn wet_cell_count(&self) -> u32 {
        let mut wet = 0u32;
        for c in self.cells.iter() {
            if c.is_air_or_water() && c.liquid > 0 {
                wet = wet.saturating_add(1);
            }
        }
        wet
    }
}
