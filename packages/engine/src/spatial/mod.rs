//! Spatial storage: the cell grid and the light buffers

pub mod grid;
pub mod light_map;
