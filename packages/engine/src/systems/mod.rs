pub mod light;
pub mod water;
