//! LightMap - the light buffers sharing the cell grid's dimensions
//!
//! - `sources`: emissive overlay written by the caller between ticks
//! - `field`:   propagated light, rebuilt from `sources` every tick
//! - `medium`:  per-cell transmittance, regenerated from cell kinds every tick
//! - `column_scratch`: column-major copy of `field` for the column pass

use crate::domain::color::Color24;

#[derive(Clone, Debug)]
pub struct LightMap {
    width: u32,
    height: u32,
    size: usize,

    pub(crate) sources: Vec<Color24>,
    pub(crate) field: Vec<Color24>,
    pub(crate) medium: Vec<Color24>,
    pub(crate) column_scratch: Vec<Color24>,
}

impl LightMap {
    pub fn new(width: u32, height: u32) -> Self {
        let size = (width as usize) * (height as usize);
        Self {
            width,
            height,
            size,
            sources: vec![Color24::BLACK; size],
            field: vec![Color24::BLACK; size],
            medium: vec![Color24::BLACK; size],
            column_scratch: vec![Color24::BLACK; size],
        }
    }

    #[inline]
    pub fn width(&self) -> u32 { self.width }

    #[inline]
    pub fn height(&self) -> u32 { self.height }

    #[inline]
    pub fn size(&self) -> usize { self.size }

    #[inline]
    pub fn index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + x as usize
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32
    }

    // === Source overlay ===
    pub fn sources(&self) -> &[Color24] {
        &self.sources
    }

    pub fn sources_mut(&mut self) -> &mut [Color24] {
        &mut self.sources
    }

    /// Set one emissive cell; returns false outside the map
    pub fn set_source(&mut self, x: i32, y: i32, color: Color24) -> bool {
        if !self.in_bounds(x, y) {
            return false;
        }
        let idx = self.index(x as u32, y as u32);
        self.sources[idx] = color;
        true
    }

    pub fn get_source(&self, x: i32, y: i32) -> Option<Color24> {
        if !self.in_bounds(x, y) {
            return None;
        }
        Some(self.sources[self.index(x as u32, y as u32)])
    }

    pub fn clear_sources(&mut self) {
        self.sources.fill(Color24::BLACK);
    }

    // === Field ===
    pub fn field(&self) -> &[Color24] {
        &self.field
    }

    pub fn get_light(&self, x: i32, y: i32) -> Option<Color24> {
        if !self.in_bounds(x, y) {
            return None;
        }
        Some(self.field[self.index(x as u32, y as u32)])
    }

    /// Step (1) of the light pass: field := sources
    pub fn reset_field_from_sources(&mut self) {
        self.field.copy_from_slice(&self.sources);
    }

    // === Medium ===
    pub fn medium(&self) -> &[Color24] {
        &self.medium
    }

    pub fn medium_mut(&mut self) -> &mut [Color24] {
        &mut self.medium
    }

    pub fn field_ptr(&self) -> *const Color24 {
        self.field.as_ptr()
    }

    pub fn medium_ptr(&self) -> *const Color24 {
        self.medium.as_ptr()
    }

    /// Fatal check that every light buffer matches a `width x height` cell grid
    pub(crate) fn assert_matches(&self, width: u32, height: u32) {
        let ok = self.width == width
            && self.height == height
            && self.sources.len() == self.size
            && self.field.len() == self.size
            && self.medium.len() == self.size
            && self.column_scratch.len() == self.size;
        if !ok {
            log::error!(
                "light map {}x{} does not match cell grid {}x{}",
                self.width,
                self.height,
                width,
                height
            );
        }
        assert!(ok, "LightMap: buffers do not match a {}x{} grid", width, height);
    }
}
