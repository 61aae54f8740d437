//! Light - separable max-attenuation propagation
//!
//! One pass per tick:
//! 1. field := sources
//! 2. bidirectional sweep over every row
//! 3. bidirectional sweep over every column of the row-converged field
//!
//! Rows (then columns) are the unit of parallel work. Columns are gathered
//! into a column-major scratch buffer so every task owns one contiguous
//! slice; the row pass joins before the gather starts.
//!
//! Row-then-column is an approximation: light does not bend around an
//! obstacle within one tick.

mod medium;
mod sweep;

pub use medium::{compute_transmittance, transmittance_of, LightParams};
pub use sweep::{sweep, sweep_line, Direction, MediumLine};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::domain::color::Color24;
use crate::spatial::light_map::LightMap;

fn sweep_rows(field: &mut [Color24], medium: &[Color24], width: usize) {
    #[cfg(feature = "parallel")]
    {
        field
            .par_chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| sweep_line(row, MediumLine::strided(medium, y * width, 1)));
    }

    #[cfg(not(feature = "parallel"))]
    {
        for (y, row) in field.chunks_mut(width).enumerate() {
            sweep_line(row, MediumLine::strided(medium, y * width, 1));
        }
    }
}

#[inline]
fn gather_and_sweep(
    column: &mut [Color24],
    field: &[Color24],
    medium: &[Color24],
    x: usize,
    width: usize,
) {
    for (y, c) in column.iter_mut().enumerate() {
        *c = *fast!(field, [y * width + x]);
    }
    sweep_line(column, MediumLine::strided(medium, x, width));
}

#[inline]
fn scatter_row(row: &mut [Color24], scratch: &[Color24], y: usize, height: usize) {
    for (x, c) in row.iter_mut().enumerate() {
        *c = *fast!(scratch, [x * height + y]);
    }
}

fn sweep_columns(
    field: &mut [Color24],
    medium: &[Color24],
    scratch: &mut [Color24],
    width: usize,
    height: usize,
) {
    #[cfg(feature = "parallel")]
    {
        let rows: &[Color24] = field;
        scratch
            .par_chunks_mut(height)
            .enumerate()
            .for_each(|(x, column)| gather_and_sweep(column, rows, medium, x, width));

        let scratch: &[Color24] = scratch;
        field
            .par_chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| scatter_row(row, scratch, y, height));
    }

    #[cfg(not(feature = "parallel"))]
    {
        for (x, column) in scratch.chunks_mut(height).enumerate() {
            gather_and_sweep(column, field, medium, x, width);
        }
        for (y, row) in field.chunks_mut(width).enumerate() {
            scatter_row(row, scratch, y, height);
        }
    }
}

/// Row pass, barrier, column pass over an already seeded `field`.
/// `scratch` must hold `width * height` entries.
pub fn propagate(
    field: &mut [Color24],
    medium: &[Color24],
    scratch: &mut [Color24],
    width: usize,
    height: usize,
) {
    let size = width * height;
    assert!(
        field.len() == size && medium.len() == size && scratch.len() == size,
        "propagate: field {} / medium {} / scratch {} for a {}x{} grid",
        field.len(),
        medium.len(),
        scratch.len(),
        width,
        height
    );
    if size == 0 {
        return;
    }

    sweep_rows(field, medium, width);
    sweep_columns(field, medium, scratch, width, height);
}

/// Rebuild the light field of `map` from its sources and current medium
pub fn propagate_light(map: &mut LightMap) {
    let width = map.width() as usize;
    let height = map.height() as usize;
    map.reset_field_from_sources();
    propagate(&mut map.field, &map.medium, &mut map.column_scratch, width, height);
}
