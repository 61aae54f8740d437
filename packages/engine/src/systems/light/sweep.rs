//! Line sweep - carries the brightest light seen so far along one line,
//! attenuating it by each traversed cell's transmittance.

use crate::domain::color::Color24;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Index 0 towards the end
    Forward,
    /// End towards index 0
    Backward,
}

/// Transmittance of the cells on one line, read at `start + i * stride`
#[derive(Clone, Copy)]
pub struct MediumLine<'a> {
    data: &'a [Color24],
    start: usize,
    stride: usize,
}

impl<'a> MediumLine<'a> {
    pub fn contiguous(data: &'a [Color24]) -> Self {
        Self { data, start: 0, stride: 1 }
    }

    pub fn strided(data: &'a [Color24], start: usize, stride: usize) -> Self {
        Self { data, start, stride }
    }

    /// Whether `len` entries from `start` stay inside the buffer
    pub fn covers(&self, len: usize) -> bool {
        if len == 0 {
            return true;
        }
        (len - 1)
            .checked_mul(self.stride)
            .and_then(|offset| offset.checked_add(self.start))
            .map_or(false, |last| last < self.data.len())
    }

    #[inline]
    fn at(&self, i: usize) -> Color24 {
        *fast!(self.data, [self.start + i * self.stride])
    }
}

/// Merge one channel: a brighter cell takes over the carry, otherwise the
/// carry lights the cell.
#[inline(always)]
fn carry_channel(carried: &mut u8, cell: &mut u8) {
    if *carried < *cell {
        *carried = *cell;
    } else {
        *cell = *carried;
    }
}

/// One-directional sweep over `cells`, in place.
///
/// Propagation starts at the first non-black cell. The carry is attenuated by
/// the cell it leaves, except when the next cell is already at least as bright
/// in every channel (it takes over the carry on the following step anyway).
/// The last cell merges the final carry by per-channel max.
pub fn sweep(cells: &mut [Color24], medium: MediumLine<'_>, dir: Direction) {
    let n = cells.len();
    if n == 0 {
        return;
    }
    assert!(
        medium.covers(n),
        "sweep: medium of {} entries (start {}, stride {}) is too short for {} cells",
        medium.data.len(),
        medium.start,
        medium.stride,
        n
    );
    let pos = |k: usize| match dir {
        Direction::Forward => k,
        Direction::Backward => n - 1 - k,
    };

    let mut carried = Color24::BLACK;
    for k in 0..n - 1 {
        let i = pos(k);
        let mut cell = *fast!(cells, [i]);
        if cell.is_zero() && carried.is_zero() {
            continue;
        }

        carry_channel(&mut carried.r, &mut cell.r);
        carry_channel(&mut carried.g, &mut cell.g);
        carry_channel(&mut carried.b, &mut cell.b);
        fast!(cells, [i] = cell);

        let next = *fast!(cells, [pos(k + 1)]);
        if !carried.le_all(next) {
            carried = carried.attenuate(medium.at(i));
        }
    }

    let last = pos(n - 1);
    let merged = (*fast!(cells, [last])).max(carried);
    fast!(cells, [last] = merged);
}

/// Forward then backward sweep: the line converges to the max of light
/// travelling either way along it.
pub fn sweep_line(cells: &mut [Color24], medium: MediumLine<'_>) {
    sweep(cells, medium, Direction::Forward);
    sweep(cells, medium, Direction::Backward);
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color24 = Color24::new(255, 0, 0);

    fn reds(cells: &[Color24]) -> Vec<u8> {
        cells.iter().map(|c| c.r).collect()
    }

    #[test]
    fn single_source_fades_both_ways() {
        let medium = vec![Color24::gray(200); 5];
        let mut line = vec![Color24::BLACK; 5];
        line[2] = RED;
        sweep_line(&mut line, MediumLine::contiguous(&medium));
        assert_eq!(reds(&line), vec![155, 199, 255, 199, 155]);
        assert!(line.iter().all(|c| c.g == 0 && c.b == 0));
    }

    #[test]
    fn forward_only_lights_downstream() {
        let medium = vec![Color24::gray(128); 4];
        let mut line = vec![Color24::BLACK; 4];
        line[1] = RED;
        sweep(&mut line, MediumLine::contiguous(&medium), Direction::Forward);
        assert_eq!(reds(&line), vec![0, 255, 127, 63]);

        let mut line = vec![Color24::BLACK; 4];
        line[1] = RED;
        sweep(&mut line, MediumLine::contiguous(&medium), Direction::Backward);
        assert_eq!(reds(&line), vec![127, 255, 0, 0]);
    }

    #[test]
    fn brighter_cell_takes_over_the_carry() {
        let medium = vec![Color24::gray(128); 4];
        let mut line = vec![Color24::new(200, 0, 0), Color24::BLACK, Color24::new(150, 0, 0), Color24::BLACK];
        sweep(&mut line, MediumLine::contiguous(&medium), Direction::Forward);
        // 200 -> 100 at index 1, index 2's own 150 wins, then 75
        assert_eq!(reds(&line), vec![200, 100, 150, 75]);
    }

    #[test]
    fn channels_propagate_independently() {
        let medium = vec![Color24::gray(128); 3];
        let mut line = vec![Color24::new(200, 0, 0), Color24::new(0, 0, 100), Color24::BLACK];
        sweep(&mut line, MediumLine::contiguous(&medium), Direction::Forward);
        assert_eq!(line[1], Color24::new(100, 0, 100));
        assert_eq!(line[2], Color24::new(50, 0, 50));
    }

    #[test]
    fn strided_medium_reads_every_stride() {
        // a 2-wide buffer; the line runs down column 1
        let medium = vec![
            Color24::gray(0),
            Color24::gray(128),
            Color24::gray(0),
            Color24::gray(128),
            Color24::gray(0),
            Color24::gray(128),
        ];
        let mut column = vec![RED, Color24::BLACK, Color24::BLACK];
        sweep(&mut column, MediumLine::strided(&medium, 1, 2), Direction::Forward);
        assert_eq!(reds(&column), vec![255, 127, 63]);
    }

    #[test]
    fn opaque_cell_stops_light() {
        let medium = vec![Color24::gray(200), Color24::gray(0), Color24::gray(200)];
        let mut line = vec![RED, Color24::BLACK, Color24::BLACK];
        sweep_line(&mut line, MediumLine::contiguous(&medium));
        assert_eq!(reds(&line), vec![255, 199, 0]);
    }

    #[test]
    fn dark_line_stays_dark() {
        let medium = vec![Color24::gray(255); 6];
        let mut line = vec![Color24::BLACK; 6];
        sweep_line(&mut line, MediumLine::contiguous(&medium));
        assert!(line.iter().all(|c| c.is_zero()));
    }

    #[test]
    fn medium_view_bounds() {
        let medium = vec![Color24::gray(128); 6];
        assert!(MediumLine::contiguous(&medium).covers(6));
        assert!(!MediumLine::contiguous(&medium).covers(7));
        assert!(MediumLine::strided(&medium, 1, 2).covers(3));
        assert!(!MediumLine::strided(&medium, 1, 2).covers(4));
        assert!(MediumLine::strided(&medium, 0, usize::MAX).covers(1));
        assert!(!MediumLine::strided(&medium, 0, usize::MAX).covers(2));
        assert!(MediumLine::contiguous(&[]).covers(0));
    }

    #[test]
    #[should_panic(expected = "too short")]
    fn short_medium_is_rejected() {
        let medium = [Color24::gray(128)];
        let mut line = vec![Color24::BLACK; 64];
        line[0] = RED;
        sweep(&mut line, MediumLine::contiguous(&medium), Direction::Forward);
    }

    #[test]
    #[should_panic(expected = "too short")]
    fn strided_view_past_the_end_is_rejected() {
        let medium = vec![Color24::gray(128); 6];
        let mut column = vec![Color24::BLACK; 4];
        sweep_line(&mut column, MediumLine::strided(&medium, 1, 2));
    }

    #[test]
    fn single_cell_line_is_unchanged() {
        let medium = [Color24::gray(200)];
        let mut line = [RED];
        sweep_line(&mut line, MediumLine::contiguous(&medium));
        assert_eq!(line, [RED]);
    }
}
