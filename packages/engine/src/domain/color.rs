//! Color24 - 3-channel byte color used for light sources, the light field
//! and per-cell transmittance.
//!
//! Transmittance channels are /256 fixed-point multipliers: a channel value of
//! 200 keeps 200/256 of the light passing through the cell.

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color24 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color24 {
    pub const BLACK: Color24 = Color24::new(0, 0, 0);
    pub const WHITE: Color24 = Color24::new(255, 255, 255);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    #[inline]
    pub const fn gray(v: u8) -> Self {
        Self::new(v, v, v)
    }

    /// Float color in [0,1] with alpha premultiplied into each channel
    pub fn from_rgba_f32(r: f32, g: f32, b: f32, a: f32) -> Self {
        // float -> int `as` casts saturate, NaN maps to 0
        Self::new(
            (r * a * 255.0) as u8,
            (g * a * 255.0) as u8,
            (b * a * 255.0) as u8,
        )
    }

    /// Decode a 3-3-2 packed byte (rrrgggbb) to full-range channels
    pub const fn from_rgb332(rgb: u8) -> Self {
        let r = (rgb >> 5) & 0b111;
        let g = (rgb >> 2) & 0b111;
        let b = rgb & 0b11;
        Self::new(
            ((r as u16 * 255) / 7) as u8,
            ((g as u16 * 255) / 7) as u8,
            b * 85,
        )
    }

    /// Quantize to a 3-3-2 packed byte (nearest level per channel)
    pub const fn to_rgb332(self) -> u8 {
        let r = ((self.r as u16 * 7 + 127) / 255) as u8;
        let g = ((self.g as u16 * 7 + 127) / 255) as u8;
        let b = ((self.b as u16 * 3 + 127) / 255) as u8;
        (r << 5) | (g << 2) | b
    }

    /// Pack as `0x00BBGGRR`
    #[inline]
    pub const fn to_u32(self) -> u32 {
        self.r as u32 | (self.g as u32) << 8 | (self.b as u32) << 16
    }

    /// Unpack from `0x??BBGGRR` (top byte ignored)
    #[inline]
    pub const fn from_u32(v: u32) -> Self {
        Self::new(v as u8, (v >> 8) as u8, (v >> 16) as u8)
    }

    /// Opaque ABGR pixel (`0xFFBBGGRR`), little-endian bytes `[R, G, B, A]`
    #[inline]
    pub const fn to_abgr(self) -> u32 {
        0xFF00_0000 | self.to_u32()
    }

    #[inline]
    pub const fn is_zero(self) -> bool {
        self.to_u32() == 0
    }

    /// True when every channel of `self` is <= the matching channel of `other`
    #[inline]
    pub const fn le_all(self, other: Color24) -> bool {
        self.r <= other.r && self.g <= other.g && self.b <= other.b
    }

    #[inline]
    pub fn max(self, other: Color24) -> Self {
        Self::new(self.r.max(other.r), self.g.max(other.g), self.b.max(other.b))
    }

    #[inline]
    pub fn set_max(&mut self, other: Color24) {
        *self = self.max(other);
    }

    /// `channel * medium / 256` per channel
    #[inline]
    pub const fn attenuate(self, medium: Color24) -> Self {
        Self::new(
            ((self.r as u16 * medium.r as u16) >> 8) as u8,
            ((self.g as u16 * medium.g as u16) >> 8) as u8,
            ((self.b as u16 * medium.b as u16) >> 8) as u8,
        )
    }

    /// Scalar multiply, truncating and clamping each channel to 0..=255
    #[inline]
    pub fn saturating_scale(self, k: f32) -> Self {
        Self::new(
            (self.r as f32 * k) as u8,
            (self.g as f32 * k) as u8,
            (self.b as f32 * k) as u8,
        )
    }
}

impl std::ops::Mul<f32> for Color24 {
    type Output = Color24;

    fn mul(self, k: f32) -> Color24 {
        self.saturating_scale(k)
    }
}

impl std::fmt::Display for Color24 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{},{})", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attenuate_is_shift_by_eight() {
        let c = Color24::new(255, 100, 1).attenuate(Color24::gray(200));
        assert_eq!(c, Color24::new(199, 78, 0));
        assert_eq!(Color24::WHITE.attenuate(Color24::gray(255)), Color24::gray(254));
    }

    #[test]
    fn max_merges_per_channel() {
        let mut a = Color24::new(10, 200, 30);
        a.set_max(Color24::new(50, 20, 30));
        assert_eq!(a, Color24::new(50, 200, 30));
    }

    #[test]
    fn packed_u32_layout_is_rgb_low_to_high() {
        let c = Color24::new(0x11, 0x22, 0x33);
        assert_eq!(c.to_u32(), 0x0033_2211);
        assert_eq!(Color24::from_u32(0xAB33_2211), c);
        assert_eq!(c.to_abgr(), 0xFF33_2211);
        assert!(Color24::BLACK.is_zero());
        assert!(!Color24::new(0, 0, 1).is_zero());
    }

    #[test]
    fn rgb332_decodes_full_range() {
        assert_eq!(Color24::from_rgb332(0xFF), Color24::WHITE);
        assert_eq!(Color24::from_rgb332(0x00), Color24::BLACK);
        assert_eq!(Color24::from_rgb332(0b111_000_00), Color24::new(255, 0, 0));
        assert_eq!(Color24::from_rgb332(0b000_100_01), Color24::new(0, 145, 85));
    }

    #[test]
    fn rgb332_quantize_is_stable_on_decoded_values() {
        for byte in [0x00u8, 0x25, 0x6E, 0x93, 0xDA, 0xFF] {
            assert_eq!(Color24::from_rgb332(byte).to_rgb332(), byte);
        }
    }

    #[test]
    fn scalar_multiply_saturates() {
        let c = Color24::new(116, 97, 82);
        assert_eq!(c * 0.5, Color24::new(58, 48, 41));
        assert_eq!(c * 4.0, Color24::WHITE);
        assert_eq!(c * -1.0, Color24::BLACK);
    }

    #[test]
    fn premultiplied_float_color() {
        assert_eq!(Color24::from_rgba_f32(1.0, 0.5, 0.0, 1.0), Color24::new(255, 127, 0));
        assert_eq!(Color24::from_rgba_f32(1.0, 1.0, 1.0, 0.0), Color24::BLACK);
    }

    #[test]
    fn le_all_requires_every_channel() {
        assert!(Color24::new(1, 2, 3).le_all(Color24::new(1, 2, 3)));
        assert!(!Color24::new(1, 2, 4).le_all(Color24::new(9, 9, 3)));
    }
}
