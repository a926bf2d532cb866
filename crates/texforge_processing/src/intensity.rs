//! Luma grayscale and average-intensity reduction.
//!
//! Both operations allocate a new buffer and keep each pixel's alpha.

use texforge_core::{Pixel, RgbaBuffer};

/// Red weight of the luma formula, in hundredths.
pub const LUMA_R: u32 = 30;
/// Green weight of the luma formula, in hundredths.
pub const LUMA_G: u32 = 59;
/// Blue weight of the luma formula, in hundredths.
pub const LUMA_B: u32 = 11;

/// Rounded luma of one pixel, halves rounding up.
///
/// Integer arithmetic keeps `.5` ties exact.
#[inline]
#[must_use]
pub fn luma(px: Pixel) -> u8 {
    let value = LUMA_R * u32::from(px.r) + LUMA_G * u32::from(px.g) + LUMA_B * u32::from(px.b);
    ((value + 50) / 100) as u8
}

/// Average intensity of one pixel scaled to `[0, 1]`.
///
/// The channel average is an integer division before scaling.
#[inline]
#[must_use]
pub fn unit_intensity(px: Pixel) -> f32 {
    f32::from(px.average_intensity()) / 255.0
}

/// Grayscale copy using `round(0.30 r + 0.59 g + 0.11 b)`.
#[must_use]
pub fn grayscale(src: &RgbaBuffer) -> RgbaBuffer {
    map_pixels(src, |px| Pixel::gray(luma(px), px.a))
}

/// Gray copy using `(r + g + b) / 3` with integer division.
///
/// Preprocessing step for edge and bump extraction.
#[must_use]
pub fn average_intensity(src: &RgbaBuffer) -> RgbaBuffer {
    map_pixels(src, |px| Pixel::gray(px.average_intensity(), px.a))
}

fn map_pixels(src: &RgbaBuffer, f: impl Fn(Pixel) -> Pixel) -> RgbaBuffer {
    let mut out = src.clone();
    for px in out.pixels_mut() {
        *px = f(*px);
    }
    out
}
