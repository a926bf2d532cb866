//! # Bump and Normal Extraction
//!
//! - [`bump_map`]: Sobel gradients of the average-intensity image
//! - [`normal_map_packed`]: engine-specific packing, x in alpha, inverted y
//!   in rgb, z discarded
//! - [`normal_map_standard`]: conventional xyz-in-rgb encoding
//!
//! Normal extraction reads neighbours with **edge clamping**, unlike the
//! toroidal sampling used by the bump path. Both are kept as-is because
//! existing content was baked with them.

use texforge_core::{Pixel, RgbaBuffer};

use crate::convolution::Kernel;
use crate::intensity::{average_intensity, unit_intensity};
use crate::vector::Vec3;

/// Maps a unit component in `[-1, 1]` to `[0, 255]` scale.
const PACK_SCALE: f32 = 127.5;

/// Sobel bump map of `src`, fully opaque.
#[must_use]
pub fn bump_map(src: &RgbaBuffer) -> RgbaBuffer {
    let intensity = average_intensity(src);
    let horizontal = Kernel::sobel_x().convolve(&intensity);
    let vertical = Kernel::sobel_y().convolve(&intensity);

    let mut out = intensity;
    for ((dst, h), v) in out
        .pixels_mut()
        .iter_mut()
        .zip(horizontal.pixels())
        .zip(vertical.pixels())
    {
        *dst = Pixel::rgba(
            h.r.saturating_add(v.r),
            h.g.saturating_add(v.g),
            h.b.saturating_add(v.b),
            255,
        );
    }
    out
}

/// Surface normal at `(x, y)` from edge-clamped neighbour intensities.
fn surface_normal(src: &RgbaBuffer, x: i64, y: i64, strength: f32) -> Vec3 {
    let left = unit_intensity(src.get_clamped(x - 1, y));
    let right = unit_intensity(src.get_clamped(x + 1, y));
    let top = unit_intensity(src.get_clamped(x, y - 1));
    let bottom = unit_intensity(src.get_clamped(x, y + 1));

    let dx = Vec3::new(1.0, 0.0, (right - left) * strength);
    let dy = Vec3::new(0.0, 1.0, (bottom - top) * strength);
    dx.cross(dy).normalize()
}

#[inline]
fn pack_component(v: f32) -> u8 {
    ((v + 1.0) * PACK_SCALE) as u8
}

#[inline]
fn pack_inverted(v: f32) -> u8 {
    (255.0 - (v + 1.0) * PACK_SCALE) as u8
}

fn map_normals(src: &RgbaBuffer, strength: f32, encode: impl Fn(Vec3) -> Pixel) -> RgbaBuffer {
    let mut out = src.clone();
    let width = i64::from(src.width());
    for (idx, dst) in out.pixels_mut().iter_mut().enumerate() {
        let idx = idx as i64;
        *dst = encode(surface_normal(src, idx % width, idx / width, strength));
    }
    out
}

/// Normal map in the engine's packed layout.
///
/// `alpha = trunc((n.x + 1) * 127.5)`,
/// `r = g = b = trunc(255 - (n.y + 1) * 127.5)`. The z component is dropped.
/// Takes the original colour source, not a bump map.
#[must_use]
pub fn normal_map_packed(src: &RgbaBuffer, strength: f32) -> RgbaBuffer {
    map_normals(src, strength, |n| {
        Pixel::gray(pack_inverted(n.y), pack_component(n.x))
    })
}

/// Normal map with x, inverted y and z in r, g, b and opaque alpha.
#[must_use]
pub fn normal_map_standard(src: &RgbaBuffer, strength: f32) -> RgbaBuffer {
    map_normals(src, strength, |n| {
        Pixel::rgba(
            pack_component(n.x),
            pack_inverted(n.y),
            pack_component(n.z),
            255,
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_bump_is_black_opaque() {
        let src = RgbaBuffer::filled(4, 4, Pixel::rgba(90, 90, 90, 10));
        let out = bump_map(&src);
        assert!(out.pixels().iter().all(|&p| p == Pixel::rgba(0, 0, 0, 255)));
    }

    #[test]
    fn test_bump_responds_to_brighter_left() {
        // Bright right half: only columns with the brighter side on the
        // left respond, and x = 5 wraps onto dark column 0.
        let mut src = RgbaBuffer::filled(6, 6, Pixel::BLACK);
        for y in 0..6 {
            for x in 3..6 {
                src.set(x, y, Pixel::rgb(100, 100, 100));
            }
        }
        let out = bump_map(&src);
        for y in 0..6 {
            assert_eq!(out.get(2, y).unwrap().r, 0);
            assert_eq!(out.get(3, y).unwrap().r, 0);
            assert_eq!(out.get(5, y).unwrap().r, 255);
            assert_eq!(out.get(0, y).unwrap().r, 255);
        }
    }

    #[test]
    fn test_bump_exact_values() {
        #[rustfmt::skip]
        let levels = [
            10, 20, 30, 40,
            12, 18, 40, 44,
            30, 28, 26, 24,
        ];
        let mut src = RgbaBuffer::new(4, 3);
        for (px, &v) in src.pixels_mut().iter_mut().zip(&levels) {
            // Channels average to `v`; alpha is replaced.
            *px = Pixel::rgba(v - 1, v, v + 1, 7);
        }

        #[rustfmt::skip]
        let expected = [
            62,  0, 38, 100,
            100, 32,  0, 72,
            38,  0,  0, 40,
        ];
        let out = bump_map(&src);
        for (px, &v) in out.pixels().iter().zip(&expected) {
            assert_eq!(*px, Pixel::gray(v, 255));
        }
    }

    #[test]
    fn test_flat_packed_normal() {
        let src = RgbaBuffer::filled(3, 3, Pixel::rgb(40, 50, 60));
        let out = normal_map_packed(&src, 2.0);
        for px in out.pixels() {
            assert_eq!(*px, Pixel::rgba(127, 127, 127, 127));
        }
    }

    #[test]
    fn test_flat_standard_normal_points_out() {
        let src = RgbaBuffer::filled(2, 2, Pixel::WHITE);
        let out = normal_map_standard(&src, 1.0);
        assert_eq!(out.get(0, 0), Some(Pixel::rgba(127, 127, 255, 255)));
    }

    #[test]
    fn test_packed_normal_tilts_with_gradient() {
        // Intensity rises left to right: normal leans toward -x.
        let mut src = RgbaBuffer::new(3, 1);
        src.set(0, 0, Pixel::rgb(0, 0, 0));
        src.set(1, 0, Pixel::rgb(128, 128, 128));
        src.set(2, 0, Pixel::rgb(255, 255, 255));
        let out = normal_map_packed(&src, 1.0);
        assert!(out.get(1, 0).unwrap().a < 127);
    }
}
