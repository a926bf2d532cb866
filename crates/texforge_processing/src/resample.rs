//! # Bicubic Resampling
//!
//! Resizes RGBA buffers with a cubic B-spline kernel over a 4x4
//! neighbourhood.
//!
//! ## Sampling Rules
//!
//! - Source coordinate: `x * (src_w / dst_w) - 0.5`, split into
//!   `floor` + fraction
//! - Taps outside the source clamp to the nearest edge pixel (never wrap)
//! - All four channels are weighted; alpha is resampled like colour
//! - Each channel is **truncated** to a byte, not rounded
//!
//! The kernel weights sum to one, so a flat field resizes to itself. A tiny
//! bias is added before truncation so that accumulated floating error
//! (`254.99999999`) does not knock a flat value down by one.

use texforge_core::{Pixel, RgbaBuffer, TexforgeError, TexforgeResult};

/// Added to each accumulated channel before truncation.
pub const TRUNCATION_BIAS: f64 = 1e-7;

const ONE_SIXTH: f64 = 1.0 / 6.0;

/// Cubic B-spline weight for a tap at signed distance `t`.
///
/// Zero for `t > 2`; the truncated-power form is zero for `t <= -2` on its
/// own. Continuous at the breakpoints 0, ±1, ±2.
#[inline]
#[must_use]
pub fn cubic_weight(t: f64) -> f64 {
    if t > 2.0 {
        return 0.0;
    }

    let cube = |v: f64| if v <= 0.0 { 0.0 } else { v * v * v };
    ONE_SIXTH * (cube(t + 2.0) - 4.0 * cube(t + 1.0) + 6.0 * cube(t) - 4.0 * cube(t - 1.0))
}

/// Four clamped tap coordinates and their weights along one axis.
#[derive(Clone, Copy, Debug)]
struct AxisTaps {
    coords: [usize; 4],
    weights: [f64; 4],
}

impl AxisTaps {
    /// Taps for destination index `dst` along an axis of `src_len` pixels.
    ///
    /// `vertical` selects the legacy argument order: rows weigh
    /// `K(d - n)`, columns weigh `K(m - d)`. The kernel is symmetric, so both
    /// yield the same weights; the order is kept for bit-exact output.
    fn new(dst: u32, factor: f64, src_len: u32, vertical: bool) -> Self {
        let origin = f64::from(dst) * factor - 0.5;
        let base = origin.floor();
        let frac = origin - base;
        let max = i64::from(src_len) - 1;

        let mut coords = [0usize; 4];
        let mut weights = [0.0f64; 4];
        for (slot, n) in (-1i64..3).enumerate() {
            let offset = n as f64;
            weights[slot] = if vertical {
                cubic_weight(frac - offset)
            } else {
                cubic_weight(offset - frac)
            };
            coords[slot] = (base as i64 + n).clamp(0, max) as usize;
        }

        Self { coords, weights }
    }
}

/// Truncates an accumulated channel to a byte.
#[inline]
fn truncate_channel(value: f64) -> u8 {
    // Float-to-int `as` saturates at both ends.
    (value + TRUNCATION_BIAS) as u8
}

/// Resizes `src` to `new_width` x `new_height` with the bicubic kernel.
///
/// Copy-producing: `src` is untouched.
///
/// # Errors
///
/// Returns `SizeMismatch` if either the source or the target has a zero
/// dimension.
pub fn resize_bicubic(
    src: &RgbaBuffer,
    new_width: u32,
    new_height: u32,
) -> TexforgeResult<RgbaBuffer> {
    if src.is_empty() {
        return Err(TexforgeError::size_mismatch("cannot resize an empty buffer"));
    }
    if new_width == 0 || new_height == 0 {
        return Err(TexforgeError::size_mismatch(format!(
            "resize target {new_width}x{new_height} has a zero dimension"
        )));
    }

    let width = src.width();
    let height = src.height();
    let x_factor = f64::from(width) / f64::from(new_width);
    let y_factor = f64::from(height) / f64::from(new_height);

    // Column taps are identical for every row.
    let columns: Vec<AxisTaps> = (0..new_width)
        .map(|x| AxisTaps::new(x, x_factor, width, false))
        .collect();

    let pixels = src.pixels();
    let row_len = width as usize;
    let mut out = Vec::with_capacity(new_width as usize * new_height as usize);

    for y in 0..new_height {
        let rows = AxisTaps::new(y, y_factor, height, true);

        for cols in &columns {
            let mut acc = [0.0f64; 4];

            for (&row, &ky) in rows.coords.iter().zip(&rows.weights) {
                let line = &pixels[row * row_len..(row + 1) * row_len];
                for (&col, &kx) in cols.coords.iter().zip(&cols.weights) {
                    let k = ky * kx;
                    let px = line[col];
                    acc[0] += k * f64::from(px.r);
                    acc[1] += k * f64::from(px.g);
                    acc[2] += k * f64::from(px.b);
                    acc[3] += k * f64::from(px.a);
                }
            }

            out.push(Pixel::rgba(
                truncate_channel(acc[0]),
                truncate_channel(acc[1]),
                truncate_channel(acc[2]),
                truncate_channel(acc[3]),
            ));
        }
    }

    tracing::trace!(
        "Resized {}x{} -> {}x{}",
        width,
        height,
        new_width,
        new_height
    );

    RgbaBuffer::from_pixels(new_width, new_height, out)
}
