//! # Border Processing
//!
//! In-place edge treatments for textures that carry a reserved border
//! ring around their content (see [`add_border`]).
//!
//! - [`dilate`]: bleeds opaque colour one ring into transparent neighbours
//! - [`wrap_border`]: fills the ring from the opposite side of the content
//! - [`clamp_border`]: fills the ring by replicating the outermost content
//!
//! Every operation mutates the caller's buffer. Wrap and clamp process
//! pixels in the legacy order, so narrow content (less than twice the
//! border) reads pixels that the same pass has already written.

use std::ops::Range;

use texforge_core::{Pixel, RgbaBuffer, TexforgeError, TexforgeResult};

/// Neighbour offsets visited by [`dilate`], in visiting order.
const NEIGHBOURS: [(i64, i64); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Which sides [`wrap_border`] fills.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WrapAxes {
    /// Fill left and right strips.
    pub left_right: bool,
    /// Fill top and bottom strips.
    pub top_bottom: bool,
}

impl Default for WrapAxes {
    fn default() -> Self {
        Self {
            left_right: true,
            top_bottom: true,
        }
    }
}

/// Which zones [`clamp_border`] fills.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct ClampZones {
    /// Left and right strips.
    pub left_right: bool,
    /// Top and bottom strips.
    pub top_bottom: bool,
    /// Top-left corner block.
    pub top_left: bool,
    /// Top-right corner block.
    pub top_right: bool,
    /// Bottom-left corner block.
    pub bottom_left: bool,
    /// Bottom-right corner block.
    pub bottom_right: bool,
}

impl Default for ClampZones {
    fn default() -> Self {
        Self {
            left_right: true,
            top_bottom: true,
            top_left: true,
            top_right: true,
            bottom_left: true,
            bottom_right: true,
        }
    }
}

/// Blends `color` into a transparent pixel.
#[inline]
fn mix_into(dst: &mut Pixel, color: Pixel) {
    if *dst == Pixel::CLEAR {
        *dst = Pixel::rgba(color.r, color.g, color.b, 0);
    } else {
        let avg = |a: u8, b: u8| ((u16::from(a) + u16::from(b)) / 2) as u8;
        *dst = Pixel::rgba(avg(dst.r, color.r), avg(dst.g, color.g), avg(dst.b, color.b), 0);
    }
}

/// Bleeds the rgb of every non-transparent pixel into its transparent
/// 8-neighbours.
///
/// Mixed pixels keep alpha 0, so one call grows colour by exactly one ring.
/// A clear neighbour takes the source colour; an already tinted one becomes
/// the integer average of both.
pub fn dilate(buf: &mut RgbaBuffer) {
    let width = i64::from(buf.width());
    let height = i64::from(buf.height());

    for y in 0..height {
        for x in 0..width {
            let color = buf.get_clamped(x, y);
            if color.a == 0 {
                continue;
            }
            for (dx, dy) in NEIGHBOURS {
                let (nx, ny) = (x + dx, y + dy);
                if !buf.contains(nx, ny) {
                    continue;
                }
                let idx = buf.index_of(nx as u32, ny as u32);
                let dst = &mut buf.pixels_mut()[idx];
                if dst.a == 0 {
                    mix_into(dst, color);
                }
            }
        }
    }
}

fn check_border(buf: &RgbaBuffer, border: u32, operation: &str) -> TexforgeResult<()> {
    let twice = u64::from(border) * 2;
    if twice >= u64::from(buf.width()) || twice >= u64::from(buf.height()) {
        tracing::warn!(
            "{} rejected border {} for {}x{} image",
            operation,
            border,
            buf.width(),
            buf.height()
        );
        return Err(TexforgeError::size_mismatch(format!(
            "{operation}: border {border} does not fit {}x{}",
            buf.width(),
            buf.height()
        )));
    }
    Ok(())
}

/// Fills the border ring with content from the opposite side.
///
/// The left/right pass covers rows `border..h-border`; the top/bottom pass
/// then copies whole rows, corners included.
///
/// # Errors
///
/// Returns `SizeMismatch` if `2 * border` reaches either dimension.
pub fn wrap_border(buf: &mut RgbaBuffer, border: u32, axes: WrapAxes) -> TexforgeResult<()> {
    if border == 0 {
        return Ok(());
    }
    check_border(buf, border, "wrap_border")?;

    let w = buf.width() as usize;
    let h = buf.height() as usize;
    let b = border as usize;
    let px = buf.pixels_mut();

    if axes.left_right {
        for y in b..h - b {
            let row = y * w;
            for x in 0..b {
                px[row + x] = px[row + w - 2 * b + x];
                px[row + w - b + x] = px[row + b + x];
            }
        }
    }

    if axes.top_bottom {
        for y in 0..b {
            let top = y * w;
            let bottom = (y + h - b) * w;
            let from_bottom = (y + h - 2 * b) * w;
            let from_top = (b + y) * w;
            for x in 0..w {
                px[top + x] = px[from_bottom + x];
                px[bottom + x] = px[from_top + x];
            }
        }
    }

    tracing::trace!("Wrapped {}px border ({:?})", border, axes);
    Ok(())
}

/// Fills the border ring by replicating the outermost content pixels.
///
/// Corner blocks sample fixed positions: top corners read row
/// `border + 1`, bottom corners row `h - border - 1`.
///
/// # Errors
///
/// Returns `SizeMismatch` if `2 * border` reaches either dimension.
pub fn clamp_border(buf: &mut RgbaBuffer, border: u32, zones: ClampZones) -> TexforgeResult<()> {
    if border == 0 {
        return Ok(());
    }
    check_border(buf, border, "clamp_border")?;

    let w = buf.width() as usize;
    let h = buf.height() as usize;
    let b = border as usize;
    let px = buf.pixels_mut();

    if zones.left_right {
        for y in b..h - b {
            let row = y * w;
            let left = px[row + b];
            let right = px[row + w - b - 1];
            px[row..row + b].fill(left);
            px[row + w - b..row + w].fill(right);
        }
    }

    if zones.top_bottom {
        for x in b..w - b {
            let top = px[b * w + x];
            let bottom = px[(h - b - 1) * w + x];
            for y in 0..b {
                px[y * w + x] = top;
                px[(h - y - 1) * w + x] = bottom;
            }
        }
    }

    let mut fill_block = |rows: Range<usize>, cols: Range<usize>, sample: usize| {
        let color = px[sample];
        for y in rows {
            px[y * w + cols.start..y * w + cols.end].fill(color);
        }
    };

    if zones.top_left {
        fill_block(0..b, 0..b, (b + 1) * w + b);
    }
    if zones.top_right {
        fill_block(0..b, w - b..w, (b + 1) * w + w - b - 1);
    }
    if zones.bottom_left {
        fill_block(h - b..h, 0..b, (h - b - 1) * w + b);
    }
    if zones.bottom_right {
        fill_block(h - b..h, w - b..w, (h - b - 1) * w + w - b - 1);
    }

    tracing::trace!("Clamped {}px border ({:?})", border, zones);
    Ok(())
}

/// Copy of `src` centred in a clear ring `border` pixels wide.
///
/// # Errors
///
/// Returns `SizeMismatch` if the enlarged dimensions overflow `u32`.
pub fn add_border(src: &RgbaBuffer, border: u32) -> TexforgeResult<RgbaBuffer> {
    let grow = |dim: u32| {
        border
            .checked_mul(2)
            .and_then(|twice| dim.checked_add(twice))
            .ok_or_else(|| TexforgeError::size_mismatch(format!("border {border} overflows {dim}")))
    };
    let width = grow(src.width())?;
    let height = grow(src.height())?;

    let mut out = RgbaBuffer::new(width, height);
    let src_w = src.width() as usize;
    let dst_w = width as usize;
    let b = border as usize;
    for (y, line) in src.pixels().chunks_exact(src_w.max(1)).enumerate() {
        let start = (y + b) * dst_w + b;
        out.pixels_mut()[start..start + src_w].copy_from_slice(line);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 6x6 buffer with a 2x2 opaque core surrounded by a 2px clear ring,
    /// core pixels numbered 1..=4 in red.
    fn bordered_core() -> RgbaBuffer {
        let mut core = RgbaBuffer::new(2, 2);
        for (i, px) in core.pixels_mut().iter_mut().enumerate() {
            *px = Pixel::rgba(i as u8 + 1, 0, 0, 255);
        }
        add_border(&core, 2).unwrap()
    }

    #[test]
    fn test_add_border_centres_content() {
        let buf = bordered_core();
        assert_eq!(buf.width(), 6);
        assert_eq!(buf.get(2, 2).unwrap().r, 1);
        assert_eq!(buf.get(3, 3).unwrap().r, 4);
        assert_eq!(buf.get(0, 0), Some(Pixel::CLEAR));
        assert_eq!(buf.get(5, 3), Some(Pixel::CLEAR));
    }

    #[test]
    fn test_dilate_single_pixel() {
        let mut buf = RgbaBuffer::new(3, 3);
        buf.set(1, 1, Pixel::rgba(200, 100, 50, 255));
        dilate(&mut buf);
        for y in 0..3 {
            for x in 0..3 {
                let px = buf.get(x, y).unwrap();
                if (x, y) == (1, 1) {
                    assert_eq!(px.a, 255);
                } else {
                    assert_eq!(px, Pixel::rgba(200, 100, 50, 0));
                }
            }
        }
    }

    #[test]
    fn test_dilate_averages_shared_neighbour() {
        let mut buf = RgbaBuffer::new(3, 1);
        buf.set(0, 0, Pixel::rgba(100, 0, 0, 255));
        buf.set(2, 0, Pixel::rgba(200, 0, 0, 255));
        dilate(&mut buf);
        // First seed writes 100, second averages (100 + 200) / 2.
        assert_eq!(buf.get(1, 0), Some(Pixel::rgba(150, 0, 0, 0)));
    }

    #[test]
    fn test_dilate_grows_one_ring() {
        let mut buf = RgbaBuffer::new(5, 1);
        buf.set(0, 0, Pixel::rgba(9, 9, 9, 255));
        dilate(&mut buf);
        assert_eq!(buf.get(1, 0), Some(Pixel::rgba(9, 9, 9, 0)));
        assert_eq!(buf.get(2, 0), Some(Pixel::CLEAR));
    }

    #[test]
    fn test_wrap_border_copies_opposite_side() {
        let mut buf = RgbaBuffer::new(4, 4);
        // Content is the 2x2 centre; border 1.
        buf.set(1, 1, Pixel::rgba(1, 0, 0, 255));
        buf.set(2, 1, Pixel::rgba(2, 0, 0, 255));
        buf.set(1, 2, Pixel::rgba(3, 0, 0, 255));
        buf.set(2, 2, Pixel::rgba(4, 0, 0, 255));
        wrap_border(&mut buf, 1, WrapAxes::default()).unwrap();

        // Left strip takes the right-most content column and vice versa.
        assert_eq!(buf.get(0, 1).unwrap().r, 2);
        assert_eq!(buf.get(3, 1).unwrap().r, 1);
        // Top row takes the bottom content row (already wrapped).
        assert_eq!(buf.get(0, 0).unwrap().r, 4);
        assert_eq!(buf.get(1, 0).unwrap().r, 3);
        // Bottom row takes the top content row.
        assert_eq!(buf.get(3, 3).unwrap().r, 1);
    }

    #[test]
    fn test_wrap_axes_selectable() {
        let mut buf = bordered_core();
        wrap_border(
            &mut buf,
            2,
            WrapAxes {
                left_right: false,
                top_bottom: true,
            },
        )
        .unwrap();
        assert_eq!(buf.get(0, 2), Some(Pixel::CLEAR));
        assert_eq!(buf.get(2, 0).unwrap().r, 1);
    }

    #[test]
    fn test_clamp_border_edges_and_corners() {
        let mut buf = bordered_core();
        clamp_border(&mut buf, 2, ClampZones::default()).unwrap();
        // Edges replicate the outermost content pixel.
        assert_eq!(buf.get(0, 2).unwrap().r, 1);
        assert_eq!(buf.get(5, 2).unwrap().r, 2);
        assert_eq!(buf.get(2, 0).unwrap().r, 1);
        assert_eq!(buf.get(3, 5).unwrap().r, 4);
        // Top corners sample row border + 1.
        assert_eq!(buf.get(0, 0).unwrap().r, 3);
        assert_eq!(buf.get(5, 1).unwrap().r, 4);
        // Bottom corners sample row h - border - 1.
        assert_eq!(buf.get(1, 5).unwrap().r, 3);
        assert_eq!(buf.get(5, 5).unwrap().r, 4);
    }

    #[test]
    fn test_oversized_border_rejected() {
        let mut buf = RgbaBuffer::new(4, 8);
        assert!(matches!(
            wrap_border(&mut buf, 2, WrapAxes::default()),
            Err(TexforgeError::SizeMismatch(_))
        ));
        assert!(clamp_border(&mut buf, 3, ClampZones::default()).is_err());
        assert!(wrap_border(&mut buf, 0, WrapAxes::default()).is_ok());
    }
}
