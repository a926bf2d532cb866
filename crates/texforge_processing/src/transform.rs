//! Whole-image transforms and rectangle blits.

use texforge_core::{Pixel, Position, Rect, RgbaBuffer, Size, TexforgeError, TexforgeResult};

/// Rotates `src` a quarter turn counter-clockwise, rows counted
/// bottom-up as they are after a flipped conversion.
///
/// Follows the legacy index mapping
/// `dst(x, y) = src_linear[(w - 1 - x) * h + y]` and keeps the source
/// dimensions. For square input this is an exact rotation; non-square
/// input is read as if it were stored `h` pixels wide.
#[must_use]
pub fn rotate_ccw(src: &RgbaBuffer) -> RgbaBuffer {
    let w = src.width() as usize;
    let h = src.height() as usize;
    let from = src.pixels();

    let mut out = src.clone();
    for (idx, dst) in out.pixels_mut().iter_mut().enumerate() {
        let (x, y) = (idx % w, idx / w);
        *dst = from[(w - 1 - x) * h + y];
    }
    out
}

/// Flips `src` both horizontally and vertically (180° rotation).
#[must_use]
pub fn flip_both(src: &RgbaBuffer) -> RgbaBuffer {
    let mut out = src.clone();
    out.pixels_mut().reverse();
    out
}

/// Inverts rgb in place, keeping alpha.
pub fn negative(buf: &mut RgbaBuffer) {
    for px in buf.pixels_mut() {
        *px = Pixel::rgba(255 - px.r, 255 - px.g, 255 - px.b, px.a);
    }
}

/// Pastes all of `src` into `dst` with its top-left corner at `at`.
///
/// # Errors
///
/// Returns `SizeMismatch` if `src` does not fit inside `dst` at `at`.
pub fn insert(dst: &mut RgbaBuffer, src: &RgbaBuffer, at: Position) -> TexforgeResult<()> {
    copy_region(src, dst, Position::new(0, 0), at, src.size())
}

/// Copies a `size` rectangle from `src` at `from` to `dst` at `to`.
///
/// # Errors
///
/// Returns `SizeMismatch` if either rectangle leaves its buffer.
pub fn copy_region(
    src: &RgbaBuffer,
    dst: &mut RgbaBuffer,
    from: Position,
    to: Position,
    size: Size,
) -> TexforgeResult<()> {
    let read = Rect::new(from.x, from.y, size.width, size.height);
    let write = Rect::new(to.x, to.y, size.width, size.height);
    if !read.fits_within(src.size()) {
        return Err(TexforgeError::size_mismatch(format!(
            "copy source {read:?} leaves {}x{} buffer",
            src.width(),
            src.height()
        )));
    }
    if !write.fits_within(dst.size()) {
        return Err(TexforgeError::size_mismatch(format!(
            "copy target {write:?} leaves {}x{} buffer",
            dst.width(),
            dst.height()
        )));
    }

    let span = size.width as usize;
    for row in 0..size.height {
        let s = src.index_of(from.x, from.y + row);
        let d = dst.index_of(to.x, to.y + row);
        dst.pixels_mut()[d..d + span].copy_from_slice(&src.pixels()[s..s + span]);
    }
    Ok(())
}
