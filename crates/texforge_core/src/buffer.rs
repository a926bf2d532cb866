//! # Pixel Buffers
//!
//! Raw samples plus dimensions, split into two concrete types:
//!
//! - [`IndexedBuffer`]: one palette index per pixel, rows may be padded
//!   (`stride >= width`).
//! - [`RgbaBuffer`]: tightly packed RGBA pixels (`stride == width * 4`).
//!
//! [`PixelBuffer`] is the tagged union handed over by collaborators that do
//! not know the format statically. Colour operations take `&RgbaBuffer`
//! directly; the erased form is checked once with [`PixelBuffer::as_rgba`].
//!
//! Rows are stored top-down. The `flip_y` flag on conversions controls
//! whether rows are read bottom-up; it never changes the stored layout of
//! the source.

use crate::error::{PixelFormat, TexforgeError, TexforgeResult};
use crate::geometry::Size;
use crate::pixel::{Palette, Pixel};

/// Row index to read for output row `y` when flipping is requested.
#[inline]
fn source_row(y: usize, height: usize, flip_y: bool) -> usize {
    if flip_y {
        height - 1 - y
    } else {
        y
    }
}

/// An 8-bit palette-indexed buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexedBuffer {
    width: u32,
    height: u32,
    stride: usize,
    data: Vec<u8>,
}

impl IndexedBuffer {
    /// Creates a buffer with `stride == width`.
    ///
    /// # Errors
    ///
    /// Returns `SizeMismatch` if `data.len() != width * height`.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> TexforgeResult<Self> {
        Self::with_stride(width, height, width as usize, data)
    }

    /// Creates a buffer whose rows are `stride` bytes apart.
    ///
    /// # Errors
    ///
    /// Returns `SizeMismatch` if `stride < width` or
    /// `data.len() != stride * height`.
    pub fn with_stride(
        width: u32,
        height: u32,
        stride: usize,
        data: Vec<u8>,
    ) -> TexforgeResult<Self> {
        if stride < width as usize {
            return Err(TexforgeError::size_mismatch(format!(
                "indexed stride {stride} is narrower than width {width}"
            )));
        }
        let expected = stride * height as usize;
        if data.len() != expected {
            return Err(TexforgeError::size_mismatch(format!(
                "indexed buffer {width}x{height} (stride {stride}) needs {expected} bytes, got {}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            stride,
            data,
        })
    }

    /// Creates a buffer where every sample is `index`.
    #[must_use]
    pub fn filled(width: u32, height: u32, index: u8) -> Self {
        Self {
            width,
            height,
            stride: width as usize,
            data: vec![index; width as usize * height as usize],
        }
    }

    /// Width in pixels.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Dimensions.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Bytes between the starts of consecutive rows.
    #[inline]
    #[must_use]
    pub const fn stride(&self) -> usize {
        self.stride
    }

    /// Raw samples including any row padding.
    #[inline]
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable raw samples including any row padding.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// The visible samples of row `y` (padding excluded).
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    #[must_use]
    pub fn row(&self, y: u32) -> &[u8] {
        let start = y as usize * self.stride;
        &self.data[start..start + self.width as usize]
    }

    /// Mutable visible samples of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_mut(&mut self, y: u32) -> &mut [u8] {
        let start = y as usize * self.stride;
        let width = self.width as usize;
        &mut self.data[start..start + width]
    }

    /// Sample at `(x, y)`, or `None` outside the buffer.
    #[inline]
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> Option<u8> {
        (x < self.width && y < self.height)
            .then(|| self.data[y as usize * self.stride + x as usize])
    }

    /// Resolves every sample through `palette` into a new RGBA buffer.
    ///
    /// With `alpha_index` set, samples equal to that index become
    /// `(0, 0, 0, 0)` instead of their palette colour.
    #[must_use]
    pub fn to_rgba(&self, palette: &Palette, flip_y: bool, alpha_index: Option<u8>) -> RgbaBuffer {
        let width = self.width as usize;
        let height = self.height as usize;
        let mut pixels = Vec::with_capacity(width * height);

        for y in 0..height {
            let start = source_row(y, height, flip_y) * self.stride;
            for &index in &self.data[start..start + width] {
                if alpha_index == Some(index) {
                    pixels.push(Pixel::CLEAR);
                } else {
                    pixels.push(palette.get(index));
                }
            }
        }

        RgbaBuffer {
            width: self.width,
            height: self.height,
            pixels,
        }
    }
}

/// A tightly packed 32-bit RGBA buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RgbaBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Pixel>,
}

impl RgbaBuffer {
    /// Creates a fully transparent buffer.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, Pixel::CLEAR)
    }

    /// Creates a buffer where every pixel is `color`.
    #[must_use]
    pub fn filled(width: u32, height: u32, color: Pixel) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width as usize * height as usize],
        }
    }

    /// Wraps an existing pixel vector.
    ///
    /// # Errors
    ///
    /// Returns `SizeMismatch` if `pixels.len() != width * height`.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Pixel>) -> TexforgeResult<Self> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(TexforgeError::size_mismatch(format!(
                "rgba buffer {width}x{height} needs {expected} pixels, got {}",
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Copies tightly packed `r, g, b, a` bytes.
    ///
    /// # Errors
    ///
    /// Returns `SizeMismatch` if `bytes.len() != width * height * 4`.
    pub fn from_bytes(width: u32, height: u32, bytes: &[u8]) -> TexforgeResult<Self> {
        Self::from_raw(width, height, width as usize * 4, bytes, false)
    }

    /// Copies `r, g, b, a` rows that are `stride` bytes apart, optionally
    /// reading rows bottom-up.
    ///
    /// # Errors
    ///
    /// Returns `SizeMismatch` if `stride < width * 4` or
    /// `bytes.len() != stride * height`.
    pub fn from_raw(
        width: u32,
        height: u32,
        stride: usize,
        bytes: &[u8],
        flip_y: bool,
    ) -> TexforgeResult<Self> {
        let row_bytes = width as usize * 4;
        if stride < row_bytes {
            return Err(TexforgeError::size_mismatch(format!(
                "rgba stride {stride} is narrower than {row_bytes} bytes per row"
            )));
        }
        let expected = stride * height as usize;
        if bytes.len() != expected {
            return Err(TexforgeError::size_mismatch(format!(
                "rgba buffer {width}x{height} (stride {stride}) needs {expected} bytes, got {}",
                bytes.len()
            )));
        }

        let rows = height as usize;
        let mut pixels = Vec::with_capacity(width as usize * rows);
        for y in 0..rows {
            let start = source_row(y, rows, flip_y) * stride;
            let row = &bytes[start..start + row_bytes];
            pixels.extend(
                row.chunks_exact(4)
                    .map(|c| Pixel::rgba(c[0], c[1], c[2], c[3])),
            );
        }

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Width in pixels.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Dimensions.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Bytes per row, always `width * 4`.
    #[inline]
    #[must_use]
    pub const fn stride(&self) -> usize {
        self.width as usize * 4
    }

    /// Pixels in row-major order.
    #[inline]
    #[must_use]
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    /// Mutable pixels in row-major order.
    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [Pixel] {
        &mut self.pixels
    }

    /// Consumes the buffer, returning its pixels.
    #[must_use]
    pub fn into_pixels(self) -> Vec<Pixel> {
        self.pixels
    }

    /// The buffer viewed as raw bytes, `stride * height` long.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Copies the pixels out, optionally with rows reversed.
    #[must_use]
    pub fn to_pixels(&self, flip_y: bool) -> Vec<Pixel> {
        if !flip_y {
            return self.pixels.clone();
        }
        let width = self.width as usize;
        let mut out = Vec::with_capacity(self.pixels.len());
        for row in self.pixels.chunks_exact(width.max(1)).rev() {
            out.extend_from_slice(row);
        }
        out
    }

    /// Linear index of `(x, y)`. Caller guarantees the coordinate is inside.
    #[inline]
    #[must_use]
    pub const fn index_of(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Returns true if the signed coordinate lies inside the buffer.
    #[inline]
    #[must_use]
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < i64::from(self.width) && y < i64::from(self.height)
    }

    /// Pixel at `(x, y)`, or `None` outside the buffer.
    #[inline]
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> Option<Pixel> {
        (x < self.width && y < self.height).then(|| self.pixels[self.index_of(x, y)])
    }

    /// Overwrites the pixel at `(x, y)`. Returns false outside the buffer.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, color: Pixel) -> bool {
        if x < self.width && y < self.height {
            let idx = self.index_of(x, y);
            self.pixels[idx] = color;
            true
        } else {
            false
        }
    }

    /// Pixel at a signed coordinate, clamped to the nearest edge.
    ///
    /// # Panics
    ///
    /// Panics on an empty buffer.
    #[inline]
    #[must_use]
    pub fn get_clamped(&self, x: i64, y: i64) -> Pixel {
        let cx = x.clamp(0, i64::from(self.width) - 1) as u32;
        let cy = y.clamp(0, i64::from(self.height) - 1) as u32;
        self.pixels[self.index_of(cx, cy)]
    }

    /// Pixel at a signed coordinate, wrapped toroidally.
    ///
    /// # Panics
    ///
    /// Panics on an empty buffer.
    #[inline]
    #[must_use]
    pub fn get_wrapped(&self, x: i64, y: i64) -> Pixel {
        let wx = x.rem_euclid(i64::from(self.width)) as u32;
        let wy = y.rem_euclid(i64::from(self.height)) as u32;
        self.pixels[self.index_of(wx, wy)]
    }

    /// Returns true if the buffer has no pixels.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }
}

/// A pixel buffer of either format.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PixelBuffer {
    /// Palette-indexed samples.
    Indexed(IndexedBuffer),
    /// True-colour samples.
    Rgba(RgbaBuffer),
}

impl PixelBuffer {
    /// Format tag of the contained buffer.
    #[inline]
    #[must_use]
    pub const fn format(&self) -> PixelFormat {
        match self {
            Self::Indexed(_) => PixelFormat::Indexed8,
            Self::Rgba(_) => PixelFormat::Rgba32,
        }
    }

    /// Width in pixels.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> u32 {
        match self {
            Self::Indexed(buf) => buf.width(),
            Self::Rgba(buf) => buf.width(),
        }
    }

    /// Height in pixels.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> u32 {
        match self {
            Self::Indexed(buf) => buf.height(),
            Self::Rgba(buf) => buf.height(),
        }
    }

    /// Bytes between the starts of consecutive rows.
    #[inline]
    #[must_use]
    pub const fn stride(&self) -> usize {
        match self {
            Self::Indexed(buf) => buf.stride(),
            Self::Rgba(buf) => buf.stride(),
        }
    }

    /// Raw bytes; always `stride * height` long.
    #[inline]
    #[must_use]
    pub fn data(&self) -> &[u8] {
        match self {
            Self::Indexed(buf) => buf.data(),
            Self::Rgba(buf) => buf.as_bytes(),
        }
    }

    /// Borrows the RGBA variant on behalf of `operation`.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedFormat` for indexed buffers.
    pub fn as_rgba(&self, operation: &'static str) -> TexforgeResult<&RgbaBuffer> {
        match self {
            Self::Rgba(buf) => Ok(buf),
            Self::Indexed(_) => Err(TexforgeError::UnsupportedFormat {
                operation,
                expected: PixelFormat::Rgba32,
                found: PixelFormat::Indexed8,
            }),
        }
    }

    /// Mutably borrows the RGBA variant on behalf of `operation`.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedFormat` for indexed buffers.
    pub fn as_rgba_mut(&mut self, operation: &'static str) -> TexforgeResult<&mut RgbaBuffer> {
        match self {
            Self::Rgba(buf) => Ok(buf),
            Self::Indexed(_) => Err(TexforgeError::UnsupportedFormat {
                operation,
                expected: PixelFormat::Rgba32,
                found: PixelFormat::Indexed8,
            }),
        }
    }

    /// Borrows the indexed variant on behalf of `operation`.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedFormat` for RGBA buffers.
    pub fn as_indexed(&self, operation: &'static str) -> TexforgeResult<&IndexedBuffer> {
        match self {
            Self::Indexed(buf) => Ok(buf),
            Self::Rgba(_) => Err(TexforgeError::UnsupportedFormat {
                operation,
                expected: PixelFormat::Indexed8,
                found: PixelFormat::Rgba32,
            }),
        }
    }

    /// Mutably borrows the indexed variant on behalf of `operation`.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedFormat` for RGBA buffers.
    pub fn as_indexed_mut(
        &mut self,
        operation: &'static str,
    ) -> TexforgeResult<&mut IndexedBuffer> {
        match self {
            Self::Indexed(buf) => Ok(buf),
            Self::Rgba(_) => Err(TexforgeError::UnsupportedFormat {
                operation,
                expected: PixelFormat::Indexed8,
                found: PixelFormat::Rgba32,
            }),
        }
    }

    /// Converts to RGBA, resolving indexed samples through `palette`.
    /// RGBA buffers are copied (and flipped if requested).
    #[must_use]
    pub fn to_rgba(&self, palette: &Palette, flip_y: bool, alpha_index: Option<u8>) -> RgbaBuffer {
        match self {
            Self::Indexed(buf) => buf.to_rgba(palette, flip_y, alpha_index),
            Self::Rgba(buf) => RgbaBuffer {
                width: buf.width,
                height: buf.height,
                pixels: buf.to_pixels(flip_y),
            },
        }
    }
}

impl From<IndexedBuffer> for PixelBuffer {
    fn from(buf: IndexedBuffer) -> Self {
        Self::Indexed(buf)
    }
}

impl From<RgbaBuffer> for PixelBuffer {
    fn from(buf: RgbaBuffer) -> Self {
        Self::Rgba(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indexed_rejects_bad_length() {
        assert!(IndexedBuffer::new(4, 4, vec![0; 15]).is_err());
        assert!(IndexedBuffer::with_stride(4, 2, 3, vec![0; 6]).is_err());
        assert!(IndexedBuffer::with_stride(4, 2, 6, vec![0; 12]).is_ok());
    }

    #[test]
    fn test_indexed_row_skips_padding() {
        let buf = IndexedBuffer::with_stride(2, 2, 3, vec![1, 2, 99, 3, 4, 99]).unwrap();
        assert_eq!(buf.row(0), &[1, 2]);
        assert_eq!(buf.row(1), &[3, 4]);
        assert_eq!(buf.get(1, 1), Some(4));
        assert_eq!(buf.get(2, 1), None);
    }

    #[test]
    fn test_indexed_to_rgba_with_alpha_index() {
        let buf = IndexedBuffer::new(2, 1, vec![0, 200]).unwrap();
        let rgba = buf.to_rgba(&Palette::grayscale(), false, Some(0));
        assert_eq!(rgba.pixels(), &[Pixel::CLEAR, Pixel::gray(200, 255)]);
    }

    #[test]
    fn test_flip_does_not_touch_source() {
        let buf = IndexedBuffer::new(1, 2, vec![10, 20]).unwrap();
        let flipped = buf.to_rgba(&Palette::grayscale(), true, None);
        assert_eq!(flipped.get(0, 0), Some(Pixel::gray(20, 255)));
        assert_eq!(flipped.get(0, 1), Some(Pixel::gray(10, 255)));
        assert_eq!(buf.data(), &[10, 20]);
    }

    #[test]
    fn test_rgba_from_raw_with_padding_and_flip() {
        // 1x2 image, stride 8 (4 bytes padding per row).
        let bytes = [1, 2, 3, 4, 0, 0, 0, 0, 5, 6, 7, 8, 0, 0, 0, 0];
        let buf = RgbaBuffer::from_raw(1, 2, 8, &bytes, true).unwrap();
        assert_eq!(buf.get(0, 0), Some(Pixel::rgba(5, 6, 7, 8)));
        assert_eq!(buf.get(0, 1), Some(Pixel::rgba(1, 2, 3, 4)));
        assert_eq!(buf.stride(), 4);
        assert_eq!(buf.as_bytes().len(), buf.stride() * 2);
    }

    #[test]
    fn test_rgba_sampling_policies() {
        let mut buf = RgbaBuffer::new(3, 2);
        buf.set(0, 0, Pixel::rgb(1, 0, 0));
        buf.set(2, 1, Pixel::rgb(2, 0, 0));
        assert_eq!(buf.get_clamped(-5, -5), Pixel::rgb(1, 0, 0));
        assert_eq!(buf.get_clamped(10, 10), Pixel::rgb(2, 0, 0));
        assert_eq!(buf.get_wrapped(-1, -1), Pixel::rgb(2, 0, 0));
        assert_eq!(buf.get_wrapped(3, 2), Pixel::rgb(1, 0, 0));
        assert!(!buf.set(3, 0, Pixel::WHITE));
    }

    #[test]
    fn test_erased_buffer_format_checks() {
        let indexed: PixelBuffer = IndexedBuffer::filled(2, 2, 5).into();
        let rgba: PixelBuffer = RgbaBuffer::new(2, 2).into();

        assert_eq!(indexed.format(), PixelFormat::Indexed8);
        assert_eq!(rgba.data().len(), rgba.stride() * rgba.height() as usize);
        assert!(matches!(
            indexed.as_rgba("grayscale"),
            Err(TexforgeError::UnsupportedFormat { operation: "grayscale", .. })
        ));
        assert!(rgba.as_indexed("tint").is_err());
        assert!(rgba.as_rgba("grayscale").is_ok());
    }

    #[test]
    fn test_to_pixels_flip() {
        let buf = RgbaBuffer::from_pixels(
            1,
            3,
            vec![Pixel::gray(1, 255), Pixel::gray(2, 255), Pixel::gray(3, 255)],
        )
        .unwrap();
        let flipped = buf.to_pixels(true);
        assert_eq!(flipped[0], Pixel::gray(3, 255));
        assert_eq!(flipped[2], Pixel::gray(1, 255));
    }
}
