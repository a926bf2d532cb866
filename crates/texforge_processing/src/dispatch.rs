//! Format-checked entry points over [`PixelBuffer`].
//!
//! Callers holding an image of unknown format go through these; each one
//! rejects the wrong variant with `UnsupportedFormat` instead of guessing.
//! Code that already has an `RgbaBuffer` or `IndexedBuffer` should call the
//! typed functions directly.

use texforge_core::{PixelBuffer, RgbaBuffer, TexforgeResult};

use crate::convolution::Kernel;
use crate::tint::{self as palette_tint, MetalType};
use crate::{bump, intensity, resample};

/// [`resample::resize_bicubic`] for RGBA input.
///
/// # Errors
///
/// `UnsupportedFormat` for indexed input, otherwise as the typed call.
pub fn resize(src: &PixelBuffer, new_width: u32, new_height: u32) -> TexforgeResult<RgbaBuffer> {
    resample::resize_bicubic(src.as_rgba("resize")?, new_width, new_height)
}

/// [`intensity::grayscale`] for RGBA input.
///
/// # Errors
///
/// `UnsupportedFormat` for indexed input.
pub fn grayscale(src: &PixelBuffer) -> TexforgeResult<RgbaBuffer> {
    Ok(intensity::grayscale(src.as_rgba("grayscale")?))
}

/// [`intensity::average_intensity`] for RGBA input.
///
/// # Errors
///
/// `UnsupportedFormat` for indexed input.
pub fn average_intensity(src: &PixelBuffer) -> TexforgeResult<RgbaBuffer> {
    Ok(intensity::average_intensity(src.as_rgba("average_intensity")?))
}

/// [`Kernel::convolve`] for RGBA input.
///
/// # Errors
///
/// `UnsupportedFormat` for indexed input.
pub fn convolve(src: &PixelBuffer, kernel: &Kernel) -> TexforgeResult<RgbaBuffer> {
    Ok(kernel.convolve(src.as_rgba("convolve")?))
}

/// [`bump::bump_map`] for RGBA input.
///
/// # Errors
///
/// `UnsupportedFormat` for indexed input.
pub fn bump_map(src: &PixelBuffer) -> TexforgeResult<RgbaBuffer> {
    Ok(bump::bump_map(src.as_rgba("bump_map")?))
}

/// [`bump::normal_map_packed`] for RGBA input.
///
/// # Errors
///
/// `UnsupportedFormat` for indexed input.
pub fn normal_map(src: &PixelBuffer, strength: f32) -> TexforgeResult<RgbaBuffer> {
    Ok(bump::normal_map_packed(src.as_rgba("normal_map")?, strength))
}

/// [`palette_tint::tint`] for indexed input.
///
/// # Errors
///
/// `UnsupportedFormat` for RGBA input; the buffer is left untouched.
pub fn tint(buf: &mut PixelBuffer, metal: MetalType) -> TexforgeResult<()> {
    palette_tint::tint(buf.as_indexed_mut("tint")?, metal);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use texforge_core::{IndexedBuffer, Pixel, PixelFormat, TexforgeError};

    #[test]
    fn test_rgba_ops_reject_indexed() {
        let src = PixelBuffer::from(IndexedBuffer::filled(2, 2, 7));
        let err = resize(&src, 4, 4).unwrap_err();
        assert_eq!(
            err,
            TexforgeError::UnsupportedFormat {
                operation: "resize",
                expected: PixelFormat::Rgba32,
                found: PixelFormat::Indexed8,
            }
        );
        assert!(grayscale(&src).is_err());
        assert!(bump_map(&src).is_err());
        assert!(normal_map(&src, 1.0).is_err());
        assert!(convolve(&src, &Kernel::identity()).is_err());
    }

    #[test]
    fn test_tint_rejects_rgba_without_change() {
        let original = RgbaBuffer::filled(1, 1, Pixel::rgb(0x70, 0x70, 0x70));
        let mut buf = PixelBuffer::from(original.clone());
        assert!(matches!(
            tint(&mut buf, MetalType::Iron),
            Err(TexforgeError::UnsupportedFormat { .. })
        ));
        assert_eq!(buf, PixelBuffer::from(original));
    }

    #[test]
    fn test_matching_format_dispatches() {
        let mut indexed = PixelBuffer::from(IndexedBuffer::filled(1, 1, 0x7F));
        tint(&mut indexed, MetalType::Daedric).unwrap();
        assert_eq!(indexed.data(), &[0xFE]);

        let rgba = PixelBuffer::from(RgbaBuffer::filled(2, 2, Pixel::rgba(3, 6, 9, 1)));
        let gray = average_intensity(&rgba).unwrap();
        assert_eq!(gray.get(1, 1), Some(Pixel::rgba(6, 6, 6, 1)));
    }
}
