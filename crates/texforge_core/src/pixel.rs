//! 8-bit RGBA pixels and 256-entry palettes.
//!
//! `Pixel` is `Pod`, so a whole image can be viewed as raw bytes for upload
//! without copying. A `Palette` resolves indexed samples to colour.

use bytemuck::{Pod, Zeroable};

use crate::error::{TexforgeError, TexforgeResult};

/// Number of entries in a palette.
pub const PALETTE_SIZE: usize = 256;

/// Length of a raw RGB palette body (three bytes per entry).
pub const PALETTE_RGB_BYTES: usize = PALETTE_SIZE * 3;

/// A single pixel with four independent 8-bit channels.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct Pixel {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Pixel {
    /// Fully transparent black.
    pub const CLEAR: Self = Self::rgba(0, 0, 0, 0);
    /// Opaque black.
    pub const BLACK: Self = Self::rgba(0, 0, 0, 255);
    /// Opaque white.
    pub const WHITE: Self = Self::rgba(255, 255, 255, 255);

    /// Creates a pixel from its four channels.
    #[inline]
    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque pixel.
    #[inline]
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Creates a gray pixel with the given alpha.
    #[inline]
    #[must_use]
    pub const fn gray(value: u8, a: u8) -> Self {
        Self { r: value, g: value, b: value, a }
    }

    /// Returns the same colour with a different alpha.
    #[inline]
    #[must_use]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Returns true if alpha is zero.
    #[inline]
    #[must_use]
    pub const fn is_transparent(self) -> bool {
        self.a == 0
    }

    /// Average of the colour channels with integer division.
    #[inline]
    #[must_use]
    pub const fn average_intensity(self) -> u8 {
        // Max sum is 765, so the quotient always fits a byte.
        ((self.r as u16 + self.g as u16 + self.b as u16) / 3) as u8
    }
}

/// A 256-entry colour table for resolving indexed buffers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    entries: [Pixel; PALETTE_SIZE],
}

impl Default for Palette {
    fn default() -> Self {
        Self::grayscale()
    }
}

impl Palette {
    /// A linear gray ramp: index `i` maps to `(i, i, i, 255)`.
    #[must_use]
    pub fn grayscale() -> Self {
        let mut entries = [Pixel::BLACK; PALETTE_SIZE];
        for (i, entry) in entries.iter_mut().enumerate() {
            *entry = Pixel::gray(i as u8, 255);
        }
        Self { entries }
    }

    /// Builds a palette from a raw 768-byte RGB table. Every entry is opaque.
    ///
    /// # Errors
    ///
    /// Returns `SizeMismatch` if `rgb` is not exactly 768 bytes.
    pub fn from_rgb_bytes(rgb: &[u8]) -> TexforgeResult<Self> {
        if rgb.len() != PALETTE_RGB_BYTES {
            return Err(TexforgeError::size_mismatch(format!(
                "palette table must be {PALETTE_RGB_BYTES} bytes, got {}",
                rgb.len()
            )));
        }

        let mut entries = [Pixel::BLACK; PALETTE_SIZE];
        for (entry, chunk) in entries.iter_mut().zip(rgb.chunks_exact(3)) {
            *entry = Pixel::rgb(chunk[0], chunk[1], chunk[2]);
        }
        Ok(Self { entries })
    }

    /// Builds a palette from explicit pixels.
    ///
    /// # Errors
    ///
    /// Returns `SizeMismatch` unless exactly 256 pixels are supplied.
    pub fn from_pixels(pixels: &[Pixel]) -> TexforgeResult<Self> {
        let entries: [Pixel; PALETTE_SIZE] = pixels.try_into().map_err(|_| {
            TexforgeError::size_mismatch(format!(
                "palette needs {PALETTE_SIZE} entries, got {}",
                pixels.len()
            ))
        })?;
        Ok(Self { entries })
    }

    /// Resolves a palette index.
    #[inline]
    #[must_use]
    pub fn get(&self, index: u8) -> Pixel {
        self.entries[usize::from(index)]
    }

    /// Replaces one entry.
    pub fn set(&mut self, index: u8, color: Pixel) {
        self.entries[usize::from(index)] = color;
    }

    /// All entries in index order.
    #[must_use]
    pub fn entries(&self) -> &[Pixel; PALETTE_SIZE] {
        &self.entries
    }

    /// Returns the palette as bytes for GPU upload.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.entries)
    }
}
