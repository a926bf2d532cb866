//! # Texforge Error Types
//!
//! All errors that can occur while converting or processing pixel buffers.
//!
//! Only two precondition classes ever fail: a colour operation handed an
//! indexed buffer (or the reverse), and a size or kernel mismatch.
//! Out-of-range pixel addresses are resolved by each operation's sampling
//! policy and never surface here.

use std::fmt;

use thiserror::Error;

/// Storage format of a pixel buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// One byte per pixel, resolved through a 256-entry palette.
    Indexed8,
    /// Four bytes per pixel in `r, g, b, a` order.
    Rgba32,
}

impl PixelFormat {
    /// Bytes used by one pixel in this format.
    #[inline]
    #[must_use]
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            Self::Indexed8 => 1,
            Self::Rgba32 => 4,
        }
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Indexed8 => f.write_str("Indexed8"),
            Self::Rgba32 => f.write_str("RGBA32"),
        }
    }
}

/// Errors that can occur in the texture core.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TexforgeError {
    /// Operation invoked on a buffer of the wrong format.
    #[error("{operation} requires {expected} input, got {found}")]
    UnsupportedFormat {
        /// Name of the rejected operation.
        operation: &'static str,
        /// Format the operation accepts.
        expected: PixelFormat,
        /// Format it was given.
        found: PixelFormat,
    },

    /// Buffer dimensions, lengths or placements do not agree.
    #[error("size mismatch: {0}")]
    SizeMismatch(String),

    /// Convolution kernel is malformed.
    #[error("invalid kernel: {0}")]
    InvalidKernel(String),

    /// Pipeline settings are inconsistent or unparseable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Reading or writing a file failed.
    #[error("i/o failure: {0}")]
    Io(String),
}

impl TexforgeError {
    /// Shorthand for a [`TexforgeError::SizeMismatch`] built from any message.
    #[must_use]
    pub fn size_mismatch(detail: impl Into<String>) -> Self {
        Self::SizeMismatch(detail.into())
    }
}

/// Result type for texture operations.
pub type TexforgeResult<T> = Result<T, TexforgeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_format_message() {
        let err = TexforgeError::UnsupportedFormat {
            operation: "resize_bicubic",
            expected: PixelFormat::Rgba32,
            found: PixelFormat::Indexed8,
        };
        assert_eq!(
            err.to_string(),
            "resize_bicubic requires RGBA32 input, got Indexed8"
        );
    }

    #[test]
    fn test_bytes_per_pixel() {
        assert_eq!(PixelFormat::Indexed8.bytes_per_pixel(), 1);
        assert_eq!(PixelFormat::Rgba32.bytes_per_pixel(), 4);
    }
}
