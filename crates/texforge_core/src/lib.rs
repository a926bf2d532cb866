//! # TEXFORGE Core
//!
//! Shared data model for the texture content pipeline.
//!
//! ## Design Principles
//!
//! 1. **Tagged formats** - Indexed and RGBA buffers are distinct types; the
//!    erased [`PixelBuffer`] is checked once at the boundary
//! 2. **Value objects** - Buffers are plain owned values, no global state
//! 3. **Top-down rows** - Y-inversion only ever happens during conversion
//!
//! ## Example
//!
//! ```rust,ignore
//! use texforge_core::{IndexedBuffer, Palette, PixelBuffer};
//!
//! let palette = Palette::from_rgb_bytes(&pal_bytes)?;
//! let indexed = IndexedBuffer::new(64, 64, raw)?;
//!
//! // Index 0 becomes transparent, rows are read bottom-up
//! let rgba = indexed.to_rgba(&palette, true, Some(0));
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]
#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]

pub mod buffer;
pub mod error;
pub mod geometry;
pub mod pixel;

pub use buffer::{IndexedBuffer, PixelBuffer, RgbaBuffer};
pub use error::{PixelFormat, TexforgeError, TexforgeResult};
pub use geometry::{Position, Rect, Size, UvRect};
pub use pixel::{Palette, Pixel, PALETTE_RGB_BYTES, PALETTE_SIZE};
