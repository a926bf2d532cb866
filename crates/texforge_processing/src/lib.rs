//! # TEXFORGE Processing
//!
//! Pixel operations that turn legacy indexed art into engine-ready
//! textures.
//!
//! ## Modules
//!
//! | Module | Role |
//! |--------|------|
//! | [`resample`] | Bicubic resize |
//! | [`intensity`] | Luma grayscale and average intensity |
//! | [`convolution`] | Toroidal integer kernels (Sobel, sharpen) |
//! | [`bump`] | Bump maps and normal maps |
//! | [`border`] | Dilate, wrap and clamp border rings |
//! | [`tint`] | Metal-type palette ramps |
//! | [`glyph_atlas`] | Bitmap font atlas packing |
//! | [`transform`] | Rotate, flip, negative, blits |
//! | [`pipeline`] | Settings-driven end-to-end conversion |
//!
//! ## Copy vs In-Place
//!
//! Functions taking `&RgbaBuffer` return a new buffer and leave their input
//! alone. Functions taking `&mut` modify the caller's buffer. Nothing here
//! holds global state; every call is independent and all types are
//! `Send + Sync`.
//!
//! ## Example
//!
//! ```rust,ignore
//! use texforge_processing::{TexturePipeline, TextureSettings};
//!
//! let settings = TextureSettings::from_toml_file("data/textures/billboard.toml")?;
//! let pipeline = TexturePipeline::new(settings, palette)?;
//! let out = pipeline.process(&source)?;
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::cast_possible_wrap
)]

pub mod border;
pub mod bump;
pub mod convolution;
pub mod dispatch;
#[cfg(feature = "debug-export")]
pub mod export;
pub mod glyph_atlas;
pub mod intensity;
pub mod pipeline;
pub mod resample;
pub mod settings;
pub mod tint;
pub mod transform;
pub mod vector;

pub use border::{add_border, clamp_border, dilate, wrap_border, ClampZones, WrapAxes};
pub use bump::{bump_map, normal_map_packed, normal_map_standard};
pub use convolution::{sharpen, Kernel};
pub use glyph_atlas::{glyph_pixels, pack_atlas, GlyphAtlas, GlyphSheet, GlyphSource, ATLAS_DIM};
pub use intensity::{average_intensity, grayscale};
pub use pipeline::{ProcessedTexture, TexturePipeline};
pub use resample::resize_bicubic;
pub use settings::TextureSettings;
pub use tint::MetalType;
pub use transform::{copy_region, flip_both, insert, negative, rotate_ccw};
pub use vector::Vec3;

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_public_types_are_send_sync() {
        assert_send_sync::<Kernel>();
        assert_send_sync::<TexturePipeline>();
        assert_send_sync::<ProcessedTexture>();
        assert_send_sync::<GlyphAtlas>();
        assert_send_sync::<TextureSettings>();
    }
}
