//! # Texture Pipeline
//!
//! Runs the full source-to-engine conversion for one image:
//!
//! ```text
//! PixelBuffer ─► tint ─► palette lookup ─► resize ─► sharpen
//!             ─► add border ─► dilate | wrap ─► (normal map)
//! ```
//!
//! Tinting only applies to indexed sources. The normal map is derived from
//! the finished albedo, border included, so both images line up texel for
//! texel.
//!
//! The pipeline owns its settings and palette; nothing is read from global
//! state.

use texforge_core::{Palette, PixelBuffer, RgbaBuffer, TexforgeResult, UvRect};

use crate::border::{add_border, dilate, wrap_border, WrapAxes};
use crate::bump::normal_map_packed;
use crate::convolution::sharpen;
use crate::resample::resize_bicubic;
use crate::settings::TextureSettings;
use crate::tint::{tint, MetalType};

/// Output of [`TexturePipeline::process`].
#[derive(Clone, Debug, PartialEq)]
pub struct ProcessedTexture {
    /// Colour image.
    pub albedo: RgbaBuffer,
    /// UV rect of the content inside the border, relative to `albedo`.
    pub rect: UvRect,
    /// Packed normal map, when requested.
    pub normal: Option<RgbaBuffer>,
}

/// Converts source images according to one [`TextureSettings`].
#[derive(Clone, Debug)]
pub struct TexturePipeline {
    settings: TextureSettings,
    palette: Palette,
    flip_y: bool,
}

impl TexturePipeline {
    /// Creates a pipeline after validating `settings`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the settings fail validation.
    pub fn new(settings: TextureSettings, palette: Palette) -> TexforgeResult<Self> {
        settings.validate()?;
        Ok(Self {
            settings,
            palette,
            flip_y: false,
        })
    }

    /// Reverses row order during palette conversion, for sources stored
    /// top-down that feed a bottom-up sampler.
    #[must_use]
    pub const fn with_flip_y(mut self, flip_y: bool) -> Self {
        self.flip_y = flip_y;
        self
    }

    /// Active settings.
    #[must_use]
    pub const fn settings(&self) -> &TextureSettings {
        &self.settings
    }

    /// Palette used for indexed sources.
    #[must_use]
    pub const fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Processes one source image. `src` is never modified.
    ///
    /// # Errors
    ///
    /// Returns `SizeMismatch` if a resize or border step does not fit the
    /// image.
    pub fn process(&self, src: &PixelBuffer) -> TexforgeResult<ProcessedTexture> {
        let s = &self.settings;
        let mut albedo = self.to_rgba(src);

        if let Some((width, height)) = s.resize {
            tracing::debug!(
                "Resizing {}x{} -> {}x{}",
                albedo.width(),
                albedo.height(),
                width,
                height
            );
            albedo = resize_bicubic(&albedo, width, height)?;
        }

        if s.sharpen {
            tracing::debug!("Sharpening");
            albedo = sharpen(&albedo);
        }

        if s.border_size > 0 {
            tracing::debug!("Adding {}px border", s.border_size);
            albedo = add_border(&albedo, s.border_size)?;

            if s.dilate {
                tracing::debug!("Dilating into border");
                dilate(&mut albedo);
            } else if s.copy_to_opposite_border {
                tracing::debug!("Wrapping border");
                wrap_border(&mut albedo, s.border_size, WrapAxes::default())?;
            }
        }

        let normal = s.create_normal_map.then(|| {
            tracing::debug!("Building normal map (strength {})", s.normal_strength);
            normal_map_packed(&albedo, s.normal_strength)
        });

        let rect = UvRect::inset(albedo.size(), s.border_size);
        Ok(ProcessedTexture {
            albedo,
            rect,
            normal,
        })
    }

    fn to_rgba(&self, src: &PixelBuffer) -> RgbaBuffer {
        let s = &self.settings;
        match src {
            PixelBuffer::Indexed(indexed) => {
                tracing::debug!(
                    "Converting {}x{} indexed image (metal {:?}, alpha index {:?})",
                    indexed.width(),
                    indexed.height(),
                    s.metal,
                    s.alpha_index
                );
                if s.metal == MetalType::None {
                    indexed.to_rgba(&self.palette, self.flip_y, s.alpha_index)
                } else {
                    let mut tinted = indexed.clone();
                    tint(&mut tinted, s.metal);
                    tinted.to_rgba(&self.palette, self.flip_y, s.alpha_index)
                }
            }
            PixelBuffer::Rgba(_) => {
                if s.metal != MetalType::None || s.alpha_index.is_some() {
                    tracing::debug!("Palette options ignored for RGBA source");
                }
                src.to_rgba(&self.palette, self.flip_y, None)
            }
        }
    }
}
