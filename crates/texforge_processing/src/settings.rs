//! Texture processing settings, loadable from TOML.
//!
//! ```toml
//! alpha_index = 0
//! border_size = 2
//! dilate = true
//! sharpen = false
//! create_normal_map = true
//! normal_strength = 0.4
//! metal = "dwarven"
//! resize = [128, 128]
//! ```
//!
//! Every key is optional; missing keys take the [`Default`] values.

use std::path::Path;

use serde::{Deserialize, Serialize};
use texforge_core::{TexforgeError, TexforgeResult};

use crate::tint::MetalType;

/// How a source texture is turned into engine-ready output.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
#[allow(clippy::struct_excessive_bools)]
pub struct TextureSettings {
    /// Palette index rendered fully transparent. Indexed sources only.
    pub alpha_index: Option<u8>,
    /// Width of the ring added around the image.
    pub border_size: u32,
    /// Fill the ring from the opposite edge, for tiling textures.
    /// Exclusive with `dilate`.
    pub copy_to_opposite_border: bool,
    /// Bleed edge colour into the ring, for cut-out sprites.
    pub dilate: bool,
    /// Apply the sharpen kernel after any resize.
    pub sharpen: bool,
    /// Also produce a packed normal map.
    pub create_normal_map: bool,
    /// Gradient scale for the normal map.
    pub normal_strength: f32,
    /// Ramp tint applied to indexed sources before palette lookup.
    pub metal: MetalType,
    /// Target `(width, height)` before the border is added.
    pub resize: Option<(u32, u32)>,
}

impl Default for TextureSettings {
    fn default() -> Self {
        Self {
            alpha_index: None,
            border_size: 0,
            copy_to_opposite_border: false,
            dilate: false,
            sharpen: false,
            create_normal_map: false,
            normal_strength: 1.0,
            metal: MetalType::None,
            resize: None,
        }
    }
}

impl TextureSettings {
    /// Settings for tiling wall and floor textures: wrapped border.
    #[must_use]
    pub fn tiled(border_size: u32) -> Self {
        Self {
            border_size,
            copy_to_opposite_border: true,
            ..Self::default()
        }
    }

    /// Settings for cut-out billboards: transparent index 0 and dilated
    /// border.
    #[must_use]
    pub fn billboard(border_size: u32) -> Self {
        Self {
            alpha_index: Some(0),
            border_size,
            dilate: true,
            ..Self::default()
        }
    }

    /// Parses and validates settings from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` for malformed TOML, unknown keys, or a
    /// combination rejected by [`validate`](Self::validate).
    pub fn from_toml_str(text: &str) -> TexforgeResult<Self> {
        let settings: Self =
            toml::from_str(text).map_err(|e| TexforgeError::InvalidConfig(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reads, parses and validates a TOML settings file.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file cannot be read, otherwise as
    /// [`from_toml_str`](Self::from_toml_str).
    pub fn from_toml_file(path: impl AsRef<Path>) -> TexforgeResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| TexforgeError::Io(format!("{}: {e}", path.display())))?;
        let settings = Self::from_toml_str(&text)?;
        tracing::debug!("Loaded texture settings from {}", path.display());
        Ok(settings)
    }

    /// Serializes the settings back to TOML.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if serialization fails.
    pub fn to_toml_string(&self) -> TexforgeResult<String> {
        toml::to_string(self).map_err(|e| TexforgeError::InvalidConfig(e.to_string()))
    }

    /// Checks option combinations.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if wrap and dilate are both set, if either
    /// is set without a border, if the normal strength is not finite, or if
    /// a resize target has a zero dimension.
    pub fn validate(&self) -> TexforgeResult<()> {
        if self.copy_to_opposite_border && self.dilate {
            return Err(TexforgeError::InvalidConfig(
                "copy_to_opposite_border and dilate are mutually exclusive".into(),
            ));
        }
        if (self.copy_to_opposite_border || self.dilate) && self.border_size == 0 {
            return Err(TexforgeError::InvalidConfig(
                "copy_to_opposite_border and dilate require border_size > 0".into(),
            ));
        }
        if !self.normal_strength.is_finite() {
            return Err(TexforgeError::InvalidConfig(format!(
                "normal_strength must be finite, got {}",
                self.normal_strength
            )));
        }
        if let Some((w, h)) = self.resize {
            if w == 0 || h == 0 {
                return Err(TexforgeError::InvalidConfig(format!(
                    "resize target {w}x{h} has a zero dimension"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_is_default() {
        let settings = TextureSettings::from_toml_str("").unwrap();
        assert_eq!(settings, TextureSettings::default());
    }

    #[test]
    fn test_parses_all_keys() {
        let settings = TextureSettings::from_toml_str(
            r#"
            alpha_index = 0
            border_size = 2
            dilate = true
            sharpen = true
            create_normal_map = true
            normal_strength = 0.5
            metal = "daedric"
            resize = [64, 32]
            "#,
        )
        .unwrap();
        assert_eq!(settings.alpha_index, Some(0));
        assert_eq!(settings.border_size, 2);
        assert!(settings.dilate);
        assert_eq!(settings.metal, MetalType::Daedric);
        assert_eq!(settings.resize, Some((64, 32)));
        assert!((settings.normal_strength - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_rejects_wrap_with_dilate() {
        let err = TextureSettings::from_toml_str(
            "border_size = 1\ndilate = true\ncopy_to_opposite_border = true",
        )
        .unwrap_err();
        assert!(matches!(err, TexforgeError::InvalidConfig(_)));
    }

    #[test]
    fn test_border_required() {
        assert!(TextureSettings::from_toml_str("dilate = true").is_err());
        assert!(TextureSettings::tiled(0).validate().is_err());
        assert!(TextureSettings::tiled(1).validate().is_ok());
        assert!(TextureSettings::billboard(2).validate().is_ok());
    }

    #[test]
    fn test_unknown_key_and_bad_metal() {
        assert!(TextureSettings::from_toml_str("bordr_size = 1").is_err());
        assert!(TextureSettings::from_toml_str("metal = \"bronze\"").is_err());
    }

    #[test]
    fn test_missing_file_is_io() {
        let err = TextureSettings::from_toml_file("/nonexistent/texforge.toml").unwrap_err();
        assert!(matches!(err, TexforgeError::Io(_)));
    }

    #[test]
    fn test_toml_round_trip() {
        let settings = TextureSettings {
            metal: MetalType::Mithril,
            ..TextureSettings::billboard(3)
        };
        let text = settings.to_toml_string().unwrap();
        assert_eq!(TextureSettings::from_toml_str(&text).unwrap(), settings);
    }
}
