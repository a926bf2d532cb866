//! PNG dumps of intermediate buffers for inspection.

use std::path::{Path, PathBuf};

use texforge_core::{RgbaBuffer, TexforgeError, TexforgeResult};

/// Appends `.png` unless the path already ends with it (any case).
#[must_use]
pub fn png_path(path: &Path) -> PathBuf {
    let has_png = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
    if has_png {
        path.to_path_buf()
    } else {
        let mut name = path.as_os_str().to_owned();
        name.push(".png");
        PathBuf::from(name)
    }
}

/// Writes `buf` as an 8-bit RGBA PNG and returns the path written.
///
/// # Errors
///
/// Returns `Io` if encoding or writing fails.
pub fn save_png(buf: &RgbaBuffer, path: impl AsRef<Path>) -> TexforgeResult<PathBuf> {
    let target = png_path(path.as_ref());
    image::save_buffer(
        &target,
        buf.as_bytes(),
        buf.width(),
        buf.height(),
        image::ExtendedColorType::Rgba8,
    )
    .map_err(|e| TexforgeError::Io(format!("{}: {e}", target.display())))?;

    tracing::debug!(
        "Saved {}x{} debug image to {}",
        buf.width(),
        buf.height(),
        target.display()
    );
    Ok(target)
}
