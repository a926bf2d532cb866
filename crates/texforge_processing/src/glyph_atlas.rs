//! # Glyph Atlas Packing
//!
//! Packs fixed-cell bitmap font glyphs into a single 256x256 RGBA atlas.
//!
//! ## Layout
//!
//! Cells are placed left to right, top to bottom, each `cell x cell`
//! pixels. A row wraps as soon as the next cell would cross the right
//! edge. Every cell is fully painted: nonzero coverage becomes the text
//! colour, zero the background. Atlas pixels outside any cell stay clear.
//!
//! ## Rects
//!
//! Each glyph gets a UV rect covering its *visible* extent
//! (`glyph_width x line_height`), not the whole cell, with the vertical
//! edges swapped for bottom-up samplers:
//!
//! ```text
//! x_min = x / 256              x_max = (x + glyph_width) / 256
//! y_min = (y + line_height) / 256   y_max = y / 256
//! ```

use texforge_core::{Pixel, Position, Rect, RgbaBuffer, TexforgeError, TexforgeResult, UvRect};

use crate::transform::insert;

/// Side length of the atlas in pixels.
pub const ATLAS_DIM: u32 = 256;

/// A bitmap font whose glyphs share one square cell size.
pub trait GlyphSource {
    /// Number of glyphs to pack.
    fn glyph_count(&self) -> usize;

    /// Side length of every glyph cell.
    fn cell_dimension(&self) -> u32;

    /// Visible height shared by all glyphs.
    fn line_height(&self) -> u32;

    /// Visible width of glyph `index`.
    fn glyph_width(&self, index: usize) -> u32;

    /// Row-major coverage of glyph `index`, `cell * cell` bytes.
    fn glyph_coverage(&self, index: usize) -> &[u8];
}

/// A packed atlas and one UV rect per glyph.
#[derive(Clone, Debug, PartialEq)]
pub struct GlyphAtlas {
    /// The 256x256 atlas image.
    pub atlas: RgbaBuffer,
    /// UV rects, indexed like the source glyphs.
    pub rects: Vec<UvRect>,
}

/// In-memory [`GlyphSource`] backed by a flat coverage array.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GlyphSheet {
    cell: u32,
    line_height: u32,
    widths: Vec<u32>,
    coverage: Vec<u8>,
}

impl GlyphSheet {
    /// Creates a sheet of `widths.len()` glyphs.
    ///
    /// # Errors
    ///
    /// Returns `SizeMismatch` if `coverage` does not hold exactly
    /// `cell * cell` bytes per glyph.
    pub fn new(
        cell: u32,
        line_height: u32,
        widths: Vec<u32>,
        coverage: Vec<u8>,
    ) -> TexforgeResult<Self> {
        let expected = cell_area(cell) * widths.len();
        if coverage.len() != expected {
            return Err(TexforgeError::size_mismatch(format!(
                "{} glyphs of {cell}x{cell} need {expected} coverage bytes, got {}",
                widths.len(),
                coverage.len()
            )));
        }
        Ok(Self {
            cell,
            line_height,
            widths,
            coverage,
        })
    }
}

impl GlyphSource for GlyphSheet {
    fn glyph_count(&self) -> usize {
        self.widths.len()
    }

    fn cell_dimension(&self) -> u32 {
        self.cell
    }

    fn line_height(&self) -> u32 {
        self.line_height
    }

    fn glyph_width(&self, index: usize) -> u32 {
        self.widths[index]
    }

    fn glyph_coverage(&self, index: usize) -> &[u8] {
        let area = cell_area(self.cell);
        &self.coverage[index * area..(index + 1) * area]
    }
}

#[inline]
const fn cell_area(cell: u32) -> usize {
    cell as usize * cell as usize
}

/// Renders glyph `index` into a `cell x cell` buffer.
///
/// Returns the cell image and the glyph's visible rect
/// `(0, 0, glyph_width, line_height)`.
///
/// # Errors
///
/// Returns `SizeMismatch` if the coverage length is not `cell * cell`.
pub fn glyph_pixels(
    source: &dyn GlyphSource,
    index: usize,
    back: Pixel,
    text: Pixel,
) -> TexforgeResult<(RgbaBuffer, Rect)> {
    let cell = source.cell_dimension();
    let coverage = source.glyph_coverage(index);
    if coverage.len() != cell_area(cell) {
        return Err(TexforgeError::size_mismatch(format!(
            "glyph {index} has {} coverage bytes, cell {cell}x{cell} needs {}",
            coverage.len(),
            cell_area(cell)
        )));
    }

    let pixels = coverage
        .iter()
        .map(|&c| if c > 0 { text } else { back })
        .collect();
    let image = RgbaBuffer::from_pixels(cell, cell, pixels)?;
    let rect = Rect::new(0, 0, source.glyph_width(index), source.line_height());
    Ok((image, rect))
}

/// Packs every glyph of `source` into a [`GlyphAtlas`].
///
/// # Errors
///
/// Returns `SizeMismatch` if the cell size is zero or exceeds the atlas,
/// if the glyphs run past the bottom edge, or if any glyph's coverage has
/// the wrong length.
pub fn pack_atlas(
    source: &dyn GlyphSource,
    back: Pixel,
    text: Pixel,
) -> TexforgeResult<GlyphAtlas> {
    let cell = source.cell_dimension();
    if cell == 0 || cell > ATLAS_DIM {
        return Err(TexforgeError::size_mismatch(format!(
            "glyph cell {cell} does not fit a {ATLAS_DIM}px atlas"
        )));
    }

    let mut atlas = RgbaBuffer::new(ATLAS_DIM, ATLAS_DIM);
    let mut rects = Vec::with_capacity(source.glyph_count());
    let (mut x, mut y) = (0u32, 0u32);

    for index in 0..source.glyph_count() {
        if x + cell > ATLAS_DIM {
            x = 0;
            y += cell;
        }
        if y + cell > ATLAS_DIM {
            return Err(TexforgeError::size_mismatch(format!(
                "glyph {index} of {} overflows the {ATLAS_DIM}px atlas",
                source.glyph_count()
            )));
        }

        let (image, visible) = glyph_pixels(source, index, back, text)?;
        insert(&mut atlas, &image, Position::new(x, y))?;

        let placed = Rect::new(x, y, visible.width, visible.height);
        rects.push(UvRect::from_pixel_rect_flipped(placed, ATLAS_DIM));

        x += cell;
    }

    tracing::debug!(
        "Packed {} glyphs ({}px cells) into {}x{} atlas",
        rects.len(),
        cell,
        ATLAS_DIM,
        ATLAS_DIM
    );

    Ok(GlyphAtlas { atlas, rects })
}
