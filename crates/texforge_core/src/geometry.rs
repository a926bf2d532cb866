//! Pixel-space and normalized geometry used for atlas placement.

/// Width and height in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Size {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Size {
    /// Creates a new size.
    #[inline]
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Number of pixels covered.
    #[inline]
    #[must_use]
    pub const fn area(self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// A pixel position, origin at the top-left.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Position {
    /// Column.
    pub x: u32,
    /// Row.
    pub y: u32,
}

impl Position {
    /// Creates a new position.
    #[inline]
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle in pixel space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    /// Left edge.
    pub x: u32,
    /// Top edge.
    pub y: u32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Rect {
    /// Creates a new rect.
    #[inline]
    #[must_use]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Top-left corner.
    #[inline]
    #[must_use]
    pub const fn origin(self) -> Position {
        Position::new(self.x, self.y)
    }

    /// Extent of the rect.
    #[inline]
    #[must_use]
    pub const fn size(self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Exclusive right edge.
    #[inline]
    #[must_use]
    pub const fn right(self) -> u32 {
        self.x + self.width
    }

    /// Exclusive bottom edge.
    #[inline]
    #[must_use]
    pub const fn bottom(self) -> u32 {
        self.y + self.height
    }

    /// Returns true if the rect lies entirely inside a `size` canvas.
    #[inline]
    #[must_use]
    pub const fn fits_within(self, size: Size) -> bool {
        // Widened so edges past u32::MAX compare instead of overflowing.
        self.x as u64 + self.width as u64 <= size.width as u64
            && self.y as u64 + self.height as u64 <= size.height as u64
    }
}

/// A rectangle in normalized texture coordinates.
///
/// `y_min` may be larger than `y_max`: atlas rects are emitted with the
/// vertical axis flipped for bottom-up samplers.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct UvRect {
    /// Left edge.
    pub x_min: f32,
    /// Edge stored as the vertical minimum.
    pub y_min: f32,
    /// Right edge.
    pub x_max: f32,
    /// Edge stored as the vertical maximum.
    pub y_max: f32,
}

impl UvRect {
    /// Creates a UV rect from its edges.
    #[inline]
    #[must_use]
    pub const fn new(x_min: f32, y_min: f32, x_max: f32, y_max: f32) -> Self {
        Self {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    /// Normalizes a pixel rect against a square canvas, swapping the
    /// vertical edges.
    #[must_use]
    pub fn from_pixel_rect_flipped(rect: Rect, canvas_dim: u32) -> Self {
        let dim = canvas_dim as f32;
        Self {
            x_min: rect.x as f32 / dim,
            y_min: rect.bottom() as f32 / dim,
            x_max: rect.right() as f32 / dim,
            y_max: rect.y as f32 / dim,
        }
    }

    /// Region of a `size` canvas left after trimming `border` pixels from
    /// every edge, normalized against the whole canvas.
    ///
    /// An empty canvas yields the unit rect.
    #[must_use]
    pub fn inset(size: Size, border: u32) -> Self {
        if size.width == 0 || size.height == 0 {
            return Self::new(0.0, 0.0, 1.0, 1.0);
        }
        let (w, h) = (size.width as f32, size.height as f32);
        let bx = border.min(size.width / 2) as f32;
        let by = border.min(size.height / 2) as f32;
        Self {
            x_min: bx / w,
            y_min: by / h,
            x_max: (w - bx) / w,
            y_max: (h - by) / h,
        }
    }

    /// Signed width (`x_max - x_min`).
    #[inline]
    #[must_use]
    pub fn width(self) -> f32 {
        self.x_max - self.x_min
    }

    /// Signed height (`y_max - y_min`); negative for flipped rects.
    #[inline]
    #[must_use]
    pub fn height(self) -> f32 {
        self.y_max - self.y_min
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges() {
        let rect = Rect::new(4, 8, 10, 12);
        assert_eq!(rect.right(), 14);
        assert_eq!(rect.bottom(), 20);
        assert!(rect.fits_within(Size::new(14, 20)));
        assert!(!rect.fits_within(Size::new(13, 20)));
    }

    #[test]
    fn test_flipped_uv() {
        let uv = UvRect::from_pixel_rect_flipped(Rect::new(16, 32, 8, 16), 256);
        assert_eq!(uv.x_min, 16.0 / 256.0);
        assert_eq!(uv.x_max, 24.0 / 256.0);
        assert_eq!(uv.y_min, 48.0 / 256.0);
        assert_eq!(uv.y_max, 32.0 / 256.0);
        assert!(uv.height() < 0.0);
    }

    #[test]
    fn test_inset_uv() {
        let uv = UvRect::inset(Size::new(20, 10), 2);
        assert_eq!(uv, UvRect::new(0.1, 0.2, 0.9, 0.8));
        assert_eq!(UvRect::inset(Size::new(8, 8), 0), UvRect::new(0.0, 0.0, 1.0, 1.0));
    }
}
