//! # Kernel Convolution
//!
//! Generic integer-kernel filtering with **toroidal** sampling: taps that
//! fall outside the buffer wrap to the opposite edge, so edge filters never
//! produce seams on tileable art.
//!
//! ## Per-pixel arithmetic
//!
//! 1. `sum_c = Σ kernel[x][y] * sample.c` for `c ∈ {r, g, b}` (i64)
//! 2. `weight = Σ kernel`, with 0 treated as 1
//! 3. if `absolute`, `sum_c = |sum_c|`
//! 4. `out_c = clamp(sum_c / weight + offset, 0, 255)` (division truncates
//!    toward zero)
//! 5. `out_a` = alpha of the **last** tap visited (bottom-right of the
//!    footprint), not a blend
//!
//! A kernel whose entries sum to a negative weight leaves every pixel as
//! it was.
//!
//! Kernel entries are addressed `[x][y]`: the outer index walks taps
//! horizontally.

use texforge_core::{Pixel, RgbaBuffer, TexforgeError, TexforgeResult};

/// An integer convolution kernel with odd dimensions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Kernel {
    width: usize,
    height: usize,
    /// Entries in `x * height + y` order.
    weights: Vec<i32>,
    offset: i32,
    absolute: bool,
}

impl Kernel {
    /// Creates a kernel from entries laid out `x * height + y`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidKernel` if either dimension is even or zero, or if
    /// `weights.len() != width * height`.
    pub fn new(width: usize, height: usize, weights: Vec<i32>) -> TexforgeResult<Self> {
        if width % 2 == 0 || height % 2 == 0 {
            return Err(TexforgeError::InvalidKernel(format!(
                "dimensions must be odd, got {width}x{height}"
            )));
        }
        if weights.len() != width * height {
            return Err(TexforgeError::InvalidKernel(format!(
                "{width}x{height} kernel needs {} entries, got {}",
                width * height,
                weights.len()
            )));
        }
        Ok(Self {
            width,
            height,
            weights,
            offset: 0,
            absolute: false,
        })
    }

    /// Creates a 3x3 kernel from `matrix[x][y]`.
    #[must_use]
    pub fn from_3x3(matrix: [[i32; 3]; 3]) -> Self {
        Self {
            width: 3,
            height: 3,
            weights: matrix.iter().flatten().copied().collect(),
            offset: 0,
            absolute: false,
        }
    }

    /// Sobel operator `[[-1, 0, 1], [-2, 0, 2], [-1, 0, 1]]`.
    ///
    /// Under `[x][y]` addressing this responds to changes down a column,
    /// positive where the lower side is brighter.
    #[must_use]
    pub fn sobel_x() -> Self {
        Self::from_3x3([[-1, 0, 1], [-2, 0, 2], [-1, 0, 1]])
    }

    /// Sobel operator `[[1, 2, 1], [0, 0, 0], [-1, -2, -1]]`.
    ///
    /// Under `[x][y]` addressing this responds to changes along a row,
    /// positive where the left side is brighter.
    #[must_use]
    pub fn sobel_y() -> Self {
        Self::from_3x3([[1, 2, 1], [0, 0, 0], [-1, -2, -1]])
    }

    /// Sharpening kernel (weight 8).
    #[must_use]
    pub fn sharpen() -> Self {
        Self::from_3x3([[-1, -1, -1], [1, 12, 1], [-1, -1, -1]])
    }

    /// Pass-through kernel.
    #[must_use]
    pub fn identity() -> Self {
        Self::from_3x3([[0, 0, 0], [0, 1, 0], [0, 0, 0]])
    }

    /// Sets the value added after normalization.
    #[must_use]
    pub const fn with_offset(mut self, offset: i32) -> Self {
        self.offset = offset;
        self
    }

    /// Sets whether sums are made absolute before normalization.
    #[must_use]
    pub const fn with_absolute(mut self, absolute: bool) -> Self {
        self.absolute = absolute;
        self
    }

    /// Kernel width in taps.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Kernel height in taps.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Entry at tap `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the tap is outside the kernel.
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> i32 {
        assert!(x < self.width && y < self.height, "kernel tap out of range");
        self.weights[x * self.height + y]
    }

    /// Offset added after normalization.
    #[must_use]
    pub const fn offset(&self) -> i32 {
        self.offset
    }

    /// Whether sums are made absolute.
    #[must_use]
    pub const fn absolute(&self) -> bool {
        self.absolute
    }

    /// Sum of all entries, 0 replaced by 1.
    #[must_use]
    pub fn weight(&self) -> i64 {
        match self.weights.iter().map(|&k| i64::from(k)).sum::<i64>() {
            0 => 1,
            w => w,
        }
    }

    /// Filters `src` into a new buffer of the same size.
    #[must_use]
    pub fn convolve(&self, src: &RgbaBuffer) -> RgbaBuffer {
        let weight = self.weight();
        if weight < 0 || src.is_empty() {
            tracing::trace!("Kernel weight {} leaves source unchanged", weight);
            return src.clone();
        }

        let half_w = (self.width / 2) as i64;
        let half_h = (self.height / 2) as i64;
        let mut out = src.clone();
        let dst = out.pixels_mut();
        let mut idx = 0;

        for y in 0..i64::from(src.height()) {
            for x in 0..i64::from(src.width()) {
                let mut sum = [0i64; 3];
                let mut alpha = 0u8;

                for kx in 0..self.width {
                    let sample_x = x - half_w + kx as i64;
                    for ky in 0..self.height {
                        let sample_y = y - half_h + ky as i64;
                        let px = src.get_wrapped(sample_x, sample_y);
                        let k = i64::from(self.weights[kx * self.height + ky]);
                        sum[0] += k * i64::from(px.r);
                        sum[1] += k * i64::from(px.g);
                        sum[2] += k * i64::from(px.b);
                        alpha = px.a;
                    }
                }

                let [r, g, b] = sum.map(|s| self.finish_channel(s, weight));
                dst[idx] = Pixel::rgba(r, g, b, alpha);
                idx += 1;
            }
        }

        out
    }

    #[inline]
    fn finish_channel(&self, sum: i64, weight: i64) -> u8 {
        // Wide enough that no i32 entry or offset can overflow before the clamp.
        let sum = if self.absolute { sum.saturating_abs() } else { sum };
        (sum / weight)
            .saturating_add(i64::from(self.offset))
            .clamp(0, 255) as u8
    }
}

/// Sharpens `src` with [`Kernel::sharpen`].
#[must_use]
pub fn sharpen(src: &RgbaBuffer) -> RgbaBuffer {
    Kernel::sharpen().convolve(src)
}
