//! Image container types

use std::slice::{ChunksExact, ChunksExactMut};

use super::color::Color;

/// Iterator over image rows, top to bottom. Double-ended, so `.rev()` walks
/// bottom to top.
pub type Rows<'a> = ChunksExact<'a, Color>;

/// Mutable counterpart of [`Rows`].
pub type RowsMut<'a> = ChunksExactMut<'a, Color>;

/// Rectangular grid of colors stored row-major, row 0 at the top.
///
/// `Image::default()` is the empty image (0x0), the value a failed load
/// would produce. Check [`Image::is_valid`] before using an image that came
/// from outside.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Image {
    width: usize,
    height: usize,
    pixels: Vec<Color>,
}

impl Image {
    /// Creates a `width` x `height` image with every pixel set to `fill`.
    pub fn new(width: usize, height: usize, fill: Color) -> Self {
        Self {
            width,
            height,
            pixels: vec![fill; width * height],
        }
    }

    /// Wraps an existing pixel buffer. Returns `None` unless
    /// `pixels.len() == width * height`.
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<Color>) -> Option<Self> {
        let expected = width.checked_mul(height)?;
        if pixels.len() != expected {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// False for the empty image and for any image with a zero dimension.
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    pub fn row(&self, y: usize) -> Option<&[Color]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.width;
        self.pixels.get(start..start + self.width)
    }

    pub fn row_mut(&mut self, y: usize) -> Option<&mut [Color]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.width;
        self.pixels.get_mut(start..start + self.width)
    }

    /// Rows top to bottom. An image with zero width yields no rows.
    pub fn rows(&self) -> Rows<'_> {
        self.pixels.chunks_exact(self.width.max(1))
    }

    pub fn rows_mut(&mut self) -> RowsMut<'_> {
        self.pixels.chunks_exact_mut(self.width.max(1))
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x >= self.width {
            return None;
        }
        self.row(y).map(|row| row[x])
    }

    /// Returns false if `(x, y)` lies outside the image.
    pub fn set_pixel(&mut self, x: usize, y: usize, color: Color) -> bool {
        if x >= self.width {
            return false;
        }
        match self.row_mut(y) {
            Some(row) => {
                row[x] = color;
                true
            }
            None => false,
        }
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }
}
