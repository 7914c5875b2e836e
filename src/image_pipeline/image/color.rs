/// One RGBA sample. Formats without alpha load as fully opaque.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const OPAQUE: u8 = u8::MAX;

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: Self::OPAQUE }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn black() -> Self {
        Self::rgb(0, 0, 0)
    }

    pub const fn white() -> Self {
        Self::rgb(255, 255, 255)
    }

    /// Compares the color channels only.
    pub fn same_rgb(&self, other: &Color) -> bool {
        self.r == other.r && self.g == other.g && self.b == other.b
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::black()
    }
}
