//! Format tag types

use std::ffi::OsStr;
use std::fmt;
use std::path::Path;

/// On-disk formats the converter knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Jpeg,
    Ppm,
    Bmp,
    Unknown,
}

impl ImageFormat {
    /// Derives the format from the path's extension alone. Matching is
    /// case-sensitive: `photo.JPG` is `Unknown`.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        match path.as_ref().extension().and_then(OsStr::to_str) {
            Some("jpg") | Some("jpeg") => ImageFormat::Jpeg,
            Some("ppm") => ImageFormat::Ppm,
            Some("bmp") => ImageFormat::Bmp,
            _ => ImageFormat::Unknown,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "JPEG",
            ImageFormat::Ppm => "PPM",
            ImageFormat::Bmp => "BMP",
            ImageFormat::Unknown => "unknown",
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, ImageFormat::Unknown)
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
