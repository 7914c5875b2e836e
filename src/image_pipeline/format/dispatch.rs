use std::path::Path;

use tracing::debug;

use crate::image_pipeline::bmp::BmpCodec;
use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::conversions::ConversionConfig;
use crate::image_pipeline::format::codec::ImageCodec;
use crate::image_pipeline::format::types::ImageFormat;
use crate::image_pipeline::image::Image;
use crate::image_pipeline::jpeg::JpegCodec;
use crate::image_pipeline::ppm::PpmCodec;

/// Closed set of codecs, one per known [`ImageFormat`].
#[derive(Debug, Clone)]
pub enum FormatCodec {
    Jpeg(JpegCodec),
    Ppm(PpmCodec),
    Bmp(BmpCodec),
}

impl FormatCodec {
    /// Returns `None` for [`ImageFormat::Unknown`].
    pub fn for_format(format: ImageFormat, config: &ConversionConfig) -> Option<Self> {
        match format {
            ImageFormat::Jpeg => Some(FormatCodec::Jpeg(JpegCodec::with_quality(config.jpeg_quality))),
            ImageFormat::Ppm => Some(FormatCodec::Ppm(PpmCodec)),
            ImageFormat::Bmp => Some(FormatCodec::Bmp(BmpCodec)),
            ImageFormat::Unknown => None,
        }
    }

    pub fn for_path<P: AsRef<Path>>(path: P, config: &ConversionConfig) -> Option<Self> {
        let path = path.as_ref();
        let format = ImageFormat::from_path(path);
        debug!(path = %path.display(), format = %format, "Resolved format");
        Self::for_format(format, config)
    }
}

impl ImageCodec for FormatCodec {
    fn format(&self) -> ImageFormat {
        match self {
            FormatCodec::Jpeg(codec) => codec.format(),
            FormatCodec::Ppm(codec) => codec.format(),
            FormatCodec::Bmp(codec) => codec.format(),
        }
    }

    fn load(&self, path: &Path) -> Result<Image> {
        match self {
            FormatCodec::Jpeg(codec) => codec.load(path),
            FormatCodec::Ppm(codec) => codec.load(path),
            FormatCodec::Bmp(codec) => codec.load(path),
        }
    }

    fn save(&self, path: &Path, image: &Image) -> Result<()> {
        match self {
            FormatCodec::Jpeg(codec) => codec.save(path, image),
            FormatCodec::Ppm(codec) => codec.save(path, image),
            FormatCodec::Bmp(codec) => codec.save(path, image),
        }
    }
}
