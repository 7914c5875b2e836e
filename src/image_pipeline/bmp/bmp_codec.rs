use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use tracing::debug;

use crate::image_pipeline::bmp::decode::decode_bmp;
use crate::image_pipeline::bmp::encode::encode_bmp;
use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::format::{ImageCodec, ImageFormat};
use crate::image_pipeline::image::Image;

/// File-level BMP codec. Files are closed when the call returns, on success
/// and on every error path.
#[derive(Debug, Clone, Copy, Default)]
pub struct BmpCodec;

impl ImageCodec for BmpCodec {
    fn format(&self) -> ImageFormat {
        ImageFormat::Bmp
    }

    fn load(&self, path: &Path) -> Result<Image> {
        debug!(path = %path.display(), "Loading BMP");
        let file = File::open(path).map_err(|e| {
            ConversionError::InputReadError(format!("{}: {}", path.display(), e))
        })?;
        decode_bmp(&mut BufReader::new(file))
    }

    fn save(&self, path: &Path, image: &Image) -> Result<()> {
        debug!(path = %path.display(), "Saving BMP");
        let file = File::create(path).map_err(|e| {
            ConversionError::OutputWriteError(format!("{}: {}", path.display(), e))
        })?;
        let mut output = BufWriter::new(file);
        encode_bmp(image, &mut output)?;
        output.flush()?;
        Ok(())
    }
}
