use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use tracing::debug;

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::format::{ImageCodec, ImageFormat};
use crate::image_pipeline::image::Image;
use crate::image_pipeline::ppm::decode::decode_ppm;
use crate::image_pipeline::ppm::encode::encode_ppm;

#[derive(Debug, Clone, Copy, Default)]
pub struct PpmCodec;

impl ImageCodec for PpmCodec {
    fn format(&self) -> ImageFormat {
        ImageFormat::Ppm
    }

    fn load(&self, path: &Path) -> Result<Image> {
        debug!(path = %path.display(), "Loading PPM");
        let file = File::open(path).map_err(|e| {
            ConversionError::InputReadError(format!("{}: {}", path.display(), e))
        })?;
        decode_ppm(&mut BufReader::new(file))
    }

    fn save(&self, path: &Path, image: &Image) -> Result<()> {
        debug!(path = %path.display(), "Saving PPM");
        let file = File::create(path).map_err(|e| {
            ConversionError::OutputWriteError(format!("{}: {}", path.display(), e))
        })?;
        let mut output = BufWriter::new(file);
        encode_ppm(image, &mut output)?;
        output.flush()?;
        Ok(())
    }
}
