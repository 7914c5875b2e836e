use std::any::Any;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use mozjpeg::{ColorSpace, Compress, Decompress};
use tracing::debug;

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::format::{ImageCodec, ImageFormat};
use crate::image_pipeline::image::{Color, Image};
use crate::image_pipeline::jpeg::FORMAT_NAME;

pub const DEFAULT_JPEG_QUALITY: f32 = 90.0;

/// JPEG codec backed by libjpeg-turbo.
///
/// libjpeg reports fatal errors through a callback that must not return.
/// mozjpeg turns that callback into an unwind and hands it back as
/// `io::Error`; anything that still escapes as a panic is caught here, so a
/// corrupt file ends as an error value instead of aborting the process.
/// Decompressor and compressor state is freed by `Drop` on every path.
#[derive(Debug, Clone, Copy)]
pub struct JpegCodec {
    quality: f32,
}

impl Default for JpegCodec {
    fn default() -> Self {
        Self {
            quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

impl JpegCodec {
    /// Quality is clamped to 0–100.
    pub fn with_quality(quality: f32) -> Self {
        let quality = if quality.is_nan() {
            DEFAULT_JPEG_QUALITY
        } else {
            quality.clamp(0.0, 100.0)
        };
        Self { quality }
    }

    pub fn quality(&self) -> f32 {
        self.quality
    }

    /// Decodes JPEG bytes into an RGB image.
    pub fn decode(&self, data: &[u8]) -> Result<Image> {
        guard_library(decode_error, || decode_jpeg(data))
    }

    /// Compresses `image` into `output`, one scanline per image row.
    pub fn encode<W: Write>(&self, image: &Image, output: W) -> Result<()> {
        guard_library(encode_error, || encode_jpeg(image, self.quality, output))
    }
}

impl ImageCodec for JpegCodec {
    fn format(&self) -> ImageFormat {
        ImageFormat::Jpeg
    }

    fn load(&self, path: &Path) -> Result<Image> {
        debug!(path = %path.display(), "Loading JPEG");
        let data = std::fs::read(path).map_err(|e| {
            ConversionError::InputReadError(format!("{}: {}", path.display(), e))
        })?;
        self.decode(&data)
    }

    fn save(&self, path: &Path, image: &Image) -> Result<()> {
        debug!(path = %path.display(), quality = self.quality, "Saving JPEG");
        let file = File::create(path).map_err(|e| {
            ConversionError::OutputWriteError(format!("{}: {}", path.display(), e))
        })?;
        let mut output = BufWriter::new(file);
        self.encode(image, &mut output)?;
        output.flush()?;
        Ok(())
    }
}

fn decode_error(reason: String) -> ConversionError {
    ConversionError::DecodeError {
        format: FORMAT_NAME,
        reason,
    }
}

fn encode_error(reason: String) -> ConversionError {
    ConversionError::EncodeError {
        format: FORMAT_NAME,
        reason,
    }
}

fn decode_jpeg(data: &[u8]) -> Result<Image> {
    let decompress = Decompress::new_mem(data)
        .map_err(|e| decode_error(format!("failed to read header: {e}")))?;

    let mut decompress = decompress
        .rgb()
        .map_err(|e| decode_error(format!("failed to start RGB decompression: {e}")))?;

    let width = decompress.width();
    let height = decompress.height();
    debug!(width, height, "Decoding JPEG image");

    let scanlines: Vec<[u8; 3]> = decompress
        .read_scanlines()
        .map_err(|e| decode_error(format!("failed to read scanlines: {e}")))?;

    let pixels: Vec<Color> = scanlines
        .into_iter()
        .map(|[r, g, b]| Color::rgb(r, g, b))
        .collect();

    Image::from_pixels(width, height, pixels)
        .ok_or_else(|| decode_error(format!("incomplete scanlines for {width}x{height}")))
}

fn encode_jpeg<W: Write>(image: &Image, quality: f32, output: W) -> Result<()> {
    if !image.is_valid() {
        return Err(encode_error(format!(
            "cannot encode a {}x{} image",
            image.width(),
            image.height()
        )));
    }
    debug!(width = image.width(), height = image.height(), quality, "Encoding JPEG image");

    let mut compress = Compress::new(ColorSpace::JCS_RGB);
    compress.set_size(image.width(), image.height());
    compress.set_quality(quality);

    let mut started = compress
        .start_compress(output)
        .map_err(|e| encode_error(format!("failed to start compression: {e}")))?;

    let mut scanline = Vec::with_capacity(image.width() * 3);
    for row in image.rows() {
        scanline.clear();
        scanline.extend(row.iter().flat_map(|c| [c.r, c.g, c.b]));
        started
            .write_scanlines(&scanline)
            .map_err(|e| encode_error(format!("failed to write scanline: {e}")))?;
    }

    started
        .finish()
        .map_err(|e| encode_error(format!("failed to finish compression: {e}")))?;

    debug!("JPEG encoding complete");
    Ok(())
}

/// Runs a libjpeg operation, converting an escaped panic into an error.
fn guard_library<T>(
    to_error: fn(String) -> ConversionError,
    f: impl FnOnce() -> Result<T>,
) -> Result<T> {
    panic::catch_unwind(AssertUnwindSafe(f)).unwrap_or_else(|payload| {
        Err(to_error(format!("libjpeg aborted: {}", panic_message(&*payload))))
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown error".to_string()
    }
}
