use std::io::Read;

use tracing::debug;

use crate::image_pipeline::bmp::encode::bmp_stride;
use crate::image_pipeline::bmp::header::{FileHeader, InfoHeader};
use crate::image_pipeline::bmp::FORMAT_NAME;
use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::image::{Color, Image};

/// Reads a 24-bit BMP written in this codec's layout.
///
/// Both headers are validated before any pixel data is read. The declared
/// file size and data size are ignored: exactly `stride * height` bytes are
/// consumed, and running short fails the whole decode.
pub fn decode_bmp<R: Read>(input: &mut R) -> Result<Image> {
    let file_header = FileHeader::read_from(input)?;
    file_header.validate()?;

    let info_header = InfoHeader::read_from(input)?;
    info_header.validate()?;

    let (width, height) = info_header.dimensions()?;
    let stride = bmp_stride(width).ok_or_else(|| {
        ConversionError::malformed(FORMAT_NAME, format!("width {width} is too large"))
    })?;
    debug!(width, height, stride, "Decoding BMP image");

    if width == 0 || height == 0 {
        return Ok(Image::new(width, height, Color::black()));
    }

    // Rows arrive bottom-up. Buffers grow only as bytes are actually read, so
    // a header claiming a huge image cannot allocate past the file's size.
    let mut bottom_up: Vec<Color> = Vec::new();
    let mut row_bytes: Vec<u8> = Vec::new();
    for row_index in 0..height {
        row_bytes.clear();
        input.by_ref().take(stride as u64).read_to_end(&mut row_bytes)?;
        if row_bytes.len() != stride {
            return Err(ConversionError::malformed(
                FORMAT_NAME,
                format!(
                    "truncated pixel row {row_index}: {} of {stride} bytes",
                    row_bytes.len()
                ),
            ));
        }
        bottom_up.extend(
            row_bytes
                .chunks_exact(3)
                .take(width)
                .map(|bgr| Color::rgb(bgr[2], bgr[1], bgr[0])),
        );
    }

    let pixels: Vec<Color> = bottom_up
        .chunks_exact(width)
        .rev()
        .flatten()
        .copied()
        .collect();

    let image = Image::from_pixels(width, height, pixels).ok_or_else(|| {
        ConversionError::malformed(FORMAT_NAME, "pixel count does not match dimensions")
    })?;

    debug!("BMP decoding complete");
    Ok(image)
}
