use std::io::Write;

use tracing::debug;

use crate::image_pipeline::bmp::header::{FileHeader, InfoHeader, PIXEL_DATA_OFFSET};
use crate::image_pipeline::bmp::FORMAT_NAME;
use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::image::Image;

const BYTES_PER_PIXEL: usize = 3;
const ROW_ALIGNMENT: usize = 4;

/// Length in bytes of one stored row: three bytes per pixel rounded up to a
/// multiple of four. `None` when that length does not fit in `usize`.
pub fn bmp_stride(width: usize) -> Option<usize> {
    width
        .checked_mul(BYTES_PER_PIXEL)?
        .checked_next_multiple_of(ROW_ALIGNMENT)
}

/// Writes `image` as a 24-bit BMP. Alpha is dropped.
///
/// Stops at the first failed write; whatever was already written stays in
/// `output`.
pub fn encode_bmp<W: Write>(image: &Image, output: &mut W) -> Result<()> {
    let (width, height) = (image.width(), image.height());
    let too_large = || ConversionError::EncodeError {
        format: FORMAT_NAME,
        reason: format!("{width}x{height} does not fit in a BMP"),
    };

    let header_width = i32::try_from(width).map_err(|_| too_large())?;
    let header_height = i32::try_from(height).map_err(|_| too_large())?;
    let stride = bmp_stride(width).ok_or_else(too_large)?;
    let data_bytes = stride
        .checked_mul(height)
        .and_then(|bytes| u32::try_from(bytes).ok())
        .filter(|bytes| bytes.checked_add(PIXEL_DATA_OFFSET).is_some())
        .ok_or_else(too_large)?;

    debug!(width, height, stride, data_bytes, "Encoding BMP image");

    FileHeader::for_pixel_data(data_bytes).write_to(output)?;
    InfoHeader::new(header_width, header_height, data_bytes).write_to(output)?;

    // Padding bytes at the end of the buffer are never touched and stay zero.
    let mut row_bytes = vec![0u8; stride];
    for row in image.rows().rev() {
        for (color, bgr) in row.iter().zip(row_bytes.chunks_exact_mut(BYTES_PER_PIXEL)) {
            bgr[0] = color.b;
            bgr[1] = color.g;
            bgr[2] = color.r;
        }
        output.write_all(&row_bytes)?;
    }

    debug!("BMP encoding complete");
    Ok(())
}
