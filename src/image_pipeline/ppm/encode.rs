use std::io::Write;

use tracing::debug;

use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::image::Image;
use crate::image_pipeline::ppm::{MAGIC, MAX_VALUE};

/// Writes `image` as binary PPM. Alpha is dropped.
pub fn encode_ppm<W: Write>(image: &Image, output: &mut W) -> Result<()> {
    debug!(width = image.width(), height = image.height(), "Encoding PPM image");

    write!(output, "{MAGIC}\n{} {}\n{MAX_VALUE}\n", image.width(), image.height())?;

    let mut row_bytes = Vec::with_capacity(image.width() * 3);
    for row in image.rows() {
        row_bytes.clear();
        row_bytes.extend(row.iter().flat_map(|c| [c.r, c.g, c.b]));
        output.write_all(&row_bytes)?;
    }

    Ok(())
}
