//! BMP codec module
//!
//! Uncompressed 24-bit Windows bitmaps: a 14-byte file header, a 40-byte info
//! header and bottom-up BGR rows padded to a multiple of four bytes.

mod header;
mod encode;
mod decode;
mod bmp_codec;


pub use header::{
    FileHeader,
    InfoHeader,
    FILE_HEADER_SIZE,
    INFO_HEADER_SIZE,
    PIXEL_DATA_OFFSET,
    RESOLUTION_PPM,
    SIGNIFICANT_COLORS,
};
pub use encode::{bmp_stride, encode_bmp};
pub use decode::decode_bmp;
pub use bmp_codec::BmpCodec;

pub(crate) const FORMAT_NAME: &str = "BMP";
