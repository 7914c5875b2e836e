//! JPEG codec module
//!
//! Adapter over the `mozjpeg` bindings to libjpeg-turbo. Scanlines go to and
//! from the shared image top to bottom, in RGB with three components.

mod mozjpeg_codec;


pub use mozjpeg_codec::{JpegCodec, DEFAULT_JPEG_QUALITY};

pub(crate) const FORMAT_NAME: &str = "JPEG";
