//! Image conversion pipeline module
//!
//! This module provides a structured approach to image format conversions:
//! a shared in-memory image, one codec per on-disk format, extension-based
//! dispatch and the conversion orchestration on top.

pub mod common;
pub mod image;
pub mod format;
pub mod bmp;
pub mod ppm;
pub mod jpeg;
pub mod conversions;

pub use common::{
    ConversionError,
    Result,
};

pub use image::{
    Color,
    Image,
};

pub use format::{
    FormatCodec,
    ImageCodec,
    ImageFormat,
};

pub use bmp::BmpCodec;
pub use ppm::PpmCodec;
pub use jpeg::JpegCodec;

pub use conversions::{
    ConversionConfig,
    ConversionConfigBuilder,
    ConversionPipeline,
};
