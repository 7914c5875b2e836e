//! Pipeline conversions module
//!
//! This module contains the orchestration logic that loads an image with one
//! codec and saves it with another.

mod image_conversion;
pub mod types;


pub use image_conversion::ConversionPipeline;
pub use types::{ConversionConfig, ConversionConfigBuilder};
