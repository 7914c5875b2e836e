//! Conversion configuration types

use crate::image_pipeline::jpeg::DEFAULT_JPEG_QUALITY;

/// Configuration for image conversion
#[derive(Debug, Clone)]
pub struct ConversionConfig {
    /// Whether to validate image dimensions between load and save
    pub validate_dimensions: bool,
    /// Largest width or height accepted when validating, `None` for no limit
    pub max_dimension: Option<usize>,
    /// JPEG encoder quality, 0-100
    pub jpeg_quality: f32,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            validate_dimensions: true,
            max_dimension: None,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

impl ConversionConfig {
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder::default()
    }
}

/// Builder for ConversionConfig
#[derive(Default)]
pub struct ConversionConfigBuilder {
    validate_dimensions: Option<bool>,
    max_dimension: Option<Option<usize>>,
    jpeg_quality: Option<f32>,
}

impl ConversionConfigBuilder {
    pub fn validate_dimensions(mut self, validate: bool) -> Self {
        self.validate_dimensions = Some(validate);
        self
    }

    pub fn max_dimension(mut self, max: Option<usize>) -> Self {
        self.max_dimension = Some(max);
        self
    }

    pub fn jpeg_quality(mut self, quality: f32) -> Self {
        self.jpeg_quality = Some(quality);
        self
    }

    pub fn build(self) -> ConversionConfig {
        let default = ConversionConfig::default();
        ConversionConfig {
            validate_dimensions: self.validate_dimensions.unwrap_or(default.validate_dimensions),
            max_dimension: self.max_dimension.unwrap_or(default.max_dimension),
            jpeg_quality: self.jpeg_quality.unwrap_or(default.jpeg_quality),
        }
    }
}
