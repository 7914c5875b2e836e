use tracing::{info, instrument, warn};
use std::path::Path;

use crate::image_pipeline::{
    common::error::{ConversionError, Result},
    conversions::types::ConversionConfig,
    format::{FormatCodec, ImageCodec},
    image::Image,
};

/// Loads an image in one format and saves it in another.
///
/// Holds only configuration; every conversion owns its image and file
/// handles for the duration of the call, so one pipeline can be shared
/// across threads.
pub struct ConversionPipeline {
    config: ConversionConfig,
}

impl Default for ConversionPipeline {
    fn default() -> Self {
        Self::new(ConversionConfig::default())
    }
}

impl ConversionPipeline {
    pub fn new(config: ConversionConfig) -> Self {
        Self { config }
    }

    /// An empty image is always rejected; the size limit only applies when
    /// validation is enabled.
    fn validate_dimensions(&self, width: usize, height: usize) -> Result<()> {
        if width == 0 || height == 0 {
            return Err(ConversionError::InvalidDimensions(width, height));
        }

        if !self.config.validate_dimensions {
            return Ok(());
        }

        if let Some(max) = self.config.max_dimension {
            if width > max || height > max {
                warn!(width, height, max, "Image dimensions exceed maximum");
                return Err(ConversionError::InvalidDimensions(width, height));
            }
        }

        Ok(())
    }

    /// Converts `input_path` to `output_path`, picking both codecs from the
    /// file extensions. Unknown formats are reported before either file is
    /// touched.
    #[instrument(skip(self, input_path, output_path))]
    pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        output_path: Q,
    ) -> Result<()> {
        let input_path = input_path.as_ref();
        let output_path = output_path.as_ref();

        let source = FormatCodec::for_path(input_path, &self.config).ok_or_else(|| {
            ConversionError::UnknownInputFormat(input_path.display().to_string())
        })?;
        let target = FormatCodec::for_path(output_path, &self.config).ok_or_else(|| {
            ConversionError::UnknownOutputFormat(output_path.display().to_string())
        })?;

        self.convert_with(&source, input_path, &target, output_path)
    }

    /// Converts with explicitly chosen codecs.
    #[instrument(skip_all, fields(from = %source.format(), to = %target.format()))]
    pub fn convert_with<S: ImageCodec, T: ImageCodec>(
        &self,
        source: &S,
        input_path: &Path,
        target: &T,
        output_path: &Path,
    ) -> Result<()> {
        info!(
            input = %input_path.display(),
            output = %output_path.display(),
            "Converting file"
        );

        let image = self.load(source, input_path)?;

        {
            let _span = tracing::info_span!("save_image", format = %target.format()).entered();
            target
                .save(output_path, &image)
                .map_err(|e| ConversionError::SaveFailed(Box::new(e)))?;
        }

        info!(
            width = image.width(),
            height = image.height(),
            "Conversion complete"
        );
        Ok(())
    }

    /// Loads and validates an image. Every failure is reported as
    /// [`ConversionError::LoadFailed`].
    pub fn load<S: ImageCodec>(&self, source: &S, input_path: &Path) -> Result<Image> {
        let _span = tracing::info_span!("load_image", format = %source.format()).entered();

        let image = source
            .load(input_path)
            .map_err(|e| ConversionError::LoadFailed(Box::new(e)))?;

        self.validate_dimensions(image.width(), image.height())
            .map_err(|e| ConversionError::LoadFailed(Box::new(e)))?;

        Ok(image)
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: ConversionConfig) {
        self.config = config;
    }
}
