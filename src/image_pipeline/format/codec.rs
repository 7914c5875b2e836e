use std::path::Path;

use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::format::types::ImageFormat;
use crate::image_pipeline::image::Image;

/// Load/save capability shared by every concrete format.
pub trait ImageCodec {
    fn format(&self) -> ImageFormat;
    fn load(&self, path: &Path) -> Result<Image>;
    fn save(&self, path: &Path, image: &Image) -> Result<()>;
}
