//! PPM codec module
//!
//! Binary PPM (P6) with 8-bit samples: a short ASCII header followed by
//! unpadded RGB rows, top to bottom.

mod encode;
mod decode;
mod ppm_codec;


pub use encode::encode_ppm;
pub use decode::decode_ppm;
pub use ppm_codec::PpmCodec;

pub(crate) const FORMAT_NAME: &str = "PPM";
pub(crate) const MAGIC: &str = "P6";
pub(crate) const MAX_VALUE: usize = 255;
