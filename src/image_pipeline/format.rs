//! Format dispatch module
//!
//! Maps file paths to a format tag by extension and a tag to the codec that
//! loads and saves that format.

mod codec;
mod dispatch;
pub mod types;


pub use codec::ImageCodec;
pub use dispatch::FormatCodec;
pub use types::ImageFormat;
