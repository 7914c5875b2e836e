//! In-memory image module
//!
//! Every codec decodes into and encodes from the same RGBA grid defined here.

mod color;
pub mod types;

#[cfg(test)]
mod tests;

pub use color::Color;
pub use types::{Image, Rows, RowsMut};
