use std::io::{BufRead, Read};

use tracing::debug;

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::image::{Color, Image};
use crate::image_pipeline::ppm::{FORMAT_NAME, MAGIC, MAX_VALUE};

/// Longest header token accepted; enough for any `usize`.
const MAX_TOKEN_LEN: usize = 20;

/// Tokenizer for the ASCII part of a PNM header.
struct HeaderReader<'a, R: BufRead> {
    input: &'a mut R,
}

impl<'a, R: BufRead> HeaderReader<'a, R> {
    fn new(input: &'a mut R) -> Self {
        Self { input }
    }

    fn peek(&mut self) -> Result<Option<u8>> {
        Ok(self.input.fill_buf()?.first().copied())
    }

    fn bump(&mut self) {
        self.input.consume(1);
    }

    /// Skips whitespace and `#` comments running to end of line.
    fn skip_separators(&mut self) -> Result<()> {
        loop {
            match self.peek()? {
                Some(b'#') => {
                    while let Some(byte) = self.peek()? {
                        self.bump();
                        if byte == b'\n' {
                            break;
                        }
                    }
                }
                Some(byte) if byte.is_ascii_whitespace() => self.bump(),
                _ => return Ok(()),
            }
        }
    }

    fn token(&mut self, what: &str) -> Result<String> {
        self.skip_separators()?;
        let mut token = String::new();
        while let Some(byte) = self.peek()? {
            if byte.is_ascii_whitespace() || byte == b'#' {
                break;
            }
            if token.len() == MAX_TOKEN_LEN {
                return Err(ConversionError::malformed(
                    FORMAT_NAME,
                    format!("{what} is too long"),
                ));
            }
            token.push(char::from(byte));
            self.bump();
        }
        if token.is_empty() {
            return Err(ConversionError::malformed(
                FORMAT_NAME,
                format!("missing {what}"),
            ));
        }
        Ok(token)
    }

    fn number(&mut self, what: &str) -> Result<usize> {
        let token = self.token(what)?;
        token.parse().map_err(|_| {
            ConversionError::malformed(FORMAT_NAME, format!("{what} {token:?} is not a number"))
        })
    }

    /// The single whitespace byte that separates the header from the samples.
    fn header_terminator(&mut self) -> Result<()> {
        match self.peek()? {
            Some(byte) if byte.is_ascii_whitespace() => {
                self.bump();
                Ok(())
            }
            _ => Err(ConversionError::malformed(
                FORMAT_NAME,
                "header is not followed by whitespace",
            )),
        }
    }
}

/// Reads a binary PPM with maxval 255.
pub fn decode_ppm<R: BufRead>(input: &mut R) -> Result<Image> {
    let (width, height) = {
        let mut header = HeaderReader::new(input);

        let magic = header.token("magic number")?;
        if magic != MAGIC {
            return Err(ConversionError::malformed(
                FORMAT_NAME,
                format!("magic number {magic:?}, expected {MAGIC:?}"),
            ));
        }
        let width = header.number("width")?;
        let height = header.number("height")?;
        let max_value = header.number("maximum color value")?;
        if max_value != MAX_VALUE {
            return Err(ConversionError::malformed(
                FORMAT_NAME,
                format!("maximum color value {max_value}, expected {MAX_VALUE}"),
            ));
        }
        header.header_terminator()?;
        (width, height)
    };

    debug!(width, height, "Decoding PPM image");

    let row_len = width.checked_mul(3).ok_or_else(|| {
        ConversionError::malformed(FORMAT_NAME, format!("width {width} is too large"))
    })?;

    if width == 0 || height == 0 {
        return Ok(Image::new(width, height, Color::black()));
    }

    let mut pixels: Vec<Color> = Vec::new();
    let mut row_bytes: Vec<u8> = Vec::new();
    for row_index in 0..height {
        row_bytes.clear();
        input.by_ref().take(row_len as u64).read_to_end(&mut row_bytes)?;
        if row_bytes.len() != row_len {
            return Err(ConversionError::malformed(
                FORMAT_NAME,
                format!(
                    "truncated pixel row {row_index}: {} of {row_len} bytes",
                    row_bytes.len()
                ),
            ));
        }
        pixels.extend(
            row_bytes
                .chunks_exact(3)
                .map(|rgb| Color::rgb(rgb[0], rgb[1], rgb[2])),
        );
    }

    Image::from_pixels(width, height, pixels).ok_or_else(|| {
        ConversionError::malformed(FORMAT_NAME, "pixel count does not match dimensions")
    })
}
