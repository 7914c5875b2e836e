//! BMP header records, serialized field by field in little-endian order.

use std::io::{Read, Write};

use crate::image_pipeline::bmp::FORMAT_NAME;
use crate::image_pipeline::common::error::{ConversionError, Result};

pub const FILE_HEADER_SIZE: usize = 14;
pub const INFO_HEADER_SIZE: usize = 40;
/// Pixel data starts right after the two headers.
pub const PIXEL_DATA_OFFSET: u32 = (FILE_HEADER_SIZE + INFO_HEADER_SIZE) as u32;

const SIGNATURE: [u8; 2] = *b"BM";
const PLANES: u16 = 1;
const BITS_PER_PIXEL: u16 = 24;
const COMPRESSION_NONE: u32 = 0;
const USED_COLORS: u32 = 0;

/// 300 DPI in pixels per meter.
pub const RESOLUTION_PPM: i32 = 11811;

/// Written and required in the significant-colors field. Standard writers
/// put 0 here; files from this codec have always carried 0x01000000, and
/// decode accepts nothing else.
pub const SIGNIFICANT_COLORS: u32 = 0x0100_0000;

/// Little-endian field reader over a fixed header buffer.
struct FieldReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> FieldReader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn take<const N: usize>(&mut self) -> [u8; N] {
        let mut out = [0u8; N];
        out.copy_from_slice(&self.bytes[self.pos..self.pos + N]);
        self.pos += N;
        out
    }

    fn u16(&mut self) -> u16 {
        u16::from_le_bytes(self.take())
    }

    fn u32(&mut self) -> u32 {
        u32::from_le_bytes(self.take())
    }

    fn i32(&mut self) -> i32 {
        i32::from_le_bytes(self.take())
    }
}

/// The 14-byte `BITMAPFILEHEADER`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileHeader {
    pub signature: [u8; 2],
    pub file_size: u32,
    pub reserved: u32,
    pub data_offset: u32,
}

impl FileHeader {
    pub fn for_pixel_data(data_bytes: u32) -> Self {
        Self {
            signature: SIGNATURE,
            file_size: data_bytes + PIXEL_DATA_OFFSET,
            reserved: 0,
            data_offset: PIXEL_DATA_OFFSET,
        }
    }

    pub fn to_bytes(&self) -> [u8; FILE_HEADER_SIZE] {
        let mut out = [0u8; FILE_HEADER_SIZE];
        out[0..2].copy_from_slice(&self.signature);
        out[2..6].copy_from_slice(&self.file_size.to_le_bytes());
        out[6..10].copy_from_slice(&self.reserved.to_le_bytes());
        out[10..14].copy_from_slice(&self.data_offset.to_le_bytes());
        out
    }

    pub fn from_bytes(bytes: &[u8; FILE_HEADER_SIZE]) -> Self {
        let mut fields = FieldReader::new(bytes);
        Self {
            signature: fields.take(),
            file_size: fields.u32(),
            reserved: fields.u32(),
            data_offset: fields.u32(),
        }
    }

    pub fn read_from<R: Read>(input: &mut R) -> Result<Self> {
        let mut bytes = [0u8; FILE_HEADER_SIZE];
        input
            .read_exact(&mut bytes)
            .map_err(|e| ConversionError::from_read(FORMAT_NAME, "file header", e))?;
        Ok(Self::from_bytes(&bytes))
    }

    pub fn write_to<W: Write>(&self, output: &mut W) -> Result<()> {
        output.write_all(&self.to_bytes())?;
        Ok(())
    }

    /// The declared file size is not checked; readers rely on the info
    /// header's dimensions instead.
    pub fn validate(&self) -> Result<()> {
        if self.signature != SIGNATURE {
            return Err(ConversionError::malformed(
                FORMAT_NAME,
                format!("bad signature {:02x?}", self.signature),
            ));
        }
        if self.reserved != 0 {
            return Err(ConversionError::malformed(
                FORMAT_NAME,
                format!("reserved field is {:#x}, expected 0", self.reserved),
            ));
        }
        if self.data_offset != PIXEL_DATA_OFFSET {
            return Err(ConversionError::malformed(
                FORMAT_NAME,
                format!(
                    "pixel data offset is {}, expected {}",
                    self.data_offset, PIXEL_DATA_OFFSET
                ),
            ));
        }
        Ok(())
    }
}

/// The 40-byte `BITMAPINFOHEADER`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InfoHeader {
    pub header_size: u32,
    pub width: i32,
    pub height: i32,
    pub planes: u16,
    pub bits_per_pixel: u16,
    pub compression: u32,
    pub data_bytes: u32,
    pub horizontal_resolution: i32,
    pub vertical_resolution: i32,
    pub used_colors: u32,
    pub significant_colors: u32,
}

impl InfoHeader {
    /// Header for a bottom-up 24-bit image of the given size.
    pub fn new(width: i32, height: i32, data_bytes: u32) -> Self {
        Self {
            header_size: INFO_HEADER_SIZE as u32,
            width,
            height,
            planes: PLANES,
            bits_per_pixel: BITS_PER_PIXEL,
            compression: COMPRESSION_NONE,
            data_bytes,
            horizontal_resolution: RESOLUTION_PPM,
            vertical_resolution: RESOLUTION_PPM,
            used_colors: USED_COLORS,
            significant_colors: SIGNIFICANT_COLORS,
        }
    }

    pub fn to_bytes(&self) -> [u8; INFO_HEADER_SIZE] {
        let mut out = [0u8; INFO_HEADER_SIZE];
        out[0..4].copy_from_slice(&self.header_size.to_le_bytes());
        out[4..8].copy_from_slice(&self.width.to_le_bytes());
        out[8..12].copy_from_slice(&self.height.to_le_bytes());
        out[12..14].copy_from_slice(&self.planes.to_le_bytes());
        out[14..16].copy_from_slice(&self.bits_per_pixel.to_le_bytes());
        out[16..20].copy_from_slice(&self.compression.to_le_bytes());
        out[20..24].copy_from_slice(&self.data_bytes.to_le_bytes());
        out[24..28].copy_from_slice(&self.horizontal_resolution.to_le_bytes());
        out[28..32].copy_from_slice(&self.vertical_resolution.to_le_bytes());
        out[32..36].copy_from_slice(&self.used_colors.to_le_bytes());
        out[36..40].copy_from_slice(&self.significant_colors.to_le_bytes());
        out
    }

    pub fn from_bytes(bytes: &[u8; INFO_HEADER_SIZE]) -> Self {
        let mut fields = FieldReader::new(bytes);
        Self {
            header_size: fields.u32(),
            width: fields.i32(),
            height: fields.i32(),
            planes: fields.u16(),
            bits_per_pixel: fields.u16(),
            compression: fields.u32(),
            data_bytes: fields.u32(),
            horizontal_resolution: fields.i32(),
            vertical_resolution: fields.i32(),
            used_colors: fields.u32(),
            significant_colors: fields.u32(),
        }
    }

    pub fn read_from<R: Read>(input: &mut R) -> Result<Self> {
        let mut bytes = [0u8; INFO_HEADER_SIZE];
        input
            .read_exact(&mut bytes)
            .map_err(|e| ConversionError::from_read(FORMAT_NAME, "info header", e))?;
        Ok(Self::from_bytes(&bytes))
    }

    pub fn write_to<W: Write>(&self, output: &mut W) -> Result<()> {
        output.write_all(&self.to_bytes())?;
        Ok(())
    }

    /// Checks every fixed field. `data_bytes` is ignored.
    pub fn validate(&self) -> Result<()> {
        check_field("header size", self.header_size, INFO_HEADER_SIZE as u32)?;
        check_field("color planes", self.planes, PLANES)?;
        check_field("bits per pixel", self.bits_per_pixel, BITS_PER_PIXEL)?;
        check_field("compression", self.compression, COMPRESSION_NONE)?;
        check_field("horizontal resolution", self.horizontal_resolution, RESOLUTION_PPM)?;
        check_field("vertical resolution", self.vertical_resolution, RESOLUTION_PPM)?;
        check_field("used colors", self.used_colors, USED_COLORS)?;
        check_field("significant colors", self.significant_colors, SIGNIFICANT_COLORS)?;
        Ok(())
    }

    /// Width and height as unsigned sizes. Negative values (top-down or
    /// mirrored bitmaps) are not supported.
    pub fn dimensions(&self) -> Result<(usize, usize)> {
        match (usize::try_from(self.width), usize::try_from(self.height)) {
            (Ok(width), Ok(height)) => Ok((width, height)),
            _ => Err(ConversionError::malformed(
                FORMAT_NAME,
                format!("unsupported dimensions {}x{}", self.width, self.height),
            )),
        }
    }
}

fn check_field<T>(name: &str, actual: T, expected: T) -> Result<()>
where
    T: PartialEq + std::fmt::Display,
{
    if actual == expected {
        Ok(())
    } else {
        Err(ConversionError::malformed(
            FORMAT_NAME,
            format!("{name} is {actual}, expected {expected}"),
        ))
    }
}
