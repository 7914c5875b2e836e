use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("Unknown format of the input file: {0}")]
    UnknownInputFormat(String),

    #[error("Unknown format of the output file: {0}")]
    UnknownOutputFormat(String),

    #[error("Failed to read input file: {0}")]
    InputReadError(String),

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("Malformed {format} data: {reason}")]
    MalformedInput {
        format: &'static str,
        reason: String,
    },

    #[error("Failed to decode {format} image: {reason}")]
    DecodeError {
        format: &'static str,
        reason: String,
    },

    #[error("Failed to encode {format} image: {reason}")]
    EncodeError {
        format: &'static str,
        reason: String,
    },

    #[error("Invalid image dimensions: width={0}, height={1}")]
    InvalidDimensions(usize, usize),

    #[error("Loading failed: {0}")]
    LoadFailed(#[source] Box<ConversionError>),

    #[error("Saving failed: {0}")]
    SaveFailed(#[source] Box<ConversionError>),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
}

impl ConversionError {
    pub fn malformed(format: &'static str, reason: impl Into<String>) -> Self {
        ConversionError::MalformedInput {
            format,
            reason: reason.into(),
        }
    }

    /// Maps a failed read of `what` to an error. Running out of bytes means
    /// the file is truncated, which is a content problem rather than an I/O one.
    pub fn from_read(format: &'static str, what: &str, err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            ConversionError::malformed(format, format!("truncated {what}"))
        } else {
            ConversionError::IoError(err)
        }
    }

    /// Process exit code reported by the command line converter.
    pub fn exit_code(&self) -> u8 {
        match self {
            ConversionError::UnknownInputFormat(_) => 2,
            ConversionError::UnknownOutputFormat(_) => 3,
            ConversionError::SaveFailed(_)
            | ConversionError::OutputWriteError(_)
            | ConversionError::EncodeError { .. } => 5,
            _ => 4,
        }
    }
}

pub type Result<T> = std::result::Result<T, ConversionError>;
