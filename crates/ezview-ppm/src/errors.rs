/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::fmt::{Debug, Display, Formatter};
use std::io;
use std::path::PathBuf;

use ezview_core::bytestream::ByteIoError;

/// Errors occurring during decoding
///
/// Every variant is final, the decoder never hands out a partially
/// filled pixel buffer.
pub enum PpmDecodeErrors {
    /// The input path could not be opened for reading
    FileNotFound(PathBuf, io::Error),
    /// The stream does not start with `P3` or `P6`
    InvalidMagic(String),
    /// Width or height below one, carries `(width, height)` as parsed
    InvalidDimensions(i64, i64),
    /// Dimensions are valid but over the configured limits, `(limit, found)`
    LargeDimensions(usize, usize),
    /// Maximum channel value other than 255
    UnsupportedChannelDepth(i64),
    /// End of stream reached while header tokens or samples were expected
    TruncatedStream(String),
    /// A P3 sample that is not a decimal number, carries the pixel index
    InvalidPixelData(usize),
    /// The underlying reader failed for a reason other than running out of bytes
    IoErrors(ByteIoError)
}

impl Debug for PpmDecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FileNotFound(path, err) => {
                writeln!(f, "Cannot open {}: {err}", path.display())
            }
            Self::InvalidMagic(val) => {
                writeln!(f, "Invalid magic number, reason: {val}")
            }
            Self::InvalidDimensions(width, height) => {
                writeln!(
                    f,
                    "Invalid dimensions {width}x{height}, width and height must be at least 1"
                )
            }
            Self::LargeDimensions(expected, found) => {
                writeln!(
                    f,
                    "Too large dimensions, expected a value less than {expected} but found {found}"
                )
            }
            Self::UnsupportedChannelDepth(max_value) => {
                writeln!(
                    f,
                    "Unsupported max channel value {max_value}, only 255 (8 bits per channel) is supported"
                )
            }
            Self::TruncatedStream(val) => {
                writeln!(f, "Truncated stream, {val}")
            }
            Self::InvalidPixelData(index) => {
                writeln!(f, "Pixel {index} contains a sample that is not a decimal number")
            }
            Self::IoErrors(err) => {
                writeln!(f, "{err:?}")
            }
        }
    }
}

impl Display for PpmDecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // Debug output carries a trailing newline, trim it for inline use
        let message = format!("{self:?}");
        write!(f, "{}", message.trim_end())
    }
}

impl std::error::Error for PpmDecodeErrors {}

impl From<ByteIoError> for PpmDecodeErrors {
    fn from(err: ByteIoError) -> Self {
        match err {
            ByteIoError::NotEnoughBytes(expected, found) => PpmDecodeErrors::TruncatedStream(
                format!("expected {expected} bytes but only {found} were left")
            ),
            err => PpmDecodeErrors::IoErrors(err)
        }
    }
}

/// Errors occurring during encoding
pub enum PpmEncodeErrors {
    Static(&'static str),
    IoErrors(io::Error)
}

impl From<io::Error> for PpmEncodeErrors {
    fn from(err: io::Error) -> Self {
        PpmEncodeErrors::IoErrors(err)
    }
}

impl Debug for PpmEncodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PpmEncodeErrors::Static(ref errors) => {
                writeln!(f, "{errors}")
            }
            PpmEncodeErrors::IoErrors(ref err) => {
                writeln!(f, "{err}")
            }
        }
    }
}

impl Display for PpmEncodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PpmEncodeErrors::Static(errors) => write!(f, "{errors}"),
            PpmEncodeErrors::IoErrors(err) => write!(f, "{err}")
        }
    }
}

impl std::error::Error for PpmEncodeErrors {}
