/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use core::fmt::Formatter;

pub use cursor::ByteCursor;

use crate::bytestream::ByteReaderTrait;

mod cursor;
mod std_readers;

/// Enumeration of possible methods to seek within an I/O object.
///
/// It is analogous to the [SeekFrom](std::io::SeekFrom) in the std library but
/// it's here to allow this to work in no-std crates
#[derive(Copy, PartialEq, Eq, Clone, Debug)]
pub enum ByteSeekFrom {
    /// Sets the offset to the current position plus the specified number of
    /// bytes.
    ///
    /// It is an error to seek before byte 0.
    Current(i64)
}

impl ByteSeekFrom {
    /// Convert to [SeekFrom](std::io::SeekFrom) from the `std::io` library
    #[cfg(feature = "std")]
    pub(crate) fn to_std_seek(self) -> std::io::SeekFrom {
        match self {
            ByteSeekFrom::Current(pos) => std::io::SeekFrom::Current(pos)
        }
    }
}

pub enum ByteIoError {
    #[cfg(feature = "std")]
    StdIoError(std::io::Error),
    TryFromIntError(core::num::TryFromIntError),
    // requested, read
    NotEnoughBytes(usize, usize),
    SeekError(&'static str)
}

impl ByteIoError {
    /// Whether this error means the stream ended early
    pub const fn is_eof(&self) -> bool {
        matches!(self, ByteIoError::NotEnoughBytes(..))
    }
}

impl core::fmt::Debug for ByteIoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            #[cfg(feature = "std")]
            ByteIoError::StdIoError(err) => {
                writeln!(f, "Underlying I/O error {err}")
            }
            ByteIoError::TryFromIntError(err) => {
                writeln!(f, "Cannot convert to int {err}")
            }
            ByteIoError::NotEnoughBytes(expected, found) => {
                writeln!(f, "Not enough bytes, expected {expected} but found {found}")
            }
            ByteIoError::SeekError(err) => {
                writeln!(f, "Seek error: {err}")
            }
        }
    }
}

impl core::fmt::Display for ByteIoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            #[cfg(feature = "std")]
            ByteIoError::StdIoError(err) => write!(f, "I/O error: {err}"),
            ByteIoError::TryFromIntError(err) => write!(f, "cannot convert to int: {err}"),
            ByteIoError::NotEnoughBytes(expected, found) => {
                write!(f, "expected {expected} bytes but found {found}")
            }
            ByteIoError::SeekError(err) => write!(f, "seek error: {err}")
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ByteIoError {}

#[cfg(feature = "std")]
impl From<std::io::Error> for ByteIoError {
    fn from(value: std::io::Error) -> Self {
        ByteIoError::StdIoError(value)
    }
}

impl From<core::num::TryFromIntError> for ByteIoError {
    fn from(value: core::num::TryFromIntError) -> Self {
        ByteIoError::TryFromIntError(value)
    }
}

/// A byte reader with the small set of helpers text/binary
/// hybrid formats need.
///
/// Every read that can run past the end of the stream returns either
/// an `Option` or a [`ByteIoError::NotEnoughBytes`], never a made up value.
pub struct ByteReader<T: ByteReaderTrait> {
    inner: T
}

impl<T: ByteReaderTrait> ByteReader<T> {
    pub fn new(source: T) -> ByteReader<T> {
        ByteReader { inner: source }
    }
    /// Step back `num` bytes, the equivalent of `ungetc`
    #[inline(always)]
    pub fn rewind(&mut self, num: usize) -> Result<(), ByteIoError> {
        self.inner
            .z_seek(ByteSeekFrom::Current(-i64::try_from(num)?))
    }
    /// Read one byte, `Ok(None)` at end of stream
    #[inline(always)]
    pub fn read_u8(&mut self) -> Result<Option<u8>, ByteIoError> {
        self.inner.read_byte()
    }
    /// Read one byte, treating end of stream as an error
    #[inline(always)]
    pub fn get_u8_err(&mut self) -> Result<u8, ByteIoError> {
        self.inner
            .read_byte()?
            .ok_or(ByteIoError::NotEnoughBytes(1, 0))
    }
    /// Return the next byte without consuming it
    #[inline]
    pub fn peek_u8(&mut self) -> Result<Option<u8>, ByteIoError> {
        let byte = self.inner.read_byte()?;
        if byte.is_some() {
            self.rewind(1)?;
        }
        Ok(byte)
    }

    /// Consume bytes while `func` returns true.
    ///
    /// The first byte for which `func` is false is left in the stream.
    pub fn skip_until_false<F: Fn(u8) -> bool>(&mut self, func: F) -> Result<(), ByteIoError> {
        while let Some(byte) = self.inner.read_byte()? {
            if !(func)(byte) {
                self.rewind(1)?;
                break;
            }
        }
        Ok(())
    }

    #[inline(always)]
    pub fn position(&mut self) -> Result<u64, ByteIoError> {
        self.inner.z_position()
    }

    pub fn read_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), ByteIoError> {
        self.inner.read_exact_bytes(buf)
    }

    pub fn name(&self) -> &'static str {
        self.inner.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_until_exhausted() {
        let mut reader = ByteReader::new(ByteCursor::new(b"ab"));

        assert_eq!(reader.read_u8().ok(), Some(Some(b'a')));
        assert_eq!(reader.get_u8_err().ok(), Some(b'b'));
        assert_eq!(reader.read_u8().ok(), Some(None));
        assert!(reader.get_u8_err().unwrap_err().is_eof());
    }

    #[test]
    fn rewind_pushes_back_one_byte() {
        let mut reader = ByteReader::new(ByteCursor::new(b"xy"));

        assert_eq!(reader.get_u8_err().ok(), Some(b'x'));
        reader.rewind(1).unwrap();
        assert_eq!(reader.get_u8_err().ok(), Some(b'x'));
        assert_eq!(reader.peek_u8().ok(), Some(Some(b'y')));
        assert_eq!(reader.position().ok(), Some(1));
    }

    #[test]
    fn skip_whitespace_stops_at_token() {
        let mut reader = ByteReader::new(ByteCursor::new(b" \t\r\n42"));

        reader.skip_until_false(|x| x.is_ascii_whitespace()).unwrap();
        assert_eq!(reader.get_u8_err().ok(), Some(b'4'));
    }

    #[test]
    fn read_exact_reports_counts() {
        let mut reader = ByteReader::new(ByteCursor::new([1_u8, 2, 3, 4]));
        let mut buf = [0; 6];

        match reader.read_exact_bytes(&mut buf) {
            Err(ByteIoError::NotEnoughBytes(expected, found)) => {
                assert_eq!((expected, found), (6, 4));
            }
            _ => panic!("expected a short read")
        }
    }

    #[test]
    fn rewinding_before_start_fails() {
        let mut reader = ByteReader::new(ByteCursor::new(b"a"));
        assert!(reader.rewind(1).is_err());
    }
}
