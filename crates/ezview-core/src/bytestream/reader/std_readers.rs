/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

#![cfg(feature = "std")]

use std::io;
use std::io::{BufRead, BufReader, Read, Seek};

use crate::bytestream::{ByteIoError, ByteReaderTrait, ByteSeekFrom};

/// Fill `buf` from `source`, reporting how far we got if the source ends early
fn read_exact_counting<R: Read>(source: &mut R, buf: &mut [u8]) -> Result<(), ByteIoError> {
    let mut filled = 0;

    while filled < buf.len() {
        match source.read(&mut buf[filled..]) {
            Ok(0) => return Err(ByteIoError::NotEnoughBytes(buf.len(), filled)),
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(ByteIoError::from(e))
        }
    }
    Ok(())
}

/// Take one byte out of a buffered reader without an extra copy
fn read_byte_buffered<R: BufRead>(source: &mut R) -> Result<Option<u8>, ByteIoError> {
    let byte = match source.fill_buf()?.first() {
        Some(byte) => *byte,
        None => return Ok(None)
    };
    source.consume(1);
    Ok(Some(byte))
}

impl<T> ByteReaderTrait for io::Cursor<T>
where
    T: AsRef<[u8]>
{
    #[inline(always)]
    fn read_byte(&mut self) -> Result<Option<u8>, ByteIoError> {
        read_byte_buffered(self)
    }

    #[inline(always)]
    fn read_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), ByteIoError> {
        read_exact_counting(self, buf)
    }

    #[inline(always)]
    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<usize, ByteIoError> {
        self.read(buf).map_err(ByteIoError::from)
    }

    #[inline(always)]
    fn z_seek(&mut self, from: ByteSeekFrom) -> Result<(), ByteIoError> {
        self.seek(from.to_std_seek())?;
        Ok(())
    }

    fn z_position(&mut self) -> Result<u64, ByteIoError> {
        Ok(self.position())
    }

    fn name(&self) -> &'static str {
        "Cursor<T>"
    }
}

impl<T: Read + Seek> ByteReaderTrait for BufReader<T> {
    #[inline(always)]
    fn read_byte(&mut self) -> Result<Option<u8>, ByteIoError> {
        read_byte_buffered(self)
    }

    fn read_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), ByteIoError> {
        read_exact_counting(self, buf)
    }

    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<usize, ByteIoError> {
        self.read(buf).map_err(ByteIoError::from)
    }

    fn z_seek(&mut self, from: ByteSeekFrom) -> Result<(), ByteIoError> {
        // seek_relative keeps the internal buffer when the target is inside it,
        // which is always the case for the one byte push back decoders do.
        let ByteSeekFrom::Current(offset) = from;
        self.seek_relative(offset)?;
        Ok(())
    }

    fn z_position(&mut self) -> Result<u64, ByteIoError> {
        self.stream_position().map_err(ByteIoError::from)
    }

    fn name(&self) -> &'static str {
        "BufReader<T>"
    }
}

#[cfg(test)]
mod tests {
    use std::io::{BufReader, Cursor};

    use crate::bytestream::ByteReader;

    #[test]
    fn buffered_reader_pushes_back() {
        let source = BufReader::new(Cursor::new(b"P6 1".to_vec()));
        let mut reader = ByteReader::new(source);

        assert_eq!(reader.get_u8_err().ok(), Some(b'P'));
        assert_eq!(reader.get_u8_err().ok(), Some(b'6'));
        reader.rewind(1).unwrap();
        assert_eq!(reader.get_u8_err().ok(), Some(b'6'));
        assert_eq!(reader.position().ok(), Some(2));
    }

    #[test]
    fn short_read_from_cursor() {
        let mut reader = ByteReader::new(Cursor::new(vec![1_u8, 2]));
        let mut buf = [0; 3];

        let err = reader.read_exact_bytes(&mut buf).unwrap_err();
        assert!(err.is_eof());
    }
}
