/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use crate::bytestream::{ByteIoError, ByteReaderTrait, ByteSeekFrom};

/// An in memory reader over anything that can be viewed as bytes
///
/// This works in `no_std` and is the fastest reader for data
/// that is already in memory.
pub struct ByteCursor<T: AsRef<[u8]>> {
    stream:   T,
    position: usize
}

impl<T: AsRef<[u8]>> ByteCursor<T> {
    pub fn new(buffer: T) -> ByteCursor<T> {
        ByteCursor {
            stream:   buffer,
            position: 0
        }
    }
    /// Bytes left between the cursor and the end of the buffer
    pub fn remaining(&self) -> usize {
        self.stream.as_ref().len().saturating_sub(self.position)
    }
}

impl<T: AsRef<[u8]>> ByteReaderTrait for ByteCursor<T> {
    #[inline(always)]
    fn read_byte(&mut self) -> Result<Option<u8>, ByteIoError> {
        match self.stream.as_ref().get(self.position) {
            Some(byte) => {
                self.position += 1;
                Ok(Some(*byte))
            }
            None => Ok(None)
        }
    }

    #[inline(always)]
    fn read_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), ByteIoError> {
        let remaining = self.remaining();

        if remaining < buf.len() {
            // position is left untouched on failure
            return Err(ByteIoError::NotEnoughBytes(buf.len(), remaining));
        }
        let end = self.position + buf.len();
        buf.copy_from_slice(&self.stream.as_ref()[self.position..end]);
        self.position = end;

        Ok(())
    }

    #[inline(always)]
    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<usize, ByteIoError> {
        let count = core::cmp::min(buf.len(), self.remaining());
        let end = self.position + count;

        buf[..count].copy_from_slice(&self.stream.as_ref()[self.position..end]);
        self.position = end;

        Ok(count)
    }

    #[inline(always)]
    fn z_seek(&mut self, from: ByteSeekFrom) -> Result<(), ByteIoError> {
        let ByteSeekFrom::Current(offset) = from;
        let current = i64::try_from(self.position)?;
        let new_position = current
            .checked_add(offset)
            .ok_or(ByteIoError::SeekError("position overflowed"))?;

        if new_position < 0 {
            return Err(ByteIoError::SeekError("cannot seek before byte 0"));
        }
        self.position = usize::try_from(new_position)?;

        Ok(())
    }

    #[inline(always)]
    fn z_position(&mut self) -> Result<u64, ByteIoError> {
        Ok(u64::try_from(self.position)?)
    }

    fn name(&self) -> &'static str {
        "ByteCursor<T>"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_read_keeps_position() {
        let mut cursor = ByteCursor::new([9_u8, 8, 7]);
        let mut buf = [0; 2];

        cursor.read_exact_bytes(&mut buf).unwrap();
        assert_eq!(buf, [9, 8]);

        assert!(cursor.read_exact_bytes(&mut buf).is_err());
        assert_eq!(cursor.remaining(), 1);
        assert_eq!(cursor.read_bytes(&mut buf).unwrap(), 1);
        assert_eq!(buf[0], 7);
        assert_eq!(cursor.remaining(), 0);
    }
}
