/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Traits for reading images in ezview
//!
//! This exposes the trait and implementations for readers
//! used by the ezview decoders.

use crate::bytestream::reader::{ByteIoError, ByteSeekFrom};

/// The input trait implemented for readers.
///
/// # Considerations
///
/// If you have an in memory buffer, prefer [`ByteCursor`](crate::bytestream::ByteCursor)
/// over [`Cursor`](std::io::Cursor), the former never goes through `std::io`
/// machinery. Files should be wrapped in a [`BufReader`](std::io::BufReader),
/// single byte reads are the common case for text formats.
pub trait ByteReaderTrait {
    /// Read a single byte, returning `Ok(None)` once the stream is exhausted
    ///
    /// The implementation should try to be as fast as possible as this is called
    /// from the ASCII pixel loop.
    fn read_byte(&mut self) -> Result<Option<u8>, ByteIoError>;

    /// Read exact bytes required to fill `buf` or return an error if that isn't possible
    ///
    /// ## Errors
    /// Returns [`ByteIoError::NotEnoughBytes`] with the requested and actual count
    /// when the stream ends before `buf` is full.
    fn read_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), ByteIoError>;

    /// Read bytes into `buf` returning how many bytes were read
    ///
    /// This doesn't guarantee that buf will be filled, for such a guarantee see
    /// [`read_exact_bytes`](Self::read_exact_bytes)
    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<usize, ByteIoError>;

    /// Move the read position
    ///
    /// Only small relative moves are issued by the decoders (pushing back the
    /// byte that terminated a token), implementations should make those cheap.
    fn z_seek(&mut self, from: ByteSeekFrom) -> Result<(), ByteIoError>;

    /// Return the current position of the inner cursor.
    fn z_position(&mut self) -> Result<u64, ByteIoError>;

    /// Name of the reader, used in trace logs
    fn name(&self) -> &'static str;
}
