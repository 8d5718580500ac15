/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! A simple implementation of a bytestream reader
//!
//! Decoders read through [`ByteReader`], which wraps anything implementing
//! [`ByteReaderTrait`]. Unlike C's `fgetc`, a read past the end of the stream
//! is reported to the caller rather than returned as a sentinel byte.

pub use reader::{ByteCursor, ByteIoError, ByteReader, ByteSeekFrom};
pub use traits::ByteReaderTrait;

mod reader;
mod traits;
