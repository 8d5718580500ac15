/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use ezview_core::bytestream::{ByteIoError, ByteReader, ByteReaderTrait};
use ezview_core::log::{info, trace};
use ezview_core::options::DecoderOptions;

use crate::errors::PpmDecodeErrors;
use crate::image::{Header, PpmFormat, PpmImage, Rgb};

/// The only maximum channel value we accept, 8 bits per channel
const MAX_CHANNEL_VALUE: i64 = 255;

/// An instance of a PPM decoder
///
/// The decoder can decode P3 and P6 formats with a maximum
/// channel value of 255.
///
/// Comments are only recognised between the magic number and the width,
/// a `#` anywhere later is treated as malformed data.
pub struct PpmDecoder<T: ByteReaderTrait> {
    reader:  ByteReader<T>,
    header:  Option<Header>,
    options: DecoderOptions
}

/// Outcome of reading one decimal token, mirroring what `scanf("%d")` can see
enum Token {
    Integer(i64),
    /// Something other than a digit where a number was expected
    Invalid,
    /// A sign that is the last byte of the stream
    SignAtEnd,
    /// The stream ended before any non whitespace byte
    End
}

impl<T: ByteReaderTrait> PpmDecoder<T> {
    /// Create a new ppm decoder with default options
    ///
    /// # Arguments
    /// - source: PPM encoded bytes
    ///
    /// # Example
    /// ```
    /// use ezview_ppm::PpmDecoder;
    /// use ezview_ppm::ezview_core::bytestream::ByteCursor;
    ///
    /// let mut decoder = PpmDecoder::new(ByteCursor::new(b"NOT VALID PPM"));
    ///
    /// assert!(decoder.decode().is_err());
    /// ```
    pub fn new(source: T) -> PpmDecoder<T> {
        PpmDecoder::new_with_options(DecoderOptions::default(), source)
    }
    /// Create a new PPM decoder with the specified options
    ///
    /// # Arguments
    /// - options: Modified options for the decoder
    /// - source: PPM encoded bytes
    /// # Example
    /// ```
    /// use ezview_ppm::PpmDecoder;
    /// use ezview_ppm::ezview_core::bytestream::ByteCursor;
    /// use ezview_ppm::ezview_core::options::DecoderOptions;
    ///
    /// let options = DecoderOptions::default().set_max_width(1);
    /// let mut decoder = PpmDecoder::new_with_options(options, ByteCursor::new(b"P6 2 1 255 abcdef"));
    ///
    /// assert!(decoder.decode().is_err());
    /// ```
    pub fn new_with_options(options: DecoderOptions, source: T) -> PpmDecoder<T> {
        PpmDecoder {
            reader: ByteReader::new(source),
            header: None,
            options
        }
    }

    /// Read PPM headers, store them in internal state and return them
    ///
    /// Calling this more than once is a no-op once it succeeded.
    /// On return the stream is positioned at the first pixel sample.
    pub fn decode_headers(&mut self) -> Result<Header, PpmDecodeErrors> {
        if let Some(header) = self.header {
            return Ok(header);
        }
        trace!("Reading PPM headers from {}", self.reader.name());

        skip_spaces(&mut self.reader)?;

        let format = self.read_magic()?;
        info!("Format: {format}");

        self.skip_comments()?;

        let width = self.read_header_integer("width")?;
        let height = self.read_header_integer("height")?;

        if width < 1 || height < 1 {
            return Err(PpmDecodeErrors::InvalidDimensions(width, height));
        }
        let width = check_dimension(width, self.options.max_width())?;
        let height = check_dimension(height, self.options.max_height())?;

        info!("Width: {}, height: {}", width, height);

        let max_value = self.read_header_integer("maximum channel value")?;

        if max_value != MAX_CHANNEL_VALUE {
            return Err(PpmDecodeErrors::UnsupportedChannelDepth(max_value));
        }
        // exactly one whitespace byte separates the header from the samples,
        // it is consumed whatever it is
        if self.reader.read_u8()?.is_none() {
            return Err(PpmDecodeErrors::TruncatedStream(
                "stream ended before the separator following the header".to_string()
            ));
        }

        let header = Header {
            format,
            width,
            height,
            max_value: MAX_CHANNEL_VALUE as usize
        };
        self.header = Some(header);

        Ok(header)
    }

    fn read_magic(&mut self) -> Result<PpmFormat, PpmDecodeErrors> {
        let p = self.reader.read_u8()?;

        if p != Some(b'P') {
            let msg = format!("expected 'P' as first PPM byte but found {}", describe(p));
            return Err(PpmDecodeErrors::InvalidMagic(msg));
        }
        let version = self.reader.read_u8()?;

        match version.and_then(PpmFormat::from_selector) {
            Some(format) => Ok(format),
            None => {
                let msg = format!(
                    "unsupported PPM version {}, supported versions are P3 and P6",
                    describe(version)
                );
                Err(PpmDecodeErrors::InvalidMagic(msg))
            }
        }
    }

    /// Skip comment lines sitting between the magic number and the width.
    ///
    /// Consecutive comment lines are skipped, each ends at `\n`.
    fn skip_comments(&mut self) -> Result<(), PpmDecodeErrors> {
        skip_spaces(&mut self.reader)?;

        let mut byte = self.next_header_byte()?;

        while byte == b'#' {
            while byte != b'\n' {
                byte = self.next_header_byte()?;
            }
            while is_space(byte) {
                byte = self.next_header_byte()?;
            }
        }
        // first byte of the width token
        self.reader.rewind(1)?;

        Ok(())
    }

    fn next_header_byte(&mut self) -> Result<u8, PpmDecodeErrors> {
        self.reader.read_u8()?.ok_or_else(|| {
            PpmDecodeErrors::TruncatedStream("stream ended inside the header".to_string())
        })
    }

    /// Read a header number, a token that is not a number reads as zero
    fn read_header_integer(&mut self, field: &str) -> Result<i64, PpmDecodeErrors> {
        match read_integer(&mut self.reader)? {
            Token::Integer(value) => {
                trace!("Header {field}: {value}");
                Ok(value)
            }
            Token::Invalid | Token::SignAtEnd => {
                trace!("Header {field} is not a number, reading it as 0");
                Ok(0)
            }
            Token::End => Err(PpmDecodeErrors::TruncatedStream(format!(
                "stream ended before the {field}"
            )))
        }
    }

    /// Return image dimensions or none if headers aren't decoded
    pub const fn dimensions(&self) -> Option<(usize, usize)> {
        match self.header {
            Some(header) => Some((header.width, header.height)),
            None => None
        }
    }
    /// Return the payload encoding or none if headers aren't decoded
    pub const fn format(&self) -> Option<PpmFormat> {
        match self.header {
            Some(header) => Some(header.format),
            None => None
        }
    }
    /// Return the decoded header or none if headers aren't decoded
    pub const fn header(&self) -> Option<Header> {
        self.header
    }

    /// Decode a ppm encoded stream and return the pixels
    ///
    /// Headers are read first if [`decode_headers`](Self::decode_headers)
    /// wasn't called. The pixel buffer is allocated once, after the header
    /// validated, and is only returned when every sample was read.
    /// Anything after the last sample is ignored.
    pub fn decode(&mut self) -> Result<PpmImage, PpmDecodeErrors> {
        let header = self.decode_headers()?;
        let size = header
            .width
            .checked_mul(header.height)
            .ok_or(PpmDecodeErrors::LargeDimensions(usize::MAX, header.width))?;

        let mut pixels = vec![Rgb::default(); size];

        match header.format {
            PpmFormat::Ascii => self.decode_ascii(&mut pixels)?,
            PpmFormat::Binary => self.decode_binary(&mut pixels)?
        }
        trace!("Decoded {} pixels", size);

        Ok(PpmImage::new(header, pixels))
    }

    fn decode_ascii(&mut self, pixels: &mut [Rgb]) -> Result<(), PpmDecodeErrors> {
        let total = pixels.len();

        for (index, pixel) in pixels.iter_mut().enumerate() {
            let r = self.read_sample(index, total)?;
            let g = self.read_sample(index, total)?;
            let b = self.read_sample(index, total)?;

            *pixel = Rgb { r, g, b };
        }
        Ok(())
    }

    fn read_sample(&mut self, index: usize, total: usize) -> Result<u8, PpmDecodeErrors> {
        match read_integer(&mut self.reader)? {
            // keep the low 8 bits, 256 reads as 0 and -1 as 255
            Token::Integer(value) => Ok(value as u8),
            Token::Invalid => Err(PpmDecodeErrors::InvalidPixelData(index)),
            Token::SignAtEnd | Token::End => Err(PpmDecodeErrors::TruncatedStream(format!(
                "stream ended at pixel {index} of {total}"
            )))
        }
    }

    fn decode_binary(&mut self, pixels: &mut [Rgb]) -> Result<(), PpmDecodeErrors> {
        let bytes: &mut [u8] = bytemuck::cast_slice_mut(pixels);

        self.reader
            .read_exact_bytes(bytes)
            .map_err(|err| match err {
                ByteIoError::NotEnoughBytes(expected, found) => {
                    PpmDecodeErrors::TruncatedStream(format!(
                        "expected {expected} bytes of pixel data but found {found}"
                    ))
                }
                err => PpmDecodeErrors::IoErrors(err)
            })
    }
}

/// Open `path` and decode it
///
/// The file handle is closed before returning, on success and on error.
pub fn decode_file<P: AsRef<Path>>(
    path: P, options: DecoderOptions
) -> Result<PpmImage, PpmDecodeErrors> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|err| PpmDecodeErrors::FileNotFound(path.to_path_buf(), err))?;

    info!("Decoding {:?}", path);

    PpmDecoder::new_with_options(options, BufReader::new(file)).decode()
}

fn check_dimension(value: i64, limit: usize) -> Result<usize, PpmDecodeErrors> {
    let value =
        usize::try_from(value).map_err(|_| PpmDecodeErrors::LargeDimensions(limit, usize::MAX))?;

    if value > limit {
        return Err(PpmDecodeErrors::LargeDimensions(limit, value));
    }
    Ok(value)
}

/// Whitespace as classified by C's `isspace`, which unlike
/// [`u8::is_ascii_whitespace`] includes vertical tab
const fn is_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r' | 0x0B | 0x0C)
}

fn skip_spaces<T: ByteReaderTrait>(reader: &mut ByteReader<T>) -> Result<(), ByteIoError> {
    reader.skip_until_false(is_space)
}

/// Read an optionally signed decimal number the way `scanf("%d")` does.
///
/// Leading whitespace is skipped and the byte that ends the number is left
/// in the stream. Values beyond the range of `i64` saturate.
fn read_integer<T: ByteReaderTrait>(reader: &mut ByteReader<T>) -> Result<Token, ByteIoError> {
    skip_spaces(reader)?;

    let mut byte = match reader.read_u8()? {
        Some(byte) => byte,
        None => return Ok(Token::End)
    };
    let negative = byte == b'-';

    if byte == b'-' || byte == b'+' {
        byte = match reader.read_u8()? {
            Some(byte) => byte,
            None => return Ok(Token::SignAtEnd)
        };
    }
    if !byte.is_ascii_digit() {
        reader.rewind(1)?;
        return Ok(Token::Invalid);
    }
    let mut value = 0_i64;

    loop {
        let digit = i64::from(byte - b'0');

        value = value.saturating_mul(10);
        value = if negative {
            value.saturating_sub(digit)
        } else {
            value.saturating_add(digit)
        };

        match reader.read_u8()? {
            Some(next) if next.is_ascii_digit() => byte = next,
            Some(_) => {
                reader.rewind(1)?;
                break;
            }
            None => break
        }
    }
    Ok(Token::Integer(value))
}

fn describe(byte: Option<u8>) -> String {
    match byte {
        Some(byte) => format!("'{}'", byte.escape_ascii()),
        None => "end of stream".to_string()
    }
}

#[cfg(test)]
mod tests {
    use ezview_core::bytestream::ByteCursor;

    use super::*;

    fn tokens(data: &[u8]) -> Vec<Option<i64>> {
        let mut reader = ByteReader::new(ByteCursor::new(data));
        let mut out = vec![];

        loop {
            match read_integer(&mut reader).unwrap() {
                Token::Integer(value) => out.push(Some(value)),
                Token::Invalid => {
                    out.push(None);
                    // step over the offending byte
                    reader.get_u8_err().unwrap();
                }
                Token::SignAtEnd | Token::End => break
            }
        }
        out
    }

    #[test]
    fn integers_follow_scanf() {
        assert_eq!(tokens(b"  12\n-3\t+4"), vec![Some(12), Some(-3), Some(4)]);
        assert_eq!(tokens(b"7x8"), vec![Some(7), None, Some(8)]);
        assert_eq!(tokens(b"\x0b9"), vec![Some(9)]);
        assert_eq!(tokens(b""), vec![]);
    }

    #[test]
    fn integer_leaves_terminator_in_stream() {
        let mut reader = ByteReader::new(ByteCursor::new(b"255\nX"));

        assert!(matches!(read_integer(&mut reader).unwrap(), Token::Integer(255)));
        assert_eq!(reader.get_u8_err().ok(), Some(b'\n'));
    }

    #[test]
    fn lone_sign_at_end_of_stream() {
        let mut reader = ByteReader::new(ByteCursor::new(b"-"));
        assert!(matches!(read_integer(&mut reader).unwrap(), Token::SignAtEnd));

        let mut reader = ByteReader::new(ByteCursor::new(b"+ 1"));
        assert!(matches!(read_integer(&mut reader).unwrap(), Token::Invalid));
    }

    #[test]
    fn out_of_range_integers_saturate() {
        assert_eq!(tokens(b"99999999999999999999"), vec![Some(i64::MAX)]);
        assert_eq!(tokens(b"-99999999999999999999"), vec![Some(i64::MIN)]);
        assert_eq!(tokens(b"-9223372036854775808"), vec![Some(i64::MIN)]);
    }

    #[test]
    fn headers_are_decoded_once() {
        let mut decoder = PpmDecoder::new(ByteCursor::new(b"P6\n1 2\n255\nabcdef"));

        assert_eq!(decoder.dimensions(), None);
        decoder.decode_headers().unwrap();
        decoder.decode_headers().unwrap();

        assert_eq!(decoder.dimensions(), Some((1, 2)));
        assert_eq!(decoder.format(), Some(PpmFormat::Binary));

        let image = decoder.decode().unwrap();
        assert_eq!(image.as_bytes(), b"abcdef");
    }

    #[test]
    fn vertical_tab_counts_as_whitespace() {
        let mut decoder = PpmDecoder::new(ByteCursor::new(b"\x0bP3\x0b1\x0b1\x0b255\x0b1 2 3"));
        let image = decoder.decode().unwrap();

        assert_eq!(image.pixels(), &[Rgb::new(1, 2, 3)]);
    }

    #[test]
    fn separator_is_any_single_byte() {
        // whatever byte follows the max value is the separator
        let mut decoder = PpmDecoder::new(ByteCursor::new(b"P6 1 1 255Xabc"));
        let image = decoder.decode().unwrap();

        assert_eq!(image.pixels(), &[Rgb::new(b'a', b'b', b'c')]);
    }
}
