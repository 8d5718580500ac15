/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::io::Write;

use crate::errors::PpmEncodeErrors;
use crate::image::{PpmFormat, PpmImage, Rgb};

/// A PPM encoder
///
/// Writes 8-bit P3 or P6 files that [`PpmDecoder`](crate::PpmDecoder)
/// reads back to the same pixels. Wrap files in a `BufWriter`, P3 output
/// is written one pixel per line.
pub struct PpmEncoder<'a, W: Write> {
    writer: &'a mut W
}

impl<'a, W: Write> PpmEncoder<'a, W> {
    /// Create a new PPM encoder that writes to `writer`
    pub fn new(writer: &'a mut W) -> PpmEncoder<'a, W> {
        Self { writer }
    }

    fn write_headers(
        &mut self, format: PpmFormat, width: usize, height: usize
    ) -> Result<(), PpmEncodeErrors> {
        let header = format!("{format}\n{width} {height}\n255\n");

        self.writer.write_all(header.as_bytes())?;

        Ok(())
    }

    /// Encode `pixels` as a `width` x `height` image
    ///
    /// # Errors
    /// - Zero width or height, the decoder would refuse the file
    /// - `pixels.len()` not matching `width * height`
    /// - Any error from the underlying writer
    pub fn encode(
        &mut self, width: usize, height: usize, format: PpmFormat, pixels: &[Rgb]
    ) -> Result<(), PpmEncodeErrors> {
        if width == 0 || height == 0 {
            return Err(PpmEncodeErrors::Static("Width and height must be at least 1"));
        }
        if width.checked_mul(height) != Some(pixels.len()) {
            return Err(PpmEncodeErrors::Static(
                "Data length does not match image dimensions"
            ));
        }
        self.write_headers(format, width, height)?;

        match format {
            PpmFormat::Ascii => {
                for pixel in pixels {
                    writeln!(self.writer, "{} {} {}", pixel.r, pixel.g, pixel.b)?;
                }
            }
            PpmFormat::Binary => {
                self.writer.write_all(bytemuck::cast_slice(pixels))?;
            }
        }
        self.writer.flush()?;

        Ok(())
    }

    /// Encode a decoded image, keeping its dimensions
    pub fn encode_image(
        &mut self, image: &PpmImage, format: PpmFormat
    ) -> Result<(), PpmEncodeErrors> {
        let (width, height) = image.dimensions();
        self.encode(width, height, format, image.pixels())
    }
}
