/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::fmt::{Display, Formatter};

use bytemuck::{Pod, Zeroable};

/// The two payload encodings sharing the PPM header grammar
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum PpmFormat {
    /// `P3`, samples are whitespace separated decimal numbers
    Ascii,
    /// `P6`, samples are raw bytes
    Binary
}

impl PpmFormat {
    /// The byte following `P` in the magic number
    pub const fn selector(self) -> u8 {
        match self {
            PpmFormat::Ascii => b'3',
            PpmFormat::Binary => b'6'
        }
    }
    pub const fn from_selector(byte: u8) -> Option<PpmFormat> {
        match byte {
            b'3' => Some(PpmFormat::Ascii),
            b'6' => Some(PpmFormat::Binary),
            _ => None
        }
    }
}

impl Display for PpmFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "P{}", char::from(self.selector()))
    }
}

/// Validated header of a PPM stream
///
/// A `Header` only exists once validation passed, so `width` and `height`
/// are at least one and `max_value` is 255.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Header {
    pub format:    PpmFormat,
    pub width:     usize,
    pub height:    usize,
    pub max_value: usize
}

impl Header {
    /// Number of RGB triples in the payload
    pub const fn pixel_count(&self) -> usize {
        self.width * self.height
    }
}

/// One 8-bit RGB sample
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Pod, Zeroable)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Rgb {
        Rgb { r, g, b }
    }
}

/// A fully decoded image
///
/// `pixels` always holds exactly `width * height` row major triples, top-left first.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PpmImage {
    header: Header,
    pixels: Vec<Rgb>
}

impl PpmImage {
    pub(crate) fn new(header: Header, pixels: Vec<Rgb>) -> PpmImage {
        debug_assert_eq!(header.pixel_count(), pixels.len());
        PpmImage { header, pixels }
    }
    pub const fn header(&self) -> &Header {
        &self.header
    }
    /// Return image dimensions as `(width, height)`
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.header.width, self.header.height)
    }
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }
    /// Pixels as a flat `r, g, b, r, g, b ...` byte slice
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }
    /// Hand the pixel buffer over without copying
    pub fn into_parts(self) -> (Header, Vec<Rgb>) {
        (self.header, self.pixels)
    }
}
