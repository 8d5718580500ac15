/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! A strict Portable Pixmap decoder and encoder
//!
//! Only the two 8-bit RGB variants are supported
//!
//! - P3: ASCII decimal samples
//! - P6: raw binary samples
//!
//! Anything else (other magic numbers, a maximum channel value other than 255,
//! a stream that ends early) is rejected with a classified
//! [`PpmDecodeErrors`] instead of producing a partially filled image.
//!
//! # Example
//! ```
//! use ezview_ppm::{PpmDecoder, Rgb};
//! use ezview_ppm::ezview_core::bytestream::ByteCursor;
//!
//! let mut decoder = PpmDecoder::new(ByteCursor::new(b"P3\n2 1\n255\n255 0 0 0 255 0\n"));
//! let image = decoder.decode().unwrap();
//!
//! assert_eq!(image.dimensions(), (2, 1));
//! assert_eq!(image.pixels(), &[Rgb::new(255, 0, 0), Rgb::new(0, 255, 0)]);
//! ```
//!
//! # Features
//!  - `log`: Log header information through the [`log`](https://docs.rs/log) crate
//!  - `serde`: Implement `Serialize` for [`Header`] and [`PpmFormat`]
pub use decoder::{decode_file, PpmDecoder};
pub use encoder::PpmEncoder;
pub use errors::{PpmDecodeErrors, PpmEncodeErrors};
pub use ezview_core;
pub use image::{Header, PpmFormat, PpmImage, Rgb};

mod decoder;
mod encoder;
mod errors;
mod image;
mod serde;
