/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Core routines shared by the ezview crates
//!
//! It currently contains
//!
//! - A bytestream reader that reports exhaustion instead of inventing bytes
//! - Decoder options shared by decoders
//! - A logging shim that compiles to nothing when the `log` feature is off
//!
//! This library is `#[no_std]`, readers for `std::io` types
//! are available behind the `std` feature.
//!
//! # Features
//!  - `std`: Implements the reader trait for `std::io::Cursor` and `std::io::BufReader`
//!
//!  - `log`: Forwards the logging macros to the [`log`](https://docs.rs/log) crate
//!
#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![macro_use]

pub mod bytestream;
pub mod log;
pub mod options;
