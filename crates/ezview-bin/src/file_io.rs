/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::path::PathBuf;

use ezview_core::options::DecoderOptions;
use ezview_ppm::{decode_file, PpmDecodeErrors, PpmImage};
use log::info;

/// A PPM file waiting to be decoded
pub struct PpmFile {
    file_path: PathBuf,
    options:   DecoderOptions
}

impl PpmFile {
    pub fn new(file_path: PathBuf, options: DecoderOptions) -> PpmFile {
        PpmFile { file_path, options }
    }

    /// Decode the whole file, the handle is closed before this returns
    pub fn into_image(self) -> Result<PpmImage, PpmDecodeErrors> {
        let image = decode_file(&self.file_path, self.options)?;
        let (width, height) = image.dimensions();

        info!(
            "Decoded {:?}: {}x{} {}",
            self.file_path,
            width,
            height,
            image.header().format
        );
        Ok(image)
    }
}
