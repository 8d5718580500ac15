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

use ezview_core::options::DecoderOptions;
use ezview_ppm::{PpmDecodeErrors, PpmDecoder};

use crate::errors::ExecErrors;
use crate::serde::Metadata;

/// Read the header of `path` and return it as pretty printed JSON
///
/// Only the header is read, pixel data is never touched.
pub fn probe_file(path: &Path) -> Result<String, ExecErrors> {
    let file = File::open(path)
        .map_err(|err| PpmDecodeErrors::FileNotFound(path.to_path_buf(), err))?;
    let size = file.metadata()?.len();

    // size limits don't matter, nothing is allocated for the pixels
    let mut decoder = PpmDecoder::new_with_options(
        DecoderOptions::new_unlimited(),
        BufReader::new(file)
    );
    let header = decoder.decode_headers()?;
    let metadata = Metadata::new(path, size, header);

    Ok(serde_json::to_string_pretty(&metadata)?)
}
