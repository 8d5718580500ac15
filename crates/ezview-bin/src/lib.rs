/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::io::Write;
use std::path::Path;
use std::process::exit;

use log::{debug, info};

use crate::cmd_parsers::global_options::CmdOptions;
use crate::errors::ExecErrors;
use crate::file_io::PpmFile;

mod cmd_args;
mod cmd_parsers;
mod errors;
mod file_io;
mod probe_files;
mod serde;
mod viewer;

pub fn main() {
    let cmd = cmd_args::create_cmd_args();

    let options = match cmd.try_get_matches() {
        Ok(options) => options,
        Err(err) => {
            // --help and --version print to stdout and are not failures
            let code = if err.use_stderr() { 1 } else { 0 };
            let _ = err.print();
            exit(code);
        }
    };

    cmd_parsers::global_options::setup_logger(&options);

    let parsed_opts = cmd_parsers::global_options::parse_options(&options);

    if let Err(err) = run(&parsed_opts) {
        let _ = report_failure(&mut std::io::stderr(), &parsed_opts.input, &err);
        exit(1);
    }
}

fn run(options: &CmdOptions) -> Result<(), ExecErrors> {
    if options.probe {
        let json = probe_files::probe_file(&options.input)?;
        println!("{json}");
        return Ok(());
    }
    let decoder_options = cmd_parsers::get_decoder_options(options);
    let image = PpmFile::new(options.input.clone(), decoder_options).into_image()?;

    info!("Opening viewer");
    viewer::show(image, options.bindings.key_bindings())?;

    Ok(())
}

/// Write the one line diagnostic for a fatal error
fn report_failure<W: Write>(out: &mut W, input: &Path, err: &ExecErrors) -> std::io::Result<()> {
    debug!("Could not display {:?}, reason {:?}", input, err);
    writeln!(out, "ezview: {err}")
}
