/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::path::PathBuf;

use clap::parser::ValueSource;
use clap::ArgMatches;
use ezview_core::options::DecoderOptions;
use log::{info, Level};

use crate::cmd_args::Bindings;

#[derive(Debug, Clone)]
pub struct CmdOptions {
    pub input:      PathBuf,
    pub bindings:   Bindings,
    pub max_width:  usize,
    pub max_height: usize,
    pub probe:      bool
}

impl CmdOptions {
    pub fn new() -> CmdOptions {
        let defaults = DecoderOptions::default();

        CmdOptions {
            input:      PathBuf::new(),
            bindings:   Bindings::Classic,
            max_width:  defaults.max_width(),
            max_height: defaults.max_height(),
            probe:      false
        }
    }
}

pub fn parse_options(options: &ArgMatches) -> CmdOptions {
    let mut cmd_options = CmdOptions::new();

    if let Some(input) = options.get_one::<PathBuf>("in") {
        cmd_options.input = input.clone();
    }
    if let Some(bindings) = options.get_one::<Bindings>("bindings") {
        if options.value_source("bindings") == Some(ValueSource::CommandLine) {
            info!("Using {:?} key bindings", bindings);
        }
        cmd_options.bindings = *bindings;
    }
    if let Some(width) = options.get_one::<usize>("max-width") {
        cmd_options.max_width = *width;
    }
    if let Some(height) = options.get_one::<usize>("max-height") {
        cmd_options.max_height = *height;
    }
    cmd_options.probe = options.get_flag("probe");

    cmd_options
}

/// Log level picked by the LOGGING flags, warnings when none is given
pub fn log_level(options: &ArgMatches) -> Level {
    if options.get_flag("debug") {
        Level::Debug
    } else if options.get_flag("trace") {
        Level::Trace
    } else if options.get_flag("warn") {
        Level::Warn
    } else if options.get_flag("info") {
        Level::Info
    } else {
        Level::Warn
    }
}

/// Set up logging options
pub fn setup_logger(options: &ArgMatches) {
    let log_level = log_level(options);

    if let Err(err) = simple_logger::init_with_level(log_level) {
        eprintln!("Could not initialize logger: {err}");
        return;
    }

    info!("Initialized logger");
    info!("Log level :{}", log_level);
}
