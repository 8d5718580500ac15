/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::path::PathBuf;

use clap::builder::PossibleValue;
use clap::{value_parser, Arg, ArgAction, Command, ValueEnum};

use crate::viewer::KeyBindings;

/// Key binding presets selectable from the command line
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Bindings {
    Classic,
    Alternate
}

impl Bindings {
    pub const fn key_bindings(self) -> KeyBindings {
        match self {
            Bindings::Classic => KeyBindings::classic(),
            Bindings::Alternate => KeyBindings::alternate()
        }
    }
}

impl ValueEnum for Bindings {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Classic, Self::Alternate]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        Some(match self {
            Self::Classic => {
                PossibleValue::new("classic").help("Shear with A/D Q/E, rotate with Z/X")
            }
            Self::Alternate => PossibleValue::new("alternate")
                .help("Shear with J/L I/K, rotate with U/O, held keys repeat, image flipped")
        })
    }
}

#[rustfmt::skip]
pub fn create_cmd_args() -> Command {
    Command::new("ezview")
        .about("Display a P3 or P6 PPM image in a window")
        .version(env!("CARGO_PKG_VERSION"))
        .after_help("Keys: arrows move, W/S scale, Escape quits")
        .arg(Arg::new("in")
            .value_name("INPUT")
            .help("PPM file to display")
            .value_parser(value_parser!(PathBuf))
            .required(true))
        .arg(Arg::new("bindings")
            .long("bindings")
            .help("Key binding preset")
            .value_parser(value_parser!(Bindings))
            .default_value("classic"))
        .arg(Arg::new("probe")
            .long("probe")
            .action(ArgAction::SetTrue)
            .help("Print the image header as JSON and exit without opening a window"))
        .arg(Arg::new("max-width")
            .long("max-width")
            .help_heading("ADVANCED")
            .help("Maximum width of images allowed")
            .value_parser(value_parser!(usize))
            .default_value("16384"))
        .arg(Arg::new("max-height")
            .long("max-height")
            .help_heading("ADVANCED")
            .help("Maximum height of images allowed")
            .value_parser(value_parser!(usize))
            .default_value("16384"))
        .arg(Arg::new("debug")
            .long("debug")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display debug information and higher"))
        .arg(Arg::new("trace")
            .long("trace")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display very verbose information"))
        .arg(Arg::new("warn")
            .long("warn")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display warnings and errors"))
        .arg(Arg::new("info")
            .long("info")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display information about the decoding options"))
}
