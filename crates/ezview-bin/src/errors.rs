/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::fmt::{Debug, Display, Formatter};

use ezview_ppm::PpmDecodeErrors;

use crate::viewer::ViewerErrors;

/// Anything that stops the program
pub enum ExecErrors {
    DecodeErrors(PpmDecodeErrors),
    ViewerErrors(ViewerErrors),
    JsonErrors(serde_json::Error),
    IoErrors(std::io::Error)
}

impl Debug for ExecErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DecodeErrors(err) => writeln!(f, "{err:?}"),
            Self::ViewerErrors(err) => writeln!(f, "{err:?}"),
            Self::JsonErrors(err) => writeln!(f, "Could not serialize metadata: {err}"),
            Self::IoErrors(err) => writeln!(f, "I/O error: {err}")
        }
    }
}

impl Display for ExecErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DecodeErrors(err) => write!(f, "{err}"),
            Self::ViewerErrors(err) => write!(f, "{err}"),
            Self::JsonErrors(err) => write!(f, "Could not serialize metadata: {err}"),
            Self::IoErrors(err) => write!(f, "I/O error: {err}")
        }
    }
}

impl std::error::Error for ExecErrors {}

impl From<PpmDecodeErrors> for ExecErrors {
    fn from(err: PpmDecodeErrors) -> Self {
        ExecErrors::DecodeErrors(err)
    }
}

impl From<ViewerErrors> for ExecErrors {
    fn from(err: ViewerErrors) -> Self {
        ExecErrors::ViewerErrors(err)
    }
}

impl From<serde_json::Error> for ExecErrors {
    fn from(err: serde_json::Error) -> Self {
        ExecErrors::JsonErrors(err)
    }
}

impl From<std::io::Error> for ExecErrors {
    fn from(err: std::io::Error) -> Self {
        ExecErrors::IoErrors(err)
    }
}
