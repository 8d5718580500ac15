/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::fmt::{Debug, Display, Formatter};

/// Failures of the window and GPU layer, all of them fatal
pub enum ViewerErrors {
    /// Event loop, window or surface could not be created
    WindowCreationFailure(String),
    /// The quad shader or its pipeline failed validation
    ShaderCompilationFailure(String),
    /// Image is larger than the device allows, `(limit, width, height)`
    TextureTooLarge(u32, usize, usize),
    /// No adapter or device, or the surface became unusable
    SurfaceFailure(String)
}

impl Debug for ViewerErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WindowCreationFailure(reason) => {
                writeln!(f, "Could not create window: {reason}")
            }
            Self::ShaderCompilationFailure(reason) => {
                writeln!(f, "Shader compilation failed: {reason}")
            }
            Self::TextureTooLarge(limit, width, height) => {
                writeln!(
                    f,
                    "Image of {width}x{height} does not fit in a texture, the device limit is {limit}"
                )
            }
            Self::SurfaceFailure(reason) => {
                writeln!(f, "Surface error: {reason}")
            }
        }
    }
}

impl Display for ViewerErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let message = format!("{self:?}");
        write!(f, "{}", message.trim_end())
    }
}

impl std::error::Error for ViewerErrors {}

impl From<winit::error::EventLoopError> for ViewerErrors {
    fn from(err: winit::error::EventLoopError) -> Self {
        ViewerErrors::WindowCreationFailure(err.to_string())
    }
}

impl From<winit::error::OsError> for ViewerErrors {
    fn from(err: winit::error::OsError) -> Self {
        ViewerErrors::WindowCreationFailure(err.to_string())
    }
}

impl From<wgpu::CreateSurfaceError> for ViewerErrors {
    fn from(err: wgpu::CreateSurfaceError) -> Self {
        ViewerErrors::WindowCreationFailure(err.to_string())
    }
}

impl From<wgpu::RequestAdapterError> for ViewerErrors {
    fn from(err: wgpu::RequestAdapterError) -> Self {
        ViewerErrors::SurfaceFailure(format!("no suitable GPU adapter, {err}"))
    }
}

impl From<wgpu::RequestDeviceError> for ViewerErrors {
    fn from(err: wgpu::RequestDeviceError) -> Self {
        ViewerErrors::SurfaceFailure(format!("could not open GPU device, {err}"))
    }
}
