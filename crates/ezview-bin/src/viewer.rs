/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Window showing a decoded image on a transformable quad

use ezview_ppm::PpmImage;
use log::info;
use winit::event_loop::{ControlFlow, EventLoop};

pub use crate::viewer::errors::ViewerErrors;
pub use crate::viewer::keymap::KeyBindings;

mod app;
mod errors;
mod gpu;
mod keymap;
mod quad;

/// Open a window for `image` and block until it is closed
pub fn show(image: PpmImage, bindings: KeyBindings) -> Result<(), ViewerErrors> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = app::ViewerApp::new(image, bindings);

    event_loop.run_app(&mut app)?;
    info!("Event loop finished");

    app.into_result()
}
