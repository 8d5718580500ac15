/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::sync::Arc;

use ezview_ppm::PpmImage;
use log::{debug, info, trace, warn};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{KeyEvent, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowId};

use crate::viewer::errors::ViewerErrors;
use crate::viewer::gpu::GpuState;
use crate::viewer::keymap::{KeyAction, KeyBindings, KeyOutcome};
use crate::viewer::quad::QuadGeometry;

pub struct ViewerApp {
    /// Taken when the texture is uploaded
    image:    Option<PpmImage>,
    bindings: KeyBindings,
    quad:     QuadGeometry,
    window:   Option<Arc<Window>>,
    gpu:      Option<GpuState>,
    error:    Option<ViewerErrors>
}

impl ViewerApp {
    pub fn new(image: PpmImage, bindings: KeyBindings) -> ViewerApp {
        ViewerApp {
            image: Some(image),
            bindings,
            quad: QuadGeometry::new(bindings.uv_mapping()),
            window: None,
            gpu: None,
            error: None
        }
    }

    /// The error that ended the event loop, if any
    pub fn into_result(self) -> Result<(), ViewerErrors> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(())
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: ViewerErrors) {
        debug!("Viewer stopped: {err}");
        self.error = Some(err);
        event_loop.exit();
    }

    fn open_window(&mut self, event_loop: &ActiveEventLoop) -> Result<(), ViewerErrors> {
        let Some(image) = self.image.take() else {
            return Ok(());
        };
        let (width, height) = image.dimensions();

        let attributes = Window::default_attributes()
            .with_title("ezview")
            .with_inner_size(LogicalSize::new(width as f64, height as f64));

        let window = Arc::new(event_loop.create_window(attributes)?);
        info!("Created {}x{} window", width, height);

        let gpu = GpuState::new(window.clone(), &image)?;

        self.window = Some(window);
        self.gpu = Some(gpu);

        Ok(())
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, event: &KeyEvent) {
        match self
            .bindings
            .interpret(event.physical_key, event.state, event.repeat)
        {
            KeyOutcome::Action(KeyAction::Quit) => {
                info!("Escape pressed, closing");
                event_loop.exit();
            }
            KeyOutcome::Action(action) => {
                trace!("Applying {:?}", action);
                action.apply(&mut self.quad);
            }
            KeyOutcome::Unknown => warn!("Invalid key {:?}", event.physical_key),
            KeyOutcome::Ignored => {}
        }
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(err) = self.open_window(event_loop) {
            self.fail(event_loop, err);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        match self.window.as_ref() {
            Some(window) if window.id() == window_id => {}
            _ => return
        }
        match event {
            WindowEvent::CloseRequested => {
                debug!("Window closed");
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if let Some(gpu) = self.gpu.as_mut() {
                    gpu.resize(size.width, size.height);
                }
            }
            WindowEvent::KeyboardInput {
                event,
                is_synthetic: false,
                ..
            } => self.handle_key(event_loop, &event),
            WindowEvent::RedrawRequested => {
                let Some(gpu) = self.gpu.as_mut() else {
                    return;
                };
                if let Err(err) = gpu.render(&self.quad) {
                    self.fail(event_loop, err);
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        // redraw every refresh, presentation is vsync paced
        if let Some(window) = self.window.as_ref() {
            window.request_redraw();
        }
    }
}
