/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! GPU side of the viewer
//!
//! One pipeline, one texture uploaded at start up, one quad. The vertex
//! buffer and the projection are rewritten on every frame.

use std::borrow::Cow;
use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use ezview_ppm::{PpmImage, Rgb};
use glam::Mat4;
use log::{debug, info, warn};
use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::viewer::errors::ViewerErrors;
use crate::viewer::quad::{QuadGeometry, Vertex, QUAD_INDICES};

const VERTEX_ATTRIBUTES: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x2];

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Uniforms {
    mvp: [[f32; 4]; 4]
}

pub struct GpuState {
    window:         Arc<Window>,
    surface:        wgpu::Surface<'static>,
    device:         wgpu::Device,
    queue:          wgpu::Queue,
    config:         wgpu::SurfaceConfiguration,
    pipeline:       wgpu::RenderPipeline,
    bind_group:     wgpu::BindGroup,
    uniform_buffer: wgpu::Buffer,
    vertex_buffer:  wgpu::Buffer,
    index_buffer:   wgpu::Buffer,
    image_size:     (usize, usize)
}

impl GpuState {
    /// Set up the device for `window` and upload `image` as the quad texture
    pub fn new(window: Arc<Window>, image: &PpmImage) -> Result<GpuState, ViewerErrors> {
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window.clone())?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference:       wgpu::PowerPreference::default(),
            compatible_surface:     Some(&surface),
            force_fallback_adapter: false
        }))?;
        info!("Using adapter {:?}", adapter.get_info().name);

        let (device, queue) = pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
            label:             Some("ezview-device"),
            required_features: wgpu::Features::empty(),
            required_limits:   adapter.limits(),
            memory_hints:      wgpu::MemoryHints::default(),
            trace:             wgpu::Trace::default()
        }))?;

        let (width, height) = image.dimensions();
        let limit = device.limits().max_texture_dimension_2d;

        let texture_size = match (u32::try_from(width), u32::try_from(height)) {
            (Ok(w), Ok(h)) if w <= limit && h <= limit => wgpu::Extent3d {
                width:                 w,
                height:                h,
                depth_or_array_layers: 1
            },
            _ => return Err(ViewerErrors::TextureTooLarge(limit, width, height))
        };

        let caps = surface.get_capabilities(&adapter);
        // samples are shown as stored, so prefer a surface without sRGB encoding
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| {
                ViewerErrors::SurfaceFailure("surface is not supported by the adapter".to_string())
            })?;
        debug!("Surface format: {:?}", format);

        let size = window.inner_size();
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2
        };
        surface.configure(&device, &config);

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label:           Some("ppm-texture"),
            size:            texture_size,
            mip_level_count: 1,
            sample_count:    1,
            dimension:       wgpu::TextureDimension::D2,
            format:          wgpu::TextureFormat::Rgba8Unorm,
            usage:           wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats:    &[]
        });
        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture:   &texture,
                mip_level: 0,
                origin:    wgpu::Origin3d::ZERO,
                aspect:    wgpu::TextureAspect::All
            },
            &expand_to_rgba(image.pixels()),
            wgpu::TexelCopyBufferLayout {
                offset:         0,
                bytes_per_row:  Some(4 * texture_size.width),
                rows_per_image: Some(texture_size.height)
            },
            texture_size
        );
        info!("Uploaded {}x{} texture", width, height);

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("ppm-sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label:              Some("ezview-uniforms"),
            size:               std::mem::size_of::<Uniforms>() as u64,
            usage:              wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false
        });
        let vertex_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label:              Some("quad-vertices"),
            size:               std::mem::size_of::<[Vertex; 4]>() as u64,
            usage:              wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label:    Some("quad-indices"),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage:    wgpu::BufferUsages::INDEX
        });

        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label:   Some("quad-layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding:    0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty:         wgpu::BindingType::Buffer {
                        ty:                 wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size:   None
                    },
                    count:      None
                },
                wgpu::BindGroupLayoutEntry {
                    binding:    1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty:         wgpu::BindingType::Texture {
                        sample_type:    wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled:   false
                    },
                    count:      None
                },
                wgpu::BindGroupLayoutEntry {
                    binding:    2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty:         wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count:      None
                }
            ]
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label:   Some("quad-bind"),
            layout:  &layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding:  0,
                    resource: uniform_buffer.as_entire_binding()
                },
                wgpu::BindGroupEntry {
                    binding:  1,
                    resource: wgpu::BindingResource::TextureView(&view)
                },
                wgpu::BindGroupEntry {
                    binding:  2,
                    resource: wgpu::BindingResource::Sampler(&sampler)
                }
            ]
        });

        let pipeline = create_pipeline(&device, &layout, format)?;

        Ok(GpuState {
            window,
            surface,
            device,
            queue,
            config,
            pipeline,
            bind_group,
            uniform_buffer,
            vertex_buffer,
            index_buffer,
            image_size: (width, height)
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.config.width = width.max(1);
        self.config.height = height.max(1);
        self.surface.configure(&self.device, &self.config);
    }

    /// Draw one frame with the current quad geometry
    pub fn render(&mut self, quad: &QuadGeometry) -> Result<(), ViewerErrors> {
        let frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                debug!("Surface lost, reconfiguring");
                self.surface.configure(&self.device, &self.config);
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                warn!("Timed out waiting for the next frame");
                return Ok(());
            }
            Err(err) => return Err(ViewerErrors::SurfaceFailure(err.to_string()))
        };

        let uniforms = Uniforms {
            mvp: projection((self.config.width, self.config.height), self.image_size)
                .to_cols_array_2d()
        };
        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));
        self.queue
            .write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(quad.vertices()));

        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("ezview-frame")
            });
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label:                    Some("quad-pass"),
                color_attachments:        &[Some(wgpu::RenderPassColorAttachment {
                    view:           &view,
                    depth_slice:    None,
                    resolve_target: None,
                    ops:            wgpu::Operations {
                        load:  wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store
                    }
                })],
                depth_stencil_attachment: None,
                occlusion_query_set:      None,
                timestamp_writes:         None
            });
            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &self.bind_group, &[]);
            pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
            pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
            pass.draw_indexed(0..QUAD_INDICES.len() as u32, 0, 0..1);
        }
        self.queue.submit(Some(encoder.finish()));
        self.window.pre_present_notify();
        frame.present();

        Ok(())
    }
}

fn create_pipeline(
    device: &wgpu::Device, layout: &wgpu::BindGroupLayout, format: wgpu::TextureFormat
) -> Result<wgpu::RenderPipeline, ViewerErrors> {
    device.push_error_scope(wgpu::ErrorFilter::Validation);

    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label:  Some("quad-shader"),
        source: wgpu::ShaderSource::Wgsl(Cow::Borrowed(include_str!("quad.wgsl")))
    });
    let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label:                Some("quad-pipeline-layout"),
        bind_group_layouts:   &[layout],
        push_constant_ranges: &[]
    });
    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label:         Some("quad-pipeline"),
        layout:        Some(&pipeline_layout),
        vertex:        wgpu::VertexState {
            module:              &shader,
            entry_point:         Some("vs_main"),
            buffers:             &[wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<Vertex>() as u64,
                step_mode:    wgpu::VertexStepMode::Vertex,
                attributes:   &VERTEX_ATTRIBUTES
            }],
            compilation_options: wgpu::PipelineCompilationOptions::default()
        },
        primitive:     wgpu::PrimitiveState::default(),
        depth_stencil: None,
        multisample:   wgpu::MultisampleState::default(),
        fragment:      Some(wgpu::FragmentState {
            module:              &shader,
            entry_point:         Some("fs_main"),
            targets:             &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default()
        }),
        multiview:     None,
        cache:         None
    });

    match pollster::block_on(device.pop_error_scope()) {
        Some(err) => Err(ViewerErrors::ShaderCompilationFailure(err.to_string())),
        None => Ok(pipeline)
    }
}

/// Orthographic projection for the quad
///
/// `x` spans `[-ratio, ratio]` and `y` is flipped so `-1` is the top edge.
/// `ratio` compares the framebuffer aspect with the image aspect, an
/// untransformed quad therefore fills a window of the image's shape and
/// keeps that shape when the window is resized.
pub fn projection(framebuffer: (u32, u32), image: (usize, usize)) -> Mat4 {
    let framebuffer_aspect = framebuffer.0.max(1) as f32 / framebuffer.1.max(1) as f32;
    let image_aspect = image.0.max(1) as f32 / image.1.max(1) as f32;
    let ratio = framebuffer_aspect / image_aspect;

    Mat4::orthographic_rh(-ratio, ratio, 1.0, -1.0, -1.0, 1.0)
}

/// wgpu has no 8-bit three channel format, add an opaque alpha
fn expand_to_rgba(pixels: &[Rgb]) -> Vec<u8> {
    let mut rgba = Vec::with_capacity(pixels.len() * 4);

    for pixel in pixels {
        rgba.extend_from_slice(&[pixel.r, pixel.g, pixel.b, 255]);
    }
    rgba
}
