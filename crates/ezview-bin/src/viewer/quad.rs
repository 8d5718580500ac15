/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! The textured quad and the affine transforms applied to it
//!
//! Positions live in the same space the projection maps, with the
//! untransformed quad spanning `[-1, 1]` on both axes. `y` grows
//! downwards on screen.

use bytemuck::{Pod, Zeroable};

/// Largest texture coordinate used, keeps nearest sampling off the clamp edge
const UV_MAX: f32 = 0.99999;

/// Draw order of the two triangles making up the quad
pub const QUAD_INDICES: [u16; 6] = [0, 1, 2, 2, 3, 0];

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position:  [f32; 2],
    pub tex_coord: [f32; 2]
}

/// How texture coordinates are laid onto the quad corners
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum UvMapping {
    /// Image row zero at the top of the window
    Upright,
    /// Image drawn upside down
    Flipped
}

/// Four vertices mutated in place by key presses
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct QuadGeometry {
    vertices: [Vertex; 4]
}

impl QuadGeometry {
    pub fn new(mapping: UvMapping) -> QuadGeometry {
        let corners = [[1.0, -1.0], [1.0, 1.0], [-1.0, 1.0], [-1.0, -1.0]];

        let mut vertices = [Vertex::default(); 4];

        for (vertex, position) in vertices.iter_mut().zip(corners) {
            let u = if position[0] > 0.0 { UV_MAX } else { 0.0 };
            let v = if position[1] > 0.0 { UV_MAX } else { 0.0 };

            let v = match mapping {
                UvMapping::Upright => v,
                UvMapping::Flipped => UV_MAX - v
            };
            *vertex = Vertex {
                position,
                tex_coord: [u, v]
            };
        }
        QuadGeometry { vertices }
    }

    pub const fn vertices(&self) -> &[Vertex; 4] {
        &self.vertices
    }

    fn for_each_position<F: FnMut(&mut [f32; 2])>(&mut self, mut func: F) {
        for vertex in &mut self.vertices {
            func(&mut vertex.position);
        }
    }

    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.for_each_position(|[x, y]| {
            *x += dx;
            *y += dy;
        });
    }

    /// Uniform scale about the origin, not the quad centre
    pub fn scale(&mut self, factor: f32) {
        self.for_each_position(|[x, y]| {
            *x *= factor;
            *y *= factor;
        });
    }

    /// `x += k * y` for every vertex
    pub fn shear_x(&mut self, k: f32) {
        self.for_each_position(|[x, y]| *x += k * *y);
    }

    /// `y += k * x` for every vertex
    pub fn shear_y(&mut self, k: f32) {
        self.for_each_position(|[x, y]| *y += k * *x);
    }

    /// Midpoint of the diagonal running from vertex 0 to vertex 2
    pub fn centre(&self) -> [f32; 2] {
        let [x0, y0] = self.vertices[0].position;
        let [x2, y2] = self.vertices[2].position;

        [(x0 + x2) / 2.0, (y0 + y2) / 2.0]
    }

    /// Rotate about [`centre`](Self::centre) by `degrees`
    pub fn rotate(&mut self, degrees: f32) {
        let [cx, cy] = self.centre();
        let (sin, cos) = degrees.to_radians().sin_cos();

        self.for_each_position(|[x, y]| {
            let dx = *x - cx;
            let dy = *y - cy;

            *x = cx + dx * cos - dy * sin;
            *y = cy + dx * sin + dy * cos;
        });
    }
}
