// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use bytemuck::{Pod, Zeroable};

/// An 8-bit RGBA color.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct Color {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha.
    pub a: u8,
}

impl Color {
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// Creates an opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

/// One corner of a textured triangle.
///
/// Vertices come in triples forming triangle lists. Texture coordinates are in texels of the
/// atlas page the text was built for, not normalized.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// Position in local text space, y pointing down.
    pub position: [f32; 2],
    /// Vertex color, multiplied with the texel.
    pub color: Color,
    /// Atlas texel coordinates.
    pub tex_coords: [f32; 2],
}

impl Vertex {
    pub(crate) fn new(x: f32, y: f32, color: Color, u: f32, v: f32) -> Self {
        Self {
            position: [x, y],
            color,
            tex_coords: [u, v],
        }
    }
}
