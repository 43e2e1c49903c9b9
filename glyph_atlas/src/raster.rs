// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Conversion of rasterized glyphs into padded RGBA atlas tiles.

/// Padding in pixels added to each side of a glyph so that filtering never samples a
/// neighbouring glyph.
pub const GLYPH_PADDING: u32 = 2;

/// The background of every atlas tile: white with zero alpha.
const TRANSPARENT_WHITE: [u8; 4] = [255, 255, 255, 0];

/// Pixel layout of a [`Bitmap`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PixelFormat {
    /// One bit per pixel, most significant bit first.
    Mono,
    /// One coverage byte per pixel.
    Gray,
    /// Premultiplied color, four bytes per pixel in blue, green, red, alpha order.
    Bgra,
    /// Color, four bytes per pixel in red, green, blue, alpha order.
    Rgba,
}

impl PixelFormat {
    /// Whether the format carries color rather than coverage.
    pub fn is_color(self) -> bool {
        matches!(self, Self::Bgra | Self::Rgba)
    }

    /// Minimal number of bytes needed for a row of `width` pixels.
    pub fn row_bytes(self, width: u32) -> usize {
        let width = width as usize;
        match self {
            Self::Mono => width.div_ceil(8),
            Self::Gray => width,
            Self::Bgra | Self::Rgba => width * 4,
        }
    }
}

/// A rasterized glyph image as produced by a font engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bitmap {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub rows: u32,
    /// Distance in bytes between the starts of two consecutive rows.
    pub pitch: usize,
    /// Pixel layout.
    pub format: PixelFormat,
    /// Pixel data, `rows * pitch` bytes.
    pub data: Vec<u8>,
}

impl Bitmap {
    /// Creates a bitmap with tightly packed rows.
    pub fn new(width: u32, rows: u32, format: PixelFormat, data: Vec<u8>) -> Self {
        Self {
            width,
            rows,
            pitch: format.row_bytes(width),
            format,
            data,
        }
    }

    /// Returns true if the bitmap has no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.rows == 0
    }

    fn row(&self, y: u32) -> &[u8] {
        let start = y as usize * self.pitch;
        let end = start + self.format.row_bytes(self.width);
        self.data.get(start..end).unwrap_or(&[])
    }

    /// Copies the pixels into a tightly packed RGBA buffer.
    ///
    /// Coverage formats become white with the coverage as alpha.
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.width as usize * self.rows as usize * 4);
        for y in 0..self.rows {
            let row = self.row(y);
            for x in 0..self.width as usize {
                let pixel = match self.format {
                    PixelFormat::Mono => [255, 255, 255, mono_alpha(row, x)],
                    PixelFormat::Gray => [255, 255, 255, row.get(x).copied().unwrap_or(0)],
                    PixelFormat::Bgra => match row.get(x * 4..x * 4 + 4) {
                        Some(&[b, g, r, a]) => [r, g, b, a],
                        _ => TRANSPARENT_WHITE,
                    },
                    PixelFormat::Rgba => match row.get(x * 4..x * 4 + 4) {
                        Some(&[r, g, b, a]) => [r, g, b, a],
                        _ => TRANSPARENT_WHITE,
                    },
                };
                out.extend_from_slice(&pixel);
            }
        }
        out
    }
}

#[inline]
fn mono_alpha(row: &[u8], x: usize) -> u8 {
    let byte = row.get(x / 8).copied().unwrap_or(0);
    if byte & (1 << (7 - x % 8)) != 0 {
        255
    } else {
        0
    }
}

/// Scales a length in pixels, truncating toward zero.
#[expect(
    clippy::cast_possible_truncation,
    reason = "glyph dimensions are small and the scale is positive"
)]
#[inline]
pub(crate) fn scale_length(length: u32, scale: f32) -> u32 {
    (length as f32 * scale) as u32
}

/// Writes `bitmap` into `out` as a padded RGBA tile and returns the tile's size.
///
/// The tile measures `floor(width * scale) + 2 * GLYPH_PADDING` by
/// `floor(rows * scale) + 2 * GLYPH_PADDING` and is filled with transparent white before the
/// glyph is copied into its interior.
///
/// Only color bitmaps are resampled when `scale != 1`; coverage bitmaps are already rendered
/// at their final size and are copied as is, clipped to the tile interior.
pub fn normalize(bitmap: &Bitmap, scale: f32, out: &mut Vec<u8>) -> (u32, u32) {
    let width = scale_length(bitmap.width, scale);
    let height = scale_length(bitmap.rows, scale);
    let tile_width = width + 2 * GLYPH_PADDING;
    let tile_height = height + 2 * GLYPH_PADDING;

    out.clear();
    out.resize(tile_width as usize * tile_height as usize * 4, 0);
    for pixel in out.chunks_exact_mut(4) {
        pixel.copy_from_slice(&TRANSPARENT_WHITE);
    }

    let index = |x: u32, y: u32| {
        ((y + GLYPH_PADDING) as usize * tile_width as usize + (x + GLYPH_PADDING) as usize) * 4
    };

    match bitmap.format {
        PixelFormat::Mono => {
            for y in 0..height.min(bitmap.rows) {
                let row = bitmap.row(y);
                for x in 0..width.min(bitmap.width) {
                    out[index(x, y) + 3] = mono_alpha(row, x as usize);
                }
            }
        }
        PixelFormat::Gray => {
            for y in 0..height.min(bitmap.rows) {
                let row = bitmap.row(y);
                for x in 0..width.min(bitmap.width) {
                    out[index(x, y) + 3] = row.get(x as usize).copied().unwrap_or(0);
                }
            }
        }
        PixelFormat::Bgra | PixelFormat::Rgba => {
            let mut pixels = bitmap.to_rgba();
            let (mut src_width, mut src_height) = (bitmap.width, bitmap.rows);
            if scale != 1.0 {
                (pixels, src_width, src_height) =
                    scale_bilinear(&pixels, bitmap.width, bitmap.rows, scale);
            }
            for y in 0..height.min(src_height) {
                let src_row = y as usize * src_width as usize * 4;
                let count = width.min(src_width) as usize * 4;
                let dst = index(0, y);
                out[dst..dst + count].copy_from_slice(&pixels[src_row..src_row + count]);
            }
        }
    }

    (tile_width, tile_height)
}

/// Resizes a tightly packed RGBA image by `scale` using bilinear sampling.
///
/// The result measures `floor(width * scale)` by `floor(height * scale)`. Destination pixel
/// `x` samples the source at `x / new_width * (width - 1)`; the second sample of each pair is
/// clamped to the last row or column of the source.
#[expect(
    clippy::cast_possible_truncation,
    reason = "sample coordinates are non-negative and within the source image"
)]
pub fn scale_bilinear(pixels: &[u8], width: u32, height: u32, scale: f32) -> (Vec<u8>, u32, u32) {
    let new_width = scale_length(width, scale);
    let new_height = scale_length(height, scale);
    let mut out = Vec::with_capacity(new_width as usize * new_height as usize * 4);
    if width == 0 || height == 0 {
        return (out, 0, 0);
    }

    let at = |x: u32, y: u32| {
        let i = (y as usize * width as usize + x as usize) * 4;
        pixels.get(i..i + 4).unwrap_or(&TRANSPARENT_WHITE)
    };

    for y in 0..new_height {
        let gy = y as f32 / new_height as f32 * (height - 1) as f32;
        let y0 = gy as u32;
        let y1 = if y0 + 1 >= height { y0 } else { y0 + 1 };
        let dy = gy - y0 as f32;
        for x in 0..new_width {
            let gx = x as f32 / new_width as f32 * (width - 1) as f32;
            let x0 = gx as u32;
            let x1 = if x0 + 1 >= width { x0 } else { x0 + 1 };
            let dx = gx - x0 as f32;

            let (c00, c10, c01, c11) = (at(x0, y0), at(x1, y0), at(x0, y1), at(x1, y1));
            for channel in 0..4 {
                let top = f32::from(c00[channel]) * (1.0 - dx) + f32::from(c10[channel]) * dx;
                let bottom = f32::from(c01[channel]) * (1.0 - dx) + f32::from(c11[channel]) * dx;
                out.push((top * (1.0 - dy) + bottom * dy) as u8);
            }
        }
    }

    (out, new_width, new_height)
}

/// Thickens a bitmap by `x_strength` pixels horizontally and `y_strength` vertically.
///
/// The bitmap grows to the right and downward by the strengths, and every destination pixel
/// takes the channel-wise maximum of the source pixels that cover it. Monochrome bitmaps are
/// converted to gray first.
pub fn embolden(bitmap: &mut Bitmap, x_strength: u32, y_strength: u32) {
    if bitmap.is_empty() || (x_strength == 0 && y_strength == 0) {
        return;
    }
    if bitmap.format == PixelFormat::Mono {
        let gray = (0..bitmap.rows)
            .flat_map(|y| {
                let row = bitmap.row(y);
                (0..bitmap.width as usize).map(move |x| mono_alpha(row, x))
            })
            .collect();
        *bitmap = Bitmap::new(bitmap.width, bitmap.rows, PixelFormat::Gray, gray);
    }

    let channels = if bitmap.format.is_color() { 4 } else { 1 };
    let new_width = bitmap.width + x_strength;
    let new_rows = bitmap.rows + y_strength;
    let new_pitch = new_width as usize * channels;
    let mut data = vec![0_u8; new_pitch * new_rows as usize];

    for y in 0..bitmap.rows {
        let row = bitmap.row(y);
        for x in 0..bitmap.width as usize {
            let src = &row[x * channels..(x + 1) * channels];
            for dy in 0..=y_strength as usize {
                let dst_row = (y as usize + dy) * new_pitch;
                for dx in 0..=x_strength as usize {
                    let dst = dst_row + (x + dx) * channels;
                    for (d, s) in data[dst..dst + channels].iter_mut().zip(src) {
                        *d = (*d).max(*s);
                    }
                }
            }
        }
    }

    bitmap.width = new_width;
    bitmap.rows = new_rows;
    bitmap.pitch = new_pitch;
    bitmap.data = data;
}
