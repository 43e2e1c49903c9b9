// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pixel storage for atlas pages.

#[cfg(feature = "png")]
use crate::error::{Error, ErrorKind};

/// An RGBA8 texture an atlas page draws its glyphs into.
///
/// Implement this for a GPU texture type to let pages upload straight to the device; the
/// [`CpuTexture`] implementation keeps the pixels in memory.
pub trait AtlasTexture {
    /// Largest width or height the backend can allocate.
    const MAX_DIMENSION: u32;

    /// Allocates a `width` × `height` texture with unspecified contents.
    fn create(width: u32, height: u32) -> Self
    where
        Self: Sized;

    /// Width in pixels.
    fn width(&self) -> u32;

    /// Height in pixels.
    fn height(&self) -> u32;

    /// Overwrites the `width` × `height` region at `(x, y)` with tightly packed RGBA pixels.
    fn update(&mut self, pixels: &[u8], width: u32, height: u32, x: u32, y: u32);

    /// Copies all of `source` into the top-left corner of `self`.
    ///
    /// Used when a page grows: `self` is the new, larger texture.
    fn copy_from(&mut self, source: &Self);

    /// Selects linear (`true`) or nearest (`false`) filtering.
    fn set_smooth(&mut self, smooth: bool);

    /// Whether linear filtering is selected.
    fn is_smooth(&self) -> bool;
}

/// An [`AtlasTexture`] stored in main memory.
#[derive(Clone, PartialEq, Eq)]
pub struct CpuTexture {
    width: u32,
    height: u32,
    smooth: bool,
    pixels: Vec<u8>,
}

impl CpuTexture {
    /// The pixels, row by row, four bytes each.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// The RGBA value at `(x, y)`, or `None` outside the texture.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let p = self.pixels.get(i..i + 4)?;
        Some([p[0], p[1], p[2], p[3]])
    }

    /// Encodes the texture as an 8-bit RGBA PNG.
    #[cfg(feature = "png")]
    pub fn to_png(&self) -> Result<Vec<u8>, Error> {
        let encoding = |err: png::EncodingError| {
            Error::new(ErrorKind::Io).with_detail(format!("PNG encoding: {err}"))
        };
        let mut data = Vec::new();
        let mut encoder = png::Encoder::new(&mut data, self.width, self.height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().map_err(encoding)?;
        writer.write_image_data(&self.pixels).map_err(encoding)?;
        writer.finish().map_err(encoding)?;
        Ok(data)
    }

    /// Dumps the texture to a PNG file at `path`, for inspecting an atlas page.
    #[cfg(feature = "png")]
    pub fn save_png(&self, path: impl AsRef<std::path::Path>) -> Result<(), Error> {
        let path = path.as_ref();
        std::fs::write(path, self.to_png()?)
            .map_err(|err| Error::io(&err).with_detail(format!("{}: {err}", path.display())))
    }
}

impl AtlasTexture for CpuTexture {
    const MAX_DIMENSION: u32 = 16384;

    fn create(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            smooth: false,
            pixels: vec![0; width as usize * height as usize * 4],
        }
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn update(&mut self, pixels: &[u8], width: u32, height: u32, x: u32, y: u32) {
        if width == 0 || height == 0 || x >= self.width || y >= self.height {
            return;
        }
        let stride = self.width as usize * 4;
        let copy_width = width.min(self.width.saturating_sub(x)) as usize * 4;
        let rows = height.min(self.height.saturating_sub(y)) as usize;
        for (row, src) in pixels.chunks_exact(width as usize * 4).take(rows).enumerate() {
            let dst = (y as usize + row) * stride + x as usize * 4;
            self.pixels[dst..dst + copy_width].copy_from_slice(&src[..copy_width]);
        }
    }

    fn copy_from(&mut self, source: &Self) {
        self.update(&source.pixels, source.width, source.height, 0, 0);
    }

    fn set_smooth(&mut self, smooth: bool) {
        self.smooth = smooth;
    }

    fn is_smooth(&self) -> bool {
        self.smooth
    }
}

impl core::fmt::Debug for CpuTexture {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CpuTexture")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("smooth", &self.smooth)
            .finish_non_exhaustive()
    }
}
