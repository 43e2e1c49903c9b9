// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-size atlas page: a texture, its packer and the glyphs placed in it.

use core::fmt::{Debug, Formatter};
use hashbrown::HashMap;

use crate::error::Error;
use crate::key::GlyphKey;
use crate::packer::RowPacker;
use crate::rect::{GlyphRecord, Rect};
use crate::texture::AtlasTexture;

/// Side of the opaque white block reserved at the texture origin.
///
/// Underline and strikethrough quads sample this block.
pub const WHITE_BLOCK_SIZE: u32 = 2;

/// Rectangle handed out when a glyph can't be packed. It covers the white block.
pub const SENTINEL_RECT: Rect<i32> = Rect::new(0, 0, 2, 2);

/// Vertical offset of the first row, leaving a one pixel gap below the white block.
const FIRST_ROW: u32 = WHITE_BLOCK_SIZE + 1;

/// Sizing of atlas textures.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AtlasConfig {
    /// Width and height of a freshly created page texture.
    pub initial_size: u32,
    /// Largest width or height a page texture may grow to.
    ///
    /// Capped by [`AtlasTexture::MAX_DIMENSION`].
    pub max_size: u32,
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self {
            initial_size: 128,
            max_size: u32::MAX,
        }
    }
}

impl AtlasConfig {
    /// The maximum size once the texture backend's own limit is applied.
    pub fn effective_max_size<T: AtlasTexture>(&self) -> u32 {
        self.max_size.min(T::MAX_DIMENSION)
    }
}

/// All glyphs of one font at one pixel size, and the texture holding their pixels.
///
/// A fresh page is `initial_size` pixels square, transparent white except for an opaque white
/// 2×2 block at the origin.
#[derive(Clone)]
pub struct Page<T> {
    texture: T,
    packer: RowPacker,
    glyphs: HashMap<GlyphKey, GlyphRecord>,
}

impl<T: AtlasTexture> Page<T> {
    /// Creates an empty page.
    pub fn new(config: &AtlasConfig, smooth: bool) -> Self {
        let size = config.initial_size;
        let mut texture = T::create(size, size);
        fill_transparent(&mut texture);

        let block = [255_u8; (WHITE_BLOCK_SIZE * WHITE_BLOCK_SIZE * 4) as usize];
        texture.update(&block, WHITE_BLOCK_SIZE, WHITE_BLOCK_SIZE, 0, 0);
        texture.set_smooth(smooth);

        Self {
            texture,
            packer: RowPacker::new(size, size, FIRST_ROW, config.effective_max_size::<T>()),
            glyphs: HashMap::new(),
        }
    }

    /// Looks up a cached glyph.
    pub fn get(&self, key: GlyphKey) -> Option<&GlyphRecord> {
        self.glyphs.get(&key)
    }

    pub(crate) fn insert(&mut self, key: GlyphKey, record: GlyphRecord) {
        self.glyphs.insert(key, record);
    }

    /// Number of cached glyphs, including failed ones.
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Returns true if no glyph has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// The page texture.
    pub fn texture(&self) -> &T {
        &self.texture
    }

    /// The row allocator of this page.
    pub fn packer(&self) -> &RowPacker {
        &self.packer
    }

    /// Reserves a `width` × `height` region, growing the texture if needed.
    ///
    /// On growth the old pixels are copied into the new texture before it replaces the old
    /// one, so a failure never disturbs glyphs already on the page.
    pub fn allocate(&mut self, width: u32, height: u32) -> Result<Rect<i32>, Error> {
        let allocation = self.packer.allocate(width, height)?;
        if let Some((new_width, new_height)) = allocation.grown_to {
            log::debug!(
                "growing atlas page from {}x{} to {new_width}x{new_height}",
                self.texture.width(),
                self.texture.height()
            );
            let mut grown = T::create(new_width, new_height);
            fill_transparent(&mut grown);
            grown.copy_from(&self.texture);
            grown.set_smooth(self.texture.is_smooth());
            self.texture = grown;
        }
        Ok(allocation.rect)
    }

    /// Writes a tile of tightly packed RGBA pixels at `(x, y)`.
    pub fn upload(&mut self, pixels: &[u8], width: u32, height: u32, x: u32, y: u32) {
        self.texture.update(pixels, width, height, x, y);
    }

    /// Selects the filtering mode of the page texture.
    pub fn set_smooth(&mut self, smooth: bool) {
        self.texture.set_smooth(smooth);
    }
}

fn fill_transparent<T: AtlasTexture>(texture: &mut T) {
    let (width, height) = (texture.width(), texture.height());
    let pixels = [255_u8, 255, 255, 0].repeat(width as usize * height as usize);
    texture.update(&pixels, width, height, 0, 0);
}

impl<T: Debug> Debug for Page<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Page")
            .field("texture", &self.texture)
            .field("rows", &self.packer.rows().len())
            .field("next_row", &self.packer.next_row())
            .field("glyphs", &self.glyphs.len())
            .finish_non_exhaustive()
    }
}
