// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shelf packing of glyph rectangles into a growable texture.
//!
//! Glyphs of one pixel size have similar heights, so the texture is carved into horizontal
//! rows ("shelves") that are filled left to right. A request reuses the row whose height fits
//! it most tightly, or opens a new row below the last one. When the texture has no room for a
//! new row, both of its dimensions are doubled. Space is never reclaimed.

use crate::error::{Error, ErrorKind};
use crate::rect::Rect;

/// Smallest accepted ratio between a request's height and a row's height.
///
/// Rows more than about 43% taller than the request are skipped.
pub const MIN_FIT_RATIO: f32 = 0.7;

/// Largest accepted ratio between a request's height and a row's height.
pub const MAX_FIT_RATIO: f32 = 1.0;

/// A horizontal shelf of the atlas.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Row {
    /// Width already consumed by glyphs, measured from the left edge.
    pub width: u32,
    /// Vertical offset of the row in the texture.
    pub top: u32,
    /// Fixed height of the row.
    pub height: u32,
}

impl Row {
    fn new(top: u32, height: u32) -> Self {
        Self {
            width: 0,
            top,
            height,
        }
    }
}

/// Result of a successful [`RowPacker::allocate`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Allocation {
    /// Where the request was placed.
    pub rect: Rect<i32>,
    /// The new texture size, if the texture had to grow to fit the request.
    ///
    /// The caller must resize its texture (keeping the existing pixels in place) before
    /// writing into `rect`.
    pub grown_to: Option<(u32, u32)>,
}

/// Row based rectangle allocator for one atlas texture.
///
/// The packer only tracks geometry; it reports growth through [`Allocation::grown_to`] and
/// leaves the pixel storage to its owner.
#[derive(Clone, Debug)]
pub struct RowPacker {
    rows: Vec<Row>,
    next_row: u32,
    width: u32,
    height: u32,
    max_size: u32,
}

impl RowPacker {
    /// Creates a packer for a `width` × `height` texture whose first row starts at
    /// `first_row`, growing up to `max_size` in either dimension.
    pub fn new(width: u32, height: u32, first_row: u32, max_size: u32) -> Self {
        Self {
            rows: Vec::new(),
            next_row: first_row,
            width,
            height,
            max_size,
        }
    }

    /// Finds room for a `width` × `height` rectangle.
    ///
    /// Fails with [`ErrorKind::AtlasExhausted`] when the rectangle only fits in a texture
    /// larger than the maximum size. A failed allocation leaves the packer untouched.
    pub fn allocate(&mut self, width: u32, height: u32) -> Result<Allocation, Error> {
        if let Some(index) = self.best_row(width, height) {
            let row = &mut self.rows[index];
            let rect = place(row, width, height);
            return Ok(Allocation {
                rect,
                grown_to: None,
            });
        }

        let row_height = height + height / 10;
        let (mut tex_width, mut tex_height) = (self.width, self.height);
        while self.next_row + row_height >= tex_height || width >= tex_width {
            if tex_width * 2 <= self.max_size && tex_height * 2 <= self.max_size {
                tex_width *= 2;
                tex_height *= 2;
            } else {
                return Err(Error::new(ErrorKind::AtlasExhausted).with_detail(format!(
                    "{width}x{height} does not fit in {}x{} (maximum {})",
                    self.width, self.height, self.max_size
                )));
            }
        }

        let grown_to = (tex_width != self.width).then_some((tex_width, tex_height));
        self.width = tex_width;
        self.height = tex_height;

        let mut row = Row::new(self.next_row, row_height);
        self.next_row += row_height;
        let rect = place(&mut row, width, height);
        self.rows.push(row);

        Ok(Allocation { rect, grown_to })
    }

    /// Returns the index of the row that fits the request most tightly.
    ///
    /// Ties go to the row created first.
    fn best_row(&self, width: u32, height: u32) -> Option<usize> {
        let mut best = None;
        let mut best_ratio = 0.0;
        for (index, row) in self.rows.iter().enumerate() {
            let ratio = height as f32 / row.height as f32;
            if !(MIN_FIT_RATIO..=MAX_FIT_RATIO).contains(&ratio) {
                continue;
            }
            if width > self.width - row.width {
                continue;
            }
            if ratio > best_ratio {
                best = Some(index);
                best_ratio = ratio;
            }
        }
        best
    }

    /// The rows created so far, in creation order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Vertical offset at which the next row will be created.
    pub fn next_row(&self) -> u32 {
        self.next_row
    }

    /// Current texture size tracked by the packer.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Largest texture dimension the packer may grow to.
    pub fn max_size(&self) -> u32 {
        self.max_size
    }
}

fn place(row: &mut Row, width: u32, height: u32) -> Rect<i32> {
    let rect = Rect::new(row.width as i32, row.top as i32, width as i32, height as i32);
    row.width += width;
    rect
}
