// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rectangles and the cached glyph record.

/// An axis-aligned rectangle given by its top-left corner and size.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Rect<T> {
    /// Left edge.
    pub left: T,
    /// Top edge.
    pub top: T,
    /// Width.
    pub width: T,
    /// Height.
    pub height: T,
}

impl<T> Rect<T> {
    /// Creates a rectangle.
    #[inline]
    pub const fn new(left: T, top: T, width: T, height: T) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

impl<T: Copy + core::ops::Add<Output = T>> Rect<T> {
    /// The right edge (exclusive).
    #[inline]
    pub fn right(&self) -> T {
        self.left + self.width
    }

    /// The bottom edge (exclusive).
    #[inline]
    pub fn bottom(&self) -> T {
        self.top + self.height
    }
}

impl Rect<i32> {
    /// Returns true if the two rectangles share any pixel.
    pub fn intersects(&self, other: &Self) -> bool {
        self.left < other.right()
            && other.left < self.right()
            && self.top < other.bottom()
            && other.top < self.bottom()
    }

    /// Returns true if the rectangle has no area.
    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Shrinks the rectangle by `amount` on every side.
    #[must_use]
    pub fn inset(&self, amount: i32) -> Self {
        Self::new(
            self.left + amount,
            self.top + amount,
            self.width - 2 * amount,
            self.height - 2 * amount,
        )
    }
}

impl Rect<f32> {
    /// Returns the smallest rectangle containing both `self` and `other`.
    ///
    /// An empty rectangle (zero width and height) on either side acts as the identity.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        if self.width == 0.0 && self.height == 0.0 {
            return *other;
        }
        if other.width == 0.0 && other.height == 0.0 {
            return *self;
        }
        let left = self.left.min(other.left);
        let top = self.top.min(other.top);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Self::new(left, top, right - left, bottom - top)
    }
}

/// Metrics and atlas location of one cached glyph.
///
/// The default value (all zeros, empty texture rectangle) is the record returned for glyphs
/// that failed to resolve, and the record of blank glyphs such as the space character minus
/// its advance.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct GlyphRecord {
    /// Horizontal distance to the next glyph origin, in pixels.
    pub advance: f32,
    /// Left side-bearing correction reported by the hinter, in 26.6 units.
    pub lsb_delta: f32,
    /// Right side-bearing correction reported by the hinter, in 26.6 units.
    pub rsb_delta: f32,
    /// Glyph bounds relative to the pen position on the baseline, y pointing down.
    pub bounds: Rect<f32>,
    /// Location of the glyph's pixels inside the atlas texture of its page, padding excluded.
    pub texture_rect: Rect<i32>,
}
