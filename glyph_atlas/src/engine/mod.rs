// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The font engine interface the glyph cache drives.

#[cfg(feature = "swash")]
pub(crate) mod swash_engine;

use crate::error::Error;
use crate::raster::Bitmap;

/// Options for [`FontEngine::load_glyph`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct LoadFlags {
    /// Prefer embedded color images when the face has them.
    pub color: bool,
    /// Hint with the automatic hinter even when the font has its own instructions.
    pub force_autohint: bool,
    /// Skip embedded bitmaps whenever the glyph has an outline, which stroking needs.
    pub no_bitmap: bool,
}

/// A glyph loaded by a [`FontEngine`] but not yet rasterized.
pub trait LoadedGlyph {
    /// Returns true if the glyph is a scalable outline rather than an embedded bitmap.
    fn is_outline(&self) -> bool;
}

/// One embedded bitmap size of a non-scalable or color face.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FixedSize {
    /// Nominal width in pixels, compared against requested sizes.
    pub width: u32,
    /// Nominal height in pixels, reported as the rendered size once selected.
    pub height: u32,
}

/// Size-dependent face metrics, in 26.6 fixed point pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SizeMetrics {
    /// Baseline-to-baseline distance.
    pub height: i32,
    /// Position of the underline relative to the baseline, negative below it.
    pub underline_position: i32,
    /// Thickness of the underline.
    pub underline_thickness: i32,
}

/// The output of [`FontEngine::rasterize`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterizedGlyph {
    /// The glyph image.
    pub bitmap: Bitmap,
    /// Horizontal offset from the pen position to the left edge of the bitmap.
    pub left: i32,
    /// Vertical offset from the baseline up to the top edge of the bitmap.
    pub top: i32,
    /// Horizontal advance in 16.16 fixed point pixels.
    pub advance: i32,
    /// Left side-bearing change introduced by hinting, 26.6.
    pub lsb_delta: i32,
    /// Right side-bearing change introduced by hinting, 26.6.
    pub rsb_delta: i32,
}

/// A font face together with the machinery to scale, hint and rasterize its glyphs.
///
/// The cache owns one engine per font and shares it between clones of the font. Engines keep
/// a *current size*: [`set_pixel_size`](Self::set_pixel_size) or
/// [`select_fixed_size`](Self::select_fixed_size) must be called before loading glyphs or
/// querying metrics, and [`current_size`](Self::current_size) lets the cache skip redundant
/// calls.
///
/// Fixed point conventions: advances are 16.16, everything else that is not a
/// plain pixel count is 26.6.
pub trait FontEngine {
    /// The intermediate glyph representation between loading and rasterization.
    type Glyph: LoadedGlyph;

    /// Returns true if the face has scalable outlines.
    fn is_scalable(&self) -> bool;

    /// Returns true if the face carries color glyphs.
    fn has_color(&self) -> bool;

    /// Returns true if the face carries kerning data.
    fn has_kerning(&self) -> bool;

    /// The embedded bitmap sizes of the face, in table order.
    fn fixed_sizes(&self) -> &[FixedSize];

    /// The horizontal pixels-per-em of the current size, or 0 if no size was set.
    fn current_size(&self) -> u32;

    /// Sets the current size to `size` pixels per em.
    ///
    /// Fails with [`ErrorKind::SizeSelection`](crate::ErrorKind::SizeSelection) when a
    /// non-scalable face has no strike of that size.
    fn set_pixel_size(&mut self, size: u32) -> Result<(), Error>;

    /// Makes the fixed size at `index` in [`fixed_sizes`](Self::fixed_sizes) current.
    fn select_fixed_size(&mut self, index: usize) -> Result<(), Error>;

    /// Maps a codepoint to a glyph index, 0 meaning the font has no glyph for it.
    fn glyph_index(&self, codepoint: u32) -> u32;

    /// Loads the glyph for `codepoint` at the current size.
    ///
    /// Codepoints without a glyph load the font's missing-glyph symbol.
    fn load_glyph(&mut self, codepoint: u32, flags: LoadFlags) -> Result<Self::Glyph, Error>;

    /// Thickens an outline glyph by `strength` (26.6) in both directions.
    fn embolden_outline(&mut self, glyph: &mut Self::Glyph, strength: i32);

    /// Replaces an outline glyph by its stroke of the given radius (26.6), with round caps
    /// and joins.
    fn stroke_outline(&mut self, glyph: &mut Self::Glyph, radius: i32) -> Result<(), Error>;

    /// Renders a loaded glyph into a bitmap.
    fn rasterize(&mut self, glyph: Self::Glyph) -> Result<RasterizedGlyph, Error>;

    /// Unfitted kerning between two codepoints at the current size, 26.6 on scalable faces
    /// and whole pixels on bitmap faces.
    fn kerning(&mut self, first: u32, second: u32) -> i32;

    /// Metrics at the current size.
    fn size_metrics(&self) -> SizeMetrics;

    /// The family name recorded in the face, if any.
    fn family_name(&self) -> Option<String>;
}
