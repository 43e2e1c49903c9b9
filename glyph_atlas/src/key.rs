// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Glyph cache key.

/// Mask of the glyph index bits inside a packed [`GlyphKey`].
const INDEX_MASK: u64 = (1 << 31) - 1;

/// Bit set in a packed [`GlyphKey`] for synthetic bold.
const BOLD_BIT: u64 = 1 << 31;

/// Identifier of a cached glyph within one atlas page.
///
/// Two requests share a key exactly when they render identically at a given pixel size: same
/// glyph index, same bold synthesis, same outline thickness. Codepoints are resolved to glyph
/// indices before the key is built, so codepoints the font maps to one glyph share a slot.
///
/// The key packs into a single `u64`:
///
/// | bits   | content                                      |
/// |--------|----------------------------------------------|
/// | 63..32 | outline thickness, as [`f32::to_bits`]       |
/// | 31     | bold flag                                    |
/// | 30..0  | glyph index                                  |
///
/// The thickness bits come from the IEEE-754 representation of the value, not from its
/// in-memory layout, so the packing is the same on every target. Note that `0.0` and `-0.0`
/// produce different keys.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GlyphKey(u64);

impl GlyphKey {
    /// Creates a key for a glyph index with the given style.
    ///
    /// Glyph indices are truncated to 31 bits.
    #[inline]
    pub fn new(glyph_index: u32, bold: bool, outline_thickness: f32) -> Self {
        let thickness = u64::from(outline_thickness.to_bits()) << 32;
        let bold = if bold { BOLD_BIT } else { 0 };
        Self(thickness | bold | (u64::from(glyph_index) & INDEX_MASK))
    }

    /// The packed representation.
    #[inline]
    pub fn to_bits(self) -> u64 {
        self.0
    }

    /// The glyph index.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "the index occupies the low 31 bits"
    )]
    #[inline]
    pub fn glyph_index(self) -> u32 {
        (self.0 & INDEX_MASK) as u32
    }

    /// Whether synthetic bold is applied.
    #[inline]
    pub fn is_bold(self) -> bool {
        self.0 & BOLD_BIT != 0
    }

    /// The outline thickness in pixels.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "the thickness occupies the high 32 bits"
    )]
    #[inline]
    pub fn outline_thickness(self) -> f32 {
        f32::from_bits((self.0 >> 32) as u32)
    }
}
