// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A [`FontEngine`] drawing every glyph as a solid block, for checking layout arithmetic.
//!
//! At size `s` a covered glyph is `s / 2 - 2` pixels wide and `s * 3 / 4` tall, one pixel
//! right of the pen and sitting on the baseline. Every glyph advances by `s / 2`. Whitespace
//! is blank. Lines are `s * 3 / 2` apart, the underline sits `s / 10` below the baseline and
//! is `s / 16` thick.

use core::ops::RangeInclusive;

use glyph_atlas::{
    Bitmap, CpuTexture, Error, ErrorKind, FixedSize, Font, FontEngine, LoadFlags, LoadedGlyph,
    PixelFormat, RasterizedGlyph, SizeMetrics,
};

use crate::FontStack;

pub(crate) type BlockFont = Font<BlockEngine, CpuTexture>;

pub(crate) struct BlockEngine {
    coverage: Vec<RangeInclusive<char>>,
    kerning: bool,
    size: u32,
}

impl BlockEngine {
    /// Covers printable ASCII.
    pub(crate) fn ascii() -> Self {
        Self::covering(vec![' '..='~'])
    }

    pub(crate) fn covering(coverage: Vec<RangeInclusive<char>>) -> Self {
        Self {
            coverage,
            kerning: false,
            size: 0,
        }
    }

    /// Kerns `AV` by -2 pixels.
    pub(crate) fn with_kerning(mut self) -> Self {
        self.kerning = true;
        self
    }
}

pub(crate) struct BlockGlyph {
    codepoint: u32,
    grow: i32,
}

impl LoadedGlyph for BlockGlyph {
    fn is_outline(&self) -> bool {
        true
    }
}

impl FontEngine for BlockEngine {
    type Glyph = BlockGlyph;

    fn is_scalable(&self) -> bool {
        true
    }

    fn has_color(&self) -> bool {
        false
    }

    fn has_kerning(&self) -> bool {
        self.kerning
    }

    fn fixed_sizes(&self) -> &[FixedSize] {
        &[]
    }

    fn current_size(&self) -> u32 {
        self.size
    }

    fn set_pixel_size(&mut self, size: u32) -> Result<(), Error> {
        self.size = size;
        Ok(())
    }

    fn select_fixed_size(&mut self, _index: usize) -> Result<(), Error> {
        Err(Error::new(ErrorKind::SizeSelection))
    }

    fn glyph_index(&self, codepoint: u32) -> u32 {
        let covered = char::from_u32(codepoint)
            .is_some_and(|ch| self.coverage.iter().any(|range| range.contains(&ch)));
        if covered { codepoint } else { 0 }
    }

    fn load_glyph(&mut self, codepoint: u32, _flags: LoadFlags) -> Result<BlockGlyph, Error> {
        Ok(BlockGlyph { codepoint, grow: 0 })
    }

    fn embolden_outline(&mut self, glyph: &mut BlockGlyph, strength: i32) {
        glyph.grow += strength / 64;
    }

    fn stroke_outline(&mut self, glyph: &mut BlockGlyph, radius: i32) -> Result<(), Error> {
        glyph.grow += 2 * radius / 64;
        Ok(())
    }

    fn rasterize(&mut self, glyph: BlockGlyph) -> Result<RasterizedGlyph, Error> {
        let size = self.size;
        let blank = matches!(char::from_u32(glyph.codepoint), Some(' ' | '\t' | '\n'));
        let bitmap = if blank {
            Bitmap::new(0, 0, PixelFormat::Gray, Vec::new())
        } else {
            let grow = glyph.grow as u32;
            let (width, rows) = (size / 2 - 2 + grow, size * 3 / 4 + grow);
            Bitmap::new(
                width,
                rows,
                PixelFormat::Gray,
                vec![255; (width * rows) as usize],
            )
        };
        Ok(RasterizedGlyph {
            left: 1,
            top: bitmap.rows as i32,
            bitmap,
            advance: ((size / 2) as i32) << 16,
            lsb_delta: 0,
            rsb_delta: 0,
        })
    }

    fn kerning(&mut self, first: u32, second: u32) -> i32 {
        if (first, second) == ('A' as u32, 'V' as u32) {
            -128
        } else {
            0
        }
    }

    fn size_metrics(&self) -> SizeMetrics {
        let size = self.size as i32;
        SizeMetrics {
            height: size * 64 * 3 / 2,
            underline_position: -(size * 64 / 10),
            underline_thickness: size * 64 / 16,
        }
    }

    fn family_name(&self) -> Option<String> {
        Some("Block Sans".into())
    }
}

/// A stack of a lowercase-only font followed by an ASCII font.
pub(crate) fn letters_then_ascii() -> FontStack<BlockEngine> {
    FontStack::new(vec![
        BlockFont::new(BlockEngine::covering(vec!['a'..='z'])),
        BlockFont::new(BlockEngine::ascii()),
    ])
}

#[track_caller]
pub(crate) fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < 1e-4,
        "expected {expected}, got {actual}"
    );
}
