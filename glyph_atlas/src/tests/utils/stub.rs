// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A deterministic [`FontEngine`] for exercising the cache without font files.
//!
//! Printable ASCII maps to glyph index `codepoint`, everything else to the missing glyph.
//! Outline glyphs rasterize to a gray block of `size / 2` by `size * 3 / 4` pixels sitting on
//! the baseline, grown by the bold and stroke amounts. The space glyph is blank.

use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::{
    Bitmap, Error, ErrorKind, FixedSize, FontEngine, LoadFlags, LoadedGlyph, PixelFormat,
    RasterizedGlyph, SizeMetrics,
};

/// Color of every pixel of a color strike glyph, BGRA.
pub(crate) const STRIKE_PIXEL: [u8; 4] = [10, 20, 30, 255];

pub(crate) struct StubEngine {
    pub(crate) scalable: bool,
    pub(crate) color: bool,
    pub(crate) fixed_sizes: Vec<FixedSize>,
    pub(crate) kerning_pairs: HashMap<(u32, u32), i32>,
    /// Right side-bearing delta reported for every glyph, 26.6.
    pub(crate) rsb_delta: i32,
    /// Codepoints whose glyph fails to load.
    pub(crate) broken: Vec<u32>,
    /// Number of rasterized glyphs, shared so it stays readable once the engine is moved.
    pub(crate) rasterized: Rc<Cell<usize>>,
    size: u32,
}

impl StubEngine {
    /// A scalable outline face with kerning for `AV`.
    pub(crate) fn outline() -> Self {
        Self {
            scalable: true,
            color: false,
            fixed_sizes: Vec::new(),
            kerning_pairs: HashMap::from([(('A' as u32, 'V' as u32), -150)]),
            rsb_delta: 0,
            broken: Vec::new(),
            rasterized: Rc::default(),
            size: 0,
        }
    }

    /// A monochrome bitmap face with a single strike.
    pub(crate) fn bitmap(strike: u32) -> Self {
        Self {
            scalable: false,
            fixed_sizes: vec![FixedSize {
                width: strike,
                height: strike,
            }],
            kerning_pairs: HashMap::from([(('A' as u32, 'V' as u32), -2)]),
            ..Self::outline()
        }
    }

    /// A color bitmap face with the given strikes and no outlines.
    pub(crate) fn color(strikes: &[FixedSize]) -> Self {
        Self {
            scalable: false,
            color: true,
            fixed_sizes: strikes.to_vec(),
            kerning_pairs: HashMap::new(),
            ..Self::outline()
        }
    }

    pub(crate) fn rasterized(&self) -> Rc<Cell<usize>> {
        Rc::clone(&self.rasterized)
    }
}

#[derive(Debug)]
pub(crate) struct StubGlyph {
    codepoint: u32,
    outline: bool,
    embolden: i32,
    stroke: i32,
}

impl LoadedGlyph for StubGlyph {
    fn is_outline(&self) -> bool {
        self.outline
    }
}

impl FontEngine for StubEngine {
    type Glyph = StubGlyph;

    fn is_scalable(&self) -> bool {
        self.scalable
    }

    fn has_color(&self) -> bool {
        self.color
    }

    fn has_kerning(&self) -> bool {
        !self.kerning_pairs.is_empty()
    }

    fn fixed_sizes(&self) -> &[FixedSize] {
        &self.fixed_sizes
    }

    fn current_size(&self) -> u32 {
        self.size
    }

    fn set_pixel_size(&mut self, size: u32) -> Result<(), Error> {
        if !self.scalable && !self.fixed_sizes.iter().any(|fixed| fixed.height == size) {
            return Err(Error::new(ErrorKind::SizeSelection).with_size(size));
        }
        self.size = size;
        Ok(())
    }

    fn select_fixed_size(&mut self, index: usize) -> Result<(), Error> {
        let fixed = self
            .fixed_sizes
            .get(index)
            .ok_or_else(|| Error::new(ErrorKind::SizeSelection))?;
        self.size = fixed.width;
        Ok(())
    }

    fn glyph_index(&self, codepoint: u32) -> u32 {
        if (0x20..0x7F).contains(&codepoint) {
            codepoint
        } else {
            0
        }
    }

    fn load_glyph(&mut self, codepoint: u32, flags: LoadFlags) -> Result<StubGlyph, Error> {
        if self.broken.contains(&codepoint) {
            return Err(Error::new(ErrorKind::GlyphLoad));
        }
        let outline = self.scalable && (flags.no_bitmap || !self.color);
        Ok(StubGlyph {
            codepoint,
            outline,
            embolden: 0,
            stroke: 0,
        })
    }

    fn embolden_outline(&mut self, glyph: &mut StubGlyph, strength: i32) {
        glyph.embolden += strength;
    }

    fn stroke_outline(&mut self, glyph: &mut StubGlyph, radius: i32) -> Result<(), Error> {
        glyph.stroke = radius;
        Ok(())
    }

    fn rasterize(&mut self, glyph: StubGlyph) -> Result<RasterizedGlyph, Error> {
        self.rasterized.set(self.rasterized.get() + 1);
        let size = self.size;
        let advance = ((size / 2 + 1) as i32) << 16;

        let bitmap = if glyph.codepoint == ' ' as u32 {
            Bitmap::new(0, 0, PixelFormat::Gray, Vec::new())
        } else if glyph.outline {
            let grow = (glyph.embolden + 2 * glyph.stroke) as u32 / 64;
            let (width, rows) = (size / 2 + grow, size * 3 / 4 + grow);
            Bitmap::new(
                width,
                rows,
                PixelFormat::Gray,
                vec![200; (width * rows) as usize],
            )
        } else if self.color {
            let pixels = (size * size) as usize;
            Bitmap::new(size, size, PixelFormat::Bgra, STRIKE_PIXEL.repeat(pixels))
        } else {
            Bitmap::new(
                size,
                size,
                PixelFormat::Mono,
                vec![0xFF; PixelFormat::Mono.row_bytes(size) * size as usize],
            )
        };

        Ok(RasterizedGlyph {
            left: 1,
            top: bitmap.rows as i32,
            bitmap,
            advance,
            lsb_delta: 0,
            rsb_delta: self.rsb_delta,
        })
    }

    fn kerning(&mut self, first: u32, second: u32) -> i32 {
        self.kerning_pairs
            .get(&(first, second))
            .copied()
            .unwrap_or(0)
    }

    fn size_metrics(&self) -> SizeMetrics {
        let size = self.size as i32;
        SizeMetrics {
            height: size * 64 * 6 / 5,
            underline_position: -(size * 64 / 10),
            underline_thickness: size * 64 / 16,
        }
    }

    fn family_name(&self) -> Option<String> {
        Some("Stub Sans".into())
    }
}
