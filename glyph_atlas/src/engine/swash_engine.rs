// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! [`FontEngine`] implementation on top of swash, skrifa and harfrust.

use core::fmt::{Debug, Formatter};
use std::io::Read;
use std::path::Path;

use harfrust::{Feature, ShaperData, Tag as ShapingTag, UnicodeBuffer};
use hashbrown::HashMap;
use skrifa::{MetadataProvider, Tag};
use smallvec::SmallVec;
use swash::scale::image::{Content, Image};
use swash::scale::{Render, ScaleContext, Scaler, Source, StrikeWith};
use swash::zeno::{Cap, Format, Join, Stroke};
use swash::{CacheKey, FontRef, StringId};

use super::{FixedSize, FontEngine, LoadFlags, LoadedGlyph, RasterizedGlyph, SizeMetrics};
use crate::error::{Error, ErrorKind};
use crate::raster::{Bitmap, PixelFormat};

const OUTLINE_TABLES: [&[u8; 4]; 3] = [b"glyf", b"CFF ", b"CFF2"];
const COLOR_TABLES: [&[u8; 4]; 3] = [b"CBDT", b"sbix", b"COLR"];
const KERNING_TABLES: [&[u8; 4]; 2] = [b"GPOS", b"kern"];

/// A font face rendered with swash.
///
/// Glyph images come from swash's scaler, embedded strikes are discovered with skrifa, and
/// kerning is measured by shaping the pair with harfrust with and without the `kern` feature.
/// Each pair is shaped once; the result is kept in font units and scaled on every query.
/// Hinting does not report side-bearing deltas, so those are always zero.
pub struct SwashEngine {
    data: Vec<u8>,
    index: u32,
    offset: u32,
    key: CacheKey,
    context: ScaleContext,
    shaper_data: ShaperData,
    buffer: Option<UnicodeBuffer>,
    pair_units: HashMap<(char, char), i32>,
    fixed_sizes: SmallVec<[FixedSize; 4]>,
    size: u32,
    scalable: bool,
    color: bool,
    kerning: bool,
}

impl SwashEngine {
    /// Opens face `index` of the font file contained in `data`.
    pub fn new(data: Vec<u8>, index: u32) -> Result<Self, Error> {
        let (offset, key) = {
            let font = FontRef::from_index(&data, index as usize).ok_or_else(|| {
                Error::new(ErrorKind::FaceOpen).with_detail(format!("no face at index {index}"))
            })?;
            (font.offset, font.key)
        };

        let (fixed_sizes, scalable, color, kerning) = {
            let font = skrifa::FontRef::from_index(&data, index)
                .map_err(|err| Error::new(ErrorKind::FaceOpen).with_detail(err.to_string()))?;
            if !font.charmap().has_map() {
                return Err(Error::new(ErrorKind::Charmap));
            }
            let has_any = |tags: &[&[u8; 4]]| {
                tags.iter()
                    .any(|tag| font.table_data(Tag::new(tag)).is_some())
            };
            let fixed_sizes = font
                .bitmap_strikes()
                .iter()
                .map(|strike| {
                    let ppem = round_to_pixels(strike.ppem());
                    FixedSize {
                        width: ppem,
                        height: ppem,
                    }
                })
                .collect::<SmallVec<_>>();
            (
                fixed_sizes,
                has_any(&OUTLINE_TABLES),
                has_any(&COLOR_TABLES),
                has_any(&KERNING_TABLES),
            )
        };

        let shaper_data = {
            let font = harfrust::FontRef::from_index(&data, index)
                .map_err(|err| Error::new(ErrorKind::EngineInit).with_detail(err.to_string()))?;
            ShaperData::new(&font)
        };

        Ok(Self {
            data,
            index,
            offset,
            key,
            context: ScaleContext::new(),
            shaper_data,
            buffer: None,
            pair_units: HashMap::new(),
            fixed_sizes,
            size: 0,
            scalable,
            color,
            kerning,
        })
    }

    /// Reads the font file at `path` and opens its first face.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let data = std::fs::read(path)
            .map_err(|err| Error::io(&err).with_detail(format!("{}: {err}", path.display())))?;
        Self::new(data, 0)
    }

    /// Reads a font file from `reader` until end of stream and opens its first face.
    pub fn from_reader(mut reader: impl Read) -> Result<Self, Error> {
        let mut data = Vec::new();
        reader
            .read_to_end(&mut data)
            .map_err(|err| Error::io(&err))?;
        Self::new(data, 0)
    }

    /// The raw font file.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    fn font_ref(&self) -> FontRef<'_> {
        FontRef {
            data: &self.data,
            offset: self.offset,
            key: self.key,
        }
    }

    fn glyph_id(&self, codepoint: u32) -> u16 {
        self.font_ref().charmap().map(codepoint)
    }

    fn size_px(&self) -> f32 {
        self.size as f32
    }

    /// Kerning between `pair`, in font units.
    fn pair_units(&mut self, pair: [char; 2]) -> i32 {
        if let Some(units) = self.pair_units.get(&(pair[0], pair[1])) {
            return *units;
        }
        let Ok(font) = harfrust::FontRef::from_index(&self.data, self.index) else {
            return 0;
        };
        let shaper = self.shaper_data.shaper(&font).build();
        let no_kern = [Feature::new(ShapingTag::new(b"kern"), 0, ..)];
        let kerned = shaped_width(&shaper, &mut self.buffer, pair, &[]);
        let plain = shaped_width(&shaper, &mut self.buffer, pair, &no_kern);
        let units = kerned - plain;
        self.pair_units.insert((pair[0], pair[1]), units);
        units
    }
}

/// A glyph loaded by [`SwashEngine`].
pub struct SwashGlyph {
    id: u16,
    hint: bool,
    source: GlyphSource,
}

enum GlyphSource {
    Outline { embolden: f32, stroke: f32 },
    Bitmap(Image),
}

impl LoadedGlyph for SwashGlyph {
    fn is_outline(&self) -> bool {
        matches!(self.source, GlyphSource::Outline { .. })
    }
}

impl Debug for SwashGlyph {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SwashGlyph")
            .field("id", &self.id)
            .field("outline", &self.is_outline())
            .finish_non_exhaustive()
    }
}

impl FontEngine for SwashEngine {
    type Glyph = SwashGlyph;

    fn is_scalable(&self) -> bool {
        self.scalable
    }

    fn has_color(&self) -> bool {
        self.color
    }

    fn has_kerning(&self) -> bool {
        self.kerning
    }

    fn fixed_sizes(&self) -> &[FixedSize] {
        &self.fixed_sizes
    }

    fn current_size(&self) -> u32 {
        self.size
    }

    fn set_pixel_size(&mut self, size: u32) -> Result<(), Error> {
        if !self.scalable && !self.fixed_sizes.iter().any(|fixed| fixed.height == size) {
            let available = self
                .fixed_sizes
                .iter()
                .map(|fixed| fixed.height.to_string())
                .collect::<Vec<_>>()
                .join(" ");
            return Err(Error::new(ErrorKind::SizeSelection)
                .with_size(size)
                .with_detail(format!("available sizes are: {available}")));
        }
        self.size = size;
        Ok(())
    }

    fn select_fixed_size(&mut self, index: usize) -> Result<(), Error> {
        let fixed = self.fixed_sizes.get(index).ok_or_else(|| {
            Error::new(ErrorKind::SizeSelection).with_detail(format!("no fixed size {index}"))
        })?;
        // Color strikes are then looked up by this size.
        self.size = fixed.width;
        Ok(())
    }

    fn glyph_index(&self, codepoint: u32) -> u32 {
        u32::from(self.glyph_id(codepoint))
    }

    fn load_glyph(&mut self, codepoint: u32, flags: LoadFlags) -> Result<SwashGlyph, Error> {
        let id = self.glyph_id(codepoint);
        let size = self.size_px();
        let font = FontRef {
            data: &self.data,
            offset: self.offset,
            key: self.key,
        };
        let mut scaler = self
            .context
            .builder(font)
            .size(size)
            .hint(flags.force_autohint)
            .build();

        let bitmap = |scaler: &mut Scaler<'_>| {
            embedded_bitmap(scaler, id, flags.color).map(|image| SwashGlyph {
                id,
                hint: flags.force_autohint,
                source: GlyphSource::Bitmap(image),
            })
        };

        if !flags.no_bitmap {
            if let Some(glyph) = bitmap(&mut scaler) {
                return Ok(glyph);
            }
        }
        if scaler.has_outlines() {
            return Ok(SwashGlyph {
                id,
                hint: flags.force_autohint,
                source: GlyphSource::Outline {
                    embolden: 0.0,
                    stroke: 0.0,
                },
            });
        }
        // Bitmap-only faces still render when outlines were asked for.
        if let Some(glyph) = bitmap(&mut scaler) {
            return Ok(glyph);
        }
        Err(Error::new(ErrorKind::GlyphLoad)
            .with_codepoint(codepoint)
            .with_size(self.size))
    }

    fn embolden_outline(&mut self, glyph: &mut SwashGlyph, strength: i32) {
        if let GlyphSource::Outline { embolden, .. } = &mut glyph.source {
            *embolden += from_26_6(strength);
        }
    }

    fn stroke_outline(&mut self, glyph: &mut SwashGlyph, radius: i32) -> Result<(), Error> {
        match &mut glyph.source {
            GlyphSource::Outline { stroke, .. } => {
                *stroke = from_26_6(radius);
                Ok(())
            }
            GlyphSource::Bitmap(_) => Err(Error::new(ErrorKind::OutlineUnavailable)),
        }
    }

    fn rasterize(&mut self, glyph: SwashGlyph) -> Result<RasterizedGlyph, Error> {
        let size = self.size_px();
        let font = FontRef {
            data: &self.data,
            offset: self.offset,
            key: self.key,
        };
        let advance = font.glyph_metrics(&[]).scale(size).advance_width(glyph.id);

        let image = match glyph.source {
            GlyphSource::Bitmap(image) => image,
            GlyphSource::Outline { embolden, stroke } => {
                let mut scaler = self
                    .context
                    .builder(font)
                    .size(size)
                    .hint(glyph.hint)
                    .build();
                let sources = [Source::Outline];
                let mut render = Render::new(&sources);
                render.format(Format::Alpha).embolden(embolden);
                if stroke > 0.0 {
                    let mut style = Stroke::new(stroke * 2.0);
                    style.cap(Cap::Round).join(Join::Round);
                    render.style(style);
                }
                render
                    .render(&mut scaler, glyph.id)
                    .ok_or_else(|| Error::new(ErrorKind::Rasterize).with_size(self.size))?
            }
        };

        let format = match image.content {
            Content::Mask => PixelFormat::Gray,
            Content::Color => PixelFormat::Rgba,
            Content::SubpixelMask => {
                return Err(Error::new(ErrorKind::Rasterize)
                    .with_size(self.size)
                    .with_detail("unexpected subpixel mask"));
            }
        };
        let placement = image.placement;

        Ok(RasterizedGlyph {
            bitmap: Bitmap::new(placement.width, placement.height, format, image.data),
            left: placement.left,
            top: placement.top,
            advance: to_16_16(advance),
            lsb_delta: 0,
            rsb_delta: 0,
        })
    }

    fn kerning(&mut self, first: u32, second: u32) -> i32 {
        let (Some(first), Some(second)) = (char::from_u32(first), char::from_u32(second)) else {
            return 0;
        };
        let units = i64::from(self.pair_units([first, second]));
        let units_per_em = i64::from(self.font_ref().metrics(&[]).units_per_em.max(1));
        let size = i64::from(self.size);
        let kerning = if self.scalable {
            units * size * 64 / units_per_em
        } else {
            units * size / units_per_em
        };
        i32::try_from(kerning).unwrap_or(0)
    }

    fn size_metrics(&self) -> SizeMetrics {
        let metrics = self.font_ref().metrics(&[]).scale(self.size_px());
        SizeMetrics {
            height: to_26_6(metrics.ascent + metrics.descent + metrics.leading),
            // Center of the stroke rather than its top edge.
            underline_position: to_26_6(metrics.underline_offset - metrics.stroke_size / 2.0),
            underline_thickness: to_26_6(metrics.stroke_size),
        }
    }

    fn family_name(&self) -> Option<String> {
        self.font_ref()
            .localized_strings()
            .find_by_id(StringId::Family, None)
            .map(|name| name.chars().collect())
    }
}

impl Debug for SwashEngine {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SwashEngine")
            .field("index", &self.index)
            .field("size", &self.size)
            .field("scalable", &self.scalable)
            .field("color", &self.color)
            .field("kerning", &self.kerning)
            .field("fixed_sizes", &self.fixed_sizes)
            .finish_non_exhaustive()
    }
}

/// Looks up an embedded bitmap, color strikes first when `color` is set.
///
/// Color strikes are matched by the scaler's size, which is a strike size once one was
/// selected with [`FontEngine::select_fixed_size`].
fn embedded_bitmap(scaler: &mut Scaler<'_>, id: u16, color: bool) -> Option<Image> {
    if color && scaler.has_color_bitmaps() {
        if let Some(image) = scaler.scale_color_bitmap(id, StrikeWith::BestFit) {
            return Some(image);
        }
    }
    if scaler.has_bitmaps() {
        return scaler.scale_bitmap(id, StrikeWith::ExactSize);
    }
    None
}

/// Sum of the advances, in font units, of `text` shaped with `features`.
fn shaped_width(
    shaper: &harfrust::Shaper<'_>,
    buffer: &mut Option<UnicodeBuffer>,
    text: [char; 2],
    features: &[Feature],
) -> i32 {
    let mut unicode = buffer.take().unwrap_or_else(UnicodeBuffer::new);
    unicode.clear();
    for (cluster, ch) in (0_u32..).zip(text) {
        unicode.add(ch, cluster);
    }
    unicode.guess_segment_properties();
    let glyphs = shaper.shape(unicode, features);
    let width = glyphs
        .glyph_positions()
        .iter()
        .map(|position| position.x_advance)
        .sum();
    *buffer = Some(glyphs.clear());
    width
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "strike sizes are small positive values"
)]
fn round_to_pixels(value: f32) -> u32 {
    value.round().max(0.0) as u32
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "metrics are far below the 26.6 range limit"
)]
fn to_26_6(value: f32) -> i32 {
    (value * 64.0).round() as i32
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "advances are far below the 16.16 range limit"
)]
fn to_16_16(value: f32) -> i32 {
    (value.round() as i32) << 16
}

fn from_26_6(value: i32) -> f32 {
    value as f32 / 64.0
}
