// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Loading a glyph that is not in the cache yet: size selection, bold and outline synthesis,
//! rasterization, normalization and placement in the atlas.

use crate::cache::CacheStats;
use crate::engine::{FontEngine, LoadFlags, LoadedGlyph};
use crate::error::{Error, ErrorKind};
use crate::page::{Page, SENTINEL_RECT};
use crate::raster::{GLYPH_PADDING, embolden, normalize, scale_length};
use crate::rect::{GlyphRecord, Rect};
use crate::texture::AtlasTexture;

/// Bold synthesis weight, one pixel in 26.6.
const BOLD_WEIGHT: i32 = 1 << 6;

/// What the caller asked for.
#[derive(Copy, Clone, Debug)]
pub(crate) struct GlyphRequest {
    pub(crate) codepoint: u32,
    pub(crate) size: u32,
    pub(crate) bold: bool,
    pub(crate) outline_thickness: f32,
}

/// Makes `size` current on the engine and returns the size glyphs will be rendered at.
///
/// Color faces with embedded strikes can't be scaled by the engine, so the strike whose width
/// is closest to `size` is selected instead (the first one on ties) and its height returned.
/// The caller rescales color bitmaps by `size / rendered`.
pub(crate) fn select_size<E: FontEngine>(engine: &mut E, size: u32) -> Result<u32, Error> {
    if engine.current_size() == size {
        return Ok(size);
    }

    if engine.has_color() {
        let closest = engine
            .fixed_sizes()
            .iter()
            .copied()
            .enumerate()
            .min_by_key(|(_, fixed)| fixed.width.abs_diff(size));
        if let Some((index, fixed)) = closest {
            engine.select_fixed_size(index)?;
            return Ok(fixed.height);
        }
    }

    engine.set_pixel_size(size)?;
    Ok(size)
}

/// Renders the requested glyph and places it on `page`.
///
/// Errors abort the glyph; the caller caches an empty record for it. Problems that still
/// leave something to draw are logged and counted in `stats` instead:
/// an outline request on a bitmap-only glyph renders the filled glyph, and a full atlas gives
/// the glyph [`SENTINEL_RECT`] without uploading anything.
pub(crate) fn resolve_glyph<E: FontEngine, T: AtlasTexture>(
    engine: &mut E,
    page: &mut Page<T>,
    pixels: &mut Vec<u8>,
    stats: &mut CacheStats,
    request: GlyphRequest,
) -> Result<GlyphRecord, Error> {
    let GlyphRequest {
        codepoint,
        size,
        bold,
        outline_thickness,
    } = request;
    let context = |err: Error| err.with_codepoint(codepoint).with_size(size);

    let rendered = select_size(engine, size).map_err(context)?;
    if rendered == 0 {
        return Err(context(Error::new(ErrorKind::SizeSelection)));
    }

    let flags = LoadFlags {
        color: engine.has_color(),
        force_autohint: true,
        no_bitmap: outline_thickness != 0.0,
    };
    let mut glyph = engine.load_glyph(codepoint, flags).map_err(context)?;

    let is_outline = glyph.is_outline();
    if is_outline {
        if bold {
            engine.embolden_outline(&mut glyph, BOLD_WEIGHT);
        }
        if outline_thickness != 0.0 {
            engine
                .stroke_outline(&mut glyph, to_26_6(outline_thickness))
                .map_err(context)?;
        }
    }

    let mut raster = engine.rasterize(glyph).map_err(context)?;

    if !is_outline {
        if bold {
            embolden(&mut raster.bitmap, 1, 1);
        }
        if outline_thickness != 0.0 {
            log::warn!("{}", context(Error::new(ErrorKind::OutlineUnavailable)));
            stats.failures += 1;
        }
    }

    let scale = ratio(size, rendered);
    let mut advance = pixels_from_16_16(raster.advance);
    if bold {
        advance += 1.0;
    }

    let mut record = GlyphRecord {
        advance: advance * scale,
        lsb_delta: as_f32(raster.lsb_delta) * scale,
        rsb_delta: as_f32(raster.rsb_delta) * scale,
        ..GlyphRecord::default()
    };

    let bitmap = &raster.bitmap;
    let width = scale_length(bitmap.width, scale);
    let height = scale_length(bitmap.rows, scale);
    if width == 0 || height == 0 {
        return Ok(record);
    }

    record.bounds = Rect::new(
        as_f32(raster.left) * scale,
        -as_f32(raster.top) * scale,
        ratio(bitmap.width, 1) * scale,
        ratio(bitmap.rows, 1) * scale,
    );

    let padding = GLYPH_PADDING;
    match page.allocate(width + 2 * padding, height + 2 * padding) {
        Ok(rect) => {
            record.texture_rect = rect.inset(padding.cast_signed());
            let (tile_width, tile_height) = normalize(bitmap, scale, pixels);
            page.upload(
                pixels,
                tile_width,
                tile_height,
                rect.left.cast_unsigned(),
                rect.top.cast_unsigned(),
            );
        }
        Err(err) => {
            log::error!("{}", context(err));
            stats.atlas_exhausted += 1;
            record.texture_rect = SENTINEL_RECT;
        }
    }

    Ok(record)
}

fn ratio(numerator: u32, denominator: u32) -> f32 {
    numerator as f32 / denominator as f32
}

fn as_f32(value: i32) -> f32 {
    value as f32
}

fn pixels_from_16_16(value: i32) -> f32 {
    as_f32(value >> 16)
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "outline thicknesses are a few pixels"
)]
fn to_26_6(value: f32) -> i32 {
    (value * 64.0) as i32
}
