// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The font handle: an engine plus the glyph cache built on top of it.

use core::cell::{Ref, RefCell};
use core::fmt::{Debug, Formatter};
use std::rc::Rc;

use crate::cache::{CacheStats, GlyphCache};
use crate::engine::FontEngine;
use crate::key::GlyphKey;
use crate::page::{AtlasConfig, Page};
use crate::rect::GlyphRecord;
use crate::resolve::{resolve_glyph, select_size, GlyphRequest};
use crate::texture::{AtlasTexture, CpuTexture};

#[cfg(feature = "swash")]
use crate::{engine::swash_engine::SwashEngine, error::Error};

/// Descriptive information about a font.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FontInfo {
    /// The family name recorded in the font, if any.
    pub family: Option<String>,
}

/// A font face with a cache of rasterized glyphs, one atlas page per pixel size.
///
/// Glyphs are rendered the first time they are requested and kept for the lifetime of the
/// font. Queries take `&self`; the cache lives behind a [`RefCell`].
///
/// Cloning a font shares the engine but copies every page, so the clone's atlases evolve
/// independently from those of the font it was cloned from.
pub struct Font<E, T = CpuTexture> {
    engine: Rc<RefCell<E>>,
    cache: RefCell<GlyphCache<T>>,
    info: FontInfo,
}

impl<E: FontEngine, T: AtlasTexture> Font<E, T> {
    /// Creates a font with the default [`AtlasConfig`].
    pub fn new(engine: E) -> Self {
        Self::with_config(engine, AtlasConfig::default())
    }

    /// Creates a font whose atlas pages are sized according to `config`.
    pub fn with_config(engine: E, config: AtlasConfig) -> Self {
        let info = FontInfo {
            family: engine.family_name(),
        };
        Self {
            engine: Rc::new(RefCell::new(engine)),
            cache: RefCell::new(GlyphCache::new(config)),
            info,
        }
    }

    /// Descriptive information about the font.
    pub fn info(&self) -> &FontInfo {
        &self.info
    }

    /// Returns the glyph for `codepoint` at `size` pixels, rendering it if needed.
    ///
    /// `outline_thickness` is the stroke radius in pixels; 0 requests the filled glyph.
    /// This never fails: glyphs that can't be rendered come back as an empty
    /// [`GlyphRecord`] and the problem is logged and counted in [`stats`](Self::stats).
    /// While a reference returned by [`texture`](Self::texture) or [`page`](Self::page) is
    /// alive the cache can't be updated, so every request gets the empty record.
    pub fn glyph(
        &self,
        codepoint: u32,
        size: u32,
        bold: bool,
        outline_thickness: f32,
    ) -> GlyphRecord {
        let Ok(mut cache) = self.cache.try_borrow_mut() else {
            log::error!("glyph {codepoint:#x} requested while the atlas is borrowed");
            return GlyphRecord::default();
        };
        let mut engine = self.engine.borrow_mut();
        let key = GlyphKey::new(engine.glyph_index(codepoint), bold, outline_thickness);
        let request = GlyphRequest {
            codepoint,
            size,
            bold,
            outline_thickness,
        };
        cache.get_or_insert_with(size, key, |page, pixels, stats| {
            resolve_glyph(&mut *engine, page, pixels, stats, request)
        })
    }

    /// Returns true if the face carries color glyphs, such as an emoji font.
    pub fn is_color(&self) -> bool {
        self.engine.borrow().has_color()
    }

    /// Returns true if the font maps `codepoint` to a glyph other than the missing glyph.
    pub fn has_glyph(&self, codepoint: u32) -> bool {
        self.engine.borrow().glyph_index(codepoint) != 0
    }

    /// Horizontal adjustment, in pixels, to apply between `first` and `second`.
    ///
    /// Both glyphs are rendered as a side effect since their hinting deltas take part in the
    /// result. Returns 0 when either codepoint is U+0000.
    pub fn kerning(&self, first: u32, second: u32, size: u32, bold: bool) -> f32 {
        if first == 0 || second == 0 {
            return 0.0;
        }
        if !self.with_size(size, |_| true) {
            return 0.0;
        }

        let first_rsb = self.glyph(first, size, bold, 0.0).rsb_delta;
        let second_lsb = self.glyph(second, size, bold, 0.0).lsb_delta;

        let mut engine = self.engine.borrow_mut();
        if select_size(&mut *engine, size).is_err() {
            return 0.0;
        }
        let kerning = if engine.has_kerning() {
            engine.kerning(first, second)
        } else {
            0
        };
        if !engine.is_scalable() {
            return from_i32(kerning);
        }
        ((second_lsb - first_rsb + from_i32(kerning) + 32.0) / 64.0).floor()
    }

    /// Distance between two consecutive baselines, in pixels.
    pub fn line_spacing(&self, size: u32) -> f32 {
        self.with_size(size, |engine| from_26_6(engine.size_metrics().height))
    }

    /// Offset of the underline below the baseline, in pixels.
    pub fn underline_position(&self, size: u32) -> f32 {
        self.with_size(size, |engine| {
            if engine.is_scalable() {
                -from_26_6(engine.size_metrics().underline_position)
            } else {
                from_u32(size) / 10.0
            }
        })
    }

    /// Thickness of the underline, in pixels.
    pub fn underline_thickness(&self, size: u32) -> f32 {
        self.with_size(size, |engine| {
            if engine.is_scalable() {
                from_26_6(engine.size_metrics().underline_thickness)
            } else {
                from_u32(size) / 14.0
            }
        })
    }

    /// The atlas texture holding the glyphs of `size`, created empty if no glyph of that size
    /// was requested yet.
    ///
    /// The texture's contents change as more glyphs are requested. Several textures may be
    /// held at once; a page that can't be created because another texture is still borrowed
    /// is read as an empty one.
    pub fn texture(&self, size: u32) -> Ref<'_, T> {
        if let Ok(mut cache) = self.cache.try_borrow_mut() {
            cache.page_mut(size);
        }
        Ref::map(self.cache.borrow(), |cache| cache.texture(size))
    }

    /// The atlas page of `size`, if one exists.
    pub fn page(&self, size: u32) -> Option<Ref<'_, Page<T>>> {
        Ref::filter_map(self.cache.borrow(), |cache| cache.page(size)).ok()
    }

    /// Selects linear or nearest filtering for every page, present and future.
    pub fn set_smooth(&mut self, smooth: bool) {
        self.cache.get_mut().set_smooth(smooth);
    }

    /// Whether pages use linear filtering. Fonts start smooth.
    pub fn is_smooth(&self) -> bool {
        self.cache.borrow().is_smooth()
    }

    /// Cache counters since creation or the last [`clear_stats`](Self::clear_stats).
    pub fn stats(&self) -> CacheStats {
        self.cache.borrow().stats()
    }

    /// Resets the cache counters.
    pub fn clear_stats(&self) {
        self.cache.borrow_mut().clear_stats();
    }

    /// Runs `query` with `size` made current, or returns the default value if the engine
    /// can't render at that size.
    fn with_size<R: Default>(&self, size: u32, query: impl FnOnce(&E) -> R) -> R {
        let mut engine = self.engine.borrow_mut();
        match select_size(&mut *engine, size) {
            Ok(_) => query(&*engine),
            Err(err) => {
                log::error!("{err}");
                R::default()
            }
        }
    }
}

#[cfg(feature = "swash")]
impl<T: AtlasTexture> Font<SwashEngine, T> {
    /// Opens the first face of a font file held in memory.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self, Error> {
        SwashEngine::new(data, 0).map(Self::new)
    }

    /// Opens the first face of the font file at `path`.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, Error> {
        SwashEngine::from_file(path).map(Self::new)
    }

    /// Opens the first face of a font file read from `reader`.
    pub fn from_reader(reader: impl std::io::Read) -> Result<Self, Error> {
        SwashEngine::from_reader(reader).map(Self::new)
    }
}

impl<E, T: Clone> Clone for Font<E, T> {
    fn clone(&self) -> Self {
        Self {
            engine: Rc::clone(&self.engine),
            cache: RefCell::new(self.cache.borrow().clone()),
            info: self.info.clone(),
        }
    }
}

impl<E, T> Debug for Font<E, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        let cache = self.cache.try_borrow();
        f.debug_struct("Font")
            .field("info", &self.info)
            .field("pages", &cache.as_ref().map(|cache| cache.page_count()).ok())
            .finish_non_exhaustive()
    }
}

fn from_i32(value: i32) -> f32 {
    value as f32
}

fn from_u32(value: u32) -> f32 {
    value as f32
}

fn from_26_6(value: i32) -> f32 {
    from_i32(value) / 64.0
}
