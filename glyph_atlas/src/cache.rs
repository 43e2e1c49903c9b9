// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pages of one font, keyed by pixel size.

use core::cell::OnceCell;
use std::collections::BTreeMap;

use crate::error::Error;
use crate::key::GlyphKey;
use crate::page::{AtlasConfig, Page};
use crate::rect::GlyphRecord;
use crate::texture::AtlasTexture;

/// Counters describing how a font's glyph cache has been used.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Requests answered from the cache.
    pub hits: u64,
    /// Requests that had to load the glyph.
    pub misses: u64,
    /// Glyphs that failed to load, or loaded only partially.
    pub failures: u64,
    /// Glyphs that got no room in the atlas and were given the sentinel rectangle.
    pub atlas_exhausted: u64,
}

pub(crate) struct GlyphCache<T> {
    pages: BTreeMap<u32, Page<T>>,
    /// Scratch buffer the normalizer writes tiles into.
    pixels: Vec<u8>,
    stats: CacheStats,
    config: AtlasConfig,
    smooth: bool,
    /// Stands in for pages that can't be created while the cache is borrowed.
    blank: OnceCell<Page<T>>,
}

impl<T: AtlasTexture> GlyphCache<T> {
    pub(crate) fn new(config: AtlasConfig) -> Self {
        Self {
            pages: BTreeMap::new(),
            pixels: Vec::new(),
            stats: CacheStats::default(),
            config,
            smooth: true,
            blank: OnceCell::new(),
        }
    }

    /// Returns the page for `size`, creating it if needed.
    pub(crate) fn page_mut(&mut self, size: u32) -> &mut Page<T> {
        let (config, smooth) = (&self.config, self.smooth);
        self.pages
            .entry(size)
            .or_insert_with(|| Page::new(config, smooth))
    }

    pub(crate) fn page(&self, size: u32) -> Option<&Page<T>> {
        self.pages.get(&size)
    }

    /// The texture of the page for `size`, or that of an empty page if there is none.
    pub(crate) fn texture(&self, size: u32) -> &T {
        match self.pages.get(&size) {
            Some(page) => page.texture(),
            None => self
                .blank
                .get_or_init(|| Page::new(&self.config, self.smooth))
                .texture(),
        }
    }

    /// Looks up `key` on the page for `size`, running `load` on a miss.
    ///
    /// Whatever `load` produces is cached, including the empty record standing in for a
    /// glyph that failed to load, so a failing glyph is only attempted once.
    pub(crate) fn get_or_insert_with<F>(&mut self, size: u32, key: GlyphKey, load: F) -> GlyphRecord
    where
        F: FnOnce(&mut Page<T>, &mut Vec<u8>, &mut CacheStats) -> Result<GlyphRecord, Error>,
    {
        let (config, smooth) = (&self.config, self.smooth);
        let page = self
            .pages
            .entry(size)
            .or_insert_with(|| Page::new(config, smooth));
        if let Some(record) = page.get(key) {
            self.stats.hits += 1;
            return *record;
        }

        self.stats.misses += 1;
        let record = load(page, &mut self.pixels, &mut self.stats).unwrap_or_else(|err| {
            log::error!("{err}");
            self.stats.failures += 1;
            GlyphRecord::default()
        });
        page.insert(key, record);
        record
    }

    pub(crate) fn set_smooth(&mut self, smooth: bool) {
        self.smooth = smooth;
        self.blank = OnceCell::new();
        for page in self.pages.values_mut() {
            page.set_smooth(smooth);
        }
    }
}

impl<T> GlyphCache<T> {
    pub(crate) fn is_smooth(&self) -> bool {
        self.smooth
    }

    pub(crate) fn stats(&self) -> CacheStats {
        self.stats
    }

    pub(crate) fn clear_stats(&mut self) {
        self.stats = CacheStats::default();
    }

    pub(crate) fn page_count(&self) -> usize {
        self.pages.len()
    }
}

impl<T: Clone> Clone for GlyphCache<T> {
    fn clone(&self) -> Self {
        Self {
            pages: self.pages.clone(),
            pixels: Vec::new(),
            stats: CacheStats::default(),
            config: self.config,
            smooth: self.smooth,
            blank: OnceCell::new(),
        }
    }
}
