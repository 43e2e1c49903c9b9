// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ordered font fallback.

use glyph_atlas::{AtlasTexture, CpuTexture, Font, FontEngine};

/// An ordered list of fonts where later fonts fill in glyphs missing from earlier ones.
#[derive(Debug)]
pub struct FontStack<E, T = CpuTexture> {
    fonts: Vec<Font<E, T>>,
}

impl<E, T: Clone> Clone for FontStack<E, T> {
    fn clone(&self) -> Self {
        Self {
            fonts: self.fonts.clone(),
        }
    }
}

impl<E: FontEngine, T: AtlasTexture> FontStack<E, T> {
    /// Creates a stack from fonts in order of preference.
    pub fn new(fonts: Vec<Font<E, T>>) -> Self {
        Self { fonts }
    }

    /// Returns true if the stack holds at least one font.
    pub fn is_valid(&self) -> bool {
        !self.fonts.is_empty()
    }

    /// The fonts, in order of preference.
    pub fn fonts(&self) -> &[Font<E, T>] {
        &self.fonts
    }

    /// Mutable access to the fonts, e.g. to change their filtering.
    pub fn fonts_mut(&mut self) -> &mut [Font<E, T>] {
        &mut self.fonts
    }

    /// Index of the first font that has a glyph for `codepoint`.
    ///
    /// Falls back to the first font, which will draw its missing glyph symbol. Returns `None`
    /// only for an empty stack.
    pub fn find_index_for_glyph(&self, codepoint: u32) -> Option<usize> {
        if self.fonts.is_empty() {
            log::error!("looking up U+{codepoint:04X} in an empty font stack");
            return None;
        }
        Some(
            self.fonts
                .iter()
                .position(|font| font.has_glyph(codepoint))
                .unwrap_or(0),
        )
    }

    /// The font that should draw `codepoint`; see [`find_index_for_glyph`](Self::find_index_for_glyph).
    pub fn find_font_for_glyph(&self, codepoint: u32) -> Option<&Font<E, T>> {
        self.find_index_for_glyph(codepoint)
            .and_then(|index| self.fonts.get(index))
    }
}

#[cfg(feature = "swash")]
impl<T: AtlasTexture> FontStack<glyph_atlas::SwashEngine, T> {
    /// Loads a stack from font files, in order of preference.
    ///
    /// Files that can't be loaded are logged and left out, so the result may be empty; check
    /// [`is_valid`](Self::is_valid).
    pub fn from_files<P: AsRef<std::path::Path>>(paths: impl IntoIterator<Item = P>) -> Self {
        let fonts = paths
            .into_iter()
            .filter_map(|path| {
                let path = path.as_ref();
                Font::from_file(path)
                    .inspect_err(|err| log::error!("can't load font from '{}': {err}", path.display()))
                    .ok()
            })
            .collect();
        Self::new(fonts)
    }

    /// Loads a stack made of a single font file.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Self {
        Self::from_files([path])
    }
}
