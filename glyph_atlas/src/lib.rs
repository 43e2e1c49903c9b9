// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Glyph Atlas rasterizes glyphs on demand and packs them into per-size texture atlases.
//!
//! A [`Font`] turns a `(codepoint, pixel size, bold, outline thickness)` request into a
//! [`GlyphRecord`]: advance, side-bearing deltas, bounds in text space and the rectangle the
//! glyph occupies inside the atlas texture for that pixel size. Glyphs are rasterized once,
//! normalized to padded RGBA and packed into rows of a texture that doubles in size when it
//! runs out of room. Nothing is ever evicted.
//!
//! The font machinery is reached through the [`FontEngine`] trait and the pixel storage
//! through the [`AtlasTexture`] trait, so the cache can be driven by any rasterizer and
//! uploaded to any graphics backend.
//!
//! ## Features
//!
//! - `swash` (enabled by default): Provides [`SwashEngine`], a [`FontEngine`] built on
//!   `swash` for rendering, `skrifa` for font tables and `harfrust` for kerning.
//! - `png`: Enables [`CpuTexture::save_png`] for dumping atlas pages while debugging.
//!
//! ## Example
//!
//! ```no_run
//! # #[cfg(feature = "swash")]
//! # fn main() -> Result<(), glyph_atlas::Error> {
//! use glyph_atlas::SwashFont;
//!
//! let font = SwashFont::from_file("DejaVuSans.ttf")?;
//! let glyph = font.glyph('A' as u32, 24, false, 0.0);
//! let texture = font.texture(24);
//! # let _ = (glyph, texture);
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "swash"))]
//! # fn main() {}
//! ```

// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_cfg))]

mod cache;
mod engine;
mod error;
mod font;
mod key;
mod packer;
mod page;
mod raster;
mod rect;
mod resolve;
mod texture;

#[cfg(test)]
mod tests;

pub use cache::CacheStats;
pub use engine::{FixedSize, FontEngine, LoadFlags, LoadedGlyph, RasterizedGlyph, SizeMetrics};
pub use error::{Error, ErrorKind};
pub use font::{Font, FontInfo};
pub use key::GlyphKey;
pub use packer::{Allocation, Row, RowPacker, MAX_FIT_RATIO, MIN_FIT_RATIO};
pub use page::{AtlasConfig, Page, SENTINEL_RECT, WHITE_BLOCK_SIZE};
pub use raster::{embolden, normalize, scale_bilinear, Bitmap, PixelFormat, GLYPH_PADDING};
pub use rect::{GlyphRecord, Rect};
pub use texture::{AtlasTexture, CpuTexture};

#[cfg(feature = "swash")]
pub use engine::swash_engine::{SwashEngine, SwashGlyph};

/// A [`Font`] backed by [`SwashEngine`] that stores its atlases in [`CpuTexture`]s.
#[cfg(feature = "swash")]
pub type SwashFont = Font<SwashEngine, CpuTexture>;
