// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Glyph Text turns strings into textured triangles using the atlases of [`glyph_atlas`].
//!
//! - [`Text`] lays out a multi-line string with a single font and produces [`Vertex`] lists
//!   for the glyph fills, the glyph outlines, and underline or strikethrough bars.
//! - [`FontStack`] picks, for every character, the first font that has a glyph for it.
//! - [`TextLine`] splits a single line into runs per font of a stack, and [`EllipsisLine`]
//!   shortens one with `...` until it fits a width.
//!
//! Texture coordinates are atlas texels. Draw with the texture of each run's font at the
//! line's size, which [`Font::texture`](glyph_atlas::Font::texture) returns.
//!
//! ## Features
//!
//! - `swash` (enabled by default): Provides [`FontStack::from_files`].

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

mod line;
mod stack;
mod text;
mod vertex;

#[cfg(test)]
mod tests;

pub use line::{EllipsisLine, LineLayout, Run, TextLine};
pub use stack::FontStack;
pub use text::{Text, TextGeometry, TextStyle};
pub use vertex::{Color, Vertex};
