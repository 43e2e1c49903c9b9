// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

mod stub;

pub(crate) use stub::{StubEngine, STRIKE_PIXEL};

use crate::{CpuTexture, Font, GlyphRecord, Rect};

pub(crate) type StubFont = Font<StubEngine, CpuTexture>;

/// Asserts that no two glyphs share a texel and that all of them lie inside `bounds`.
pub(crate) fn assert_packed(glyphs: &[GlyphRecord], bounds: Rect<i32>) {
    for (i, a) in glyphs.iter().enumerate() {
        let rect = a.texture_rect;
        assert!(
            rect.left >= bounds.left
                && rect.top >= bounds.top
                && rect.right() <= bounds.right()
                && rect.bottom() <= bounds.bottom(),
            "glyph {i} at {rect:?} is outside {bounds:?}"
        );
        for (j, b) in glyphs.iter().enumerate().skip(i + 1) {
            assert!(
                !rect.intersects(&b.texture_rect),
                "glyphs {i} and {j} overlap: {rect:?} {:?}",
                b.texture_rect
            );
        }
    }
}
