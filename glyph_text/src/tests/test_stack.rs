// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use super::utils::{BlockEngine, BlockFont, letters_then_ascii};
use crate::FontStack;

#[test]
fn first_font_with_the_glyph_wins() {
    let stack = letters_then_ascii();
    assert!(stack.is_valid());
    assert_eq!(stack.find_index_for_glyph('a' as u32), Some(0));
    assert_eq!(stack.find_index_for_glyph('1' as u32), Some(1));
    assert_eq!(stack.find_index_for_glyph(' ' as u32), Some(1));

    let font = stack.find_font_for_glyph('1' as u32).unwrap();
    assert!(core::ptr::eq(font, &stack.fonts()[1]));
}

#[test]
fn missing_glyphs_fall_back_to_the_first_font() {
    let stack = letters_then_ascii();
    assert_eq!(stack.find_index_for_glyph(0x1F600), Some(0));
    let font = stack.find_font_for_glyph(0x1F600).unwrap();
    assert!(core::ptr::eq(font, &stack.fonts()[0]));
}

#[test]
fn emoji_from_the_second_font() {
    let stack = FontStack::new(vec![
        BlockFont::new(BlockEngine::ascii()),
        BlockFont::new(BlockEngine::covering(vec!['\u{1F600}'..='\u{1F64F}'])),
    ]);
    assert_eq!(stack.find_index_for_glyph(0x1F600), Some(1));
    // In neither font.
    assert_eq!(stack.find_index_for_glyph(0x4E00), Some(0));
}

#[test]
fn empty_stack() {
    let stack = FontStack::<BlockEngine>::new(Vec::new());
    assert!(!stack.is_valid());
    assert_eq!(stack.find_index_for_glyph('a' as u32), None);
    assert!(stack.find_font_for_glyph('a' as u32).is_none());
}

#[test]
fn smoothing_through_the_stack() {
    let mut stack = letters_then_ascii();
    for font in stack.fonts_mut() {
        font.set_smooth(false);
    }
    assert!(stack.fonts().iter().all(|font| !font.is_smooth()));
}

#[test]
fn clones_keep_their_own_atlases() {
    let stack = letters_then_ascii();
    let copy = stack.clone();
    copy.fonts()[0].glyph('a' as u32, 20, false, 0.0);

    assert_eq!(copy.fonts()[0].stats().misses, 1);
    assert_eq!(stack.fonts()[0].stats().misses, 0);
    assert!(stack.fonts()[0].page(20).is_none());
}

#[cfg(feature = "swash")]
#[test]
fn unreadable_files_are_skipped() {
    let stack: FontStack<glyph_atlas::SwashEngine> =
        FontStack::from_files(["/nonexistent/font.ttf", "/nonexistent/other.otf"]);
    assert!(!stack.is_valid());
}
