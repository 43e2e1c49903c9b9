// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use glyph_atlas::Rect;

use super::utils::{BlockEngine, BlockFont, assert_close};
use crate::{Color, Text, TextStyle};

fn font() -> BlockFont {
    BlockFont::new(BlockEngine::ascii())
}

fn styled(string: &str, style: TextStyle) -> Text {
    Text {
        style,
        ..Text::new(string, 20)
    }
}

#[test]
fn defaults() {
    let text = Text::default();
    assert_eq!(text.size, 30);
    assert_eq!(text.letter_spacing, 1.0);
    assert_eq!(text.line_spacing, 1.0);
    assert_eq!(text.fill_color, Color::WHITE);
    assert_eq!(text.outline_color, Color::BLACK);
    assert_eq!(text.outline_thickness, 0.0);
    assert_eq!(text.style, TextStyle::default());
}

#[test]
fn empty_string_has_no_geometry() {
    let geometry = Text::new("", 20).build(&font());
    assert!(geometry.vertices.is_empty());
    assert!(geometry.outline_vertices.is_empty());
    assert_eq!(geometry.bounds, Rect::default());
}

#[test]
fn glyph_quads_and_bounds() {
    let font = font();
    let geometry = Text::new("ab", 20).build(&font);

    assert_eq!(geometry.vertices.len(), 12);
    assert!(geometry.outline_vertices.is_empty());
    assert_eq!(geometry.bounds, Rect::new(1.0, 5.0, 18.0, 15.0));

    // Quads are padded by a pixel on each side of the 8x15 glyph.
    let quad = &geometry.vertices[..6];
    assert_eq!(quad[0].position, [0.0, 4.0]);
    assert_eq!(quad[1].position, [10.0, 4.0]);
    assert_eq!(quad[5].position, [10.0, 21.0]);
    assert_eq!(quad[1].tex_coords[0] - quad[0].tex_coords[0], 10.0);
    assert_eq!(quad[2].tex_coords[1] - quad[0].tex_coords[1], 17.0);
    assert!(quad.iter().all(|vertex| vertex.color == Color::WHITE));

    let glyph = font.glyph('a' as u32, 20, false, 0.0);
    assert_eq!(
        quad[0].tex_coords,
        [
            glyph.texture_rect.left as f32 - 1.0,
            glyph.texture_rect.top as f32 - 1.0
        ]
    );

    // The second glyph starts one advance later.
    assert_eq!(geometry.vertices[6].position, [10.0, 4.0]);
}

#[test]
fn whitespace_advances_without_quads() {
    let font = font();

    let geometry = Text::new("a b", 20).build(&font);
    assert_eq!(geometry.vertices.len(), 12);
    assert_eq!(geometry.bounds, Rect::new(1.0, 5.0, 28.0, 15.0));

    let geometry = Text::new("a\tb", 20).build(&font);
    assert_eq!(geometry.bounds, Rect::new(1.0, 5.0, 58.0, 15.0));
}

#[test]
fn newline_starts_a_new_baseline() {
    let font = font();
    let geometry = Text::new("a\nb", 20).build(&font);
    assert_eq!(geometry.bounds, Rect::new(1.0, 5.0, 8.0, 45.0));
    // Second line baseline at 20 + 30, glyph top 15 above it, minus padding.
    assert_eq!(geometry.vertices[6].position, [0.0, 34.0]);
}

#[test]
fn carriage_return_is_ignored() {
    let font = font();
    assert_eq!(
        Text::new("a\r\nb", 20).build(&font),
        Text::new("a\nb", 20).build(&font)
    );
}

#[test]
fn underline_after_last_line() {
    let style = TextStyle {
        underlined: true,
        ..TextStyle::default()
    };
    let geometry = styled("ab", style).build(&font());
    assert_eq!(geometry.vertices.len(), 18);

    let line = &geometry.vertices[12..];
    assert_eq!(line[0].position, [0.0, 21.0]);
    assert_eq!(line[1].position, [20.0, 21.0]);
    assert_eq!(line[5].position, [20.0, 22.0]);
    assert!(line.iter().all(|vertex| vertex.tex_coords == [1.0, 1.0]));
}

#[test]
fn underline_per_line() {
    let font = font();
    let style = TextStyle {
        underlined: true,
        ..TextStyle::default()
    };

    // One bar at the newline, one at the end.
    assert_eq!(styled("a\nb", style).build(&font).vertices.len(), 24);
    // Empty lines don't get a bar of their own.
    assert_eq!(styled("a\n\nb", style).build(&font).vertices.len(), 24);
    // A trailing newline leaves the pen at x = 0, so nothing is added at the end.
    assert_eq!(styled("a\n", style).build(&font).vertices.len(), 12);
}

#[test]
fn strikethrough_crosses_the_middle_of_x() {
    let style = TextStyle {
        strikethrough: true,
        ..TextStyle::default()
    };
    let geometry = styled("a", style).build(&font());
    assert_eq!(geometry.vertices.len(), 12);

    let line = &geometry.vertices[6..];
    assert_eq!(line[0].position, [0.0, 12.0]);
    assert_eq!(line[5].position, [10.0, 13.0]);
}

#[test]
fn both_decorations() {
    let style = TextStyle {
        underlined: true,
        strikethrough: true,
        ..TextStyle::default()
    };
    let geometry = styled("a", style).build(&font());
    assert_eq!(geometry.vertices.len(), 18);
}

#[test]
fn letter_spacing_scales_the_gap() {
    let text = Text {
        letter_spacing: 4.0,
        ..Text::new("ab", 20)
    };
    let geometry = text.build(&font());
    assert_close(geometry.bounds.width, 28.0);
}

#[test]
fn line_spacing_scales_the_line_height() {
    let text = Text {
        line_spacing: 2.0,
        ..Text::new("a\nb", 20)
    };
    let geometry = text.build(&font());
    assert_eq!(geometry.bounds, Rect::new(1.0, 5.0, 8.0, 75.0));
}

#[test]
fn outline_is_drawn_first_and_inflates_bounds() {
    let text = Text {
        outline_thickness: 2.0,
        outline_color: Color::rgb(255, 0, 0),
        ..Text::new("a", 20)
    };
    let geometry = text.build(&font());

    assert_eq!(geometry.outline_vertices.len(), 6);
    assert_eq!(geometry.vertices.len(), 6);
    assert!(
        geometry
            .outline_vertices
            .iter()
            .all(|vertex| vertex.color == Color::rgb(255, 0, 0))
    );
    // The stroked glyph is 4 pixels larger in each direction.
    let outline = &geometry.outline_vertices;
    assert_eq!(outline[1].position[0] - outline[0].position[0], 14.0);
    assert_eq!(geometry.bounds, Rect::new(-1.0, 3.0, 12.0, 19.0));
}

#[test]
fn outlined_underline() {
    let text = Text {
        outline_thickness: 1.0,
        style: TextStyle {
            underlined: true,
            ..TextStyle::default()
        },
        ..Text::new("a", 20)
    };
    let geometry = text.build(&font());
    assert_eq!(geometry.outline_vertices.len(), 12);

    let bar = &geometry.outline_vertices[6..];
    assert_eq!(bar[0].position, [-1.0, 20.0]);
    assert_eq!(bar[5].position, [11.0, 23.0]);
}

#[test]
fn italic_shears_quads_and_bounds() {
    let style = TextStyle {
        italic: true,
        ..TextStyle::default()
    };
    let geometry = styled("a", style).build(&font());

    assert_close(geometry.bounds.left, 1.0);
    assert_close(geometry.bounds.width, 8.0 + 0.209 * 15.0);
    // The top edge leans right, the bottom edge left.
    assert_close(geometry.vertices[0].position[0], 0.209 * 16.0);
    assert_close(geometry.vertices[2].position[0], -0.209);
}

#[test]
fn bold_glyphs_are_wider() {
    let style = TextStyle {
        bold: true,
        ..TextStyle::default()
    };
    let geometry = styled("ab", style).build(&font());
    assert_eq!(geometry.bounds, Rect::new(1.0, 4.0, 20.0, 16.0));
}

#[test]
fn kerning_moves_the_pen() {
    let font = BlockFont::new(BlockEngine::ascii().with_kerning());
    let geometry = Text::new("AV", 20).build(&font);
    assert_eq!(geometry.bounds, Rect::new(1.0, 5.0, 16.0, 15.0));
}

#[test]
fn character_positions() {
    let font = font();

    let text = Text::new("a b", 20);
    assert_eq!(text.find_character_pos(&font, 0), [0.0, 0.0]);
    assert_eq!(text.find_character_pos(&font, 2), [20.0, 0.0]);
    assert_eq!(text.find_character_pos(&font, 3), [30.0, 0.0]);
    // Past the end clamps to the end.
    assert_eq!(text.find_character_pos(&font, 100), [30.0, 0.0]);

    let text = Text::new("ab\ncd", 20);
    assert_eq!(text.find_character_pos(&font, 4), [10.0, 30.0]);

    let text = Text::new("a\tb", 20);
    assert_eq!(text.find_character_pos(&font, 2), [50.0, 0.0]);
}

#[test]
fn character_positions_include_kerning() {
    let font = BlockFont::new(BlockEngine::ascii().with_kerning());
    let text = Text::new("AV", 20);
    assert_eq!(text.find_character_pos(&font, 2), [18.0, 0.0]);
}
