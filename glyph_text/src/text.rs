// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry of a block of text drawn with a single font.

use glyph_atlas::{AtlasTexture, Font, FontEngine, GlyphRecord, Rect};

use crate::vertex::{Color, Vertex};

/// Horizontal offset per unit of height for italic text, about 12 degrees.
const ITALIC_SHEAR: f32 = 0.209;

/// Quads extend one pixel past the glyph on every side so filtering has room at the edges.
const QUAD_PADDING: f32 = 1.0;

/// Texel at the center of the atlas' white block, used by underline and strikethrough.
const WHITE_TEXEL: f32 = 1.0;

/// Style switches of a [`Text`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TextStyle {
    /// Use the bold variant of every glyph.
    pub bold: bool,
    /// Shear glyphs to the right.
    pub italic: bool,
    /// Draw a line under each line of text.
    pub underlined: bool,
    /// Draw a line through each line of text.
    pub strikethrough: bool,
}

impl TextStyle {
    /// No decoration.
    pub const REGULAR: Self = Self {
        bold: false,
        italic: false,
        underlined: false,
        strikethrough: false,
    };
}

/// A string laid out on lines with one font, at one size.
///
/// The first baseline sits `size` pixels below the origin. `\n` starts a new line, `\t`
/// advances by four spaces and `\r` is ignored.
#[derive(Clone, Debug, PartialEq)]
pub struct Text {
    /// The text.
    pub string: String,
    /// Character size in pixels.
    pub size: u32,
    /// Factor applied to the natural spacing between letters; 1 keeps it unchanged.
    pub letter_spacing: f32,
    /// Factor applied to the font's line spacing; 1 keeps it unchanged.
    pub line_spacing: f32,
    /// Style switches.
    pub style: TextStyle,
    /// Color of the glyphs.
    pub fill_color: Color,
    /// Color of the glyph outlines.
    pub outline_color: Color,
    /// Outline radius in pixels, 0 for no outline.
    pub outline_thickness: f32,
}

impl Default for Text {
    fn default() -> Self {
        Self {
            string: String::new(),
            size: 30,
            letter_spacing: 1.0,
            line_spacing: 1.0,
            style: TextStyle::REGULAR,
            fill_color: Color::WHITE,
            outline_color: Color::BLACK,
            outline_thickness: 0.0,
        }
    }
}

/// Vertices and bounds produced by [`Text::build`].
///
/// Draw `outline_vertices` first, then `vertices`, both textured with the atlas of the font
/// at the text's size.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TextGeometry {
    /// Triangles of the glyph fills and decorations.
    pub vertices: Vec<Vertex>,
    /// Triangles of the glyph outlines and decoration outlines.
    pub outline_vertices: Vec<Vertex>,
    /// Bounds of the text in local space.
    pub bounds: Rect<f32>,
}

struct Spacing {
    whitespace: f32,
    letter: f32,
    line: f32,
}

struct Decorations {
    underline_offset: f32,
    strikethrough_offset: f32,
    thickness: f32,
}

impl Text {
    /// Creates a text with default styling.
    pub fn new(string: impl Into<String>, size: u32) -> Self {
        Self {
            string: string.into(),
            size,
            ..Self::default()
        }
    }

    /// Builds the triangles of the text, rendering any glyph not yet in `font`'s atlas.
    pub fn build<E: FontEngine, T: AtlasTexture>(&self, font: &Font<E, T>) -> TextGeometry {
        let mut geometry = TextGeometry::default();
        if self.string.is_empty() {
            return geometry;
        }

        let size = self.size;
        let bold = self.style.bold;
        let shear = if self.style.italic { ITALIC_SHEAR } else { 0.0 };
        let outline = self.outline_thickness;

        let x_bounds = font.glyph('x' as u32, size, bold, 0.0).bounds;
        let decorations = Decorations {
            underline_offset: font.underline_position(size),
            strikethrough_offset: x_bounds.top + x_bounds.height / 2.0,
            thickness: font.underline_thickness(size),
        };
        let spacing = self.spacing(font);

        let mut x = 0.0_f32;
        let mut y = pixels(size);
        let (mut min_x, mut min_y) = (pixels(size), pixels(size));
        let (mut max_x, mut max_y) = (0.0_f32, 0.0_f32);
        let mut prev = 0_u32;

        for ch in self.string.chars() {
            if ch == '\r' {
                continue;
            }
            let codepoint = u32::from(ch);
            x += font.kerning(prev, codepoint, size, bold);

            if ch == '\n' && prev != u32::from('\n') {
                self.add_decorations(&mut geometry, &decorations, x, y);
            }
            prev = codepoint;

            if matches!(ch, ' ' | '\t' | '\n') {
                min_x = min_x.min(x);
                min_y = min_y.min(y);
                match ch {
                    ' ' => x += spacing.whitespace,
                    '\t' => x += spacing.whitespace * 4.0,
                    _ => {
                        y += spacing.line;
                        x = 0.0;
                    }
                }
                max_x = max_x.max(x);
                max_y = max_y.max(y);
                continue;
            }

            if outline != 0.0 {
                let glyph = font.glyph(codepoint, size, bold, outline);
                add_glyph_quad(
                    &mut geometry.outline_vertices,
                    [x, y],
                    self.outline_color,
                    &glyph,
                    shear,
                );
            }

            let glyph = font.glyph(codepoint, size, bold, 0.0);
            add_glyph_quad(&mut geometry.vertices, [x, y], self.fill_color, &glyph, shear);

            let bounds = glyph.bounds;
            min_x = min_x.min(x + bounds.left - shear * bounds.bottom());
            max_x = max_x.max(x + bounds.right() - shear * bounds.top);
            min_y = min_y.min(y + bounds.top);
            max_y = max_y.max(y + bounds.bottom());

            x += glyph.advance + spacing.letter;
        }

        if outline != 0.0 {
            let inflate = outline.ceil().abs();
            min_x -= inflate;
            max_x += inflate;
            min_y -= inflate;
            max_y += inflate;
        }

        if x > 0.0 {
            self.add_decorations(&mut geometry, &decorations, x, y);
        }

        geometry.bounds = Rect::new(min_x, min_y, max_x - min_x, max_y - min_y);
        geometry
    }

    /// Position of the character at `index`, counted in `char`s, relative to the origin.
    ///
    /// Indices past the end give the position after the last character.
    pub fn find_character_pos<E: FontEngine, T: AtlasTexture>(
        &self,
        font: &Font<E, T>,
        index: usize,
    ) -> [f32; 2] {
        let size = self.size;
        let bold = self.style.bold;
        let spacing = self.spacing(font);

        let (mut x, mut y) = (0.0_f32, 0.0_f32);
        let mut prev = 0_u32;
        for ch in self.string.chars().take(index) {
            let codepoint = u32::from(ch);
            x += font.kerning(prev, codepoint, size, bold);
            prev = codepoint;

            match ch {
                ' ' => x += spacing.whitespace,
                '\t' => x += spacing.whitespace * 4.0,
                '\n' => {
                    y += spacing.line;
                    x = 0.0;
                }
                _ => x += font.glyph(codepoint, size, bold, 0.0).advance + spacing.letter,
            }
        }
        [x, y]
    }

    fn spacing<E: FontEngine, T: AtlasTexture>(&self, font: &Font<E, T>) -> Spacing {
        let space = font.glyph(' ' as u32, self.size, self.style.bold, 0.0).advance;
        let letter = space / 3.0 * (self.letter_spacing - 1.0);
        Spacing {
            whitespace: space + letter,
            letter,
            line: font.line_spacing(self.size) * self.line_spacing,
        }
    }

    fn add_decorations(&self, geometry: &mut TextGeometry, decorations: &Decorations, x: f32, y: f32) {
        let offsets = [
            (self.style.underlined, decorations.underline_offset),
            (self.style.strikethrough, decorations.strikethrough_offset),
        ];
        for (_, offset) in offsets.into_iter().filter(|(enabled, _)| *enabled) {
            add_line(
                &mut geometry.vertices,
                x,
                y,
                self.fill_color,
                offset,
                decorations.thickness,
                0.0,
            );
            if self.outline_thickness != 0.0 {
                add_line(
                    &mut geometry.outline_vertices,
                    x,
                    y,
                    self.outline_color,
                    offset,
                    decorations.thickness,
                    self.outline_thickness,
                );
            }
        }
    }
}

/// Appends a horizontal bar from `0` to `length` sampling the atlas' white block.
fn add_line(
    vertices: &mut Vec<Vertex>,
    length: f32,
    baseline: f32,
    color: Color,
    offset: f32,
    thickness: f32,
    outline: f32,
) {
    let top = (baseline + offset - thickness / 2.0 + 0.5).floor();
    let bottom = top + (thickness + 0.5).floor();

    let (left, right) = (-outline, length + outline);
    let (top, bottom) = (top - outline, bottom + outline);
    let corner = |x, y| Vertex::new(x, y, color, WHITE_TEXEL, WHITE_TEXEL);

    vertices.extend([
        corner(left, top),
        corner(right, top),
        corner(left, bottom),
        corner(left, bottom),
        corner(right, top),
        corner(right, bottom),
    ]);
}

/// Appends the two triangles of a glyph placed on the baseline at `origin`.
fn add_glyph_quad(
    vertices: &mut Vec<Vertex>,
    origin: [f32; 2],
    color: Color,
    glyph: &GlyphRecord,
    shear: f32,
) {
    let [x, y] = origin;
    let bounds = glyph.bounds;
    let left = bounds.left - QUAD_PADDING;
    let top = bounds.top - QUAD_PADDING;
    let right = bounds.right() + QUAD_PADDING;
    let bottom = bounds.bottom() + QUAD_PADDING;

    let rect = glyph.texture_rect;
    let u1 = texel(rect.left) - QUAD_PADDING;
    let v1 = texel(rect.top) - QUAD_PADDING;
    let u2 = texel(rect.right()) + QUAD_PADDING;
    let v2 = texel(rect.bottom()) + QUAD_PADDING;

    vertices.extend([
        Vertex::new(x + left - shear * top, y + top, color, u1, v1),
        Vertex::new(x + right - shear * top, y + top, color, u2, v1),
        Vertex::new(x + left - shear * bottom, y + bottom, color, u1, v2),
        Vertex::new(x + left - shear * bottom, y + bottom, color, u1, v2),
        Vertex::new(x + right - shear * top, y + top, color, u2, v1),
        Vertex::new(x + right - shear * bottom, y + bottom, color, u2, v2),
    ]);
}

fn texel(value: i32) -> f32 {
    value as f32
}

pub(crate) fn pixels(size: u32) -> f32 {
    size as f32
}
