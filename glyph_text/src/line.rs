// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single lines of text drawn with a [`FontStack`].

use glyph_atlas::{AtlasTexture, FontEngine, Rect};

use crate::stack::FontStack;
use crate::text::{pixels, Text, TextGeometry, TextStyle};
use crate::vertex::Color;

/// A piece of a line drawn with a single font of the stack.
#[derive(Clone, Debug, PartialEq)]
pub struct Run {
    /// Index of the font in the stack.
    pub font: usize,
    /// The text of the run, styled like its line.
    pub text: Text,
    /// Offset of the run from the line origin.
    pub position: [f32; 2],
    /// The run's geometry, in the run's local space.
    pub geometry: TextGeometry,
}

impl Run {
    /// Bounds of the run in the line's space.
    pub fn bounds(&self) -> Rect<f32> {
        let bounds = self.geometry.bounds;
        Rect::new(
            bounds.left + self.position[0],
            bounds.top + self.position[1],
            bounds.width,
            bounds.height,
        )
    }
}

/// The result of laying out a [`TextLine`] or an [`EllipsisLine`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LineLayout {
    /// The string that was laid out, after any trimming.
    pub text: String,
    /// Runs from left to right.
    pub runs: Vec<Run>,
    /// Union of the bounds of all runs.
    pub bounds: Rect<f32>,
}

impl LineLayout {
    /// Returns true if there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }
}

/// A line of text where every character is drawn by the first font of a stack that has it.
///
/// Consecutive characters resolved to the same font form one [`Run`]; each run starts where
/// the bounds of the previous one end.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TextLine {
    /// The text.
    pub string: String,
    /// Character size in pixels; 0 draws nothing.
    pub size: u32,
    /// Style applied to every run.
    pub style: TextStyle,
    /// Fill color applied to every run.
    pub fill_color: Color,
    /// Outline color applied to every run.
    pub outline_color: Color,
    /// Outline thickness applied to every run.
    pub outline_thickness: f32,
}

impl TextLine {
    /// Creates a white line with no outline.
    pub fn new(string: impl Into<String>, size: u32) -> Self {
        Self {
            string: string.into(),
            size,
            fill_color: Color::WHITE,
            outline_color: Color::BLACK,
            ..Self::default()
        }
    }

    /// Returns true if the line has a size and some text.
    pub fn is_drawn(&self) -> bool {
        self.size != 0 && !self.string.is_empty()
    }

    /// Splits the line into runs and builds their geometry.
    pub fn layout<E: FontEngine, T: AtlasTexture>(&self, stack: &FontStack<E, T>) -> LineLayout {
        self.layout_string(stack, &self.string)
    }

    fn layout_string<E: FontEngine, T: AtlasTexture>(
        &self,
        stack: &FontStack<E, T>,
        string: &str,
    ) -> LineLayout {
        let mut layout = LineLayout {
            text: string.to_owned(),
            ..LineLayout::default()
        };
        if !self.is_drawn() {
            return layout;
        }
        if !stack.is_valid() {
            log::error!("laying out a text line with an empty font stack");
            return layout;
        }

        let mut segments: Vec<(usize, String)> = Vec::new();
        for ch in string.chars() {
            let Some(font) = stack.find_index_for_glyph(u32::from(ch)) else {
                continue;
            };
            match segments.last_mut() {
                Some((last, text)) if *last == font => text.push(ch),
                _ => segments.push((font, ch.to_string())),
            }
        }

        let mut x = 0.0;
        for (font, string) in segments {
            let Some(face) = stack.fonts().get(font) else {
                continue;
            };
            let text = self.run_text(string);
            let geometry = text.build(face);
            let position = [x, 0.0];
            x += geometry.bounds.width;
            layout.runs.push(Run {
                font,
                text,
                position,
                geometry,
            });
        }

        layout.bounds = layout
            .runs
            .iter()
            .fold(Rect::default(), |bounds, run| bounds.union(&run.bounds()));
        layout
    }

    fn run_text(&self, string: String) -> Text {
        Text {
            string,
            size: self.size,
            style: self.style,
            fill_color: self.fill_color,
            outline_color: self.outline_color,
            outline_thickness: self.outline_thickness,
            ..Text::default()
        }
    }
}

/// A [`TextLine`] that drops characters from its end and appends `...` until it fits.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EllipsisLine {
    /// The full line.
    pub line: TextLine,
    /// Maximum width in pixels; 0 disables trimming.
    pub max_width: u32,
}

impl EllipsisLine {
    /// Wraps `line`, limiting it to `max_width` pixels.
    pub fn new(line: TextLine, max_width: u32) -> Self {
        Self { line, max_width }
    }

    /// Lays out the longest prefix of the line that fits, followed by `...`.
    ///
    /// The untrimmed line is used when it already fits. When not even `...` fits, the layout
    /// is empty and an error is logged.
    pub fn layout<E: FontEngine, T: AtlasTexture>(&self, stack: &FontStack<E, T>) -> LineLayout {
        let mut layout = self.line.layout(stack);
        if self.max_width == 0 || !self.line.is_drawn() {
            return layout;
        }

        let max_width = pixels(self.max_width);
        let mut kept = self.line.string.clone();
        while layout.bounds.width > max_width {
            if kept.pop().is_none() {
                log::error!("ellipsis can't fit any text into {} pixels", self.max_width);
                return self.line.layout_string(stack, "");
            }
            layout = self.line.layout_string(stack, &format!("{kept}..."));
        }
        layout
    }
}
