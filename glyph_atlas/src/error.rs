// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Rich error type for font loading and glyph resolution.
///
/// Carries a non-exhaustive [`ErrorKind`] plus whatever context was known at the point of
/// failure: the codepoint and pixel size of the glyph request, and a free-form detail string
/// (a file path, the message of an underlying I/O error, the list of available sizes).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    /// The non-exhaustive category describing this error.
    kind: ErrorKind,

    /// The codepoint being resolved, for per-glyph failures.
    codepoint: Option<u32>,

    /// The requested pixel size, for size and per-glyph failures.
    size: Option<u32>,

    /// Extra human-readable context.
    detail: Option<String>,
}

impl Error {
    /// Creates an error of the given kind with no context attached.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            codepoint: None,
            size: None,
            detail: None,
        }
    }

    /// The machine-readable category for this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The codepoint whose resolution failed, if this is a per-glyph error.
    pub fn codepoint(&self) -> Option<u32> {
        self.codepoint
    }

    /// The pixel size involved in the failure, if known.
    pub fn size(&self) -> Option<u32> {
        self.size
    }

    /// Extra detail, if any.
    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    /// Attaches the codepoint of the failing request.
    #[must_use]
    pub fn with_codepoint(mut self, codepoint: u32) -> Self {
        self.codepoint = Some(codepoint);
        self
    }

    /// Attaches the pixel size of the failing request.
    #[must_use]
    pub fn with_size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    /// Attaches a free-form detail string.
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub(crate) fn io(err: &std::io::Error) -> Self {
        Self::new(ErrorKind::Io).with_detail(err.to_string())
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let what = match self.kind {
            ErrorKind::EngineInit => "failed to initialize the font engine",
            ErrorKind::FaceOpen => "failed to open font face",
            ErrorKind::Charmap => "font has no Unicode character map",
            ErrorKind::SizeSelection => "can't set font size",
            ErrorKind::GlyphLoad => "can't load glyph",
            ErrorKind::Rasterize => "can't rasterize glyph",
            ErrorKind::OutlineUnavailable => "failed to outline bitmap glyph",
            ErrorKind::AtlasExhausted => "atlas texture can't grow any further",
            ErrorKind::Io => "failed to read font data",
        };
        f.write_str(what)?;
        if let Some(codepoint) = self.codepoint {
            write!(f, " for U+{codepoint:04X}")?;
        }
        if let Some(size) = self.size {
            write!(f, " at {size}px")?;
        }
        if let Some(detail) = &self.detail {
            write!(f, ": {detail}")?;
        }
        Ok(())
    }
}

impl core::error::Error for Error {}

/// The non-exhaustive category of an error.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The font engine could not be set up.
    EngineInit,

    /// The font data could not be parsed as a font face.
    FaceOpen,

    /// The face has no usable Unicode character map.
    Charmap,

    /// The requested pixel size is not available on a non-scalable face.
    SizeSelection,

    /// The engine failed to load the glyph.
    GlyphLoad,

    /// The engine failed to turn the glyph into a bitmap.
    Rasterize,

    /// An outline thickness was requested for a glyph that only has a bitmap.
    ///
    /// The filled glyph is still rendered.
    OutlineUnavailable,

    /// Growing the atlas texture would exceed the maximum texture size.
    AtlasExhausted,

    /// Reading font data from a file or stream failed.
    Io,
}
