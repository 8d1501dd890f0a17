// Copyright 2024 the Galley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::fmt;
use std::sync::Arc;

use crate::font::{FontMetrics, Hyphenator, SplitPredicate};

/// Visual and measurement properties shared by every character of a run.
///
/// A style is cheap to clone; the font handle and optional collaborators
/// are reference counted.
#[derive(Clone)]
pub struct Style {
    pub(crate) font: Arc<dyn FontMetrics>,
    pub(crate) size: f32,
    pub(crate) char_spacing: f32,
    pub(crate) hyphenator: Option<Arc<dyn Hyphenator>>,
    pub(crate) splitter: Option<Arc<dyn SplitPredicate>>,
}

impl Style {
    /// Creates a style for `font` at `size`.
    pub fn new(font: Arc<dyn FontMetrics>, size: f32) -> Self {
        Self {
            font,
            size,
            char_spacing: 0.0,
            hyphenator: None,
            splitter: None,
        }
    }

    /// Sets additional spacing added to every character advance.
    pub fn with_char_spacing(mut self, spacing: f32) -> Self {
        self.char_spacing = spacing;
        self
    }

    /// Attaches a hyphenation collaborator.
    pub fn with_hyphenator(mut self, hyphenator: Arc<dyn Hyphenator>) -> Self {
        self.hyphenator = Some(hyphenator);
        self
    }

    /// Attaches a custom split-legality predicate.
    pub fn with_split_predicate(mut self, splitter: Arc<dyn SplitPredicate>) -> Self {
        self.splitter = Some(splitter);
        self
    }

    /// The font metrics handle.
    pub fn font(&self) -> &dyn FontMetrics {
        &*self.font
    }

    /// The font size.
    pub fn size(&self) -> f32 {
        self.size
    }

    pub(crate) fn advance(&self, c: char) -> f32 {
        self.font.advance(c, self.size) + self.char_spacing
    }

    pub(crate) fn ascent(&self) -> f32 {
        self.font.ascent(self.size)
    }

    pub(crate) fn descent(&self) -> f32 {
        self.font.descent(self.size)
    }

    pub(crate) fn is_valid(&self) -> bool {
        self.size.is_finite() && self.size > 0.0 && self.char_spacing.is_finite()
    }
}

impl fmt::Debug for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Style")
            .field("size", &self.size)
            .field("char_spacing", &self.char_spacing)
            .field("hyphenator", &self.hyphenator.is_some())
            .field("splitter", &self.splitter.is_some())
            .finish_non_exhaustive()
    }
}

/// Horizontal alignment of a line within its column.
#[derive(Copy, Clone, Default, Debug, PartialEq, Eq)]
pub enum Alignment {
    /// [`Alignment::Left`] for LTR text and [`Alignment::Right`] for RTL text.
    #[default]
    Start,
    /// [`Alignment::Right`] for LTR text and [`Alignment::Left`] for RTL text.
    End,
    /// Align content to the left edge.
    Left,
    /// Align each line centered within the column.
    Middle,
    /// Align content to the right edge.
    Right,
    /// Justify each line by spacing out content, except for the last line.
    Justified,
}

impl Alignment {
    /// Resolves direction-relative variants against the line direction.
    pub(crate) fn resolve(self, rtl: bool) -> Self {
        match self {
            Self::Start => {
                if rtl {
                    Self::Right
                } else {
                    Self::Left
                }
            }
            Self::End => {
                if rtl {
                    Self::Left
                } else {
                    Self::Right
                }
            }
            other => other,
        }
    }
}
