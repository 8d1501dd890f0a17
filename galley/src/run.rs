// Copyright 2024 the Galley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Styled runs, the unit of input to the engine.

use crate::style::Style;

/// Placeholder stored in the paragraph buffer for atomic runs.
pub(crate) const OBJECT_REPLACEMENT: char = '\u{FFFC}';

/// The content carried by a [`Run`].
///
/// Non-text kinds are atomic: they are measured and placed as a whole and
/// never split at character level.
#[derive(Clone, Debug)]
pub enum RunContent {
    /// A span of text sharing one style.
    Text(String),
    /// A horizontal tab.
    Tab {
        /// Advance reserved when the tab cannot reach its target position.
        reserved: f32,
        /// Absolute x position the tab advances to.
        position: f32,
        /// Close the line instead of degrading when the target has already
        /// been passed.
        newline_on_overflow: bool,
    },
    /// An inline image.
    Image {
        /// Image width.
        width: f32,
        /// Image height; raises the line if taller than the current ascent.
        height: f32,
    },
    /// A fixed-width separator (for example a leader in a table of
    /// contents).
    Separator {
        /// Separator width.
        width: f32,
    },
}

/// Marks a run as the start of a list item.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ListItem {
    /// Extra left indent applied to the line.
    pub indent: f32,
    /// The marker glyph drawn in the indent.
    pub marker: char,
}

/// An immutable piece of content with a fixed style.
#[derive(Clone, Debug)]
pub struct Run {
    pub(crate) content: RunContent,
    pub(crate) style: Style,
    pub(crate) newline: bool,
    pub(crate) list_item: Option<ListItem>,
}

impl Run {
    /// Creates a text run.
    pub fn text(text: impl Into<String>, style: Style) -> Self {
        Self {
            content: RunContent::Text(text.into()),
            style,
            newline: false,
            list_item: None,
        }
    }

    /// Creates a tab run.
    pub fn tab(style: Style, reserved: f32, position: f32, newline_on_overflow: bool) -> Self {
        Self {
            content: RunContent::Tab {
                reserved,
                position,
                newline_on_overflow,
            },
            style,
            newline: false,
            list_item: None,
        }
    }

    /// Creates an inline image run.
    pub fn image(style: Style, width: f32, height: f32) -> Self {
        Self {
            content: RunContent::Image { width, height },
            style,
            newline: false,
            list_item: None,
        }
    }

    /// Creates a separator run.
    pub fn separator(style: Style, width: f32) -> Self {
        Self {
            content: RunContent::Separator { width },
            style,
            newline: false,
            list_item: None,
        }
    }

    /// Marks this run as the start of a list item.
    pub fn with_list_item(mut self, item: ListItem) -> Self {
        self.list_item = Some(item);
        self
    }

    /// The run content.
    pub fn content(&self) -> &RunContent {
        &self.content
    }

    /// The run style.
    pub fn style(&self) -> &Style {
        &self.style
    }

    /// The text of a text run, or `None` for atomic runs.
    pub fn text_str(&self) -> Option<&str> {
        match &self.content {
            RunContent::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Whether a newline marker forced the break that produced this run.
    pub fn newline_forced(&self) -> bool {
        self.newline
    }

    /// The list-item attachment, if any.
    pub fn list_item(&self) -> Option<&ListItem> {
        self.list_item.as_ref()
    }

    /// Whether this run is an atomic (non-text) element.
    pub fn is_atomic(&self) -> bool {
        !matches!(self.content, RunContent::Text(_))
    }

    /// Whether this run carries no content at all.
    pub fn is_empty(&self) -> bool {
        matches!(&self.content, RunContent::Text(s) if s.is_empty())
    }

    /// The total advance of this run.
    pub fn width(&self) -> f32 {
        match &self.content {
            RunContent::Text(s) => s.chars().map(|c| self.style.advance(c)).sum(),
            RunContent::Tab { reserved, .. } => *reserved,
            RunContent::Image { width, .. } => *width,
            RunContent::Separator { width } => *width,
        }
    }

    /// Characters this run occupies in the paragraph buffer: the text
    /// length for text runs, one placeholder for atomic runs.
    pub(crate) fn char_count(&self) -> usize {
        match &self.content {
            RunContent::Text(s) => s.chars().count(),
            _ => 1,
        }
    }

    pub(crate) fn char_advance(&self, c: char) -> f32 {
        self.style.advance(c)
    }

    pub(crate) fn is_split_char(&self, c: char) -> bool {
        match &self.style.splitter {
            Some(p) => p.is_split_char(c),
            None => default_split_char(c),
        }
    }

    /// A run with the same style and attachments but different text.
    pub(crate) fn derive_text(&self, text: String) -> Self {
        Self {
            content: RunContent::Text(text),
            style: self.style.clone(),
            newline: false,
            list_item: self.list_item,
        }
    }

    /// Like [`Self::derive_text`] but without the list attachment, for
    /// continuation slices of a list run.
    pub(crate) fn derive_text_plain(&self, text: String) -> Self {
        Self {
            content: RunContent::Text(text),
            style: self.style.clone(),
            newline: false,
            list_item: None,
        }
    }
}

/// Whitespace for trimming and break purposes: space and everything below
/// it, matching the measurement convention of the surrounding PDF stack.
pub(crate) fn is_whitespace(c: char) -> bool {
    c <= ' '
}

/// The built-in split predicate: whitespace, hyphens, and scripts that
/// break between any two characters.
pub(crate) fn default_split_char(c: char) -> bool {
    if c <= ' ' || c == '-' || c == '\u{2010}' {
        return true;
    }
    matches!(c as u32,
        0x2E80..=0xD7A3 // CJK radicals through Hangul syllables
        | 0xF900..=0xFAFF // CJK compatibility ideographs
        | 0xFE30..=0xFE4F // CJK compatibility forms
    )
}
