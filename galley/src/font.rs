// Copyright 2024 the Galley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collaborator traits consumed by the engine.
//!
//! Font metrics, hyphenation and split legality are all external concerns:
//! the engine queries them through these seams and never computes them
//! itself. Implementations must be pure, cheap and synchronous.

/// Per-character metrics for a font at a given size.
///
/// Widths are expected in the same units as line widths (typically points).
pub trait FontMetrics {
    /// The horizontal advance of `c` at `size`.
    fn advance(&self, c: char, size: f32) -> f32;

    /// Typographic ascent above the baseline at `size`.
    fn ascent(&self, size: f32) -> f32;

    /// Typographic descent below the baseline at `size`, as a positive
    /// distance.
    fn descent(&self, size: f32) -> f32;
}

/// The two halves of a hyphenated word.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hyphenation {
    /// The part kept on the current line, including its trailing hyphen.
    pub fore: String,
    /// The part carried to the next line.
    pub aft: String,
}

/// Breaks a single word so that a prefix fits a remaining width.
pub trait Hyphenator {
    /// Attempts to hyphenate `word` so that the fore part, measured with
    /// `font` at `size`, fits within `available`. Returns `None` when no
    /// acceptable break exists.
    fn hyphenate(
        &self,
        word: &str,
        font: &dyn FontMetrics,
        size: f32,
        available: f32,
    ) -> Option<Hyphenation>;
}

/// Decides whether a line may legally break after a character.
///
/// Attached per run; runs without one use the built-in default, which
/// breaks after whitespace, hyphens and CJK ideographs.
pub trait SplitPredicate {
    /// Returns `true` if a line may end after `c`.
    fn is_split_char(&self, c: char) -> bool;
}
