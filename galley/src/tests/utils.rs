// Copyright 2024 the Galley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::sync::Arc;

use crate::{
    FontMetrics, Hyphenation, Hyphenator, Line, Options, Run, Style, Typesetter,
};

/// Every character is `size` wide, so width arithmetic in tests is exact:
/// at the default size of 10.0, one character is 10 units.
pub(crate) struct FixedFont;

impl FontMetrics for FixedFont {
    fn advance(&self, _c: char, size: f32) -> f32 {
        size
    }

    fn ascent(&self, size: f32) -> f32 {
        size * 0.8
    }

    fn descent(&self, size: f32) -> f32 {
        size * 0.2
    }
}

pub(crate) fn style() -> Style {
    Style::new(Arc::new(FixedFont), 10.0)
}

pub(crate) fn text_run(text: &str) -> Run {
    Run::text(text, style())
}

pub(crate) fn typesetter(runs: Vec<Run>) -> Typesetter {
    Typesetter::new(runs, Options::default()).unwrap()
}

pub(crate) fn typesetter_with(runs: Vec<Run>, options: Options) -> Typesetter {
    Typesetter::new(runs, options).unwrap()
}

/// Concatenated text of a line's runs, in run order.
pub(crate) fn line_text(line: &Line) -> String {
    line.runs()
        .iter()
        .filter_map(|run| run.text_str())
        .collect()
}

/// Drains the typesetter at a constant width. Panics if the engine fails
/// to terminate in a reasonable number of lines.
pub(crate) fn collect_lines(typesetter: &mut Typesetter, width: f32) -> Vec<Line> {
    let mut lines = Vec::new();
    while let Some(line) = typesetter.next_line(width).unwrap() {
        lines.push(line);
        assert!(lines.len() < 1000, "layout failed to terminate");
    }
    lines
}

/// Always proposes the same two halves, as long as the fore part fits.
pub(crate) struct StaticHyphenator {
    pub(crate) fore: &'static str,
    pub(crate) aft: &'static str,
}

impl Hyphenator for StaticHyphenator {
    fn hyphenate(
        &self,
        _word: &str,
        font: &dyn FontMetrics,
        size: f32,
        available: f32,
    ) -> Option<Hyphenation> {
        let fore_width: f32 = self.fore.chars().map(|c| font.advance(c, size)).sum();
        (fore_width <= available).then(|| Hyphenation {
            fore: self.fore.to_owned(),
            aft: self.aft.to_owned(),
        })
    }
}
