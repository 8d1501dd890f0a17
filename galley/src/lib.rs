// Copyright 2024 the Galley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Paragraph composition for PDF text layout.
//!
//! Galley takes an ordered stream of styled runs and produces finished,
//! width-fitted, direction-correct lines, one [`Typesetter::next_line`]
//! call at a time. It handles bidirectional reordering of mixed
//! Hebrew/Arabic/Latin text, Arabic contextual shaping and digit
//! substitution, mirroring of paired punctuation, greedy line breaking
//! with script-aware split points, optional hyphenation and tab stops,
//! with checkpoint/revert semantics so a tentative line that does not
//! fit can be undone.
//!
//! Font metrics, hyphenation dictionaries and the PDF document model are
//! external: the engine consumes them through the traits in [`font`].
//!
//! ```
//! use std::sync::Arc;
//! use galley::{FontMetrics, Options, Run, Style, Typesetter};
//!
//! struct Mono;
//! impl FontMetrics for Mono {
//!     fn advance(&self, _c: char, size: f32) -> f32 {
//!         size * 0.6
//!     }
//!     fn ascent(&self, size: f32) -> f32 {
//!         size * 0.8
//!     }
//!     fn descent(&self, size: f32) -> f32 {
//!         size * 0.2
//!     }
//! }
//!
//! let style = Style::new(Arc::new(Mono), 12.0);
//! let runs = vec![Run::text("hamburgefonstiv, set ragged right", style)];
//! let mut typesetter = Typesetter::new(runs, Options::default()).unwrap();
//! while let Some(line) = typesetter.next_line(120.0).unwrap() {
//!     assert!(line.consumed_width() <= 120.0);
//! }
//! ```

mod analysis;
mod error;
pub mod font;
mod line;
mod paragraph;
mod run;
mod split;
mod style;

#[cfg(test)]
mod tests;

pub use analysis::{DigitSet, DigitShaping, Direction};
pub use error::Error;
pub use font::{FontMetrics, Hyphenation, Hyphenator, SplitPredicate};
pub use line::{BreakReason, Line};
pub use paragraph::{Options, Typesetter};
pub use run::{ListItem, Run, RunContent};
pub use split::{split_run, truncate_run};
pub use style::{Alignment, Style};
