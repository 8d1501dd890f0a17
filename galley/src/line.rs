// Copyright 2024 the Galley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Line assembly: accumulating runs against a width budget.

use smallvec::SmallVec;

use crate::run::{ListItem, Run, RunContent, is_whitespace};
use crate::split;
use crate::style::Alignment;

/// The cause of a line ending.
#[derive(Copy, Clone, Default, PartialEq, Eq, Debug)]
pub enum BreakReason {
    /// End of the paragraph or of the run stream.
    #[default]
    None,
    /// The width budget was exhausted at a legal break point.
    Regular,
    /// A hard newline forced the break.
    Explicit,
    /// Content was force-placed to guarantee progress.
    Emergency,
}

/// One finished, width-fitted line.
///
/// Runs are in visual order when the paragraph was laid out with a
/// direction hint, logical order otherwise. The engine keeps no reference
/// to a returned line.
#[derive(Clone, Debug)]
pub struct Line {
    runs: SmallVec<[Run; 4]>,
    original_width: f32,
    remaining_width: f32,
    alignment: Alignment,
    justified: bool,
    break_reason: BreakReason,
    rtl: bool,
    ascent: f32,
    descent: f32,
    list: Option<ListItem>,
}

impl Line {
    /// The runs on this line, in drawing order.
    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    /// The width the line was fitted to.
    pub fn original_width(&self) -> f32 {
        self.original_width
    }

    /// Width left unused; negative when content was force-placed.
    pub fn remaining_width(&self) -> f32 {
        self.remaining_width
    }

    /// Width consumed by the runs.
    pub fn consumed_width(&self) -> f32 {
        self.original_width - self.remaining_width
    }

    /// The resolved alignment of this line.
    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    /// Whether leftover width should be distributed over the line.
    pub fn is_justified(&self) -> bool {
        self.justified
    }

    /// Why the line ended.
    pub fn break_reason(&self) -> BreakReason {
        self.break_reason
    }

    /// Whether a hard newline ended this line.
    pub fn ends_with_newline(&self) -> bool {
        self.break_reason == BreakReason::Explicit
    }

    /// Whether the paragraph base direction is right-to-left.
    pub fn is_rtl(&self) -> bool {
        self.rtl
    }

    /// Maximum ascent over the line's content.
    pub fn ascent(&self) -> f32 {
        self.ascent
    }

    /// Maximum descent over the line's content.
    pub fn descent(&self) -> f32 {
        self.descent
    }

    /// Total line height.
    pub fn height(&self) -> f32 {
        self.ascent + self.descent
    }

    /// Whether the line carries no runs (an empty paragraph's line).
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// List-item indent and marker, when the line starts a list item.
    pub fn list_item(&self) -> Option<&ListItem> {
        self.list.as_ref()
    }
}

/// Inputs for closing a line, supplied by the paragraph buffer.
pub(crate) struct FinishParams {
    pub(crate) alignment: Alignment,
    pub(crate) rtl: bool,
    /// The line consumed the last character of its paragraph.
    pub(crate) paragraph_end: bool,
    /// The paragraph ended with a hard break and this line reached it.
    pub(crate) explicit_break: bool,
    /// Visual-order replacement runs, when reordering is active.
    pub(crate) runs_override: Option<SmallVec<[Run; 4]>>,
}

/// Accumulates runs into one line.
pub(crate) struct LineAssembler {
    runs: SmallVec<[Run; 4]>,
    original: f32,
    remaining: f32,
    closed: bool,
    break_reason: BreakReason,
    image_ascent: f32,
    list: Option<ListItem>,
    /// Directional layout: tabs degrade to fixed spacers and hyphenation
    /// is disabled, keeping the assembler's accounting identical to the
    /// visual-order reconstruction.
    directional: bool,
}

impl LineAssembler {
    pub(crate) fn new(width: f32, directional: bool) -> Self {
        Self {
            runs: SmallVec::new(),
            original: width,
            remaining: width,
            closed: false,
            break_reason: BreakReason::None,
            image_ascent: 0.0,
            list: None,
            directional,
        }
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.closed
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn break_reason(&self) -> BreakReason {
        self.break_reason
    }

    fn close(&mut self, reason: BreakReason) {
        self.closed = true;
        self.break_reason = reason;
    }

    fn append(&mut self, run: Run) {
        if self.list.is_none() {
            self.list = run.list_item;
        }
        self.runs.push(run);
    }

    /// Adds `run` to the line. Returns the unconsumed part when the line
    /// is out of budget, after which the assembler is closed.
    pub(crate) fn push(&mut self, run: Run) -> Option<Run> {
        if self.closed {
            return Some(run);
        }
        match run.content {
            RunContent::Text(ref s) if s.is_empty() => None,
            RunContent::Text(_) => self.push_text(run),
            RunContent::Tab {
                reserved,
                position,
                newline_on_overflow,
            } => {
                if self.directional {
                    return self.push_atomic(run, reserved, None);
                }
                let x = self.original - self.remaining;
                if x >= position {
                    if newline_on_overflow && !self.is_empty() {
                        self.close(BreakReason::Regular);
                        return Some(run);
                    }
                    // Target already passed: degrade to a fixed spacer so
                    // the cursor still advances.
                    return self.push_atomic(run, reserved, None);
                }
                let advance = position - x;
                self.remaining = self.original - position;
                self.append(Run {
                    content: RunContent::Tab {
                        reserved: advance,
                        position,
                        newline_on_overflow,
                    },
                    ..run
                });
                None
            }
            RunContent::Image { width, height } => self.push_atomic(run, width, Some(height)),
            RunContent::Separator { width } => self.push_atomic(run, width, None),
        }
    }

    /// Places an atomic run whole or returns it unconsumed.
    fn push_atomic(&mut self, run: Run, width: f32, height: Option<f32>) -> Option<Run> {
        if width > self.remaining && !self.is_empty() {
            self.close(BreakReason::Regular);
            return Some(run);
        }
        let oversize = width > self.remaining;
        self.remaining -= width;
        if let Some(h) = height {
            self.image_ascent = self.image_ascent.max(h);
        }
        self.append(run);
        if oversize {
            // Accept the overflow rather than looping on a width nothing
            // can fit.
            self.close(BreakReason::Emergency);
        }
        None
    }

    fn push_text(&mut self, run: Run) -> Option<Run> {
        let out = split::split(&run, self.remaining, !self.directional);
        if out.nothing_fit {
            if self.is_empty() {
                // Not even one character fit and there is nothing to move
                // to the next line: force progress with a character cut.
                let forced = split::truncate(&run, self.remaining);
                self.remaining -= forced.width;
                if !forced.consumed.is_empty() {
                    self.append(forced.consumed);
                }
                self.close(BreakReason::Emergency);
                return forced.remainder;
            }
            self.close(BreakReason::Regular);
            return out.remainder;
        }
        match out.remainder {
            None => {
                let explicit = out.consumed.newline;
                self.remaining -= out.width;
                if !out.consumed.is_empty() {
                    self.append(out.consumed);
                }
                if explicit {
                    self.close(BreakReason::Explicit);
                }
                None
            }
            Some(rest) => {
                let reason = if out.consumed.newline {
                    BreakReason::Explicit
                } else {
                    BreakReason::Regular
                };
                self.remaining -= out.width;
                if !out.consumed.is_empty() {
                    self.append(out.consumed);
                }
                self.close(reason);
                Some(rest)
            }
        }
    }

    /// Closes the line and produces the caller-owned [`Line`].
    pub(crate) fn finish(self, params: FinishParams) -> Line {
        let Self {
            runs,
            original,
            mut remaining,
            closed,
            break_reason,
            image_ascent,
            list,
            directional: _,
        } = self;

        let runs = match params.runs_override {
            Some(visual) => {
                // The reordered runs are rebuilt from the paragraph buffer
                // with trailing whitespace excluded, so the leftover is
                // recomputed from what actually landed on the line.
                remaining = original - visual.iter().map(Run::width).sum::<f32>();
                visual
            }
            None => {
                // The final run must not end in trimmed whitespace.
                let mut runs = runs;
                loop {
                    let Some(last) = runs.last() else { break };
                    let Some(text) = last.text_str() else { break };
                    let trimmed = text.trim_end_matches(is_whitespace);
                    if trimmed.len() == text.len() {
                        break;
                    }
                    let refund: f32 = text[trimmed.len()..]
                        .chars()
                        .map(|c| last.char_advance(c))
                        .sum();
                    let replacement = if trimmed.is_empty() {
                        None
                    } else {
                        let mut run = last.derive_text(trimmed.to_owned());
                        run.newline = last.newline;
                        Some(run)
                    };
                    remaining += refund;
                    match replacement {
                        None => {
                            runs.pop();
                        }
                        Some(run) => {
                            if let Some(slot) = runs.last_mut() {
                                *slot = run;
                            }
                            break;
                        }
                    }
                }
                runs
            }
        };

        let reason = if closed {
            break_reason
        } else if params.explicit_break {
            BreakReason::Explicit
        } else {
            BreakReason::None
        };

        let mut alignment = params.alignment.resolve(params.rtl);
        let mut justified = false;
        if alignment == Alignment::Justified {
            let last = params.paragraph_end || reason == BreakReason::Explicit;
            if last {
                alignment = Alignment::Left;
            } else {
                justified = remaining > 0.0;
            }
        }

        let mut ascent = image_ascent;
        let mut descent = 0.0_f32;
        for run in &runs {
            match run.content {
                RunContent::Image { .. } => {}
                _ => {
                    ascent = ascent.max(run.style.ascent());
                    descent = descent.max(run.style.descent());
                }
            }
        }

        Line {
            runs,
            original_width: original,
            remaining_width: remaining,
            alignment,
            justified,
            break_reason: reason,
            rtl: params.rtl,
            ascent,
            descent,
            list,
        }
    }
}
