// Copyright 2024 the Galley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The paragraph buffer: pulling runs from the input stream, preparing
//! one paragraph at a time, and emitting width-fitted lines.
//!
//! One paragraph is flattened into parallel arrays: the characters, a
//! side table with the owning run of each character, and (under a
//! direction hint) embedding levels and a visual index permutation. A
//! cursor tracks how much of the stream has been buffered and how much
//! of the buffer has been emitted. Every `next_line` call snapshots the
//! minimal state first, so a speculative fit can be undone with
//! `revert`.

use smallvec::SmallVec;

use crate::analysis::arabic::{self, DigitSet, DigitShaping};
use crate::analysis::bidi::{self, Direction};
use crate::analysis::mirror;
use crate::error::Error;
use crate::line::{FinishParams, Line, LineAssembler};
use crate::run::{OBJECT_REPLACEMENT, Run, RunContent, is_whitespace};
use crate::style::Alignment;

/// Per-session layout options.
#[derive(Clone, Debug, Default)]
pub struct Options {
    /// Paragraph direction hint; `None` lays out in logical order with no
    /// directional processing at all.
    pub direction: Option<Direction>,
    /// Digit substitution applied before level computation.
    pub digits: DigitShaping,
    /// Which Arabic-Indic digit block substitution targets.
    pub digit_set: DigitSet,
    /// Alignment recorded on produced lines.
    pub alignment: Alignment,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum State {
    Empty,
    Accumulating,
    Ready,
    Exhausted,
}

/// Emission position in the buffer plus consumption position in the
/// input stream.
#[derive(Copy, Clone, Debug, Default)]
struct Cursor {
    /// Next buffer character to emit.
    current: usize,
    /// Next input run to pull from.
    source_run: usize,
    /// Next character within that run.
    source_char: usize,
}

#[derive(Clone, Debug)]
struct BufferSnapshot {
    text: Vec<char>,
    owners: Vec<u32>,
    levels: Vec<u8>,
    visual: Vec<u32>,
}

/// Snapshot taken at the top of every `next_line` call.
///
/// The arrays are copied only while the cursor is inside the buffered
/// paragraph; once it has passed the buffered end the paragraph can be
/// re-derived from the source cursor, so the snapshot stays shallow.
#[derive(Clone, Debug)]
struct Checkpoint {
    cursor: Cursor,
    state: State,
    base_rtl: bool,
    ended_newline: bool,
    buffer: Option<BufferSnapshot>,
}

/// Composes a stream of styled runs into lines, one call at a time.
///
/// A typesetter is single-threaded and owned by one layout session.
/// Cloning produces an independent copy with identical buffered state
/// and no shared mutable arrays, which is the supported way to explore
/// several layouts in parallel.
#[derive(Clone, Debug)]
pub struct Typesetter {
    source: Vec<Run>,
    options: Options,
    pub(crate) text: Vec<char>,
    pub(crate) owners: Vec<u32>,
    pub(crate) levels: Vec<u8>,
    pub(crate) visual: Vec<u32>,
    base_rtl: bool,
    ended_newline: bool,
    cursor: Cursor,
    state: State,
    prev: Option<Checkpoint>,
}

impl Typesetter {
    /// Creates a typesetter over `runs`.
    ///
    /// Fails fast on an empty stream or a style the width collaborator
    /// cannot service. Malformed tab and atomic-element attributes are
    /// repaired with safe defaults instead.
    pub fn new(runs: Vec<Run>, options: Options) -> Result<Self, Error> {
        if runs.is_empty() {
            return Err(Error::EmptySource);
        }
        let mut source = runs;
        for (i, run) in source.iter_mut().enumerate() {
            if !run.style.is_valid() {
                return Err(Error::InvalidStyle(i));
            }
            sanitize(i, &mut run.content);
        }
        Ok(Self {
            source,
            options,
            text: Vec::new(),
            owners: Vec::new(),
            levels: Vec::new(),
            visual: Vec::new(),
            base_rtl: false,
            ended_newline: false,
            cursor: Cursor::default(),
            state: State::Empty,
            prev: None,
        })
    }

    /// Whether the input stream and the buffer are both exhausted.
    pub fn is_exhausted(&self) -> bool {
        self.state == State::Exhausted
    }

    /// Produces the next line fitted to `width`, or `None` at the end of
    /// the stream.
    pub fn next_line(&mut self, width: f32) -> Result<Option<Line>, Error> {
        if !width.is_finite() || width <= 0.0 {
            return Err(Error::InvalidWidth(width));
        }
        self.prev = Some(self.snapshot());
        if self.state == State::Exhausted {
            return Ok(None);
        }
        if self.cursor.current >= self.text.len() {
            if !self.accumulate() {
                self.state = State::Exhausted;
                return Ok(None);
            }
            self.prepare();
        }

        let directional = self.options.direction.is_some();

        // An empty-after-trim paragraph still produces exactly one line.
        if self.text.is_empty() {
            let asm = LineAssembler::new(width, directional);
            return Ok(Some(asm.finish(FinishParams {
                alignment: self.options.alignment,
                rtl: self.base_rtl,
                paragraph_end: true,
                explicit_break: self.ended_newline,
                runs_override: None,
            })));
        }

        let start = self.cursor.current;
        let mut asm = LineAssembler::new(width, directional);
        while self.cursor.current < self.text.len() && !asm.is_closed() {
            let (slice, span) = self.next_slice();
            match asm.push(slice) {
                None => self.cursor.current += span,
                Some(rest) => {
                    let consumed = span - rest.char_count().min(span);
                    self.cursor.current += consumed;
                }
            }
        }
        debug_assert!(self.cursor.current > start, "line made no progress");

        let end = self.cursor.current;
        let paragraph_end = end >= self.text.len();
        let runs_override = directional.then(|| {
            let mut vis_end = end;
            while vis_end > start && is_whitespace(self.text[vis_end - 1]) {
                vis_end -= 1;
            }
            bidi::reorder(&self.levels, &mut self.visual[start..vis_end]);
            self.visual_runs(start, vis_end)
        });

        let line = asm.finish(FinishParams {
            alignment: self.options.alignment,
            rtl: self.base_rtl,
            paragraph_end,
            explicit_break: paragraph_end && self.ended_newline,
            runs_override,
        });
        self.retrim();
        Ok(Some(line))
    }

    /// Undoes the most recent `next_line` call, restoring the cursor and
    /// buffer so the same content can be retried at a different width.
    /// Returns `false` when there is nothing to revert.
    pub fn revert(&mut self) -> bool {
        match self.prev.take() {
            Some(checkpoint) => {
                self.apply(checkpoint);
                true
            }
            None => false,
        }
    }

    fn snapshot(&self) -> Checkpoint {
        let buffer = (self.cursor.current < self.text.len()).then(|| BufferSnapshot {
            text: self.text.clone(),
            owners: self.owners.clone(),
            levels: self.levels.clone(),
            visual: self.visual.clone(),
        });
        Checkpoint {
            cursor: self.cursor,
            state: self.state,
            base_rtl: self.base_rtl,
            ended_newline: self.ended_newline,
            buffer,
        }
    }

    fn apply(&mut self, checkpoint: Checkpoint) {
        self.state = checkpoint.state;
        self.base_rtl = checkpoint.base_rtl;
        self.ended_newline = checkpoint.ended_newline;
        self.cursor = checkpoint.cursor;
        match checkpoint.buffer {
            Some(buffer) => {
                self.text = buffer.text;
                self.owners = buffer.owners;
                self.levels = buffer.levels;
                self.visual = buffer.visual;
            }
            None => {
                // The paragraph had been fully emitted when the snapshot
                // was taken; anything buffered since is re-derived from
                // the source cursor.
                self.text.clear();
                self.owners.clear();
                self.levels.clear();
                self.visual.clear();
                self.cursor.current = 0;
            }
        }
    }

    /// Pulls runs from the input stream into the paragraph buffer until a
    /// hard break or the end of the stream. Returns `false` when the
    /// stream was already exhausted.
    fn accumulate(&mut self) -> bool {
        self.state = State::Accumulating;
        self.text.clear();
        self.owners.clear();
        self.levels.clear();
        self.visual.clear();
        self.ended_newline = false;
        self.base_rtl = false;
        self.cursor.current = 0;

        let mut pulled = false;
        // Set when a paragraph ended on '\r' as the last character of a
        // run; the matching '\n' may open the next run.
        let mut pending_cr = false;
        while self.cursor.source_run < self.source.len() {
            let idx = self.cursor.source_run;
            let RunContent::Text(s) = &self.source[idx].content else {
                if pending_cr {
                    break;
                }
                self.text.push(OBJECT_REPLACEMENT);
                self.owners.push(idx as u32);
                pulled = true;
                self.cursor.source_run += 1;
                self.cursor.source_char = 0;
                continue;
            };
            let chars: Vec<char> = s.chars().collect();

            if pending_cr {
                // CRLF split across two runs still counts as one break.
                if chars.get(self.cursor.source_char) == Some(&'\n') {
                    self.cursor.source_char += 1;
                    if self.cursor.source_char >= chars.len() {
                        self.cursor.source_run += 1;
                        self.cursor.source_char = 0;
                    }
                }
                break;
            }

            let mut broke = false;
            while self.cursor.source_char < chars.len() {
                let c = chars[self.cursor.source_char];
                self.cursor.source_char += 1;
                match c {
                    '\r' => {
                        pulled = true;
                        self.ended_newline = true;
                        if self.cursor.source_char < chars.len() {
                            if chars[self.cursor.source_char] == '\n' {
                                self.cursor.source_char += 1;
                            }
                            broke = true;
                        } else {
                            pending_cr = true;
                        }
                        break;
                    }
                    '\n' => {
                        pulled = true;
                        self.ended_newline = true;
                        broke = true;
                        break;
                    }
                    c if (c as u32) < 0x20 && c != '\t' => {
                        // Unknown control characters are non-printing;
                        // dropping them beats aborting the paragraph.
                        tracing::debug!(codepoint = c as u32, "dropping control character");
                    }
                    c => {
                        self.text.push(c);
                        self.owners.push(idx as u32);
                        pulled = true;
                    }
                }
            }
            if self.cursor.source_char >= chars.len() {
                self.cursor.source_run += 1;
                self.cursor.source_char = 0;
            }
            if broke {
                break;
            }
        }

        if !pulled {
            self.state = State::Empty;
            return false;
        }

        while self.text.last().is_some_and(|&c| is_whitespace(c)) {
            self.text.pop();
            self.owners.pop();
        }
        true
    }

    /// Accumulated paragraph to ready: digit shaping, levels, identity
    /// visual table, Arabic ligaturization, then mirroring at odd levels.
    fn prepare(&mut self) {
        self.state = State::Ready;
        let Some(direction) = self.options.direction else {
            return;
        };
        self.base_rtl = direction == Direction::Rtl;
        if self.text.is_empty() {
            return;
        }

        arabic::shape_digits(&mut self.text, self.options.digits, self.options.digit_set);

        let flat: String = self.text.iter().collect();
        let (levels, base) = bidi::levels(&flat, direction);
        self.levels = levels;
        self.base_rtl = base & 1 == 1;
        self.visual = (0..self.text.len() as u32).collect();

        if arabic::needs_shaping(&self.text) {
            match arabic::ligaturize(&self.text, &self.owners, &self.levels) {
                Ok((text, owners, levels)) => {
                    if text.len() != self.text.len() {
                        self.visual = (0..text.len() as u32).collect();
                    }
                    self.text = text;
                    self.owners = owners;
                    self.levels = levels;
                }
                Err(err) => {
                    // One paragraph's shaping failure must not abort the
                    // document; the unshaped text is emitted instead.
                    tracing::warn!(%err, "arabic shaping failed, emitting unshaped text");
                }
            }
        }

        for i in 0..self.text.len() {
            if self.levels[i] & 1 == 1 {
                if let Some(partner) = mirror::mirrored(self.text[i]) {
                    self.text[i] = partner;
                }
            }
        }
    }

    /// The maximal span of buffered characters sharing one owning run,
    /// starting at the cursor, as a run the assembler can consume.
    fn next_slice(&self) -> (Run, usize) {
        let i = self.cursor.current;
        let owner = self.owners[i] as usize;
        let src = &self.source[owner];
        if src.is_atomic() {
            return (src.clone(), 1);
        }
        let mut j = i;
        while j < self.text.len() && self.owners[j] as usize == owner {
            j += 1;
        }
        let slice: String = self.text[i..j].iter().collect();
        let starts_owner = i == 0 || self.owners[i - 1] as usize != owner;
        let run = if starts_owner {
            src.derive_text(slice)
        } else {
            // Continuation slices of a list run do not repeat the marker.
            src.derive_text_plain(slice)
        };
        (run, j - i)
    }

    /// Rebuilds the emitted range in visual order, grouping consecutive
    /// visual positions by owning run.
    fn visual_runs(&self, start: usize, end: usize) -> SmallVec<[Run; 4]> {
        let mut out = SmallVec::new();
        let mut p = start;
        while p < end {
            let logical = self.visual[p] as usize;
            let owner = self.owners[logical] as usize;
            let src = &self.source[owner];
            if src.is_atomic() {
                out.push(src.clone());
                p += 1;
                continue;
            }
            let mut slice = String::new();
            while p < end {
                let logical = self.visual[p] as usize;
                if self.owners[logical] as usize != owner {
                    break;
                }
                slice.push(self.text[logical]);
                p += 1;
            }
            out.push(src.derive_text_plain(slice));
        }
        out
    }

    /// Skips whitespace at the cursor so the next line starts on content.
    fn retrim(&mut self) {
        while self.cursor.current < self.text.len() && is_whitespace(self.text[self.cursor.current])
        {
            self.cursor.current += 1;
        }
    }
}

/// Repairs malformed run attributes with safe defaults.
fn sanitize(index: usize, content: &mut RunContent) {
    let mut fix = |attribute: &str, value: &mut f32| {
        if !value.is_finite() || *value < 0.0 {
            tracing::debug!(index, attribute, "replacing invalid run attribute with zero");
            *value = 0.0;
        }
    };
    match content {
        RunContent::Text(_) => {}
        RunContent::Tab {
            reserved, position, ..
        } => {
            fix("reserved", reserved);
            fix("position", position);
        }
        RunContent::Image { width, height } => {
            fix("width", width);
            fix("height", height);
        }
        RunContent::Separator { width } => {
            fix("width", width);
        }
    }
}

