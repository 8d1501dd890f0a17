// Copyright 2024 the Galley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Splitting a single text run against a width budget.
//!
//! `split` walks the run character by character, remembering the most
//! recent legal break candidates, and cuts the run when the budget is
//! exceeded. `truncate` is the simpler sibling used when nothing on the
//! line has fitted yet: it cuts at the width limit without consulting
//! break candidates and always makes progress.

use crate::run::{Run, is_whitespace};

/// Splits a standalone run against a width budget: `(consumed,
/// remainder)`. This is the assembler's splitter exposed for
/// collaborators that compose cells and fragments on top of the engine.
pub fn split_run(run: &Run, available: f32) -> (Run, Option<Run>) {
    let out = split(run, available, true);
    (out.consumed, out.remainder)
}

/// Truncates a standalone run at a width limit, keeping at least one
/// character on the consumed side. The simpler sibling of [`split_run`]
/// for callers that have not placed anything yet.
pub fn truncate_run(run: &Run, available: f32) -> (Run, Option<Run>) {
    let out = truncate(run, available);
    (out.consumed, out.remainder)
}

/// The result of cutting a run against a budget.
#[derive(Debug)]
pub(crate) struct Split {
    /// The part that stays on the line, trailing spaces trimmed.
    pub(crate) consumed: Run,
    /// The part carried over, if any.
    pub(crate) remainder: Option<Run>,
    /// Width of `consumed` after trimming.
    pub(crate) width: f32,
    /// The budget overflowed before any break candidate was seen; the
    /// whole run is in `remainder` and the caller decides between moving
    /// it to the next line and force-truncating it.
    pub(crate) nothing_fit: bool,
}

fn measure(run: &Run, chars: &[char]) -> f32 {
    chars.iter().map(|&c| run.char_advance(c)).sum()
}

fn trimmed_len(chars: &[char]) -> usize {
    let mut end = chars.len();
    while end > 0 && is_whitespace(chars[end - 1]) {
        end -= 1;
    }
    end
}

/// Builds the consumed half from `chars[..end]` with trailing spaces
/// trimmed and their width refunded.
fn consumed_part(run: &Run, chars: &[char], end: usize, newline: bool) -> (Run, f32) {
    let end = trimmed_len(&chars[..end]);
    let mut out = run.derive_text(chars[..end].iter().collect());
    out.newline = newline;
    let width = measure(run, &chars[..end]);
    (out, width)
}

fn remainder_part(run: &Run, chars: &[char], start: usize) -> Option<Run> {
    (start < chars.len()).then(|| run.derive_text_plain(chars[start..].iter().collect()))
}

/// Splits `run` so that the consumed part fits within `available`.
///
/// A newline marker always forces a break regardless of width. When the
/// budget is exceeded the cut lands on the latest break candidate;
/// whitespace wins over a split character only if it is not earlier.
/// With no candidate at all, nothing is consumed and the whole run is
/// returned as the remainder (`nothing_fit`); the assembler either moves
/// it to the next line or, when the line is still empty, falls back to
/// [`truncate`] so at least one character is always consumed.
pub(crate) fn split(run: &Run, available: f32, hyphenate: bool) -> Split {
    let Some(text) = run.text_str() else {
        debug_assert!(false, "split called on an atomic run");
        return Split {
            consumed: run.clone(),
            remainder: None,
            width: run.width(),
            nothing_fit: false,
        };
    };
    let chars: Vec<char> = text.chars().collect();

    let mut acc = 0.0_f32;
    let mut i = 0;
    // Positions are exclusive ends: a candidate at `p` means "cut before
    // chars[p]".
    let mut last_space: Option<usize> = None;
    let mut last_split: Option<usize> = None;

    while i < chars.len() {
        let c = chars[i];
        if c == '\n' || c == '\r' {
            let mut after = i + 1;
            if c == '\r' && chars.get(after) == Some(&'\n') {
                after += 1;
            }
            let (consumed, width) = consumed_part(run, &chars, i, true);
            return Split {
                consumed,
                remainder: remainder_part(run, &chars, after),
                width,
                nothing_fit: false,
            };
        }
        acc += run.char_advance(c);
        if is_whitespace(c) {
            // Overflowing whitespace still hangs as a break candidate:
            // the space is trimmed off the line end anyway.
            last_space = Some(i + 1);
        }
        if acc > available {
            break;
        }
        if !is_whitespace(c) && run.is_split_char(c) {
            last_split = Some(i + 1);
        }
        i += 1;
    }

    if i == chars.len() {
        // The whole run fits. Trailing spaces are kept: more runs may
        // follow on the same line, and line close trims the final run.
        return Split {
            consumed: run.clone(),
            remainder: None,
            width: acc,
            nothing_fit: false,
        };
    }

    // Overflow at `i`.
    if hyphenate && run.style.hyphenator.is_some() && chars[i].is_alphabetic() {
        if let Some(out) = try_hyphenate(run, &chars, i, available) {
            return out;
        }
    }

    let cut = match (last_space, last_split) {
        (Some(sp), Some(lp)) => Some(if sp >= lp { sp } else { lp }),
        (Some(sp), None) => Some(sp),
        (None, Some(lp)) => Some(lp),
        (None, None) => None,
    };

    match cut {
        Some(end) => {
            let (consumed, width) = consumed_part(run, &chars, end, false);
            Split {
                consumed,
                remainder: remainder_part(run, &chars, end),
                width,
                nothing_fit: false,
            }
        }
        None => Split {
            consumed: run.derive_text_plain(String::new()),
            remainder: Some(run.clone()),
            width: 0.0,
            nothing_fit: true,
        },
    }
}

/// Hyphenates the word containing the overflow position `at`.
///
/// The word is the maximal alphabetic span around `at`; the helper is
/// offered the width remaining once everything before the word is placed.
fn try_hyphenate(run: &Run, chars: &[char], at: usize, available: f32) -> Option<Split> {
    let hyphenator = run.style.hyphenator.as_ref()?;
    let mut start = at;
    while start > 0 && chars[start - 1].is_alphabetic() {
        start -= 1;
    }
    let mut end = at;
    while end < chars.len() && chars[end].is_alphabetic() {
        end += 1;
    }
    if start == end {
        return None;
    }
    let word: String = chars[start..end].iter().collect();
    let before = measure(run, &chars[..start]);
    let hyphenation = hyphenator.hyphenate(
        &word,
        run.style.font(),
        run.style.size(),
        available - before,
    )?;
    if hyphenation.fore.is_empty() {
        return None;
    }

    let mut fore: Vec<char> = chars[..start].to_vec();
    fore.extend(hyphenation.fore.chars());
    let width = measure(run, &fore);
    let consumed = run.derive_text(fore.into_iter().collect());

    let mut aft: String = hyphenation.aft;
    aft.extend(&chars[end..]);
    Some(Split {
        consumed,
        remainder: Some(run.derive_text_plain(aft)),
        width,
        nothing_fit: false,
    })
}

/// Cuts `run` at the width limit, keeping at least one character on the
/// consumed side. Used when the line is still empty and the regular split
/// could not place anything.
pub(crate) fn truncate(run: &Run, available: f32) -> Split {
    let Some(text) = run.text_str() else {
        debug_assert!(false, "truncate called on an atomic run");
        return Split {
            consumed: run.clone(),
            remainder: None,
            width: run.width(),
            nothing_fit: false,
        };
    };
    let chars: Vec<char> = text.chars().collect();

    let mut acc = 0.0_f32;
    let mut i = 0;
    while i < chars.len() {
        let w = run.char_advance(chars[i]);
        if acc + w > available {
            break;
        }
        acc += w;
        i += 1;
    }
    if i == chars.len() {
        return Split {
            consumed: run.clone(),
            remainder: None,
            width: acc,
            nothing_fit: false,
        };
    }
    let end = i.max(1);
    let (consumed, width) = consumed_part(run, &chars, end, false);
    Split {
        consumed,
        remainder: remainder_part(run, &chars, end),
        width,
        nothing_fit: false,
    }
}
