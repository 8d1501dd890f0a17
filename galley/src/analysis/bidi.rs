// Copyright 2024 the Galley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Embedding levels and visual reordering.
//!
//! Level computation is delegated to [`unicode_bidi`] and consumed as a
//! black box; this module only extracts a per-character level table and
//! implements the run-flipping reorder over the visual index table.

use unicode_bidi::{BidiInfo, Level};

/// Paragraph direction hint.
#[derive(Copy, Clone, Default, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Left-to-right base direction.
    Ltr,
    /// Right-to-left base direction.
    Rtl,
    /// Neutral: detect from the first strong character.
    #[default]
    Auto,
}

/// Computes per-character embedding levels for one paragraph.
///
/// Returns the level table (one entry per `char`) and the paragraph base
/// level. `text` must not contain hard paragraph breaks; should the
/// analysis still find more than one paragraph, the base level of the
/// first one wins.
pub(crate) fn levels(text: &str, direction: Direction) -> (Vec<u8>, u8) {
    let para_level = match direction {
        Direction::Ltr => Some(Level::ltr()),
        Direction::Rtl => Some(Level::rtl()),
        Direction::Auto => None,
    };
    let info = BidiInfo::new(text, para_level);
    let base = info
        .paragraphs
        .first()
        .map(|p| p.level.number())
        .unwrap_or(0);

    // The analysis is byte-indexed; collapse it to one level per char.
    let mut out = Vec::with_capacity(text.len());
    for (byte, _) in text.char_indices() {
        out.push(info.levels[byte].number());
    }
    (out, base)
}

/// Reorders `visual` (a slice of logical indices) into visual order.
///
/// When every level in the range is the same, a single flip (or nothing,
/// for an even level) suffices. Otherwise maximal runs at or above a
/// decreasing threshold are flipped until the lowest odd level present
/// has been processed. Levels travel with their characters, so each pass
/// inspects the current arrangement.
pub(crate) fn reorder(levels: &[u8], visual: &mut [u32]) {
    if visual.len() < 2 {
        return;
    }

    let mut min_level = u8::MAX;
    let mut max_level = 0;
    for &idx in visual.iter() {
        let level = levels[idx as usize];
        min_level = min_level.min(level);
        max_level = max_level.max(level);
    }
    if min_level == max_level {
        if min_level & 1 != 0 {
            visual.reverse();
        }
        return;
    }

    let lowest_odd = if min_level & 1 != 0 {
        min_level
    } else {
        min_level + 1
    };
    for threshold in (lowest_odd..=max_level).rev() {
        let mut i = 0;
        while i < visual.len() {
            if levels[visual[i] as usize] >= threshold {
                let start = i;
                while i < visual.len() && levels[visual[i] as usize] >= threshold {
                    i += 1;
                }
                visual[start..i].reverse();
            } else {
                i += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Direction, levels, reorder};

    #[test]
    fn ltr_paragraph_has_even_levels() {
        let (lv, base) = levels("abc def", Direction::Auto);
        assert_eq!(base, 0, "Latin text must resolve to an LTR base");
        assert!(lv.iter().all(|&l| l & 1 == 0), "levels: {lv:?}");
    }

    #[test]
    fn rtl_hint_forces_odd_base() {
        let (_, base) = levels("abc", Direction::Rtl);
        assert_eq!(base, 1);
    }

    #[test]
    fn uniform_odd_range_is_a_single_flip() {
        let lv = [1, 1, 1, 1];
        let mut visual: Vec<u32> = (0..4).collect();
        reorder(&lv, &mut visual);
        assert_eq!(visual, [3, 2, 1, 0]);
    }

    #[test]
    fn mixed_levels_flip_nested_runs() {
        // "a HEB b" with the Hebrew span at level 1.
        let lv = [0, 1, 1, 1, 0];
        let mut visual: Vec<u32> = (0..5).collect();
        reorder(&lv, &mut visual);
        assert_eq!(visual, [0, 3, 2, 1, 4]);
    }

    #[test]
    fn number_inside_rtl_keeps_its_own_order() {
        // RTL letters at level 1 around a number at level 2:
        // logical [R R n n R] becomes visual [R n n R R] read backwards.
        let lv = [1, 1, 2, 2, 1];
        let mut visual: Vec<u32> = (0..5).collect();
        reorder(&lv, &mut visual);
        assert_eq!(visual, [4, 2, 3, 1, 0]);
    }
}
