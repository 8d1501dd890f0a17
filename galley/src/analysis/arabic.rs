// Copyright 2024 the Galley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arabic contextual shaping and digit substitution.
//!
//! Shaping maps base letters to their presentation forms
//! (isolated/initial/medial/final) according to the joining behavior of
//! their neighbors, and fuses Lam-Alef sequences into single ligature
//! characters, shrinking the buffer. It runs in one pass over the
//! paragraph arrays; non-Arabic spans are copied through untouched.

/// How European and Arabic-Indic digits are substituted before level
/// computation.
#[derive(Copy, Clone, Default, Debug, PartialEq, Eq)]
pub enum DigitShaping {
    /// Digits are left as they are.
    #[default]
    None,
    /// European digits become Arabic-Indic digits.
    ArabicIndic,
    /// Arabic-Indic digits (both sets) become European digits.
    European,
    /// European digits following an Arabic letter become Arabic-Indic;
    /// the paragraph starts in the Latin state.
    ContextualLtr,
    /// Like [`DigitShaping::ContextualLtr`] but the paragraph starts in
    /// the Arabic state.
    ContextualArabic,
}

/// Which Arabic-Indic digit block substitutions produce.
#[derive(Copy, Clone, Default, Debug, PartialEq, Eq)]
pub enum DigitSet {
    /// U+0660..U+0669.
    #[default]
    Standard,
    /// Eastern (Persian/Urdu) digits, U+06F0..U+06F9.
    Eastern,
}

impl DigitSet {
    fn base(self) -> u32 {
        match self {
            Self::Standard => 0x0660,
            Self::Eastern => 0x06F0,
        }
    }
}

/// Joining behavior of a character within an Arabic span.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Joining {
    /// Joins only to the preceding character (alef, dal, reh, waw, ...).
    Right,
    /// Joins on both sides.
    Dual,
    /// Joins neighbors without connecting itself (tatweel).
    Causing,
    /// Combining marks; invisible to joining decisions.
    Transparent,
    /// Does not join.
    None,
}

fn joining(c: char) -> Joining {
    match c as u32 {
        0x0622..=0x0625 | 0x0627 | 0x0629 | 0x062F..=0x0632 | 0x0648 | 0x0649 | 0x0671..=0x0673 => {
            Joining::Right
        }
        0x0626 | 0x0628 | 0x062A..=0x062E | 0x0633..=0x063A | 0x0641..=0x0647 | 0x064A => {
            Joining::Dual
        }
        0x0640 => Joining::Causing,
        0x0610..=0x061A | 0x064B..=0x065F | 0x0670 => Joining::Transparent,
        _ => Joining::None,
    }
}

/// Presentation forms as (isolated, final, initial, medial).
fn forms(c: char) -> Option<[char; 4]> {
    Some(match c {
        '\u{0621}' => ['\u{FE80}', '\u{FE80}', '\u{FE80}', '\u{FE80}'],
        '\u{0622}' => ['\u{FE81}', '\u{FE82}', '\u{FE81}', '\u{FE82}'],
        '\u{0623}' => ['\u{FE83}', '\u{FE84}', '\u{FE83}', '\u{FE84}'],
        '\u{0624}' => ['\u{FE85}', '\u{FE86}', '\u{FE85}', '\u{FE86}'],
        '\u{0625}' => ['\u{FE87}', '\u{FE88}', '\u{FE87}', '\u{FE88}'],
        '\u{0626}' => ['\u{FE89}', '\u{FE8A}', '\u{FE8B}', '\u{FE8C}'],
        '\u{0627}' => ['\u{FE8D}', '\u{FE8E}', '\u{FE8D}', '\u{FE8E}'],
        '\u{0628}' => ['\u{FE8F}', '\u{FE90}', '\u{FE91}', '\u{FE92}'],
        '\u{0629}' => ['\u{FE93}', '\u{FE94}', '\u{FE93}', '\u{FE94}'],
        '\u{062A}' => ['\u{FE95}', '\u{FE96}', '\u{FE97}', '\u{FE98}'],
        '\u{062B}' => ['\u{FE99}', '\u{FE9A}', '\u{FE9B}', '\u{FE9C}'],
        '\u{062C}' => ['\u{FE9D}', '\u{FE9E}', '\u{FE9F}', '\u{FEA0}'],
        '\u{062D}' => ['\u{FEA1}', '\u{FEA2}', '\u{FEA3}', '\u{FEA4}'],
        '\u{062E}' => ['\u{FEA5}', '\u{FEA6}', '\u{FEA7}', '\u{FEA8}'],
        '\u{062F}' => ['\u{FEA9}', '\u{FEAA}', '\u{FEA9}', '\u{FEAA}'],
        '\u{0630}' => ['\u{FEAB}', '\u{FEAC}', '\u{FEAB}', '\u{FEAC}'],
        '\u{0631}' => ['\u{FEAD}', '\u{FEAE}', '\u{FEAD}', '\u{FEAE}'],
        '\u{0632}' => ['\u{FEAF}', '\u{FEB0}', '\u{FEAF}', '\u{FEB0}'],
        '\u{0633}' => ['\u{FEB1}', '\u{FEB2}', '\u{FEB3}', '\u{FEB4}'],
        '\u{0634}' => ['\u{FEB5}', '\u{FEB6}', '\u{FEB7}', '\u{FEB8}'],
        '\u{0635}' => ['\u{FEB9}', '\u{FEBA}', '\u{FEBB}', '\u{FEBC}'],
        '\u{0636}' => ['\u{FEBD}', '\u{FEBE}', '\u{FEBF}', '\u{FEC0}'],
        '\u{0637}' => ['\u{FEC1}', '\u{FEC2}', '\u{FEC3}', '\u{FEC4}'],
        '\u{0638}' => ['\u{FEC5}', '\u{FEC6}', '\u{FEC7}', '\u{FEC8}'],
        '\u{0639}' => ['\u{FEC9}', '\u{FECA}', '\u{FECB}', '\u{FECC}'],
        '\u{063A}' => ['\u{FECD}', '\u{FECE}', '\u{FECF}', '\u{FED0}'],
        '\u{0641}' => ['\u{FED1}', '\u{FED2}', '\u{FED3}', '\u{FED4}'],
        '\u{0642}' => ['\u{FED5}', '\u{FED6}', '\u{FED7}', '\u{FED8}'],
        '\u{0643}' => ['\u{FED9}', '\u{FEDA}', '\u{FEDB}', '\u{FEDC}'],
        '\u{0644}' => ['\u{FEDD}', '\u{FEDE}', '\u{FEDF}', '\u{FEE0}'],
        '\u{0645}' => ['\u{FEE1}', '\u{FEE2}', '\u{FEE3}', '\u{FEE4}'],
        '\u{0646}' => ['\u{FEE5}', '\u{FEE6}', '\u{FEE7}', '\u{FEE8}'],
        '\u{0647}' => ['\u{FEE9}', '\u{FEEA}', '\u{FEEB}', '\u{FEEC}'],
        '\u{0648}' => ['\u{FEED}', '\u{FEEE}', '\u{FEED}', '\u{FEEE}'],
        '\u{0649}' => ['\u{FEEF}', '\u{FEF0}', '\u{FEEF}', '\u{FEF0}'],
        '\u{064A}' => ['\u{FEF1}', '\u{FEF2}', '\u{FEF3}', '\u{FEF4}'],
        _ => return None,
    })
}

/// The Lam-Alef ligature for lam followed by `alef`, in its (isolated,
/// final) forms.
fn lam_alef(alef: char) -> Option<(char, char)> {
    Some(match alef {
        '\u{0622}' => ('\u{FEF5}', '\u{FEF6}'),
        '\u{0623}' => ('\u{FEF7}', '\u{FEF8}'),
        '\u{0625}' => ('\u{FEF9}', '\u{FEFA}'),
        '\u{0627}' => ('\u{FEFB}', '\u{FEFC}'),
        _ => return None,
    })
}

/// Whether `text` contains anything the shaper would act on.
pub(crate) fn needs_shaping(text: &[char]) -> bool {
    text.iter().any(|&c| matches!(c as u32, 0x0600..=0x06FF))
}

/// Raised when the shaped arrays would no longer be parallel; the caller
/// keeps the unshaped paragraph in that case.
#[derive(Debug, thiserror::Error)]
#[error("shaped output misaligned with source arrays")]
pub(crate) struct ShapeError;

/// Whether the character before `i` connects forward into `i`.
fn joins_before(text: &[char], i: usize) -> bool {
    let mut j = i;
    while j > 0 {
        j -= 1;
        match joining(text[j]) {
            Joining::Transparent => continue,
            Joining::Dual | Joining::Causing => return true,
            _ => return false,
        }
    }
    false
}

/// Whether the character after `i` connects backward into `i`.
fn joins_after(text: &[char], i: usize) -> bool {
    let mut j = i + 1;
    while j < text.len() {
        match joining(text[j]) {
            Joining::Transparent => {
                j += 1;
            }
            Joining::Dual | Joining::Right | Joining::Causing => return true,
            _ => return false,
        }
    }
    false
}

/// One shaping pass over the paragraph arrays.
///
/// Returns the shaped replacements for `text`, `owners` and `levels`;
/// Lam-Alef fusion can make them shorter than the input. The three inputs
/// are never mutated, so a failure leaves the paragraph as it was.
pub(crate) fn ligaturize(
    text: &[char],
    owners: &[u32],
    levels: &[u8],
) -> Result<(Vec<char>, Vec<u32>, Vec<u8>), ShapeError> {
    if text.len() != owners.len() || text.len() != levels.len() {
        return Err(ShapeError);
    }

    let mut out_text = Vec::with_capacity(text.len());
    let mut out_owners = Vec::with_capacity(text.len());
    let mut out_levels = Vec::with_capacity(text.len());

    let mut i = 0;
    while i < text.len() {
        let c = text[i];

        // Lam-Alef fusion: two source characters become one ligature.
        if c == '\u{0644}' && i + 1 < text.len() {
            if let Some((isolated, fin)) = lam_alef(text[i + 1]) {
                let lig = if joins_before(text, i) { fin } else { isolated };
                out_text.push(lig);
                out_owners.push(owners[i]);
                out_levels.push(levels[i]);
                i += 2;
                continue;
            }
        }

        let shaped = match forms(c) {
            Some([isolated, fin, ini, med]) => {
                let before = joins_before(text, i);
                let after = joins_after(text, i);
                match joining(c) {
                    Joining::Dual => match (before, after) {
                        (true, true) => med,
                        (true, false) => fin,
                        (false, true) => ini,
                        (false, false) => isolated,
                    },
                    Joining::Right => {
                        if before {
                            fin
                        } else {
                            isolated
                        }
                    }
                    _ => isolated,
                }
            }
            None => c,
        };
        out_text.push(shaped);
        out_owners.push(owners[i]);
        out_levels.push(levels[i]);
        i += 1;
    }

    if out_text.len() != out_owners.len()
        || out_text.len() != out_levels.len()
        || out_text.len() > text.len()
        || out_text.is_empty() != text.is_empty()
    {
        return Err(ShapeError);
    }
    Ok((out_text, out_owners, out_levels))
}

fn strong_arabic(c: char) -> bool {
    matches!(c as u32,
        0x0621..=0x064A | 0x066E..=0x06D3 | 0x06D5 | 0x06FA..=0x06FF
    )
}

/// Substitutes digits in place according to `mode`.
///
/// The contextual modes track the most recent strong letter: digits after
/// an Arabic letter are substituted, digits after any other letter are
/// left alone.
pub(crate) fn shape_digits(text: &mut [char], mode: DigitShaping, set: DigitSet) {
    match mode {
        DigitShaping::None => {}
        DigitShaping::ArabicIndic => {
            for c in text.iter_mut() {
                if c.is_ascii_digit() {
                    let d = *c as u32 - u32::from(b'0');
                    *c = char::from_u32(set.base() + d).unwrap_or(*c);
                }
            }
        }
        DigitShaping::European => {
            for c in text.iter_mut() {
                let cp = *c as u32;
                let d = match cp {
                    0x0660..=0x0669 => cp - 0x0660,
                    0x06F0..=0x06F9 => cp - 0x06F0,
                    _ => continue,
                };
                *c = char::from_u32(u32::from(b'0') + d).unwrap_or(*c);
            }
        }
        DigitShaping::ContextualLtr | DigitShaping::ContextualArabic => {
            let mut arabic = mode == DigitShaping::ContextualArabic;
            for c in text.iter_mut() {
                if strong_arabic(*c) {
                    arabic = true;
                } else if c.is_alphabetic() {
                    arabic = false;
                }
                if arabic && c.is_ascii_digit() {
                    let d = *c as u32 - u32::from(b'0');
                    *c = char::from_u32(set.base() + d).unwrap_or(*c);
                }
            }
        }
    }
}
