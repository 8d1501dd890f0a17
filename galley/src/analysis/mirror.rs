// Copyright 2024 the Galley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mirrored glyph pairs for right-to-left runs.
//!
//! A subset of the Unicode `BidiMirroring` data covering paired
//! punctuation and the relational operators that occur in running text.
//! The table stores both directions of each pair and is sorted by the
//! first component for binary search.

const MIRROR_PAIRS: &[(char, char)] = &[
    ('\u{0028}', '\u{0029}'),
    ('\u{0029}', '\u{0028}'),
    ('\u{003C}', '\u{003E}'),
    ('\u{003E}', '\u{003C}'),
    ('\u{005B}', '\u{005D}'),
    ('\u{005D}', '\u{005B}'),
    ('\u{007B}', '\u{007D}'),
    ('\u{007D}', '\u{007B}'),
    ('\u{00AB}', '\u{00BB}'),
    ('\u{00BB}', '\u{00AB}'),
    ('\u{2039}', '\u{203A}'),
    ('\u{203A}', '\u{2039}'),
    ('\u{2045}', '\u{2046}'),
    ('\u{2046}', '\u{2045}'),
    ('\u{207D}', '\u{207E}'),
    ('\u{207E}', '\u{207D}'),
    ('\u{208D}', '\u{208E}'),
    ('\u{208E}', '\u{208D}'),
    ('\u{2264}', '\u{2265}'),
    ('\u{2265}', '\u{2264}'),
    ('\u{2266}', '\u{2267}'),
    ('\u{2267}', '\u{2266}'),
    ('\u{226A}', '\u{226B}'),
    ('\u{226B}', '\u{226A}'),
    ('\u{2276}', '\u{2277}'),
    ('\u{2277}', '\u{2276}'),
    ('\u{227A}', '\u{227B}'),
    ('\u{227B}', '\u{227A}'),
    ('\u{227C}', '\u{227D}'),
    ('\u{227D}', '\u{227C}'),
    ('\u{2282}', '\u{2283}'),
    ('\u{2283}', '\u{2282}'),
    ('\u{2286}', '\u{2287}'),
    ('\u{2287}', '\u{2286}'),
    ('\u{228A}', '\u{228B}'),
    ('\u{228B}', '\u{228A}'),
    ('\u{22D8}', '\u{22D9}'),
    ('\u{22D9}', '\u{22D8}'),
    ('\u{2308}', '\u{2309}'),
    ('\u{2309}', '\u{2308}'),
    ('\u{230A}', '\u{230B}'),
    ('\u{230B}', '\u{230A}'),
    ('\u{2329}', '\u{232A}'),
    ('\u{232A}', '\u{2329}'),
    ('\u{27E8}', '\u{27E9}'),
    ('\u{27E9}', '\u{27E8}'),
    ('\u{3008}', '\u{3009}'),
    ('\u{3009}', '\u{3008}'),
    ('\u{300A}', '\u{300B}'),
    ('\u{300B}', '\u{300A}'),
    ('\u{3010}', '\u{3011}'),
    ('\u{3011}', '\u{3010}'),
    ('\u{3014}', '\u{3015}'),
    ('\u{3015}', '\u{3014}'),
    ('\u{3016}', '\u{3017}'),
    ('\u{3017}', '\u{3016}'),
    ('\u{3018}', '\u{3019}'),
    ('\u{3019}', '\u{3018}'),
    ('\u{301A}', '\u{301B}'),
    ('\u{301B}', '\u{301A}'),
    ('\u{FF08}', '\u{FF09}'),
    ('\u{FF09}', '\u{FF08}'),
    ('\u{FF1C}', '\u{FF1E}'),
    ('\u{FF1E}', '\u{FF1C}'),
    ('\u{FF3B}', '\u{FF3D}'),
    ('\u{FF3D}', '\u{FF3B}'),
    ('\u{FF5B}', '\u{FF5D}'),
    ('\u{FF5D}', '\u{FF5B}'),
];

/// The mirror partner of `c`, if it has one.
pub(crate) fn mirrored(c: char) -> Option<char> {
    MIRROR_PAIRS
        .binary_search_by_key(&c, |pair| pair.0)
        .ok()
        .map(|i| MIRROR_PAIRS[i].1)
}
