// Copyright 2024 the Galley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::sync::Arc;

use super::utils::{StaticHyphenator, style, text_run};
use crate::split::{split, split_run, truncate, truncate_run};

#[test]
fn whole_run_fits() {
    let run = text_run("hello");
    let out = split(&run, 100.0, true);
    assert_eq!(out.consumed.text_str(), Some("hello"));
    assert!(out.remainder.is_none());
    assert_eq!(out.width, 50.0);
    assert!(!out.nothing_fit);
}

#[test]
fn breaks_at_last_space() {
    // "aaa bbb " is eight characters; the overflowing space still hangs
    // as the break candidate, so the full second word stays.
    let run = text_run("aaa bbb ccc");
    let out = split(&run, 70.0, true);
    assert_eq!(out.consumed.text_str(), Some("aaa bbb"));
    assert_eq!(out.width, 70.0);
    assert_eq!(out.remainder.unwrap().text_str(), Some("ccc"));
}

#[test]
fn trailing_space_is_trimmed_and_refunded() {
    let run = text_run("aaaa bb");
    let out = split(&run, 55.0, true);
    assert_eq!(out.consumed.text_str(), Some("aaaa"));
    assert_eq!(out.width, 40.0, "the trimmed space must be refunded");
    assert_eq!(out.remainder.unwrap().text_str(), Some("bb"));
}

#[test]
fn split_character_wins_when_later_than_whitespace() {
    // Both candidates exist; the hyphen at position 9 is later than the
    // space at position 6.
    let run = text_run("ab-cd ef-gh");
    let out = split(&run, 100.0, true);
    assert_eq!(out.consumed.text_str(), Some("ab-cd ef-"));
    assert_eq!(out.remainder.unwrap().text_str(), Some("gh"));
}

#[test]
fn whitespace_wins_when_not_earlier() {
    let run = text_run("a-b ccc ddd");
    let out = split(&run, 100.0, true);
    assert_eq!(out.consumed.text_str(), Some("a-b ccc"));
    assert_eq!(out.remainder.unwrap().text_str(), Some("ddd"));
}

#[test]
fn newline_forces_break_even_when_width_suffices() {
    let run = text_run("AB\nCD");
    let out = split(&run, 1000.0, true);
    assert_eq!(out.consumed.text_str(), Some("AB"));
    assert!(out.consumed.newline_forced());
    assert_eq!(out.remainder.unwrap().text_str(), Some("CD"));
}

#[test]
fn crlf_is_one_break_unit() {
    let run = text_run("AB\r\nCD");
    let out = split(&run, 1000.0, true);
    assert_eq!(out.consumed.text_str(), Some("AB"));
    assert!(out.consumed.newline_forced());
    assert_eq!(out.remainder.unwrap().text_str(), Some("CD"));
}

#[test]
fn trailing_newline_leaves_no_remainder() {
    let run = text_run("AB\n");
    let out = split(&run, 1000.0, true);
    assert_eq!(out.consumed.text_str(), Some("AB"));
    assert!(out.consumed.newline_forced());
    assert!(out.remainder.is_none());
}

#[test]
fn no_candidate_returns_whole_run() {
    let run = text_run("abcdef");
    let out = split(&run, 30.0, true);
    assert!(out.nothing_fit);
    assert!(out.consumed.is_empty());
    assert_eq!(out.remainder.unwrap().text_str(), Some("abcdef"));
}

#[test]
fn truncate_cuts_at_width_limit() {
    let run = text_run("abcdef");
    let out = truncate(&run, 30.0);
    assert_eq!(out.consumed.text_str(), Some("abc"));
    assert_eq!(out.width, 30.0);
    assert_eq!(out.remainder.unwrap().text_str(), Some("def"));
}

#[test]
fn truncate_keeps_at_least_one_character() {
    let run = text_run("ab");
    let out = truncate(&run, 5.0);
    assert_eq!(out.consumed.text_str(), Some("a"));
    assert_eq!(out.width, 10.0);
    assert_eq!(out.remainder.unwrap().text_str(), Some("b"));
}

#[test]
fn hyphenation_splices_the_word() {
    let style = style().with_hyphenator(Arc::new(StaticHyphenator {
        fore: "extra-",
        aft: "ordinary",
    }));
    let run = crate::Run::text("extraordinary", style);
    let out = split(&run, 80.0, true);
    assert_eq!(out.consumed.text_str(), Some("extra-"));
    assert_eq!(out.width, 60.0);
    assert_eq!(out.remainder.unwrap().text_str(), Some("ordinary"));
}

#[test]
fn hyphenation_keeps_text_before_the_word() {
    let style = style().with_hyphenator(Arc::new(StaticHyphenator {
        fore: "extra-",
        aft: "ordinary",
    }));
    let run = crate::Run::text("so extraordinary", style);
    let out = split(&run, 110.0, true);
    assert_eq!(out.consumed.text_str(), Some("so extra-"));
    assert_eq!(out.remainder.unwrap().text_str(), Some("ordinary"));
}

#[test]
fn declined_hyphenation_falls_back_to_candidates() {
    // The fore part never fits, so the helper declines and the space
    // candidate is used instead.
    let style = style().with_hyphenator(Arc::new(StaticHyphenator {
        fore: "unreasonably-long-prefix",
        aft: "x",
    }));
    let run = crate::Run::text("so extraordinary", style);
    let out = split(&run, 110.0, true);
    assert_eq!(out.consumed.text_str(), Some("so"));
    assert_eq!(out.remainder.unwrap().text_str(), Some("extraordinary"));
}

#[test]
fn hyphenation_disabled_is_ignored() {
    let style = style().with_hyphenator(Arc::new(StaticHyphenator {
        fore: "extra-",
        aft: "ordinary",
    }));
    let run = crate::Run::text("extraordinary", style);
    let out = split(&run, 80.0, false);
    assert!(out.nothing_fit);
}

#[test]
fn public_wrappers_return_the_pair() {
    let (consumed, rest) = split_run(&text_run("aaa bbb"), 45.0);
    assert_eq!(consumed.text_str(), Some("aaa"));
    assert_eq!(rest.unwrap().text_str(), Some("bbb"));

    let (consumed, rest) = truncate_run(&text_run("abcd"), 25.0);
    assert_eq!(consumed.text_str(), Some("ab"));
    assert_eq!(rest.unwrap().text_str(), Some("cd"));
}

#[test]
fn cjk_breaks_anywhere() {
    let run = text_run("\u{4E00}\u{4E8C}\u{4E09}\u{56DB}");
    let out = split(&run, 25.0, true);
    assert_eq!(out.consumed.text_str(), Some("\u{4E00}\u{4E8C}"));
    assert_eq!(out.remainder.unwrap().text_str(), Some("\u{4E09}\u{56DB}"));
}
