// Copyright 2024 the Galley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use super::utils::{line_text, style, text_run};
use crate::line::{FinishParams, Line, LineAssembler};
use crate::run::{ListItem, Run};
use crate::style::Alignment;
use crate::BreakReason;

fn finish(assembler: LineAssembler) -> Line {
    finish_with(assembler, Alignment::Start, false)
}

fn finish_with(assembler: LineAssembler, alignment: Alignment, paragraph_end: bool) -> Line {
    assembler.finish(FinishParams {
        alignment,
        rtl: false,
        paragraph_end,
        explicit_break: false,
        runs_override: None,
    })
}

fn conserved(line: &Line) -> bool {
    let consumed: f32 = line.runs().iter().map(Run::width).sum();
    (consumed + line.remaining_width() - line.original_width()).abs() < 1e-3
}

#[test]
fn accumulates_multiple_runs() {
    let mut asm = LineAssembler::new(200.0, false);
    assert!(asm.push(text_run("ab ")).is_none());
    assert!(asm.push(text_run("cd")).is_none());
    let line = finish(asm);
    assert_eq!(line_text(&line), "ab cd");
    assert_eq!(line.remaining_width(), 150.0);
    assert!(conserved(&line));
}

#[test]
fn empty_run_is_a_noop() {
    let mut asm = LineAssembler::new(100.0, false);
    assert!(asm.push(text_run("")).is_none());
    assert!(asm.is_empty());
    assert!(!asm.is_closed());
}

#[test]
fn tab_anchors_at_its_position() {
    let mut asm = LineAssembler::new(200.0, false);
    asm.push(text_run("abc"));
    asm.push(Run::tab(style(), 0.0, 100.0, false));
    asm.push(text_run("de"));
    let line = finish(asm);
    // Content after the tab starts at x = 100, so 80 units remain.
    assert_eq!(line.remaining_width(), 80.0);
    assert!(conserved(&line));
}

#[test]
fn passed_tab_with_newline_flag_closes_the_line() {
    let mut asm = LineAssembler::new(500.0, false);
    asm.push(text_run("abcdefghijkl"));
    let tab = Run::tab(style(), 0.0, 100.0, true);
    let rejected = asm.push(tab);
    assert!(rejected.is_some(), "the tab must come back unconsumed");
    assert!(asm.is_closed());
    let line = finish(asm);
    assert_eq!(line_text(&line), "abcdefghijkl");
}

#[test]
fn passed_tab_without_newline_flag_degrades_to_spacer() {
    let mut asm = LineAssembler::new(500.0, false);
    asm.push(text_run("abcdefghijkl"));
    assert!(asm.push(Run::tab(style(), 15.0, 100.0, false)).is_none());
    let line = finish(asm);
    assert_eq!(line.remaining_width(), 500.0 - 120.0 - 15.0);
    assert!(conserved(&line));
}

#[test]
fn image_is_atomic_and_raises_the_line() {
    let mut asm = LineAssembler::new(200.0, false);
    asm.push(text_run("ab"));
    assert!(asm.push(Run::image(style(), 40.0, 50.0)).is_none());
    let line = finish(asm);
    assert_eq!(line.ascent(), 50.0, "the image is taller than the text");
    assert_eq!(line.descent(), 2.0);
    assert_eq!(line.remaining_width(), 140.0);
}

#[test]
fn image_that_does_not_fit_moves_whole() {
    let mut asm = LineAssembler::new(100.0, false);
    asm.push(text_run("abcdefgh"));
    let image = Run::image(style(), 40.0, 10.0);
    assert!(asm.push(image).is_some());
    assert!(asm.is_closed());
}

#[test]
fn oversize_image_on_empty_line_is_accepted() {
    let mut asm = LineAssembler::new(30.0, false);
    assert!(asm.push(Run::image(style(), 40.0, 10.0)).is_none());
    assert!(asm.is_closed());
    let line = finish(asm);
    assert_eq!(line.remaining_width(), -10.0);
    assert!(conserved(&line));
}

#[test]
fn separator_is_placed_atomically() {
    let mut asm = LineAssembler::new(100.0, false);
    asm.push(text_run("ab"));
    assert!(asm.push(Run::separator(style(), 30.0)).is_none());
    let line = finish(asm);
    assert_eq!(line.remaining_width(), 50.0);
}

#[test]
fn unsplittable_run_on_empty_line_is_truncated() {
    let mut asm = LineAssembler::new(30.0, false);
    let rest = asm.push(text_run("abcdef"));
    assert_eq!(rest.unwrap().text_str(), Some("def"));
    assert_eq!(asm.break_reason(), BreakReason::Emergency);
    let line = finish(asm);
    assert_eq!(line_text(&line), "abc");
}

#[test]
fn unsplittable_run_on_started_line_moves_whole() {
    let mut asm = LineAssembler::new(100.0, false);
    asm.push(text_run("aaa bbb "));
    let rest = asm.push(text_run("cdefgh"));
    assert_eq!(rest.unwrap().text_str(), Some("cdefgh"));
    let line = finish(asm);
    assert_eq!(line_text(&line), "aaa bbb");
}

#[test]
fn final_run_trailing_space_is_trimmed() {
    let mut asm = LineAssembler::new(200.0, false);
    asm.push(text_run("ab   "));
    let line = finish(asm);
    assert_eq!(line_text(&line), "ab");
    assert_eq!(line.remaining_width(), 180.0);
    assert!(conserved(&line));
}

#[test]
fn whitespace_only_final_run_is_dropped() {
    let mut asm = LineAssembler::new(200.0, false);
    asm.push(text_run("ab"));
    asm.push(text_run("   "));
    let line = finish(asm);
    assert_eq!(line.runs().len(), 1);
    assert_eq!(line_text(&line), "ab");
    assert_eq!(line.remaining_width(), 180.0);
}

#[test]
fn justification_flag_needs_leftover() {
    let mut asm = LineAssembler::new(100.0, false);
    asm.push(text_run("abc"));
    let line = finish_with(asm, Alignment::Justified, false);
    assert!(line.is_justified());
    assert_eq!(line.alignment(), Alignment::Justified);
}

#[test]
fn last_justified_line_falls_back_to_left() {
    let mut asm = LineAssembler::new(100.0, false);
    asm.push(text_run("abc"));
    let line = finish_with(asm, Alignment::Justified, true);
    assert!(!line.is_justified());
    assert_eq!(line.alignment(), Alignment::Left);
}

#[test]
fn list_item_is_recorded_on_the_line() {
    let marker = ListItem {
        indent: 20.0,
        marker: '\u{2022}',
    };
    let mut asm = LineAssembler::new(200.0, false);
    asm.push(text_run("first item").with_list_item(marker));
    let line = finish(asm);
    assert_eq!(line.list_item(), Some(&marker));
}

#[test]
fn start_alignment_resolves_by_direction() {
    let mut asm = LineAssembler::new(100.0, false);
    asm.push(text_run("ab"));
    let line = asm.finish(FinishParams {
        alignment: Alignment::Start,
        rtl: true,
        paragraph_end: true,
        explicit_break: false,
        runs_override: None,
    });
    assert_eq!(line.alignment(), Alignment::Right);
}
