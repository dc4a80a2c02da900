//! Pattern editor and history tests.

use regex_lab::editor::tokens::in_group;
use regex_lab::{CaretEvent, CaretRange, EditHistory, PALETTE, PatternEditor, TokenGroup};

#[test]
fn new_edit_after_undo_discards_redo_branch() {
    let mut editor = PatternEditor::new("");
    editor.set_pattern("a");
    editor.set_pattern("b");
    assert_eq!(editor.undo(), Some("a"));
    editor.set_pattern("c");

    assert_eq!(editor.history().entries(), ["", "a", "c"]);
    assert_eq!(editor.redo(), None);
    assert_eq!(editor.pattern(), "c");
}

#[test]
fn setting_the_same_value_records_nothing() {
    let mut history = EditHistory::new("x");
    assert!(!history.record("x"));
    assert_eq!(history.len(), 1);
    assert!(history.record("y"));
    assert_eq!(history.cursor(), 1);
}

#[test]
fn undo_and_redo_stop_at_the_ends() {
    let mut editor = PatternEditor::new("a");
    assert_eq!(editor.undo(), None);
    editor.set_pattern("ab");
    assert_eq!(editor.redo(), None);
    assert_eq!(editor.undo(), Some("a"));
    assert_eq!(editor.redo(), Some("ab"));
    assert_eq!(editor.history().len(), 2);
}

#[test]
fn pointer_press_captures_caret_before_focus_moves() {
    let mut editor = PatternEditor::new("foobar");
    editor.observe_caret(CaretEvent::SelectionChange, CaretRange::new(3, 3));
    editor.observe_caret(CaretEvent::PointerHover, CaretRange::new(3, 3));
    editor.observe_caret(CaretEvent::PointerPress, CaretRange::new(3, 3));
    editor.insert_token(r"\s");
    assert_eq!(editor.pattern(), r"foo\sbar");
}

#[test]
fn reversed_selection_is_normalized() {
    let mut editor = PatternEditor::new("hello");
    editor.observe_caret(CaretEvent::SelectionChange, CaretRange::new(4, 1));
    editor.insert_token(".");
    assert_eq!(editor.pattern(), "h.o");
}

#[test]
fn caret_beyond_text_is_clamped() {
    let mut editor = PatternEditor::new("ab");
    editor.observe_caret(CaretEvent::Focus, CaretRange::at(40));
    editor.insert_token("$");
    assert_eq!(editor.pattern(), "ab$");
}

#[test]
fn caret_inside_multibyte_char_is_floored() {
    let mut editor = PatternEditor::new("é");
    editor.observe_caret(CaretEvent::Focus, CaretRange::at(1));
    editor.insert_token("^");
    assert_eq!(editor.pattern(), "^é");
}

#[test]
fn palette_tokens_compose_a_working_pattern() {
    let mut editor = PatternEditor::new("");
    for label in ["^", r"\d", "+", "$"] {
        let token = PALETTE.iter().find(|t| t.insert == label).unwrap();
        editor.insert_token(token.insert);
    }
    assert_eq!(editor.pattern(), r"^\d+$");
    assert_eq!(editor.history().len(), 5);
}

#[test]
fn every_palette_group_is_populated() {
    for group in [
        TokenGroup::Classes,
        TokenGroup::Anchors,
        TokenGroup::Quantifiers,
        TokenGroup::Groups,
    ] {
        assert!(in_group(group).next().is_some(), "{group:?} is empty");
    }
}
