//! The no-echo password prompt.

mod common;

use common::*;
use core_editor::PromptError;
use core_keys::Action;

#[test]
fn accepts_without_echoing() {
    let (mut ed, term) = editor();
    term.type_str("hunter2");
    term.press(CR);
    assert_eq!(ed.password_prompt("secret: ").unwrap(), "hunter2");
    assert!(
        !term.out().contains("hunter2"),
        "typed secret must never reach the terminal"
    );
    assert!(term.out().contains("secret: "));
}

#[test]
fn ctrl_d_on_empty_input_is_eof() {
    let (mut ed, term) = editor();
    term.press(ctrl::D);
    assert!(matches!(
        ed.password_prompt("secret: ").unwrap_err(),
        PromptError::Eof
    ));
}

#[test]
fn ctrl_d_mid_entry_rearms_and_keeps_the_text() {
    let (mut ed, term) = editor();
    term.type_str("ab");
    term.press(ctrl::D);
    term.press(CR);
    assert_eq!(ed.password_prompt("secret: ").unwrap(), "ab");
    assert!(term.start_prompt_calls() >= 2);
}

#[test]
fn backspace_edits_and_beeps_when_empty() {
    let (mut ed, term) = editor();
    term.press(BS); // nothing to delete
    term.type_str("ab");
    term.press(BS);
    term.press(CR);
    assert_eq!(ed.password_prompt("secret: ").unwrap(), "a");
    assert_eq!(term.beeps(), 1);
}

#[test]
fn clear_screen_redraws_only_the_prompt() {
    let (mut ed, term) = editor();
    term.type_str("ab");
    term.press(ctrl::L);
    term.press(CR);
    assert_eq!(ed.password_prompt("secret: ").unwrap(), "ab");
    assert_eq!(term.erase_screen_calls(), 1);
    assert_eq!(term.out().matches("secret: ").count(), 2);
}

#[test]
fn other_keys_beep() {
    let (mut ed, term) = editor();
    term.press(ctrl::A);
    term.press(TAB);
    term.press(act(Action::Up));
    term.press(CR);
    assert_eq!(ed.password_prompt("secret: ").unwrap(), "");
    assert_eq!(term.beeps(), 3);
}

#[test]
fn requires_terminal_output() {
    let (mut ed, term) = editor();
    term.set_output_tty(false);
    assert!(matches!(
        ed.password_prompt("secret: ").unwrap_err(),
        PromptError::NotATerminal
    ));
}

#[test]
fn has_no_unsupported_fallback() {
    let (mut ed, term) = editor();
    term.set_supported(false);
    term.push_fallback_line("would echo");
    assert!(matches!(
        ed.password_prompt("secret: ").unwrap_err(),
        PromptError::UnsupportedTerminal
    ));
}
