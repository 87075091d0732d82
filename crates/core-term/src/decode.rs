//! Mapping from crossterm key events to logical [`Key`]s.
//!
//! Control chords are folded onto their C0 code points (Ctrl-A becomes
//! U+0001) so the dispatcher matches on plain characters, the way the wire
//! protocol delivers them on a bare tty. Alt-Y and Shift-Tab surface as named
//! actions because the editor binds them in sub-modes.

use core_keys::{Action, Key, BS, CR, ESC, TAB};
use crossterm::event::{
    KeyCode as CKeyCode, KeyEvent as CKeyEvent, KeyEventKind as CKeyEventKind,
    KeyModifiers as CKeyModifiers,
};

/// Translate one crossterm key event. Returns `None` for events the editor
/// has no use for (key releases, lock keys, media keys); the read loop skips
/// those and blocks for the next event.
pub fn map_key_event(event: &CKeyEvent) -> Option<Key> {
    if event.kind == CKeyEventKind::Release {
        return None;
    }
    let mods = event.modifiers;
    let key = match event.code {
        CKeyCode::Char(c) if mods.contains(CKeyModifiers::CONTROL) => {
            Key::Char(control_code(c)?)
        }
        CKeyCode::Char(c) if mods.contains(CKeyModifiers::ALT) => {
            if c.eq_ignore_ascii_case(&'y') {
                Key::Act(Action::AltY)
            } else {
                Key::Act(Action::Unknown)
            }
        }
        CKeyCode::Char(c) => Key::Char(c),
        CKeyCode::Enter => Key::Char(CR),
        CKeyCode::Tab => Key::Char(TAB),
        CKeyCode::BackTab => Key::Act(Action::ShiftTab),
        CKeyCode::Backspace => Key::Char(BS),
        CKeyCode::Esc => Key::Char(ESC),
        CKeyCode::Left if mods.contains(CKeyModifiers::CONTROL) => Key::Act(Action::WordLeft),
        CKeyCode::Right if mods.contains(CKeyModifiers::CONTROL) => Key::Act(Action::WordRight),
        CKeyCode::Left => Key::Act(Action::Left),
        CKeyCode::Right => Key::Act(Action::Right),
        CKeyCode::Up => Key::Act(Action::Up),
        CKeyCode::Down => Key::Act(Action::Down),
        CKeyCode::Home => Key::Act(Action::Home),
        CKeyCode::End => Key::Act(Action::End),
        CKeyCode::Insert => Key::Act(Action::Insert),
        CKeyCode::Delete => Key::Act(Action::Delete),
        CKeyCode::PageUp => Key::Act(Action::PageUp),
        CKeyCode::PageDown => Key::Act(Action::PageDown),
        CKeyCode::F(n) => Key::Act(Action::F(n)),
        _ => return None,
    };
    Some(key)
}

/// Fold a Ctrl chord onto its C0 code point. Covers the letter chords plus
/// the punctuation aliases terminals traditionally emit.
fn control_code(c: char) -> Option<char> {
    let c = c.to_ascii_lowercase();
    match c {
        'a'..='z' => Some((c as u8 - b'a' + 1) as char),
        ' ' | '@' => Some('\0'),
        '[' => Some(ESC),
        '\\' => Some('\u{1c}'),
        ']' => Some('\u{1d}'),
        '^' => Some('\u{1e}'),
        '_' | '/' => Some('\u{1f}'),
        '?' => Some(BS),
        _ => None,
    }
}
