#![allow(dead_code)] // Shared across many integration tests; each test binary uses a subset of helpers.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;
use std::rc::Rc;

use core_editor::Editor;
use core_keys::{Action, Key};
use core_term::Terminal;

#[derive(Debug, Default)]
struct ScriptState {
    keys: VecDeque<Key>,
    out: String,
    beeps: usize,
    columns: usize,
    cursor_cols: Vec<usize>,
    start_prompt_calls: usize,
    column_refreshes: usize,
    erase_screen_calls: usize,
    output_tty: bool,
    supported: bool,
    fallback_lines: VecDeque<String>,
}

/// Scripted in-memory terminal. Clones share state, so tests keep one handle
/// for assertions after the other has moved into the editor.
#[derive(Debug, Clone)]
pub struct ScriptTerminal {
    state: Rc<RefCell<ScriptState>>,
}

impl Default for ScriptTerminal {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptTerminal {
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(ScriptState {
                columns: 80,
                output_tty: true,
                supported: true,
                ..ScriptState::default()
            })),
        }
    }

    /// Queue each code point of `s` as a typed key.
    pub fn type_str(&self, s: &str) {
        let mut st = self.state.borrow_mut();
        for c in s.chars() {
            st.keys.push_back(Key::Char(c));
        }
    }

    /// Queue one key.
    pub fn press(&self, key: impl Into<Key>) {
        self.state.borrow_mut().keys.push_back(key.into());
    }

    pub fn set_columns(&self, columns: usize) {
        self.state.borrow_mut().columns = columns;
    }

    pub fn set_output_tty(&self, yes: bool) {
        self.state.borrow_mut().output_tty = yes;
    }

    pub fn set_supported(&self, yes: bool) {
        self.state.borrow_mut().supported = yes;
    }

    pub fn push_fallback_line(&self, line: &str) {
        self.state
            .borrow_mut()
            .fallback_lines
            .push_back(line.to_owned());
    }

    /// Everything written to the terminal, prompt and echoes included.
    pub fn out(&self) -> String {
        self.state.borrow().out.clone()
    }

    pub fn beeps(&self) -> usize {
        self.state.borrow().beeps
    }

    /// Column of the most recent cursor placement (the cursor position of
    /// the last refresh).
    pub fn last_cursor_col(&self) -> Option<usize> {
        self.state.borrow().cursor_cols.last().copied()
    }

    pub fn cursor_cols(&self) -> Vec<usize> {
        self.state.borrow().cursor_cols.clone()
    }

    pub fn start_prompt_calls(&self) -> usize {
        self.state.borrow().start_prompt_calls
    }

    pub fn column_refreshes(&self) -> usize {
        self.state.borrow().column_refreshes
    }

    pub fn erase_screen_calls(&self) -> usize {
        self.state.borrow().erase_screen_calls
    }
}

impl Terminal for ScriptTerminal {
    fn read_key(&mut self) -> io::Result<Key> {
        self.state
            .borrow_mut()
            .keys
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "key script exhausted"))
    }

    fn start_prompt(&mut self) -> io::Result<()> {
        self.state.borrow_mut().start_prompt_calls += 1;
        Ok(())
    }

    fn end_prompt(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn refresh_columns(&mut self) -> usize {
        let mut st = self.state.borrow_mut();
        st.column_refreshes += 1;
        st.columns
    }

    fn columns(&self) -> usize {
        self.state.borrow().columns
    }

    fn move_to_column(&mut self, col: usize) -> io::Result<()> {
        self.state.borrow_mut().cursor_cols.push(col);
        Ok(())
    }

    fn erase_line(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn erase_screen(&mut self) -> io::Result<()> {
        self.state.borrow_mut().erase_screen_calls += 1;
        Ok(())
    }

    fn beep(&mut self) {
        self.state.borrow_mut().beeps += 1;
    }

    fn write_str(&mut self, s: &str) -> io::Result<()> {
        self.state.borrow_mut().out.push_str(s);
        Ok(())
    }

    fn write_char(&mut self, c: char) -> io::Result<()> {
        self.state.borrow_mut().out.push(c);
        Ok(())
    }

    fn write_newline(&mut self) -> io::Result<()> {
        self.state.borrow_mut().out.push('\n');
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn is_output_terminal(&self) -> bool {
        self.state.borrow().output_tty
    }

    fn is_supported(&self) -> bool {
        self.state.borrow().supported
    }

    fn read_fallback_line(&mut self) -> io::Result<Option<String>> {
        Ok(self.state.borrow_mut().fallback_lines.pop_front())
    }
}

/// Editor over a scripted terminal, preloaded with history entries. The
/// returned handle shares state with the terminal inside the editor.
pub fn editor_with_history(entries: &[&str]) -> (Editor<ScriptTerminal>, ScriptTerminal) {
    let term = ScriptTerminal::new();
    let handle = term.clone();
    let editor = Editor::with_terminal(term);
    for entry in entries {
        editor.append_history(entry);
    }
    (editor, handle)
}

pub fn editor() -> (Editor<ScriptTerminal>, ScriptTerminal) {
    editor_with_history(&[])
}

/// Shorthands for keys used all over the scripts.
pub use core_keys::{ctrl, BS, CR, ESC, LF, TAB};

pub fn act(a: Action) -> Key {
    Key::Act(a)
}
