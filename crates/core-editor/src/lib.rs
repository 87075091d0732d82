//! Interactive single-line terminal editor.
//!
//! [`Editor::prompt`] reads one logical line with in-place editing, history
//! recall filtered by the typed prefix, reverse incremental history search
//! (Ctrl-R), tab completion, and an Emacs-style kill/yank ring. The editor
//! drives any [`Terminal`] implementation; [`CrosstermTerminal`] is the
//! production backend, and tests script the session through an in-memory one.
//!
//! Lifecycle: the [`History`] store and the kill ring outlive prompt
//! sessions and belong to the editor object. The line buffer, the
//! prefix-history cursor, and the kill-coalescing latch are created per
//! session and discarded when `prompt` returns.
//!
//! History is shared behind an `Arc` and a read/write lock: a prompt session
//! pins it for shared access for its entire duration, so entries cannot
//! change mid-session, and [`Editor::write_history`] (a reader) is safe to
//! call from another thread while a prompt is active — useful for persisting
//! history from a watchdog during an abnormal exit. Call
//! [`Editor::append_history`] only after `prompt` has returned.

mod complete;
mod completer;
mod error;
mod line_buffer;
mod password;
mod prompt;
mod search;
mod yank;

pub use completer::{Completer, WordCompleter};
pub use error::PromptError;

pub use core_history::{History, HistoryError, HISTORY_LIMIT};
pub use core_keys::{Action, Key};
pub use core_killring::KILL_RING_MAX;
pub use core_term::{CrosstermTerminal, Terminal};

use completer::PrefixCompleter;
use core_killring::KillRing;
use std::io;
use std::sync::Arc;

/// A line editor bound to a terminal.
pub struct Editor<T: Terminal = CrosstermTerminal> {
    term: T,
    history: Arc<History>,
    kill_ring: KillRing,
    completer: Option<Box<dyn WordCompleter>>,
}

impl Editor<CrosstermTerminal> {
    pub fn new() -> Self {
        Self::with_terminal(CrosstermTerminal::new())
    }
}

impl Default for Editor<CrosstermTerminal> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Terminal> Editor<T> {
    /// Build an editor on an explicit terminal implementation.
    pub fn with_terminal(term: T) -> Self {
        Self {
            term,
            history: Arc::new(History::new()),
            kill_ring: KillRing::new(),
            completer: None,
        }
    }

    /// Install a whole-prefix completer (adapted to the word contract).
    pub fn set_completer(&mut self, completer: impl Completer + 'static) {
        self.completer = Some(Box::new(PrefixCompleter { inner: completer }));
    }

    /// Install a word completer.
    pub fn set_word_completer(&mut self, completer: impl WordCompleter + 'static) {
        self.completer = Some(Box::new(completer));
    }

    /// Append an accepted line to the scrollback history. Call after
    /// [`Editor::prompt`] returns a line worth keeping.
    pub fn append_history(&self, line: &str) {
        self.history.append(line);
    }

    /// Load history entries from a line-oriented reader. Returns the number
    /// of lines read.
    pub fn read_history<R: io::BufRead>(&self, reader: R) -> Result<usize, HistoryError> {
        self.history.read_from(reader)
    }

    /// Write the history, one entry per line. Returns the number of entries
    /// written. Safe to call from another thread while a prompt is active.
    pub fn write_history<W: io::Write>(&self, writer: W) -> io::Result<usize> {
        self.history.write_to(writer)
    }

    /// Shared handle to the history store, e.g. for persisting from a
    /// signal-handling thread.
    pub fn history(&self) -> Arc<History> {
        Arc::clone(&self.history)
    }

    /// Display `text` and interactively edit one line.
    ///
    /// Returns the accepted line, `Err(PromptError::Eof)` for Ctrl-D on an
    /// empty line, or the propagated I/O error. Falls back to a plain
    /// buffered line read on terminals that cannot do interactive editing.
    pub fn prompt(&mut self, text: &str) -> Result<String, PromptError> {
        if !self.term.is_output_terminal() {
            return Err(PromptError::NotATerminal);
        }
        if !self.term.is_supported() {
            return self.prompt_unsupported(text);
        }
        let history = Arc::clone(&self.history);
        let session = history.snapshot();
        let result = self.edit_loop(text, &session);
        let restore = self.term.end_prompt();
        let line = result?;
        restore?;
        Ok(line)
    }

    /// Display `text` and read a line without echoing it.
    ///
    /// Printable keys insert, backspace deletes, `CR`/`LF` accepts, Ctrl-D
    /// on an empty line yields `Eof`, Ctrl-L clears the screen; everything
    /// else beeps. There is no fallback: an unsupported terminal is an
    /// error, since a cooked read would echo the secret.
    pub fn password_prompt(&mut self, text: &str) -> Result<String, PromptError> {
        if !self.term.is_output_terminal() {
            return Err(PromptError::NotATerminal);
        }
        if !self.term.is_supported() {
            return Err(PromptError::UnsupportedTerminal);
        }
        let result = self.password_loop(text);
        let restore = self.term.end_prompt();
        let line = result?;
        restore?;
        Ok(line)
    }

    fn prompt_unsupported(&mut self, text: &str) -> Result<String, PromptError> {
        self.term.write_str(text)?;
        self.term.flush()?;
        match self.term.read_fallback_line()? {
            Some(line) => Ok(line),
            None => Err(PromptError::Eof),
        }
    }
}
