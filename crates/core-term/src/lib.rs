//! Terminal capability consumed by the editor core.
//!
//! The editor never touches a device directly; it drives this trait. The
//! production implementation is [`CrosstermTerminal`]; tests supply scripted
//! in-memory implementations.
//!
//! Contract notes:
//! * [`Terminal::read_key`] blocks until one logical key is available. It is
//!   the only suspension point inside a prompt session.
//! * [`Terminal::start_prompt`] arms input decoding. It must be safe to call
//!   while already armed: the editor re-arms after a Ctrl-D that turned out
//!   to mean delete-forward rather than end-of-input.
//! * The cursor primitives address columns of the current row only; the
//!   editor is a single-line editor.
//! * `is_output_terminal` / `is_supported` gate which prompt variant runs.

mod backend;
pub mod decode;

pub use backend::CrosstermTerminal;

use core_keys::Key;
use std::io;

pub trait Terminal {
    /// Block until the next logical key.
    fn read_key(&mut self) -> io::Result<Key>;

    /// Prepare the input side for interactive reads (idempotent).
    fn start_prompt(&mut self) -> io::Result<()>;

    /// Undo `start_prompt`, restoring the terminal for ordinary line output.
    fn end_prompt(&mut self) -> io::Result<()>;

    /// Re-query the terminal width and return the fresh value.
    fn refresh_columns(&mut self) -> usize;

    /// Cached terminal width in columns.
    fn columns(&self) -> usize;

    fn move_to_column(&mut self, col: usize) -> io::Result<()>;

    /// Erase from the cursor to the end of the current row.
    fn erase_line(&mut self) -> io::Result<()>;

    /// Erase the whole screen and home the cursor.
    fn erase_screen(&mut self) -> io::Result<()>;

    /// Sound the terminal bell. Best effort; failures are swallowed.
    fn beep(&mut self);

    fn write_str(&mut self, s: &str) -> io::Result<()>;

    fn write_char(&mut self, c: char) -> io::Result<()>;

    /// Move to the start of the next row (raw-mode aware).
    fn write_newline(&mut self) -> io::Result<()>;

    fn flush(&mut self) -> io::Result<()>;

    /// Whether standard output is attached to a terminal at all.
    fn is_output_terminal(&self) -> bool;

    /// Whether the terminal supports interactive editing.
    fn is_supported(&self) -> bool;

    /// Plain buffered line read for unsupported terminals. Returns `None` at
    /// end of input; the returned line has its terminator stripped.
    fn read_fallback_line(&mut self) -> io::Result<Option<String>>;
}
