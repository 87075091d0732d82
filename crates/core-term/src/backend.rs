//! Crossterm-backed terminal implementation.
//!
//! Raw mode is entered lazily by `start_prompt` and left by `end_prompt`, so
//! output between prompt sessions behaves like an ordinary cooked terminal.
//! Drop restores the terminal even on an early return or panic.

use std::io::{self, BufRead, Stdout, Write};

use core_keys::{Action, Key};
use crossterm::tty::IsTty;
use crossterm::{cursor, event, queue, terminal};
use tracing::{debug, trace};

use crate::decode::map_key_event;
use crate::Terminal;

/// Width assumed when the terminal will not report one.
const FALLBACK_COLUMNS: usize = 80;

/// Terminal types that cannot do cursor-addressed editing.
const UNSUPPORTED_TERMS: &[&str] = &["", "dumb", "cons25"];

pub struct CrosstermTerminal {
    out: Stdout,
    columns: usize,
    raw: bool,
    output_tty: bool,
    supported: bool,
}

impl CrosstermTerminal {
    pub fn new() -> Self {
        let out = io::stdout();
        let output_tty = out.is_tty();
        let input_tty = io::stdin().is_tty();
        let term = std::env::var("TERM").unwrap_or_default();
        let supported = input_tty && !UNSUPPORTED_TERMS.contains(&term.as_str());
        debug!(
            target: "term",
            output_tty,
            input_tty,
            term = %term,
            supported,
            "backend_init"
        );
        Self {
            out,
            columns: 0,
            raw: false,
            output_tty,
            supported,
        }
    }
}

impl Default for CrosstermTerminal {
    fn default() -> Self {
        Self::new()
    }
}

impl Terminal for CrosstermTerminal {
    fn read_key(&mut self) -> io::Result<Key> {
        loop {
            match event::read()? {
                event::Event::Key(k) => {
                    if let Some(key) = map_key_event(&k) {
                        trace!(target: "term.input", key = ?key, "read_key");
                        return Ok(key);
                    }
                }
                event::Event::Resize(cols, _) => {
                    self.columns = cols as usize;
                    return Ok(Key::Act(Action::Winch));
                }
                _ => {}
            }
        }
    }

    fn start_prompt(&mut self) -> io::Result<()> {
        if !self.raw {
            terminal::enable_raw_mode()?;
            self.raw = true;
            trace!(target: "term", "raw_mode_enter");
        }
        Ok(())
    }

    fn end_prompt(&mut self) -> io::Result<()> {
        if self.raw {
            terminal::disable_raw_mode()?;
            self.raw = false;
            trace!(target: "term", "raw_mode_leave");
        }
        Ok(())
    }

    fn refresh_columns(&mut self) -> usize {
        self.columns = terminal::size()
            .map(|(cols, _)| cols as usize)
            .unwrap_or(0);
        if self.columns == 0 {
            self.columns = FALLBACK_COLUMNS;
        }
        self.columns
    }

    fn columns(&self) -> usize {
        if self.columns == 0 {
            FALLBACK_COLUMNS
        } else {
            self.columns
        }
    }

    fn move_to_column(&mut self, col: usize) -> io::Result<()> {
        queue!(self.out, cursor::MoveToColumn(col.min(u16::MAX as usize) as u16))
    }

    fn erase_line(&mut self) -> io::Result<()> {
        queue!(self.out, terminal::Clear(terminal::ClearType::UntilNewLine))
    }

    fn erase_screen(&mut self) -> io::Result<()> {
        queue!(
            self.out,
            terminal::Clear(terminal::ClearType::All),
            cursor::MoveTo(0, 0)
        )
    }

    fn beep(&mut self) {
        let _ = self.out.write_all(b"\x07");
        let _ = self.out.flush();
    }

    fn write_str(&mut self, s: &str) -> io::Result<()> {
        self.out.write_all(s.as_bytes())
    }

    fn write_char(&mut self, c: char) -> io::Result<()> {
        let mut buf = [0u8; 4];
        self.out.write_all(c.encode_utf8(&mut buf).as_bytes())
    }

    fn write_newline(&mut self) -> io::Result<()> {
        // Raw mode disables output post-processing; emit an explicit CRLF.
        self.out.write_all(b"\r\n")
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    fn is_output_terminal(&self) -> bool {
        self.output_tty
    }

    fn is_supported(&self) -> bool {
        self.supported
    }

    fn read_fallback_line(&mut self) -> io::Result<Option<String>> {
        self.end_prompt()?;
        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        Ok(Some(line))
    }
}

impl Drop for CrosstermTerminal {
    fn drop(&mut self) {
        let _ = self.end_prompt();
    }
}
