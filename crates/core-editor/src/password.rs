//! Password prompt: a stripped-down dispatcher with no echo.
//!
//! Only the prompt text is ever drawn. Printable keys insert silently,
//! backspace deletes, `CR`/`LF` accepts, Ctrl-D on an empty line is
//! end-of-input (and re-arms the reader otherwise), Ctrl-L redraws a bare
//! prompt after clearing the screen. Everything else, named actions
//! included, beeps.

use core_keys::{ctrl, Key, BS, CR, LF};
use core_term::Terminal;

use crate::line_buffer::LineBuffer;
use crate::{Editor, PromptError};

impl<T: Terminal> Editor<T> {
    pub(crate) fn password_loop(&mut self, prompt: &str) -> Result<String, PromptError> {
        self.term.start_prompt()?;
        self.term.refresh_columns();
        self.term.write_str(prompt)?;
        self.term.flush()?;

        let mut line = LineBuffer::new();
        loop {
            match self.term.read_key()? {
                Key::Char(c) => match c {
                    CR | LF => {
                        self.term.write_newline()?;
                        self.term.flush()?;
                        break;
                    }
                    ctrl::D => {
                        if line.is_empty() {
                            return Err(PromptError::Eof);
                        }
                        // Potential end-of-input; re-arm the reader.
                        self.term.start_prompt()?;
                    }
                    ctrl::L => {
                        self.term.erase_screen()?;
                        core_render::refresh(&mut self.term, prompt, &[], 0)?;
                    }
                    ctrl::H | BS => {
                        if !line.backspace() {
                            self.term.beep();
                        }
                    }
                    c if (c as u32) >= 32 => line.insert(c),
                    _ => self.term.beep(),
                },
                Key::Act(_) => self.term.beep(),
            }
        }
        Ok(line.to_string())
    }
}
