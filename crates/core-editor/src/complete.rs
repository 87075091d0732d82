//! Tab-completion sub-mode.
//!
//! Entered on Tab. Candidates come from the caller's completer; the sub-mode
//! cycles through them in place (Tab forward, Shift-Tab backward, both
//! wrapping), Esc restores the original line, and any other key commits the
//! shown candidate and is handed back for re-dispatch. With no completer or
//! no candidates the Tab itself is handed back, which the dispatcher turns
//! into a beep.

use core_keys::{Action, Key, ESC, TAB};
use core_term::Terminal;
use tracing::trace;

use crate::line_buffer::LineBuffer;
use crate::prompt::Replacement;
use crate::{Editor, PromptError};

impl<T: Terminal> Editor<T> {
    pub(crate) fn tab_complete(
        &mut self,
        prompt: &str,
        line: &LineBuffer,
    ) -> Result<Replacement, PromptError> {
        let unchanged = || (line.chars().to_vec(), line.pos(), Key::Char(TAB));
        let (head, candidates, tail) = match self.completer.as_ref() {
            Some(completer) => completer.complete(&line.to_string(), line.pos()),
            None => return Ok(unchanged()),
        };
        if candidates.is_empty() {
            return Ok(unchanged());
        }
        trace!(target: "editor.complete", candidates = candidates.len(), "enter");

        let head_len = head.chars().count();
        let mut entry = 0usize;
        loop {
            let pick = &candidates[entry];
            let display: Vec<char> = head
                .chars()
                .chain(pick.chars())
                .chain(tail.chars())
                .collect();
            let cursor = head_len + pick.chars().count();
            core_render::refresh(&mut self.term, prompt, &display, cursor)?;

            match self.term.read_key()? {
                Key::Char(TAB) => entry = (entry + 1) % candidates.len(),
                Key::Act(Action::ShiftTab) => {
                    entry = entry.checked_sub(1).unwrap_or(candidates.len() - 1);
                }
                Key::Char(ESC) => return Ok((line.chars().to_vec(), line.pos(), Key::Char(ESC))),
                next => return Ok((display, cursor, next)),
            }
        }
    }
}
