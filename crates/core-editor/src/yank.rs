//! Yank sub-mode.
//!
//! Entered on Ctrl-Y with a non-empty kill ring. The buffer is split at the
//! cursor; the current kill segment is shown between the halves with the
//! cursor after it. Alt-Y rotates the ring to the previous (older) segment
//! and redraws; any other key commits what is shown and is handed back for
//! re-dispatch — so a Ctrl-Y here commits and immediately starts a fresh
//! yank in the outer loop.

use core_keys::{Action, Key};
use core_term::Terminal;

use crate::line_buffer::LineBuffer;
use crate::prompt::Replacement;
use crate::{Editor, PromptError};

impl<T: Terminal> Editor<T> {
    pub(crate) fn yank(
        &mut self,
        prompt: &str,
        line: &LineBuffer,
    ) -> Result<Replacement, PromptError> {
        let head = line.chars()[..line.pos()].to_vec();
        let tail = line.chars()[line.pos()..].to_vec();

        loop {
            let segment: Vec<char> = self
                .kill_ring
                .current()
                .map(<[char]>::to_vec)
                .unwrap_or_default();

            let mut display = Vec::with_capacity(head.len() + segment.len() + tail.len());
            display.extend_from_slice(&head);
            display.extend_from_slice(&segment);
            display.extend_from_slice(&tail);
            let cursor = head.len() + segment.len();
            core_render::refresh(&mut self.term, prompt, &display, cursor)?;

            match self.term.read_key()? {
                Key::Act(Action::AltY) => self.kill_ring.rotate_back(),
                next => return Ok((display, cursor, next)),
            }
        }
    }
}
