//! The interactive prompt loop.
//!
//! One iteration: read a key, run the pre-dispatch hooks (tab completion,
//! yank, reverse search — each may consume further keys and hand back a
//! replacement line plus the key that ended it), dispatch, then bookkeeping.
//!
//! Bookkeeping invariants per iteration:
//! * After any non-history action the prefix-history list is recomputed from
//!   the current buffer and the history cursor points one past its newest
//!   entry (the in-progress line).
//! * The kill latch is set to 2 by a kill and decremented once per
//!   iteration, so a kill is *consecutive* exactly when the previous
//!   iteration also killed; consecutive kills coalesce into one segment.

use std::io;

use core_history::HistoryView;
use core_keys::{ctrl, Action, Key, BS, CR, ESC, LF, TAB};
use core_killring::KillMode;
use core_render::visible_width;
use core_term::Terminal;
use tracing::debug;

use crate::line_buffer::LineBuffer;
use crate::{Editor, PromptError};

/// What a sub-mode hands back: replacement line, cursor, and the key that
/// terminated it, which the main loop re-dispatches instead of reading again.
pub(crate) type Replacement = (Vec<char>, usize, Key);

impl<T: Terminal> Editor<T> {
    pub(crate) fn refresh(&mut self, prompt: &str, line: &LineBuffer) -> io::Result<()> {
        core_render::refresh(&mut self.term, prompt, line.chars(), line.pos())
    }

    pub(crate) fn edit_loop(
        &mut self,
        prompt: &str,
        history: &HistoryView<'_>,
    ) -> Result<String, PromptError> {
        self.term.start_prompt()?;
        let columns = self.term.refresh_columns();
        debug!(target: "editor", columns, history_len = history.len(), "session_start");

        self.term.write_str(prompt)?;
        self.term.flush()?;
        let p_len = visible_width(prompt);

        let mut line = LineBuffer::new();
        let mut history_end = String::new();
        let mut prefix_history = history.by_prefix("");
        let mut history_pos = prefix_history.len();
        let mut kill_latch: u8 = 0;

        loop {
            let mut history_action = false;
            let mut key = self.term.read_key()?;

            // Pre-dispatch hooks. Each sub-mode captures the key stream and
            // returns the key that ended it for normal dispatch below.
            if key.is_char(TAB) {
                let (chars, pos, next) = self.tab_complete(prompt, &line)?;
                line.set(chars, pos);
                key = next;
                self.refresh(prompt, &line)?;
            }
            while key.is_char(ctrl::Y) && !self.kill_ring.is_empty() {
                let (chars, pos, next) = self.yank(prompt, &line)?;
                line.set(chars, pos);
                key = next;
            }
            if key.is_char(ctrl::R) {
                let (chars, pos, next) = self.reverse_isearch(&line, history)?;
                line.set(chars, pos);
                key = next;
                self.refresh(prompt, &line)?;
            }

            match key {
                Key::Char(c) => match c {
                    CR | LF => {
                        self.term.write_newline()?;
                        self.term.flush()?;
                        break;
                    }
                    ctrl::A => {
                        line.move_home();
                        self.refresh(prompt, &line)?;
                    }
                    ctrl::E => {
                        line.move_end();
                        self.refresh(prompt, &line)?;
                    }
                    ctrl::B => {
                        if line.move_left() {
                            self.refresh(prompt, &line)?;
                        } else {
                            self.term.beep();
                        }
                    }
                    ctrl::F => {
                        if line.move_right() {
                            self.refresh(prompt, &line)?;
                        } else {
                            self.term.beep();
                        }
                    }
                    ctrl::D => {
                        if line.is_empty() {
                            debug!(target: "editor", "eof");
                            return Err(PromptError::Eof);
                        }
                        // A Ctrl-D is a potential end-of-input, so the
                        // reader may have shut down; re-arm it before
                        // treating the key as delete-forward.
                        self.term.start_prompt()?;
                        if line.delete_at() {
                            self.refresh(prompt, &line)?;
                        } else {
                            self.term.beep();
                        }
                    }
                    ctrl::K => {
                        if line.at_end() {
                            self.term.beep();
                        } else {
                            let killed = line.kill_to_end();
                            let mode = if kill_latch > 0 {
                                KillMode::Append
                            } else {
                                KillMode::New
                            };
                            self.kill_ring.push(&killed, mode);
                            kill_latch = 2;
                            self.refresh(prompt, &line)?;
                        }
                    }
                    ctrl::U => {
                        let killed = line.kill_to_start();
                        if !killed.is_empty() {
                            let mode = if kill_latch > 0 {
                                KillMode::Prepend
                            } else {
                                KillMode::New
                            };
                            self.kill_ring.push(&killed, mode);
                            kill_latch = 2;
                        }
                        self.refresh(prompt, &line)?;
                    }
                    ctrl::W => {
                        if line.pos() == 0 {
                            self.term.beep();
                        } else {
                            let killed = line.kill_word_left();
                            let mode = if kill_latch > 0 {
                                KillMode::Prepend
                            } else {
                                KillMode::New
                            };
                            self.kill_ring.push(&killed, mode);
                            kill_latch = 2;
                            self.refresh(prompt, &line)?;
                        }
                    }
                    ctrl::T => {
                        if line.transpose() {
                            self.refresh(prompt, &line)?;
                        } else {
                            self.term.beep();
                        }
                    }
                    ctrl::L => {
                        self.term.erase_screen()?;
                        self.refresh(prompt, &line)?;
                    }
                    ctrl::H | BS => {
                        if line.backspace() {
                            self.refresh(prompt, &line)?;
                        } else {
                            self.term.beep();
                        }
                    }
                    ctrl::P => {
                        history_action = true;
                        if history_prev(
                            &mut line,
                            &prefix_history,
                            &mut history_pos,
                            &mut history_end,
                        ) {
                            self.refresh(prompt, &line)?;
                        } else {
                            self.term.beep();
                        }
                    }
                    ctrl::N => {
                        history_action = true;
                        if history_next(
                            &mut line,
                            &prefix_history,
                            &mut history_pos,
                            &history_end,
                        ) {
                            self.refresh(prompt, &line)?;
                        } else {
                            self.term.beep();
                        }
                    }
                    ESC => {}
                    // Consumed by the hooks above when applicable, reserved,
                    // or unhandled control codes: all beep.
                    TAB
                    | ctrl::R
                    | ctrl::Y
                    | ctrl::G
                    | ctrl::O
                    | ctrl::Q
                    | ctrl::S
                    | ctrl::V
                    | ctrl::X
                    | ctrl::Z
                    | ctrl::C
                    | '\0'
                    | '\u{1c}'..='\u{1f}' => {
                        self.term.beep();
                    }
                    c if (c as u32) >= 32 => {
                        // Appending inside the row needs no redraw; echo the
                        // code point and move on.
                        if line.at_end()
                            && p_len + line.len() < self.term.columns().saturating_sub(1)
                        {
                            line.insert(c);
                            self.term.write_char(c)?;
                            self.term.flush()?;
                        } else {
                            line.insert(c);
                            self.refresh(prompt, &line)?;
                        }
                    }
                    _ => {
                        self.term.beep();
                    }
                },
                Key::Act(a) => {
                    match a {
                        Action::Delete => {
                            if !line.delete_at() {
                                self.term.beep();
                            }
                        }
                        Action::Left => {
                            if !line.move_left() {
                                self.term.beep();
                            }
                        }
                        Action::Right => {
                            if !line.move_right() {
                                self.term.beep();
                            }
                        }
                        Action::WordLeft => {
                            if !line.word_left() {
                                self.term.beep();
                            }
                        }
                        Action::WordRight => {
                            if !line.word_right() {
                                self.term.beep();
                            }
                        }
                        Action::Up => {
                            history_action = true;
                            if !history_prev(
                                &mut line,
                                &prefix_history,
                                &mut history_pos,
                                &mut history_end,
                            ) {
                                self.term.beep();
                            }
                        }
                        Action::Down => {
                            history_action = true;
                            if !history_next(
                                &mut line,
                                &prefix_history,
                                &mut history_pos,
                                &history_end,
                            ) {
                                self.term.beep();
                            }
                        }
                        Action::Home => line.move_home(),
                        Action::End => line.move_end(),
                        Action::Winch => {
                            self.term.refresh_columns();
                        }
                        _ => {}
                    }
                    self.refresh(prompt, &line)?;
                }
            }

            if !history_action {
                prefix_history = history.by_prefix(&line.to_string());
                history_pos = prefix_history.len();
            }
            if kill_latch > 0 {
                kill_latch -= 1;
            }
        }

        let accepted = line.to_string();
        debug!(target: "editor", chars = accepted.chars().count(), "accepted");
        Ok(accepted)
    }
}

/// Step to the previous (older) prefix-history entry. Saves the in-progress
/// line the first time the cursor leaves it. False at the oldest entry.
fn history_prev(
    line: &mut LineBuffer,
    prefix_history: &[String],
    history_pos: &mut usize,
    history_end: &mut String,
) -> bool {
    if *history_pos == 0 {
        return false;
    }
    if *history_pos == prefix_history.len() {
        *history_end = line.to_string();
    }
    *history_pos -= 1;
    line.set_text(&prefix_history[*history_pos]);
    true
}

/// Step to the next (newer) prefix-history entry, restoring the saved
/// in-progress line when stepping past the newest. False past the newest.
fn history_next(
    line: &mut LineBuffer,
    prefix_history: &[String],
    history_pos: &mut usize,
    history_end: &str,
) -> bool {
    if *history_pos >= prefix_history.len() {
        return false;
    }
    *history_pos += 1;
    if *history_pos == prefix_history.len() {
        line.set_text(history_end);
    } else {
        line.set_text(&prefix_history[*history_pos]);
    }
    true
}
