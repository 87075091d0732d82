//! Reverse incremental history search (Ctrl-R), bash style.
//!
//! The sub-mode keeps its own pattern buffer, distinct from the main line,
//! and renders through the shared viewport with the prompt
//! `` (reverse-i-search)`<pattern>':  `` followed by the best match. Matches
//! are the history entries containing the pattern, oldest to newest, each
//! paired with the code-point offset of the first occurrence; the cursor
//! lands on that offset when the search commits.
//!
//! Keys: printable code points extend the pattern, backspace shortens it
//! (both jump to the newest match), Ctrl-R steps to an older match, Ctrl-S
//! back to a newer one, Ctrl-G cancels back to the original line. Any other
//! key commits the shown match and is re-dispatched by the main loop.

use core_history::HistoryView;
use core_keys::{ctrl, Key, BS, ESC};
use core_term::Terminal;
use tracing::trace;

use crate::line_buffer::LineBuffer;
use crate::prompt::Replacement;
use crate::{Editor, PromptError};

fn search_prompt(pattern: &[char]) -> String {
    let pattern: String = pattern.iter().collect();
    format!("(reverse-i-search)`{pattern}': ")
}

/// Jump to the newest entry matching `pattern`, clearing the found line when
/// nothing matches.
fn retarget(
    history: &HistoryView<'_>,
    pattern: &[char],
    matches: &mut Vec<(String, usize)>,
    match_idx: &mut usize,
    found_line: &mut String,
    found_pos: &mut usize,
) {
    let pattern: String = pattern.iter().collect();
    *matches = history.by_pattern(&pattern);
    *match_idx = matches.len().saturating_sub(1);
    match matches.last() {
        Some((entry, offset)) => {
            *found_line = entry.clone();
            *found_pos = *offset;
        }
        None => {
            found_line.clear();
            *found_pos = 0;
        }
    }
}

impl<T: Terminal> Editor<T> {
    pub(crate) fn reverse_isearch(
        &mut self,
        line: &LineBuffer,
        history: &HistoryView<'_>,
    ) -> Result<Replacement, PromptError> {
        trace!(target: "editor.search", "enter");
        core_render::refresh(&mut self.term, &search_prompt(&[]), line.chars(), line.pos())?;

        let mut pattern: Vec<char> = Vec::new();
        let mut found_line = String::new();
        let mut found_pos = 0usize;
        let mut matches: Vec<(String, usize)> = Vec::new();
        let mut match_idx = 0usize;

        loop {
            let key = self.term.read_key()?;
            match key {
                Key::Char(c) => match c {
                    ctrl::R => {
                        // Older match.
                        if !matches.is_empty() && match_idx > 0 {
                            match_idx -= 1;
                            found_line = matches[match_idx].0.clone();
                            found_pos = matches[match_idx].1;
                        } else {
                            self.term.beep();
                        }
                    }
                    ctrl::S => {
                        // Newer match.
                        if !matches.is_empty() && match_idx + 1 < matches.len() {
                            match_idx += 1;
                            found_line = matches[match_idx].0.clone();
                            found_pos = matches[match_idx].1;
                        } else {
                            self.term.beep();
                        }
                    }
                    ctrl::H | BS => {
                        if pattern.pop().is_some() {
                            retarget(
                                history,
                                &pattern,
                                &mut matches,
                                &mut match_idx,
                                &mut found_line,
                                &mut found_pos,
                            );
                        } else {
                            self.term.beep();
                        }
                    }
                    ctrl::G => {
                        trace!(target: "editor.search", "cancel");
                        return Ok((line.chars().to_vec(), line.pos(), Key::Char(ESC)));
                    }
                    // Every other control code commits the found line and is
                    // re-dispatched (CR accepts it, Esc just keeps it, ...).
                    c if (c as u32) < 32 => {
                        return Ok((found_line.chars().collect(), found_pos, key));
                    }
                    c => {
                        pattern.push(c);
                        retarget(
                            history,
                            &pattern,
                            &mut matches,
                            &mut match_idx,
                            &mut found_line,
                            &mut found_pos,
                        );
                    }
                },
                Key::Act(_) => {
                    return Ok((found_line.chars().collect(), found_pos, key));
                }
            }
            let shown: Vec<char> = found_line.chars().collect();
            core_render::refresh(&mut self.term, &search_prompt(&pattern), &shown, found_pos)?;
        }
    }
}
