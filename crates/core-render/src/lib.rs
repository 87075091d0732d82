//! Single-line viewport and refresh policy.
//!
//! A logical line can be wider than the terminal. The viewport selects the
//! window of the buffer to draw: when everything fits, the whole buffer;
//! otherwise a window centered on the cursor, clamped to the buffer edges,
//! with `{` / `}` markers standing in for the text cut off on either side.
//! One column is always reserved for the cursor itself.
//!
//! The window arithmetic is a pure function over
//! `(prompt width, buffer length, cursor, columns)` so it can be tested
//! without a terminal; [`refresh`] drives a [`Terminal`] with the result.
//!
//! Width accounting strips ANSI color sequences (`ESC [^m]* m`) from the
//! prompt first; the stripped code-point count is the prompt's rendered
//! column count.

use std::io;

use core_term::Terminal;

/// Marker drawn when buffer text is cut off left of the window.
pub const LEFT_MARKER: char = '{';
/// Marker drawn when buffer text is cut off right of the window.
pub const RIGHT_MARKER: char = '}';

/// The visible slice of a buffer plus cursor placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    /// First buffer index drawn (after marker reservation).
    pub start: usize,
    /// One past the last buffer index drawn.
    pub end: usize,
    pub left_marker: bool,
    pub right_marker: bool,
    /// Terminal column the cursor lands on after drawing.
    pub cursor_col: usize,
}

/// Compute the visible window for a buffer of `b_len` code points with the
/// cursor at `pos`, after a prompt `p_len` columns wide, on a terminal
/// `columns` wide.
pub fn plan_window(p_len: usize, b_len: usize, pos: usize, columns: usize) -> Window {
    debug_assert!(pos <= b_len);
    // One column is reserved for the cursor sitting past the window text.
    let space = columns.saturating_sub(p_len + 1);
    if b_len <= space {
        return Window {
            start: 0,
            end: b_len,
            left_marker: false,
            right_marker: false,
            cursor_col: p_len + pos,
        };
    }

    let mut start = pos as isize - (space / 2) as isize;
    let mut end = start + space as isize;
    if end > b_len as isize {
        end = b_len as isize;
        start = end - space as isize;
    }
    if start < 0 {
        start = 0;
        end = space as isize;
    }
    let cursor_col = p_len + (pos as isize - start) as usize;

    let mut start = start as usize;
    let mut end = end as usize;
    let left_marker = start > 0;
    let right_marker = end < b_len;
    if left_marker {
        start += 1;
    }
    if right_marker {
        end -= 1;
    }
    // Marker reservation can cross on terminals narrower than three columns
    // of buffer space; render an empty window rather than a reversed slice.
    if start > end {
        start = end;
    }
    Window {
        start,
        end,
        left_marker,
        right_marker,
        cursor_col,
    }
}

/// Remove ANSI color sequences (`ESC [^m]* m`). An escape with no terminating
/// `m` is left as-is.
pub fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(esc) = rest.find('\u{1b}') {
        out.push_str(&rest[..esc]);
        let tail = &rest[esc..];
        match tail.find('m') {
            Some(m) => rest = &tail[m + 'm'.len_utf8()..],
            None => {
                out.push_str(tail);
                return out;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Rendered column count of a prompt: code points after ANSI stripping.
pub fn visible_width(s: &str) -> usize {
    strip_ansi(s).chars().count()
}

/// Redraw the prompt row: prompt, visible buffer window with markers, erase
/// to end of line, cursor placed at its column.
pub fn refresh<T: Terminal + ?Sized>(
    term: &mut T,
    prompt: &str,
    buf: &[char],
    pos: usize,
) -> io::Result<()> {
    term.move_to_column(0)?;
    term.write_str(prompt)?;
    let p_len = visible_width(prompt);
    let w = plan_window(p_len, buf.len(), pos, term.columns());
    if w.left_marker {
        term.write_char(LEFT_MARKER)?;
    }
    let visible: String = buf[w.start..w.end].iter().collect();
    term.write_str(&visible)?;
    if w.right_marker {
        term.write_char(RIGHT_MARKER)?;
    }
    term.erase_line()?;
    term.move_to_column(w.cursor_col)?;
    term.flush()
}
