//! Thread-safe bounded scrollback history.
//!
//! The store keeps at most [`HISTORY_LIMIT`] entries in order, evicting the
//! oldest on overflow, and suppresses consecutive duplicates on append.
//! Entries are newline-free UTF-8 strings.
//!
//! Locking discipline: queries and [`History::write_to`] take the read lock;
//! [`History::append`] and [`History::read_from`] take the write lock. A
//! prompt session pins the store with [`History::snapshot`] for its whole
//! duration, so history is observable but cannot mutate mid-session.
//! `write_to` is the one operation safe to call from another thread while a
//! prompt is active, so a watchdog can persist history during an abnormal
//! exit.
//!
//! File format: one entry per line, LF-terminated. The reader rejects lines
//! longer than [`MAX_ENTRY_BYTES`] and lines that are not valid UTF-8, naming
//! the 1-based offending line.

use std::io::{self, BufRead, Write};
use std::sync::{RwLock, RwLockReadGuard};

use thiserror::Error;
use tracing::debug;

/// Maximum number of entries kept in the scrollback history.
pub const HISTORY_LIMIT: usize = 1000;

/// Maximum byte length of a single history file line (terminator excluded).
pub const MAX_ENTRY_BYTES: usize = 4096;

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("history line {line} is too long")]
    LineTooLong { line: usize },
    #[error("history line {line} is not valid UTF-8")]
    InvalidUtf8 { line: usize },
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Ordered list of previously accepted lines.
#[derive(Debug, Default)]
pub struct History {
    entries: RwLock<Vec<String>>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.read_guard().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read_guard().is_empty()
    }

    /// Append an accepted line. Appending a string equal to the newest entry
    /// is a no-op; a trailing line terminator is stripped. Takes the write
    /// lock.
    pub fn append(&self, item: &str) {
        let item = item.trim_end_matches(['\n', '\r']);
        let mut entries = self.write_guard();
        if entries.last().is_some_and(|last| last == item) {
            return;
        }
        entries.push(item.to_owned());
        if entries.len() > HISTORY_LIMIT {
            entries.remove(0);
        }
    }

    /// Load entries from a line-oriented reader, appending them in order
    /// under the same eviction rule as [`History::append`]. Returns the
    /// number of lines read. Takes the write lock.
    pub fn read_from<R: BufRead>(&self, mut reader: R) -> Result<usize, HistoryError> {
        let mut entries = self.write_guard();
        let mut num = 0usize;
        let mut raw = Vec::new();
        loop {
            raw.clear();
            if reader.read_until(b'\n', &mut raw)? == 0 {
                break;
            }
            if raw.last() == Some(&b'\n') {
                raw.pop();
                if raw.last() == Some(&b'\r') {
                    raw.pop();
                }
            }
            if raw.len() > MAX_ENTRY_BYTES {
                return Err(HistoryError::LineTooLong { line: num + 1 });
            }
            let line = std::str::from_utf8(&raw)
                .map_err(|_| HistoryError::InvalidUtf8 { line: num + 1 })?;
            num += 1;
            entries.push(line.to_owned());
            if entries.len() > HISTORY_LIMIT {
                entries.remove(0);
            }
        }
        debug!(target: "history", lines = num, total = entries.len(), "read");
        Ok(num)
    }

    /// Write every entry followed by LF. Returns the number of entries
    /// written. Takes the read lock, so this may run concurrently with an
    /// active prompt session.
    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<usize> {
        let entries = self.read_guard();
        let mut num = 0usize;
        for item in entries.iter() {
            writeln!(writer, "{item}")?;
            num += 1;
        }
        debug!(target: "history", lines = num, "write");
        Ok(num)
    }

    /// Pin the store for shared access. Queries on the returned view see a
    /// stable history until the view is dropped.
    pub fn snapshot(&self) -> HistoryView<'_> {
        HistoryView {
            entries: self.read_guard(),
        }
    }

    fn read_guard(&self) -> RwLockReadGuard<'_, Vec<String>> {
        self.entries.read().expect("history lock poisoned")
    }

    fn write_guard(&self) -> std::sync::RwLockWriteGuard<'_, Vec<String>> {
        self.entries.write().expect("history lock poisoned")
    }
}

/// Read-locked view of the history used by a prompt session.
pub struct HistoryView<'a> {
    entries: RwLockReadGuard<'a, Vec<String>>,
}

impl HistoryView<'_> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries starting with `prefix`, oldest first.
    pub fn by_prefix(&self, prefix: &str) -> Vec<String> {
        self.entries
            .iter()
            .filter(|e| e.starts_with(prefix))
            .cloned()
            .collect()
    }

    /// Entries containing `pattern`, oldest first, paired with the code-point
    /// offset of the first occurrence. An empty pattern matches nothing.
    pub fn by_pattern(&self, pattern: &str) -> Vec<(String, usize)> {
        if pattern.is_empty() {
            return Vec::new();
        }
        self.entries
            .iter()
            .filter_map(|e| {
                e.find(pattern)
                    .map(|byte_off| (e.clone(), e[..byte_off].chars().count()))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::sync::Arc;

    #[test]
    fn append_suppresses_consecutive_duplicates() {
        let h = History::new();
        h.append("ls");
        h.append("ls");
        h.append("cd /");
        h.append("ls");
        assert_eq!(h.len(), 3);
        let view = h.snapshot();
        assert_eq!(view.by_prefix(""), vec!["ls", "cd /", "ls"]);
    }

    #[test]
    fn append_strips_trailing_terminator() {
        let h = History::new();
        h.append("make test\n");
        assert_eq!(h.snapshot().by_prefix(""), vec!["make test"]);
    }

    #[test]
    fn append_evicts_oldest_at_limit() {
        let h = History::new();
        for i in 0..=HISTORY_LIMIT {
            h.append(&format!("cmd {i}"));
        }
        assert_eq!(h.len(), HISTORY_LIMIT);
        let view = h.snapshot();
        assert_eq!(view.by_prefix("cmd 0").len(), 0, "oldest entry evicted");
        assert_eq!(view.by_prefix(&format!("cmd {HISTORY_LIMIT}")).len(), 1);
    }

    #[test]
    fn read_from_counts_lines_and_preserves_order() {
        let h = History::new();
        let num = h
            .read_from(Cursor::new("git status\ngit push\n"))
            .expect("well-formed input");
        assert_eq!(num, 2);
        assert_eq!(h.snapshot().by_prefix("git"), vec!["git status", "git push"]);
    }

    #[test]
    fn read_from_accepts_missing_final_terminator() {
        let h = History::new();
        let num = h.read_from(Cursor::new("one\ntwo")).unwrap();
        assert_eq!(num, 2);
        assert_eq!(h.snapshot().by_prefix(""), vec!["one", "two"]);
    }

    #[test]
    fn read_from_rejects_invalid_utf8_with_line_number() {
        let h = History::new();
        let err = h
            .read_from(Cursor::new(&b"fine\n\xff\xfe\nmore\n"[..]))
            .unwrap_err();
        match err {
            HistoryError::InvalidUtf8 { line } => assert_eq!(line, 2),
            other => panic!("expected InvalidUtf8, got {other:?}"),
        }
    }

    #[test]
    fn read_from_rejects_overlong_line_with_line_number() {
        let h = History::new();
        let long = "x".repeat(MAX_ENTRY_BYTES + 1);
        let err = h
            .read_from(Cursor::new(format!("ok\n{long}\n")))
            .unwrap_err();
        match err {
            HistoryError::LineTooLong { line } => assert_eq!(line, 2),
            other => panic!("expected LineTooLong, got {other:?}"),
        }
    }

    #[test]
    fn write_then_read_round_trips() {
        let h = History::new();
        h.append("first");
        h.append("söme ünïcode");
        h.append("last");
        let mut out = Vec::new();
        assert_eq!(h.write_to(&mut out).unwrap(), 3);

        let reloaded = History::new();
        assert_eq!(reloaded.read_from(Cursor::new(out)).unwrap(), 3);
        assert_eq!(
            reloaded.snapshot().by_prefix(""),
            vec!["first", "söme ünïcode", "last"]
        );
    }

    #[test]
    fn by_pattern_reports_code_point_offsets() {
        let h = History::new();
        h.append("make test");
        h.append("täst make");
        let view = h.snapshot();
        let matches = view.by_pattern("make");
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0], ("make test".to_owned(), 0));
        // Byte offset of "make" is 6 ('ä' is two bytes); code points say 5.
        assert_eq!(matches[1], ("täst make".to_owned(), 5));
    }

    #[test]
    fn by_pattern_empty_matches_nothing() {
        let h = History::new();
        h.append("anything");
        assert!(h.snapshot().by_pattern("").is_empty());
    }

    #[test]
    fn write_to_runs_concurrently_with_a_pinned_snapshot() {
        let h = Arc::new(History::new());
        h.append("persisted");
        let view = h.snapshot();

        let bg = Arc::clone(&h);
        let handle = std::thread::spawn(move || {
            let mut out = Vec::new();
            bg.write_to(&mut out).map(|n| (n, out))
        });
        let (num, out) = handle.join().unwrap().unwrap();
        assert_eq!(num, 1);
        assert_eq!(out, b"persisted\n");
        assert_eq!(view.len(), 1, "snapshot stays valid throughout");
    }
}
