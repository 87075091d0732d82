//! Completion callbacks supplied by the caller.
//!
//! Two contracts exist. A [`WordCompleter`] sees the whole line and cursor
//! and splits the result into `head ++ candidate ++ tail`, so it can complete
//! a word in the middle of the line. A plain [`Completer`] only sees the text
//! left of the cursor and proposes replacements for all of it; the editor
//! adapts it to the word contract with an empty head and the text right of
//! the cursor as tail.
//!
//! Both traits have blanket impls for closures, so callers can pass a plain
//! `Fn` without naming a type.

/// Completes the text left of the cursor as a whole.
pub trait Completer {
    /// `prefix` is the line content up to the cursor. Each candidate replaces
    /// the entire prefix.
    fn complete(&self, prefix: &str) -> Vec<String>;
}

impl<F> Completer for F
where
    F: Fn(&str) -> Vec<String>,
{
    fn complete(&self, prefix: &str) -> Vec<String> {
        self(prefix)
    }
}

/// Completes the word around the cursor.
pub trait WordCompleter {
    /// Given the full line and the cursor as a code-point index, returns
    /// `(head, candidates, tail)`; the completed line is
    /// `head ++ candidate ++ tail` with the cursor after the candidate.
    fn complete(&self, line: &str, pos: usize) -> (String, Vec<String>, String);
}

impl<F> WordCompleter for F
where
    F: Fn(&str, usize) -> (String, Vec<String>, String),
{
    fn complete(&self, line: &str, pos: usize) -> (String, Vec<String>, String) {
        self(line, pos)
    }
}

/// Adapter lifting a [`Completer`] to the word contract.
pub(crate) struct PrefixCompleter<C> {
    pub(crate) inner: C,
}

impl<C: Completer> WordCompleter for PrefixCompleter<C> {
    fn complete(&self, line: &str, pos: usize) -> (String, Vec<String>, String) {
        let byte_pos = line
            .char_indices()
            .nth(pos)
            .map_or(line.len(), |(i, _)| i);
        let candidates = self.inner.complete(&line[..byte_pos]);
        (String::new(), candidates, line[byte_pos..].to_owned())
    }
}
