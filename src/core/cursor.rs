// Offset helpers shared by every sub-parser.
// Sub-parsers never mutate a shared cursor; each returns the offset it stopped at.

/// A decoded item together with the offset one past the text it consumed.
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed<T> {
    pub value: T,
    pub next: usize,
}

impl<T> Parsed<T> {
    pub fn new(value: T, next: usize) -> Self {
        Self { value, next }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Parsed<U> {
        Parsed {
            value: f(self.value),
            next: self.next,
        }
    }
}

/// First offset at or after `at` (and before `end`) that is not whitespace.
pub(crate) fn skip_whitespace(text: &str, at: usize, end: usize) -> usize {
    let Some(rest) = text.get(at..end) else {
        return at;
    };
    rest.char_indices()
        .find(|(_, c)| !c.is_whitespace())
        .map(|(idx, _)| at + idx)
        .unwrap_or(end)
}

/// First offset in `at..end` holding `needle`, or `end` when absent.
pub(crate) fn find_byte(text: &str, at: usize, end: usize, needle: u8) -> usize {
    let bytes = text.as_bytes();
    let end = end.min(bytes.len());
    if at >= end {
        return at;
    }
    bytes[at..end]
        .iter()
        .position(|b| *b == needle)
        .map(|idx| at + idx)
        .unwrap_or(end)
}

pub(crate) fn char_at(text: &str, at: usize) -> Option<char> {
    text.get(at..).and_then(|rest| rest.chars().next())
}

/// Human label for the character at `at`, used in diagnostics.
pub(crate) fn describe_at(text: &str, at: usize) -> String {
    match char_at(text, at) {
        Some(c) => format!("{c:?}"),
        None => "end of input".to_string(),
    }
}
