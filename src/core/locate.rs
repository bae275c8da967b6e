// Composite locator: find the exclusive end of an object or array before parsing it.
// Only the opener's own delimiter pair is counted; the other pair is ignored.
use crate::core::error::{Error, ErrorKind, Result};
use crate::core::options::ScanMode;

/// Returns the offset one past the delimiter that closes the composite opened at `at`.
pub fn locate_composite(text: &str, at: usize, mode: ScanMode) -> Result<usize> {
    let bytes = text.as_bytes();
    let (open, close, label) = match bytes.get(at) {
        Some(b'{') => (b'{', b'}', "object"),
        Some(b'[') => (b'[', b']', "array"),
        _ => {
            return Err(Error::new(ErrorKind::UnexpectedToken)
                .with_message("expected '{' or '['")
                .with_offset(at));
        }
    };

    let mut depth = 1usize;
    let mut i = at + 1;
    while i < bytes.len() {
        let b = bytes[i];
        if b == b'"' && mode == ScanMode::StringAware {
            i = skip_string(bytes, i);
            continue;
        }
        if b == open {
            depth += 1;
        } else if b == close {
            depth -= 1;
            if depth == 0 {
                return Ok(i + 1);
            }
        }
        i += 1;
    }

    Err(Error::new(ErrorKind::UnterminatedComposite)
        .with_message(format!("{label} opened here is never closed"))
        .with_offset(at)
        .with_hint(format!("add the missing '{}'", close as char)))
}

// Returns the offset after the closing quote, or the text length if the string never closes.
fn skip_string(bytes: &[u8], quote: usize) -> usize {
    let mut i = quote + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'"' => return i + 1,
            _ => i += 1,
        }
    }
    bytes.len()
}
