// String and number sub-parsers. Neither is bounded by an enclosing composite;
// both read until their own terminator and report the offset just past it.
use crate::core::cursor::{Parsed, describe_at};
use crate::core::error::{Error, ErrorKind, Result};
use crate::core::value::Value;

/// Parses the quoted string whose opening `"` sits at `at`, resolving escapes.
pub fn parse_string(text: &str, at: usize) -> Result<Parsed<String>> {
    let body_start = at + 1;
    let rest = match text.get(at..) {
        Some(rest) if rest.starts_with('"') => &text[body_start..],
        _ => {
            return Err(Error::new(ErrorKind::UnexpectedToken)
                .with_message(format!("expected '\"', found {}", describe_at(text, at)))
                .with_offset(at));
        }
    };

    let mut out = String::new();
    let mut chars = rest.char_indices();
    while let Some((idx, c)) = chars.next() {
        match c {
            '"' => return Ok(Parsed::new(out, body_start + idx + 1)),
            '\\' => {
                let Some((_, escaped)) = chars.next() else {
                    break;
                };
                out.push(unescape(escaped).ok_or_else(|| {
                    Error::new(ErrorKind::IllegalEscape)
                        .with_message(format!("illegal escape sequence '\\{escaped}'"))
                        .with_offset(body_start + idx)
                        .with_hint(r#"supported escapes: \" \\ \/ \b \f \n \r \t"#)
                })?);
            }
            _ => out.push(c),
        }
    }

    Err(Error::new(ErrorKind::UnterminatedString)
        .with_message(format!("unterminated string starting at offset {at}"))
        .with_offset(at))
}

fn unescape(c: char) -> Option<char> {
    match c {
        '"' => Some('"'),
        '\\' => Some('\\'),
        '/' => Some('/'),
        't' => Some('\t'),
        'r' => Some('\r'),
        'n' => Some('\n'),
        'b' => Some('\u{8}'),
        'f' => Some('\u{c}'),
        // \uXXXX is deliberately unsupported.
        _ => None,
    }
}

/// Parses the numeric literal starting at `at`.
///
/// The lexeme is the longest run of digits, `.`, `+`, `-`, `e`, `E`; its shape, not its
/// grammar, decides the variant. Anything containing `.`, `e` or `E` becomes a
/// [`Value::Float`], everything else a [`Value::Integer`].
pub fn parse_number(text: &str, at: usize) -> Result<Parsed<Value>> {
    let bytes = text.as_bytes();
    match bytes.get(at) {
        Some(b) if b.is_ascii_digit() || *b == b'-' => {}
        _ => {
            return Err(Error::new(ErrorKind::UnexpectedToken)
                .with_message(format!(
                    "expected digit or '-', found {}",
                    describe_at(text, at)
                ))
                .with_offset(at));
        }
    }

    let end = bytes[at..]
        .iter()
        .position(|b| !is_number_byte(*b))
        .map(|idx| at + idx)
        .unwrap_or(bytes.len());
    let lexeme = &text[at..end];

    let value = if lexeme.contains(['.', 'e', 'E']) {
        lexeme
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|err| malformed(lexeme, at).with_source(err))?
    } else {
        lexeme
            .parse::<i32>()
            .map(Value::Integer)
            .map_err(|err| malformed(lexeme, at).with_source(err))?
    };
    Ok(Parsed::new(value, end))
}

fn is_number_byte(b: u8) -> bool {
    b.is_ascii_digit() || matches!(b, b'.' | b'+' | b'-' | b'e' | b'E')
}

fn malformed(lexeme: &str, at: usize) -> Error {
    Error::new(ErrorKind::MalformedNumber)
        .with_message(format!("cannot convert number literal {lexeme:?}"))
        .with_offset(at)
}
