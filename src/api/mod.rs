//! Purpose: Define the stable public Rust API boundary for boundjson.
//! Exports: Entry points, the bounded sub-parsers, and the types they return.
//! Role: Public, additive-only surface; callers should not need `crate::core` paths.
//! Invariants: Free functions use `ParseOptions::default()` unless they take options.
//! Invariants: Sub-parser offsets are byte offsets into the text they are given.

#[doc(hidden)]
pub use crate::core::error::to_exit_code;
pub use crate::core::cursor::Parsed;
pub use crate::core::error::{Error, ErrorKind, Result};
pub use crate::core::locate::locate_composite;
pub use crate::core::options::{DEFAULT_MAX_DEPTH, ParseOptions, ScanMode};
pub use crate::core::parser::Parser;
pub use crate::core::scalar::{parse_number, parse_string};
pub use crate::core::value::{Object, Value};

use crate::core::parser::parse_document;

/// Decodes `text` with default options.
///
/// ```
/// use boundjson::api::{parse, Value};
///
/// let value = parse(r#"{"size": 500, "ratio": 0.5}"#).unwrap();
/// assert_eq!(value.get("size"), Some(&Value::Integer(500)));
/// assert_eq!(value.get("ratio"), Some(&Value::Float(0.5)));
/// ```
pub fn parse(text: &str) -> Result<Value> {
    parse_with_options(text, ParseOptions::default())
}

/// Like [`parse`], but an absent text is reported as `InvalidInput` instead of being
/// unrepresentable.
pub fn parse_opt(text: Option<&str>) -> Result<Value> {
    parse_document(text, ParseOptions::default()).map(|parsed| parsed.value)
}

pub fn parse_with_options(text: &str, options: ParseOptions) -> Result<Value> {
    parse_document(Some(text), options).map(|parsed| parsed.value)
}

/// Decodes the first value and reports how many bytes of the trimmed text it consumed.
pub fn parse_prefix(text: &str) -> Result<Parsed<Value>> {
    parse_document(Some(text), ParseOptions::default())
}

pub fn parse_prefix_with_options(text: &str, options: ParseOptions) -> Result<Parsed<Value>> {
    parse_document(Some(text), options)
}

/// Parses one value at `at` (leading whitespace skipped) without trimming or trailing checks.
pub fn parse_value(text: &str, at: usize) -> Result<Parsed<Value>> {
    Parser::new(text, ParseOptions::default()).parse_value(at)
}

/// Parses the object at `at` whose exclusive end `end` came from [`locate_composite`].
pub fn parse_object(text: &str, at: usize, end: usize) -> Result<Parsed<Value>> {
    Parser::new(text, ParseOptions::default()).parse_object(at, end)
}

/// Parses the array at `at` whose exclusive end `end` came from [`locate_composite`].
pub fn parse_array(text: &str, at: usize, end: usize) -> Result<Parsed<Value>> {
    Parser::new(text, ParseOptions::default()).parse_array(at, end)
}
