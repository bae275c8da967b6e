//! Purpose: Decode JSON text into a `Value` tree with locate-then-parse composites.
//! Exports: `Parser`, `parse_document`.
//! Role: Value dispatcher plus the bounded object and array parsers.
//! Invariants: A composite is located (exclusive end found) before any of its members are parsed.
//! Invariants: Every method returns the offset one past what it consumed; no shared cursor.
//! Invariants: Nesting depth is checked on entry to each composite, before recursion.
//! Notes: Structural junk between members is skipped unless `strict_members` is set.
use tracing::{debug, trace};

use crate::core::cursor::{Parsed, describe_at, find_byte, skip_whitespace};
use crate::core::error::{Error, ErrorKind, Result};
use crate::core::locate::locate_composite;
use crate::core::options::ParseOptions;
use crate::core::scalar::{parse_number, parse_string};
use crate::core::value::{Object, Value};

const LITERALS: [(&str, Value); 3] = [
    ("true", Value::Boolean(true)),
    ("false", Value::Boolean(false)),
    ("null", Value::Null),
];

/// Stateful parser over one input text.
///
/// The only state is the options and the current composite depth; offsets are passed in
/// and returned explicitly.
#[derive(Debug)]
pub struct Parser<'a> {
    text: &'a str,
    options: ParseOptions,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(text: &'a str, options: ParseOptions) -> Self {
        Self {
            text,
            options,
            depth: 0,
        }
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    pub fn options(&self) -> ParseOptions {
        self.options
    }

    /// Current composite nesting; zero outside any object or array.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Parses the value starting at `at`, skipping leading whitespace first.
    pub fn parse_value(&mut self, at: usize) -> Result<Parsed<Value>> {
        let at = skip_whitespace(self.text, at, self.text.len());
        let rest = self.text.get(at..).unwrap_or("");
        match rest.as_bytes().first() {
            Some(b'{' | b'[') => self.parse_composite(at),
            Some(b'"') => Ok(parse_string(self.text, at)?.map(Value::String)),
            Some(b) if b.is_ascii_digit() || *b == b'-' => parse_number(self.text, at),
            _ => {
                for (literal, value) in LITERALS {
                    if rest.starts_with(literal) {
                        return Ok(Parsed::new(value, at + literal.len()));
                    }
                }
                Err(Error::new(ErrorKind::UnexpectedToken)
                    .with_message(format!(
                        "unexpected {} in JSON",
                        describe_at(self.text, at)
                    ))
                    .with_offset(at))
            }
        }
    }

    fn parse_composite(&mut self, at: usize) -> Result<Parsed<Value>> {
        self.enter(at)?;
        let result = self.locate_and_parse(at);
        self.depth -= 1;
        result
    }

    fn locate_and_parse(&mut self, at: usize) -> Result<Parsed<Value>> {
        let end = locate_composite(self.text, at, self.options.scan)?;
        trace!(at, end, depth = self.depth, "located composite");
        if self.text.as_bytes()[at] == b'{' {
            self.parse_object(at, end)
        } else {
            self.parse_array(at, end)
        }
    }

    fn enter(&mut self, at: usize) -> Result<()> {
        if self.depth >= self.options.max_depth {
            return Err(Error::new(ErrorKind::NestingTooDeep)
                .with_message(format!(
                    "nesting deeper than {} levels",
                    self.options.max_depth
                ))
                .with_offset(at));
        }
        self.depth += 1;
        Ok(())
    }

    /// Parses the object opened at `at` whose exclusive end is `end`.
    ///
    /// In the default mode anything between members that is not the expected
    /// delimiter is skipped, and a key with no `:` before `end` is dropped.
    pub fn parse_object(&mut self, at: usize, end: usize) -> Result<Parsed<Value>> {
        self.check_bounds(at, end, b'{')?;
        let strict = self.options.strict_members;
        let close = end - 1;
        let mut map = Object::new();
        let mut pos = at + 1;

        while pos < end {
            if strict {
                pos = skip_whitespace(self.text, pos, end);
                if pos >= close {
                    break;
                }
                if self.byte(pos) != Some(b'"') {
                    return Err(self.unexpected(pos, "expected object key"));
                }
            } else {
                pos = find_byte(self.text, pos, end, b'"');
                if pos >= end {
                    break;
                }
            }

            let key = parse_string(self.text, pos)?;
            let colon = if strict {
                let colon = skip_whitespace(self.text, key.next, end);
                if colon >= end || self.byte(colon) != Some(b':') {
                    return Err(self.unexpected(colon, "expected ':' after object key"));
                }
                colon
            } else {
                find_byte(self.text, key.next, end, b':')
            };
            if colon >= end {
                pos = end;
                break;
            }

            pos = skip_whitespace(self.text, colon + 1, end);
            if pos >= end {
                break;
            }
            let value = self.parse_value(pos)?;
            map.insert(key.value, value.value);
            pos = value.next;

            if strict {
                pos = self.strict_separator(pos, end, "object")?;
            } else {
                pos = find_byte(self.text, pos, end, b',');
                if pos < end {
                    pos += 1;
                }
            }
        }

        Ok(Parsed::new(Value::Object(map), pos.max(end)))
    }

    /// Parses the array opened at `at` whose exclusive end is `end`.
    pub fn parse_array(&mut self, at: usize, end: usize) -> Result<Parsed<Value>> {
        self.check_bounds(at, end, b'[')?;
        let strict = self.options.strict_members;
        let close = end - 1;
        let mut items = Vec::new();
        let mut pos = at + 1;

        while pos < end {
            pos = skip_whitespace(self.text, pos, end);
            if pos >= end || (pos == close && self.byte(pos) == Some(b']')) {
                break;
            }

            let value = self.parse_value(pos)?;
            items.push(value.value);
            pos = value.next;

            if strict {
                pos = self.strict_separator(pos, end, "array")?;
            } else {
                pos = find_byte(self.text, pos, end, b',');
                if pos < end {
                    pos += 1;
                }
            }
        }

        Ok(Parsed::new(Value::Array(items), pos.max(end)))
    }

    // Consumes the `,` after a member, or stops at the closer. Returns the next scan offset.
    fn strict_separator(&self, pos: usize, end: usize, label: &str) -> Result<usize> {
        let close = end - 1;
        let pos = skip_whitespace(self.text, pos, end);
        if pos >= close {
            return Ok(end);
        }
        if self.byte(pos) != Some(b',') {
            return Err(self.unexpected(pos, &format!("expected ',' or end of {label}")));
        }
        let after = skip_whitespace(self.text, pos + 1, end);
        if after >= close {
            return Err(self.unexpected(pos, &format!("trailing comma in {label}")));
        }
        Ok(after)
    }

    fn check_bounds(&self, at: usize, end: usize, open: u8) -> Result<()> {
        if self.byte(at) != Some(open) {
            return Err(self.unexpected(at, &format!("expected '{}'", open as char)));
        }
        if end <= at || end > self.text.len() {
            return Err(Error::new(ErrorKind::InvalidInput)
                .with_message(format!("composite bounds {at}..{end} are out of range"))
                .with_offset(at));
        }
        Ok(())
    }

    fn byte(&self, at: usize) -> Option<u8> {
        self.text.as_bytes().get(at).copied()
    }

    fn unexpected(&self, at: usize, expectation: &str) -> Error {
        Error::new(ErrorKind::UnexpectedToken)
            .with_message(format!("{expectation}, found {}", describe_at(self.text, at)))
            .with_offset(at)
    }
}

/// Entry point: validates the text, trims it, and decodes the first value.
///
/// Offsets in the result and in errors refer to the trimmed text.
pub fn parse_document(text: Option<&str>, options: ParseOptions) -> Result<Parsed<Value>> {
    let text = match text {
        Some(text) if !text.is_empty() => text.trim(),
        _ => {
            return Err(Error::new(ErrorKind::InvalidInput)
                .with_message("JSON text cannot be absent or empty"));
        }
    };
    if text.is_empty() {
        return Err(Error::new(ErrorKind::InvalidInput)
            .with_message("JSON text contains only whitespace"));
    }

    let mut parser = Parser::new(text, options);
    let parsed = parser.parse_value(0)?;

    let trailing = skip_whitespace(text, parsed.next, text.len());
    if trailing < text.len() {
        if options.reject_trailing {
            return Err(Error::new(ErrorKind::UnexpectedToken)
                .with_message(format!(
                    "trailing {} after top-level value",
                    describe_at(text, trailing)
                ))
                .with_offset(trailing));
        }
        debug!(
            consumed = parsed.next,
            len = text.len(),
            "ignoring trailing text after top-level value"
        );
    }
    debug!(kind = parsed.value.kind_name(), consumed = parsed.next, "parsed document");
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::{Parser, parse_document};
    use crate::core::error::ErrorKind;
    use crate::core::options::{ParseOptions, ScanMode};
    use crate::core::value::{Object, Value};

    fn parse(text: &str) -> Value {
        parse_document(Some(text), ParseOptions::default())
            .unwrap()
            .value
    }

    fn parse_err(text: &str, options: ParseOptions) -> ErrorKind {
        parse_document(Some(text), options).unwrap_err().kind()
    }

    fn object(pairs: &[(&str, Value)]) -> Value {
        Value::Object(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect::<Object>(),
        )
    }

    #[test]
    fn literals_advance_by_their_length() {
        let cases = [
            ("true", Value::Boolean(true), 4),
            ("false", Value::Boolean(false), 5),
            ("null", Value::Null, 4),
        ];
        for (text, expected, next) in cases {
            let parsed = Parser::new(text, ParseOptions::default())
                .parse_value(0)
                .unwrap();
            assert_eq!(parsed.value, expected);
            assert_eq!(parsed.next, next);
        }
    }

    #[test]
    fn literal_prefix_is_enough() {
        let parsed = Parser::new("trueish", ParseOptions::default())
            .parse_value(0)
            .unwrap();
        assert_eq!(parsed.value, Value::Boolean(true));
        assert_eq!(parsed.next, 4);
    }

    #[test]
    fn dispatcher_skips_leading_whitespace() {
        let text = " -3.14159";
        let parsed = Parser::new(text, ParseOptions::default())
            .parse_value(0)
            .unwrap();
        assert_eq!(parsed.value, Value::Float(-3.14159));
        assert_eq!(parsed.next, text.len());
    }

    #[test]
    fn unknown_start_is_unexpected_token_with_offset() {
        let err = Parser::new("  @", ParseOptions::default())
            .parse_value(0)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedToken);
        assert_eq!(err.offset(), Some(2));
        assert!(err.message().unwrap_or_default().contains("'@'"));

        let err = Parser::new("   ", ParseOptions::default())
            .parse_value(0)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedToken);
        assert!(err.message().unwrap_or_default().contains("end of input"));
    }

    #[test]
    fn parses_nested_document() {
        let value = parse(r#"{"debug":"on","window":{"title":"sample","size":500}}"#);
        let expected = object(&[
            ("debug", Value::from("on")),
            (
                "window",
                object(&[("title", Value::from("sample")), ("size", Value::Integer(500))]),
            ),
        ]);
        assert_eq!(value, expected);
    }

    #[test]
    fn parses_empty_composites() {
        assert_eq!(parse("{}"), Value::Object(Object::new()));
        assert_eq!(parse("[]"), Value::Array(vec![]));
        assert_eq!(parse("[ ]"), Value::Array(vec![]));
        assert_eq!(parse("{ \n }"), Value::Object(Object::new()));
    }

    #[test]
    fn parses_arrays_with_mixed_members() {
        let value = parse(r#"[1, 2.5, "x", [true, null], {"k": []}]"#);
        assert_eq!(
            value,
            Value::Array(vec![
                Value::Integer(1),
                Value::Float(2.5),
                Value::from("x"),
                Value::Array(vec![Value::Boolean(true), Value::Null]),
                object(&[("k", Value::Array(vec![]))]),
            ])
        );
    }

    #[test]
    fn duplicate_keys_last_write_wins() {
        assert_eq!(parse(r#"{"a":1,"a":2}"#), object(&[("a", Value::Integer(2))]));
    }

    #[test]
    fn composite_next_is_exclusive_end() {
        let text = r#"[1, {"a": [2]}] "#;
        let parsed = Parser::new(text, ParseOptions::default())
            .parse_value(0)
            .unwrap();
        assert_eq!(parsed.next, 15);
    }

    #[test]
    fn permissive_mode_skips_junk_between_members() {
        assert_eq!(
            parse(r#"{ junk "a" junk : 1 junk , ; "b":2}"#),
            object(&[("a", Value::Integer(1)), ("b", Value::Integer(2))])
        );
        assert_eq!(
            parse("[1 x, 2 y]"),
            Value::Array(vec![Value::Integer(1), Value::Integer(2)])
        );
        assert_eq!(parse("[1,]"), Value::Array(vec![Value::Integer(1)]));
    }

    #[test]
    fn permissive_mode_drops_key_without_colon() {
        assert_eq!(parse(r#"{"a"}"#), Value::Object(Object::new()));
        assert_eq!(parse(r#"{"a":1,"b"}"#), object(&[("a", Value::Integer(1))]));
    }

    #[test]
    fn missing_value_after_colon_is_unexpected_token() {
        assert_eq!(
            parse_err(r#"{"a": }"#, ParseOptions::default()),
            ErrorKind::UnexpectedToken
        );
    }

    #[test]
    fn strict_mode_rejects_structural_junk() {
        let strict = ParseOptions::default().strict_members(true);
        for text in [
            r#"{ junk "a":1}"#,
            r#"{"a" 1}"#,
            r#"{"a":1 "b":2}"#,
            r#"{"a":1,}"#,
            "[1 2]",
            "[1,]",
            "[1 x]",
        ] {
            assert_eq!(parse_err(text, strict), ErrorKind::UnexpectedToken, "input {text}");
        }
    }

    #[test]
    fn strict_mode_accepts_well_formed_documents() {
        let strict = ParseOptions::strict();
        let value = parse_document(Some(r#" { "a" : [ 1 , 2 ] , "b" : { } } "#), strict)
            .unwrap()
            .value;
        assert_eq!(
            value,
            object(&[
                ("a", Value::Array(vec![Value::Integer(1), Value::Integer(2)])),
                ("b", Value::Object(Object::new())),
            ])
        );
    }

    #[test]
    fn string_aware_scan_handles_delimiters_in_strings() {
        let value = parse(r#"{"a":"}","b":["]", "["]}"#);
        assert_eq!(
            value,
            object(&[
                ("a", Value::from("}")),
                ("b", Value::Array(vec![Value::from("]"), Value::from("[")])),
            ])
        );
    }

    #[test]
    fn literal_scan_mis_bounds_strings_with_delimiters() {
        let literal = ParseOptions::compatible();
        assert_eq!(
            parse_err(r#"["[", 1]"#, literal),
            ErrorKind::UnterminatedComposite
        );
        let parsed = parse_document(Some(r#"{"a":"}","b":2}"#), literal).unwrap();
        assert_eq!(parsed.value, object(&[("a", Value::from("}"))]));
        assert_eq!(parsed.next, 8);
    }

    #[test]
    fn trailing_text_is_ignored_unless_rejected() {
        let parsed = parse_document(Some("[1] [2]"), ParseOptions::default()).unwrap();
        assert_eq!(parsed.value, Value::Array(vec![Value::Integer(1)]));
        assert_eq!(parsed.next, 3);

        let err = parse_document(Some("[1] [2]"), ParseOptions::default().reject_trailing(true))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedToken);
        assert_eq!(err.offset(), Some(4));

        assert!(parse_document(Some(" [1]  "), ParseOptions::strict()).is_ok());
    }

    #[test]
    fn nesting_limit_counts_composites() {
        let options = ParseOptions::default().max_depth(2);
        assert!(parse_document(Some("[[1]]"), options).is_ok());
        assert!(parse_document(Some(r#"{"a":[1]}"#), options).is_ok());
        assert_eq!(parse_err("[[[1]]]", options), ErrorKind::NestingTooDeep);
        assert_eq!(parse_err(r#"{"a":{"b":{}}}"#, options), ErrorKind::NestingTooDeep);
    }

    #[test]
    fn deep_nesting_fails_predictably_with_default_limit() {
        let depth = 10_000;
        let text = format!("{}{}", "[".repeat(depth), "]".repeat(depth));
        assert_eq!(parse_err(&text, ParseOptions::default()), ErrorKind::NestingTooDeep);
    }

    #[test]
    fn depth_returns_to_zero_after_parse() {
        let mut parser = Parser::new("[[1],[2]]", ParseOptions::default());
        parser.parse_value(0).unwrap();
        assert_eq!(parser.depth(), 0);
    }

    #[test]
    fn bounded_parsers_validate_their_inputs() {
        let mut parser = Parser::new("[1]", ParseOptions::default());
        assert_eq!(
            parser.parse_object(0, 3).unwrap_err().kind(),
            ErrorKind::UnexpectedToken
        );
        assert_eq!(
            parser.parse_array(0, 9).unwrap_err().kind(),
            ErrorKind::InvalidInput
        );
        assert_eq!(
            parser.parse_array(0, 3).unwrap().value,
            Value::Array(vec![Value::Integer(1)])
        );
    }

    #[test]
    fn errors_propagate_from_nested_values() {
        let defaults = ParseOptions::default();
        assert_eq!(parse_err("{", defaults), ErrorKind::UnterminatedComposite);
        assert_eq!(parse_err("\"abc", defaults), ErrorKind::UnterminatedString);
        assert_eq!(parse_err(r#"{"a":"\q"}"#, defaults), ErrorKind::IllegalEscape);
        assert_eq!(parse_err("[1, 99999999999]", defaults), ErrorKind::MalformedNumber);
        assert_eq!(parse_err(r#"{"a":[1, @]}"#, defaults), ErrorKind::UnexpectedToken);
    }

    #[test]
    fn empty_and_absent_input_is_invalid() {
        let defaults = ParseOptions::default();
        assert_eq!(parse_document(None, defaults).unwrap_err().kind(), ErrorKind::InvalidInput);
        assert_eq!(parse_err("", defaults), ErrorKind::InvalidInput);
        assert_eq!(parse_err(" \n\t", defaults), ErrorKind::InvalidInput);
    }

    #[test]
    fn scan_mode_is_carried_by_parser() {
        let parser = Parser::new("[]", ParseOptions::compatible());
        assert_eq!(parser.options().scan, ScanMode::Literal);
        assert_eq!(parser.text(), "[]");
    }
}
