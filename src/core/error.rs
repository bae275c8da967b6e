//! Purpose: Model every parse and CLI failure as one structured error type.
//! Exports: `Error`, `ErrorKind`, `Result`, `to_exit_code`.
//! Role: Shared failure vocabulary for the parser core, the public API, and the CLI.
//! Invariants: A failure is raised at detection and propagated unchanged; no partial results.
//! Invariants: Exit-code mapping is stable once published; new kinds get new codes.
use std::error::Error as StdError;
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ErrorKind {
    /// Absent, empty, or whitespace-only top-level text.
    InvalidInput,
    /// A character that does not begin any recognized value, or structural junk in strict mode.
    UnexpectedToken,
    /// An object or array whose closing delimiter never appears.
    UnterminatedComposite,
    UnterminatedString,
    IllegalEscape,
    MalformedNumber,
    /// Composite nesting exceeded the configured limit.
    NestingTooDeep,
    Usage,
    Io,
    Internal,
}

impl ErrorKind {
    pub fn is_syntax(self) -> bool {
        matches!(
            self,
            ErrorKind::UnexpectedToken
                | ErrorKind::UnterminatedComposite
                | ErrorKind::UnterminatedString
                | ErrorKind::IllegalEscape
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    message: Option<String>,
    hint: Option<String>,
    path: Option<PathBuf>,
    offset: Option<usize>,
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            hint: None,
            path: None,
            offset: None,
            source: None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Byte offset into the trimmed input where the failure was detected.
    pub fn offset(&self) -> Option<usize> {
        self.offset
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.kind)?;
        if let Some(message) = &self.message {
            write!(f, ": {message}")?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }
        if let Some(offset) = self.offset {
            write!(f, " (offset: {offset})")?;
        }
        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|source| source.as_ref() as &(dyn StdError + 'static))
    }
}

pub fn to_exit_code(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::Internal => 1,
        ErrorKind::Usage => 2,
        ErrorKind::Io => 3,
        ErrorKind::InvalidInput => 4,
        ErrorKind::UnexpectedToken
        | ErrorKind::UnterminatedComposite
        | ErrorKind::UnterminatedString
        | ErrorKind::IllegalEscape => 5,
        ErrorKind::MalformedNumber => 6,
        ErrorKind::NestingTooDeep => 7,
    }
}

#[cfg(test)]
mod tests {
    use super::{Error, ErrorKind, to_exit_code};

    #[test]
    fn exit_code_mapping_is_stable() {
        let cases = [
            (ErrorKind::Internal, 1),
            (ErrorKind::Usage, 2),
            (ErrorKind::Io, 3),
            (ErrorKind::InvalidInput, 4),
            (ErrorKind::UnexpectedToken, 5),
            (ErrorKind::UnterminatedComposite, 5),
            (ErrorKind::UnterminatedString, 5),
            (ErrorKind::IllegalEscape, 5),
            (ErrorKind::MalformedNumber, 6),
            (ErrorKind::NestingTooDeep, 7),
        ];

        for (kind, code) in cases {
            assert_eq!(to_exit_code(kind), code);
        }
    }

    #[test]
    fn display_includes_message_and_offset() {
        let err = Error::new(ErrorKind::IllegalEscape)
            .with_message("illegal escape '\\q'")
            .with_offset(7);
        assert_eq!(err.to_string(), "IllegalEscape: illegal escape '\\q' (offset: 7)");
    }

    #[test]
    fn display_without_details_is_kind_only() {
        assert_eq!(Error::new(ErrorKind::InvalidInput).to_string(), "InvalidInput");
    }

    #[test]
    fn source_chain_is_exposed() {
        use std::error::Error as _;

        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = Error::new(ErrorKind::Io).with_source(io);
        assert_eq!(err.source().map(|s| s.to_string()), Some("missing".to_string()));
    }

    #[test]
    fn syntax_kinds_are_grouped() {
        assert!(ErrorKind::UnexpectedToken.is_syntax());
        assert!(ErrorKind::IllegalEscape.is_syntax());
        assert!(!ErrorKind::MalformedNumber.is_syntax());
        assert!(!ErrorKind::NestingTooDeep.is_syntax());
    }
}
