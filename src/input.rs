//! Purpose: Resolve the CLI's document source into one in-memory string.
//! Exports: `InputSource`, `read_input`.
//! Role: Keep inline / file / stdin selection rules in one place for every subcommand.
//! Invariants: Exactly one source is used; inline DATA and --file are mutually exclusive.
//! Invariants: `-` as a file path means stdin.
use std::io::{self, Read};
use std::path::PathBuf;

use boundjson::api::{Error, ErrorKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum InputSource {
    Inline(String),
    File(PathBuf),
    Stdin,
}

impl InputSource {
    pub(crate) fn resolve(data: Option<String>, file: Option<String>) -> Result<Self, Error> {
        match (data, file) {
            (Some(_), Some(_)) => Err(Error::new(ErrorKind::Usage)
                .with_message("multiple inputs provided")
                .with_hint("Use only one of INPUT, --file, or stdin.")),
            (Some(data), None) => Ok(InputSource::Inline(data)),
            (None, Some(file)) if file == "-" => Ok(InputSource::Stdin),
            (None, Some(file)) => Ok(InputSource::File(PathBuf::from(file))),
            (None, None) => Ok(InputSource::Stdin),
        }
    }

    pub(crate) fn label(&self) -> String {
        match self {
            InputSource::Inline(_) => "<inline>".to_string(),
            InputSource::File(path) => path.display().to_string(),
            InputSource::Stdin => "<stdin>".to_string(),
        }
    }
}

pub(crate) fn read_input(source: InputSource) -> Result<String, Error> {
    match source {
        InputSource::Inline(data) => Ok(data),
        InputSource::File(path) => std::fs::read_to_string(&path).map_err(|err| {
            Error::new(ErrorKind::Io)
                .with_message("failed to read input file")
                .with_path(path)
                .with_source(err)
        }),
        InputSource::Stdin => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text).map_err(|err| {
                Error::new(ErrorKind::Io)
                    .with_message("failed to read stdin")
                    .with_source(err)
            })?;
            Ok(text)
        }
    }
}
